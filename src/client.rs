use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::ErrorResponse;
use crate::models::{CreatedResponse, MessageResponse, Room, RoomPayload, StatusPayload};

/// The dashboard gives up on the server after this long.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("failed to build http client: {0}")]
    Build(reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Transport(e)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(i64),
    /// The server saw the same body moments ago and skipped the insert.
    Duplicate,
}

#[derive(Clone, Debug)]
pub struct RoomsClient {
    client: Client,
    base_url: String,
}

impl RoomsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn list_rooms(&self) -> Result<Vec<Room>, ClientError> {
        let response = self.client.get(self.url("/api/rooms")).send().await?;
        json_body(response).await
    }

    pub async fn create_room(&self, room: &RoomPayload) -> Result<CreateOutcome, ClientError> {
        let response = self
            .client
            .post(self.url("/api/rooms"))
            .json(room)
            .send()
            .await?;

        if response.status() == StatusCode::CREATED {
            let created: CreatedResponse = response.json().await?;
            return Ok(CreateOutcome::Created(created.id));
        }

        let _: MessageResponse = json_body(response).await?;
        Ok(CreateOutcome::Duplicate)
    }

    pub async fn update_room(&self, id: i64, room: &RoomPayload) -> Result<String, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/api/rooms/{}", id)))
            .json(room)
            .send()
            .await?;
        let body: MessageResponse = json_body(response).await?;
        Ok(body.message)
    }

    pub async fn set_status(&self, id: i64, status: bool) -> Result<String, ClientError> {
        let response = self
            .client
            .put(self.url(&format!("/api/rooms/{}/status", id)))
            .json(&StatusPayload { status })
            .send()
            .await?;
        let body: MessageResponse = json_body(response).await?;
        Ok(body.message)
    }

    pub async fn delete_room(&self, id: i64) -> Result<String, ClientError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/rooms/{}", id)))
            .send()
            .await?;
        let body: MessageResponse = json_body(response).await?;
        Ok(body.message)
    }
}

async fn json_body<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        return Err(ClientError::Status { status, message });
    }

    Ok(response.json().await?)
}
