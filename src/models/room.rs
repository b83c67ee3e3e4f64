use serde::{Deserialize, Serialize};

use super::weekdays;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub unidade: String,
    pub curso: String,
    pub periodo: String,
    pub disciplina: String,
    pub docente: String,
    pub dias_semana: Vec<String>,
    pub turno: String,
    pub sala_aula: String,
    pub status: bool,
    pub created_at: String,
}

/// Body of both create and full update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomPayload {
    #[serde(default)]
    pub unidade: String,
    #[serde(default)]
    pub curso: String,
    #[serde(default)]
    pub periodo: String,
    #[serde(default)]
    pub disciplina: String,
    #[serde(default)]
    pub docente: String,
    #[serde(default, deserialize_with = "weekdays::deserialize_lenient")]
    pub dias_semana: Vec<String>,
    #[serde(default)]
    pub turno: String,
    #[serde(default)]
    pub sala_aula: String,
    #[serde(default)]
    pub status: Option<bool>,
}

impl RoomPayload {
    /// Rooms are open unless the caller says otherwise.
    pub fn status_or_default(&self) -> bool {
        self.status.unwrap_or(true)
    }

    /// Field order is fixed by the struct, so bodies that only differ in key
    /// order produce the same key. `status` is resolved first: an omitted
    /// status and `true` insert the same row.
    pub fn dedup_key(&self) -> Result<String, serde_json::Error> {
        let normalized = RoomPayload {
            status: Some(self.status_or_default()),
            ..self.clone()
        };
        serde_json::to_string(&normalized)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_status_keys_like_open() {
        let omitted: RoomPayload = serde_json::from_str(r#"{"sala_aula":"101"}"#).unwrap();
        let open: RoomPayload = serde_json::from_str(r#"{"sala_aula":"101","status":true}"#).unwrap();
        let closed: RoomPayload = serde_json::from_str(r#"{"sala_aula":"101","status":false}"#).unwrap();

        assert_eq!(omitted.dedup_key().unwrap(), open.dedup_key().unwrap());
        assert_ne!(omitted.dedup_key().unwrap(), closed.dedup_key().unwrap());
    }
}
