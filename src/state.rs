use std::sync::Arc;

use sqlx::SqlitePool;

use crate::dedup::{InMemorySubmissionStore, SubmissionStore};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub dedup: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            dedup: Arc::new(InMemorySubmissionStore::new()),
        }
    }
}
