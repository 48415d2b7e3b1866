use async_trait::async_trait;

use crate::domain::models::AnalysisRecord;
use crate::error::PersistenceError;

pub mod sqlite;

/// Durable store for completed analyses.
#[async_trait]
pub trait AnalysisRepository: Send + Sync {
    async fn save(&self, record: &AnalysisRecord) -> Result<(), PersistenceError>;

    /// Newest first, at most `limit` records.
    async fn recent(&self, limit: u32) -> Result<Vec<AnalysisRecord>, PersistenceError>;
}
