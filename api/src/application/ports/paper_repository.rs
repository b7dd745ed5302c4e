use async_trait::async_trait;

use crate::domain::papers::paper::{NewPaper, Paper};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaperStoreError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("paper id {0} already exists")]
    DuplicateId(String),
}

#[async_trait]
pub trait PaperRepository: Send + Sync {
    /// Validates and stores a paper, assigning an id when none was supplied.
    /// The returned paper is visible to every snapshot taken after this returns.
    async fn insert(&self, paper: NewPaper) -> Result<Paper, PaperStoreError>;

    /// Point-in-time copy of all papers in insertion order.
    async fn snapshot(&self) -> Vec<Paper>;
}
