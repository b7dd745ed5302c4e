use crate::application::ports::paper_repository::{PaperRepository, PaperStoreError};
use crate::domain::papers::paper::{NewPaper, Paper};

pub struct AddPaper<'a, R: PaperRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PaperRepository + ?Sized> AddPaper<'a, R> {
    pub async fn execute(&self, paper: NewPaper) -> Result<Paper, PaperStoreError> {
        let stored = self.repo.insert(paper).await?;
        tracing::info!(
            paper_id = %stored.id,
            owner_id = stored.visibility.owner_id,
            shared = stored.visibility.is_shared,
            scope = stored.visibility.scope.map(|s| s.as_str()).unwrap_or("none"),
            "paper_added"
        );
        Ok(stored)
    }
}
