use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::paper_repository::{PaperRepository, PaperStoreError};
use crate::domain::papers::paper::{NewPaper, Paper};

#[derive(Default)]
struct Collection {
    papers: Vec<Paper>,
    ids: HashSet<String>,
    next_id: u64,
}

impl Collection {
    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if !self.ids.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Process-local paper store. Every read and write of the collection and the id
/// counter goes through one mutex, held only for the push or the copy.
#[derive(Clone, Default)]
pub struct InMemoryPaperRepository {
    inner: Arc<Mutex<Collection>>,
}

impl InMemoryPaperRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.papers.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PaperRepository for InMemoryPaperRepository {
    async fn insert(&self, paper: NewPaper) -> Result<Paper, PaperStoreError> {
        let missing = paper.details.missing_required();
        if !missing.is_empty() {
            return Err(PaperStoreError::MissingFields(missing));
        }
        let requested = paper.requested_id().map(str::to_owned);

        let mut guard = self.inner.lock().await;
        let id = match requested {
            Some(id) if guard.ids.contains(&id) => return Err(PaperStoreError::DuplicateId(id)),
            Some(id) => id,
            None => guard.allocate_id(),
        };
        let stored = Paper {
            id: id.clone(),
            details: paper.details,
            visibility: paper.visibility,
        };
        guard.ids.insert(id);
        guard.papers.push(stored.clone());
        Ok(stored)
    }

    async fn snapshot(&self) -> Vec<Paper> {
        self.inner.lock().await.papers.clone()
    }
}
