use crate::application::access;
use crate::application::ports::membership_index::MembershipIndex;
use crate::application::ports::paper_repository::PaperRepository;
use crate::domain::papers::paper::{Paper, SubjectId};

pub struct ListAccessiblePapers<'a, R, M>
where
    R: PaperRepository + ?Sized,
    M: MembershipIndex + ?Sized,
{
    pub repo: &'a R,
    pub memberships: &'a M,
}

impl<'a, R, M> ListAccessiblePapers<'a, R, M>
where
    R: PaperRepository + ?Sized,
    M: MembershipIndex + ?Sized,
{
    pub async fn execute(&self, subject: SubjectId) -> Vec<Paper> {
        // The store lock is released once the snapshot is taken.
        let snapshot = self.repo.snapshot().await;
        let total = snapshot.len();
        let visible = access::filter_visible(snapshot, subject, self.memberships);
        tracing::debug!(subject, total, visible = visible.len(), "papers_listed");
        visible
    }
}
