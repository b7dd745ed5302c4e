use crate::domain::papers::paper::{SubjectId, WorkspaceId};

// Read-only after startup; lookups never block.
pub trait MembershipIndex: Send + Sync {
    fn is_workspace_member(&self, workspace_id: WorkspaceId, subject: SubjectId) -> bool;
    fn is_site_member(&self, subject: SubjectId) -> bool;
}
