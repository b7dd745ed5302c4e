use crate::application::ports::membership_index::MembershipIndex;
use crate::domain::papers::paper::{Paper, Scope, SubjectId};

// Precedence is significant: owner first, then the sharing switch, then scope.
// Anything not explicitly granted is denied, including shared papers without a scope.
pub fn can_access<M>(paper: &Paper, subject: SubjectId, memberships: &M) -> bool
where
    M: MembershipIndex + ?Sized,
{
    let policy = &paper.visibility;
    if policy.owner_id == subject {
        return true;
    }
    if !policy.is_shared {
        return false;
    }
    match policy.scope {
        Some(Scope::Everyone) => true,
        Some(Scope::Site) => memberships.is_site_member(subject),
        Some(Scope::Workspace) => match policy.workspace_id {
            Some(workspace_id) => memberships.is_workspace_member(workspace_id, subject),
            None => false,
        },
        None => false,
    }
}

/// Keeps the papers `subject` may see, preserving their order.
pub fn filter_visible<M>(papers: Vec<Paper>, subject: SubjectId, memberships: &M) -> Vec<Paper>
where
    M: MembershipIndex + ?Sized,
{
    papers
        .into_iter()
        .filter(|paper| can_access(paper, subject, memberships))
        .collect()
}
