use std::collections::HashSet;

use crate::application::ports::membership_index::MembershipIndex;
use crate::domain::papers::paper::{SubjectId, WorkspaceId};

#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipIndex {
    workspaces: HashSet<(WorkspaceId, SubjectId)>,
    site: HashSet<SubjectId>,
}

impl InMemoryMembershipIndex {
    pub fn new<W, S>(workspace_members: W, site_members: S) -> Self
    where
        W: IntoIterator<Item = (WorkspaceId, SubjectId)>,
        S: IntoIterator<Item = SubjectId>,
    {
        Self {
            workspaces: workspace_members.into_iter().collect(),
            site: site_members.into_iter().collect(),
        }
    }

    pub fn workspace_pairs(&self) -> usize {
        self.workspaces.len()
    }

    pub fn site_members(&self) -> usize {
        self.site.len()
    }
}

impl MembershipIndex for InMemoryMembershipIndex {
    fn is_workspace_member(&self, workspace_id: WorkspaceId, subject: SubjectId) -> bool {
        self.workspaces.contains(&(workspace_id, subject))
    }

    fn is_site_member(&self, subject: SubjectId) -> bool {
        self.site.contains(&subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_exact() {
        let index = InMemoryMembershipIndex::new([(7, 2), (8, 3)], [1]);
        assert!(index.is_workspace_member(7, 2));
        assert!(!index.is_workspace_member(2, 7));
        assert!(!index.is_workspace_member(7, 3));
        assert!(index.is_site_member(1));
        assert!(!index.is_site_member(2));
    }

    #[test]
    fn duplicate_facts_collapse() {
        let index = InMemoryMembershipIndex::new([(7, 2), (7, 2)], [1, 1, 4]);
        assert_eq!(index.workspace_pairs(), 1);
        assert_eq!(index.site_members(), 2);
    }
}
