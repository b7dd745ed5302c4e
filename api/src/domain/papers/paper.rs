pub type SubjectId = i64;
pub type WorkspaceId = i64;

/// Visibility category of a shared paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Workspace,
    Site,
    Everyone,
}

impl Scope {
    /// Exact, case-sensitive match on the wire tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "workspace" => Some(Scope::Workspace),
            "site" => Some(Scope::Site),
            "everyone" => Some(Scope::Everyone),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Workspace => "workspace",
            Scope::Site => "site",
            Scope::Everyone => "everyone",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperDetails {
    pub title: String,
    pub authors: String,
    pub r#abstract: String,
    pub cover_image: String,
    pub published_year: i32,
    pub field: String,
    pub classifications: Vec<String>,
    pub doi: Option<String>,
    pub journal: Option<String>,
}

impl PaperDetails {
    /// Names of required descriptive fields that are blank.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.authors.trim().is_empty() {
            missing.push("authors");
        }
        if self.r#abstract.trim().is_empty() {
            missing.push("abstract");
        }
        missing
    }
}

/// Ownership and sharing policy attached to a paper.
///
/// `is_shared` is the master switch: when it is false `scope` and `workspace_id`
/// are never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    pub owner_id: SubjectId,
    pub is_shared: bool,
    pub scope: Option<Scope>,
    pub workspace_id: Option<WorkspaceId>,
}

impl Visibility {
    pub fn private(owner_id: SubjectId) -> Self {
        Self {
            owner_id,
            is_shared: false,
            scope: None,
            workspace_id: None,
        }
    }

    pub fn shared(owner_id: SubjectId, scope: Scope, workspace_id: Option<WorkspaceId>) -> Self {
        Self {
            owner_id,
            is_shared: true,
            scope: Some(scope),
            workspace_id,
        }
    }
}

/// A stored paper. Immutable once the store has assigned its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paper {
    pub id: String,
    pub details: PaperDetails,
    pub visibility: Visibility,
}

/// Insert payload; `id` is assigned by the store when absent or empty.
#[derive(Debug, Clone, Default)]
pub struct NewPaper {
    pub id: Option<String>,
    pub details: PaperDetails,
    pub visibility: Visibility,
}

impl NewPaper {
    pub fn requested_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
