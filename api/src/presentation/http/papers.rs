use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::paper_repository::PaperStoreError;
use crate::application::use_cases::papers::add_paper::AddPaper;
use crate::application::use_cases::papers::list_accessible::ListAccessiblePapers;
use crate::bootstrap::app_context::AppContext;
use crate::domain::papers::paper as domain;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub title: String,
    pub authors: String,
    pub r#abstract: String,
    pub cover_image: String,
    pub published_year: i32,
    pub field: String,
    pub classifications: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<String>,
}

// Visibility fields stay internal to the access decision.
impl From<domain::Paper> for Paper {
    fn from(p: domain::Paper) -> Self {
        let d = p.details;
        Paper {
            id: p.id,
            title: d.title,
            authors: d.authors,
            r#abstract: d.r#abstract,
            cover_image: d.cover_image,
            published_year: d.published_year,
            field: d.field,
            classifications: d.classifications,
            doi: d.doi,
            journal: d.journal,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPapersRequest {
    pub subject_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaperListResponse {
    pub papers: Vec<Paper>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddPaperRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub r#abstract: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub published_year: i32,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub classifications: Vec<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub journal: Option<String>,
    pub owner_id: i64,
    #[serde(default)]
    pub is_shared: bool,
    /// One of `workspace`, `site`, `everyone`. Other values leave the paper unscoped.
    #[serde(default)]
    pub scope: Option<String>,
    /// Workspace the `workspace` scope refers to.
    #[serde(default)]
    pub scope_id: Option<i64>,
}

impl From<AddPaperRequest> for domain::NewPaper {
    fn from(req: AddPaperRequest) -> Self {
        let scope = req.scope.as_deref().and_then(|tag| {
            let parsed = domain::Scope::from_tag(tag);
            if parsed.is_none() {
                tracing::warn!(scope = %tag, "unknown_scope_tag_dropped");
            }
            parsed
        });
        domain::NewPaper {
            id: req.id,
            details: domain::PaperDetails {
                title: req.title,
                authors: req.authors,
                r#abstract: req.r#abstract,
                cover_image: req.cover_image,
                published_year: req.published_year,
                field: req.field,
                classifications: req.classifications,
                doi: req.doi.filter(|v| !v.is_empty()),
                journal: req.journal.filter(|v| !v.is_empty()),
            },
            visibility: domain::Visibility {
                owner_id: req.owner_id,
                is_shared: req.is_shared,
                scope,
                workspace_id: req.scope_id,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddPaperResponse {
    pub message: String,
    pub paper: Paper,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

#[utoipa::path(post, path = "/get-research", tag = "Papers", request_body = ListPapersRequest,
    responses((status = 200, body = PaperListResponse), (status = 400, body = ErrorResponse)))]
pub async fn list_papers(
    State(ctx): State<AppContext>,
    payload: Result<Json<ListPapersRequest>, JsonRejection>,
) -> Result<Json<PaperListResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "list_papers_bad_request");
        api_error(StatusCode::BAD_REQUEST, "Invalid request")
    })?;

    let repo = ctx.paper_repo();
    let memberships = ctx.memberships();
    let uc = ListAccessiblePapers {
        repo: repo.as_ref(),
        memberships: memberships.as_ref(),
    };
    let papers = uc.execute(req.subject_id).await;
    Ok(Json(PaperListResponse {
        papers: papers.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(post, path = "/add-paper", tag = "Papers", request_body = AddPaperRequest,
    responses(
        (status = 201, body = AddPaperResponse),
        (status = 400, body = ErrorResponse),
        (status = 409, body = ErrorResponse)
    ))]
pub async fn add_paper(
    State(ctx): State<AppContext>,
    payload: Result<Json<AddPaperRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddPaperResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "add_paper_bad_request");
        api_error(StatusCode::BAD_REQUEST, "Invalid paper data")
    })?;

    let repo = ctx.paper_repo();
    let uc = AddPaper {
        repo: repo.as_ref(),
    };
    let stored = uc.execute(req.into()).await.map_err(|e| match e {
        PaperStoreError::MissingFields(fields) => api_error(
            StatusCode::BAD_REQUEST,
            format!("Missing required fields: {}", fields.join(", ")),
        ),
        PaperStoreError::DuplicateId(id) => api_error(
            StatusCode::CONFLICT,
            format!("Paper id {id} already exists"),
        ),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(AddPaperResponse {
            message: "Paper added successfully".into(),
            paper: stored.into(),
        }),
    ))
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/get-research", post(list_papers))
        .route("/add-paper", post(add_paper))
        .with_state(ctx)
}
