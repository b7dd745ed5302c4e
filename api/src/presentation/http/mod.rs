pub mod health;
pub mod papers;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::bootstrap::app_context::AppContext;

#[derive(OpenApi)]
#[openapi(
    paths(
        papers::list_papers,
        papers::add_paper,
        health::health,
    ),
    components(schemas(
        papers::Paper,
        papers::ListPapersRequest,
        papers::PaperListResponse,
        papers::AddPaperRequest,
        papers::AddPaperResponse,
        papers::ErrorResponse,
        health::HealthResp,
    )),
    tags(
        (name = "Papers", description = "Research papers filtered by visibility"),
        (name = "Health", description = "Liveness and directory registration state")
    )
)]
pub struct ApiDoc;

fn cors(ctx: &AppContext) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
        .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);
    match ctx.cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => base.allow_origin(origin),
        Some(Err(_)) | None if ctx.cfg.is_production => base.allow_origin(AllowOrigin::exact(
            HeaderValue::from_static("http://invalid"),
        )),
        // Development convenience
        _ => base.allow_origin(Any),
    }
}

pub fn router(ctx: AppContext) -> Router {
    let body_limit = ctx.cfg.body_limit_bytes;
    let cors = cors(&ctx);
    Router::new()
        .merge(papers::routes(ctx.clone()))
        .merge(health::routes(ctx))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        )
}
