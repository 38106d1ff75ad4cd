use std::sync::Arc;

use axum::{
    error_handling::HandleErrorLayer,
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::database::ProblemRepository;
use crate::handlers::{self, problems};
use crate::middleware::{handle_panic, handle_timeout};
use crate::services::ProblemService;

/// Everything a request handler may touch. Built once in `main` and cloned
/// into each request.
#[derive(Clone)]
pub struct AppState {
    pub problems: ProblemService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProblemRepository>, config: AppConfig) -> Self {
        Self {
            problems: ProblemService::new(repo),
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let api = state.config.api.clone();

    let router = Router::new()
        .route(
            "/healthcheck",
            get(handlers::healthcheck).fallback(handlers::method_not_allowed),
        )
        .merge(problem_routes())
        .fallback(handlers::not_found)
        // Global middleware
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .layer(TimeoutLayer::new(api.request_timeout())),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());

    let router = if api.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

fn problem_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/problems",
            get(problems::problem_list).fallback(handlers::method_not_allowed),
        )
        .route(
            "/problems/:id",
            get(problems::problem_show)
                .delete(problems::problem_delete)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/addproblem",
            post(problems::problem_add).fallback(handlers::method_not_allowed),
        )
        .route(
            "/dueproblems",
            get(problems::problem_due).fallback(handlers::method_not_allowed),
        )
}
