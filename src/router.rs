use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Method, Request, header};
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::{REQUEST_ID_HEADER, logging_middleware};
use crate::middleware::auth::require_auth;
use crate::middleware::role::{require_admin, require_any_role};
use crate::modules::auth::init_auth_router;
use crate::modules::chapters::init_chapters_router;
use crate::modules::contents::init_contents_router;
use crate::modules::courses::init_courses_router;
use crate::modules::enrollments::init_enrollments_router;
use crate::modules::health::init_health_router;
use crate::modules::users::{init_profile_router, init_users_router};
use crate::state::AppState;

/// Wraps `router` so that every route requires a valid token and a known role.
///
/// Layers run outside-in: `require_auth` first, then `require_any_role`.
fn authenticated(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route_layer(middleware::from_fn_with_state(state.clone(), require_any_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
    )
}

pub fn init_router(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let admin_users = init_users_router()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api = Router::new()
        .merge(init_health_router())
        .merge(init_auth_router())
        .merge(authenticated(init_profile_router(), &state))
        .nest("/users", admin_users)
        .nest("/courses", authenticated(init_courses_router(), &state))
        .nest("/chapters", authenticated(init_chapters_router(), &state))
        .nest("/contents", authenticated(init_contents_router(), &state))
        .nest(
            "/enrollments",
            authenticated(init_enrollments_router(), &state),
        );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest("/api", api)
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(
                    request_id_header.clone(),
                    MakeRequestUuid,
                ))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(PropagateRequestIdLayer::new(request_id_header))
                .layer(CatchPanicLayer::new()),
        )
}
