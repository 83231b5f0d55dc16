use axum::http::{header, HeaderName, Method};
use axum::routing::{get, post, put};
use axum::{middleware, Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

pub fn app() -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public account routes
        .merge(account_routes())
        // Tenant resolution and management
        .merge(tenant_routes())
        // Protected todo API
        .merge(todo_routes());

    let router = if config::config().security.enable_cors {
        router.layer(cors_layer())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

fn account_routes() -> Router {
    use public::auth;

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

fn tenant_routes() -> Router {
    // Static /tenant/validate takes precedence over the :id capture
    let public_routes = Router::new()
        .route("/tenant/validate", get(public::tenant::validate))
        .route("/tenant/:id", get(public::tenant::show));

    let protected_routes = Router::new()
        .route("/tenant/create", post(protected::tenant::create))
        .route_layer(middleware::from_fn(jwt_auth_middleware));

    public_routes.merge(protected_routes)
}

fn todo_routes() -> Router {
    use protected::todos;

    Router::new()
        .route("/todos", get(todos::list).post(todos::create))
        .route(
            "/todos/:id",
            get(todos::show).put(todos::update).delete(todos::destroy),
        )
        .route("/todos/:id/complete", put(todos::complete))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

/// Admit localhost during development plus the root domain and its
/// subdomains; everything else is refused.
fn origin_allowed(origin: &str, root_domain: &str) -> bool {
    fn is_localhost(value: &str) -> bool {
        value.contains("localhost") || value.contains("127.0.0.1")
    }

    if is_localhost(origin) || is_localhost(root_domain) {
        return true;
    }
    if origin.is_empty() || root_domain.is_empty() {
        return false;
    }
    origin == format!("https://{root_domain}")
        || origin.ends_with(&format!(".{root_domain}"))
}

fn cors_layer() -> CorsLayer {
    let root_domain = config::config().security.root_domain.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin
                .to_str()
                .map(|o| origin_allowed(o, &root_domain))
                .unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("tenant"),
        ])
        .allow_credentials(true)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Todo API (Rust)",
            "version": version,
            "description": "Multi-tenant todo backend built with Rust (Axum)",
            "endpoints": {
                "home": "/ (public)",
                "register": "POST /register (public)",
                "login": "POST /login (public)",
                "tenant_validate": "GET /tenant/validate (public - host based)",
                "tenant_show": "GET /tenant/:id (public)",
                "tenant_create": "POST /tenant/create (protected)",
                "todos": "/todos[/:id[/complete]] (protected)",
            }
        }
    }))
}

async fn health() -> Json<Value> {
    let now = chrono::Utc::now();

    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now
        }
    }))
}
