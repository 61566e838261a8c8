use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::ai::ChatModel;
use crate::auth::TokenIssuer;
use crate::config::SecurityConfig;
use crate::database::repository::{
    CommentStore, ForumStore, HealthProbe, JournalStore, TopicStore, UserStore,
};
use crate::handlers::{auth, comment, forum, journal, topic, user, vent};
use crate::middleware::jwt_auth_middleware;
use crate::services::{
    CommentService, ConversationStore, ForumService, JournalService, TopicService, UserService,
    VentService,
};

/// Shared handles every handler can reach
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserService>,
    pub journals: Arc<JournalService>,
    pub forums: Arc<ForumService>,
    pub topics: Arc<TopicService>,
    pub comments: Arc<CommentService>,
    pub vents: Arc<VentService>,
    pub tokens: Arc<TokenIssuer>,
    pub health: Arc<dyn HealthProbe>,
}

impl AppState {
    /// Wire every service onto one store that implements all entity traits
    pub fn new<S>(
        store: Arc<S>,
        tokens: Arc<TokenIssuer>,
        model: Arc<dyn ChatModel>,
        password_cost: u32,
    ) -> Self
    where
        S: UserStore + JournalStore + ForumStore + TopicStore + CommentStore + HealthProbe + 'static,
    {
        Self {
            users: Arc::new(
                UserService::new(store.clone(), tokens.clone()).with_password_cost(password_cost),
            ),
            journals: Arc::new(JournalService::new(store.clone())),
            forums: Arc::new(ForumService::new(store.clone(), store.clone())),
            topics: Arc::new(TopicService::new(store.clone())),
            comments: Arc::new(CommentService::new(store.clone(), store.clone())),
            vents: Arc::new(VentService::new(model, Arc::new(ConversationStore::new()))),
            tokens,
            health: store,
        }
    }
}

pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    let api = api_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        jwt_auth_middleware,
    ));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1", api)
        // Global middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(security)),
        )
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(journal_routes())
        .merge(forum_routes())
        .merge(topic_routes())
        .merge(comment_routes())
        .merge(vent_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(user::list))
        .route("/users/me", get(user::me))
        .route("/users/:id", get(user::show).put(user::update).delete(user::delete))
}

fn journal_routes() -> Router<AppState> {
    Router::new()
        .route("/journals", post(journal::create).get(journal::list))
        .route(
            "/journals/:id",
            get(journal::show).put(journal::update).delete(journal::delete),
        )
}

fn forum_routes() -> Router<AppState> {
    Router::new()
        .route("/forums", post(forum::create).get(forum::list))
        .route(
            "/forums/:id",
            get(forum::show).put(forum::update).delete(forum::delete),
        )
        .route("/forums/:id/topic", delete(forum::remove_topics))
}

fn topic_routes() -> Router<AppState> {
    Router::new()
        .route("/topics", post(topic::create).get(topic::list))
        .route(
            "/topics/:id",
            get(topic::show).put(topic::update).delete(topic::delete),
        )
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comment::create).get(comment::list))
        .route(
            "/comments/:id",
            get(comment::show).put(comment::update).delete(comment::delete),
        )
}

fn vent_routes() -> Router<AppState> {
    Router::new().route("/vents", post(vent::chat).delete(vent::clear))
}

/// Permissive when CORS is on without an origin list, inert when CORS is off
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Zense API",
            "version": version,
            "description": "Journaling, forum and venting backend",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/api/v1/auth/login, /api/v1/auth/register (public)",
                "users": "/api/v1/users[/:id|/me]",
                "journals": "/api/v1/journals[/:id]",
                "forums": "/api/v1/forums[/:id[/topic]]",
                "topics": "/api/v1/topics[/:id]",
                "comments": "/api/v1/comments[/:id]",
                "vents": "/api/v1/vents (protected)"
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.health.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use tower::ServiceExt;

    use crate::testing::{issuer, MemoryStore, ScriptedModel, TEST_PASSWORD_COST};

    fn security() -> SecurityConfig {
        SecurityConfig {
            jwt_secret: crate::testing::TEST_SECRET.to_string(),
            jwt_expiry_minutes: 10,
            enable_cors: true,
            cors_origins: Vec::new(),
        }
    }

    fn test_app(model: ScriptedModel) -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::new()),
            Arc::new(issuer()),
            Arc::new(model),
            TEST_PASSWORD_COST,
        );
        app(state, &security())
    }

    async fn call(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Register and log in, returning (user id, token)
    async fn sign_up(app: &Router, name: &str) -> (i64, String) {
        let email = format!("{}@zense.app", name);
        let (status, _) = call(
            app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "name": name, "email": email, "password": "rahasia123" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = call(
            app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": email, "password": "rahasia123" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        (
            body["data"]["id"].as_i64().unwrap(),
            body["data"]["token"].as_str().unwrap().to_string(),
        )
    }

    #[tokio::test]
    async fn health_and_banner_are_public() {
        let app = test_app(ScriptedModel::failing());
        let (status, body) = call(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");

        let (status, body) = call(&app, Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Zense API");
    }

    #[tokio::test]
    async fn writes_without_token_are_unauthorized() {
        let app = test_app(ScriptedModel::failing());
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/journals",
            None,
            Some(json!({ "mood": "happy", "content": "x", "visibility": "public" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = call(&app, Method::GET, "/api/v1/users/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = call(&app, Method::DELETE, "/api/v1/vents", Some("not.a.token"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn register_validates_payload() {
        let app = test_app(ScriptedModel::failing());
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "name": "ab", "email": "not-an-email", "password": "short" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["field_errors"]["email"].is_string());

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "rani@zense.app" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JSON");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let app = test_app(ScriptedModel::failing());
        sign_up(&app, "rani").await;
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "name": "rani2", "email": "rani@zense.app", "password": "rahasia123" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn journal_lifecycle_enforces_ownership() {
        let app = test_app(ScriptedModel::failing());
        let (status, _) = call(&app, Method::GET, "/api/v1/journals", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (rani_id, rani) = sign_up(&app, "rani").await;
        let (_, budi) = sign_up(&app, "budi").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/journals",
            Some(&rani),
            Some(json!({ "mood": "happy", "content": "Hari yang cerah", "visibility": "private" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["user_id"], rani_id);
        let uri = format!("/api/v1/journals/{}", body["data"]["id"]);

        let (status, body) = call(&app, Method::GET, "/api/v1/journals", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["user"]["name"], "rani");

        let change = json!({ "mood": "sad" });
        let (status, body) = call(&app, Method::PUT, &uri, Some(&budi), Some(change.clone())).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");

        let (status, body) = call(&app, Method::PUT, &uri, Some(&rani), Some(change)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["mood"], "sad");

        let (status, _) = call(&app, Method::DELETE, &uri, Some(&budi), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = call(&app, Method::DELETE, &uri, Some(&rani), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = call(&app, Method::GET, &uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_mood_is_a_bad_request() {
        let app = test_app(ScriptedModel::failing());
        let (_, token) = sign_up(&app, "rani").await;
        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/journals",
            Some(&token),
            Some(json!({ "mood": "ecstatic", "content": "x", "visibility": "private" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn me_returns_own_account_with_email() {
        let app = test_app(ScriptedModel::failing());
        let (id, token) = sign_up(&app, "rani").await;
        let (status, body) = call(&app, Method::GET, "/api/v1/users/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], id);
        assert_eq!(body["data"]["email"], "rani@zense.app");
        assert!(body["data"].get("password").is_none());

        let (status, body) = call(&app, Method::GET, &format!("/api/v1/users/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].get("email").is_none());
    }

    #[tokio::test]
    async fn forum_topics_can_be_cleared_by_owner() {
        let app = test_app(ScriptedModel::failing());
        let (_, rani) = sign_up(&app, "rani").await;

        let mut topic_ids = Vec::new();
        for name in ["Keluarga", "Pekerjaan"] {
            let (status, body) = call(
                &app,
                Method::POST,
                "/api/v1/topics",
                Some(&rani),
                Some(json!({ "name": name, "description": "cerita" })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            topic_ids.push(body["data"]["id"].as_i64().unwrap());
        }

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/forums",
            Some(&rani),
            Some(json!({ "title": "Curhat", "content": "isi", "topics": topic_ids })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["topics"].as_array().unwrap().len(), 2);
        let forum_id = body["data"]["id"].as_i64().unwrap();

        let (status, _) = call(
            &app,
            Method::DELETE,
            &format!("/api/v1/forums/{}/topic", forum_id),
            Some(&rani),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = call(&app, Method::GET, &format!("/api/v1/forums/{}", forum_id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].get("topics").is_none());

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/forums",
            Some(&rani),
            Some(json!({ "title": "Curhat", "content": "isi", "topics": [999] })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn vent_replies_and_surfaces_upstream_failure() {
        let app = test_app(ScriptedModel::replying(["Aku mengerti perasaanmu."]));
        let (_, token) = sign_up(&app, "rani").await;

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/vents",
            Some(&token),
            Some(json!({ "message": "Aku sedih" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["message"], "Aku mengerti perasaanmu.");

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/vents",
            Some(&token),
            Some(json!({ "message": "Lagi?" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "BAD_GATEWAY");

        let (status, _) = call(&app, Method::DELETE, "/api/v1/vents", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}
