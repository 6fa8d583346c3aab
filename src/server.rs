//! REST endpoints: the public profile route and health check.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tracing::{debug, error};

use crate::store::ProfileStore;

/// Shared state for profile routes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
}

/// Build the Axum router for the public surface.
pub fn profile_routes(store: Arc<dyn ProfileStore>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/p/{slug}", get(get_public_profile))
        .layer(CorsLayer::permissive())
        .with_state(AppState { store })
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "provider-profiles"
    }))
}

/// GET /p/{slug}
///
/// Returns the public view of a published profile. Missing slugs and
/// private profiles get the same 404 body, so existence never leaks.
async fn get_public_profile(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    match state.store.select_public_by_slug(&slug).await {
        Ok(Some(profile)) => Json(profile).into_response(),
        Ok(None) => {
            debug!(%slug, "Public profile lookup miss");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({"error": "Profile not found"})),
            )
                .into_response()
        }
        Err(e) => {
            error!(%slug, error = %e, "Public profile lookup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::profile::{Availability, DraftProfile, Visibility};
    use crate::store::LibSqlBackend;

    fn complete_draft() -> DraftProfile {
        DraftProfile {
            full_name: Some("Jane Doe".into()),
            email: Some("jane@x.com".into()),
            phone: Some("5551234567".into()),
            specialty: Some("Neurosciences".into()),
            license_number: Some("NE-12345".into()),
            preferred_locations: Some("Lakeside".into()),
            availability: Some(Availability::FullTime),
            years_experience: Some("10".into()),
            ..Default::default()
        }
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let app = profile_routes(store);
        let (status, body) = get_json(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn public_profile_is_served_by_slug() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        store
            .insert(&complete_draft(), "jane-doe", Visibility::Public, "user-1")
            .await
            .unwrap();
        let app = profile_routes(store);

        let (status, body) = get_json(&app, "/p/jane-doe").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["full_name"], "Jane Doe");
        assert_eq!(body["availability"], "full-time");
        // Contact identifiers never appear in the public payload.
        assert!(body.get("email").is_none());
        assert!(body.get("phone").is_none());
        assert!(body.get("license_number").is_none());
        assert!(body.get("user_id").is_none());
    }

    #[tokio::test]
    async fn private_and_missing_profiles_are_indistinguishable() {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        store
            .insert(&complete_draft(), "private-jane", Visibility::Private, "user-1")
            .await
            .unwrap();
        let app = profile_routes(store);

        let (private_status, private_body) = get_json(&app, "/p/private-jane").await;
        let (missing_status, missing_body) = get_json(&app, "/p/no-such-slug").await;

        assert_eq!(private_status, StatusCode::NOT_FOUND);
        assert_eq!(missing_status, StatusCode::NOT_FOUND);
        assert_eq!(private_body, missing_body);
    }
}
