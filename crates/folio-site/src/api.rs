//! HTTP API for the portfolio.

use crate::error::{Error, Result};
use crate::node::SiteState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use folio_model::{ContactAck, ContactSubmission, News, Profile, Publication, ValidationError};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type AppState = Arc<SiteState>;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/api", get(banner))
        // Content
        .route("/api/profile", get(get_profile))
        .route("/api/publications", get(list_publications))
        .route("/api/news", get(list_news))
        // Contact intake
        .route("/api/contact", post(submit_contact))
        // CV download
        .route("/api/cv", get(download_cv))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

async fn ready() -> &'static str {
    "OK"
}

#[derive(Debug, Serialize)]
struct Banner {
    message: &'static str,
}

async fn banner() -> Json<Banner> {
    Json(Banner {
        message: "Academic Website API",
    })
}

// --- Content endpoints ---

async fn get_profile(State(state): State<AppState>) -> Result<Json<Profile>> {
    match state.storage.get_profile()? {
        Some(profile) => Ok(Json(profile)),
        None => {
            tracing::warn!("Profile requested but none has been seeded");
            Err(Error::NotFound("profile".to_string()))
        }
    }
}

async fn list_publications(State(state): State<AppState>) -> Result<Json<Vec<Publication>>> {
    Ok(Json(state.storage.list_publications()?))
}

async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<News>>> {
    Ok(Json(state.storage.list_news()?))
}

// --- Contact endpoint ---

async fn submit_contact(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ContactSubmission>, JsonRejection>,
) -> Result<Json<ContactAck>> {
    let Json(submission) =
        payload.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;

    let message = match submission.accept(Utc::now()) {
        Ok(message) => message,
        Err(e) => {
            tracing::info!("Rejected contact submission: {}", e);
            return Err(e.into());
        }
    };

    state.storage.put_contact_message(&message)?;
    tracing::info!("Stored contact message {}", message.id);

    Ok(Json(ContactAck::ok()))
}

// --- CV endpoint ---

async fn download_cv(State(state): State<AppState>) -> Result<Response> {
    let cv = state
        .config
        .cv
        .as_ref()
        .ok_or_else(|| Error::NotFound("CV not configured".to_string()))?;

    let body = match tokio::fs::read(&cv.path).await {
        Ok(body) => body,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("CV file {:?} is missing", cv.path);
            return Err(Error::NotFound("CV not found".to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((
        [
            (header::CONTENT_TYPE, cv.content_type()),
            (header::CONTENT_DISPOSITION, cv.content_disposition()),
        ],
        body,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{CvArtifact, SiteConfig};
    use crate::storage::Storage;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use folio_model::PublicationType;
    use serde_json::{json, Value};
    use tempfile::{tempdir, TempDir};

    struct Harness {
        server: TestServer,
        storage: Arc<Storage>,
        _dir: TempDir,
    }

    fn harness_with(cv: Option<CvArtifact>) -> Harness {
        let dir = tempdir().unwrap();
        let storage = Arc::new(Storage::open(dir.path().join("content")).unwrap());
        let mut config = SiteConfig::with_data_dir(dir.path());
        config.cv = cv;
        let state = Arc::new(SiteState::new(Arc::clone(&storage), config));
        let server = TestServer::new(build_router(state)).unwrap();
        Harness { server, storage, _dir: dir }
    }

    fn harness() -> Harness {
        harness_with(None)
    }

    fn profile() -> Profile {
        Profile {
            name: "Dr. A. Singh".into(),
            title: None,
            affiliation: "University of Cambridge".into(),
            bio: "Combustion.".into(),
            email: "a.singh@example.org".into(),
            phone: "+44 0000".into(),
            address: "Cambridge".into(),
            research_interests: vec!["Flame Wall Interaction".into()],
        }
    }

    fn contact_body() -> Value {
        json!({
            "name": "Ada",
            "email": "ada@example.org",
            "subject": "Collaboration",
            "message": "Shall we write a paper?"
        })
    }

    #[tokio::test]
    async fn health_ok() {
        let h = harness();
        let response = h.server.get("/health").await;
        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn banner_message() {
        let h = harness();
        let body: Value = h.server.get("/api").await.json();
        assert_eq!(body["message"], "Academic Website API");
    }

    #[tokio::test]
    async fn profile_unseeded_is_not_found() {
        let h = harness();
        let response = h.server.get("/api/profile").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn profile_seeded() {
        let h = harness();
        h.storage.put_profile(&profile()).unwrap();

        let response = h.server.get("/api/profile").await;
        response.assert_status_ok();
        let body: Value = response.json();
        for field in ["name", "affiliation", "bio", "email", "phone", "address"] {
            assert!(body[field].is_string(), "missing {}", field);
        }
        assert_eq!(body["research_interests"], json!(["Flame Wall Interaction"]));
    }

    #[tokio::test]
    async fn publications_empty_is_ok() {
        let h = harness();
        let response = h.server.get("/api/publications").await;
        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn publications_full_collection() {
        let h = harness();
        h.storage
            .put_publication(
                &Publication::new("Flame Dynamics", "A. Singh", 2022, PublicationType::Journal)
                    .with_journal("Combust. Flame"),
            )
            .unwrap();
        h.storage
            .put_publication(&Publication::new(
                "Turbulence Models",
                "B. Rao",
                2019,
                PublicationType::Conference,
            ))
            .unwrap();

        let body: Value = h.server.get("/api/publications").await.json();
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["type"], "journal");
        assert_eq!(items[0]["journal"], "Combust. Flame");
        assert_eq!(items[1]["year"], 2019);
        assert!(items[1].get("link").is_none());
    }

    #[tokio::test]
    async fn news_newest_first() {
        let h = harness();
        h.storage.put_news(&News::new("Older", "c", "2022-01-01")).unwrap();
        h.storage.put_news(&News::new("Newer", "c", "2024-01-01")).unwrap();

        let news: Vec<News> = h.server.get("/api/news").await.json();
        assert_eq!(news[0].title, "Newer");
        assert_eq!(news[1].date, "2022-01-01");
    }

    #[tokio::test]
    async fn contact_accepted() {
        let h = harness();
        let response = h.server.post("/api/contact").json(&contact_body()).await;
        response.assert_status_ok();
        let ack: ContactAck = response.json();
        assert!(ack.is_ok());
        assert_eq!(h.storage.count_contact_messages().unwrap(), 1);
    }

    #[tokio::test]
    async fn contact_missing_or_empty_field_rejected() {
        let h = harness();
        for field in ["name", "email", "subject", "message"] {
            let mut empty = contact_body();
            empty[field] = json!("");
            h.server
                .post("/api/contact")
                .json(&empty)
                .await
                .assert_status(StatusCode::BAD_REQUEST);

            let mut missing = contact_body();
            missing.as_object_mut().unwrap().remove(field);
            h.server
                .post("/api/contact")
                .json(&missing)
                .await
                .assert_status(StatusCode::BAD_REQUEST);
        }
        assert_eq!(h.storage.count_contact_messages().unwrap(), 0);
    }

    #[tokio::test]
    async fn contact_malformed_body_rejected() {
        let h = harness();
        h.server
            .post("/api/contact")
            .text("name=Ada")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        h.server
            .post("/api/contact")
            .json(&json!({"name": 7, "email": "a@b.org", "subject": "s", "message": "m"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(h.storage.count_contact_messages().unwrap(), 0);
    }

    #[tokio::test]
    async fn cv_not_configured() {
        let h = harness();
        h.server.get("/api/cv").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cv_configured_but_missing() {
        let h = harness_with(Some(CvArtifact::new("/nonexistent/folio/cv.pdf")));
        h.server.get("/api/cv").await.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cv_download() {
        let cv_dir = tempdir().unwrap();
        let path = cv_dir.path().join("CV_Latest.pdf");
        std::fs::write(&path, b"%PDF-1.7 test").unwrap();
        let h = harness_with(Some(CvArtifact::new(&path).with_download_name("CV_A_Singh.pdf")));

        let response = h.server.get("/api/cv").await;
        response.assert_status_ok();
        assert_eq!(response.header("content-type"), "application/pdf");
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"CV_A_Singh.pdf\""
        );
        assert_eq!(&response.as_bytes()[..], b"%PDF-1.7 test");
    }
}
