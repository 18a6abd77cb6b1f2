//! Shared harness: an in-process stand-in for the instructor-course API,
//! served over a real TCP port so the editor's HTTP client is exercised
//! end to end.
//!
//! The stand-in mimics the backend's replace-all contract: a PUT swaps
//! the whole stored tree, sibling order is taken from the submitted
//! `position` values, and any id the server did not issue comes back as
//! a fresh UUID on the next GET.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredCourse {
    pub title: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub modules: Vec<StoredModule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub lessons: Vec<StoredLesson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub is_preview: bool,
    #[serde(default)]
    pub position: u32,
}

#[derive(Clone, Default)]
pub struct StubApi {
    courses: Arc<Mutex<HashMap<String, StoredCourse>>>,
    fail_next_save: Arc<AtomicBool>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, slug: &str, course: StoredCourse) {
        self.courses.lock().await.insert(slug.to_string(), course);
    }

    pub async fn course(&self, slug: &str) -> Option<StoredCourse> {
        self.courses.lock().await.get(slug).cloned()
    }

    /// Make the next PUT answer 500 once.
    pub fn fail_next_save(&self) {
        self.fail_next_save.store(true, Ordering::SeqCst);
    }

    /// Bind to a random local port and serve in the background. Returns
    /// the base url to point an `HttpCourseApi` at.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route(
                "/api/instructor/courses/{slug}",
                get(get_course).put(put_course),
            )
            .with_state(self.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }
}

async fn get_course(State(stub): State<StubApi>, Path(slug): Path<String>) -> Response {
    match stub.courses.lock().await.get(&slug) {
        Some(course) => (StatusCode::OK, Json(course.clone())).into_response(),
        None => not_found(),
    }
}

async fn put_course(
    State(stub): State<StubApi>,
    Path(slug): Path<String>,
    Json(mut incoming): Json<StoredCourse>,
) -> Response {
    if stub.fail_next_save.swap(false, Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "replace failed" })),
        )
            .into_response();
    }

    let mut courses = stub.courses.lock().await;
    if !courses.contains_key(&slug) {
        return not_found();
    }

    incoming.modules.sort_by_key(|m| m.position);
    for module in &mut incoming.modules {
        if Uuid::parse_str(&module.id).is_err() {
            module.id = Uuid::new_v4().to_string();
        }
        module.lessons.sort_by_key(|l| l.position);
        for lesson in &mut module.lessons {
            if Uuid::parse_str(&lesson.id).is_err() {
                lesson.id = Uuid::new_v4().to_string();
            }
        }
    }
    courses.insert(slug, incoming);
    StatusCode::OK.into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Course not found" })),
    )
        .into_response()
}

// Seed data builders

pub fn sample_course() -> StoredCourse {
    StoredCourse {
        title: "Rust from Scratch".to_string(),
        short_description: Some("Zero to crates.io".to_string()),
        description: None,
        price: 59.0,
        discount_price: None,
        modules: vec![
            StoredModule {
                id: Uuid::new_v4().to_string(),
                title: "Basics".to_string(),
                description: None,
                position: 0,
                lessons: vec![
                    video_lesson("Hello, cargo", 0),
                    text_lesson("Ownership notes", 1),
                ],
            },
            StoredModule {
                id: Uuid::new_v4().to_string(),
                title: "Advanced".to_string(),
                description: Some("Lifetimes and beyond".to_string()),
                position: 1,
                lessons: vec![video_lesson("Borrow checker deep dive", 0)],
            },
        ],
    }
}

pub fn video_lesson(title: &str, position: u32) -> StoredLesson {
    StoredLesson {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: None,
        content: None,
        kind: "VIDEO".to_string(),
        video_url: Some("https://cdn.example/video.mp4".to_string()),
        duration: 300,
        is_preview: false,
        position,
    }
}

pub fn text_lesson(title: &str, position: u32) -> StoredLesson {
    StoredLesson {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        description: None,
        content: Some("# Notes".to_string()),
        kind: "TEXT".to_string(),
        video_url: None,
        duration: 0,
        is_preview: false,
        position,
    }
}
