mod common;

use std::sync::Arc;

use coursewright::api::{ApiError, CourseApi, HttpCourseApi, LoadError, SaveError};
use coursewright::draft::{CoursePatch, EditCommand, ModuleDraft, ModulePatch, NodeId};
use coursewright::editor::EditorSession;
use reqwest::StatusCode;

use crate::common::{StubApi, sample_course};

async fn open(base_url: &str, slug: &str) -> EditorSession {
    let api: Arc<dyn CourseApi> = Arc::new(HttpCourseApi::new(base_url, None));
    EditorSession::open(api, slug).await.unwrap()
}

#[tokio::test]
async fn open_edit_save_reload_roundtrip() {
    let stub = StubApi::new();
    stub.seed("rust-101", sample_course()).await;
    let base = stub.spawn().await;

    let mut session = open(&base, "rust-101").await;
    assert_eq!(session.draft().modules().len(), 2);
    assert!(!session.draft().is_dirty());

    // add a module, title it, then drag it to the front
    session.apply(EditCommand::AddModule).unwrap();
    let added = session.draft().modules().last().unwrap().id();
    session
        .apply(EditCommand::UpdateModule {
            module: added,
            patch: ModulePatch {
                title: Some("Extras".to_string()),
                ..Default::default()
            },
        })
        .unwrap();
    let ids: Vec<NodeId> = session.draft().modules().iter().map(ModuleDraft::id).collect();
    session
        .apply(EditCommand::ReorderModules {
            order: vec![ids[2], ids[0], ids[1]],
        })
        .unwrap();
    assert!(session.draft().is_dirty());

    session.save().await.unwrap();
    assert!(!session.draft().is_dirty());
    // ids issued by the server for new nodes only arrive on reload
    assert!(!session.draft().modules()[0].id().is_persisted());

    let reopened = open(&base, "rust-101").await;
    let titles: Vec<&str> = reopened
        .draft()
        .modules()
        .iter()
        .map(|m| m.title())
        .collect();
    assert_eq!(titles, vec!["Extras", "Basics", "Advanced"]);
    assert!(
        reopened
            .draft()
            .modules()
            .iter()
            .all(|m| m.id().is_persisted())
    );
    assert_eq!(reopened.draft().modules()[1].lessons().len(), 2);
}

#[tokio::test]
async fn failed_save_keeps_the_draft_for_retry() {
    let stub = StubApi::new();
    stub.seed("rust-101", sample_course()).await;
    let base = stub.spawn().await;

    let mut session = open(&base, "rust-101").await;
    let victim = session.draft().modules()[0].id();
    session
        .apply(EditCommand::DeleteModule { module: victim })
        .unwrap();
    let before = session.draft().clone();

    stub.fail_next_save();
    let err = session.save().await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Save(SaveError::Rejected { status }) if status == StatusCode::INTERNAL_SERVER_ERROR
    ));
    assert_eq!(
        err.user_message(),
        "Failed to save course. Your changes are kept."
    );
    assert_eq!(session.draft(), &before);
    assert!(session.draft().is_dirty());

    // nothing was lost, so the retry flushes the same tree
    session.save().await.unwrap();
    let stored = stub.course("rust-101").await.unwrap();
    assert_eq!(stored.modules.len(), 1);
    assert_eq!(stored.modules[0].title, "Advanced");
}

#[tokio::test]
async fn missing_or_malformed_slugs_are_load_failures() {
    let stub = StubApi::new();
    let base = stub.spawn().await;
    let api: Arc<dyn CourseApi> = Arc::new(HttpCourseApi::new(base.as_str(), None));

    let err = EditorSession::open(api.clone(), "nope").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Load(LoadError::Rejected { status }) if status == StatusCode::NOT_FOUND
    ));
    assert_eq!(err.user_message(), "Course not found.");

    let err = EditorSession::open(api, "bad/slug").await.unwrap_err();
    assert!(matches!(err, ApiError::Load(LoadError::InvalidSlug { .. })));
}

#[tokio::test]
async fn concurrent_sessions_last_save_wins() {
    let stub = StubApi::new();
    stub.seed("rust-101", sample_course()).await;
    let base = stub.spawn().await;

    let mut first = open(&base, "rust-101").await;
    let mut second = open(&base, "rust-101").await;

    first
        .apply(EditCommand::UpdateCourse {
            patch: CoursePatch {
                title: Some("From the laptop".to_string()),
                ..Default::default()
            },
        })
        .unwrap();
    second
        .apply(EditCommand::UpdateCourse {
            patch: CoursePatch {
                title: Some("From the tablet".to_string()),
                ..Default::default()
            },
        })
        .unwrap();

    first.save().await.unwrap();
    second.save().await.unwrap();

    // replace-all carries no concurrency token: whichever save lands
    // last overwrites the other, silently
    let stored = stub.course("rust-101").await.unwrap();
    assert_eq!(stored.title, "From the tablet");
}
