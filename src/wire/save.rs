//! Shape of the replace-all PUT payload and its construction from a
//! draft.
//!
//! `position` is always recomputed from the current array index, never
//! read from stored state, so a client-side reorder is reflected
//! correctly no matter what was added or removed in between. The
//! transient editor flags have no field here, so they can never reach
//! the wire. Optional fields serialize as `null` rather than being
//! omitted.

use serde::{Deserialize, Serialize};

use crate::draft::{CourseDraft, LessonDraft, LessonKind, ModuleDraft, NodeId};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSaveRequest {
    pub title: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub modules: Vec<ModuleSave>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSave {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub position: u32,
    pub lessons: Vec<LessonSave>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSave {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: LessonKind,
    pub video_url: Option<String>,
    pub duration: u32,
    pub is_preview: bool,
    pub position: u32,
}

impl CourseSaveRequest {
    pub fn from_draft(draft: &CourseDraft) -> Self {
        let fields = draft.fields();
        Self {
            title: fields.title().to_string(),
            short_description: fields.short_description().map(str::to_string),
            description: fields.description().map(str::to_string),
            price: fields.price(),
            discount_price: fields.discount_price(),
            modules: draft
                .modules()
                .iter()
                .enumerate()
                .map(|(position, module)| ModuleSave::from_draft(module, position))
                .collect(),
        }
    }
}

impl ModuleSave {
    fn from_draft(module: &ModuleDraft, position: usize) -> Self {
        let wire_id = module_wire_id(module.id());
        Self {
            title: module.title().to_string(),
            description: module.description().map(str::to_string),
            position: position as u32,
            lessons: module
                .lessons()
                .iter()
                .enumerate()
                .map(|(position, lesson)| LessonSave::from_draft(lesson, &wire_id, position))
                .collect(),
            id: wire_id,
        }
    }
}

impl LessonSave {
    fn from_draft(lesson: &LessonDraft, module_wire_id: &str, position: usize) -> Self {
        Self {
            id: lesson_wire_id(lesson.id(), module_wire_id),
            title: lesson.title().to_string(),
            description: lesson.description().map(str::to_string),
            content: lesson.content().map(str::to_string),
            kind: lesson.kind(),
            video_url: lesson.video_url().map(str::to_string),
            duration: lesson.duration_secs(),
            is_preview: lesson.is_preview(),
            position: position as u32,
        }
    }
}

// Unsaved nodes keep the legacy string forms on the wire; the backend
// treats any id it did not issue as a creation.

fn module_wire_id(id: NodeId) -> String {
    match id {
        NodeId::Persisted(id) => id.to_string(),
        NodeId::Temporary { seq, minted_at_ms } => format!("module-{seq}-{minted_at_ms}"),
    }
}

fn lesson_wire_id(id: NodeId, module_wire_id: &str) -> String {
    match id {
        NodeId::Persisted(id) => id.to_string(),
        NodeId::Temporary { seq, minted_at_ms } => {
            format!("lesson-{module_wire_id}-{seq}-{minted_at_ms}")
        }
    }
}
