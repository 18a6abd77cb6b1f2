//! Shape of the instructor-course GET response and its hydration into an
//! editable draft.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::draft::{CourseDraft, CourseFields, LessonDraft, LessonKind, ModuleDraft, NodeId};

#[derive(Debug, Error)]
#[error("malformed node id in course payload: {0:?}")]
pub struct MalformedId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
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
    pub modules: Vec<ModuleDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub lessons: Vec<LessonDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: LessonKind,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub is_preview: bool,
}

impl CourseDetail {
    /// Build the in-memory draft this response describes. Array order is
    /// taken as authoritative; every id must be a server-issued UUID.
    pub fn into_draft(self) -> Result<CourseDraft, MalformedId> {
        let fields = CourseFields::hydrated(
            self.title,
            self.short_description,
            self.description,
            self.price,
            self.discount_price,
        );

        let mut modules = Vec::with_capacity(self.modules.len());
        for module in self.modules {
            let id = parse_id(&module.id)?;
            let mut lessons = Vec::with_capacity(module.lessons.len());
            for lesson in module.lessons {
                lessons.push(LessonDraft::hydrated(
                    parse_id(&lesson.id)?,
                    lesson.title,
                    lesson.description,
                    lesson.content,
                    lesson.kind,
                    lesson.video_url,
                    lesson.duration,
                    lesson.is_preview,
                ));
            }
            modules.push(ModuleDraft::hydrated(
                id,
                module.title,
                module.description,
                lessons,
            ));
        }

        Ok(CourseDraft::new(fields, modules))
    }
}

fn parse_id(raw: &str) -> Result<NodeId, MalformedId> {
    Uuid::parse_str(raw)
        .map(NodeId::Persisted)
        .map_err(|_| MalformedId(raw.to_string()))
}
