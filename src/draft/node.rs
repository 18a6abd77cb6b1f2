//! Draft tree nodes: node identity, modules, lessons and the course
//! scalar fields the editor owns.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity of a draft node.
///
/// Whether a node has already been persisted by the backend is a
/// type-level fact here, not a string-prefix convention. Temporary ids
/// exist only until the next full reload from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Temporary { seq: u64, minted_at_ms: i64 },
    Persisted(Uuid),
}

impl NodeId {
    pub(crate) fn mint(seq: u64) -> Self {
        Self::Temporary {
            seq,
            minted_at_ms: Utc::now().timestamp_millis(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted(_))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temporary { seq, minted_at_ms } => write!(f, "temp-{seq}-{minted_at_ms}"),
            Self::Persisted(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonKind {
    Video,
    Text,
    Quiz,
    Assignment,
    LiveSession,
}

#[derive(Debug, Error)]
#[error("unknown lesson kind: {0}")]
pub struct UnknownLessonKind(String);

impl std::str::FromStr for LessonKind {
    type Err = UnknownLessonKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VIDEO" => Ok(Self::Video),
            "TEXT" => Ok(Self::Text),
            "QUIZ" => Ok(Self::Quiz),
            "ASSIGNMENT" => Ok(Self::Assignment),
            "LIVE_SESSION" | "LIVE-SESSION" => Ok(Self::LiveSession),
            _ => Err(UnknownLessonKind(s.to_string())),
        }
    }
}

/// A lesson inside one module. Order among siblings is exactly the
/// position in the owning module's lesson array; no stored sort key is
/// trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonDraft {
    id: NodeId,
    title: String,
    description: Option<String>,
    content: Option<String>,
    kind: LessonKind,
    video_url: Option<String>,
    duration_secs: u32,
    is_preview: bool,
    // transient, never serialized
    is_new: bool,
    is_editing: bool,
}

impl LessonDraft {
    /// A freshly added, not-yet-saved lesson with its inline edit form open.
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            title: String::new(),
            description: None,
            content: None,
            kind: LessonKind::Video,
            video_url: None,
            duration_secs: 0,
            is_preview: false,
            is_new: true,
            is_editing: true,
        }
    }

    /// A lesson loaded from the server.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn hydrated(
        id: NodeId,
        title: String,
        description: Option<String>,
        content: Option<String>,
        kind: LessonKind,
        video_url: Option<String>,
        duration_secs: u32,
        is_preview: bool,
    ) -> Self {
        Self {
            id,
            title,
            description,
            content,
            kind,
            video_url,
            duration_secs,
            is_preview,
            is_new: false,
            is_editing: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn kind(&self) -> LessonKind {
        self.kind
    }

    pub fn video_url(&self) -> Option<&str> {
        self.video_url.as_deref()
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_preview(&self) -> bool {
        self.is_preview
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    /// Merge a validated patch. A kind change clears the fields the new
    /// kind has no use for before the patch's own fields land, so stale
    /// cross-kind data is never carried forward. Editing a lesson once
    /// ends its "new" state even while unsaved.
    pub(crate) fn apply_patch(&mut self, patch: super::LessonPatch) {
        if let Some(kind) = patch.kind
            && kind != self.kind
        {
            self.kind = kind;
            if kind == LessonKind::Video {
                self.content = None;
            } else {
                self.video_url = None;
            }
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(content) = patch.content {
            self.content = Some(content);
        }
        if let Some(video_url) = patch.video_url {
            self.video_url = Some(video_url);
        }
        if let Some(duration_secs) = patch.duration_secs {
            self.duration_secs = duration_secs;
        }
        if let Some(is_preview) = patch.is_preview {
            self.is_preview = is_preview;
        }
        self.is_new = false;
    }

    pub(crate) fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
    }
}

/// A named, ordered group of lessons. Course-level order is exactly the
/// position in the draft's module array.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDraft {
    id: NodeId,
    title: String,
    description: Option<String>,
    lessons: Vec<LessonDraft>,
    // transient, never serialized
    is_expanded: bool,
    is_new: bool,
    is_editing: bool,
}

impl ModuleDraft {
    /// A freshly added, not-yet-saved module, expanded with its edit form open.
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            title: String::new(),
            description: None,
            lessons: Vec::new(),
            is_expanded: true,
            is_new: true,
            is_editing: true,
        }
    }

    /// A module loaded from the server. The editor shows the full
    /// outline on open, so loaded modules start expanded.
    pub(crate) fn hydrated(
        id: NodeId,
        title: String,
        description: Option<String>,
        lessons: Vec<LessonDraft>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            lessons,
            is_expanded: true,
            is_new: false,
            is_editing: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn lessons(&self) -> &[LessonDraft] {
        &self.lessons
    }

    pub fn lesson(&self, id: NodeId) -> Option<&LessonDraft> {
        self.lessons.iter().find(|l| l.id() == id)
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub(crate) fn apply_patch(&mut self, patch: super::ModulePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        self.is_new = false;
    }

    pub(crate) fn toggle_expanded(&mut self) {
        self.is_expanded = !self.is_expanded;
    }

    pub(crate) fn set_editing(&mut self, editing: bool) {
        self.is_editing = editing;
    }

    pub(crate) fn push_lesson(&mut self, lesson: LessonDraft) {
        self.lessons.push(lesson);
    }

    pub(crate) fn remove_lesson(&mut self, id: NodeId) -> Option<LessonDraft> {
        let at = self.lessons.iter().position(|l| l.id() == id)?;
        Some(self.lessons.remove(at))
    }

    pub(crate) fn lesson_mut(&mut self, id: NodeId) -> Option<&mut LessonDraft> {
        self.lessons.iter_mut().find(|l| l.id() == id)
    }

    pub(crate) fn lessons_vec_mut(&mut self) -> &mut Vec<LessonDraft> {
        &mut self.lessons
    }
}

/// The scalar course fields the editor owns. Everything else on the
/// course entity belongs to other views and is not represented here.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFields {
    title: String,
    short_description: Option<String>,
    description: Option<String>,
    price: f64,
    discount_price: Option<f64>,
}

impl CourseFields {
    pub(crate) fn hydrated(
        title: String,
        short_description: Option<String>,
        description: Option<String>,
        price: f64,
        discount_price: Option<f64>,
    ) -> Self {
        Self {
            title,
            short_description,
            description,
            price,
            discount_price,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn short_description(&self) -> Option<&str> {
        self.short_description.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn discount_price(&self) -> Option<f64> {
        self.discount_price
    }

    pub(crate) fn apply_patch(&mut self, patch: super::CoursePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(short_description) = patch.short_description {
            self.short_description = Some(short_description);
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(discount_price) = patch.discount_price {
            self.discount_price = Some(discount_price);
        }
    }
}
