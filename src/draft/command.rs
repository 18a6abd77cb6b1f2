//! The command set over a course draft. Every mutation the editor can
//! perform is one of these, applied through [`CourseDraft::apply`].
//!
//! [`CourseDraft::apply`]: super::CourseDraft::apply

use crate::draft::{DraftError, DraftResult, LessonKind, NodeId};

#[derive(Debug, Clone)]
pub enum EditCommand {
    AddModule,
    DeleteModule {
        module: NodeId,
    },
    UpdateModule {
        module: NodeId,
        patch: ModulePatch,
    },
    ToggleModuleExpanded {
        module: NodeId,
    },
    SetModuleEditing {
        module: NodeId,
        editing: bool,
    },
    ReorderModules {
        order: Vec<NodeId>,
    },
    AddLesson {
        module: NodeId,
    },
    DeleteLesson {
        module: NodeId,
        lesson: NodeId,
    },
    UpdateLesson {
        module: NodeId,
        lesson: NodeId,
        patch: LessonPatch,
    },
    SetLessonEditing {
        module: NodeId,
        lesson: NodeId,
        editing: bool,
    },
    ReorderLessons {
        module: NodeId,
        order: Vec<NodeId>,
    },
    UpdateCourse {
        patch: CoursePatch,
    },
}

/// Partial update for a module. Absent fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct ModulePatch {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl ModulePatch {
    pub(crate) fn validate(&self) -> DraftResult<()> {
        if provided_but_blank(&self.title) {
            return Err(DraftError::InvalidPatch("module title cannot be empty"));
        }
        Ok(())
    }
}

/// Partial update for a lesson. Absent fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct LessonPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub kind: Option<LessonKind>,
    pub video_url: Option<String>,
    pub duration_secs: Option<u32>,
    pub is_preview: Option<bool>,
}

impl LessonPatch {
    /// Checked against the lesson's current kind so a patch cannot plant
    /// data the resulting kind has no use for.
    pub(crate) fn validate(&self, current_kind: LessonKind) -> DraftResult<()> {
        if provided_but_blank(&self.title) {
            return Err(DraftError::InvalidPatch("lesson title cannot be empty"));
        }
        let kind = self.kind.unwrap_or(current_kind);
        if self.video_url.is_some() && kind != LessonKind::Video {
            return Err(DraftError::InvalidPatch(
                "videoUrl only applies to VIDEO lessons",
            ));
        }
        if self.content.is_some() && kind == LessonKind::Video {
            return Err(DraftError::InvalidPatch(
                "content does not apply to VIDEO lessons",
            ));
        }
        Ok(())
    }
}

/// Partial update for the course scalar fields.
#[derive(Debug, Clone, Default)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount_price: Option<f64>,
}

impl CoursePatch {
    pub(crate) fn validate(&self) -> DraftResult<()> {
        if provided_but_blank(&self.title) {
            return Err(DraftError::InvalidPatch("course title cannot be empty"));
        }
        for price in [self.price, self.discount_price].into_iter().flatten() {
            if !price.is_finite() || price < 0.0 {
                return Err(DraftError::InvalidPatch("price must be a positive number"));
            }
        }
        Ok(())
    }
}

fn provided_but_blank(field: &Option<String>) -> bool {
    matches!(field, Some(s) if s.trim().is_empty())
}
