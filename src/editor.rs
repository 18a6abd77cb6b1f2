//! One instructor editing session: load the course once, mutate the
//! draft arbitrarily, flush the whole tree on save.

use std::sync::Arc;

use crate::api::{ApiResult, CourseApi};
use crate::draft::{CourseDraft, DraftResult, EditCommand};
use crate::error::log_error;
use crate::wire::CourseSaveRequest;

pub struct EditorSession {
    slug: String,
    api: Arc<dyn CourseApi>,
    draft: CourseDraft,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("slug", &self.slug)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    /// Fetch the course and hydrate the draft. Until this resolves there
    /// is no tree to edit; on failure there is no session at all.
    #[tracing::instrument(skip(api))]
    pub async fn open(api: Arc<dyn CourseApi>, slug: &str) -> ApiResult<Self> {
        let detail = match api.fetch_course(slug).await {
            Ok(detail) => detail,
            Err(e) => {
                log_error(&e);
                return Err(e);
            }
        };
        let draft = detail
            .into_draft()
            .map_err(crate::api::LoadError::MalformedCourse)?;
        tracing::info!(slug, modules = draft.modules().len(), "editing session open");
        Ok(Self {
            slug: slug.to_string(),
            api,
            draft,
        })
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn apply(&mut self, command: EditCommand) -> DraftResult<()> {
        self.draft.apply(command)
    }

    /// Serialize the current tree and submit it as one replace-all PUT.
    ///
    /// On success only the dirty flag changes; temporary ids stay until
    /// the course is reopened, since the server does not echo the ids it
    /// issued. On failure the draft is left exactly as it was so the
    /// user can retry.
    #[tracing::instrument(skip(self), fields(slug = %self.slug))]
    pub async fn save(&mut self) -> ApiResult<()> {
        let payload = CourseSaveRequest::from_draft(&self.draft);
        match self.api.replace_course(&self.slug, &payload).await {
            Ok(()) => {
                self.draft.mark_saved();
                tracing::info!(modules = payload.modules.len(), "course saved");
                Ok(())
            }
            Err(e) => {
                log_error(&e);
                Err(e)
            }
        }
    }
}
