//! The consumed instructor-course HTTP boundary.
//!
//! [`CourseApi`] is the seam the editor talks through; [`HttpCourseApi`]
//! is the real transport against
//! `{base}/api/instructor/courses/{slug}`.

use async_trait::async_trait;
use reqwest::header::COOKIE;

use crate::Config;
use crate::api::{ApiError, ApiResult, LoadError, SaveError};
use crate::wire::{CourseDetail, CourseSaveRequest};

/// Session cookie the backend authenticates instructors with. The token
/// itself is issued elsewhere; this client only forwards it.
pub const AUTH_COOKIE: &str = "auth-token";

#[async_trait]
pub trait CourseApi: Send + Sync {
    async fn fetch_course(&self, slug: &str) -> ApiResult<CourseDetail>;
    async fn replace_course(&self, slug: &str, save: &CourseSaveRequest) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct HttpCourseApi {
    http: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpCourseApi {
    pub fn new<S: Into<String>>(base_url: S, auth_token: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            auth_token,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.api().base_url(),
            config.api().auth_token().map(str::to_string),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn course_url(&self, slug: &str) -> String {
        format!("{}/api/instructor/courses/{slug}", self.base_url)
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.header(COOKIE, format!("{AUTH_COOKIE}={token}")),
            None => request,
        }
    }
}

/// A slug is a single path segment; anything else never leaves the
/// client and reads as "course not found".
fn check_slug(slug: &str) -> Result<(), LoadError> {
    if slug.is_empty() || slug.contains('/') {
        return Err(LoadError::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl CourseApi for HttpCourseApi {
    #[tracing::instrument(skip(self))]
    async fn fetch_course(&self, slug: &str) -> ApiResult<CourseDetail> {
        check_slug(slug)?;

        let response = self
            .with_auth(self.http.get(self.course_url(slug)))
            .send()
            .await
            .map_err(LoadError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::load_rejected(status));
        }

        let detail = response
            .json::<CourseDetail>()
            .await
            .map_err(LoadError::RequestFailed)?;
        tracing::debug!(slug, modules = detail.modules.len(), "course fetched");
        Ok(detail)
    }

    #[tracing::instrument(skip(self, save))]
    async fn replace_course(&self, slug: &str, save: &CourseSaveRequest) -> ApiResult<()> {
        let response = self
            .with_auth(self.http.put(self.course_url(slug)).json(save))
            .send()
            .await
            .map_err(SaveError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::save_rejected(status));
        }

        tracing::debug!(slug, modules = save.modules.len(), "course replaced");
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slugs_must_be_one_path_segment() {
        assert!(check_slug("rust-101").is_ok());
        assert!(matches!(
            check_slug(""),
            Err(LoadError::InvalidSlug { .. })
        ));
        assert!(matches!(
            check_slug("a/../b"),
            Err(LoadError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = HttpCourseApi::new("http://localhost:5000/", None);
        assert_eq!(
            api.course_url("rust-101"),
            "http://localhost:5000/api/instructor/courses/rust-101"
        );
    }
}
