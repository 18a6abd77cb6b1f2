use reqwest::StatusCode;
use thiserror::Error;

use crate::wire::MalformedId;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failures while fetching a course. None of these leave a draft behind;
/// the editor shows an error view instead of a tree.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("LoadInvalidSlug: {slug:?}")]
    InvalidSlug { slug: String },

    #[error("LoadRequestFailed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("LoadRejected: status {status}")]
    Rejected { status: StatusCode },

    #[error("LoadMalformedCourse: {0}")]
    MalformedCourse(#[from] MalformedId),
}

/// Failures while submitting the replace-all save. The in-memory draft
/// is left as it was, so the user can retry without re-entering data.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("SaveRequestFailed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("SaveRejected: status {status}")]
    Rejected { status: StatusCode },
}

impl LoadError {
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidSlug { .. } => String::from("Course not found."),
            Self::Rejected { status } if *status == StatusCode::NOT_FOUND => {
                String::from("Course not found.")
            }
            Self::RequestFailed(_) => {
                String::from("Failed to load course. Check your connection and try again.")
            }
            Self::Rejected { .. } | Self::MalformedCourse(_) => {
                String::from("Failed to load course.")
            }
        }
    }
}

impl SaveError {
    pub fn user_message(&self) -> String {
        match self {
            Self::RequestFailed(_) => {
                String::from("Failed to save course. Check your connection and try again.")
            }
            Self::Rejected { .. } => String::from("Failed to save course. Your changes are kept."),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("LoadError - {0}")]
    Load(#[from] LoadError),
    #[error("SaveError - {0}")]
    Save(#[from] SaveError),
}

impl ApiError {
    pub fn invalid_slug<S: Into<String>>(slug: S) -> Self {
        Self::Load(LoadError::InvalidSlug { slug: slug.into() })
    }

    pub fn load_rejected(status: StatusCode) -> Self {
        Self::Load(LoadError::Rejected { status })
    }

    pub fn save_rejected(status: StatusCode) -> Self {
        Self::Save(SaveError::Rejected { status })
    }

    /// The notification text shown to the user; the full error goes to
    /// the log instead.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load(e) => e.user_message(),
            Self::Save(e) => e.user_message(),
        }
    }
}
