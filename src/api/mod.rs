mod client;
pub use client::{AUTH_COOKIE, CourseApi, HttpCourseApi};

mod error;
pub use error::{ApiError, ApiResult, LoadError, SaveError};
