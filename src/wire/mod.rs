mod course;
pub use course::{CourseDetail, LessonDetail, MalformedId, ModuleDetail};

mod save;
pub use save::{CourseSaveRequest, LessonSave, ModuleSave};
