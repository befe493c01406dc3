//! Closed set of signals routed through the course store.

use shared::domain::Course;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseAction {
    /// Intent only; the store does not change on this action.
    LoadAllCourses,
    AllCoursesLoaded {
        courses: Vec<Course>,
    },
    /// Emitted by the load effect when the backend fetch fails.
    CoursesLoadFailed {
        reason: String,
    },
}

impl CourseAction {
    pub fn tag(&self) -> &'static str {
        match self {
            CourseAction::LoadAllCourses => "[Courses] Load All",
            CourseAction::AllCoursesLoaded { .. } => "[Courses] All Loaded",
            CourseAction::CoursesLoadFailed { .. } => "[Courses] Load Failed",
        }
    }
}
