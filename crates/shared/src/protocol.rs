use serde::{Deserialize, Serialize};

use crate::domain::Course;

/// Envelope used by the backend for collection responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoursesPayload {
    pub payload: Vec<Course>,
}

pub const COURSES_PATH: &str = "/api/courses";

pub fn course_path(id: crate::domain::CourseId) -> String {
    format!("{COURSES_PATH}/{}", id.0)
}
