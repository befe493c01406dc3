use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CourseId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseCategory {
    Beginner,
    Advanced,
    #[serde(other)]
    Other,
}

impl CourseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseCategory::Beginner => "BEGINNER",
            CourseCategory::Advanced => "ADVANCED",
            CourseCategory::Other => "OTHER",
        }
    }
}

impl std::str::FromStr for CourseCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "BEGINNER" => Ok(CourseCategory::Beginner),
            "ADVANCED" => Ok(CourseCategory::Advanced),
            "" => Err("category must not be empty".to_string()),
            other => Err(format!("unknown course category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub seq_no: i64,
    pub url: String,
    pub icon_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_list_icon: Option<String>,
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    pub category: CourseCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons_count: Option<u32>,
    #[serde(default)]
    pub promo: bool,
}

/// Create payload; the backend assigns `id` and `seq_no` and echoes the stored [`Course`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub description: String,
    pub category: CourseCategory,
    pub long_description: String,
    pub promo: bool,
    pub url: String,
    pub icon_url: String,
}

/// Display order: ascending sequence number, then ascending id.
pub fn compare_courses(left: &Course, right: &Course) -> Ordering {
    left.seq_no
        .cmp(&right.seq_no)
        .then_with(|| left.id.cmp(&right.id))
}
