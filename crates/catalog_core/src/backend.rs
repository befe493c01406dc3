//! Backend collaborator seam and its HTTP implementation.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::{Course, NewCourse},
    protocol::{course_path, CoursesPayload, COURSES_PATH},
};
use url::Url;

#[async_trait]
pub trait CourseBackend: Send + Sync {
    async fn find_all_courses(&self) -> Result<Vec<Course>>;
    /// Persists a new course and returns the stored record with its assigned id.
    async fn add_course(&self, course: NewCourse) -> Result<Course>;
    async fn update_course(&self, course: Course) -> Result<()>;
}

pub struct MissingCourseBackend;

#[async_trait]
impl CourseBackend for MissingCourseBackend {
    async fn find_all_courses(&self) -> Result<Vec<Course>> {
        Err(anyhow!("course backend is unavailable"))
    }

    async fn add_course(&self, _course: NewCourse) -> Result<Course> {
        Err(anyhow!("course backend is unavailable"))
    }

    async fn update_course(&self, course: Course) -> Result<()> {
        Err(anyhow!(
            "course backend is unavailable; cannot persist course {}",
            course.id.0
        ))
    }
}

pub struct CoursesHttpService {
    http: Client,
    base_url: String,
}

impl CoursesHttpService {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url.trim())
            .with_context(|| format!("invalid course api base url '{base_url}'"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(anyhow!(
                "course api base url must use http or https, got '{}'",
                parsed.scheme()
            ));
        }
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl CourseBackend for CoursesHttpService {
    async fn find_all_courses(&self) -> Result<Vec<Course>> {
        let body: CoursesPayload = self
            .http
            .get(format!("{}{COURSES_PATH}", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.payload)
    }

    async fn add_course(&self, course: NewCourse) -> Result<Course> {
        let stored: Course = self
            .http
            .post(format!("{}{COURSES_PATH}", self.base_url))
            .json(&course)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(stored)
    }

    async fn update_course(&self, course: Course) -> Result<()> {
        self.http
            .put(format!("{}{}", self.base_url, course_path(course.id)))
            .json(&course)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
