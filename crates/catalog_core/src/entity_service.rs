//! Facade consumers use instead of touching the store or backend directly.

use std::sync::Arc;

use anyhow::Result;
use futures::stream::BoxStream;
use shared::domain::{Course, NewCourse};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    actions::CourseAction,
    backend::CourseBackend,
    selectors::{select_all_courses, select_all_courses_loaded},
    store::CourseStore,
};

#[derive(Clone)]
pub struct CourseEntityService {
    store: CourseStore,
    backend: Arc<dyn CourseBackend>,
}

impl CourseEntityService {
    pub fn new(store: CourseStore, backend: Arc<dyn CourseBackend>) -> Self {
        Self { store, backend }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn entities(&self) -> BoxStream<'static, Vec<Course>> {
        self.store.select(select_all_courses)
    }

    pub fn loaded(&self) -> BoxStream<'static, bool> {
        self.store.select(select_all_courses_loaded)
    }

    pub fn get_all(&self) {
        self.store.dispatch(CourseAction::LoadAllCourses);
    }

    /// Persists first; the store only sees the course once the backend has
    /// echoed it back. On failure nothing is mutated.
    pub async fn add(&self, course: NewCourse) -> Result<Course> {
        let stored = self.backend.add_course(course).await?;
        info!(course_id = stored.id.0, "created course");
        self.store.upsert(stored.clone());
        Ok(stored)
    }

    /// Applies the change locally right away and persists in the background.
    /// A persist failure is only logged; local and backend state may diverge.
    pub fn update(&self, course: Course) -> JoinHandle<()> {
        self.store.upsert(course.clone());
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            let course_id = course.id.0;
            if let Err(err) = backend.update_course(course).await {
                warn!(course_id, "failed to persist course update: {err:#}");
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/entity_service_tests.rs"]
mod tests;
