//! Load orchestration: turns `LoadAllCourses` intents into backend fetches.
//!
//! A single task drains the action stream, so fetches run one at a time in
//! arrival order and never race to populate the store.

use std::sync::Arc;

use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tracing::{info, warn};

use crate::{actions::CourseAction, backend::CourseBackend, store::CourseStore};

pub struct CoursesEffects {
    task: JoinHandle<()>,
}

impl CoursesEffects {
    /// Must be called from within a tokio runtime.
    pub fn spawn(store: CourseStore, backend: Arc<dyn CourseBackend>) -> Self {
        let mut actions = store.subscribe_actions();
        let task = tokio::spawn(async move {
            loop {
                match actions.recv().await {
                    Ok(CourseAction::LoadAllCourses) => {
                        load_all_courses(&store, backend.as_ref()).await;
                    }
                    Ok(CourseAction::AllCoursesLoaded { .. })
                    | Ok(CourseAction::CoursesLoadFailed { .. }) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "course effects fell behind the action stream");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn shutdown(&self) {
        self.task.abort();
    }
}

impl Drop for CoursesEffects {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn load_all_courses(store: &CourseStore, backend: &dyn CourseBackend) {
    match backend.find_all_courses().await {
        Ok(courses) => {
            info!(count = courses.len(), "loaded courses from backend");
            store.dispatch(CourseAction::AllCoursesLoaded { courses });
        }
        Err(err) => {
            warn!("failed to load courses: {err:#}");
            store.dispatch(CourseAction::CoursesLoadFailed {
                reason: format!("{err:#}"),
            });
        }
    }
}

#[cfg(test)]
#[path = "tests/effects_tests.rs"]
mod tests;
