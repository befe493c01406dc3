//! Navigation gate that holds a course-listing route until the store is loaded.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::{actions::CourseAction, entity_service::CourseEntityService, error::LoadGuardError};

#[async_trait]
pub trait RouteResolver: Send + Sync {
    /// Resolves to `true` once the destination may render.
    async fn resolve(&self) -> Result<bool, LoadGuardError>;
}

pub struct CoursesResolver {
    courses: CourseEntityService,
    loading: AtomicBool,
}

impl CoursesResolver {
    pub fn new(courses: CourseEntityService) -> Self {
        Self {
            courses,
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    fn finish(&self) {
        self.loading.store(false, Ordering::Release);
    }
}

/// Held by the caller that issued the load; clears the in-flight flag even
/// when that caller's future is dropped before the load settles.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[async_trait]
impl RouteResolver for CoursesResolver {
    async fn resolve(&self) -> Result<bool, LoadGuardError> {
        let store = self.courses.store();
        let mut state = store.subscribe();
        let mut actions = store.subscribe_actions();

        if state.borrow_and_update().is_loaded() {
            return Ok(true);
        }

        // One request per cold start; later callers wait on the same load.
        let _issued = if !self.loading.swap(true, Ordering::AcqRel) {
            self.courses.get_all();
            Some(LoadingGuard(&self.loading))
        } else {
            debug!("course load already in flight");
            None
        };

        loop {
            tokio::select! {
                changed = state.changed() => {
                    if changed.is_err() {
                        self.finish();
                        return Err(LoadGuardError::StoreClosed);
                    }
                    if state.borrow_and_update().is_loaded() {
                        self.finish();
                        return Ok(true);
                    }
                }
                action = actions.recv() => match action {
                    Ok(CourseAction::CoursesLoadFailed { reason }) => {
                        self.finish();
                        return Err(LoadGuardError::LoadFailed { reason });
                    }
                    Ok(CourseAction::LoadAllCourses)
                    | Ok(CourseAction::AllCoursesLoaded { .. }) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "course resolver fell behind the action stream");
                    }
                    Err(RecvError::Closed) => {
                        self.finish();
                        return Err(LoadGuardError::StoreClosed);
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
