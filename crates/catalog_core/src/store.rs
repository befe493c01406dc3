//! Normalized course table plus the `all_courses_loaded` flag.
//!
//! The store is the only writer. Every committed mutation publishes a new
//! immutable snapshot on a watch channel, so readers never observe a
//! half-applied bulk load. Dispatched actions are reduced first and then
//! broadcast to effect listeners.

use std::{collections::HashMap, sync::Arc};

use futures::{future, stream::BoxStream, StreamExt};
use shared::domain::{compare_courses, Course, CourseId};
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::actions::CourseAction;

const ACTION_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursesState {
    entities: HashMap<CourseId, Course>,
    all_courses_loaded: bool,
}

impl CoursesState {
    pub fn is_loaded(&self) -> bool {
        self.all_courses_loaded
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.entities.get(&id)
    }

    /// All courses in display order.
    pub fn get_all(&self) -> Vec<Course> {
        let mut courses: Vec<Course> = self.entities.values().cloned().collect();
        courses.sort_by(compare_courses);
        courses
    }

    /// Replaces the whole collection and marks it loaded. Duplicate ids in
    /// `courses` resolve to the last occurrence. Returns whether anything
    /// observable changed.
    pub fn add_all(&mut self, courses: Vec<Course>) -> bool {
        let mut entities = HashMap::with_capacity(courses.len());
        for course in courses {
            entities.insert(course.id, course);
        }

        let changed = !self.all_courses_loaded || entities != self.entities;
        self.entities = entities;
        self.all_courses_loaded = true;
        changed
    }

    /// Inserts a new course or fully replaces the one with the same id.
    /// Leaves the loaded flag untouched.
    pub fn upsert(&mut self, course: Course) -> bool {
        if self.entities.get(&course.id) == Some(&course) {
            return false;
        }
        self.entities.insert(course.id, course);
        true
    }

    pub fn reduce(&mut self, action: &CourseAction) -> bool {
        match action {
            CourseAction::LoadAllCourses => false,
            CourseAction::AllCoursesLoaded { courses } => self.add_all(courses.clone()),
            CourseAction::CoursesLoadFailed { .. } => false,
        }
    }
}

struct StoreInner {
    state: watch::Sender<Arc<CoursesState>>,
    actions: broadcast::Sender<CourseAction>,
}

/// Shared handle to the single course store instance.
#[derive(Clone)]
pub struct CourseStore {
    inner: Arc<StoreInner>,
}

impl Default for CourseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Arc::new(CoursesState::default()));
        let (actions, _) = broadcast::channel(ACTION_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(StoreInner { state, actions }),
        }
    }

    pub fn snapshot(&self) -> Arc<CoursesState> {
        self.inner.state.borrow().clone()
    }

    pub fn get_all(&self) -> Vec<Course> {
        self.snapshot().get_all()
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.state.borrow().is_loaded()
    }

    pub fn dispatch(&self, action: CourseAction) {
        let changed = self
            .inner
            .state
            .send_if_modified(|state| Arc::make_mut(state).reduce(&action));
        debug!(action = action.tag(), changed, "dispatched course action");
        // No listeners is fine: effects may not be running in every context.
        let _ = self.inner.actions.send(action);
    }

    pub fn add_all(&self, courses: Vec<Course>) {
        self.dispatch(CourseAction::AllCoursesLoaded { courses });
    }

    pub fn upsert(&self, course: Course) {
        let course_id = course.id.0;
        let changed = self
            .inner
            .state
            .send_if_modified(|state| Arc::make_mut(state).upsert(course));
        debug!(course_id, changed, "upserted course");
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<CoursesState>> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_actions(&self) -> broadcast::Receiver<CourseAction> {
        self.inner.actions.subscribe()
    }

    /// Streams `projection` over the store: the current value first, then
    /// every distinct value produced by later commits.
    pub fn select<T, F>(&self, projection: F) -> BoxStream<'static, T>
    where
        T: Clone + PartialEq + Send + 'static,
        F: Fn(&CoursesState) -> T + Send + 'static,
    {
        let mut last: Option<T> = None;
        WatchStream::new(self.subscribe())
            .filter_map(move |state| {
                let next = projection(&*state);
                let emitted = if last.as_ref() == Some(&next) {
                    None
                } else {
                    last = Some(next.clone());
                    Some(next)
                };
                future::ready(emitted)
            })
            .boxed()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
