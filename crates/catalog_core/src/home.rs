//! Home screen view model: category lists, promo counter, dialog launchers.

use std::sync::Arc;

use futures::stream::BoxStream;
use shared::domain::Course;

use crate::{
    edit_dialog::{DialogConfig, DialogHost, EditCourseDialog},
    entity_service::CourseEntityService,
    selectors::{select_advanced_courses, select_beginner_courses, select_promo_total},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeSnapshot {
    pub beginner_courses: Vec<Course>,
    pub advanced_courses: Vec<Course>,
    pub promo_total: usize,
}

pub struct HomeView {
    courses: CourseEntityService,
    dialog: Arc<dyn DialogHost>,
}

impl HomeView {
    pub fn new(courses: CourseEntityService, dialog: Arc<dyn DialogHost>) -> Self {
        Self { courses, dialog }
    }

    pub fn beginner_courses(&self) -> BoxStream<'static, Vec<Course>> {
        self.courses.store().select(select_beginner_courses)
    }

    pub fn advanced_courses(&self) -> BoxStream<'static, Vec<Course>> {
        self.courses.store().select(select_advanced_courses)
    }

    pub fn promo_total(&self) -> BoxStream<'static, usize> {
        self.courses.store().select(select_promo_total)
    }

    pub fn snapshot(&self) -> HomeSnapshot {
        let state = self.courses.store().snapshot();
        HomeSnapshot {
            beginner_courses: select_beginner_courses(&state),
            advanced_courses: select_advanced_courses(&state),
            promo_total: select_promo_total(&state),
        }
    }

    pub fn on_add_course(&self) -> EditCourseDialog {
        self.open_dialog(DialogConfig::create())
    }

    pub fn on_edit_course(&self, course: Course) -> EditCourseDialog {
        self.open_dialog(DialogConfig::update(course))
    }

    fn open_dialog(&self, config: DialogConfig) -> EditCourseDialog {
        self.dialog.open(&config);
        EditCourseDialog::new(config, self.courses.clone(), Arc::clone(&self.dialog))
    }
}

#[cfg(test)]
#[path = "tests/home_tests.rs"]
mod tests;
