//! Pure projections over [`CoursesState`]. Equal input state always yields
//! equal output.

use shared::domain::{Course, CourseCategory};

use crate::store::CoursesState;

pub fn select_all_courses(state: &CoursesState) -> Vec<Course> {
    state.get_all()
}

pub fn select_all_courses_loaded(state: &CoursesState) -> bool {
    state.is_loaded()
}

pub fn select_courses_by_category(state: &CoursesState, category: CourseCategory) -> Vec<Course> {
    state
        .get_all()
        .into_iter()
        .filter(|course| course.category == category)
        .collect()
}

pub fn select_beginner_courses(state: &CoursesState) -> Vec<Course> {
    select_courses_by_category(state, CourseCategory::Beginner)
}

pub fn select_advanced_courses(state: &CoursesState) -> Vec<Course> {
    select_courses_by_category(state, CourseCategory::Advanced)
}

pub fn select_promo_total(state: &CoursesState) -> usize {
    state
        .get_all()
        .iter()
        .filter(|course| course.promo)
        .count()
}

#[cfg(test)]
#[path = "tests/selectors_tests.rs"]
mod tests;
