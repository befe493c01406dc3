use std::fmt::Write as _;

use catalog_core::HomeSnapshot;
use shared::domain::Course;

pub fn render_course(course: &Course) -> String {
    let promo = if course.promo { " [promo]" } else { "" };
    format!(
        "#{} {} ({}){promo}",
        course.id.0,
        course.description,
        course.category.as_str()
    )
}

pub fn render_home(snapshot: &HomeSnapshot) -> String {
    let mut out = String::new();
    render_section(&mut out, "Beginner", &snapshot.beginner_courses);
    render_section(&mut out, "Advanced", &snapshot.advanced_courses);
    let _ = writeln!(out, "Promo courses: {}", snapshot.promo_total);
    out
}

fn render_section(out: &mut String, title: &str, courses: &[Course]) {
    let _ = writeln!(out, "{title} ({})", courses.len());
    if courses.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for course in courses {
        let _ = writeln!(out, "  {}", render_course(course));
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
