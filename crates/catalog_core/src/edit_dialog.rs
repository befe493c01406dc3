//! Create/update dialog view model.
//!
//! Update is optimistic: the store changes and the dialog closes before the
//! backend acknowledges. Create is pessimistic: the dialog only closes once
//! the backend has stored the course.

use std::sync::Arc;

use shared::domain::{Course, CourseCategory, NewCourse};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{entity_service::CourseEntityService, error::CourseFormError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogConfig {
    pub dialog_title: String,
    pub mode: DialogMode,
    pub course: Option<Course>,
}

impl DialogConfig {
    pub fn create() -> Self {
        Self {
            dialog_title: "Create Course".to_string(),
            mode: DialogMode::Create,
            course: None,
        }
    }

    pub fn update(course: Course) -> Self {
        Self {
            dialog_title: "Edit Course".to_string(),
            mode: DialogMode::Update,
            course: Some(course),
        }
    }
}

/// Modal host. Closing carries no payload; callers re-read the store.
pub trait DialogHost: Send + Sync {
    fn open(&self, config: &DialogConfig);
    fn close(&self);
}

/// Form values. `url` and `icon_url` only exist in create mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseForm {
    pub description: String,
    pub category: Option<CourseCategory>,
    pub long_description: String,
    pub promo: bool,
    pub url: Option<String>,
    pub icon_url: Option<String>,
}

impl CourseForm {
    pub fn for_mode(mode: DialogMode) -> Self {
        match mode {
            DialogMode::Update => Self::default(),
            DialogMode::Create => Self {
                url: Some(String::new()),
                icon_url: Some(String::new()),
                ..Self::default()
            },
        }
    }

    /// Copies the fields this form has controls for.
    pub fn patch_from(&mut self, course: &Course) {
        self.description = course.description.clone();
        self.category = Some(course.category);
        self.long_description = course.long_description.clone();
        self.promo = course.promo;
        if self.url.is_some() {
            self.url = Some(course.url.clone());
        }
        if self.icon_url.is_some() {
            self.icon_url = Some(course.icon_url.clone());
        }
    }

    pub fn validate(&self) -> Result<(), CourseFormError> {
        required_text("description", &self.description)?;
        if self.category.is_none() {
            return Err(CourseFormError::MissingField("category"));
        }
        required_text("longDescription", &self.long_description)?;
        if let Some(url) = &self.url {
            required_text("url", url)?;
        }
        if let Some(icon_url) = &self.icon_url {
            required_text("iconUrl", icon_url)?;
        }
        Ok(())
    }

    /// Shallow merge: form values win over the existing record.
    pub fn merge_into(&self, existing: &Course) -> Result<Course, CourseFormError> {
        self.validate()?;
        let mut merged = existing.clone();
        merged.description = self.description.clone();
        merged.category = self.category.ok_or(CourseFormError::MissingField("category"))?;
        merged.long_description = self.long_description.clone();
        merged.promo = self.promo;
        if let Some(url) = &self.url {
            merged.url = url.clone();
        }
        if let Some(icon_url) = &self.icon_url {
            merged.icon_url = icon_url.clone();
        }
        Ok(merged)
    }

    pub fn to_new_course(&self) -> Result<NewCourse, CourseFormError> {
        self.validate()?;
        Ok(NewCourse {
            description: self.description.clone(),
            category: self.category.ok_or(CourseFormError::MissingField("category"))?,
            long_description: self.long_description.clone(),
            promo: self.promo,
            url: self
                .url
                .clone()
                .ok_or(CourseFormError::MissingField("url"))?,
            icon_url: self
                .icon_url
                .clone()
                .ok_or(CourseFormError::MissingField("iconUrl"))?,
        })
    }
}

fn required_text(field: &'static str, value: &str) -> Result<(), CourseFormError> {
    if value.trim().is_empty() {
        Err(CourseFormError::MissingField(field))
    } else {
        Ok(())
    }
}

#[derive(Debug)]
pub enum SaveOutcome {
    Created(Course),
    /// The local store already holds the update; the handle tracks the
    /// background persist and may be dropped.
    Updated { course: Course, persist: JoinHandle<()> },
}

pub struct EditCourseDialog {
    dialog_title: String,
    mode: DialogMode,
    course: Option<Course>,
    form: CourseForm,
    courses: CourseEntityService,
    host: Arc<dyn DialogHost>,
}

impl EditCourseDialog {
    pub fn new(
        config: DialogConfig,
        courses: CourseEntityService,
        host: Arc<dyn DialogHost>,
    ) -> Self {
        let mut form = CourseForm::for_mode(config.mode);
        if config.mode == DialogMode::Update {
            if let Some(course) = &config.course {
                form.patch_from(course);
            }
        }

        Self {
            dialog_title: config.dialog_title,
            mode: config.mode,
            course: config.course,
            form,
            courses,
            host,
        }
    }

    pub fn dialog_title(&self) -> &str {
        &self.dialog_title
    }

    pub fn mode(&self) -> DialogMode {
        self.mode
    }

    pub fn course(&self) -> Option<&Course> {
        self.course.as_ref()
    }

    pub fn form(&self) -> &CourseForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CourseForm {
        &mut self.form
    }

    pub fn on_close(&self) {
        self.host.close();
    }

    /// On error the dialog stays open and the store is untouched.
    pub async fn on_save(&self) -> Result<SaveOutcome, CourseFormError> {
        match self.mode {
            DialogMode::Update => {
                let existing = self.course.as_ref().ok_or(CourseFormError::MissingCourse)?;
                let course = self.form.merge_into(existing)?;
                let persist = self.courses.update(course.clone());
                debug!(course_id = course.id.0, "closing dialog after optimistic update");
                self.host.close();
                Ok(SaveOutcome::Updated { course, persist })
            }
            DialogMode::Create => {
                let new_course = self.form.to_new_course()?;
                let stored = self.courses.add(new_course).await?;
                self.host.close();
                Ok(SaveOutcome::Created(stored))
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/edit_dialog_tests.rs"]
mod tests;
