use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadGuardError {
    #[error("course load failed: {reason}")]
    LoadFailed { reason: String },
    #[error("course store closed before courses finished loading")]
    StoreClosed,
}

#[derive(Debug, Error)]
pub enum CourseFormError {
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),
    #[error("update dialog opened without a course to edit")]
    MissingCourse,
    #[error(transparent)]
    Persist(#[from] anyhow::Error),
}
