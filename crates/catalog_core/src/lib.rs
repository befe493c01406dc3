use std::sync::Arc;

use anyhow::Result;

pub mod actions;
pub mod backend;
pub mod config;
pub mod edit_dialog;
pub mod effects;
pub mod entity_service;
pub mod error;
pub mod home;
pub mod resolver;
pub mod selectors;
pub mod store;

pub use actions::CourseAction;
pub use backend::{CourseBackend, CoursesHttpService, MissingCourseBackend};
pub use config::Settings;
pub use edit_dialog::{
    CourseForm, DialogConfig, DialogHost, DialogMode, EditCourseDialog, SaveOutcome,
};
pub use effects::CoursesEffects;
pub use entity_service::CourseEntityService;
pub use error::{CourseFormError, LoadGuardError};
pub use home::{HomeSnapshot, HomeView};
pub use resolver::{CoursesResolver, RouteResolver};
pub use store::{CourseStore, CoursesState};

/// Application-lifetime context: one store, its load effect, the entity
/// service, and the route resolver. Dropping it stops the effect task.
pub struct CourseCatalog {
    store: CourseStore,
    service: CourseEntityService,
    resolver: CoursesResolver,
    effects: CoursesEffects,
}

impl CourseCatalog {
    /// Must be called from within a tokio runtime.
    pub fn new(backend: Arc<dyn CourseBackend>) -> Self {
        let store = CourseStore::new();
        let effects = CoursesEffects::spawn(store.clone(), Arc::clone(&backend));
        let service = CourseEntityService::new(store.clone(), backend);
        let resolver = CoursesResolver::new(service.clone());
        Self {
            store,
            service,
            resolver,
            effects,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let backend =
            CoursesHttpService::new(&settings.api_base_url, settings.request_timeout())?;
        Ok(Self::new(Arc::new(backend)))
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }

    pub fn service(&self) -> &CourseEntityService {
        &self.service
    }

    pub fn resolver(&self) -> &CoursesResolver {
        &self.resolver
    }

    pub fn home_view(&self, dialog: Arc<dyn DialogHost>) -> HomeView {
        HomeView::new(self.service.clone(), dialog)
    }

    pub fn shutdown(self) {
        self.effects.shutdown();
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
