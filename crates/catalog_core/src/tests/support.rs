//! In-memory collaborators shared by the unit tests.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex as StdMutex,
    },
    time::Duration,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::domain::{Course, CourseCategory, CourseId, NewCourse};
use tokio::sync::{Mutex, Semaphore};

use crate::{
    backend::CourseBackend,
    edit_dialog::{DialogConfig, DialogHost},
};

pub fn course(id: i64, seq_no: i64, category: CourseCategory, promo: bool) -> Course {
    Course {
        id: CourseId(id),
        seq_no,
        url: format!("course-{id}"),
        icon_url: format!("https://cdn.example.test/icons/{id}.png"),
        course_list_icon: None,
        description: format!("Course {id}"),
        long_description: format!("Long description for course {id}"),
        category,
        lessons_count: Some(10),
        promo,
    }
}

/// Polls `condition` while yielding to spawned tasks; panics after two seconds.
pub async fn eventually(condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(
            tokio::time::Instant::now() < deadline,
            "condition not reached in time"
        );
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

#[derive(Default)]
pub struct InMemoryBackend {
    courses: Mutex<Vec<Course>>,
    fetch_failure: Mutex<Option<String>>,
    add_failure: Mutex<Option<String>>,
    update_failure: Mutex<Option<String>>,
    fetch_gate: Option<Semaphore>,
    add_gate: Option<Semaphore>,
    update_gate: Option<Semaphore>,
    find_calls: AtomicUsize,
    add_calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    pub added: Mutex<Vec<Course>>,
    pub updated: Mutex<Vec<Course>>,
}

impl InMemoryBackend {
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            courses: Mutex::new(courses),
            ..Self::default()
        }
    }

    pub fn failing_fetches(reason: impl Into<String>) -> Self {
        Self {
            fetch_failure: Mutex::new(Some(reason.into())),
            ..Self::default()
        }
    }

    /// Fetches block until [`InMemoryBackend::release_fetch`] is called.
    pub fn gate_fetches(mut self) -> Self {
        self.fetch_gate = Some(Semaphore::new(0));
        self
    }

    pub fn gate_adds(mut self) -> Self {
        self.add_gate = Some(Semaphore::new(0));
        self
    }

    pub fn gate_updates(mut self) -> Self {
        self.update_gate = Some(Semaphore::new(0));
        self
    }

    pub async fn set_fetch_failure(&self, reason: Option<&str>) {
        *self.fetch_failure.lock().await = reason.map(str::to_string);
    }

    pub async fn set_add_failure(&self, reason: Option<&str>) {
        *self.add_failure.lock().await = reason.map(str::to_string);
    }

    pub async fn set_update_failure(&self, reason: Option<&str>) {
        *self.update_failure.lock().await = reason.map(str::to_string);
    }

    pub fn release_fetch(&self) {
        if let Some(gate) = &self.fetch_gate {
            gate.add_permits(1);
        }
    }

    pub fn release_add(&self) {
        if let Some(gate) = &self.add_gate {
            gate.add_permits(1);
        }
    }

    pub fn release_update(&self) {
        if let Some(gate) = &self.update_gate {
            gate.add_permits(1);
        }
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

async fn pass_gate(gate: &Option<Semaphore>) -> Result<()> {
    if let Some(gate) = gate {
        gate.acquire().await?.forget();
    }
    Ok(())
}

#[async_trait]
impl CourseBackend for InMemoryBackend {
    async fn find_all_courses(&self) -> Result<Vec<Course>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        let gated = pass_gate(&self.fetch_gate).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        gated?;

        if let Some(reason) = self.fetch_failure.lock().await.clone() {
            return Err(anyhow!(reason));
        }
        Ok(self.courses.lock().await.clone())
    }

    async fn add_course(&self, course: NewCourse) -> Result<Course> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        pass_gate(&self.add_gate).await?;
        if let Some(reason) = self.add_failure.lock().await.clone() {
            return Err(anyhow!(reason));
        }

        let mut courses = self.courses.lock().await;
        let next_id = courses.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        let stored = Course {
            id: CourseId(next_id),
            seq_no: next_id,
            url: course.url,
            icon_url: course.icon_url,
            course_list_icon: None,
            description: course.description,
            long_description: course.long_description,
            category: course.category,
            lessons_count: None,
            promo: course.promo,
        };
        courses.push(stored.clone());
        self.added.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn update_course(&self, course: Course) -> Result<()> {
        pass_gate(&self.update_gate).await?;
        if let Some(reason) = self.update_failure.lock().await.clone() {
            return Err(anyhow!(reason));
        }
        self.updated.lock().await.push(course);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingDialogHost {
    opened: StdMutex<Vec<DialogConfig>>,
    closes: AtomicUsize,
}

impl RecordingDialogHost {
    pub fn opened(&self) -> Vec<DialogConfig> {
        self.opened.lock().expect("dialog host lock").clone()
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

impl DialogHost for RecordingDialogHost {
    fn open(&self, config: &DialogConfig) {
        self.opened
            .lock()
            .expect("dialog host lock")
            .push(config.clone());
    }

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
