use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use catalog_core::{
    CourseCatalog, DialogConfig, DialogHost, RouteResolver, SaveOutcome, Settings,
};
use shared::{
    domain::{Course, CourseCategory, CourseId},
    protocol::CoursesPayload,
};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct BackendState {
    list_calls: Arc<AtomicUsize>,
    saved: Arc<Mutex<Vec<(i64, Course)>>>,
}

#[derive(Default)]
struct HeadlessDialogHost {
    closes: AtomicUsize,
}

impl DialogHost for HeadlessDialogHost {
    fn open(&self, _config: &DialogConfig) {}

    fn close(&self) {
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}

fn seeded_course(id: i64, category: CourseCategory, promo: bool) -> Course {
    Course {
        id: CourseId(id),
        seq_no: 10 - id,
        url: format!("course-{id}"),
        icon_url: format!("https://cdn.example.test/{id}.png"),
        course_list_icon: None,
        description: format!("Course {id}"),
        long_description: "Seeded course".to_string(),
        category,
        lessons_count: Some(5),
        promo,
    }
}

async fn list_courses(State(state): State<BackendState>) -> Json<CoursesPayload> {
    state.list_calls.fetch_add(1, Ordering::SeqCst);
    Json(CoursesPayload {
        payload: vec![
            seeded_course(1, CourseCategory::Beginner, false),
            seeded_course(2, CourseCategory::Advanced, true),
            seeded_course(3, CourseCategory::Beginner, false),
        ],
    })
}

async fn save_course(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    Json(course): Json<Course>,
) -> StatusCode {
    state.saved.lock().await.push((id, course));
    StatusCode::NO_CONTENT
}

async fn spawn_backend(state: BackendState) -> anyhow::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/courses", get(list_courses))
        .route("/api/courses/:id", put(save_course))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

#[tokio::test]
async fn navigation_loads_once_then_optimistic_edit_reaches_backend() {
    let state = BackendState::default();
    let api_base_url = spawn_backend(state.clone()).await.expect("spawn backend");
    let settings = Settings {
        api_base_url,
        ..Settings::default()
    };
    let catalog = CourseCatalog::from_settings(&settings).expect("catalog");

    assert!(catalog.resolver().resolve().await.expect("first navigation"));
    assert!(catalog.resolver().resolve().await.expect("second navigation"));
    assert_eq!(state.list_calls.load(Ordering::SeqCst), 1);

    let host = Arc::new(HeadlessDialogHost::default());
    let home = catalog.home_view(host.clone());
    let before = home.snapshot();
    assert_eq!(before.beginner_courses.len(), 2);
    assert_eq!(before.advanced_courses.len(), 1);
    assert_eq!(before.promo_total, 1);
    // seq_no descends with id, so course 3 sorts first.
    assert_eq!(before.beginner_courses[0].id, CourseId(3));

    let target = before.beginner_courses[1].clone();
    let mut dialog = home.on_edit_course(target.clone());
    dialog.form_mut().promo = true;
    let outcome = dialog.on_save().await.expect("save");

    assert_eq!(home.snapshot().promo_total, 2);
    assert_eq!(host.closes.load(Ordering::SeqCst), 1);

    let SaveOutcome::Updated { persist, course } = outcome else {
        panic!("expected an update outcome");
    };
    persist.await.expect("persist task");
    let saved = state.saved.lock().await;
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, target.id.0);
    assert_eq!(saved[0].1, course);

    catalog.shutdown();
}
