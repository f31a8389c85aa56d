// ============================================================================
// APP STATE - Browser-side application state
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use crate::config::CONFIG;
use crate::models::{GalleryItem, NewsItem};
use crate::router::Route;
use crate::services::ApiClient;
use crate::state::reactivity::ReactiveState;
use crate::utils::BrowserStore;
use crate::viewmodels::{Column, DataTable, Record, SessionViewModel};

/// Session store wired to the real backend and localStorage
pub type PortalSession = SessionViewModel<ApiClient, BrowserStore>;

/// Lifecycle of data fetched for a page
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Remote<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Remote::Idle)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub session: Rc<PortalSession>,
    pub route: ReactiveState<Route>,

    // Portal UI
    pub login_error: Rc<RefCell<Option<String>>>,
    pub login_admission_number: Rc<RefCell<String>>,
    pub login_pending: Rc<RefCell<bool>>,
    pub dashboard_error: Rc<RefCell<Option<String>>>,
    pub dashboard_busy: Rc<RefCell<bool>>,
    pub grades: Rc<RefCell<Remote<usize>>>,
    pub grades_table: Rc<RefCell<DataTable>>,
    pub selected_grade: Rc<RefCell<Option<Record>>>,

    // Public content
    pub news: Rc<RefCell<Remote<Vec<NewsItem>>>>,
    pub gallery: Rc<RefCell<Remote<Vec<GalleryItem>>>>,

    pub change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
}

impl AppState {
    pub fn new(initial_route: Route) -> Self {
        let session = SessionViewModel::with_cache(
            ApiClient::new(),
            crate::services::SnapshotCache::new(BrowserStore)
                .with_max_age(CONFIG.snapshot_max_age()),
        );

        let selected_grade: Rc<RefCell<Option<Record>>> = Rc::new(RefCell::new(None));
        let change_subscribers: Rc<RefCell<Vec<Rc<dyn Fn()>>>> = Rc::new(RefCell::new(Vec::new()));

        let grades_table = {
            let selected = selected_grade.clone();
            let subscribers = change_subscribers.clone();
            DataTable::new(grade_columns(), Vec::new())
                .with_page_size(CONFIG.default_page_size)
                .on_view(move |row| {
                    *selected.borrow_mut() = Some(row.clone());
                    notify(&subscribers);
                })
        };

        Self {
            session: Rc::new(session),
            route: ReactiveState::new(initial_route),
            login_error: Rc::new(RefCell::new(None)),
            login_admission_number: Rc::new(RefCell::new(String::new())),
            login_pending: Rc::new(RefCell::new(false)),
            dashboard_error: Rc::new(RefCell::new(None)),
            dashboard_busy: Rc::new(RefCell::new(false)),
            grades: Rc::new(RefCell::new(Remote::Idle)),
            grades_table: Rc::new(RefCell::new(grades_table)),
            selected_grade,
            news: Rc::new(RefCell::new(Remote::Idle)),
            gallery: Rc::new(RefCell::new(Remote::Idle)),
            change_subscribers,
        }
    }

    /// Register a callback for any change that needs a re-render
    pub fn subscribe_to_changes<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        let callback: Rc<dyn Fn()> = Rc::new(callback);
        {
            let callback = callback.clone();
            self.session.state().subscribe(move || callback());
        }
        {
            let callback = callback.clone();
            self.route.subscribe(move || callback());
        }
        self.change_subscribers.borrow_mut().push(callback);
    }

    /// Local UI state changed
    pub fn notify_changed(&self) {
        notify(&self.change_subscribers);
    }

    /// Forget per-student data (after logout)
    pub fn reset_portal(&self) {
        *self.login_error.borrow_mut() = None;
        *self.dashboard_error.borrow_mut() = None;
        *self.grades.borrow_mut() = Remote::Idle;
        *self.selected_grade.borrow_mut() = None;
        self.grades_table.borrow_mut().set_data(Vec::new());
    }
}

fn notify(subscribers: &Rc<RefCell<Vec<Rc<dyn Fn()>>>>) {
    let callbacks: Vec<Rc<dyn Fn()>> = subscribers.borrow().clone();
    for callback in callbacks {
        callback();
    }
}

fn score(value: &Value, _row: &Record) -> String {
    value
        .as_f64()
        .map(|score| format!("{:.1}", score))
        .unwrap_or_else(|| "-".to_string())
}

fn grade_columns() -> Vec<Column> {
    vec![
        Column::new("subject", "Subject"),
        Column::new("term", "Term"),
        Column::new("session", "Session"),
        Column::new("ca_score", "CA").with_render(score),
        Column::new("exam_score", "Exam").with_render(score),
        Column::new("total", "Total").with_render(score),
        Column::new("grade", "Grade").sortable(false),
    ]
}
