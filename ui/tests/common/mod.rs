//! Test doubles for the controller's seams.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use autos_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use autos_ui::{CarView, Dialogs, FormMode, FormState, TableView, Transport};
use tokio::sync::oneshot;

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

struct Step {
    gate: Option<oneshot::Receiver<()>>,
    outcome: Result<HttpResponse, ApiError>,
}

/// Answers requests from a queue, in order, and records what was asked.
#[derive(Default)]
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.push(None, Ok(HttpResponse::new(status, body)));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.push(None, Err(ApiError::Transport(message.to_string())));
        self
    }

    /// Queue a response that is held back until the returned sender fires.
    pub fn respond_when_released(&self, status: u16, body: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Some(rx), Ok(HttpResponse::new(status, body)));
        tx
    }

    fn push(&self, gate: Option<oneshot::Receiver<()>>, outcome: Result<HttpResponse, ApiError>) {
        self.steps.lock().unwrap().push_back(Step { gate, outcome });
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// `"METHOD url"` per request, for compact assertions.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }

    pub fn count(&self, method: HttpMethod) -> usize {
        self.requests().iter().filter(|r| r.method == method).count()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unscripted request: {} {}", request.method, request.url));
        if let Some(gate) = step.gate {
            let _ = gate.await;
        }
        step.outcome
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Page {
    pub table: Option<TableView>,
    pub renders: usize,
    pub form: FormState,
    pub mode: FormMode,
    pub validated: bool,
    pub scrolls: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            table: None,
            renders: 0,
            form: FormState::default(),
            mode: FormMode::Create,
            validated: false,
            scrolls: 0,
        }
    }
}

impl Page {
    /// Data rows as `"a | b | c"` lines.
    pub fn row_lines(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(|t| t.rows().iter().map(|r| r.cells().join(" | ")).collect())
            .unwrap_or_default()
    }
}

#[derive(Default)]
pub struct RecordingView {
    page: Mutex<Page>,
}

impl RecordingView {
    pub fn page(&self) -> Page {
        self.page.lock().unwrap().clone()
    }

    /// Simulate the user typing into the form.
    pub fn type_into_form(&self, form: FormState) {
        self.page.lock().unwrap().form = form;
    }
}

impl CarView for RecordingView {
    fn render_table(&self, table: &TableView) {
        let mut page = self.page.lock().unwrap();
        page.table = Some(table.clone());
        page.renders += 1;
    }

    fn fill_form(&self, form: &FormState) {
        self.page.lock().unwrap().form = form.clone();
    }

    fn reset_form(&self) {
        self.page.lock().unwrap().form = FormState::default();
    }

    fn set_mode(&self, mode: &FormMode) {
        let mut page = self.page.lock().unwrap();
        page.mode = mode.clone();
        page.validated = false;
    }

    fn mark_validated(&self) {
        self.page.lock().unwrap().validated = true;
    }

    fn scroll_to_form(&self) {
        self.page.lock().unwrap().scrolls += 1;
    }
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub struct ScriptedDialogs {
    answer: Mutex<bool>,
    pub confirms: Mutex<Vec<String>>,
    pub alerts: Mutex<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer: Mutex::new(answer),
            confirms: Mutex::new(Vec::new()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn set_answer(&self, answer: bool) {
        *self.answer.lock().unwrap() = answer;
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        *self.answer.lock().unwrap()
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn corolla_form() -> FormState {
    FormState {
        make: "Toyota".to_string(),
        model: "Corolla".to_string(),
        year: "2020".to_string(),
        price: "15000".to_string(),
        mileage: "30000".to_string(),
        color: "Gris".to_string(),
        transmission: "Manual".to_string(),
        fuel: "Nafta".to_string(),
        image_url: "https://img.example/corolla.png".to_string(),
        description: "Unico dueno".to_string(),
    }
}

pub fn record_json(id: &str, make: &str, model: &str, year: i32, price: f64) -> String {
    serde_json::json!({
        "_id": id,
        "marca": make,
        "modelo": model,
        "anio": year,
        "precio": price,
        "kilometraje": "30000",
        "color": "Gris",
        "transmision": "Manual",
        "combustible": "Nafta",
        "imagenUrl": "https://img.example/corolla.png",
        "descripcion": "Unico dueno"
    })
    .to_string()
}

pub fn list_json(records: &[String]) -> String {
    format!("[{}]", records.join(","))
}
