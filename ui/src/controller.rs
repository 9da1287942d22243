//! The controller behind the car page.
//!
//! # Design
//! One `CarRecordClient` exists per page. It owns the request builder, a
//! `Transport`, the `CarView` and the `Dialogs`, plus the only mutable UI
//! state: which record (if any) the form is editing.
//!
//! Each operation runs its own round-trip and handles its own failure. The
//! ordering contract is "remote success precedes re-render": the table and
//! form are only touched after the server has answered.
//!
//! Failure policy: every failure is logged. Failures of operations the user
//! started explicitly (create, update, delete, load-for-edit) also raise an
//! alert. `list` failures only log, because `list` runs on page load and after
//! every mutation, and a hosted backend that is still waking up would otherwise
//! spam the user.
//!
//! Operations may overlap. Several `list` calls in flight are ordered by
//! ticket: a response is rendered only if no newer `list` has rendered first,
//! so a slow stale response never overwrites a fresh table.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use autos_core::{ApiError, ApiMessage, AutosClient, Car, CarRecord, ClientConfig};
use thiserror::Error;

use crate::form::{FormState, ValidationError};
use crate::table::{TableAction, TableView};
use crate::transport::{ReqwestTransport, Transport};
use crate::view::{CarView, Dialogs, FormMode};

pub const CONFIRM_DELETE: &str = "¿Estás seguro de que quieres eliminar este auto?";
pub const CREATE_FAILED: &str = "Error al crear. Revisa la consola.";
pub const UPDATE_FAILED: &str = "Error al actualizar. Revisa la consola.";
pub const DELETE_FAILED: &str = "Error al eliminar. Revisa la consola.";
pub const LOAD_FAILED: &str = "Error al cargar el auto. Revisa la consola.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What a successful submit did.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    Created(CarRecord),
    Updated(CarRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    Deleted(ApiMessage),
}

pub struct CarRecordClient<T, V, D> {
    api: AutosClient,
    transport: T,
    view: V,
    dialogs: D,
    editing: Mutex<Option<String>>,
    list_issued: AtomicU64,
    list_rendered: Mutex<u64>,
}

fn lock<X>(mutex: &Mutex<X>) -> MutexGuard<'_, X> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<V: CarView, D: Dialogs> CarRecordClient<ReqwestTransport, V, D> {
    /// Controller talking to `config.base_url` over reqwest.
    pub fn from_config(config: &ClientConfig, view: V, dialogs: D) -> Result<Self, ApiError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(AutosClient::from_config(config), transport, view, dialogs))
    }
}

impl<T: Transport, V: CarView, D: Dialogs> CarRecordClient<T, V, D> {
    pub fn new(api: AutosClient, transport: T, view: V, dialogs: D) -> Self {
        Self {
            api,
            transport,
            view,
            dialogs,
            editing: Mutex::new(None),
            list_issued: AtomicU64::new(0),
            list_rendered: Mutex::new(0),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn dialogs(&self) -> &D {
        &self.dialogs
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Id of the record the form is editing, if any.
    pub fn editing_id(&self) -> Option<String> {
        lock(&self.editing).clone()
    }

    pub fn mode(&self) -> FormMode {
        match self.editing_id() {
            Some(id) => FormMode::Edit { id },
            None => FormMode::Create,
        }
    }

    pub async fn on_page_loaded(&self) {
        let _ = self.list().await;
    }

    /// Route a click on a row's edit or delete control.
    pub async fn on_table_action(&self, action: TableAction) {
        match action {
            TableAction::Edit(id) => {
                let _ = self.load_for_edit(&id).await;
            }
            TableAction::Delete(id) => {
                let _ = self.delete(&id).await;
            }
        }
    }

    /// Fetch the collection and redraw the table. On failure the table keeps
    /// whatever it showed before.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CarRecord>, ApiError> {
        let ticket = self.list_issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(ticket, base_url = self.api.base_url(), "fetching car list");

        let records = match self.fetch_list().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch car list");
                return Err(e);
            }
        };
        tracing::info!(count = records.len(), "car list received");
        self.render_list(ticket, &records);
        Ok(records)
    }

    fn render_list(&self, ticket: u64, records: &[CarRecord]) {
        let mut rendered = lock(&self.list_rendered);
        if ticket <= *rendered {
            tracing::debug!(ticket, newer = *rendered, "dropping stale car list");
            return;
        }
        *rendered = ticket;
        self.view.render_table(&TableView::from_records(records));
    }

    #[tracing::instrument(skip(self, car), fields(make = %car.make, model = %car.model))]
    pub async fn create(&self, car: &Car) -> Result<CarRecord, ApiError> {
        match self.send_create(car).await {
            Ok(record) => {
                tracing::info!(id = %record.id, "car created");
                self.reset_form();
                let _ = self.list().await;
                Ok(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to create car");
                self.dialogs.alert(CREATE_FAILED);
                Err(e)
            }
        }
    }

    /// Replace record `id` with `car` in full.
    #[tracing::instrument(skip(self, car))]
    pub async fn update(&self, id: &str, car: &Car) -> Result<CarRecord, ApiError> {
        match self.send_update(id, car).await {
            Ok(record) => {
                tracing::info!("car updated");
                self.reset_form();
                let _ = self.list().await;
                Ok(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to update car");
                self.dialogs.alert(UPDATE_FAILED);
                Err(e)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, ApiError> {
        if !self.dialogs.confirm(CONFIRM_DELETE) {
            tracing::debug!("delete declined");
            return Ok(DeleteOutcome::Cancelled);
        }
        match self.send_delete(id).await {
            Ok(message) => {
                tracing::info!(msg = %message.msg, "car deleted");
                let _ = self.list().await;
                Ok(DeleteOutcome::Deleted(message))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to delete car");
                self.dialogs.alert(DELETE_FAILED);
                Err(e)
            }
        }
    }

    /// Fetch one record and switch the form into edit mode for it. The form
    /// is not touched unless the fetch succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn load_for_edit(&self, id: &str) -> Result<CarRecord, ApiError> {
        let record = match self.fetch_one(id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(error = %e, "failed to load car for editing");
                self.dialogs.alert(LOAD_FAILED);
                return Err(e);
            }
        };

        self.view.fill_form(&FormState::from_record(&record));
        *lock(&self.editing) = Some(record.id.clone());
        self.view.set_mode(&FormMode::Edit {
            id: record.id.clone(),
        });
        self.view.scroll_to_form();
        Ok(record)
    }

    /// Validate `form`, then update the record being edited or create a new
    /// one. Nothing is sent when validation fails.
    pub async fn submit(&self, form: &FormState) -> Result<Submitted, SubmitError> {
        let car = match form.validate() {
            Ok(car) => car,
            Err(e) => {
                tracing::warn!(error = %e, "submit blocked");
                self.view.mark_validated();
                return Err(e.into());
            }
        };

        match self.editing_id() {
            Some(id) => Ok(Submitted::Updated(self.update(&id, &car).await?)),
            None => Ok(Submitted::Created(self.create(&car).await?)),
        }
    }

    pub fn cancel_edit(&self) {
        self.reset_form();
    }

    fn reset_form(&self) {
        *lock(&self.editing) = None;
        self.view.reset_form();
        self.view.set_mode(&FormMode::Create);
    }

    async fn fetch_list(&self) -> Result<Vec<CarRecord>, ApiError> {
        let response = self.transport.execute(self.api.build_list_cars()).await?;
        self.api.parse_list_cars(response)
    }

    async fn fetch_one(&self, id: &str) -> Result<CarRecord, ApiError> {
        let response = self.transport.execute(self.api.build_get_car(id)).await?;
        self.api.parse_get_car(response)
    }

    async fn send_create(&self, car: &Car) -> Result<CarRecord, ApiError> {
        let request = self.api.build_create_car(car)?;
        let response = self.transport.execute(request).await?;
        self.api.parse_create_car(response)
    }

    async fn send_update(&self, id: &str, car: &Car) -> Result<CarRecord, ApiError> {
        let request = self.api.build_update_car(id, car)?;
        let response = self.transport.execute(request).await?;
        self.api.parse_update_car(response)
    }

    async fn send_delete(&self, id: &str) -> Result<ApiMessage, ApiError> {
        let response = self.transport.execute(self.api.build_delete_car(id)).await?;
        self.api.parse_delete_car(response)
    }
}
