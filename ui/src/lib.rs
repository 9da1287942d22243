//! Controller for the car listing page.
//!
//! # Overview
//! `CarRecordClient` keeps a form and a table in step with the remote
//! `/autos` resource: it lists, creates, updates and deletes records through
//! `autos-core`, and redraws the page regions through the `CarView` and
//! `Dialogs` traits once the server has answered.
//!
//! # Design
//! - Presentation is behind traits; `TableView` is a plain model of the table
//!   body and can render itself to HTML.
//! - Network access is behind `Transport`; `ReqwestTransport` is the default.
//! - The only UI state is the id of the record being edited.

pub mod controller;
pub mod form;
pub mod table;
pub mod transport;
pub mod view;

pub use controller::{
    CarRecordClient, DeleteOutcome, SubmitError, Submitted, CONFIRM_DELETE, CREATE_FAILED,
    DELETE_FAILED, LOAD_FAILED, UPDATE_FAILED,
};
pub use form::{FormField, FormState, Problem, ValidationError};
pub use table::{format_price, TableAction, TableRow, TableView, PLACEHOLDER};
pub use transport::{ReqwestTransport, Transport};
pub use view::{CarView, Dialogs, FormMode, CREATE_LABEL, UPDATE_LABEL};
