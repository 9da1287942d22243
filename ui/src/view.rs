//! Presentation seams of the controller.
//!
//! `CarView` owns the two page regions (the form and the table body) and
//! `Dialogs` owns the blocking prompts. Implementations are called from the
//! UI thread only and take `&self`; a DOM-backed view keeps element handles,
//! a test view records calls behind a mutex.

use crate::form::FormState;
use crate::table::TableView;

pub const CREATE_LABEL: &str = "Agregar Auto";
pub const UPDATE_LABEL: &str = "Actualizar Auto";

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

impl FormMode {
    pub fn submit_label(&self) -> &'static str {
        match self {
            FormMode::Create => CREATE_LABEL,
            FormMode::Edit { .. } => UPDATE_LABEL,
        }
    }

    pub fn shows_cancel(&self) -> bool {
        matches!(self, FormMode::Edit { .. })
    }

    /// Value of the hidden "currently editing" input.
    pub fn editing_id(&self) -> &str {
        match self {
            FormMode::Create => "",
            FormMode::Edit { id } => id,
        }
    }
}

pub trait CarView: Send + Sync {
    /// Replace the whole table body.
    fn render_table(&self, table: &TableView);

    /// Put `form` into the inputs.
    fn fill_form(&self, form: &FormState);

    /// Clear every input back to its initial value.
    fn reset_form(&self);

    /// Apply submit label, cancel visibility and hidden id for `mode`, and
    /// clear the validated marker.
    fn set_mode(&self, mode: &FormMode);

    /// Show validation indicators after a rejected submit.
    fn mark_validated(&self);

    fn scroll_to_form(&self);
}

pub trait Dialogs: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}
