//! Read-only view of a session for rendering

use serde::Serialize;
use vendor_model::{ContactField, VendorContactRecord};
use vendor_validation::ValidationErrorSet;

use crate::notification::Notification;
use crate::session::{FormSession, Mode};

/// Label of the submit button when idle
pub const SUBMIT_LABEL: &str = "Save Changes";
/// Label of the submit button while a save is in flight
pub const SAVING_LABEL: &str = "Saving...";

/// One input of the form as the view renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub field: ContactField,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    pub error: Option<String>,
}

/// Everything a view needs to render the form once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub mode: Mode,
    pub record: VendorContactRecord,
    pub errors: ValidationErrorSet,
    pub notification: Notification,
    /// Store name shown above the profile card
    pub header: String,
    pub vendor_id: String,
    /// Postal address on one line, for the quick-contact card
    pub address_line: String,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
    pub fields: Vec<FieldView>,
}

impl FormSnapshot {
    /// Capture the current state of a session
    #[must_use]
    pub fn capture(session: &FormSession) -> Self {
        let record = session.record();
        let errors = session.errors();
        let saving = session.mode() == Mode::Saving;

        let fields = record
            .fields()
            .map(|(field, value)| FieldView {
                field,
                label: field.label(),
                value: value.to_string(),
                required: field.is_required(),
                error: errors.get(field).map(str::to_string),
            })
            .collect();

        Self {
            mode: session.mode(),
            record: record.clone(),
            errors: errors.clone(),
            notification: session.notification().clone(),
            header: record.store_name.clone(),
            vendor_id: record.id.clone(),
            address_line: record.address_line(),
            submit_label: if saving { SAVING_LABEL } else { SUBMIT_LABEL },
            submit_enabled: !saving,
            fields,
        }
    }

    /// Whether the spinner replaces the form
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.mode == Mode::Loading
    }
}

impl From<&FormSession> for FormSnapshot {
    fn from(session: &FormSession) -> Self {
        Self::capture(session)
    }
}
