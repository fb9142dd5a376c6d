//! Form session state machine

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use vendor_gateway::GatewayError;
use vendor_model::{ContactField, VendorContactRecord};
use vendor_validation::{ContactValidator, ValidationErrorSet};

use crate::notification::{
    CORRECT_ERRORS, DEFAULT_AUTO_HIDE, LOAD_FAILED, Notification, SAVE_FAILED, SAVE_SUCCEEDED,
    Severity,
};
use crate::{Error, Result};

/// Session behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Vendor to load; `None` lets the gateway pick its default
    pub vendor_id: Option<String>,
    /// How long notifications stay visible
    pub auto_hide: Duration,
}

impl FormConfig {
    /// Create a configuration with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a specific vendor
    #[must_use]
    pub fn vendor_id(mut self, vendor_id: impl Into<String>) -> Self {
        self.vendor_id = Some(vendor_id.into());
        self
    }

    /// Set the notification auto-hide delay
    #[must_use]
    pub fn auto_hide(mut self, auto_hide: Duration) -> Self {
        self.auto_hide = auto_hide;
        self
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            vendor_id: None,
            auto_hide: DEFAULT_AUTO_HIDE,
        }
    }
}

/// UI mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Loading,
    Idle,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TicketKind {
    Load,
    Save,
}

/// Receipt for an outstanding gateway call.
///
/// Only the ticket issued by the current generation can complete the call it
/// was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    kind: TicketKind,
}

impl Ticket {
    /// Session generation the ticket was issued in
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Result of [`FormSession::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// The vendor is still loading or a save is in flight; nothing changed
    Busy,
    /// Validation failed; errors are stored on the session
    Invalid(ValidationErrorSet),
    /// The session is saving; the caller must persist `record` and report back
    Started {
        ticket: Ticket,
        record: VendorContactRecord,
    },
}

/// Whether a gateway reply was applied to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The reply belongs to a superseded call and was ignored
    Stale,
}

/// Transient state of one contact form instance
#[derive(Debug, Clone)]
pub struct FormSession {
    record: VendorContactRecord,
    errors: ValidationErrorSet,
    mode: Mode,
    notification: Notification,
    generation: u64,
    config: FormConfig,
    validator: ContactValidator,
}

impl FormSession {
    /// Create a session in `Loading` mode with an empty record
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self {
            record: VendorContactRecord::default(),
            errors: ValidationErrorSet::new(),
            mode: Mode::Loading,
            notification: Notification::default(),
            generation: 0,
            config,
            validator: ContactValidator::new(),
        }
    }

    #[must_use]
    pub fn record(&self) -> &VendorContactRecord {
        &self.record
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrorSet {
        &self.errors
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Current generation; bumped by every load and by teardown
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Idle with validation errors outstanding
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Enter `Loading` and issue the ticket for the fetch.
    ///
    /// Any earlier load still in flight is superseded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] while a save is in flight.
    pub fn begin_load(&mut self) -> Result<Ticket> {
        if self.mode == Mode::Saving {
            return Err(Error::busy("reload"));
        }
        self.generation += 1;
        self.mode = Mode::Loading;
        debug!(generation = self.generation, "loading vendor");
        Ok(self.ticket(TicketKind::Load))
    }

    /// Apply the outcome of a fetch.
    ///
    /// A failed fetch keeps the current record and leaves the form usable.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        result: std::result::Result<VendorContactRecord, GatewayError>,
    ) -> Applied {
        if !self.accepts(ticket, TicketKind::Load, Mode::Loading) {
            return Applied::Stale;
        }

        match result {
            Ok(record) => {
                info!(vendor_id = %record.id, "vendor loaded");
                self.record = record;
                self.errors.clear();
            }
            Err(error) => {
                warn!(%error, "vendor fetch failed");
                self.notify(Severity::Error, LOAD_FAILED);
            }
        }
        self.mode = Mode::Idle;
        Applied::Applied
    }

    /// Apply a user edit and drop any error shown for that field.
    ///
    /// The new value is not validated until the next submit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] while a save is in flight; the session is left
    /// untouched.
    pub fn edit_field(&mut self, field: ContactField, value: impl Into<String>) -> Result<()> {
        if self.mode == Mode::Saving {
            return Err(Error::busy(format!("edit {field}")));
        }
        self.record.set(field, value);
        if self.errors.clear_field(field) {
            debug!(%field, "cleared field error on edit");
        }
        Ok(())
    }

    /// Validate the record and, when valid, enter `Saving`.
    ///
    /// Ignored until the vendor has loaded and while a save is in flight.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.mode != Mode::Idle {
            debug!(mode = ?self.mode, "submit ignored");
            return SubmitStart::Busy;
        }

        let errors = self.validator.validate(&self.record);
        if !errors.is_empty() {
            debug!(error_count = errors.len(), "submit blocked by validation");
            self.errors = errors.clone();
            self.notify(Severity::Error, CORRECT_ERRORS);
            return SubmitStart::Invalid(errors);
        }

        self.errors.clear();
        self.mode = Mode::Saving;
        debug!(vendor_id = %self.record.id, "saving vendor");
        SubmitStart::Started {
            ticket: self.ticket(TicketKind::Save),
            record: self.record.clone(),
        }
    }

    /// Apply the outcome of a save. The record is kept either way.
    pub fn finish_save(
        &mut self,
        ticket: Ticket,
        result: std::result::Result<(), GatewayError>,
    ) -> Applied {
        if !self.accepts(ticket, TicketKind::Save, Mode::Saving) {
            return Applied::Stale;
        }

        match result {
            Ok(()) => {
                info!(vendor_id = %self.record.id, "vendor saved");
                self.notify(Severity::Success, SAVE_SUCCEEDED);
            }
            Err(error) => {
                warn!(%error, "vendor save failed");
                self.notify(Severity::Error, SAVE_FAILED);
            }
        }
        self.mode = Mode::Idle;
        Applied::Applied
    }

    /// Hide the notification
    pub fn dismiss_notification(&mut self) {
        self.notification.hide();
    }

    /// When the visible notification should hide itself, if any
    #[must_use]
    pub fn notification_deadline(&self) -> Option<Instant> {
        self.notification.deadline(self.config.auto_hide)
    }

    /// Hide the notification if it has outlived the auto-hide delay.
    /// Returns whether it was hidden.
    pub fn expire_notification(&mut self, now: Instant) -> bool {
        if self.notification.is_expired(now, self.config.auto_hide) {
            self.notification.hide();
            true
        } else {
            false
        }
    }

    /// Invalidate every outstanding ticket.
    ///
    /// Called when the owning view goes away; replies that arrive afterwards
    /// are ignored.
    pub fn teardown(&mut self) {
        self.generation += 1;
        debug!(generation = self.generation, "session torn down");
    }

    fn ticket(&self, kind: TicketKind) -> Ticket {
        Ticket {
            generation: self.generation,
            kind,
        }
    }

    fn accepts(&self, ticket: Ticket, kind: TicketKind, mode: Mode) -> bool {
        let current = ticket.generation == self.generation && ticket.kind == kind;
        if current && self.mode == mode {
            true
        } else {
            warn!(
                ticket_generation = ticket.generation,
                generation = self.generation,
                mode = ?self.mode,
                "ignoring stale gateway reply"
            );
            false
        }
    }

    fn notify(&mut self, severity: Severity, message: &str) {
        self.notification = Notification::raise(severity, message);
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vendor_model::sample_vendor;

    fn valid_record() -> VendorContactRecord {
        sample_vendor().with(ContactField::Phone, "(555) 123-4567")
    }

    fn loaded(record: VendorContactRecord) -> FormSession {
        let mut session = FormSession::default();
        let ticket = session.begin_load().unwrap();
        assert_eq!(session.finish_load(ticket, Ok(record)), Applied::Applied);
        session
    }

    fn start_save(session: &mut FormSession) -> Ticket {
        match session.begin_submit() {
            SubmitStart::Started { ticket, .. } => ticket,
            other => panic!("expected save to start, got {other:?}"),
        }
    }

    #[test]
    fn test_new_session_is_loading_with_blank_record() {
        let session = FormSession::default();
        assert_eq!(session.mode(), Mode::Loading);
        assert_eq!(session.record(), &VendorContactRecord::default());
        assert!(!session.notification().visible);
    }

    #[test]
    fn test_successful_load_populates_record() {
        let session = loaded(sample_vendor());
        assert_eq!(session.mode(), Mode::Idle);
        assert_eq!(session.record(), &sample_vendor());
        assert!(session.errors().is_empty());
        assert!(!session.notification().visible);
    }

    #[test]
    fn test_failed_load_keeps_blank_record_and_notifies() {
        let mut session = FormSession::default();
        let ticket = session.begin_load().unwrap();
        session.finish_load(ticket, Err(GatewayError::fetch("v1", "offline")));

        assert_eq!(session.mode(), Mode::Idle);
        assert_eq!(session.record(), &VendorContactRecord::default());
        assert!(session.notification().visible);
        assert_eq!(session.notification().severity, Severity::Error);
        assert_eq!(session.notification().message, LOAD_FAILED);
    }

    #[test]
    fn test_edit_clears_only_the_touched_field_error() {
        let mut session = loaded(VendorContactRecord::with_id("v1"));
        assert!(matches!(session.begin_submit(), SubmitStart::Invalid(_)));
        assert!(session.errors().contains(ContactField::Email));
        assert!(session.errors().contains(ContactField::City));

        session.edit_field(ContactField::Email, "still bad").unwrap();
        assert!(!session.errors().contains(ContactField::Email));
        assert!(session.errors().contains(ContactField::City));
        assert_eq!(session.record().email, "still bad");
    }

    #[test]
    fn test_invalid_submit_stays_idle_and_notifies() {
        let mut session = loaded(valid_record().with(ContactField::Email, ""));
        let start = session.begin_submit();

        let mut expected = ValidationErrorSet::new();
        expected.insert(ContactField::Email, "Email is required");
        assert_eq!(start, SubmitStart::Invalid(expected.clone()));
        assert_eq!(session.errors(), &expected);
        assert_eq!(session.mode(), Mode::Idle);
        assert_eq!(session.notification().message, CORRECT_ERRORS);
        assert_eq!(session.notification().severity, Severity::Error);
    }

    #[test]
    fn test_valid_submit_enters_saving_with_record_snapshot() {
        let mut session = loaded(valid_record());
        match session.begin_submit() {
            SubmitStart::Started { record, .. } => assert_eq!(record, valid_record()),
            other => panic!("expected save to start, got {other:?}"),
        }
        assert_eq!(session.mode(), Mode::Saving);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_submit_while_saving_is_a_no_op() {
        let mut session = loaded(valid_record());
        let _ticket = start_save(&mut session);
        let before = session.clone();

        assert_eq!(session.begin_submit(), SubmitStart::Busy);
        assert_eq!(session.mode(), before.mode());
        assert_eq!(session.record(), before.record());
        assert_eq!(session.errors(), before.errors());
        assert_eq!(session.notification(), before.notification());
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut session = FormSession::default();
        let ticket = session.begin_load().unwrap();

        assert_eq!(session.begin_submit(), SubmitStart::Busy);
        assert_eq!(session.mode(), Mode::Loading);
        assert!(session.errors().is_empty());
        assert!(!session.notification().visible);

        assert_eq!(
            session.finish_load(ticket, Ok(valid_record())),
            Applied::Applied
        );
        assert_eq!(session.mode(), Mode::Idle);
        assert!(!session.notification().visible);
        assert!(matches!(session.begin_submit(), SubmitStart::Started { .. }));
    }

    #[test]
    fn test_edit_while_saving_is_rejected() {
        let mut session = loaded(valid_record());
        let _ticket = start_save(&mut session);

        let err = session
            .edit_field(ContactField::City, "Shelbyville")
            .unwrap_err();
        assert_eq!(err, Error::busy("edit city"));
        assert_eq!(session.record().city, "Springfield");
    }

    #[test]
    fn test_save_success_notifies_and_returns_to_idle() {
        let mut session = loaded(valid_record());
        let ticket = start_save(&mut session);
        assert_eq!(session.finish_save(ticket, Ok(())), Applied::Applied);

        assert_eq!(session.mode(), Mode::Idle);
        assert_eq!(session.notification().severity, Severity::Success);
        assert_eq!(session.notification().message, SAVE_SUCCEEDED);
    }

    #[test]
    fn test_save_failure_retains_record_for_retry() {
        let mut session = loaded(valid_record());
        session.edit_field(ContactField::City, "Shelbyville").unwrap();
        let ticket = start_save(&mut session);
        session.finish_save(ticket, Err(GatewayError::save("v123456", "503")));

        assert_eq!(session.mode(), Mode::Idle);
        assert_eq!(session.record().city, "Shelbyville");
        assert!(session.errors().is_empty());
        assert_eq!(session.notification().message, SAVE_FAILED);

        let retry = start_save(&mut session);
        assert_eq!(session.finish_save(retry, Ok(())), Applied::Applied);
    }

    #[test]
    fn test_replies_after_teardown_are_ignored() {
        let mut session = FormSession::default();
        let ticket = session.begin_load().unwrap();
        session.teardown();

        assert_eq!(
            session.finish_load(ticket, Ok(sample_vendor())),
            Applied::Stale
        );
        assert_eq!(session.record(), &VendorContactRecord::default());
        assert_eq!(session.mode(), Mode::Loading);
    }

    #[test]
    fn test_reload_supersedes_earlier_fetch() {
        let mut session = FormSession::default();
        let first = session.begin_load().unwrap();
        let second = session.begin_load().unwrap();

        assert_eq!(session.finish_load(first, Ok(sample_vendor())), Applied::Stale);
        assert_eq!(
            session.finish_load(second, Ok(valid_record())),
            Applied::Applied
        );
        assert_eq!(session.record(), &valid_record());
    }

    #[test]
    fn test_reload_refused_while_saving() {
        let mut session = loaded(valid_record());
        let _ticket = start_save(&mut session);
        assert_eq!(session.begin_load(), Err(Error::busy("reload")));
    }

    #[test]
    fn test_ticket_kinds_are_not_interchangeable() {
        let mut session = loaded(valid_record());
        let save = start_save(&mut session);
        assert_eq!(
            session.finish_load(save, Ok(sample_vendor())),
            Applied::Stale
        );
        assert_eq!(session.mode(), Mode::Saving);
    }

    #[test]
    fn test_dismiss_only_hides_notification() {
        let mut session = loaded(VendorContactRecord::with_id("v1"));
        session.begin_submit();
        let errors = session.errors().clone();

        session.dismiss_notification();
        assert!(!session.notification().visible);
        assert_eq!(session.errors(), &errors);
        assert_eq!(session.mode(), Mode::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_after_configured_delay() {
        let config = FormConfig::new().auto_hide(Duration::from_secs(2));
        let mut session = FormSession::new(config);
        let ticket = session.begin_load().unwrap();
        session.finish_load(ticket, Err(GatewayError::fetch("v1", "offline")));

        assert!(!session.expire_notification(Instant::now()));
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(session.expire_notification(Instant::now()));
        assert!(!session.notification().visible);
        assert_eq!(session.mode(), Mode::Idle);
    }
}
