//! Sequential form driver

use tokio::time::Instant;
use tracing::debug;
use vendor_gateway::{DataGateway, GatewayError};
use vendor_model::ContactField;
use vendor_validation::ValidationErrorSet;

use crate::Result;
use crate::session::{Applied, FormConfig, FormSession, SubmitStart};
use crate::snapshot::FormSnapshot;

/// Outcome of [`FormController::initialize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    /// The form is usable with a blank record
    Failed(GatewayError),
}

/// Outcome of [`FormController::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// The save was attempted and failed; edits are kept for retry
    Failed(GatewayError),
    /// Nothing was sent; the errors are shown on the form
    Invalid(ValidationErrorSet),
    /// The vendor was still loading or a save was already in flight
    Ignored,
}

/// Owns a session and its gateway and awaits each call in turn
pub struct FormController<G> {
    session: FormSession,
    gateway: G,
}

impl<G: DataGateway> FormController<G> {
    /// Create a controller; the session starts in `Loading`
    pub fn new(gateway: G, config: FormConfig) -> Self {
        Self {
            session: FormSession::new(config),
            gateway,
        }
    }

    /// Fetch the vendor and move to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`](crate::Error::Busy) while a save is in flight.
    pub async fn initialize(&mut self) -> Result<LoadOutcome> {
        let ticket = self.session.begin_load()?;
        let vendor_id = self.session.config().vendor_id.clone();
        let result = self.gateway.fetch_vendor(vendor_id.as_deref()).await;

        let outcome = match &result {
            Ok(_) => LoadOutcome::Loaded,
            Err(error) => LoadOutcome::Failed(error.clone()),
        };
        if self.session.finish_load(ticket, result) == Applied::Stale {
            debug!("load reply superseded");
        }
        Ok(outcome)
    }

    /// Apply a user edit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`](crate::Error::Busy) while a save is in flight.
    pub fn edit_field(&mut self, field: ContactField, value: impl Into<String>) -> Result<()> {
        self.session.edit_field(field, value)
    }

    /// Validate and, when valid, persist the record.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let (ticket, record) = match self.session.begin_submit() {
            SubmitStart::Busy => return SubmitOutcome::Ignored,
            SubmitStart::Invalid(errors) => return SubmitOutcome::Invalid(errors),
            SubmitStart::Started { ticket, record } => (ticket, record),
        };

        let result = self.gateway.save_vendor(&record).await;
        let outcome = match &result {
            Ok(()) => SubmitOutcome::Saved,
            Err(error) => SubmitOutcome::Failed(error.clone()),
        };
        self.session.finish_save(ticket, result);
        outcome
    }

    /// Hide the notification
    pub fn dismiss_notification(&mut self) {
        self.session.dismiss_notification();
    }

    /// Auto-hide an expired notification. Returns whether it was hidden.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.session.expire_notification(now)
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Render-ready view of the session
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot::capture(&self.session)
    }

    /// Tear the session down and hand it back
    pub fn into_session(mut self) -> FormSession {
        self.session.teardown();
        self.session
    }
}
