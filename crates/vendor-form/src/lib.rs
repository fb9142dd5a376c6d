#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # vendor-form
//!
//! Contact form session state machine, notifications and event driver.
//!
//! A form session moves between three modes:
//!
//! ```text
//! Loading --fetch resolves--> Idle --valid submit--> Saving --save resolves--> Idle
//! ```
//!
//! [`FormSession`] holds the transitions as plain synchronous methods. Every
//! transition that needs the gateway hands out a [`Ticket`]; the matching
//! `finish_*` call only applies when the ticket still belongs to the current
//! session generation, so replies that arrive after a teardown are dropped.
//!
//! Two drivers sit on top of the session:
//!
//! - [`FormController`] awaits gateway calls inline, for callers that run one
//!   action at a time.
//! - [`FormDriver`] runs the session as a task fed by [`FormEvent`]s and
//!   publishes a [`FormSnapshot`] after every event, for view layers that keep
//!   dispatching input while a call is in flight.

pub mod controller;
pub mod driver;
pub mod notification;
pub mod session;
pub mod snapshot;

pub use controller::{FormController, LoadOutcome, SubmitOutcome};
pub use driver::{FormDriver, FormEvent, FormHandle};
pub use notification::{Notification, Severity};
pub use session::{Applied, FormConfig, FormSession, Mode, SubmitStart, Ticket};
pub use snapshot::{FieldView, FormSnapshot};

use thiserror::Error;

/// Errors that can occur while driving a form session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Operation rejected because a save is in flight
    #[error("Cannot {operation} while changes are being saved")]
    Busy { operation: String },

    /// The driver task has stopped and no longer accepts events
    #[error("Form session is closed")]
    Closed,
}

impl Error {
    /// Create a busy error for the rejected operation
    pub fn busy(operation: impl Into<String>) -> Self {
        Self::Busy {
            operation: operation.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
