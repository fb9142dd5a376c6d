//! Event-driven form task
//!
//! The view sends [`FormEvent`]s and watches [`FormSnapshot`]s. Gateway calls
//! run on a [`JoinSet`] so the task keeps handling events while a fetch or
//! save is outstanding; the session's mode decides what those events may do.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, warn};
use vendor_gateway::{DataGateway, GatewayError};
use vendor_model::{ContactField, VendorContactRecord};

use crate::session::{FormConfig, FormSession, SubmitStart, Ticket};
use crate::snapshot::FormSnapshot;
use crate::{Error, Result};

const EVENT_BUFFER: usize = 32;

/// Input dispatched by the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Edit { field: ContactField, value: String },
    Submit,
    DismissNotification,
    /// Fetch the vendor again, discarding any load still in flight
    Reload,
}

enum GatewayReply {
    Loaded(Ticket, std::result::Result<VendorContactRecord, GatewayError>),
    Saved(Ticket, std::result::Result<(), GatewayError>),
}

/// Runs one form session as a task
pub struct FormDriver<G: ?Sized> {
    session: FormSession,
    gateway: Arc<G>,
    events: mpsc::Receiver<FormEvent>,
    snapshots: watch::Sender<FormSnapshot>,
    in_flight: JoinSet<GatewayReply>,
}

impl<G: DataGateway + ?Sized + 'static> FormDriver<G> {
    /// Start a session task and return the view's handle to it.
    ///
    /// Must be called within a Tokio runtime.
    pub fn spawn(gateway: Arc<G>, config: FormConfig) -> FormHandle {
        let session = FormSession::new(config);
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(FormSnapshot::capture(&session));

        let driver = Self {
            session,
            gateway,
            events: event_rx,
            snapshots: snapshot_tx,
            in_flight: JoinSet::new(),
        };

        FormHandle {
            events: event_tx,
            snapshots: snapshot_rx,
            task: tokio::spawn(driver.run()),
        }
    }

    async fn run(mut self) -> FormSession {
        self.start_load();
        self.publish();

        loop {
            let deadline = self.session.notification_deadline();
            tokio::select! {
                Some(joined) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    self.apply(joined);
                }
                event = self.events.recv() => match event {
                    Some(event) => self.handle(event),
                    None => break,
                },
                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.session.expire_notification(Instant::now());
                }
            }
            self.publish();
        }

        // Outstanding calls run to completion; their replies have nowhere to go.
        self.session.teardown();
        self.in_flight.detach_all();
        debug!("form driver stopped");
        self.session
    }

    fn handle(&mut self, event: FormEvent) {
        match event {
            FormEvent::Edit { field, value } => {
                if let Err(error) = self.session.edit_field(field, value) {
                    warn!(%error, "edit rejected");
                }
            }
            FormEvent::Submit => self.start_save(),
            FormEvent::DismissNotification => self.session.dismiss_notification(),
            FormEvent::Reload => self.start_load(),
        }
    }

    fn start_load(&mut self) {
        let ticket = match self.session.begin_load() {
            Ok(ticket) => ticket,
            Err(error) => {
                warn!(%error, "reload rejected");
                return;
            }
        };
        let gateway = Arc::clone(&self.gateway);
        let vendor_id = self.session.config().vendor_id.clone();
        self.in_flight.spawn(async move {
            let result = gateway.fetch_vendor(vendor_id.as_deref()).await;
            GatewayReply::Loaded(ticket, result)
        });
    }

    fn start_save(&mut self) {
        let SubmitStart::Started { ticket, record } = self.session.begin_submit() else {
            return;
        };
        let gateway = Arc::clone(&self.gateway);
        self.in_flight.spawn(async move {
            let result = gateway.save_vendor(&record).await;
            GatewayReply::Saved(ticket, result)
        });
    }

    fn apply(&mut self, joined: std::result::Result<GatewayReply, JoinError>) {
        match joined {
            Ok(GatewayReply::Loaded(ticket, result)) => {
                self.session.finish_load(ticket, result);
            }
            Ok(GatewayReply::Saved(ticket, result)) => {
                self.session.finish_save(ticket, result);
            }
            Err(error) => warn!(%error, "gateway task did not complete"),
        }
    }

    fn publish(&self) {
        let snapshot = FormSnapshot::capture(&self.session);
        self.snapshots.send_modify(|current| *current = snapshot);
    }
}

/// The view's end of a running [`FormDriver`]
pub struct FormHandle {
    events: mpsc::Sender<FormEvent>,
    snapshots: watch::Receiver<FormSnapshot>,
    task: JoinHandle<FormSession>,
}

impl FormHandle {
    /// Dispatch an event to the session
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] when the session task has stopped.
    pub async fn send(&self, event: FormEvent) -> Result<()> {
        self.events.send(event).await.map_err(|_| Error::Closed)
    }

    /// Dispatch an edit
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] when the session task has stopped.
    pub async fn edit(&self, field: ContactField, value: impl Into<String>) -> Result<()> {
        self.send(FormEvent::Edit {
            field,
            value: value.into(),
        })
        .await
    }

    /// Dispatch a submit
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] when the session task has stopped.
    pub async fn submit(&self) -> Result<()> {
        self.send(FormEvent::Submit).await
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait until a published snapshot satisfies `predicate`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] when the session task stops first.
    pub async fn wait_for(
        &mut self,
        mut predicate: impl FnMut(&FormSnapshot) -> bool,
    ) -> Result<FormSnapshot> {
        let snapshot = self
            .snapshots
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| Error::Closed)?;
        Ok(snapshot.clone())
    }

    /// Unmount: stop the task and return the final session
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] when the task ended abnormally.
    pub async fn close(self) -> Result<FormSession> {
        drop(self.events);
        self.task.await.map_err(|_| Error::Closed)
    }
}
