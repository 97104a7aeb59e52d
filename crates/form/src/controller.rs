use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use strum::{AsRefStr, Display};
use tokio::sync::watch;

use crate::{ContactTransport, Field, SubmissionDraft};

/// How long a terminal status stays visible before the form returns to idle.
pub const REVERT_DELAY: Duration = Duration::from_secs(3);

#[derive(Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

impl SubmissionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Drives the contact form: holds the draft, sends it through the transport
/// and exposes the submission status.
///
/// At most one submission is in flight per controller. A terminal status is
/// reverted to [`SubmissionStatus::Idle`] after the revert delay unless a
/// newer submission started in between.
pub struct FormController<T> {
    transport: T,
    draft: watch::Sender<SubmissionDraft>,
    status: Arc<watch::Sender<SubmissionStatus>>,
    // Only read or written while the status channel is locked.
    epoch: Arc<AtomicU64>,
    revert_delay: Duration,
}

impl<T: ContactTransport> FormController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_revert_delay(transport, REVERT_DELAY)
    }

    pub fn with_revert_delay(transport: T, revert_delay: Duration) -> Self {
        Self {
            transport,
            draft: watch::Sender::new(SubmissionDraft::default()),
            status: Arc::new(watch::Sender::new(SubmissionStatus::Idle)),
            epoch: Arc::new(AtomicU64::new(0)),
            revert_delay,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }

    pub fn draft(&self) -> SubmissionDraft {
        self.draft.borrow().clone()
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        let value = value.into();
        self.draft.send_modify(|draft| draft.set(field, value));
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.status() != SubmissionStatus::Sending
    }

    /// Sends the current draft once and returns the resulting status.
    ///
    /// Calling this while a submission is in flight does nothing and returns
    /// [`SubmissionStatus::Sending`].
    pub async fn submit(&self) -> SubmissionStatus {
        if !self.begin() {
            tracing::debug!("Contact submission already in flight, ignoring");
            return SubmissionStatus::Sending;
        }

        let in_flight = InFlight {
            controller: self,
            completed: false,
        };
        let request = self.draft.borrow().to_request();

        let status = match self.transport.deliver(request).await {
            Ok(delivery) if delivery.accepted => {
                tracing::info!(id = ?delivery.id, "Contact message sent");
                self.draft.send_replace(SubmissionDraft::default());
                SubmissionStatus::Succeeded
            }
            Ok(_) => {
                tracing::warn!("Relay refused contact message");
                SubmissionStatus::Failed
            }
            Err(err) => {
                tracing::warn!(error = %err, "Contact message could not be delivered");
                SubmissionStatus::Failed
            }
        };

        in_flight.complete(status);

        status
    }

    fn begin(&self) -> bool {
        let mut started = false;

        self.status.send_if_modified(|status| {
            if *status == SubmissionStatus::Sending {
                return false;
            }

            *status = SubmissionStatus::Sending;
            // disarms any pending revert
            self.epoch.fetch_add(1, Ordering::Relaxed);
            started = true;

            true
        });

        started
    }

    fn finish(&self, terminal: SubmissionStatus) {
        let mut armed = 0;

        self.status.send_modify(|status| {
            *status = terminal;
            armed = self.epoch.load(Ordering::Relaxed);
        });

        // Without a runtime there is no timer, the form stays submittable.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let status = Arc::clone(&self.status);
        let epoch = Arc::clone(&self.epoch);
        let delay = self.revert_delay;

        runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            status.send_if_modified(|status| {
                if epoch.load(Ordering::Relaxed) != armed || !status.is_terminal() {
                    return false;
                }

                *status = SubmissionStatus::Idle;

                true
            });
        });
    }
}

/// A submission past `begin`. Dropped before `complete`, it fails the
/// submission.
struct InFlight<'a, T: ContactTransport> {
    controller: &'a FormController<T>,
    completed: bool,
}

impl<T: ContactTransport> InFlight<'_, T> {
    fn complete(mut self, status: SubmissionStatus) {
        self.completed = true;
        self.controller.finish(status);
    }
}

impl<T: ContactTransport> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }

        tracing::warn!("Contact submission abandoned before the relay answered");
        self.controller.finish(SubmissionStatus::Failed);
    }
}
