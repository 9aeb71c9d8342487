//! Debounced draft persistence.
//!
//! Every `change`/`keyup` reschedules a single pending save. When the quiet
//! period elapses the whole form is snapshotted and pushed to the draft
//! store. Requests carry a sequence number so that a slow, older response can
//! never overwrite an id adopted from a newer one.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use ledger_core::entities::{DraftSnapshot, RecordIds};
use ledger_core::ids::RecordId;
use ledger_core::ports::DraftStore;
use ledger_core::responses::SaveDraftResponse;
use tokio::time::Instant;

use crate::attachments::AttachmentListEditor;
use crate::debounce::Debounce;
use crate::view::FormView;

/// A save that has been sequenced but not yet sent.
pub struct PendingSave<S: DraftStore> {
    seq: u64,
    store: Arc<S>,
    snapshot: DraftSnapshot,
}

impl<S: DraftStore> PendingSave<S> {
    #[must_use]
    pub const fn snapshot(&self) -> &DraftSnapshot {
        &self.snapshot
    }

    /// Perform the request. Never fails; the outcome is carried in the completion.
    pub async fn send(self) -> DraftCompletion<S::Error> {
        let result = self.store.save_draft(&self.snapshot).await;
        DraftCompletion {
            seq: self.seq,
            result,
        }
    }
}

/// Outcome of one draft request, tagged with its sequence number.
#[derive(Debug)]
pub struct DraftCompletion<E> {
    pub seq: u64,
    pub result: Result<SaveDraftResponse, E>,
}

/// What applying a completion did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveApplied {
    /// Server assigned (or confirmed) this id; later saves use it.
    Adopted(RecordId),
    /// Saved without an id in the response.
    Saved,
    /// An id from a newer response was already adopted.
    Stale,
    /// Server answered `success: false`.
    Refused(Option<String>),
    /// Transport or decoding failure.
    Failed,
}

pub struct DraftAutoSaver<S: DraftStore> {
    store: Arc<S>,
    debounce: Debounce,
    ids: RecordIds,
    next_seq: u64,
    last_applied: u64,
}

impl<S: DraftStore> DraftAutoSaver<S> {
    pub const fn new(store: Arc<S>, delay: Duration, ids: RecordIds) -> Self {
        Self {
            store,
            debounce: Debounce::new(delay),
            ids,
            next_seq: 0,
            last_applied: 0,
        }
    }

    /// `change`/`keyup` trigger: cancel the pending save and schedule a new one.
    pub fn on_field_event(&mut self, now: Instant) -> Instant {
        self.debounce.schedule(now)
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Consume the deadline if it has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        self.debounce.take_due(now)
    }

    pub fn cancel(&mut self) -> bool {
        self.debounce.cancel()
    }

    #[must_use]
    pub const fn ids(&self) -> &RecordIds {
        &self.ids
    }

    #[must_use]
    pub const fn valve_id(&self) -> Option<&RecordId> {
        self.ids.valve_id.as_ref()
    }

    /// Read every named field and the attachments into a fresh snapshot.
    pub fn snapshot<V: FormView>(
        &self,
        view: &V,
        attachments: &AttachmentListEditor,
    ) -> DraftSnapshot {
        let form_data: BTreeMap<String, String> = view
            .field_names()
            .into_iter()
            .filter_map(|name| view.read_field(&name).map(|value| (name, value)))
            .collect();
        let attachments = attachments.collect_attachments(view).unwrap_or_else(|error| {
            tracing::error!(%error, "failed to collect attachments for draft");
            "[]".to_string()
        });
        DraftSnapshot {
            valve_id: self.ids.valve_id.clone(),
            ledger_id: self.ids.ledger_id.clone(),
            form_data,
            attachments,
        }
    }

    /// Snapshot the form now and assign the request its sequence number.
    pub fn prepare<V: FormView>(
        &mut self,
        view: &V,
        attachments: &AttachmentListEditor,
    ) -> PendingSave<S> {
        self.next_seq += 1;
        PendingSave {
            seq: self.next_seq,
            store: Arc::clone(&self.store),
            snapshot: self.snapshot(view, attachments),
        }
    }

    /// Fold a response back into the saver. Failures are logged and swallowed.
    pub fn apply(&mut self, completion: DraftCompletion<S::Error>) -> SaveApplied {
        let DraftCompletion { seq, result } = completion;
        match result {
            Ok(response) if response.success => match response.assigned_id() {
                Some(_) if seq < self.last_applied => {
                    tracing::debug!(
                        seq,
                        last_applied = self.last_applied,
                        "stale draft response ignored"
                    );
                    SaveApplied::Stale
                }
                Some(id) => {
                    self.last_applied = seq;
                    self.ids.valve_id = Some(id.clone());
                    tracing::info!(valve_id = %id, seq, "draft auto-saved");
                    SaveApplied::Adopted(id.clone())
                }
                None => {
                    tracing::info!(seq, "draft auto-saved");
                    SaveApplied::Saved
                }
            },
            Ok(response) => {
                tracing::warn!(seq, message = ?response.message, "draft save refused");
                SaveApplied::Refused(response.message)
            }
            Err(error) => {
                tracing::error!(%error, seq, "draft auto-save failed");
                SaveApplied::Failed
            }
        }
    }

    /// Snapshot, send, and apply in one go (no debounce).
    pub async fn save_now<V: FormView>(
        &mut self,
        view: &V,
        attachments: &AttachmentListEditor,
    ) -> SaveApplied {
        let pending = self.prepare(view, attachments);
        let completion = pending.send().await;
        self.apply(completion)
    }
}
