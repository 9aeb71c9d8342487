//! Single-owner event loop for one open form.
//!
//! The session owns the view and every form component. Field events arrive
//! on an mpsc channel; network requests run as spawned tasks whose results
//! come back on an internal channel and are applied here, so no component
//! state is ever shared.

use std::future;
use std::sync::Arc;
use std::time::Duration;

use ledger_config::FormConfig;
use ledger_core::entities::{AttachmentField, AttachmentRecord, RecordIds};
use ledger_core::errors::CoreError;
use ledger_core::ids::RecordId;
use ledger_core::ports::{DraftStore, TagValidator, UserPrompt};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::attachments::AttachmentListEditor;
use crate::autosave::{DraftAutoSaver, DraftCompletion, SaveApplied};
use crate::error::FormError;
use crate::steps::{StepNavigator, StepOutcome};
use crate::submit::{FormSubmitGate, SubmitDecision};
use crate::tag_check::{TagCompletion, TagUniquenessChecker, TagVerdict};
use crate::validation::clear_if_filled;
use crate::view::{FormView, RowId};

/// Per-form settings, usually derived from [`FormConfig`].
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub total_steps: u32,
    pub autosave_delay: Duration,
    pub tag_field: String,
    pub ids: RecordIds,
    /// Sent with tag checks when editing an existing record.
    pub exclude_id: Option<RecordId>,
}

impl SessionSettings {
    #[must_use]
    pub fn from_config(config: &FormConfig, ids: RecordIds) -> Self {
        Self {
            total_steps: config.total_steps,
            autosave_delay: Duration::from_millis(config.autosave_debounce_ms),
            tag_field: config.tag_field.clone(),
            exclude_id: ids.valve_id.clone(),
            ids,
        }
    }
}

#[derive(Debug)]
pub enum FormEvent {
    /// Value typed into a field; clears the invalid marker once filled.
    Input { field: String, value: String },
    /// Committed value; schedules an auto-save.
    Change { field: String, value: String },
    /// Key released in a field; schedules an auto-save.
    Keyup { field: String },
    /// Focus left a field; the tag field is checked for uniqueness.
    Blur { field: String },
    GoToStep {
        target: u32,
        reply: Option<oneshot::Sender<StepOutcome>>,
    },
    AddAttachment {
        data: Option<AttachmentRecord>,
        reply: Option<oneshot::Sender<RowId>>,
    },
    RemoveAttachment { row: RowId },
    EditAttachment {
        row: RowId,
        field: AttachmentField,
        value: String,
    },
    Submit { reply: oneshot::Sender<SubmitDecision> },
    /// Save right away, skipping the quiet period. The reply is sent once
    /// the response has been applied.
    Flush { reply: Option<oneshot::Sender<SaveApplied>> },
}

enum Completion<SE, TE> {
    Draft(DraftCompletion<SE>),
    Flush(DraftCompletion<SE>, Option<oneshot::Sender<SaveApplied>>),
    Tag(TagCompletion<TE>),
}

pub struct FormSession<V, S, T, P>
where
    S: DraftStore,
    T: TagValidator,
{
    view: V,
    prompt: P,
    navigator: StepNavigator,
    attachments: AttachmentListEditor,
    autosaver: DraftAutoSaver<S>,
    tag_checker: TagUniquenessChecker<T>,
}

impl<V, S, T, P> FormSession<V, S, T, P>
where
    V: FormView,
    S: DraftStore,
    T: TagValidator,
    P: UserPrompt,
{
    /// Load existing attachments and render the first step.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidStep`] when `total_steps` is zero.
    pub fn open(
        mut view: V,
        store: Arc<S>,
        validator: Arc<T>,
        prompt: P,
        settings: SessionSettings,
        existing: &[AttachmentRecord],
    ) -> Result<Self, CoreError> {
        let navigator = StepNavigator::new(settings.total_steps)?;
        navigator.render(&mut view);
        let mut attachments = AttachmentListEditor::new();
        attachments.load(&mut view, existing);
        tracing::debug!(
            total_steps = settings.total_steps,
            attachments = existing.len(),
            "form session opened"
        );
        Ok(Self {
            view,
            prompt,
            navigator,
            attachments,
            autosaver: DraftAutoSaver::new(store, settings.autosave_delay, settings.ids),
            tag_checker: TagUniquenessChecker::new(
                validator,
                settings.tag_field,
                settings.exclude_id,
            ),
        })
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    #[must_use]
    pub const fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    #[must_use]
    pub const fn attachments(&self) -> &AttachmentListEditor {
        &self.attachments
    }

    #[must_use]
    pub const fn autosaver(&self) -> &DraftAutoSaver<S> {
        &self.autosaver
    }

    /// Process events until the sender side is dropped, then wait for the
    /// requests still in flight. A save that is only scheduled is dropped.
    pub async fn run(mut self, mut events: mpsc::Receiver<FormEvent>) -> Self {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();

        loop {
            let deadline = self.autosaver.deadline();
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle(event, &done_tx),
                    None => break,
                },
                Some(done) = done_rx.recv() => self.complete(done),
                () = wait_until(deadline) => self.fire_due_save(&done_tx),
            }
        }

        if self.autosaver.cancel() {
            tracing::debug!("pending auto-save dropped on close");
        }
        drop(done_tx);
        while let Some(done) = done_rx.recv().await {
            self.complete(done);
        }
        self
    }

    fn handle(
        &mut self,
        event: FormEvent,
        done_tx: &mpsc::UnboundedSender<Completion<S::Error, T::Error>>,
    ) {
        match event {
            FormEvent::Input { field, value } => {
                self.view.write_field(&field, &value);
                clear_if_filled(&mut self.view, &field);
            }
            FormEvent::Change { field, value } => {
                self.view.write_field(&field, &value);
                self.autosaver.on_field_event(Instant::now());
            }
            FormEvent::Keyup { .. } => {
                self.autosaver.on_field_event(Instant::now());
            }
            FormEvent::Blur { field } => {
                if field == self.tag_checker.field() {
                    self.spawn_tag_check(done_tx);
                }
            }
            FormEvent::GoToStep { target, reply } => {
                let outcome = self.navigator.go_to_step(target, &mut self.view, &self.prompt);
                respond(reply, outcome);
            }
            FormEvent::AddAttachment { data, reply } => {
                let row = self.attachments.add_attachment(&mut self.view, data.as_ref());
                respond(reply, row);
            }
            FormEvent::RemoveAttachment { row } => {
                if let Err(error) = self.attachments.remove_attachment(&mut self.view, row) {
                    tracing::warn!(%error, "remove attachment ignored");
                }
            }
            FormEvent::EditAttachment { row, field, value } => {
                match self.attachments.edit(&mut self.view, row, field, &value) {
                    Ok(()) => {
                        self.autosaver.on_field_event(Instant::now());
                    }
                    Err(error) => tracing::warn!(%error, "attachment edit ignored"),
                }
            }
            FormEvent::Submit { reply } => {
                let decision = FormSubmitGate::submit(
                    &mut self.view,
                    &self.attachments,
                    self.autosaver.ids(),
                    &self.prompt,
                );
                respond(Some(reply), decision);
            }
            FormEvent::Flush { reply } => {
                self.autosaver.cancel();
                let pending = self.autosaver.prepare(&self.view, &self.attachments);
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    let completion = pending.send().await;
                    let _ = done_tx.send(Completion::Flush(completion, reply));
                });
            }
        }
    }

    fn fire_due_save(&mut self, done_tx: &mpsc::UnboundedSender<Completion<S::Error, T::Error>>) {
        if !self.autosaver.take_due(Instant::now()) {
            return;
        }
        let pending = self.autosaver.prepare(&self.view, &self.attachments);
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let completion = pending.send().await;
            let _ = done_tx.send(Completion::Draft(completion));
        });
    }

    fn spawn_tag_check(&mut self, done_tx: &mpsc::UnboundedSender<Completion<S::Error, T::Error>>) {
        let Some(pending) = self.tag_checker.prepare(&self.view) else {
            return;
        };
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let completion = pending.send().await;
            let _ = done_tx.send(Completion::Tag(completion));
        });
    }

    fn complete(&mut self, done: Completion<S::Error, T::Error>) {
        match done {
            Completion::Draft(completion) => {
                self.autosaver.apply(completion);
            }
            Completion::Flush(completion, reply) => {
                let applied = self.autosaver.apply(completion);
                respond(reply, applied);
            }
            Completion::Tag(completion) => {
                if let TagVerdict::Duplicate(message) =
                    self.tag_checker.apply(&mut self.view, completion)
                {
                    tracing::info!(%message, "tag rejected");
                }
            }
        }
    }
}

/// Cloneable sender side of a running [`FormSession`].
#[derive(Debug, Clone)]
pub struct FormHandle {
    events: mpsc::Sender<FormEvent>,
}

impl FormHandle {
    /// Create a handle and the receiver to pass to [`FormSession::run`].
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<FormEvent>) {
        let (events, rx) = mpsc::channel(capacity);
        (Self { events }, rx)
    }

    async fn send(&self, event: FormEvent) -> Result<(), FormError> {
        self.events
            .send(event)
            .await
            .map_err(|_| FormError::SessionClosed)
    }

    async fn request<R>(
        &self,
        event: impl FnOnce(oneshot::Sender<R>) -> FormEvent,
    ) -> Result<R, FormError> {
        let (reply, rx) = oneshot::channel();
        self.send(event(reply)).await?;
        rx.await.map_err(|_| FormError::SessionClosed)
    }

    /// Type a value: an `input` followed by a `keyup`.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn type_value(&self, field: &str, value: &str) -> Result<(), FormError> {
        self.send(FormEvent::Input {
            field: field.to_string(),
            value: value.to_string(),
        })
        .await?;
        self.send(FormEvent::Keyup {
            field: field.to_string(),
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn change(&self, field: &str, value: &str) -> Result<(), FormError> {
        self.send(FormEvent::Change {
            field: field.to_string(),
            value: value.to_string(),
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn blur(&self, field: &str) -> Result<(), FormError> {
        self.send(FormEvent::Blur {
            field: field.to_string(),
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn go_to_step(&self, target: u32) -> Result<StepOutcome, FormError> {
        self.request(|reply| FormEvent::GoToStep {
            target,
            reply: Some(reply),
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn add_attachment(
        &self,
        data: Option<AttachmentRecord>,
    ) -> Result<RowId, FormError> {
        self.request(|reply| FormEvent::AddAttachment {
            data,
            reply: Some(reply),
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn remove_attachment(&self, row: RowId) -> Result<(), FormError> {
        self.send(FormEvent::RemoveAttachment { row }).await
    }

    /// Edit a row input by its form name (`attachment_name`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`] for a name that is not a row
    /// input, [`FormError::SessionClosed`] once the session has stopped.
    pub async fn edit_attachment(
        &self,
        row: RowId,
        input_name: &str,
        value: &str,
    ) -> Result<(), FormError> {
        let field = AttachmentField::from_input_name(input_name)
            .ok_or_else(|| FormError::UnknownField(input_name.to_string()))?;
        self.send(FormEvent::EditAttachment {
            row,
            field,
            value: value.to_string(),
        })
        .await
    }

    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn submit(&self) -> Result<SubmitDecision, FormError> {
        self.request(|reply| FormEvent::Submit { reply }).await
    }

    /// # Errors
    ///
    /// Returns [`FormError::SessionClosed`] once the session has stopped.
    pub async fn flush(&self) -> Result<SaveApplied, FormError> {
        self.request(|reply| FormEvent::Flush { reply: Some(reply) })
            .await
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => future::pending().await,
    }
}

fn respond<R>(reply: Option<oneshot::Sender<R>>, value: R) {
    if let Some(reply) = reply {
        // caller stopped waiting
        let _ = reply.send(value);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::MemoryForm;
    use crate::test_support::helpers::{
        FakeDraftStore, FakeTagValidator, RecordingPrompt, sample_form, saved,
    };

    type Session = FormSession<MemoryForm, FakeDraftStore, FakeTagValidator, RecordingPrompt>;

    fn open(store: &Arc<FakeDraftStore>, validator: &Arc<FakeTagValidator>) -> Session {
        let settings = SessionSettings::from_config(&FormConfig::default(), RecordIds::default());
        FormSession::open(
            sample_form(),
            Arc::clone(store),
            Arc::clone(validator),
            RecordingPrompt::default(),
            settings,
            &[],
        )
        .unwrap()
    }

    #[test]
    fn settings_follow_config() {
        let ids = RecordIds {
            valve_id: RecordId::parse("4"),
            ledger_id: None,
        };
        let settings = SessionSettings::from_config(&FormConfig::default(), ids);
        assert_eq!(settings.autosave_delay, Duration::from_millis(3000));
        assert_eq!(settings.tag_field, "位号");
        assert_eq!(settings.exclude_id, RecordId::parse("4"));
    }

    #[test]
    fn open_renders_first_step_and_one_empty_row() {
        let session = open(&Arc::default(), &Arc::default());
        let progress = session.view().progress().unwrap();
        assert_eq!(progress.current.get(), 1);
        assert_eq!(session.view().row_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn blur_on_tag_field_applies_verdict() {
        let validator = Arc::new(FakeTagValidator {
            taken: "FV-1".into(),
            ..Default::default()
        });
        let session = open(&Arc::default(), &validator);
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(session.run(rx));

        tx.send(FormEvent::Input {
            field: "位号".into(),
            value: "FV-1".into(),
        })
        .await
        .unwrap();
        tx.send(FormEvent::Blur { field: "名称".into() }).await.unwrap();
        tx.send(FormEvent::Blur { field: "位号".into() }).await.unwrap();
        drop(tx);

        let session = handle.await.unwrap();
        assert!(session.view().is_invalid("位号"));
        assert_eq!(validator.requests.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_step_keeps_current_and_alerts() {
        let session = open(&Arc::default(), &Arc::default());
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(session.run(rx));

        let (reply, outcome) = oneshot::channel();
        tx.send(FormEvent::GoToStep {
            target: 2,
            reply: Some(reply),
        })
        .await
        .unwrap();
        assert!(matches!(outcome.await.unwrap(), StepOutcome::Blocked { .. }));
        drop(tx);

        let session = handle.await.unwrap();
        assert_eq!(session.navigator().current().get(), 1);
        assert_eq!(session.prompt.alert_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_flush_does_not_hold_up_other_events() {
        let store = Arc::new(FakeDraftStore::default());
        store.push(Duration::from_secs(8), Ok(saved("9")));
        let session = open(&store, &Arc::default());
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(session.run(rx));
        let started = Instant::now();

        let (flush_reply, flushed) = oneshot::channel();
        tx.send(FormEvent::Flush {
            reply: Some(flush_reply),
        })
        .await
        .unwrap();
        let (step_reply, moved) = oneshot::channel();
        tx.send(FormEvent::GoToStep {
            target: 1,
            reply: Some(step_reply),
        })
        .await
        .unwrap();

        assert!(matches!(moved.await.unwrap(), StepOutcome::Moved { .. }));
        assert!(started.elapsed() < Duration::from_secs(1));

        assert_eq!(
            flushed.await.unwrap(),
            SaveApplied::Adopted(RecordId::parse("9").unwrap())
        );
        assert!(started.elapsed() >= Duration::from_secs(8));
        drop(tx);

        let session = handle.await.unwrap();
        assert_eq!(session.autosaver().valve_id(), RecordId::parse("9").as_ref());
        assert_eq!(store.calls(), 1);
    }
}
