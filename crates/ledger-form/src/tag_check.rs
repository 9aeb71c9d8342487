//! Asynchronous uniqueness check of the tag field on blur.

use std::sync::Arc;

use ledger_core::ids::RecordId;
use ledger_core::ports::TagValidator;
use ledger_core::responses::TagCheckResponse;

use crate::view::FormView;

/// Feedback shown when the server rejects a tag without a message.
pub const DUPLICATE_TAG_MESSAGE: &str = "This tag is already in use";

/// A check that has been sequenced but not yet sent.
pub struct PendingTagCheck<T: TagValidator> {
    seq: u64,
    validator: Arc<T>,
    tag: String,
    exclude_id: Option<RecordId>,
}

impl<T: TagValidator> PendingTagCheck<T> {
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub async fn send(self) -> TagCompletion<T::Error> {
        let result = self
            .validator
            .check_tag(&self.tag, self.exclude_id.as_ref())
            .await;
        TagCompletion {
            seq: self.seq,
            tag: self.tag,
            result,
        }
    }
}

#[derive(Debug)]
pub struct TagCompletion<E> {
    pub seq: u64,
    pub tag: String,
    pub result: Result<TagCheckResponse, E>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagVerdict {
    Unique,
    Duplicate(String),
    /// A newer check already answered.
    Stale,
    /// Request failed; the field is left untouched.
    Failed,
}

pub struct TagUniquenessChecker<T: TagValidator> {
    validator: Arc<T>,
    field: String,
    exclude_id: Option<RecordId>,
    next_seq: u64,
    last_applied: u64,
}

impl<T: TagValidator> TagUniquenessChecker<T> {
    pub fn new(validator: Arc<T>, field: impl Into<String>, exclude_id: Option<RecordId>) -> Self {
        Self {
            validator,
            field: field.into(),
            exclude_id,
            next_seq: 0,
            last_applied: 0,
        }
    }

    /// Name of the field this checker watches.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Id sent as `exclude_id`, so a record's own tag is not a duplicate.
    #[must_use]
    pub const fn exclude_id(&self) -> Option<&RecordId> {
        self.exclude_id.as_ref()
    }

    /// `blur` trigger. Returns `None` when the trimmed value is empty.
    pub fn prepare<V: FormView>(&mut self, view: &V) -> Option<PendingTagCheck<T>> {
        let tag = view.read_field(&self.field)?.trim().to_string();
        if tag.is_empty() {
            return None;
        }
        self.next_seq += 1;
        Some(PendingTagCheck {
            seq: self.next_seq,
            validator: Arc::clone(&self.validator),
            tag,
            exclude_id: self.exclude_id.clone(),
        })
    }

    /// Render the server's answer on the field.
    pub fn apply<V: FormView>(
        &mut self,
        view: &mut V,
        completion: TagCompletion<T::Error>,
    ) -> TagVerdict {
        let TagCompletion { seq, tag, result } = completion;
        if seq < self.last_applied {
            tracing::debug!(seq, %tag, "stale tag check ignored");
            return TagVerdict::Stale;
        }
        match result {
            Ok(response) => {
                self.last_applied = seq;
                if response.valid {
                    view.set_field_invalid(&self.field, false);
                    view.show_feedback(&self.field, None);
                    TagVerdict::Unique
                } else {
                    let message = response
                        .message
                        .unwrap_or_else(|| DUPLICATE_TAG_MESSAGE.to_string());
                    tracing::debug!(%tag, %message, "duplicate tag");
                    view.set_field_invalid(&self.field, true);
                    view.show_feedback(&self.field, Some(&message));
                    TagVerdict::Duplicate(message)
                }
            }
            Err(error) => {
                tracing::error!(%error, %tag, "tag check failed");
                TagVerdict::Failed
            }
        }
    }

    /// Check the field right away and apply the answer.
    pub async fn check_now<V: FormView>(&mut self, view: &mut V) -> Option<TagVerdict> {
        let pending = self.prepare(view)?;
        let completion = pending.send().await;
        Some(self.apply(view, completion))
    }
}
