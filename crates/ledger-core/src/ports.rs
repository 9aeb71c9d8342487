//! Port traits for everything that leaves the process or reaches the user.
//!
//! The form and list controllers are written against these traits only.
//! `ledger-http` implements the network ports with reqwest, `ledger-cli`
//! implements the user-facing ones for a terminal, and tests use recorders.

use std::future::Future;

use crate::entities::DraftSnapshot;
use crate::enums::ToastKind;
use crate::ids::RecordId;
use crate::responses::{PostedPage, SaveDraftResponse, TagCheckResponse};

/// Persists draft snapshots.
pub trait DraftStore: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save_draft(
        &self,
        snapshot: &DraftSnapshot,
    ) -> impl Future<Output = Result<SaveDraftResponse, Self::Error>> + Send;
}

/// Remote existence check for the business-key (tag) field.
pub trait TagValidator: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `exclude_id` is the record being edited, so it does not conflict with itself.
    fn check_tag(
        &self,
        tag: &str,
        exclude_id: Option<&RecordId>,
    ) -> impl Future<Output = Result<TagCheckResponse, Self::Error>> + Send;
}

/// Posts urlencoded forms (batch actions, ledger decisions, final submission).
pub trait BatchGateway: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// POST `fields` (repeated keys allowed) to `url` and report the page
    /// the server answered with.
    fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> impl Future<Output = Result<PostedPage, Self::Error>> + Send;
}

/// Blocking user dialogs and transient notifications.
pub trait UserPrompt {
    /// Modal message the user must dismiss.
    fn alert(&self, message: &str);

    /// Modal yes/no question.
    fn confirm(&self, message: &str) -> bool;

    /// Non-blocking notification.
    fn toast(&self, message: &str, kind: ToastKind);
}

/// Page-level navigation.
pub trait PageNavigator {
    fn navigate(&self, url: &str);

    fn reload(&self);
}
