//! Batch actions over the checked rows of a list or ledger detail page.

use std::fmt;
use std::str::FromStr;

use ledger_config::EndpointsConfig;
use ledger_core::enums::BatchAction;
use ledger_core::errors::CoreError;
use ledger_core::ports::{BatchGateway, PageNavigator, UserPrompt};
use ledger_core::responses::PostedPage;

use crate::error::ListError;
use crate::selection::SelectionController;

/// Which page the checkboxes live on. The two pages post to different
/// endpoints under different id field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLayout {
    /// The valve list (`ids`).
    #[default]
    List,
    /// A ledger's detail page (`valve_ids`).
    Detail,
}

impl PageLayout {
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::List => "ids",
            Self::Detail => "valve_ids",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Detail => "detail",
        }
    }

    /// A selection controller for this page's rows.
    pub fn selection<I, S>(self, ids: I) -> SelectionController
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectionController::new(self.id_field(), ids)
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageLayout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "list" => Ok(Self::List),
            "detail" | "ledger" => Ok(Self::Detail),
            _ => Err(CoreError::UnknownValue {
                kind: "page",
                value: s.to_string(),
            }),
        }
    }
}

/// How a confirmed batch action reaches the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Background POST, then reload the current page.
    FetchAndReload,
    /// Native form POST; the browser lands on the response page.
    SubmitForm,
    /// Navigate to the export URL with the ids in the query string.
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTarget {
    pub url: String,
    pub mode: DispatchMode,
    /// Fields posted alongside the ids (the detail page's `action`).
    pub extra: Vec<(String, String)>,
}

impl BatchTarget {
    /// Endpoint and dispatch mode for `action` on `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::UnsupportedAction`] when the page has no such
    /// button and [`ListError::Config`] when its endpoint is not configured.
    pub fn resolve(
        action: BatchAction,
        page: PageLayout,
        endpoints: &EndpointsConfig,
    ) -> Result<Self, ListError> {
        let (key, mode, extra) = match (page, action) {
            (PageLayout::List, BatchAction::Approve) => {
                ("batch_approve_url", DispatchMode::SubmitForm, Vec::new())
            }
            (PageLayout::List, BatchAction::Reject) => {
                ("batch_reject_url", DispatchMode::SubmitForm, Vec::new())
            }
            (PageLayout::List, BatchAction::Delete) => {
                ("batch_delete_url", DispatchMode::SubmitForm, Vec::new())
            }
            (PageLayout::List, BatchAction::Export) => {
                ("batch_export_url", DispatchMode::Export, Vec::new())
            }
            (PageLayout::Detail, BatchAction::Approve | BatchAction::Reject) => (
                "ledger_detail_url",
                DispatchMode::SubmitForm,
                vec![("action".to_string(), action.as_str().to_string())],
            ),
            (PageLayout::Detail, BatchAction::Submit) => {
                ("batch_submit_url", DispatchMode::FetchAndReload, Vec::new())
            }
            (PageLayout::Detail, BatchAction::Delete) => {
                ("ledger_batch_delete_url", DispatchMode::FetchAndReload, Vec::new())
            }
            (PageLayout::List, BatchAction::Submit) | (PageLayout::Detail, BatchAction::Export) => {
                return Err(ListError::UnsupportedAction { action, page });
            }
        };
        Ok(Self {
            url: endpoints.require(key)?.to_string(),
            mode,
            extra,
        })
    }
}

/// Approve or reject a whole ledger from its detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerDecision {
    Approve,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// Nothing was checked; the user was told and nothing was sent.
    NothingSelected,
    /// The user declined the confirmation.
    Cancelled,
    Reloaded,
    Navigated { url: String },
}

/// Message shown when an action is attempted with no rows checked.
#[must_use]
pub fn empty_selection_message(action: BatchAction) -> String {
    format!("Please select the records to {} first", action.verb())
}

#[must_use]
pub fn confirm_message(action: BatchAction, count: usize) -> String {
    format!("Are you sure you want to {} the {count} selected records?", action.verb())
}

pub const LEDGER_REJECT_CONFIRM: &str = "Reject every pending entry of this ledger?";

/// `<base>?ids=a&ids=b`, appended with `&` when `base` already has a query.
#[must_use]
pub fn export_url(base: &str, ids: &[&str]) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(ids.iter().map(|id| ("ids", *id)))
        .finish();
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

pub struct BatchActionRunner<G, P, N> {
    gateway: G,
    prompt: P,
    navigator: N,
}

impl<G, P, N> BatchActionRunner<G, P, N>
where
    G: BatchGateway,
    P: UserPrompt,
    N: PageNavigator,
{
    pub const fn new(gateway: G, prompt: P, navigator: N) -> Self {
        Self {
            gateway,
            prompt,
            navigator,
        }
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    pub const fn prompt(&self) -> &P {
        &self.prompt
    }

    pub const fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Apply `action` to the checked rows.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Gateway`] when the POST fails. An empty selection
    /// or a declined confirmation is not an error.
    pub async fn run(
        &self,
        action: BatchAction,
        target: &BatchTarget,
        selection: &SelectionController,
    ) -> Result<BatchOutcome, ListError> {
        let count = selection.count();
        if count == 0 {
            self.prompt.alert(&empty_selection_message(action));
            return Ok(BatchOutcome::NothingSelected);
        }
        if action.requires_confirmation() && !self.prompt.confirm(&confirm_message(action, count)) {
            tracing::debug!(%action, count, "batch action cancelled");
            return Ok(BatchOutcome::Cancelled);
        }

        tracing::info!(%action, count, url = %target.url, "dispatching batch action");
        match target.mode {
            DispatchMode::Export => {
                let url = export_url(&target.url, &selection.selected());
                self.navigator.navigate(&url);
                Ok(BatchOutcome::Navigated { url })
            }
            DispatchMode::FetchAndReload => {
                self.post(&target.url, target.extra.clone(), selection).await?;
                self.navigator.reload();
                Ok(BatchOutcome::Reloaded)
            }
            DispatchMode::SubmitForm => {
                let page = self.post(&target.url, target.extra.clone(), selection).await?;
                self.navigator.navigate(&page.url);
                Ok(BatchOutcome::Navigated { url: page.url })
            }
        }
    }

    /// Post a ledger-level approve/reject form, then reload. Rejecting asks
    /// for confirmation first.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::Gateway`] when the POST fails.
    pub async fn decide(
        &self,
        decision: LedgerDecision,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<BatchOutcome, ListError> {
        if decision == LedgerDecision::Reject && !self.prompt.confirm(LEDGER_REJECT_CONFIRM) {
            return Ok(BatchOutcome::Cancelled);
        }
        self.gateway
            .post_form(url, fields)
            .await
            .map_err(|e| ListError::Gateway(Box::new(e)))?;
        self.navigator.reload();
        Ok(BatchOutcome::Reloaded)
    }

    async fn post(
        &self,
        url: &str,
        mut fields: Vec<(String, String)>,
        selection: &SelectionController,
    ) -> Result<PostedPage, ListError> {
        fields.extend(selection.form_fields());
        self.gateway
            .post_form(url, &fields)
            .await
            .map_err(|e| ListError::Gateway(Box::new(e)))
    }
}
