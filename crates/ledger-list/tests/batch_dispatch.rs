//! Batch dispatch against recording ports.

use std::sync::Mutex;

use ledger_config::EndpointsConfig;
use ledger_core::enums::{BatchAction, ToastKind};
use ledger_core::ports::{BatchGateway, PageNavigator, UserPrompt};
use ledger_core::responses::PostedPage;
use ledger_list::{
    BatchActionRunner, BatchOutcome, BatchTarget, LedgerDecision, PageLayout, SelectionState,
};
use pretty_assertions::assert_eq;

#[derive(Debug, thiserror::Error)]
#[error("connection refused")]
struct Refused;

#[derive(Default)]
struct RecordingGateway {
    posts: Mutex<Vec<(String, Vec<(String, String)>)>>,
    fail: bool,
}

impl BatchGateway for RecordingGateway {
    type Error = Refused;

    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<PostedPage, Refused> {
        if self.fail {
            return Err(Refused);
        }
        self.posts
            .lock()
            .unwrap()
            .push((url.to_string(), fields.to_vec()));
        Ok(PostedPage {
            url: format!("{url}/done"),
            status: 200,
        })
    }
}

struct Dialogs {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl Dialogs {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
        }
    }
}

impl UserPrompt for Dialogs {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }

    fn toast(&self, _message: &str, _kind: ToastKind) {}
}

#[derive(Default)]
struct Browser {
    visited: Mutex<Vec<String>>,
    reloads: Mutex<usize>,
}

impl PageNavigator for Browser {
    fn navigate(&self, url: &str) {
        self.visited.lock().unwrap().push(url.to_string());
    }

    fn reload(&self) {
        *self.reloads.lock().unwrap() += 1;
    }
}

type Runner = BatchActionRunner<RecordingGateway, Dialogs, Browser>;

fn runner(answer: bool) -> Runner {
    BatchActionRunner::new(
        RecordingGateway::default(),
        Dialogs::answering(answer),
        Browser::default(),
    )
}

fn runner_alerts(runner: &Runner) -> usize {
    runner.prompt().alerts.lock().unwrap().len()
}

fn runner_confirms(runner: &Runner) -> Vec<String> {
    runner.prompt().confirms.lock().unwrap().clone()
}

fn runner_posts(runner: &Runner) -> Vec<(String, Vec<(String, String)>)> {
    runner.gateway().posts.lock().unwrap().clone()
}

fn endpoints() -> EndpointsConfig {
    EndpointsConfig {
        ledger_detail_url: "http://ledger.local/ledger/3".into(),
        batch_delete_url: "http://ledger.local/valves/batch-delete".into(),
        batch_export_url: "http://ledger.local/valves/batch-export".into(),
        batch_submit_url: "http://ledger.local/ledger/3/submit".into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn empty_selection_alerts_without_prompt_or_request() {
    let runner = runner(true);
    let selection = PageLayout::List.selection(["1", "2"]);
    let target = BatchTarget::resolve(BatchAction::Delete, PageLayout::List, &endpoints()).unwrap();

    let outcome = runner.run(BatchAction::Delete, &target, &selection).await.unwrap();

    assert_eq!(outcome, BatchOutcome::NothingSelected);
    assert_eq!(runner_alerts(&runner), 1);
    assert!(runner_confirms(&runner).is_empty());
    assert!(runner_posts(&runner).is_empty());
}

#[tokio::test]
async fn confirmed_delete_posts_exactly_the_checked_ids() {
    let runner = runner(true);
    let mut view = SelectionState::default();
    let mut selection = PageLayout::List.selection(["1", "2", "3"]);
    selection.toggle_row(&mut view, "1", true).unwrap();
    selection.toggle_row(&mut view, "3", true).unwrap();
    let target = BatchTarget::resolve(BatchAction::Delete, PageLayout::List, &endpoints()).unwrap();

    let outcome = runner.run(BatchAction::Delete, &target, &selection).await.unwrap();

    assert_eq!(
        outcome,
        BatchOutcome::Navigated {
            url: "http://ledger.local/valves/batch-delete/done".into()
        }
    );
    assert_eq!(
        runner_confirms(&runner),
        vec!["Are you sure you want to delete the 2 selected records?".to_string()]
    );
    assert_eq!(
        runner_posts(&runner),
        vec![(
            "http://ledger.local/valves/batch-delete".to_string(),
            vec![
                ("ids".to_string(), "1".to_string()),
                ("ids".to_string(), "3".to_string()),
            ]
        )]
    );
}

#[tokio::test]
async fn repeated_ids_are_posted_once() {
    let runner = runner(true);
    let mut selection = PageLayout::List.selection(["7", "7", "8"]);
    selection.toggle_all(&mut SelectionState::default(), true);
    let target =
        BatchTarget::resolve(BatchAction::Delete, PageLayout::List, &endpoints()).unwrap();

    runner.run(BatchAction::Delete, &target, &selection).await.unwrap();

    assert_eq!(
        runner_confirms(&runner),
        vec!["Are you sure you want to delete the 2 selected records?".to_string()]
    );
    let posts = runner_posts(&runner);
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].1,
        vec![
            ("ids".to_string(), "7".to_string()),
            ("ids".to_string(), "8".to_string()),
        ]
    );
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let runner = runner(false);
    let mut view = SelectionState::default();
    let mut selection = PageLayout::Detail.selection(["5"]);
    selection.toggle_all(&mut view, true);
    let target =
        BatchTarget::resolve(BatchAction::Reject, PageLayout::Detail, &endpoints()).unwrap();

    let outcome = runner.run(BatchAction::Reject, &target, &selection).await.unwrap();

    assert_eq!(outcome, BatchOutcome::Cancelled);
    assert!(runner_posts(&runner).is_empty());
}

#[tokio::test]
async fn detail_page_posts_action_and_valve_ids() {
    let runner = runner(true);
    let mut view = SelectionState::default();
    let mut selection = PageLayout::Detail.selection(["5", "6"]);
    selection.toggle_all(&mut view, true);
    let target =
        BatchTarget::resolve(BatchAction::Approve, PageLayout::Detail, &endpoints()).unwrap();

    runner.run(BatchAction::Approve, &target, &selection).await.unwrap();

    let posts = runner_posts(&runner);
    assert_eq!(posts[0].0, "http://ledger.local/ledger/3");
    assert_eq!(
        posts[0].1,
        vec![
            ("action".to_string(), "batch_approve".to_string()),
            ("valve_ids".to_string(), "5".to_string()),
            ("valve_ids".to_string(), "6".to_string()),
        ]
    );
}

#[tokio::test]
async fn detail_submit_reloads_after_post() {
    let runner = runner(true);
    let mut view = SelectionState::default();
    let mut selection = PageLayout::Detail.selection(["5"]);
    selection.toggle_row(&mut view, "5", true).unwrap();
    let target =
        BatchTarget::resolve(BatchAction::Submit, PageLayout::Detail, &endpoints()).unwrap();

    let outcome = runner.run(BatchAction::Submit, &target, &selection).await.unwrap();

    assert_eq!(outcome, BatchOutcome::Reloaded);
    assert_eq!(*runner.navigator().reloads.lock().unwrap(), 1);
}

#[tokio::test]
async fn export_navigates_without_confirmation() {
    let runner = runner(false);
    let mut view = SelectionState::default();
    let mut selection = PageLayout::List.selection(["4", "9"]);
    selection.toggle_all(&mut view, true);
    let target = BatchTarget::resolve(BatchAction::Export, PageLayout::List, &endpoints()).unwrap();

    let outcome = runner.run(BatchAction::Export, &target, &selection).await.unwrap();

    assert_eq!(
        outcome,
        BatchOutcome::Navigated {
            url: "http://ledger.local/valves/batch-export?ids=4&ids=9".into()
        }
    );
    assert!(runner_confirms(&runner).is_empty());
    assert!(runner_posts(&runner).is_empty());
}

#[tokio::test]
async fn ledger_reject_needs_confirmation_but_approve_does_not() {
    let declined = runner(false);
    let url = "http://ledger.local/ledger/3/reject";
    let outcome = declined.decide(LedgerDecision::Reject, url, &[]).await.unwrap();
    assert_eq!(outcome, BatchOutcome::Cancelled);

    let outcome = declined
        .decide(LedgerDecision::Approve, "http://ledger.local/ledger/3/approve", &[])
        .await
        .unwrap();
    assert_eq!(outcome, BatchOutcome::Reloaded);
    assert_eq!(runner_posts(&declined).len(), 1);
}

#[tokio::test]
async fn gateway_failure_surfaces_as_error() {
    let runner = BatchActionRunner::new(
        RecordingGateway {
            fail: true,
            ..Default::default()
        },
        Dialogs::answering(true),
        Browser::default(),
    );
    let mut view = SelectionState::default();
    let mut selection = PageLayout::List.selection(["1"]);
    selection.toggle_all(&mut view, true);
    let target = BatchTarget::resolve(BatchAction::Delete, PageLayout::List, &endpoints()).unwrap();

    let err = runner.run(BatchAction::Delete, &target, &selection).await.unwrap_err();
    assert!(err.to_string().contains("connection refused"));
}
