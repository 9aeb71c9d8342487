//! Shared test utilities for ledger-form unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use ledger_core::entities::{DraftSnapshot, FormStep};
    use ledger_core::enums::ToastKind;
    use ledger_core::ids::RecordId;
    use ledger_core::ports::{DraftStore, TagValidator, UserPrompt};
    use ledger_core::responses::{SaveDraftResponse, TagCheckResponse};
    use thiserror::Error;

    use crate::memory::{MemoryField, MemoryForm};

    #[derive(Debug, Error)]
    #[error("fake transport failure")]
    pub struct FakeError;

    /// Records every dialog; `confirm` answers with `answer`.
    #[derive(Debug, Default)]
    pub struct RecordingPrompt {
        pub alerts: Mutex<Vec<String>>,
        pub toasts: Mutex<Vec<(String, ToastKind)>>,
    }

    impl RecordingPrompt {
        pub fn alert_count(&self) -> usize {
            self.alerts.lock().unwrap().len()
        }
    }

    impl UserPrompt for RecordingPrompt {
        fn alert(&self, message: &str) {
            self.alerts.lock().unwrap().push(message.to_string());
        }

        fn confirm(&self, _message: &str) -> bool {
            true
        }

        fn toast(&self, message: &str, kind: ToastKind) {
            self.toasts.lock().unwrap().push((message.to_string(), kind));
        }
    }

    /// Scripted draft store. Each call pops the next `(delay, response)`;
    /// when the script is empty it answers success with id `1`.
    #[derive(Debug, Default)]
    pub struct FakeDraftStore {
        pub script: Mutex<VecDeque<(Duration, Result<SaveDraftResponse, FakeError>)>>,
        pub saved: Mutex<Vec<(tokio::time::Instant, DraftSnapshot)>>,
    }

    impl FakeDraftStore {
        pub fn push(&self, delay: Duration, response: Result<SaveDraftResponse, FakeError>) {
            self.script.lock().unwrap().push_back((delay, response));
        }

        pub fn calls(&self) -> usize {
            self.saved.lock().unwrap().len()
        }
    }

    pub fn saved(id: &str) -> SaveDraftResponse {
        SaveDraftResponse {
            success: true,
            valve_id: RecordId::parse(id),
            message: None,
        }
    }

    impl DraftStore for FakeDraftStore {
        type Error = FakeError;

        async fn save_draft(
            &self,
            snapshot: &DraftSnapshot,
        ) -> Result<SaveDraftResponse, Self::Error> {
            self.saved
                .lock()
                .unwrap()
                .push((tokio::time::Instant::now(), snapshot.clone()));
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some((delay, response)) => {
                    tokio::time::sleep(delay).await;
                    response
                }
                None => Ok(saved("1")),
            }
        }
    }

    /// Tag validator that rejects one fixed tag.
    #[derive(Debug, Default)]
    pub struct FakeTagValidator {
        pub taken: String,
        pub fail: bool,
        pub requests: Mutex<Vec<(String, Option<RecordId>)>>,
    }

    impl TagValidator for FakeTagValidator {
        type Error = FakeError;

        async fn check_tag(
            &self,
            tag: &str,
            exclude_id: Option<&RecordId>,
        ) -> Result<TagCheckResponse, Self::Error> {
            self.requests
                .lock()
                .unwrap()
                .push((tag.to_string(), exclude_id.cloned()));
            if self.fail {
                return Err(FakeError);
            }
            if tag == self.taken {
                Ok(TagCheckResponse {
                    valid: false,
                    message: Some("tag already exists".into()),
                })
            } else {
                Ok(TagCheckResponse {
                    valid: true,
                    message: None,
                })
            }
        }
    }

    pub fn step(n: u32) -> FormStep {
        FormStep::new(n, 6).unwrap()
    }

    /// Six-step form: a required tag and name on step 1, a required medium on
    /// step 2, an optional remark on step 6.
    pub fn sample_form() -> MemoryForm {
        MemoryForm::new()
            .with_field(MemoryField::new("位号", step(1)).required())
            .with_field(MemoryField::new("名称", step(1)).required())
            .with_field(MemoryField::new("介质", step(2)).required())
            .with_field(MemoryField::new("备注", step(6)))
    }

    pub fn fill(form: &mut MemoryForm, pairs: &[(&str, &str)]) {
        use crate::view::FormView;
        for (name, value) in pairs {
            form.write_field(name, value);
        }
    }
}
