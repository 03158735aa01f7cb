//! Create-paste submission state machine.
//!
//! `Idle -> Validating -> { ValidationFailed | Submitting } -> { Success | SubmitFailed }`.
//! Both failure states accept a new attempt; `Success` is terminal. A second
//! attempt while `Submitting` is rejected without touching the network.

use crate::api::PasteApi;
use quickpaste_core::models::paste_path;
use quickpaste_core::{AppError, PasteCreateRequest, PasteFormModel};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    ValidationFailed,
    Submitting,
    Success {
        paste_id: String,
    },
    SubmitFailed,
}

/// Result of the current (or most recent) attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Pending,
    Success(String),
    ValidationFailed,
    SubmitFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionController {
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Outcome of the current attempt, or `None` before the first one.
    pub fn outcome(&self) -> Option<SubmissionOutcome> {
        match &self.state {
            SubmissionState::Idle => None,
            SubmissionState::Validating | SubmissionState::Submitting => {
                Some(SubmissionOutcome::Pending)
            }
            SubmissionState::ValidationFailed => Some(SubmissionOutcome::ValidationFailed),
            SubmissionState::Success { paste_id } => {
                Some(SubmissionOutcome::Success(paste_id.clone()))
            }
            SubmissionState::SubmitFailed => Some(SubmissionOutcome::SubmitFailed),
        }
    }

    /// Navigation target once the paste exists.
    pub fn redirect_target(&self) -> Option<String> {
        match &self.state {
            SubmissionState::Success { paste_id } => Some(paste_path(paste_id)),
            _ => None,
        }
    }

    fn transition(&mut self, next: SubmissionState) {
        debug!(from = ?self.state, to = ?next, "submission transition");
        self.state = next;
    }

    /// Start an attempt: validate the form and build the wire request.
    ///
    /// On success the controller is `Submitting` and the caller must issue the
    /// request and report back through [`SubmissionController::finish`].
    ///
    /// # Errors
    /// - [`AppError::SubmissionInFlight`] while a request is pending.
    /// - [`AppError::AlreadySubmitted`] after a successful submission.
    /// - [`AppError::BodyRequired`] when validation fails; the form is kept.
    pub fn begin(&mut self, form: &PasteFormModel) -> Result<PasteCreateRequest, AppError> {
        match self.state {
            SubmissionState::Submitting | SubmissionState::Validating => {
                warn!("submit ignored: a submission is already in flight");
                return Err(AppError::SubmissionInFlight);
            }
            SubmissionState::Success { .. } => return Err(AppError::AlreadySubmitted),
            _ => {}
        }

        self.transition(SubmissionState::Validating);
        if let Err(err) = form.validate() {
            self.transition(SubmissionState::ValidationFailed);
            return Err(err);
        }

        let request = PasteCreateRequest::from_snapshot(&form.snapshot());
        self.transition(SubmissionState::Submitting);
        Ok(request)
    }

    /// Re-check a failed validation after the form changed.
    ///
    /// The "Body Required" state clears as soon as the body is non-empty again;
    /// an edit that leaves it empty keeps the banner.
    pub fn revalidate(&mut self, form: &PasteFormModel) {
        if self.state == SubmissionState::ValidationFailed && form.validate().is_ok() {
            self.transition(SubmissionState::Idle);
        }
    }

    /// Record the create call's result.
    ///
    /// The form is reset after both success and failure. Resetting on failure
    /// discards the draft; it matches the existing page behavior.
    pub fn finish(&mut self, result: Result<String, AppError>, form: &mut PasteFormModel) {
        if !self.is_submitting() {
            warn!(state = ?self.state, "ignoring submission result with no request in flight");
            return;
        }
        match result {
            Ok(paste_id) => {
                info!(paste_id = %paste_id, "paste created");
                self.transition(SubmissionState::Success { paste_id });
            }
            Err(err) => {
                warn!("paste submission failed: {}", err);
                self.transition(SubmissionState::SubmitFailed);
            }
        }
        form.reset();
    }

    /// Run a full attempt against `api` on the caller's task.
    ///
    /// # Returns
    /// The settled outcome; validation and create failures are reported as
    /// outcomes rather than errors.
    ///
    /// # Errors
    /// Returns the rejection when the attempt could not start at all
    /// (in flight or already submitted).
    pub async fn submit<A: PasteApi>(
        &mut self,
        api: &A,
        form: &mut PasteFormModel,
    ) -> Result<SubmissionOutcome, AppError> {
        let request = match self.begin(form) {
            Ok(request) => request,
            Err(AppError::BodyRequired) => return Ok(SubmissionOutcome::ValidationFailed),
            Err(err) => return Err(err),
        };
        let result = api
            .create_paste(&request)
            .await
            .map_err(|err| AppError::Submission(err.to_string()));
        self.finish(result, form);
        Ok(self.outcome().unwrap_or(SubmissionOutcome::Pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeApi;
    use quickpaste_core::{ExpirySelection, FormField};

    fn filled_form() -> PasteFormModel {
        let mut form = PasteFormModel::new();
        form.set_field(FormField::Title, "notes");
        form.set_field(FormField::Body, "hello");
        form.set_field(FormField::Language, "rust");
        form
    }

    #[test]
    fn empty_body_never_reaches_submitting() {
        let mut controller = SubmissionController::new();
        let mut form = PasteFormModel::new();
        form.set_field(FormField::Title, "draft");

        assert_eq!(controller.begin(&form), Err(AppError::BodyRequired));
        assert_eq!(controller.state(), &SubmissionState::ValidationFailed);
        assert_eq!(
            controller.outcome(),
            Some(SubmissionOutcome::ValidationFailed)
        );
        assert_eq!(form.field(FormField::Title), "draft");
    }

    #[test]
    fn revalidate_clears_body_required_once_body_is_filled() {
        let mut controller = SubmissionController::new();
        let mut form = PasteFormModel::new();
        assert_eq!(controller.begin(&form), Err(AppError::BodyRequired));

        controller.revalidate(&form);
        assert_eq!(controller.state(), &SubmissionState::ValidationFailed);

        form.set_field(FormField::Body, " ");
        controller.revalidate(&form);
        assert_eq!(controller.state(), &SubmissionState::Idle);
        assert_eq!(controller.outcome(), None);

        let mut submit_failed = SubmissionController {
            state: SubmissionState::SubmitFailed,
        };
        submit_failed.revalidate(&form);
        assert_eq!(submit_failed.state(), &SubmissionState::SubmitFailed);
    }

    #[test]
    fn begin_builds_request_from_form() {
        let mut controller = SubmissionController::new();
        let mut form = filled_form();
        form.set_field(FormField::Title, "");
        form.set_expiry(ExpirySelection::At("2030-01-01T00:00:00+00:00".to_string()));

        let request = controller.begin(&form).expect("begin should pass");
        assert_eq!(request.title, "Untitled");
        assert_eq!(request.text, "hello");
        assert_eq!(request.language, "rust");
        assert_eq!(
            request.expires_at.as_deref(),
            Some("2030-01-01T00:00:00+00:00")
        );
        assert!(controller.is_submitting());
        assert_eq!(controller.outcome(), Some(SubmissionOutcome::Pending));
    }

    #[test]
    fn second_begin_while_submitting_is_rejected() {
        let mut controller = SubmissionController::new();
        let form = filled_form();
        controller.begin(&form).expect("first begin");
        assert_eq!(controller.begin(&form), Err(AppError::SubmissionInFlight));
        assert!(controller.is_submitting());
    }

    #[test]
    fn success_resets_form_and_targets_view_page() {
        let mut controller = SubmissionController::new();
        let mut form = filled_form();
        controller.begin(&form).expect("begin");
        controller.finish(Ok("abc123".to_string()), &mut form);

        assert_eq!(controller.redirect_target().as_deref(), Some("/p/abc123"));
        assert_eq!(form, PasteFormModel::new());
        assert_eq!(controller.begin(&filled_form()), Err(AppError::AlreadySubmitted));
    }

    #[test]
    fn failure_resets_form_and_allows_retry() {
        // The draft is discarded on failure as well; see DESIGN.md.
        let mut controller = SubmissionController::new();
        let mut form = filled_form();
        controller.begin(&form).expect("begin");
        controller.finish(Err(AppError::Submission("500".to_string())), &mut form);

        assert_eq!(controller.state(), &SubmissionState::SubmitFailed);
        assert_eq!(controller.redirect_target(), None);
        assert_eq!(form, PasteFormModel::new());

        let retry = filled_form();
        assert!(controller.begin(&retry).is_ok());
    }

    #[test]
    fn stray_result_without_request_is_ignored() {
        let mut controller = SubmissionController::new();
        let mut form = filled_form();
        controller.finish(Ok("ghost".to_string()), &mut form);
        assert_eq!(controller.state(), &SubmissionState::Idle);
        assert_eq!(form, filled_form());
    }

    #[tokio::test]
    async fn submit_against_api_covers_all_outcomes() {
        let ok_api = FakeApi::ready(Vec::new()).creating("abc123");
        let mut controller = SubmissionController::new();
        let mut form = filled_form();
        let outcome = controller.submit(&ok_api, &mut form).await;
        assert_eq!(outcome, Ok(SubmissionOutcome::Success("abc123".to_string())));
        assert_eq!(ok_api.requests().len(), 1);

        let failing_api = FakeApi::ready(Vec::new()).failing_create(500);
        let mut controller = SubmissionController::new();
        let mut form = filled_form();
        let outcome = controller.submit(&failing_api, &mut form).await;
        assert_eq!(outcome, Ok(SubmissionOutcome::SubmitFailed));

        let mut controller = SubmissionController::new();
        let mut empty = PasteFormModel::new();
        let outcome = controller.submit(&ok_api, &mut empty).await;
        assert_eq!(outcome, Ok(SubmissionOutcome::ValidationFailed));
        assert_eq!(ok_api.requests().len(), 1);
    }
}
