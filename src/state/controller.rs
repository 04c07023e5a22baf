//! Form controller: owns the tax form and drives the district populator,
//! validation and the submission lifecycle

use super::forms::{FieldPresenter, Form, TaxForm};
use super::options::OptionTable;
use super::submission::{SubmissionOutcome, SubmissionState};
use super::validation::validate_field;
use crate::submit::{SubmissionPayload, SubmitError, SubmitResponse};

/// What the renderer should bring into view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(usize),
    SuccessBanner,
    ErrorBanner,
}

/// Sole mutator of the form during its lifetime
#[derive(Debug)]
pub struct FormController {
    form: TaxForm,
    options: OptionTable,
    state: SubmissionState,
    focus: Option<Focus>,
}

impl FormController {
    pub fn new(options: OptionTable, csrf_token: impl Into<String>) -> Self {
        let mut form = TaxForm::new(csrf_token);
        form.set_state_options(options.parent_options());

        let mut controller = Self {
            form,
            options,
            state: SubmissionState::Idle,
            focus: None,
        };
        controller.on_parent_change();
        controller
    }

    pub fn form(&self) -> &TaxForm {
        &self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// Rebuild the district options for the currently selected state
    pub fn on_parent_change(&mut self) {
        let key = self.form.state.value.clone();
        let options = self.options.child_options(&key);
        tracing::debug!(state = %key, districts = options.len() - 1, "Repopulating districts");
        self.form.district.set_options(options);
    }

    // --- Field editing ---

    /// Type into the active field. Ignored while controls are disabled.
    pub fn input_char(&mut self, c: char) {
        if !self.state.controls_enabled() {
            return;
        }
        if let Some(field) = self.form.get_active_field_mut() {
            field.push_char(c);
            if field.required {
                field.clear_field_error();
            }
        }
    }

    pub fn backspace(&mut self) {
        if !self.state.controls_enabled() {
            return;
        }
        if let Some(field) = self.form.get_active_field_mut() {
            field.pop_char();
            if field.required {
                field.clear_field_error();
            }
        }
    }

    /// Cycle the active select forward (or backward). Changing the state
    /// select repopulates the districts.
    pub fn cycle_option(&mut self, forward: bool) {
        if !self.state.controls_enabled() {
            return;
        }
        let index = self.form.active_field_index;
        let changed = match self.form.get_active_field_mut() {
            Some(field) if field.is_select() => {
                let changed = if forward {
                    field.select_next()
                } else {
                    field.select_prev()
                };
                if changed && field.required {
                    field.clear_field_error();
                }
                changed
            }
            _ => false,
        };
        if changed && index == TaxForm::STATE_INDEX {
            self.on_parent_change();
        }
    }

    /// Move focus forward, validating the field being left
    pub fn next_field(&mut self) {
        self.blur_active();
        self.form.next_field();
    }

    /// Move focus backward, validating the field being left
    pub fn prev_field(&mut self) {
        self.blur_active();
        self.form.prev_field();
    }

    fn blur_active(&mut self) {
        let index = self.form.active_field_index;
        if self.form.get_field(index).is_some_and(|f| f.required) {
            self.validate_field(index);
        }
    }

    // --- Validation ---

    /// Validate one field and show or clear its annotation
    pub fn validate_field(&mut self, index: usize) -> bool {
        let Some(field) = self.form.field_mut(index) else {
            return true;
        };
        let result = validate_field(field);
        match result.message() {
            Some(message) => {
                field.show_field_error(message);
                false
            }
            None => {
                field.clear_field_error();
                true
            }
        }
    }

    /// Validate every required field, annotating each failure. Focuses the
    /// first invalid field when any fails.
    pub fn validate_form(&mut self) -> bool {
        let mut all_valid = true;
        for index in self.form.required_indices() {
            if !self.validate_field(index) {
                all_valid = false;
            }
        }

        if !all_valid {
            if let Some(first) = self.form.first_error_index() {
                self.form.set_active_field(first);
                self.focus = Some(Focus::Field(first));
            }
        }
        all_valid
    }

    // --- Submission lifecycle ---

    /// Start a submission. Returns the payload to post, or None when one is
    /// already outstanding or the form is invalid.
    pub fn begin_submit(&mut self) -> Option<SubmissionPayload> {
        if self.state.is_submitting() {
            tracing::debug!("Submission already in progress, ignoring");
            return None;
        }
        if !self.validate_form() {
            tracing::info!("Form has validation errors, not submitting");
            return None;
        }

        self.state.begin();
        self.focus = None;
        tracing::info!("Submitting form");

        Some(SubmissionPayload {
            fields: self.form.form_data(),
            csrf_token: self.form.csrf_token.clone(),
        })
    }

    /// Settle the outstanding submission with the request's result
    pub fn finish_submit(&mut self, result: Result<SubmitResponse, SubmitError>) {
        if !self.state.is_submitting() {
            tracing::warn!("Submission result arrived with none outstanding, ignoring");
            return;
        }

        if let Err(err) = &result {
            tracing::error!("Form submission error: {err}");
        }
        let outcome = SubmissionOutcome::from_result(&result);
        match &outcome {
            SubmissionOutcome::Accepted => tracing::info!("Form submitted successfully"),
            SubmissionOutcome::Rejected(message) => tracing::warn!("Server error: {message}"),
            SubmissionOutcome::Failed(_) => {}
        }

        let accepted = outcome == SubmissionOutcome::Accepted;
        self.state.finish(outcome);

        if accepted {
            self.reset_form();
            self.focus = Some(Focus::SuccessBanner);
        } else {
            self.focus = Some(Focus::ErrorBanner);
        }
    }

    /// Validate, post through `client` and settle. Returns whether a request
    /// was issued.
    #[cfg(test)]
    pub async fn submit(&mut self, client: &dyn crate::submit::SubmitClientTrait) -> bool {
        let Some(payload) = self.begin_submit() else {
            return false;
        };
        let result = client.submit(&payload).await;
        self.finish_submit(result);
        true
    }

    /// Clear every value and annotation; districts fall back to the placeholder
    pub fn reset_form(&mut self) {
        self.form.reset();
        self.on_parent_change();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::DISTRICT_PLACEHOLDER;
    use crate::state::submission::GENERIC_ERROR_MESSAGE;
    use crate::state::validation::{EMAIL_MESSAGE, REQUIRED_MESSAGE};
    use crate::submit::{MockSubmitClientTrait, ResponseBody};
    use pretty_assertions::assert_eq;

    fn controller() -> FormController {
        FormController::new(OptionTable::builtin(), "token-123")
    }

    fn select_state(controller: &mut FormController, key: &str) {
        controller.form.set_active_field(TaxForm::STATE_INDEX);
        while controller.form.state.value != key {
            controller.cycle_option(true);
        }
    }

    fn filled_controller() -> FormController {
        let mut c = controller();
        c.form.full_name.value = "Asha Rawat".to_string();
        c.form.email.value = "asha@example.com".to_string();
        c.form.phone.value = "+91-9876543210".to_string();
        select_state(&mut c, "uttarakhand");
        c.form.set_active_field(TaxForm::DISTRICT_INDEX);
        c.cycle_option(true);
        c
    }

    fn ok_response(message: &str) -> Result<SubmitResponse, SubmitError> {
        Ok(SubmitResponse {
            status: 200,
            body: ResponseBody {
                message: Some(message.to_string()),
                error: None,
            },
        })
    }

    #[test]
    fn test_new_populates_state_options_and_empty_districts() {
        let c = controller();
        let labels: Vec<&str> = c.form.state.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Select State", "Uttar Pradesh", "Uttarakhand"]);
        assert_eq!(c.form.district.options.len(), 1);
        assert_eq!(c.state(), &SubmissionState::Idle);
    }

    #[test]
    fn test_selecting_uttarakhand_repopulates_districts() {
        let mut c = controller();
        select_state(&mut c, "uttarakhand");

        let district = &c.form.district;
        assert_eq!(district.options.len(), 14);
        assert_eq!(district.options[0].label, DISTRICT_PLACEHOLDER);
        assert_eq!(district.options[1].label, "Almora");
        assert_eq!(district.options[13].label, "Uttarkashi");
        assert_eq!(district.options[8].value, "pauri-garhwal");
        assert_eq!(district.value, "");
    }

    #[test]
    fn test_changing_state_resets_district_selection() {
        let mut c = filled_controller();
        assert_eq!(c.form.district.value, "almora");
        select_state(&mut c, "uttar-pradesh");
        assert_eq!(c.form.district.value, "");
        assert_eq!(c.form.district.options.len(), 74);
        assert_eq!(c.form.district.options[1].value, "agra");
    }

    #[test]
    fn test_unknown_parent_key_leaves_only_placeholder() {
        let mut c = controller();
        c.form.state.value = "goa".to_string();
        c.on_parent_change();
        assert_eq!(c.form.district.options.len(), 1);
        assert_eq!(c.form.district.value, "");
    }

    #[test]
    fn test_injected_option_table_is_used() {
        let table = OptionTable::new(vec![("goa", vec!["North Goa", "South Goa"])]).unwrap();
        let mut c = FormController::new(table, "");
        select_state(&mut c, "goa");
        assert_eq!(c.form.district.options[2].value, "south-goa");
    }

    #[test]
    fn test_typing_clears_error_on_required_field() {
        let mut c = controller();
        c.validate_field(0);
        assert_eq!(c.form.full_name.error.as_deref(), Some(REQUIRED_MESSAGE));
        c.input_char('A');
        assert!(!c.form.full_name.has_error());
    }

    #[test]
    fn test_leaving_field_validates_it() {
        let mut c = controller();
        c.form.set_active_field(1);
        for ch in "abc".chars() {
            c.input_char(ch);
        }
        c.next_field();
        assert_eq!(c.form.email.error.as_deref(), Some(EMAIL_MESSAGE));
        assert_eq!(c.form.active_field_index, 2);
    }

    #[test]
    fn test_validate_form_annotates_all_failures_and_focuses_first() {
        let mut c = controller();
        c.form.full_name.value = "Asha".to_string();
        c.form.email.value = "abc".to_string();
        c.form.set_active_field(TaxForm::SUBMIT_INDEX);

        assert!(!c.validate_form());
        assert!(!c.form.full_name.has_error());
        assert_eq!(c.form.email.error.as_deref(), Some(EMAIL_MESSAGE));
        assert_eq!(c.form.phone.error.as_deref(), Some(REQUIRED_MESSAGE));
        assert!(c.form.state.has_error());
        assert!(c.form.district.has_error());
        assert_eq!(c.form.active_field_index, 1);
        assert_eq!(c.focus(), Some(Focus::Field(1)));
    }

    #[test]
    fn test_whitespace_only_required_field_fails_form() {
        let mut c = filled_controller();
        c.form.full_name.value = "   ".to_string();
        assert!(!c.validate_form());
        assert_eq!(c.form.full_name.error.as_deref(), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_begin_submit_with_invalid_form_stays_idle() {
        let mut c = controller();
        assert!(c.begin_submit().is_none());
        assert_eq!(c.state(), &SubmissionState::Idle);
        assert!(c.form.first_error_index().is_some());
    }

    #[test]
    fn test_begin_submit_snapshots_form_and_blocks_reentry() {
        let mut c = filled_controller();
        let payload = c.begin_submit().unwrap();
        assert_eq!(payload.csrf_token, "token-123");
        assert!(payload
            .fields
            .contains(&("district".to_string(), "almora".to_string())));
        assert!(c.state().is_submitting());
        assert!(!c.state().controls_enabled());

        assert!(c.begin_submit().is_none());
        assert!(c.state().is_submitting());
    }

    #[test]
    fn test_edits_ignored_while_submitting() {
        let mut c = filled_controller();
        c.begin_submit().unwrap();
        c.form.set_active_field(0);
        c.input_char('X');
        c.backspace();
        assert_eq!(c.form.full_name.value, "Asha Rawat");
        c.form.set_active_field(TaxForm::STATE_INDEX);
        c.cycle_option(true);
        assert_eq!(c.form.state.value, "uttarakhand");
    }

    #[test]
    fn test_success_resets_form_and_shows_banner() {
        let mut c = filled_controller();
        c.begin_submit().unwrap();
        c.finish_submit(ok_response("Success"));

        assert_eq!(c.state(), &SubmissionState::Success);
        assert!(c.state().success_banner_visible());
        assert!(c.state().error_banner().is_none());
        assert!(c.form.fields().iter().all(|f| f.value.is_empty()));
        assert!(c.form.fields().iter().all(|f| !f.has_error()));
        assert_eq!(c.form.district.options.len(), 1);
        assert_eq!(c.form.csrf_token, "token-123");
        assert!(c.state().controls_enabled());
        assert_eq!(c.focus(), Some(Focus::SuccessBanner));
    }

    #[test]
    fn test_server_rejection_keeps_values() {
        let mut c = filled_controller();
        c.begin_submit().unwrap();
        c.finish_submit(Ok(SubmitResponse {
            status: 500,
            body: ResponseBody {
                message: None,
                error: Some("Service temporarily unavailable".to_string()),
            },
        }));

        assert_eq!(
            c.state().error_banner(),
            Some("Service temporarily unavailable")
        );
        assert!(!c.state().success_banner_visible());
        assert_eq!(c.form.full_name.value, "Asha Rawat");
        assert_eq!(c.form.district.value, "almora");
        assert!(c.state().controls_enabled());
        assert_eq!(c.focus(), Some(Focus::ErrorBanner));
    }

    #[test]
    fn test_transport_failure_shows_generic_message() {
        let mut c = filled_controller();
        c.begin_submit().unwrap();
        c.finish_submit(Err(SubmitError::Transport("connection refused".into())));

        assert_eq!(c.state().error_banner(), Some(GENERIC_ERROR_MESSAGE));
        assert_eq!(c.form.email.value, "asha@example.com");
        assert!(c.state().controls_enabled());
        assert!(c.state().submit_visible());
    }

    #[test]
    fn test_finish_without_outstanding_submission_is_ignored() {
        let mut c = filled_controller();
        c.finish_submit(ok_response("Success"));
        assert_eq!(c.state(), &SubmissionState::Idle);
        assert_eq!(c.form.full_name.value, "Asha Rawat");
    }

    #[test]
    fn test_resubmit_after_error_hides_banner() {
        let mut c = filled_controller();
        c.begin_submit().unwrap();
        c.finish_submit(Err(SubmitError::Transport("down".into())));
        assert!(c.begin_submit().is_some());
        assert!(c.state().error_banner().is_none());
        assert!(c.state().loading_visible());
    }

    #[tokio::test]
    async fn test_submit_posts_once_and_settles() {
        let mut client = MockSubmitClientTrait::new();
        client
            .expect_submit()
            .withf(|payload| {
                payload.csrf_token == "token-123"
                    && payload.fields[0] == ("fullName".to_string(), "Asha Rawat".to_string())
            })
            .times(1)
            .returning(|_| ok_response("Success"));

        let mut c = filled_controller();
        assert!(c.submit(&client).await);
        assert_eq!(c.state(), &SubmissionState::Success);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_issues_no_request() {
        let mut client = MockSubmitClientTrait::new();
        client.expect_submit().times(0);

        let mut c = controller();
        assert!(!c.submit(&client).await);
        assert_eq!(c.state(), &SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_non_ok_status_without_error_field() {
        let mut client = MockSubmitClientTrait::new();
        client.expect_submit().times(1).returning(|_| {
            Ok(SubmitResponse {
                status: 502,
                body: ResponseBody::default(),
            })
        });

        let mut c = filled_controller();
        assert!(c.submit(&client).await);
        assert_eq!(c.state().error_banner(), Some("Server error: 502"));
        assert_eq!(c.form.phone.value, "+91-9876543210");
    }
}
