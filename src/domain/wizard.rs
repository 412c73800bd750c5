//! Onboarding wizard state machine
//!
//! A wizard walks one draft through four steps. Field edits are accepted
//! unconditionally; validation runs only when the user tries to move forward,
//! and only for the step being left. Submitting consumes the wizard.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::ServiceType;
use super::onboarding::{validate_step, FieldEdit, FieldErrors, OnboardingForm};

/// Wizard step, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    ClientDetails = 1,
    Services = 2,
    Communication = 3,
    Billing = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wizard step {0} does not exist (expected 1 to 4)")]
pub struct InvalidStep(pub u8);

impl WizardStep {
    pub const ALL: &'static [WizardStep] = &[
        Self::ClientDetails,
        Self::Services,
        Self::Communication,
        Self::Billing,
    ];

    pub const fn number(self) -> u8 {
        self as u8
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::ClientDetails => "Client Details",
            Self::Services => "Services",
            Self::Communication => "Communication",
            Self::Billing => "Billing",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ClientDetails => "Basic business information",
            Self::Services => "Assign work types",
            Self::Communication => "Setup preferences",
            Self::Billing => "Bank & payments",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::try_from(self.number() + 1).ok()
    }

    pub fn previous(self) -> Option<Self> {
        Self::try_from(self.number() - 1).ok()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = InvalidStep;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Self::ClientDetails),
            2 => Ok(Self::Services),
            3 => Ok(Self::Communication),
            4 => Ok(Self::Billing),
            other => Err(InvalidStep(other)),
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

/// An in-progress wizard: current step, draft and the errors on display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wizard {
    step: WizardStep,
    form: OnboardingForm,
    errors: FieldErrors,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of trying to move forward
#[derive(Debug)]
pub enum Advance {
    /// The current step has errors; the step is unchanged.
    Blocked(Wizard),
    Moved(Wizard),
    /// The last step validated; the wizard is done.
    Submitted(OnboardingForm),
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::ClientDetails,
            form: OnboardingForm::default(),
            errors: FieldErrors::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn form(&self) -> &OnboardingForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Assign a field and drop any error shown for it. Other errors stay.
    pub fn set_field(&mut self, edit: FieldEdit) {
        let field = edit.field();
        self.form.apply(edit);
        self.errors.remove(field);
    }

    pub fn toggle_service(&mut self, service: ServiceType) {
        self.form.toggle_service(service);
    }

    pub fn validate(&self, step: WizardStep) -> FieldErrors {
        validate_step(&self.form, step)
    }

    /// Go back one step, staying on the first. Errors are left untouched.
    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    pub fn advance(mut self) -> Advance {
        let errors = self.validate(self.step);
        if !errors.is_empty() {
            self.errors = errors;
            return Advance::Blocked(self);
        }

        self.errors = FieldErrors::new();
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Advance::Moved(self)
            }
            None => Advance::Submitted(self.form),
        }
    }
}

/// Input to the wizard reducer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    SetField(FieldEdit),
    ToggleService(ServiceType),
    Advance,
    Back,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("onboarding has already been submitted")]
    AlreadySubmitted,
}

/// Wizard lifecycle
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WizardState {
    Editing(Wizard),
    Submitted { form: OnboardingForm },
}

impl WizardState {
    /// Apply one action, returning the next state.
    pub fn apply(self, action: WizardAction) -> Result<Self, WizardError> {
        let mut wizard = match self {
            Self::Editing(wizard) => wizard,
            Self::Submitted { .. } => return Err(WizardError::AlreadySubmitted),
        };

        let next = match action {
            WizardAction::SetField(edit) => {
                wizard.set_field(edit);
                Self::Editing(wizard)
            }
            WizardAction::ToggleService(service) => {
                wizard.toggle_service(service);
                Self::Editing(wizard)
            }
            WizardAction::Back => {
                wizard.back();
                Self::Editing(wizard)
            }
            WizardAction::Advance => match wizard.advance() {
                Advance::Blocked(wizard) | Advance::Moved(wizard) => Self::Editing(wizard),
                Advance::Submitted(form) => Self::Submitted { form },
            },
        };

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CommChannel, Language};
    use crate::domain::onboarding::FormField;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn fill_client_details(wizard: &mut Wizard) {
        wizard.set_field(FieldEdit::BusinessName("Atreya Foods".into()));
        wizard.set_field(FieldEdit::Pan("PQRST3456U".into()));
        wizard.set_field(FieldEdit::ContactPerson("Lakshmi N".into()));
        wizard.set_field(FieldEdit::Phone("9000011111".into()));
        wizard.set_field(FieldEdit::Email("accounts@atreyafoods.com".into()));
    }

    fn expect_editing(advance: Advance) -> Wizard {
        match advance {
            Advance::Blocked(w) | Advance::Moved(w) => w,
            Advance::Submitted(_) => panic!("wizard submitted unexpectedly"),
        }
    }

    #[test]
    fn starts_on_first_step_with_defaults() {
        let wizard = Wizard::new();
        assert_eq!(wizard.step(), WizardStep::ClientDetails);
        assert_eq!(wizard.form(), &OnboardingForm::default());
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn blocked_advance_keeps_step_and_reports_exactly_the_failing_fields() {
        let mut wizard = Wizard::new();
        wizard.set_field(FieldEdit::BusinessName("Atreya Foods".into()));
        wizard.set_field(FieldEdit::Pan("pqrst3456u".into()));

        let wizard = match wizard.advance() {
            Advance::Blocked(w) => w,
            other => panic!("expected Blocked, got {other:?}"),
        };

        assert_eq!(wizard.step(), WizardStep::ClientDetails);
        assert_eq!(
            wizard.errors().fields().collect::<Vec<_>>(),
            vec![
                FormField::Pan,
                FormField::ContactPerson,
                FormField::Phone,
                FormField::Email
            ]
        );
        assert_eq!(wizard.errors().get(FormField::Pan), Some("Invalid PAN format"));
    }

    #[test]
    fn set_field_clears_only_its_own_error() {
        let mut wizard = expect_editing(Wizard::new().advance());
        assert!(wizard.errors().get(FormField::Pan).is_some());

        // Still invalid, but the error goes away until the next advance.
        wizard.set_field(FieldEdit::Pan("nope".into()));
        assert_eq!(wizard.errors().get(FormField::Pan), None);
        assert!(wizard.errors().get(FormField::Email).is_some());

        let wizard = expect_editing(wizard.advance());
        assert_eq!(wizard.errors().get(FormField::Pan), Some("Invalid PAN format"));
    }

    #[test]
    fn back_is_floored_at_first_step() {
        let mut wizard = Wizard::new();
        wizard.back();
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::ClientDetails);
    }

    #[test]
    fn back_does_not_validate_or_clear_errors() {
        let mut wizard = Wizard::new();
        fill_client_details(&mut wizard);
        let wizard = expect_editing(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Services);

        let mut wizard = expect_editing(wizard.advance());
        assert!(wizard.errors().get(FormField::Services).is_some());

        wizard.back();
        assert_eq!(wizard.step(), WizardStep::ClientDetails);
        assert!(wizard.errors().get(FormField::Services).is_some());

        // Leaving step 1 again replaces the stale error map.
        let wizard = expect_editing(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Services);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn toggle_service_does_not_clear_services_error() {
        let mut wizard = Wizard::new();
        fill_client_details(&mut wizard);
        let wizard = expect_editing(wizard.advance());
        let mut wizard = expect_editing(wizard.advance());

        wizard.toggle_service(ServiceType::Gst);
        assert!(wizard.errors().get(FormField::Services).is_some());

        let wizard = expect_editing(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Communication);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn happy_path_submits_after_four_advances() {
        let mut wizard = Wizard::new();
        fill_client_details(&mut wizard);
        wizard.toggle_service(ServiceType::Gst);
        wizard.toggle_service(ServiceType::IncomeTax);
        wizard.set_field(FieldEdit::CommChannel(CommChannel::Email));
        wizard.set_field(FieldEdit::Language(Language::Telugu));

        let wizard = expect_editing(wizard.advance());
        let wizard = expect_editing(wizard.advance());
        let wizard = expect_editing(wizard.advance());
        assert_eq!(wizard.step(), WizardStep::Billing);

        let form = match wizard.advance() {
            Advance::Submitted(form) => form,
            other => panic!("expected Submitted, got {other:?}"),
        };
        assert_eq!(form.business_name, "Atreya Foods");
        assert_eq!(
            form.services,
            BTreeSet::from([ServiceType::Gst, ServiceType::IncomeTax])
        );
        assert_eq!(form.bank_name, "");
    }

    #[test]
    fn reducer_drives_the_same_transitions() {
        let actions = vec![
            WizardAction::SetField(FieldEdit::BusinessName("Krishna Tech".into())),
            WizardAction::SetField(FieldEdit::Pan("FGHIJ5678K".into())),
            WizardAction::SetField(FieldEdit::ContactPerson("Krishna M".into())),
            WizardAction::SetField(FieldEdit::Phone("9988776655".into())),
            WizardAction::SetField(FieldEdit::Email("info@krishnatech.in".into())),
            WizardAction::Advance,
            WizardAction::Back,
            WizardAction::Advance,
            WizardAction::ToggleService(ServiceType::Tds),
            WizardAction::Advance,
            WizardAction::Advance,
            WizardAction::Advance,
        ];

        let mut state = WizardState::Editing(Wizard::new());
        for action in actions {
            state = state.apply(action).unwrap();
        }

        match &state {
            WizardState::Submitted { form } => {
                assert_eq!(form.services, BTreeSet::from([ServiceType::Tds]));
            }
            WizardState::Editing(w) => panic!("still editing at {:?}", w.step()),
        }

        assert_eq!(
            state.apply(WizardAction::Back).unwrap_err(),
            WizardError::AlreadySubmitted
        );
    }

    #[test]
    fn step_numbers() {
        assert_eq!(WizardStep::try_from(3), Ok(WizardStep::Communication));
        assert_eq!(WizardStep::try_from(0), Err(InvalidStep(0)));
        assert_eq!(WizardStep::try_from(5), Err(InvalidStep(5)));
        assert_eq!(WizardStep::Billing.next(), None);
        assert_eq!(WizardStep::ClientDetails.previous(), None);
        assert_eq!(serde_json::to_value(WizardStep::Services).unwrap(), 2);
    }
}
