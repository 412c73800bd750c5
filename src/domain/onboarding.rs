//! Client onboarding draft and its validation rules
//!
//! The draft is filled in across four wizard steps. Only the first two steps
//! carry rules; communication preferences always have valid defaults and
//! billing details are optional.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::catalog::{Branch, ClientStatus, CommChannel, EntityType, Language, ServiceType};
use super::clients::Client;
use super::wizard::WizardStep;

static PAN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$").expect("PAN pattern is a valid regex")
});

/// Five uppercase letters, four digits, one uppercase letter. Case is not normalized.
pub fn is_valid_pan(pan: &str) -> bool {
    PAN_PATTERN.is_match(pan)
}

/// Name of a draft field, as used in edits and error maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    // Client details
    BusinessName,
    EntityType,
    Pan,
    Gstin,
    Branch,
    ContactPerson,
    Phone,
    Email,
    // Services
    Services,
    // Communication
    CommChannel,
    Language,
    AutoReminders,
    // Billing
    BankName,
    AccountNumber,
    Ifsc,
}

/// Onboarding draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingForm {
    pub business_name: String,
    pub entity_type: EntityType,
    pub pan: String,
    pub gstin: String,
    pub branch: Branch,
    pub contact_person: String,
    pub phone: String,
    pub email: String,

    pub services: BTreeSet<ServiceType>,

    pub comm_channel: CommChannel,
    pub language: Language,
    pub auto_reminders: bool,

    pub bank_name: String,
    pub account_number: String,
    pub ifsc: String,
}

impl Default for OnboardingForm {
    fn default() -> Self {
        Self {
            business_name: String::new(),
            entity_type: EntityType::default(),
            pan: String::new(),
            gstin: String::new(),
            branch: Branch::default(),
            contact_person: String::new(),
            phone: String::new(),
            email: String::new(),
            services: BTreeSet::new(),
            comm_channel: CommChannel::default(),
            language: Language::default(),
            auto_reminders: true,
            bank_name: String::new(),
            account_number: String::new(),
            ifsc: String::new(),
        }
    }
}

impl OnboardingForm {
    /// Assign one field. Never fails; validity is only judged per step.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::BusinessName(v) => self.business_name = v,
            FieldEdit::EntityType(v) => self.entity_type = v,
            FieldEdit::Pan(v) => self.pan = v,
            FieldEdit::Gstin(v) => self.gstin = v,
            FieldEdit::Branch(v) => self.branch = v,
            FieldEdit::ContactPerson(v) => self.contact_person = v,
            FieldEdit::Phone(v) => self.phone = v,
            FieldEdit::Email(v) => self.email = v,
            FieldEdit::Services(v) => self.services = v,
            FieldEdit::CommChannel(v) => self.comm_channel = v,
            FieldEdit::Language(v) => self.language = v,
            FieldEdit::AutoReminders(v) => self.auto_reminders = v,
            FieldEdit::BankName(v) => self.bank_name = v,
            FieldEdit::AccountNumber(v) => self.account_number = v,
            FieldEdit::Ifsc(v) => self.ifsc = v,
        }
    }

    /// Add the service if absent, remove it if present.
    pub fn toggle_service(&mut self, service: ServiceType) {
        if !self.services.remove(&service) {
            self.services.insert(service);
        }
    }

    /// Build the client record for a submitted draft.
    pub fn to_client(&self, id: impl Into<String>) -> Client {
        let gstin = self.gstin.trim();
        Client {
            id: id.into(),
            name: self.business_name.trim().to_string(),
            pan: self.pan.clone(),
            gstin: (!gstin.is_empty()).then(|| gstin.to_string()),
            branch: self.branch,
            contact_person: self.contact_person.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            status: ClientStatus::Active,
        }
    }
}

/// A single field assignment, with the value typed per field.
///
/// Serialized as `{"field": "pan", "value": "ABCDE1234F"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum FieldEdit {
    BusinessName(String),
    EntityType(EntityType),
    Pan(String),
    Gstin(String),
    Branch(Branch),
    ContactPerson(String),
    Phone(String),
    Email(String),
    Services(BTreeSet<ServiceType>),
    CommChannel(CommChannel),
    Language(Language),
    AutoReminders(bool),
    BankName(String),
    AccountNumber(String),
    Ifsc(String),
}

impl FieldEdit {
    pub fn field(&self) -> FormField {
        match self {
            Self::BusinessName(_) => FormField::BusinessName,
            Self::EntityType(_) => FormField::EntityType,
            Self::Pan(_) => FormField::Pan,
            Self::Gstin(_) => FormField::Gstin,
            Self::Branch(_) => FormField::Branch,
            Self::ContactPerson(_) => FormField::ContactPerson,
            Self::Phone(_) => FormField::Phone,
            Self::Email(_) => FormField::Email,
            Self::Services(_) => FormField::Services,
            Self::CommChannel(_) => FormField::CommChannel,
            Self::Language(_) => FormField::Language,
            Self::AutoReminders(_) => FormField::AutoReminders,
            Self::BankName(_) => FormField::BankName,
            Self::AccountNumber(_) => FormField::AccountNumber,
            Self::Ifsc(_) => FormField::Ifsc,
        }
    }
}

/// Field-scoped validation messages. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FormField) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = FormField> + '_ {
        self.0.keys().copied()
    }
}

/// Business name is the only field judged after trimming; the rest are presence checks.
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate one step of the draft. Pure; only that step's fields are checked.
pub fn validate_step(form: &OnboardingForm, step: WizardStep) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match step {
        WizardStep::ClientDetails => {
            if is_blank(&form.business_name) {
                errors.insert(FormField::BusinessName, "Business name is required");
            }
            if form.pan.is_empty() {
                errors.insert(FormField::Pan, "PAN is required");
            } else if !is_valid_pan(&form.pan) {
                errors.insert(FormField::Pan, "Invalid PAN format");
            }
            if form.contact_person.is_empty() {
                errors.insert(FormField::ContactPerson, "Contact person is required");
            }
            if form.phone.is_empty() {
                errors.insert(FormField::Phone, "Phone is required");
            }
            if form.email.is_empty() {
                errors.insert(FormField::Email, "Email is required");
            }
        }
        WizardStep::Services => {
            if form.services.is_empty() {
                errors.insert(FormField::Services, "Please select at least one service");
            }
        }
        WizardStep::Communication | WizardStep::Billing => {}
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_client_details() -> OnboardingForm {
        OnboardingForm {
            business_name: "Godavari Exports".into(),
            pan: "KLMNO9012P".into(),
            contact_person: "Suresh Reddy".into(),
            phone: "9123456789".into(),
            email: "suresh@godavari.ex".into(),
            ..Default::default()
        }
    }

    #[test]
    fn pan_pattern() {
        assert!(is_valid_pan("ABCDE1234F"));
        assert!(!is_valid_pan("abcde1234f"));
        assert!(!is_valid_pan("ABCDE123F"));
        assert!(!is_valid_pan("ABCDE1234FG"));
        assert!(!is_valid_pan(" ABCDE1234F"));
    }

    #[test]
    fn empty_pan_is_required_not_malformed() {
        let form = OnboardingForm {
            pan: String::new(),
            ..filled_client_details()
        };
        let errors = validate_step(&form, WizardStep::ClientDetails);
        assert_eq!(errors.get(FormField::Pan), Some("PAN is required"));
    }

    #[test]
    fn lowercase_and_short_pan_are_malformed() {
        for pan in ["abcde1234f", "ABCDE123F"] {
            let form = OnboardingForm {
                pan: pan.into(),
                ..filled_client_details()
            };
            let errors = validate_step(&form, WizardStep::ClientDetails);
            assert_eq!(errors.get(FormField::Pan), Some("Invalid PAN format"), "{pan}");
            assert_eq!(errors.len(), 1);
        }
    }

    #[test]
    fn blank_draft_fails_every_required_client_field() {
        let errors = validate_step(&OnboardingForm::default(), WizardStep::ClientDetails);
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(
            fields,
            vec![
                FormField::BusinessName,
                FormField::Pan,
                FormField::ContactPerson,
                FormField::Phone,
                FormField::Email,
            ]
        );
    }

    #[test]
    fn whitespace_business_name_is_blank() {
        let form = OnboardingForm {
            business_name: "   ".into(),
            ..filled_client_details()
        };
        let errors = validate_step(&form, WizardStep::ClientDetails);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::BusinessName]);
    }

    #[test]
    fn whitespace_pan_is_present_but_malformed() {
        let form = OnboardingForm {
            pan: "   ".into(),
            contact_person: " ".into(),
            phone: " ".into(),
            ..filled_client_details()
        };
        let errors = validate_step(&form, WizardStep::ClientDetails);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![FormField::Pan]);
        assert_eq!(errors.get(FormField::Pan), Some("Invalid PAN format"));
    }

    #[test]
    fn email_and_phone_are_presence_checked_only() {
        let form = OnboardingForm {
            phone: "call me".into(),
            email: "not-an-email".into(),
            ..filled_client_details()
        };
        assert!(validate_step(&form, WizardStep::ClientDetails).is_empty());
    }

    #[test]
    fn services_step_needs_one_service() {
        let mut form = filled_client_details();
        let errors = validate_step(&form, WizardStep::Services);
        assert_eq!(
            errors.get(FormField::Services),
            Some("Please select at least one service")
        );

        form.toggle_service(ServiceType::Gst);
        assert!(validate_step(&form, WizardStep::Services).is_empty());
    }

    #[test]
    fn later_steps_are_always_valid() {
        let form = OnboardingForm::default();
        assert!(validate_step(&form, WizardStep::Communication).is_empty());
        assert!(validate_step(&form, WizardStep::Billing).is_empty());
    }

    #[test]
    fn validation_is_scoped_to_the_step() {
        // Invalid client details do not leak into the services step.
        let mut form = OnboardingForm::default();
        form.toggle_service(ServiceType::Tds);
        assert!(validate_step(&form, WizardStep::Services).is_empty());
    }

    #[test]
    fn toggle_is_symmetric() {
        let mut form = OnboardingForm::default();
        form.toggle_service(ServiceType::Gst);
        form.toggle_service(ServiceType::Roc);
        form.toggle_service(ServiceType::Gst);
        assert_eq!(form.services, BTreeSet::from([ServiceType::Roc]));
    }

    #[test]
    fn field_edit_wire_format() {
        let edit: FieldEdit =
            serde_json::from_value(serde_json::json!({"field": "pan", "value": "ABCDE1234F"}))
                .unwrap();
        assert_eq!(edit, FieldEdit::Pan("ABCDE1234F".into()));
        assert_eq!(edit.field(), FormField::Pan);

        let edit: FieldEdit = serde_json::from_value(
            serde_json::json!({"field": "services", "value": ["GST", "Tax Audit"]}),
        )
        .unwrap();
        assert_eq!(
            edit,
            FieldEdit::Services(BTreeSet::from([ServiceType::Gst, ServiceType::TaxAudit]))
        );
    }

    #[test]
    fn field_edit_rejects_unknown_values() {
        let bad_branch =
            serde_json::from_value::<FieldEdit>(serde_json::json!({"field": "branch", "value": "Hyderabad"}));
        assert!(bad_branch.is_err());

        let bad_field =
            serde_json::from_value::<FieldEdit>(serde_json::json!({"field": "nickname", "value": "x"}));
        assert!(bad_field.is_err());
    }

    #[test]
    fn submitted_draft_becomes_active_client() {
        let mut form = filled_client_details();
        form.gstin = "  ".into();
        form.branch = Branch::Amalapuram;

        let client = form.to_client("c9");
        assert_eq!(client.id, "c9");
        assert_eq!(client.name, "Godavari Exports");
        assert_eq!(client.gstin, None);
        assert_eq!(client.branch, Branch::Amalapuram);
        assert_eq!(client.status, ClientStatus::Active);
    }

    #[test]
    fn error_map_serializes_with_field_names() {
        let mut errors = FieldErrors::new();
        errors.insert(FormField::ContactPerson, "Contact person is required");
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({"contactPerson": "Contact person is required"})
        );
    }
}
