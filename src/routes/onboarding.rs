//! Client onboarding routes
//!
//! One wizard session per onboarding. Validation failures come back as data
//! with a 200; only unknown sessions, bad steps and out-of-catalog values are
//! errors.

use anyhow::anyhow;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{Created, DataResponse, NoContent};
use crate::app::AppState;
use crate::domain::onboarding::{FieldEdit, FieldErrors, OnboardingForm};
use crate::domain::wizard::{Wizard, WizardAction, WizardStep};
use crate::domain::{Client, ServiceType};
use crate::error::{ApiError, ApiResult};
use crate::services::SessionOutcome;

/// Session as seen by the dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub session_id: Uuid,
    pub step_title: &'static str,
    #[serde(flatten)]
    pub wizard: Wizard,
}

impl WizardView {
    fn new(session_id: Uuid, wizard: Wizard) -> Self {
        Self {
            session_id,
            step_title: wizard.step().title(),
            wizard,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceResponse {
    /// The step has errors and did not change
    Blocked { session: WizardView },
    Advanced { session: WizardView },
    Submitted { form: OnboardingForm, client: Client },
}

#[derive(Debug, Deserialize)]
pub struct ToggleServiceRequest {
    pub service: String,
}

#[derive(Debug, Serialize)]
pub struct StepValidation {
    pub step: WizardStep,
    pub valid: bool,
    pub errors: FieldErrors,
}

/// Decode a JSON body so that every failure answers with the API error shape.
///
/// Unparseable JSON is a 400; well-formed JSON of the wrong shape is a 422.
fn decode_body<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
    what: &str,
) -> ApiResult<T> {
    let Json(value) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    serde_json::from_value(value).map_err(|e| ApiError::invalid_value(format!("Invalid {what}: {e}")))
}

fn editing(session_id: Uuid, outcome: SessionOutcome) -> ApiResult<WizardView> {
    match outcome {
        SessionOutcome::Editing(wizard) => Ok(WizardView::new(session_id, wizard)),
        SessionOutcome::Submitted { .. } => Err(ApiError::Internal(anyhow!(
            "onboarding session {session_id} submitted by a non-advance action"
        ))),
    }
}

/// POST /onboarding
///
/// Open a wizard with a blank draft on step 1.
pub async fn open_session(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let (session_id, wizard) = state.sessions.open()?;
    Ok(Created(WizardView::new(session_id, wizard)))
}

/// GET /onboarding/:session_id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let wizard = state.sessions.get(session_id)?;
    Ok(DataResponse::new(WizardView::new(session_id, wizard)))
}

/// PATCH /onboarding/:session_id
///
/// Body: `{"field": "<name>", "value": ...}`. Clears that field's error.
pub async fn set_field(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let edit: FieldEdit = decode_body(body, "field edit")?;

    let outcome = state
        .sessions
        .apply(session_id, WizardAction::SetField(edit))?;
    Ok(DataResponse::new(editing(session_id, outcome)?))
}

/// POST /onboarding/:session_id/services/toggle
pub async fn toggle_service(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let req: ToggleServiceRequest = decode_body(body, "toggle request")?;
    let service: ServiceType = req.service.parse()?;

    let outcome = state
        .sessions
        .apply(session_id, WizardAction::ToggleService(service))?;
    Ok(DataResponse::new(editing(session_id, outcome)?))
}

/// GET /onboarding/:session_id/steps/:step/validation
///
/// Errors the step would produce right now. The session is not changed.
pub async fn validate_step(
    State(state): State<Arc<AppState>>,
    Path((session_id, step)): Path<(Uuid, u8)>,
) -> ApiResult<impl IntoResponse> {
    let step = WizardStep::try_from(step)?;
    let errors = state.sessions.validate(session_id, step)?;
    Ok(DataResponse::new(StepValidation {
        step,
        valid: errors.is_empty(),
        errors,
    }))
}

/// POST /onboarding/:session_id/advance
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let response = match state.sessions.apply(session_id, WizardAction::Advance)? {
        SessionOutcome::Editing(wizard) if !wizard.errors().is_empty() => AdvanceResponse::Blocked {
            session: WizardView::new(session_id, wizard),
        },
        SessionOutcome::Editing(wizard) => AdvanceResponse::Advanced {
            session: WizardView::new(session_id, wizard),
        },
        SessionOutcome::Submitted { form, client } => AdvanceResponse::Submitted { form, client },
    };
    Ok(DataResponse::new(response))
}

/// POST /onboarding/:session_id/back
pub async fn back(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let outcome = state.sessions.apply(session_id, WizardAction::Back)?;
    Ok(DataResponse::new(editing(session_id, outcome)?))
}

/// DELETE /onboarding/:session_id
pub async fn abandon(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    state.sessions.abandon(session_id)?;
    Ok(NoContent)
}
