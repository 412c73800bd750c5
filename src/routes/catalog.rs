//! Reference value routes
//!
//! Fixed lists the dashboard uses to build its selectors, in canonical order.

use axum::response::IntoResponse;
use serde::Serialize;

use crate::api::DataResponse;
use crate::domain::tasks::BOARD_COLUMNS;
use crate::domain::wizard::WizardStep;
use crate::domain::{
    Branch, CommChannel, EntityType, Language, Priority, ServiceType, TaskStatus,
};

#[derive(Debug, Serialize)]
pub struct StepInfo {
    pub number: u8,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub branches: &'static [Branch],
    pub services: &'static [ServiceType],
    pub statuses: &'static [TaskStatus],
    pub priorities: &'static [Priority],
    pub entity_types: &'static [EntityType],
    pub comm_channels: &'static [CommChannel],
    pub languages: &'static [Language],
    pub board_columns: &'static [TaskStatus],
    pub wizard_steps: Vec<StepInfo>,
}

pub fn catalog() -> Catalog {
    Catalog {
        branches: Branch::ALL,
        services: ServiceType::ALL,
        statuses: TaskStatus::ALL,
        priorities: Priority::ALL,
        entity_types: EntityType::ALL,
        comm_channels: CommChannel::ALL,
        languages: Language::ALL,
        board_columns: BOARD_COLUMNS,
        wizard_steps: WizardStep::ALL
            .iter()
            .map(|&step| StepInfo {
                number: step.number(),
                title: step.title(),
                description: step.description(),
            })
            .collect(),
    }
}

/// GET /catalog
pub async fn get_catalog() -> impl IntoResponse {
    DataResponse::new(catalog())
}
