//! Back office for an accounting and compliance firm.
//!
//! Client directory, compliance task board, client onboarding wizard and
//! dashboard aggregates, served as a JSON API.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod routes;
pub mod services;
