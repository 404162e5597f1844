// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! API boundary for the Lead Desk assignment engine.
//!
//! This crate sits between transport and the engine: it authenticates
//! callers, enforces who may do what, validates requests, and translates
//! engine and storage errors into a stable API error contract. It has no
//! knowledge of HTTP.

mod auth;
mod csv_import;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, authenticate_stub};
pub use csv_import::{
    CsvImportError, REQUIRED_COLUMNS, ingest_leads_csv, parse_leads_csv, validate_lead_records,
};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    ACTIVITY_FEED_LIMIT, DEFAULT_LANGUAGE, create_employee, create_lead, import_leads_csv,
    list_employees, list_leads, list_my_leads, list_scheduled_leads, my_activities,
    reassign_lead, recent_activities, set_employee_status, update_lead,
};
pub use request_response::{
    ActivityInfo, CreateEmployeeRequest, CreateEmployeeResponse, CreateLeadRequest,
    CreateLeadResponse, ImportFailureInfo, ImportLeadsResponse, LeadResponse,
    ListActivitiesResponse, ListEmployeesQuery, ListEmployeesResponse, ListLeadsQuery,
    ListLeadsResponse, ReassignLeadRequest, ScheduledLeadsQuery, SetEmployeeStatusRequest,
    SetEmployeeStatusResponse, UpdateLeadRequest,
};
