use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use super::AppState;
use crate::directory;
use crate::error::AppResult;
use crate::extractors::FormJson;
use crate::models::{CustomerListResponse, CustomerResource, RegistrationForm};
use crate::registration::{self, Outcome, RegistrationError};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Status for a registration outcome
///
/// A duplicate wins over a store failure, and both win over plain
/// validation errors.
pub fn outcome_status(outcome: &Outcome) -> StatusCode {
    let errors = outcome.errors();
    if outcome.is_success() {
        StatusCode::CREATED
    } else if errors
        .iter()
        .any(|e| matches!(e, RegistrationError::DuplicateIdentifier(_)))
    {
        StatusCode::CONFLICT
    } else if errors
        .iter()
        .any(|e| matches!(e, RegistrationError::StoreFailure(_)))
    {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

pub async fn register_customer(
    State(backend): State<AppState>,
    FormJson(form): FormJson<RegistrationForm>,
) -> Response {
    let outcome = registration::register(backend.as_ref(), &form).await;
    (outcome_status(&outcome), Json(outcome)).into_response()
}

pub async fn list_customers(
    State(backend): State<AppState>,
) -> AppResult<Json<CustomerListResponse>> {
    let customers = directory::list_customers(backend.as_ref()).await?;
    Ok(Json(CustomerListResponse::from_customers(customers)))
}

pub async fn search_customers(
    State(backend): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<CustomerListResponse>> {
    let term = params.q.unwrap_or_default();
    let customers = directory::search_customers(backend.as_ref(), &term).await?;
    Ok(Json(CustomerListResponse::from_customers(customers)))
}

pub async fn get_customer(
    State(backend): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<CustomerResource>> {
    let customer = directory::find_customer(backend.as_ref(), &identifier).await?;
    Ok(Json(customer.into()))
}
