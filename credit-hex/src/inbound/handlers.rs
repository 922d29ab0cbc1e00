//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use credit_types::{
    AppError, CreateCreditRequest, CreateCustomerRequest, CreditCode, CreditRepository,
    CreditSummary, CreditView, CustomerId, CustomerQuery, CustomerRepository, CustomerView,
    UpdateCustomerRequest,
};

use super::extract::{ApiJson, ApiQuery};
use crate::{CreditService, CustomerService};

/// Application state shared across handlers.
pub struct AppState<C: CustomerRepository, K: CreditRepository> {
    pub customers: CustomerService<C>,
    pub credits: CreditService<K>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Business(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

fn parse_customer_id(raw: &str) -> Result<CustomerId, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest("Invalid customer ID".into()))
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// Register a customer.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn create_customer<C: CustomerRepository, K: CreditRepository>(
    State(state): State<Arc<AppState<C, K>>>,
    ApiJson(req): ApiJson<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer = req.into_domain().map_err(AppError::from)?;
    let saved = state.customers.save(customer).await?;
    let view = CustomerView::try_from(saved).map_err(AppError::from)?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Get customer by ID.
#[tracing::instrument(skip(state), fields(customer_id = %id))]
pub async fn get_customer<C: CustomerRepository, K: CreditRepository>(
    State(state): State<Arc<AppState<C, K>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = parse_customer_id(&id)?;

    let customer = state.customers.find_by_id(customer_id).await?;
    let view = CustomerView::try_from(customer).map_err(AppError::from)?;
    Ok(Json(view))
}

/// Update the mutable fields of a customer.
#[tracing::instrument(skip(state, req), fields(customer_id = %id))]
pub async fn update_customer<C: CustomerRepository, K: CreditRepository>(
    State(state): State<Arc<AppState<C, K>>>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let customer_id = parse_customer_id(&id)?;

    let customer = state.customers.update(customer_id, req).await?;
    let view = CustomerView::try_from(customer).map_err(AppError::from)?;
    Ok(Json(view))
}

// ─────────────────────────────────────────────────────────────────────────────
// Credits
// ─────────────────────────────────────────────────────────────────────────────

/// Open a credit for an existing customer.
#[tracing::instrument(skip(state), fields(customer_id = %req.customer_id))]
pub async fn create_credit<C: CustomerRepository, K: CreditRepository>(
    State(state): State<Arc<AppState<C, K>>>,
    ApiJson(req): ApiJson<CreateCreditRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate(chrono::Utc::now().date_naive())
        .map_err(AppError::from)?;

    let owner = state.customers.find_by_id(req.customer_id).await?;
    let credit = req.into_domain(&owner).map_err(AppError::from)?;
    let credit = state.credits.save(credit).await?;

    tracing::info!(credit_code = %credit.credit_code, "credit saved");
    Ok((StatusCode::CREATED, Json(CreditView::new(&credit, &owner))))
}

/// List the credits of a customer.
#[tracing::instrument(skip(state), fields(customer_id = %query.customer_id))]
pub async fn list_credits<C: CustomerRepository, K: CreditRepository>(
    State(state): State<Arc<AppState<C, K>>>,
    ApiQuery(query): ApiQuery<CustomerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let credits = state.credits.find_all_by_customer(query.customer_id).await?;
    let summaries: Vec<CreditSummary> = credits.iter().map(CreditSummary::from).collect();
    Ok(Json(summaries))
}

/// Get one credit of a customer by its code.
#[tracing::instrument(skip(state), fields(credit_code = %code, customer_id = %query.customer_id))]
pub async fn get_credit<C: CustomerRepository, K: CreditRepository>(
    State(state): State<Arc<AppState<C, K>>>,
    Path(code): Path<String>,
    ApiQuery(query): ApiQuery<CustomerQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let credit_code: CreditCode = code
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid credit code".into()))?;

    let credit = state
        .credits
        .find_by_credit_code(query.customer_id, credit_code)
        .await?;
    let owner = state.customers.find_by_id(credit.customer_id).await?;
    Ok(Json(CreditView::new(&credit, &owner)))
}
