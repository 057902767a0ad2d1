//! # API REST
//!
//! REST API implementation for VisitLog.
//!
//! Handles:
//! - HTTP endpoints with axum (entry form, submit, dashboard, JSON listing)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (form decoding, HTML assembly, CORS)
//!
//! All visit data operations go through `visitlog-core`; chart markup comes
//! from `visitlog-chart`.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{Form, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;
use visitlog_chart::{bar_chart, Bar};
use visitlog_core::{aggregate, filter, VisitFilter, VisitRecord, VisitStore, ALL_SENTINEL};

pub mod pages;

/// Application state shared across REST API handlers.
///
/// Holds the `VisitStore` every endpoint reads from or appends to.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<VisitStore>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, index, add_patient, dashboard, list_visits),
    components(schemas(HealthRes, AddPatientForm, Visit, ListVisitsRes))
)]
struct ApiDoc;

/// Health check response body.
#[derive(Serialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Form fields accepted by `POST /add_patient`.
///
/// All fields are required; the `age` field is stored verbatim as the
/// record's `age_group` with no bucketing.
#[derive(Deserialize, ToSchema)]
pub struct AddPatientForm {
    pub appointment_date: Option<String>,
    pub patient_id: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub diagnosis: Option<String>,
}

impl AddPatientForm {
    /// Converts the submission into a record, failing fast with a 400
    /// response naming the first missing or blank field.
    fn into_record(self) -> Result<VisitRecord, (StatusCode, &'static str)> {
        Ok(VisitRecord {
            appointment_date: required(
                self.appointment_date,
                "missing form field: appointment_date",
            )?,
            patient_id: required(self.patient_id, "missing form field: patient_id")?,
            age_group: required(self.age, "missing form field: age")?,
            gender: required(self.gender, "missing form field: gender")?,
            diagnosis: required(self.diagnosis, "missing form field: diagnosis")?,
        })
    }
}

fn required(
    value: Option<String>,
    missing: &'static str,
) -> Result<String, (StatusCode, &'static str)> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err((StatusCode::BAD_REQUEST, missing)),
    }
}

/// Dashboard and listing filter parameters.
///
/// Absent values and the sentinel `all` both mean "no constraint"; any other
/// value must match the record field exactly. Unknown values are not an
/// error, they simply match nothing.
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FilterParams {
    pub age_group: Option<String>,
    pub gender: Option<String>,
}

impl FilterParams {
    fn to_filter(&self) -> VisitFilter {
        VisitFilter {
            age_group: self.age_group.clone(),
            gender: self.gender.clone(),
        }
    }
}

/// One visit record as returned by the JSON listing endpoint.
#[derive(Serialize, ToSchema)]
pub struct Visit {
    pub appointment_date: String,
    pub patient_id: String,
    pub age_group: String,
    pub gender: String,
    pub diagnosis: String,
}

impl From<VisitRecord> for Visit {
    fn from(r: VisitRecord) -> Self {
        Self {
            appointment_date: r.appointment_date,
            patient_id: r.patient_id,
            age_group: r.age_group,
            gender: r.gender,
            diagnosis: r.diagnosis,
        }
    }
}

/// Response body of `GET /api/visits`.
#[derive(Serialize, ToSchema)]
pub struct ListVisitsRes {
    pub visits: Vec<Visit>,
}

/// Builds the VisitLog REST router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add_patient", post(add_patient))
        .route("/dashboard", get(dashboard))
        .route("/health", get(health))
        .route("/api/visits", get(list_visits))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancer probes.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "VisitLog REST API is alive".into(),
    })
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Visit entry form", body = String, content_type = "text/html")
    )
)]
/// Serves the static visit entry form.
#[axum::debug_handler]
async fn index() -> Html<&'static str> {
    Html(pages::INDEX_HTML)
}

#[utoipa::path(
    post,
    path = "/add_patient",
    request_body(
        content = AddPatientForm,
        content_type = "application/x-www-form-urlencoded"
    ),
    responses(
        (status = 302, description = "Visit recorded, redirect to dashboard"),
        (status = 400, description = "Missing or blank form field"),
        (status = 500, description = "Internal server error")
    )
)]
/// Appends one visit record from a form submission.
///
/// On success responds `302 Found` pointing at the dashboard, matching what
/// a browser form expects. A missing or blank field is rejected with a 400
/// naming the field; store failures surface as 500 and the record is not
/// saved.
#[axum::debug_handler]
async fn add_patient(
    State(state): State<AppState>,
    Form(form): Form<AddPatientForm>,
) -> Result<impl IntoResponse, (StatusCode, &'static str)> {
    let record = form.into_record()?;

    match state.store.append(record) {
        Ok(()) => Ok((StatusCode::FOUND, [(header::LOCATION, "/dashboard")])),
        Err(e) => {
            tracing::error!("Append visit error: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal error"))
        }
    }
}

#[utoipa::path(
    get,
    path = "/dashboard",
    params(FilterParams),
    responses(
        (status = 200, description = "Dashboard page with diagnosis bar chart", body = String, content_type = "text/html"),
        (status = 500, description = "Internal server error")
    )
)]
/// Renders the diagnosis dashboard.
///
/// Loads the full record set, narrows it by the requested filters, counts
/// diagnoses, and embeds the resulting bar chart in an HTML page. An empty
/// result renders a placeholder chart, never an error.
#[axum::debug_handler]
async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let records = state.store.load().map_err(|e| {
        tracing::error!("Load visits error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    })?;

    let narrowed = filter(records, &params.to_filter());
    let series = aggregate(&narrowed);

    let age_group = params.age_group.as_deref().unwrap_or(ALL_SENTINEL);
    let gender = params.gender.as_deref().unwrap_or(ALL_SENTINEL);
    let title = format!(
        "Number of Patients Admitted for Each Diagnosis (Age Group: {age_group}, Gender: {gender})"
    );

    let bars: Vec<Bar> = series
        .into_iter()
        .map(|d| Bar {
            label: d.diagnosis,
            value: d.count,
        })
        .collect();
    let chart_svg = bar_chart(&title, &bars);

    Ok(Html(pages::dashboard_page(age_group, gender, &chart_svg)))
}

#[utoipa::path(
    get,
    path = "/api/visits",
    params(FilterParams),
    responses(
        (status = 200, description = "Filtered visit records", body = ListVisitsRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Lists visit records as JSON, narrowed by the same filters as the dashboard.
#[axum::debug_handler]
async fn list_visits(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<ListVisitsRes>, (StatusCode, &'static str)> {
    let records = state.store.load().map_err(|e| {
        tracing::error!("Load visits error: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    })?;

    let visits = filter(records, &params.to_filter())
        .into_iter()
        .map(Visit::from)
        .collect();

    Ok(Json(ListVisitsRes { visits }))
}
