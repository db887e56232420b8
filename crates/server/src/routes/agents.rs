use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use common::types::Health;
use models::agent;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::state::AgentsState;

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateAgentInput {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub rank: i32,
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateAgentInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    // Historically clients sent rank as text; accept both spellings.
    #[serde(default, deserialize_with = "rank_lenient")]
    pub rank: Option<i32>,
}

fn rank_lenient<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RankField {
        Int(i32),
        Text(String),
    }

    match Option::<RankField>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RankField::Int(n)) => Ok(Some(n)),
        Some(RankField::Text(s)) => s
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| D::Error::custom("rank must be an integer")),
    }
}

fn bad_request(detail: String) -> JsonApiError {
    JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(detail))
}

#[utoipa::path(
    get, path = "/healthz", tag = "health",
    responses(
        (status = 200, description = "Storage reachable"),
        (status = 500, description = "Storage unreachable")
    )
)]
pub async fn healthz(State(state): State<AgentsState>) -> Result<Json<Health>, JsonApiError> {
    match state.dal.health_check().await {
        Ok(true) => Ok(Json(Health { status: "ok" })),
        Ok(false) => Ok(Json(Health { status: "error" })),
        Err(e) => {
            error!(err = %e, "health check failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Health Check Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    post, path = "/agents", tag = "agents",
    request_body = CreateAgentInput,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation error or duplicate id")
    )
)]
pub async fn create(
    State(state): State<AgentsState>,
    payload: Result<Json<CreateAgentInput>, JsonRejection>,
) -> Result<(StatusCode, Json<agent::Model>), JsonApiError> {
    // Shape failures are rejected before any storage round-trip.
    let Json(input) = payload.map_err(|e| bad_request(e.body_text()))?;

    match state
        .dal
        .create(input.id, &input.first_name, &input.last_name, &input.phone_number, input.rank)
        .await
    {
        Ok(m) => {
            info!(id = m.id, "created agent");
            Ok((StatusCode::CREATED, Json(m)))
        }
        Err(e @ (ServiceError::Duplicate(_) | ServiceError::Model(_))) => {
            Err(bad_request(e.to_string()))
        }
        Err(e) => {
            error!(err = %e, "create agent failed");
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Create Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/agents", tag = "agents",
    responses(
        (status = 200, description = "All agents, ascending by id"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list(State(state): State<AgentsState>) -> Result<Json<Vec<agent::Model>>, JsonApiError> {
    match state.dal.list().await {
        Ok(agents) => {
            info!(count = agents.len(), "list agents");
            Ok(Json(agents))
        }
        Err(e) => {
            error!(err = %e, "list agents failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    get, path = "/agents/{id}", tag = "agents",
    params(("id" = i64, Path, description = "Agent id")),
    responses(
        (status = 200, description = "OK"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get(
    State(state): State<AgentsState>,
    Path(id): Path<i64>,
) -> Result<Json<agent::Model>, JsonApiError> {
    match state.dal.get(id).await {
        Ok(Some(m)) => Ok(Json(m)),
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("agent {id} not found")))),
        Err(e) => {
            error!(err = %e, "get agent failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Get Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    put, path = "/agents/{id}", tag = "agents",
    params(("id" = i64, Path, description = "Agent id")),
    request_body = UpdateAgentInput,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update(
    State(state): State<AgentsState>,
    Path(id): Path<i64>,
    payload: Result<Json<UpdateAgentInput>, JsonRejection>,
) -> Result<Json<agent::Model>, JsonApiError> {
    let Json(input) = payload.map_err(|e| bad_request(e.body_text()))?;

    match state
        .dal
        .update(
            id,
            input.first_name.as_deref(),
            input.last_name.as_deref(),
            input.phone_number.as_deref(),
            input.rank,
        )
        .await
    {
        Ok(Some(m)) => {
            info!(id = m.id, "updated agent");
            Ok(Json(m))
        }
        Ok(None) => Err(JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("agent {id} not found")))),
        Err(e @ ServiceError::Model(_)) => Err(bad_request(e.to_string())),
        Err(e) => {
            error!(err = %e, "update agent failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Update Failed", Some(e.to_string())))
        }
    }
}

#[utoipa::path(
    delete, path = "/agents/{id}", tag = "agents",
    params(("id" = i64, Path, description = "Agent id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn delete(State(state): State<AgentsState>, Path(id): Path<i64>) -> StatusCode {
    match state.dal.delete(id).await {
        Ok(true) => {
            info!(id, "deleted agent");
            StatusCode::NO_CONTENT
        }
        Ok(false) => StatusCode::NOT_FOUND,
        Err(e) => {
            error!(err = %e, "delete agent failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
