use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use common::types::Health;
use models::user;
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::state::UsersState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
}

pub async fn healthz(State(state): State<UsersState>) -> Result<Json<Health>, JsonApiError> {
    match service::users::ping(&state.db).await {
        Ok(true) => Ok(Json(Health { status: "ok" })),
        Ok(false) => Ok(Json(Health { status: "error" })),
        Err(e) => {
            error!(err = %e, "health check failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Health Check Failed", Some(e.to_string())))
        }
    }
}

pub async fn create(
    State(state): State<UsersState>,
    payload: Result<Json<CreateUserInput>, JsonRejection>,
) -> Result<Json<user::Model>, JsonApiError> {
    let Json(input) = payload
        .map_err(|e| JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.body_text())))?;

    match service::users::create_user(&state.db, &input.name, &input.email).await {
        Ok(u) => {
            info!(id = %u.id, "created user");
            Ok(Json(u))
        }
        Err(e @ ServiceError::Model(_)) => {
            Err(JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())))
        }
        Err(e) => {
            error!(err = %e, "create user failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Create Failed", Some(e.to_string())))
        }
    }
}

pub async fn list(State(state): State<UsersState>) -> Result<Json<Vec<user::Model>>, JsonApiError> {
    match service::users::list_users(&state.db).await {
        Ok(users) => {
            info!(count = users.len(), "list users");
            Ok(Json(users))
        }
        Err(e) => {
            error!(err = %e, "list users failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "List Failed", Some(e.to_string())))
        }
    }
}
