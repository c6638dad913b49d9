use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::Json,
    Extension,
};
use tracing::{error, info};

use crate::api::rest::dto::{
    CreateUserReq, HealthDto, IdResponse, ListUsersQuery, UpdateUserReq, UserDto, UserListDto,
};
use crate::api::rest::error::map_domain_error;
use crate::api::rest::problem::ProblemResponse;
use crate::contract::error::Status;
use crate::domain::service::Service;

/// Create a new user
pub async fn create_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Json(req_body): Json<CreateUserReq>,
) -> Result<(StatusCode, Json<IdResponse>), ProblemResponse> {
    info!(email = %req_body.email, "Creating user");

    match svc.create(req_body.into()).await {
        Ok(id) => Ok((StatusCode::CREATED, Json(IdResponse::ok(id)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Replace a user's fields
pub async fn update_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    Json(req_body): Json<UpdateUserReq>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Updating user {}", id);

    match svc.update(req_body.into_update(id.clone())).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a user
pub async fn delete_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> Result<Json<IdResponse>, ProblemResponse> {
    info!("Deleting user {}", id);

    match svc.delete(&id).await {
        Ok(id) => Ok(Json(IdResponse::ok(id))),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn query_users(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UserListDto>, ProblemResponse> {
    info!("Querying users with {:?}", query);

    match svc.query(query.into()).await {
        Ok(page) => Ok(Json(UserListDto::from(page))),
        Err(e) => {
            error!("Failed to query users: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn health(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
) -> Result<Json<HealthDto>, ProblemResponse> {
    match svc.health_check().await {
        Ok(()) => Ok(Json(HealthDto {
            status: Status::Ok.as_str().to_string(),
        })),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}
