use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::error::Status;
use crate::contract::model::{NewUser, User, UserPage, UserQuery, UserUpdate};

/// REST DTO for user representation. The password hash never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub email: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CreateUserReq {
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub password: String,
    pub email: String,
    pub country: String,
}

/// REST DTO for updating a user. The id comes from the path.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UpdateUserReq {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    /// Omitted or empty keeps the stored hash.
    pub password: Option<String>,
    pub email: String,
    pub country: String,
}

/// REST DTO for query-string filters and paging
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListUsersQuery {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Acknowledgement for create and delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse {
    pub status: String,
    pub id: String,
}

impl IdResponse {
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            status: Status::Ok.as_str().to_string(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub size: u64,
    pub total: u64,
}

/// REST DTO for user list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListDto {
    pub items: Vec<UserDto>,
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            nickname: user.nickname,
            email: user.email,
            country: user.country,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            id: req.id,
            first_name: req.first_name,
            last_name: req.last_name,
            nickname: req.nickname,
            password: req.password,
            email: req.email,
            country: req.country,
        }
    }
}

impl UpdateUserReq {
    pub fn into_update(self, id: String) -> UserUpdate {
        UserUpdate {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            nickname: self.nickname,
            password: self.password,
            email: self.email,
            country: self.country,
        }
    }
}

impl From<ListUsersQuery> for UserQuery {
    fn from(q: ListUsersQuery) -> Self {
        Self {
            id: q.id,
            first_name: q.first_name,
            last_name: q.last_name,
            nickname: q.nickname,
            email: q.email,
            country: q.country,
            page: q.page,
            size: q.size,
        }
    }
}

impl From<UserPage> for UserListDto {
    fn from(page: UserPage) -> Self {
        Self {
            meta: PageMeta {
                page: page.page,
                size: page.size,
                total: page.total,
            },
            items: page.items.into_iter().map(UserDto::from).collect(),
        }
    }
}
