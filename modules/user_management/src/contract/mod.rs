pub mod client;
pub mod error;
pub mod model;

pub use client::UserManagementApi;
pub use error::{Status, UserManagementError};
pub use model::{NewUser, User, UserPage, UserQuery, UserUpdate};
