//! Translation of an optional-field [`UserQuery`] into a conjunctive
//! equality predicate plus a pagination window.

use std::fmt;

use crate::contract::model::{User, UserQuery};
use crate::domain::error::DomainError;
use crate::domain::names::title_case;

pub const DEFAULT_PAGE: i64 = 1;

/// Filterable user attributes, in predicate order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Id,
    FirstName,
    LastName,
    Nickname,
    Email,
    Country,
}

impl UserField {
    /// Document key of the field in the `users` collection.
    pub fn key(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::FirstName => "first_name",
            UserField::LastName => "last_name",
            UserField::Nickname => "nickname",
            UserField::Email => "email",
            UserField::Country => "country",
        }
    }

    pub fn value_of<'a>(&self, user: &'a User) -> &'a str {
        match self {
            UserField::Id => &user.id,
            UserField::FirstName => &user.first_name,
            UserField::LastName => &user.last_name,
            UserField::Nickname => &user.nickname,
            UserField::Email => &user.email,
            UserField::Country => &user.country,
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// `field == value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub field: UserField,
    pub value: String,
}

/// Ordered conjunction of equality clauses. Empty matches everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFilter {
    clauses: Vec<Clause>,
}

impl UserFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and_eq(mut self, field: UserField, value: impl Into<String>) -> Self {
        self.clauses.push(Clause {
            field,
            value: value.into(),
        });
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the predicate against an in-memory record.
    pub fn matches(&self, user: &User) -> bool {
        self.clauses
            .iter()
            .all(|c| c.field.value_of(user) == c.value)
    }
}

impl fmt::Display for UserFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return f.write_str("{}");
        }
        let parts: Vec<String> = self
            .clauses
            .iter()
            .map(|c| format!("{}={:?}", c.field, c.value))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

/// Pagination window handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: u64,
    pub offset: u64,
}

/// Output of [`build`]: predicate, window and the normalised page/size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub filter: UserFilter,
    pub window: Window,
    pub page: u64,
    pub size: u64,
}

/// Build the store-level query. `page` defaults to 1 and `size` to
/// `default_size`; both must be >= 1 and `size` must not exceed `max_size`.
pub fn build(
    query: &UserQuery,
    default_size: u64,
    max_size: u64,
) -> Result<BuiltQuery, DomainError> {
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let size = match query.size {
        Some(size) => size,
        None => i64::try_from(default_size).map_err(|_| {
            DomainError::validation(
                "size",
                format!("default page size {} is out of range", default_size),
            )
        })?,
    };

    if page < 1 {
        return Err(DomainError::validation(
            "page",
            format!("must be >= 1 (got {})", page),
        ));
    }
    if size < 1 {
        return Err(DomainError::validation(
            "size",
            format!("must be >= 1 (got {})", size),
        ));
    }
    // both positive from here on
    let page = page as u64;
    let size = size as u64;
    if size > max_size {
        return Err(DomainError::validation(
            "size",
            format!("must be <= {} (got {})", max_size, size),
        ));
    }
    let offset = (page - 1).checked_mul(size).ok_or_else(|| {
        DomainError::validation("page", format!("page {} is out of range", page))
    })?;

    let mut filter = UserFilter::new();
    let fields = [
        (UserField::Id, &query.id),
        (UserField::FirstName, &query.first_name),
        (UserField::LastName, &query.last_name),
        (UserField::Nickname, &query.nickname),
        (UserField::Email, &query.email),
        (UserField::Country, &query.country),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            let value = match field {
                UserField::FirstName | UserField::LastName => title_case(value),
                _ => value.clone(),
            };
            filter = filter.and_eq(field, value);
        }
    }

    Ok(BuiltQuery {
        filter,
        window: Window {
            limit: size,
            offset,
        },
        page,
        size,
    })
}
