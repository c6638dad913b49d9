//! SeaORM-backed repository implementation for the domain port.
//!
//! Each user document maps onto one row of the `users` table; the equality
//! predicate becomes a `Condition::all()` of column comparisons.

use anyhow::Context;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectOptions, Database, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Set,
};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::contract::model::User;
use crate::domain::query::{UserFilter, Window};
use crate::domain::repo::{QueryPage, UserChanges, UsersRepository};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};
use crate::infra::storage::migrations::Migrator;

/// SeaORM repository impl.
/// Holds a pooled connection handle (cheap to clone).
#[derive(Clone)]
pub struct SeaOrmUsersRepository {
    conn: DatabaseConnection,
}

impl SeaOrmUsersRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Connect, bring the schema up to date and wrap the pool.
    ///
    /// An in-memory SQLite database lives inside a single connection, so the
    /// pool is pinned to one connection for such URLs.
    pub async fn connect(url: &str, max_conns: Option<u32>) -> anyhow::Result<Self> {
        let mut opts = ConnectOptions::new(url.to_owned());
        if url.contains(":memory:") {
            opts.max_connections(1).min_connections(1);
        } else if let Some(n) = max_conns {
            opts.max_connections(n);
        }
        opts.sqlx_logging(false);

        let conn = Database::connect(opts)
            .await
            .with_context(|| format!("failed to connect to {}", url))?;
        Migrator::up(&conn, None)
            .await
            .context("users migrations failed")?;
        info!("User store ready");
        Ok(Self::new(conn))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    fn condition(filter: &UserFilter) -> Condition {
        filter
            .clauses()
            .iter()
            .fold(Condition::all(), |cond, clause| {
                cond.add(Column::from(clause.field).eq(clause.value.clone()))
            })
    }
}

fn active_model(u: User) -> UserAM {
    UserAM {
        id: Set(u.id),
        first_name: Set(u.first_name),
        last_name: Set(u.last_name),
        nickname: Set(u.nickname),
        password: Set(u.password),
        email: Set(u.email),
        country: Set(u.country),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
    }
}

#[async_trait::async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn create_user(&self, user: User) -> anyhow::Result<String> {
        let inserted = active_model(user)
            .insert(&self.conn)
            .await
            .context("insert failed")?;
        debug!(user_id = %inserted.id, "Inserted user row");
        Ok(inserted.id)
    }

    async fn update_user(&self, changes: UserChanges) -> anyhow::Result<Option<User>> {
        let mut stmt = UserEntity::update_many()
            .col_expr(Column::FirstName, Expr::value(changes.first_name))
            .col_expr(Column::LastName, Expr::value(changes.last_name))
            .col_expr(Column::Nickname, Expr::value(changes.nickname))
            .col_expr(Column::Email, Expr::value(changes.email))
            .col_expr(Column::Country, Expr::value(changes.country))
            .col_expr(Column::UpdatedAt, Expr::value(changes.updated_at));
        if let Some(hash) = changes.password_hash {
            stmt = stmt.col_expr(Column::Password, Expr::value(hash));
        }

        let res = stmt
            .filter(Column::Id.eq(changes.id.clone()))
            .exec(&self.conn)
            .await
            .context("update failed")?;
        if res.rows_affected == 0 {
            return Ok(None);
        }

        // A delete may land between the write and this read.
        let row = UserEntity::find_by_id(changes.id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(row.map(Into::into))
    }

    async fn delete_user(&self, id: &str) -> anyhow::Result<Option<String>> {
        let res = UserEntity::delete_by_id(id.to_owned())
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok((res.rows_affected > 0).then(|| id.to_owned()))
    }

    async fn query_users(
        &self,
        filter: &UserFilter,
        window: Window,
    ) -> anyhow::Result<QueryPage> {
        let cond = Self::condition(filter);

        let total = UserEntity::find()
            .filter(cond.clone())
            .count(&self.conn)
            .await
            .context("count failed")?;

        let rows = UserEntity::find()
            .filter(cond)
            .limit(window.limit)
            .offset(window.offset)
            .all(&self.conn)
            .await
            .context("query failed")?;

        Ok(QueryPage {
            items: rows.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn health_check(&self) -> anyhow::Result<()> {
        self.conn.ping().await.context("database ping failed")
    }

    async fn shutdown(&self) -> anyhow::Result<()> {
        self.conn
            .clone()
            .close()
            .await
            .context("closing database pool failed")
    }
}
