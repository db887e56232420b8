use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, SqlErr};

use models::agent::{self, Entity as Agents};

use crate::errors::ServiceError;

/// Data access layer for agent records.
///
/// Construction applies the schema migration, so the unique `id`
/// constraint is in place before the first request is served; a service
/// must not accept traffic until `new` has returned.
#[derive(Clone)]
pub struct AgentsDal {
    db: DatabaseConnection,
}

impl AgentsDal {
    pub async fn new(db: DatabaseConnection) -> Result<Self, ServiceError> {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| ServiceError::Db(format!("failed to initialize agents schema: {e}")))?;
        Ok(Self { db })
    }

    /// Insert a full record. A taken `id` surfaces as `Duplicate` and
    /// leaves the stored record untouched.
    pub async fn create(
        &self,
        id: i64,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        rank: i32,
    ) -> Result<agent::Model, ServiceError> {
        agent::validate_name("first_name", first_name)?;
        agent::validate_name("last_name", last_name)?;
        let am = agent::ActiveModel {
            id: Set(id),
            first_name: Set(first_name.to_string()),
            last_name: Set(last_name.to_string()),
            phone_number: Set(phone_number.to_string()),
            rank: Set(rank),
        };
        am.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ServiceError::Duplicate(format!("agent with id {id} already exists"))
            }
            _ => ServiceError::Db(format!("failed to create agent: {e}")),
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<agent::Model>, ServiceError> {
        Agents::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(format!("failed to fetch agent {id}: {e}")))
    }

    /// All records, ascending by `id` regardless of insertion order.
    pub async fn list(&self) -> Result<Vec<agent::Model>, ServiceError> {
        Agents::find()
            .order_by_asc(agent::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(format!("failed to list agents: {e}")))
    }

    /// Apply only the fields present; absent fields keep their stored
    /// values. Returns `None` when no record matches `id`.
    pub async fn update(
        &self,
        id: i64,
        first_name: Option<&str>,
        last_name: Option<&str>,
        phone_number: Option<&str>,
        rank: Option<i32>,
    ) -> Result<Option<agent::Model>, ServiceError> {
        if let Some(v) = first_name {
            agent::validate_name("first_name", v)?;
        }
        if let Some(v) = last_name {
            agent::validate_name("last_name", v)?;
        }
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };
        if first_name.is_none() && last_name.is_none() && phone_number.is_none() && rank.is_none() {
            // Nothing to apply.
            return Ok(Some(existing));
        }
        let mut am: agent::ActiveModel = existing.into();
        if let Some(v) = first_name {
            am.first_name = Set(v.to_string());
        }
        if let Some(v) = last_name {
            am.last_name = Set(v.to_string());
        }
        if let Some(v) = phone_number {
            am.phone_number = Set(v.to_string());
        }
        if let Some(v) = rank {
            am.rank = Set(v);
        }
        let updated = am
            .update(&self.db)
            .await
            .map_err(|e| ServiceError::Db(format!("failed to update agent {id}: {e}")))?;
        Ok(Some(updated))
    }

    /// Returns whether a record was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = Agents::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(format!("failed to delete agent {id}: {e}")))?;
        Ok(res.rows_affected > 0)
    }

    /// Round-trip the connection to verify the store is reachable.
    pub async fn health_check(&self) -> Result<bool, ServiceError> {
        self.db
            .ping()
            .await
            .map_err(|e| ServiceError::Db(format!("health check failed: {e}")))?;
        Ok(true)
    }
}
