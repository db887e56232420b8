use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use models::user::{self, Entity as Users};

use crate::errors::ServiceError;

/// Create a user; the id is generated server-side.
pub async fn create_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<user::Model, ServiceError> {
    user::validate_name(name)?;
    user::validate_email(email)?;
    let am = user::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        email: Set(email.to_string()),
    };
    am.insert(db)
        .await
        .map_err(|e| ServiceError::Db(format!("failed to create user: {e}")))
}

/// All users, in storage order.
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, ServiceError> {
    Users::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(format!("failed to list users: {e}")))
}

/// Reachability probe for the users service's health route.
pub async fn ping(db: &DatabaseConnection) -> Result<bool, ServiceError> {
    db.ping()
        .await
        .map_err(|e| ServiceError::Db(format!("health check failed: {e}")))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn user_create_and_list() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };

        let email = format!("svc_{}@example.com", Uuid::new_v4());
        let created = create_user(&db, "Bob", &email).await?;
        assert_eq!(created.email, email);

        let listed = list_users(&db).await?;
        assert!(listed.iter().any(|u| u.id == created.id));

        assert!(matches!(
            create_user(&db, "", &email).await,
            Err(ServiceError::Model(_))
        ));
        assert!(matches!(
            create_user(&db, "Bob", "not-an-email").await,
            Err(ServiceError::Model(_))
        ));

        assert!(ping(&db).await?);

        Users::delete_by_id(created.id).exec(&db).await?;
        Ok(())
    }
}
