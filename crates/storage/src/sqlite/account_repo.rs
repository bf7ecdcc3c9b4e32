use async_trait::async_trait;
use chrono::Utc;
use nurse_core::model::UserId;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use crate::repository::{AccountRecord, AccountRepository, StorageError};

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn map_account_row(row: &SqliteRow) -> Result<AccountRecord, StorageError> {
    let user_id: String = row.try_get("user_id").map_err(ser)?;
    Ok(AccountRecord {
        user_id: UserId::new(user_id).map_err(ser)?,
        email: row.try_get("email").map_err(ser)?,
        password_digest: row.try_get("password_digest").map_err(ser)?,
        salt: row.try_get("salt").map_err(ser)?,
    })
}

#[async_trait]
impl AccountRepository for SqliteRepository {
    async fn insert_account(&self, account: &AccountRecord) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            INSERT INTO accounts (user_id, email, password_digest, salt, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(account.user_id.as_str())
        .bind(&account.email)
        .bind(&account.password_digest)
        .bind(&account.salt)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(StorageError::Conflict)
            }
            Err(e) => Err(StorageError::Connection(e.to_string())),
        }
    }

    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AccountRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT user_id, email, password_digest, salt
            FROM accounts
            WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_account_row).transpose()
    }
}
