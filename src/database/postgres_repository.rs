use crate::error::app_error::AppError;
use sqlx::{PgPool, Postgres, Transaction};

#[derive(Clone)]
pub struct PostgresRepository {
    pub pool: PgPool,
}

impl PostgresRepository {
    /// Opens the unit of work for one request or one maintenance step.
    pub async fn begin(&self) -> Result<PostgresTransaction, AppError> {
        let tx = self.pool.begin().await?;
        Ok(PostgresTransaction { tx })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Every store trait is implemented on the transaction, so a service call and
/// all of its ledger writes commit or roll back together. Dropping it without
/// `commit` rolls back.
pub struct PostgresTransaction {
    pub(crate) tx: Transaction<'static, Postgres>,
}

impl PostgresTransaction {
    pub async fn commit(self) -> Result<(), AppError> {
        self.tx.commit().await?;
        Ok(())
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error().is_some_and(|db_err| db_err.is_unique_violation())
}

/// Name of the violated constraint, when the database reported one.
pub fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    err.as_database_error().and_then(|db_err| db_err.constraint())
}
