use crate::Config;
use crate::database::budget::BudgetRepository;
use crate::database::postgres_repository::PostgresRepository;
use crate::db::init_pool;
use crate::error::app_error::AppError;
use crate::service::budget::BudgetService;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildResult {
    pub budgets_processed: usize,
    pub budgets_failed: usize,
    pub days_removed: usize,
    pub days_created: usize,
}

/// Rebuilds the day ledger of every budget. Each budget runs in its own
/// transaction, so one failing budget does not undo the others.
pub async fn rebuild_all_ledgers(config: &Config) -> Result<RebuildResult, AppError> {
    let pool = init_pool(&config.database).await?;
    let repo = PostgresRepository { pool: pool.clone() };

    let keys = {
        let mut tx = repo.begin().await?;
        let keys = tx.list_budget_keys().await?;
        tx.commit().await?;
        keys
    };

    let mut result = RebuildResult::default();
    for key in keys {
        let mut tx = repo.begin().await?;
        match BudgetService::new(&mut tx).rebuild_ledger(&key.user_id, &key.budget_id).await {
            Ok((_, summary)) => {
                tx.commit().await?;
                result.budgets_processed += 1;
                result.days_removed += summary.removed;
                result.days_created += summary.created;
            }
            Err(err) => {
                error!(budget_id = %key.budget_id, error = ?err, "failed to rebuild budget ledger");
                result.budgets_failed += 1;
            }
        }
    }

    pool.close().await;

    info!(
        budgets_processed = result.budgets_processed,
        budgets_failed = result.budgets_failed,
        days_removed = result.days_removed,
        days_created = result.days_created,
        "ledger rebuild finished"
    );
    Ok(result)
}
