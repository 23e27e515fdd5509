use sea_orm::{DatabaseTransaction, DbErr, TransactionTrait};
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, warn};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Run `body` inside a transaction.
///
/// Commits when the body returns `Ok` and rolls back when it returns `Err`,
/// handing back the body's error untouched. A rollback failure is logged
/// and otherwise ignored. If the returned future is dropped before it
/// finishes, the open transaction is dropped with it and rolled back.
///
/// `db` may be the pool or an open transaction; in the latter case the body
/// runs inside a savepoint.
///
/// ```ignore
/// let product = with_transaction(&db, move |txn| {
///     Box::pin(async move { writer::create_product(txn, input).await })
/// })
/// .await?;
/// ```
pub async fn with_transaction<C, F, T, E>(db: &C, body: F) -> Result<T, E>
where
    C: TransactionTrait<Transaction = DatabaseTransaction>,
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, E>>,
    E: From<DbErr> + Display,
{
    let txn = db.begin().await?;

    let outcome = body(&txn).await;
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "Transaction rollback failed");
            }
            debug!(error = %err, "Transaction rolled back");
            Err(err)
        }
    }
}
