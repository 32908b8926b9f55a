//! Session-scoped access to the catalog
//!
//! A [`QuerySession`] owns the single ambient transaction every query runs
//! in. [`with_session`] is the scoped form: the
//! transaction is committed when the work succeeds and rolled back when it
//! fails, so teardown runs on every exit path. A session dropped without
//! being closed is rolled back by sea-orm.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::{debug, info, warn};

use crate::config::DatabaseConfig;
use crate::database::establish_connection;
use crate::errors::QueryError;

/// Future returned by the work closure handed to [`with_session`].
pub type SessionFuture<'s, T> = Pin<Box<dyn Future<Output = Result<T, QueryError>> + 's>>;

pub struct QuerySession {
    txn: DatabaseTransaction,
}

impl QuerySession {
    /// Connect with the given settings and begin the ambient transaction.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, QueryError> {
        let db = establish_connection(config).await?;
        Self::begin(&db).await
    }

    /// Begin the ambient transaction on an established connection.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, QueryError> {
        let txn = db
            .begin()
            .await
            .map_err(|e| QueryError::Transaction(format!("failed to begin: {}", e)))?;
        debug!("Session opened");
        Ok(Self { txn })
    }

    /// Connection every query in this session runs against.
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.txn
    }

    /// Commit the ambient transaction and release the session.
    pub async fn close(self) -> Result<(), QueryError> {
        self.txn
            .commit()
            .await
            .map_err(|e| QueryError::Transaction(format!("failed to commit: {}", e)))?;
        debug!("Session committed and closed");
        Ok(())
    }

    /// Roll back the ambient transaction and release the session.
    pub async fn abort(self) -> Result<(), QueryError> {
        self.txn
            .rollback()
            .await
            .map_err(|e| QueryError::Transaction(format!("failed to roll back: {}", e)))?;
        debug!("Session rolled back and closed");
        Ok(())
    }
}

/// Run `work` inside a fresh session on `db`.
///
/// The session is committed if `work` returns `Ok` and rolled back otherwise.
/// A commit failure is reported as the result; a rollback failure is logged
/// and the error from `work` is returned.
pub async fn with_session<T, F>(db: &DatabaseConnection, work: F) -> Result<T, QueryError>
where
    F: for<'s> FnOnce(&'s DatabaseTransaction) -> SessionFuture<'s, T>,
{
    let session = QuerySession::begin(db).await?;
    let outcome = work(session.transaction()).await;

    match outcome {
        Ok(value) => {
            session.close().await?;
            info!("Session committed");
            Ok(value)
        }
        Err(err) => {
            warn!("Rolling back session after error: {}", err);
            if let Err(rollback_err) = session.abort().await {
                warn!("Rollback failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}
