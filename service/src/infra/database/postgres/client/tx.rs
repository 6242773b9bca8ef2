//! [`Tx`] client definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

use super::NonTx;

/// Transactional Postgres database client.
///
/// The transaction is opened lazily by the first statement, so a [`Tx`]
/// which is never used doesn't hold a pooled connection. Clones share the
/// same transaction.
#[derive(Clone, Debug)]
pub struct Tx {
    /// [`NonTx`] client to take a connection from.
    non_tx: NonTx,

    /// Transaction opened by this [`Tx`] client, if any.
    tx: Arc<Mutex<Option<connection::Transaction>>>,
}

impl Tx {
    /// Creates a new [`Tx`] client on top of the provided [`NonTx`] client.
    #[must_use]
    pub fn from_non_tx(non_tx: NonTx) -> Self {
        Self {
            non_tx,
            tx: Arc::new(Mutex::new(None)),
        }
    }

    /// Locks the transaction of this [`Tx`] client, opening it if needed.
    async fn transaction(
        &self,
    ) -> Result<
        MutexGuard<'_, Option<connection::Transaction>>,
        Traced<database::Error>,
    > {
        let mut tx = self.tx.lock().await;
        if tx.is_none() {
            let pooled = self.non_tx.pooled().await.map_err(tracerr::wrap!())?;
            *tx = Some(
                connection::Transaction::begin(pooled)
                    .await
                    .map_err(tracerr::wrap!())?,
            );
        }
        Ok(tx)
    }

    /// Commits the transaction of this [`Tx`] client, if it was opened.
    ///
    /// # Errors
    ///
    /// If the database failed to commit.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Some(tx) = self.tx.lock().await.take() else {
            return Ok(());
        };
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

impl Connection for Tx {
    async fn query<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Vec<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized + Sync,
    {
        let guard = self.transaction().await.map_err(tracerr::wrap!())?;
        let Some(tx) = guard.as_ref() else {
            unreachable!("transaction is opened by `Tx::transaction()`")
        };
        tx.open()
            .query(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn query_opt<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<Option<Row>, Traced<database::Error>>
    where
        T: ToStatement + ?Sized + Sync,
    {
        let guard = self.transaction().await.map_err(tracerr::wrap!())?;
        let Some(tx) = guard.as_ref() else {
            unreachable!("transaction is opened by `Tx::transaction()`")
        };
        tx.open()
            .query_opt(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }

    async fn exec<T>(
        &self,
        stmt: &T,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<u64, Traced<database::Error>>
    where
        T: ToStatement + ?Sized + Sync,
    {
        let guard = self.transaction().await.map_err(tracerr::wrap!())?;
        let Some(tx) = guard.as_ref() else {
            unreachable!("transaction is opened by `Tx::transaction()`")
        };
        tx.open()
            .execute(stmt, params)
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}
