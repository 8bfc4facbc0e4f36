//! Single-writer actor: all mutations are serialized through one connection.

use super::DbPool;
use crate::errors::StorageError;
use backoffice_core::errors::{DatabaseError, Result};
use diesel::SqliteConnection;
use log::error;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type Boxed = Box<dyn Any + Send + 'static>;
type Job = Box<dyn FnOnce(&mut SqliteConnection) -> Result<Boxed> + Send + 'static>;
type Envelope = (Job, oneshot::Sender<Result<Boxed>>);

const QUEUE_CAPACITY: usize = 1024;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<Envelope>,
}

impl WriteHandle {
    /// Run `job` inside an immediate transaction on the writer's connection.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        self.tx
            .send((Box::new(move |c| job(c).map(|v| Box::new(v) as Boxed)), ret_tx))
            .await
            .map_err(|_| stopped("writer actor is not running"))?;

        let boxed = ret_rx
            .await
            .map_err(|_| stopped("writer actor dropped the reply"))??;

        boxed
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| stopped("writer actor returned an unexpected type").into())
    }
}

fn stopped(message: &str) -> DatabaseError {
    DatabaseError::Internal(message.to_string())
}

/// Spawns the writer task. It holds one pooled connection for its lifetime
/// and stops once every [`WriteHandle`] is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<Envelope>(QUEUE_CAPACITY);

    tokio::spawn(async move {
        let mut conn = match pool.get() {
            Ok(conn) => conn,
            Err(e) => {
                error!("Writer actor could not acquire a connection: {}", e);
                // Pending senders observe the closed channel as an error.
                return;
            }
        };

        while let Some((job, reply_tx)) = rx.recv().await {
            let result: Result<Boxed> = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e| e.into());

            // The caller may have gone away; nothing to do then.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
