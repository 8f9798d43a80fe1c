//! Task tracking and shutdown signalling for the dashboard's actors and feeders.
//!
//! Actors and feeder tasks subscribe to one broadcast channel for cooperative
//! shutdown; the `JoinSet` makes sure every tracked task is awaited on teardown.
use anyhow::Result;
use tokio::{sync::broadcast, task::JoinSet};

#[derive(Clone)]
pub struct ShutdownHandle {
    tx: broadcast::Sender<()>,
}

impl ShutdownHandle {
    pub fn signal(&self) {
        let _ = self.tx.send(());
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }
}

pub struct ActorSystem {
    joinset: JoinSet<Result<()>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Default for ActorSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorSystem {
    pub fn new() -> Self {
        let (shutdown_tx, _) = broadcast::channel(32);
        Self {
            joinset: JoinSet::new(),
            shutdown_tx,
        }
    }

    pub fn shutdown_notifier(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            tx: self.shutdown_tx.clone(),
        }
    }

    pub fn track(&mut self, fut: impl std::future::Future<Output = Result<()>> + Send + 'static) {
        self.joinset.spawn(fut);
    }

    pub fn tracked(&self) -> usize {
        self.joinset.len()
    }

    /// Signal shutdown and wait for every tracked task. The first task error
    /// (or panic) is returned after all tasks have finished.
    pub async fn graceful_shutdown(mut self) -> Result<()> {
        let _ = self.shutdown_tx.send(());
        let mut first_err = None;
        while let Some(res) = self.joinset.join_next().await {
            let outcome = res.map_err(anyhow::Error::from).and_then(|r| r);
            if let Err(e) = outcome {
                tracing::warn!(target: "center-actors", error = ?e, "task ended with error");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
