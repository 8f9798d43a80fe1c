use crate::actor::{Actor, Reserved, spawn_actor_reserved};
use crate::system::{ActorSystem, ShutdownHandle};
use anyhow::Result;
use tokio::sync::broadcast;

/// Wires named actors together and owns their lifetime.
pub struct Builder {
    sys: ActorSystem,
    // Subscribed at construction so a signal raised before `run_until_shutdown` is not lost.
    shutdown_rx: broadcast::Receiver<()>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Self {
        let sys = ActorSystem::new();
        let shutdown_rx = sys.shutdown_notifier();
        Self { sys, shutdown_rx }
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.sys.shutdown_handle()
    }

    /// Reserve a named actor so its `Addr` can be handed out before it starts.
    pub fn reserve<A: Actor>(&mut self, name: &str, mailbox: usize) -> Reserved<A> {
        spawn_actor_reserved::<A>(name, mailbox)
    }

    /// Start a previously reserved actor and track its task.
    ///
    /// An actor that ends with an error (or panics) raises the shutdown signal,
    /// so the rest of the system is torn down instead of waiting on a dead actor.
    pub fn start_reserved<A: Actor>(&mut self, r: Reserved<A>, actor: A) -> &mut Self {
        let name = r.name().to_string();
        let shutdown = self.sys.shutdown_handle();
        let h = r.start_with_shutdown(actor, Some(self.sys.shutdown_notifier()));
        tracing::info!(target: "center-actors", actor = %name, "actor running");
        self.sys.track(async move {
            let outcome = h.task.await.map_err(anyhow::Error::from).and_then(|r| r);
            if let Err(e) = &outcome {
                tracing::error!(target: "center-actors", actor = %name, error = ?e, "actor failed");
                shutdown.signal();
            }
            outcome
        });
        self
    }

    /// Track a non-actor task (input readers, tickers) so shutdown waits for it.
    pub fn track<F>(&mut self, fut: F) -> &mut Self
    where
        F: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.sys.track(fut);
        self
    }

    /// Wait for CTRL-C or an internal shutdown signal, then tear everything down.
    pub async fn run_until_shutdown(mut self) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!(target: "center-actors", "ctrl-c received");
            }
            _ = self.shutdown_rx.recv() => {
                tracing::info!(target: "center-actors", "shutdown requested");
            }
        }
        self.sys.graceful_shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Context;
    use async_trait::async_trait;
    use std::time::Duration;

    struct Quitter {
        shutdown: ShutdownHandle,
    }

    #[async_trait]
    impl Actor for Quitter {
        type Msg = ();

        async fn handle(&mut self, _msg: (), ctx: &mut Context<Self>) -> Result<()> {
            self.shutdown.signal();
            ctx.stop();
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl Actor for Failing {
        type Msg = ();

        async fn handle(&mut self, _msg: (), _ctx: &mut Context<Self>) -> Result<()> {
            anyhow::bail!("terminal lost")
        }
    }

    #[tokio::test]
    async fn reserved_actor_can_request_shutdown() {
        let mut b = Builder::new();
        let r = b.reserve::<Quitter>("ui:main", 4);
        let addr = r.addr();

        let shutdown = b.shutdown_handle();
        b.start_reserved(r, Quitter { shutdown });

        addr.send(()).await.unwrap();
        drop(addr);
        b.run_until_shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn failed_actor_tears_the_system_down() {
        let mut b = Builder::new();
        let r = b.reserve::<Failing>("ui:main", 4);
        let addr = r.addr();
        b.start_reserved(r, Failing);

        let mut tick = b.shutdown_handle().subscribe();
        b.track(async move {
            let _ = tick.recv().await;
            Ok(())
        });

        addr.send(()).await.unwrap();
        let res = tokio::time::timeout(Duration::from_secs(2), b.run_until_shutdown())
            .await
            .expect("shutdown should follow the actor failure");
        let err = res.unwrap_err();
        assert!(err.to_string().contains("terminal lost"));
        assert!(addr.is_closed());
    }
}
