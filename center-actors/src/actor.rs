use anyhow::Result;
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};

/// Minimal actor trait. `Self: Sized` avoids object-safety issues when using `Context<Self>`.
#[async_trait::async_trait]
pub trait Actor: Send + Sized + 'static {
    type Msg: Send + 'static;

    /// Handle a single message. Return `Err` to stop the actor.
    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()>;
}

/// Runtime context for an actor instance.
pub struct Context<A: Actor> {
    addr: Addr<A>,
    stop: bool,
}

impl<A: Actor> Context<A> {
    /// A clone of this actor's own address, for follow-up messages.
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use async_trait::async_trait;
    /// # use center_actors::actor::{self, Actor, Context};
    /// enum Nav { Next, Done }
    /// struct Tabs(usize);
    /// #[async_trait]
    /// impl Actor for Tabs {
    ///     type Msg = Nav;
    ///     async fn handle(&mut self, msg: Nav, ctx: &mut Context<Self>) -> Result<()> {
    ///         match msg {
    ///             Nav::Next if self.0 < 2 => {
    ///                 self.0 += 1;
    ///                 let _ = ctx.addr().try_send(Nav::Next);
    ///             }
    ///             _ => ctx.stop(),
    ///         }
    ///         Ok(())
    ///     }
    /// }
    /// let rt = tokio::runtime::Runtime::new().unwrap();
    /// rt.block_on(async {
    ///     let actor::ActorHandle { addr, task } = actor::spawn_actor(Tabs(0), 4);
    ///     addr.send(Nav::Next).await.ok();
    ///     drop(addr);
    ///     task.await.unwrap().unwrap();
    /// });
    /// ```
    pub fn addr(&self) -> Addr<A> {
        self.addr.clone()
    }

    /// Request a graceful stop after processing the current message.
    pub fn stop(&mut self) {
        self.stop = true;
    }
}

/// Address for sending messages to an actor.
pub struct Addr<A: Actor>(mpsc::Sender<A::Msg>);

/// Manual Clone to avoid unnecessary bounds on `A`/`A::Msg`.
impl<A: Actor> Clone for Addr<A> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Actor> Addr<A> {
    /// Async send; awaits backpressure. Returns the message if the receiver is dropped.
    pub async fn send(&self, msg: A::Msg) -> std::result::Result<(), A::Msg> {
        self.0.send(msg).await.map_err(|e| e.0)
    }

    /// Try to send without waiting. Returns the message if the mailbox is full or closed.
    pub fn try_send(&self, msg: A::Msg) -> std::result::Result<(), A::Msg> {
        self.0.try_send(msg).map_err(|e| e.into_inner())
    }

    pub fn is_closed(&self) -> bool {
        self.0.is_closed()
    }
}

/// Handle to a running actor task.
pub struct ActorHandle<A: Actor> {
    pub addr: Addr<A>,
    pub task: JoinHandle<anyhow::Result<()>>,
}

/// Spawn an actor with a bounded mailbox.
///
/// Stop conditions:
/// - `handle` returns `Err`
/// - all senders are dropped
/// - `ctx.stop()` is called
/// - the shutdown channel fires (reserved/builder spawns only)
pub fn spawn_actor<A: Actor>(actor: A, capacity: usize) -> ActorHandle<A> {
    spawn_actor_reserved::<A>("anonymous", capacity).start(actor)
}

/// Reserved spawn: create mailbox+addr now; start the task later.
///
/// Lets the address be handed to feeders before the actor that owns the
/// terminal is constructed.
pub struct Reserved<A: Actor> {
    name: String,
    addr: Addr<A>,
    rx: mpsc::Receiver<A::Msg>,
}

impl<A: Actor> Reserved<A> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn addr(&self) -> Addr<A> {
        self.addr.clone()
    }

    /// Start the actor task using the reserved mailbox.
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use async_trait::async_trait;
    /// # use center_actors::actor::{self, Actor, Context};
    /// # struct Echo;
    /// # #[async_trait]
    /// # impl Actor for Echo {
    /// #     type Msg = &'static str;
    /// #     async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
    /// #         assert_eq!(msg, "refresh");
    /// #         ctx.stop();
    /// #         Ok(())
    /// #     }
    /// # }
    /// let rt = tokio::runtime::Runtime::new().unwrap();
    /// rt.block_on(async {
    ///     let reserved = actor::spawn_actor_reserved::<Echo>("dashboard", 4);
    ///     assert_eq!(reserved.name(), "dashboard");
    ///     let addr = reserved.addr();
    ///     let handle = reserved.start(Echo);
    ///     addr.send("refresh").await.unwrap();
    ///     drop(addr);
    ///     handle.task.await.unwrap().unwrap();
    /// });
    /// ```
    pub fn start(self, actor: A) -> ActorHandle<A> {
        self.start_with_shutdown(actor, None)
    }

    pub fn start_with_shutdown(
        self,
        actor: A,
        shutdown: Option<broadcast::Receiver<()>>,
    ) -> ActorHandle<A> {
        let Reserved { name, addr, rx } = self;
        let ctx = Context {
            addr: addr.clone(),
            stop: false,
        };
        let task = tokio::spawn(run_mailbox(name, actor, ctx, rx, shutdown));
        ActorHandle { addr, task }
    }
}

async fn run_mailbox<A: Actor>(
    name: String,
    mut actor: A,
    mut ctx: Context<A>,
    mut rx: mpsc::Receiver<A::Msg>,
    mut shutdown: Option<broadcast::Receiver<()>>,
) -> Result<()> {
    tracing::debug!(target: "center-actors", actor = %name, "actor started");
    loop {
        let msg = match shutdown.as_mut() {
            Some(shutdown_rx) => tokio::select! {
                _ = shutdown_rx.recv() => None,
                maybe_msg = rx.recv() => maybe_msg,
            },
            None => rx.recv().await,
        };
        let Some(msg) = msg else { break };

        if let Err(e) = actor.handle(msg, &mut ctx).await {
            tracing::error!(target: "center-actors", actor = %name, error = ?e, "actor returned error; stopping");
            return Err(e);
        }
        if ctx.stop {
            break;
        }
    }
    tracing::debug!(target: "center-actors", actor = %name, "actor stopped");
    Ok(())
}

/// Factory for reservation.
pub fn spawn_actor_reserved<A: Actor>(name: impl Into<String>, capacity: usize) -> Reserved<A> {
    let (tx, rx) = mpsc::channel::<A::Msg>(capacity);
    Reserved {
        name: name.into(),
        addr: Addr(tx),
        rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Tally {
        seen: Vec<u8>,
        report: Option<tokio::sync::oneshot::Sender<Vec<u8>>>,
    }

    #[async_trait]
    impl Actor for Tally {
        type Msg = u8;

        async fn handle(&mut self, msg: u8, ctx: &mut Context<Self>) -> Result<()> {
            if msg == 0 {
                anyhow::bail!("zero is not allowed");
            }
            self.seen.push(msg);
            if self.seen.len() == 3 {
                if let Some(tx) = self.report.take() {
                    let _ = tx.send(self.seen.clone());
                }
                ctx.stop();
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn processes_messages_in_order_until_stopped() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        let handle = spawn_actor(
            Tally {
                seen: vec![],
                report: Some(tx),
            },
            8,
        );
        for n in [3, 1, 2] {
            handle.addr.send(n).await.unwrap();
        }
        assert_eq!(rx.await.unwrap(), vec![3, 1, 2]);
        handle.task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn handler_error_stops_the_actor() {
        let handle = spawn_actor(
            Tally {
                seen: vec![],
                report: None,
            },
            2,
        );
        handle.addr.send(0).await.unwrap();
        assert!(handle.task.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn shutdown_signal_ends_an_idle_actor() {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let reserved = spawn_actor_reserved::<Tally>("idle", 2);
        let addr = reserved.addr();
        let handle = reserved.start_with_shutdown(
            Tally {
                seen: vec![],
                report: None,
            },
            Some(shutdown_rx),
        );
        shutdown_tx.send(()).unwrap();
        handle.task.await.unwrap().unwrap();
        assert!(addr.is_closed());
    }
}
