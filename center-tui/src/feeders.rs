use crate::tui::{DashboardActor, DashboardMsg};
use anyhow::{Result, anyhow};
use center_actors::{actor::Addr, builder::Builder};
use std::time::Duration;
use tokio::time;

/// How long the blocking reader waits for input before rechecking shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);
/// Base pause after a failed poll/read; grows with each failure in a row.
const INPUT_RETRY: Duration = Duration::from_millis(250);
/// Failures in a row after which the terminal is treated as gone.
const MAX_INPUT_FAILURES: u32 = 10;

/// Consecutive input failures.
#[derive(Debug, Default)]
struct InputFailures(u32);

impl InputFailures {
    /// Pause before the next read, or `None` once the reader should give up.
    fn record(&mut self) -> Option<Duration> {
        self.0 += 1;
        (self.0 < MAX_INPUT_FAILURES).then(|| INPUT_RETRY * self.0.min(4))
    }

    fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Spawn the terminal-input reader and the redraw ticker, both tracked by `builder`.
pub fn spawn_dashboard_feeders(builder: &mut Builder, addr: Addr<DashboardActor>, tick: Duration) {
    let shutdown = builder.shutdown_handle();

    let input_addr = addr.clone();
    let input_shutdown = shutdown.clone();
    let mut shutdown_input = shutdown.subscribe();
    builder.track(async move {
        let mut failures = InputFailures::default();
        loop {
            let read = tokio::task::spawn_blocking(|| -> Result<_> {
                if crossterm::event::poll(INPUT_POLL)? {
                    Ok(Some(crossterm::event::read()?))
                } else {
                    Ok(None)
                }
            });
            tokio::select! {
                _ = shutdown_input.recv() => break,
                ev = read => match ev {
                    Ok(Ok(Some(e))) => {
                        failures.reset();
                        if input_addr.send(DashboardMsg::InputEvent(e)).await.is_err() {
                            break;
                        }
                    }
                    Ok(Ok(None)) => failures.reset(),
                    Ok(Err(e)) => {
                        let _ = input_addr.send(DashboardMsg::OpError(format!("input: {e}"))).await;
                        let Some(pause) = failures.record() else {
                            tracing::error!(target: "center-tui", error = ?e, "terminal input keeps failing; shutting down");
                            input_shutdown.signal();
                            return Err(anyhow!("terminal input failed {MAX_INPUT_FAILURES} times in a row: {e}"));
                        };
                        tracing::warn!(target: "center-tui", error = ?e, ?pause, "terminal input failed");
                        tokio::select! {
                            _ = shutdown_input.recv() => break,
                            _ = time::sleep(pause) => {}
                        }
                    }
                    Err(_) => break,
                },
            }
        }
        Ok(())
    });

    let mut shutdown_tick = shutdown.subscribe();
    builder.track(async move {
        let mut interval = time::interval(tick);
        loop {
            tokio::select! {
                _ = shutdown_tick.recv() => break,
                _ = interval.tick() => {
                    if addr.is_closed() {
                        break;
                    }
                    let _ = addr.try_send(DashboardMsg::Tick);
                }
            }
        }
        Ok(())
    });
}
