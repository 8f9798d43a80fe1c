use crate::{
    dashboard::{Action, Dashboard},
    view,
};
use anyhow::Result;
use async_trait::async_trait;
use center_actors::{
    actor::{Actor, Context},
    system::ShutdownHandle,
};
use chrono::Utc;
use crossterm::{
    event::Event as CtEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Relative ages on the cards go stale without input; redraw at least this often.
const REDRAW_EVERY: Duration = Duration::from_secs(1);

pub enum DashboardMsg {
    InputEvent(CtEvent),
    Tick,
    Submit(String),
    OpError(String),
    Shutdown,
}

/// Owns the terminal and the [`Dashboard`]; the only writer of either.
pub struct DashboardActor {
    dashboard: Dashboard,

    // terminal
    term: Terminal<CrosstermBackend<Stdout>>,
    last_draw: Instant,
    restored: bool,

    // shutdown coordination
    shutdown: ShutdownHandle,
}

impl DashboardActor {
    /// Switch the terminal into raw mode on the alternate screen.
    pub fn new(dashboard: Dashboard, shutdown: ShutdownHandle) -> Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut term = Terminal::new(backend)?;
        term.clear()?;

        Ok(Self {
            dashboard,
            term,
            last_draw: Instant::now(),
            restored: false,
            shutdown,
        })
    }

    fn draw(&mut self) -> Result<()> {
        let snap = self.dashboard.snapshot(Utc::now());
        let grid = view::draw(&mut self.term, &snap)?;
        self.dashboard.set_grid(grid);
        self.last_draw = Instant::now();
        self.dashboard.mark_clean();
        Ok(())
    }

    fn restore_terminal(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        disable_raw_mode().ok();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = self.term.show_cursor();
    }
}

impl Drop for DashboardActor {
    fn drop(&mut self) {
        self.restore_terminal();
    }
}

#[async_trait]
impl Actor for DashboardActor {
    type Msg = DashboardMsg;

    async fn handle(&mut self, msg: Self::Msg, ctx: &mut Context<Self>) -> Result<()> {
        match msg {
            DashboardMsg::InputEvent(ev) => match ev {
                CtEvent::Key(k) => match self.dashboard.handle_key(k) {
                    Some(Action::Submit(line)) => {
                        let _ = ctx.addr().try_send(DashboardMsg::Submit(line));
                    }
                    Some(Action::Quit) => {
                        let _ = ctx.addr().try_send(DashboardMsg::Shutdown);
                    }
                    None => {}
                },
                CtEvent::Resize(..) => self.dashboard.mark_dirty(),
                _ => {}
            },
            DashboardMsg::Submit(line) => {
                if let Some(Action::Quit) = self.dashboard.submit(&line, Utc::now()) {
                    let _ = ctx.addr().try_send(DashboardMsg::Shutdown);
                }
            }
            DashboardMsg::OpError(e) => {
                tracing::warn!(target: "center-tui", error = %e, "feeder error");
                self.dashboard.push_error(e);
            }
            DashboardMsg::Tick => {
                if self.dashboard.is_dirty() || self.last_draw.elapsed() >= REDRAW_EVERY {
                    self.draw()?;
                }
            }
            DashboardMsg::Shutdown => {
                tracing::info!(target: "center-tui", "dashboard shutting down");
                self.restore_terminal();
                self.shutdown.signal();
                ctx.stop();
            }
        }

        Ok(())
    }
}
