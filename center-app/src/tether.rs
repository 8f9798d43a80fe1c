use anyhow::{Context, Result};
use center_actors::builder::Builder;
use center_config::CenterConfig;
use center_core::{AnalyticsCache, AppState, Dataset};
use center_tui::{Dashboard, DashboardActor, spawn_dashboard_feeders};
use std::time::Duration;

const DASHBOARD_MAILBOX: usize = 256;

/// Binds the dashboard actor and its feeders to one actor system.
pub struct Tether {
    builder: Builder,
}

impl Tether {
    pub fn build(cfg: &CenterConfig, dataset: Dataset) -> Result<Self> {
        let mut builder = Builder::new();
        let shutdown = builder.shutdown_handle();

        let r_dashboard = builder.reserve::<DashboardActor>("dashboard:main", DASHBOARD_MAILBOX);
        let addr = r_dashboard.addr();

        let overdue_after = chrono::Duration::try_hours(cfg.ui.overdue_hours)
            .context("ui.overdue_hours is out of range")?;
        let dashboard = Dashboard::new(
            AppState::new(dataset),
            AnalyticsCache::new(cfg.ui.top_issues),
            cfg.locale,
            overdue_after,
        );
        let actor =
            DashboardActor::new(dashboard, shutdown).context("failed to initialise the terminal")?;
        builder.start_reserved(r_dashboard, actor);

        spawn_dashboard_feeders(&mut builder, addr, Duration::from_millis(cfg.ui.tick_ms));
        Ok(Self { builder })
    }

    pub async fn run(self) -> Result<()> {
        self.builder.run_until_shutdown().await
    }
}
