mod cards;
mod charts;
mod command;
mod dashboard;
mod feeders;
mod input;
mod labels;
mod notice;
mod styles;
mod tui;
mod view;

pub use command::{Command, Usage, parse_command};
pub use dashboard::{Action, Dashboard};
pub use feeders::spawn_dashboard_feeders;
pub use tui::{DashboardActor, DashboardMsg};
pub use view::GridShape;
