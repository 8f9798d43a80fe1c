//! Small mailbox actors: the dashboard actor owns the terminal and state,
//! feeder tasks push input events and ticks into its mailbox.
pub mod actor;
pub mod builder;
pub mod system;

pub use actor::{Actor, ActorHandle, Addr, Context, Reserved};
pub use builder::Builder;
pub use system::{ActorSystem, ShutdownHandle};
