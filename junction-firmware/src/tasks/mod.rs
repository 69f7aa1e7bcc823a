//! Embassy async tasks
//!
//! The control task owns the controller; the other two only feed it
//! through `channels`.

pub mod control;
pub mod demand_edge;
pub mod period;

pub use control::{control_task, BoardBuzzer, BoardIo, BoardLcd, EmbassyClock};
pub use demand_edge::demand_edge_task;
pub use period::period_task;
