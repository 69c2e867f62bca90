// Service exports
pub mod clock;
pub mod compstate;

pub use clock::{Clock, FixedClock, SystemClock};
pub use compstate::{load_snapshot, CompstateError, CompstateManager, SNAPSHOT_FILE};
