//! Spoofing cycle controller.
//!
//! Generates labelled spoofing traffic against an [`Exchange`](crate::exchange::Exchange):
//! each cycle stacks non-marketable orders on one side, sends one genuine
//! marketable order on the other side, then withdraws the stack.
//!
//! The spoof side follows [`SidePolicy`]; the default, `FixedBuy`, spoofs the
//! bid every cycle. The `hold` wait is measured from the end of the `delay`
//! wait, so time spent placing the genuine order counts against it.

mod clock;
mod config;
mod cycle;
mod error;
mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, RunConfig, SidePolicy, SpoofConfig};
pub use cycle::SpoofController;
pub use error::ControllerError;
pub use state::{
    ControllerStats, CycleOutcome, CycleReport, CycleState, SkipReason, StopSignal,
};
