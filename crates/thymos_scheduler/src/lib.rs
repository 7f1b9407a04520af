//! # Thymos Scheduler
//!
//! The three scheduling primitives that determine when and whether the agent
//! does anything:
//!
//! - [`Heartbeat`]: fires a callback at a fixed interval until stopped.
//!   Callback failures are caught at the scheduler boundary; one bad tick
//!   must not kill the loop.
//! - [`SleepWakeGate`]: polls time-of-day and invokes an on-wake or on-sleep
//!   callback depending on the daily schedule. Level-triggered, so callbacks
//!   must be idempotent.
//! - [`TaskQueue`]: unbounded FIFO with a single consumer loop that survives
//!   handler failures and retains queued items across stop/run cycles.
//!
//! Starting an already-running primitive or stopping an idle one is always a
//! no-op, never an error.

mod heartbeat;
mod queue;
mod sleep_wake;

pub use heartbeat::Heartbeat;
pub use queue::TaskQueue;
pub use sleep_wake::{in_wake_window, SleepWakeGate};
