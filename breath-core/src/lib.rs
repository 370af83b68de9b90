//! Pure breathing-cycle logic with no platform dependencies.
//! Testable on host, usable on Xous target.

pub mod controller;
pub mod counter;
pub mod input;
pub mod phase;
pub mod scheduler;

pub use controller::{DisplaySink, HapticSink, Host, Label, PhaseController};
pub use counter::{format_sec10th, HoldCounter, Step, HOLD1_START, HOLD2_START, SEC10TH_MAX};
pub use input::{route, Axis, Button, InputEvent, LONG_PRESS_MS};
pub use phase::{transition, Action, Phase};
pub use scheduler::{TickScheduler, TimerHandle, TimerSlot, FIRST_TICK_MS, TICK_MS};
