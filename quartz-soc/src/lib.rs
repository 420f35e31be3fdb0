#[macro_use]
extern crate log;

pub mod clock;
pub mod consts;
pub mod diag;
pub mod dispatch;
pub mod dma;
pub mod memory;
pub mod power;
pub mod regfile;
pub mod reset;
pub mod rtc;
pub mod sched;

pub use clock::ClockState;
pub use diag::{DiagnosticSink, LogSink, Observation};
pub use dispatch::PeripheralBus;
pub use dma::{DmaController, DmaEngine, DmaEvent};
pub use memory::Width;
pub use power::{CpuControl, FreeRunning};
pub use rtc::Calendar;
pub use sched::Scheduler;
