mod bits;
mod register;

pub use bits::BitIndex;
pub use register::{Register, RegisterValue};

pub use flume;
