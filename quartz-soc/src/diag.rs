//! Reporting of accesses to registers without documented behavior.

use crate::memory::Width;
use quartz_common::flume::Sender;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

/// One CPU access that hit an undocumented register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub offset: u32,
    pub value: u32,
    pub width: Width,
    pub direction: Direction,
}

impl Observation {
    pub fn read(width: Width, offset: u32, value: u32) -> Self {
        Self {
            offset,
            value,
            width,
            direction: Direction::Read,
        }
    }

    pub fn write(width: Width, offset: u32, value: u32) -> Self {
        Self {
            offset,
            value,
            width,
            direction: Direction::Write,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Read => write!(
                f,
                "cpu read {} bits (0x{:08X}) from register 0x{:04X}",
                self.width, self.value, self.offset
            ),
            Direction::Write => write!(
                f,
                "cpu wrote {} bits of 0x{:08X} to register 0x{:04X}",
                self.width, self.value, self.offset
            ),
        }
    }
}

pub trait DiagnosticSink {
    fn observe(&mut self, observation: Observation);
}

/// Forwards every observation to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn observe(&mut self, observation: Observation) {
        warn!("{observation}");
    }
}

impl DiagnosticSink for Sender<Observation> {
    fn observe(&mut self, observation: Observation) {
        // nobody listening is fine
        let _ = self.send(observation);
    }
}

impl DiagnosticSink for Vec<Observation> {
    fn observe(&mut self, observation: Observation) {
        self.push(observation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartz_common::flume;

    #[test]
    fn display_matches_direction() {
        let write = Observation::write(Width::Half, 0x300, 0xBEEF);
        assert_eq!(
            write.to_string(),
            "cpu wrote 16 bits of 0x0000BEEF to register 0x0300"
        );
        let read = Observation::read(Width::Byte, 0x401, 0xFF);
        assert_eq!(
            read.to_string(),
            "cpu read 8 bits (0x000000FF) from register 0x0401"
        );
    }

    #[test]
    fn channel_sink_survives_dropped_receiver() {
        let (mut tx, rx) = flume::unbounded();
        drop(rx);
        tx.observe(Observation::read(Width::Word, 0, 0));
    }
}
