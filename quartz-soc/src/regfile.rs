use crate::{
    consts::REG_SIZE,
    memory::{MemoryValue, Width},
};
use std::{error::Error, fmt};

/// Raw backing store for the peripheral register window.
///
/// Every multi-byte value is big endian, the byte order of the 68k bus. No
/// masking or side effects happen here; see [`PeripheralBus`] for that.
///
/// [`PeripheralBus`]: crate::dispatch::PeripheralBus
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterFile {
    data: Box<[u8; REG_SIZE]>,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            data: Box::new([0; REG_SIZE]),
        }
    }

    pub fn read<T: MemoryValue>(&self, offset: u32) -> T {
        T::truncate(self.read_width(T::WIDTH, offset))
    }

    pub fn write<T: MemoryValue>(&mut self, offset: u32, value: T) {
        self.write_width(T::WIDTH, offset, value.widen())
    }

    pub fn read_width(&self, width: Width, offset: u32) -> u32 {
        let start = offset as usize;
        self.data[start..start + width.bytes()]
            .iter()
            .fold(0, |value, &byte| value << 8 | byte as u32)
    }

    pub fn write_width(&mut self, width: Width, offset: u32, value: u32) {
        let start = offset as usize;
        let bytes = value.to_be_bytes();
        self.data[start..start + width.bytes()].copy_from_slice(&bytes[4 - width.bytes()..]);
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..]
    }

    /// Restores a buffer previously taken with [`RegisterFile::as_bytes`]
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        if bytes.len() != REG_SIZE {
            return Err(SnapshotError::Length {
                expected: REG_SIZE,
                found: bytes.len(),
            });
        }
        self.data.copy_from_slice(bytes);
        Ok(())
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegisterFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterFile")
            .field("len", &REG_SIZE)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    Length { expected: usize, found: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Length { expected, found } => write!(
                f,
                "register snapshot is {found} bytes, expected {expected}"
            ),
        }
    }
}

impl Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_layout() {
        let mut regs = RegisterFile::new();
        regs.write::<u32>(0x004, 0x5600_0001);
        assert_eq!(regs.as_bytes()[4..8], [0x56, 0x00, 0x00, 0x01]);
        assert_eq!(regs.read::<u16>(0x004), 0x5600);
        assert_eq!(regs.read::<u8>(0x007), 0x01);
    }

    #[test]
    fn narrow_write_leaves_neighbours() {
        let mut regs = RegisterFile::new();
        regs.write::<u32>(0x100, 0xFFFF_FFFF);
        regs.write::<u8>(0x101, 0x00);
        assert_eq!(regs.read::<u32>(0x100), 0xFF00_FFFF);
        regs.write_width(Width::Half, 0x102, 0x1234_5678);
        assert_eq!(regs.read::<u32>(0x100), 0xFF00_5678);
    }

    #[test]
    fn load_rejects_wrong_length() {
        let mut regs = RegisterFile::new();
        assert_eq!(
            regs.load(&[0; 16]),
            Err(SnapshotError::Length {
                expected: REG_SIZE,
                found: 16
            })
        );
    }

    #[test]
    fn load_round_trips_buffer() {
        let mut regs = RegisterFile::new();
        regs.write::<u16>(0x202, 0x0347);
        let snapshot = regs.as_bytes().to_vec();

        let mut restored = RegisterFile::new();
        restored.load(&snapshot).unwrap();
        assert_eq!(restored, regs);
    }
}
