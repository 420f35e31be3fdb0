use num_traits::{FromPrimitive, PrimInt};
use std::fmt;

/// Width of a single CPU access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Width {
    Byte,
    Half,
    Word,
}

impl Width {
    pub const fn bits(self) -> u32 {
        match self {
            Width::Byte => 8,
            Width::Half => 16,
            Width::Word => 32,
        }
    }

    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    pub const fn mask(self) -> u32 {
        match self {
            Width::Byte => 0xFF,
            Width::Half => 0xFFFF,
            Width::Word => 0xFFFF_FFFF,
        }
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

pub trait MemoryValue: PrimInt + FromPrimitive {
    const WIDTH: Width;

    /// Keeps the low bits of `value` that fit in `Self`
    fn truncate(value: u32) -> Self;

    fn widen(self) -> u32;
}

macro_rules! impl_memory_value {
    ($($ty:ty => $width:expr),*) => {$(
        impl MemoryValue for $ty {
            const WIDTH: Width = $width;

            #[inline]
            fn truncate(value: u32) -> Self {
                value as $ty
            }

            #[inline]
            fn widen(self) -> u32 {
                self as u32
            }
        }
    )*};
}

impl_memory_value!(u8 => Width::Byte, u16 => Width::Half, u32 => Width::Word);
