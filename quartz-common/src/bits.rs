use std::mem;
use std::ops::Range;

/// Reads and updates packed fields inside a register value.
///
/// Position 0 is the least significant bit. Ranges are half open, so the
/// seconds field of a packed time register is `0..6`.
///
/// Note: none of the functions do any bounds checks
pub trait BitIndex: Sized + Copy {
    /// Size of `Self` in bits
    const SIZE: usize = mem::size_of::<Self>() * 8;

    /// Mask with the low `width` bits set
    fn field_mask(width: usize) -> Self;

    /// Obtains the field inside the given range, shifted down to bit 0
    fn bit_range(self, pos: Range<usize>) -> Self;

    /// Replaces the field inside the given range.
    ///
    /// Bits of `val` that do not fit in the field are dropped.
    fn set_bit_range(&mut self, pos: Range<usize>, val: Self) -> &mut Self;
}

macro_rules! bit_index_impl {
	( $($ty:ty),* ) => {$(
		impl BitIndex for $ty {
			#[inline]
			fn field_mask(width: usize) -> Self {
				if width >= Self::SIZE {
					<$ty>::MAX
				} else {
					(1 << width) - 1
				}
			}

			#[inline]
			fn bit_range(self, pos: Range<usize>) -> Self {
				(self >> pos.start) & Self::field_mask(pos.end - pos.start)
			}

			#[inline]
			fn set_bit_range(&mut self, pos: Range<usize>, val: Self) -> &mut Self {
				let mask = Self::field_mask(pos.end - pos.start);
				*self = *self & !(mask << pos.start) | (val & mask) << pos.start;
				self
			}
		}
	)*};
}

bit_index_impl!(u32, u16, u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_range() {
        // hours / minutes / seconds of 13:45:07
        let time = 0x0D2D_0007u32;
        assert_eq!(time.bit_range(24..29), 13);
        assert_eq!(time.bit_range(16..22), 45);
        assert_eq!(time.bit_range(0..6), 7);
        assert_eq!(0xAAu8.bit_range(4..8), 0xA);
    }

    #[test]
    fn full_width_range() {
        assert_eq!(0xDEAD_BEEFu32.bit_range(0..32), 0xDEAD_BEEF);
        assert_eq!(*0u16.set_bit_range(0..16, 0xFFFF), 0xFFFF);
    }

    #[test]
    fn set_bit_range() {
        let mut time = 0u32;
        time.set_bit_range(24..29, 23)
            .set_bit_range(16..22, 59)
            .set_bit_range(0..6, 59);
        assert_eq!(time, 0x173B_003B);
    }

    #[test]
    fn set_bit_range_drops_overflowing_bits() {
        assert_eq!(*0u32.set_bit_range(0..6, 0xFF), 0x3F);
        assert_eq!(*0xFFu8.set_bit_range(4..8, 0x13), 0x3F);
    }
}
