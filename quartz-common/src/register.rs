use num_traits::PrimInt;

pub trait RegisterValue: PrimInt {}

impl RegisterValue for u8 {}
impl RegisterValue for u16 {}
impl RegisterValue for u32 {}

/// A hardware register with a fixed set of writable bits.
///
/// CPU writes go through [`Register::write`] and only land on the bits in
/// `mask`; everything else reads back as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register<T> {
    data: T,
    mask: T,
    reset: T,
}

impl<T> Register<T>
where
    T: RegisterValue,
{
    pub fn new(mask: T) -> Self {
        Self::with_reset(mask, T::zero())
    }

    fn with_reset(mask: T, reset: T) -> Self {
        Self {
            data: reset,
            mask,
            reset,
        }
    }

    #[inline]
    pub fn read(&self) -> T {
        self.data
    }

    #[inline]
    pub fn write(&mut self, value: T) {
        self.data = value & self.mask;
    }

    pub fn reset(&mut self) {
        self.data = self.reset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_is_masked() {
        let mut reg = Register::new(0xFFFF_FFFCu32);
        reg.write(0xA000_0003);
        assert_eq!(reg.read(), 0xA000_0000);
        reg.write(0x3);
        assert_eq!(reg.read(), 0);
    }

    #[test]
    fn reset_restores_initial_value() {
        let mut reg = Register::with_reset(0xFFFF_FFFFu32, 8);
        reg.write(0x1234);
        reg.reset();
        assert_eq!(reg.read(), 8);
    }
}
