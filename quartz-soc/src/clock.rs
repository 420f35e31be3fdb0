use crate::{
    consts::{CRYSTAL_FREQUENCY, PLLCR, PLLCR_PRESC1, PLLFSR, PLLFSR_PROT},
    dispatch::PeripheralBus,
};
use quartz_common::BitIndex;

/// CPU timing derived from the PLL registers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockState {
    /// CPU cycles per second
    pub frequency: u32,
    /// CPU cycles per period of the 32 kHz reference clock
    pub clk32_cycles: u32,
}

/// Derives the CPU clock from PLLCR and PLLFSR.
///
/// The prescaler divide is integer division, matching the values measured on
/// hardware.
pub fn compute_frequency(pllcr: u16, pllfsr: u16) -> ClockState {
    let prescaler = if pllcr & PLLCR_PRESC1 != 0 { 2 } else { 1 };
    let p = pllfsr.bit_range(0..8) as u32;
    let q = pllfsr.bit_range(8..12) as u32;
    let clk32_cycles = 2 * (14 * (p + 1) + q + 1) / prescaler;

    ClockState {
        frequency: clk32_cycles * CRYSTAL_FREQUENCY,
        clk32_cycles,
    }
}

impl PeripheralBus {
    pub fn clock(&self) -> ClockState {
        self.clock
    }

    pub(crate) fn frequency_protected(&self) -> bool {
        self.regs.read::<u16>(PLLFSR) & PLLFSR_PROT != 0
    }

    pub(crate) fn recompute_clock(&mut self) {
        let clock = compute_frequency(self.regs.read(PLLCR), self.regs.read(PLLFSR));
        if clock != self.clock {
            debug!(
                "new cpu frequency of {} Hz, {} cycles per clk32 period",
                clock.frequency, clock.clk32_cycles
            );
        }
        self.clock = clock;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{memory::Width, power::FreeRunning};

    #[test]
    fn reset_defaults_oracle() {
        assert_eq!(
            compute_frequency(0x24B3, 0x0347),
            ClockState {
                frequency: 33_161_216,
                clk32_cycles: 1012,
            }
        );
    }

    #[test]
    fn prescaler_halves_cycles() {
        assert_eq!(compute_frequency(0x0000, 0x0000).clk32_cycles, 30);
        assert_eq!(compute_frequency(0x0080, 0x0000).clk32_cycles, 15);
        assert_eq!(compute_frequency(0x0080, 0x0100).clk32_cycles, 16);
        assert_eq!(compute_frequency(0x0080, 0x0200).clk32_cycles, 17);
    }

    #[test]
    fn ignores_protect_and_clk32_bits() {
        assert_eq!(
            compute_frequency(0x24B3, 0xC347),
            compute_frequency(0x24B3, 0x0347)
        );
    }

    #[test]
    fn bus_starts_at_reset_frequency() {
        let bus = PeripheralBus::new(Vec::new(), FreeRunning);
        assert_eq!(bus.clock().frequency, 33_161_216);
    }

    #[test]
    fn pllfsr_write_recomputes() {
        let mut bus = PeripheralBus::new(Vec::new(), FreeRunning);
        bus.write(Width::Half, PLLFSR, 0x0123);
        assert_eq!(bus.clock(), compute_frequency(0x24B3, 0x0123));
    }

    #[test]
    fn pllcr_write_recomputes() {
        let mut bus = PeripheralBus::new(Vec::new(), FreeRunning);
        bus.write(Width::Half, PLLCR, 0x2433);
        assert_eq!(bus.clock().clk32_cycles, 2024);
    }

    #[test]
    fn protect_bit_freezes_pllfsr() {
        let mut bus = PeripheralBus::new(Vec::new(), FreeRunning);
        bus.write(Width::Half, PLLFSR, 0x4347);
        let locked = bus.clock();

        bus.write(Width::Half, PLLFSR, 0x0123);
        assert_eq!(bus.read(Width::Half, PLLFSR), 0x4347);
        assert_eq!(bus.clock(), locked);

        bus.reset_all();
        bus.write(Width::Half, PLLFSR, 0x0123);
        assert_eq!(bus.read(Width::Half, PLLFSR), 0x0123);
        assert_eq!(bus.clock(), compute_frequency(0x24B3, 0x0123));
    }
}
