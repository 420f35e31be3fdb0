use crate::{
    consts::{PLLCR, PLLCR_DISPLL},
    dispatch::PeripheralBus,
};

/// Hook into the CPU core that executes instructions in timeslices.
pub trait CpuControl {
    /// Stop running the current batch of instructions right away
    fn end_timeslice(&mut self);
}

/// Used when no CPU core is attached
#[derive(Debug, Default, Clone, Copy)]
pub struct FreeRunning;

impl CpuControl for FreeRunning {
    fn end_timeslice(&mut self) {}
}

impl PeripheralBus {
    /// The core only runs while the PLL is enabled
    pub fn is_powered(&self) -> bool {
        self.regs.read::<u16>(PLLCR) & PLLCR_DISPLL == 0
    }

    pub(crate) fn check_power_down(&mut self) {
        if !self.is_powered() {
            info!("PLL disabled, cpu halted");
            self.cpu.end_timeslice();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Width;
    use std::{cell::Cell, rc::Rc};

    #[derive(Default, Clone)]
    struct Counter(Rc<Cell<usize>>);

    impl CpuControl for Counter {
        fn end_timeslice(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn powered_after_reset() {
        let bus = PeripheralBus::new(Vec::new(), FreeRunning);
        assert!(bus.is_powered());
    }

    #[test]
    fn disable_ends_timeslice_once_per_write() {
        let counter = Counter::default();
        let mut bus = PeripheralBus::new(Vec::new(), counter.clone());

        bus.write(Width::Half, PLLCR, 0x24BB);
        assert_eq!(counter.0.get(), 1);
        assert!(!bus.is_powered());

        bus.write(Width::Half, PLLCR, 0x24BB);
        assert_eq!(counter.0.get(), 2);
    }

    #[test]
    fn enabled_write_does_not_signal() {
        let counter = Counter::default();
        let mut bus = PeripheralBus::new(Vec::new(), counter.clone());

        bus.write(Width::Half, PLLCR, 0x24B3);
        assert_eq!(counter.0.get(), 0);
        assert!(bus.is_powered());
    }

    #[test]
    fn other_registers_never_signal() {
        let counter = Counter::default();
        let mut bus = PeripheralBus::new(Vec::new(), counter.clone());

        bus.write(Width::Half, 0x208, 0xFFFF);
        bus.write(Width::Half, crate::consts::PLLFSR, 0x0FFF);
        assert_eq!(counter.0.get(), 0);
    }
}
