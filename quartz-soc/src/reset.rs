use crate::{consts::*, dispatch::PeripheralBus, memory::Width};

/// Power on values of every register that does not reset to zero
#[rustfmt::skip]
pub const RESET_VALUES: &[(u32, Width, u32)] = &[
    // system control
    (SCR,      Width::Byte, 0x1C),
    (IDR,      Width::Word, CHIP_ID),
    (IODCR,    Width::Half, 0x1FFF),

    // chip selects
    (CSA,      Width::Half, 0x00B0),
    (CSD,      Width::Half, 0x0200),
    (EMUCS,    Width::Half, 0x0060),

    // phase locked loop
    (PLLCR,    Width::Half, 0x24B3),
    (PLLFSR,   Width::Half, 0x0347),

    // power control
    (PCTLR,    Width::Byte, 0x1F),

    // interrupts
    (IMR,      Width::Word, 0x00FF_FFFF),
    (ILCR,     Width::Half, 0x6533),

    // gpio ports
    (PADATA,   Width::Byte, 0xFF),
    (PAPUEN,   Width::Byte, 0xFF),

    (PBDATA,   Width::Byte, 0xFF),
    (PBPUEN,   Width::Byte, 0xFF),
    (PBSEL,    Width::Byte, 0xFF),

    (PCPDEN,   Width::Byte, 0xFF),
    (PCSEL,    Width::Byte, 0xFF),

    (PDDATA,   Width::Byte, 0xFF),
    (PDPUEN,   Width::Byte, 0xFF),
    (PDSEL,    Width::Byte, 0xF0),

    (PEDATA,   Width::Byte, 0xFF),
    (PEPUEN,   Width::Byte, 0xFF),
    (PESEL,    Width::Byte, 0xFF),

    (PFDATA,   Width::Byte, 0xFF),
    (PFPUEN,   Width::Byte, 0xFF),
    (PFSEL,    Width::Byte, 0x87),

    (PGDATA,   Width::Byte, 0x3F),
    (PGPUEN,   Width::Byte, 0x3D),
    (PGSEL,    Width::Byte, 0x08),

    (PJDATA,   Width::Byte, 0xFF),
    (PJPUEN,   Width::Byte, 0xFF),
    (PJSEL,    Width::Byte, 0xEF),

    (PKDATA,   Width::Byte, 0x0F),
    (PKPUEN,   Width::Byte, 0xFF),
    (PKSEL,    Width::Byte, 0xFF),

    (PMDATA,   Width::Byte, 0x20),
    (PMPUEN,   Width::Byte, 0x3F),
    (PMSEL,    Width::Byte, 0x3F),

    // pulse width modulator
    (PWMC1,    Width::Half, 0x0020),
    (PWMP1,    Width::Byte, 0xFE),

    // timers
    (TCMP1,    Width::Half, 0xFFFF),
    (TCMP2,    Width::Half, 0xFFFF),

    // uarts
    (UBAUD1,   Width::Half, 0x003F),
    (UBAUD2,   Width::Half, 0x003F),
    (HMARK,    Width::Half, 0x0102),

    // built in lcd controller, unused when an external one is fitted
    (LVPW,     Width::Byte, 0xFF),
    (LXMAX,    Width::Half, 0x03F0),
    (LYMAX,    Width::Half, 0x01FF),
    (LCWCH,    Width::Half, 0x0101),
    (LBLKC,    Width::Byte, 0x7F),
    (LRRA,     Width::Byte, 0xFF),
    (LGPMR,    Width::Byte, 0x84),
    (DMACR,    Width::Byte, 0x62),

    // real time clock, RTCTIME and DAYR keep counting through a reset
    (WATCHDOG, Width::Half, 0x0001),
    // the datasheet calls RTCCTL and STPWCH 8 bit but lists 16 bit values
    (RTCCTL,   Width::Half, 0x0080),
    (STPWCH,   Width::Half, 0x003F),

    // sdram control
    (SDCTRL,   Width::Half, 0x003C),
];

impl PeripheralBus {
    /// Puts every register back to its power on value, except the calendar.
    ///
    /// Safe to call any number of times; the result only depends on the
    /// calendar registers going in.
    pub fn reset_all(&mut self) {
        let time = self.regs.read::<u32>(RTCTIME);
        let days = self.regs.read::<u16>(DAYR);

        self.regs.clear();
        for &(offset, width, value) in RESET_VALUES {
            self.regs.write_width(width, offset, value);
        }

        self.regs.write::<u32>(RTCTIME, time);
        self.regs.write::<u16>(DAYR, days);
        self.recompute_clock();

        info!("peripheral registers reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::compute_frequency, power::FreeRunning};

    #[test]
    fn reset_is_idempotent() {
        let mut bus = PeripheralBus::new(Vec::new(), FreeRunning);
        bus.reset_all();
        let first = bus.registers().to_vec();
        bus.reset_all();
        assert_eq!(bus.registers(), &first[..]);
    }

    #[test]
    fn reset_undoes_writes() {
        let mut bus = PeripheralBus::new(Vec::new(), FreeRunning);
        let fresh = bus.registers().to_vec();
        bus.write(Width::Half, PLLFSR, 0x4123);
        bus.write(Width::Byte, PBSEL, 0x00);
        bus.write(Width::Word, 0x700, 0xDEAD_BEEF);
        bus.reset_all();
        assert_eq!(bus.registers(), &fresh[..]);
        assert_eq!(bus.clock(), compute_frequency(0x24B3, 0x0347));
    }

    #[test]
    fn calendar_survives_reset() {
        let mut bus = PeripheralBus::new(Vec::new(), FreeRunning);
        bus.set_absolute(300, 17, 42, 9);
        let calendar = bus.calendar();
        bus.reset_all();
        assert_eq!(bus.calendar(), calendar);
    }

    #[test]
    fn every_entry_fits_the_window() {
        for &(offset, width, value) in RESET_VALUES {
            assert!(offset as usize + width.bytes() <= REG_SIZE);
            assert_eq!(value & width.mask(), value, "0x{offset:03X}");
        }
    }

    #[test]
    fn documented_defaults() {
        let bus = PeripheralBus::new(Vec::new(), FreeRunning);
        assert_eq!(bus.regs.read::<u8>(SCR), 0x1C);
        assert_eq!(bus.regs.read::<u32>(IDR), 0x5600_0000);
        assert_eq!(bus.regs.read::<u16>(PLLCR), 0x24B3);
        assert_eq!(bus.regs.read::<u8>(PDSEL), 0xF0);
        assert_eq!(bus.regs.read::<u16>(SDCTRL), 0x003C);
        assert!(bus.rtc_enabled());
    }
}
