use crate::{
    clock::ClockState,
    consts::*,
    diag::{DiagnosticSink, LogSink, Observation},
    memory::{MemoryValue, Width},
    power::{CpuControl, FreeRunning},
    regfile::{RegisterFile, SnapshotError},
};

/// What happens after a masked value has been stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Plain,
    /// Dropped while PLLFSR.PROT is set, recomputes the clock otherwise
    PllFrequency,
    /// Recomputes the clock, then may halt the core
    PllControl,
    Calendar,
    /// Writes are discarded
    Fixed,
}

#[derive(Debug, Clone, Copy)]
pub struct RegisterSpec {
    pub name: &'static str,
    pub offset: u32,
    pub width: Width,
    /// Bits that take the written value, the rest are stored as zero
    pub mask: u32,
    pub effect: Effect,
}

const fn reg(
    name: &'static str,
    offset: u32,
    width: Width,
    mask: u32,
    effect: Effect,
) -> RegisterSpec {
    RegisterSpec {
        name,
        offset,
        width,
        mask,
        effect,
    }
}

const fn port(name: &'static str, offset: u32, mask: u32) -> RegisterSpec {
    reg(name, offset, Width::Byte, mask, Effect::Plain)
}

#[rustfmt::skip]
pub const REGISTERS: &[RegisterSpec] = &[
    reg("IDR",     IDR,     Width::Word, 0x0000_0000, Effect::Fixed),
    reg("PLLCR",   PLLCR,   Width::Half, 0x3FBB,      Effect::PllControl),
    reg("PLLFSR",  PLLFSR,  Width::Half, 0x4FFF,      Effect::PllFrequency),
    reg("LSSA",    LSSA,    Width::Word, 0xFFFF_FFFF, Effect::Plain),
    // masked only, so the CPU can store 31:63:63; the next tick carries it back into range
    reg("RTCTIME", RTCTIME, Width::Word, 0x1F3F_003F, Effect::Calendar),
    reg("RTCCTL",  RTCCTL,  Width::Half, 0x00A0,      Effect::Plain),
    reg("DAYR",    DAYR,    Width::Half, 0x01FF,      Effect::Calendar),
    // bits 13, 9, 8 and 7 do not exist
    reg("SDCTRL",  SDCTRL,  Width::Half, 0xDC7F,      Effect::Plain),

    // port select
    port("PBSEL", PBSEL, 0xFF),
    port("PCSEL", PCSEL, 0xFF),
    port("PDSEL", PDSEL, 0xF0),
    port("PESEL", PESEL, 0xFF),
    port("PFSEL", PFSEL, 0xFF),
    port("PGSEL", PGSEL, 0x3F),
    port("PJSEL", PJSEL, 0xFF),
    port("PKSEL", PKSEL, 0xFF),
    port("PMSEL", PMSEL, 0x3F),

    // pull up / pull down enable
    port("PAPUEN", PAPUEN, 0xFF),
    port("PBPUEN", PBPUEN, 0xFF),
    port("PCPDEN", PCPDEN, 0xFF),
    port("PDPUEN", PDPUEN, 0xFF),
    port("PEPUEN", PEPUEN, 0xFF),
    port("PFPUEN", PFPUEN, 0xFF),
    port("PGPUEN", PGPUEN, 0x3F),
    port("PJPUEN", PJPUEN, 0xFF),
    port("PKPUEN", PKPUEN, 0xFF),
    port("PMPUEN", PMPUEN, 0x3F),
];

impl RegisterSpec {
    fn end(&self) -> u32 {
        self.offset + self.width.bytes() as u32
    }

    fn overlaps(&self, start: u32, end: u32) -> bool {
        self.offset < end && start < self.end()
    }
}

/// Every documented register with at least one byte inside the access
pub fn lookup(width: Width, offset: u32) -> impl Iterator<Item = &'static RegisterSpec> {
    let end = offset + width.bytes() as u32;
    REGISTERS
        .iter()
        .filter(move |spec| spec.overlaps(offset, end))
}

/// True when some byte of the access belongs to no documented register
fn has_undocumented_bytes(width: Width, offset: u32) -> bool {
    (offset..offset + width.bytes() as u32)
        .any(|addr| lookup(Width::Byte, addr).next().is_none())
}

/// The MC68VZ328 peripheral register window.
///
/// Created once at startup and handed by reference to whoever issues CPU
/// accesses. Offsets are relative to [`REG_BASE`]; the caller guarantees they
/// are inside the window and aligned to the access width.
pub struct PeripheralBus {
    pub(crate) regs: RegisterFile,
    pub(crate) clock: ClockState,
    sink: Box<dyn DiagnosticSink>,
    pub(crate) cpu: Box<dyn CpuControl>,
}

impl PeripheralBus {
    pub fn new<S, C>(sink: S, cpu: C) -> Self
    where
        S: DiagnosticSink + 'static,
        C: CpuControl + 'static,
    {
        let mut bus = Self {
            regs: RegisterFile::new(),
            clock: ClockState::default(),
            sink: Box::new(sink),
            cpu: Box::new(cpu),
        };
        bus.reset_all();
        bus
    }

    pub fn read(&mut self, width: Width, offset: u32) -> u32 {
        let value = self.regs.read_width(width, offset);
        if has_undocumented_bytes(width, offset) {
            self.sink.observe(Observation::read(width, offset, value));
        }
        value
    }

    /// Writes `value` with the semantics of every register the access touches.
    ///
    /// A register only partly covered by the access keeps its other bytes and
    /// still goes through its mask, protect check and effect. Bytes outside
    /// any documented register are stored raw and reported once.
    pub fn write(&mut self, width: Width, offset: u32, value: u32) {
        let value = value & width.mask();
        let bytes = value.to_be_bytes();
        let bytes = &bytes[4 - width.bytes()..];

        let mut undocumented = false;
        for (addr, &byte) in (offset..).zip(bytes) {
            if lookup(Width::Byte, addr).next().is_none() {
                self.regs.write_width(Width::Byte, addr, byte as u32);
                undocumented = true;
            }
        }

        for spec in lookup(width, offset) {
            let mut merged = self.regs.read_width(spec.width, spec.offset);
            for (addr, &byte) in (offset..).zip(bytes) {
                if spec.overlaps(addr, addr + 1) {
                    let shift = (spec.end() - 1 - addr) * 8;
                    merged = (merged & !(0xFF << shift)) | (byte as u32) << shift;
                }
            }
            self.write_register(spec, merged);
        }

        if undocumented {
            self.sink.observe(Observation::write(width, offset, value));
        }
    }

    pub fn read_value<T: MemoryValue>(&mut self, offset: u32) -> T {
        T::truncate(self.read(T::WIDTH, offset))
    }

    pub fn write_value<T: MemoryValue>(&mut self, offset: u32, value: T) {
        self.write(T::WIDTH, offset, value.widen())
    }

    fn write_register(&mut self, spec: &RegisterSpec, value: u32) {
        match spec.effect {
            Effect::Fixed => {
                trace!("ignoring write of 0x{value:08X} to {}", spec.name);
                return;
            }
            Effect::PllFrequency if self.frequency_protected() => {
                trace!("PLLFSR is protected, dropping 0x{value:04X}");
                return;
            }
            _ => {}
        }

        self.regs.write_width(spec.width, spec.offset, value & spec.mask);

        match spec.effect {
            Effect::PllFrequency => self.recompute_clock(),
            Effect::PllControl => {
                self.recompute_clock();
                self.check_power_down();
            }
            Effect::Calendar => {
                debug!("{} written, calendar is now {}", spec.name, self.calendar())
            }
            Effect::Plain | Effect::Fixed => {}
        }
    }

    /// Raw view of the register window, e.g. for snapshots
    pub fn registers(&self) -> &[u8] {
        self.regs.as_bytes()
    }

    /// Restores a snapshot taken with [`PeripheralBus::registers`]
    pub fn load_registers(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        self.regs.load(bytes)?;
        self.recompute_clock();
        Ok(())
    }
}

impl Default for PeripheralBus {
    fn default() -> Self {
        Self::new(LogSink, FreeRunning)
    }
}
