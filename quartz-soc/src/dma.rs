//! PXA260 DMA controller, register level only.
//!
//! Moving data and raising the interrupt line belong to the attached
//! [`DmaEngine`]; this module keeps the channel registers and tells the engine
//! when software starts a channel or programs a command.

use crate::{
    diag::{DiagnosticSink, LogSink, Observation},
    memory::Width,
};
use bitflags::bitflags;
use quartz_common::{flume::Sender, Register};

pub const DMA_BASE: u32 = 0x4000_0000;
pub const DMA_SIZE: u32 = 0x1000;

pub const DMA_CHANNELS: usize = 16;
pub const DMA_MAP_ENTRIES: usize = 40;

pub const REG_DCSR: u32 = 0x000;
pub const REG_DINT: u32 = 0x0F0;
pub const REG_DRCMR: u32 = 0x100;
pub const REG_DDADR: u32 = 0x200;

const DDADR_MASK: u32 = 0xFFFF_FFF1;
const DSADR_MASK: u32 = 0xFFFF_FFFC;
const DTADR_MASK: u32 = 0xFFFF_FFFC;
const DCMD_MASK: u32 = 0xF067_DFFF;

/// DCMD: raise ENDINTR when the transfer finishes
const DCMD_ENDIRQEN: u32 = 1 << 21;

static_assertions::const_assert!(REG_DCSR + 4 * DMA_CHANNELS as u32 <= REG_DINT);
static_assertions::const_assert!(REG_DRCMR + 4 * DMA_MAP_ENTRIES as u32 <= REG_DDADR);
static_assertions::const_assert!(REG_DDADR + 16 * DMA_CHANNELS as u32 <= DMA_SIZE);

bitflags! {
    pub struct Dcsr: u32 {
        const RUN = 1 << 31;
        const NODESCFETCH = 1 << 30;
        const STOPIRQEN = 1 << 29;
        const STOPSTATE = 1 << 3;
        const ENDINTR = 1 << 2;
        const STARTINTR = 1 << 1;
        const BUSERRINTR = 1 << 0;
    }
}

impl Dcsr {
    const WRITABLE: Dcsr = Dcsr {
        bits: Dcsr::RUN.bits | Dcsr::NODESCFETCH.bits | Dcsr::STOPIRQEN.bits,
    };
    const WRITE_ONE_TO_CLEAR: Dcsr = Dcsr {
        bits: Dcsr::ENDINTR.bits | Dcsr::STARTINTR.bits | Dcsr::BUSERRINTR.bits,
    };

    fn interrupt_pending(self) -> bool {
        self.intersects(Self::WRITE_ONE_TO_CLEAR)
            || self.contains(Self::STOPIRQEN | Self::STOPSTATE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DmaEvent {
    /// DCSR.RUN went from 0 to 1
    Start(usize),
    /// DCMD was written
    Command(usize),
}

pub trait DmaEngine {
    fn notify(&mut self, event: DmaEvent, channel: &DmaChannel);
}

/// Used when nothing moves data
#[derive(Debug, Default, Clone, Copy)]
pub struct Detached;

impl DmaEngine for Detached {
    fn notify(&mut self, _event: DmaEvent, _channel: &DmaChannel) {}
}

impl DmaEngine for Sender<DmaEvent> {
    fn notify(&mut self, event: DmaEvent, _channel: &DmaChannel) {
        let _ = self.send(event);
    }
}

#[derive(Debug, Clone)]
pub struct DmaChannel {
    pub descriptor: Register<u32>,
    pub source: Register<u32>,
    pub target: Register<u32>,
    pub command: Register<u32>,
    status: Dcsr,
}

impl DmaChannel {
    fn new() -> Self {
        Self {
            descriptor: Register::new(DDADR_MASK),
            source: Register::new(DSADR_MASK),
            target: Register::new(DTADR_MASK),
            command: Register::new(DCMD_MASK),
            status: Dcsr::STOPSTATE,
        }
    }

    pub fn status(&self) -> Dcsr {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status.contains(Dcsr::RUN)
    }

    fn reset(&mut self) {
        self.descriptor.reset();
        self.source.reset();
        self.target.reset();
        self.command.reset();
        self.status = Dcsr::STOPSTATE;
    }

    /// Returns true when the write started the channel
    fn write_status(&mut self, value: u32) -> bool {
        let written = Dcsr::from_bits_truncate(value);
        let was_running = self.is_running();

        let mut status = self.status - (written & Dcsr::WRITE_ONE_TO_CLEAR);
        status = (status - Dcsr::WRITABLE) | (written & Dcsr::WRITABLE);
        status.set(Dcsr::STOPSTATE, !status.contains(Dcsr::RUN));
        self.status = status;

        !was_running && self.is_running()
    }
}

/// Which register a window offset decodes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DmaRegister {
    Status(usize),
    Interrupt,
    Map(usize),
    Descriptor(usize),
    Source(usize),
    Target(usize),
    Command(usize),
}

impl DmaRegister {
    fn decode(offset: u32) -> Option<Self> {
        if offset & 3 != 0 {
            return None;
        }
        let reg = match offset {
            REG_DINT => DmaRegister::Interrupt,
            0x000..=0x03C => DmaRegister::Status((offset / 4) as usize),
            0x100..=0x19C => DmaRegister::Map(((offset - REG_DRCMR) / 4) as usize),
            0x200..=0x2FC => {
                let channel = ((offset - REG_DDADR) / 16) as usize;
                match offset & 0xF {
                    0x0 => DmaRegister::Descriptor(channel),
                    0x4 => DmaRegister::Source(channel),
                    0x8 => DmaRegister::Target(channel),
                    _ => DmaRegister::Command(channel),
                }
            }
            _ => return None,
        };
        Some(reg)
    }
}

/// Register file of the PXA260 DMA controller.
///
/// Offsets are relative to [`DMA_BASE`]. Only word accesses are decoded;
/// anything else reads as zero, drops writes and is reported to the sink.
pub struct DmaController<E> {
    channels: [DmaChannel; DMA_CHANNELS],
    /// DRCMR, only the low byte of each mapping is kept
    map: [u8; DMA_MAP_ENTRIES],
    engine: E,
    sink: Box<dyn DiagnosticSink>,
}

impl<E: DmaEngine> DmaController<E> {
    pub fn new<S>(engine: E, sink: S) -> Self
    where
        S: DiagnosticSink + 'static,
    {
        Self {
            channels: std::array::from_fn(|_| DmaChannel::new()),
            map: [0; DMA_MAP_ENTRIES],
            engine,
            sink: Box::new(sink),
        }
    }

    pub fn reset(&mut self) {
        self.channels.iter_mut().for_each(DmaChannel::reset);
        self.map = [0; DMA_MAP_ENTRIES];
    }

    pub fn channel(&self, id: usize) -> &DmaChannel {
        &self.channels[id]
    }

    /// DINT, one bit per channel with an interrupt pending
    pub fn interrupts(&self) -> u32 {
        self.channels
            .iter()
            .enumerate()
            .filter(|(_, channel)| channel.status.interrupt_pending())
            .fold(0, |dint, (id, _)| dint | 1 << id)
    }

    /// Called by the engine when a channel runs out of work. Returns true if
    /// the controller now has an interrupt to raise.
    pub fn complete(&mut self, id: usize) -> bool {
        let channel = &mut self.channels[id];
        channel.status.remove(Dcsr::RUN);
        channel.status.insert(Dcsr::STOPSTATE);
        if channel.command.read() & DCMD_ENDIRQEN != 0 {
            channel.status.insert(Dcsr::ENDINTR);
        }
        self.interrupts() != 0
    }

    pub fn read(&mut self, width: Width, offset: u32) -> u32 {
        let reg = match (width, DmaRegister::decode(offset)) {
            (Width::Word, Some(reg)) => reg,
            _ => {
                self.sink.observe(Observation::read(width, offset, 0));
                return 0;
            }
        };

        match reg {
            DmaRegister::Status(id) => self.channels[id].status.bits(),
            DmaRegister::Interrupt => self.interrupts(),
            DmaRegister::Map(index) => self.map[index] as u32,
            DmaRegister::Descriptor(id) => self.channels[id].descriptor.read(),
            DmaRegister::Source(id) => self.channels[id].source.read(),
            DmaRegister::Target(id) => self.channels[id].target.read(),
            DmaRegister::Command(id) => self.channels[id].command.read(),
        }
    }

    pub fn write(&mut self, width: Width, offset: u32, value: u32) {
        let reg = match (width, DmaRegister::decode(offset)) {
            (Width::Word, Some(reg)) => reg,
            _ => {
                self.sink.observe(Observation::write(width, offset, value));
                return;
            }
        };

        match reg {
            DmaRegister::Status(id) => {
                if self.channels[id].write_status(value) {
                    debug!("DMA{id} started");
                    self.engine.notify(DmaEvent::Start(id), &self.channels[id]);
                }
            }
            DmaRegister::Interrupt => trace!("ignoring write of 0x{value:08X} to DINT"),
            DmaRegister::Map(index) => self.map[index] = value as u8,
            DmaRegister::Descriptor(id) => self.channels[id].descriptor.write(value),
            DmaRegister::Source(id) => self.channels[id].source.write(value),
            DmaRegister::Target(id) => self.channels[id].target.write(value),
            DmaRegister::Command(id) => {
                self.channels[id].command.write(value);
                self.engine.notify(DmaEvent::Command(id), &self.channels[id]);
            }
        }
    }
}

impl Default for DmaController<Detached> {
    fn default() -> Self {
        Self::new(Detached, LogSink)
    }
}
