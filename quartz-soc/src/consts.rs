//! MC68VZ328 register offsets, relative to [`REG_BASE`].

pub const REG_BASE: u32 = 0xFFFF_F000;
pub const REG_SIZE: usize = 0x1000;

/// Frequency of the 32.768 kHz reference crystal
pub const CRYSTAL_FREQUENCY: u32 = 32768;

// system control
pub const SCR: u32 = 0x000;
pub const IDR: u32 = 0x004;
pub const IODCR: u32 = 0x008;

// chip selects
pub const CSA: u32 = 0x110;
pub const CSD: u32 = 0x116;
pub const EMUCS: u32 = 0x118;

// phase locked loop and power control
pub const PLLCR: u32 = 0x200;
pub const PLLFSR: u32 = 0x202;
pub const PCTLR: u32 = 0x207;

// interrupts
pub const IMR: u32 = 0x304;
pub const ILCR: u32 = 0x314;

// gpio ports
pub const PADATA: u32 = 0x401;
pub const PAPUEN: u32 = 0x402;

pub const PBDATA: u32 = 0x409;
pub const PBPUEN: u32 = 0x40A;
pub const PBSEL: u32 = 0x40B;

pub const PCPDEN: u32 = 0x412;
pub const PCSEL: u32 = 0x413;

pub const PDDATA: u32 = 0x419;
pub const PDPUEN: u32 = 0x41A;
pub const PDSEL: u32 = 0x41B;

pub const PEDATA: u32 = 0x421;
pub const PEPUEN: u32 = 0x422;
pub const PESEL: u32 = 0x423;

pub const PFDATA: u32 = 0x429;
pub const PFPUEN: u32 = 0x42A;
pub const PFSEL: u32 = 0x42B;

pub const PGDATA: u32 = 0x431;
pub const PGPUEN: u32 = 0x432;
pub const PGSEL: u32 = 0x433;

pub const PJDATA: u32 = 0x439;
pub const PJPUEN: u32 = 0x43A;
pub const PJSEL: u32 = 0x43B;

pub const PKDATA: u32 = 0x441;
pub const PKPUEN: u32 = 0x442;
pub const PKSEL: u32 = 0x443;

pub const PMDATA: u32 = 0x449;
pub const PMPUEN: u32 = 0x44A;
pub const PMSEL: u32 = 0x44B;

// pulse width modulator
pub const PWMC1: u32 = 0x500;
pub const PWMP1: u32 = 0x504;

// timers
pub const TCMP1: u32 = 0x604;
pub const TCMP2: u32 = 0x614;

// uarts
pub const UBAUD1: u32 = 0x902;
pub const UBAUD2: u32 = 0x912;
pub const HMARK: u32 = 0x920;

// lcd controller
pub const LSSA: u32 = 0xA00;
pub const LVPW: u32 = 0xA05;
pub const LXMAX: u32 = 0xA08;
pub const LYMAX: u32 = 0xA0A;
pub const LCWCH: u32 = 0xA1C;
pub const LBLKC: u32 = 0xA1F;
pub const LRRA: u32 = 0xA29;
pub const LGPMR: u32 = 0xA33;
pub const DMACR: u32 = 0xA39;

// real time clock
pub const RTCTIME: u32 = 0xB00;
pub const WATCHDOG: u32 = 0xB0A;
pub const RTCCTL: u32 = 0xB0C;
pub const STPWCH: u32 = 0xB12;
pub const DAYR: u32 = 0xB1A;

// dram controller
pub const SDCTRL: u32 = 0xC04;

/// PLLCR: PLL disabled, the core is halted
pub const PLLCR_DISPLL: u16 = 0x0008;
/// PLLCR: prescaler 1 divides the PLL output by two
pub const PLLCR_PRESC1: u16 = 0x0080;

/// PLLFSR: frequency fields are locked
pub const PLLFSR_PROT: u16 = 0x4000;
/// PLLFSR: level of the 32 kHz reference clock
pub const PLLFSR_CLK32: u16 = 0x8000;

/// RTCCTL: real time clock enabled
pub const RTCCTL_EN: u16 = 0x0080;

/// Value hardwired into IDR
pub const CHIP_ID: u32 = 0x5600_0000;

static_assertions::const_assert!(REG_SIZE.is_power_of_two());
static_assertions::const_assert!((SDCTRL as usize) < REG_SIZE);
