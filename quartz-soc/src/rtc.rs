//! MC68VZ328 real time clock.
//!
//! RTCTIME packs the time of day into one word: hours in bits 24..29, minutes
//! in 16..22 and seconds in 0..6. DAYR counts days in its low 9 bits and wraps
//! silently. Neither register is touched by a chip reset.

use crate::{
    consts::{DAYR, PLLFSR, PLLFSR_CLK32, RTCCTL, RTCCTL_EN, RTCTIME},
    dispatch::PeripheralBus,
};
use chrono::{Datelike, NaiveDateTime, Timelike};
use quartz_common::BitIndex;
use std::{fmt, ops::Range};

const HOURS: Range<usize> = 24..29;
const MINUTES: Range<usize> = 16..22;
const SECONDS: Range<usize> = 0..6;
const DAYS: Range<usize> = 0..9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calendar {
    pub days: u16,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {} {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl PeripheralBus {
    pub fn rtc_enabled(&self) -> bool {
        self.regs.read::<u16>(RTCCTL) & RTCCTL_EN != 0
    }

    pub fn calendar(&self) -> Calendar {
        let time = self.regs.read::<u32>(RTCTIME);
        Calendar {
            days: self.regs.read::<u16>(DAYR).bit_range(DAYS),
            hours: time.bit_range(HOURS) as u8,
            minutes: time.bit_range(MINUTES) as u8,
            seconds: time.bit_range(SECONDS) as u8,
        }
    }

    /// Advances the clock by one second, called once per emulated second
    pub fn tick_second(&mut self) {
        if !self.rtc_enabled() {
            return;
        }

        let time = self.regs.read::<u32>(RTCTIME);
        let mut hours = time.bit_range(HOURS);
        let mut minutes = time.bit_range(MINUTES);
        let mut seconds = time.bit_range(SECONDS);

        seconds += 1;
        if seconds >= 60 {
            seconds = 0;
            minutes += 1;
            if minutes >= 60 {
                minutes = 0;
                hours += 1;
                if hours >= 24 {
                    hours = 0;
                    let days = self.regs.read::<u16>(DAYR);
                    self.regs.write::<u16>(DAYR, days.wrapping_add(1).bit_range(DAYS));
                }
            }
        }

        self.store_time(hours, minutes, seconds);
    }

    /// Sets the calendar directly, whether or not the clock is running.
    ///
    /// Each field keeps only the bits its register has room for.
    pub fn set_absolute(&mut self, days: u32, hours: u32, minutes: u32, seconds: u32) {
        self.store_time(hours, minutes, seconds);
        self.regs.write::<u16>(DAYR, (days as u16).bit_range(DAYS));
    }

    /// Copies the host's local time of day into the clock. The day counter
    /// gets the day of the year.
    pub fn sync_to_host(&mut self, now: NaiveDateTime) {
        self.set_absolute(now.ordinal0(), now.hour(), now.minute(), now.second());
        info!("rtc synced to host, {}", self.calendar());
    }

    /// Flips PLLFSR.CLK32, once per edge of the 32 kHz reference clock
    pub fn toggle_clk32(&mut self) {
        let pllfsr = self.regs.read::<u16>(PLLFSR);
        self.regs.write::<u16>(PLLFSR, pllfsr ^ PLLFSR_CLK32);
    }

    fn store_time(&mut self, hours: u32, minutes: u32, seconds: u32) {
        let mut time = 0u32;
        time.set_bit_range(HOURS, hours)
            .set_bit_range(MINUTES, minutes)
            .set_bit_range(SECONDS, seconds);
        self.regs.write::<u32>(RTCTIME, time);
    }
}
