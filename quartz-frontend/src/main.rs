#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::new_without_default
)]

use chrono::Local;
use config::CONFIG;
use log::{debug, info};
use quartz_common::flume::{self, Receiver};
use quartz_soc::{
    consts::{REG_BASE, RTCCTL, RTCCTL_EN},
    FreeRunning, LogSink, Observation, PeripheralBus, Scheduler, Width,
};
use std::collections::BTreeMap;

mod config;

fn main() -> color_eyre::Result<()> {
    simple_logger::init_with_level(CONFIG.log_level)?;
    color_eyre::install()?;

    let (tx, rx) = flume::unbounded();
    let mut bus = if CONFIG.log_observations {
        PeripheralBus::new(LogSink, FreeRunning)
    } else {
        PeripheralBus::new(tx, FreeRunning)
    };

    if CONFIG.enable_rtc {
        bus.write(Width::Half, RTCCTL, RTCCTL_EN as u32);
    }
    if CONFIG.sync_rtc {
        bus.sync_to_host(Local::now().naive_local());
    }

    info!(
        "running at {} Hz for {} emulated seconds",
        bus.clock().frequency,
        CONFIG.seconds
    );

    let mut sched = Scheduler::new(&bus);
    for _ in 0..CONFIG.seconds {
        if !bus.is_powered() {
            info!("cpu halted, stopping early");
            break;
        }
        let cycles = u64::from(bus.clock().frequency);
        sched.advance(&mut bus, cycles);
        debug!("{}", bus.calendar());
    }

    info!(
        "stopped after {} cycles, rtc reads {}",
        sched.timestamp(),
        bus.calendar()
    );
    summarize(&rx);

    Ok(())
}

/// Lists every undocumented register the run touched
fn summarize(rx: &Receiver<Observation>) {
    let mut hits: BTreeMap<u32, usize> = BTreeMap::new();
    for observation in rx.try_iter() {
        *hits.entry(observation.offset).or_default() += 1;
    }

    for (offset, count) in hits {
        info!(
            "undocumented register 0x{:08X} accessed {} times",
            REG_BASE + offset,
            count
        );
    }
}
