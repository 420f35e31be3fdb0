//! Turns elapsed CPU cycles into 32 kHz reference clock ticks and RTC seconds.

use crate::{consts::CRYSTAL_FREQUENCY, dispatch::PeripheralBus};
use std::{cell::Cell, cmp::Ordering, collections::BinaryHeap};

const NUM_EVENTS: usize = 4;

/// Events due at the same time run in declaration order
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Copy, Clone)]
pub enum EventType {
    Clk32Tick,
    RunLimitReached,
}

#[derive(Debug, Clone, Eq)]
pub struct Event {
    ty: EventType,
    time: u64,
    cancel: Cell<bool>,
}

impl Event {
    fn new(ty: EventType, time: u64) -> Event {
        Event {
            ty,
            time,
            cancel: Cell::new(false),
        }
    }

    fn is_canceled(&self) -> bool {
        self.cancel.get()
    }
}

/// Earliest event first
impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.ty.cmp(&other.ty))
            .reverse()
    }
}

impl PartialOrd for Event {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.ty == other.ty
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    timestamp: u64,
    events: BinaryHeap<Event>,
    clk32_ticks: u32,
    seconds: u64,
}

impl Scheduler {
    /// Starts the reference clock at the bus's current frequency
    pub fn new(bus: &PeripheralBus) -> Self {
        let mut sched = Self {
            timestamp: 0,
            events: BinaryHeap::with_capacity(NUM_EVENTS),
            clk32_ticks: 0,
            seconds: 0,
        };
        sched.push(EventType::Clk32Tick, bus.clock().clk32_cycles as u64);
        sched
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Emulated seconds elapsed, whether or not the RTC was counting
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn push(&mut self, ty: EventType, cycles: u64) {
        self.events.push(Event::new(ty, self.timestamp + cycles));
    }

    pub fn cancel(&mut self, ty: EventType) {
        self.events
            .iter()
            .filter(|e| e.ty == ty)
            .for_each(|e| e.cancel.set(true));
        self.drop_canceled();
    }

    /// Keeps a live event at the top of the queue
    fn drop_canceled(&mut self) {
        while self.events.peek().map_or(false, Event::is_canceled) {
            self.events.pop();
        }
    }

    pub fn cycles_to_next_event(&self) -> u64 {
        self.events
            .peek()
            .map_or(0, |event| event.time.saturating_sub(self.timestamp))
    }

    fn pop_pending_event(&mut self) -> Option<EventType> {
        let due = self.events.peek()?.time <= self.timestamp;
        if !due {
            return None;
        }
        let event = self.events.pop();
        self.drop_canceled();
        event.map(|event| event.ty)
    }

    /// Restarts the current reference clock period, e.g. after the PLL was
    /// reprogrammed
    pub fn retime(&mut self, bus: &PeripheralBus) {
        self.cancel(EventType::Clk32Tick);
        self.push(EventType::Clk32Tick, bus.clock().clk32_cycles as u64);
    }

    /// Runs the bus forward by `cycles` CPU cycles
    pub fn advance(&mut self, bus: &mut PeripheralBus, cycles: u64) {
        self.push(EventType::RunLimitReached, cycles);

        loop {
            self.timestamp += self.cycles_to_next_event();
            while let Some(ty) = self.pop_pending_event() {
                match ty {
                    EventType::RunLimitReached => return,
                    EventType::Clk32Tick => self.clk32_tick(bus),
                }
            }
        }
    }

    fn clk32_tick(&mut self, bus: &mut PeripheralBus) {
        bus.toggle_clk32();

        self.clk32_ticks += 1;
        if self.clk32_ticks == CRYSTAL_FREQUENCY {
            self.clk32_ticks = 0;
            self.seconds += 1;
            bus.tick_second();
        }

        // the PLL may have changed since the last tick
        self.push(EventType::Clk32Tick, bus.clock().clk32_cycles as u64);
    }
}
