use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use quartz_soc::{consts::*, FreeRunning, PeripheralBus, Scheduler, Width};

fn create_bus() -> PeripheralBus {
    let mut bus = PeripheralBus::new(Vec::new(), FreeRunning);
    bus.write(Width::Half, RTCCTL, RTCCTL_EN as u32);
    bus
}

pub fn register_access(c: &mut Criterion) {
    c.bench_function("pllfsr_write", |b| {
        let mut bus = create_bus();
        b.iter(|| bus.write(Width::Half, PLLFSR, black_box(0x0347)))
    });

    c.bench_function("port_read", |b| {
        let mut bus = create_bus();
        b.iter(|| black_box(bus.read(Width::Byte, black_box(PMSEL))))
    });
}

pub fn emulated_second(c: &mut Criterion) {
    c.bench_function("run_one_second", |b| {
        b.iter_batched(
            // setup
            || {
                let bus = create_bus();
                let sched = Scheduler::new(&bus);
                (bus, sched)
            },
            // bencher
            |(mut bus, mut sched)| {
                let cycles = bus.clock().frequency as u64;
                sched.advance(&mut bus, cycles);
                black_box(bus.calendar())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = register_access, emulated_second
}
criterion_main!(benches);
