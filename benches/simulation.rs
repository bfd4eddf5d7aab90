//! Benchmarks for the Lenia Trails lattice step and full ticks.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use lenia_trails::{
    Kernel, LatticeState, Simulation, SimulationConfig, SimulationParams,
};

fn bench_lattice_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice_step");

    for size in [64, 128, 256] {
        let params = SimulationParams {
            seed_radius: size as f32 / 6.0,
            ..Default::default()
        };
        let kernel = Kernel::build(params.kernel_radius);
        let growth = params.growth();

        let mut lattice = LatticeState::new(size, size);
        lattice.reseed(params.seed_radius);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size, size)),
            &size,
            |b, _| {
                b.iter(|| {
                    lattice.step(black_box(&kernel), &growth, params.dt);
                });
            },
        );
    }

    group.finish();
}

fn bench_kernel_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_radius");

    for radius in [10.0f32, 14.0, 18.0] {
        let params = SimulationParams {
            kernel_radius: radius,
            ..Default::default()
        };
        let kernel = Kernel::build(radius);
        let growth = params.growth();

        let mut lattice = LatticeState::new(113, 64);
        lattice.reseed(params.seed_radius);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("R{}", radius)),
            &radius,
            |b, _| {
                b.iter(|| {
                    lattice.step(black_box(&kernel), &growth, params.dt);
                });
            },
        );
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let config = SimulationConfig {
        rng_seed: Some(0),
        ..Default::default()
    };
    let mut sim = Simulation::new(config).expect("default config is valid");

    c.bench_function("tick_113x64", |b| {
        b.iter(|| {
            sim.tick();
            black_box(sim.trail());
        });
    });
}

criterion_group!(benches, bench_lattice_step, bench_kernel_radius, bench_tick);
criterion_main!(benches);
