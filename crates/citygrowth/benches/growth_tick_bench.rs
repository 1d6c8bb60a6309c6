//! Criterion benchmark: one full `FixedUpdate` tick with every zone growing.
//!
//! Builds the same road lattice as `connectivity_bench`, warms the city up so
//! zones span several phases, then times single ticks.
//!
//! Run with: cargo bench -p citygrowth --bench growth_tick_bench --features bench

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};

use citygrowth::config::{GRID_HEIGHT, GRID_WIDTH};
use citygrowth::grid::WorldGrid;
use citygrowth::structures::StructureKind;
use citygrowth::test_harness::TestCity;

const BLOCK: usize = 8;

fn build_lattice(grid: &mut WorldGrid) {
    let last = (GRID_WIDTH / BLOCK - 1) * BLOCK;
    for i in (0..=last).step_by(BLOCK) {
        grid.place_line(StructureKind::Road, (0, i), (GRID_WIDTH - 1, i))
            .expect("horizontal road");
        for y in (0..GRID_HEIGHT).filter(|y| y % BLOCK != 0) {
            grid.place_structure(StructureKind::Road, i, y)
                .expect("vertical road");
        }
    }
    for by in (0..=last).step_by(BLOCK).filter(|y| y + BLOCK < GRID_HEIGHT) {
        for bx in (0..=last).step_by(BLOCK).filter(|x| x + BLOCK < GRID_WIDTH) {
            grid.place_structure(StructureKind::Residential, bx + 1, by + 1).expect("zone");
            grid.place_structure(StructureKind::Commercial, bx + 4, by + 1).expect("zone");
            grid.place_structure(StructureKind::Industrial, bx + 1, by + 4).expect("zone");
            grid.place_structure(StructureKind::Residential, bx + 4, by + 4).expect("zone");
            grid.place_line(StructureKind::PowerLine, (bx + 1, by + 7), (bx + 6, by + 7))
                .expect("south line");
            grid.place_line(StructureKind::PowerLine, (bx + 7, by + 1), (bx + 7, by + 6))
                .expect("east line");
            grid.place_structure(StructureKind::WindTurbine, bx + 7, by + 7)
                .expect("turbine");
        }
    }
}

fn bench_growth_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("growth_tick");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(15));

    let mut city = TestCity::new().with_seed(1);
    build_lattice(&mut city.world_mut().resource_mut::<WorldGrid>());
    city.tick(300);

    group.bench_function("lattice_3844_zones", |b| {
        b.iter(|| city.tick(1));
    });

    group.finish();
}

criterion_group!(benches, bench_growth_tick);
criterion_main!(benches);
