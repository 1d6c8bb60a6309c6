//! Criterion benchmarks for connectivity recalculation.
//!
//! Benchmarks:
//!   - full recalculation on a 256x256 road lattice with ~3.8K zones
//!   - transport network discovery alone
//!   - energy grid discovery alone
//!   - identity resolution inside a zone footprint
//!
//! Run with: cargo bench -p citygrowth --bench connectivity_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use citygrowth::config::{GRID_HEIGHT, GRID_WIDTH};
use citygrowth::connectivity::{
    discover_energy_grids, discover_transport_networks, ConnectivityEngine,
};
use citygrowth::grid::WorldGrid;
use citygrowth::identity::resolve_identity;
use citygrowth::structures::StructureKind;

const BLOCK: usize = 8;

/// Roads every 8 cells in both directions. Each block holds four zones, an
/// L of power line along its south and east edges, and a wind turbine in the
/// corner.
fn lattice_city() -> WorldGrid {
    let mut grid = WorldGrid::new(GRID_WIDTH, GRID_HEIGHT);
    let last = (GRID_WIDTH / BLOCK - 1) * BLOCK;
    for i in (0..=last).step_by(BLOCK) {
        grid.place_line(StructureKind::Road, (0, i), (GRID_WIDTH - 1, i))
            .expect("horizontal road");
        for y in (0..GRID_HEIGHT).filter(|y| y % BLOCK != 0) {
            grid.place_structure(StructureKind::Road, i, y)
                .expect("vertical road");
        }
    }

    let zones = [
        StructureKind::Residential,
        StructureKind::Commercial,
        StructureKind::Industrial,
        StructureKind::Residential,
    ];
    for by in (0..=last).step_by(BLOCK).filter(|y| y + BLOCK < GRID_HEIGHT) {
        for bx in (0..=last).step_by(BLOCK).filter(|x| x + BLOCK < GRID_WIDTH) {
            let offsets = [(1, 1), (4, 1), (1, 4), (4, 4)];
            for (kind, (dx, dy)) in zones.iter().zip(offsets) {
                grid.place_structure(*kind, bx + dx, by + dy).expect("zone");
            }
            grid.place_line(StructureKind::PowerLine, (bx + 1, by + 7), (bx + 6, by + 7))
                .expect("south line");
            grid.place_line(StructureKind::PowerLine, (bx + 7, by + 1), (bx + 7, by + 6))
                .expect("east line");
            grid.place_structure(StructureKind::WindTurbine, bx + 7, by + 7)
                .expect("turbine");
        }
    }
    grid
}

fn bench_recalculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("connectivity_recalculate");
    group.sample_size(20);

    let grid = lattice_city();
    let mut engine = ConnectivityEngine::default();

    group.bench_function("full_lattice", |b| {
        b.iter(|| {
            engine.recalculate(black_box(&grid));
            black_box(engine.networks().len())
        });
    });

    group.bench_function("transport_only", |b| {
        b.iter(|| black_box(discover_transport_networks(black_box(&grid))));
    });

    group.bench_function("energy_only", |b| {
        b.iter(|| black_box(discover_energy_grids(black_box(&grid))));
    });

    group.finish();
}

fn bench_identity(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_resolution");
    group.sample_size(1000);

    let grid = lattice_city();

    group.bench_function("zone_interior", |b| {
        b.iter(|| black_box(resolve_identity(&grid, black_box(10), black_box(11))));
    });

    group.finish();
}

criterion_group!(benches, bench_recalculate, bench_identity);
criterion_main!(benches);
