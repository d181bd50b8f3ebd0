//! Criterion benchmarks for the fleet view engine.
//!
//! Measures the pure filter/aggregate pass and a full engine update (feed
//! drift + derive + present) at increasing fleet sizes.
//!
//! Run with: cargo bench -p fleet --bench filter_bench --features bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use fleet::commands::FleetCommand;
use fleet::demo_feed::DemoFeed;
use fleet::feed::FeedUpdate;
use fleet::filter_engine::filter_vehicles;
use fleet::filter_state::FilterState;
use fleet::stats::aggregate;
use fleet::test_harness::TestFleet;
use fleet::{VehicleStatus, ZoneId};

const FLEET_SIZES: [usize; 3] = [100, 1_000, 10_000];

fn restricted_filter() -> FilterState {
    let mut filter = FilterState::default();
    filter.toggle_zone(ZoneId::new("Z-N"));
    filter.toggle_zone(ZoneId::new("Z-C"));
    filter.toggle_status(VehicleStatus::Available);
    filter.set_query("a");
    filter
}

fn bench_filter_and_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_aggregate");
    let filter = restricted_filter();
    for size in FLEET_SIZES {
        let snapshot = DemoFeed::from_seed(1).snapshot(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, s| {
            b.iter(|| {
                let visible = filter_vehicles(&s.vehicles, &s.zones, black_box(&filter));
                black_box(aggregate(visible.iter().copied(), &s.zones))
            });
        });
    }
    group.finish();
}

fn bench_engine_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_update_with_drift");
    for size in FLEET_SIZES {
        let mut demo = DemoFeed::from_seed(2);
        let mut fleet = TestFleet::new();
        fleet.feed(FeedUpdate::Snapshot(demo.snapshot(size)));
        fleet.command(FleetCommand::ToggleStatus {
            status: VehicleStatus::Busy,
        });

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            b.iter(|| {
                let update = demo.drift(fleet.store());
                fleet.feed(update);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filter_and_aggregate, bench_engine_update);
criterion_main!(benches);
