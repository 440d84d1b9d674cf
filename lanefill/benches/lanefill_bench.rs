use std::hint::black_box;
use std::path::Path;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use lanefill::config::LFConfig;
use lanefill::io;
use lanefill::opt::lanefill_opt::LaneFillOptimizer;
use lanefill::opt::monitor::NoMonitor;
use marker_core::entities::Instance;
use marker_core::io::import::Importer;

criterion_main!(benches);
criterion_group!(benches, full_run_bench);

const INSTANCE_PATH: &str = "../assets/mixed_styles.json";
const GRID_STEPS: [f64; 3] = [3.0, 2.0, 1.0];

fn create_instance(config: &LFConfig) -> Instance {
    let ext_instance = io::read_instance(Path::new(INSTANCE_PATH)).unwrap();
    Importer::new(config.lane_a_suffix.clone())
        .import_instance(&ext_instance)
        .unwrap()
}

/// Benchmark a complete run for different grid resolutions.
fn full_run_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_run");
    for grid_step in GRID_STEPS {
        let config = LFConfig {
            grid_step,
            ..LFConfig::default()
        };
        let instance = create_instance(&config);

        group.bench_function(BenchmarkId::from_parameter(grid_step), |b| {
            b.iter(|| {
                let optimizer = LaneFillOptimizer::new(instance.clone(), config.clone()).unwrap();
                black_box(optimizer.solve(&mut NoMonitor))
            })
        });
    }
    group.finish();
}
