//! Benchmarks for the demo enhancement transform.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use signal_enhancer::{enhance, ProcessingConfig};
use signal_table::{Column, Table};

fn test_table(rows: usize, channels: usize) -> Table {
    let mut columns = vec![Column::numeric(
        "Time",
        (0..rows).map(|i| i as f64 / 256.0).collect(),
    )];
    for c in 0..channels {
        columns.push(Column::numeric(
            format!("ch{c}"),
            (0..rows)
                .map(|i| {
                    let t = i as f64 / 256.0;
                    (2.0 * std::f64::consts::PI * (8.0 + c as f64) * t).sin()
                })
                .collect(),
        ));
    }
    Table::new(columns)
}

fn benchmark_enhance(c: &mut Criterion) {
    let config = ProcessingConfig::default();

    let table_small = test_table(100, 8);
    let table_full = test_table(500, 8);

    c.bench_function("enhance_100x8", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(7);
            enhance(black_box(&table_small), &config, &mut rng)
        })
    });

    c.bench_function("enhance_500x8", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(7);
            enhance(black_box(&table_full), &config, &mut rng)
        })
    });
}

criterion_group!(benches, benchmark_enhance);
criterion_main!(benches);
