//! Classification Benchmarks
//!
//! Benchmarks for scanning and classifying synthetic source files.
//!
//! Run with: `cargo bench --bench classify_ops`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tracecov::{analyze, classify, scan_text, seed_from_record, RawExecutionRecord};

/// Build a module of `functions` small functions with banners and docstrings.
fn synthetic_module(functions: usize) -> String {
    let mut text = String::new();
    for i in 0..functions {
        text.push_str(&format!("# helper {i}\n"));
        text.push_str(&format!("def helper_{i}(a,\n             b):\n"));
        text.push_str("    \"\"\"Combine two values.\"\"\"\n");
        text.push_str("    total = (a +\n             b)\n");
        text.push_str("    return total\n\n");
    }
    text
}

/// Every third line reported, roughly what a partial test run produces.
fn synthetic_record(text: &str) -> RawExecutionRecord {
    let lines = text.lines().count() as u32;
    RawExecutionRecord::new("bench.py", (1..=lines).step_by(3).collect())
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_text");

    for functions in [10, 100, 1000] {
        let text = synthetic_module(functions);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_functions", functions)),
            &text,
            |bench, text| {
                bench.iter(|| black_box(scan_text(black_box(text))));
            },
        );
    }

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for functions in [10, 100, 1000] {
        let text = synthetic_module(functions);
        let lines = scan_text(&text);
        let record = synthetic_record(&text);
        let seed = seed_from_record(Some(&record), lines.len());
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_functions", functions)),
            &(seed, lines),
            |bench, (seed, lines)| {
                bench.iter(|| black_box(classify(black_box(seed), black_box(lines))));
            },
        );
    }

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let text = synthetic_module(500);
    let record = synthetic_record(&text);

    c.bench_function("analyze_500_functions", |bench| {
        bench.iter(|| black_box(analyze(black_box(&text), Some(&record))));
    });
}

criterion_group!(benches, bench_scan, bench_classify, bench_analyze);
criterion_main!(benches);
