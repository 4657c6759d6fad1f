use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rulefold::{DecisionEngine, ParallelConfig, Table};

/// Score bands over `rows` rows, with a combined-column rule in front.
fn build_table(rows: usize) -> Table {
    Table::builder()
        .numeric("score", (0..rows).map(|i| (i % 120) as f64))
        .numeric("model1", (0..rows).map(|i| (i % 60) as f64))
        .numeric("model2", (0..rows).map(|i| (i % 45) as f64))
        .strings(
            "region",
            (0..rows).map(|i| ["eu", "us", "ap"][i % 3]),
        )
        .strings("label", (0..rows).map(|i| format!("row{i}")))
        .build()
        .unwrap()
}

fn build_engine(parallel: ParallelConfig) -> DecisionEngine {
    DecisionEngine::builder("action")
        .default_action("high")
        .rule("model1 + model2 > 90 and region == 'eu'", "label")
        .rule("score < 80", "low")
        .rule("score <= 99", "medium")
        .rule("score > 99", "high")
        .parallel(parallel)
        .build()
        .unwrap()
}

fn bench_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("execute");

    for &rows in &[1_000, 100_000, 1_000_000] {
        let table = build_table(rows);
        let sequential = build_engine(ParallelConfig::disabled());
        group.bench_function(&format!("{rows}_rows_sequential"), |b| {
            b.iter(|| sequential.execute(black_box(&table)).unwrap());
        });

        let parallel = build_engine(ParallelConfig::default());
        group.bench_function(&format!("{rows}_rows_parallel"), |b| {
            b.iter(|| parallel.execute(black_box(&table)).unwrap());
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask");
    let table = build_table(100_000);

    for condition in ["score < 80", "model1 + model2 > 90 and region == 'eu'"] {
        let expr = rulefold::parse::parse(condition).unwrap();
        group.bench_function(condition, |b| {
            b.iter(|| rulefold::evaluate(black_box(&expr), black_box(&table)).unwrap());
        });
    }

    group.finish();
}

fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for &n in &[5, 20, 50] {
        let rules: Vec<(String, String)> = (0..n)
            .map(|i| (format!("(f{i} + 1) * 2 >= {i} and tier != 'x'"), format!("a{i}")))
            .collect();
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| DecisionEngine::new("k", "d", black_box(rules.clone())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_execute, bench_evaluate, bench_construct);
criterion_main!(benches);
