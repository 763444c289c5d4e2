use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use snmp_graph_plugin::{
    agent::{AgentConfig, PluginHelper},
    metrics::schema,
    parse_declaration, Reading, Registry,
};
use std::hint::black_box;

/// Interface counter declarations like the ones a switch graph would use
fn declarations(count: usize) -> Vec<String> {
    (1..=count)
        .map(|i| format!("1.3.6.1.2.1.2.2.1.10.{}:if{}InOctets:1:1", i, i))
        .collect()
}

/// Benchmark parsing of single declarations
fn bench_declaration_parsing(c: &mut Criterion) {
    c.bench_function("parse_declaration", |b| {
        b.iter(|| parse_declaration(black_box("1.3.6.1.2.1.2.2.1.10.1:ifInOctets:true:true")))
    });

    c.bench_function("parse_declaration_skipped", |b| {
        b.iter(|| parse_declaration(black_box("1.3.6.1.2.1.1.3.0")))
    });
}

/// Benchmark registry construction and schema building
fn bench_schema_building(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_definition");

    for count in [1, 16, 128] {
        let registry = Registry::from_declarations("switch", "bytes/sec", declarations(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &registry, |b, registry| {
            b.iter(|| schema::graph_definition(black_box(registry)))
        });
    }

    group.finish();
}

/// Benchmark value output for plain metrics
fn bench_value_output(c: &mut Criterion) {
    let registry = Registry::from_declarations(
        "host",
        "float",
        (1..=64).map(|i| format!("1.3.6.1.4.1.2021.11.{}.0:gauge{}", i, i)),
    );
    let definition = schema::graph_definition(&registry);
    let mut reading = Reading::new();
    for i in 1..=64 {
        reading.insert(format!("gauge{}", i), i as f64 * 1.5);
    }

    c.bench_function("emit_values", |b| {
        b.iter(|| {
            let mut helper = PluginHelper::new(AgentConfig::default(), Vec::with_capacity(4096));
            helper
                .emit_at(black_box(&definition), black_box(&reading), 1_700_000_000)
                .expect("Should write values");
            helper.into_inner()
        })
    });
}

criterion_group!(
    benches,
    bench_declaration_parsing,
    bench_schema_building,
    bench_value_output
);
criterion_main!(benches);
