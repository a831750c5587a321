use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::Deserialize;
use serde_toml_lite::{from_str, parse, to_json};

#[derive(Deserialize)]
#[allow(dead_code)]
struct Service {
    name: String,
    port: u16,
    replicas: u32,
    tags: Vec<String>,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct Deployment {
    title: String,
    service: Vec<Service>,
}

const SIMPLE: &str = "name = \"api\"\nport = 8080\nenabled = true\nratio = 0.75\n";

fn deployment(services: usize) -> String {
    let mut doc = String::from("title = \"bench\"\n\n");
    for i in 0..services {
        doc.push_str(&format!(
            "[[service]]\nname = \"svc-{i}\"\nport = {}\nreplicas = {}\ntags = [\"a\", \"b\", \"c\"]\n\n",
            8000 + i,
            i % 5
        ));
    }
    doc
}

fn benchmark_parse_simple(c: &mut Criterion) {
    c.bench_function("parse_simple_document", |b| b.iter(|| parse(black_box(SIMPLE))));
}

fn benchmark_parse_arrays_of_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_array_of_tables");
    for size in [10, 100, 1000] {
        let doc = deployment(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| parse(black_box(doc)))
        });
    }
    group.finish();
}

fn benchmark_typed_deserialize(c: &mut Criterion) {
    let doc = deployment(100);
    c.bench_function("from_str_deployment_100", |b| {
        b.iter(|| from_str::<Deployment>(black_box(&doc)))
    });
}

fn benchmark_render(c: &mut Criterion) {
    let root = parse(&deployment(100)).expect("bench document parses");
    c.bench_function("to_toml_string_deployment_100", |b| {
        b.iter(|| black_box(&root).to_toml_string())
    });
    c.bench_function("to_json_deployment_100", |b| b.iter(|| to_json(black_box(&root))));
}

criterion_group!(
    benches,
    benchmark_parse_simple,
    benchmark_parse_arrays_of_tables,
    benchmark_typed_deserialize,
    benchmark_render
);
criterion_main!(benches);
