use codspeed_criterion_compat::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jsontree::{JsonParser, SerdeJsonParser, SonicParser};

static HANDLERS: &[u8] = include_bytes!("../tests/data/handlers.json");

fn wide_document() -> Vec<u8> {
    let items: Vec<String> = (0..1_000)
        .map(|idx| format!(r#"{{"id":{idx},"ratio":{idx}.25,"name":"item-{idx}","tags":[true,null]}}"#))
        .collect();
    format!("[{}]", items.join(",")).into_bytes()
}

fn bench_parse(c: &mut Criterion) {
    let wide = wide_document();
    let documents = [("handlers", HANDLERS), ("wide", wide.as_slice())];
    let serde_json = SerdeJsonParser::default();
    let sonic = SonicParser::default();

    let mut group = c.benchmark_group("parse");

    for (name, data) in &documents {
        group.bench_with_input(BenchmarkId::new("serde_json", name), data, |b, data| {
            b.iter(|| serde_json.parse_slice(data).expect("Valid JSON"));
        });
        group.bench_with_input(BenchmarkId::new("sonic-rs", name), data, |b, data| {
            b.iter(|| sonic.parse_slice(data).expect("Valid JSON"));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
