use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::PathBuf;

use hbsc::assemble::assemble;
use hbsc::input::{collect_inputs, InputFacts};
use hbsc::naming::{resolve_name, ExtensionPattern};
use hbsc::options::CompileOptions;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

const PAYLOAD: &str = r#"{"compiler":[8,">= 4.3.0"],"main":function(container,depth0,helpers,partials,data) {
    return "<h2>" + container.escapeExpression(container.lambda(depth0 != null ? depth0.title : depth0, depth0)) + "</h2>";
},"useData":true}"#;

fn bench_resolve_name(c: &mut Criterion) {
    let pattern = ExtensionPattern::new("handlebars|hbs|mustache").unwrap();

    c.bench_function("resolve_name", |b| {
        b.iter(|| {
            let name = resolve_name(
                black_box("app/views/users/profile/card.handlebars"),
                Some("app/views"),
                &pattern,
            );
            black_box(name)
        });
    });
}

fn bench_assemble(c: &mut Criterion) {
    let facts = InputFacts::new(4, false);
    let default_options = CompileOptions::default();
    let amd_options = CompileOptions {
        amd: true,
        partial: true,
        ..CompileOptions::default()
    };

    c.bench_function("assemble_default", |b| {
        b.iter(|| black_box(assemble("card", black_box(PAYLOAD), &default_options, &facts)));
    });

    c.bench_function("assemble_amd_partial", |b| {
        b.iter(|| black_box(assemble("card", black_box(PAYLOAD), &amd_options, &facts)));
    });
}

fn bench_collect_inputs(c: &mut Criterion) {
    let sources = vec![fixture_path("templates")];
    let pattern = ExtensionPattern::new("handlebars|hbs").unwrap();

    c.bench_function("collect_inputs", |b| {
        b.iter(|| {
            let inputs = collect_inputs(black_box(&sources), &pattern, &[]).unwrap();
            black_box(inputs)
        });
    });
}

criterion_group!(
    benches,
    bench_resolve_name,
    bench_assemble,
    bench_collect_inputs
);
criterion_main!(benches);
