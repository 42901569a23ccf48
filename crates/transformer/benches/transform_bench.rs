use criterion::{Criterion, black_box, criterion_group, criterion_main};
use html::parse_document;
use html::perf_fixtures::make_blocks;
use transformer::{Config, Context, Engine, Request, Transformer, process};
use url::Url;

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 5_000;
const DOCUMENT_URL: &str = "https://www.example.com/article";

fn bench_process_small(c: &mut Criterion) {
    let request = Request::new(make_blocks(SMALL_BLOCKS), DOCUMENT_URL);
    c.bench_function("bench_process_small", |b| {
        b.iter(|| black_box(process(black_box(&request)).map(|output| output.html.len())));
    });
}

fn bench_process_large(c: &mut Criterion) {
    let request = Request::new(make_blocks(LARGE_BLOCKS), DOCUMENT_URL);
    c.bench_function("bench_process_large", |b| {
        b.iter(|| black_box(process(black_box(&request)).map(|output| output.html.len())));
    });
}

fn bench_transformers_only(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let document_url = Url::parse(DOCUMENT_URL).expect("bench url");
    let transformers = Config::Default.transformers().expect("default config");
    c.bench_function("bench_transformers_only", |b| {
        b.iter_batched(
            || parse_document(&input),
            |dom| {
                let context = Context::new(document_url.clone());
                black_box(Engine::new(dom, context, transformers.clone()).transform().len())
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_server_side_rendering(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let document_url = Url::parse(DOCUMENT_URL).expect("bench url");
    c.bench_function("bench_server_side_rendering", |b| {
        b.iter_batched(
            || parse_document(&input),
            |dom| {
                let context = Context::new(document_url.clone());
                let engine = Engine::new(dom, context, vec![Transformer::ServerSideRendering]);
                black_box(engine.transform().len())
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_process_small,
    bench_process_large,
    bench_transformers_only,
    bench_server_side_rendering
);
criterion_main!(benches);
