use criterion::{black_box, criterion_group, criterion_main, Criterion};

use symqa_core::scoring::{compute_f1, exact_match, score_against_references};
use symqa_core::text::{normalize, tokenize_for_matching};

const PASSAGE: &str = "A Universidade Federal de Santa Catarina (UFSC) é uma universidade \
pública brasileira, sediada em Florianópolis. Foi fundada em 1960 e hoje oferece \
mais de cem cursos de graduação.";

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    group.bench_function("short", |b| {
        b.iter(|| normalize(black_box("O Rio de Janeiro.")))
    });

    group.bench_function("passage", |b| b.iter(|| normalize(black_box(PASSAGE))));

    group.finish();
}

fn bench_f1(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_f1");

    group.bench_function("exact", |b| {
        b.iter(|| exact_match(black_box("Florianópolis"), black_box("florianópolis")))
    });

    group.bench_function("partial", |b| {
        b.iter(|| {
            compute_f1(
                black_box("sediada em Florianópolis"),
                black_box("Florianópolis, Santa Catarina"),
            )
        })
    });

    group.bench_function("passage_vs_answer", |b| {
        b.iter(|| compute_f1(black_box(PASSAGE), black_box("1960")))
    });

    let references = ["1960", "em 1960", "no ano de 1960"];
    group.bench_function("three_references", |b| {
        b.iter(|| score_against_references(black_box("fundada em 1960"), black_box(&references)))
    });

    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_for_matching");

    group.bench_function("question", |b| {
        b.iter(|| tokenize_for_matching(black_box("Em que ano foi fundada a UFSC?")))
    });

    group.bench_function("passage", |b| {
        b.iter(|| tokenize_for_matching(black_box(PASSAGE)))
    });

    group.finish();
}

criterion_group!(benches, bench_normalize, bench_f1, bench_tokenize);
criterion_main!(benches);
