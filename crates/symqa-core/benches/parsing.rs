use criterion::{black_box, criterion_group, criterion_main, Criterion};

use symqa_core::phrases::build_sentence_map;
use symqa_core::pipeline::sentence_map_from_trees;
use symqa_core::splitter::prepare_sentences;
use symqa_core::tree::Tree;

const TREE: &str = "(ROOT (S (NP (ART A) (N universidade)) (VP (V foi) (VP (V fundada) \
(PP (P em) (NP (NUM 1960))))) (PNT .)))";

fn bench_tree_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_parse");

    group.bench_function("sentence", |b| b.iter(|| Tree::parse(black_box(TREE))));

    let nested = {
        let mut s = String::from("(ROOT ");
        for _ in 0..30 {
            s.push_str("(S (NP (N Ana)) (VP (V disse) ");
        }
        s.push_str("(S (NP Rui) (VP nada))");
        for _ in 0..30 {
            s.push_str("))");
        }
        s.push(')');
        s
    };
    group.bench_function("nested_30", |b| b.iter(|| Tree::parse(black_box(&nested))));

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    let trees: Vec<Tree> = (0..20).map(|_| Tree::parse(TREE).unwrap()).collect();
    group.bench_function("sentence_map_20", |b| {
        b.iter(|| build_sentence_map(black_box(&trees)))
    });

    let raw: Vec<String> = (0..20).map(|_| TREE.to_string()).collect();
    group.bench_function("from_raw_20", |b| {
        b.iter(|| sentence_map_from_trees(black_box(&raw)))
    });

    group.finish();
}

fn bench_splitter(c: &mut Criterion) {
    let passage = "O Sr. Silva chegou ao Rio de Janeiro em 1960. A cidade (então capital) \
era famosa por suas praias! Ver No. 5 para detalhes. Ele ficou lá, trabalhou, e voltou.";

    c.bench_function("prepare_sentences", |b| {
        b.iter(|| prepare_sentences(black_box(passage)))
    });
}

criterion_group!(benches, bench_tree_parse, bench_extraction, bench_splitter);
criterion_main!(benches);
