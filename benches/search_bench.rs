use criterion::{criterion_group, criterion_main, Criterion};
use webdex::{Index, Searcher, WordBag};

fn build_index(docs: usize) -> Index {
    let mut index = Index::new();
    for i in 0..docs {
        let text = format!(
            "spam and eggs document {i} with some shared words like search \
             engine index ranking and a unique token word{i}"
        );
        let bag = WordBag::new(&text);
        index
            .incorporate(&format!("www.site{i}.com"), bag.iter())
            .unwrap();
    }
    index
}

fn bench_search(c: &mut Criterion) {
    let searcher = Searcher::from_index(build_index(500));
    c.bench_function("search_three_terms", |b| {
        b.iter(|| searcher.search("spam search ranking"))
    });
}

fn bench_incorporate(c: &mut Criterion) {
    c.bench_function("incorporate_500_docs", |b| b.iter(|| build_index(500)));
}

criterion_group!(benches, bench_search, bench_incorporate);
criterion_main!(benches);
