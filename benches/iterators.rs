use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unirope::Rope;

const PARAGRAPH: &str = "Hello there! How're you doing? It's a fine day, isn't it?\r\n\
Aren't the birds singing? I love Mondays!\nこんにちは、みなさん！\n";

fn make_large() -> String {
    PARAGRAPH.repeat(20_000)
}

fn chars_iter_full(c: &mut Criterion) {
    let rope = Rope::from_str(&make_large());
    c.bench_function("chars_iter_full", |b| {
        b.iter(|| {
            for ch in rope.chars() {
                black_box(ch);
            }
        });
    });
}

fn chunks_iter_full(c: &mut Criterion) {
    let rope = Rope::from_str(&make_large());
    c.bench_function("chunks_iter_full", |b| {
        b.iter(|| {
            for chunk in rope.chunks() {
                black_box(chunk);
            }
        });
    });
}

fn lines_iter_full(c: &mut Criterion) {
    let rope = Rope::from_str(&make_large());
    c.bench_function("lines_iter_full", |b| {
        b.iter(|| {
            for line in rope.lines() {
                black_box(line);
            }
        });
    });
}

fn to_string_full(c: &mut Criterion) {
    let rope = Rope::from_str(&make_large());
    c.bench_function("to_string_full", |b| {
        b.iter(|| black_box(rope.to_string()));
    });
}

criterion_group!(
    benches,
    chars_iter_full,
    chunks_iter_full,
    lines_iter_full,
    to_string_full,
);
criterion_main!(benches);
