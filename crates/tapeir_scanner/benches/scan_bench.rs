use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tapeir_scanner::{tokenize, tokenize_with_spans};

// A small IR program with comment text, loops, scans and offset arithmetic.
// Comment words avoid the letters that start two-character commands.
const IR_SOURCE: &str = r#"
zero the current cell then move right twice
[-]>>
copy input to the next two cell
,[-a-{1}a-{2}]
find zero cell to the right then to the left
S>S<
counted loop
={10}[>+++++++>++++++++++<<-]
run-length count
s-|3|s+|4|a+|-2|
print
>++.>+.+++++++..+++.
"#;

fn bench_tokenize(c: &mut Criterion) {
    let large = IR_SOURCE.repeat(200);

    c.bench_function("tokenize_small", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(IR_SOURCE)).unwrap();
            black_box(tokens);
        });
    });

    c.bench_function("tokenize_large", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&large)).unwrap();
            black_box(tokens);
        });
    });

    c.bench_function("tokenize_with_spans_large", |b| {
        b.iter(|| {
            let tokens = tokenize_with_spans(black_box(&large)).unwrap();
            black_box(tokens);
        });
    });
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
