use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jexpr_arena::Arena;
use jexpr_engine::{eval, Env};

fn arithmetic(c: &mut Criterion) {
    c.bench_function("arithmetic ladder walk", |b| {
        b.iter(|| {
            let arena = Arena::new();
            let env = Env::new();
            eval(black_box("1 + 2 * (10 * 20) - 4 / 2"), &arena, &env)
        });
    });
}

fn ternary_chain(c: &mut Criterion) {
    c.bench_function("nested ternary and short-circuit", |b| {
        b.iter(|| {
            let arena = Arena::new();
            let env = Env::new();
            eval(
                black_box("true ? 1 ? 2 : 3 : 4 || 5 && 6"),
                &arena,
                &env,
            )
        });
    });
}

criterion_group!(benches, arithmetic, ternary_chain);
criterion_main!(benches);
