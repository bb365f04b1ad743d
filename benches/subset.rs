use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use powerset::{prelude::*, random::generate_random_nfa};

fn nth_last_symbol(n: usize) -> Automaton {
    let mut nfa = Automaton::new(Alphabet::of_size(2), n + 1, 0);
    nfa.add_transition(0, 0, 0);
    nfa.add_transition(0, 1, 0);
    nfa.add_transition(0, 0, 1);
    for state in 1..n {
        nfa.add_transition(state, 0, state + 1);
        nfa.add_transition(state, 1, state + 1);
    }
    nfa.set_final(n);
    nfa
}

fn subset_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("blowup");
    for n in [4, 8, 12] {
        let nfa = nth_last_symbol(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &nfa, |b, nfa| {
            b.iter(|| determinize(black_box(nfa)).unwrap())
        });
    }
    group.finish();

    let mut rng = fastrand::Rng::with_seed(1);
    let random = (0..16)
        .map(|_| generate_random_nfa(&mut rng, 3, 24, 0.05))
        .collect::<Vec<_>>();
    c.bench_function("random", |b| {
        b.iter(|| {
            for nfa in &random {
                black_box(nfa.determinize().unwrap());
            }
        })
    });
}

criterion_group!(benches, subset_construction);
criterion_main!(benches);
