//! Benchmarks for table construction and the searches.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use acfg_solver::acfg::{
    find_core_stable_structure, find_popular_structure, partitions, Degree, FriendshipNetwork,
    UtilityTable,
};

fn network(n: usize) -> FriendshipNetwork<usize> {
    let mut rng = StdRng::seed_from_u64(42);
    FriendshipNetwork::random(n, 0.3, &mut rng).expect("valid random network")
}

fn partition_benchmark(c: &mut Criterion) {
    let items: Vec<usize> = (0..8).collect();
    c.bench_function("partitions_8", |b| {
        b.iter(|| partitions(black_box(&items)).count())
    });
}

fn table_benchmark(c: &mut Criterion) {
    let net = network(7);
    c.bench_function("utility_table_7", |b| {
        b.iter(|| UtilityTable::build(black_box(&net), Degree::SelfishFirst).map(|t| t.len()))
    });
}

fn search_benchmark(c: &mut Criterion) {
    let net = network(6);
    let table = UtilityTable::build(&net, Degree::Altruistic).expect("table");

    c.bench_function("core_stable_6", |b| {
        b.iter(|| find_core_stable_structure(black_box(&table), false))
    });
    c.bench_function("popular_6", |b| {
        b.iter(|| find_popular_structure(black_box(&table), false))
    });
}

criterion_group!(benches, partition_benchmark, table_benchmark, search_benchmark);
criterion_main!(benches);
