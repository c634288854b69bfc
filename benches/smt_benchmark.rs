use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rhsmt::{
    blake3_hasher::Blake3Hasher, default_store::MemStore, poseidon_hasher::PoseidonHasher,
    tree::SparseMerkleTree, Fr,
};

fn keys(n: u64) -> impl Iterator<Item = (Fr, Fr)> {
    (0..n).map(|i| (Fr::from(i.wrapping_mul(0x9e37_79b9_7f4a_7c15)), Fr::from(i)))
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("blake3_add_1000", |b| {
        b.iter_batched(
            || SparseMerkleTree::new(MemStore::<Blake3Hasher>::new(), 64),
            |mut tree| {
                for (k, v) in keys(1000) {
                    tree.add(k, v).expect("add");
                }
                tree
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("poseidon_add_100", |b| {
        b.iter_batched(
            || SparseMerkleTree::new(MemStore::<PoseidonHasher>::new(), 64),
            |mut tree| {
                for (k, v) in keys(100) {
                    tree.add(k, v).expect("add");
                }
                tree
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_proof(c: &mut Criterion) {
    let mut tree = SparseMerkleTree::new(MemStore::<Blake3Hasher>::new(), 64);
    for (k, v) in keys(1000) {
        tree.add(k, v).expect("add");
    }
    let key = Fr::from(55u64.wrapping_mul(0x9e37_79b9_7f4a_7c15));

    c.bench_function("blake3_proof_1000", |b| {
        b.iter(|| tree.proof(&key).expect("gen proof"))
    });
}

criterion_group!(benches, bench_add, bench_proof);
criterion_main!(benches);
