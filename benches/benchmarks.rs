use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seqmatch::align::{self, EditBuffer};
use seqmatch::assembly;
use seqmatch::index::kmer::KmerIndex;
use seqmatch::matching::{self, BoyerMoore};

fn make_reference(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

/// 从参考上等间距切出重叠的 read
fn make_reads(reference: &[u8], read_len: usize, step: usize) -> Vec<Vec<u8>> {
    (0..=reference.len() - read_len)
        .step_by(step)
        .map(|i| reference[i..i + read_len].to_vec())
        .collect()
}

fn bench_exact_scan(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let pattern = reference[5_000..5_030].to_vec();
    let bm = BoyerMoore::new(&pattern).unwrap();

    c.bench_function("naive_match_30bp_100k", |b| {
        b.iter(|| {
            black_box(matching::naive_match(black_box(&pattern), black_box(&reference)));
        })
    });
    c.bench_function("boyer_moore_scan_30bp_100k", |b| {
        b.iter(|| {
            black_box(bm.scan(black_box(&reference)));
        })
    });
}

fn bench_kmer_index(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let index = KmerIndex::new(&reference, 8).unwrap();
    let query = reference[300..308].to_vec();

    c.bench_function("kmer_index_build_10k", |b| {
        b.iter(|| {
            black_box(KmerIndex::new(black_box(&reference), 8).unwrap());
        })
    });
    c.bench_function("kmer_index_query_8bp", |b| {
        b.iter(|| {
            black_box(index.query(black_box(&query)));
        })
    });
}

fn bench_approximate_match(c: &mut Criterion) {
    let reference = make_reference(10_000);
    let mut pattern = reference[2_000..2_024].to_vec();
    pattern[5] = b'N';
    pattern[17] = b'N';
    let index = KmerIndex::new(&reference, 8).unwrap();

    c.bench_function("approximate_match_shared_index_24bp_n2", |b| {
        b.iter(|| {
            black_box(align::approximate_match_with_index(black_box(&pattern), black_box(&reference), 2, &index));
        })
    });
    c.bench_function("approximate_match_subseq_24bp_n2", |b| {
        b.iter(|| {
            black_box(align::approximate_match_subseq(black_box(&pattern), black_box(&reference), 2, 3).unwrap());
        })
    });
}

fn bench_edit_distance(c: &mut Criterion) {
    let reference = make_reference(1_000);
    let mut pattern = reference[400..500].to_vec();
    pattern[50] = b'N'; // introduce mismatch
    pattern.remove(70);
    let mut buf = EditBuffer::new();

    c.bench_function("edit_distance_100bp_vs_1k", |b| {
        b.iter(|| {
            black_box(align::edit_distance_with_buf(black_box(&pattern), black_box(&reference), &mut buf));
        })
    });
}

fn bench_greedy_scs(c: &mut Criterion) {
    let reference = make_reference(600);
    let reads = make_reads(&reference, 50, 10);

    c.bench_function("greedy_scs_56_reads", |b| {
        b.iter(|| {
            black_box(assembly::greedy_scs(black_box(reads.clone()), 20).unwrap());
        })
    });
}

criterion_group!(
    benches,
    bench_exact_scan,
    bench_kmer_index,
    bench_approximate_match,
    bench_edit_distance,
    bench_greedy_scs
);
criterion_main!(benches);
