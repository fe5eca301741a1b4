#[macro_use]
extern crate bencher;

extern crate huffpack;
use huffpack::prelude::*;

use bencher::Bencher;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};


fn noisy_data(length: usize) -> Vec<u8> {
    let mut random = StdRng::seed_from_u64(20);
    let mut data = vec![0_u8; length];
    random.fill(&mut data[..]);
    data
}

fn text_like_data(length: usize) -> Vec<u8> {
    let mut random = StdRng::seed_from_u64(21);
    (0 .. length)
        .map(|_| b" etaoin shrdlu"[random.random_range(0 .. 14)])
        .collect()
}


fn compress_noise(bench: &mut Bencher) {
    let data = noisy_data(1024 * 1024);

    bench.iter(|| {
        bencher::black_box(compress_bytes(&data).unwrap());
    })
}

fn compress_text(bench: &mut Bencher) {
    let data = text_like_data(1024 * 1024);

    bench.iter(|| {
        bencher::black_box(compress_bytes(&data).unwrap());
    })
}

fn decompress_text(bench: &mut Bencher) {
    let envelope = compress_bytes(&text_like_data(1024 * 1024)).unwrap();

    bench.iter(|| {
        bencher::black_box(decompress_bytes(&envelope).unwrap());
    })
}

benchmark_group!(roundtrip,
    compress_noise,
    compress_text,
    decompress_text
);

benchmark_main!(roundtrip);
