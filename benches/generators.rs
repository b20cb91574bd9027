use criterion::{criterion_group, criterion_main, Criterion};
use hypermazes::{
    generators,
    grids::{large_hyper_grid, medium_hyper_grid},
    units::{Dimension, SideLength},
};
use rand::{SeedableRng, XorShiftRng};

fn bench_rng() -> XorShiftRng {
    XorShiftRng::from_seed([0x8354_7cfb, 0x29d1_64dd, 0x0d21_5c05, 0x65f4_8bc2])
}

fn bench_kruskal_2d_32_u16(c: &mut Criterion) {
    let mut g = medium_hyper_grid(Dimension(2), SideLength(32)).unwrap();
    let mut rng = bench_rng();

    c.bench_function("kruskal_2d_32_u16", move |b| {
        b.iter(|| generators::randomised_kruskal(&mut g, &mut rng).unwrap())
    });
}

fn bench_kruskal_3d_10_u32(c: &mut Criterion) {
    let mut g = large_hyper_grid(Dimension(3), SideLength(10)).unwrap();
    let mut rng = bench_rng();

    c.bench_function("kruskal_3d_10_u32", move |b| {
        b.iter(|| generators::randomised_kruskal(&mut g, &mut rng).unwrap())
    });
}

fn bench_kruskal_4d_6_u32(c: &mut Criterion) {
    let mut g = large_hyper_grid(Dimension(4), SideLength(6)).unwrap();
    let mut rng = bench_rng();

    c.bench_function("kruskal_4d_6_u32", move |b| {
        b.iter(|| generators::randomised_kruskal(&mut g, &mut rng).unwrap())
    });
}

criterion_group!(benches,
    bench_kruskal_2d_32_u16,
    bench_kruskal_3d_10_u32,
    bench_kruskal_4d_6_u32
);
criterion_main!(benches);
