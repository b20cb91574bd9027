use criterion::{criterion_group, criterion_main, Criterion};
use hypermazes::{
    generators,
    grids::LargeHyperGrid,
    pathing::{self, Manhattan, SquaredEuclidean},
    units::{Dimension, SideLength},
};
use rand::{SeedableRng, XorShiftRng};

fn bench_maze(dimension: usize, side: usize) -> LargeHyperGrid {
    let mut rng = XorShiftRng::from_seed([0x8354_7cfb, 0x29d1_64dd, 0x0d21_5c05, 0x65f4_8bc2]);
    generators::generate(Dimension(dimension), SideLength(side), &mut rng).unwrap()
}

fn bench_solve_2d_64(c: &mut Criterion) {
    let maze = bench_maze(2, 64);
    let goal = maze.size() - 1;

    c.bench_function("solve_2d_64", move |b| {
        b.iter(|| pathing::solve::<u32, u32, _>(&maze, 0, goal, &SquaredEuclidean).unwrap())
    });
}

fn bench_solve_2d_64_manhattan(c: &mut Criterion) {
    let maze = bench_maze(2, 64);
    let goal = maze.size() - 1;

    c.bench_function("solve_2d_64_manhattan", move |b| {
        b.iter(|| pathing::solve::<u32, u32, _>(&maze, 0, goal, &Manhattan).unwrap())
    });
}

fn bench_solve_4d_6(c: &mut Criterion) {
    let maze = bench_maze(4, 6);
    let goal = maze.size() - 1;

    c.bench_function("solve_4d_6", move |b| {
        b.iter(|| pathing::solve::<u32, u32, _>(&maze, 0, goal, &SquaredEuclidean).unwrap())
    });
}

criterion_group!(benches,
    bench_solve_2d_64,
    bench_solve_2d_64_manhattan,
    bench_solve_4d_6
);
criterion_main!(benches);
