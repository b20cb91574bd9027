#![cfg_attr(feature="clippy", feature(plugin))]
#![cfg_attr(feature="clippy", plugin(clippy))]

use docopt::Docopt;
use hypermazes::{
    generators,
    grids::LargeHyperGrid,
    pathing::{self, SquaredEuclidean},
    units::{Dimension, SideLength},
};
use itertools::Itertools;
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Hypermazes

Usage:
    hypermazes_driver -h | --help
    hypermazes_driver [--dimension=<d>] [--size=<s>] [--seed=<n>] [--start=<c>] [--goal=<c>] [--maze-out=<path>] [--solution-out=<path>] [--quiet]

Options:
    -h --help              Show this screen.
    --dimension=<d>        Number of grid axes [default: 2].
    --size=<s>             Cells along each axis [default: 10].
    --seed=<n>             Seed the random source; a fixed seed reproduces the same maze.
    --start=<c>            Path start cell index (defaults to the first cell).
    --goal=<c>             Path goal cell index (defaults to the last cell).
    --maze-out=<path>      Write the maze parameters and wall data to a text file.
    --solution-out=<path>  Write the solved path to a text file.
    --quiet                Skip printing the maze and path to the terminal.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_dimension: usize,
    flag_size: usize,
    flag_seed: Option<u64>,
    flag_start: Option<usize>,
    flag_goal: Option<usize>,
    flag_maze_out: String,
    flag_solution_out: String,
    flag_quiet: bool,
}

// We'll put our errors in an `errors` module and chain the library's own error
// type into it alongside the cli/io failures.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::hypermazes::errors::Error, ::hypermazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::from_seed(xorshift_seed(seed)),
        None => rand::weak_rng(),
    };

    let maze: LargeHyperGrid = generators::generate(Dimension(args.flag_dimension),
                                                    SideLength(args.flag_size),
                                                    &mut rng)?;

    let start = args.flag_start.unwrap_or(0);
    let goal = args.flag_goal.unwrap_or_else(|| maze.size() - 1);
    let path = pathing::solve::<u32, u32, _>(&maze, start, goal, &SquaredEuclidean)?;

    if !args.flag_quiet {
        if args.flag_dimension < 3 {
            println!("{}", maze);
        }
        match path {
            Some(ref steps) => println!("Path: {}", steps.iter().join(" -> ")),
            None => println!("Path: none found from {} to {}", start, goal),
        }
    }

    if !args.flag_maze_out.is_empty() {
        write_text_to_file(&render_maze_data(&maze), &args.flag_maze_out)
            .chain_err(|| format!("Failed to write maze data to {}", args.flag_maze_out))?;
    }

    if !args.flag_solution_out.is_empty() {
        let solution = render_solution_data(&maze, path.as_ref().map(|p| p.as_slice()));
        write_text_to_file(&solution, &args.flag_solution_out)
            .chain_err(|| format!("Failed to write solution data to {}", args.flag_solution_out))?;
    }

    Ok(())
}

// Spread a user seed over the four xorshift words. The fixed words keep the
// rng state nonzero even for a zero seed.
fn xorshift_seed(seed: u64) -> [u32; 4] {
    let low = seed as u32;
    let high = (seed >> 32) as u32;
    [low ^ 0x193a_6754, high ^ 0xa8a7_d469, low.wrapping_add(0x9783_5e91), high ^ 0x5c9f_13a1]
}

/// Maze file format: dimension on the first line, size on the second, then one
/// line per cell holding its `2 * dimension` wall flags (1 = closed), slots in
/// axis-major order with the positive face first.
fn render_maze_data(maze: &LargeHyperGrid) -> String {
    let dimensions = maze.dimensions();
    let Dimension(dimension) = dimensions.dimension();
    let SideLength(side) = dimensions.side();
    let walls_per_cell = dimensions.walls_per_cell();
    let flags = maze.closed_wall_flags();

    let mut data = String::new();
    data.push_str(&dimension.to_string());
    data.push('\n');
    data.push_str(&side.to_string());
    data.push('\n');
    for cell_flags in flags.chunks(walls_per_cell) {
        let line = cell_flags.iter()
                             .map(|&closed| if closed { "1" } else { "0" })
                             .join(" ");
        data.push_str(&line);
        data.push('\n');
    }
    data
}

/// Solution file format: dimension, size, then the path's cell indices on one
/// line (or `none` when no route exists).
fn render_solution_data(maze: &LargeHyperGrid, path: Option<&[usize]>) -> String {
    let dimensions = maze.dimensions();
    let Dimension(dimension) = dimensions.dimension();
    let SideLength(side) = dimensions.side();

    let mut data = String::new();
    data.push_str(&dimension.to_string());
    data.push('\n');
    data.push_str(&side.to_string());
    data.push('\n');
    match path {
        Some(steps) => data.push_str(&steps.iter().join(" ")),
        None => data.push_str("none"),
    }
    data.push('\n');
    data
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
