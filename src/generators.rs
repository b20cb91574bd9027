use std::rc::Rc;

use rand::{Rng, XorShiftRng};

use crate::dimensions::HyperDimensions;
use crate::errors::*;
use crate::grid::{HyperGrid, IndexType};
use crate::union_find::DisjointSet;
use crate::units::{Dimension, SideLength};

/// Ceiling on the carve/validate loop. A pass over a moderate grid only
/// occasionally fails to connect everything, so this bound is never approached
/// in practice; it exists so the loop is provably finite.
const MAX_CARVE_ATTEMPTS: usize = 10_000;

/// Build a maze in one call: validated parameters, a fresh grid, a random
/// spanning tree carved through it.
///
/// All randomness comes from `rng` - a fixed seed reproduces the maze exactly.
/// The returned grid is connected and cycle free: exactly `cells - 1` open wall
/// pairs, a unique route between every pair of cells.
pub fn generate<GridIndexType>(dimension: Dimension,
                               side: SideLength,
                               rng: &mut XorShiftRng)
                               -> Result<HyperGrid<GridIndexType>>
    where GridIndexType: IndexType
{
    let dimensions = Rc::new(HyperDimensions::new(dimension, side)?);
    let mut grid = HyperGrid::new(dimensions);
    randomised_kruskal(&mut grid, rng)?;
    Ok(grid)
}

/// Carve a random spanning tree over the grid, rejecting cycles with union-find.
///
/// A single pass visits every cell in a random order and opens at most one wall
/// per visit, so a late-visited cell whose neighbours all ended up in its own
/// set already can be left stranded. Stranding shows up as more than one root in
/// the validation sweep; the walls are then reset and a fresh permutation tried.
/// Retries are invisible to the caller beyond a little added latency.
pub fn randomised_kruskal<GridIndexType>(grid: &mut HyperGrid<GridIndexType>,
                                         rng: &mut XorShiftRng)
                                         -> Result<()>
    where GridIndexType: IndexType
{
    for _ in 0..MAX_CARVE_ATTEMPTS {
        grid.reset();
        let mut sets = DisjointSet::<GridIndexType>::new(grid.size());
        carve_pass(grid, &mut sets, rng);
        if single_component(&mut sets, grid.size()) {
            return Ok(());
        }
    }
    Err(ErrorKind::GenerationRetriesExhausted(MAX_CARVE_ATTEMPTS).into())
}

fn carve_pass<GridIndexType>(grid: &mut HyperGrid<GridIndexType>,
                             sets: &mut DisjointSet<GridIndexType>,
                             rng: &mut XorShiftRng)
    where GridIndexType: IndexType
{
    let mut visit_order: Vec<usize> = grid.cell_indices().collect();
    rng.shuffle(&mut visit_order);

    for &cell in &visit_order {
        let mut directions = grid.dimensions().offset_directions(cell);
        rng.shuffle(&mut directions);

        for &direction in directions.iter() {
            let neighbour = grid.dimensions()
                                .offset_index(cell, direction)
                                .expect("offset_directions returned an invalid step");
            if sets.union(cell, neighbour) {
                grid.link(cell, neighbour)
                    .expect("a valid step is always grid-adjacent");
                break;
            }
        }
    }
}

// All cells share one root iff the carved walls span the whole grid.
fn single_component<GridIndexType>(sets: &mut DisjointSet<GridIndexType>,
                                   cells_count: usize)
                                   -> bool
    where GridIndexType: IndexType
{
    let root = sets.find(0);
    (1..cells_count).all(|cell| sets.find(cell) == root)
}
