use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::{Debug, Display};
use std::ops::Add;

use error_chain::bail;
use itertools::Itertools;
use num::traits::{Bounded, CheckedAdd, NumCast, One, Unsigned, Zero};

use crate::errors::*;
use crate::grid::{HyperGrid, IndexType};
use crate::utils;
use crate::utils::FnvHashMap;

// Trait (hack) used purely as a generic type parameter alias - spelling this
// bound list at every use site is too ugly to live with, and generic parameter
// type aliases are not in the language.
pub trait Cost
    : Zero + One + Bounded + Unsigned + Add + CheckedAdd + NumCast + Debug + Display + Clone + Copy + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + CheckedAdd + NumCast + Debug + Display + Clone + Copy + Ord> Cost for T {}

/// Estimate of the remaining distance from a cell to the goal, used to order
/// the search frontier.
///
/// An estimator that can overestimate the true remaining step count still finds
/// a path, but not necessarily the shortest one.
pub trait Heuristic {
    fn estimate(&self, from: &[u32], goal: &[u32]) -> usize;
}

/// Sum of squared per-axis coordinate differences.
///
/// Overestimates the remaining step count whenever more than one axis differs,
/// so above one dimension the search is not guaranteed to return a
/// graph-shortest path. It stays the default estimator because its route
/// choices are what this system has always produced; pick `Manhattan` when a
/// provably shortest path matters. Do not swap the default silently - the
/// observable paths change.
#[derive(Debug, Copy, Clone, Default)]
pub struct SquaredEuclidean;

impl Heuristic for SquaredEuclidean {
    fn estimate(&self, from: &[u32], goal: &[u32]) -> usize {
        from.iter()
            .zip_eq(goal.iter())
            .map(|(&a, &b)| {
                let delta = (if a > b { a - b } else { b - a }) as usize;
                delta * delta
            })
            .sum()
    }
}

/// Sum of absolute per-axis coordinate differences: the exact minimum step
/// count on an unobstructed grid, so never an overestimate.
#[derive(Debug, Copy, Clone, Default)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    fn estimate(&self, from: &[u32], goal: &[u32]) -> usize {
        from.iter()
            .zip_eq(goal.iter())
            .map(|(&a, &b)| (if a > b { a - b } else { b - a }) as usize)
            .sum()
    }
}

// Heap entries order by lowest priority first and then by insertion sequence,
// so equal-priority entries pop in FIFO order - a deterministic frontier for a
// deterministic upstream seed. std's BinaryHeap is a max-heap, hence both
// comparisons are reversed.
#[derive(Debug, Copy, Clone)]
struct FrontierEntry<CostT: Cost> {
    priority: CostT,
    sequence: usize,
    cost: CostT,
    cell: usize,
}

impl<CostT: Cost> Ord for FrontierEntry<CostT> {
    fn cmp(&self, other: &FrontierEntry<CostT>) -> Ordering {
        other.priority
             .cmp(&self.priority)
             .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<CostT: Cost> PartialOrd for FrontierEntry<CostT> {
    fn partial_cmp(&self, other: &FrontierEntry<CostT>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<CostT: Cost> PartialEq for FrontierEntry<CostT> {
    fn eq(&self, other: &FrontierEntry<CostT>) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<CostT: Cost> Eq for FrontierEntry<CostT> {}

/// Best-first search from `start` to `goal` through the open walls of a grid.
///
/// Returns the ordered cell path including both endpoints. `Ok(None)` means the
/// goal is unreachable - impossible on a freshly generated spanning tree, but a
/// well-defined outcome for any other wall configuration (say, after `unlink`).
/// Endpoints outside the grid fail with `OutOfRange`.
///
/// Edges cost one step each; the frontier is ordered by cost so far plus the
/// heuristic's estimate of the remainder. A cell is re-queued whenever a
/// cheaper route to it is found, and stale queue entries are dropped when
/// popped.
pub fn solve<GridIndexType, CostT, H>(grid: &HyperGrid<GridIndexType>,
                                      start: usize,
                                      goal: usize,
                                      heuristic: &H)
                                      -> Result<Option<Vec<usize>>>
    where GridIndexType: IndexType,
          CostT: Cost,
          H: Heuristic
{
    let dimensions = grid.dimensions();
    let cells_count = grid.size();
    if !dimensions.is_valid_index(start) {
        bail!(ErrorKind::OutOfRange(start, cells_count));
    }
    if !dimensions.is_valid_index(goal) {
        bail!(ErrorKind::OutOfRange(goal, cells_count));
    }

    let goal_coordinate = dimensions.coordinate_of(goal)?;
    let start_coordinate = dimensions.coordinate_of(start)?;

    let mut costs: FnvHashMap<usize, CostT> = utils::fnv_hashmap(cells_count);
    let mut predecessors: FnvHashMap<usize, usize> = utils::fnv_hashmap(cells_count);
    let mut frontier = BinaryHeap::new();
    let mut sequence = 0;

    costs.insert(start, CostT::zero());
    frontier.push(FrontierEntry {
        priority: clamped_estimate::<CostT>(heuristic.estimate(&start_coordinate,
                                                               &goal_coordinate)),
        sequence,
        cost: CostT::zero(),
        cell: start,
    });

    while let Some(entry) = frontier.pop() {
        if entry.cell == goal {
            return Ok(Some(rebuild_path(&predecessors, start, goal)));
        }

        // A cheaper route to this cell was recorded after this entry was queued.
        if costs.get(&entry.cell).map_or(false, |&best| entry.cost > best) {
            continue;
        }

        let next_cost = entry.cost
                             .checked_add(&CostT::one())
                             .unwrap_or_else(CostT::max_value);
        let linked = grid.links(entry.cell);
        for &neighbour in linked.iter() {
            let improves = costs.get(&neighbour).map_or(true, |&known| next_cost < known);
            if improves {
                costs.insert(neighbour, next_cost);
                predecessors.insert(neighbour, entry.cell);

                let neighbour_coordinate = dimensions.coordinate_of(neighbour)
                    .expect("linked neighbours are always in range");
                let remaining: CostT =
                    clamped_estimate(heuristic.estimate(&neighbour_coordinate, &goal_coordinate));
                sequence += 1;
                frontier.push(FrontierEntry {
                    priority: next_cost.checked_add(&remaining)
                                       .unwrap_or_else(CostT::max_value),
                    sequence,
                    cost: next_cost,
                    cell: neighbour,
                });
            }
        }
    }

    Ok(None)
}

/// The defaulted solve: from cell zero to the highest cell index, the maze's
/// conventional entrance and exit.
pub fn entrance_to_exit_path<GridIndexType, CostT, H>(grid: &HyperGrid<GridIndexType>,
                                                      heuristic: &H)
                                                      -> Result<Option<Vec<usize>>>
    where GridIndexType: IndexType,
          CostT: Cost,
          H: Heuristic
{
    let last_cell = grid.size() - 1;
    solve::<GridIndexType, CostT, H>(grid, 0, last_cell, heuristic)
}

// Saturate estimates too large for the cost type rather than panicking.
fn clamped_estimate<CostT: Cost>(estimate: usize) -> CostT {
    NumCast::from(estimate).unwrap_or_else(CostT::max_value)
}

fn rebuild_path(predecessors: &FnvHashMap<usize, usize>, start: usize, goal: usize) -> Vec<usize> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = predecessors[&current];
        path.push(current);
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {

    use std::collections::HashSet;

    use rand::{SeedableRng, XorShiftRng};

    use super::*;
    use crate::generators;
    use crate::grids::{small_hyper_grid, LargeHyperGrid, SmallHyperGrid};
    use crate::units::{Dimension, SideLength};

    fn seeded_rng(seed: u32) -> XorShiftRng {
        XorShiftRng::from_seed([seed.wrapping_add(1), 0x9e37_79b9, 0x243f_6a88, 0xb752_9f4b])
    }

    fn line_maze() -> SmallHyperGrid {
        let mut g = small_hyper_grid(Dimension(1), SideLength(5)).unwrap();
        for cell in 0..4 {
            g.link(cell, cell + 1).expect("link failed");
        }
        g
    }

    #[test]
    fn squared_euclidean_estimates() {
        let h = SquaredEuclidean;
        assert_eq!(h.estimate(&[0, 0], &[2, 3]), 13);
        assert_eq!(h.estimate(&[2, 3], &[0, 0]), 13);
        assert_eq!(h.estimate(&[1, 1, 1], &[1, 1, 1]), 0);
    }

    #[test]
    fn manhattan_estimates() {
        let h = Manhattan;
        assert_eq!(h.estimate(&[0, 0], &[2, 3]), 5);
        assert_eq!(h.estimate(&[4], &[1]), 3);
        assert_eq!(h.estimate(&[1, 1], &[1, 1]), 0);
    }

    #[test]
    fn line_maze_solves_end_to_end() {
        let g = line_maze();
        let path = solve::<u8, u32, _>(&g, 0, 4, &SquaredEuclidean).unwrap();
        assert_eq!(path, Some(vec![0, 1, 2, 3, 4]));
    }

    #[test]
    fn equal_endpoints_give_a_single_cell_path() {
        let g = line_maze();
        let path = solve::<u8, u32, _>(&g, 2, 2, &SquaredEuclidean).unwrap();
        assert_eq!(path, Some(vec![2]));
    }

    #[test]
    fn endpoints_must_be_on_the_grid() {
        let g = line_maze();
        assert!(solve::<u8, u32, _>(&g, 5, 0, &SquaredEuclidean).is_err());
        assert!(solve::<u8, u32, _>(&g, 0, 99, &SquaredEuclidean).is_err());
    }

    #[test]
    fn uncarved_grid_has_no_path() {
        let g = small_hyper_grid(Dimension(2), SideLength(3)).unwrap();
        let path = solve::<u8, u32, _>(&g, 0, 8, &SquaredEuclidean).unwrap();
        assert_eq!(path, None);
    }

    #[test]
    fn severed_maze_reports_no_path_rather_than_failing() {
        let mut g = line_maze();
        g.unlink(2, 3);
        let path = solve::<u8, u32, _>(&g, 0, 4, &SquaredEuclidean).unwrap();
        assert_eq!(path, None);
        // The reachable side still solves.
        let partial = solve::<u8, u32, _>(&g, 0, 2, &SquaredEuclidean).unwrap();
        assert_eq!(partial, Some(vec![0, 1, 2]));
    }

    #[test]
    fn generated_flat_maze_solves_corner_to_corner() {
        for seed in 0..10 {
            let mut rng = seeded_rng(seed);
            let maze: LargeHyperGrid =
                generators::generate(Dimension(2), SideLength(3), &mut rng).unwrap();

            let path = solve::<u32, u32, _>(&maze, 0, 8, &SquaredEuclidean)
                .unwrap()
                .expect("a spanning tree connects every cell pair");

            assert_eq!(*path.first().unwrap(), 0);
            assert_eq!(*path.last().unwrap(), 8);
            for pair in path.windows(2) {
                assert!(maze.is_linked(pair[0], pair[1]));
            }
            let mut seen = HashSet::new();
            assert!(path.iter().all(|&cell| seen.insert(cell)));
        }
    }

    #[test]
    fn admissible_estimator_also_solves_generated_mazes() {
        let mut rng = seeded_rng(11);
        let maze: LargeHyperGrid =
            generators::generate(Dimension(3), SideLength(3), &mut rng).unwrap();
        let path = entrance_to_exit_path::<u32, u32, _>(&maze, &Manhattan)
            .unwrap()
            .expect("a spanning tree connects every cell pair");
        assert_eq!(*path.first().unwrap(), 0);
        assert_eq!(*path.last().unwrap(), 26);
        for pair in path.windows(2) {
            assert!(maze.is_linked(pair[0], pair[1]));
        }
    }

    #[test]
    fn fixed_seed_reproduces_the_same_path() {
        let solve_seeded = |seed| {
            let mut rng = seeded_rng(seed);
            let maze: LargeHyperGrid =
                generators::generate(Dimension(2), SideLength(5), &mut rng).unwrap();
            entrance_to_exit_path::<u32, u32, _>(&maze, &SquaredEuclidean).unwrap()
        };
        assert_eq!(solve_seeded(99), solve_seeded(99));
    }

    #[test]
    fn on_a_tree_both_estimators_agree_on_the_route() {
        // A spanning tree holds exactly one route between any two cells, so the
        // inadmissible default cannot pick a different one.
        let mut rng = seeded_rng(5);
        let maze: LargeHyperGrid =
            generators::generate(Dimension(2), SideLength(4), &mut rng).unwrap();
        let squared = entrance_to_exit_path::<u32, u32, _>(&maze, &SquaredEuclidean).unwrap();
        let manhattan = entrance_to_exit_path::<u32, u32, _>(&maze, &Manhattan).unwrap();
        assert_eq!(squared, manhattan);
    }
}
