use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;
use std::rc::Rc;

use bit_set::BitSet;
pub use petgraph::graph::IndexType;

use crate::cells::{AxisDirection, NeighbourSmallVec, Sign};
use crate::dimensions::HyperDimensions;
use crate::units::{Axis, Dimension, SideLength};

/// Wall storage for an n-dimensional maze.
///
/// Every cell owns `2 * dimension` wall slots and all of them start closed. The
/// open slots are held in a bit set, so anything absent from the set is a wall.
/// Carving a passage clears the outgoing slot on one cell and the matching
/// incoming slot on its neighbour in a single operation - the two faces of one
/// wall can never disagree.
///
/// The grid is mutated while a generator carves it and is read-only ever after;
/// solving borrows it immutably.
#[derive(Debug, Clone)]
pub struct HyperGrid<GridIndexType: IndexType> {
    dimensions: Rc<HyperDimensions>,
    open_walls: BitSet,
    links_count: usize,
    index_type: PhantomData<GridIndexType>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl<GridIndexType: IndexType> HyperGrid<GridIndexType> {
    pub fn new(dimensions: Rc<HyperDimensions>) -> HyperGrid<GridIndexType> {
        debug_assert!(dimensions.cells_count().0.saturating_sub(1) <=
                      <GridIndexType as IndexType>::max().index(),
                      "grid cell count exceeds the chosen index width");
        let wall_slots = dimensions.wall_slots_count();
        HyperGrid {
            dimensions,
            open_walls: BitSet::with_capacity(wall_slots),
            links_count: 0,
            index_type: PhantomData,
        }
    }

    #[inline]
    pub fn dimensions(&self) -> &HyperDimensions {
        self.dimensions.as_ref()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimensions.cells_count().0
    }

    /// Count of open passages (wall pairs), not wall slots.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.links_count
    }

    /// Flat iteration order over every cell index.
    #[inline]
    pub fn cell_indices(&self) -> Range<usize> {
        0..self.size()
    }

    /// Open the passage between two adjacent cells, clearing both facing slots.
    pub fn link(&mut self, a: usize, b: usize) -> Result<(), CellLinkError> {
        if !self.dimensions.is_valid_index(a) || !self.dimensions.is_valid_index(b) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        let direction = self.dimensions
                            .step_between(a, b)
                            .ok_or(CellLinkError::NotAdjacent)?;
        if self.set_passage(a, b, direction, true) {
            self.links_count += 1;
        }
        Ok(())
    }

    /// Close the passage again, if one was open between the two cells.
    pub fn unlink(&mut self, a: usize, b: usize) -> bool {
        if let Some(direction) = self.dimensions.step_between(a, b) {
            if self.set_passage(a, b, direction, false) {
                self.links_count -= 1;
                return true;
            }
        }
        false
    }

    /// Symmetric passage query: true iff the wall between `a` and `b` is open.
    /// Non-adjacent or out-of-range pairs are simply not linked.
    pub fn is_linked(&self, a: usize, b: usize) -> bool {
        match self.dimensions.step_between(a, b) {
            Some(direction) => self.open_walls.contains(self.wall_slot_position(a, direction)),
            None => false,
        }
    }

    /// Is the wall on the `direction` face of `cell` open?
    pub fn is_open_toward(&self, cell: usize, direction: AxisDirection) -> bool {
        self.dimensions.is_valid_step(cell, direction) &&
        self.open_walls.contains(self.wall_slot_position(cell, direction))
    }

    /// Cells reachable from `cell` through an open wall.
    pub fn links(&self, cell: usize) -> NeighbourSmallVec {
        let mut linked = NeighbourSmallVec::new();
        let directions = self.dimensions.offset_directions(cell);
        for &direction in directions.iter() {
            if self.open_walls.contains(self.wall_slot_position(cell, direction)) {
                let neighbour = self.dimensions
                                    .offset_index(cell, direction)
                                    .expect("offset_directions returned an invalid step");
                linked.push(neighbour);
            }
        }
        linked
    }

    /// All grid-adjacent cells, whether or not a passage is open to them.
    pub fn neighbours(&self, cell: usize) -> NeighbourSmallVec {
        let directions = self.dimensions.offset_directions(cell);
        directions.iter()
                  .map(|&direction| {
                      self.dimensions
                          .offset_index(cell, direction)
                          .expect("offset_directions returned an invalid step")
                  })
                  .collect()
    }

    /// Every wall closed again, ready for a fresh carve.
    pub fn reset(&mut self) {
        self.open_walls.clear();
        self.links_count = 0;
    }

    /// The wall record in flat boolean form: entry `cell * wallsPerCell + slot` is
    /// true when that wall is closed. This is the shape collaborators serialize.
    pub fn closed_wall_flags(&self) -> Vec<bool> {
        (0..self.dimensions.wall_slots_count())
            .map(|slot| !self.open_walls.contains(slot))
            .collect()
    }

    #[inline]
    fn wall_slot_position(&self, cell: usize, direction: AxisDirection) -> usize {
        cell * self.dimensions.walls_per_cell() + direction.wall_slot()
    }

    // The only writer of wall slots: both faces flip together.
    fn set_passage(&mut self, a: usize, b: usize, direction: AxisDirection, open: bool) -> bool {
        let outgoing = self.wall_slot_position(a, direction);
        let incoming = self.wall_slot_position(b, direction.reversed());
        if open {
            let changed = self.open_walls.insert(outgoing);
            self.open_walls.insert(incoming);
            changed
        } else {
            let changed = self.open_walls.remove(outgoing);
            self.open_walls.remove(incoming);
            changed
        }
    }
}

/// Text plot of the maze walls for one and two dimensional grids, the only
/// shapes a terminal can show directly. Higher dimensional grids render as a
/// one line summary.
// TODO: render a chosen 2d slice of a higher dimensional maze instead of the summary line.
impl<GridIndexType: IndexType> fmt::Display for HyperGrid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Dimension(dimension) = self.dimensions.dimension();
        let SideLength(side) = self.dimensions.side();

        if dimension > 2 {
            return writeln!(f,
                            "[hypermaze: {} axes of {} cells, {} cells total, {} open passages]",
                            dimension,
                            side,
                            self.size(),
                            self.links_count());
        }

        let east = AxisDirection::new(Axis(0), Sign::Positive);
        let south = AxisDirection::new(Axis(1), Sign::Positive);
        let rows = if dimension == 2 { side } else { 1 };

        let mut output = String::new();
        for _ in 0..side {
            output.push_str("+--");
        }
        output.push_str("+\n");

        for row in 0..rows {
            let mut body = String::from("|");
            let mut floor = String::from("+");
            for column in 0..side {
                let cell = row * side + column;
                body.push_str("  ");
                body.push(if self.is_open_toward(cell, east) { ' ' } else { '|' });
                let south_open = dimension == 2 && self.is_open_toward(cell, south);
                floor.push_str(if south_open { "  +" } else { "--+" });
            }
            output.push_str(&body);
            output.push('\n');
            output.push_str(&floor);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}
