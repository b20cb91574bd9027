use std::u32;

use error_chain::bail;

use crate::cells::{AxisDirection, CoordinateSmallVec, DirectionSmallVec, Sign};
use crate::errors::*;
use crate::units::{Axis, CellsCount, Dimension, SideLength};

/// Shape of an n-dimensional hypercubic grid: `dimension` axes, each `side` cells long.
///
/// A cell is addressed by a flat index in `[0, side^dimension)` whose mixed-radix
/// digits (base `side`) are the coordinate components, least significant axis first.
/// The per-axis strides `side^i` are computed once here and shared (via `Rc`) by
/// everything that needs to translate between indices, coordinates and neighbour
/// offsets.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HyperDimensions {
    dimension: Dimension,
    side: SideLength,
    strides: Vec<usize>, // strides[i] = side^i, one entry per axis
    cells: CellsCount,
}

impl HyperDimensions {
    /// Rejects bad parameters with `InvalidParameters` before allocating any grid
    /// storage: at least one axis, at least two cells per axis, coordinate
    /// components representable, and a total cell count that fits `usize`.
    pub fn new(dimension: Dimension, side: SideLength) -> Result<HyperDimensions> {
        let Dimension(d) = dimension;
        let SideLength(s) = side;
        if d < 1 || s < 2 || s > u32::MAX as usize {
            bail!(ErrorKind::InvalidParameters(d, s));
        }

        let mut strides = Vec::with_capacity(d);
        let mut stride: usize = 1;
        for _ in 0..d {
            strides.push(stride);
            stride = stride
                .checked_mul(s)
                .ok_or_else(|| Error::from(ErrorKind::InvalidParameters(d, s)))?;
        }

        Ok(HyperDimensions {
            dimension,
            side,
            strides,
            cells: CellsCount(stride),
        })
    }

    #[inline]
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    #[inline]
    pub fn side(&self) -> SideLength {
        self.side
    }

    #[inline]
    pub fn cells_count(&self) -> CellsCount {
        self.cells
    }

    #[inline]
    pub fn walls_per_cell(&self) -> usize {
        2 * self.dimension.0
    }

    #[inline]
    pub fn wall_slots_count(&self) -> usize {
        self.cells.0 * self.walls_per_cell()
    }

    #[inline]
    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.cells.0
    }

    /// Mixed-radix decode of a flat cell index: component `i` is
    /// `(index / side^i) mod side`.
    pub fn coordinate_of(&self, index: usize) -> Result<CoordinateSmallVec> {
        if !self.is_valid_index(index) {
            bail!(ErrorKind::OutOfRange(index, self.cells.0));
        }
        let SideLength(s) = self.side;
        Ok(self.strides
               .iter()
               .map(|stride| ((index / stride) % s) as u32)
               .collect())
    }

    /// Exact inverse of `coordinate_of`: the two round-trip for every valid index.
    pub fn index_of(&self, coordinate: &[u32]) -> Result<usize> {
        if coordinate.len() != self.dimension.0 {
            bail!(ErrorKind::OutOfRange(coordinate.len(), self.dimension.0));
        }
        let SideLength(s) = self.side;
        let mut index = 0;
        for (&component, stride) in coordinate.iter().zip(&self.strides) {
            if component as usize >= s {
                bail!(ErrorKind::OutOfRange(component as usize, s));
            }
            index += component as usize * stride;
        }
        Ok(index)
    }

    /// Flat-index offset of one step in `direction`: ±side^axis.
    #[inline]
    pub fn neighbour_delta(&self, direction: AxisDirection) -> isize {
        let stride = self.strides[direction.axis.0] as isize;
        match direction.sign {
            Sign::Positive => stride,
            Sign::Negative => -stride,
        }
    }

    /// Would one step in `direction` stay on the grid?
    ///
    /// Adding ±side^axis to an index near a radix boundary still lands on a real
    /// cell index, just not an adjacent one (the step "wraps" onto the next row of
    /// a higher axis). So validity is decided on the axis coordinate, which must
    /// not move past `0` or `side - 1`.
    pub fn is_valid_step(&self, index: usize, direction: AxisDirection) -> bool {
        if !self.is_valid_index(index) {
            return false;
        }
        let SideLength(s) = self.side;
        let axis_coordinate = (index / self.strides[direction.axis.0]) % s;
        match direction.sign {
            Sign::Positive => axis_coordinate + 1 < s,
            Sign::Negative => axis_coordinate > 0,
        }
    }

    /// Index of the adjacent cell one step away, `None` at a grid face.
    pub fn offset_index(&self, index: usize, direction: AxisDirection) -> Option<usize> {
        if self.is_valid_step(index, direction) {
            let stride = self.strides[direction.axis.0];
            Some(match direction.sign {
                Sign::Positive => index + stride,
                Sign::Negative => index - stride,
            })
        } else {
            None
        }
    }

    /// Every in-bounds direction out of a cell, axis-major, positive face first.
    pub fn offset_directions(&self, index: usize) -> DirectionSmallVec {
        let mut directions = DirectionSmallVec::new();
        for axis in 0..self.dimension.0 {
            for &sign in &[Sign::Positive, Sign::Negative] {
                let direction = AxisDirection::new(Axis(axis), sign);
                if self.is_valid_step(index, direction) {
                    directions.push(direction);
                }
            }
        }
        directions
    }

    /// The axis and sign of the single valid step taking `a` to `b`, `None` when
    /// the two cells are not grid-adjacent.
    pub fn step_between(&self, a: usize, b: usize) -> Option<AxisDirection> {
        for axis in 0..self.dimension.0 {
            for &sign in &[Sign::Positive, Sign::Negative] {
                let direction = AxisDirection::new(Axis(axis), sign);
                if self.offset_index(a, direction) == Some(b) {
                    return Some(direction);
                }
            }
        }
        None
    }
}
