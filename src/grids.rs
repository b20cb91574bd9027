use std::rc::Rc;
use std::{u16, u32, u8};

use crate::dimensions::HyperDimensions;
use crate::grid::{HyperGrid, IndexType};
use crate::units::{Dimension, SideLength};

pub type SmallHyperGrid = HyperGrid<u8>;
pub type MediumHyperGrid = HyperGrid<u16>;
pub type LargeHyperGrid = HyperGrid<u32>;

/// Grid whose cells are addressable by a u8 index. `None` when the parameters
/// are rejected or the cell count does not fit the index width.
pub fn small_hyper_grid(dimension: Dimension, side: SideLength) -> Option<SmallHyperGrid> {
    bounded_grid(dimension, side, u8::MAX as usize)
}

pub fn medium_hyper_grid(dimension: Dimension, side: SideLength) -> Option<MediumHyperGrid> {
    bounded_grid(dimension, side, u16::MAX as usize)
}

pub fn large_hyper_grid(dimension: Dimension, side: SideLength) -> Option<LargeHyperGrid> {
    bounded_grid(dimension, side, u32::MAX as usize)
}

fn bounded_grid<GridIndexType>(dimension: Dimension,
                               side: SideLength,
                               max_cells: usize)
                               -> Option<HyperGrid<GridIndexType>>
    where GridIndexType: IndexType
{
    HyperDimensions::new(dimension, side).ok().and_then(|dims| {
        if dims.cells_count().0 <= max_cells {
            Some(HyperGrid::new(Rc::new(dims)))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn index_width_gates_the_cell_count() {
        assert!(small_hyper_grid(Dimension(2), SideLength(15)).is_some()); // 225 cells
        assert!(small_hyper_grid(Dimension(2), SideLength(16)).is_none()); // 256 cells
        assert!(medium_hyper_grid(Dimension(2), SideLength(16)).is_some());
        assert!(medium_hyper_grid(Dimension(2), SideLength(256)).is_none()); // 65536 cells
        assert!(large_hyper_grid(Dimension(2), SideLength(256)).is_some());
        assert!(large_hyper_grid(Dimension(3), SideLength(10)).is_some());
    }

    #[test]
    fn degenerate_parameters_never_build_a_grid() {
        assert!(small_hyper_grid(Dimension(0), SideLength(5)).is_none());
        assert!(large_hyper_grid(Dimension(2), SideLength(1)).is_none());
    }
}
