use smallvec::SmallVec;

use crate::units::Axis;

/// Which way a step or wall faces along its axis.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    pub fn flipped(self) -> Sign {
        match self {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        }
    }
}

/// One of the `2 * dimension` ways out of a cell: a single step of ±1 along one axis.
///
/// Plays the role a compass direction plays on a flat grid, except the axis count
/// is only known at runtime.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct AxisDirection {
    pub axis: Axis,
    pub sign: Sign,
}

impl AxisDirection {
    pub fn new(axis: Axis, sign: Sign) -> AxisDirection {
        AxisDirection { axis, sign }
    }

    /// Slot of this wall within its cell's wall block: `2 * axis` for the positive
    /// face and `2 * axis + 1` for the negative face.
    #[inline]
    pub fn wall_slot(&self) -> usize {
        match self.sign {
            Sign::Positive => 2 * self.axis.0,
            Sign::Negative => 2 * self.axis.0 + 1,
        }
    }

    /// The same wall as seen from the neighbouring cell on the other side.
    #[inline]
    pub fn reversed(&self) -> AxisDirection {
        AxisDirection {
            axis: self.axis,
            sign: self.sign.flipped(),
        }
    }
}

pub type CoordinateSmallVec = SmallVec<[u32; 4]>;
pub type DirectionSmallVec = SmallVec<[AxisDirection; 8]>;
pub type NeighbourSmallVec = SmallVec<[usize; 8]>;
