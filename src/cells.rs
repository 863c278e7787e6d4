use smallvec::SmallVec;
use std::iter;

use crate::units::Axis;

/// Per-cell passage bitmask. Two bits per axis: bit `2R` is a passage
/// toward the positive direction of axis `R`, bit `2R + 1` toward the
/// negative direction.
pub type PathFlags = u64;

/// One unsigned component per axis.
pub type Coords = SmallVec<[u32; 4]>;
/// Signed per-axis difference between two coordinates.
pub type CoordsDelta = SmallVec<[i64; 4]>;
/// Neighbour lists: a cell has between 1 and `2 * dimensionality` neighbours.
pub type CoordsSmallVec = SmallVec<[Coords; 8]>;

/// `PathFlags` is a `u64`, so at most 32 axes can be encoded.
pub const MAX_AXES: usize = 32;

/// Computes the forward and backward passage flags for a coordinate
/// difference `to - from`. The forward mask belongs on the origin cell,
/// the backward mask on the destination.
///
/// Total over any delta. Carving only ever feeds it single-axis unit
/// steps, but that is the caller's precondition, not checked here.
pub fn path_flags_from_delta(delta: &[i64]) -> (PathFlags, PathFlags) {
    debug_assert!(delta.len() <= MAX_AXES);

    let mut forward: PathFlags = 0;
    let mut backward: PathFlags = 0;
    for (axis, &step) in delta.iter().enumerate() {
        if step > 0 {
            forward |= 1 << (2 * axis);
            backward |= 1 << (2 * axis + 1);
        } else if step < 0 {
            forward |= 1 << (2 * axis + 1);
            backward |= 1 << (2 * axis);
        }
    }
    (forward, backward)
}

/// Per-axis difference `to[R] - from[R]`. Extra components on the longer
/// slice are ignored.
pub fn diff_coords(from: &[u32], to: &[u32]) -> CoordsDelta {
    from.iter()
        .zip(to.iter())
        .map(|(&a, &b)| i64::from(b) - i64::from(a))
        .collect()
}

/// One grid direction: a unit step along an axis, either way.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    Positive(Axis),
    Negative(Axis),
}

impl Direction {
    /// All directions of a grid with the given number of axes, axis
    /// ascending, positive before negative. This is the adjacency
    /// enumeration order used throughout.
    pub fn all(dimensionality: usize) -> impl Iterator<Item = Direction> {
        (0..dimensionality).flat_map(|axis| {
            iter::once(Direction::Positive(Axis(axis)))
                .chain(iter::once(Direction::Negative(Axis(axis))))
        })
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Direction::Positive(axis) | Direction::Negative(axis) => axis,
        }
    }

    /// The single `PathFlags` bit for a passage in this direction.
    #[inline]
    pub fn flag(self) -> PathFlags {
        match self {
            Direction::Positive(Axis(r)) => 1 << (2 * r),
            Direction::Negative(Axis(r)) => 1 << (2 * r + 1),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Positive(axis) => Direction::Negative(axis),
            Direction::Negative(axis) => Direction::Positive(axis),
        }
    }

    /// The coordinate one step in this direction, or `None` when the step
    /// leaves the grid. `coord` must be in bounds for `dimensions`.
    pub fn offset(self, coord: &[u32], dimensions: &[u32]) -> Option<Coords> {
        let Axis(r) = self.axis();
        if r >= coord.len() || r >= dimensions.len() {
            return None;
        }
        let position = coord[r];
        let stepped = match self {
            Direction::Positive(_) => {
                if position + 1 < dimensions[r] {
                    position + 1
                } else {
                    return None;
                }
            }
            Direction::Negative(_) => {
                if position > 0 {
                    position - 1
                } else {
                    return None;
                }
            }
        };
        let mut offset_coord: Coords = SmallVec::from_slice(coord);
        offset_coord[r] = stepped;
        Some(offset_coord)
    }
}

/// One grid node. The coordinate is fixed at construction; `paths` is
/// only ever written through `Maze::carve`, and `visited` is scratch
/// state for whichever carving algorithm is currently running.
#[derive(Clone, Debug)]
pub struct Cell {
    coords: Coords,
    paths: PathFlags,
    visited: bool,
}

impl Cell {
    pub(crate) fn new(coords: Coords) -> Cell {
        Cell {
            coords,
            paths: 0,
            visited: false,
        }
    }

    #[inline]
    pub fn coords(&self) -> &[u32] {
        &self.coords
    }

    #[inline]
    pub fn paths(&self) -> PathFlags {
        self.paths
    }

    #[inline]
    pub fn has_passage(&self, direction: Direction) -> bool {
        self.paths & direction.flag() != 0
    }

    #[inline]
    pub(crate) fn is_visited(&self) -> bool {
        self.visited
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    #[inline]
    pub(crate) fn merge_paths(&mut self, flags: PathFlags) {
        self.paths |= flags;
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use quickcheck::quickcheck;
    use smallvec::smallvec;

    #[test]
    fn codec_unit_steps() {
        let check = |delta: &[i64], forward: PathFlags, backward: PathFlags| {
            assert_eq!(path_flags_from_delta(delta), (forward, backward));
        };

        check(&[1], 0b01, 0b10);
        check(&[-1], 0b10, 0b01);
        check(&[0], 0, 0);

        check(&[1, 0], 0b0001, 0b0010);
        check(&[0, 1], 0b0100, 0b1000);
        check(&[0, -1], 0b1000, 0b0100);

        check(&[0, 0, 1], 0b01_0000, 0b10_0000);
        check(&[0, 0, -1], 0b10_0000, 0b01_0000);
    }

    #[test]
    fn codec_is_total_over_multi_axis_deltas() {
        // Not a unit step, still well defined: one bit pair per non-zero axis.
        let (forward, backward) = path_flags_from_delta(&[2, -3]);
        assert_eq!(forward, 0b1001);
        assert_eq!(backward, 0b0110);

        let (forward, backward) = path_flags_from_delta(&[]);
        assert_eq!((forward, backward), (0, 0));
    }

    #[test]
    fn codec_negated_delta_swaps_the_masks() {
        fn prop(raw: Vec<i8>) -> bool {
            let delta: Vec<i64> = raw.iter().take(MAX_AXES).map(|&n| i64::from(n)).collect();
            let negated: Vec<i64> = delta.iter().map(|&n| -n).collect();
            let (forward, backward) = path_flags_from_delta(&delta);
            path_flags_from_delta(&negated) == (backward, forward)
        }
        quickcheck(prop as fn(Vec<i8>) -> bool);
    }

    #[test]
    fn diff_of_coords() {
        assert_eq!(&*diff_coords(&[0, 0], &[1, 0]), &[1, 0]);
        assert_eq!(&*diff_coords(&[1, 0], &[0, 0]), &[-1, 0]);
        assert_eq!(&*diff_coords(&[2, 5, 1], &[2, 4, 1]), &[0, -1, 0]);
        assert_eq!(&*diff_coords(&[7], &[7]), &[0]);
    }

    #[test]
    fn direction_flags_and_opposites() {
        let positive = |r| Direction::Positive(Axis(r));
        let negative = |r| Direction::Negative(Axis(r));

        assert_eq!(positive(0).flag(), 0b0001);
        assert_eq!(negative(0).flag(), 0b0010);
        assert_eq!(positive(1).flag(), 0b0100);
        assert_eq!(negative(1).flag(), 0b1000);
        assert_eq!(positive(2).flag(), 0b01_0000);
        assert_eq!(negative(2).flag(), 0b10_0000);

        assert_eq!(positive(1).opposite(), negative(1));
        assert_eq!(negative(1).opposite(), positive(1));
        assert_eq!(positive(3).opposite().opposite(), positive(3));
        assert_eq!(positive(2).opposite().flag(), negative(2).flag());
    }

    #[test]
    fn direction_enumeration_order() {
        let dirs: Vec<Direction> = Direction::all(2).collect();
        assert_eq!(
            dirs,
            vec![
                Direction::Positive(Axis(0)),
                Direction::Negative(Axis(0)),
                Direction::Positive(Axis(1)),
                Direction::Negative(Axis(1)),
            ]
        );
        assert_eq!(Direction::all(0).count(), 0);
        assert_eq!(Direction::all(4).count(), 8);
    }

    #[test]
    fn offsets_respect_grid_edges() {
        let dims: [u32; 2] = [2, 2];
        let positive = |r| Direction::Positive(Axis(r));
        let negative = |r| Direction::Negative(Axis(r));

        let stepped = positive(0).offset(&[0, 0], &dims);
        assert_eq!(stepped.as_deref(), Some(&[1, 0][..]));
        assert_eq!(positive(0).offset(&[1, 0], &dims), None);
        assert_eq!(negative(0).offset(&[0, 0], &dims), None);

        let stepped = negative(1).offset(&[1, 1], &dims);
        assert_eq!(stepped.as_deref(), Some(&[1, 0][..]));
        assert_eq!(positive(1).offset(&[1, 1], &dims), None);

        // Axis beyond the coordinate's arity steps nowhere.
        assert_eq!(positive(5).offset(&[0, 0], &dims), None);
    }

    #[test]
    fn cell_accessors() {
        let mut cell = Cell::new(smallvec![3, 1]);
        assert_eq!(cell.coords(), &[3, 1]);
        assert_eq!(cell.paths(), 0);
        assert!(!cell.is_visited());

        cell.merge_paths(0b0100);
        assert!(cell.has_passage(Direction::Positive(Axis(1))));
        assert!(!cell.has_passage(Direction::Negative(Axis(1))));
        assert!(!cell.has_passage(Direction::Positive(Axis(0))));

        // OR-merging is idempotent.
        cell.merge_paths(0b0100);
        assert_eq!(cell.paths(), 0b0100);

        cell.mark_visited();
        assert!(cell.is_visited());
    }
}
