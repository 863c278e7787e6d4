use rand::Rng;
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;
use std::error;
use std::fmt;

use crate::cells::{
    diff_coords, path_flags_from_delta, Cell, Coords, CoordsSmallVec, Direction, MAX_AXES,
};
use crate::units::{AxesCount, Axis, CellsCount};

pub(crate) type IndexSmallVec = SmallVec<[usize; 8]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// Shape rejected at construction: no axes, a zero extent, more axes
    /// than `MAX_AXES`, or a cell count overflowing `usize`.
    InvalidShape,
    /// A coordinate component outside `[0, extent)` on some axis.
    OutOfBounds {
        axis: usize,
        position: u32,
        extent: u32,
    },
    /// An operation wanting an exact number of axes was given another.
    Dimensionality { required: usize, actual: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MazeError::InvalidShape => write!(
                f,
                "invalid shape: between 1 and {} axes required, every extent positive",
                MAX_AXES
            ),
            MazeError::OutOfBounds {
                axis,
                position,
                extent,
            } => write!(
                f,
                "position {} is outside extent {} on axis {}",
                position, extent, axis
            ),
            MazeError::Dimensionality { required, actual } => write!(
                f,
                "operation requires {} axes but the grid or coordinate has {}",
                required, actual
            ),
        }
    }
}

impl error::Error for MazeError {}

/// An N-dimensional grid of cells. All cells for the full Cartesian
/// product of the shape are allocated eagerly at construction and
/// addressed through a flat row-major arena (axis 0 varies fastest).
#[derive(Debug)]
pub struct Maze {
    dimensions: Coords,
    cells: Vec<Cell>,
}

impl Maze {
    /// Builds a grid from one positive extent per axis. Every cell starts
    /// with no passages and an unset visitation marker.
    pub fn new(dimensions: &[u32]) -> Result<Maze, MazeError> {
        if dimensions.is_empty()
            || dimensions.len() > MAX_AXES
            || dimensions.iter().any(|&extent| extent == 0)
        {
            return Err(MazeError::InvalidShape);
        }
        let mut cells_count: usize = 1;
        for &extent in dimensions {
            cells_count = cells_count
                .checked_mul(extent as usize)
                .ok_or(MazeError::InvalidShape)?;
        }

        let dims: Coords = SmallVec::from_slice(dimensions);
        let mut cells = Vec::with_capacity(cells_count);
        for index in 0..cells_count {
            cells.push(Cell::new(coords_of_index(&dims, index)));
        }
        Ok(Maze {
            dimensions: dims,
            cells,
        })
    }

    #[inline]
    pub fn dimensions(&self) -> &[u32] {
        &self.dimensions
    }

    #[inline]
    pub fn dimensionality(&self) -> AxesCount {
        AxesCount(self.dimensions.len())
    }

    #[inline]
    pub fn size(&self) -> CellsCount {
        CellsCount(self.cells.len())
    }

    /// Direct lookup, no search. Errors on a wrong-arity or out-of-range
    /// coordinate; never clamps.
    pub fn cell(&self, coords: &[u32]) -> Result<&Cell, MazeError> {
        let index = self.coords_to_index(coords)?;
        Ok(&self.cells[index])
    }

    /// One uniform draw per axis, axes independent.
    pub fn random_cell(&self, rng: &mut XorShiftRng) -> Coords {
        self.dimensions
            .iter()
            .map(|&extent| rng.gen_range(0..extent))
            .collect()
    }

    /// Grid-adjacent coordinates of `coords`, axis ascending, positive
    /// direction first. Between 1 and `2 * dimensionality` entries.
    pub fn neighbours(&self, coords: &[u32]) -> Result<CoordsSmallVec, MazeError> {
        self.validate_coords(coords)?;
        Ok(Direction::all(self.dimensions.len())
            .filter_map(|direction| direction.offset(coords, &self.dimensions))
            .collect())
    }

    /// The subset of `neighbours` reachable through a carved passage
    /// from `coords`.
    pub fn linked_neighbours(&self, coords: &[u32]) -> Result<CoordsSmallVec, MazeError> {
        let cell = self.cell(coords)?;
        Ok(Direction::all(self.dimensions.len())
            .filter(|&direction| cell.has_passage(direction))
            .filter_map(|direction| direction.offset(coords, &self.dimensions))
            .collect())
    }

    /// Opens a passage between two cells: the forward flag lands on `a`,
    /// the backward flag on `b`, in one call. Idempotent, and the only
    /// mutator of cell `paths` in the crate. Callers are expected to pass
    /// grid-adjacent coordinates; the delta is encoded as given.
    pub fn carve(&mut self, a: &[u32], b: &[u32]) -> Result<(), MazeError> {
        let a_index = self.coords_to_index(a)?;
        let b_index = self.coords_to_index(b)?;
        self.carve_indices(a_index, b_index);
        Ok(())
    }

    /// The linear arena index of a coordinate.
    pub fn coords_to_index(&self, coords: &[u32]) -> Result<usize, MazeError> {
        self.validate_coords(coords)?;
        Ok(index_of_coords(&self.dimensions, coords))
    }

    /// The coordinate stored at a linear arena index, `None` past the end.
    pub fn coords_from_index(&self, index: usize) -> Option<Coords> {
        if index < self.cells.len() {
            Some(coords_of_index(&self.dimensions, index))
        } else {
            None
        }
    }

    /// Every coordinate, in linear index order.
    pub fn iter(&self) -> CoordsIter {
        CoordsIter {
            dimensions: self.dimensions.clone(),
            current: 0,
            cells_count: self.cells.len(),
        }
    }

    /// Every carved passage exactly once, as an ordered coordinate pair
    /// with the second cell on the positive side of an axis.
    pub fn passages(&self) -> PassagesIter {
        PassagesIter {
            maze: self,
            index: 0,
            axis: 0,
        }
    }

    pub fn passage_count(&self) -> usize {
        self.passages().count()
    }

    fn validate_coords(&self, coords: &[u32]) -> Result<(), MazeError> {
        if coords.len() != self.dimensions.len() {
            return Err(MazeError::Dimensionality {
                required: self.dimensions.len(),
                actual: coords.len(),
            });
        }
        for (axis, (&position, &extent)) in
            coords.iter().zip(self.dimensions.iter()).enumerate()
        {
            if position >= extent {
                return Err(MazeError::OutOfBounds {
                    axis,
                    position,
                    extent,
                });
            }
        }
        Ok(())
    }

    // Index-based counterparts used by the carving algorithms, which keep
    // only valid arena indices and so cannot fail.

    pub(crate) fn carve_indices(&mut self, a_index: usize, b_index: usize) {
        let delta = diff_coords(self.cells[a_index].coords(), self.cells[b_index].coords());
        let (forward, backward) = path_flags_from_delta(&delta);
        self.cells[a_index].merge_paths(forward);
        self.cells[b_index].merge_paths(backward);
    }

    pub(crate) fn visit_index(&mut self, index: usize) {
        self.cells[index].mark_visited();
    }

    pub(crate) fn random_cell_index(&self, rng: &mut XorShiftRng) -> usize {
        let coords = self.random_cell(rng);
        index_of_coords(&self.dimensions, &coords)
    }

    pub(crate) fn unvisited_neighbour_indices(&self, index: usize) -> IndexSmallVec {
        let coords = self.cells[index].coords();
        Direction::all(self.dimensions.len())
            .filter_map(|direction| direction.offset(coords, &self.dimensions))
            .map(|neighbour| index_of_coords(&self.dimensions, &neighbour))
            .filter(|&neighbour_index| !self.cells[neighbour_index].is_visited())
            .collect()
    }
}

impl<'a> IntoIterator for &'a Maze {
    type Item = Coords;
    type IntoIter = CoordsIter;

    fn into_iter(self) -> CoordsIter {
        self.iter()
    }
}

fn index_of_coords(dimensions: &[u32], coords: &[u32]) -> usize {
    let mut index = 0;
    let mut stride = 1;
    for (&position, &extent) in coords.iter().zip(dimensions.iter()) {
        index += position as usize * stride;
        stride *= extent as usize;
    }
    index
}

fn coords_of_index(dimensions: &[u32], index: usize) -> Coords {
    let mut remaining = index;
    let mut coords = Coords::new();
    for &extent in dimensions {
        coords.push((remaining % extent as usize) as u32);
        remaining /= extent as usize;
    }
    coords
}

#[derive(Clone, Debug)]
pub struct CoordsIter {
    dimensions: Coords,
    current: usize,
    cells_count: usize,
}

impl Iterator for CoordsIter {
    type Item = Coords;

    fn next(&mut self) -> Option<Coords> {
        if self.current < self.cells_count {
            let coords = coords_of_index(&self.dimensions, self.current);
            self.current += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CoordsIter {}

#[derive(Clone, Debug)]
pub struct PassagesIter<'a> {
    maze: &'a Maze,
    index: usize,
    axis: usize,
}

impl<'a> Iterator for PassagesIter<'a> {
    type Item = (Coords, Coords);

    fn next(&mut self) -> Option<(Coords, Coords)> {
        let dimensionality = self.maze.dimensions.len();
        while self.index < self.maze.cells.len() {
            while self.axis < dimensionality {
                let direction = Direction::Positive(Axis(self.axis));
                self.axis += 1;
                let cell = &self.maze.cells[self.index];
                if cell.has_passage(direction) {
                    if let Some(neighbour) =
                        direction.offset(cell.coords(), &self.maze.dimensions)
                    {
                        return Some((SmallVec::from_slice(cell.coords()), neighbour));
                    }
                }
            }
            self.axis = 0;
            self.index += 1;
        }
        None
    }
}
