use std::fmt::{Debug, Display};
use std::ops::Add;

use fnv::FnvHashMap;
use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::{Coords, CoordsSmallVec};
use crate::grid::Maze;
use crate::units::CellsCount;

// Trait used purely as a generic type parameter alias, as it is ugly to
// spell the full bound set out each time. Generic parameter type aliases
// are not in the language; `type X = Y;` only works with concrete types.
pub trait MaxDistance:
    Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord
{
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + Ord> MaxDistance
    for T
{
}

/// Breadth-first flood distances over the carved passages of a maze,
/// from one start cell. Cells with no route from the start are absent.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coords: Coords,
    distances: FnvHashMap<Coords, MaxDistanceT>,
    max_distance: MaxDistanceT,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
where
    MaxDistanceT: MaxDistance,
{
    /// Floods the maze from `start_coords`, one unit per passage stepped.
    /// `None` for an invalid start coordinate.
    pub fn new(maze: &Maze, start_coords: &[u32]) -> Option<Distances<MaxDistanceT>> {
        if maze.cell(start_coords).is_err() {
            return None;
        }
        let start: Coords = SmallVec::from_slice(start_coords);

        // Every passage costs one step, so the first distance written to
        // a cell is already the shortest and the map doubles as the
        // visited set for the frontier sweep.
        let CellsCount(cells_count) = maze.size();
        let mut distances: FnvHashMap<Coords, MaxDistanceT> =
            FnvHashMap::with_capacity_and_hasher(cells_count, Default::default());
        distances.insert(start.clone(), Zero::zero());
        let mut max = Zero::zero();

        let mut frontier = vec![start.clone()];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for cell_coords in &frontier {
                let distance_to_cell: MaxDistanceT = *distances
                    .entry(cell_coords.clone())
                    .or_insert_with(Bounded::max_value);
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links = match maze.linked_neighbours(cell_coords) {
                    Ok(links) => links,
                    Err(_) => return None,
                };
                for link_coords in &links {
                    let distance_to_link: MaxDistanceT = *distances
                        .entry(link_coords.clone())
                        .or_insert_with(Bounded::max_value);
                    if distance_to_link == Bounded::max_value() {
                        distances.insert(link_coords.clone(), distance_to_cell + One::one());
                        new_frontier.push(link_coords.clone());
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coords: start,
            distances,
            max_distance: max,
        })
    }

    #[inline]
    pub fn start(&self) -> &[u32] {
        &self.start_coords
    }

    #[inline]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    /// `None` when the cell is unreachable from the start or the
    /// coordinate is not part of the flooded grid.
    pub fn distance_from_start_to(&self, coords: &[u32]) -> Option<MaxDistanceT> {
        let key: Coords = SmallVec::from_slice(coords);
        self.distances.get(&key).copied()
    }

    /// All reachable cells at the maximal distance from the start.
    pub fn furthest_points(&self) -> CoordsSmallVec {
        let furthest_distance = self.max();
        let mut furthest = CoordsSmallVec::new();
        for (coords, &distance) in self.distances.iter() {
            if distance == furthest_distance {
                furthest.push(coords.clone());
            }
        }
        furthest
    }
}

/// One shortest route from the distance flood's start to `end_point`,
/// walked back through strictly decreasing distances. `None` when the
/// end is unreachable.
pub fn shortest_path<MaxDistanceT>(
    maze: &Maze,
    distances_from_start: &Distances<MaxDistanceT>,
    end_point: &[u32],
) -> Option<Vec<Coords>>
where
    MaxDistanceT: MaxDistance,
{
    distances_from_start.distance_from_start_to(end_point)?;

    let start: Coords = SmallVec::from_slice(distances_from_start.start());
    let mut current: Coords = SmallVec::from_slice(end_point);
    let mut path: Vec<Coords> = vec![current.clone()];

    while current != start {
        let current_distance = distances_from_start.distance_from_start_to(&current)?;

        let linked = match maze.linked_neighbours(&current) {
            Ok(linked) => linked,
            Err(_) => return None,
        };
        let (closer_coords, closer_distance) = linked
            .iter()
            .filter_map(|coords| {
                distances_from_start
                    .distance_from_start_to(coords)
                    .map(|distance| (coords, distance))
            })
            .min_by_key(|&(_, distance)| distance)?;

        if closer_distance >= current_distance {
            // No step towards the start exists; the distance data does
            // not belong to this maze.
            return None;
        }
        current = SmallVec::from_slice(closer_coords);
        path.push(current.clone());
    }

    path.reverse();
    Some(path)
}
