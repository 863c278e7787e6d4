use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::grid::Maze;

/// Carves one random corridor through the maze: a depth-first walk that
/// starts at the all-zero coordinate and keeps stepping to a uniformly
/// chosen unvisited neighbour until it reaches a dead end. It never
/// backtracks, so most of the grid is usually left untouched. The result
/// is a single simple path from the origin, not a full maze.
///
/// Expects a freshly constructed maze; visitation marks left by an
/// earlier carving run make the outcome undefined.
pub fn chaotic_path(maze: &mut Maze, rng: &mut XorShiftRng) {
    let origin = 0;
    maze.visit_index(origin);

    let mut current = origin;
    loop {
        let unvisited = maze.unvisited_neighbour_indices(current);
        if unvisited.is_empty() {
            break;
        }
        let next = unvisited[rng.gen_range(0..unvisited.len())];
        maze.carve_indices(current, next);
        maze.visit_index(next);
        current = next;
    }
}

/// Carves a complete spanning maze with the growing tree algorithm.
///
/// An active-set of live cells starts from one random cell. Each round
/// selects the most recently added cell with probability
/// `probability_new`, otherwise a uniformly random member of the set. A
/// selected cell with no unvisited neighbour is removed for good; any
/// other carves to a random unvisited neighbour, which joins the set as
/// the new top. The loop ends when the set empties, at which point every
/// cell in the grid is connected.
///
/// At `probability_new = 1.0` this is a backtracking depth-first carve
/// with long winding corridors and few branches; at `0.0` it behaves
/// like Prim's algorithm, giving short, heavily branching corridors.
/// Values in between blend the two textures.
///
/// Expects a freshly constructed maze; visitation marks left by an
/// earlier carving run make the outcome undefined.
pub fn growing_tree(maze: &mut Maze, probability_new: f64, rng: &mut XorShiftRng) {
    let start = maze.random_cell_index(rng);
    maze.visit_index(start);
    let mut active: Vec<usize> = vec![start];

    while !active.is_empty() {
        let slot = if rng.gen::<f64>() > probability_new {
            rng.gen_range(0..active.len())
        } else {
            active.len() - 1
        };
        let cell = active[slot];

        let unvisited = maze.unvisited_neighbour_indices(cell);
        if unvisited.is_empty() {
            // Exhausted cells leave the active-set permanently.
            active.remove(slot);
            continue;
        }

        let next = unvisited[rng.gen_range(0..unvisited.len())];
        maze.visit_index(next);
        maze.carve_indices(cell, next);
        active.push(next);
    }
}
