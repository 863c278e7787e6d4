use docopt::Docopt;
use itertools::Itertools;
use ndmazes::{generators, grid::Maze, pathing, renderers, units};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{fs::File, io, io::prelude::*};

const USAGE: &str = "ndmazes

Usage:
    ndmazes_driver -h | --help
    ndmazes_driver render (chaotic|growing-tree) [--shape=<extents>] [--probability-new=<p>] [--seed=<n>] [--text-out=<path>] [--save-edges=<path>] [--show-furthest]

Options:
    -h --help               Show this screen.
    --shape=<extents>       Cells per axis, comma or x separated, axis 0 first [default: 16,12].
    --probability-new=<p>   Chance that growing-tree extends the newest active cell instead of a random one [default: 1.0].
    --seed=<n>              Seed the random generator, making the maze reproducible.
    --text-out=<path>       Output file path for a textual rendering of a maze. Requires a 2 axis shape.
    --save-edges=<path>     Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#cells) m(#passages). Line 2+ passage between cells. Uses 1-based cell indices.
    --show-furthest         Report the cells furthest from the origin and their distance.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_chaotic: bool,
    cmd_growing_tree: bool,
    flag_shape: String,
    flag_probability_new: f64,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_save_edges: String,
    flag_show_furthest: bool,
}

// Errors live in an `errors` module. `error_chain!` creates the Error,
// ErrorKind, ResultExt and Result types, plus the From conversions that
// let `?` lift the foreign errors into our own.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            IoFailure(::std::io::Error);
            ShapeParseFailure(::std::num::ParseIntError);
            MazeFailure(::ndmazes::grid::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let shape = parse_shape(&args.flag_shape)?;
    let mut maze = Maze::new(&shape)?;

    let mut rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };
    generate_maze(&mut maze, &args, &mut rng);

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    let units::AxesCount(axes) = maze.dimensionality();
    if axes == 2 {

        let text = renderers::render_text(&maze)?;
        if args.flag_text_out.is_empty() {
            print!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    } else {

        if !args.flag_text_out.is_empty() {
            return Err(format!("A text rendering requires a 2 axis shape, not {} axes", axes)
                .into());
        }
        let units::CellsCount(cells_count) = maze.size();
        println!(
            "Carved a {} maze: {} cells, {} passages.",
            maze.dimensions().iter().join("x"),
            cells_count,
            maze.passage_count()
        );
    }

    if args.flag_show_furthest {

        show_furthest_points(&maze)?;
    }

    Ok(())
}

fn generate_maze(maze: &mut Maze, maze_args: &MazeArgs, rng: &mut XorShiftRng) {

    if maze_args.cmd_chaotic {
        generators::chaotic_path(maze, rng);
    } else if maze_args.cmd_growing_tree {
        generators::growing_tree(maze, maze_args.flag_probability_new, rng);
    }
}

/// One positive extent per axis, e.g. "16,12" or "8x8x8".
fn parse_shape(shape_arg: &str) -> Result<Vec<u32>> {

    let mut extents: Vec<u32> = Vec::new();
    for extent_text in shape_arg.split(|c: char| c == ',' || c == 'x') {
        let extent = extent_text.trim().parse().chain_err(|| {
            format!("Invalid shape {:?}: every axis wants a positive cell count", shape_arg)
        })?;
        extents.push(extent);
    }
    Ok(extents)
}

fn show_furthest_points(maze: &Maze) -> Result<()> {

    let units::AxesCount(axes) = maze.dimensionality();
    let origin = vec![0; axes];
    let distances = pathing::Distances::<u32>::new(maze, &origin)
        .ok_or("Provided invalid start coordinate from which to measure distances.")?;

    let listing = distances
        .furthest_points()
        .iter()
        .map(|coords| format!("({})", coords.iter().join(", ")))
        .join(" ");
    println!(
        "Furthest cells from the origin, at distance {}: {}",
        distances.max(),
        listing
    );

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let units::CellsCount(cells_count) = maze.size();
    graph_data.push_str(cells_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(maze.passage_count().to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze.passages() {
        let src_as_1_based_index = maze.coords_to_index(&src)? + 1;
        let dst_as_1_based_index = maze.coords_to_index(&dst)? + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
