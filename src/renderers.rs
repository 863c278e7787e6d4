use crate::cells::Direction;
use crate::grid::{Maze, MazeError};
use crate::units::Axis;

/// Renders a two-dimensional maze as text: a header line for the top
/// boundary, then one line per row of cells. Each cell contributes a
/// left-wall character and a floor character, with an extra right-wall
/// character closing every row. Axis 0 runs left to right, axis 1 top to
/// bottom, and every line ends with a newline.
///
/// The exact character layout is a fixed contract for callers comparing
/// against reference output. Grids of any other dimensionality are
/// rejected with `MazeError::Dimensionality` and left untouched.
pub fn render_text(maze: &Maze) -> Result<String, MazeError> {
    let dimensions = maze.dimensions();
    if dimensions.len() != 2 {
        return Err(MazeError::Dimensionality {
            required: 2,
            actual: dimensions.len(),
        });
    }
    let (width, height) = (dimensions[0], dimensions[1]);

    let east = Direction::Positive(Axis(0));
    let west = Direction::Negative(Axis(0));
    let down = Direction::Positive(Axis(1));
    let up = Direction::Negative(Axis(1));

    let line_length = (2 * width + 2) as usize;
    let mut output = String::with_capacity(line_length * (height as usize + 1));

    // Top boundary. A cell with its upward bit set leaves the ceiling
    // open, which only happens for passages carved out through the edge.
    output.push(' ');
    for x in 0..width {
        let cell = maze.cell(&[x, 0])?;
        output.push_str(if cell.has_passage(up) { "  " } else { "_ " });
    }
    output.push('\n');

    for y in 0..height {
        let last_row = y == height - 1;
        for x in 0..width {
            let cell = maze.cell(&[x, y])?;
            output.push(if cell.has_passage(west) { ' ' } else { '|' });

            // The floor of this cell doubles as the ceiling of the cell
            // below, whose upward bit is authoritative except on the
            // bottom row.
            let floor_open = if last_row {
                cell.has_passage(down)
            } else {
                maze.cell(&[x, y + 1])?.has_passage(up)
            };
            output.push(if floor_open { ' ' } else { '_' });

            if x == width - 1 {
                output.push(if cell.has_passage(east) { ' ' } else { '|' });
            }
        }
        output.push('\n');
    }

    Ok(output)
}
