//! Plain-text rendering of a grid and its change events.

use cellgrid_core::Matrix;
use cellgrid_interaction::{ChangeEvent, ChangeKind};

/// Renders `matrix` with block separators.
///
/// Selected cells are wrapped in brackets and empty cells are shown as `.`.
///
/// # Examples
///
/// ```
/// use cellgrid_app::render::render_grid;
/// use cellgrid_core::Matrix;
///
/// let matrix = "1 2 3 4\n3 4 1 2\n2 1 4 3\n4 3 2 1".parse::<Matrix>().unwrap();
/// let rendered = render_grid(&matrix);
/// assert_eq!(
///     rendered.lines().collect::<Vec<_>>(),
///     [
///         " 1  2 | 3  4",
///         " 3  4 | 1  2",
///         "------+------",
///         " 2  1 | 4  3",
///         " 4  3 | 2  1",
///     ]
/// );
/// ```
#[must_use]
pub fn render_grid(matrix: &Matrix) -> String {
    let size = matrix.size();
    let block_size = matrix.block_size();
    let width = size.to_string().len();
    // Each cell takes `width` plus one bracket column on each side.
    let block_width = block_size * (width + 2);

    let separator = vec!["-".repeat(block_width); block_size].join("+");

    let mut out = String::new();
    for (row, cells) in matrix.cells().as_slice().chunks(size).enumerate() {
        if row > 0 && row % block_size == 0 {
            out.push_str(&separator);
            out.push('\n');
        }
        let mut line = String::new();
        for (col, cell) in cells.iter().enumerate() {
            if col > 0 && col % block_size == 0 {
                line.push('|');
            }
            let (open, close) = if cell.is_selected() {
                ('[', ']')
            } else {
                (' ', ' ')
            };
            let value = if cell.is_empty() {
                ".".to_owned()
            } else {
                cell.value().to_string()
            };
            line.push_str(&format!("{open}{value:>width$}{close}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Renders one change batch as a single line.
#[must_use]
pub fn render_changes(batch: &[ChangeEvent]) -> String {
    batch
        .iter()
        .map(|event| match event.kind {
            ChangeKind::ValueChanged(value) => format!("{}={value}", event.pos),
            ChangeKind::SelectionChanged(true) => format!("+{}", event.pos),
            ChangeKind::SelectionChanged(false) => format!("-{}", event.pos),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use cellgrid_core::Position;

    use super::*;

    #[test]
    fn test_selection_and_empty_cells() {
        let mut matrix = Matrix::empty(4).unwrap();
        matrix.set_value(Position::new(0, 0), 3).unwrap();
        matrix.set_selected(Position::new(0, 0), true).unwrap();
        matrix.set_selected(Position::new(3, 2), true).unwrap();

        let lines = render_grid(&matrix).lines().map(str::to_owned).collect::<Vec<_>>();
        assert_eq!(lines[0], "[3] . | .  .");
        assert_eq!(lines[2], "------+------");
        assert_eq!(lines[4], " .  . |[.] .");
    }

    #[test]
    fn test_wide_values_are_aligned() {
        let mut matrix = Matrix::empty(16).unwrap();
        matrix.set_value(Position::new(0, 0), 16).unwrap();
        let rendered = render_grid(&matrix);
        let first = rendered.lines().next().unwrap();
        assert!(first.starts_with(" 16   . "));
        assert_eq!(rendered.lines().count(), 16 + 3);
    }

    #[test]
    fn test_render_changes() {
        let pos = Position::new(1, 2);
        let line = render_changes(&[
            ChangeEvent::selection_changed(Position::new(0, 0), false),
            ChangeEvent::selection_changed(pos, true),
            ChangeEvent::value_changed(pos, 7),
        ]);
        assert_eq!(line, "-(0, 0) +(1, 2) (1, 2)=7");
    }
}
