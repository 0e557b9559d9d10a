use crate::bracket::{DisplayCell, DisplayMatrix};

/// Draws the bracket as an ASCII table, one column per round.
///
/// Slot `i` of round `r` is drawn on row `i * 2^r`, so each winner sits level
/// with the top of the pair it came from.
pub fn render_bracket(matrix: &DisplayMatrix) -> String {
    let Some(first_round) = matrix.first() else {
        return String::new();
    };

    let mut grid = vec![vec![String::new(); matrix.len()]; first_round.len()];
    for (round, cells) in matrix.iter().enumerate() {
        for (index, cell) in cells.iter().enumerate() {
            grid[index << round][round] = cell_text(cell);
        }
    }

    let header: Vec<String> = (0..matrix.len()).map(|round| round_title(round, matrix.len())).collect();
    let widths: Vec<usize> = (0..matrix.len())
        .map(|col| {
            grid.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let border = format!(
        "+{}+",
        widths.iter().map(|w| "-".repeat(w + 2)).collect::<Vec<_>>().join("+")
    );

    let mut lines = vec![border.clone(), table_row(&header, &widths), border.clone()];
    for row in &grid {
        lines.push(table_row(row, &widths));
    }
    lines.push(border);
    lines.join("\n")
}

fn round_title(round: usize, rounds: usize) -> String {
    match rounds - round {
        1 => "Champion".to_string(),
        2 => "Final".to_string(),
        _ => format!("Round {}", round + 1),
    }
}

fn cell_text(cell: &DisplayCell) -> String {
    match (&cell.name, cell.score) {
        (Some(name), Some(score)) => format!("{name} ({score})"),
        (Some(name), None) => name.clone(),
        (None, _) => String::new(),
    }
}

fn table_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {cell:<width$} "))
        .collect();
    format!("|{}|", padded.join("|"))
}
