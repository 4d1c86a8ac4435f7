//! Box-drawn text rendering of a table

use std::fmt;

use super::Table;

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid: Vec<Vec<String>> = Vec::with_capacity(self.index.len() + 1);

        let mut header = vec![self.index_name.clone()];
        header.extend(self.columns.iter().map(|c| c.name()));
        grid.push(header);

        for (r, label) in self.index.iter().enumerate() {
            let mut row = vec![label.name()];
            row.extend((0..self.columns.len()).map(|c| {
                self.store
                    .get(c, r)
                    .map(|v| v.display().into_owned())
                    .unwrap_or_default()
            }));
            grid.push(row);
        }

        f.write_str(&build_grid(&grid))
    }
}

/// Lay out rows of cells with box-drawing borders; the first row is the header
fn build_grid(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let col_count = data[0].len();
    let mut col_widths: Vec<usize> = vec![0; col_count];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let mut output = String::new();
    push_border(&mut output, &col_widths, ('┌', '┬', '┐'));

    if let Some(header) = data.first() {
        push_row(&mut output, header, &col_widths);
    }

    push_border(&mut output, &col_widths, ('├', '┼', '┤'));

    for row in data.iter().skip(1) {
        push_row(&mut output, row, &col_widths);
    }

    push_border(&mut output, &col_widths, ('└', '┴', '┘'));
    output
}

fn push_border(output: &mut String, widths: &[usize], (left, mid, right): (char, char, char)) {
    output.push(left);
    for (i, width) in widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < widths.len() - 1 {
            output.push(mid);
        }
    }
    output.push(right);
    output.push('\n');
}

fn push_row(output: &mut String, row: &[String], widths: &[usize]) {
    output.push('│');
    for (i, cell) in row.iter().enumerate() {
        let width = widths.get(i).copied().unwrap_or(0);
        output.push_str(&format!(" {:width$} │", cell, width = width));
    }
    output.push('\n');
}
