/// Column alignment used by [`format_table`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Justify {
    Left,
    #[default]
    Center,
    Right,
}

/// Lay out `rows` as aligned columns.
///
/// Each column is as wide as its widest cell (in chars); `sep` goes between
/// columns and rows are joined with newlines. Rows shorter than the first row
/// are padded with empty cells.
pub fn format_table<R, C>(rows: R, sep: &str, justify: Justify) -> String
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: ToString,
{
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.to_string()).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0_usize; columns];
    for row in &rows {
        for (index, cell) in row.iter().enumerate() {
            widths[index] = widths[index].max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (index, &width) in widths.iter().enumerate() {
                if index != 0 {
                    line.push_str(sep);
                }
                let cell = row.get(index).map(String::as_str).unwrap_or("");
                let padded = match justify {
                    Justify::Left => format!("{cell:<width$}"),
                    Justify::Center => format!("{cell:^width$}"),
                    Justify::Right => format!("{cell:>width$}"),
                };
                line.push_str(&padded);
            }
            line
        })
        .collect::<Vec<String>>()
        .join("\n")
}
