/// Column alignment inside a [`Table`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A plain-text table for terminal output
pub struct Table {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a new table with the given headers, all left aligned
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.chars().count()).collect();
        let aligns = vec![Align::Left; headers.len()];
        let headers = headers.iter().map(|h| h.to_string()).collect();
        Table {
            headers,
            aligns,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Right-align a column, used for prices and counts
    pub fn align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.aligns.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.chars().count());
            }
        }

        self.rows.push(row);
    }

    /// Render the table as a formatted string
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.render_row(&self.headers));
        output.push('\n');

        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }

        output
    }

    fn render_row(&self, row: &[String]) -> String {
        let mut line = String::new();
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                let width = self.col_widths[i];
                match self.aligns[i] {
                    Align::Left => line.push_str(&format!("{:<width$}", col, width = width)),
                    Align::Right => line.push_str(&format!("{:>width$}", col, width = width)),
                }
                if i < row.len() - 1 {
                    line.push_str(" | ");
                }
            }
        }
        line.trim_end().to_string()
    }

    fn render_separator(&self) -> String {
        let mut line = String::new();
        for (i, &width) in self.col_widths.iter().enumerate() {
            line.push_str(&"-".repeat(width));
            if i < self.col_widths.len() - 1 {
                line.push_str("-+-");
            }
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Date", "Average", "Listings"]).align(2, Align::Right);
        table.add_row(vec!["2024-01-01".into(), "$945.00".into(), "5".into()]);
        table.add_row(vec!["2024-01-02".into(), "$960.00".into(), "12".into()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Date       | Average | Listings");
        assert_eq!(lines[1], "-----------+---------+---------");
        assert_eq!(lines[2], "2024-01-01 | $945.00 |        5");
        assert_eq!(lines[3], "2024-01-02 | $960.00 |       12");
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec!["Model"]);
        assert_eq!(table.render(), "Model\n-----\n");
    }
}
