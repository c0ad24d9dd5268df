//! Footer sum-row calculation.

use super::item::{Column, GridRow};

/// One slot in the footer sum row.
#[derive(Debug, Clone, PartialEq)]
pub enum SumCell {
    /// Nothing rendered in this slot.
    Empty,
    /// The "Summary" label, placed immediately before the first total.
    Label,
    /// A column total.
    Total(f64),
}

/// Sums one column over a set of rows. Non-numeric cells count as zero.
pub fn column_sum<T: GridRow>(rows: &[T], key: &str) -> f64 {
    rows.iter()
        .map(|row| row.field(key).as_f64().unwrap_or(0.0))
        .sum()
}

/// Builds the footer sum row for the materialized page.
///
/// The row spans the visible columns plus the three leading layout slots
/// (checkbox, serial and actions); the total for visible column `i` lands
/// in slot `i + 2`, and the slot before the first total carries the
/// `Summary` label. Inputs are not mutated.
pub fn sum_row<T: GridRow>(columns: &[Column], sum_columns: &[&str], rows: &[T]) -> Vec<SumCell> {
    let visible: Vec<&Column> = columns.iter().filter(|c| c.visible).collect();
    let mut cells = vec![SumCell::Empty; visible.len() + 3];

    let mut first_total: Option<usize> = None;
    for (i, column) in visible.iter().enumerate() {
        if !sum_columns.contains(&column.key.as_str()) {
            continue;
        }
        let slot = i + 2;
        cells[slot] = SumCell::Total(column_sum(rows, &column.key));
        if first_total.is_none() {
            first_total = Some(slot);
        }
    }

    if let Some(slot) = first_total
        && slot > 0
    {
        cells[slot - 1] = SumCell::Label;
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use medigrid_lib::model::Record;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("qty", "Qty"),
            Column::new("price", "Price"),
        ]
    }

    #[test]
    fn non_numeric_cells_count_as_zero() {
        let rows = vec![
            Record::new().set("qty", 2i64),
            Record::new().set("qty", "x"),
            Record::new().set("qty", 5i64),
        ];
        assert_eq!(column_sum(&rows, "qty"), 7.0);
    }

    #[test]
    fn totals_land_two_slots_right_of_their_column() {
        let rows = vec![
            Record::new().set("qty", 3i64).set("price", 1.5),
            Record::new().set("qty", 4i64).set("price", 2.5),
        ];
        let cells = sum_row(&columns(), &["qty", "price"], &rows);

        assert_eq!(cells.len(), 6);
        // "qty" is visible column 1, "price" is 2.
        assert_eq!(cells[3], SumCell::Total(7.0));
        assert_eq!(cells[4], SumCell::Total(4.0));
        assert_eq!(cells[2], SumCell::Label);
        assert_eq!(cells[0], SumCell::Empty);
    }

    #[test]
    fn hidden_columns_shift_the_slots() {
        let mut columns = columns();
        columns[0] = Column::new("name", "Name").hidden();
        let rows = vec![Record::new().set("qty", 1i64)];
        let cells = sum_row(&columns, &["qty"], &rows);

        // Visible columns are qty (0) and price (1).
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[2], SumCell::Total(1.0));
        assert_eq!(cells[1], SumCell::Label);
    }

    #[test]
    fn no_sum_columns_means_no_label() {
        let rows: Vec<Record> = Vec::new();
        let cells = sum_row(&columns(), &[], &rows);
        assert!(cells.iter().all(|cell| *cell == SumCell::Empty));
    }
}
