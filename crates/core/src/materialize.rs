use thiserror::Error;

use crate::report::ColumnSpec;
use crate::value::{render_value, ColumnFormat, SqlValue};

/// One row exactly as the backend delivered it: column names in select
/// order, values in the same positions.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub columns: Vec<String>,
    pub values: Vec<SqlValue>,
}

impl RawRow {
    #[must_use]
    pub fn new(columns: Vec<String>, values: Vec<SqlValue>) -> Self {
        Self { columns, values }
    }

    fn value_of(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|index| self.values.get(index))
    }
}

/// A fully formatted result: header labels in presentation order and one
/// string per cell. Row order is whatever the query delivered; nothing in
/// this layer re-sorts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MaterializeError {
    #[error("row {row} has a different column set than the first row")]
    SchemaDrift { row: usize },
    #[error("declared column `{column}` is missing from row {row}")]
    MissingColumn { column: String, row: usize },
}

/// Converts backend rows into presentation strings.
///
/// With a declared column list the output shape is exactly that list and a
/// row missing one of those columns is an error. Without one (the ad-hoc
/// path) the first row's natural order defines the shape for every row.
/// Either way a row whose column set differs from the first row's is
/// rejected, never silently skipped.
pub fn materialize(rows: &[RawRow], spec: &[ColumnSpec]) -> Result<ResultSet, MaterializeError> {
    let Some(first) = rows.first() else {
        return Ok(ResultSet {
            columns: spec.iter().map(|column| column.name.to_string()).collect(),
            rows: Vec::new(),
        });
    };

    for (index, row) in rows.iter().enumerate().skip(1) {
        if row.columns != first.columns {
            return Err(MaterializeError::SchemaDrift { row: index });
        }
    }

    let layout: Vec<(String, ColumnFormat)> = if spec.is_empty() {
        first
            .columns
            .iter()
            .map(|name| (name.clone(), ColumnFormat::Plain))
            .collect()
    } else {
        spec.iter()
            .map(|column| (column.name.to_string(), column.format))
            .collect()
    };

    let mut formatted_rows = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(layout.len());
        for (name, format) in &layout {
            let value = row
                .value_of(name)
                .ok_or_else(|| MaterializeError::MissingColumn {
                    column: name.clone(),
                    row: index,
                })?;
            cells.push(render_value(value, *format));
        }
        formatted_rows.push(cells);
    }

    Ok(ResultSet {
        columns: layout.into_iter().map(|(name, _)| name).collect(),
        rows: formatted_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::{materialize, MaterializeError, RawRow};
    use crate::report::ColumnSpec;
    use crate::value::{ColumnFormat, SqlValue};

    fn product_row(id: i64, name: &str, price: f64) -> RawRow {
        RawRow::new(
            vec![
                "ProductID".to_string(),
                "Name".to_string(),
                "Price".to_string(),
            ],
            vec![
                SqlValue::Int(id),
                SqlValue::Text(name.to_string()),
                SqlValue::Float(price),
            ],
        )
    }

    const PRODUCT_SPEC: &[ColumnSpec] = &[
        ColumnSpec::plain("ProductID"),
        ColumnSpec::plain("Name"),
        ColumnSpec::new("Price", ColumnFormat::Currency),
    ];

    #[test]
    fn declared_columns_define_order_and_formatting() {
        let rows = vec![product_row(101, "Gold Ring", 25000.0)];
        let results = materialize(&rows, PRODUCT_SPEC).expect("materialize should succeed");

        assert_eq!(results.columns, vec!["ProductID", "Name", "Price"]);
        assert_eq!(results.rows, vec![vec!["101", "Gold Ring", "₹25000.00"]]);
    }

    #[test]
    fn every_row_shares_the_first_rows_column_set() {
        let mut rows = vec![product_row(1, "Pendant", 900.0), product_row(2, "Chain", 1200.0)];
        rows[1].columns[2] = "Cost".to_string();

        let err = materialize(&rows, PRODUCT_SPEC).expect_err("schema drift should be rejected");
        assert_eq!(err, MaterializeError::SchemaDrift { row: 1 });
    }

    #[test]
    fn declared_column_absent_from_rows_is_an_error() {
        let rows = vec![RawRow::new(
            vec!["ProductID".to_string()],
            vec![SqlValue::Int(1)],
        )];

        let err = materialize(&rows, PRODUCT_SPEC).expect_err("missing column should be rejected");
        assert_eq!(
            err,
            MaterializeError::MissingColumn {
                column: "Name".to_string(),
                row: 0,
            }
        );
    }

    #[test]
    fn adhoc_path_takes_shape_from_first_row() {
        let rows = vec![product_row(1, "Bangle", 4000.0)];
        let results = materialize(&rows, &[]).expect("materialize should succeed");

        assert_eq!(results.columns, vec!["ProductID", "Name", "Price"]);
        // No declared formats on this path, so the price stays plain.
        assert_eq!(results.rows[0][2], "4000");
    }

    #[test]
    fn empty_input_keeps_declared_header() {
        let results = materialize(&[], PRODUCT_SPEC).expect("materialize should succeed");
        assert!(results.is_empty());
        assert_eq!(results.columns, vec!["ProductID", "Name", "Price"]);
    }
}
