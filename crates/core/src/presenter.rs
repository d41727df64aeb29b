use crate::materialize::ResultSet;

/// Every column starts at this width after a render; nothing is carried
/// over from the previous result.
pub const DEFAULT_COLUMN_WIDTH: u16 = 18;

/// Notice shown in place of rows when a query matched nothing. An empty
/// match is a normal outcome, not a failure.
pub const EMPTY_NOTICE: &str = "No matching records";

/// The one table the dashboard shows. `render` swaps the entire content;
/// there is no diffing and no state survives from the previous result
/// apart from nothing at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    title: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<u16>,
    empty: bool,
}

impl TableView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the visible table with a freshly materialized result.
    /// Column widths all reset to the uniform default. A result with no
    /// rows keeps its header and flips the empty notice on.
    pub fn render(&mut self, results: &ResultSet, title: &str) {
        self.title = title.to_string();
        self.columns = results.columns.clone();
        self.rows = results.rows.clone();
        self.column_widths = vec![DEFAULT_COLUMN_WIDTH; results.columns.len()];
        self.empty = results.is_empty();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn column_widths(&self) -> &[u16] {
        &self.column_widths
    }

    /// The empty notice, when the last render produced no rows. `None`
    /// both for a populated grid and for a cleared table.
    #[must_use]
    pub fn empty_notice(&self) -> Option<&'static str> {
        if self.empty {
            Some(EMPTY_NOTICE)
        } else {
            None
        }
    }
}
