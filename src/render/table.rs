use std::cmp::Ordering;

use crate::data::model::{COLUMN_NAMES, PenguinDataset, PenguinRecord};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub direction: SortDirection,
}

/// A sortable cell value; `None` is a missing value.
#[derive(Debug, PartialEq)]
enum SortKey<'a> {
    Text(Option<&'a str>),
    Number(Option<f64>),
}

fn sort_key(record: &PenguinRecord, column: usize) -> SortKey<'_> {
    match column {
        0 => SortKey::Text(Some(record.species.as_str())),
        1 => SortKey::Text(Some(record.island.as_str())),
        2 => SortKey::Number(record.bill_length_mm),
        3 => SortKey::Number(record.bill_depth_mm),
        4 => SortKey::Number(record.flipper_length_mm),
        5 => SortKey::Number(record.body_mass_g),
        6 => SortKey::Text(record.sex.map(|s| s.as_str())),
        _ => SortKey::Number(Some(record.year as f64)),
    }
}

/// Order two cells; missing values go last whatever the direction.
fn compare(a: &SortKey<'_>, b: &SortKey<'_>, direction: SortDirection) -> Ordering {
    fn present<T>(
        a: Option<T>,
        b: Option<T>,
        cmp: impl Fn(T, T) -> Ordering,
        dir: SortDirection,
    ) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => match dir {
                SortDirection::Ascending => cmp(a, b),
                SortDirection::Descending => cmp(b, a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
    match (a, b) {
        (SortKey::Text(a), SortKey::Text(b)) => present(*a, *b, |a, b| a.cmp(b), direction),
        (SortKey::Number(a), SortKey::Number(b)) => {
            present(*a, *b, |a: f64, b: f64| a.total_cmp(&b), direction)
        }
        _ => Ordering::Equal,
    }
}

/// Text shown in a data table cell; `NA` marks a missing value.
pub fn cell_text(record: &PenguinRecord, column: usize) -> String {
    fn number(v: Option<f64>) -> String {
        v.map(|v| format!("{v}")).unwrap_or_else(|| "NA".to_string())
    }
    match column {
        0 => record.species.to_string(),
        1 => record.island.to_string(),
        2 => number(record.bill_length_mm),
        3 => number(record.bill_depth_mm),
        4 => number(record.flipper_length_mm),
        5 => number(record.body_mass_g),
        6 => record
            .sex
            .map(|s| s.to_string())
            .unwrap_or_else(|| "NA".to_string()),
        _ => record.year.to_string(),
    }
}

// ---------------------------------------------------------------------------
// DataTableView
// ---------------------------------------------------------------------------

/// The filtered rows plus the table widget's own sort and paging state.
///
/// Sort and page are not dashboard inputs: they belong to the widget and
/// survive a refresh with new rows.
#[derive(Debug, Clone)]
pub struct DataTableView {
    records: Vec<PenguinRecord>,
    /// Display order as indices into `records`.
    order: Vec<usize>,
    sort: Option<SortState>,
    page: usize,
    page_size: usize,
}

impl Default for DataTableView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl DataTableView {
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            order: Vec::new(),
            sort: None,
            page: 0,
            page_size: page_size.max(1),
        }
    }

    /// Replace the rows, keeping sort and clamping the page.
    pub fn refresh(&mut self, view: &PenguinDataset) {
        self.records = view.records.clone();
        self.order = (0..self.records.len()).collect();
        self.apply_sort();
        self.page = self.page.min(self.page_count() - 1);
    }

    pub fn columns(&self) -> &'static [&'static str] {
        &COLUMN_NAMES
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Sort by `column`: ascending first, then toggling direction.
    pub fn toggle_sort(&mut self, column: usize) {
        let direction = match self.sort {
            Some(SortState {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => SortDirection::Descending,
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortState { column, direction });
        self.apply_sort();
        self.page = 0;
    }

    fn apply_sort(&mut self) {
        let Some(SortState { column, direction }) = self.sort else {
            return;
        };
        let records = &self.records;
        self.order.sort_by(|&a, &b| {
            compare(
                &sort_key(&records[a], column),
                &sort_key(&records[b], column),
                direction,
            )
        });
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Always at least one page, even with no rows.
    pub fn page_count(&self) -> usize {
        self.records.len().div_ceil(self.page_size).max(1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    /// Rows of the current page, in display order.
    pub fn page_rows(&self) -> impl Iterator<Item = &PenguinRecord> {
        self.order
            .iter()
            .skip(self.page * self.page_size)
            .take(self.page_size)
            .map(|&i| &self.records[i])
    }

    /// One-based range of rows on the current page, for the footer.
    pub fn page_range(&self) -> Option<(usize, usize)> {
        if self.records.is_empty() {
            return None;
        }
        let first = self.page * self.page_size;
        let last = (first + self.page_size).min(self.records.len());
        Some((first + 1, last))
    }
}
