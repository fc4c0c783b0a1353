use crate::data::model::{NUMERIC_COLUMNS, PenguinDataset};

/// Row labels of a describe() summary, in display order.
pub const STATISTICS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

// ---------------------------------------------------------------------------
// Per-column statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Summarise the finite values; NaN fills every statistic that needs
    /// more values than are available.
    pub fn compute(values: impl IntoIterator<Item = f64>) -> Self {
        let mut vals: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        vals.sort_by(f64::total_cmp);

        let count = vals.len();
        if count == 0 {
            return ColumnSummary {
                count,
                mean: f64::NAN,
                std: f64::NAN,
                min: f64::NAN,
                q1: f64::NAN,
                median: f64::NAN,
                q3: f64::NAN,
                max: f64::NAN,
            };
        }

        let mean = vals.iter().sum::<f64>() / count as f64;
        let std = if count > 1 {
            let ss: f64 = vals.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        ColumnSummary {
            count,
            mean,
            std,
            min: vals[0],
            q1: quantile(&vals, 0.25),
            median: quantile(&vals, 0.5),
            q3: quantile(&vals, 0.75),
            max: vals[count - 1],
        }
    }

    /// Values in [`STATISTICS`] order.
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q1,
            self.median,
            self.q3,
            self.max,
        ]
    }
}

/// Linear interpolation between the closest ranks of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// SummaryTable – describe() with the index as a regular column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub statistic: &'static str,
    pub values: Vec<f64>,
}

/// Descriptive statistics of every numeric column. The first column,
/// `index`, holds the statistic name of each row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    pub columns: Vec<String>,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn describe(dataset: &PenguinDataset) -> Self {
        let summaries: Vec<ColumnSummary> = NUMERIC_COLUMNS
            .iter()
            .map(|col| ColumnSummary::compute(dataset.records.iter().filter_map(|r| r.numeric(col))))
            .collect();

        let columns = std::iter::once("index".to_string())
            .chain(NUMERIC_COLUMNS.iter().map(|c| c.to_string()))
            .collect();
        let rows = STATISTICS
            .into_iter()
            .enumerate()
            .map(|(i, statistic)| SummaryRow {
                statistic,
                values: summaries.iter().map(|s| s.values()[i]).collect(),
            })
            .collect();

        SummaryTable { columns, rows }
    }

    /// Text of one cell, `column` counting the `index` column as 0.
    pub fn cell_text(&self, row: usize, column: usize) -> String {
        let Some(summary_row) = self.rows.get(row) else {
            return String::new();
        };
        match column {
            0 => summary_row.statistic.to_string(),
            c => summary_row
                .values
                .get(c - 1)
                .map(|v| format_stat(*v))
                .unwrap_or_default(),
        }
    }
}

/// Six decimals, the way pandas prints a describe() frame.
pub fn format_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.6}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::tests::small_dataset;
    use crate::data::loader::load_penguins;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn matches_pandas_describe() {
        // pd.Series([1, 2, 3, 4, 10]).describe()
        let s = ColumnSummary::compute([4.0, 1.0, 10.0, 3.0, 2.0]);
        assert_eq!(s.count, 5);
        assert!(approx(s.mean, 4.0));
        assert!(approx(s.std, 3.5355339059327378));
        assert_eq!((s.min, s.q1, s.median, s.q3, s.max), (1.0, 2.0, 3.0, 4.0, 10.0));

        // Interpolated quartiles: pd.Series([1, 2, 3, 4]).describe()
        let s = ColumnSummary::compute([1.0, 2.0, 3.0, 4.0]);
        assert!(approx(s.q1, 1.75));
        assert!(approx(s.median, 2.5));
        assert!(approx(s.q3, 3.25));
    }

    #[test]
    fn missing_and_degenerate_columns() {
        let s = ColumnSummary::compute([f64::NAN, 7.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 7.0);
        assert!(s.std.is_nan());

        let s = ColumnSummary::compute(std::iter::empty());
        assert_eq!(s.count, 0);
        assert!(s.values()[1..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn table_has_index_column_and_one_row_per_statistic() {
        let table = SummaryTable::describe(&small_dataset());
        assert_eq!(
            table.columns,
            vec![
                "index",
                "bill_length_mm",
                "bill_depth_mm",
                "flipper_length_mm",
                "body_mass_g",
                "year"
            ]
        );
        let labels: Vec<_> = table.rows.iter().map(|r| r.statistic).collect();
        assert_eq!(labels, STATISTICS);
        assert_eq!(table.cell_text(0, 0), "count");
        assert_eq!(table.cell_text(0, 1), "5.000000");
        // mean bill_length_mm of 1..=5
        assert_eq!(table.cell_text(1, 1), "3.000000");
        // year is constant, so its std is zero
        assert_eq!(table.cell_text(2, 5), "0.000000");
        assert_eq!(table.cell_text(99, 0), "");
    }

    #[test]
    fn bundled_dataset_describe() {
        let table = SummaryTable::describe(&load_penguins().unwrap());
        let column = |c: usize| -> Vec<String> {
            (0..STATISTICS.len()).map(|r| table.cell_text(r, c)).collect()
        };
        assert_eq!(
            column(1),
            [
                "342.000000", "43.921930", "5.459584", "32.100000", "39.225000", "44.450000",
                "48.500000", "59.600000"
            ]
        );
        assert_eq!(
            column(4),
            [
                "342.000000", "4201.754386", "801.954536", "2700.000000", "3550.000000",
                "4050.000000", "4750.000000", "6300.000000"
            ]
        );
        assert_eq!(table.cell_text(0, 5), "344.000000");
        assert_eq!(table.cell_text(1, 5), "2008.029070");
    }

    #[test]
    fn format_stat_prints_nan() {
        assert_eq!(format_stat(f64::NAN), "NaN");
        assert_eq!(format_stat(0.5), "0.500000");
    }
}
