use crate::data::model::{Attribute, PenguinDataset, Species};
use crate::reactive::input::BinCount;

// ---------------------------------------------------------------------------
// Histogram view model
// ---------------------------------------------------------------------------

/// Half-open interval `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Per-bin counts for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesCounts {
    pub species: Species,
    pub counts: Vec<u64>,
}

/// A histogram of one attribute, stacked by species.
///
/// All species share the same bin edges so their bars stack.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistogramData {
    pub attribute: Attribute,
    pub bins: Vec<HistogramBin>,
    /// One entry per species present, in order of first appearance.
    pub series: Vec<SpeciesCounts>,
}

impl HistogramData {
    pub fn build(view: &PenguinDataset, attribute: Attribute, bin_count: BinCount) -> Self {
        let values: Vec<(Species, f64)> = view
            .records
            .iter()
            .filter_map(|r| attribute.value_of(r).map(|v| (r.species, v)))
            .filter(|(_, v)| v.is_finite())
            .collect();

        let bins = bin_edges(values.iter().map(|(_, v)| *v), bin_count.get() as usize);
        let mut series: Vec<SpeciesCounts> = Vec::new();
        for &(species, value) in &values {
            let idx = bin_index(&bins, value);
            let entry = match series.iter().position(|s| s.species == species) {
                Some(pos) => &mut series[pos],
                None => {
                    series.push(SpeciesCounts {
                        species,
                        counts: vec![0; bins.len()],
                    });
                    let last = series.len() - 1;
                    &mut series[last]
                }
            };
            entry.counts[idx] += 1;
        }

        HistogramData {
            attribute,
            bins,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Equal-width bins spanning the values. Identical values get a single bin
/// of width 1 centred on them; no values gives no bins.
fn bin_edges(values: impl Iterator<Item = f64>, n_bins: usize) -> Vec<HistogramBin> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max || n_bins == 0 {
        return Vec::new();
    }
    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: max + 0.5,
        }];
    }
    let width = (max - min) / n_bins as f64;
    (0..n_bins)
        .map(|i| HistogramBin {
            start: min + i as f64 * width,
            end: if i + 1 == n_bins {
                max
            } else {
                min + (i + 1) as f64 * width
            },
        })
        .collect()
}

fn bin_index(bins: &[HistogramBin], value: f64) -> usize {
    let Some(first) = bins.first() else {
        return 0;
    };
    let width = first.width();
    let idx = ((value - first.start) / width) as usize;
    idx.min(bins.len() - 1)
}
