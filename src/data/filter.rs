use std::collections::BTreeSet;

use super::model::{PenguinDataset, Species};

// ---------------------------------------------------------------------------
// Species filter: the derived view of the dataset
// ---------------------------------------------------------------------------

/// Set of species whose rows are shown. An empty set shows nothing.
pub type SpeciesFilter = BTreeSet<Species>;

/// Return indices of records whose species is in `selected`, in dataset order.
pub fn filtered_indices(dataset: &PenguinDataset, selected: &SpeciesFilter) -> Vec<usize> {
    if selected.is_empty() {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| selected.contains(&record.species))
        .map(|(i, _)| i)
        .collect()
}

/// Materialise the rows passing the species filter as a new table.
///
/// The result always has the dataset's schema; an empty selection yields an
/// empty table rather than an error.
pub fn derive_view(dataset: &PenguinDataset, selected: &SpeciesFilter) -> PenguinDataset {
    let records = filtered_indices(dataset, selected)
        .into_iter()
        .map(|i| dataset.records[i].clone())
        .collect();
    PenguinDataset::from_records(records)
}
