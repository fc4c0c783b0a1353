use crate::data::model::{Attribute, PenguinDataset, Species};

/// Fixed axes of the species scatterplot.
pub const X_ATTRIBUTE: Attribute = Attribute::BodyMass;
pub const Y_ATTRIBUTE: Attribute = Attribute::BillDepth;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub species: Species,
    pub points: Vec<[f64; 2]>,
}

/// Body mass against bill depth, one series per species.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScatterData {
    pub series: Vec<ScatterSeries>,
}

impl ScatterData {
    /// Rows missing either coordinate are skipped.
    pub fn build(view: &PenguinDataset) -> Self {
        let mut series: Vec<ScatterSeries> = Vec::new();
        for record in &view.records {
            let (Some(x), Some(y)) = (X_ATTRIBUTE.value_of(record), Y_ATTRIBUTE.value_of(record))
            else {
                continue;
            };
            match series.iter_mut().find(|s| s.species == record.species) {
                Some(s) => s.points.push([x, y]),
                None => series.push(ScatterSeries {
                    species: record.species,
                    points: vec![[x, y]],
                }),
            }
        }
        ScatterData { series }
    }

    pub fn x_label(&self) -> &'static str {
        X_ATTRIBUTE.label()
    }

    pub fn y_label(&self) -> &'static str {
        Y_ATTRIBUTE.label()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}
