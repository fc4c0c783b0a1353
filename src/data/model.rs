use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// A categorical cell that did not match any known label.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {column} value '{value}'")]
pub struct ParseValueError {
    pub column: &'static str,
    pub value: String,
}

/// The three penguin species of the dataset.
///
/// The derived `Ord` follows declaration order, which is also the order the
/// species appear in the sidebar and in chart legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Species {
    Adelie,
    Gentoo,
    Chinstrap,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Adelie, Species::Gentoo, Species::Chinstrap];

    pub fn as_str(self) -> &'static str {
        match self {
            Species::Adelie => "Adelie",
            Species::Gentoo => "Gentoo",
            Species::Chinstrap => "Chinstrap",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|sp| sp.as_str() == s.trim())
            .ok_or_else(|| ParseValueError {
                column: "species",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Island {
    Biscoe,
    Dream,
    Torgersen,
}

impl Island {
    pub const ALL: [Island; 3] = [Island::Biscoe, Island::Dream, Island::Torgersen];

    pub fn as_str(self) -> &'static str {
        match self {
            Island::Biscoe => "Biscoe",
            Island::Dream => "Dream",
            Island::Torgersen => "Torgersen",
        }
    }
}

impl fmt::Display for Island {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Island {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Island::ALL
            .into_iter()
            .find(|island| island.as_str() == s.trim())
            .ok_or_else(|| ParseValueError {
                column: "island",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sex {
    Female,
    Male,
}

impl Sex {
    pub fn as_str(self) -> &'static str {
        match self {
            Sex::Female => "female",
            Sex::Male => "male",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Sex::Female),
            "male" => Ok(Sex::Male),
            _ => Err(ParseValueError {
                column: "sex",
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute – the numeric measurement columns
// ---------------------------------------------------------------------------

/// One of the four numeric measurement columns a histogram can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Attribute {
    #[default]
    BillLength,
    BillDepth,
    FlipperLength,
    BodyMass,
}

impl Attribute {
    pub const ALL: [Attribute; 4] = [
        Attribute::BillLength,
        Attribute::BillDepth,
        Attribute::FlipperLength,
        Attribute::BodyMass,
    ];

    /// Column name as it appears in the dataset.
    pub fn column_name(self) -> &'static str {
        match self {
            Attribute::BillLength => "bill_length_mm",
            Attribute::BillDepth => "bill_depth_mm",
            Attribute::FlipperLength => "flipper_length_mm",
            Attribute::BodyMass => "body_mass_g",
        }
    }

    /// Human readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::BillLength => "Bill Length (mm)",
            Attribute::BillDepth => "Bill Depth (mm)",
            Attribute::FlipperLength => "Flipper Length (mm)",
            Attribute::BodyMass => "Body Mass (g)",
        }
    }

    pub fn value_of(self, record: &PenguinRecord) -> Option<f64> {
        match self {
            Attribute::BillLength => record.bill_length_mm,
            Attribute::BillDepth => record.bill_depth_mm,
            Attribute::FlipperLength => record.flipper_length_mm,
            Attribute::BodyMass => record.body_mass_g,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// PenguinRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single observation. Measurements are `None` where the source had `NA`.
#[derive(Debug, Clone, PartialEq)]
pub struct PenguinRecord {
    pub species: Species,
    pub island: Island,
    pub bill_length_mm: Option<f64>,
    pub bill_depth_mm: Option<f64>,
    pub flipper_length_mm: Option<f64>,
    pub body_mass_g: Option<f64>,
    pub sex: Option<Sex>,
    pub year: i64,
}

/// Column order of the dataset.
pub const COLUMN_NAMES: [&str; 8] = [
    "species",
    "island",
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "sex",
    "year",
];

/// Columns with a numeric dtype, i.e. the ones a describe() summary covers.
pub const NUMERIC_COLUMNS: [&str; 5] = [
    "bill_length_mm",
    "bill_depth_mm",
    "flipper_length_mm",
    "body_mass_g",
    "year",
];

impl PenguinRecord {
    /// Numeric value of a column from [`NUMERIC_COLUMNS`].
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            "bill_length_mm" => self.bill_length_mm,
            "bill_depth_mm" => self.bill_depth_mm,
            "flipper_length_mm" => self.flipper_length_mm,
            "body_mass_g" => self.body_mass_g,
            "year" => Some(self.year as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// PenguinDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// An ordered, immutable table of penguin observations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PenguinDataset {
    pub records: Vec<PenguinRecord>,
}

impl PenguinDataset {
    pub fn from_records(records: Vec<PenguinRecord>) -> Self {
        PenguinDataset { records }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row count per species, in [`Species::ALL`] order.
    pub fn species_counts(&self) -> [(Species, usize); 3] {
        Species::ALL.map(|sp| {
            let n = self.records.iter().filter(|r| r.species == sp).count();
            (sp, n)
        })
    }
}
