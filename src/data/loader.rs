use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{COLUMN_NAMES, PenguinDataset, PenguinRecord};

/// The bundled Palmer penguins table, compiled into the binary.
const BUNDLED_CSV: &str = include_str!("../../assets/penguins.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the bundled penguins dataset.
pub fn load_penguins() -> Result<PenguinDataset> {
    let reader = csv::Reader::from_reader(BUNDLED_CSV.as_bytes());
    read_csv(reader).context("parsing bundled penguins dataset")
}

/// Load a penguins dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – one column per field, nullable measurements
/// * `.json`    – `[{ "species": "Adelie", "bill_length_mm": 39.1, ... }, ...]`
/// * `.csv`     – header row with the column names, `NA` or empty for missing
pub fn load_file(path: &Path) -> Result<PenguinDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Raw records shared by the CSV and JSON loaders
// ---------------------------------------------------------------------------

/// A cell as it comes out of the parser, before `NA` handling.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCell {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    species: String,
    island: String,
    bill_length_mm: Option<RawCell>,
    bill_depth_mm: Option<RawCell>,
    flipper_length_mm: Option<RawCell>,
    body_mass_g: Option<RawCell>,
    sex: Option<RawCell>,
    year: RawCell,
}

fn is_missing(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s.eq_ignore_ascii_case("na") || s.eq_ignore_ascii_case("nan")
}

fn measurement(cell: Option<RawCell>, column: &str) -> Result<Option<f64>> {
    match cell {
        None => Ok(None),
        Some(RawCell::Number(v)) if v.is_nan() => Ok(None),
        Some(RawCell::Number(v)) => Ok(Some(v)),
        Some(RawCell::Text(s)) if is_missing(&s) => Ok(None),
        Some(RawCell::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .with_context(|| format!("{column}: '{s}' is not a number")),
    }
}

impl TryFrom<RawRecord> for PenguinRecord {
    type Error = anyhow::Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let sex = match raw.sex {
            None => None,
            Some(RawCell::Text(s)) if is_missing(&s) => None,
            Some(RawCell::Text(s)) => Some(s.parse()?),
            Some(RawCell::Number(v)) => bail!("sex: expected a label, got {v}"),
        };
        let year = match measurement(Some(raw.year), "year")? {
            Some(v) if v.fract() == 0.0 => v as i64,
            Some(v) => bail!("year: {v} is not an integer"),
            None => bail!("year: missing value"),
        };

        Ok(PenguinRecord {
            species: raw.species.parse()?,
            island: raw.island.parse()?,
            bill_length_mm: measurement(raw.bill_length_mm, "bill_length_mm")?,
            bill_depth_mm: measurement(raw.bill_depth_mm, "bill_depth_mm")?,
            flipper_length_mm: measurement(raw.flipper_length_mm, "flipper_length_mm")?,
            body_mass_g: measurement(raw.body_mass_g, "body_mass_g")?,
            sex,
            year,
        })
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PenguinDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<PenguinDataset> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for column in COLUMN_NAMES {
        if !headers.iter().any(|h| h == column) {
            bail!("CSV missing '{column}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record =
            PenguinRecord::try_from(raw).with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    Ok(PenguinDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
///     "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
///     "sex": "male", "year": 2007 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<PenguinDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<PenguinDataset> {
    let rows: Vec<serde_json::Value> =
        serde_json::from_str(text).context("Expected top-level JSON array")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let raw: RawRecord = serde_json::from_value(row)
                .with_context(|| format!("Row {i} is not a penguin record"))?;
            PenguinRecord::try_from(raw).with_context(|| format!("Row {i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PenguinDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per dataset field.
///
/// Text columns may be Utf8 or LargeUtf8; measurement and year columns may
/// be any integer or float type. Nulls mark missing values.
/// Works with files written by both **Pandas** and **Polars**.
fn load_parquet(path: &Path) -> Result<PenguinDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        read_batch(&batch, &mut records)?;
    }

    Ok(PenguinDataset::from_records(records))
}

fn read_batch(batch: &RecordBatch, out: &mut Vec<PenguinRecord>) -> Result<()> {
    let species_col = column(batch, "species")?;
    let island_col = column(batch, "island")?;
    let bill_length_col = numeric_column(batch, "bill_length_mm")?;
    let bill_depth_col = numeric_column(batch, "bill_depth_mm")?;
    let flipper_length_col = numeric_column(batch, "flipper_length_mm")?;
    let body_mass_col = numeric_column(batch, "body_mass_g")?;
    let sex_col = column(batch, "sex")?;
    let year_col = numeric_column(batch, "year")?;

    for row in 0..batch.num_rows() {
        let text = |col: &Arc<dyn Array>, name: &str| {
            extract_string(col, row).with_context(|| format!("Row {row}: failed to read '{name}'"))
        };
        let number = |col: &ArrayRef| extract_f64(col, row);

        let species = text(species_col, "species")?
            .with_context(|| format!("Row {row}: species is null"))?
            .parse()?;
        let island = text(island_col, "island")?
            .with_context(|| format!("Row {row}: island is null"))?
            .parse()?;
        let sex = match text(sex_col, "sex")? {
            Some(s) if !is_missing(&s) => Some(s.parse()?),
            _ => None,
        };
        let year = match number(&year_col) {
            Some(v) if v.fract() == 0.0 => v as i64,
            Some(v) => bail!("Row {row}: year: {v} is not an integer"),
            None => bail!("Row {row}: year is null"),
        };

        out.push(PenguinRecord {
            species,
            island,
            bill_length_mm: number(&bill_length_col),
            bill_depth_mm: number(&bill_depth_col),
            flipper_length_mm: number(&flipper_length_col),
            body_mass_g: number(&body_mass_col),
            sex,
            year,
        });
    }
    Ok(())
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
    Ok(batch.column(idx))
}

/// A numeric column of any integer or float type, cast to Float64.
fn numeric_column(batch: &RecordBatch, name: &str) -> Result<ArrayRef> {
    let col = column(batch, name)?;
    if !col.data_type().is_numeric() {
        bail!(
            "Parquet column '{name}': expected a numeric column, got {:?}",
            col.data_type()
        );
    }
    cast(col, &DataType::Float64).with_context(|| format!("casting '{name}' to Float64"))
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row),
        other => bail!("Expected a string column, got {other:?}"),
    };
    Ok(Some(value.to_string()))
}

/// Reads a column already cast by [`numeric_column`].
fn extract_f64(col: &ArrayRef, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = col.as_primitive::<Float64Type>().value(row);
    (!value.is_nan()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Island, Sex, Species};
    use std::io::Write;

    use arrow::array::{Float32Array, Float64Array, Int8Array, Int64Array, StringArray, UInt16Array};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn write_parquet(batch: &RecordBatch) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
        file
    }

    /// One Gentoo row with the given measurement and year columns.
    fn parquet_row(numbers: [(&str, ArrayRef); 5]) -> RecordBatch {
        let mut fields = vec![
            Field::new("species", DataType::Utf8, false),
            Field::new("island", DataType::Utf8, false),
            Field::new("sex", DataType::Utf8, true),
        ];
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["Gentoo"])),
            Arc::new(StringArray::from(vec!["Biscoe"])),
            Arc::new(StringArray::from(vec![Some("male")])),
        ];
        for (name, array) in numbers {
            fields.push(Field::new(name, array.data_type().clone(), true));
            columns.push(array);
        }
        RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).unwrap()
    }

    #[test]
    fn bundled_dataset_has_expected_shape() {
        let ds = load_penguins().unwrap();
        assert_eq!(ds.len(), 344);
        assert_eq!(
            ds.species_counts(),
            [(Species::Adelie, 152), (Species::Gentoo, 124), (Species::Chinstrap, 68)]
        );
        let first = &ds.records[0];
        assert_eq!(first.species, Species::Adelie);
        assert_eq!(first.island, Island::Torgersen);
        assert_eq!(first.bill_length_mm, Some(39.1));
        assert_eq!(first.sex, Some(Sex::Male));
        assert_eq!(first.year, 2007);
        // Fourth row is entirely missing.
        assert_eq!(ds.records[3].bill_length_mm, None);
        assert_eq!(ds.records[3].sex, None);
    }

    #[test]
    fn csv_treats_na_and_empty_as_missing() {
        let file = write_temp(
            ".csv",
            "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n\
             Gentoo,Biscoe,46.1,13.2,211,4500,female,2007\n\
             Chinstrap,Dream,NA,,195,NA,NA,2009\n",
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].flipper_length_mm, Some(211.0));
        let second = &ds.records[1];
        assert_eq!(second.species, Species::Chinstrap);
        assert_eq!(second.bill_length_mm, None);
        assert_eq!(second.bill_depth_mm, None);
        assert_eq!(second.flipper_length_mm, Some(195.0));
        assert_eq!(second.sex, None);
        assert_eq!(second.year, 2009);
    }

    #[test]
    fn csv_missing_column_is_an_error() {
        let file = write_temp(".csv", "species,island,year\nAdelie,Dream,2007\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("bill_length_mm"));
    }

    #[test]
    fn csv_unknown_species_reports_row() {
        let file = write_temp(
            ".csv",
            "species,island,bill_length_mm,bill_depth_mm,flipper_length_mm,body_mass_g,sex,year\n\
             Emperor,Dream,1,1,1,1,male,2007\n",
        );
        let err = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(err.contains("CSV row 0"), "{err}");
        assert!(err.contains("Emperor"), "{err}");
    }

    #[test]
    fn json_records_with_nulls() {
        let ds = parse_json(
            r#"[
                {"species": "Adelie", "island": "Torgersen", "bill_length_mm": 39.1,
                 "bill_depth_mm": 18.7, "flipper_length_mm": 181, "body_mass_g": 3750,
                 "sex": "male", "year": 2007},
                {"species": "Gentoo", "island": "Biscoe", "bill_length_mm": null,
                 "bill_depth_mm": null, "flipper_length_mm": null, "body_mass_g": null,
                 "sex": null, "year": 2009}
            ]"#,
        )
        .unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].body_mass_g, Some(3750.0));
        assert_eq!(ds.records[1].species, Species::Gentoo);
        assert_eq!(ds.records[1].body_mass_g, None);
    }

    #[test]
    fn json_must_be_an_array() {
        assert!(parse_json(r#"{"species": "Adelie"}"#).is_err());
    }

    #[test]
    fn unsupported_extension() {
        let err = load_file(Path::new("penguins.xlsx")).unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .xlsx");
    }

    #[test]
    fn parquet_with_nullable_columns() {
        let schema = Arc::new(Schema::new(vec![
            Field::new("species", DataType::Utf8, false),
            Field::new("island", DataType::Utf8, false),
            Field::new("bill_length_mm", DataType::Float64, true),
            Field::new("bill_depth_mm", DataType::Float64, true),
            Field::new("flipper_length_mm", DataType::Int64, true),
            Field::new("body_mass_g", DataType::Int64, true),
            Field::new("sex", DataType::Utf8, true),
            Field::new("year", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec!["Adelie", "Chinstrap"])),
                Arc::new(StringArray::from(vec!["Dream", "Dream"])),
                Arc::new(Float64Array::from(vec![Some(37.0), None])),
                Arc::new(Float64Array::from(vec![Some(18.5), None])),
                Arc::new(Int64Array::from(vec![Some(190), None])),
                Arc::new(Int64Array::from(vec![Some(3400), None])),
                Arc::new(StringArray::from(vec![Some("female"), None])),
                Arc::new(Int64Array::from(vec![2008, 2009])),
            ],
        )
        .unwrap();

        let file = write_parquet(&batch);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].flipper_length_mm, Some(190.0));
        assert_eq!(ds.records[0].sex, Some(Sex::Female));
        assert_eq!(ds.records[1].species, Species::Chinstrap);
        assert_eq!(ds.records[1].bill_length_mm, None);
        assert_eq!(ds.records[1].sex, None);
        assert_eq!(ds.records[1].year, 2009);
    }

    #[test]
    fn parquet_accepts_small_and_unsigned_integers() {
        let batch = parquet_row([
            ("bill_length_mm", Arc::new(Float32Array::from(vec![Some(49.5)]))),
            ("bill_depth_mm", Arc::new(Float64Array::from(vec![None::<f64>]))),
            ("flipper_length_mm", Arc::new(Int8Array::from(vec![Some(120)]))),
            ("body_mass_g", Arc::new(UInt16Array::from(vec![Some(5800)]))),
            ("year", Arc::new(UInt16Array::from(vec![Some(2008)]))),
        ]);
        let file = write_parquet(&batch);

        let ds = load_file(file.path()).unwrap();
        let record = &ds.records[0];
        assert_eq!(record.species, Species::Gentoo);
        assert_eq!(record.bill_length_mm, Some(49.5));
        assert_eq!(record.bill_depth_mm, None);
        assert_eq!(record.flipper_length_mm, Some(120.0));
        assert_eq!(record.body_mass_g, Some(5800.0));
        assert_eq!(record.year, 2008);
    }

    #[test]
    fn parquet_rejects_fractional_year() {
        let batch = parquet_row([
            ("bill_length_mm", Arc::new(Float64Array::from(vec![Some(46.1)]))),
            ("bill_depth_mm", Arc::new(Float64Array::from(vec![Some(13.2)]))),
            ("flipper_length_mm", Arc::new(Int64Array::from(vec![Some(211)]))),
            ("body_mass_g", Arc::new(Int64Array::from(vec![Some(4500)]))),
            ("year", Arc::new(Float64Array::from(vec![Some(2008.7)]))),
        ]);
        let file = write_parquet(&batch);

        let err = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(err.contains("year: 2008.7 is not an integer"), "{err}");
    }

    #[test]
    fn parquet_rejects_text_measurements() {
        let batch = parquet_row([
            ("bill_length_mm", Arc::new(StringArray::from(vec![Some("long")]))),
            ("bill_depth_mm", Arc::new(Float64Array::from(vec![Some(13.2)]))),
            ("flipper_length_mm", Arc::new(Int64Array::from(vec![Some(211)]))),
            ("body_mass_g", Arc::new(Int64Array::from(vec![Some(4500)]))),
            ("year", Arc::new(Int64Array::from(vec![Some(2007)]))),
        ]);
        let file = write_parquet(&batch);

        let err = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(err.contains("'bill_length_mm': expected a numeric column"), "{err}");
    }
}
