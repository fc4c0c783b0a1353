use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use crate::data::loader;
use crate::data::model::PenguinDataset;
use crate::render::table::DEFAULT_PAGE_SIZE;

/// Command line options. Logging is configured separately through `RUST_LOG`.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Dataset to show instead of the bundled penguins table (.csv, .json or .parquet)
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Rows per page in the data table
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = parse_page_size)]
    pub page_size: usize,
}

fn parse_page_size(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("page size must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

impl Config {
    /// Load the dataset this configuration points at, once, for the whole
    /// process.
    pub fn load_dataset(&self) -> Result<Arc<PenguinDataset>> {
        let dataset = match &self.data {
            Some(path) => loader::load_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => loader::load_penguins()?,
        };
        log::info!(
            "Loaded {} penguins from {}",
            dataset.len(),
            self.data
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "the bundled dataset".to_string())
        );
        Ok(Arc::new(dataset))
    }
}
