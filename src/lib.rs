#![crate_name = "hapmap_encode"]
//! Encodes phased HapMap3 haplotype panels into the 0/1 genotype matrices
//! read by GWAsimulator.
//!
//! Each chromosome is converted independently: its panel is loaded, every
//! marker's calls are classified into major/minor alleles and encoded as
//! bits, and the bits are grouped into one pair per individual.

pub mod prelude;

pub mod cli;
pub mod config;
pub mod error;
pub mod genetics;
pub mod matrix;
pub mod panel;
pub mod pipeline;
pub mod writer;

pub use config::{Chromosomes, ConversionConfig, PanelLayout};
pub use error::{Error, Result};
pub use pipeline::{convert_chromosome, convert_population, ChromosomeReport, ConversionSummary};
