use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Chromosomes, ConversionConfig};
use crate::pipeline::{
    convert_population, write_population_maps, ChromosomeReport, ConversionSummary,
};
use crate::writer::write_id_remap_file;

#[derive(Debug, Parser)]
#[command(author, version, about = "Encode phased HapMap3 panels for GWAsimulator", long_about = None)]
struct Cli {
    /// Logging verbosity (e.g. error, warn, info, debug)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Encode each chromosome's phased panel into a 0/1 pair matrix
    Encode {
        #[command(flatten)]
        panels: PanelArgs,

        /// Worker threads (defaults to one per core)
        #[arg(long)]
        threads: Option<usize>,

        /// Keep the outputs of successful chromosomes and exit cleanly when
        /// some chromosomes fail
        #[arg(long)]
        keep_going: bool,
    },
    /// Write a PLINK .map file per chromosome
    Map {
        #[command(flatten)]
        panels: PanelArgs,
    },
    /// Write the PLINK --update-ids table for a simulated sample
    UpdateIds {
        /// Number of simulated samples
        #[arg(long)]
        samples: u32,

        #[arg(long, default_value = "ids.txt")]
        output: PathBuf,
    },
}

#[derive(Debug, clap::Args)]
struct PanelArgs {
    /// HapMap3 population name, e.g. ceu or yri
    #[arg(long)]
    population: String,

    /// Directory holding the `<population>/` panel directory
    #[arg(long, default_value = ".")]
    input_dir: PathBuf,

    /// Directory receiving the outputs
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Chromosome or inclusive range, e.g. 7 or 1-22 (23 is X)
    #[arg(long, default_value = "1-23")]
    chromosomes: Chromosomes,
}

impl PanelArgs {
    fn config(&self, threads: Option<usize>) -> ConversionConfig {
        ConversionConfig::builder(&self.population)
            .input_dir(&self.input_dir)
            .output_dir(&self.output_dir)
            .chromosomes(self.chromosomes.clone())
            .threads(threads)
            .build()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Encode {
            panels,
            threads,
            keep_going,
        } => {
            let reports = convert_population(&panels.config(threads))?;
            print_summary(&reports);
            let failed = reports.iter().filter(|r| !r.is_ok()).count();
            if failed > 0 && !keep_going {
                anyhow::bail!("{} of {} chromosomes failed", failed, reports.len());
            }
        }
        Command::Map { panels } => {
            let mut failed = 0;
            for (chromosome, result) in write_population_maps(&panels.config(None))? {
                if let Err(e) = result {
                    tracing::error!(chromosome, error = %e, "failed to write marker map");
                    failed += 1;
                }
            }
            if failed > 0 {
                anyhow::bail!("{} marker maps could not be written", failed);
            }
        }
        Command::UpdateIds { samples, output } => {
            write_id_remap_file(&output, samples)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Wrote {} id remappings to {}.", samples, output.display());
        }
    }
    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level)
        .with_context(|| format!("invalid log level {:?}", level))?;
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

fn print_summary(reports: &[ChromosomeReport]) {
    for report in reports {
        match &report.result {
            Ok(summary) => println!("{}", summary_line(summary)),
            Err(e) => println!("chr{}: failed: {}", report.chromosome, e),
        }
    }
}

fn summary_line(summary: &ConversionSummary) -> String {
    format!(
        "chr{chromosome}: {markers} markers x {individuals} individuals ({biallelic} biallelic, {monomorphic} monomorphic, {missing} missing) -> {output}",
        chromosome = summary.chromosome,
        markers = summary.markers,
        individuals = summary.individuals,
        biallelic = summary.biallelic,
        monomorphic = summary.monomorphic,
        missing = summary.missing,
        output = summary.output.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unparsable_log_level_is_reported() {
        let err = init_logging("hapmap_encode=loud").unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn test_summary_line_reports_every_marker_class() {
        let summary = ConversionSummary {
            chromosome: 23,
            markers: 10,
            individuals: 4,
            biallelic: 7,
            monomorphic: 2,
            missing: 1,
            output: PathBuf::from("ceu_encoded/chr23_ceu.phased"),
        };
        assert_eq!(
            summary_line(&summary),
            "chr23: 10 markers x 4 individuals (7 biallelic, 2 monomorphic, 1 missing) -> ceu_encoded/chr23_ceu.phased"
        );
    }
}
