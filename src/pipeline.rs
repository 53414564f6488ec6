use crate::prelude::*;
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Outcome of one chromosome's conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub chromosome: u8,
    pub markers: usize,
    pub individuals: usize,
    pub biallelic: usize,
    pub monomorphic: usize,
    pub missing: usize,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct ChromosomeReport {
    pub chromosome: u8,
    pub result: Result<ConversionSummary>,
}

impl ChromosomeReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Encodes every marker of a panel and reshapes the bits into pairs.
///
/// Returns the matrix together with per-class marker counts
/// (biallelic, monomorphic, missing).
pub fn encode_panel(panel: &Panel) -> Result<(EncodedMatrix, [usize; 3])> {
    let mut counts = [0; 3];
    let rows = panel
        .marker_rows()
        .map(|row| {
            let (alleles, encoded) = classify_and_encode(&row)?;
            match alleles {
                Alleles::Biallelic { .. } => counts[0] += 1,
                Alleles::Monomorphic { .. } => counts[1] += 1,
                Alleles::Missing => counts[2] += 1,
            }
            Ok(encoded)
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((EncodedMatrix::from_rows(&rows)?, counts))
}

/// Loads, encodes and writes one chromosome.
pub fn convert_chromosome(layout: &PanelLayout, chromosome: u8) -> Result<ConversionSummary> {
    let panel = PanelReaderBuilder::new().from_path(&layout.input_path(chromosome), chromosome)?;
    let (matrix, [biallelic, monomorphic, missing]) = encode_panel(&panel)?;
    let output = layout.encoded_path(chromosome);
    write_matrix_file(&output, &matrix)?;

    tracing::info!(
        chromosome,
        markers = matrix.n_markers(),
        individuals = matrix.n_individuals(),
        monomorphic,
        missing,
        output = %output.display(),
        "encoded chromosome"
    );
    Ok(ConversionSummary {
        chromosome,
        markers: matrix.n_markers(),
        individuals: matrix.n_individuals(),
        biallelic,
        monomorphic,
        missing,
        output,
    })
}

/// Converts every configured chromosome as an independent task.
///
/// Reports come back in chromosome order. A failing chromosome does not
/// stop or affect the others.
pub fn convert_population(config: &ConversionConfig) -> Result<Vec<ChromosomeReport>> {
    let reports = run_per_chromosome(config, convert_chromosome)?
        .into_iter()
        .map(|(chromosome, result)| {
            if let Err(e) = &result {
                tracing::warn!(chromosome, error = %e, "chromosome conversion failed");
            }
            ChromosomeReport { chromosome, result }
        })
        .collect();
    Ok(reports)
}

/// Writes the PLINK `.map` file of one chromosome.
pub fn write_chromosome_map(layout: &PanelLayout, chromosome: u8) -> Result<PathBuf> {
    let panel = PanelReaderBuilder::new().from_path(&layout.input_path(chromosome), chromosome)?;
    let output = layout.map_path(chromosome);
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_marker_map(BufWriter::new(File::create(&output)?), chromosome, panel.markers())?;
    tracing::info!(chromosome, markers = panel.n_markers(), output = %output.display(), "wrote marker map");
    Ok(output)
}

pub fn write_population_maps(config: &ConversionConfig) -> Result<Vec<(u8, Result<PathBuf>)>> {
    run_per_chromosome(config, write_chromosome_map)
}

fn run_per_chromosome<T, F>(config: &ConversionConfig, task: F) -> Result<Vec<(u8, Result<T>)>>
where
    T: Send,
    F: Fn(&PanelLayout, u8) -> Result<T> + Sync,
{
    let layout = &config.layout;
    let run = || {
        config
            .chromosomes
            .iter()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|chromosome| (chromosome, task(layout, chromosome)))
            .collect::<Vec<_>>()
    };
    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            Ok(pool.install(run))
        }
        None => Ok(run()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::io::Cursor;
    use std::result::Result;

    fn panel(table: &str) -> Result<Panel, Box<dyn StdError>> {
        Ok(PanelReaderBuilder::new().from_reader(Box::new(Cursor::new(table.to_string())))?)
    }

    #[test]
    fn test_encode_panel_counts_marker_classes() -> Result<(), Box<dyn StdError>> {
        let panel = panel(
            "rsID pos A_A A_B B_A B_B\n\
             rs1 10 A A A G\n\
             rs2 20 - - - -\n\
             rs3 30 T T - T\n",
        )?;
        let (matrix, counts) = encode_panel(&panel)?;
        assert_eq!(counts, [1, 1, 1]);
        assert_eq!(matrix.n_markers(), 3);
        assert_eq!(matrix.n_individuals(), 2);
        assert_eq!(matrix.get(0, 1), Some(Pair(1, 0)));
        assert_eq!(matrix.get(1, 0), Some(Pair(0, 0)));
        assert_eq!(matrix.get(2, 1), Some(Pair(0, 1)));
        Ok(())
    }

    #[test]
    fn test_encode_panel_stops_at_first_bad_marker() -> Result<(), Box<dyn StdError>> {
        let panel = panel("id pos h1 h2 h3 h4\nrs1 1 A A A G\nrs2 2 A C G G\n")?;
        assert!(matches!(
            encode_panel(&panel),
            Err(Error::UnsupportedVariant { marker: 1, .. })
        ));
        Ok(())
    }
}
