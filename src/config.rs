use crate::prelude::*;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Chromosome 23 is X.
pub const N_CHROMOSOMES: u8 = 23;

/// An inclusive selection of chromosome numbers within `1..=23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosomes(RangeInclusive<u8>);

impl Chromosomes {
    pub fn new(first: u8, last: u8) -> Result<Self> {
        if first == 0 || last > N_CHROMOSOMES || first > last {
            return Err(Error::InvalidChromosomeRange(format!("{}-{}", first, last)));
        }
        Ok(Self(first..=last))
    }

    pub fn iter(&self) -> RangeInclusive<u8> {
        self.0.clone()
    }
}

impl Default for Chromosomes {
    fn default() -> Self {
        Self(1..=N_CHROMOSOMES)
    }
}

impl FromStr for Chromosomes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidChromosomeRange(s.to_string());
        let parse = |x: &str| x.trim().parse::<u8>().map_err(|_| invalid());
        match s.split_once('-') {
            Some((first, last)) => Self::new(parse(first)?, parse(last)?).map_err(|_| invalid()),
            None => {
                let n = parse(s)?;
                Self::new(n, n).map_err(|_| invalid())
            }
        }
    }
}

/// File naming of the HapMap3 inputs and the encoded outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLayout {
    pub population: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl PanelLayout {
    /// `<input>/<pop>/hapmap3_r2_b36_fwd.consensus.qc.poly.chr<N>_<pop>.phased`
    pub fn input_path(&self, chromosome: u8) -> PathBuf {
        self.input_dir.join(&self.population).join(format!(
            "hapmap3_r2_b36_fwd.consensus.qc.poly.chr{}_{}.phased",
            chromosome, self.population
        ))
    }

    pub fn encoded_dir(&self) -> PathBuf {
        self.output_dir.join(format!("{}_encoded", self.population))
    }

    /// `<output>/<pop>_encoded/chr<N>_<pop>.phased`
    pub fn encoded_path(&self, chromosome: u8) -> PathBuf {
        self.encoded_dir()
            .join(format!("chr{}_{}.phased", chromosome, self.population))
    }

    /// `<output>/chr<N>_<pop>.map`
    pub fn map_path(&self, chromosome: u8) -> PathBuf {
        self.output_dir
            .join(format!("chr{}_{}.map", chromosome, self.population))
    }
}

#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub layout: PanelLayout,
    pub chromosomes: Chromosomes,
    /// Worker threads; `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl ConversionConfig {
    pub fn builder(population: &str) -> ConversionConfigBuilder {
        ConversionConfigBuilder::new(population)
    }
}

pub struct ConversionConfigBuilder {
    population: String,
    input_dir: PathBuf,
    output_dir: PathBuf,
    chromosomes: Chromosomes,
    threads: Option<usize>,
}

impl ConversionConfigBuilder {
    pub fn new(population: &str) -> Self {
        Self {
            population: population.to_owned(),
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            chromosomes: Chromosomes::default(),
            threads: None,
        }
    }

    pub fn input_dir(&mut self, input_dir: &Path) -> &mut Self {
        self.input_dir = input_dir.to_path_buf();
        self
    }

    pub fn output_dir(&mut self, output_dir: &Path) -> &mut Self {
        self.output_dir = output_dir.to_path_buf();
        self
    }

    pub fn chromosomes(&mut self, chromosomes: Chromosomes) -> &mut Self {
        self.chromosomes = chromosomes;
        self
    }

    pub fn threads(&mut self, threads: Option<usize>) -> &mut Self {
        self.threads = threads.filter(|&n| n > 0);
        self
    }

    pub fn build(&self) -> ConversionConfig {
        ConversionConfig {
            layout: PanelLayout {
                population: self.population.clone(),
                input_dir: self.input_dir.clone(),
                output_dir: self.output_dir.clone(),
            },
            chromosomes: self.chromosomes.clone(),
            threads: self.threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::result::Result;

    #[test]
    fn test_default_selection_covers_x() {
        let all: Vec<u8> = Chromosomes::default().iter().collect();
        assert_eq!(all.len(), 23);
        assert_eq!(all.last(), Some(&23));
    }

    #[test]
    fn test_parse_single_and_range() -> Result<(), Box<dyn StdError>> {
        assert_eq!("7".parse::<Chromosomes>()?.iter().collect::<Vec<_>>(), vec![7]);
        assert_eq!("21-23".parse::<Chromosomes>()?.iter().collect::<Vec<_>>(), vec![21, 22, 23]);
        Ok(())
    }

    #[test]
    fn test_parse_rejects_out_of_bounds() {
        for bad in &["0", "24", "5-2", "x", "1-", ""] {
            assert!(
                matches!(bad.parse::<Chromosomes>(), Err(Error::InvalidChromosomeRange(ref s)) if s == bad),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_layout_paths() {
        let config = ConversionConfig::builder("ceu")
            .input_dir(Path::new("data"))
            .output_dir(Path::new("out"))
            .build();
        let layout = &config.layout;
        assert_eq!(
            layout.input_path(3),
            Path::new("data/ceu/hapmap3_r2_b36_fwd.consensus.qc.poly.chr3_ceu.phased")
        );
        assert_eq!(layout.encoded_path(23), Path::new("out/ceu_encoded/chr23_ceu.phased"));
        assert_eq!(layout.map_path(1), Path::new("out/chr1_ceu.map"));
    }

    #[test]
    fn test_zero_threads_means_default_pool() {
        let config = ConversionConfig::builder("yri").threads(Some(0)).build();
        assert_eq!(config.threads, None);
    }
}
