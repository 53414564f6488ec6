use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Calls that carry no allele information and are left out of the symbol set.
pub const MISSING_SENTINELS: [char; 2] = ['-', 'n'];

/// Calls that encode to `0` when they are not themselves an allele.
pub const ZERO_SENTINELS: [char; 3] = ['-', 'a', 'n'];

pub type Bit = u8;

/// All haplotype calls of one marker, concatenated across individuals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRow {
    pub index: usize,
    pub calls: String,
}

impl MarkerRow {
    pub fn new(index: usize, calls: impl Into<String>) -> Self {
        Self {
            index,
            calls: calls.into(),
        }
    }

    /// Occurrence count of every non-missing symbol, in character order.
    pub fn symbol_counts(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for c in self.calls.chars().filter(|c| !MISSING_SENTINELS.contains(c)) {
            *counts.entry(c).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.calls.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Major/minor allele identity of one marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alleles {
    /// Every call is a missing sentinel.
    Missing,
    Monomorphic { major: char },
    Biallelic { major: char, minor: char },
}

impl Alleles {
    pub fn major(&self) -> Option<char> {
        match self {
            Self::Missing => None,
            Self::Monomorphic { major } | Self::Biallelic { major, .. } => Some(*major),
        }
    }

    pub fn minor(&self) -> Option<char> {
        match self {
            Self::Biallelic { minor, .. } => Some(*minor),
            _ => None,
        }
    }

    /// Maps one call to its bit, or `None` if the call is outside the
    /// symbol domain of this marker.
    pub fn bit(&self, call: char) -> Option<Bit> {
        if self.major() == Some(call) {
            Some(1)
        } else if self.minor() == Some(call) || ZERO_SENTINELS.contains(&call) {
            Some(0)
        } else {
            None
        }
    }
}

/// Classifies the alleles of a marker from its calls alone.
///
/// The more frequent symbol is the major allele; on equal counts the
/// lexicographically smaller symbol wins.
pub fn classify(row: &MarkerRow) -> Result<Alleles> {
    let counts = row.symbol_counts();
    let mut symbols = counts.iter();
    match (symbols.next(), symbols.next(), symbols.next()) {
        (None, _, _) => Ok(Alleles::Missing),
        (Some((&major, _)), None, _) => Ok(Alleles::Monomorphic { major }),
        (Some((&first, &n_first)), Some((&second, &n_second)), None) => {
            if n_first >= n_second {
                Ok(Alleles::Biallelic {
                    major: first,
                    minor: second,
                })
            } else {
                Ok(Alleles::Biallelic {
                    major: second,
                    minor: first,
                })
            }
        }
        _ => Err(Error::UnsupportedVariant {
            marker: row.index,
            symbols: counts.keys().copied().collect(),
        }),
    }
}

/// One bit per haplotype call; same length as the source row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRow {
    pub index: usize,
    pub bits: Vec<Bit>,
}

impl EncodedRow {
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl std::fmt::Display for EncodedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

pub fn encode(row: &MarkerRow, alleles: &Alleles) -> Result<EncodedRow> {
    let bits = row
        .calls
        .chars()
        .enumerate()
        .map(|(offset, call)| {
            alleles.bit(call).ok_or(Error::SymbolDomain {
                marker: row.index,
                offset,
                symbol: call,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(EncodedRow {
        index: row.index,
        bits,
    })
}

/// Classifies then encodes a single marker.
pub fn classify_and_encode(row: &MarkerRow) -> Result<(Alleles, EncodedRow)> {
    let alleles = classify(row)?;
    let encoded = encode(row, &alleles)?;
    Ok((alleles, encoded))
}
