use crate::prelude::*;
use std::fmt;

/// The two haplotype bits of one individual at one marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pair(pub Bit, pub Bit);

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// Encoded genotypes, one row per marker and one column per individual.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedMatrix {
    data: ndarray::Array2<Pair>,
}

impl EncodedMatrix {
    /// Splits every encoded row into individual pairs.
    ///
    /// All rows must share one even length, otherwise the columns would
    /// not line up with individuals.
    pub fn from_rows(rows: &[EncodedRow]) -> Result<Self> {
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        for row in rows {
            if row.len() != width || row.len() % 2 != 0 {
                return Err(Error::ShapeMismatch {
                    marker: row.index,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let individuals = width / 2;
        let pairs: Vec<Pair> = rows
            .iter()
            .flat_map(|row| row.bits.chunks_exact(2).map(|p| Pair(p[0], p[1])))
            .collect();
        Ok(Self {
            data: ndarray::Array::from_shape_vec((rows.len(), individuals), pairs)?,
        })
    }

    pub fn n_markers(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_individuals(&self) -> usize {
        self.data.ncols()
    }

    pub fn get(&self, marker: usize, individual: usize) -> Option<Pair> {
        self.data.get((marker, individual)).copied()
    }

    /// All markers of one individual, in marker order.
    pub fn individual(&self, individual: usize) -> Vec<Pair> {
        self.data.column(individual).to_vec()
    }

    /// Re-concatenates a marker's pairs into its encoded bits.
    pub fn row_bits(&self, marker: usize) -> Vec<Bit> {
        self.data
            .row(marker)
            .iter()
            .flat_map(|p| [p.0, p.1])
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = ndarray::ArrayView1<'_, Pair>> {
        self.data.outer_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::result::Result;

    fn row(index: usize, bits: &[Bit]) -> EncodedRow {
        EncodedRow {
            index,
            bits: bits.to_vec(),
        }
    }

    #[test]
    fn test_pairs_belong_to_individuals() -> Result<(), Box<dyn StdError>> {
        let matrix = EncodedMatrix::from_rows(&[row(0, &[1, 1, 1, 0]), row(1, &[0, 0, 0, 1])])?;
        assert_eq!(matrix.n_markers(), 2);
        assert_eq!(matrix.n_individuals(), 2);
        assert_eq!(matrix.get(0, 1), Some(Pair(1, 0)));
        assert_eq!(matrix.individual(1), vec![Pair(1, 0), Pair(0, 1)]);
        assert_eq!(Pair(1, 0).to_string(), "10");
        Ok(())
    }

    #[test]
    fn test_row_bits_round_trip() -> Result<(), Box<dyn StdError>> {
        let bits = [1, 0, 0, 1, 1, 1];
        let matrix = EncodedMatrix::from_rows(&[row(0, &bits)])?;
        assert_eq!(matrix.row_bits(0), bits.to_vec());
        Ok(())
    }

    #[test]
    fn test_unequal_rows_are_rejected() {
        match EncodedMatrix::from_rows(&[row(0, &[1, 1]), row(1, &[1, 1, 0, 0])]) {
            Err(Error::ShapeMismatch { marker, expected, found }) => {
                assert_eq!((marker, expected, found), (1, 2, 4));
            }
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_odd_rows_are_rejected() {
        assert!(matches!(
            EncodedMatrix::from_rows(&[row(0, &[1, 0, 1])]),
            Err(Error::ShapeMismatch { found: 3, .. })
        ));
    }

    #[test]
    fn test_empty_chromosome_gives_empty_matrix() -> Result<(), Box<dyn StdError>> {
        let matrix = EncodedMatrix::from_rows(&[])?;
        assert_eq!(matrix.n_markers(), 0);
        Ok(())
    }
}
