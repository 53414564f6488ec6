pub use crate::config::{Chromosomes, ConversionConfig, PanelLayout};
pub use crate::error::{Error, Result};
pub use crate::genetics::{classify, classify_and_encode, encode, Alleles, Bit, EncodedRow, MarkerRow};
pub use crate::matrix::{EncodedMatrix, Pair};
pub use crate::panel::{MarkerId, Panel, PanelReaderBuilder};
pub use crate::writer::{write_id_remap, write_marker_map, write_matrix, write_matrix_file};
