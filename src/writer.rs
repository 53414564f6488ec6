use crate::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn table_writer<W: Write>(writer: W, delimiter: u8) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_writer(writer)
}

/// Writes the encoded matrix, one line per marker and one `bb` field per
/// individual, without header or index.
pub fn write_matrix<W: Write>(writer: W, matrix: &EncodedMatrix) -> Result<()> {
    let mut wtr = table_writer(writer, b' ');
    for row in matrix.rows() {
        wtr.write_record(row.iter().map(|pair| pair.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `matrix` to `path`, creating parent directories as needed.
///
/// The data goes to a sibling temporary file first and is renamed into
/// place once complete, so a failed write never leaves a truncated file.
pub fn write_matrix_file(path: &Path, matrix: &EncodedMatrix) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let result = fs::File::create(&tmp)
        .map_err(Error::from)
        .and_then(|file| write_matrix(std::io::BufWriter::new(file), matrix));
    match result {
        Ok(()) => {
            fs::rename(&tmp, path)?;
            Ok(())
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes a PLINK `.map` table: chromosome, marker id, genetic distance
/// (always 0) and physical position, tab delimited.
pub fn write_marker_map<W: Write>(writer: W, chromosome: u8, markers: &[MarkerId]) -> Result<()> {
    let mut wtr = table_writer(writer, b'\t');
    let chromosome = chromosome.to_string();
    for marker in markers {
        wtr.write_record([
            chromosome.as_str(),
            marker.name.as_str(),
            "0",
            marker.position.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the PLINK `--update-ids` table renaming families `1..=n` to
/// `n+1..=2n`; every individual id is `1`.
pub fn write_id_remap<W: Write>(writer: W, n_samples: u32) -> Result<()> {
    let mut wtr = table_writer(writer, b' ');
    for old in 1..=n_samples {
        wtr.write_record(&id_remap_record(n_samples, old))?;
    }
    wtr.flush()?;
    Ok(())
}

/// New family ids can exceed `u32::MAX`.
fn id_remap_record(n_samples: u32, old: u32) -> [String; 4] {
    let new = u64::from(n_samples) + u64::from(old);
    [old.to_string(), "1".into(), new.to_string(), "1".into()]
}

pub fn write_id_remap_file(path: &Path, n_samples: u32) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    write_id_remap(fs::File::create(path)?, n_samples)
}
