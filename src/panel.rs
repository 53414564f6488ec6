use crate::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Leading marker identifier fields of one panel row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerId {
    pub name: String,
    pub position: String,
}

/// One chromosome's phased haplotype panel.
///
/// Calls are kept per marker as they appear in the table, one field per
/// individual-haplotype column.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    haplotypes: Vec<String>,
    markers: Vec<MarkerId>,
    calls: Vec<Vec<String>>,
}

impl Panel {
    /// Labels of the call columns, taken from the header row if present.
    pub fn haplotypes(&self) -> &[String] {
        &self.haplotypes
    }

    pub fn markers(&self) -> &[MarkerId] {
        &self.markers
    }

    pub fn n_markers(&self) -> usize {
        self.markers.len()
    }

    /// Number of diploid individuals, two call columns each.
    pub fn n_individuals(&self) -> usize {
        self.haplotypes.len() / 2
    }

    /// Individual names derived from the haplotype labels (`NA06984_A` and
    /// `NA06984_B` both name `NA06984`).
    pub fn individuals(&self) -> Vec<&str> {
        self.haplotypes
            .chunks(2)
            .map(|pair| {
                let label = pair[0].as_str();
                label
                    .rsplit_once('_')
                    .map(|(name, _)| name)
                    .unwrap_or(label)
            })
            .collect()
    }

    /// Concatenates each marker's calls, in column order.
    pub fn marker_rows(&self) -> impl Iterator<Item = MarkerRow> + '_ {
        self.calls
            .iter()
            .enumerate()
            .map(|(index, fields)| MarkerRow::new(index, fields.concat()))
    }
}

/// Reads whitespace delimited panel tables into a `Panel`.
pub struct PanelReaderBuilder {
    headers: bool,
    id_columns: usize,
}

impl Default for PanelReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelReaderBuilder {
    /// Construct a new panel reader builder
    pub fn new() -> Self {
        Self {
            headers: true,
            id_columns: 2,
        }
    }

    pub fn headers(&mut self, headers: bool) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Number of leading identifier columns set aside before the calls.
    pub fn id_columns(&mut self, id_columns: usize) -> &mut Self {
        self.id_columns = id_columns;
        self
    }

    pub fn from_path(&self, path: &Path, chromosome: u8) -> Result<Panel> {
        if !path.exists() {
            return Err(Error::MissingInput {
                path: path.to_path_buf(),
                chromosome,
            });
        }
        self.from_reader(Box::new(File::open(path)?))
    }

    pub fn from_reader(&self, reader: Box<dyn Read>) -> Result<Panel> {
        let reader = BufReader::new(reader);
        let mut panel = Panel::default();
        let mut width: Option<usize> = None;
        let mut header_seen = !self.headers;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            let expected = *width.get_or_insert(fields.len());
            if fields.len() != expected || expected < self.id_columns {
                return Err(Error::MalformedTable {
                    line: idx + 1,
                    expected: expected.max(self.id_columns),
                    found: fields.len(),
                });
            }

            let (ids, calls) = fields.split_at(self.id_columns);
            if !header_seen {
                header_seen = true;
                panel.haplotypes = calls.iter().map(|s| s.to_string()).collect();
                continue;
            }

            if let Some((col, field)) = calls
                .iter()
                .enumerate()
                .find(|(_, field)| field.chars().count() != 1)
            {
                return Err(Error::MalformedCall {
                    line: idx + 1,
                    column: self.id_columns + col + 1,
                    field: field.to_string(),
                });
            }

            panel.markers.push(MarkerId {
                name: ids.first().map(|s| s.to_string()).unwrap_or_default(),
                position: ids.get(1).map(|s| s.to_string()).unwrap_or_default(),
            });
            panel.calls.push(calls.iter().map(|s| s.to_string()).collect());
        }

        if !self.headers {
            let width = width.unwrap_or(self.id_columns);
            panel.haplotypes = (0..width - self.id_columns).map(|i| i.to_string()).collect();
        }

        tracing::debug!(
            markers = panel.n_markers(),
            haplotypes = panel.haplotypes.len(),
            "loaded panel"
        );
        Ok(panel)
    }
}
