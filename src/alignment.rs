//! Aligned FASTA input
//!
//! Reads a multiple sequence alignment into an [`AlignmentTable`], an
//! insertion-ordered mapping from sequence name to its gapped sequence, and
//! reads batch list files naming several alignments.

use crate::error::{Msa2GfaError, Result};
use flate2::read::GzDecoder;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Gap symbol used in aligned sequences
pub const GAP: u8 = b'-';

/// One named row of the alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    /// Sequence name (first token of the FASTA header)
    pub name: String,
    /// Aligned symbols, gaps included
    pub sequence: Vec<u8>,
}

/// Sequence name to aligned sequence, in alignment file order
#[derive(Debug, Clone, Default)]
pub struct AlignmentTable {
    rows: Vec<AlignedSequence>,
    by_name: HashMap<String, usize>,
}

impl AlignmentTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, sequence)` pairs, in order
    pub fn from_pairs<I, N, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<[u8]>,
    {
        let mut table = Self::new();
        for (name, sequence) in pairs {
            table.push(name.into(), sequence.as_ref().to_vec())?;
        }
        Ok(table)
    }

    /// Parse an aligned FASTA file, decompressing `.gz` input
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Msa2GfaError::FileNotFound(path.display().to_string()));
        }
        Self::parse(open_reader(path)?)
    }

    /// Parse aligned FASTA from a buffered reader
    ///
    /// Soft-wrapped sequence lines are concatenated. Lengths are not checked
    /// here; see [`AlignmentTable::validate`].
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut current: Option<(String, Vec<u8>)> = None;

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim_end();
            let line_no = line_num + 1;

            if let Some(header) = line.strip_prefix('>') {
                if let Some((name, sequence)) = current.take() {
                    table.push(name, sequence)?;
                }
                let name = header.split_whitespace().next().ok_or_else(|| {
                    Msa2GfaError::MalformedHeader {
                        line: line_no,
                        message: "header has no sequence name".to_string(),
                    }
                })?;
                current = Some((name.to_string(), Vec::new()));
                continue;
            }

            if line.is_empty() {
                continue;
            }

            let Some((_, sequence)) = current.as_mut() else {
                return Err(Msa2GfaError::MalformedSequence {
                    line: line_no,
                    message: "sequence data before the first header".to_string(),
                });
            };
            if !line.is_ascii() {
                return Err(Msa2GfaError::MalformedSequence {
                    line: line_no,
                    message: "non-ASCII symbol in sequence".to_string(),
                });
            }
            sequence.extend_from_slice(line.as_bytes());
        }

        if let Some((name, sequence)) = current {
            table.push(name, sequence)?;
        }

        Ok(table)
    }

    /// Append a sequence, rejecting duplicate names
    pub fn push(&mut self, name: String, sequence: Vec<u8>) -> Result<()> {
        if self.by_name.contains_key(&name) {
            return Err(Msa2GfaError::DuplicateSequence { name });
        }
        self.by_name.insert(name.clone(), self.rows.len());
        self.rows.push(AlignedSequence { name, sequence });
        Ok(())
    }

    /// Check the table describes a usable alignment
    ///
    /// Requires at least one sequence, a non-zero width, ASCII symbols only
    /// and every sequence the same length as the first.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.rows.first() else {
            return Err(Msa2GfaError::EmptyAlignment(
                "no sequences found".to_string(),
            ));
        };
        // Columns are byte offsets, so a multi-byte symbol would split
        if let Some(row) = self.rows.iter().find(|row| !row.sequence.is_ascii()) {
            return Err(Msa2GfaError::MalformedSequence {
                line: 0,
                message: format!("sequence '{}' contains a non-ASCII symbol", row.name),
            });
        }
        let expected = first.sequence.len();
        for row in &self.rows[1..] {
            if row.sequence.len() != expected {
                return Err(Msa2GfaError::UnequalLengths {
                    name: row.name.clone(),
                    expected,
                    found: row.sequence.len(),
                });
            }
        }
        if expected == 0 {
            return Err(Msa2GfaError::EmptyAlignment(
                "sequences have no aligned columns".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no sequences
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Alignment width (length of the first sequence)
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.sequence.len())
    }

    /// Sequence names in alignment order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.name.as_str())
    }

    /// Rows in alignment order
    pub fn rows(&self) -> &[AlignedSequence] {
        &self.rows
    }

    /// Look up a sequence by name
    pub fn get(&self, name: &str) -> Option<&AlignedSequence> {
        self.by_name.get(name).map(|&i| &self.rows[i])
    }
}

/// Open a plain or gzip-compressed (`.gz`) text file
pub fn open_reader<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let file = File::open(path)?;

    if path.extension().is_some_and(|ext| ext == "gz") {
        return Ok(Box::new(BufReader::new(GzDecoder::new(file))));
    }

    Ok(Box::new(BufReader::new(file)))
}

/// An alignment path named by a batch list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedPath {
    /// 1-based line in the list file
    pub line: usize,
    /// Path as written in the list
    pub path: PathBuf,
}

/// Read alignment paths from a batch list, one per line
///
/// Blank lines and `#` comments are skipped.
pub fn read_path_list<R: BufRead>(reader: R) -> Result<Vec<ListedPath>> {
    let mut paths = Vec::new();
    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let entry = line.trim();
        if entry.is_empty() || entry.starts_with('#') {
            continue;
        }
        paths.push(ListedPath {
            line: line_num + 1,
            path: PathBuf::from(entry),
        });
    }
    Ok(paths)
}

/// Read a batch list file
pub fn read_path_list_file<P: AsRef<Path>>(path: P) -> Result<Vec<ListedPath>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Msa2GfaError::FileNotFound(path.display().to_string()));
    }
    read_path_list(BufReader::new(File::open(path)?))
}
