//! Box-score ingest
//!
//! Reads the season CSV with the fixed-column layout used by the historical
//! exports: a header row, then one game per row with the result marker in
//! column 6 and total rebounds in column 25 (0-based).

use std::{fmt, fs::File, io, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    state::{GameState, Outcome},
};

/// How result markers other than the configured win/loss markers are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerPolicy {
    /// Anything that is not the win marker counts as a loss.
    #[default]
    LossByDefault,
    /// Only the exact win and loss markers are accepted.
    Strict,
}

/// Column layout and marker conventions of the input file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSchema {
    pub result_column: usize,
    pub rebounds_column: usize,
    pub win_marker: String,
    pub loss_marker: String,
    pub marker_policy: MarkerPolicy,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            result_column: 6,
            rebounds_column: 25,
            win_marker: "W".to_string(),
            loss_marker: "L".to_string(),
            marker_policy: MarkerPolicy::LossByDefault,
        }
    }
}

impl RecordSchema {
    pub fn with_marker_policy(mut self, policy: MarkerPolicy) -> Self {
        self.marker_policy = policy;
        self
    }

    fn parse_outcome(&self, marker: &str) -> Option<Outcome> {
        if marker == self.win_marker {
            Some(Outcome::Win)
        } else if marker == self.loss_marker {
            Some(Outcome::Loss)
        } else {
            match self.marker_policy {
                MarkerPolicy::LossByDefault => Some(Outcome::Loss),
                MarkerPolicy::Strict => None,
            }
        }
    }
}

/// The two fields of a box-score row the model consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub rebounds: u32,
    pub outcome: Outcome,
}

impl GameRecord {
    pub fn new(rebounds: u32, outcome: Outcome) -> Self {
        Self { rebounds, outcome }
    }

    pub fn state(&self) -> GameState {
        GameState::classify(self.rebounds, self.outcome)
    }
}

/// Why a single row could not be turned into a [`GameRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowErrorKind {
    MissingField { column: usize },
    InvalidRebounds { value: String },
    UnknownResult { value: String },
    InvalidEncoding { field: usize },
}

impl fmt::Display for RowErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowErrorKind::MissingField { column } => write!(f, "missing field at column {column}"),
            RowErrorKind::InvalidRebounds { value } => {
                write!(f, "rebound count '{value}' is not a non-negative integer")
            }
            RowErrorKind::UnknownResult { value } => {
                write!(f, "result marker '{value}' is neither win nor loss")
            }
            RowErrorKind::InvalidEncoding { field } => {
                write!(f, "field {field} is not valid UTF-8")
            }
        }
    }
}

/// A malformed input row, with enough context to locate it in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the source file (the header is line 1).
    pub line: u64,
    pub kind: RowErrorKind,
    pub raw: String,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} (row: {})", self.line, self.kind, self.raw)
    }
}

impl std::error::Error for RowError {}

/// Outcome of parsing one data row
pub type RowResult = std::result::Result<GameRecord, RowError>;

/// Placeholder name for rows that did not come from a file.
pub const IN_MEMORY_SOURCE: &str = "<memory>";

fn lossy_row<'a>(fields: impl Iterator<Item = &'a [u8]>) -> String {
    fields
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(",")
}

/// Reads box-score rows according to a [`RecordSchema`]
#[derive(Debug, Clone, Default)]
pub struct RecordReader {
    schema: RecordSchema,
}

impl RecordReader {
    pub fn new(schema: RecordSchema) -> Self {
        Self { schema }
    }

    /// Read every data row of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceUnreadable`] if the file cannot be opened or the
    /// stream breaks mid-file. Malformed rows, including rows that are not
    /// valid UTF-8, are not errors at this level; they come back as `Err`
    /// entries.
    pub fn read_path(&self, path: &Path) -> Result<Vec<RowResult>> {
        let file = File::open(path).map_err(|e| Error::SourceUnreadable {
            path: path.to_path_buf(),
            source: csv::Error::from(e),
        })?;
        log::debug!("reading box scores from {}", path.display());
        self.read_stream(file, path)
    }

    /// Read every data row from an arbitrary byte stream.
    pub fn read_from<R: io::Read>(&self, source: R) -> Result<Vec<RowResult>> {
        self.read_stream(source, Path::new(IN_MEMORY_SOURCE))
    }

    fn read_stream<R: io::Read>(&self, source: R, origin: &Path) -> Result<Vec<RowResult>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(source);

        let mut rows = Vec::new();
        for (offset, record) in reader.byte_records().enumerate() {
            let record = record.map_err(|e| Error::SourceUnreadable {
                path: origin.to_path_buf(),
                source: e,
            })?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(offset as u64 + 2);
            let row = match StringRecord::from_byte_record(record) {
                Ok(record) => self.parse_row(line, &record),
                Err(e) => Err(RowError {
                    line,
                    kind: RowErrorKind::InvalidEncoding {
                        field: e.utf8_error().field(),
                    },
                    raw: lossy_row(e.into_byte_record().iter()),
                }),
            };
            rows.push(row);
        }
        Ok(rows)
    }

    /// Extract a [`GameRecord`] from a single CSV row.
    pub fn parse_row(&self, line: u64, record: &StringRecord) -> RowResult {
        let fail = |kind| RowError {
            line,
            kind,
            raw: record.iter().collect::<Vec<_>>().join(","),
        };

        let rebounds_field = record.get(self.schema.rebounds_column).ok_or_else(|| {
            fail(RowErrorKind::MissingField {
                column: self.schema.rebounds_column,
            })
        })?;
        let marker = record.get(self.schema.result_column).ok_or_else(|| {
            fail(RowErrorKind::MissingField {
                column: self.schema.result_column,
            })
        })?;

        let rebounds = rebounds_field.parse::<u32>().map_err(|_| {
            fail(RowErrorKind::InvalidRebounds {
                value: rebounds_field.to_string(),
            })
        })?;
        let outcome = self.schema.parse_outcome(marker).ok_or_else(|| {
            fail(RowErrorKind::UnknownResult {
                value: marker.to_string(),
            })
        })?;

        Ok(GameRecord::new(rebounds, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(result: &str, rebounds: &str) -> String {
        let mut fields = vec!["x".to_string(); 26];
        fields[6] = result.to_string();
        fields[25] = rebounds.to_string();
        fields.join(",")
    }

    fn csv_of(rows: &[String]) -> String {
        let header = (0..26).map(|i| format!("c{i}")).collect::<Vec<_>>().join(",");
        let mut out = header;
        for r in rows {
            out.push('\n');
            out.push_str(r);
        }
        out.push('\n');
        out
    }

    #[test]
    fn test_reads_fixed_columns() {
        let data = csv_of(&[row("W", "44"), row("L", " 30 ")]);
        let rows = RecordReader::default().read_from(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], Ok(GameRecord::new(44, Outcome::Win)));
        assert_eq!(rows[1], Ok(GameRecord::new(30, Outcome::Loss)));
    }

    #[test]
    fn test_unknown_marker_defaults_to_loss() {
        let data = csv_of(&[row("W (OT)", "35")]);
        let rows = RecordReader::default().read_from(data.as_bytes()).unwrap();
        assert_eq!(rows[0], Ok(GameRecord::new(35, Outcome::Loss)));
    }

    #[test]
    fn test_strict_policy_rejects_unknown_marker() {
        let schema = RecordSchema::default().with_marker_policy(MarkerPolicy::Strict);
        let data = csv_of(&[row("T", "35")]);
        let rows = RecordReader::new(schema).read_from(data.as_bytes()).unwrap();
        let err = rows[0].clone().unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(
            err.kind,
            RowErrorKind::UnknownResult {
                value: "T".to_string()
            }
        );
    }

    #[test]
    fn test_row_errors_carry_line_and_content() {
        let data = csv_of(&[row("W", "40"), row("W", "forty"), "a,b,c".to_string()]);
        let rows = RecordReader::default().read_from(data.as_bytes()).unwrap();
        assert!(rows[0].is_ok());

        let bad = rows[1].clone().unwrap_err();
        assert_eq!(bad.line, 3);
        assert!(matches!(bad.kind, RowErrorKind::InvalidRebounds { .. }));
        assert!(bad.raw.contains("forty"));

        let short = rows[2].clone().unwrap_err();
        assert_eq!(short.line, 4);
        assert_eq!(short.kind, RowErrorKind::MissingField { column: 25 });
    }

    #[test]
    fn test_negative_rebounds_rejected() {
        let data = csv_of(&[row("L", "-3")]);
        let rows = RecordReader::default().read_from(data.as_bytes()).unwrap();
        assert!(matches!(
            rows[0],
            Err(RowError {
                kind: RowErrorKind::InvalidRebounds { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_utf8_row_does_not_hide_later_rows() {
        let mut data = csv_of(&[row("W", "41")]).into_bytes();
        let mut latin1 = row("L", "36").into_bytes();
        latin1[0] = 0xE9;
        data.extend_from_slice(&latin1);
        data.push(b'\n');
        data.extend_from_slice(row("W", "abc").as_bytes());
        data.push(b'\n');

        let rows = RecordReader::default().read_from(data.as_slice()).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());

        let encoding = rows[1].clone().unwrap_err();
        assert_eq!(encoding.line, 3);
        assert_eq!(encoding.kind, RowErrorKind::InvalidEncoding { field: 0 });
        assert!(encoding.raw.starts_with('\u{FFFD}'));
        assert!(encoding.raw.contains("36"));

        let rebounds = rows[2].clone().unwrap_err();
        assert_eq!(rebounds.line, 4);
        assert!(matches!(rebounds.kind, RowErrorKind::InvalidRebounds { .. }));
    }

    #[test]
    fn test_missing_file_is_source_unreadable() {
        let err = RecordReader::default()
            .read_path(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, Error::SourceUnreadable { .. }));
    }
}
