//! Batch resume input from a CSV file with `ID` and `Resume_str` columns

use crate::error::{Result, ResumeScorerError};
use crate::processing::batch::Candidate;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ID_COLUMN: &str = "ID";
pub const RESUME_COLUMN: &str = "Resume_str";

#[derive(Debug, Deserialize)]
struct ResumeRecord {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Resume_str")]
    resume: String,
}

pub struct CsvResumeSource<R: Read> {
    reader: csv::Reader<R>,
}

impl CsvResumeSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            ResumeScorerError::InvalidInput(format!("Cannot open CSV '{}': {}", path.display(), e))
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> CsvResumeSource<R> {
    /// Wrap a reader, checking that the required columns are present.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers()?;

        for column in [ID_COLUMN, RESUME_COLUMN] {
            if !headers.iter().any(|h| h == column) {
                return Err(ResumeScorerError::InvalidInput(format!(
                    "CSV is missing required column '{}'",
                    column
                )));
            }
        }

        Ok(Self { reader })
    }

    /// One item per data row; a malformed row yields a `ParseFailure`.
    pub fn candidates(&mut self) -> impl Iterator<Item = Result<Candidate>> + '_ {
        self.reader
            .deserialize::<ResumeRecord>()
            .enumerate()
            .map(|(index, record)| {
                record
                    .map(|record| Candidate {
                        id: record.id,
                        text: record.resume,
                    })
                    .map_err(|e| {
                        ResumeScorerError::ParseFailure(format!("CSV row {}: {}", index + 1, e))
                    })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_rows_and_ignores_extra_columns() {
        let data = "ID,Resume_str,Category\n1,python sql,DATA\n2,\"gardening, carpentry\",OTHER\n";
        let mut source = CsvResumeSource::from_reader(data.as_bytes()).unwrap();
        let candidates: Vec<Candidate> = source.candidates().map(|c| c.unwrap()).collect();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "1");
        assert_eq!(candidates[1].text, "gardening, carpentry");
    }

    #[test]
    fn test_missing_column_rejected() {
        let data = "ID,Text\n1,python\n";
        let err = CsvResumeSource::from_reader(data.as_bytes()).err().unwrap();
        assert!(matches!(err, ResumeScorerError::InvalidInput(_)));
    }

    #[test]
    fn test_short_row_is_parse_failure() {
        let data = "ID,Resume_str\n1,python\n2\n3,sql\n";
        let mut source = CsvResumeSource::from_reader(data.as_bytes()).unwrap();
        let rows: Vec<Result<Candidate>> = source.candidates().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_ok());
        assert!(matches!(rows[1], Err(ResumeScorerError::ParseFailure(_))));
        assert_eq!(rows[2].as_ref().unwrap().id, "3");
    }
}
