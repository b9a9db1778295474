//! CSV export of ranked candidates

use crate::error::Result;
use crate::processing::batch::RankedCandidate;
use log::info;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

pub const SKILL_SEPARATOR: &str = "; ";

const HEADER: [&str; 5] = [
    "candidate_id",
    "score",
    "similarity",
    "matched_skills",
    "missing_skills",
];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    candidate_id: &'a str,
    score: f64,
    similarity: f64,
    matched_skills: String,
    missing_skills: String,
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn join_skills(skills: &BTreeSet<String>) -> String {
    skills.iter().cloned().collect::<Vec<_>>().join(SKILL_SEPARATOR)
}

/// Write ranked rows in their current order to any writer. An empty ranking
/// still gets the header row.
pub fn write_ranking<W: Write>(writer: W, ranked: &[RankedCandidate]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    // serialize() only emits the header alongside the first row.
    if ranked.is_empty() {
        csv_writer.write_record(HEADER)?;
    }

    for entry in ranked {
        let result = &entry.result;
        csv_writer.serialize(ExportRow {
            candidate_id: &entry.candidate_id,
            score: round3(result.final_score),
            similarity: round3(result.similarity),
            matched_skills: join_skills(&result.matched_skills),
            missing_skills: join_skills(&result.missing_skills),
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export to a file, creating parent directories as needed.
pub fn export_ranking(path: &Path, ranked: &[RankedCandidate]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_ranking(file, ranked)?;
    info!("Exported {} ranked candidates to {}", ranked.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::ScoreResult;

    fn entry(id: &str, score: f64, matched: &[&str], missing: &[&str]) -> RankedCandidate {
        RankedCandidate {
            candidate_id: id.to_string(),
            result: ScoreResult {
                final_score: score,
                similarity: 0.123456,
                matched_skills: matched.iter().map(|s| s.to_string()).collect(),
                missing_skills: missing.iter().map(|s| s.to_string()).collect(),
                skill_match_ratio: 2.0 / 3.0,
                experience_years: 4,
            },
        }
    }

    #[test]
    fn test_columns_and_rounding() {
        let mut buffer = Vec::new();
        write_ranking(
            &mut buffer,
            &[entry("17", 0.65432, &["python", "sql"], &["spark"])],
        )
        .unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), HEADER.join(","));
        assert_eq!(lines.next().unwrap(), "17,0.654,0.123,python; sql,spark");
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_ranking_writes_header() {
        let mut buffer = Vec::new();
        write_ranking(&mut buffer, &[]).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["candidate_id,score,similarity,matched_skills,missing_skills"]
        );
    }

    #[test]
    fn test_export_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("shortlisted_candidates.csv");

        export_ranking(&path, &[entry("a", 0.9, &[], &[]), entry("b", 0.1, &[], &[])]).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let ids: Vec<String> = reader
            .records()
            .map(|r| r.unwrap()[0].to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
