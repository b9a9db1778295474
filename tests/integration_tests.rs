//! Integration tests for the resume scorer

use resume_scorer::input::{CsvResumeSource, InputManager};
use resume_scorer::output::csv_export::export_ranking;
use resume_scorer::{rank_candidates, ResumeScorerError, ScoringSession};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

const JOB_FIXTURE: &str = "tests/fixtures/data_analyst_job.txt";

fn write_docx(dir: &Path, name: &str, paragraphs: &[&str]) -> PathBuf {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap();
    path
}

#[tokio::test]
async fn test_docx_resume_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "jane.docx", &["Data Analyst", "Python and SQL since 2019"]);

    let mut manager = InputManager::new();
    let text = manager.extract_resume(&path).await.unwrap();

    assert_eq!(text, "Data Analyst\nPython and SQL since 2019");
}

#[tokio::test]
async fn test_caching_functionality() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "cv.docx", &["python"]);
    let mut manager = InputManager::new();

    let text1 = manager.extract_resume(&path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_resume(&path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_resume_format() {
    let mut manager = InputManager::new();
    let result = manager.extract_resume(Path::new(JOB_FIXTURE)).await;
    assert!(matches!(result, Err(ResumeScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_resume(Path::new("tests/fixtures/missing.pdf")).await;
    assert!(matches!(result, Err(ResumeScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_corrupt_docx_is_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let mut manager = InputManager::new();
    let result = manager.extract_resume(&path).await;
    assert!(matches!(result, Err(ResumeScorerError::ParseFailure(_))));
}

#[tokio::test]
async fn test_job_description_from_text_and_markdown() {
    let mut manager = InputManager::new();

    let text = manager.read_job_description(Path::new(JOB_FIXTURE)).await.unwrap();
    assert!(text.contains("data analyst"));

    let markdown = manager
        .read_job_description(Path::new("tests/fixtures/data_analyst_job.md"))
        .await
        .unwrap();
    assert!(markdown.contains("Machine learning"));
    assert!(!markdown.contains("**"));
    assert!(!markdown.contains('#'));
}

#[tokio::test]
async fn test_load_candidates_keeps_failures_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_docx(dir.path(), "good.docx", &["python sql 2020"]);
    let bad = dir.path().join("bad.docx");
    std::fs::write(&bad, b"garbage").unwrap();

    let mut manager = InputManager::new();
    let candidates = manager.load_candidates(&[good, bad]).await;

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].as_ref().unwrap().id, "good.docx");
    assert!(candidates[1].is_err());
}

#[tokio::test]
async fn test_single_resume_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let strong = write_docx(dir.path(), "strong.docx", &["python sql 2020 2021"]);
    let weak = write_docx(dir.path(), "weak.docx", &["carpentry woodwork gardening"]);

    let mut manager = InputManager::new();
    let job = manager.read_job_description(Path::new(JOB_FIXTURE)).await.unwrap();
    let session = ScoringSession::with_defaults(&job).unwrap();

    let strong_result = session.score_text(&manager.extract_resume(&strong).await.unwrap());
    let weak_result = session.score_text(&manager.extract_resume(&weak).await.unwrap());

    assert!(strong_result.matched_skills.contains("python"));
    assert!(strong_result.matched_skills.contains("sql"));
    assert_eq!(strong_result.experience_years, 2);
    assert!(strong_result.final_score > weak_result.final_score);
}

#[tokio::test]
async fn test_csv_batch_skips_unparsable_row() {
    let mut manager = InputManager::new();
    let job = manager.read_job_description(Path::new(JOB_FIXTURE)).await.unwrap();
    let session = ScoringSession::with_defaults(&job).unwrap();

    let mut source = CsvResumeSource::open(Path::new("tests/fixtures/resumes.csv")).unwrap();
    let report = rank_candidates(&session, source.candidates(), None);

    assert_eq!(report.ranked.len(), 9);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].position, 5);

    let scores: Vec<f64> = report.ranked.iter().map(|r| r.result.final_score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert!(!report.ranked.iter().any(|r| r.candidate_id == "105"));
}

#[tokio::test]
async fn test_csv_batch_top_n_and_export() {
    let mut manager = InputManager::new();
    let job = manager.read_job_description(Path::new(JOB_FIXTURE)).await.unwrap();
    let session = ScoringSession::with_defaults(&job).unwrap();

    let mut source = CsvResumeSource::open(Path::new("tests/fixtures/resumes.csv")).unwrap();
    let top = rank_candidates(&session, source.candidates(), Some(3));
    assert_eq!(top.ranked.len(), 3);
    assert_eq!(top.scored_count, 9);

    // The exported file carries the whole sorted set, not just the top N.
    let mut source = CsvResumeSource::open(Path::new("tests/fixtures/resumes.csv")).unwrap();
    let full = rank_candidates(&session, source.candidates(), None);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output").join("shortlisted_candidates.csv");
    export_ranking(&path, &full.ranked).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "candidate_id");
    assert_eq!(&headers[1], "score");

    let ids: Vec<String> = reader.records().map(|r| r.unwrap()[0].to_string()).collect();
    assert_eq!(ids.len(), 9);
    let top_ids: Vec<String> = top.ranked.iter().map(|r| r.candidate_id.clone()).collect();
    assert_eq!(&ids[..3], &top_ids[..]);
}

#[tokio::test]
async fn test_export_with_every_resume_failing_has_header() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"%PDF-1.4\nnot really a pdf").unwrap();

    let mut manager = InputManager::new();
    let job = manager.read_job_description(Path::new(JOB_FIXTURE)).await.unwrap();
    let session = ScoringSession::with_defaults(&job).unwrap();
    let candidates = manager.load_candidates(&[bad]).await;
    assert!(matches!(candidates[0], Err(ResumeScorerError::ParseFailure(_))));

    let report = rank_candidates(&session, candidates.into_iter(), None);
    assert!(report.ranked.is_empty());
    assert_eq!(report.skipped.len(), 1);

    let path = dir.path().join("ranking.csv");
    export_ranking(&path, &report.ranked).unwrap();
    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(reader.headers().unwrap().len(), 5);
    assert_eq!(reader.records().count(), 0);
}

#[tokio::test]
async fn test_unsupported_job_description_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_docx(dir.path(), "job.docx", &["python"]);

    let mut manager = InputManager::new();
    let result = manager.read_job_description(&path).await;
    assert!(matches!(result, Err(ResumeScorerError::UnsupportedFormat(_))));
}

#[test]
fn test_csv_missing_resume_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "ID,Text\n1,python\n").unwrap();

    let result = CsvResumeSource::open(&path);
    assert!(matches!(result, Err(ResumeScorerError::InvalidInput(_))));
}
