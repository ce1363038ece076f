use std::io::Read;

use super::*;
use crate::batch::orchestrator::{RowFailure, RowReport};

fn sample_result() -> BatchResult {
    BatchResult {
        total: 3,
        rows: vec![
            RowReport {
                index: 0,
                id: "1".into(),
                outcome: RowOutcome::Rendered(b"png-one".to_vec()),
            },
            RowReport {
                index: 1,
                id: "2".into(),
                outcome: RowOutcome::Skipped("missing title".into()),
            },
            RowReport {
                index: 2,
                id: "3".into(),
                outcome: RowOutcome::Failed(RowFailure {
                    kind: FailureKind::UnknownPreset,
                    message: "unknown preset: teal".into(),
                }),
            },
        ],
        cancelled: false,
    }
}

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "thumbforge_package_{tag}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn zip_holds_only_rendered_rows() {
    let bytes = zip_bytes(&sample_result()).unwrap();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(archive.len(), 1);
    let mut entry = archive.by_index(0).unwrap();
    assert_eq!(entry.name(), "1.png");
    let mut content = Vec::new();
    entry.read_to_end(&mut content).unwrap();
    assert_eq!(content, b"png-one");
}

#[test]
fn zip_is_deterministic() {
    assert_eq!(
        zip_bytes(&sample_result()).unwrap(),
        zip_bytes(&sample_result()).unwrap()
    );
}

#[test]
fn unsafe_names_are_refused() {
    let mut result = sample_result();
    result.rows[0].id = "../evil".into();
    assert!(zip_bytes(&result).is_err());
}

#[test]
fn dir_output_writes_one_file_per_rendered_row() {
    let dir = temp_dir("dir");
    let written = write_dir(&sample_result(), &dir.join("out")).unwrap();
    assert_eq!(written, vec![dir.join("out").join("1.png")]);
    assert_eq!(std::fs::read(&written[0]).unwrap(), b"png-one");
}

#[test]
fn zip_file_output_round_trips() {
    let dir = temp_dir("zipfile");
    let path = dir.join("thumbs.zip");
    write_zip_file(&sample_result(), &path).unwrap();
    let archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(archive.len(), 1);
}

#[test]
fn report_summarizes_outcomes() {
    let report = BatchReport::from_result(&sample_result());
    assert_eq!((report.total, report.rendered, report.skipped, report.failed), (3, 1, 1, 1));
    assert_eq!(report.rows[0].file.as_deref(), Some("1.png"));
    assert_eq!(report.rows[1].reason.as_deref(), Some("missing title"));
    assert_eq!(report.rows[2].kind, Some(FailureKind::UnknownPreset));

    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();
    assert_eq!(json["rows"][2]["kind"], "unknown_preset");
    assert_eq!(json["rows"][1]["status"], "skipped");
    assert!(json["rows"][0].get("reason").is_none());
}
