//! Text-to-store conversion through the public API

mod common;

use std::io::Cursor;

use bdsm::{
    convert_file, convert_from_ascii, format_spec, ConvertOptions, DistanceMatrix, Error,
    MatrixStore,
};
use common::store_from_text;
use tempfile::TempDir;

const SMALL: &str = "\tA\tB\tC\nA\t0\t0.1\t0.2\nB\t0.1\t0\t0.3\nC\t0.2\t0.3\t0\n";

fn convert_err(dir: &TempDir, text: &str) -> (usize, std::path::PathBuf) {
    let path = dir.path().join("bad.bdsm");
    let err = convert_from_ascii(Cursor::new(text), &path, &ConvertOptions::default())
        .unwrap_err();
    match err {
        Error::MalformedInput { line, .. } => (line, path),
        other => panic!("expected MalformedInput, got {other:?}"),
    }
}

#[test]
fn test_small_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = store_from_text(&dir, "small.bdsm", SMALL);
    let store = MatrixStore::open(&path).unwrap();

    assert_eq!(store.ids(), ["A", "B", "C"]);
    assert_eq!(store.attributes(), &format_spec());
    assert_eq!(store.row(0).unwrap(), [0.0, 0.1, 0.2]);
    assert_eq!(store.row(1).unwrap(), [0.1, 0.0, 0.3]);
    assert_eq!(store.row(2).unwrap(), [0.2, 0.3, 0.0]);
}

#[test]
fn test_convert_file_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("small.tsv");
    let output = dir.path().join("small.bdsm");
    std::fs::write(&input, SMALL.replace('\n', "\r\n") + "\n\n").unwrap();

    let summary = convert_file(&input, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(summary.identifiers, 3);
    assert_eq!(summary.rows_written, 3);

    let dm = DistanceMatrix::open_path(&output).unwrap();
    assert_eq!(dm.attributes(), &format_spec());
    assert_eq!(dm.get("C").unwrap()[1].value, 0.3);
}

#[test]
fn test_existing_output_needs_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = store_from_text(&dir, "small.bdsm", SMALL);

    let refused = convert_from_ascii(Cursor::new(SMALL), &path, &ConvertOptions::default());
    assert!(matches!(refused, Err(Error::Io(_))));

    let options = ConvertOptions::default().with_overwrite(true);
    let replacement = "\tX\nX\t0\n";
    convert_from_ascii(Cursor::new(replacement), &path, &options).unwrap();
    assert_eq!(MatrixStore::open(&path).unwrap().ids(), ["X"]);
}

#[test]
fn test_row_label_mismatch() {
    let dir = TempDir::new().unwrap();
    let text = "\tA\tB\tC\nA\t0\t0.1\t0.2\nC\t0.1\t0\t0.3\nB\t0.2\t0.3\t0\n";
    let (line, path) = convert_err(&dir, text);

    assert_eq!(line, 3);
    assert!(MatrixStore::open(&path).is_err());
}

#[test]
fn test_wrong_value_count() {
    let dir = TempDir::new().unwrap();
    let text = "\tA\tB\tC\nA\t0\t0.1\t0.2\nB\t0.1\t0\nC\t0.2\t0.3\t0\n";
    let (line, path) = convert_err(&dir, text);

    assert_eq!(line, 3);
    assert!(MatrixStore::open(&path).is_err());
}

#[test]
fn test_non_numeric_value() {
    let dir = TempDir::new().unwrap();
    let text = "\tA\tB\nA\t0\tfar\nB\t1\t0\n";
    let (line, path) = convert_err(&dir, text);

    assert_eq!(line, 2);
    assert!(MatrixStore::open(&path).is_err());
}

#[test]
fn test_invalid_utf8_row() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bytes.bdsm");
    let input: &[u8] = b"\tA\tB\nA\t0\t\xff\xfe\nB\t1\t0\n";

    let err = convert_from_ascii(input, &path, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { line: 2, .. }));
    assert!(MatrixStore::open(&path).is_err());
}

#[test]
fn test_invalid_utf8_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("header.bdsm");
    let input: &[u8] = b"\t\xc3\nA\t0\n";

    let err = convert_from_ascii(input, &path, &ConvertOptions::default()).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { line: 1, .. }));
    assert!(!path.exists());
}

#[test]
fn test_missing_rows() {
    let dir = TempDir::new().unwrap();
    let text = "\tA\tB\tC\nA\t0\t0.1\t0.2\n";
    let (_, path) = convert_err(&dir, text);

    assert!(MatrixStore::open(&path).is_err());
}

#[test]
fn test_trailing_data() {
    let dir = TempDir::new().unwrap();
    let text = "\tA\nA\t0\n\nA\t0\n";
    let (line, _) = convert_err(&dir, text);

    assert_eq!(line, 4);
}

#[test]
fn test_duplicate_identifiers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.bdsm");
    let text = "\tA\tA\nA\t0\t1\nA\t1\t0\n";

    let result = convert_from_ascii(Cursor::new(text), &path, &ConvertOptions::default());
    assert!(matches!(result, Err(Error::DuplicateIdentifier(id)) if id == "A"));
}

#[test]
fn test_empty_input() {
    let dir = TempDir::new().unwrap();
    let (line, _) = convert_err(&dir, "");
    assert_eq!(line, 1);
}
