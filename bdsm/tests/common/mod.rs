//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use bdsm::{convert_from_ascii, ConvertOptions};
use tempfile::TempDir;

pub const IDS: [&str; 5] = ["a", "b", "c", "d", "e"];

/// Symmetric 5 x 5 fixture; every entry is a multiple of 1/7
pub fn sevenths() -> [[f64; 5]; 5] {
    let numerators = [
        [0, 1, 2, 3, 4],
        [1, 0, 3, 4, 5],
        [2, 3, 0, 5, 6],
        [3, 4, 5, 0, 7],
        [4, 5, 6, 7, 0],
    ];
    numerators.map(|row| row.map(|k| f64::from(k) / 7.0))
}

/// Render a matrix in the legacy tab-delimited text format
pub fn to_text<const N: usize>(ids: &[&str; N], rows: &[[f64; N]; N]) -> String {
    let mut text = String::new();
    for id in ids {
        text.push('\t');
        text.push_str(id);
    }
    text.push('\n');
    for (id, row) in ids.iter().zip(rows) {
        text.push_str(id);
        for value in row {
            text.push('\t');
            text.push_str(&value.to_string());
        }
        text.push('\n');
    }
    text
}

/// Convert `text` into a store inside `dir`
pub fn store_from_text(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    convert_from_ascii(Cursor::new(text), &path, &ConvertOptions::default()).unwrap();
    path
}

/// The 5-identifier fixture as a store
pub fn basic_store(dir: &TempDir) -> PathBuf {
    store_from_text(dir, "test_basic.bdsm", &to_text(&IDS, &sevenths()))
}

pub fn sev(k: u32) -> f64 {
    f64::from(k) / 7.0
}
