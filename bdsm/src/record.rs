//! Query result records and their text output

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// One `(source, target, value)` distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    /// Identifier the row (or column) was requested for
    pub source: String,
    /// Retained identifier the value belongs to
    pub target: String,
    /// Distance from source to target
    pub value: f64,
}

impl DistanceRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

/// Write records as tab-separated text with a header line
pub fn write_tsv<W: Write>(records: &[DistanceRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "source\ttarget\tvalue")?;
    for record in records {
        writeln!(out, "{}\t{}\t{}", record.source, record.target, record.value)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_tsv() {
        let records = [
            DistanceRecord::new("b", "a", 0.25),
            DistanceRecord::new("b", "b", 0.0),
        ];
        let mut out = Vec::new();
        write_tsv(&records, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "source\ttarget\tvalue\nb\ta\t0.25\nb\tb\t0\n"
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&DistanceRecord::new("b", "d", 1.0)).unwrap();
        assert_eq!(json, r#"{"source":"b","target":"d","value":1.0}"#);
    }
}
