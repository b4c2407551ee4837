//! Conversion of legacy tab-delimited distance matrices
//!
//! The text format has a header line of an empty field followed by N
//! identifiers, then N lines each holding the row's identifier and N
//! numeric values:
//!
//! ```text
//! \tA\tB\tC
//! A\t0\t0.1\t0.2
//! B\t0.1\t0\t0.3
//! C\t0.2\t0.3\t0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::attributes::format_spec;
use crate::config::ConvertOptions;
use crate::store::StoreWriter;
use crate::{Error, Result};

/// Outcome of a successful conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Number of identifiers (N)
    pub identifiers: usize,
    /// Number of matrix rows written
    pub rows_written: usize,
}

/// Convert a text distance matrix file into a binary store
pub fn convert_file<P, Q>(input: P, output: Q, options: &ConvertOptions) -> Result<ConversionSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let reader = BufReader::new(File::open(input)?);
    convert_from_ascii(reader, output, options)
}

/// Convert a text distance matrix read from `input` into a binary store
///
/// The first structural problem aborts the conversion with
/// `MalformedInput`. The output file is then left unfinalized and
/// cannot be opened as a store.
pub fn convert_from_ascii<R, P>(input: R, output: P, options: &ConvertOptions) -> Result<ConversionSummary>
where
    R: BufRead,
    P: AsRef<Path>,
{
    let output = output.as_ref();
    let result = convert_lines(input, output, options);

    match &result {
        Ok(summary) => info!(
            path = %output.display(),
            identifiers = summary.identifiers,
            "converted text distance matrix"
        ),
        Err(err) => warn!(path = %output.display(), error = %err, "conversion aborted"),
    }
    result
}

fn convert_lines<R: BufRead>(mut input: R, output: &Path, options: &ConvertOptions) -> Result<ConversionSummary> {
    let mut buf = Vec::new();

    if !read_line(&mut input, &mut buf)? {
        return Err(Error::malformed(1, "missing header line"));
    }
    let ids = parse_header(decode_line(&buf, 1)?)?;
    let n = ids.len();

    let mut writer = StoreWriter::create(output, &ids, &format_spec(), options.overwrite)?;

    let mut values = Vec::with_capacity(n);
    let mut rows = 0;
    let mut line_no = 1;

    while read_line(&mut input, &mut buf)? {
        line_no += 1;
        let line = decode_line(&buf, line_no)?;

        if rows == n {
            if line.trim().is_empty() {
                continue;
            }
            return Err(Error::malformed(line_no, "unexpected data after the last row"));
        }

        parse_row(line, &ids[rows], n, line_no, &mut values)?;
        writer.write_row(rows, &values)?;
        rows += 1;
    }

    if rows < n {
        return Err(Error::malformed(
            line_no + 1,
            format!("expected {n} rows, found {rows}"),
        ));
    }

    writer.finish()?;
    Ok(ConversionSummary {
        identifiers: n,
        rows_written: rows,
    })
}

/// Read the next raw line into `buf`; false at end of input
fn read_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> Result<bool> {
    buf.clear();
    Ok(input.read_until(b'\n', buf)? > 0)
}

fn decode_line(bytes: &[u8], line_no: usize) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map(trim_line_end)
        .map_err(|err| {
            Error::malformed(
                line_no,
                format!("invalid UTF-8 at byte {}", err.valid_up_to()),
            )
        })
}

fn trim_line_end(line: &str) -> &str {
    line.trim_end_matches(['\r', '\n'])
}

fn parse_header(line: &str) -> Result<Vec<String>> {
    let mut fields = trim_line_end(line).split('\t');

    match fields.next() {
        Some("") => {}
        _ => return Err(Error::malformed(1, "header must start with an empty field")),
    }

    let ids: Vec<String> = fields.map(str::to_owned).collect();
    if ids.is_empty() {
        return Err(Error::malformed(1, "header defines no identifiers"));
    }
    if let Some(column) = ids.iter().position(String::is_empty) {
        return Err(Error::malformed(
            1,
            format!("empty identifier in header column {}", column + 2),
        ));
    }
    Ok(ids)
}

fn parse_row(line: &str, expected: &str, n: usize, line_no: usize, values: &mut Vec<f64>) -> Result<()> {
    let (label, remainder) = match line.split_once('\t') {
        Some((label, remainder)) => (label, Some(remainder)),
        None => (line, None),
    };

    if label != expected {
        return Err(Error::malformed(
            line_no,
            format!("row label {label:?} does not match header identifier {expected:?}"),
        ));
    }

    values.clear();
    for token in remainder.into_iter().flat_map(|rest| rest.split('\t')) {
        if values.len() == n {
            return Err(Error::malformed(
                line_no,
                format!("expected {n} values, found more"),
            ));
        }
        let value = token.trim().parse::<f64>().map_err(|_| {
            Error::malformed(line_no, format!("non-numeric value {token:?}"))
        })?;
        values.push(value);
    }

    if values.len() != n {
        return Err(Error::malformed(
            line_no,
            format!("expected {n} values, found {}", values.len()),
        ));
    }
    Ok(())
}
