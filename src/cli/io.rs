//! Output handling for CLI
//!
//! - Query results: one JSON object per line on stdout
//! - Reports and plan trees: plain text on stdout
//! - Logs never go to stdout

use std::io::{self, BufWriter, Write};

use crate::record::Record;

use super::errors::CliResult;

/// Write records as NDJSON to `writer`, returning how many were written.
///
/// Timestamp fields are written in RFC 3339 (see `Record::to_json`).
pub fn write_records_to<'a, W, I>(writer: &mut W, records: I) -> CliResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut count = 0;
    for record in records {
        serde_json::to_writer(&mut *writer, &record.to_json())?;
        writer.write_all(b"\n")?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Write records as NDJSON to stdout
pub fn write_records<'a, I>(records: I) -> CliResult<usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_records_to(&mut writer, records)
}

/// Write a block of text to stdout
pub fn write_text(text: &str) -> CliResult<()> {
    let mut stdout = io::stdout();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_records_ndjson() {
        let records = vec![
            Record::new().with("id", 1).with("name", "lamp"),
            Record::new().with("id", 2),
        ];
        let mut buffer = Vec::new();

        let count = write_records_to(&mut buffer, &records).unwrap();

        assert_eq!(count, 2);
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec![r#"{"id":1,"name":"lamp"}"#, r#"{"id":2}"#]);
    }

    #[test]
    fn test_write_records_rfc3339_timestamps() {
        let ts = crate::record::parse_timestamp("2019-08-12 15:22:04 +0900").unwrap();
        let records = vec![Record::new().with("created_at", ts)];
        let mut buffer = Vec::new();

        write_records_to(&mut buffer, &records).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "{\"created_at\":\"2019-08-12T15:22:04+09:00\"}\n"
        );
    }

    #[test]
    fn test_write_no_records() {
        let mut buffer = Vec::new();
        let count = write_records_to(&mut buffer, std::iter::empty::<&Record>()).unwrap();
        assert_eq!(count, 0);
        assert!(buffer.is_empty());
    }
}
