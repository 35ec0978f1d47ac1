use csv::ReaderBuilder;
use std::path::Path;
use tracing::{debug, info};

use crate::error::LoadError;
use crate::table::{parse_cell, Row, Table, TRANSCRIPT};

/// Read the whole CSV at `path` into memory.
///
/// The first record is the header. Records shorter than the header are padded
/// with missing values; longer ones make the file unreadable. The `transcript`
/// column is mandatory.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Table, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let unreadable = |source: csv::Error| LoadError::Unreadable {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(unreadable)?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(str::to_string)
        .collect();
    debug!(columns = ?headers, "read header");

    if !headers.iter().any(|h| h == TRANSCRIPT) {
        return Err(LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: TRANSCRIPT.to_string(),
        });
    }

    let width = headers.len();
    let mut rows: Vec<Row> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.map_err(unreadable)?;
        if record.len() > width {
            return Err(LoadError::TooManyFields {
                path: path.to_path_buf(),
                record: idx + 1,
                expected: width,
                found: record.len(),
            });
        }

        let mut row: Row = record.iter().map(parse_cell).collect();
        row.resize(width, None);
        rows.push(row);
    }

    info!(rows = rows.len(), path = %path.display(), "loaded talk table");
    Ok(Table::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(content: &[u8]) -> Result<NamedTempFile> {
        let mut tmp = NamedTempFile::new()?;
        tmp.write_all(content)?;
        tmp.flush()?;
        Ok(tmp)
    }

    #[test]
    fn loads_quoted_multiline_transcripts() -> Result<()> {
        init_test_logging();
        let tmp = csv_file(
            b"talk_id,title,url,transcript\n\
              1,\"Hello, world\",https://t/1,\"line one\nline two\"\n\
              2,,https://t/2,NaN\n",
        )?;

        let table = load_table(tmp.path())?;
        assert_eq!(table.headers, vec!["talk_id", "title", "url", "transcript"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][1].as_deref(), Some("Hello, world"));
        assert_eq!(table.rows[0][3].as_deref(), Some("line one\nline two"));
        assert_eq!(table.rows[1][1], None);
        assert_eq!(table.rows[1][3], None);
        Ok(())
    }

    #[test]
    fn short_records_are_padded() -> Result<()> {
        let tmp = csv_file(b"talk_id,transcript,url\n7,some words\n")?;
        let table = load_table(tmp.path())?;
        assert_eq!(
            table.rows[0],
            vec![Some("7".to_string()), Some("some words".to_string()), None]
        );
        Ok(())
    }

    #[test]
    fn header_only_file_is_an_empty_table() -> Result<()> {
        let tmp = csv_file(b"talk_id,title,transcript\n")?;
        let table = load_table(tmp.path())?;
        assert!(table.is_empty());
        assert_eq!(table.headers.len(), 3);
        Ok(())
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn invalid_utf8_is_unreadable() -> Result<()> {
        let tmp = csv_file(b"talk_id,transcript\n1,caf\xe9 \xff\xfe\n")?;
        let err = load_table(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
        Ok(())
    }

    #[test]
    fn extra_fields_are_unreadable() -> Result<()> {
        let tmp = csv_file(b"talk_id,transcript\n1,words,surplus\n")?;
        let err = load_table(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TooManyFields {
                record: 1,
                expected: 2,
                found: 3,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn transcript_column_is_required() -> Result<()> {
        let tmp = csv_file(b"talk_id,title\n1,A\n")?;
        let err = load_table(tmp.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn { ref column, .. } if column == "transcript"));
        Ok(())
    }
}
