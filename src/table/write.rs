use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{fs, path::Path};
use tracing::info;

use crate::table::Table;

/// Write `table` to `path` as CSV with a header row, replacing any existing file.
/// Missing values are written as empty fields.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    wtr.write_record(&table.headers)
        .with_context(|| format!("writing header to {}", path.display()))?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))
            .with_context(|| format!("writing row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!(rows = table.len(), path = %path.display(), "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::load_table;

    #[test]
    fn header_only_output_for_empty_table() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("out.csv");
        let table = Table::new(vec!["title".into(), "transcript".into()], vec![]);

        write_table(&table, &path)?;
        assert_eq!(fs::read_to_string(&path)?, "title,transcript\n");
        Ok(())
    }

    #[test]
    fn quotes_and_missing_values_survive_reload() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        let table = Table::new(
            vec!["title".into(), "transcript".into()],
            vec![
                vec![None, Some("said \"hi\", then\nleft".into())],
                vec![Some("B".into()), Some("plain".into())],
            ],
        );

        write_table(&table, &path)?;
        let reloaded = load_table(&path)?;
        assert_eq!(reloaded, table);
        Ok(())
    }

    #[test]
    fn truncates_previous_output() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("out.csv");
        fs::write(&path, "stale,content\n1,2\n3,4\n")?;

        let table = Table::new(vec!["transcript".into()], vec![vec![Some("x".into())]]);
        write_table(&table, &path)?;
        assert_eq!(fs::read_to_string(&path)?, "transcript\nx\n");
        Ok(())
    }
}
