use prettytable::{format, Cell, Row, Table};
use std::io::{self, Write};

use crate::config::SHORT_TALK_THRESHOLD;
use crate::inspect::{DuplicateKey, EdaReport};

const RULE_WIDTH: usize = 50;

/// `1234567` → `"1,234,567"`.
pub fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn header_row(labels: &[&str]) -> Row {
    Row::new(labels.iter().map(|l| Cell::new(l).style_spec("bFg")).collect())
}

impl EdaReport {
    /// Write the human-readable report.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Loaded dataset. Total rows: {}",
            thousands(self.total_rows)
        )?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        writeln!(out, "MISSING DATA CHECK:")?;
        writeln!(
            out,
            "   - Missing/empty transcripts: {} ({:.2}%)",
            self.missing_transcripts,
            self.missing_transcript_pct()
        )?;
        match self.missing_titles {
            Some(n) => writeln!(out, "   - Missing titles:            {}", n)?,
            None => writeln!(out, "   - No 'title' column, title check skipped")?,
        }

        writeln!(out, "\nDUPLICATE CHECK:")?;
        match self.duplicate_key {
            DuplicateKey::Url => {
                writeln!(out, "   - Duplicate URLs found:      {}", self.duplicates)?;
            }
            DuplicateKey::Title => {
                writeln!(
                    out,
                    "   - 'url' column missing, checking duplicates by title (fallback)"
                )?;
                writeln!(out, "   - Duplicate titles found:    {}", self.duplicates)?;
            }
            DuplicateKey::None => {
                writeln!(
                    out,
                    "   - No 'url' or 'title' column, duplicate check skipped"
                )?;
            }
        }

        writeln!(out, "\nTRANSCRIPT LENGTH STATISTICS (words):")?;
        match &self.length {
            Some(stats) => {
                let mut table = Table::new();
                table.set_format(*format::consts::FORMAT_BOX_CHARS);
                table.add_row(header_row(&["Metric", "Words"]));
                for (label, value) in [
                    ("Average", stats.mean),
                    ("Median", stats.median),
                    ("Min", stats.min),
                    ("Max", stats.max),
                    ("95th percentile", stats.p95),
                ] {
                    table.add_row(Row::new(vec![
                        Cell::new(label),
                        Cell::new(&thousands(value)).style_spec("r"),
                    ]));
                }
                write!(out, "{}", table)?;
            }
            None => writeln!(out, "   - No usable transcripts")?,
        }

        writeln!(
            out,
            "\nSUSPICIOUSLY SHORT TALKS (< {} words):",
            SHORT_TALK_THRESHOLD
        )?;
        writeln!(
            out,
            "   Found {} talks that might be junk.",
            self.short_talks
        )?;
        if !self.short_examples.is_empty() {
            writeln!(out, "   Examples:")?;
            let mut table = Table::new();
            table.set_format(*format::consts::FORMAT_BOX_CHARS);
            table.add_row(header_row(&["ID", "Title", "Words", "Content"]));
            for talk in &self.short_examples {
                table.add_row(Row::new(vec![
                    Cell::new(&talk.talk_id),
                    Cell::new(&talk.title),
                    Cell::new(&talk.word_count.to_string()).style_spec("r"),
                    Cell::new(&format!("{}...", talk.preview)),
                ]));
            }
            write!(out, "{}", table)?;
        }

        writeln!(out, "\nCOST ESTIMATION (text-embedding-3-small):")?;
        writeln!(
            out,
            "   - Total words:                  {}",
            thousands(self.cost.total_words)
        )?;
        writeln!(
            out,
            "   - Total estimated tokens:       {}",
            thousands(self.cost.estimated_tokens as usize)
        )?;
        writeln!(
            out,
            "   - Estimated cost to index all:  ${:.4}",
            self.cost.estimated_cost
        )?;

        writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "RECOMMENDED ACTIONS:")?;
        if self.is_clean() {
            writeln!(out, "   Data looks clean! No special filters needed.")?;
        } else {
            for action in &self.actions {
                writeln!(out, "   [ ] {}", action.describe())?;
            }
        }
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::inspect;
    use crate::table::Table as TalkTable;

    fn rendered(report: &EdaReport) -> String {
        let mut buf = Vec::new();
        report.render(&mut buf).expect("render to memory");
        String::from_utf8(buf).expect("utf8 report")
    }

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1_000), "1,000");
        assert_eq!(thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn report_lists_every_section() {
        let table = TalkTable::new(
            vec!["talk_id".into(), "url".into(), "transcript".into()],
            vec![
                vec![Some("1".into()), Some("u".into()), Some("(Music)".into())],
                vec![Some("2".into()), Some("u".into()), None],
                vec![
                    Some("3".into()),
                    Some("v".into()),
                    Some(vec!["talk"; 120].join(" ")),
                ],
            ],
        );
        let text = rendered(&inspect(&table));

        assert!(text.contains("Total rows: 3"));
        assert!(text.contains("Missing/empty transcripts: 1 (33.33%)"));
        assert!(text.contains("Duplicate URLs found:      1"));
        assert!(text.contains("95th percentile"));
        assert!(text.contains("Found 1 talks that might be junk."));
        assert!(text.contains("(Music)..."));
        assert!(text.contains("Untitled"));
        assert!(text.contains("Total words:                  121"));
        assert!(text.contains("$0.0000"));
        assert!(text.contains("[ ] Filter rows with missing/blank transcript"));
        assert!(text.contains("[ ] Filter rows where word count < 50"));
        assert!(text.contains("[ ] Deduplicate by url"));
        assert!(!text.contains("Data looks clean"));
    }

    #[test]
    fn report_notes_title_fallback_and_clean_data() {
        let table = TalkTable::new(
            vec!["title".into(), "transcript".into()],
            vec![vec![Some("A".into()), Some(vec!["w"; 50].join(" "))]],
        );
        let text = rendered(&inspect(&table));
        assert!(text.contains("checking duplicates by title (fallback)"));
        assert!(text.contains("Duplicate titles found:    0"));
        assert!(text.contains("Data looks clean! No special filters needed."));
    }

    #[test]
    fn empty_table_renders_without_stats() {
        let table = TalkTable::new(vec!["transcript".into()], vec![]);
        let text = rendered(&inspect(&table));
        assert!(text.contains("Missing/empty transcripts: 0 (0.00%)"));
        assert!(text.contains("No usable transcripts"));
        assert!(text.contains("No 'url' or 'title' column"));
        assert!(text.contains("No 'title' column, title check skipped"));
        assert!(!text.contains("Missing titles:"));
    }
}
