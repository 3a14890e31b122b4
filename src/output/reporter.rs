use super::*;
use crate::stats::{sort_stats, SortOrder};
use anyhow::Result;
use std::io::Write;
use tracing::info;

pub struct Reporter {
    format: OutputFormat,
    order: SortOrder,
}

impl Reporter {
    pub fn new(format: &str, order: &str) -> Self {
        Self {
            format: OutputFormat::from(format),
            order: SortOrder::from(order),
        }
    }

    /// Sorts the collection in place, then renders it.
    pub fn render(&self, stats: &mut [AuthorStat]) -> Result<String> {
        sort_stats(stats, self.order);

        let content: String = match self.format {
            OutputFormat::Text => stats
                .iter()
                .map(|s| format!("{}\n", render_line(s)))
                .collect(),
            OutputFormat::Json => {
                let entries: Vec<ReportEntry> = stats.iter().map(ReportEntry::from).collect();
                let mut json = serde_json::to_string_pretty(&entries)?;
                json.push('\n');
                json
            }
        };

        Ok(content)
    }

    pub fn generate_report<W: Write>(&self, stats: &mut [AuthorStat], out: &mut W) -> Result<()> {
        let content = self.render(stats)?;
        out.write_all(content.as_bytes())?;
        out.flush()?;
        info!("Reported {} authors ordered by {:?}", stats.len(), self.order);
        Ok(())
    }
}
