use std::io::Write;

use super::CountMapping;
use crate::common::{COUNT_MARKER, NO_MATCH_ID};
use crate::spike::Spike;

///////////////////////////////
/// One numeric line of the report
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportRow {
    pub id: String,
    pub sequence: String,
    pub count: u64,
}

///////////////////////////////
/// Spike counts of one file, ready for writing.
///
/// The header line comes first, then one row per spike and one row for reads
/// without a spike, by descending count and then ascending sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CountReport {
    header: Spike,
    rows: Vec<ReportRow>,
}

impl CountReport {
    pub fn from_mapping(mapping: &CountMapping) -> CountReport {
        let mut rows: Vec<ReportRow> = mapping
            .counts()
            .map(|(spike, count)| ReportRow {
                id: spike.id.clone(),
                sequence: spike.sequence.clone(),
                count,
            })
            .collect();
        rows.push(ReportRow {
            id: NO_MATCH_ID.to_string(),
            sequence: String::new(),
            count: mapping.no_match(),
        });

        // Stable, so equal (count, sequence) rows keep their order
        rows.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.sequence.cmp(&b.sequence))
        });

        CountReport {
            header: mapping.header().clone(),
            rows,
        }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn write_to<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(b',')
            // Fields are joined as is, even when they hold a comma or quote
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(writer);

        writer.write_record([
            self.header.id.as_str(),
            self.header.sequence.as_str(),
            COUNT_MARKER,
        ])?;
        for row in &self.rows {
            writer.write_record([
                row.id.as_str(),
                row.sequence.as_str(),
                row.count.to_string().as_str(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// The report as text lines, without terminators
    pub fn lines(&self) -> csv::Result<Vec<String>> {
        let mut buffer: Vec<u8> = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer)
            .lines()
            .map(|l| l.to_string())
            .collect())
    }
}
