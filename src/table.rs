//! Tab-separated candidate tables.
//!
//! The header row is always written, so an empty result still produces a
//! parseable table.
use std::io::{Read, Write};

use crate::error::Result;
use crate::record::{CandidateRecord, COLUMNS};

/// Write `records` as a TSV table; returns the number of rows written.
pub fn write_tsv<W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = CandidateRecord>,
{
    let mut w = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    w.write_record(COLUMNS)?;
    let mut n = 0usize;
    for r in records {
        w.serialize(&r)?;
        n += 1;
    }
    w.flush()?;
    Ok(n)
}

/// Parse a table produced by [`write_tsv`].
pub fn read_tsv<R: Read>(reader: R) -> Result<Vec<CandidateRecord>> {
    let mut rdr = csv::ReaderBuilder::new().delimiter(b'\t').from_reader(reader);
    let mut out = Vec::new();
    for row in rdr.deserialize() {
        out.push(row?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{find_tal_pairs, Sequence, TalenConfig};

    #[test]
    fn empty_table_still_has_header() {
        let mut buf = Vec::new();
        let n = write_tsv(&mut buf, Vec::new()).unwrap();
        assert_eq!(n, 0);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, format!("{}\n", COLUMNS.join("\t")));
        assert!(read_tsv(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn reparsed_rows_match_in_memory_records() {
        let bases = format!("{}{}{}", "T".repeat(20), "C".repeat(21), "A".repeat(20));
        let seq = Sequence::new("test_10400_T", bases.as_bytes()).unwrap();
        let cfg = TalenConfig { filter_base: Some(31), ..TalenConfig::default() };
        let records: Vec<_> = find_tal_pairs(&seq, &cfg).collect();

        let mut buf = Vec::new();
        let n = write_tsv(&mut buf, records.clone()).unwrap();
        assert_eq!(n, records.len());

        let back = read_tsv(buf.as_slice()).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn empty_annotation_columns_are_blank_cells() {
        let bases = format!("{}{}{}", "T".repeat(20), "C".repeat(21), "A".repeat(20));
        let seq = Sequence::new("s", bases.as_bytes()).unwrap();
        let cfg = TalenConfig { filter_base: Some(31), ..TalenConfig::default() };
        let mut buf = Vec::new();
        write_tsv(&mut buf, find_tal_pairs(&seq, &cfg).take(1)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let row: Vec<&str> = text.lines().nth(1).unwrap().split('\t').collect();
        assert_eq!(row.len(), COLUMNS.len());
        assert_eq!(row[0], "s");
        assert_eq!(row[8], "");
        assert_eq!(row[9], "");
        assert!(row[10].starts_with("T ") && row[10].ends_with(" A"));
        assert_eq!(row[11], "");
        assert_eq!(row[12], "");
    }
}
