//! Record (de)serialization.
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use crate::error::Error;
use crate::record::{validate_schema, Record, EXPECTED_COLUMNS};

/// `true` if the path has a `.gz` extension.
pub fn is_gzip(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "gz")
}

/// Read every record of a CSV file, transparently decompressing `.gz` files.
///
/// Columns may appear in any order but have to be exactly `id`, `url`, `title` and `text`.
pub fn read_records(path: &Path) -> Result<Vec<Record>, Error> {
    let file = BufReader::new(File::open(path)?);
    if is_gzip(path) {
        debug!("reading {:?} as gzip", path);
        read_from(MultiGzDecoder::new(file))
    } else {
        read_from(file)
    }
}

fn read_from<R: Read>(r: R) -> Result<Vec<Record>, Error> {
    let mut reader = csv::ReaderBuilder::new().from_reader(r);

    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    validate_schema(&headers)?;

    reader
        .deserialize()
        .map(|record| record.map_err(Error::from))
        .collect()
}

/// Write records to `path`, compressing if it ends with `.gz`.
///
/// The header is always written, even with no record.
pub fn write_records(path: &Path, records: &[Record]) -> Result<(), Error> {
    let file = BufWriter::new(File::create(path)?);
    if is_gzip(path) {
        let enc = write_to(GzEncoder::new(file, Compression::default()), records)?;
        enc.finish()?.flush()?;
    } else {
        write_to(file, records)?.flush()?;
    }
    Ok(())
}

fn write_to<W: Write>(w: W, records: &[Record]) -> Result<W, Error> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(w);
    writer.write_record(EXPECTED_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_any_column_order() {
        let data = "title,id,text,url\nFoo,1,\"multi\nline, with comma\",https://id.wikipedia.org/wiki/Foo\n";
        let records = read_from(data.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![Record::new(
                1,
                "https://id.wikipedia.org/wiki/Foo",
                "Foo",
                "multi\nline, with comma"
            )]
        );
    }

    #[test]
    fn rejects_wrong_schema() {
        let data = "id,url,title\n1,u,t\n";
        assert!(matches!(read_from(data.as_bytes()), Err(Error::Schema { .. })));
    }

    #[test]
    fn empty_fields() {
        let data = "id,url,title,text\n3,u,,\n";
        let records = read_from(data.as_bytes()).unwrap();
        assert_eq!(records[0].title, "");
        assert_eq!(records[0].text, "");
    }

    #[test]
    fn header_without_records() {
        let out = write_to(Vec::new(), &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "id,url,title,text\n");
    }
}
