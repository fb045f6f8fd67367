use crate::gtfs::error::{Error, LineError};
use crate::gtfs::structs::StopRow;

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const UTF8_BOM: [u8; 3] = [0xef, 0xbb, 0xbf];

/// Reads every row of a GTFS `stops.txt` file, in file order.
pub fn read_stops<P>(path: P) -> Result<Vec<StopRow>, Error>
where
    P: AsRef<Path>,
{
    let p = path.as_ref();
    let file_name = format!("{}", p.display());
    // The handle lives only for this call and is closed on every return path
    let file = File::open(p).map_err(|e| Error::NamedFileIO {
        file_name: file_name.clone(),
        source: Box::new(e),
    })?;
    read_stops_from(file, &file_name)
}

/// Same as [`read_stops`] for any reader; `file_name` is only used in errors.
pub fn read_stops_from<R>(reader: R, file_name: &str) -> Result<Vec<StopRow>, Error>
where
    R: Read,
{
    let (headers, objs) = read_obj::<_, StopRow>(reader, file_name)?;
    let rows: Vec<StopRow> = objs
        .into_iter()
        .map(|(line, row)| StopRow { line, ..row })
        .collect();

    let missing: Vec<&str> = StopRow::COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        log::warn!(
            "'{}' has no column {}, no row will qualify as a station",
            file_name,
            missing.join(", ")
        );
    }

    log::debug!("Read {} rows from '{}'", rows.len(), file_name);
    Ok(rows)
}

fn read_obj<T, O>(reader: T, file_name: &str) -> Result<(csv::StringRecord, Vec<(u64, O)>), Error>
where
    O: DeserializeOwned,
    T: Read,
{
    let mut reader = BufReader::new(reader);
    let has_bom = reader
        .fill_buf()
        .map_err(|e| Error::NamedFileIO {
            file_name: file_name.to_owned(),
            source: Box::new(e),
        })?
        .starts_with(&UTF8_BOM);
    if has_bom {
        reader.consume(UTF8_BOM.len());
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);
    // We store the headers to be able to return them in case of errors
    let headers = reader
        .headers()
        .map_err(|e| Error::CSVError {
            file_name: file_name.to_owned(),
            source: e,
            line_in_error: None,
        })?
        .clone()
        .into_iter()
        .map(|x| x.trim())
        .collect::<csv::StringRecord>();
    if headers.is_empty() {
        return Err(Error::MissingHeader(file_name.to_owned()));
    }
    // A repeated column keeps its last occurrence, earlier ones are blanked and ignored
    let keys = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if headers.iter().skip(i + 1).any(|later| later == h) {
                ""
            } else {
                h
            }
        })
        .collect::<csv::StringRecord>();

    let mut rec = csv::StringRecord::new();
    let mut objs = Vec::new();

    while reader.read_record(&mut rec).map_err(|e| Error::CSVError {
        file_name: file_name.to_owned(),
        source: e,
        line_in_error: None,
    })? {
        // Short rows are padded so missing trailing columns read as empty
        while rec.len() < headers.len() {
            rec.push_field("");
        }
        let obj = rec
            .deserialize(Some(&keys))
            .map_err(|e| Error::CSVError {
                file_name: file_name.to_owned(),
                source: e,
                line_in_error: Some(LineError {
                    headers: headers.iter().map(String::from).collect(),
                    values: rec.iter().map(String::from).collect(),
                }),
            })?;
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        objs.push((line, obj));
    }
    Ok((headers, objs))
}
