use crate::gtfs::error::Error;
use crate::gtfs::reader;
use crate::gtfs::structs::{LocationType, StopRow};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Longitude (`x`) and latitude (`y`) of a station.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// Station name to coordinate, serialized as `{"coordinates": {...}}`.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct StationCoordinates {
    pub coordinates: BTreeMap<String, Coordinate>,
}

/// A row is a station when its location type is `1` and it carries a name
/// and both coordinates, all compared after trimming.
pub fn is_station(row: &StopRow) -> bool {
    row.location_type() == Some(LocationType::Station)
        && !row.stop_name.trim().is_empty()
        && !row.stop_lat.trim().is_empty()
        && !row.stop_lon.trim().is_empty()
}

/// Name and coordinate of a row accepted by [`is_station`].
pub fn extract_station(row: &StopRow) -> Result<(String, Coordinate), Error> {
    let x = parse_coordinate("stop_lon", &row.stop_lon, row.line)?;
    let y = parse_coordinate("stop_lat", &row.stop_lat, row.line)?;
    Ok((row.stop_name.trim().to_owned(), Coordinate { x, y }))
}

fn parse_coordinate(field: &'static str, raw: &str, line: u64) -> Result<f64, Error> {
    let value = raw.trim();
    match value.parse::<f64>() {
        // JSON has no representation for NaN or infinities
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::InvalidCoordinate {
            field,
            value: value.to_owned(),
            line,
        }),
    }
}

impl StationCoordinates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters and extracts `rows` in order. A later row with the same name
    /// replaces the earlier one. Stops at the first unparseable coordinate.
    pub fn from_rows(rows: &[StopRow]) -> Result<Self, Error> {
        let mut stations = StationCoordinates::new();
        let mut skipped = 0usize;
        let mut replaced = 0usize;

        for row in rows {
            if !is_station(row) {
                skipped += 1;
                continue;
            }
            let (name, coordinate) = extract_station(row)?;
            if stations.insert(name, coordinate).is_some() {
                replaced += 1;
            }
        }

        log::info!(
            "{} stations from {} rows ({} skipped, {} replaced by a later row)",
            stations.len(),
            rows.len(),
            skipped,
            replaced
        );
        Ok(stations)
    }

    /// Inserts or replaces a station, returning the previous coordinate.
    pub fn insert(&mut self, name: String, coordinate: Coordinate) -> Option<Coordinate> {
        let previous = self.coordinates.insert(name, coordinate);
        if let Some(prev) = previous {
            log::debug!(
                "Station replaced: ({}, {}) -> ({}, {})",
                prev.x,
                prev.y,
                coordinate.x,
                coordinate.y
            );
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&Coordinate> {
        self.coordinates.get(name)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Writes the document as 2-space indented JSON followed by a newline.
pub fn write_json<W>(stations: &StationCoordinates, mut writer: W) -> Result<(), Error>
where
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, stations).map_err(|e| {
        if e.is_io() {
            Error::IO(e.into())
        } else {
            Error::Json(e)
        }
    })?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads a `stops.txt` file and writes its stations as JSON to `writer`.
/// Nothing is written unless the whole file converts.
pub fn convert_file<P, W>(path: P, writer: W) -> Result<StationCoordinates, Error>
where
    P: AsRef<Path>,
    W: Write,
{
    let rows = reader::read_stops(path)?;
    let stations = StationCoordinates::from_rows(&rows)?;
    write_json(&stations, writer)?;
    Ok(stations)
}
