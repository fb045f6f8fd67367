use serde::Deserialize;

/// The columns of a `stops.txt` row needed to place a station.
/// https://gtfs.org/documentation/schedule/reference/#stopstxt
///
/// Absent columns deserialize to an empty string; values are kept raw
/// (untrimmed) so callers decide how to interpret them.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct StopRow {
    #[serde(default)]
    pub location_type: String,
    #[serde(default)]
    pub stop_name: String,
    #[serde(default)]
    pub stop_lat: String,
    #[serde(default)]
    pub stop_lon: String,
    /// Line the row starts on, header being line 1
    #[serde(skip)]
    pub line: u64,
}

impl StopRow {
    /// Column names `StopRow` reads from the header.
    pub const COLUMNS: [&'static str; 4] = ["location_type", "stop_name", "stop_lat", "stop_lon"];

    pub fn location_type(&self) -> Option<LocationType> {
        LocationType::from_code(&self.location_type)
    }
}

/// Location type for a stop.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum LocationType {
    StopOrPlatform,
    Station,
    EntranceExit,
    GenericNode,
    BoardingArea,
}

impl LocationType {
    /// Matches the trimmed code exactly, so `"01"` or `"1.0"` are unknown.
    pub fn from_code(code: &str) -> Option<LocationType> {
        match code.trim() {
            "0" => Some(LocationType::StopOrPlatform),
            "1" => Some(LocationType::Station),
            "2" => Some(LocationType::EntranceExit),
            "3" => Some(LocationType::GenericNode),
            "4" => Some(LocationType::BoardingArea),
            _ => None,
        }
    }
}
