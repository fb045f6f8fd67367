use thiserror::Error;

/// An error that can occur when converting a GTFS stops file.
#[derive(Error, Debug)]
pub enum Error {
    /// The file has no header row
    #[error("'{0}' has no header row")]
    MissingHeader(String),
    /// Generic Input/Output error while reading or writing
    #[error("impossible to read or write data")]
    IO(#[from] std::io::Error),
    /// Impossible to open or read a file
    #[error("impossible to read '{file_name}'")]
    NamedFileIO {
        /// The file name that could not be read
        file_name: String,
        /// The inital error that caused the unability to read the file
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Impossible to read a CSV file
    #[error("impossible to read csv file '{file_name}'")]
    CSVError {
        /// File name that could not be parsed as CSV
        file_name: String,
        /// The initial error by the csv library
        #[source]
        source: csv::Error,
        /// The line that could not be parsed by the csv library
        line_in_error: Option<LineError>,
    },
    /// A coordinate field that is not a finite number
    #[error("invalid {field} '{value}' on line {line}")]
    InvalidCoordinate {
        /// Column name, `stop_lat` or `stop_lon`
        field: &'static str,
        /// The trimmed value found in the file
        value: String,
        /// Line number in the file, header being line 1
        line: u64,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Specific line from a CSV file that could not be read
#[derive(Debug)]
pub struct LineError {
    /// Headers of the CSV file
    pub headers: Vec<String>,
    /// Values of the line that could not be parsed
    pub values: Vec<String>,
}
