pub mod gtfs;
pub mod stations;
