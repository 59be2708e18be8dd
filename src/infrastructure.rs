pub mod cors;
pub mod db;
pub mod telemetry;
pub mod utils;
