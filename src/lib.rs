pub mod aggregate;
pub mod cli;
pub mod error;
pub mod group;
pub mod ingest;
pub mod model;
pub mod pairing;
pub mod report;
pub mod subtract;
