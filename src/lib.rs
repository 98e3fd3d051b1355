//! Flattens newline-delimited JSON analytics dumps into a CSV table.
//!
//! Text is parsed into one [`serde_json::Value`] per line ([`records`]), flattened into a [`Table`]
//! with one column per dotted key path ([`flatten_json_value`]), optionally has epoch columns rendered
//! as date-times ([`timestamp`]) and is finally written out as CSV ([`nested_csv`]).

pub mod cell;
pub mod config;
pub mod dump;
pub mod flatten_json_value;
pub mod nested_csv;
pub mod records;
pub mod table;
pub mod timestamp;

pub use {cell::Cell, config::ConvertOptions, dump::AnalyticsDump, table::Table};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Records(#[from] records::Error),
    #[error(transparent)]
    Flatten(#[from] flatten_json_value::flatten::Error),
    #[error(transparent)]
    Timestamp(#[from] timestamp::Error),
    #[error(transparent)]
    Csv(#[from] nested_csv::write::Error),
}

pub type Result<T> = std::result::Result<T, self::Error>;
