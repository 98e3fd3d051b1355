use {
    crate::dump::AnalyticsDump,
    serde::{Deserialize, Serialize},
    tracing::instrument,
};

/// Columns converted when nothing else is asked for.
pub const DEFAULT_TIMESTAMP_COLUMNS: [&str; 2] = ["ts", "submit_time"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertOptions {
    /// Columns holding epoch integers to render as date-times. Empty means no conversion.
    pub timestamp_columns: Vec<String>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            timestamp_columns: DEFAULT_TIMESTAMP_COLUMNS.map(String::from).to_vec(),
        }
    }
}

impl ConvertOptions {
    pub fn with_timestamp_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            timestamp_columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses, flattens, converts and serializes a whole dump.
    #[instrument(skip_all, fields(timestamp_columns = ?self.timestamp_columns))]
    pub fn convert(&self, text: &str) -> crate::Result<String> {
        let mut dump = AnalyticsDump::parse(text)?;
        dump.convert_timestamps(&self.timestamp_columns)?.to_csv()
    }
}
