use {
    crate::{
        flatten_json_value::flatten::flattened_table, nested_csv::write::table_to_csv,
        records::parse_records, table::Table,
    },
    std::str::FromStr,
    tap::Pipe,
    tracing::instrument,
};

/// One analytics event dump, flattened into a [`Table`] as soon as it is parsed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyticsDump {
    table: Table,
}

impl AnalyticsDump {
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn parse(text: &str) -> crate::Result<Self> {
        parse_records(text)?
            .pipe(flattened_table)?
            .pipe(Self::from_table)
            .pipe(Ok)
    }

    pub fn from_table(table: Table) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// See [`Table::convert_timestamps`].
    pub fn convert_timestamps<S: AsRef<str>>(&mut self, columns: &[S]) -> crate::Result<&mut Self> {
        self.table.convert_timestamps(columns)?;
        Ok(self)
    }

    pub fn to_csv(&self) -> crate::Result<String> {
        table_to_csv(&self.table).map_err(Into::into)
    }
}

impl FromStr for AnalyticsDump {
    type Err = crate::Error;

    fn from_str(text: &str) -> crate::Result<Self> {
        Self::parse(text)
    }
}
