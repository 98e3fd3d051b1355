use {
    crate::{
        cell::{Cell, Epoch},
        table::Table,
    },
    itertools::Itertools,
    tracing::{debug, instrument},
};

pub mod epoch;

pub use epoch::{DATETIME_FORMAT, EpochUnit};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Timestamp column '{0}' does not exist")]
    MissingColumn(String),
    #[error("Column '{column}', row #{row}: expected an epoch integer, found a {found}")]
    TypeMismatch {
        column: String,
        row: usize,
        found: &'static str,
    },
    #[error("Column '{column}', row #{row}: epoch value {value} has {digits} digits, more than any supported unit")]
    EpochOverflow {
        column: String,
        row: usize,
        /// Digits as written, the value may not fit any integer type.
        value: String,
        digits: u32,
    },
    /// Not reachable through table conversion: every value of at most 19 digits fits `chrono`'s range.
    /// Only out-of-class input to [`EpochUnit::to_datetime`] can leave it.
    #[error("Column '{column}', row #{row}: {value} {unit} since the epoch is outside the representable date-time range")]
    EpochRange {
        column: String,
        row: usize,
        value: i128,
        unit: EpochUnit,
    },
}

type Result<T> = std::result::Result<T, self::Error>;

impl Table {
    /// Replaces every epoch integer in `columns` with its UTC date-time, see [`DATETIME_FORMAT`].
    ///
    /// The unit (seconds up to nanoseconds) follows from the digit count. Nulls and floats are left
    /// alone. Booleans are taken as `0`/`1` seconds, which some dumps rely on.
    ///
    /// Either every requested column is converted or, on error, the table is left untouched.
    #[instrument(skip_all, fields(columns = columns.len()))]
    pub fn convert_timestamps<S: AsRef<str>>(&mut self, columns: &[S]) -> Result<()> {
        let columns = columns
            .iter()
            .map(AsRef::<str>::as_ref)
            .unique()
            .map(|name| {
                self.column_index(name)
                    .map(|idx| (name, idx))
                    .ok_or_else(|| self::Error::MissingColumn(name.to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;

        let converted = columns
            .iter()
            .flat_map(|&(name, column)| {
                self.rows()
                    .iter()
                    .enumerate()
                    .filter_map(move |(row, cells)| cells.get(column).map(|cell| (name, row, column, cell)))
            })
            .filter_map(|(name, row, column, cell)| {
                converted_cell(name, row, cell)
                    .transpose()
                    .map(|cell| cell.map(|cell| (row, column, cell)))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(cells = converted.len(), "converted timestamps");
        converted.into_iter().for_each(|(row, column, cell)| {
            if let Some(slot) = self.cell_mut(row, column) {
                *slot = cell;
            }
        });
        Ok(())
    }
}

/// `None` when the cell stays as it is.
fn converted_cell(column: &str, row: usize, cell: &Cell) -> Result<Option<Cell>> {
    match cell.epoch() {
        Epoch::Untouched => Ok(None),
        Epoch::NotNumeric => Err(self::Error::TypeMismatch {
            column: column.to_owned(),
            row,
            found: cell.kind(),
        }),
        Epoch::WideInteger { digits } => Err(self::Error::EpochOverflow {
            column: column.to_owned(),
            row,
            value: cell.to_string(),
            digits,
        }),
        Epoch::Integer(value) => epoch::format_epoch(value)
            .map(|formatted| Some(Cell::String(formatted)))
            .map_err(|error| match error {
                epoch::Error::Overflow { value, digits } => self::Error::EpochOverflow {
                    column: column.to_owned(),
                    row,
                    value: value.to_string(),
                    digits,
                },
                epoch::Error::Range { value, unit } => self::Error::EpochRange {
                    column: column.to_owned(),
                    row,
                    value,
                    unit,
                },
            }),
    }
}
