use {
    crate::table::Table,
    std::io::Write,
    tap::{Pipe, Tap},
    tracing::instrument,
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Could not write headers")]
    WritingHeaders(#[source] csv::Error),
    #[error("Writing record #{idx}")]
    WritingRecord {
        idx: usize,
        #[source]
        source: csv::Error,
    },
    #[error("Could not convert into inner error:\n{0}")]
    IntoInner(Box<str>),
    #[error("Written CSV is not valid UTF-8")]
    Utf8(#[source] std::string::FromUtf8Error),
}

type Result<T> = std::result::Result<T, self::Error>;

/// Row terminator of every written line, header included.
pub const TERMINATOR: &str = "\r\n";

/// Every field quoted, quotes doubled, CRLF after every row.
pub fn writer_builder() -> csv::WriterBuilder {
    csv::WriterBuilder::new().tap_mut(|builder| {
        builder
            .quote_style(csv::QuoteStyle::Always)
            .double_quote(true)
            .terminator(csv::Terminator::CRLF);
    })
}

#[extension_traits::extension(pub trait CsvWriterWriteTableExt)]
impl<W: Write> csv::Writer<W> {
    /// Writes the header and every row, returns how many data rows were written.
    fn write_table(&mut self, table: &Table) -> Result<usize> {
        self.write_record(table.columns())
            .map_err(self::Error::WritingHeaders)?;
        table
            .rows()
            .iter()
            .enumerate()
            .try_for_each(|(idx, row)| {
                self.write_record(row.iter().map(|cell| cell.to_string()))
                    .map_err(|source| self::Error::WritingRecord { idx, source })
            })
            .map(|()| table.height())
    }
}

/// Serializes the table to CSV text.
///
/// A table without columns has nothing to quote, each of its lines is a bare [`TERMINATOR`].
#[instrument(skip_all, fields(columns = table.width(), rows = table.height()))]
pub fn table_to_csv(table: &Table) -> Result<String> {
    if table.width() == 0 {
        return TERMINATOR.repeat(table.height() + 1).pipe(Ok);
    }
    writer_builder()
        .from_writer(Vec::new())
        .pipe(|mut writer| {
            writer
                .write_table(table)
                .and_then(|_| {
                    writer
                        .into_inner()
                        .map_err(|e| self::Error::IntoInner(format!("{e:#?}").pipe(Box::from)))
                })
        })
        .and_then(|bytes| String::from_utf8(bytes).map_err(self::Error::Utf8))
}

#[cfg(test)]
mod tests {
    use {super::*, crate::cell::Cell};

    #[test_log::test]
    fn test_null_is_empty_field() {
        let table = Table::new(["n1", "n2"], vec![vec!["v1".into(), Cell::Null]]).unwrap();
        assert_eq!(table_to_csv(&table).unwrap(), "\"n1\",\"n2\"\r\n\"v1\",\"\"\r\n");
    }

    #[test_log::test]
    fn test_every_kind_of_cell() {
        let table = Table::new(
            ["n1", "n2", "n3", "n4", "n5", "n6"],
            vec![vec![
                "v1".into(),
                Cell::Null,
                true.into(),
                false.into(),
                1.into(),
                1.1.into(),
            ]],
        )
        .unwrap();
        assert_eq!(
            table_to_csv(&table).unwrap(),
            "\"n1\",\"n2\",\"n3\",\"n4\",\"n5\",\"n6\"\r\n\"v1\",\"\",\"True\",\"False\",\"1\",\"1.1\"\r\n"
        );
    }

    #[test_log::test]
    fn test_numbers_keep_their_written_form() {
        let wide = "1000000000000000000000000000000000000000";
        let table = Table::new(
            ["n", "f", "g"],
            vec![vec![Cell::WideInteger(wide.into()), 1e20.into(), 1e-5.into()]],
        )
        .unwrap();
        assert_eq!(
            table_to_csv(&table).unwrap(),
            format!("\"n\",\"f\",\"g\"\r\n\"{wide}\",\"1e+20\",\"1e-05\"\r\n")
        );
    }

    #[test_log::test]
    fn test_quotes_are_doubled() {
        let table = Table::new(
            ["say \"what\""],
            vec![vec!["a \"quoted\", value\nwith a newline".into()]],
        )
        .unwrap();
        assert_eq!(
            table_to_csv(&table).unwrap(),
            "\"say \"\"what\"\"\"\r\n\"a \"\"quoted\"\", value\nwith a newline\"\r\n"
        );
    }

    #[test_log::test]
    fn test_header_only() {
        let table = Table::new(["a"], vec![]).unwrap();
        assert_eq!(table_to_csv(&table).unwrap(), "\"a\"\r\n");
    }

    #[test_log::test]
    fn test_no_columns() {
        assert_eq!(table_to_csv(&Table::default()).unwrap(), "\r\n");
        let table = Table::new(Vec::<String>::new(), vec![vec![], vec![]]).unwrap();
        assert_eq!(table_to_csv(&table).unwrap(), "\r\n\r\n\r\n");
    }

    #[test_log::test]
    fn test_serializing_twice_is_identical() {
        let table = Table::new(["a", "b"], vec![vec![1.into(), "x".into()]]).unwrap();
        assert_eq!(table_to_csv(&table).unwrap(), table_to_csv(&table).unwrap());
    }

    #[test_log::test]
    fn test_writes_into_any_writer() {
        let table = Table::new(["a"], vec![vec![1.into()], vec![2.into()]]).unwrap();
        let mut writer = writer_builder().from_writer(Vec::new());
        assert_eq!(writer.write_table(&table).unwrap(), 2);
        assert_eq!(writer.into_inner().unwrap(), b"\"a\"\r\n\"1\"\r\n\"2\"\r\n");
    }
}
