use {
    crate::cell::Cell,
    indexmap::{IndexMap, IndexSet},
    tap::{Pipe, Tap},
};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("Column '{0}' appears more than once in the header")]
    DuplicateColumn(String),
    #[error("Row #{row} has {found} cells, the header has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

type Result<T> = std::result::Result<T, self::Error>;

/// A rectangular table: a header of unique column names and one row per record.
///
/// Every row has exactly as many cells as there are columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: IndexSet<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<C, S>(columns: C, rows: Vec<Vec<Cell>>) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).try_fold(
            IndexSet::new(),
            |columns, column: String| match columns.contains(&column) {
                true => Err(self::Error::DuplicateColumn(column)),
                false => Ok(columns.tap_mut(|columns| {
                    columns.insert(column);
                })),
            },
        )?;
        match rows.iter().position(|row| row.len() != columns.len()) {
            Some(row) => Err(self::Error::RaggedRow {
                row,
                expected: columns.len(),
                found: rows[row].len(),
            }),
            None => Ok(Self { columns, rows }),
        }
    }

    /// Turns per-column value sequences into rows. Columns shorter than `height` are padded with nulls.
    pub(crate) fn from_columns(columns: IndexMap<String, Vec<Cell>>, height: usize) -> Self {
        let header = columns.keys().cloned().collect::<IndexSet<_>>();
        let mut cells = columns
            .into_values()
            .map(Vec::into_iter)
            .collect::<Vec<_>>();
        (0..height)
            .map(|_| {
                cells
                    .iter_mut()
                    .map(|column| column.next().unwrap_or_default())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .pipe(|rows| Self {
                columns: header,
                rows,
            })
    }

    pub fn columns(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.iter().map(String::as_str)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.get_index_of(column)
    }

    /// Cells of a single column, top to bottom.
    pub fn column(&self, column: &str) -> Option<impl Iterator<Item = &Cell> + '_> {
        self.column_index(column)
            .map(|idx| self.rows.iter().filter_map(move |row| row.get(idx)))
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        self.column_index(column)
            .and_then(|idx| self.rows.get(row).and_then(|row| row.get(idx)))
    }

    pub(crate) fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|row| row.get_mut(column))
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_shape() {
        assert_eq!(
            Table::new(["n1", "n2"], vec![vec!["v1".into()]]),
            Err(Error::RaggedRow {
                row: 0,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Table::new(["n", "n"], vec![]),
            Err(Error::DuplicateColumn("n".into()))
        );
    }

    #[test]
    fn test_from_columns_pads() {
        let table = [
            ("a".to_string(), vec![Cell::from(1)]),
            ("b".to_string(), vec![Cell::Null, Cell::from("x")]),
        ]
        .into_iter()
        .collect::<IndexMap<_, _>>()
        .pipe(|columns| Table::from_columns(columns, 3));

        assert_eq!(table.columns().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(
            table.rows(),
            [
                vec![Cell::from(1), Cell::Null],
                vec![Cell::Null, Cell::from("x")],
                vec![Cell::Null, Cell::Null],
            ]
        );
        assert_eq!(table.cell(1, "b"), Some(&Cell::from("x")));
        assert_eq!(
            table.column("a").map(|c| c.cloned().collect::<Vec<_>>()),
            Some(vec![Cell::from(1), Cell::Null, Cell::Null])
        );
        assert!(table.column("c").is_none());
    }
}
