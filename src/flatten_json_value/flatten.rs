use {
    super::KeyPath,
    crate::{cell::Cell, table::Table},
    indexmap::IndexMap,
    serde_json::Value,
    std::cmp::Ordering,
    tap::Pipe,
    tracing::{debug, instrument, trace},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Arrays cannot be flattened: key '{path}' in record #{record}")]
    ArrayLeaf { path: String, record: usize },
}

type Result<T> = std::result::Result<T, self::Error>;

/// Column name -> one slot per record, filled in traversal order.
type Columns = IndexMap<String, Vec<Cell>>;

/// Flattens every record into one wide table.
///
/// Columns appear in the order their key path was first seen. A record missing a key gets
/// [`Cell::Null`] in that column. Any array leaf fails the whole batch.
#[instrument(skip_all, fields(records = records.len()))]
pub fn flattened_table(records: Vec<Value>) -> Result<Table> {
    let height = records.len();
    records
        .into_iter()
        .enumerate()
        .try_fold(Columns::new(), |mut columns, (record, value)| {
            flatten_into(&mut columns, record, KeyPath::default(), value).map(|()| columns)
        })
        .map(|columns| {
            debug!(columns = columns.len(), "flattened records");
            Table::from_columns(columns, height)
        })
}

fn flatten_into(columns: &mut Columns, record: usize, path: KeyPath, value: Value) -> Result<()> {
    match value {
        Value::Object(map) => map
            .into_iter()
            .try_for_each(|(key, value)| flatten_into(columns, record, path.join(&key), value)),
        leaf => match Cell::from_scalar(leaf) {
            Some(cell) => columns
                .entry(path.into_string())
                .or_default()
                .pipe(|column| place(column, record, cell))
                .pipe(Ok),
            None => Err(self::Error::ArrayLeaf {
                path: path.into_string(),
                record,
            }),
        },
    }
}

/// Writes `cell` into slot `record`, null-padding any records that skipped this column.
fn place(column: &mut Vec<Cell>, record: usize, cell: Cell) {
    match column.len().cmp(&record) {
        Ordering::Less => {
            column.resize(record, Cell::Null);
            column.push(cell);
        }
        Ordering::Equal => column.push(cell),
        Ordering::Greater => {
            trace!(record, "key path written twice, keeping the later value");
            if let Some(slot) = column.get_mut(record) {
                *slot = cell;
            }
        }
    }
}
