use {
    serde_json::{Number, Value},
    std::fmt,
    tap::Pipe,
};

/// A single table cell: one flattened leaf of a record, or [`Cell::Null`] where the record had no value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Null,
    Bool(bool),
    Integer(i128),
    /// An integer too wide for `i128`, kept as the digits it was written with.
    WideInteger(String),
    Float(f64),
    String(String),
}

/// How a cell takes part in epoch timestamp conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Epoch {
    /// Interpreted as an epoch integer. Booleans count as `0`/`1`.
    Integer(i128),
    /// An integer too wide to be an epoch in any unit.
    WideInteger { digits: u32 },
    /// Left as it is (nulls and floats).
    Untouched,
    NotNumeric,
}

impl Cell {
    /// Converts a scalar json value. Returns [`None`] for arrays and objects.
    pub fn from_scalar(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(Cell::Null),
            Value::Bool(bool) => Some(Cell::Bool(bool)),
            Value::Number(number) => number.pipe_ref(Cell::from_number).pipe(Some),
            Value::String(string) => Some(Cell::String(string)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn from_number(number: &Number) -> Self {
        number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from))
            .or_else(|| number.to_string().parse::<i128>().ok())
            .map(Cell::Integer)
            .or_else(|| {
                number
                    .to_string()
                    .pipe(|text| is_integer_literal(&text).then_some(text))
                    .map(Cell::WideInteger)
            })
            .or_else(|| number.as_f64().map(Cell::Float))
            .unwrap_or_else(|| Cell::String(number.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Bool(_) => "boolean",
            Cell::Integer(_) | Cell::WideInteger(_) => "integer",
            Cell::Float(_) => "float",
            Cell::String(_) => "string",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn epoch(&self) -> Epoch {
        match self {
            Cell::Integer(value) => Epoch::Integer(*value),
            Cell::WideInteger(text) => Epoch::WideInteger {
                digits: text
                    .bytes()
                    .filter(u8::is_ascii_digit)
                    .count()
                    .pipe(u32::try_from)
                    .unwrap_or(u32::MAX),
            },
            Cell::Bool(bool) => Epoch::Integer(i128::from(*bool)),
            Cell::Null | Cell::Float(_) => Epoch::Untouched,
            Cell::String(_) => Epoch::NotNumeric,
        }
    }
}

/// The CSV field form of the cell: nulls are empty, booleans are spelled `True`/`False`.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
            Cell::Integer(value) => write!(f, "{value}"),
            Cell::WideInteger(digits) => f.write_str(digits),
            Cell::Float(value) => write_float(f, *value),
            Cell::String(value) => f.write_str(value),
        }
    }
}

/// `-` followed by digits only, no fraction and no exponent.
fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Shortest round-trip form that keeps the fractional part (`2.0`) and writes exponents
/// signed with at least two digits (`1e+20`, `1.5e-07`).
fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |digits| ("-", digits));
            write!(f, "{mantissa}e{sign}{digits:0>2}")
        }
        None => f.write_str(&repr),
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

macro_rules! integer_cell {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Cell {
                fn from(value: $ty) -> Self {
                    Cell::Integer(i128::from(value))
                }
            }
        )*
    };
}

integer_cell!(i32, i64, u32, u64, i128);

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::String(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::String(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}
