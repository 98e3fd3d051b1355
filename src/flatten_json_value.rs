use {
    std::borrow::Cow,
    tap::Pipe,
};

/// Separates nested keys in a flattened column name.
pub const JOIN_TAG: &str = ".";
/// What a literal [`JOIN_TAG`] inside a raw key is escaped to.
pub const ESCAPED_JOIN_TAG: &str = "..";

/// Escapes every literal separator inside a single raw key.
pub fn escape_key(key: &str) -> Cow<'_, str> {
    match key.contains(JOIN_TAG) {
        true => key.replace(JOIN_TAG, ESCAPED_JOIN_TAG).pipe(Cow::Owned),
        false => Cow::Borrowed(key),
    }
}

/// A flattened column name, e.g. `custom_params.gameDuration`.
///
/// The separator is only inserted once the path is non-empty, so an empty top level key adds nothing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct KeyPath(String);

impl KeyPath {
    pub fn join(&self, key: &str) -> Self {
        let key = escape_key(key);
        match self.0.is_empty() {
            true => key.into_owned(),
            false => format!("{}{JOIN_TAG}{key}", self.0),
        }
        .pipe(KeyPath)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

pub mod flatten;
