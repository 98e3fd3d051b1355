use {
    serde_json::Value,
    tracing::{debug, instrument},
};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Line {line} (column {column}) is not valid JSON", column = .source.column())]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

type Result<T> = std::result::Result<T, self::Error>;

/// Decodes one JSON document per line. Empty lines are skipped, any invalid line fails the whole text.
///
/// `line` in the error is 1-based.
#[instrument(skip_all, fields(bytes = text.len()))]
pub fn parse_records(text: &str) -> Result<Vec<Value>> {
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Value>(line).map_err(|source| self::Error::Parse {
                line: idx + 1,
                source,
            })
        })
        .collect::<Result<Vec<_>>>()
        .inspect(|records| debug!(records = records.len(), "parsed records"))
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test_log::test]
    fn test_one_record_per_line() {
        assert_eq!(
            parse_records("{\"n1\":\"v1\",\"n2\":\"v2\"}\n{\"n3\":\"v3\"}").unwrap(),
            [json!({"n1": "v1", "n2": "v2"}), json!({"n3": "v3"})]
        );
    }

    #[test_log::test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(
            parse_records("{\"n1\":\"v1\",\"n2\":\"v2\"}\n{\"n3\":\"v3\"}\n").unwrap(),
            [json!({"n1": "v1", "n2": "v2"}), json!({"n3": "v3"})]
        );
        assert_eq!(parse_records("\n\n{\"a\":1}\n\n").unwrap(), [json!({"a": 1})]);
        assert!(parse_records("").unwrap().is_empty());
    }

    #[test_log::test]
    fn test_crlf_lines() {
        assert_eq!(parse_records("{\"a\":1}\r\n{\"a\":2}\r\n").unwrap(), [json!({"a": 1}), json!({"a": 2})]);
    }

    #[test_log::test]
    fn test_invalid_line_fails_everything() {
        let err = parse_records("{\"n1\":\"v1\"}\n{\"n1\":\"v1,\"n2\":\"v2\"}\n{\"n3\":\"v3\"}").unwrap_err();
        let Error::Parse { line, .. } = err;
        assert_eq!(line, 2);
    }

    #[test_log::test]
    fn test_whitespace_only_line_is_invalid() {
        assert!(matches!(parse_records("{}\n   \n{}"), Err(Error::Parse { line: 2, .. })));
    }

    #[test_log::test]
    fn test_field_order_is_kept() {
        let records = parse_records("{\"z\":1,\"a\":2,\"m\":3}").unwrap();
        assert_eq!(
            records[0].as_object().unwrap().keys().collect::<Vec<_>>(),
            ["z", "a", "m"]
        );
    }
}
