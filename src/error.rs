use thiserror::Error;

/// Errors raised while talking to the OEC API or exporting its results.
#[derive(Debug, Error)]
pub enum OecError {
    // request, bad status, or a body that isn't the expected JSON envelope
    #[error("OEC request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // never an I/O failure, those are unwrapped into `Io`
    #[error("CSV error: {0}")]
    Csv(#[source] csv::Error),

    #[error("Cannot render field '{field}' of record {record} as text: {source}")]
    Conversion {
        field: String,
        record: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Export task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, OecError>;

// a sink that fails mid-batch and one that fails at the final flush are both `Io`
impl From<csv::Error> for OecError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            if let csv::ErrorKind::Io(io) = e.into_kind() {
                return OecError::Io(io);
            }
            unreachable!("is_io_error implies ErrorKind::Io");
        }
        OecError::Csv(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_error_names_field_and_record() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = OecError::Conversion {
            field: "export_val".to_string(),
            record: 3,
            source,
        };
        let message = err.to_string();
        assert!(message.contains("'export_val'"));
        assert!(message.contains("record 3"));
    }

    #[test]
    fn csv_io_errors_become_io() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = OecError::from(csv::Error::from(io));
        match err {
            OecError::Io(io) => assert_eq!(io.to_string(), "disk full"),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn csv_format_errors_stay_csv() {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader("a,b\nc\n".as_bytes());
        let err = reader.records().find_map(|r| r.err()).unwrap();
        assert!(matches!(OecError::from(err), OecError::Csv(_)));
    }
}
