use std::path::PathBuf;

/// Errors raised by grid operations given coordinates outside the grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_display() {
        let err = GridError::OutOfBounds {
            row: 20,
            col: 3,
            rows: 20,
            cols: 20,
        };
        assert_eq!(err.to_string(), "cell (20, 3) is outside the 20x20 grid");
    }

    #[test]
    fn test_validation_display() {
        let err = ConfigError::Validation("rows must be between 1 and 200".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: rows must be between 1 and 200"
        );
    }
}
