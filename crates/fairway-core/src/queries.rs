use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// The search-query list driving an ingestion run.
#[derive(Debug, Deserialize)]
pub struct QueriesFile {
    pub queries: Vec<String>,
}

/// Load and validate the query list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_queries(path: &Path) -> Result<QueriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::QueriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let queries_file: QueriesFile = serde_yaml::from_str(&content)?;

    validate_queries(&queries_file)?;

    Ok(queries_file)
}

fn validate_queries(queries_file: &QueriesFile) -> Result<(), ConfigError> {
    if queries_file.queries.is_empty() {
        return Err(ConfigError::Validation(
            "queries list must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for query in &queries_file.queries {
        if query.trim().is_empty() {
            return Err(ConfigError::Validation(
                "query must be non-empty".to_string(),
            ));
        }
        if !seen.insert(query.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate query: '{query}'"
            )));
        }
    }

    Ok(())
}
