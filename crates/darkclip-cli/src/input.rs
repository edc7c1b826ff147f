//! Query input from the command line or a script file.

use std::path::Path;

use darkclip_models::FactScript;

use crate::error::{CliError, CliResult};

/// Load the visual queries from a script JSON file (its `keywords` array).
pub fn queries_from_script_file(path: &Path) -> CliResult<Vec<String>> {
    let json = std::fs::read_to_string(path)?;
    let script = FactScript::from_json(&json)
        .map_err(|e| CliError::invalid_script(path, e.to_string()))?;
    let queries = script.queries();
    if queries.is_empty() {
        return Err(CliError::invalid_script(path, "no keywords"));
    }
    Ok(queries)
}

/// Queries from positional arguments, or from `script` when given.
pub fn resolve_queries(args: &[String], script: Option<&Path>) -> CliResult<Vec<String>> {
    if let Some(path) = script {
        return queries_from_script_file(path);
    }

    let queries: Vec<String> = args
        .iter()
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty())
        .collect();

    if queries.is_empty() {
        Err(CliError::NoQueries)
    } else {
        Ok(queries)
    }
}
