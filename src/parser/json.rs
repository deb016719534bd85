use crate::error::{Result, TimetableError};
use crate::types::{Problem, SolverConfig};
use std::fs;
use std::path::Path;

/// Load a problem instance from a JSON file
pub fn load_problem(path: &Path) -> Result<Problem> {
    load_json_file(path)
}

/// Load solver settings from a TOML file, or use defaults
pub fn load_config_or_default(path: &Path) -> SolverConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => SolverConfig::default(),
        }
    } else {
        SolverConfig::default()
    }
}

/// Generic JSON file loader
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| TimetableError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TimetableError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
