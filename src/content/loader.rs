//! Loader for the locomotion RON file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{LOCOMOTION_SCHEMA_VERSION, LocomotionDef};
use crate::movement::LocomotionTuning;

/// Error type for tuning loading failures.
#[derive(Debug)]
pub struct TuningLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for TuningLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a locomotion definition from RON text.
pub fn parse_locomotion(file: &str, contents: &str) -> Result<LocomotionDef, TuningLoadError> {
    let def: LocomotionDef = ron_options()
        .from_str(contents)
        .map_err(|e| TuningLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if def.schema_version != LOCOMOTION_SCHEMA_VERSION {
        return Err(TuningLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                def.schema_version, LOCOMOTION_SCHEMA_VERSION
            ),
        });
    }

    Ok(def)
}

/// Load locomotion tuning from a RON file. A missing file is an error the
/// caller may choose to treat as "use defaults".
pub fn load_locomotion_tuning(path: &Path) -> Result<LocomotionTuning, TuningLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| TuningLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_locomotion(&file_name, &contents).map(LocomotionTuning::from)
}
