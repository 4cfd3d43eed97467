//! Content domain: data-driven locomotion tuning loaded from RON.

pub mod data;
pub mod loader;
pub mod validation;

pub use data::LocomotionDef;
pub use loader::{TuningLoadError, load_locomotion_tuning, parse_locomotion};
pub use validation::{TuningValidationError, validate_tuning};

use avian2d::prelude::*;
use bevy::prelude::*;
use std::io::ErrorKind;
use std::path::Path;

use crate::movement::LocomotionTuning;

pub const LOCOMOTION_DATA_PATH: &str = "assets/data/locomotion.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_tuning);
    }
}

/// Resolve the tuning to run with: the data file if it loads and validates,
/// defaults otherwise.
pub fn resolve_tuning(path: &Path) -> LocomotionTuning {
    let loaded = match load_locomotion_tuning(path) {
        Ok(tuning) => tuning,
        Err(e) => {
            let missing = std::fs::metadata(path)
                .map_err(|io| io.kind() == ErrorKind::NotFound)
                .err()
                .unwrap_or(false);
            if missing {
                warn!("{} not found, using default locomotion tuning", path.display());
            } else {
                error!("{}", e);
            }
            return LocomotionTuning::default();
        }
    };

    let errors = validate_tuning(&loaded);
    if errors.is_empty() {
        return loaded;
    }

    for e in &errors {
        error!("{}: {}", path.display(), e);
    }
    warn!(
        "{} has {} invalid field(s), using default locomotion tuning",
        path.display(),
        errors.len()
    );
    LocomotionTuning::default()
}

fn load_tuning(mut commands: Commands) {
    let tuning = resolve_tuning(Path::new(LOCOMOTION_DATA_PATH));
    info!(
        "Locomotion tuning: speed={}, jump_force={}, max_jumps={}, dash={}u over {}s, jump height={:.2}u",
        tuning.movement_speed,
        tuning.jump_force,
        tuning.max_jumps,
        tuning.dash_distance(),
        tuning.dash_time,
        tuning.single_jump_height()
    );

    commands.insert_resource(Gravity(Vec2::NEG_Y * tuning.gravity));
    commands.insert_resource(tuning);
}
