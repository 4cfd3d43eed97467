//! Validation of loaded locomotion tuning.

use crate::movement::LocomotionTuning;

/// A tuning value that breaks the controller's construction contract.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningValidationError {
    pub field: &'static str,
    pub value: String,
    pub requirement: &'static str,
}

impl std::fmt::Display for TuningValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tuning field '{}' = {} must be {}",
            self.field, self.value, self.requirement
        )
    }
}

/// Helper macro for checking a numeric field against a predicate
macro_rules! check_field {
    ($errors:expr, $tuning:expr, $field:ident, $pred:expr, $requirement:expr) => {
        if !($pred)($tuning.$field) {
            $errors.push(TuningValidationError {
                field: stringify!($field),
                value: format!("{:?}", $tuning.$field),
                requirement: $requirement,
            });
        }
    };
}

/// Validate a tuning set. Returns a list of errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &LocomotionTuning) -> Vec<TuningValidationError> {
    let mut errors = Vec::new();
    let positive = |v: f32| v > 0.0;
    let non_negative = |v: f32| v >= 0.0;
    let unit_interval = |v: f32| (0.0..=1.0).contains(&v);

    check_field!(errors, tuning, movement_speed, positive, "positive");
    check_field!(errors, tuning, movement_force_in_air, non_negative, "non-negative");
    check_field!(errors, tuning, air_drag_multiplier, unit_interval, "within [0, 1]");
    check_field!(errors, tuning, variable_jump_height_multiplier, unit_interval, "within [0, 1]");
    check_field!(errors, tuning, jump_force, positive, "positive");
    check_field!(errors, tuning, max_jumps, |v: u8| v > 0, "at least 1");
    check_field!(errors, tuning, jump_buffer_time, non_negative, "non-negative");
    check_field!(errors, tuning, turn_lock_time, non_negative, "non-negative");
    check_field!(errors, tuning, wall_slide_speed, non_negative, "non-negative");
    check_field!(errors, tuning, wall_jump_lock_time, non_negative, "non-negative");
    check_field!(errors, tuning, ground_check_radius, positive, "positive");
    check_field!(errors, tuning, wall_check_distance, positive, "positive");
    check_field!(errors, tuning, ledge_grid, positive, "positive");
    check_field!(errors, tuning, ledge_climb_duration, positive, "positive");
    check_field!(errors, tuning, dash_time, positive, "positive");
    check_field!(errors, tuning, dash_cooldown, non_negative, "non-negative");
    check_field!(errors, tuning, distance_between_images, positive, "positive");
    check_field!(errors, tuning, after_image_active_time, positive, "positive");
    check_field!(errors, tuning, after_image_alpha_decay, unit_interval, "within [0, 1]");
    check_field!(errors, tuning, after_image_pool_growth, |v: usize| v > 0, "at least 1");
    check_field!(errors, tuning, knockback_duration, non_negative, "non-negative");
    check_field!(errors, tuning, mass, positive, "positive");

    let direction = tuning.wall_jump_direction;
    if !direction.is_finite() || direction.length_squared() == 0.0 {
        errors.push(TuningValidationError {
            field: "wall_jump_direction",
            value: format!("{:?}", direction),
            requirement: "a non-zero vector",
        });
    }

    errors
}
