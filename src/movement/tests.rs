//! Movement domain: tests for the locomotion state machine, timers and motion.

use bevy::prelude::*;

use super::controller::{CharacterBody, LocomotionController, LocomotionMode};
use super::ledge::{LedgeClimb, LedgeLatch};
use super::motion::apply_motion;
use super::systems::collisions::mirrored;
use super::timers::{Countdown, TimerBank};
use super::{Facing, LocomotionTuning, MovementInput, SurroundingsProbe};

const DT: f32 = 0.02;

// -----------------------------------------------------------------------------
// Harness
// -----------------------------------------------------------------------------

/// Steps a controller the way the app does: decide, apply motion, integrate.
struct Sim {
    controller: LocomotionController,
    body: CharacterBody,
    markers: Vec<Vec2>,
}

impl Sim {
    fn new(tuning: LocomotionTuning) -> Self {
        Self {
            controller: LocomotionController::new(tuning),
            body: CharacterBody::default(),
            markers: Vec::new(),
        }
    }

    fn probe(&mut self, probe: SurroundingsProbe) -> &mut Self {
        self.controller.observe_surroundings(probe);
        self
    }

    fn decide(&mut self, input: MovementInput) -> &mut Self {
        self.controller
            .update(&input, &mut self.body, DT, &mut self.markers);
        self
    }

    fn step(&mut self, input: MovementInput) -> &mut Self {
        self.decide(input);
        apply_motion(&self.controller, &mut self.body, DT);
        self.body.position += self.body.velocity * DT;
        self
    }
}

fn grounded() -> SurroundingsProbe {
    SurroundingsProbe {
        grounded: true,
        ..default()
    }
}

fn airborne_at_wall() -> SurroundingsProbe {
    SurroundingsProbe {
        touching_wall: true,
        touching_ledge: true,
        ..default()
    }
}

fn idle() -> MovementInput {
    MovementInput::default()
}

fn jump_press() -> MovementInput {
    MovementInput {
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    }
}

fn dash_press() -> MovementInput {
    MovementInput {
        dash_just_pressed: true,
        ..default()
    }
}

fn axis(x: f32) -> MovementInput {
    MovementInput {
        axis: x,
        ..default()
    }
}

// -----------------------------------------------------------------------------
// Timer tests
// -----------------------------------------------------------------------------

#[test]
fn test_countdown_arms_and_expires() {
    let mut countdown = Countdown::default();
    assert!(!countdown.is_armed());

    countdown.arm(0.1);
    assert!(countdown.is_armed());

    countdown.tick(0.05);
    assert!(countdown.is_armed());
    assert!((countdown.remaining() - 0.05).abs() < 1e-6);

    countdown.tick(0.05);
    assert!(!countdown.is_armed());
    assert_eq!(countdown.remaining(), 0.0);
}

#[test]
fn test_countdown_floors_at_zero() {
    let mut countdown = Countdown::default();
    countdown.arm(0.01);
    countdown.tick(1.0);
    assert_eq!(countdown.remaining(), 0.0);

    // Disarmed timers stay at zero
    countdown.tick(1.0);
    assert_eq!(countdown.remaining(), 0.0);
}

#[test]
fn test_countdown_disarm_is_immediate() {
    let mut countdown = Countdown::default();
    countdown.arm(5.0);
    countdown.disarm();
    assert!(!countdown.is_armed());
}

#[test]
fn test_countdown_expires_despite_float_drift() {
    let mut countdown = Countdown::default();
    countdown.arm(0.2);
    for _ in 0..10 {
        countdown.tick(DT);
    }
    assert!(!countdown.is_armed());
}

#[test]
fn test_timer_bank_ticks_independently() {
    let mut bank = TimerBank::default();
    bank.jump_buffer.arm(0.15);
    bank.wall_jump_lock.arm(0.5);

    bank.tick(0.2);

    assert!(!bank.jump_buffer.is_armed());
    assert!(bank.wall_jump_lock.is_armed());
    assert!(!bank.dash.is_armed());
}

// -----------------------------------------------------------------------------
// Facing and flip
// -----------------------------------------------------------------------------

#[test]
fn test_facing_sign_and_flip() {
    assert_eq!(Facing::Right.sign(), 1.0);
    assert_eq!(Facing::Left.sign(), -1.0);
    assert_eq!(Facing::Right.flipped(), Facing::Left);
    assert_eq!(mirrored(Vec2::new(0.3, 0.7), Facing::Left), Vec2::new(-0.3, 0.7));
}

#[test]
fn test_new_controller_starts_airborne_with_full_jumps() {
    let controller = LocomotionController::new(LocomotionTuning::default());
    assert_eq!(controller.mode(), LocomotionMode::Airborne);
    assert_eq!(controller.facing(), Facing::Right);
    assert_eq!(controller.jumps_remaining(), controller.tuning().max_jumps);
}

#[test]
fn test_input_flips_facing_when_free() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(grounded()).step(axis(-1.0));
    assert_eq!(sim.controller.facing(), Facing::Left);

    sim.step(axis(1.0));
    assert_eq!(sim.controller.facing(), Facing::Right);
}

#[test]
fn test_wall_slide_blocks_flip() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.body.velocity.y = -5.0;
    sim.probe(airborne_at_wall()).step(axis(1.0));
    assert!(sim.controller.is_wall_sliding());

    // Held input away without a fresh press: still facing the wall
    sim.decide(axis(-1.0));
    assert_eq!(sim.controller.facing(), Facing::Right);
}

#[test]
fn test_turn_lock_holds_facing_when_pushing_off_wall() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(airborne_at_wall());

    sim.decide(MovementInput {
        axis: -1.0,
        horizontal_just_pressed: true,
        ..default()
    });

    assert!(sim.controller.timers().turn_lock.is_armed());
    assert_eq!(sim.controller.facing(), Facing::Right);
    assert!(!sim.controller.can_move());
    assert!(!sim.controller.can_flip());

    // Lock expires after turn_lock_time, then the flip goes through
    for _ in 0..5 {
        sim.decide(axis(-1.0));
    }
    assert!(sim.controller.can_move());
    assert_eq!(sim.controller.facing(), Facing::Left);
}

#[test]
fn test_walking_flag_tracks_horizontal_speed() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(grounded());

    sim.body.velocity.x = 0.005;
    sim.decide(idle());
    assert!(!sim.controller.is_walking());

    sim.body.velocity.x = 3.0;
    sim.decide(idle());
    assert!(sim.controller.is_walking());
}

// -----------------------------------------------------------------------------
// Jumping
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_jump_sets_jump_force_and_consumes_charge() {
    let tuning = LocomotionTuning::default();
    let jump_force = tuning.jump_force;
    let mut sim = Sim::new(tuning);
    sim.probe(grounded()).decide(idle());
    assert_eq!(sim.controller.jumps_remaining(), 1);

    sim.decide(jump_press());

    assert_eq!(sim.body.velocity.y, jump_force);
    assert_eq!(sim.controller.jumps_remaining(), 0);
}

#[test]
fn test_landing_refills_jumps() {
    let mut sim = Sim::new(LocomotionTuning {
        max_jumps: 2,
        ..default()
    });
    sim.probe(grounded()).decide(jump_press());
    sim.probe(SurroundingsProbe::default())
        .decide(jump_press());
    assert_eq!(sim.controller.jumps_remaining(), 0);

    sim.body.velocity.y = 0.0;
    sim.probe(grounded()).decide(idle());
    assert_eq!(sim.controller.jumps_remaining(), 2);
    assert_eq!(sim.controller.mode(), LocomotionMode::Grounded);
}

#[test]
fn test_rising_while_grounded_does_not_refill() {
    let mut sim = Sim::new(LocomotionTuning {
        max_jumps: 2,
        ..default()
    });
    sim.probe(grounded()).decide(jump_press());
    assert_eq!(sim.controller.jumps_remaining(), 1);

    // Probe still reports ground on the tick after takeoff
    sim.decide(MovementInput {
        jump_held: true,
        ..default()
    });
    assert_eq!(sim.controller.jumps_remaining(), 1);
}

#[test]
fn test_air_jump_uses_remaining_charge() {
    let tuning = LocomotionTuning {
        max_jumps: 2,
        ..default()
    };
    let jump_force = tuning.jump_force;
    let mut sim = Sim::new(tuning);
    sim.probe(SurroundingsProbe::default());
    sim.body.velocity.y = -3.0;

    sim.decide(jump_press());

    assert_eq!(sim.body.velocity.y, jump_force);
    assert_eq!(sim.controller.jumps_remaining(), 1);
}

#[test]
fn test_jump_buffer_fires_on_landing() {
    let tuning = LocomotionTuning::default();
    let jump_force = tuning.jump_force;
    let mut sim = Sim::new(tuning);
    sim.controller.jumps_remaining = 0;
    sim.probe(SurroundingsProbe::default());
    sim.body.velocity.y = -4.0;

    sim.decide(jump_press());
    assert!(sim.controller.timers().jump_buffer.is_armed());
    assert_eq!(sim.body.velocity.y, -4.0);

    // Land two ticks later, inside the buffer window
    sim.decide(MovementInput {
        jump_held: true,
        ..default()
    });
    sim.body.velocity.y = 0.0;
    sim.probe(grounded()).decide(MovementInput {
        jump_held: true,
        ..default()
    });

    assert_eq!(sim.body.velocity.y, jump_force);
    assert!(!sim.controller.timers().jump_buffer.is_armed());
}

#[test]
fn test_jump_buffer_expires() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.controller.jumps_remaining = 0;
    sim.probe(SurroundingsProbe::default());
    sim.body.velocity.y = -4.0;
    sim.decide(jump_press());

    for _ in 0..10 {
        sim.decide(idle());
    }
    sim.body.velocity.y = 0.0;
    sim.probe(grounded()).decide(idle());

    assert_eq!(sim.body.velocity.y, 0.0);
    assert_eq!(sim.controller.jumps_remaining(), 1);
}

#[test]
fn test_releasing_jump_cuts_ascent_once() {
    let tuning = LocomotionTuning::default();
    let jump_force = tuning.jump_force;
    let multiplier = tuning.variable_jump_height_multiplier;
    let mut sim = Sim::new(tuning);
    sim.probe(grounded()).decide(jump_press());
    sim.probe(SurroundingsProbe::default());

    sim.decide(idle());
    assert_eq!(sim.body.velocity.y, jump_force * multiplier);

    sim.decide(idle());
    assert_eq!(sim.body.velocity.y, jump_force * multiplier);
}

#[test]
fn test_release_while_falling_does_not_scale() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(grounded()).decide(jump_press());
    sim.probe(SurroundingsProbe::default());
    sim.body.velocity.y = -2.0;

    sim.decide(idle());

    assert_eq!(sim.body.velocity.y, -2.0);
}

#[test]
fn test_jump_count_stays_in_bounds() {
    let max = 3;
    let mut sim = Sim::new(LocomotionTuning {
        max_jumps: max,
        ..default()
    });
    let probes = [grounded(), SurroundingsProbe::default(), airborne_at_wall()];

    for i in 0..60 {
        sim.probe(probes[i % probes.len()]);
        let input = if i % 2 == 0 {
            jump_press()
        } else {
            axis(if i % 3 == 0 { -1.0 } else { 1.0 })
        };
        sim.step(input);
        assert!(sim.controller.jumps_remaining() <= max);
    }
}

// -----------------------------------------------------------------------------
// Wall interaction
// -----------------------------------------------------------------------------

#[test]
fn test_wall_slide_caps_descent() {
    let tuning = LocomotionTuning::default();
    let slide_speed = tuning.wall_slide_speed;
    let mut sim = Sim::new(tuning);
    sim.body.velocity.y = -12.0;

    sim.probe(airborne_at_wall()).step(axis(1.0));

    assert_eq!(sim.controller.mode(), LocomotionMode::WallSliding);
    assert_eq!(sim.body.velocity.y, -slide_speed);
}

#[test]
fn test_wall_slide_requires_descent_and_input_into_wall() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(airborne_at_wall());

    sim.body.velocity.y = 3.0;
    sim.decide(axis(1.0));
    assert_eq!(sim.controller.mode(), LocomotionMode::Airborne);

    sim.body.velocity.y = -3.0;
    sim.decide(idle());
    assert_eq!(sim.controller.mode(), LocomotionMode::Airborne);
}

#[test]
fn test_wall_jump_scenario() {
    let tuning = LocomotionTuning {
        max_jumps: 2,
        ..default()
    };
    let expected_vy = tuning.wall_jump_force * tuning.wall_jump_direction.y / tuning.mass;
    let expected_vx = -tuning.wall_jump_force * tuning.wall_jump_direction.x / tuning.mass;
    let lock_time = tuning.wall_jump_lock_time;
    let mut sim = Sim::new(tuning);
    sim.controller.jumps_remaining = 0;
    sim.body.velocity = Vec2::new(0.0, -2.0);
    sim.probe(airborne_at_wall());

    sim.decide(MovementInput {
        axis: -1.0,
        horizontal_just_pressed: true,
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    });

    assert!((sim.body.velocity.y - expected_vy).abs() < 1e-4);
    assert!((sim.body.velocity.x - expected_vx).abs() < 1e-4);
    assert_eq!(sim.controller.jumps_remaining(), 1);
    assert_eq!(sim.controller.timers().wall_jump_lock.remaining(), lock_time);
    assert_eq!(sim.controller.mode(), LocomotionMode::WallJumpLocked);
    assert_eq!(sim.controller.last_wall_jump_direction(), Facing::Left);
    // Facing is still toward the wall on the jump tick
    assert_eq!(sim.controller.facing(), Facing::Right);
}

#[test]
fn test_wall_jump_from_buffer_when_pushing_off_later() {
    let tuning = LocomotionTuning::default();
    let expected_vy = tuning.wall_jump_force * tuning.wall_jump_direction.y;
    let mut sim = Sim::new(tuning);
    sim.body.velocity.y = -5.0;
    sim.probe(airborne_at_wall()).decide(axis(1.0));
    assert!(sim.controller.is_wall_sliding());

    // Jump pressed while still holding into the wall: buffered
    sim.decide(MovementInput {
        axis: 1.0,
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    });
    assert!(sim.controller.timers().jump_buffer.is_armed());

    // Push away a tick later, inside the window
    sim.decide(MovementInput {
        axis: -1.0,
        horizontal_just_pressed: true,
        jump_held: true,
        ..default()
    });
    assert!((sim.body.velocity.y - expected_vy).abs() < 1e-4);
    assert!(!sim.controller.timers().jump_buffer.is_armed());
}

#[test]
fn test_wall_jump_always_leaves_max_minus_one() {
    let tuning = LocomotionTuning {
        max_jumps: 3,
        ..default()
    };
    let mut sim = Sim::new(tuning);
    sim.controller.jumps_remaining = 3;
    sim.probe(airborne_at_wall());

    sim.decide(MovementInput {
        axis: -1.0,
        horizontal_just_pressed: true,
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    });

    assert_eq!(sim.controller.jumps_remaining(), 2);
}

#[test]
fn test_wall_jump_cancel_zeroes_vertical_once() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(airborne_at_wall());
    sim.decide(MovementInput {
        axis: -1.0,
        horizontal_just_pressed: true,
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    });
    assert!(sim.body.velocity.y > 0.0);

    sim.probe(SurroundingsProbe::default());
    sim.decide(MovementInput {
        axis: 1.0,
        jump_held: true,
        ..default()
    });
    assert_eq!(sim.body.velocity.y, 0.0);

    sim.body.velocity.y = 4.0;
    sim.decide(MovementInput {
        axis: 1.0,
        jump_held: true,
        ..default()
    });
    assert_eq!(sim.body.velocity.y, 4.0);
}

#[test]
fn test_wall_jump_lock_expires() {
    let tuning = LocomotionTuning::default();
    let ticks = (tuning.wall_jump_lock_time / DT).ceil() as usize;
    let mut sim = Sim::new(tuning);
    sim.probe(airborne_at_wall());
    sim.decide(MovementInput {
        axis: -1.0,
        horizontal_just_pressed: true,
        jump_just_pressed: true,
        jump_held: true,
        ..default()
    });
    sim.probe(SurroundingsProbe::default());

    for _ in 0..ticks {
        sim.decide(axis(-1.0));
    }

    assert!(!sim.controller.timers().wall_jump_lock.is_armed());
    assert_eq!(sim.controller.mode(), LocomotionMode::Airborne);
}

// -----------------------------------------------------------------------------
// Ledge climbing
// -----------------------------------------------------------------------------

#[test]
fn test_ledge_latch_holds_first_anchor() {
    let mut latch = LedgeLatch::default();
    latch.observe(true, true, Vec2::new(1.0, 1.0));
    assert!(!latch.detected);

    latch.observe(true, false, Vec2::new(2.0, 3.0));
    latch.observe(true, false, Vec2::new(9.0, 9.0));
    assert!(latch.detected);
    assert_eq!(latch.anchor_bottom, Vec2::new(2.0, 3.0));

    latch.clear();
    assert!(!latch.detected);
}

#[test]
fn test_ledge_positions_facing_right() {
    let tuning = LocomotionTuning {
        wall_check_distance: 1.0,
        ledge_climb_offset_entry: Vec2::ZERO,
        ledge_climb_offset_exit: Vec2::new(0.5, 2.0),
        ..default()
    };
    let climb = LedgeClimb::from_anchor(Vec2::new(5.0, 3.7), Facing::Right, &tuning);

    assert_eq!(climb.entry, Vec2::new(6.0, 3.0));
    assert_eq!(climb.exit, Vec2::new(6.5, 5.0));
}

#[test]
fn test_ledge_positions_facing_left_round_toward_facing() {
    let tuning = LocomotionTuning {
        wall_check_distance: 0.4,
        ledge_climb_offset_entry: Vec2::new(0.3, 0.0),
        ledge_climb_offset_exit: Vec2::new(0.5, 2.0),
        ..default()
    };
    let climb = LedgeClimb::from_anchor(Vec2::new(-4.5, 2.2), Facing::Left, &tuning);

    // ceil(-4.9) = -4
    assert!((climb.entry.x - -3.7).abs() < 1e-5);
    assert_eq!(climb.entry.y, 2.0);
    assert!((climb.exit.x - -4.5).abs() < 1e-5);
    assert_eq!(climb.exit.y, 4.0);
}

#[test]
fn test_ledge_climb_snaps_until_finished() {
    let tuning = LocomotionTuning {
        wall_check_distance: 1.0,
        ledge_climb_offset_entry: Vec2::ZERO,
        ..default()
    };
    let mut sim = Sim::new(tuning);
    sim.probe(SurroundingsProbe {
        touching_wall: true,
        touching_ledge: false,
        wall_check_position: Vec2::new(5.0, 2.4),
        ..default()
    });

    sim.step(idle());
    assert!(sim.controller.is_climbing());
    assert_eq!(sim.body.position, Vec2::new(6.0, 2.0));

    for _ in 0..5 {
        sim.step(axis(-1.0));
        assert_eq!(sim.body.position, Vec2::new(6.0, 2.0));
    }

    let exit = match sim.controller.mode() {
        LocomotionMode::LedgeClimbing(climb) => climb.exit,
        other => panic!("expected ledge climb, got {:?}", other),
    };
    assert!(sim.controller.finish_ledge_climb(&mut sim.body));
    assert_eq!(sim.body.position, exit);
    assert!(!sim.controller.is_climbing());
    assert!(!sim.controller.ledge().detected);
    assert!(sim.controller.can_move());
    assert!(sim.controller.can_flip());
}

#[test]
fn test_ledge_climb_cannot_be_interrupted() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(SurroundingsProbe {
        touching_wall: true,
        touching_ledge: false,
        wall_check_position: Vec2::new(5.0, 2.0),
        ..default()
    });
    sim.step(idle());
    assert!(sim.controller.is_climbing());
    let jumps = sim.controller.jumps_remaining();

    sim.step(MovementInput {
        axis: -1.0,
        horizontal_just_pressed: true,
        jump_just_pressed: true,
        jump_held: true,
        dash_just_pressed: true,
        ..default()
    });

    assert!(sim.controller.is_climbing());
    assert!(!sim.controller.is_dashing());
    assert_eq!(sim.controller.facing(), Facing::Right);
    assert_eq!(sim.controller.jumps_remaining(), jumps);
    assert!(!sim.controller.knockback(-1.0, &mut sim.body));
}

#[test]
fn test_finish_without_climb_is_ignored() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.body.position = Vec2::new(1.0, 1.0);
    assert!(!sim.controller.finish_ledge_climb(&mut sim.body));
    assert_eq!(sim.body.position, Vec2::new(1.0, 1.0));
}

// -----------------------------------------------------------------------------
// Dashing
// -----------------------------------------------------------------------------

#[test]
fn test_dash_distance_scenario() {
    let tuning = LocomotionTuning {
        dash_speed: 20.0,
        dash_time: 0.2,
        ..default()
    };
    let mut sim = Sim::new(tuning);
    sim.probe(grounded());

    sim.step(dash_press());
    assert!(sim.controller.is_dashing());
    for _ in 0..9 {
        sim.step(idle());
        assert!(sim.controller.is_dashing());
    }

    // Evaluation 0.2s after the dash started ends it
    sim.step(idle());
    assert!(!sim.controller.is_dashing());
    assert!((sim.body.position.x - 4.0).abs() < 1e-3);
    assert_eq!(sim.body.position.y, 0.0);
    assert!(sim.controller.can_move());
    assert!(sim.controller.can_flip());
}

#[test]
fn test_dash_ends_on_wall_contact() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(grounded()).step(dash_press());
    assert!(sim.controller.is_dashing());

    sim.probe(SurroundingsProbe {
        grounded: true,
        touching_wall: true,
        touching_ledge: true,
        ..default()
    });
    sim.step(idle());

    assert!(!sim.controller.is_dashing());
    assert!(sim.controller.can_move());
}

#[test]
fn test_dash_zeroes_vertical_and_blocks_flip() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.body.velocity.y = -6.0;
    sim.probe(SurroundingsProbe::default()).step(dash_press());

    assert_eq!(sim.body.velocity.y, 0.0);
    sim.step(axis(-1.0));
    assert_eq!(sim.controller.facing(), Facing::Right);
    assert!(sim.body.velocity.x > 0.0);
}

#[test]
fn test_dash_ignores_jump() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(grounded()).step(dash_press());
    let jumps = sim.controller.jumps_remaining();

    sim.step(jump_press());

    assert!(sim.controller.is_dashing());
    assert_eq!(sim.body.velocity.y, 0.0);
    assert_eq!(sim.controller.jumps_remaining(), jumps);
}

#[test]
fn test_dash_cooldown_blocks_second_dash() {
    let tuning = LocomotionTuning {
        dash_time: 0.1,
        dash_cooldown: 1.0,
        ..default()
    };
    let mut sim = Sim::new(tuning);
    sim.probe(grounded()).step(dash_press());
    for _ in 0..6 {
        sim.step(idle());
    }
    assert!(!sim.controller.is_dashing());

    sim.step(dash_press());
    assert!(!sim.controller.is_dashing());
    assert!(sim.controller.timers().dash_cooldown.is_armed());
}

#[test]
fn test_dash_requests_spaced_after_images() {
    let tuning = LocomotionTuning {
        dash_speed: 20.0,
        dash_time: 0.2,
        distance_between_images: 0.5,
        ..default()
    };
    let mut sim = Sim::new(tuning);
    sim.probe(grounded()).step(dash_press());
    assert_eq!(sim.markers.len(), 1);
    assert_eq!(sim.markers[0], Vec2::ZERO);

    for _ in 0..10 {
        sim.step(idle());
    }

    // 0.4 units per tick over 4 units: a marker every second tick past the first
    assert!(sim.markers.len() >= 4);
    for pair in sim.markers.windows(2) {
        assert!(pair[1].x - pair[0].x > 0.5);
    }
}

// -----------------------------------------------------------------------------
// Knockback
// -----------------------------------------------------------------------------

#[test]
fn test_knockback_pushes_then_stops() {
    let tuning = LocomotionTuning::default();
    let speed = tuning.knockback_speed;
    let ticks = (tuning.knockback_duration / DT).ceil() as usize;
    let mut sim = Sim::new(tuning);
    sim.probe(grounded()).step(idle());

    assert!(sim.controller.knockback(-1.0, &mut sim.body));
    assert_eq!(sim.body.velocity, Vec2::new(-speed.x, speed.y));
    assert!(!sim.controller.can_move());
    assert!(!sim.controller.can_flip());

    sim.decide(axis(-1.0));
    assert_eq!(sim.controller.facing(), Facing::Right);
    assert!(sim.controller.is_knocked_back());

    for _ in 0..ticks {
        sim.decide(idle());
    }
    assert!(!sim.controller.is_knocked_back());
    assert_eq!(sim.body.velocity.x, 0.0);
}

#[test]
fn test_knockback_ignored_while_dashing() {
    let mut sim = Sim::new(LocomotionTuning::default());
    sim.probe(grounded()).step(dash_press());
    assert!(!sim.controller.knockback(1.0, &mut sim.body));
    assert!(sim.controller.is_dashing());
}

// -----------------------------------------------------------------------------
// Motion applier
// -----------------------------------------------------------------------------

#[test]
fn test_ground_motion_sets_target_speed() {
    let tuning = LocomotionTuning::default();
    let speed = tuning.movement_speed;
    let mut sim = Sim::new(tuning);
    sim.probe(grounded()).step(axis(1.0));
    assert_eq!(sim.body.velocity.x, speed);

    sim.step(idle());
    assert_eq!(sim.body.velocity.x, 0.0);
}

#[test]
fn test_air_motion_adds_force_and_clamps() {
    let tuning = LocomotionTuning::default();
    let speed = tuning.movement_speed;
    let force = tuning.movement_force_in_air;
    let mut sim = Sim::new(tuning);
    sim.probe(SurroundingsProbe::default()).step(axis(1.0));
    assert!((sim.body.velocity.x - force * DT).abs() < 1e-5);

    for _ in 0..100 {
        sim.step(axis(1.0));
    }
    assert_eq!(sim.body.velocity.x, speed);
}

#[test]
fn test_air_drag_without_input() {
    let tuning = LocomotionTuning::default();
    let drag = tuning.air_drag_multiplier;
    let mut sim = Sim::new(tuning);
    sim.body.velocity.x = 8.0;
    sim.probe(SurroundingsProbe::default()).step(idle());
    assert!((sim.body.velocity.x - 8.0 * drag).abs() < 1e-5);
}

#[test]
fn test_mode_guard_table() {
    assert!(LocomotionMode::Grounded.allows_flip());
    assert!(!LocomotionMode::WallSliding.allows_flip());
    assert!(LocomotionMode::WallSliding.allows_move());
    assert!(!LocomotionMode::KnockedBack.accepts_jump());
    assert!(!LocomotionMode::KnockedBack.accepts_dash());
    let climb = LedgeClimb {
        anchor_bottom: Vec2::ZERO,
        entry: Vec2::ZERO,
        exit: Vec2::ONE,
    };
    let climbing = LocomotionMode::LedgeClimbing(climb);
    assert!(!climbing.allows_flip());
    assert!(!climbing.allows_move());
    assert!(!climbing.accepts_dash());
    assert!(!climbing.accepts_knockback());
    assert_eq!(climbing.name(), "ledge-climbing");
}

#[test]
fn test_tuning_helpers() {
    let tuning = LocomotionTuning {
        dash_speed: 20.0,
        dash_time: 0.2,
        jump_force: 10.0,
        gravity: 20.0,
        wall_jump_direction: Vec2::new(3.0, 4.0),
        ..default()
    }
    .normalized();

    assert!((tuning.dash_distance() - 4.0).abs() < 1e-6);
    assert!((tuning.single_jump_height() - 2.5).abs() < 1e-6);
    assert!((tuning.wall_jump_direction - Vec2::new(0.6, 0.8)).length() < 1e-6);
}
