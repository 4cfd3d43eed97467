//! Movement domain: the locomotion state machine.
//!
//! The controller is engine-agnostic: each variable tick it consumes a
//! [`MovementInput`] sample, the last [`SurroundingsProbe`] reported by the
//! fixed-step sensor, and a mutable [`CharacterBody`], and decides facing,
//! jumps, wall interaction, ledge climbs and dashes in a fixed order. The
//! horizontal velocity itself is produced later by [`crate::movement::motion`].

use bevy::prelude::*;

use crate::movement::ledge::{LedgeClimb, LedgeLatch};
use crate::movement::timers::TimerBank;
use crate::movement::{
    Facing, LANDING_VELOCITY_THRESHOLD, LocomotionTuning, MovementInput, SurroundingsProbe,
    WALKING_THRESHOLD,
};

/// Position and velocity of the physical body the controller steers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CharacterBody {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl CharacterBody {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    /// Instantaneous change in momentum.
    pub fn add_impulse(&mut self, impulse: Vec2, mass: f32) {
        self.velocity += impulse / mass;
    }
}

/// Receiver for dash after-image requests.
pub trait TrailMarkers {
    fn request_marker(&mut self, position: Vec2);
}

impl TrailMarkers for Vec<Vec2> {
    fn request_marker(&mut self, position: Vec2) {
        self.push(position);
    }
}

/// Dash bookkeeping carried while the dash runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    /// X position of the last after-image requested.
    pub last_after_image_x: f32,
}

/// The single mode governing horizontal control this tick.
///
/// `Grounded`, `Airborne`, `WallSliding` and `WallJumpLocked` are re-derived
/// from the sensors every tick. The remaining modes are entered explicitly and
/// only left through their own exit condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionMode {
    Grounded,
    Airborne,
    WallSliding,
    WallJumpLocked,
    LedgeClimbing(LedgeClimb),
    Dashing(DashState),
    KnockedBack,
}

impl LocomotionMode {
    /// Modes the controller recomputes from the sensors each tick.
    pub fn is_free(&self) -> bool {
        matches!(
            self,
            LocomotionMode::Grounded
                | LocomotionMode::Airborne
                | LocomotionMode::WallSliding
                | LocomotionMode::WallJumpLocked
        )
    }

    pub fn allows_flip(&self) -> bool {
        matches!(
            self,
            LocomotionMode::Grounded | LocomotionMode::Airborne | LocomotionMode::WallJumpLocked
        )
    }

    pub fn allows_move(&self) -> bool {
        self.is_free()
    }

    pub fn accepts_jump(&self) -> bool {
        self.is_free()
    }

    pub fn accepts_dash(&self) -> bool {
        self.is_free()
    }

    pub fn accepts_knockback(&self) -> bool {
        self.is_free() || matches!(self, LocomotionMode::KnockedBack)
    }

    pub fn can_start_ledge_climb(&self) -> bool {
        self.is_free()
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocomotionMode::Grounded => "grounded",
            LocomotionMode::Airborne => "airborne",
            LocomotionMode::WallSliding => "wall-sliding",
            LocomotionMode::WallJumpLocked => "wall-jump-locked",
            LocomotionMode::LedgeClimbing(_) => "ledge-climbing",
            LocomotionMode::Dashing(_) => "dashing",
            LocomotionMode::KnockedBack => "knocked-back",
        }
    }
}

/// Per-character locomotion state, created at spawn and owned by one entity.
#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
    pub(crate) tuning: LocomotionTuning,
    pub(crate) mode: LocomotionMode,
    pub(crate) facing: Facing,
    pub(crate) movement_input: f32,
    pub(crate) jumps_remaining: u8,
    pub(crate) timers: TimerBank,
    pub(crate) last_wall_jump_direction: Facing,
    pub(crate) wall_jump_cancel_pending: bool,
    pub(crate) variable_jump_pending: bool,
    pub(crate) is_walking: bool,
    pub(crate) surroundings: SurroundingsProbe,
    pub(crate) ledge: LedgeLatch,
}

impl LocomotionController {
    pub fn new(tuning: LocomotionTuning) -> Self {
        Self {
            jumps_remaining: tuning.max_jumps,
            tuning,
            mode: LocomotionMode::Airborne,
            facing: Facing::Right,
            movement_input: 0.0,
            timers: TimerBank::default(),
            last_wall_jump_direction: Facing::Left,
            wall_jump_cancel_pending: false,
            variable_jump_pending: false,
            is_walking: false,
            surroundings: SurroundingsProbe::default(),
            ledge: LedgeLatch::default(),
        }
    }

    pub fn tuning(&self) -> &LocomotionTuning {
        &self.tuning
    }

    pub fn mode(&self) -> LocomotionMode {
        self.mode
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn movement_input(&self) -> f32 {
        self.movement_input
    }

    pub fn jumps_remaining(&self) -> u8 {
        self.jumps_remaining
    }

    pub fn timers(&self) -> &TimerBank {
        &self.timers
    }

    pub fn surroundings(&self) -> SurroundingsProbe {
        self.surroundings
    }

    pub fn ledge(&self) -> LedgeLatch {
        self.ledge
    }

    pub fn last_wall_jump_direction(&self) -> Facing {
        self.last_wall_jump_direction
    }

    pub fn is_walking(&self) -> bool {
        self.is_walking
    }

    pub fn is_grounded(&self) -> bool {
        self.surroundings.grounded
    }

    pub fn is_wall_sliding(&self) -> bool {
        matches!(self.mode, LocomotionMode::WallSliding)
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self.mode, LocomotionMode::LedgeClimbing(_))
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.mode, LocomotionMode::Dashing(_))
    }

    pub fn is_knocked_back(&self) -> bool {
        matches!(self.mode, LocomotionMode::KnockedBack)
    }

    pub fn can_flip(&self) -> bool {
        self.mode.allows_flip() && !self.timers.turn_lock.is_armed()
    }

    pub fn can_move(&self) -> bool {
        self.mode.allows_move() && !self.timers.turn_lock.is_armed()
    }

    /// Record the fixed-step probe results. Visible from the next [`update`](Self::update).
    pub fn observe_surroundings(&mut self, probe: SurroundingsProbe) {
        let was_grounded = self.surroundings.grounded;
        self.surroundings = probe;
        self.ledge.observe(
            probe.touching_wall,
            probe.touching_ledge,
            probe.wall_check_position,
        );

        if probe.grounded && !was_grounded {
            debug!("Landed: jumps_remaining={}", self.jumps_remaining);
        } else if !probe.grounded && was_grounded {
            debug!("Left ground: jumps_remaining={}", self.jumps_remaining);
        }
    }

    /// Run one variable-rate evaluation.
    pub fn update(
        &mut self,
        input: &MovementInput,
        body: &mut CharacterBody,
        dt: f32,
        markers: &mut impl TrailMarkers,
    ) {
        self.timers.tick(dt);
        self.movement_input = input.axis;
        self.check_knockback(body);

        self.check_turn_lock(input);
        self.check_movement_direction();
        self.is_walking = body.velocity.x.abs() >= WALKING_THRESHOLD;
        self.check_if_can_jump(body);
        self.check_jump(input, body);
        self.check_wall(body);
        self.check_ledge_climb(body);
        self.check_dash(input, body, markers);
    }

    /// Completion signal from the climb animation. Ignored unless climbing.
    pub fn finish_ledge_climb(&mut self, body: &mut CharacterBody) -> bool {
        let LocomotionMode::LedgeClimbing(climb) = self.mode else {
            return false;
        };

        body.position = climb.exit;
        body.velocity = Vec2::ZERO;
        self.ledge.clear();
        self.mode = LocomotionMode::Airborne;
        self.resolve_free_mode(body);
        debug!("Ledge climb finished at {:?}", climb.exit);
        true
    }

    /// Knock the character away along `direction` (sign of x). Ignored while
    /// climbing or dashing.
    pub fn knockback(&mut self, direction: f32, body: &mut CharacterBody) -> bool {
        if !self.mode.accepts_knockback() {
            return false;
        }

        let speed = self.tuning.knockback_speed;
        self.mode = LocomotionMode::KnockedBack;
        self.timers.knockback.arm(self.tuning.knockback_duration);
        body.velocity = Vec2::new(speed.x * direction.signum(), speed.y);
        debug!("Knockback: direction={}", direction.signum());
        true
    }

    fn check_knockback(&mut self, body: &mut CharacterBody) {
        if self.is_knocked_back() && !self.timers.knockback.is_armed() {
            body.velocity.x = 0.0;
            self.mode = LocomotionMode::Airborne;
            self.resolve_free_mode(body);
        }
    }

    /// Pushing away from a wall mid-air holds movement and facing briefly so a
    /// buffered wall jump still sees the wall in front.
    fn check_turn_lock(&mut self, input: &MovementInput) {
        if !self.mode.is_free() || !input.horizontal_just_pressed {
            return;
        }
        if self.surroundings.touching_wall
            && !self.surroundings.grounded
            && input.axis != self.facing.sign()
        {
            self.timers.turn_lock.arm(self.tuning.turn_lock_time);
        }
    }

    fn check_movement_direction(&mut self) {
        let wants_left = self.facing == Facing::Right && self.movement_input < 0.0;
        let wants_right = self.facing == Facing::Left && self.movement_input > 0.0;
        if (wants_left || wants_right) && self.can_flip() {
            self.facing = self.facing.flipped();
        }
    }

    fn check_if_can_jump(&mut self, body: &CharacterBody) {
        if self.surroundings.grounded && body.velocity.y <= LANDING_VELOCITY_THRESHOLD {
            self.jumps_remaining = self.tuning.max_jumps;
        }
    }

    fn can_normal_jump(&self) -> bool {
        self.jumps_remaining > 0
    }

    fn can_wall_jump(&self) -> bool {
        self.surroundings.touching_wall
    }

    fn check_jump(&mut self, input: &MovementInput, body: &mut CharacterBody) {
        if !self.mode.accepts_jump() {
            return;
        }

        if self.variable_jump_pending && (input.jump_just_released || !input.jump_held) {
            self.variable_jump_pending = false;
            if body.velocity.y > 0.0 {
                body.velocity.y *= self.tuning.variable_jump_height_multiplier;
            }
        }

        let grounded = self.surroundings.grounded;
        let touching_wall = self.surroundings.touching_wall;

        if input.jump_just_pressed {
            if grounded || (self.jumps_remaining > 0 && !touching_wall) {
                self.normal_jump(body);
            } else {
                self.timers.jump_buffer.arm(self.tuning.jump_buffer_time);
            }
        }

        if self.timers.jump_buffer.is_armed() {
            let pushing_off = self.movement_input != 0.0 && self.movement_input != self.facing.sign();
            if !grounded && touching_wall && pushing_off {
                self.wall_jump(body);
            } else if grounded {
                self.normal_jump(body);
            }
        }
    }

    fn normal_jump(&mut self, body: &mut CharacterBody) {
        if !self.can_normal_jump() {
            return;
        }

        body.velocity.y = self.tuning.jump_force;
        self.jumps_remaining -= 1;
        self.timers.jump_buffer.disarm();
        self.variable_jump_pending = true;
        debug!("Jump: jumps_remaining={}", self.jumps_remaining);
    }

    fn wall_jump(&mut self, body: &mut CharacterBody) {
        if !self.can_wall_jump() {
            return;
        }

        body.velocity.y = 0.0;
        self.mode = LocomotionMode::Airborne;
        // A wall jump always leaves exactly max_jumps - 1 charges.
        self.jumps_remaining = self.tuning.max_jumps.saturating_sub(1);

        let direction = self.tuning.wall_jump_direction;
        let force = self.tuning.wall_jump_force;
        let impulse = Vec2::new(
            force * direction.x * self.movement_input,
            force * direction.y,
        );
        body.add_impulse(impulse, self.tuning.mass);

        self.timers.jump_buffer.disarm();
        self.timers.turn_lock.disarm();
        self.timers.wall_jump_lock.arm(self.tuning.wall_jump_lock_time);
        self.variable_jump_pending = true;
        self.wall_jump_cancel_pending = true;
        self.last_wall_jump_direction = self.facing.flipped();
        debug!(
            "Wall jump: impulse={:?}, jumps_remaining={}",
            impulse, self.jumps_remaining
        );
    }

    fn check_wall(&mut self, body: &mut CharacterBody) {
        if self.timers.wall_jump_lock.is_armed() {
            let back_toward_wall = -self.last_wall_jump_direction.sign();
            if self.wall_jump_cancel_pending && self.movement_input == back_toward_wall {
                body.velocity.y = 0.0;
                self.wall_jump_cancel_pending = false;
            }
        } else {
            self.wall_jump_cancel_pending = false;
        }

        self.resolve_free_mode(body);
    }

    /// Re-derive the sensor-driven mode. Explicit modes are left untouched.
    fn resolve_free_mode(&mut self, body: &CharacterBody) {
        if !self.mode.is_free() {
            return;
        }

        let probe = self.surroundings;
        let sliding = probe.touching_wall
            && self.movement_input == self.facing.sign()
            && body.velocity.y < 0.0;

        self.mode = if probe.grounded {
            LocomotionMode::Grounded
        } else if sliding {
            LocomotionMode::WallSliding
        } else if self.timers.wall_jump_lock.is_armed() {
            LocomotionMode::WallJumpLocked
        } else {
            LocomotionMode::Airborne
        };
    }

    fn check_ledge_climb(&mut self, body: &mut CharacterBody) {
        if self.ledge.detected && self.mode.can_start_ledge_climb() {
            let climb = LedgeClimb::from_anchor(self.ledge.anchor_bottom, self.facing, &self.tuning);
            self.mode = LocomotionMode::LedgeClimbing(climb);
            debug!(
                "Ledge grabbed: anchor={:?}, entry={:?}, exit={:?}",
                climb.anchor_bottom, climb.entry, climb.exit
            );
        }

        if let LocomotionMode::LedgeClimbing(climb) = self.mode {
            body.position = climb.entry;
            body.velocity = Vec2::ZERO;
        }
    }

    fn check_dash(
        &mut self,
        input: &MovementInput,
        body: &mut CharacterBody,
        markers: &mut impl TrailMarkers,
    ) {
        if input.dash_just_pressed
            && self.mode.accepts_dash()
            && !self.timers.dash_cooldown.is_armed()
        {
            self.timers.dash.arm(self.tuning.dash_time);
            self.timers.dash_cooldown.arm(self.tuning.dash_cooldown);
            markers.request_marker(body.position);
            self.mode = LocomotionMode::Dashing(DashState {
                last_after_image_x: body.position.x,
            });
            debug!("Dash started: facing={:?}", self.facing);
        }

        let LocomotionMode::Dashing(mut dash) = self.mode else {
            return;
        };

        if !self.timers.dash.is_armed() || self.surroundings.touching_wall {
            self.timers.dash.disarm();
            self.mode = LocomotionMode::Airborne;
            self.resolve_free_mode(body);
            debug!("Dash ended at x={}", body.position.x);
            return;
        }

        body.velocity = Vec2::new(self.tuning.dash_speed * self.facing.sign(), 0.0);
        if (body.position.x - dash.last_after_image_x).abs() > self.tuning.distance_between_images {
            markers.request_marker(body.position);
            dash.last_after_image_x = body.position.x;
        }
        self.mode = LocomotionMode::Dashing(dash);
    }
}
