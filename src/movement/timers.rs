//! Movement domain: countdown timers driving the locomotion guards.

/// Remaining time below this is treated as expired.
const EXPIRY_EPSILON: f32 = 1e-5;

/// A single countdown. Strictly positive means armed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn arm(&mut self, seconds: f32) {
        self.remaining = seconds.max(0.0);
    }

    pub fn disarm(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Count down by `dt`, flooring at zero. Disarmed countdowns are left alone.
    pub fn tick(&mut self, dt: f32) {
        if !self.is_armed() {
            return;
        }
        self.remaining -= dt;
        if self.remaining < EXPIRY_EPSILON {
            self.remaining = 0.0;
        }
    }
}

/// Every timer the locomotion controller owns, advanced together once per tick.
#[derive(Debug, Clone, Default)]
pub struct TimerBank {
    pub jump_buffer: Countdown,
    pub turn_lock: Countdown,
    pub wall_jump_lock: Countdown,
    pub dash: Countdown,
    pub dash_cooldown: Countdown,
    pub knockback: Countdown,
}

impl TimerBank {
    pub fn tick(&mut self, dt: f32) {
        self.jump_buffer.tick(dt);
        self.turn_lock.tick(dt);
        self.wall_jump_lock.tick(dt);
        self.dash.tick(dt);
        self.dash_cooldown.tick(dt);
        self.knockback.tick(dt);
    }
}
