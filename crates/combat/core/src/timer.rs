//! Countdown primitives.
//!
//! Every delay in the simulation (dodge, stagger, attack swing, hit flash,
//! combo grace) is a countdown advanced once per tick. Nothing blocks or
//! suspends, so the state machine can be stepped and tested directly.

/// A single countdown measured in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    duration: f32,
    remaining: f32,
}

impl Countdown {
    /// An idle countdown.
    pub const IDLE: Self = Self {
        duration: 0.0,
        remaining: 0.0,
    };

    /// Starts (or restarts) the countdown.
    pub fn start(&mut self, duration: f32) {
        self.duration = duration.max(0.0);
        self.remaining = self.duration;
    }

    /// Abandons the countdown without firing.
    pub fn cancel(&mut self) {
        self.remaining = 0.0;
    }

    /// Advances by `dt`; returns `true` exactly on the tick it reaches zero.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Seconds since the countdown was last started.
    pub fn elapsed(&self) -> f32 {
        self.duration - self.remaining
    }
}

/// Which timer fired during [`TimerSet::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpiredTimers {
    pub dodge: bool,
    pub dodge_cooldown: bool,
    pub attack: bool,
    pub stopping: bool,
    pub stagger: bool,
    pub hit_flash: bool,
    pub combo_grace: bool,
    pub attack_cooldown: bool,
}

/// The countdowns owned by one actor.
///
/// The boss only uses a subset (stagger, attack, attack cooldown, hit flash);
/// unused countdowns simply stay idle.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimerSet {
    pub dodge: Countdown,
    pub dodge_cooldown: Countdown,
    pub attack: Countdown,
    pub attack_cooldown: Countdown,
    pub stopping: Countdown,
    pub stagger: Countdown,
    pub hit_flash: Countdown,
    pub combo_grace: Countdown,
}

impl TimerSet {
    pub fn advance(&mut self, dt: f32) -> ExpiredTimers {
        ExpiredTimers {
            dodge: self.dodge.advance(dt),
            dodge_cooldown: self.dodge_cooldown.advance(dt),
            attack: self.attack.advance(dt),
            stopping: self.stopping.advance(dt),
            stagger: self.stagger.advance(dt),
            hit_flash: self.hit_flash.advance(dt),
            combo_grace: self.combo_grace.advance(dt),
            attack_cooldown: self.attack_cooldown.advance(dt),
        }
    }

    /// Drops every in-progress action timer. Used when stagger or death
    /// preempts whatever the actor was doing.
    pub fn cancel_actions(&mut self) {
        self.dodge.cancel();
        self.attack.cancel();
        self.stopping.cancel();
        self.combo_grace.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_on_expiry() {
        let mut timer = Countdown::IDLE;
        timer.start(0.5);

        assert!(!timer.advance(0.25));
        assert!(timer.advance(0.25));
        assert!(!timer.advance(0.25));
        assert!(!timer.is_running());
    }

    #[test]
    fn overshoot_clamps_to_zero() {
        let mut timer = Countdown::IDLE;
        timer.start(0.1);
        assert!(timer.advance(1.0));
        assert_eq!(timer.remaining(), 0.0);
        assert_eq!(timer.elapsed(), 0.1);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = Countdown::IDLE;
        timer.start(1.0);
        timer.cancel();
        assert!(!timer.advance(2.0));
    }

    #[test]
    fn cancel_actions_keeps_cooldowns() {
        let mut timers = TimerSet::default();
        timers.attack.start(1.0);
        timers.dodge_cooldown.start(1.0);
        timers.cancel_actions();

        assert!(!timers.attack.is_running());
        assert!(timers.dodge_cooldown.is_running());
    }
}
