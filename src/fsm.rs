//! Small state container used for the player's movement state.

use std::mem;

/// Tracks a current state, the state it replaced, and how long the current
/// state has been held. Deciding *when* to switch is up to the caller.
#[derive(Debug, Clone)]
pub struct StateMachine<S> {
    state: S,
    previous: S,
    elapsed: f32,
    entered: bool,
}

impl<S: Clone> StateMachine<S> {
    /// `just_entered()` is true until the first `tick`.
    pub fn new(initial: S) -> Self {
        Self {
            previous: initial.clone(),
            state: initial,
            elapsed: 0.0,
            entered: true,
        }
    }

    /// Switch to `next` when its variant differs from the current one.
    /// Returns `true` if a transition happened.
    pub fn go(&mut self, next: S) -> bool {
        if mem::discriminant(&self.state) == mem::discriminant(&next) {
            return false;
        }
        self.force_go(next);
        true
    }

    /// Switch unconditionally, restarting the timer even for the same variant.
    pub fn force_go(&mut self, next: S) {
        self.previous = mem::replace(&mut self.state, next);
        self.elapsed = 0.0;
        self.entered = true;
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
        self.entered = false;
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn previous(&self) -> &S {
        &self.previous
    }

    /// Seconds spent in the current state.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn just_entered(&self) -> bool {
        self.entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Gait {
        Still,
        Walking,
    }

    #[test]
    fn test_go_ignores_same_variant() {
        let mut fsm = StateMachine::new(Gait::Still);
        fsm.tick(0.5);
        assert!(!fsm.go(Gait::Still));
        assert_eq!(fsm.elapsed(), 0.5);
        assert!(!fsm.just_entered());
    }

    #[test]
    fn test_go_records_previous_and_resets_timer() {
        let mut fsm = StateMachine::new(Gait::Still);
        fsm.tick(1.0);
        assert!(fsm.go(Gait::Walking));
        assert_eq!(*fsm.state(), Gait::Walking);
        assert_eq!(*fsm.previous(), Gait::Still);
        assert_eq!(fsm.elapsed(), 0.0);
        assert!(fsm.just_entered());
        fsm.tick(0.25);
        assert!(!fsm.just_entered());
    }

    #[test]
    fn test_force_go_restarts_same_variant() {
        let mut fsm = StateMachine::new(Gait::Walking);
        fsm.tick(2.0);
        fsm.force_go(Gait::Walking);
        assert_eq!(fsm.elapsed(), 0.0);
    }
}
