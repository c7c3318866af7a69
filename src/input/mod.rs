//! Tick-stamped input state with level and edge queries.
//!
//! Every input code maps to a signed tick stamp:
//!
//! - **positive** `n`: went down during tick `n`
//! - **negative** `-n`: went up during tick `n`
//! - **absent**: never touched
//!
//! Event handlers only write stamps and the tick body only reads them, so the
//! two never contend. A press recorded during tick `N` reads as "pushed" during
//! tick `N + 1`, the first tick whose callback runs after the event.

pub mod codes;

use std::cell::OnceCell;
use std::collections::HashMap;

pub use codes::*;

/// Tick value before the first `on_tick`. Starting above zero keeps events
/// that arrive before the first frame distinguishable from "released".
const FIRST_TICK: u64 = 1;

/// One active touch point in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Touch {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug)]
pub struct InputTracker {
    tick: u64,
    keys: HashMap<String, i64>,
    buttons: HashMap<MouseButton, i64>,
    mouse_x: i32,
    mouse_y: i32,
    /// Latest points written by the touch handler
    touch_points: Vec<Touch>,
    /// Per-tick snapshot of `touch_points`, taken on first query
    touch_cache: OnceCell<Vec<Touch>>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            tick: FIRST_TICK,
            keys: HashMap::new(),
            buttons: HashMap::new(),
            mouse_x: 0,
            mouse_y: 0,
            touch_points: Vec::new(),
            touch_cache: OnceCell::new(),
        }
    }

    /// Advance to the next tick and drop per-tick caches.
    ///
    /// Called exactly once per scheduler iteration, before the user callback.
    pub fn on_tick(&mut self) {
        self.tick += 1;
        self.touch_cache = OnceCell::new();
    }

    /// Current tick counter
    pub fn tick(&self) -> u64 {
        self.tick
    }

    #[inline]
    fn stamp(&self) -> i64 {
        self.tick as i64
    }

    #[inline]
    fn previous(&self) -> i64 {
        self.stamp() - 1
    }

    // === Event side ===

    /// Key went down. Auto-repeat keeps the original stamp; any other
    /// keydown re-stamps, so a key stuck after a lost keyup can be pushed again.
    pub fn press_key(&mut self, code: &str, repeat: bool) {
        if repeat {
            return;
        }
        let stamp = self.stamp();
        self.keys.insert(code.to_string(), stamp);
    }

    pub fn release_key(&mut self, code: &str) {
        let stamp = -self.stamp();
        self.keys.insert(code.to_string(), stamp);
    }

    pub fn press_button(&mut self, button: MouseButton) {
        let stamp = self.stamp();
        self.buttons.insert(button, stamp);
    }

    pub fn release_button(&mut self, button: MouseButton) {
        let stamp = -self.stamp();
        self.buttons.insert(button, stamp);
    }

    pub fn move_mouse(&mut self, x: i32, y: i32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Replace the active touch points (touchstart/move/end/cancel)
    pub fn set_touches(&mut self, points: Vec<Touch>) {
        self.touch_points = points;
    }

    // === Query side ===

    pub fn is_key_down(&self, code: &str) -> bool {
        self.keys.get(code).is_some_and(|&s| s > 0)
    }

    pub fn is_key_pushed(&self, code: &str) -> bool {
        self.keys.get(code) == Some(&self.previous())
    }

    pub fn is_key_released(&self, code: &str) -> bool {
        self.keys.get(code) == Some(&-self.previous())
    }

    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.buttons.get(&button).is_some_and(|&s| s > 0)
    }

    pub fn is_mouse_pushed(&self, button: MouseButton) -> bool {
        self.buttons.get(&button) == Some(&self.previous())
    }

    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.buttons.get(&button) == Some(&-self.previous())
    }

    /// Tri-state axis from two opposing keys; both held cancel out.
    pub fn axis(&self, negative: &str, positive: &str) -> i32 {
        let mut value = 0;
        if self.is_key_down(positive) {
            value += 1;
        }
        if self.is_key_down(negative) {
            value -= 1;
        }
        value
    }

    /// Left/right arrows as -1, 0, +1
    pub fn axis_x(&self) -> i32 {
        self.axis(K_LEFT, K_RIGHT)
    }

    /// Up/down arrows as -1, 0, +1 (down is positive, screen space)
    pub fn axis_y(&self) -> i32 {
        self.axis(K_UP, K_DOWN)
    }

    /// Codes of every key currently held, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut held: Vec<&str> = self
            .keys
            .iter()
            .filter(|(_, s)| **s > 0)
            .map(|(code, _)| code.as_str())
            .collect();
        held.sort_unstable();
        held
    }

    pub fn mouse_x(&self) -> i32 {
        self.mouse_x
    }

    pub fn mouse_y(&self) -> i32 {
        self.mouse_y
    }

    /// Touch points as of the first query this tick
    pub fn touches(&self) -> &[Touch] {
        self.touch_cache.get_or_init(|| self.touch_points.clone())
    }

    pub fn touch_count(&self) -> usize {
        self.touches().len()
    }

    /// Position of the first touch, if any
    pub fn touch_pos(&self) -> Option<(i32, i32)> {
        self.touches().first().map(|t| (t.x, t.y))
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pushed_only_on_following_tick() {
        let mut input = InputTracker::new();
        input.on_tick();
        let n = input.tick();
        input.press_key(K_SPACE, false);
        assert!(!input.is_key_pushed(K_SPACE), "not pushed during tick N");

        input.on_tick();
        assert_eq!(input.tick(), n + 1);
        assert!(input.is_key_pushed(K_SPACE), "pushed during tick N+1");

        input.on_tick();
        assert!(!input.is_key_pushed(K_SPACE), "no longer pushed at N+2");
        assert!(input.is_key_down(K_SPACE));
    }

    #[test]
    fn test_held_across_ticks() {
        let mut input = InputTracker::new();
        input.on_tick();
        assert!(!input.is_key_down(K_A), "not down before press");
        input.press_key(K_A, false);
        for _ in 0..5 {
            input.on_tick();
            assert!(input.is_key_down(K_A));
        }
        input.release_key(K_A);
        assert!(!input.is_key_down(K_A));
    }

    #[test]
    fn test_released_only_on_following_tick() {
        let mut input = InputTracker::new();
        input.press_key(K_A, false);
        input.on_tick();
        input.release_key(K_A);
        assert!(!input.is_key_released(K_A));
        input.on_tick();
        assert!(input.is_key_released(K_A));
        input.on_tick();
        assert!(!input.is_key_released(K_A));
    }

    #[test]
    fn test_repeat_does_not_restamp() {
        let mut input = InputTracker::new();
        input.press_key(K_A, false);
        input.on_tick();
        input.on_tick();
        // Auto-repeat two ticks later must not look like a fresh press
        input.press_key(K_A, true);
        input.on_tick();
        assert!(!input.is_key_pushed(K_A));
        assert!(input.is_key_down(K_A));
    }

    #[test]
    fn test_stuck_key_can_be_pushed_again() {
        let mut input = InputTracker::new();
        input.press_key(K_A, false);
        input.on_tick();
        input.on_tick();
        // keyup was lost (focus change); the next real keydown is a new press
        input.press_key(K_A, false);
        input.on_tick();
        assert!(input.is_key_pushed(K_A));
        assert!(input.is_key_down(K_A));
    }

    #[test]
    fn test_press_before_first_tick_is_seen_on_first_frame() {
        let mut input = InputTracker::new();
        input.press_key(K_RETURN, false);
        input.on_tick();
        assert!(input.is_key_down(K_RETURN));
        assert!(input.is_key_pushed(K_RETURN));
    }

    #[test]
    fn test_axis_both_held_cancels() {
        let mut input = InputTracker::new();
        input.press_key(K_LEFT, false);
        assert_eq!(input.axis_x(), -1);
        input.press_key(K_RIGHT, false);
        assert_eq!(input.axis_x(), 0);
        input.release_key(K_LEFT);
        assert_eq!(input.axis_x(), 1);

        input.press_key(K_DOWN, false);
        assert_eq!(input.axis_y(), 1);
        input.press_key(K_UP, false);
        assert_eq!(input.axis_y(), 0);
    }

    #[test]
    fn test_mouse_edges() {
        let mut input = InputTracker::new();
        input.on_tick();
        input.press_button(M_LBUTTON);
        input.move_mouse(10, 20);
        input.on_tick();
        assert!(input.is_mouse_down(M_LBUTTON));
        assert!(input.is_mouse_pushed(M_LBUTTON));
        assert!(!input.is_mouse_down(M_RBUTTON));
        assert_eq!((input.mouse_x(), input.mouse_y()), (10, 20));

        input.release_button(M_LBUTTON);
        input.on_tick();
        assert!(input.is_mouse_released(M_LBUTTON));
        assert!(!input.is_mouse_down(M_LBUTTON));
    }

    #[test]
    fn test_keys_lists_held_sorted() {
        let mut input = InputTracker::new();
        input.press_key(K_Z, false);
        input.press_key(K_A, false);
        input.press_key(K_B, false);
        input.release_key(K_B);
        assert_eq!(input.keys(), vec![K_A, K_Z]);
    }

    #[test]
    fn test_touch_snapshot_stable_within_tick() {
        let mut input = InputTracker::new();
        input.set_touches(vec![Touch { x: 1, y: 2 }]);
        input.on_tick();
        assert_eq!(input.touch_pos(), Some((1, 2)));

        // Handler fires mid-tick: snapshot holds until the next tick
        input.set_touches(vec![Touch { x: 5, y: 6 }, Touch { x: 7, y: 8 }]);
        assert_eq!(input.touch_count(), 1);

        input.on_tick();
        assert_eq!(input.touch_count(), 2);
        assert_eq!(input.touch_pos(), Some((5, 6)));
    }

    #[test]
    fn test_unknown_code_is_neutral() {
        let input = InputTracker::new();
        assert!(!input.is_key_down("F13"));
        assert!(!input.is_key_pushed("F13"));
        assert!(!input.is_key_released("F13"));
        assert_eq!(input.touch_pos(), None);
    }
}
