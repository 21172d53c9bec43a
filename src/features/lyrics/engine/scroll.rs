//! Auto-scroll controller
//!
//! Keeps the highlight centered in the viewport. Small drifts are followed
//! directly; a larger change of desired position starts a "jump" that eases
//! the scroll fraction through the same decile table the highlight uses.
//!
//! Any manual scroll input switches auto-scroll off until it is explicitly
//! re-enabled.

use super::easing::{EASING, EasingTable};
use super::surface::RenderSurface;
use super::types::Geometry;

/// Tuning for the scroll controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    /// Drift from the current fraction, in viewport pixels, that starts a jump
    pub threshold_px: f64,
    /// Drift from a running jump's target, in viewport pixels, that restarts it
    pub hysteresis_px: f64,
    /// Jump rate as a multiple of the single-edge highlight rate
    pub jump_speed: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            threshold_px: 3.0,
            hysteresis_px: 3.0,
            jump_speed: 2.0,
        }
    }
}

/// An eased scroll transition in progress
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jump {
    pub start: f64,
    pub target: f64,
}

/// Scroll state owned by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    auto_scroll_enabled: bool,
    current_fraction: f64,
    jump: Option<Jump>,
    recenter_pending: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            auto_scroll_enabled: true,
            current_fraction: 0.0,
            jump: None,
            recenter_pending: false,
        }
    }
}

impl ScrollState {
    pub fn auto_scroll_enabled(&self) -> bool {
        self.auto_scroll_enabled
    }

    pub fn current_fraction(&self) -> f64 {
        self.current_fraction
    }

    pub fn jump(&self) -> Option<Jump> {
        self.jump
    }

    pub fn jump_start(&self) -> Option<f64> {
        self.jump.map(|j| j.start)
    }

    pub fn jump_target(&self) -> Option<f64> {
        self.jump.map(|j| j.target)
    }
}

/// Fraction that centers `highlight` in the viewport
pub fn desired_fraction(highlight: Geometry, viewport_height: i32, content_height: i32) -> f64 {
    let fraction =
        (highlight.center_y() - viewport_height as f64 / 2.0) / content_height as f64;
    fraction.clamp(0.0, 1.0)
}

/// Advance `current` one eased step along `jump`
///
/// Returns the new fraction and whether the jump has landed.
pub fn step_jump(table: &EasingTable, jump: Jump, current: f64, speed: f64) -> (f64, bool) {
    let direction = (jump.target - current).signum();
    let total = (jump.target - jump.start).abs();
    if total == 0.0 || current == jump.target || direction != (jump.target - jump.start).signum()
    {
        return (jump.target, true);
    }

    let completion = EasingTable::completion(jump.start, current, jump.target);
    let percent = table.percent_for(completion) as f64;
    let step = (percent / 100.0) / 2.0 * speed * total;

    let next = current + direction * step;
    let passed = if direction > 0.0 {
        next >= jump.target
    } else {
        next <= jump.target
    };
    if passed {
        (jump.target, true)
    } else {
        (next, false)
    }
}

/// Auto-scroll controller
#[derive(Debug, Clone, Default)]
pub struct AutoScroll {
    config: ScrollConfig,
    state: ScrollState,
}

impl AutoScroll {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            config,
            state: ScrollState::default(),
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    /// Back to the top with auto-scroll on
    pub fn reset(&mut self) {
        self.state = ScrollState::default();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            if !self.state.auto_scroll_enabled {
                tracing::debug!("Enabling automatic scroll");
            }
            self.state.recenter_pending = true;
        } else {
            if self.state.auto_scroll_enabled {
                tracing::debug!("Cancelling automatic scroll");
            }
            self.state.jump = None;
            self.state.recenter_pending = false;
        }
        self.state.auto_scroll_enabled = enabled;
    }

    /// Manual wheel or scrollbar input
    pub fn on_manual_scroll(&mut self) {
        self.set_enabled(false);
    }

    /// Whether the next tick has work even if nothing else changed
    pub fn needs_tick(&self) -> bool {
        self.state.auto_scroll_enabled && (self.state.jump.is_some() || self.state.recenter_pending)
    }

    /// Run one tick against the current highlight geometry
    ///
    /// Returns `true` if a new fraction was pushed to the surface.
    pub fn update<S: RenderSurface + ?Sized>(
        &mut self,
        highlight: Option<Geometry>,
        surface: &mut S,
    ) -> bool {
        self.state.recenter_pending = false;

        let viewport = surface.viewport_height();
        let content = surface.total_content_height();
        if viewport <= 0 || content <= viewport || !self.state.auto_scroll_enabled {
            return false;
        }
        let Some(highlight) = highlight else {
            return false;
        };

        let desired = desired_fraction(highlight, viewport, content);
        let per_pixel = 1.0 / viewport as f64;
        let previous = self.state.current_fraction;

        let restart = match self.state.jump {
            Some(jump) => (desired - jump.target).abs() > self.config.hysteresis_px * per_pixel,
            None => (desired - previous).abs() > self.config.threshold_px * per_pixel,
        };
        if restart {
            tracing::debug!("Scroll jump {:.4} -> {:.4}", previous, desired);
            self.state.jump = Some(Jump {
                start: previous,
                target: desired,
            });
        }

        self.state.current_fraction = match self.state.jump {
            Some(jump) => {
                let (next, landed) = step_jump(&EASING, jump, previous, self.config.jump_speed);
                if landed {
                    tracing::debug!("Scroll jump landed at {:.4}", next);
                    self.state.jump = None;
                }
                next
            }
            None => desired,
        };

        if self.state.current_fraction == previous {
            return false;
        }
        surface.set_scroll(self.state.current_fraction);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::lyrics::engine::surface::testing::ScriptedSurface;

    fn scrollable() -> ScriptedSurface {
        ScriptedSurface {
            viewport_height: 100,
            content_height: 600,
            ..Default::default()
        }
    }

    fn band(y: i32) -> Geometry {
        Geometry::new(5, y, 105, y + 20)
    }

    #[test]
    fn test_desired_fraction_centers() {
        assert_eq!(desired_fraction(band(280), 100, 600), 0.4);
        assert_eq!(desired_fraction(band(0), 100, 600), 0.0);
        assert_eq!(desired_fraction(band(5000), 100, 600), 1.0);
    }

    #[test]
    fn test_step_jump_lands_exactly() {
        let jump = Jump {
            start: 0.1,
            target: 0.5,
        };
        let mut current = jump.start;
        let mut ticks = 0;
        loop {
            let (next, landed) = step_jump(&EASING, jump, current, 2.0);
            assert!(next > current);
            current = next;
            ticks += 1;
            if landed {
                break;
            }
            assert!(ticks < 60);
        }
        assert_eq!(current, 0.5);

        let (first, _) = step_jump(&EASING, jump, jump.start, 2.0);
        assert!((first - (0.1 + 0.04 * 0.4)).abs() < 1e-12);
    }

    #[test]
    fn test_step_jump_upward() {
        let jump = Jump {
            start: 0.6,
            target: 0.2,
        };
        let (next, landed) = step_jump(&EASING, jump, 0.6, 2.0);
        assert!(!landed);
        assert!(next < 0.6 && next > 0.2);
        assert_eq!(step_jump(&EASING, jump, 0.1, 2.0), (0.2, true));
    }

    #[test]
    fn test_small_drift_tracks_directly() {
        let mut scroll = AutoScroll::default();
        let mut surface = scrollable();

        // 40 + 10 - 50 = 0: already centered at the top
        assert!(!scroll.update(Some(band(40)), &mut surface));
        // one pixel of drift is under the threshold
        assert!(scroll.update(Some(band(41)), &mut surface));
        assert_eq!(scroll.state().current_fraction(), 1.0 / 600.0);
        assert_eq!(scroll.state().jump(), None);
    }

    #[test]
    fn test_large_drift_eases_through_jump() {
        let mut scroll = AutoScroll::default();
        let mut surface = scrollable();

        scroll.update(Some(band(280)), &mut surface);
        assert_eq!(scroll.state().jump_start(), Some(0.0));
        assert_eq!(scroll.state().jump_target(), Some(0.4));
        let first = scroll.state().current_fraction();
        assert!(first > 0.0 && first < 0.4);

        let mut ticks = 1;
        while scroll.state().jump().is_some() {
            scroll.update(Some(band(280)), &mut surface);
            ticks += 1;
            assert!(ticks < 60);
        }
        assert_eq!(scroll.state().current_fraction(), 0.4);
        assert_eq!(surface.scroll_calls.last(), Some(&0.4));
    }

    #[test]
    fn test_jitter_does_not_restart_jump() {
        let mut scroll = AutoScroll::default();
        let mut surface = scrollable();

        scroll.update(Some(band(280)), &mut surface);
        let jump = scroll.state().jump().unwrap();
        // Desired wobbles by a pixel around the same target
        scroll.update(Some(band(281)), &mut surface);
        scroll.update(Some(band(279)), &mut surface);
        assert_eq!(scroll.state().jump(), Some(jump));

        // A real move restarts from wherever the scroll currently is
        let before = scroll.state().current_fraction();
        scroll.update(Some(band(430)), &mut surface);
        let restarted = scroll.state().jump().unwrap();
        assert_eq!(restarted.start, before);
        assert_eq!(restarted.target, 0.65);
    }

    #[test]
    fn test_manual_scroll_freezes_fraction() {
        let mut scroll = AutoScroll::default();
        let mut surface = ScriptedSurface {
            viewport_height: 200,
            content_height: 700,
            ..Default::default()
        };

        scroll.update(Some(band(150)), &mut surface);
        let frozen = scroll.state().current_fraction();
        scroll.on_manual_scroll();
        assert!(!scroll.state().auto_scroll_enabled());
        assert_eq!(scroll.state().jump(), None);

        let calls = surface.scroll_calls.len();
        for y in [300, 400, 500] {
            assert!(!scroll.update(Some(band(y)), &mut surface));
        }
        assert_eq!(scroll.state().current_fraction(), frozen);
        assert_eq!(surface.scroll_calls.len(), calls);

        scroll.set_enabled(true);
        assert!(scroll.needs_tick());
        assert!(scroll.update(Some(band(500)), &mut surface));
        assert_ne!(scroll.state().current_fraction(), frozen);
        assert_eq!(scroll.state().jump_start(), Some(frozen));
    }

    #[test]
    fn test_inactive_when_content_fits() {
        let mut scroll = AutoScroll::default();
        let mut surface = ScriptedSurface {
            viewport_height: 600,
            content_height: 600,
            ..Default::default()
        };
        assert!(!scroll.update(Some(band(500)), &mut surface));
        assert_eq!(scroll.state().current_fraction(), 0.0);
        assert!(surface.scroll_calls.is_empty());
    }

    #[test]
    fn test_no_highlight_leaves_scroll() {
        let mut scroll = AutoScroll::default();
        let mut surface = scrollable();
        scroll.update(Some(band(41)), &mut surface);
        let fraction = scroll.state().current_fraction();
        assert!(!scroll.update(None, &mut surface));
        assert_eq!(scroll.state().current_fraction(), fraction);
    }

    #[test]
    fn test_reset() {
        let mut scroll = AutoScroll::default();
        let mut surface = scrollable();
        scroll.update(Some(band(280)), &mut surface);
        scroll.on_manual_scroll();
        scroll.reset();
        assert_eq!(scroll.state(), &ScrollState::default());
        assert!(scroll.state().auto_scroll_enabled());
    }
}
