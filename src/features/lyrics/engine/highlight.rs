//! Highlight animation state machine
//!
//! The highlight is a rectangle that tracks the active line. A change of
//! active line is only accepted while the machine is `Idle`, so a transition
//! always runs to completion before the next one starts.
//!
//! ## Transition table
//!
//! | Target line | Highlight exists | Index change | Phase |
//! |-------------|------------------|--------------|-------|
//! | blank       | any              | any          | `Destroying` |
//! | text        | no               | any          | `Creating` |
//! | text        | yes              | `p -> p + 1` | `Moving` |
//! | text        | yes              | other        | `Teleporting` |
//!
//! `Creating`, `Moving` and `Destroying` advance each edge independently
//! through the easing table; `Teleporting` lands on the target at once.

use super::easing::{EASING, EasingTable};
use super::surface::RenderSurface;
use super::types::Geometry;
use crate::features::lyrics::parser::Timeline;

/// Highlight animation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum HighlightPhase {
    /// No transition running
    #[default]
    Idle,
    /// Growing from a one-pixel seed to the line's box
    Creating,
    /// Sliding from the previous line's box to the next line's box
    Moving,
    /// Discarded and recreated at a non-adjacent line
    Teleporting,
    /// Shrinking to nothing because the new line is blank
    Destroying,
}

impl HighlightPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, HighlightPhase::Idle)
    }
}

impl std::fmt::Display for HighlightPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HighlightPhase::Idle => "idle",
            HighlightPhase::Creating => "creating",
            HighlightPhase::Moving => "moving",
            HighlightPhase::Teleporting => "teleporting",
            HighlightPhase::Destroying => "destroying",
        };
        f.write_str(name)
    }
}

/// Pick the transition for a change of active line from `previous` to `next`
pub fn select_transition(
    previous: Option<usize>,
    next: usize,
    has_highlight: bool,
    target_blank: bool,
) -> HighlightPhase {
    if target_blank {
        HighlightPhase::Destroying
    } else if !has_highlight {
        HighlightPhase::Creating
    } else if previous.and_then(|p| p.checked_add(1)) == Some(next) {
        HighlightPhase::Moving
    } else {
        HighlightPhase::Teleporting
    }
}

/// Advance one edge a single eased step from `current` toward `target`
///
/// `origin` is where the edge started this transition. The step is
/// `table[bucket] / 100 / 2` of the total distance, rounded up and at least
/// one pixel; an edge that reaches or would pass its target locks onto it.
pub fn step_edge(table: &EasingTable, origin: i32, current: i32, target: i32) -> i32 {
    let (origin, current, target) = (origin as i64, current as i64, target as i64);
    let direction = (target - current).signum();
    if direction == 0 || direction != (target - origin).signum() {
        return target as i32;
    }

    let total = (target - origin).abs();
    let completion = EasingTable::completion(origin as f64, current as f64, target as f64);
    let percent = table.percent_for(completion) as u64;
    // percent / 100 / 2 of the total, rounded up
    let step = (percent * total as u64).div_ceil(200).max(1) as i64;

    let next = current + direction * step;
    let locked = if direction > 0 {
        next.min(target)
    } else {
        next.max(target)
    };
    locked as i32
}

/// Step every edge of `current` toward `target`
pub fn step_geometry(
    table: &EasingTable,
    origin: Geometry,
    current: Geometry,
    target: Geometry,
) -> Geometry {
    let (o, c, t) = (origin.edges(), current.edges(), target.edges());
    Geometry::from_edges(std::array::from_fn(|i| step_edge(table, o[i], c[i], t[i])))
}

/// Highlight state owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    active_line: Option<usize>,
    phase: HighlightPhase,
    /// `None` while no highlight is shown
    current: Option<Geometry>,
    origin: Geometry,
    target: Geometry,
    last_transition: Option<HighlightPhase>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any highlight and in-flight transition
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn active_line(&self) -> Option<usize> {
        self.active_line
    }

    pub fn phase(&self) -> HighlightPhase {
        self.phase
    }

    pub fn current(&self) -> Option<Geometry> {
        self.current
    }

    pub fn origin(&self) -> Geometry {
        self.origin
    }

    pub fn target(&self) -> Geometry {
        self.target
    }

    /// Phase of the most recently started transition
    pub fn last_transition(&self) -> Option<HighlightPhase> {
        self.last_transition
    }

    /// Whether an accepted line change is still animating
    pub fn is_animating(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Advance by one tick toward the line at `resolved`
    ///
    /// Returns `true` when the highlight geometry changed and needs a redraw.
    pub fn update<S: RenderSurface + ?Sized>(
        &mut self,
        resolved: usize,
        timeline: &Timeline,
        surface: &S,
    ) -> bool {
        if self.phase.is_idle() {
            if self.active_line == Some(resolved) {
                return false;
            }
            return self.begin(resolved, timeline, surface);
        }
        self.step()
    }

    fn begin<S: RenderSurface + ?Sized>(
        &mut self,
        next: usize,
        timeline: &Timeline,
        surface: &S,
    ) -> bool {
        let previous = self.active_line;
        let phase = select_transition(
            previous,
            next,
            self.current.is_some(),
            timeline.is_blank(next),
        );

        if phase == HighlightPhase::Destroying {
            self.active_line = Some(next);
            self.last_transition = Some(phase);
            tracing::debug!("Blank line {:?} -> {}, destroying", previous, next);
            let Some(current) = self.current else {
                return false;
            };
            self.origin = current;
            self.target = current.collapsed();
            self.phase = phase;
            return self.step();
        }

        let Some(target) = surface.measure_line(next) else {
            tracing::debug!("Line {} not measured yet, deferring {}", next, phase);
            return false;
        };

        tracing::debug!("Line {:?} -> {}, {}", previous, next, phase);
        self.active_line = Some(next);
        self.target = target;
        self.last_transition = Some(phase);

        match phase {
            HighlightPhase::Creating => {
                let seed = target.seed();
                self.current = Some(seed);
                self.origin = seed;
                self.phase = if seed == target {
                    HighlightPhase::Idle
                } else {
                    HighlightPhase::Creating
                };
                true
            }
            HighlightPhase::Moving => {
                self.origin = self.current.unwrap_or(target);
                self.phase = phase;
                self.step()
            }
            _ => {
                self.current = Some(target);
                self.phase = HighlightPhase::Idle;
                true
            }
        }
    }

    fn step(&mut self) -> bool {
        let Some(current) = self.current else {
            self.phase = HighlightPhase::Idle;
            return false;
        };

        let next = step_geometry(&EASING, self.origin, current, self.target);
        self.current = Some(next);

        if next == self.target {
            if self.phase == HighlightPhase::Destroying {
                self.current = None;
            }
            tracing::debug!("{} animation done", self.phase);
            self.phase = HighlightPhase::Idle;
        }
        true
    }

    /// Snap an idle highlight onto a re-measured box after a layout change
    ///
    /// Returns `Some(changed)` once handled, `None` if it must be retried.
    pub fn resnap<S: RenderSurface + ?Sized>(
        &mut self,
        timeline: &Timeline,
        surface: &S,
    ) -> Option<bool> {
        if !self.phase.is_idle() {
            return None;
        }
        let (Some(current), Some(line)) = (self.current, self.active_line) else {
            return Some(false);
        };
        if timeline.is_blank(line) {
            return Some(false);
        }
        let measured = surface.measure_line(line)?;
        if measured == current {
            return Some(false);
        }
        self.current = Some(measured);
        self.origin = measured;
        self.target = measured;
        Some(true)
    }
}
