//! Per-splat transition evaluation.
//!
//! A [`TransitionTimeline`] cycles through the configured objects: each one
//! holds for `stay` seconds, then spends `transition` seconds handing over to
//! the next. Splat modifiers turn the derived [`TransitionState`] into a
//! target pose for every splat of an object.

use std::num::NonZeroUsize;

use bevy::prelude::*;

use crate::engine::assets::splat_cloud::SplatPoint;

/// Grid disassembly into hashed cells and reassembly as the next object.
pub mod assembly;

/// GLSL-compatible hash and rotation helpers.
pub mod hash;

/// Scatter into a flattened sphere and reform.
pub mod morph;

/// Camera-distance driven cell separation.
pub mod proximity;

/// Cubic smoothstep applied to linear progress. Input is clamped to [0, 1].
pub fn smoothstep_ease(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Hermite step between two edges, as GLSL `smoothstep`.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    smoothstep_ease((x - edge0) / (edge1 - edge0))
}

/// Which half of the transition window a splat is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionHalf {
    /// Current object dissolves; next object waits at its scatter pose.
    Disassembly,
    /// Next object reassembles; current object is hidden.
    Reassembly,
}

/// Derived cycle position for one clock value. Never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionState {
    pub current: usize,
    pub next: usize,
    pub in_transition: bool,
    /// Linear progress through the transition window, 0 while holding.
    pub progress: f32,
}

impl TransitionState {
    pub fn half(&self) -> TransitionHalf {
        if self.progress < 0.5 {
            TransitionHalf::Disassembly
        } else {
            TransitionHalf::Reassembly
        }
    }

    /// Linear progress through the active half, restarted at 0 for each half.
    pub fn half_progress(&self) -> f32 {
        match self.half() {
            TransitionHalf::Disassembly => self.progress / 0.5,
            TransitionHalf::Reassembly => (self.progress - 0.5) / 0.5,
        }
    }

    pub fn eased_half_progress(&self) -> f32 {
        smoothstep_ease(self.half_progress())
    }

    /// Role the object with `object_index` plays at this clock value.
    pub fn role_of(&self, object_index: usize) -> ObjectRole {
        if object_index == self.current {
            ObjectRole::Current
        } else if object_index == self.next {
            ObjectRole::Next
        } else {
            ObjectRole::Idle
        }
    }
}

/// Role of an object within the active pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectRole {
    Current,
    Next,
    Idle,
}

/// Hold/transition schedule shared by every object of an effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionTimeline {
    pub stay: f32,
    pub transition: f32,
    pub object_count: NonZeroUsize,
}

impl TransitionTimeline {
    /// Returns `None` when there are no objects to cycle through.
    pub fn new(stay: f32, transition: f32, object_count: usize) -> Option<Self> {
        Some(Self {
            stay,
            transition,
            object_count: NonZeroUsize::new(object_count)?,
        })
    }

    pub fn cycle(&self) -> f32 {
        self.stay + self.transition
    }

    pub fn total(&self) -> f32 {
        self.object_count.get() as f32 * self.cycle()
    }

    /// Active pair and progress at `global_time`. Time wraps, so any value
    /// (including negative or very large) maps into the schedule.
    pub fn state_at(&self, global_time: f32) -> TransitionState {
        let count = self.object_count.get();
        let cycle = self.cycle();
        let wrapped = global_time.rem_euclid(self.total());

        // Float rounding near the end of the schedule may land on `count`.
        let current = ((wrapped / cycle).floor() as usize).min(count - 1);
        let next = (current + 1) % count;

        let local = wrapped.rem_euclid(cycle);
        let in_transition = local > self.stay;
        let progress = if in_transition {
            ((local - self.stay) / self.transition).clamp(0.0, 1.0)
        } else {
            0.0
        };

        TransitionState {
            current,
            next,
            in_transition,
            progress,
        }
    }
}

/// Target pose for one splat. `opacity` multiplies the splat's own alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplatPose {
    pub center: Vec3,
    pub scales: Vec3,
    pub opacity: f32,
}

impl SplatPose {
    pub fn rest(splat: &SplatPoint) -> Self {
        Self {
            center: splat.center,
            scales: splat.scales,
            opacity: 1.0,
        }
    }

    pub fn hidden_at(center: Vec3, scales: Vec3) -> Self {
        Self {
            center,
            scales,
            opacity: 0.0,
        }
    }

    /// Final colour after applying the pose opacity to the splat colour.
    pub fn rgba(&self, splat: &SplatPoint) -> [f32; 4] {
        [
            splat.rgba[0],
            splat.rgba[1],
            splat.rgba[2],
            splat.rgba[3] * self.opacity,
        ]
    }
}

/// A per-splat function evaluated once per splat per frame.
pub trait SplatModifier {
    fn modify(&self, splat: &SplatPoint) -> SplatPose;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(stay: f32, transition: f32, count: usize) -> TransitionTimeline {
        TransitionTimeline::new(stay, transition, count).unwrap()
    }

    #[test]
    fn active_pair_is_consecutive_for_all_times() {
        for count in 1..=4 {
            let timeline = timeline(2.0, 4.0, count);
            let mut t = -13.0;
            while t < 100.0 {
                let state = timeline.state_at(t);
                assert!(state.current < count);
                assert_eq!(state.next, (state.current + 1) % count);
                t += 0.173;
            }
        }
    }

    #[test]
    fn single_object_is_its_own_successor() {
        let state = timeline(1.0, 1.0, 1).state_at(1.5);
        assert_eq!(state.current, 0);
        assert_eq!(state.next, 0);
        assert!(state.in_transition);
    }

    #[test]
    fn zero_objects_has_no_timeline() {
        assert!(TransitionTimeline::new(2.0, 4.0, 0).is_none());
    }

    #[test]
    fn holds_then_transitions() {
        let timeline = timeline(2.0, 4.0, 2);

        let hold = timeline.state_at(1.0);
        assert_eq!(hold.current, 0);
        assert!(!hold.in_transition);
        assert_eq!(hold.progress, 0.0);

        let mid = timeline.state_at(4.0);
        assert!(mid.in_transition);
        assert!((mid.progress - 0.5).abs() < 1e-6);

        let second = timeline.state_at(7.0);
        assert_eq!(second.current, 1);
        assert_eq!(second.next, 0);

        let wrapped = timeline.state_at(13.0);
        assert_eq!(wrapped.current, 0);
    }

    #[test]
    fn stay_boundary_is_still_holding() {
        let state = timeline(2.0, 4.0, 2).state_at(2.0);
        assert!(!state.in_transition);
    }

    #[test]
    fn ease_hits_endpoints_exactly() {
        assert_eq!(smoothstep_ease(0.0), 0.0);
        assert_eq!(smoothstep_ease(1.0), 1.0);
        assert_eq!(smoothstep_ease(-3.0), 0.0);
        assert_eq!(smoothstep_ease(7.0), 1.0);
        assert!((smoothstep_ease(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn ease_is_monotonic_and_symmetric() {
        let mut previous = 0.0;
        for i in 0..=1000 {
            let x = i as f32 / 1000.0;
            let y = smoothstep_ease(x);
            assert!(y >= previous);
            assert!((y + smoothstep_ease(1.0 - x) - 1.0).abs() < 1e-5);
            previous = y;
        }
    }

    #[test]
    fn eased_progress_is_monotonic_within_window() {
        let timeline = timeline(2.0, 4.0, 3);
        let mut previous = 0.0;
        for step in 0..400 {
            let t = 2.0 + step as f32 * 0.01;
            let eased = smoothstep_ease(timeline.state_at(t).progress);
            assert!(eased >= previous);
            previous = eased;
        }
        assert!(smoothstep_ease(timeline.state_at(5.9999).progress) > 0.99);
    }

    #[test]
    fn halves_restart_progress() {
        let timeline = timeline(2.0, 4.0, 2);

        let early = timeline.state_at(3.0);
        assert_eq!(early.half(), TransitionHalf::Disassembly);
        assert!((early.half_progress() - 0.5).abs() < 1e-6);

        let late = timeline.state_at(5.0);
        assert_eq!(late.half(), TransitionHalf::Reassembly);
        assert!((late.half_progress() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn roles_cover_every_object_once() {
        let state = timeline(1.0, 1.0, 3).state_at(1.5);
        assert_eq!(state.role_of(0), ObjectRole::Current);
        assert_eq!(state.role_of(1), ObjectRole::Next);
        assert_eq!(state.role_of(2), ObjectRole::Idle);
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(2.8, 7.0, 1.0), 0.0);
        assert_eq!(smoothstep(2.8, 7.0, 9.0), 1.0);
    }
}
