// Copyright 2025 the Timegrid Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration.
//!
//! The adapter owns a single [`Recognition`] value. Because only one variant
//! can be active, a drag and a pinch can never run at the same time:
//!
//! - A pan that begins while a pinch is active (or still resolving its
//!   direction) is ignored.
//! - A pinch that begins while a drag is active fails.
//! - A pinch that begins while a pan is armed but has not produced its first
//!   sample takes over.
//! - Taps are only honored while nothing else is recognized.

use kurbo::Vec2;
use smallvec::{SmallVec, smallvec};
use timegrid_timing::Throttle;
use timegrid_view::{SlotAxis, ZoomAxis};

use crate::{GestureAction, GestureEvent, GesturePhase};

/// Batch of actions produced by one event.
pub type GestureActions = SmallVec<[GestureAction; 4]>;

/// How long the platform should wait before activating a pan.
pub const LONG_PRESS_MS: u64 = 150;
/// Minimum pointer travel, in pixels, before a pan activates.
pub const PAN_MIN_DISTANCE: f64 = 3.0;
/// Longest press the platform should still report as a tap.
pub const TAP_MAX_DURATION_MS: u64 = 300;
/// Default minimum spacing between live zoom updates (about 30 Hz).
pub const DEFAULT_ZOOM_THROTTLE_MS: u64 = 33;
/// Default `|scale - 1|` a pinch must exceed before its axis is chosen.
pub const DEFAULT_DIRECTION_THRESHOLD: f64 = 0.05;

/// Tunables of a [`GestureAdapter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Pans produce drag selections.
    pub drag_enabled: bool,
    /// Taps commit a one-slot selection instead of pressing.
    pub single_tap_enabled: bool,
    /// Pinches may zoom the horizontal axis.
    pub horizontal_zoom_enabled: bool,
    /// Minimum spacing between live zoom updates.
    pub zoom_throttle_ms: u64,
    /// `|scale - 1|` a pinch must exceed before its axis is chosen.
    pub direction_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_enabled: true,
            single_tap_enabled: false,
            horizontal_zoom_enabled: true,
            zoom_throttle_ms: DEFAULT_ZOOM_THROTTLE_MS,
            direction_threshold: DEFAULT_DIRECTION_THRESHOLD,
        }
    }
}

/// The gesture currently owning the grid.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Recognition {
    /// Nothing is recognized.
    #[default]
    Idle,
    /// A pan is active on `column`.
    Panning {
        /// Column of the pan.
        column: usize,
        /// `true` once a drag was started from a complete sample.
        started: bool,
    },
    /// A pinch is active.
    Pinching {
        /// Chosen axis; `None` while the direction is still unresolved.
        axis: Option<ZoomAxis>,
        /// Pointer span when the pinch began.
        initial_span: Option<Vec2>,
    },
}

/// Turns recognized gesture samples into selection and zoom actions.
#[derive(Clone, Debug)]
pub struct GestureAdapter {
    config: GestureConfig,
    recognition: Recognition,
    throttle: Throttle,
}

impl Default for GestureAdapter {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureAdapter {
    /// Creates an idle adapter.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            recognition: Recognition::Idle,
            throttle: Throttle::new(config.zoom_throttle_ms),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration. An active gesture keeps running.
    pub fn set_config(&mut self, config: GestureConfig) {
        if config.zoom_throttle_ms != self.config.zoom_throttle_ms {
            self.throttle = Throttle::new(config.zoom_throttle_ms);
        }
        self.config = config;
    }

    /// The gesture currently owning the grid.
    #[must_use]
    pub fn recognition(&self) -> Recognition {
        self.recognition
    }

    /// Handles one gesture sample.
    ///
    /// `axis` is the selection-grid axis at the current (live) hour height and
    /// is used for every hit-test. `now_ms` comes from the host's monotonic
    /// clock.
    pub fn handle(&mut self, event: GestureEvent, axis: &SlotAxis, now_ms: u64) -> GestureActions {
        match event {
            GestureEvent::Pan {
                column,
                phase,
                position,
            } => self.handle_pan(column, phase, position.map(|p| p.y), axis),
            GestureEvent::Tap { column, position } => self.handle_tap(column, position.y, axis),
            GestureEvent::Pinch { phase, scale, span } => {
                self.handle_pinch(phase, scale, span, now_ms)
            }
        }
    }

    /// Abandons whatever gesture is active, returning the actions that undo
    /// its effects.
    pub fn cancel(&mut self) -> GestureActions {
        let actions = match self.recognition {
            Recognition::Panning { started: true, .. } => smallvec![GestureAction::CancelDrag],
            Recognition::Pinching { axis: Some(_), .. } => smallvec![GestureAction::CancelZoom],
            _ => SmallVec::new(),
        };
        self.recognition = Recognition::Idle;
        actions
    }

    fn handle_pan(
        &mut self,
        column: usize,
        phase: GesturePhase,
        y: Option<f64>,
        axis: &SlotAxis,
    ) -> GestureActions {
        match (phase, self.recognition) {
            (GesturePhase::Began, Recognition::Idle) => {
                if !self.config.drag_enabled {
                    return SmallVec::new();
                }
                self.recognition = Recognition::Panning {
                    column,
                    started: false,
                };
                self.pan_sample(column, false, y, axis)
            }
            (GesturePhase::Began, Recognition::Pinching { .. }) => {
                log::trace!("pan ignored while pinching");
                SmallVec::new()
            }
            (GesturePhase::Changed, Recognition::Panning { column: active, started })
                if active == column =>
            {
                self.pan_sample(column, started, y, axis)
            }
            (GesturePhase::Ended, Recognition::Panning { column: active, started })
                if active == column =>
            {
                self.recognition = Recognition::Idle;
                if started {
                    smallvec![GestureAction::CompleteDrag]
                } else {
                    SmallVec::new()
                }
            }
            (GesturePhase::Cancelled, Recognition::Panning { column: active, started })
                if active == column =>
            {
                self.recognition = Recognition::Idle;
                if started {
                    smallvec![GestureAction::CancelDrag]
                } else {
                    SmallVec::new()
                }
            }
            _ => SmallVec::new(),
        }
    }

    fn pan_sample(
        &mut self,
        column: usize,
        started: bool,
        y: Option<f64>,
        axis: &SlotAxis,
    ) -> GestureActions {
        // Samples without a usable `y` are dropped; the pan itself stays alive.
        let Some(y) = y.filter(|y| y.is_finite() && *y != 0.0) else {
            log::trace!("dropping partial pan sample on column {column}");
            return SmallVec::new();
        };
        let Some(slot) = axis.slot_at(y) else {
            log::trace!("no slot under y={y} on column {column}");
            return SmallVec::new();
        };
        if started {
            smallvec![GestureAction::UpdateDrag { slot }]
        } else {
            self.recognition = Recognition::Panning {
                column,
                started: true,
            };
            smallvec![GestureAction::StartDrag { column, slot }]
        }
    }

    fn handle_tap(&mut self, column: usize, y: f64, axis: &SlotAxis) -> GestureActions {
        if self.recognition != Recognition::Idle {
            log::trace!("tap ignored during {:?}", self.recognition);
            return SmallVec::new();
        }
        let Some(slot) = axis.slot_at(y) else {
            log::trace!("no slot under tap y={y} on column {column}");
            return SmallVec::new();
        };
        if self.config.single_tap_enabled {
            smallvec![GestureAction::Tap { column, slot }]
        } else if !self.config.drag_enabled {
            smallvec![
                GestureAction::StartDrag { column, slot },
                GestureAction::UpdateDrag { slot },
                GestureAction::CompleteDrag,
            ]
        } else {
            smallvec![GestureAction::Press { column, slot }]
        }
    }

    fn handle_pinch(
        &mut self,
        phase: GesturePhase,
        scale: f64,
        span: Option<Vec2>,
        now_ms: u64,
    ) -> GestureActions {
        match phase {
            GesturePhase::Began => match self.recognition {
                Recognition::Panning { started: true, .. } => {
                    log::trace!("pinch failed: a drag is active");
                    SmallVec::new()
                }
                _ => {
                    self.recognition = Recognition::Pinching {
                        axis: None,
                        initial_span: span,
                    };
                    self.throttle.reset();
                    SmallVec::new()
                }
            },
            GesturePhase::Changed => {
                let Recognition::Pinching { axis, initial_span } = self.recognition else {
                    return SmallVec::new();
                };
                if !scale.is_finite() || scale <= 0.0 {
                    log::trace!("dropping pinch sample with scale {scale}");
                    return SmallVec::new();
                }
                let mut actions = SmallVec::new();
                let axis = match axis {
                    Some(axis) => axis,
                    None => {
                        if (scale - 1.0).abs() <= self.config.direction_threshold {
                            return actions;
                        }
                        let axis = classify_direction(
                            initial_span,
                            span,
                            self.config.horizontal_zoom_enabled,
                        );
                        log::debug!("pinch classified as {axis:?}");
                        self.recognition = Recognition::Pinching {
                            axis: Some(axis),
                            initial_span,
                        };
                        actions.push(GestureAction::BeginZoom { axis });
                        axis
                    }
                };
                if self.throttle.admit(now_ms) {
                    actions.push(GestureAction::LiveZoom { raw_scale: scale });
                } else {
                    log::trace!("live zoom on {axis:?} throttled");
                }
                actions
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {
                let Recognition::Pinching { axis, .. } = self.recognition else {
                    return SmallVec::new();
                };
                self.recognition = Recognition::Idle;
                match (phase, axis) {
                    (_, None) => SmallVec::new(),
                    (GesturePhase::Ended, Some(_)) => smallvec![GestureAction::CommitZoom],
                    (_, Some(_)) => smallvec![GestureAction::CancelZoom],
                }
            }
        }
    }
}

/// Picks the zoom axis of a pinch from how its pointer span changed.
///
/// Horizontal wins only when the horizontal span changed strictly more than
/// the vertical span and horizontal zoom is enabled. Everything else,
/// including a missing span, is vertical.
#[must_use]
pub fn classify_direction(
    initial: Option<Vec2>,
    current: Option<Vec2>,
    horizontal_enabled: bool,
) -> ZoomAxis {
    if !horizontal_enabled {
        return ZoomAxis::Vertical;
    }
    let (Some(initial), Some(current)) = (initial, current) else {
        return ZoomAxis::Vertical;
    };
    let dx = (current.x.abs() - initial.x.abs()).abs();
    let dy = (current.y.abs() - initial.y.abs()).abs();
    if dx > dy {
        ZoomAxis::Horizontal
    } else {
        ZoomAxis::Vertical
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::*;

    fn axis() -> SlotAxis {
        // 32 slots of 20px.
        SlotAxis::new(20.0, 32)
    }

    fn pan(column: usize, phase: GesturePhase, y: Option<f64>) -> GestureEvent {
        GestureEvent::Pan {
            column,
            phase,
            position: y.map(|y| Point::new(10.0, y)),
        }
    }

    fn pinch(phase: GesturePhase, scale: f64, span: Option<Vec2>) -> GestureEvent {
        GestureEvent::Pinch { phase, scale, span }
    }

    #[test]
    fn pan_lifecycle_drives_a_drag() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        let began = adapter.handle(pan(1, GesturePhase::Began, Some(45.0)), &axis, 0);
        assert_eq!(began.as_slice(), &[GestureAction::StartDrag { column: 1, slot: 2 }]);
        let moved = adapter.handle(pan(1, GesturePhase::Changed, Some(105.0)), &axis, 10);
        assert_eq!(moved.as_slice(), &[GestureAction::UpdateDrag { slot: 5 }]);
        let ended = adapter.handle(pan(1, GesturePhase::Ended, None), &axis, 20);
        assert_eq!(ended.as_slice(), &[GestureAction::CompleteDrag]);
        assert_eq!(adapter.recognition(), Recognition::Idle);
    }

    #[test]
    fn partial_samples_are_dropped_without_aborting() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        adapter.handle(pan(0, GesturePhase::Began, Some(45.0)), &axis, 0);
        for y in [None, Some(0.0), Some(f64::NAN)] {
            assert!(adapter.handle(pan(0, GesturePhase::Changed, y), &axis, 5).is_empty());
        }
        assert_eq!(
            adapter.recognition(),
            Recognition::Panning {
                column: 0,
                started: true
            }
        );
        let moved = adapter.handle(pan(0, GesturePhase::Changed, Some(70.0)), &axis, 10);
        assert_eq!(moved.as_slice(), &[GestureAction::UpdateDrag { slot: 3 }]);
    }

    #[test]
    fn partial_first_sample_defers_the_start() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        assert!(adapter.handle(pan(0, GesturePhase::Began, None), &axis, 0).is_empty());
        let first = adapter.handle(pan(0, GesturePhase::Changed, Some(30.0)), &axis, 5);
        assert_eq!(first.as_slice(), &[GestureAction::StartDrag { column: 0, slot: 1 }]);
    }

    #[test]
    fn pan_is_blocked_while_pinching() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        adapter.handle(pinch(GesturePhase::Began, 1.0, None), &axis, 0);
        assert!(adapter.handle(pan(0, GesturePhase::Began, Some(45.0)), &axis, 5).is_empty());
        assert!(matches!(adapter.recognition(), Recognition::Pinching { .. }));
    }

    #[test]
    fn pinch_fails_during_drag() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        adapter.handle(pan(0, GesturePhase::Began, Some(45.0)), &axis, 0);
        assert!(adapter.handle(pinch(GesturePhase::Began, 1.0, None), &axis, 5).is_empty());
        assert!(adapter.handle(pinch(GesturePhase::Changed, 2.0, None), &axis, 10).is_empty());
        assert!(matches!(adapter.recognition(), Recognition::Panning { .. }));
    }

    #[test]
    fn pinch_classifies_once_then_throttles() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        let span = Vec2::new(100.0, 100.0);
        adapter.handle(pinch(GesturePhase::Began, 1.0, Some(span)), &axis, 0);
        // Inside the dead zone: no decision yet.
        assert!(adapter.handle(pinch(GesturePhase::Changed, 1.03, Some(span)), &axis, 1).is_empty());

        let wide = Vec2::new(180.0, 105.0);
        let first = adapter.handle(pinch(GesturePhase::Changed, 1.2, Some(wide)), &axis, 2);
        assert_eq!(
            first.as_slice(),
            &[
                GestureAction::BeginZoom {
                    axis: ZoomAxis::Horizontal
                },
                GestureAction::LiveZoom { raw_scale: 1.2 }
            ]
        );
        // Within the throttle window.
        assert!(adapter.handle(pinch(GesturePhase::Changed, 1.3, Some(wide)), &axis, 20).is_empty());
        let later = adapter.handle(pinch(GesturePhase::Changed, 1.4, Some(wide)), &axis, 40);
        assert_eq!(later.as_slice(), &[GestureAction::LiveZoom { raw_scale: 1.4 }]);

        let ended = adapter.handle(pinch(GesturePhase::Ended, 1.4, None), &axis, 50);
        assert_eq!(ended.as_slice(), &[GestureAction::CommitZoom]);
    }

    #[test]
    fn invalid_pinch_scale_is_ignored() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        adapter.handle(pinch(GesturePhase::Began, 1.0, None), &axis, 0);
        for scale in [0.0, -1.0, f64::NAN] {
            assert!(adapter.handle(pinch(GesturePhase::Changed, scale, None), &axis, 100).is_empty());
        }
        // Ending an unresolved pinch commits nothing.
        assert!(adapter.handle(pinch(GesturePhase::Ended, 1.0, None), &axis, 200).is_empty());
    }

    #[test]
    fn direction_defaults_to_vertical() {
        let a = Some(Vec2::new(100.0, 100.0));
        let b = Some(Vec2::new(200.0, 100.0));
        assert_eq!(classify_direction(a, b, true), ZoomAxis::Horizontal);
        assert_eq!(classify_direction(a, b, false), ZoomAxis::Vertical);
        assert_eq!(classify_direction(None, b, true), ZoomAxis::Vertical);
        // Equal change is ambiguous.
        let c = Some(Vec2::new(150.0, 150.0));
        assert_eq!(classify_direction(a, c, true), ZoomAxis::Vertical);
    }

    #[test]
    fn tap_policies() {
        let axis = axis();
        let tap = GestureEvent::Tap {
            column: 2,
            position: Point::new(5.0, 0.0),
        };

        let mut pressing = GestureAdapter::default();
        assert_eq!(
            pressing.handle(tap, &axis, 0).as_slice(),
            &[GestureAction::Press { column: 2, slot: 0 }]
        );

        let mut single = GestureAdapter::new(GestureConfig {
            single_tap_enabled: true,
            ..GestureConfig::default()
        });
        assert_eq!(
            single.handle(tap, &axis, 0).as_slice(),
            &[GestureAction::Tap { column: 2, slot: 0 }]
        );

        let mut no_drag = GestureAdapter::new(GestureConfig {
            drag_enabled: false,
            ..GestureConfig::default()
        });
        assert_eq!(
            no_drag.handle(tap, &axis, 0).as_slice(),
            &[
                GestureAction::StartDrag { column: 2, slot: 0 },
                GestureAction::UpdateDrag { slot: 0 },
                GestureAction::CompleteDrag,
            ]
        );
    }

    #[test]
    fn cancel_undoes_active_gesture() {
        let mut adapter = GestureAdapter::default();
        let axis = axis();
        adapter.handle(pan(0, GesturePhase::Began, Some(45.0)), &axis, 0);
        assert_eq!(adapter.cancel().as_slice(), &[GestureAction::CancelDrag]);
        assert!(adapter.cancel().is_empty());
    }
}
