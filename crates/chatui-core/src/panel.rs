//! Draggable Snap Panel
//!
//! Gesture model for a bottom sheet with three snap points. The panel is
//! rendered in one of two modes:
//!
//! - **committed**: the offset of the current [`PanelState`], animated by the
//!   host (CSS transition or equivalent);
//! - **gesture**: the offset under the pointer, applied immediately.
//!
//! [`SnapPanel::on_gesture_start`] hands off from committed to gesture mode,
//! [`SnapPanel::on_gesture_end`] and [`SnapPanel::on_gesture_cancel`] hand
//! back. Offsets are pixels measured downward from the fully open position,
//! so `Full` is always `0.0` and larger values sit lower on screen.
//!
//! ## Usage
//!
//! ```rust
//! use chatui_core::panel::{PanelState, SnapPanel};
//!
//! let mut panel = SnapPanel::with_defaults();
//! panel.resize(800.0);
//! panel.open();
//!
//! let start = panel.frame().map(|f| f.offset);
//! panel.on_gesture_start(400.0, start);
//! panel.on_gesture_move(320.0);
//! assert_eq!(panel.on_gesture_end(), Some(PanelState::Full));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;

/// Logical snap position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelState {
    #[default]
    Hidden,
    Half,
    Full,
}

impl std::fmt::Display for PanelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelState::Hidden => write!(f, "hidden"),
            PanelState::Half => write!(f, "half"),
            PanelState::Full => write!(f, "full"),
        }
    }
}

/// Pixel offsets derived from the viewport height
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub viewport_height: f64,
    pub panel_height: f64,
    pub full_offset: f64,
    pub half_offset: f64,
    pub hidden_offset: f64,
}

impl Metrics {
    /// Compute metrics for a viewport, or `None` if the size is unusable
    pub fn compute(viewport_height: f64, config: &PanelConfig) -> Option<Self> {
        if !viewport_height.is_finite() || viewport_height <= 0.0 {
            return None;
        }

        let panel_height = viewport_height * config.full_height_ratio;
        let half_offset =
            (panel_height - viewport_height * config.half_visible_ratio).clamp(0.0, panel_height);

        Some(Self {
            viewport_height,
            panel_height,
            full_offset: 0.0,
            half_offset,
            hidden_offset: panel_height + config.hidden_overshoot_px,
        })
    }

    pub fn offset_for(&self, state: PanelState) -> f64 {
        match state {
            PanelState::Hidden => self.hidden_offset,
            PanelState::Half => self.half_offset,
            PanelState::Full => self.full_offset,
        }
    }
}

/// Tracking data for one press → move* → release sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub start_pointer_y: f64,
    pub start_offset: f64,
    /// Displacement after damping
    pub current_delta: f64,
    /// Committed state when the gesture began
    pub origin: PanelState,
}

impl DragSession {
    pub fn offset(&self) -> f64 {
        self.start_offset + self.current_delta
    }
}

/// What the host should render right now
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub offset: f64,
    /// `true` in committed mode, `false` while a gesture is tracking
    pub animated: bool,
}

/// Bottom sheet controller
#[derive(Clone, Debug)]
pub struct SnapPanel {
    config: PanelConfig,
    state: PanelState,
    metrics: Option<Metrics>,
    session: Option<DragSession>,
}

impl Default for SnapPanel {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl SnapPanel {
    pub fn new(config: PanelConfig) -> Self {
        Self {
            config,
            state: PanelState::Hidden,
            metrics: None,
            session: None,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(PanelConfig::default())
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Committed state
    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        self.metrics.as_ref()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.state != PanelState::Hidden
    }

    /// Show the panel at its default reopen point
    pub fn open(&mut self) {
        self.commit(PanelState::Half);
    }

    pub fn close(&mut self) {
        self.commit(PanelState::Hidden);
    }

    /// Recompute metrics; returns `false` and keeps the old ones for an
    /// unusable viewport size.
    pub fn resize(&mut self, viewport_height: f64) -> bool {
        match Metrics::compute(viewport_height, &self.config) {
            Some(metrics) => {
                tracing::debug!(viewport_height, half = metrics.half_offset, "panel metrics updated");
                self.metrics = Some(metrics);
                true
            }
            None => {
                tracing::debug!(viewport_height, "ignoring unusable viewport size");
                false
            }
        }
    }

    /// Offset of the committed state
    pub fn committed_offset(&self) -> Option<f64> {
        self.metrics.map(|m| m.offset_for(self.state))
    }

    /// Current render instruction; `None` until metrics are known
    pub fn frame(&self) -> Option<Frame> {
        if let Some(session) = &self.session {
            return Some(Frame {
                offset: session.offset(),
                animated: false,
            });
        }
        self.committed_offset().map(|offset| Frame {
            offset,
            animated: true,
        })
    }

    /// Begin tracking a drag.
    ///
    /// `visual_offset` is the panel's measured on-screen offset, which differs
    /// from the committed offset while a transition is in flight. Pass `None`
    /// when it cannot be measured. Returns `false` when the gesture is ignored
    /// (no metrics yet, or the panel is hidden).
    pub fn on_gesture_start(&mut self, pointer_y: f64, visual_offset: Option<f64>) -> bool {
        let Some(committed) = self.committed_offset() else {
            return false;
        };
        if self.state == PanelState::Hidden || !pointer_y.is_finite() {
            return false;
        }

        let start_offset = visual_offset.filter(|v| v.is_finite()).unwrap_or(committed);
        if self.session.is_some() {
            tracing::debug!("replacing stale drag session");
        }
        self.session = Some(DragSession {
            start_pointer_y: pointer_y,
            start_offset,
            current_delta: 0.0,
            origin: self.state,
        });
        tracing::debug!(pointer_y, start_offset, origin = %self.state, "gesture started");
        true
    }

    /// Track the pointer; returns the offset to apply immediately, or `None`
    /// without an active gesture.
    pub fn on_gesture_move(&mut self, pointer_y: f64) -> Option<f64> {
        let full_offset = self.metrics?.full_offset;
        let damping = self.config.damping;
        let session = self.session.as_mut()?;
        if !pointer_y.is_finite() {
            return Some(session.offset());
        }

        // A gesture picked up during the bounce-back starts above `Full`;
        // only travel beyond its own start is resisted.
        let bound = session.start_offset.min(full_offset);
        let raw_delta = pointer_y - session.start_pointer_y;
        let target = session.start_offset + raw_delta;
        if target < bound {
            let offset = bound - (bound - target) * damping;
            session.current_delta = offset - session.start_offset;
        } else {
            session.current_delta = raw_delta;
        }
        Some(session.offset())
    }

    /// Finish the gesture and commit the resolved snap point.
    ///
    /// Returns `None` if no gesture was active.
    pub fn on_gesture_end(&mut self) -> Option<PanelState> {
        let session = self.session.take()?;
        let next = resolve_snap(session.origin, session.current_delta, self.config.snap_threshold_px);
        tracing::debug!(
            delta = session.current_delta,
            from = %session.origin,
            to = %next,
            "gesture ended"
        );
        self.state = next;
        Some(next)
    }

    /// Drop the gesture and return to the committed state
    pub fn on_gesture_cancel(&mut self) -> bool {
        let cancelled = self.session.take().is_some();
        if cancelled {
            tracing::debug!(state = %self.state, "gesture cancelled");
        }
        cancelled
    }

    fn commit(&mut self, state: PanelState) {
        if self.session.take().is_some() {
            tracing::debug!("drag session discarded by programmatic {}", state);
        }
        if self.state != state {
            tracing::debug!(from = %self.state, to = %state, "panel state committed");
        }
        self.state = state;
    }
}

/// Map a released gesture onto the next snap point
pub fn resolve_snap(origin: PanelState, delta: f64, threshold: f64) -> PanelState {
    match origin {
        PanelState::Half if delta < -threshold => PanelState::Full,
        PanelState::Half if delta > threshold => PanelState::Hidden,
        PanelState::Full if delta > threshold => PanelState::Half,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: f64 = 800.0;

    fn panel_in(state: PanelState) -> SnapPanel {
        let mut panel = SnapPanel::with_defaults();
        assert!(panel.resize(VIEWPORT));
        panel.open();
        if state == PanelState::Full {
            drag(&mut panel, -200.0);
        }
        assert_eq!(panel.state(), state);
        panel
    }

    fn drag(panel: &mut SnapPanel, raw_delta: f64) -> Option<PanelState> {
        let offset = panel.frame().map(|f| f.offset);
        panel.on_gesture_start(500.0, offset);
        panel.on_gesture_move(500.0 + raw_delta / 2.0);
        panel.on_gesture_move(500.0 + raw_delta);
        panel.on_gesture_end()
    }

    #[test]
    fn test_metrics() {
        let metrics = Metrics::compute(VIEWPORT, &PanelConfig::default()).unwrap();
        assert_eq!(metrics.full_offset, 0.0);
        assert!((metrics.panel_height - 736.0).abs() < 1e-9);
        assert!((metrics.half_offset - 336.0).abs() < 1e-9);
        assert!(metrics.hidden_offset > metrics.panel_height);
        assert!(metrics.hidden_offset - metrics.panel_height >= crate::SHEET_SHADOW_EXTENT_PX);
    }

    #[test]
    fn test_unusable_viewport_is_ignored() {
        let mut panel = SnapPanel::with_defaults();
        assert!(!panel.resize(0.0));
        assert!(!panel.resize(-10.0));
        assert!(!panel.resize(f64::NAN));
        assert!(panel.frame().is_none());

        panel.resize(VIEWPORT);
        let before = *panel.metrics().unwrap();
        assert!(!panel.resize(0.0));
        assert_eq!(*panel.metrics().unwrap(), before);
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(drag(&mut panel_in(PanelState::Half), -80.0), Some(PanelState::Full));
        assert_eq!(drag(&mut panel_in(PanelState::Half), 30.0), Some(PanelState::Half));
        assert_eq!(drag(&mut panel_in(PanelState::Full), 90.0), Some(PanelState::Half));
        assert_eq!(drag(&mut panel_in(PanelState::Full), -50.0), Some(PanelState::Full));
    }

    #[test]
    fn test_half_closes_on_long_downward_drag() {
        let mut panel = panel_in(PanelState::Half);
        assert_eq!(drag(&mut panel, 61.0), Some(PanelState::Hidden));
        assert!(!panel.is_open());
    }

    #[test]
    fn test_overdrag_from_full_is_damped() {
        let mut panel = panel_in(PanelState::Full);
        panel.on_gesture_start(300.0, Some(0.0));
        let offset = panel.on_gesture_move(250.0).unwrap();
        assert!((offset - -10.0).abs() < 1e-9);
        assert!((panel.session().unwrap().current_delta - -10.0).abs() < 1e-9);
    }

    #[test]
    fn test_overdrag_from_half_is_continuous() {
        let mut panel = panel_in(PanelState::Half);
        panel.on_gesture_start(500.0, None);
        let at_bound = panel.on_gesture_move(500.0 - 336.0).unwrap();
        let past_bound = panel.on_gesture_move(500.0 - 336.0 - 100.0).unwrap();
        assert!(at_bound.abs() < 1e-9);
        assert!((past_bound - -20.0).abs() < 1e-9);
    }

    #[test]
    fn test_closing_motion_is_not_damped() {
        let mut panel = panel_in(PanelState::Half);
        panel.on_gesture_start(100.0, None);
        let offset = panel.on_gesture_move(1100.0).unwrap();
        assert!((offset - 1336.0).abs() < 1e-9);
    }

    #[test]
    fn test_close_then_open_returns_to_half() {
        for start in [PanelState::Half, PanelState::Full] {
            let mut panel = panel_in(start);
            panel.close();
            assert_eq!(panel.state(), PanelState::Hidden);
            panel.open();
            assert_eq!(panel.state(), PanelState::Half);
        }
    }

    #[test]
    fn test_gesture_mid_transition_does_not_jump() {
        let mut panel = panel_in(PanelState::Full);
        panel.open();
        // transition from 0 towards 336 is in flight, measured at 120
        assert!(panel.on_gesture_start(400.0, Some(120.0)));
        let frame = panel.frame().unwrap();
        assert_eq!(frame.offset, 120.0);
        assert!(!frame.animated);
    }

    #[test]
    fn test_gesture_during_bounce_back_is_continuous() {
        let mut panel = panel_in(PanelState::Full);
        // still springing back from an overdrag, measured 6px above Full
        assert!(panel.on_gesture_start(300.0, Some(-6.0)));

        let offset = panel.on_gesture_move(301.0).unwrap();
        assert!((offset + 5.0).abs() < 1e-9);

        let offset = panel.on_gesture_move(290.0).unwrap();
        assert!((offset + 8.0).abs() < 1e-9);

        assert_eq!(panel.on_gesture_end(), Some(PanelState::Full));
    }

    #[test]
    fn test_frame_modes() {
        let mut panel = panel_in(PanelState::Half);
        assert_eq!(panel.frame(), Some(Frame { offset: 336.0, animated: true }));

        panel.on_gesture_start(500.0, None);
        panel.on_gesture_move(520.0);
        assert_eq!(panel.frame(), Some(Frame { offset: 356.0, animated: false }));

        panel.on_gesture_end();
        assert_eq!(panel.frame(), Some(Frame { offset: 336.0, animated: true }));
    }

    #[test]
    fn test_stray_events_are_noops() {
        let mut panel = panel_in(PanelState::Half);
        assert_eq!(panel.on_gesture_move(10.0), None);
        assert_eq!(panel.on_gesture_end(), None);
        assert!(!panel.on_gesture_cancel());
        assert_eq!(panel.state(), PanelState::Half);
    }

    #[test]
    fn test_hidden_or_unmeasured_panel_ignores_gestures() {
        let mut panel = SnapPanel::with_defaults();
        panel.open();
        assert!(!panel.on_gesture_start(0.0, None));

        panel.resize(VIEWPORT);
        panel.close();
        assert!(!panel.on_gesture_start(0.0, None));
        assert!(!panel.is_dragging());
    }

    #[test]
    fn test_new_gesture_replaces_stale_session() {
        let mut panel = panel_in(PanelState::Half);
        panel.on_gesture_start(500.0, None);
        panel.on_gesture_move(300.0);

        panel.on_gesture_start(700.0, None);
        let session = panel.session().unwrap();
        assert_eq!(session.start_pointer_y, 700.0);
        assert_eq!(session.current_delta, 0.0);
        assert_eq!(panel.on_gesture_end(), Some(PanelState::Half));
    }

    #[test]
    fn test_cancel_reverts_to_committed() {
        let mut panel = panel_in(PanelState::Half);
        panel.on_gesture_start(500.0, None);
        panel.on_gesture_move(300.0);
        assert!(panel.on_gesture_cancel());
        assert_eq!(panel.state(), PanelState::Half);
        assert_eq!(panel.frame(), Some(Frame { offset: 336.0, animated: true }));
    }

    #[test]
    fn test_close_discards_active_gesture() {
        let mut panel = panel_in(PanelState::Full);
        panel.on_gesture_start(500.0, None);
        panel.close();
        assert!(!panel.is_dragging());
        assert_eq!(panel.on_gesture_end(), None);
        assert_eq!(panel.state(), PanelState::Hidden);
    }

    #[test]
    fn test_configurable_threshold_and_damping() {
        let config = PanelConfig {
            snap_threshold_px: 100.0,
            damping: 0.5,
            ..Default::default()
        };
        let mut panel = SnapPanel::new(config);
        panel.resize(VIEWPORT);
        panel.open();
        assert_eq!(drag(&mut panel, -80.0), Some(PanelState::Half));
        assert_eq!(drag(&mut panel, -120.0), Some(PanelState::Full));

        panel.on_gesture_start(300.0, Some(0.0));
        assert_eq!(panel.on_gesture_move(260.0), Some(-20.0));
    }

    proptest! {
        #[test]
        fn prop_half_resolution(d in -300.0f64..300.0) {
            let mut panel = panel_in(PanelState::Half);
            let expected = if d < -60.0 {
                PanelState::Full
            } else if d > 60.0 {
                PanelState::Hidden
            } else {
                PanelState::Half
            };
            prop_assert_eq!(drag(&mut panel, d), Some(expected));
        }

        #[test]
        fn prop_full_resolution(d in -600.0f64..600.0) {
            let mut panel = panel_in(PanelState::Full);
            let expected = if d > 60.0 { PanelState::Half } else { PanelState::Full };
            prop_assert_eq!(drag(&mut panel, d), Some(expected));
        }

        #[test]
        fn prop_overdrag_is_damped(start in 0.0f64..336.0, raw in -2000.0f64..0.0) {
            let mut panel = panel_in(PanelState::Half);
            panel.on_gesture_start(1000.0, Some(start));
            let offset = panel.on_gesture_move(1000.0 + raw).unwrap();
            let undamped = start + raw;
            if undamped < 0.0 {
                prop_assert!(offset <= 0.0);
                prop_assert!(offset > undamped);
                prop_assert!(offset.abs() <= undamped.abs() * 0.2 + 1e-9);
            } else {
                prop_assert!((offset - undamped).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_gesture_start_preserves_visual_offset(
            visual in -50.0f64..800.0,
            step in -5.0f64..5.0,
        ) {
            let mut panel = panel_in(PanelState::Half);
            panel.on_gesture_start(200.0, Some(visual));
            prop_assert_eq!(panel.frame().map(|f| f.offset), Some(visual));

            // The first small move never jumps further than the pointer did
            let offset = panel.on_gesture_move(200.0 + step).unwrap();
            prop_assert!((offset - visual).abs() <= step.abs() + 1e-9);
        }
    }
}
