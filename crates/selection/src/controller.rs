use features::{AttrValue, Feature};

/// One asynchronous hit-test the shell must run against the renderable
/// layer. Small and copy-cheap so it can flow through event callbacks
/// without allocation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HitTestRequest {
    pub seq: u64,
    pub x_px: f64,
    pub y_px: f64,
}

/// The selection surfaced to the popup: nothing, or the full ordered
/// attribute set of the last hit feature. Replaced wholesale per click.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    None,
    Feature(Vec<(String, AttrValue)>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    HitTesting,
    Selected,
}

/// What the popup overlay must do after a hit-test resolves.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PopupEffect {
    /// Anchor the popup at the originating click's pixel.
    AnchorAt { x_px: f64, y_px: f64 },
    /// Clear the anchor; nothing was hit.
    Hide,
    /// Stale or post-disposal result; leave the popup alone.
    None,
}

/// Click -> async hit-test -> selection state machine.
///
/// Ordering contract:
/// - Requests carry a monotonically increasing sequence number; only the
///   latest request may apply its result. A superseded request is not
///   cancelled, its result is discarded at resolution (last-result-wins).
/// - Disposal is permanent: no further requests are issued and in-flight
///   results are ignored.
#[derive(Debug, Default)]
pub struct SelectionController {
    next_seq: u64,
    in_flight: Option<HitTestRequest>,
    selection: SelectionState,
    disposed: bool,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::HitTesting
        } else if matches!(self.selection, SelectionState::Feature(_)) {
            Phase::Selected
        } else {
            Phase::Idle
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Registers a pointer click. Returns the hit-test the shell must
    /// issue, or `None` after disposal.
    pub fn on_click(&mut self, x_px: f64, y_px: f64) -> Option<HitTestRequest> {
        if self.disposed {
            return None;
        }
        let request = HitTestRequest {
            seq: self.next_seq,
            x_px,
            y_px,
        };
        self.next_seq += 1;
        self.in_flight = Some(request);
        Some(request)
    }

    /// Applies a resolved hit-test. `features` is the layer's topmost-first
    /// match list; only the first entry is taken.
    pub fn on_hit_result(&mut self, seq: u64, features: &[Feature]) -> PopupEffect {
        if self.disposed {
            return PopupEffect::None;
        }
        let Some(request) = self.in_flight else {
            return PopupEffect::None;
        };
        if request.seq != seq {
            // A newer click superseded this request.
            return PopupEffect::None;
        }
        self.in_flight = None;

        match features.first() {
            Some(topmost) => {
                self.selection = SelectionState::Feature(topmost.pairs().to_vec());
                PopupEffect::AnchorAt {
                    x_px: request.x_px,
                    y_px: request.y_px,
                }
            }
            None => {
                self.selection = SelectionState::None;
                PopupEffect::Hide
            }
        }
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
        self.in_flight = None;
        self.selection = SelectionState::None;
    }
}

#[cfg(test)]
mod tests {
    use features::{AttrValue, Feature};
    use pretty_assertions::assert_eq;

    use super::{Phase, PopupEffect, SelectionController, SelectionState};

    fn named(name: &str) -> Feature {
        Feature::new(vec![
            ("layer".to_string(), AttrValue::from("places")),
            ("name:en".to_string(), AttrValue::from(name)),
        ])
    }

    #[test]
    fn hit_selects_topmost_feature_and_anchors_popup() {
        let mut c = SelectionController::new();
        assert_eq!(c.phase(), Phase::Idle);

        let req = c.on_click(120.0, 80.0).expect("request");
        assert_eq!(c.phase(), Phase::HitTesting);

        let effect = c.on_hit_result(req.seq, &[named("Paris"), named("France")]);
        assert_eq!(
            effect,
            PopupEffect::AnchorAt {
                x_px: 120.0,
                y_px: 80.0
            }
        );
        assert_eq!(c.phase(), Phase::Selected);
        match c.selection() {
            SelectionState::Feature(pairs) => {
                assert_eq!(pairs[1], ("name:en".to_string(), AttrValue::from("Paris")));
            }
            SelectionState::None => panic!("expected a selection"),
        }
    }

    #[test]
    fn miss_clears_selection_and_hides_popup() {
        let mut c = SelectionController::new();
        let req = c.on_click(10.0, 10.0).expect("request");
        c.on_hit_result(req.seq, &[named("Paris")]);
        assert_eq!(c.phase(), Phase::Selected);

        // A later empty click clears whatever was selected before.
        let req = c.on_click(300.0, 200.0).expect("request");
        let effect = c.on_hit_result(req.seq, &[]);
        assert_eq!(effect, PopupEffect::Hide);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.selection(), &SelectionState::None);
    }

    #[test]
    fn stale_result_does_not_overwrite_newer_click() {
        let mut c = SelectionController::new();
        let a = c.on_click(1.0, 1.0).expect("request a");
        let b = c.on_click(2.0, 2.0).expect("request b");

        // B resolves first and wins.
        let effect = c.on_hit_result(b.seq, &[named("London")]);
        assert_eq!(
            effect,
            PopupEffect::AnchorAt {
                x_px: 2.0,
                y_px: 2.0
            }
        );

        // A resolves late; its result is discarded.
        let effect = c.on_hit_result(a.seq, &[named("Paris")]);
        assert_eq!(effect, PopupEffect::None);
        match c.selection() {
            SelectionState::Feature(pairs) => {
                assert_eq!(pairs[1].1, AttrValue::from("London"));
            }
            SelectionState::None => panic!("expected a selection"),
        }
    }

    #[test]
    fn stale_empty_result_does_not_clear_newer_selection() {
        let mut c = SelectionController::new();
        let a = c.on_click(1.0, 1.0).expect("request a");
        let b = c.on_click(2.0, 2.0).expect("request b");

        c.on_hit_result(b.seq, &[named("London")]);
        assert_eq!(c.on_hit_result(a.seq, &[]), PopupEffect::None);
        assert_eq!(c.phase(), Phase::Selected);
    }

    #[test]
    fn disposal_is_permanent() {
        let mut c = SelectionController::new();
        let req = c.on_click(5.0, 5.0).expect("request");
        c.dispose();

        assert_eq!(c.on_hit_result(req.seq, &[named("Paris")]), PopupEffect::None);
        assert_eq!(c.selection(), &SelectionState::None);
        assert!(c.on_click(6.0, 6.0).is_none());
        assert!(c.is_disposed());
    }

    #[test]
    fn sequence_numbers_are_monotonic() {
        let mut c = SelectionController::new();
        let a = c.on_click(0.0, 0.0).expect("a");
        let b = c.on_click(0.0, 0.0).expect("b");
        assert!(b.seq > a.seq);
    }
}
