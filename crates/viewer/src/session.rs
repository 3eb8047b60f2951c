use features::Feature;
use selection::{HitTestRequest, PopupEffect, SelectionController, SelectionState};
use sources::{
    DataSource, Extent, LoadState, RenderableLayer, SourceEvent, SourceEventRecord, SourceKind,
};
use symbology::{RenderStyle, ThemePalette, style};

/// Per-file viewer state: one adapter, one selection controller, the
/// active palette and the popup overlay position.
///
/// The map surface, projection and paint step live in the host shell; the
/// session only produces the state they consume. A session is created per
/// opened file and torn down with it, never reused.
#[derive(Debug)]
pub struct ViewerSession {
    source: DataSource,
    controller: SelectionController,
    palette: &'static ThemePalette,
    popup_anchor: Option<(f64, f64)>,
}

impl ViewerSession {
    /// Opens a session for a compatible file, or `None` when the extension
    /// matches neither source kind.
    pub fn open(url: impl Into<String>, filename: &str, color_mode: &str) -> Option<Self> {
        let source = DataSource::open(url, filename)?;
        Some(Self {
            source,
            controller: SelectionController::new(),
            palette: ThemePalette::resolve(color_mode),
            popup_anchor: None,
        })
    }

    pub fn kind(&self) -> SourceKind {
        self.source.kind()
    }

    pub fn load_state(&self) -> LoadState {
        self.source.state()
    }

    pub fn loading(&self) -> bool {
        self.source.loading()
    }

    pub fn error(&self) -> bool {
        self.source.error()
    }

    pub fn layer(&self) -> Option<&RenderableLayer> {
        self.source.layer()
    }

    // Source lifecycle, forwarded from the shell's fetch machinery.

    pub fn begin_load(&mut self) {
        if let DataSource::Document(doc) = &mut self.source {
            doc.begin_load();
        }
    }

    pub fn finish_load(&mut self, payload: &str) {
        if let DataSource::Document(doc) = &mut self.source {
            doc.finish_load(payload);
            if doc.error() {
                tracing::warn!(url = doc.url(), "document failed to parse");
            }
        }
    }

    pub fn fail_load(&mut self, detail: &str) {
        if let DataSource::Document(doc) = &mut self.source {
            tracing::warn!(url = doc.url(), detail, "document fetch failed");
            doc.fail_load(detail);
        }
    }

    pub fn notify_tile_error(&mut self, detail: &str) {
        if let DataSource::TiledArchive(tiles) = &mut self.source {
            tracing::warn!(url = tiles.url(), detail, "tile fetch failed");
            tiles.on_tile_error(detail);
        }
    }

    /// Pending fit-to-data effect, handed out once after a document loads.
    pub fn take_fit_extent(&mut self) -> Option<Extent> {
        self.source.take_fit_extent()
    }

    pub fn drain_source_events(&mut self) -> Vec<SourceEventRecord> {
        let events = self.source.drain_events();
        for record in &events {
            if record.event == SourceEvent::LoadError {
                tracing::warn!(detail = record.detail.as_str(), "source load error");
            }
        }
        events
    }

    // Theme.

    /// Swaps the palette; a pure substitution, so re-resolving any feature
    /// changes only color fields.
    pub fn set_color_mode(&mut self, color_mode: &str) {
        self.palette = ThemePalette::resolve(color_mode);
    }

    pub fn palette(&self) -> &'static ThemePalette {
        self.palette
    }

    /// Style for one feature at the current theme. `None` suppresses
    /// rendering of the feature entirely.
    pub fn style_for(&self, feature: &Feature, zoom: f64) -> Option<RenderStyle> {
        style(feature.layer_name(), feature, zoom, self.palette)
    }

    // Selection.

    pub fn click(&mut self, x_px: f64, y_px: f64) -> Option<HitTestRequest> {
        let request = self.controller.on_click(x_px, y_px)?;
        tracing::debug!(seq = request.seq, x_px, y_px, "hit-test issued");
        Some(request)
    }

    pub fn apply_hit_result(&mut self, seq: u64, hits: &[Feature]) {
        match self.controller.on_hit_result(seq, hits) {
            PopupEffect::AnchorAt { x_px, y_px } => {
                tracing::debug!(seq, "feature selected");
                self.popup_anchor = Some((x_px, y_px));
            }
            PopupEffect::Hide => {
                self.popup_anchor = None;
            }
            PopupEffect::None => {}
        }
    }

    pub fn selection(&self) -> &SelectionState {
        self.controller.selection()
    }

    pub fn popup_anchor(&self) -> Option<(f64, f64)> {
        self.popup_anchor
    }

    /// Permanent teardown; in-flight hit-tests are ignored from here on.
    pub fn dispose(&mut self) {
        self.controller.dispose();
        self.popup_anchor = None;
    }
}

#[cfg(test)]
mod tests {
    use features::{AttrValue, Feature};
    use pretty_assertions::assert_eq;
    use selection::SelectionState;
    use sources::{LoadState, SourceKind};
    use symbology::RenderStyle;

    use super::ViewerSession;

    const DOC: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"layer": "water", "name:en": "Lake"},
            "geometry": {"type": "Point", "coordinates": [8.5, 46.0]}
        }]
    }"#;

    fn road() -> Feature {
        Feature::new(vec![("layer".to_string(), AttrValue::from("roads"))])
    }

    #[test]
    fn document_session_loads_and_fits() {
        let mut s = ViewerSession::open("mem://doc", "alps.geojson", "light").expect("open");
        assert_eq!(s.kind(), SourceKind::Document);

        s.begin_load();
        assert!(s.loading());
        s.finish_load(DOC);
        assert_eq!(s.load_state(), LoadState::Loaded);

        let extent = s.take_fit_extent().expect("fit after load-end");
        assert_eq!((extent.min_lon, extent.max_lat), (8.5, 46.0));
        assert_eq!(s.layer().expect("layer").features.len(), 1);
    }

    #[test]
    fn incompatible_files_open_no_session() {
        assert!(ViewerSession::open("mem://x", "picture.png", "light").is_none());
    }

    #[test]
    fn theme_switch_restyles_without_touching_geometry_fields() {
        let mut s = ViewerSession::open("mem://t", "world.pmtiles", "light").expect("open");
        let light = s.style_for(&road(), 15.0);
        s.set_color_mode("dark");
        let dark = s.style_for(&road(), 15.0);

        let (Some(RenderStyle::Stroke(light)), Some(RenderStyle::Stroke(dark))) = (light, dark)
        else {
            panic!("expected strokes");
        };
        assert_eq!(light.width_px, dark.width_px);
        assert_ne!(light.color, dark.color);
    }

    #[test]
    fn click_hit_miss_controls_popup_anchor() {
        let mut s = ViewerSession::open("mem://t", "world.pmtiles", "dark").expect("open");

        let req = s.click(40.0, 30.0).expect("request");
        s.apply_hit_result(req.seq, &[road()]);
        assert_eq!(s.popup_anchor(), Some((40.0, 30.0)));
        assert!(matches!(s.selection(), SelectionState::Feature(_)));

        let req = s.click(200.0, 10.0).expect("request");
        s.apply_hit_result(req.seq, &[]);
        assert_eq!(s.popup_anchor(), None);
        assert_eq!(s.selection(), &SelectionState::None);
    }

    #[test]
    fn stale_result_leaves_popup_at_winner() {
        let mut s = ViewerSession::open("mem://t", "world.pmtiles", "dark").expect("open");
        let a = s.click(1.0, 1.0).expect("a");
        let b = s.click(2.0, 2.0).expect("b");

        s.apply_hit_result(b.seq, &[road()]);
        s.apply_hit_result(a.seq, &[]);
        assert_eq!(s.popup_anchor(), Some((2.0, 2.0)));
    }

    #[test]
    fn disposal_silences_in_flight_results() {
        let mut s = ViewerSession::open("mem://t", "world.pmtiles", "dark").expect("open");
        let req = s.click(1.0, 1.0).expect("request");
        s.dispose();
        s.apply_hit_result(req.seq, &[road()]);
        assert_eq!(s.popup_anchor(), None);
        assert!(s.click(3.0, 3.0).is_none());
    }

    #[test]
    fn tile_errors_surface_as_error_flag() {
        let mut s = ViewerSession::open("mem://t", "world.pmtiles", "dark").expect("open");
        assert!(!s.error());
        s.notify_tile_error("404");
        assert!(s.error());
    }
}
