use crate::extent::Extent;
use crate::geojson::{DocumentFeature, FeatureCollection, GeoJsonError};
use crate::kind::SourceKind;
use crate::lifecycle::{LoadState, SourceEvent, SourceEventLog, SourceEventRecord};

/// The uniform layer both adapter variants normalize to.
///
/// For a tiled archive the feature list is empty: tiles stream through the
/// rendering engine and never pass through the adapter. Decluttering is
/// always requested.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableLayer {
    pub kind: SourceKind,
    pub url: String,
    pub declutter: bool,
    pub features: Vec<DocumentFeature>,
    pub extent: Option<Extent>,
}

#[derive(Debug)]
pub enum SourceLoadError {
    Fetch(String),
    Parse(GeoJsonError),
}

impl std::fmt::Display for SourceLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceLoadError::Fetch(detail) => write!(f, "source fetch failed: {detail}"),
            SourceLoadError::Parse(e) => write!(f, "source parse failed: {e}"),
        }
    }
}

impl std::error::Error for SourceLoadError {}

/// Adapter for a single GeoJSON document.
///
/// Lifecycle: `begin_load` (fetch starts) → `finish_load` (payload parsed)
/// or `fail_load` (fetch failed). On load-end the loaded extent becomes
/// available once via `take_fit_extent`; the consumer must fit the view to
/// it. Errors are sticky; no retry.
#[derive(Debug)]
pub struct DocumentSource {
    url: String,
    state: LoadState,
    layer: Option<RenderableLayer>,
    fit_pending: Option<Extent>,
    log: SourceEventLog,
}

impl DocumentSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: LoadState::Idle,
            layer: None,
            fit_pending: None,
            log: SourceEventLog::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn error(&self) -> bool {
        self.state == LoadState::Error
    }

    pub fn begin_load(&mut self) {
        if self.state != LoadState::Idle {
            return;
        }
        self.state = self.state.apply(SourceEvent::LoadStart);
        self.log.emit(SourceEvent::LoadStart, "document fetch begins");
    }

    /// Completes the load with the fetched payload. A parse failure moves
    /// the adapter to the sticky error state; there is no partial success.
    pub fn finish_load(&mut self, payload: &str) {
        if self.state != LoadState::Loading {
            return;
        }
        match FeatureCollection::from_geojson_str(payload) {
            Ok(collection) => {
                let extent = collection.extent();
                self.layer = Some(RenderableLayer {
                    kind: SourceKind::Document,
                    url: self.url.clone(),
                    declutter: true,
                    features: collection.features,
                    extent,
                });
                self.fit_pending = extent;
                self.state = self.state.apply(SourceEvent::LoadEnd);
                self.log.emit(SourceEvent::LoadEnd, "document parsed");
            }
            Err(e) => {
                self.state = self.state.apply(SourceEvent::LoadError);
                self.log
                    .emit(SourceEvent::LoadError, SourceLoadError::Parse(e).to_string());
            }
        }
    }

    pub fn fail_load(&mut self, detail: impl Into<String>) {
        if self.state.is_terminal() {
            return;
        }
        self.state = self.state.apply(SourceEvent::LoadError);
        self.log.emit(
            SourceEvent::LoadError,
            SourceLoadError::Fetch(detail.into()).to_string(),
        );
    }

    pub fn layer(&self) -> Option<&RenderableLayer> {
        self.layer.as_ref()
    }

    /// The extent the view must fit to, handed out once per load.
    pub fn take_fit_extent(&mut self) -> Option<Extent> {
        self.fit_pending.take()
    }

    pub fn events(&self) -> &[SourceEventRecord] {
        self.log.events()
    }

    pub fn drain_events(&mut self) -> Vec<SourceEventRecord> {
        self.log.drain()
    }
}

/// Adapter for a remote tiled vector archive.
///
/// There is no explicit load-start and no fit-to-extent: tiles arrive
/// lazily through the engine, so the layer exists immediately and the only
/// lifecycle signal is a tile fetch failure.
#[derive(Debug)]
pub struct TiledArchiveSource {
    state: LoadState,
    layer: RenderableLayer,
    log: SourceEventLog,
}

impl TiledArchiveSource {
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            state: LoadState::Idle,
            layer: RenderableLayer {
                kind: SourceKind::TiledArchive,
                url,
                declutter: true,
                features: Vec::new(),
                extent: None,
            },
            log: SourceEventLog::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.layer.url
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn error(&self) -> bool {
        self.state == LoadState::Error
    }

    pub fn on_tile_error(&mut self, detail: impl Into<String>) {
        if self.state.is_terminal() {
            return;
        }
        self.state = self.state.apply(SourceEvent::LoadError);
        self.log.emit(
            SourceEvent::LoadError,
            SourceLoadError::Fetch(detail.into()).to_string(),
        );
    }

    pub fn layer(&self) -> &RenderableLayer {
        &self.layer
    }

    pub fn events(&self) -> &[SourceEventRecord] {
        self.log.events()
    }

    pub fn drain_events(&mut self) -> Vec<SourceEventRecord> {
        self.log.drain()
    }
}

/// The two adapter variants behind one seam. Selected per file by
/// [`SourceKind::detect`]; a new instance is created per file.
#[derive(Debug)]
pub enum DataSource {
    TiledArchive(TiledArchiveSource),
    Document(DocumentSource),
}

impl DataSource {
    pub fn open(url: impl Into<String>, filename: &str) -> Option<DataSource> {
        match SourceKind::detect(filename)? {
            SourceKind::TiledArchive => {
                Some(DataSource::TiledArchive(TiledArchiveSource::new(url)))
            }
            SourceKind::Document => Some(DataSource::Document(DocumentSource::new(url))),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            DataSource::TiledArchive(_) => SourceKind::TiledArchive,
            DataSource::Document(_) => SourceKind::Document,
        }
    }

    pub fn state(&self) -> LoadState {
        match self {
            DataSource::TiledArchive(s) => s.state(),
            DataSource::Document(s) => s.state(),
        }
    }

    pub fn loading(&self) -> bool {
        self.state() == LoadState::Loading
    }

    pub fn error(&self) -> bool {
        self.state() == LoadState::Error
    }

    pub fn layer(&self) -> Option<&RenderableLayer> {
        match self {
            DataSource::TiledArchive(s) => Some(s.layer()),
            DataSource::Document(s) => s.layer(),
        }
    }

    /// Document-only fit effect; tiled archives never fit.
    pub fn take_fit_extent(&mut self) -> Option<Extent> {
        match self {
            DataSource::TiledArchive(_) => None,
            DataSource::Document(s) => s.take_fit_extent(),
        }
    }

    pub fn drain_events(&mut self) -> Vec<SourceEventRecord> {
        match self {
            DataSource::TiledArchive(s) => s.drain_events(),
            DataSource::Document(s) => s.drain_events(),
        }
    }
}
