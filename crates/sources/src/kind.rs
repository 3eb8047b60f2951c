/// The two supported source kinds. A closed set: the viewer's schema has
/// exactly these, not an open plugin surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceKind {
    TiledArchive,
    Document,
}

impl SourceKind {
    /// Extension-based compatibility detection, case-insensitive.
    ///
    /// This is the sole boundary contract with the host file-viewing
    /// environment: `None` means the file is incompatible and the viewer
    /// core is never invoked for it.
    pub fn detect(filename: &str) -> Option<SourceKind> {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pmtiles") {
            Some(SourceKind::TiledArchive)
        } else if lower.ends_with(".geojson") {
            Some(SourceKind::Document)
        } else {
            None
        }
    }
}
