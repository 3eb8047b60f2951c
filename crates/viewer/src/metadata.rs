use sources::SourceKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ViewerMetadata {
    pub title: &'static str,
    pub description: &'static str,
}

pub const VIEWER_METADATA: ViewerMetadata = ViewerMetadata {
    title: "Map Viewer",
    description: "A map viewer.",
};

/// Whether this viewer handles the file. Delegates to the extension-based
/// source-kind detection; for anything else the core is never invoked.
pub fn compatibility_check(filename: &str) -> bool {
    SourceKind::detect(filename).is_some()
}
