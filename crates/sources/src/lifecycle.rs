/// Load lifecycle for one adapter instance.
///
/// `Loaded` and `Error` are terminal: an adapter is created per file and
/// never reused, so there is no way back out of either.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    LoadStart,
    LoadEnd,
    LoadError,
}

impl LoadState {
    /// Applies one lifecycle event.
    ///
    /// Events that have no legal transition from the current state are
    /// ignored; in particular nothing leaves a terminal state.
    pub fn apply(self, event: SourceEvent) -> LoadState {
        match (self, event) {
            (LoadState::Idle, SourceEvent::LoadStart) => LoadState::Loading,
            (LoadState::Loading, SourceEvent::LoadEnd) => LoadState::Loaded,
            (LoadState::Idle | LoadState::Loading, SourceEvent::LoadError) => LoadState::Error,
            (state, _) => state,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, LoadState::Loaded | LoadState::Error)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceEventRecord {
    pub seq: u64,
    pub event: SourceEvent,
    pub detail: String,
}

/// Append-only lifecycle event stream for one adapter.
///
/// The shell observes load-start/load-end/load-error here instead of
/// polling `LoadState`.
#[derive(Debug, Default)]
pub struct SourceEventLog {
    next_seq: u64,
    events: Vec<SourceEventRecord>,
}

impl SourceEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: SourceEvent, detail: impl Into<String>) {
        self.events.push(SourceEventRecord {
            seq: self.next_seq,
            event,
            detail: detail.into(),
        });
        self.next_seq += 1;
    }

    pub fn events(&self) -> &[SourceEventRecord] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<SourceEventRecord> {
        std::mem::take(&mut self.events)
    }
}
