//! The view state machine.
//!
//! [`ViewController::update`] is a pure reducer: it consumes one [`Event`], mutates the owned
//! [`ViewState`] and returns the [`Effect`]s the caller must run. Timers and collaborator calls
//! come back in as events carrying the token or sequence number they were issued with, and
//! anything that is no longer the latest is dropped.

use std::time::Duration;

use serde::Serialize;

use crate::{
    Config,
    error::ViewError,
    format,
    model::{LocationCandidate, WeatherSnapshot},
};

/// Tunables the reducer needs; everything else lives in [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub min_query_chars: usize,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self { debounce: config.debounce(), min_query_chars: config.min_query_chars }
    }
}

/// The forecast day shown in the detail modal.
///
/// Holds an index into the current snapshot's forecast, not a copy of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectedDay {
    pub index: usize,
    /// English weekday name of the day's date, `None` if the date did not parse.
    pub weekday: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// No snapshot has ever been loaded.
    Idle,
    Searching { query: String },
    ShowingCandidates { query: String, candidates: Vec<LocationCandidate> },
    Loading { candidate: LocationCandidate },
    Displaying,
    DetailOpen { selected: SelectedDay },
    Error { error: ViewError },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Searching { .. } => "searching",
            Phase::ShowingCandidates { .. } => "showing_candidates",
            Phase::Loading { .. } => "loading",
            Phase::Displaying => "displaying",
            Phase::DetailOpen { .. } => "detail_open",
            Phase::Error { .. } => "error",
        }
    }

    pub fn is_search_open(&self) -> bool {
        matches!(self, Phase::Searching { .. } | Phase::ShowingCandidates { .. })
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Phase::Searching { query } | Phase::ShowingCandidates { query, .. } => Some(query),
            _ => None,
        }
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        match self {
            Phase::ShowingCandidates { candidates, .. } => candidates,
            _ => &[],
        }
    }

    pub fn selected_day(&self) -> Option<&SelectedDay> {
        match self {
            Phase::DetailOpen { selected } => Some(selected),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            Phase::Error { error } => Some(error),
            _ => None,
        }
    }
}

/// Inputs to the reducer: user actions, timer firings and collaborator results.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ToggleSearch,
    QueryChanged(String),
    DebounceElapsed { token: u64 },
    CandidatesLoaded { seq: u64, candidates: Vec<LocationCandidate> },
    LookupFailed { seq: u64, reason: String },
    PickCandidate(usize),
    WeatherLoaded { seq: u64, snapshot: WeatherSnapshot },
    FetchFailed { seq: u64, reason: String },
    OpenDay(usize),
    DismissModal,
    DismissError,
}

/// Work the reducer asks its driver to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Replace any pending debounce timer with one that reports `token` after `delay`.
    ScheduleLookup { token: u64, delay: Duration },
    /// Drop the pending debounce timer and any lookup still in flight.
    CancelLookup,
    Lookup { seq: u64, query: String },
    Fetch { seq: u64, candidate: LocationCandidate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingFetch {
    seq: u64,
    candidate: LocationCandidate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// At most one snapshot is current; a new one replaces it wholesale.
    pub snapshot: Option<WeatherSnapshot>,
    pub phase: Phase,
    pending_fetch: Option<PendingFetch>,
    latest_lookup: Option<u64>,
    armed_token: Option<u64>,
    next_token: u64,
    next_seq: u64,
}

impl ViewState {
    pub fn loading_candidate(&self) -> Option<&LocationCandidate> {
        self.pending_fetch.as_ref().map(|p| &p.candidate)
    }

    /// An armed timer, the latest lookup or the latest fetch has yet to report back.
    pub fn has_outstanding_work(&self) -> bool {
        self.armed_token.is_some() || self.latest_lookup.is_some() || self.pending_fetch.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ViewController {
    state: ViewState,
    settings: ControllerSettings,
}

impl ViewController {
    pub fn new(settings: ControllerSettings, snapshot: Option<WeatherSnapshot>) -> Self {
        let phase = if snapshot.is_some() { Phase::Displaying } else { Phase::Idle };

        Self {
            state: ViewState {
                snapshot,
                phase,
                pending_fetch: None,
                latest_lookup: None,
                armed_token: None,
                next_token: 1,
                next_seq: 1,
            },
            settings,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> &Phase {
        &self.state.phase
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.state.snapshot.as_ref()
    }

    pub fn update(&mut self, event: Event) -> Vec<Effect> {
        let before = self.state.phase.name();

        let effects = match event {
            Event::ToggleSearch => self.toggle_search(),
            Event::QueryChanged(query) => self.query_changed(query),
            Event::DebounceElapsed { token } => self.debounce_elapsed(token),
            Event::CandidatesLoaded { seq, candidates } => self.candidates_loaded(seq, candidates),
            Event::LookupFailed { seq, reason } => self.lookup_failed(seq, reason),
            Event::PickCandidate(index) => self.pick_candidate(index),
            Event::WeatherLoaded { seq, snapshot } => self.weather_loaded(seq, snapshot),
            Event::FetchFailed { seq, reason } => self.fetch_failed(seq, reason),
            Event::OpenDay(index) => self.open_day(index),
            Event::DismissModal => self.dismiss_modal(),
            Event::DismissError => self.dismiss_error(),
        };

        let after = self.state.phase.name();
        if before != after {
            tracing::debug!(from = before, to = after, "view transition");
        }

        effects
    }

    fn toggle_search(&mut self) -> Vec<Effect> {
        match self.state.phase {
            Phase::DetailOpen { .. } => {
                tracing::debug!("search toggle ignored while the detail modal is open");
                Vec::new()
            }
            Phase::Searching { .. } | Phase::ShowingCandidates { .. } => {
                let effects = self.abandon_lookup();
                self.state.phase = self.resting_phase();
                effects
            }
            _ => {
                self.state.phase = Phase::Searching { query: String::new() };
                Vec::new()
            }
        }
    }

    fn query_changed(&mut self, query: String) -> Vec<Effect> {
        if !self.state.phase.is_search_open() {
            tracing::debug!("query change ignored while search is closed");
            return Vec::new();
        }

        if query.chars().count() <= self.settings.min_query_chars {
            let effects = self.abandon_lookup();
            self.state.phase = Phase::Searching { query };
            return effects;
        }

        match &mut self.state.phase {
            Phase::Searching { query: current } | Phase::ShowingCandidates { query: current, .. } => {
                *current = query;
            }
            _ => {}
        }

        // Whatever lookup is in flight was for an older query.
        self.state.latest_lookup = None;

        let token = self.state.next_token;
        self.state.next_token += 1;
        self.state.armed_token = Some(token);

        vec![Effect::ScheduleLookup { token, delay: self.settings.debounce }]
    }

    fn debounce_elapsed(&mut self, token: u64) -> Vec<Effect> {
        if self.state.armed_token != Some(token) {
            tracing::debug!(token, "stale debounce timer ignored");
            return Vec::new();
        }
        self.state.armed_token = None;

        let Some(query) = self.state.phase.query() else {
            return Vec::new();
        };
        if query.chars().count() <= self.settings.min_query_chars {
            return Vec::new();
        }
        let query = query.to_owned();

        let seq = self.next_seq();
        self.state.latest_lookup = Some(seq);

        vec![Effect::Lookup { seq, query }]
    }

    fn candidates_loaded(&mut self, seq: u64, candidates: Vec<LocationCandidate>) -> Vec<Effect> {
        if self.state.latest_lookup != Some(seq) {
            tracing::debug!(seq, "stale lookup result ignored");
            return Vec::new();
        }
        self.state.latest_lookup = None;

        let Some(query) = self.state.phase.query() else {
            return Vec::new();
        };
        let query = query.to_owned();

        self.state.phase = if candidates.is_empty() {
            Phase::Searching { query }
        } else {
            Phase::ShowingCandidates { query, candidates }
        };

        Vec::new()
    }

    fn lookup_failed(&mut self, seq: u64, reason: String) -> Vec<Effect> {
        if self.state.latest_lookup != Some(seq) {
            tracing::debug!(seq, "stale lookup failure ignored");
            return Vec::new();
        }

        self.state.latest_lookup = None;

        let query = self.state.phase.query().unwrap_or_default().to_owned();
        tracing::warn!(%query, %reason, "location lookup failed");

        let effects = self.abandon_lookup();
        self.state.phase = Phase::Error { error: ViewError::LookupFailed { query, reason } };
        effects
    }

    fn pick_candidate(&mut self, index: usize) -> Vec<Effect> {
        let Some(candidate) = self.state.phase.candidates().get(index).cloned() else {
            tracing::debug!(index, "pick ignored: no such candidate");
            return Vec::new();
        };

        let mut effects = self.abandon_lookup();

        let seq = self.next_seq();
        self.state.pending_fetch = Some(PendingFetch { seq, candidate: candidate.clone() });
        self.state.phase = Phase::Loading { candidate: candidate.clone() };

        effects.push(Effect::Fetch { seq, candidate });
        effects
    }

    fn weather_loaded(&mut self, seq: u64, snapshot: WeatherSnapshot) -> Vec<Effect> {
        if !self.take_pending_fetch(seq) {
            tracing::debug!(seq, "stale weather result ignored");
            return Vec::new();
        }

        self.state.snapshot = Some(snapshot);
        if matches!(self.state.phase, Phase::Loading { .. }) {
            self.state.phase = Phase::Displaying;
        }

        Vec::new()
    }

    fn fetch_failed(&mut self, seq: u64, reason: String) -> Vec<Effect> {
        let Some(pending) = self.state.pending_fetch.take_if(|p| p.seq == seq) else {
            tracing::debug!(seq, "stale weather failure ignored");
            return Vec::new();
        };

        let location = pending.candidate.to_string();
        tracing::warn!(%location, %reason, "weather fetch failed");

        let effects = self.abandon_lookup();
        self.state.phase = Phase::Error { error: ViewError::FetchFailed { location, reason } };
        effects
    }

    fn open_day(&mut self, index: usize) -> Vec<Effect> {
        if self.state.phase != Phase::Displaying {
            tracing::debug!(index, phase = self.state.phase.name(), "open day ignored");
            return Vec::new();
        }

        let Some(day) = self.state.snapshot.as_ref().and_then(|s| s.day(index)) else {
            tracing::debug!(index, "open day ignored: index outside the forecast");
            return Vec::new();
        };

        let weekday = format::weekday_name(&day.date);
        self.state.phase = Phase::DetailOpen { selected: SelectedDay { index, weekday } };

        Vec::new()
    }

    fn dismiss_modal(&mut self) -> Vec<Effect> {
        if matches!(self.state.phase, Phase::DetailOpen { .. }) {
            self.state.phase = Phase::Displaying;
        }
        Vec::new()
    }

    fn dismiss_error(&mut self) -> Vec<Effect> {
        if matches!(self.state.phase, Phase::Error { .. }) {
            self.state.phase = self.resting_phase();
        }
        Vec::new()
    }

    /// Disarms the debounce timer and forgets the in-flight lookup.
    fn abandon_lookup(&mut self) -> Vec<Effect> {
        let in_flight = self.state.latest_lookup.take().is_some();
        let armed = self.state.armed_token.take().is_some();

        if in_flight || armed { vec![Effect::CancelLookup] } else { Vec::new() }
    }

    fn take_pending_fetch(&mut self, seq: u64) -> bool {
        self.state.pending_fetch.take_if(|p| p.seq == seq).is_some()
    }

    /// Where the screen settles once search, modal or error are out of the way.
    fn resting_phase(&self) -> Phase {
        if let Some(pending) = &self.state.pending_fetch {
            Phase::Loading { candidate: pending.candidate.clone() }
        } else if self.state.snapshot.is_some() {
            Phase::Displaying
        } else {
            Phase::Idle
        }
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.state.next_seq;
        self.state.next_seq += 1;
        seq
    }
}
