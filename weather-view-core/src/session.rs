//! Async driver around [`ViewController`].
//!
//! The session runs the reducer's effects on the tokio runtime and feeds their outcomes back as
//! events through an internal channel. All state changes still happen in `dispatch`, on the
//! caller's task.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    Config,
    assets::DisplayLocale,
    controller::{ControllerSettings, Effect, Event, ViewController, ViewState},
    debounce::Debouncer,
    model::{LocationCandidate, WeatherSnapshot},
    provider::{LocationSearch, Providers, WeatherFetcher, providers_from_config},
    view::Screen,
};

#[derive(Debug)]
pub struct Session {
    controller: ViewController,
    locale: DisplayLocale,
    search: Arc<dyn LocationSearch>,
    weather: Arc<dyn WeatherFetcher>,
    debouncer: Debouncer,
    lookup_task: Option<JoinHandle<()>>,
    fetch_tasks: Vec<JoinHandle<()>>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
}

impl Session {
    pub fn new(
        settings: ControllerSettings,
        locale: DisplayLocale,
        providers: Providers,
        initial: Option<WeatherSnapshot>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Self {
            controller: ViewController::new(settings, initial),
            locale,
            search: providers.search,
            weather: providers.weather,
            debouncer: Debouncer::new(),
            lookup_task: None,
            fetch_tasks: Vec::new(),
            events_tx,
            events_rx,
        }
    }

    /// A session wired to the built-in collaborators, showing the initial snapshot.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            ControllerSettings::from(config),
            config.locale,
            providers_from_config(config),
            Some(WeatherSnapshot::initial()?),
        ))
    }

    pub fn state(&self) -> &ViewState {
        self.controller.state()
    }

    pub fn locale(&self) -> DisplayLocale {
        self.locale
    }

    pub fn screen(&self) -> Screen {
        Screen::build(self.controller.state(), self.locale)
    }

    /// Applies one event and starts whatever work it asks for. Must be called inside a runtime.
    pub fn dispatch(&mut self, event: Event) {
        for effect in self.controller.update(event) {
            self.run_effect(effect);
        }
    }

    /// Waits for the next internal event (timer or collaborator result) and applies it.
    pub async fn pump(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.dispatch(event);
        }
    }

    /// True while the controller still expects a timer or collaborator result.
    pub fn is_busy(&self) -> bool {
        self.controller.state().has_outstanding_work()
    }

    /// Applies internal events until the controller expects nothing more.
    pub async fn settle(&mut self) {
        while self.is_busy() {
            self.pump().await;
        }
    }

    /// Actor loop: applies UI events and internal events, publishing a screen after each.
    ///
    /// Returns when the UI side hangs up.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<Event>,
        render_tx: mpsc::UnboundedSender<Screen>,
    ) {
        let _ = render_tx.send(self.screen());

        loop {
            let event = tokio::select! {
                ui = ui_rx.recv() => match ui {
                    Some(event) => event,
                    None => break,
                },
                Some(event) = self.events_rx.recv() => event,
            };
            self.dispatch(event);

            if render_tx.send(self.screen()).is_err() {
                break;
            }
        }

        self.shutdown();
    }

    /// Cancels the debounce timer and every outstanding collaborator call.
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
        self.abort_lookup();
        for task in self.fetch_tasks.drain(..) {
            task.abort();
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleLookup { token, delay } => {
                // A lookup still running was for an older query.
                self.abort_lookup();

                let tx = self.events_tx.clone();
                self.debouncer.schedule(delay, async move {
                    let _ = tx.send(Event::DebounceElapsed { token });
                });
            }
            Effect::CancelLookup => {
                self.debouncer.cancel();
                self.abort_lookup();
            }
            Effect::Lookup { seq, query } => self.start_lookup(seq, query),
            Effect::Fetch { seq, candidate } => self.start_fetch(seq, candidate),
        }
    }

    fn abort_lookup(&mut self) {
        if let Some(task) = self.lookup_task.take() {
            task.abort();
        }
    }

    fn start_lookup(&mut self, seq: u64, query: String) {
        self.abort_lookup();

        let search = Arc::clone(&self.search);
        let tx = self.events_tx.clone();

        self.lookup_task = Some(tokio::spawn(async move {
            let event = match search.search(&query).await {
                Ok(candidates) => Event::CandidatesLoaded { seq, candidates },
                Err(err) => Event::LookupFailed { seq, reason: format!("{err:#}") },
            };
            let _ = tx.send(event);
        }));
    }

    fn start_fetch(&mut self, seq: u64, candidate: LocationCandidate) {
        let weather = Arc::clone(&self.weather);
        let tx = self.events_tx.clone();

        self.fetch_tasks.retain(|t| !t.is_finished());
        self.fetch_tasks.push(tokio::spawn(async move {
            let event = match weather.fetch_weather(&candidate).await {
                Ok(snapshot) => Event::WeatherLoaded { seq, snapshot },
                Err(err) => Event::FetchFailed { seq, reason: format!("{err:#}") },
            };
            let _ = tx.send(event);
        }));
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}
