//! Dashboard event loop
//!
//! One logical flow owns the current snapshot and terminal size. Each event
//! is handled to completion before the next is read: a refresh awaits the
//! whole aggregation inline, so a slow host holds the loop (bounded by the
//! HTTP request timeout).

use crate::aggregator::compute_state;
use crate::error::Result;
use crate::services::StatusSource;
use crate::tui::events::{DashEvent, EventSource};
use crate::tui::layout::{error_banner, layout, Region};
use crate::tui::render::draw_regions;
use crate::types::Snapshot;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, info, warn};

/// Application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Running normally
    Running,
    /// Quit requested; terminal
    Terminated,
}

/// What handling one event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Snapshot re-fetched (or the attempt failed and the banner changed)
    Refreshed,
    /// Terminal size changed, snapshot untouched
    Resized,
    /// Loop must stop
    Quit,
    /// Nothing changed
    Ignored,
}

/// Anything that can feed the loop with events
#[async_trait]
pub trait Events: Send {
    /// Block until the next event
    async fn next_event(&mut self) -> Result<DashEvent>;

    /// Called after every refresh so the timer measures from now
    fn refreshed(&mut self) {}
}

#[async_trait]
impl Events for EventSource {
    async fn next_event(&mut self) -> Result<DashEvent> {
        self.next().await
    }

    fn refreshed(&mut self) {
        self.reset_timer();
    }
}

/// Dashboard state and the transitions between refreshes and redraws
pub struct App<S: StatusSource> {
    source: S,
    host: String,
    snapshot: Snapshot,
    size: (u16, u16),
    last_error: Option<String>,
    state: LoopState,
}

impl<S: StatusSource> App<S> {
    /// Create the app with an empty snapshot for `host`
    pub fn new(host: impl Into<String>, source: S, size: (u16, u16)) -> Self {
        let host = host.into();
        Self {
            source,
            snapshot: Snapshot::empty(host.clone()),
            host,
            size,
            last_error: None,
            state: LoopState::Running,
        }
    }

    /// Current snapshot
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Current terminal size as `(width, height)`
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Message of the last failed refresh, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Current loop state
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Re-run aggregation.
    ///
    /// On success the snapshot is replaced whole. On failure the previous
    /// snapshot stays on screen and the error is shown in the banner.
    pub async fn refresh(&mut self) {
        match compute_state(&self.host, &self.source).await {
            Ok(snapshot) => {
                info!(
                    "Refreshed {}: {} applications, {} stages",
                    self.host,
                    snapshot.applications.len(),
                    snapshot.stage_count()
                );
                self.snapshot = snapshot;
                self.last_error = None;
            }
            Err(e) => {
                warn!("Refresh of {} failed: {}", self.host, e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Apply one event
    pub async fn handle_event(&mut self, event: DashEvent) -> Transition {
        if self.state == LoopState::Terminated {
            return Transition::Quit;
        }

        match event {
            DashEvent::Tick => {
                debug!("Timer refresh");
                self.refresh().await;
                Transition::Refreshed
            }
            DashEvent::Key(key) if is_refresh_key(key.code, key.modifiers) => {
                debug!("Manual refresh");
                self.refresh().await;
                Transition::Refreshed
            }
            DashEvent::Key(_) => Transition::Ignored,
            DashEvent::Resize(width, height) => {
                debug!("Resize to {}x{}", width, height);
                self.size = (width, height);
                Transition::Resized
            }
            DashEvent::Quit => {
                info!("Quit requested");
                self.state = LoopState::Terminated;
                Transition::Quit
            }
        }
    }

    /// Regions for the current snapshot, size and error banner
    pub fn regions(&self) -> Vec<Region> {
        let (width, height) = self.size;
        let mut regions = layout(width, height, &self.snapshot);
        if let Some(message) = &self.last_error {
            if height > 1 {
                regions.push(error_banner(width, message));
            }
        }
        regions
    }

    /// Lay out and paint the whole screen
    pub fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        let regions = self.regions();
        terminal.draw(|frame| draw_regions(frame, &regions))?;
        Ok(())
    }
}

fn is_refresh_key(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(
        (code, modifiers),
        (KeyCode::Char('r'), KeyModifiers::NONE) | (KeyCode::Char('R'), KeyModifiers::SHIFT)
    )
}

/// Drive `app` until quit: fetch and draw once, then handle events.
pub async fn run<S, B, E>(
    app: &mut App<S>,
    terminal: &mut Terminal<B>,
    events: &mut E,
) -> Result<()>
where
    S: StatusSource,
    B: Backend,
    E: Events + ?Sized,
{
    app.refresh().await;
    app.draw(terminal)?;
    events.refreshed();

    loop {
        let event = events.next_event().await?;
        match app.handle_event(event).await {
            Transition::Quit => break,
            Transition::Ignored => {}
            Transition::Refreshed => {
                events.refreshed();
                app.draw(terminal)?;
            }
            Transition::Resized => app.draw(terminal)?,
        }
    }

    debug!("Event loop terminated");
    Ok(())
}
