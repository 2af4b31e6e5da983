//! Event handling system

use crate::error::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};
#[cfg(windows)]
use tokio::signal::windows::{ctrl_c, CtrlC};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tokio_stream::StreamExt;
use tracing::debug;

/// Dashboard events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashEvent {
    /// Key press event
    Key(KeyEvent),

    /// Window resize event
    Resize(u16, u16),

    /// Refresh timer fired
    Tick,

    /// Quit requested by key or signal
    Quit,
}

impl DashEvent {
    /// Translate a raw terminal event; `None` for events we ignore
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit_key(&key) {
                    Some(DashEvent::Quit)
                } else {
                    Some(DashEvent::Key(key))
                }
            }
            Event::Resize(w, h) => Some(DashEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// `q` or Ctrl+C (raw mode delivers Ctrl+C as a key, not a signal)
fn is_quit_key(key: &KeyEvent) -> bool {
    matches!(
        (key.code, key.modifiers),
        (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('Q'), KeyModifiers::SHIFT)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}

/// Interrupt listener registered once for the whole session.
///
/// Signals delivered while nobody is waiting (e.g. during a refresh) are
/// buffered and reported by the next [`Interrupts::recv`].
pub struct Interrupts {
    #[cfg(unix)]
    inner: Signal,
    #[cfg(windows)]
    inner: CtrlC,
}

impl Interrupts {
    /// Register the listener; needs a running tokio runtime
    pub fn new() -> Result<Self> {
        #[cfg(unix)]
        let inner = signal(SignalKind::interrupt())?;
        #[cfg(windows)]
        let inner = ctrl_c()?;
        Ok(Self { inner })
    }

    /// Wait for the next interrupt
    pub async fn recv(&mut self) {
        if self.inner.recv().await.is_none() {
            // Listener closed: no interrupt can arrive any more
            std::future::pending::<()>().await;
        }
    }
}

/// Produces [`DashEvent`]s from terminal input, the refresh timer and
/// SIGINT, one at a time.
pub struct EventSource {
    terminal: EventStream,
    ticker: Interval,
    interrupts: Interrupts,
}

impl EventSource {
    /// Create a source whose timer fires every `refresh`.
    ///
    /// The first tick is one full period away; startup fetches on its own.
    pub fn new(refresh: Duration) -> Result<Self> {
        let mut ticker = interval(refresh);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.reset();
        Ok(Self {
            terminal: EventStream::new(),
            ticker,
            interrupts: Interrupts::new()?,
        })
    }

    /// Restart the timer period, e.g. after a manual refresh
    pub fn reset_timer(&mut self) {
        self.ticker.reset();
    }

    /// Wait for the next relevant event
    pub async fn next(&mut self) -> Result<DashEvent> {
        loop {
            tokio::select! {
                _ = self.ticker.tick() => return Ok(DashEvent::Tick),
                _ = self.interrupts.recv() => {
                    debug!("Interrupt signal received");
                    return Ok(DashEvent::Quit);
                }
                maybe = self.terminal.next() => match maybe {
                    Some(Ok(event)) => {
                        if let Some(event) = DashEvent::from_terminal(event) {
                            return Ok(event);
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    // Input closed: nothing more can arrive, treat as quit
                    None => return Ok(DashEvent::Quit),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            DashEvent::from_terminal(key(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(DashEvent::Quit)
        );
        assert_eq!(
            DashEvent::from_terminal(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(DashEvent::Quit)
        );
    }

    #[test]
    fn test_shift_q_quits() {
        assert_eq!(
            DashEvent::from_terminal(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)),
            Some(DashEvent::Quit)
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_interrupt_between_waits_is_not_lost() {
        let mut interrupts = Interrupts::new().unwrap();

        // Nobody is waiting on the listener while the signal lands, as
        // during a refresh
        let status = std::process::Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());
        tokio::time::sleep(Duration::from_millis(100)).await;

        tokio::time::timeout(Duration::from_secs(2), interrupts.recv())
            .await
            .expect("interrupt delivered while idle must be reported");
    }

    #[test]
    fn test_plain_c_is_a_key() {
        let event = DashEvent::from_terminal(key(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(matches!(event, Some(DashEvent::Key(_))));
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            DashEvent::from_terminal(Event::Resize(120, 40)),
            Some(DashEvent::Resize(120, 40))
        );
    }

    #[test]
    fn test_key_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(DashEvent::from_terminal(release), None);
    }

    #[test]
    fn test_mouse_and_focus_ignored() {
        let mouse = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(DashEvent::from_terminal(mouse), None);
        assert_eq!(DashEvent::from_terminal(Event::FocusGained), None);
    }
}
