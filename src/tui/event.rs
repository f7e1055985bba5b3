use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::StreamExt;
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::app::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    FocusGained,
    FocusLost,
    Resize(u16, u16),
    Tick,
}

/// Merges terminal input with a fixed animation tick.
pub struct EventHandler {
    events: EventStream,
    ticker: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let mut ticker = interval(tick_rate);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            events: EventStream::new(),
            ticker,
        }
    }

    pub async fn next(&mut self) -> Result<AppEvent> {
        loop {
            tokio::select! {
                _ = self.ticker.tick() => return Ok(AppEvent::Tick),
                event = self.events.next() => match event {
                    Some(Ok(event)) => {
                        if let Some(event) = translate(event) {
                            return Ok(event);
                        }
                    }
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(AppEvent::Tick),
                },
            }
        }
    }
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // key release and repeat events are reported on some platforms
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
        Event::FocusGained => Some(AppEvent::FocusGained),
        Event::FocusLost => Some(AppEvent::FocusLost),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    Refresh,
    ToggleLayout,
    NextTab,
    PrevTab,
    /// Focus the search box.
    Search,
    /// Open or close the filter dropdown at this index.
    ToggleFilter(usize),
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn test_translate_ignores_key_release() {
        let mut key = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(translate(Event::Key(key)), Some(AppEvent::Key(key)));

        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert_eq!(translate(Event::Key(key)), None);
    }

    #[test]
    fn test_translate_focus_events() {
        assert_eq!(translate(Event::FocusLost), Some(AppEvent::FocusLost));
        assert_eq!(translate(Event::FocusGained), Some(AppEvent::FocusGained));
        assert_eq!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24)));
    }
}
