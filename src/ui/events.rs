use std::future::poll_fn;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_core::Stream;
use tokio::time::{interval, Interval, MissedTickBehavior};

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    /// Terminal size changed; the next draw picks up the new area.
    Resize,
}

/// Terminal input plus a redraw tick.
pub struct EventHandler {
    input: EventStream,
    tick: Interval,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let mut tick = interval(tick_rate);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self {
            input: EventStream::new(),
            tick,
        }
    }

    /// Next event, or `None` once terminal input has ended. Cancel safe.
    pub async fn next(&mut self) -> Option<AppEvent> {
        loop {
            tokio::select! {
                _ = self.tick.tick() => return Some(AppEvent::Tick),
                event = poll_fn(|cx| std::pin::Pin::new(&mut self.input).poll_next(cx)) => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        return Some(AppEvent::Key(key));
                    }
                    Some(Ok(Event::Resize(..))) => return Some(AppEvent::Resize),
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "terminal input failed");
                        return None;
                    }
                    None => return None,
                },
            }
        }
    }
}
