//! `GET /sse`: capability advertisement and keepalive stream.
//!
//! The first event is `manifest` carrying the tool manifest, followed right
//! away by a `ping` (`data: ok`). Further pings follow every
//! `stream.keepalive_secs`, plus
//! `session.created` / `session.heartbeat` notices as they happen. The
//! stream ends when the client disconnects.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, Sse};
use futures_util::stream::Stream;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{interval, MissedTickBehavior};

use crate::events::SessionEvent;
use crate::state::AppState;

enum Next {
    Ping,
    Session(Result<SessionEvent, RecvError>),
}

pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let manifest = serde_json::to_string(state.manifest.as_ref()).unwrap_or_default();
    let mut rx = state.events.subscribe();
    let period = Duration::from_secs(state.config.stream.keepalive_secs.max(1));

    tracing::debug!(keepalive_secs = period.as_secs(), "sse subscriber connected");

    let stream = async_stream::stream! {
        yield Ok(Event::default().event("manifest").data(manifest));

        // First tick completes at once: a ping follows the manifest immediately.
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let next = tokio::select! {
                _ = ticker.tick() => Next::Ping,
                msg = rx.recv() => Next::Session(msg),
            };

            match next {
                Next::Ping => {
                    yield Ok(Event::default().event("ping").data("ok"));
                }
                Next::Session(Ok(event)) => {
                    if let Ok(json) = serde_json::to_string(&event) {
                        yield Ok(Event::default().event(event.name()).data(json));
                    }
                }
                Next::Session(Err(RecvError::Lagged(skipped))) => {
                    tracing::debug!(skipped, "sse subscriber lagged");
                }
                Next::Session(Err(RecvError::Closed)) => break,
            }
        }
    };

    Sse::new(stream)
}
