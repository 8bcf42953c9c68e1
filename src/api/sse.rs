//! SSE handshake and keepalive.
//!
//! A client opening `GET /sse` receives one `hello` event describing the
//! server, then a `ping` event every `ping_interval`. No application data
//! flows over this channel.

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures_util::{Stream, StreamExt, stream};
use serde_json::json;
use tokio::time::{Instant, interval_at};
use tracing::info;

use super::handlers::MCP_PATH;
use super::state::AppState;
use crate::mcp::server::{PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};
use crate::trello::CardRepository;

/// Logs when the stream holding it is dropped, i.e. the client went away
/// or the server shut down.
struct ConnectionGuard;

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        info!("SSE client disconnected");
    }
}

/// GET /sse
pub async fn sse_handler<R: CardRepository + 'static>(
    State(state): State<AppState<R>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE client connected");

    let stream = stream::once(async { hello_event() })
        .chain(liveness_ticks(state.ping_interval()))
        .map(Ok)
        .take_until(state.shutdown().clone().cancelled_owned());

    Sse::new(stream)
}

pub fn hello_event() -> Event {
    let payload = json!({
        "server": SERVER_NAME,
        "version": SERVER_VERSION,
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "endpoint": MCP_PATH,
    });
    Event::default().event("hello").data(payload.to_string())
}

/// Endless `ping` events, the first one a full `period` after subscribing.
/// Ticks are numbered from 1.
pub fn liveness_ticks(period: Duration) -> impl Stream<Item = Event> {
    let interval = interval_at(Instant::now() + period, period);

    stream::unfold(
        (interval, 0u64, ConnectionGuard),
        |(mut interval, tick, guard)| async move {
            interval.tick().await;
            let tick = tick + 1;
            let event = Event::default()
                .event("ping")
                .data(json!({ "tick": tick }).to_string());
            Some((event, (interval, tick, guard)))
        },
    )
}
