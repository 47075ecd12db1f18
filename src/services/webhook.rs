//! The delivery bridge between Telegram's webhook pushes and the command
//! dispatcher. The HTTP handler only validates that the body is a JSON
//! update, hands it to the dispatch queue, and acknowledges immediately;
//! it never waits for the command handler to run.

use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use futures::Stream;
use std::convert::Infallible;
use std::pin::Pin;
use teloxide::stop::{mk_stop_token, StopToken};
use teloxide::types::Update;
use teloxide::update_listeners::{StatefulListener, UpdateListener};
use tokio::sync::mpsc;

/// Route the callback URL must point at.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Fixed acknowledgment body for accepted updates.
pub const ACK_BODY: &str = "ok";

#[derive(Clone)]
struct BridgeState {
    queue: mpsc::UnboundedSender<Result<Update, Infallible>>,
}

type BridgeStream = Pin<Box<dyn Stream<Item = Result<Update, Infallible>> + Send>>;

/// Builds the webhook route and the matching update listener the dispatcher
/// consumes. The queue is unbounded: the bridge never blocks the HTTP
/// response on a slow handler.
pub fn update_bridge() -> (Router, impl UpdateListener<Err = Infallible>) {
    let (tx, rx) = mpsc::unbounded_channel();

    let stream: BridgeStream = Box::pin(futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|update| (update, rx))
    }));

    // The bridge never triggers the token itself; shutdown rides on process
    // teardown like the rest of the dispatcher.
    let (stop_token, _stop_flag) = mk_stop_token();
    let listener = StatefulListener::new((stream, stop_token), bridge_stream, bridge_stop_token);

    (bridge_router(tx), listener)
}

// Named accessors: the listener wants functions generic over the borrow
// lifetime, which closures over a boxed stream do not infer to.
fn bridge_stream(state: &mut (BridgeStream, StopToken)) -> &mut BridgeStream {
    &mut state.0
}

fn bridge_stop_token(state: &mut (BridgeStream, StopToken)) -> StopToken {
    state.1.clone()
}

fn bridge_router(queue: mpsc::UnboundedSender<Result<Update, Infallible>>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(receive_update))
        .with_state(BridgeState { queue })
}

/// Non-JSON bodies never reach this point; axum's extractor already
/// rejected them with a client-error status.
async fn receive_update(
    State(state): State<BridgeState>,
    Json(update): Json<Update>,
) -> (StatusCode, &'static str) {
    tracing::debug!("Webhook update {} received", update.id);

    if state.queue.send(Ok(update)).is_err() {
        tracing::error!("Dispatch queue is closed, dropping webhook update");
        return (StatusCode::SERVICE_UNAVAILABLE, "dispatcher unavailable");
    }

    (StatusCode::OK, ACK_BODY)
}
