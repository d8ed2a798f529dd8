//! Server-sent event plumbing shared by the streaming endpoints.

use std::convert::Infallible;

use actix_web::{HttpResponse, http::header, web::Bytes};
use futures::StreamExt;
use futures::channel::mpsc::{self, UnboundedSender};
use postcraft_shared::StreamEvent;

/// Write side of an SSE response.
///
/// Sends never block; once the client goes away further events are dropped.
pub struct EventSink {
    tx: UnboundedSender<Bytes>,
}

impl EventSink {
    pub fn send(&self, event: &StreamEvent) {
        if self
            .tx
            .unbounded_send(Bytes::from(event.to_sse_frame()))
            .is_err()
        {
            tracing::debug!("Client disconnected, dropping stream event");
        }
    }
}

/// Open an event stream. The response ends when the sink is dropped.
pub fn event_stream() -> (EventSink, HttpResponse) {
    let (tx, rx) = mpsc::unbounded::<Bytes>();

    let response = HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header((header::CACHE_CONTROL, "no-cache"))
        .streaming(rx.map(Ok::<_, Infallible>));

    (EventSink { tx }, response)
}
