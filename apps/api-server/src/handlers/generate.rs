//! Post generation endpoint.

use actix_web::{HttpResponse, web};
use tracing::Instrument;

use postcraft_core::PostGenerator;
use postcraft_core::domain::GenerationRequest;
use postcraft_shared::{GenerateRequestDto, StreamEvent};

use super::stream::{EventSink, event_stream};
use crate::middleware::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// Validate the request, then stream pipeline progress and the finished posts.
///
/// POST /api/generate
pub async fn generate_posts(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<GenerateRequestDto>,
) -> AppResult<HttpResponse> {
    let request = body
        .into_inner()
        .into_request()
        .map_err(AppError::Validation)?;
    let generator = state.generator(request.provider)?;

    let (sink, response) = event_stream();
    let span = tracing::info_span!(
        "generation",
        request_id = %request_id.as_str(),
        provider = %request.provider
    );
    actix_web::rt::spawn(run_generation(generator, request, sink).instrument(span));

    Ok(response)
}

async fn run_generation(generator: PostGenerator, request: GenerationRequest, sink: EventSink) {
    let result = generator
        .generate_posts(&request, |stage| sink.send(&StreamEvent::progress(stage)))
        .await;

    match result {
        Ok(generation) => {
            tracing::debug!(posts = generation.posts.len(), "Streaming results");
            sink.send(&StreamEvent::Result {
                results: generation.posts,
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "Generation failed");
            sink.send(&StreamEvent::error(e.to_string()));
        }
    }
}
