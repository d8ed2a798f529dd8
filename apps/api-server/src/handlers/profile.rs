//! Profile tone demo endpoint.

use actix_web::{HttpResponse, web};
use tracing::Instrument;

use postcraft_shared::{ProfileToneRequest, StreamEvent};

use super::stream::event_stream;
use crate::middleware::{AppError, AppResult};
use crate::observability::RequestId;
use crate::state::AppState;

/// Stream the sample posts as they are "extracted", then the inferred tone.
///
/// POST /api/profile/tone
pub async fn profile_tone(
    state: web::Data<AppState>,
    request_id: RequestId,
    body: web::Json<ProfileToneRequest>,
) -> AppResult<HttpResponse> {
    let profile_url = body.into_inner().profile_url.trim().to_string();
    if profile_url.is_empty() {
        return Err(AppError::Validation(vec![
            "profileUrl is required".to_string(),
        ]));
    }

    let extractor = state.profile_extractor.clone();
    let (sink, response) = event_stream();
    let span = tracing::info_span!("profile_tone", request_id = %request_id.as_str());

    actix_web::rt::spawn(
        async move {
            let profile = extractor
                .extract(&profile_url, |posts| {
                    sink.send(&StreamEvent::ExtractedPosts {
                        posts: posts.to_vec(),
                    })
                })
                .await;
            tracing::info!(tone = %profile.tone, "Profile tone extracted");
            sink.send(&StreamEvent::Profile { profile });
        }
        .instrument(span),
    );

    Ok(response)
}
