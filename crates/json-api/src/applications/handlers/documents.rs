//! Upload Application Document Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use worknest_app::domain::recruitment::{data::NewCandidateDocument, records::DocumentType};

use crate::{
    candidates::{CandidateDocumentResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Upload Document Request
///
/// The file itself lives in external storage; only its metadata is recorded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UploadDocumentRequest {
    /// `resume`, `noc`, `certificate` or `other`
    pub document_type: String,

    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
}

impl TryFrom<UploadDocumentRequest> for NewCandidateDocument {
    type Error = StatusError;

    fn try_from(request: UploadDocumentRequest) -> Result<Self, Self::Error> {
        Ok(NewCandidateDocument {
            document_type: request
                .document_type
                .parse::<DocumentType>()
                .or_400("Invalid document type")?,
            file_name: request.file_name,
            file_url: request.file_url,
            file_size: request.file_size,
        })
    }
}

/// Upload Application Document Handler
#[endpoint(
    tags("applications"),
    summary = "Upload Application Document",
    responses(
        (status_code = StatusCode::CREATED, description = "Document recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Invalid or expired invitation"),
        (status_code = StatusCode::GONE, description = "Invitation has expired"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    token: PathParam<Uuid>,
    json: JsonBody<UploadDocumentRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CandidateDocumentResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let token = token.into_inner();

    let document = state
        .app
        .recruitment
        .upload_candidate_document(token.into(), json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/applications/{token}/documents/{}", document.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(document.into()))
}
