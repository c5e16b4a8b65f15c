//! API request handlers

use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::envelope::{Envelope, EnvelopeDoc};
use super::extract::{ApiJson, ApiPath, ApiQuery};
use super::routes::AppState;
use crate::error::{Error, Result};
use crate::store::Record;
use crate::types::{NewShow, Show, ShowPatch};

// Query parameters

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListShowsParams {
    /// Only return shows with at least this many episodes seen
    #[serde(rename = "minEpisodes")]
    pub min_episodes: Option<i64>,
}

// Request bodies

/// Both fields are optional at the JSON level so a missing one is reported
/// as a single 422 with a readable message.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateShowRequest {
    /// Title of the show
    pub name: Option<String>,
    /// Episodes watched so far
    pub episodes_seen: Option<i64>,
}

/// Omitted fields are left alone; an explicit `null` is a type error (422).
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateShowRequest {
    /// New title (optional)
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    /// New episode count (optional)
    #[serde(default, deserialize_with = "present")]
    pub episodes_seen: Option<i64>,
}

/// Only called for keys that appear in the body, so `null` fails to parse as `T`
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl TryFrom<CreateShowRequest> for NewShow {
    type Error = Error;

    fn try_from(req: CreateShowRequest) -> Result<Self> {
        match (req.name, req.episodes_seen) {
            (Some(name), Some(episodes_seen)) => Ok(NewShow {
                name,
                episodes_seen,
            }),
            _ => Err(Error::Unprocessable(
                "Request must send a 'name' and 'episodes_seen' parameter".into(),
            )),
        }
    }
}

impl From<UpdateShowRequest> for ShowPatch {
    fn from(req: UpdateShowRequest) -> Self {
        ShowPatch {
            name: req.name,
            episodes_seen: req.episodes_seen,
        }
    }
}

// Response types

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

// Handlers

/// Static greeting
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Greeting, result key `content`", body = EnvelopeDoc)
    ),
    tag = "misc"
)]
pub async fn hello_world() -> Envelope<&'static str> {
    Envelope::data("content", "hello world!")
}

/// Echo a path segment back
#[utoipa::path(
    get,
    path = "/mirror/{name}",
    params(
        ("name" = String, Path, description = "Anything")
    ),
    responses(
        (status = 200, description = "Echo, result key `name`", body = EnvelopeDoc)
    ),
    tag = "misc"
)]
pub async fn mirror(ApiPath(name): ApiPath<String>) -> Envelope<String> {
    tracing::debug!(%name, "Mirroring");
    Envelope::data("name", name)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy, result key `health`", body = EnvelopeDoc)
    ),
    tag = "misc"
)]
pub async fn health() -> Envelope<HealthResponse> {
    Envelope::data(
        "health",
        HealthResponse {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        },
    )
}

/// List shows, optionally filtered by episodes seen
#[utoipa::path(
    get,
    path = "/shows",
    params(ListShowsParams),
    responses(
        (status = 200, description = "Shows in creation order, result key `shows`", body = EnvelopeDoc),
        (status = 400, description = "minEpisodes is not an integer", body = EnvelopeDoc)
    ),
    tag = "shows"
)]
pub async fn list_shows(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListShowsParams>,
) -> Envelope<Vec<Show>> {
    let shows = match params.min_episodes {
        Some(min) => {
            state
                .shows
                .list_where(|show| show.episodes_seen >= min)
                .await
        }
        None => state.shows.list().await,
    };

    Envelope::data(Show::COLLECTION, shows)
}

/// Get a single show by id
#[utoipa::path(
    get,
    path = "/shows/{id}",
    params(
        ("id" = u64, Path, description = "Show id")
    ),
    responses(
        (status = 200, description = "Show found, result key `show`", body = EnvelopeDoc),
        (status = 400, description = "Invalid show id", body = EnvelopeDoc),
        (status = 404, description = "Show not found", body = EnvelopeDoc)
    ),
    tag = "shows"
)]
pub async fn get_show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Envelope<Show>> {
    let show = state.shows.get(id).await.ok_or(Error::NotFound {
        entity: Show::ENTITY,
        id,
    })?;

    Ok(Envelope::data(Show::ENTITY, show))
}

/// Create a new show
#[utoipa::path(
    post,
    path = "/shows",
    request_body = CreateShowRequest,
    responses(
        (status = 201, description = "Show created, result key `show`", body = EnvelopeDoc),
        (status = 422, description = "Missing name or episodes_seen", body = EnvelopeDoc)
    ),
    tag = "shows"
)]
pub async fn create_show(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateShowRequest>,
) -> Result<Envelope<Show>> {
    let draft = NewShow::try_from(req)?;
    let show = state.shows.create(draft).await;

    tracing::info!(id = show.id, name = %show.name, "Show created");

    Ok(Envelope::data(Show::ENTITY, show).status(StatusCode::CREATED))
}

/// Update name and/or episodes_seen of a show
#[utoipa::path(
    put,
    path = "/shows/{id}",
    params(
        ("id" = u64, Path, description = "Show id")
    ),
    request_body = UpdateShowRequest,
    responses(
        (status = 200, description = "Show updated, result key `show`", body = EnvelopeDoc),
        (status = 400, description = "Invalid show id", body = EnvelopeDoc),
        (status = 404, description = "Show not found", body = EnvelopeDoc)
    ),
    tag = "shows"
)]
pub async fn update_show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(req): ApiJson<UpdateShowRequest>,
) -> Result<Envelope<Show>> {
    let show = state
        .shows
        .update(id, req.into())
        .await
        .ok_or(Error::NotFound {
            entity: Show::ENTITY,
            id,
        })?;

    tracing::info!(id, "Show updated");

    Ok(Envelope::data(Show::ENTITY, show))
}

/// Delete a show
#[utoipa::path(
    delete,
    path = "/shows/{id}",
    params(
        ("id" = u64, Path, description = "Show id")
    ),
    responses(
        (status = 200, description = "Show deleted", body = EnvelopeDoc),
        (status = 400, description = "Invalid show id", body = EnvelopeDoc),
        (status = 404, description = "Show not found", body = EnvelopeDoc)
    ),
    tag = "shows"
)]
pub async fn delete_show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Envelope> {
    if !state.shows.delete(id).await {
        return Err(Error::NotFound {
            entity: Show::ENTITY,
            id,
        });
    }

    tracing::info!(id, "Show deleted");

    Ok(Envelope::new().message("Show deleted"))
}

/// Fallback for unknown routes
pub async fn not_found() -> Envelope {
    Envelope::new()
        .status(StatusCode::NOT_FOUND)
        .message("Not found")
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed() -> Envelope {
    Envelope::new()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .message("Method not allowed")
}
