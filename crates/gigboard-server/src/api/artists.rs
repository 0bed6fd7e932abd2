use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::venues::SearchForm;
use super::{op_error, write_error, FlashMessage};
use gigboard_db::mutation::{self, ArtistInput};
use gigboard_db::query::{self, ArtistDetail, ArtistRecord, ArtistRef, SearchResults};
use gigboard_db::AppState;

/// Validated artist fields as submitted by the external form layer.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ArtistForm {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: String,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl From<ArtistForm> for ArtistInput {
    fn from(f: ArtistForm) -> Self {
        Self {
            name: f.name,
            genres: f.genres,
            city: f.city,
            state: f.state,
            phone: f.phone,
            website_link: f.website_link,
            facebook_link: f.facebook_link,
            image_link: f.image_link,
            seeking_venue: f.seeking_venue,
            seeking_description: f.seeking_description,
        }
    }
}

/// GET /artists — lightweight index (id and name only)
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistRef>>, (StatusCode, String)> {
    let artists = query::list_artists(&state.db).await.map_err(op_error)?;
    Ok(Json(artists))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults>, (StatusCode, String)> {
    let results = query::search_artists(&state.db, &form.search_term)
        .await
        .map_err(op_error)?;
    Ok(Json(results))
}

/// GET /artists/{id}
pub async fn artist_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistDetail>, (StatusCode, String)> {
    let detail = query::get_artist_detail(&state.db, id)
        .await
        .map_err(op_error)?;
    Ok(Json(detail))
}

/// GET /artists/create — empty form model for the external renderer
pub async fn new_artist_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ArtistForm>,
) -> Result<(StatusCode, Json<FlashMessage>), (StatusCode, String)> {
    let created = mutation::create_artist(&state.db, form.into())
        .await
        .map_err(|e| write_error(e, "Artist was not successfully listed."))?;

    Ok((
        StatusCode::CREATED,
        Json(FlashMessage::success(format!(
            "Artist {} was successfully listed!",
            created.name
        ))),
    ))
}

/// GET /artists/{id}/edit — prefilled form model
pub async fn edit_artist_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistRecord>, (StatusCode, String)> {
    let record = query::get_artist_record(&state.db, id)
        .await
        .map_err(op_error)?;
    Ok(Json(record))
}

/// POST /artists/{id}/edit — full-field replace
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<FlashMessage>, (StatusCode, String)> {
    let updated = mutation::update_artist(&state.db, id, form.into())
        .await
        .map_err(|e| write_error(e, "Artist was not edited successfully."))?;

    Ok(Json(FlashMessage::success(format!(
        "Artist {} was successfully edited!",
        updated.name
    ))))
}

/// GET /artists/{id}/delete
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlashMessage>, (StatusCode, String)> {
    let deleted = mutation::delete_artist(&state.db, id)
        .await
        .map_err(|e| write_error(e, "Artist was not deleted successfully."))?;

    Ok(Json(FlashMessage::success(format!(
        "Artist {} was deleted successfully!",
        deleted.name
    ))))
}
