use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{op_error, write_error, FlashMessage};
use gigboard_db::mutation::{self, VenueInput};
use gigboard_db::query::{self, CityGroup, SearchResults, VenueDetail, VenueRecord};
use gigboard_db::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub search_term: String,
}

/// Validated venue fields as submitted by the external form layer.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VenueForm {
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: String,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl From<VenueForm> for VenueInput {
    fn from(f: VenueForm) -> Self {
        Self {
            name: f.name,
            genres: f.genres,
            address: f.address,
            city: f.city,
            state: f.state,
            phone: f.phone,
            website_link: f.website_link,
            facebook_link: f.facebook_link,
            image_link: f.image_link,
            seeking_talent: f.seeking_talent,
            seeking_description: f.seeking_description,
        }
    }
}

/// GET /venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CityGroup>>, (StatusCode, String)> {
    let groups = query::list_venue_groups(&state.db)
        .await
        .map_err(op_error)?;
    Ok(Json(groups))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SearchForm>,
) -> Result<Json<SearchResults>, (StatusCode, String)> {
    let results = query::search_venues(&state.db, &form.search_term)
        .await
        .map_err(op_error)?;
    Ok(Json(results))
}

/// GET /venues/{id}
pub async fn venue_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<VenueDetail>, (StatusCode, String)> {
    let detail = query::get_venue_detail(&state.db, id)
        .await
        .map_err(op_error)?;
    Ok(Json(detail))
}

/// GET /venues/create — empty form model for the external renderer
pub async fn new_venue_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(form): Json<VenueForm>,
) -> Result<(StatusCode, Json<FlashMessage>), (StatusCode, String)> {
    let created = mutation::create_venue(&state.db, form.into())
        .await
        .map_err(|e| write_error(e, "An error occurred. Venue could not be listed."))?;

    Ok((
        StatusCode::CREATED,
        Json(FlashMessage::success(format!(
            "Venue {} was successfully listed!",
            created.name
        ))),
    ))
}

/// GET /venues/{id}/edit — prefilled form model
pub async fn edit_venue_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<VenueRecord>, (StatusCode, String)> {
    let record = query::get_venue_record(&state.db, id)
        .await
        .map_err(op_error)?;
    Ok(Json(record))
}

/// POST /venues/{id}/edit — full-field replace
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(form): Json<VenueForm>,
) -> Result<Json<FlashMessage>, (StatusCode, String)> {
    let updated = mutation::update_venue(&state.db, id, form.into())
        .await
        .map_err(|e| write_error(e, "An error occurred. Venue could not be updated."))?;

    Ok(Json(FlashMessage::success(format!(
        "Venue {} was successfully updated!",
        updated.name
    ))))
}

/// GET /venues/{id}/delete
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlashMessage>, (StatusCode, String)> {
    let deleted = mutation::delete_venue(&state.db, id)
        .await
        .map_err(|e| write_error(e, "Venue was not deleted successfully."))?;

    Ok(Json(FlashMessage::success(format!(
        "Venue {} was deleted successfully!",
        deleted.name
    ))))
}
