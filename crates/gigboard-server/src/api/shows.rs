use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{op_error, write_error, FlashMessage};
use gigboard_db::mutation::{self, ShowInput};
use gigboard_db::query::{self, ShowListing};
use gigboard_db::AppState;

/// Validated show fields as submitted by the external form layer.
/// Omitted `start_time` means "now".
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShowForm {
    pub venue_id: Uuid,
    pub artist_id: Uuid,
    pub start_time: Option<DateTime<FixedOffset>>,
}

impl From<ShowForm> for ShowInput {
    fn from(f: ShowForm) -> Self {
        Self {
            venue_id: f.venue_id,
            artist_id: f.artist_id,
            start_time: f.start_time,
        }
    }
}

/// GET /shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, (StatusCode, String)> {
    let shows = query::list_shows(&state.db).await.map_err(op_error)?;
    Ok(Json(shows))
}

/// GET /shows/create — empty form model for the external renderer
pub async fn new_show_form() -> Json<ShowForm> {
    Json(ShowForm::default())
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(form): Json<ShowForm>,
) -> Result<(StatusCode, Json<FlashMessage>), (StatusCode, String)> {
    mutation::create_show(&state.db, form.into())
        .await
        .map_err(|e| write_error(e, "Show was not successfully listed."))?;

    Ok((
        StatusCode::CREATED,
        Json(FlashMessage::success("Show was successfully listed!")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_form_deserialization() {
        let venue_id = Uuid::new_v4();
        let artist_id = Uuid::new_v4();
        let json = format!(
            r#"{{"venue_id": "{venue_id}", "artist_id": "{artist_id}", "start_time": "2035-04-01T20:00:00+00:00"}}"#
        );
        let form: ShowForm = serde_json::from_str(&json).unwrap();
        assert_eq!(form.venue_id, venue_id);
        assert_eq!(form.artist_id, artist_id);
        assert!(form.start_time.is_some());
    }

    #[test]
    fn test_show_form_start_time_optional() {
        let json = format!(
            r#"{{"venue_id": "{}", "artist_id": "{}"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let form: ShowForm = serde_json::from_str(&json).unwrap();
        assert!(form.start_time.is_none());

        let input: ShowInput = form.into();
        assert!(input.start_time.is_none());
    }
}
