//! Write operations. Each operation runs inside a single transaction:
//! any error propagates before the commit, and dropping the open
//! transaction rolls everything back, so there are no partial writes.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use uuid::Uuid;

use crate::entities::{artist, show, venue};
use crate::error::OpError;
use crate::genres;

/// Validated field values for venue creation and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
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

/// Validated field values for artist creation and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
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

/// Validated field values for show creation. `start_time` defaults to
/// the creation instant when omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: Uuid,
    pub artist_id: Uuid,
    pub start_time: Option<DateTimeWithTimeZone>,
}

fn venue_active_model(
    id: Uuid,
    input: VenueInput,
    now: DateTimeWithTimeZone,
) -> venue::ActiveModel {
    venue::ActiveModel {
        id: Set(id),
        name: Set(input.name),
        genres: Set(genres::join(&input.genres)),
        website_link: Set(input.website_link),
        seeking_talent: Set(input.seeking_talent),
        seeking_description: Set(input.seeking_description),
        city: Set(input.city),
        state: Set(input.state),
        address: Set(input.address),
        phone: Set(input.phone),
        image_link: Set(input.image_link),
        facebook_link: Set(input.facebook_link),
        created_at: Set(now),
    }
}

fn artist_active_model(
    id: Uuid,
    input: ArtistInput,
    now: DateTimeWithTimeZone,
) -> artist::ActiveModel {
    artist::ActiveModel {
        id: Set(id),
        name: Set(input.name),
        city: Set(input.city),
        state: Set(input.state),
        phone: Set(input.phone),
        genres: Set(genres::join(&input.genres)),
        image_link: Set(input.image_link),
        website_link: Set(input.website_link),
        facebook_link: Set(input.facebook_link),
        seeking_venue: Set(input.seeking_venue),
        seeking_description: Set(input.seeking_description),
        created_at: Set(now),
    }
}

pub async fn create_venue(
    db: &DatabaseConnection,
    input: VenueInput,
) -> Result<venue::Model, OpError> {
    let txn = db.begin().await?;
    let created = venue_active_model(Uuid::new_v4(), input, Utc::now().fixed_offset())
        .insert(&txn)
        .await?;
    txn.commit().await?;
    Ok(created)
}

/// Full-field replace: every mutable field is overwritten with the
/// supplied value, never merged with the stored row.
pub async fn update_venue(
    db: &DatabaseConnection,
    id: Uuid,
    input: VenueInput,
) -> Result<venue::Model, OpError> {
    let txn = db.begin().await?;

    let existing = venue::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(OpError::NotFound("venue"))?;

    let mut active: venue::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.genres = Set(genres::join(&input.genres));
    active.website_link = Set(input.website_link);
    active.seeking_talent = Set(input.seeking_talent);
    active.seeking_description = Set(input.seeking_description);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.address = Set(input.address);
    active.phone = Set(input.phone);
    active.image_link = Set(input.image_link);
    active.facebook_link = Set(input.facebook_link);

    let updated = active.update(&txn).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Deletes the venue; its shows go with it via the cascading foreign key.
/// Returns the deleted row so the caller can name it in the flash notice.
pub async fn delete_venue(db: &DatabaseConnection, id: Uuid) -> Result<venue::Model, OpError> {
    let txn = db.begin().await?;

    let existing = venue::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(OpError::NotFound("venue"))?;

    venue::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    Ok(existing)
}

pub async fn create_artist(
    db: &DatabaseConnection,
    input: ArtistInput,
) -> Result<artist::Model, OpError> {
    let txn = db.begin().await?;
    let created = artist_active_model(Uuid::new_v4(), input, Utc::now().fixed_offset())
        .insert(&txn)
        .await?;
    txn.commit().await?;
    Ok(created)
}

/// Full-field replace; see `update_venue`.
pub async fn update_artist(
    db: &DatabaseConnection,
    id: Uuid,
    input: ArtistInput,
) -> Result<artist::Model, OpError> {
    let txn = db.begin().await?;

    let existing = artist::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(OpError::NotFound("artist"))?;

    let mut active: artist::ActiveModel = existing.into();
    active.name = Set(input.name);
    active.city = Set(input.city);
    active.state = Set(input.state);
    active.phone = Set(input.phone);
    active.genres = Set(genres::join(&input.genres));
    active.image_link = Set(input.image_link);
    active.website_link = Set(input.website_link);
    active.facebook_link = Set(input.facebook_link);
    active.seeking_venue = Set(input.seeking_venue);
    active.seeking_description = Set(input.seeking_description);

    let updated = active.update(&txn).await?;
    txn.commit().await?;
    Ok(updated)
}

/// Deletes the artist and, via the cascade, all shows booked for it.
pub async fn delete_artist(db: &DatabaseConnection, id: Uuid) -> Result<artist::Model, OpError> {
    let txn = db.begin().await?;

    let existing = artist::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(OpError::NotFound("artist"))?;

    artist::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;
    Ok(existing)
}

/// Creates a show after checking both referenced rows exist inside the
/// same transaction. The foreign keys back the check, so a row that
/// disappears between check and insert still cannot produce an orphan.
pub async fn create_show(db: &DatabaseConnection, input: ShowInput) -> Result<show::Model, OpError> {
    let txn = db.begin().await?;

    venue::Entity::find_by_id(input.venue_id)
        .one(&txn)
        .await?
        .ok_or(OpError::NotFound("venue"))?;

    artist::Entity::find_by_id(input.artist_id)
        .one(&txn)
        .await?
        .ok_or(OpError::NotFound("artist"))?;

    let now = Utc::now().fixed_offset();
    let created = show::ActiveModel {
        id: Set(Uuid::new_v4()),
        venue_id: Set(input.venue_id),
        artist_id: Set(input.artist_id),
        start_time: Set(input.start_time.unwrap_or(now)),
        created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sea_orm::{ActiveValue, DatabaseBackend, MockDatabase};

    fn ts(s: &str) -> DateTimeWithTimeZone {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn venue_input() -> VenueInput {
        VenueInput {
            name: "The Musical Hop".into(),
            genres: vec!["Jazz".into(), "Reggae".into()],
            address: "1015 Folsom Street".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("123-123-1234".into()),
            website_link: "https://themusicalhop.com".into(),
            facebook_link: None,
            image_link: Some("https://img.example.com/hop.jpg".into()),
            seeking_talent: true,
            seeking_description: Some("Looking for a local artist.".into()),
        }
    }

    fn artist_input() -> ArtistInput {
        ArtistInput {
            name: "Guns N Petals".into(),
            genres: vec!["Rock n Roll".into()],
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: None,
            website_link: "https://gunsnpetals.com".into(),
            facebook_link: Some("https://facebook.com/gunsnpetals".into()),
            image_link: None,
            seeking_venue: true,
            seeking_description: Some("Looking for shows downtown.".into()),
        }
    }

    #[test]
    fn test_venue_active_model_sets_every_field() {
        let id = Uuid::new_v4();
        let now = ts("2025-01-01T00:00:00+00:00");
        let active = venue_active_model(id, venue_input(), now);

        assert_eq!(active.id, ActiveValue::Set(id));
        assert_eq!(active.name, ActiveValue::Set("The Musical Hop".into()));
        assert_eq!(active.genres, ActiveValue::Set("Jazz,Reggae".into()));
        assert_eq!(active.seeking_talent, ActiveValue::Set(true));
        assert_eq!(active.facebook_link, ActiveValue::Set(None));
        assert_eq!(active.created_at, ActiveValue::Set(now));
    }

    #[test]
    fn test_artist_active_model_joins_genres_in_order() {
        let mut input = artist_input();
        input.genres = vec!["Jazz".into(), "Classical".into(), "Folk".into()];
        let active = artist_active_model(Uuid::new_v4(), input, ts("2025-01-01T00:00:00+00:00"));
        assert_eq!(active.genres, ActiveValue::Set("Jazz,Classical,Folk".into()));
    }

    #[tokio::test]
    async fn test_update_venue_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<venue::Model>::new()])
            .into_connection();

        let err = update_venue(&db, Uuid::new_v4(), venue_input())
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::NotFound("venue")));
    }

    #[tokio::test]
    async fn test_delete_artist_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<artist::Model>::new()])
            .into_connection();

        let err = delete_artist(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, OpError::NotFound("artist")));
    }

    #[tokio::test]
    async fn test_create_show_rejects_missing_venue() {
        // First lookup (venue) comes back empty: nothing is written.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<venue::Model>::new()])
            .into_connection();

        let err = create_show(
            &db,
            ShowInput {
                venue_id: Uuid::new_v4(),
                artist_id: Uuid::new_v4(),
                start_time: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, OpError::NotFound("venue")));
    }
}
