//! Read operations over venues, artists and shows.
//!
//! Every operation takes the connection handle explicitly and samples
//! wall-clock "now" at the moment it executes, so past/upcoming results
//! for the same stored data change across calls as time passes.

use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::entities::{artist, show, venue};
use crate::error::OpError;
use crate::genres;

/// One venue or artist in a listing, annotated with its upcoming-show count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub id: Uuid,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// All venues at one (city, state) location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingEntry>,
}

/// A name-search result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<ListingEntry>,
}

/// Lightweight artist index entry (id and name only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistRef {
    pub id: Uuid,
    pub name: String,
}

/// A venue's show as seen on its detail page: the artist side of the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenuePageShow {
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// An artist's show as seen on its detail page: the venue side of the pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistPageShow {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

/// Full venue fields with genres split back into an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueRecord {
    pub id: Uuid,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: String,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl VenueRecord {
    fn from_model(m: venue::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            genres: genres::split(&m.genres),
            address: m.address,
            city: m.city,
            state: m.state,
            phone: m.phone,
            website_link: m.website_link,
            facebook_link: m.facebook_link,
            seeking_talent: m.seeking_talent,
            seeking_description: m.seeking_description,
            image_link: m.image_link,
        }
    }
}

/// Full artist fields with genres split back into an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistRecord {
    pub id: Uuid,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: String,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl ArtistRecord {
    fn from_model(m: artist::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            genres: genres::split(&m.genres),
            city: m.city,
            state: m.state,
            phone: m.phone,
            website_link: m.website_link,
            facebook_link: m.facebook_link,
            seeking_venue: m.seeking_venue,
            seeking_description: m.seeking_description,
            image_link: m.image_link,
        }
    }
}

/// Venue detail view: record plus past/upcoming show lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: VenueRecord,
    pub past_shows: Vec<VenuePageShow>,
    pub upcoming_shows: Vec<VenuePageShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Artist detail view: record plus past/upcoming show lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: ArtistRecord,
    pub past_shows: Vec<ArtistPageShow>,
    pub upcoming_shows: Vec<ArtistPageShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// One row of the global show listing, joined with both counterparts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub venue_id: Uuid,
    pub venue_name: String,
    pub artist_id: Uuid,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// Build the LIKE pattern for a case-insensitive substring search.
///
/// LIKE wildcards in the term are escaped so user input cannot widen the
/// match; an empty term yields `%%`, which matches every row.
fn name_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped.to_lowercase())
}

/// Split shows into (past, upcoming) relative to `now`.
///
/// Comparisons are strict on both sides: a show starting exactly at `now`
/// lands in neither bucket.
fn partition_shows(
    shows: Vec<show::Model>,
    now: DateTimeWithTimeZone,
) -> (Vec<show::Model>, Vec<show::Model>) {
    let mut past = Vec::new();
    let mut upcoming = Vec::new();
    for s in shows {
        if s.start_time < now {
            past.push(s);
        } else if s.start_time > now {
            upcoming.push(s);
        }
    }
    (past, upcoming)
}

/// Group venues (already sorted by city, state, id) into city groups.
fn group_by_location(
    venues: Vec<venue::Model>,
    upcoming: &HashMap<Uuid, u64>,
) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();
    for v in venues {
        let venue::Model {
            id, name, city, state, ..
        } = v;
        let entry = ListingEntry {
            id,
            name,
            num_upcoming_shows: upcoming.get(&id).copied().unwrap_or(0),
        };
        match groups.last_mut() {
            Some(g) if g.city == city && g.state == state => g.venues.push(entry),
            _ => groups.push(CityGroup {
                city,
                state,
                venues: vec![entry],
            }),
        }
    }
    groups
}

async fn upcoming_counts_for_venues(
    db: &DatabaseConnection,
    venue_ids: Vec<Uuid>,
    now: DateTimeWithTimeZone,
) -> Result<HashMap<Uuid, u64>, OpError> {
    if venue_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let shows = show::Entity::find()
        .filter(show::Column::VenueId.is_in(venue_ids))
        .filter(show::Column::StartTime.gt(now))
        .all(db)
        .await?;
    let mut counts: HashMap<Uuid, u64> = HashMap::new();
    for s in shows {
        *counts.entry(s.venue_id).or_insert(0) += 1;
    }
    Ok(counts)
}

async fn upcoming_counts_for_artists(
    db: &DatabaseConnection,
    artist_ids: Vec<Uuid>,
    now: DateTimeWithTimeZone,
) -> Result<HashMap<Uuid, u64>, OpError> {
    if artist_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let shows = show::Entity::find()
        .filter(show::Column::ArtistId.is_in(artist_ids))
        .filter(show::Column::StartTime.gt(now))
        .all(db)
        .await?;
    let mut counts: HashMap<Uuid, u64> = HashMap::new();
    for s in shows {
        *counts.entry(s.artist_id).or_insert(0) += 1;
    }
    Ok(counts)
}

/// All distinct (city, state) locations with their venues, each venue
/// annotated with its upcoming-show count. Ordering is deterministic:
/// city, then state, then venue id.
pub async fn list_venue_groups(db: &DatabaseConnection) -> Result<Vec<CityGroup>, OpError> {
    let now = Utc::now().fixed_offset();

    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::City)
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;

    let ids = venues.iter().map(|v| v.id).collect();
    let counts = upcoming_counts_for_venues(db, ids, now).await?;

    Ok(group_by_location(venues, &counts))
}

/// Lightweight artist index: id and name only, ordered by name then id.
pub async fn list_artists(db: &DatabaseConnection) -> Result<Vec<ArtistRef>, OpError> {
    let artists = artist::Entity::find()
        .order_by_asc(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;

    Ok(artists
        .into_iter()
        .map(|a| ArtistRef {
            id: a.id,
            name: a.name,
        })
        .collect())
}

/// Case-insensitive substring search over venue names.
pub async fn search_venues(
    db: &DatabaseConnection,
    term: &str,
) -> Result<SearchResults, OpError> {
    let now = Utc::now().fixed_offset();

    let venues = venue::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col((venue::Entity, venue::Column::Name))))
                .like(name_pattern(term)),
        )
        .order_by_asc(venue::Column::Name)
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;

    let ids = venues.iter().map(|v| v.id).collect();
    let counts = upcoming_counts_for_venues(db, ids, now).await?;

    let data: Vec<ListingEntry> = venues
        .into_iter()
        .map(|v| ListingEntry {
            id: v.id,
            name: v.name,
            num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Case-insensitive substring search over artist names.
pub async fn search_artists(
    db: &DatabaseConnection,
    term: &str,
) -> Result<SearchResults, OpError> {
    let now = Utc::now().fixed_offset();

    let artists = artist::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col((artist::Entity, artist::Column::Name))))
                .like(name_pattern(term)),
        )
        .order_by_asc(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .all(db)
        .await?;

    let ids = artists.iter().map(|a| a.id).collect();
    let counts = upcoming_counts_for_artists(db, ids, now).await?;

    let data: Vec<ListingEntry> = artists
        .into_iter()
        .map(|a| ListingEntry {
            id: a.id,
            name: a.name,
            num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

/// Venue record only (no show lists), used to prefill the edit form.
pub async fn get_venue_record(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<VenueRecord, OpError> {
    let model = venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(OpError::NotFound("venue"))?;
    Ok(VenueRecord::from_model(model))
}

/// Artist record only (no show lists), used to prefill the edit form.
pub async fn get_artist_record(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<ArtistRecord, OpError> {
    let model = artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(OpError::NotFound("artist"))?;
    Ok(ArtistRecord::from_model(model))
}

/// Venue detail page: full record plus past/upcoming shows, each show
/// projected onto its artist side.
pub async fn get_venue_detail(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<VenueDetail, OpError> {
    let model = venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(OpError::NotFound("venue"))?;

    let shows = show::Entity::find()
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;

    let artist_ids: Vec<Uuid> = shows.iter().map(|s| s.artist_id).collect();
    let artists: HashMap<Uuid, artist::Model> = if artist_ids.is_empty() {
        HashMap::new()
    } else {
        artist::Entity::find()
            .filter(artist::Column::Id.is_in(artist_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect()
    };

    let now = Utc::now().fixed_offset();
    let (past, upcoming) = partition_shows(shows, now);

    let project = |shows: Vec<show::Model>| -> Vec<VenuePageShow> {
        shows
            .into_iter()
            .filter_map(|s| {
                artists.get(&s.artist_id).map(|a| VenuePageShow {
                    artist_id: s.artist_id,
                    artist_name: a.name.clone(),
                    artist_image_link: a.image_link.clone(),
                    start_time: s.start_time.to_rfc3339(),
                })
            })
            .collect()
    };

    let past_shows = project(past);
    let upcoming_shows = project(upcoming);

    Ok(VenueDetail {
        venue: VenueRecord::from_model(model),
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Artist detail page: full record plus past/upcoming shows, each show
/// projected onto its venue side.
pub async fn get_artist_detail(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<ArtistDetail, OpError> {
    let model = artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(OpError::NotFound("artist"))?;

    let shows = show::Entity::find()
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;

    let venue_ids: Vec<Uuid> = shows.iter().map(|s| s.venue_id).collect();
    let venues: HashMap<Uuid, venue::Model> = if venue_ids.is_empty() {
        HashMap::new()
    } else {
        venue::Entity::find()
            .filter(venue::Column::Id.is_in(venue_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect()
    };

    let now = Utc::now().fixed_offset();
    let (past, upcoming) = partition_shows(shows, now);

    let project = |shows: Vec<show::Model>| -> Vec<ArtistPageShow> {
        shows
            .into_iter()
            .filter_map(|s| {
                venues.get(&s.venue_id).map(|v| ArtistPageShow {
                    venue_id: s.venue_id,
                    venue_name: v.name.clone(),
                    venue_image_link: v.image_link.clone(),
                    start_time: s.start_time.to_rfc3339(),
                })
            })
            .collect()
    };

    let past_shows = project(past);
    let upcoming_shows = project(upcoming);

    Ok(ArtistDetail {
        artist: ArtistRecord::from_model(model),
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Every show, joined with its venue's name and its artist's name and
/// image link. No filtering.
pub async fn list_shows(db: &DatabaseConnection) -> Result<Vec<ShowListing>, OpError> {
    let shows = show::Entity::find()
        .order_by_asc(show::Column::StartTime)
        .order_by_asc(show::Column::Id)
        .all(db)
        .await?;

    if shows.is_empty() {
        return Ok(Vec::new());
    }

    let venue_ids: Vec<Uuid> = shows.iter().map(|s| s.venue_id).collect();
    let artist_ids: Vec<Uuid> = shows.iter().map(|s| s.artist_id).collect();

    let venues: HashMap<Uuid, venue::Model> = venue::Entity::find()
        .filter(venue::Column::Id.is_in(venue_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|v| (v.id, v))
        .collect();

    let artists: HashMap<Uuid, artist::Model> = artist::Entity::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    Ok(shows
        .into_iter()
        .filter_map(|s| {
            let v = venues.get(&s.venue_id)?;
            let a = artists.get(&s.artist_id)?;
            Some(ShowListing {
                venue_id: s.venue_id,
                venue_name: v.name.clone(),
                artist_id: s.artist_id,
                artist_name: a.name.clone(),
                artist_image_link: a.image_link.clone(),
                start_time: s.start_time.to_rfc3339(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn ts(s: &str) -> DateTimeWithTimeZone {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn make_venue(city: &str, state: &str) -> venue::Model {
        venue::Model {
            id: Uuid::new_v4(),
            name: "The Musical Hop".into(),
            genres: "Jazz,Reggae".into(),
            website_link: "https://themusicalhop.com".into(),
            seeking_talent: true,
            seeking_description: Some("Looking for a local artist.".into()),
            city: city.into(),
            state: state.into(),
            address: "1015 Folsom Street".into(),
            phone: Some("123-123-1234".into()),
            image_link: Some("https://img.example.com/hop.jpg".into()),
            facebook_link: Some("https://facebook.com/hop".into()),
            created_at: ts("2024-01-01T00:00:00+00:00"),
        }
    }

    fn make_artist(name: &str) -> artist::Model {
        artist::Model {
            id: Uuid::new_v4(),
            name: name.into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: None,
            genres: "Rock n Roll".into(),
            image_link: Some("https://img.example.com/artist.jpg".into()),
            website_link: "https://gunsnpetals.com".into(),
            facebook_link: None,
            seeking_venue: false,
            seeking_description: None,
            created_at: ts("2024-01-01T00:00:00+00:00"),
        }
    }

    fn make_show(venue_id: Uuid, artist_id: Uuid, start: &str) -> show::Model {
        show::Model {
            id: Uuid::new_v4(),
            venue_id,
            artist_id,
            start_time: ts(start),
            created_at: ts("2024-01-01T00:00:00+00:00"),
        }
    }

    #[test]
    fn test_name_pattern_lowercases_and_wraps() {
        assert_eq!(name_pattern("Hop"), "%hop%");
        assert_eq!(name_pattern(""), "%%");
    }

    #[test]
    fn test_name_pattern_escapes_wildcards() {
        assert_eq!(name_pattern("100%"), "%100\\%%");
        assert_eq!(name_pattern("a_b"), "%a\\_b%");
        assert_eq!(name_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn test_partition_strictly_past_and_upcoming() {
        let now = ts("2025-06-01T12:00:00+00:00");
        let v = Uuid::new_v4();
        let a = Uuid::new_v4();
        let past = make_show(v, a, "2025-06-01T11:59:59+00:00");
        let upcoming = make_show(v, a, "2025-06-01T12:00:01+00:00");
        let (p, u) = partition_shows(vec![past.clone(), upcoming.clone()], now);
        assert_eq!(p, vec![past]);
        assert_eq!(u, vec![upcoming]);
    }

    #[test]
    fn test_partition_drops_show_starting_exactly_now() {
        let now = ts("2025-06-01T12:00:00+00:00");
        let boundary = make_show(Uuid::new_v4(), Uuid::new_v4(), "2025-06-01T12:00:00+00:00");
        let (p, u) = partition_shows(vec![boundary], now);
        assert!(p.is_empty());
        assert!(u.is_empty());
    }

    #[test]
    fn test_group_by_location_splits_on_city_and_state() {
        let v1 = make_venue("New York", "NY");
        let v2 = make_venue("New York", "NY");
        let v3 = make_venue("San Francisco", "CA");
        let mut counts = HashMap::new();
        counts.insert(v1.id, 2u64);

        let groups = group_by_location(vec![v1.clone(), v2.clone(), v3.clone()], &counts);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].city, "New York");
        assert_eq!(groups[0].venues.len(), 2);
        assert_eq!(groups[0].venues[0].num_upcoming_shows, 2);
        assert_eq!(groups[0].venues[1].num_upcoming_shows, 0);
        assert_eq!(groups[1].city, "San Francisco");
        assert_eq!(groups[1].venues.len(), 1);
    }

    #[test]
    fn test_group_by_location_same_city_different_state() {
        let v1 = make_venue("Springfield", "IL");
        let v2 = make_venue("Springfield", "MA");
        let groups = group_by_location(vec![v1, v2], &HashMap::new());
        assert_eq!(groups.len(), 2);
    }

    #[tokio::test]
    async fn test_get_venue_detail_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<venue::Model>::new()])
            .into_connection();

        let err = get_venue_detail(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, OpError::NotFound("venue")));
    }

    #[tokio::test]
    async fn test_get_artist_record_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<artist::Model>::new()])
            .into_connection();

        let err = get_artist_record(&db, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, OpError::NotFound("artist")));
    }

    #[tokio::test]
    async fn test_get_venue_detail_partitions_and_projects_shows() {
        let venue = make_venue("San Francisco", "CA");
        let artist = make_artist("Guns N Petals");
        let past = make_show(venue.id, artist.id, "2001-01-01T20:00:00+00:00");
        let upcoming = make_show(venue.id, artist.id, "2999-01-01T20:00:00+00:00");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![venue.clone()]])
            .append_query_results([vec![past.clone(), upcoming.clone()]])
            .append_query_results([vec![artist.clone()]])
            .into_connection();

        let detail = get_venue_detail(&db, venue.id).await.unwrap();
        assert_eq!(detail.venue.genres, vec!["Jazz", "Reggae"]);
        assert_eq!(detail.past_shows_count, 1);
        assert_eq!(detail.upcoming_shows_count, 1);
        assert_eq!(detail.past_shows[0].artist_id, artist.id);
        assert_eq!(detail.past_shows[0].artist_name, "Guns N Petals");
        assert_eq!(detail.past_shows[0].start_time, past.start_time.to_rfc3339());
        assert_eq!(
            detail.upcoming_shows[0].start_time,
            upcoming.start_time.to_rfc3339()
        );
    }

    #[tokio::test]
    async fn test_get_artist_detail_without_shows() {
        let artist = make_artist("Matt Quevado");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![artist.clone()]])
            .append_query_results([Vec::<show::Model>::new()])
            .into_connection();

        let detail = get_artist_detail(&db, artist.id).await.unwrap();
        assert_eq!(detail.artist.name, "Matt Quevado");
        assert_eq!(detail.past_shows_count, 0);
        assert_eq!(detail.upcoming_shows_count, 0);
        assert!(detail.past_shows.is_empty());
        assert!(detail.upcoming_shows.is_empty());
    }

    #[tokio::test]
    async fn test_search_venues_no_matches() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<venue::Model>::new()])
            .into_connection();

        let results = search_venues(&db, "nothing").await.unwrap();
        assert_eq!(results.count, 0);
        assert!(results.data.is_empty());
    }

    #[tokio::test]
    async fn test_list_artists_projects_id_and_name() {
        let a1 = make_artist("Guns N Petals");
        let a2 = make_artist("The Wild Sax Band");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![a1.clone(), a2.clone()]])
            .into_connection();

        let refs = list_artists(&db).await.unwrap();
        assert_eq!(
            refs,
            vec![
                ArtistRef {
                    id: a1.id,
                    name: a1.name
                },
                ArtistRef {
                    id: a2.id,
                    name: a2.name
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_venue_groups_counts_upcoming() {
        let v1 = make_venue("New York", "NY");
        let v2 = make_venue("San Francisco", "CA");
        let a = make_artist("The Wild Sax Band");
        let s1 = make_show(v1.id, a.id, "2999-01-01T20:00:00+00:00");
        let s2 = make_show(v1.id, a.id, "2999-02-01T20:00:00+00:00");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![v1.clone(), v2.clone()]])
            .append_query_results([vec![s1, s2]])
            .into_connection();

        let groups = list_venue_groups(&db).await.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].venues[0].num_upcoming_shows, 2);
        assert_eq!(groups[1].venues[0].num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn test_list_shows_joins_counterparts() {
        let venue = make_venue("New York", "NY");
        let artist = make_artist("The Wild Sax Band");
        let s = make_show(venue.id, artist.id, "2035-04-01T20:00:00+00:00");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![s.clone()]])
            .append_query_results([vec![venue.clone()]])
            .append_query_results([vec![artist.clone()]])
            .into_connection();

        let listings = list_shows(&db).await.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].venue_name, "The Musical Hop");
        assert_eq!(listings[0].artist_name, "The Wild Sax Band");
        assert_eq!(
            listings[0].artist_image_link.as_deref(),
            Some("https://img.example.com/artist.jpg")
        );
        assert_eq!(listings[0].start_time, s.start_time.to_rfc3339());
    }

    #[tokio::test]
    async fn test_list_shows_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<show::Model>::new()])
            .into_connection();

        assert!(list_shows(&db).await.unwrap().is_empty());
    }
}
