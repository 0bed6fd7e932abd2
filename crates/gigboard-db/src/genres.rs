//! Genres are stored as a single comma-delimited string.
//!
//! The comma is the field delimiter, so genre values themselves must not
//! contain commas. This is not enforced by the store.

/// Join an ordered genre list into its stored form.
pub fn join(genres: &[String]) -> String {
    genres.join(",")
}

/// Split a stored genre string back into an ordered list.
///
/// An empty string yields an empty list rather than one empty genre.
pub fn split(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_order() {
        let genres = vec!["Jazz".to_string(), "Reggae".to_string()];
        let stored = join(&genres);
        assert_eq!(stored, "Jazz,Reggae");
        assert_eq!(split(&stored), genres);
    }

    #[test]
    fn test_single_genre() {
        assert_eq!(join(&["Classical".to_string()]), "Classical");
        assert_eq!(split("Classical"), vec!["Classical".to_string()]);
    }

    #[test]
    fn test_empty_string_yields_no_genres() {
        assert_eq!(join(&[]), "");
        assert!(split("").is_empty());
    }

    #[test]
    fn test_spaces_inside_values_survive() {
        let genres = vec!["Rock n Roll".to_string(), "Hip-Hop".to_string()];
        assert_eq!(split(&join(&genres)), genres);
    }
}
