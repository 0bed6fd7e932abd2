pub mod artists;
pub mod shows;
pub mod venues;

use axum::http::StatusCode;
use gigboard_db::error::OpError;
use serde::Serialize;

/// Flash-style notice returned by every mutation route. The external
/// rendering layer turns it into the on-page flash message.
#[derive(Debug, Serialize)]
pub struct FlashMessage {
    pub success: bool,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Map a read-path error to the HTTP boundary. Store-level causes are
/// logged and never returned to the caller.
pub(crate) fn op_error(e: OpError) -> (StatusCode, String) {
    write_error(e, "An error occurred.")
}

/// Map a write-path error to the HTTP boundary, with the flash text to
/// show when the store itself failed.
pub(crate) fn write_error(e: OpError, message: &'static str) -> (StatusCode, String) {
    match e {
        OpError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
        OpError::Store(err) => {
            tracing::error!("database error: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_flash_message_serialization() {
        let flash = FlashMessage::success("Venue The Musical Hop was successfully listed!");
        let json = serde_json::to_value(&flash).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(
            json["message"],
            "Venue The Musical Hop was successfully listed!"
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, message) = op_error(OpError::NotFound("venue"));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "venue not found");
    }

    #[test]
    fn test_store_error_hides_cause() {
        let err = OpError::Store(DbErr::Custom("connection reset".into()));
        let (status, message) = write_error(err, "An error occurred. Venue could not be listed.");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("connection reset"));
        assert_eq!(message, "An error occurred. Venue could not be listed.");
    }
}
