use serde::{Deserialize, Serialize};

use crate::shared::errors::Result;

/// Story thumbnail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub src: String,
}

/// The submitted story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedItem {
    pub thumbnail: Thumbnail,
    pub href: String,
    pub title: String,
}

/// Account that submitted the story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submitter {
    pub name: String,
}

/// One `submission` event from the streaming API
///
/// Only the fields used for rendering are modelled; anything else in the
/// payload is ignored. A missing or mistyped field fails decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEvent {
    pub item: SubmittedItem,
    pub user: Submitter,
}

impl SubmissionEvent {
    /// Decode a raw message payload
    pub fn decode(payload: &str) -> Result<Self> {
        Ok(serde_json::from_str(payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::StreamError;

    const ALICE: &str = r#"{"item":{"thumbnail":{"src":"http://x/img.png"},"href":"http://x/story","title":"Hello"},"user":{"name":"alice"}}"#;

    #[test]
    fn test_decode_submission() {
        let event = SubmissionEvent::decode(ALICE).unwrap();
        assert_eq!(event.item.thumbnail.src, "http://x/img.png");
        assert_eq!(event.item.href, "http://x/story");
        assert_eq!(event.item.title, "Hello");
        assert_eq!(event.user.name, "alice");
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let payload = r#"{
            "type": "submission",
            "timestamp": 1281467412,
            "item": {
                "thumbnail": {"src": "http://x/t.jpg", "width": 80},
                "href": "http://x/a",
                "title": "A",
                "diggs": 3
            },
            "user": {"name": "bob", "icon": "http://x/bob.png"}
        }"#;

        let event = SubmissionEvent::decode(payload).unwrap();
        assert_eq!(event.user.name, "bob");
        assert_eq!(event.item.thumbnail.src, "http://x/t.jpg");
    }

    #[test]
    fn test_decode_missing_user_fails() {
        let payload = r#"{"item":{"thumbnail":{"src":"s"},"href":"h","title":"t"}}"#;
        assert!(matches!(
            SubmissionEvent::decode(payload),
            Err(StreamError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_not_json_fails() {
        assert!(SubmissionEvent::decode("ping").is_err());
        assert!(SubmissionEvent::decode("").is_err());
    }

    #[test]
    fn test_decode_wrong_type_fails() {
        let payload = r#"{"item":{"thumbnail":{"src":"s"},"href":"h","title":42},"user":{"name":"n"}}"#;
        assert!(SubmissionEvent::decode(payload).is_err());
    }
}
