//! Info card payloads
//!
//! Serde shapes for the informational cards the host renders, plus the
//! slide carousel each card pages its descriptions with.

use serde::{Deserialize, Serialize};

/// One informational card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoCard {
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Description slides, paged by the carousel
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub frequency: String,
}

/// One selectable prompt in a gallery payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryPrompt {
    pub title: String,
    pub prompt: String,
    #[serde(default)]
    pub icon: String,
}

/// The prompt-gallery element payload the server sends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PromptGallery {
    #[serde(default)]
    pub data: Vec<GalleryPrompt>,
}

/// Wrapping slide cursor over a card's descriptions
///
/// Next and previous wrap around; on an empty card both are no-ops and the
/// current slide stays None.
#[derive(Debug, Clone, Default)]
pub struct Carousel {
    index: usize,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current slide text, None when the card has no descriptions
    pub fn current<'a>(&self, card: &'a InfoCard) -> Option<&'a str> {
        card.descriptions.get(self.index).map(String::as_str)
    }

    /// Current slide index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance, wrapping past the last slide
    pub fn next(&mut self, card: &InfoCard) {
        if !card.descriptions.is_empty() {
            self.index = (self.index + 1) % card.descriptions.len();
        }
    }

    /// Step back, wrapping before the first slide
    pub fn prev(&mut self, card: &InfoCard) {
        let len = card.descriptions.len();
        if len > 0 {
            self.index = (self.index + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(slides: &[&str]) -> InfoCard {
        InfoCard {
            title: "Card".to_string(),
            image_url: None,
            descriptions: slides.iter().map(|s| s.to_string()).collect(),
            target_audience: String::new(),
            published: String::new(),
            source: String::new(),
            link: String::new(),
            tags: Vec::new(),
            frequency: String::new(),
        }
    }

    #[test]
    fn test_next_wraps() {
        let card = card(&["a", "b", "c"]);
        let mut carousel = Carousel::new();

        assert_eq!(carousel.current(&card), Some("a"));
        carousel.next(&card);
        carousel.next(&card);
        assert_eq!(carousel.current(&card), Some("c"));
        carousel.next(&card);
        assert_eq!(carousel.current(&card), Some("a"));
    }

    #[test]
    fn test_prev_wraps() {
        let card = card(&["a", "b", "c"]);
        let mut carousel = Carousel::new();

        carousel.prev(&card);
        assert_eq!(carousel.current(&card), Some("c"));
    }

    #[test]
    fn test_empty_card_is_inert() {
        let card = card(&[]);
        let mut carousel = Carousel::new();

        carousel.next(&card);
        carousel.prev(&card);
        assert_eq!(carousel.index(), 0);
        assert_eq!(carousel.current(&card), None);
    }

    #[test]
    fn test_card_deserializes_with_defaults() {
        let card: InfoCard = serde_json::from_str(r#"{"title":"Guide"}"#).unwrap();
        assert_eq!(card.title, "Guide");
        assert!(card.descriptions.is_empty());
        assert!(card.tags.is_empty());
        assert_eq!(card.image_url, None);
    }

    #[test]
    fn test_gallery_payload_shape() {
        let json = r#"{"data":[{"title":"要約作成","prompt":"以下の内容を簡潔に要約してください。","icon":"📝"}]}"#;
        let gallery: PromptGallery = serde_json::from_str(json).unwrap();
        assert_eq!(gallery.data.len(), 1);
        assert_eq!(gallery.data[0].title, "要約作成");
        assert_eq!(gallery.data[0].icon, "📝");

        let empty: PromptGallery = serde_json::from_str("{}").unwrap();
        assert!(empty.data.is_empty());
    }

    #[test]
    fn test_card_roundtrip() {
        let original = card(&["one", "two"]);
        let json = serde_json::to_string(&original).unwrap();
        let parsed: InfoCard = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
