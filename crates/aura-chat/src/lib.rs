//! Chat-side companions to the backdrop engine
//!
//! The saved-prompt store, the message relay that pushes a selected prompt
//! into the chat, and the info card payload shapes.

pub mod cards;
pub mod relay;
pub mod store;

pub use cards::{Carousel, GalleryPrompt, InfoCard, PromptGallery};
pub use relay::{Delivery, MessageRelay, MessageSink};
pub use store::{
    KeyValue, MemoryStorage, NewPrompt, PromptEntry, PromptStore, STORE_KEY, StoreError,
};
