//! Navigation events emitted by the host router.

use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// Kind of content the router landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Course,
    Menu,
    Page,
}

/// `{contentType, currentModel}` of one route change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub content_type: ContentType,
    pub current_model: ItemId,
}

impl Location {
    pub fn new(content_type: ContentType, current_model: impl Into<ItemId>) -> Self {
        Self {
            content_type,
            current_model: current_model.into(),
        }
    }

    pub fn page(id: impl Into<ItemId>) -> Self {
        Self::new(ContentType::Page, id)
    }

    pub fn menu(id: impl Into<ItemId>) -> Self {
        Self::new(ContentType::Menu, id)
    }

    pub fn is_page(&self) -> bool {
        self.content_type == ContentType::Page
    }
}
