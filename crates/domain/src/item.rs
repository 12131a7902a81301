//! Catalog items.

use common::ItemId;

use crate::error::ItemError;

/// Longest title the `items` table accepts.
pub const MAX_TITLE_LENGTH: usize = 200;

/// A persisted catalog item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
}

/// A validated item waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    title: String,
}

impl NewItem {
    /// Accepts any title with visible characters, up to [`MAX_TITLE_LENGTH`].
    ///
    /// The title is kept verbatim; surrounding whitespace is not trimmed.
    pub fn new(title: impl Into<String>) -> Result<Self, ItemError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ItemError::TitleRequired);
        }

        let length = title.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(ItemError::TitleTooLong {
                length,
                max: MAX_TITLE_LENGTH,
            });
        }

        Ok(Self { title })
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}
