//! Read-only facts about the member a card is rendered for.

use crate::assets::loader::ImageRef;

/// Accessor the composer reads subject facts through. The core never mutates a subject.
pub trait Subject {
    /// Display tag, e.g. `name#1234`.
    fn tag(&self) -> &str;

    /// Display name; the tag unless overridden.
    fn display_name(&self) -> &str {
        self.tag()
    }

    /// Avatar image.
    fn avatar(&self) -> &ImageRef;

    /// Member count of the enclosing guild.
    fn member_count(&self) -> u64;
}

/// Plain owned [`Subject`].
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Display tag.
    pub tag: String,
    /// Display name, when it differs from the tag.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Avatar image.
    pub avatar: ImageRef,
    /// Member count of the enclosing guild.
    pub member_count: u64,
}

impl Member {
    /// Build a member without a separate display name.
    pub fn new(tag: impl Into<String>, avatar: impl Into<ImageRef>, member_count: u64) -> Self {
        Self {
            tag: tag.into(),
            display_name: None,
            avatar: avatar.into(),
            member_count,
        }
    }
}

impl Subject for Member {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.tag)
    }

    fn avatar(&self) -> &ImageRef {
        &self.avatar
    }

    fn member_count(&self) -> u64 {
        self.member_count
    }
}

#[cfg(test)]
#[path = "../tests/unit/subject.rs"]
mod tests;
