use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::assets::decode::{Bitmap, decode_image};
use crate::foundation::error::{CardError, CardResult};

/// Environment variable read by [`FsImageLoader::from_env`].
pub const ASSETS_DIR_ENV: &str = "DISCORD_CARD_ASSETS_DIR";

/// Reference to an image: a locator for the loader, or bytes already in memory.
#[derive(Clone)]
pub enum ImageRef {
    /// Path or URL resolved by an [`ImageLoader`].
    Locator(String),
    /// Encoded image bytes supplied by the caller.
    Bytes(Arc<[u8]>),
    /// Encoded image bytes compiled into the binary.
    Embedded(&'static [u8]),
}

impl ImageRef {
    /// Short description used in error messages and logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Locator(s) => s.clone(),
            Self::Bytes(b) => format!("<{} in-memory bytes>", b.len()),
            Self::Embedded(b) => format!("<{} embedded bytes>", b.len()),
        }
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locator(s) => f.debug_tuple("Locator").field(s).finish(),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Embedded(b) => f.debug_tuple("Embedded").field(&b.len()).finish(),
        }
    }
}

impl From<&str> for ImageRef {
    fn from(s: &str) -> Self {
        Self::Locator(s.to_owned())
    }
}

impl From<String> for ImageRef {
    fn from(s: String) -> Self {
        Self::Locator(s)
    }
}

impl From<Vec<u8>> for ImageRef {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes.into())
    }
}

impl<'de> serde::Deserialize<'de> for ImageRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Locator)
    }
}

/// Collaborator that turns a locator into a decoded bitmap.
///
/// Failures must be reported as [`CardError::ImageLoad`]; they abort the render.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    /// Fetch and decode the image named by `locator`.
    async fn load(&self, locator: &str) -> CardResult<Bitmap>;
}

/// Resolve any [`ImageRef`] to a bitmap, decoding in-memory bytes directly.
pub async fn load_image(loader: &dyn ImageLoader, image: &ImageRef) -> CardResult<Bitmap> {
    match image {
        ImageRef::Locator(locator) => loader.load(locator).await,
        ImageRef::Bytes(bytes) => {
            decode_image(bytes).map_err(|e| CardError::image_load(image.describe(), e))
        }
        ImageRef::Embedded(bytes) => {
            decode_image(bytes).map_err(|e| CardError::image_load(image.describe(), e))
        }
    }
}

/// Loads images from the local filesystem.
///
/// Relative locators are resolved below `root` and may not contain `..`; absolute paths are read
/// as-is. Network locators are rejected: fetching them belongs to a custom loader.
#[derive(Clone, Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    /// Create a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a loader rooted at `$DISCORD_CARD_ASSETS_DIR`, or the current directory.
    pub fn from_env() -> Self {
        let root = std::env::var_os(ASSETS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(root)
    }

    /// Root directory for relative locators.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, locator: &str) -> CardResult<PathBuf> {
        if is_network_locator(locator) {
            return Err(CardError::image_load(
                locator,
                anyhow::anyhow!("network locators need a custom ImageLoader"),
            ));
        }
        let path = Path::new(locator);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let rel = asset_relative_path(locator)
            .map_err(|why| CardError::image_load(locator, anyhow::anyhow!(why)))?;
        Ok(self.root.join(rel))
    }
}

impl Default for FsImageLoader {
    fn default() -> Self {
        Self::from_env()
    }
}

#[async_trait]
impl ImageLoader for FsImageLoader {
    async fn load(&self, locator: &str) -> CardResult<Bitmap> {
        let path = self.resolve(locator)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| CardError::image_load(locator, e))?;
        tracing::trace!(path = %path.display(), len = bytes.len(), "read image");
        decode_image(&bytes).map_err(|e| CardError::image_load(locator, e))
    }
}

/// Serves images from an in-memory map of locator to encoded bytes.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageLoader {
    images: HashMap<String, Arc<[u8]>>,
}

impl MemoryImageLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register encoded bytes under `locator`.
    pub fn insert(&mut self, locator: impl Into<String>, bytes: impl Into<Arc<[u8]>>) {
        self.images.insert(locator.into(), bytes.into());
    }

    /// Builder-style [`MemoryImageLoader::insert`].
    pub fn with(mut self, locator: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.insert(locator, bytes);
        self
    }
}

#[async_trait]
impl ImageLoader for MemoryImageLoader {
    async fn load(&self, locator: &str) -> CardResult<Bitmap> {
        let bytes = self.images.get(locator).ok_or_else(|| {
            CardError::image_load(locator, anyhow::anyhow!("no image registered"))
        })?;
        decode_image(bytes).map_err(|e| CardError::image_load(locator, e))
    }
}

pub(crate) fn is_network_locator(locator: &str) -> bool {
    let lower = locator.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Turn a loader-relative locator into a path below the loader root.
///
/// Both `/` and `\` separate segments and `.` segments are dropped. Rooted locators, drive
/// prefixes such as `C:` and `..` segments are refused so a locator cannot leave the root.
pub(crate) fn asset_relative_path(locator: &str) -> Result<PathBuf, &'static str> {
    if locator.starts_with(['/', '\\']) {
        return Err("locator is rooted");
    }
    let mut segments = locator
        .split(['/', '\\'])
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .peekable();
    if segments.peek().is_some_and(|first| first.ends_with(':')) {
        return Err("locator has a drive prefix");
    }

    let mut rel = PathBuf::new();
    for seg in segments {
        if seg == ".." {
            return Err("locator escapes the asset root");
        }
        rel.push(seg);
    }
    if rel.as_os_str().is_empty() {
        return Err("locator names no file");
    }
    Ok(rel)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
