//! Source images and the display list built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::UrlSource;
use crate::geometry::image_name_from_url;

/// One image as the embedder found it, e.g. an `<img>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceImage {
    pub src: Option<String>,
    pub alt: Option<String>,
    /// Other attributes a `UrlSource::Attribute` can read.
    pub attributes: BTreeMap<String, String>,
}

impl SourceImage {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// An entry of the viewer's image list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    /// Thumbnail source: the image's own source, or the resolved URL.
    pub src: String,
    /// Full-resolution URL shown in the viewer and the slideshow.
    pub original_url: String,
    pub alt: String,
}

/// Build the display list. Sources with neither a `src` nor a resolvable
/// URL are skipped.
pub fn build_items(images: &[SourceImage], url: &UrlSource) -> Vec<ImageItem> {
    images
        .iter()
        .filter_map(|image| {
            let src = image.src.clone().filter(|s| !s.is_empty());
            let resolved = url.resolve(image).filter(|u| !u.is_empty());
            let (src, original_url) = match (src, resolved) {
                (Some(src), Some(url)) => (src, url),
                (Some(src), None) => (src.clone(), src),
                (None, Some(url)) => (url.clone(), url),
                (None, None) => return None,
            };
            let alt = image
                .alt
                .clone()
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| image_name_from_url(&src).to_string());
            Some(ImageItem {
                src,
                original_url,
                alt,
            })
        })
        .collect()
}

/// Positions of `old` whose source differs in `new` or is gone from it.
pub fn changed_positions(old: &[ImageItem], new: &[ImageItem]) -> Vec<usize> {
    old.iter()
        .enumerate()
        .filter(|(i, item)| new.get(*i).map_or(true, |n| n.src != item.src))
        .map(|(i, _)| i)
        .collect()
}
