//! Responsive picture generation.
//!
//! Authored images are replaced with a `<picture>` offering one WebP source
//! per breakpoint, one source per breakpoint in the original format, and a
//! final `<img>` sized to the last breakpoint.

use log::warn;
use url::Url;

use crate::dom::{self, Selection};
use crate::error::Result;
use crate::options::Breakpoint;
use crate::patterns::MEDIA_IMAGES;
use crate::url_utils;

/// A `<source>` inside an optimized picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSource {
    /// Media query, if any.
    pub media: Option<String>,
    /// `type` attribute (`image/webp` for modern-format sources).
    pub mime_type: Option<String>,
    /// Rendition URL.
    pub srcset: String,
}

/// The fallback `<img>` closing an optimized picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureImage {
    /// Rendition URL.
    pub src: String,
    /// Alternative text.
    pub alt: String,
    /// Whether the image loads eagerly.
    pub eager: bool,
}

/// A responsive picture built by [`create_optimized_picture`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptimizedPicture {
    /// Modern-format sources followed by original-format sources.
    pub sources: Vec<PictureSource>,
    /// Final image, absent only when there are no breakpoints.
    pub img: Option<PictureImage>,
    /// Extra class for the `<picture>` element.
    pub class: Option<String>,
}

impl OptimizedPicture {
    /// Render the picture as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut inner = String::new();
        for source in &self.sources {
            let mut attrs: Vec<(&str, &str)> = Vec::with_capacity(3);
            if let Some(media) = &source.media {
                attrs.push(("media", media));
            }
            if let Some(mime) = &source.mime_type {
                attrs.push(("type", mime));
            }
            attrs.push(("srcset", &source.srcset));
            inner.push_str(&dom::element_html("source", &attrs, ""));
        }
        if let Some(img) = &self.img {
            let loading = if img.eager { "eager" } else { "lazy" };
            inner.push_str(&dom::element_html(
                "img",
                &[("loading", loading), ("alt", &img.alt), ("src", &img.src)],
                "",
            ));
        }
        let attrs: Vec<(&str, &str)> = self.class.as_deref().map(|c| ("class", c)).into_iter().collect();
        dom::element_html("picture", &attrs, &inner)
    }
}

fn rendition(path: &str, width: &str, format: &str) -> String {
    format!("{path}?width={width}&format={format}&optimize=medium")
}

/// Build a picture with WebP renditions and original-format fallbacks.
///
/// The source's own query string is discarded; only its path is used.
pub fn create_optimized_picture(
    src: &str,
    alt: &str,
    eager: bool,
    breakpoints: &[Breakpoint],
    base: Option<&Url>,
) -> Result<OptimizedPicture> {
    let path = url_utils::pathname(src, base)?;
    let ext = url_utils::extension(&path);

    let mut picture = OptimizedPicture::default();

    for br in breakpoints {
        picture.sources.push(PictureSource {
            media: br.media.clone(),
            mime_type: Some("image/webp".to_string()),
            srcset: rendition(&path, &br.width, "webply"),
        });
    }

    for (i, br) in breakpoints.iter().enumerate() {
        if i + 1 < breakpoints.len() {
            picture.sources.push(PictureSource {
                media: br.media.clone(),
                mime_type: None,
                srcset: rendition(&path, &br.width, ext),
            });
        } else {
            picture.img = Some(PictureImage {
                src: rendition(&path, &br.width, ext),
                alt: alt.to_string(),
                eager,
            });
        }
    }

    Ok(picture)
}

/// Replace media-bus images with optimized pictures.
///
/// Only images already wrapped in a `<picture>` are replaced. The first image
/// is eager. When the picture sits inside `<em>`/`<strong>`, that
/// formatting wrapper is replaced as well.
///
/// # Returns
/// Number of pictures replaced.
pub fn decorate_pictures(root: &Selection, breakpoints: &[Breakpoint], base: Option<&Url>) -> usize {
    let mut replaced = 0;
    for (i, img) in root.select(MEDIA_IMAGES).iter().enumerate() {
        let Some(src) = img.attr("src") else {
            continue;
        };
        let alt = img.attr("alt").map(|s| s.to_string()).unwrap_or_default();
        let picture = match create_optimized_picture(&src, &alt, i == 0, breakpoints, base) {
            Ok(picture) => picture,
            Err(err) => {
                warn!("image left unoptimized: {err}");
                continue;
            }
        };
        let Some(old) = dom::closest(&img, "picture") else {
            continue;
        };
        let target = match dom::parent_element(&old) {
            Some(parent) if dom::is_tag(&parent, "em") || dom::is_tag(&parent, "strong") => parent,
            _ => old,
        };
        target.replace_with_html(picture.to_html());
        replaced += 1;
    }
    replaced
}
