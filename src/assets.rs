//! CDN image and website URL derivation.
//!
//! Every URL is composed from configured base paths and a record's stored
//! identifiers or filename fragments, then parsed. A string that does not
//! parse yields `None`: callers show a placeholder or disable the link instead
//! of failing the whole view.
//!
//! | Collection | Image | Website |
//! |------------|-------|---------|
//! | Feathers | `{cdn}{feathers_path}/{fragment with canonical suffix}` | `{site}/feathers/{number}-{slug}` |
//! | Arrangements | `{cdn}{arrangements_path}/arr-{000007}_{sm,lg,print}.{ext}` | `{site}/arrangements/{id}` |
//! | Spirits | `{cdn}{fragment}` verbatim | `{site}/spirits/{id}` |
//!
//! Website ids are pushed as one percent-encoded path segment, so an id can
//! never leave its collection path or spill into the query string.

use reqwest::Url;

use crate::config::GalleryConfig;
use crate::naming::pad_number;
use crate::types::{Arrangement, Collection, Feather, PaintingRecord, Spirit};

/// Image rendition served by the CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// Grid thumbnail.
    Small,
    /// Detail view.
    Large,
    /// Print-resolution file.
    Print,
}

impl ImageSize {
    /// Filename suffix used in arrangement image names.
    pub fn suffix(self) -> &'static str {
        match self {
            ImageSize::Small => "sm",
            ImageSize::Large => "lg",
            ImageSize::Print => "print",
        }
    }
}

/// Derives absolute URLs for records from the configured roots.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    cdn_base: String,
    feathers_root: String,
    arrangements_root: String,
    image_extension: String,
    site_base: String,
}

impl AssetResolver {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            cdn_base: config.cdn.base_url.trim_end_matches('/').to_string(),
            feathers_root: config.cdn.feathers_root(),
            arrangements_root: config.cdn.arrangements_root(),
            image_extension: config.cdn.image_extension.clone(),
            site_base: config.website.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Rewrite a stored feather filename to the served image format.
    ///
    /// A fragment that already ends in the served extension passes through
    /// unchanged; any other extension is replaced, and a bare name gets one.
    // TODO: drop the rewrite once no feather record names a .webp file.
    pub fn feather_filename(&self, fragment: &str) -> String {
        let canonical = format!(".{}", self.image_extension);
        if fragment.ends_with(&canonical) {
            return fragment.to_string();
        }
        let stem = match fragment.rfind('.') {
            Some(dot) if !fragment[dot..].contains('/') => &fragment[..dot],
            _ => fragment,
        };
        format!("{stem}{canonical}")
    }

    /// `arr-000007_sm.jpeg` and friends.
    pub fn arrangement_filename(&self, number: u32, size: ImageSize) -> String {
        format!(
            "arr-{}_{}.{}",
            pad_number(number),
            size.suffix(),
            self.image_extension
        )
    }

    pub fn feather_image_url(&self, feather: &Feather, size: ImageSize) -> Option<Url> {
        let fragment = match size {
            ImageSize::Small => &feather.image_url_sm,
            ImageSize::Large => &feather.image_url_lg,
            ImageSize::Print => return None,
        };
        if fragment.trim().is_empty() {
            return None;
        }
        parse(format!(
            "{}/{}",
            self.feathers_root,
            self.feather_filename(fragment)
        ))
    }

    pub fn arrangement_image_url(&self, arrangement: &Arrangement, size: ImageSize) -> Option<Url> {
        parse(format!(
            "{}/{}",
            self.arrangements_root,
            self.arrangement_filename(arrangement.number, size)
        ))
    }

    /// Spirit images are stored as fragments relative to the CDN base.
    /// The print rendition is the unsigned print file, when one exists.
    pub fn spirit_image_url(&self, spirit: &Spirit, size: ImageSize) -> Option<Url> {
        let fragment = match size {
            ImageSize::Small => &spirit.gallery_image_sm,
            ImageSize::Large => &spirit.gallery_image_lg,
            ImageSize::Print => spirit.print_no_sig_file.as_ref()?,
        };
        self.cdn_fragment_url(fragment)
    }

    /// Additional views of a spirit painting; fragments that do not form a
    /// valid URL are skipped.
    pub fn spirit_secondary_urls(&self, spirit: &Spirit) -> Vec<Url> {
        spirit
            .secondary_images
            .iter()
            .filter_map(|fragment| self.cdn_fragment_url(fragment))
            .collect()
    }

    pub fn image_url(&self, record: &PaintingRecord, size: ImageSize) -> Option<Url> {
        match record {
            PaintingRecord::Feather(f) => self.feather_image_url(f, size),
            PaintingRecord::Arrangement(a) => self.arrangement_image_url(a, size),
            PaintingRecord::Spirit(s) => self.spirit_image_url(s, size),
        }
    }

    /// Public detail page for a record.
    pub fn web_url(&self, record: &PaintingRecord) -> Option<Url> {
        let path = match record {
            PaintingRecord::Feather(f) => f.url_path(),
            PaintingRecord::Arrangement(a) => a.identifier(),
            PaintingRecord::Spirit(s) => s.id.clone(),
        };
        self.website_url(record.collection(), &path)
    }

    /// `{site}/{collection}/{id}`, with `id` percent-encoded as a single
    /// path segment. Empty, `.` and `..` ids have no page.
    pub fn website_url(&self, collection: Collection, id: &str) -> Option<Url> {
        if matches!(id, "" | "." | "..") {
            return None;
        }
        let mut url = parse(self.site_base.clone())?;
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(collection.web_segment())
            .push(id);
        Some(url)
    }

    fn cdn_fragment_url(&self, fragment: &str) -> Option<Url> {
        if fragment.is_empty() {
            return None;
        }
        parse(format!("{}{}", self.cdn_base, fragment))
    }
}

fn parse(raw: String) -> Option<Url> {
    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!(url = %raw, error = %e, "Discarding malformed asset URL");
            None
        }
    }
}
