//! Static HTML rendering of fetched collections.
//!
//! Writes a browsable snapshot of the gallery: a landing page, one grid page
//! per collection, and one detail page per painting.
//!
//! ## Output Structure
//!
//! ```text
//! out/
//! ├── index.html                     # Collection links
//! ├── feathers/
//! │   ├── index.html                 # Thumbnail grid
//! │   ├── 42-red-tailed-hawk.html    # Detail pages, named by slugified website path
//! │   └── ...
//! ├── arrangements/
//! └── spirits/
//! ```
//!
//! Images are hot-linked from the CDN, nothing is downloaded. A painting
//! whose image URL could not be derived gets a placeholder box; one without
//! a website URL gets a disabled link instead of an anchor.
//!
//! Uses [maud](https://maud.lambda.xyz/) so every interpolated catalog string
//! is escaped.

use maud::{DOCTYPE, Markup, html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::assets::AssetResolver;
use crate::color::Rgb;
use crate::config::GalleryConfig;
use crate::naming::slugify;
use crate::painting::Painting;
use crate::types::{Collection, PaintingRecord};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A page written to disk, relative to the output directory.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub title: String,
    pub path: PathBuf,
}

const CSS: &str = r#"
body { margin: 0; font-family: Georgia, serif; background: #fafafa; color: #222; }
header.site-header { padding: 1rem 2rem; border-bottom: 1px solid #ddd; }
main { padding: 2rem; }
.painting-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 1.5rem; }
.painting-card { text-decoration: none; color: inherit; }
.painting-card img, .placeholder { width: 100%; aspect-ratio: 1; object-fit: contain; }
.placeholder { display: flex; align-items: center; justify-content: center; background: #e5e5e5; color: #777; font-size: 0.8rem; }
.painting-frame { padding: 2rem; text-align: center; }
.painting-frame img { max-width: 100%; max-height: 80vh; aspect-ratio: var(--aspect-ratio, auto); }
.subtitle { color: #666; }
.sold { color: #a33; }
.link-disabled { color: #aaa; }
.secondary-images img { max-width: 30%; margin: 0.5rem; }
"#;

/// Render every given collection into `output_dir`.
pub fn render_site(
    collections: &[(Collection, Vec<PaintingRecord>)],
    config: &GalleryConfig,
    output_dir: &Path,
) -> Result<Vec<RenderedPage>, RenderError> {
    let assets = AssetResolver::new(config);
    let mut pages = Vec::new();

    fs::create_dir_all(output_dir)?;
    let index = render_landing(collections);
    pages.push(write_page(output_dir, Path::new("index.html"), "Gallery", index)?);

    for (collection, records) in collections {
        let dir = Path::new(collection.web_segment());
        fs::create_dir_all(output_dir.join(dir))?;

        let paintings: Vec<(String, Painting)> = page_names(records)
            .into_iter()
            .zip(records)
            .map(|(name, record)| (name, Painting::from_record(record, config, &assets)))
            .collect();

        let grid = render_collection_page(*collection, &paintings);
        pages.push(write_page(
            output_dir,
            &dir.join("index.html"),
            collection.label(),
            grid,
        )?);

        for ((name, painting), record) in paintings.iter().zip(records) {
            let detail = render_detail_page(record, painting, &assets);
            pages.push(write_page(
                output_dir,
                &dir.join(format!("{name}.html")),
                &painting.display_title,
                detail,
            )?);
        }
        tracing::info!(%collection, count = records.len(), "Rendered collection");
    }

    Ok(pages)
}

fn write_page(
    output_dir: &Path,
    relative: &Path,
    title: &str,
    markup: Markup,
) -> Result<RenderedPage, RenderError> {
    fs::write(output_dir.join(relative), markup.into_string())?;
    Ok(RenderedPage {
        title: title.to_string(),
        path: relative.to_path_buf(),
    })
}

/// File stem for a detail page: the slugified website path when there is
/// one, otherwise the 1-based position in the list.
///
/// Only `[a-z0-9-]` survive, so a remote identifier can never name a path
/// outside its collection directory.
pub fn page_name(record: &PaintingRecord, idx: usize) -> String {
    let name = match record {
        PaintingRecord::Feather(f) => f.url_path(),
        PaintingRecord::Arrangement(a) => slugify(&a.identifier()),
        PaintingRecord::Spirit(s) => slugify(&s.id),
    };
    if name.is_empty() {
        (idx + 1).to_string()
    } else {
        name
    }
}

/// [`page_name`] for every record, suffixing `-N` (1-based position) to any
/// name already taken so no page overwrites another.
pub fn page_names(records: &[PaintingRecord]) -> Vec<String> {
    let mut taken = HashSet::new();
    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let mut name = page_name(record, idx);
            while taken.contains(&name) {
                name = format!("{name}-{}", idx + 1);
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (CSS) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            nav.breadcrumb { (breadcrumb) }
        }
    }
}

fn image_or_placeholder(url: Option<&reqwest::Url>, alt: &str) -> Markup {
    html! {
        @match url {
            Some(url) => {
                img src=(url.as_str()) alt=(alt) loading="lazy";
            },
            None => {
                div.placeholder role="img" aria-label=(alt) { "Image unavailable" }
            },
        }
    }
}

fn web_link(painting: &Painting) -> Markup {
    html! {
        @match &painting.web_url {
            Some(url) => {
                a.web-link href=(url.as_str()) target="_blank" rel="noopener" { "View on website" }
            },
            None => {
                span.link-disabled { "View on website" }
            },
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_landing(collections: &[(Collection, Vec<PaintingRecord>)]) -> Markup {
    let content = html! {
        (site_header(html! { "Gallery" }))
        main.index-page {
            ul.collections {
                @for (collection, records) in collections {
                    li {
                        a href={ (collection.web_segment()) "/index.html" } { (collection.label()) }
                        " (" (records.len()) ")"
                    }
                }
            }
        }
    };
    base_document("Gallery", content)
}

fn render_collection_page(collection: Collection, paintings: &[(String, Painting)]) -> Markup {
    let breadcrumb = html! {
        a href="../index.html" { "Gallery" }
        " › "
        (collection.label())
    };
    let content = html! {
        (site_header(breadcrumb))
        main.collection-page {
            h1 { (collection.label()) }
            @if paintings.is_empty() {
                p.empty { "No paintings to show." }
            }
            div.painting-grid {
                @for (name, painting) in paintings {
                    a.painting-card href={ (name) ".html" } {
                        (image_or_placeholder(painting.image_url_sm.as_ref(), &painting.display_title))
                        span.painting-title { (painting.display_title) }
                    }
                }
            }
        }
    };
    base_document(collection.label(), content)
}

fn render_detail_page(record: &PaintingRecord, painting: &Painting, assets: &AssetResolver) -> Markup {
    let breadcrumb = html! {
        a href="../index.html" { "Gallery" }
        " › "
        a href="index.html" { (painting.collection_label) }
    };

    // Feathers are framed in their own palette; spirits reserve their
    // physical aspect ratio while the image loads.
    let frame_style = match record {
        PaintingRecord::Feather(f) => Some(format!(
            "background: {}; color: {};",
            Rgb::parse_or_white(f.light_color_rgb.as_deref()),
            f.dark_color_rgb
                .as_deref()
                .and_then(Rgb::parse)
                .map(|c| c.to_hex())
                .unwrap_or_else(|| "#222222".to_string()),
        )),
        PaintingRecord::Spirit(s) => s
            .aspect_ratio()
            .map(|ratio| format!("--aspect-ratio: {ratio:.4};")),
        PaintingRecord::Arrangement(_) => None,
    };

    let secondary = match record {
        PaintingRecord::Spirit(s) => assets.spirit_secondary_urls(s),
        _ => Vec::new(),
    };
    let aspect = match record {
        PaintingRecord::Arrangement(a) => Some(a.aspect_ratio()),
        _ => None,
    };

    let content = html! {
        (site_header(breadcrumb))
        main.detail-page {
            figure.painting-frame style=[frame_style] {
                (image_or_placeholder(painting.image_url_lg.as_ref(), &painting.display_title))
                figcaption {
                    h1 { (painting.display_title) }
                    p.subtitle { (painting.subtitle()) }
                    @if let Some(aspect) = aspect {
                        p.aspect { "Aspect ratio " (aspect) }
                    }
                    @if !painting.is_available {
                        p.sold { "Original sold" }
                    }
                }
            }
            @if let Some(description) = &painting.description {
                p.description { (description) }
            }
            @if !secondary.is_empty() {
                div.secondary-images {
                    @for url in &secondary {
                        img src=(url.as_str()) alt=(painting.display_title) loading="lazy";
                    }
                }
            }
            p.links {
                (web_link(painting))
            }
            @if let Some(share) = painting.share_payload() {
                p.share { (share.caption) " " (share.url.as_str()) }
            }
        }
    };

    base_document(&painting.display_title, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn detail(record: impl Into<PaintingRecord>, config: &GalleryConfig) -> String {
        let record = record.into();
        let assets = AssetResolver::new(config);
        let painting = Painting::from_record(&record, config, &assets);
        render_detail_page(&record, &painting, &assets).into_string()
    }

    #[test]
    fn page_names_follow_website_paths() {
        assert_eq!(
            page_name(&feather(42, Some("Red-Tailed Hawk")).into(), 0),
            "42-red-tailed-hawk"
        );
        assert_eq!(page_name(&arrangement(7, 2, 1).into(), 0), "7");
        assert_eq!(
            page_name(&spirit("Raven Peak", "Raven Peak", "2023").into(), 0),
            "raven-peak"
        );
        assert_eq!(page_name(&spirit("", "Nameless", "2020").into(), 4), "5");
    }

    #[test]
    fn detail_page_has_doctype_and_title() {
        let html = detail(feather(42, None), &GalleryConfig::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Feather #42</title>"));
        assert!(html.contains("— $225"));
    }

    #[test]
    fn feather_detail_uses_palette_colors() {
        let html = detail(feather(42, None), &GalleryConfig::default());
        assert!(html.contains("background: #e9e5de; color: #3d342c;"));
    }

    #[test]
    fn feather_without_palette_falls_back_to_white() {
        let mut f = feather(42, None);
        f.light_color_rgb = Some("garbage".to_string());
        f.dark_color_rgb = None;
        let html = detail(f, &GalleryConfig::default());
        assert!(html.contains("background: #ffffff; color: #222222;"));
    }

    #[test]
    fn missing_image_renders_placeholder() {
        let mut config = GalleryConfig::default();
        config.cdn.base_url = "not a url".to_string();
        let html = detail(arrangement(7, 2, 1), &config);
        assert!(html.contains("Image unavailable"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn missing_web_url_disables_link_and_share() {
        let html = detail(spirit("", "Nameless", "2020"), &GalleryConfig::default());
        assert!(html.contains("link-disabled"));
        assert!(!html.contains("class=\"share\""));
    }

    #[test]
    fn arrangement_detail_shows_aspect_ratio() {
        let html = detail(arrangement(7, 4, 1), &GalleryConfig::default());
        assert!(html.contains("Aspect ratio 2:1"));
    }

    #[test]
    fn catalog_text_is_escaped() {
        let mut s = spirit("evil", "<script>alert(1)</script>", "2020");
        s.statement = Some("<b>bold</b>".to_string());
        let html = detail(s, &GalleryConfig::default());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn spirit_detail_reserves_aspect_ratio() {
        let html = detail(spirit("raven-peak", "Raven Peak", "2023"), &GalleryConfig::default());
        assert!(html.contains("--aspect-ratio: 0.7500;"));

        let mut flat = spirit("flat", "Flat", "2023");
        flat.height = 0;
        let html = detail(flat, &GalleryConfig::default());
        assert!(!html.contains("--aspect-ratio:"));
    }

    #[test]
    fn page_names_strip_path_characters() {
        let mut up = arrangement(1, 1, 1);
        up.id = Some("../../escaped".to_string());
        let mut nested = arrangement(2, 1, 1);
        nested.id = Some("a/b".to_string());
        assert_eq!(page_name(&up.into(), 0), "escaped");
        assert_eq!(page_name(&nested.into(), 1), "a-b");
    }

    #[test]
    fn colliding_page_names_are_disambiguated() {
        let records: Vec<PaintingRecord> = vec![
            spirit("Raven Peak", "Raven Peak", "2023").into(),
            spirit("raven-peak", "Raven Peak II", "2024").into(),
            spirit("!!!", "Unnamed", "2020").into(),
            spirit("3", "Three", "2021").into(),
        ];
        assert_eq!(
            page_names(&records),
            ["raven-peak", "raven-peak-2", "3", "3-4"]
        );
    }

    #[test]
    fn hostile_ids_stay_inside_output_dir() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        let mut up = arrangement(1, 1, 1);
        up.id = Some("../../escaped".to_string());
        let mut nested = arrangement(2, 1, 1);
        nested.id = Some("a/b".to_string());
        let collections = vec![(Collection::Arrangements, vec![up.into(), nested.into()])];

        let pages = render_site(&collections, &GalleryConfig::default(), &out).unwrap();

        assert!(!tmp.path().join("escaped.html").exists());
        assert!(out.join("arrangements/escaped.html").exists());
        assert!(out.join("arrangements/a-b.html").exists());
        assert!(
            pages
                .iter()
                .all(|p| !p.path.to_string_lossy().contains(".."))
        );
    }

    #[test]
    fn colliding_spirits_get_separate_pages() {
        let tmp = TempDir::new().unwrap();
        let collections = vec![(
            Collection::Spirits,
            vec![
                spirit("Raven Peak", "Raven Peak", "2023").into(),
                spirit("raven-peak", "Raven Peak II", "2024").into(),
            ],
        )];
        let pages = render_site(&collections, &GalleryConfig::default(), tmp.path()).unwrap();
        let paths: Vec<_> = pages.iter().map(|p| p.path.clone()).collect();
        assert!(paths.contains(&PathBuf::from("spirits/raven-peak.html")));
        assert!(paths.contains(&PathBuf::from("spirits/raven-peak-2.html")));
        let second = fs::read_to_string(tmp.path().join("spirits/raven-peak-2.html")).unwrap();
        assert!(second.contains("Raven Peak II"));
    }

    #[test]
    fn render_site_writes_all_pages() {
        let tmp = TempDir::new().unwrap();
        let collections = vec![
            (
                Collection::Feathers,
                vec![feather(1, Some("Snowy Owl")).into(), feather(2, None).into()],
            ),
            (Collection::Spirits, vec![]),
        ];
        let pages = render_site(&collections, &GalleryConfig::default(), tmp.path()).unwrap();

        assert_eq!(pages.len(), 5);
        assert!(tmp.path().join("index.html").exists());
        assert!(tmp.path().join("feathers/index.html").exists());
        assert!(tmp.path().join("feathers/1-snowy-owl.html").exists());
        assert!(tmp.path().join("feathers/2.html").exists());

        let grid = fs::read_to_string(tmp.path().join("feathers/index.html")).unwrap();
        assert!(grid.contains("href=\"1-snowy-owl.html\""));
        let empty = fs::read_to_string(tmp.path().join("spirits/index.html")).unwrap();
        assert!(empty.contains("No paintings to show."));
    }
}
