//! The displayable painting: one flat view over any record.
//!
//! [`Painting::from_record`] maps each [`PaintingRecord`] variant onto the same
//! set of display fields, so detail views and the share flow never branch on
//! the collection themselves. URL fields are `Option`s; a missing image or link
//! is rendered as a placeholder rather than treated as an error.

use reqwest::Url;

use crate::assets::{AssetResolver, ImageSize};
use crate::config::GalleryConfig;
use crate::types::{Arrangement, Collection, PaintingRecord};

/// Text and link handed to the system share sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SharePayload {
    pub caption: String,
    pub url: Url,
}

/// Display fields shared by every collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Painting {
    pub collection: Collection,
    pub identifier: String,
    pub collection_label: &'static str,
    pub display_title: String,
    pub dimensions: String,
    pub price: String,
    pub description: Option<String>,
    pub image_url_sm: Option<Url>,
    pub image_url_lg: Option<Url>,
    pub web_url: Option<Url>,
    pub share_caption: String,
    pub is_available: bool,
}

impl Painting {
    pub fn from_record(record: &PaintingRecord, config: &GalleryConfig, assets: &AssetResolver) -> Self {
        let collection = record.collection();
        Self {
            collection,
            identifier: record.identifier(),
            collection_label: collection.label(),
            display_title: record.display_title(),
            dimensions: record.dimensions(),
            price: price_display(record, config),
            description: description(record),
            image_url_sm: assets.image_url(record, ImageSize::Small),
            image_url_lg: assets.image_url(record, ImageSize::Large),
            web_url: assets.web_url(record),
            share_caption: share_caption(record, &config.sharing.artist),
            is_available: record.is_available(),
        }
    }

    /// Caption plus link, or `None` when the painting has no web page.
    pub fn share_payload(&self) -> Option<SharePayload> {
        self.web_url.as_ref().map(|url| SharePayload {
            caption: self.share_caption.clone(),
            url: url.clone(),
        })
    }

    /// `15" × 20" — $125`, as shown under the detail title.
    pub fn subtitle(&self) -> String {
        format!("{} — {}", self.dimensions, self.price)
    }
}

/// Price string for the detail view.
pub fn price_display(record: &PaintingRecord, config: &GalleryConfig) -> String {
    let pricing = &config.pricing;
    let price = match record {
        PaintingRecord::Feather(f) => listed(&f.price).unwrap_or(pricing.feather.as_str()),
        PaintingRecord::Arrangement(_) => pricing.arrangement.as_str(),
        PaintingRecord::Spirit(s) => listed(&s.price).unwrap_or(pricing.on_request.as_str()),
    };
    price.to_string()
}

fn listed(price: &Option<String>) -> Option<&str> {
    price.as_deref().map(str::trim).filter(|p| !p.is_empty())
}

/// Long-form text: a spirit's statement, a feather's description, or a
/// sentence listing an arrangement's feathers.
pub fn description(record: &PaintingRecord) -> Option<String> {
    match record {
        PaintingRecord::Feather(f) => f.description.clone(),
        PaintingRecord::Arrangement(a) => arrangement_description(a),
        PaintingRecord::Spirit(s) => s.statement.clone(),
    }
}

/// `"An arrangement of feather numbers 3, 14 & 15"`.
pub fn arrangement_description(arrangement: &Arrangement) -> Option<String> {
    let numbers: Vec<String> = arrangement.feathers.iter().map(u32::to_string).collect();
    match numbers.as_slice() {
        [] => None,
        [only] => Some(format!("An arrangement of feather number {only}")),
        [first, second] => Some(format!(
            "An arrangement of feather numbers {first} and {second}"
        )),
        [init @ .., last] => Some(format!(
            "An arrangement of feather numbers {} & {last}",
            init.join(", ")
        )),
    }
}

/// Collection-specific share caption crediting the artist.
pub fn share_caption(record: &PaintingRecord, artist: &str) -> String {
    let subject = match record {
        PaintingRecord::Spirit(s) => s.name.clone(),
        other => other.collection().noun().to_string(),
    };
    format!("Check out this beautiful {subject} painting by {artist}!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    fn painting(record: impl Into<PaintingRecord>) -> Painting {
        let config = GalleryConfig::default();
        let assets = AssetResolver::new(&config);
        Painting::from_record(&record.into(), &config, &assets)
    }

    #[test]
    fn arrangement_description_variants() {
        let mut arr = arrangement(1, 2, 1);
        arr.feathers = vec![];
        assert_eq!(arrangement_description(&arr), None);

        arr.feathers = vec![12];
        assert_eq!(
            arrangement_description(&arr).unwrap(),
            "An arrangement of feather number 12"
        );

        arr.feathers = vec![12, 40];
        assert_eq!(
            arrangement_description(&arr).unwrap(),
            "An arrangement of feather numbers 12 and 40"
        );

        arr.feathers = vec![3, 14, 15, 92];
        assert_eq!(
            arrangement_description(&arr).unwrap(),
            "An arrangement of feather numbers 3, 14, 15 & 92"
        );
    }

    #[test]
    fn share_captions_per_collection() {
        assert_eq!(
            painting(feather(1, None)).share_caption,
            "Check out this beautiful feather painting by Shayna Larsen!"
        );
        assert_eq!(
            painting(arrangement(1, 1, 1)).share_caption,
            "Check out this beautiful arrangement painting by Shayna Larsen!"
        );
        assert_eq!(
            painting(spirit("raven-peak", "Raven Peak", "2023")).share_caption,
            "Check out this beautiful Raven Peak painting by Shayna Larsen!"
        );
    }

    #[test]
    fn prices_fall_back_to_configured_values() {
        assert_eq!(painting(feather(1, None)).price, "$225");
        let mut f = feather(2, None);
        f.price = Some("$300".to_string());
        assert_eq!(painting(f).price, "$300");
        assert_eq!(painting(arrangement(1, 1, 1)).price, "$125");
    }

    #[test]
    fn spirit_without_price_is_on_request() {
        let mut s = spirit("raven-peak", "Raven Peak", "2023");
        s.price = None;
        assert_eq!(painting(s.clone()).price, "Price on request");
        s.price = Some("  ".to_string());
        assert_eq!(painting(s).price, "Price on request");
    }

    #[test]
    fn painting_fields_for_arrangement() {
        let mut arr = arrangement(7, 4, 1);
        arr.feathers = vec![3, 9];
        let p = painting(arr);
        assert_eq!(p.collection_label, "Arrangements");
        assert_eq!(p.display_title, "Arrangement #7");
        assert_eq!(p.subtitle(), "20\" × 10\" — $125");
        assert!(p.is_available);
        assert!(
            p.image_url_sm
                .as_ref()
                .unwrap()
                .as_str()
                .ends_with("arr-000007_sm.jpeg")
        );
        assert_eq!(
            p.description.as_deref(),
            Some("An arrangement of feather numbers 3 and 9")
        );
    }

    #[test]
    fn share_payload_pairs_caption_and_url() {
        let p = painting(feather(42, None));
        let share = p.share_payload().unwrap();
        assert_eq!(share.url.as_str(), "https://www.shaynalarsen.art/feathers/42");
        assert!(share.caption.starts_with("Check out"));
    }

    #[test]
    fn no_share_payload_without_web_url() {
        let p = painting(spirit("", "Nameless", "2020"));
        assert!(p.web_url.is_none());
        assert!(p.share_payload().is_none());
    }
}
