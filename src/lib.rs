//! # Painting Gallery
//!
//! A typed client and headless gallery for an artist's painting catalogs:
//! *500 Feathers*, feather *Arrangements* and *Mountain Spirits*. Records are
//! fetched from a JSON content API; images live on a CDN and each painting has
//! a page on the public website.
//!
//! # Architecture
//!
//! ```text
//!  content API ──▶ client ──▶ gallery ──▶ painting ──▶ output / render
//!   (JSON)        (decode)    (state)     (display)     (CLI / HTML)
//!                                            ▲
//!                              assets ───────┘  (CDN + website URLs)
//! ```
//!
//! The client turns an HTTP response into typed records or a [`client::FetchError`].
//! The [`gallery::Gallery`] store owns per-collection state and is the only
//! place that mutates it. [`painting::Painting`] flattens any record into the
//! same display fields, so the CLI and HTML renderers never branch on
//! collection.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Wire records (`Feather`, `Arrangement`, `Spirit`) and the `PaintingRecord` sum type |
//! | [`client`] | Async envelope-decoding fetch client and its error taxonomy |
//! | [`gallery`] | Per-collection load state with ticketed, out-of-order completions |
//! | [`ordering`] | Shuffle, sorts, active-arrangement filter, related-feather lookup |
//! | [`painting`] | Display snapshot: title, dimensions, price, description, share caption |
//! | [`assets`] | CDN image and website URL derivation |
//! | [`aspect`] | Grid aspect-ratio normalizer (`4×1` → `"2:1"`) |
//! | [`naming`] | Slugs, zero-padded numbers, `NNN-name` website paths |
//! | [`color`] | `rgb(r,g,b)` palette parsing |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`render`] | Static HTML snapshot of collections using Maud |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Absent Beats Broken
//!
//! URL derivation never fails a view. A record whose stored fragment does not
//! produce a valid URL gets `None` for that image or link; renderers show a
//! placeholder or a disabled link. Only the fetch itself is fallible.
//!
//! ## One Writer
//!
//! Fetches for different collections run concurrently and may finish in any
//! order, but they never touch shared state directly. Each sends one
//! completion back to the [`gallery::Gallery`] owner, which applies it together
//! with shuffles and sorts through `&mut self`. Tickets let the owner drop a
//! response that a newer request has superseded.
//!
//! ## Config Over Constants
//!
//! API, CDN and website roots, share attribution and fallback prices all come
//! from [`config::GalleryConfig`], whose defaults point at production. A
//! `config.toml` only needs the keys it changes.

pub mod aspect;
pub mod assets;
pub mod client;
pub mod color;
pub mod config;
pub mod gallery;
pub mod naming;
pub mod ordering;
pub mod output;
pub mod painting;
pub mod render;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
