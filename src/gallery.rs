//! In-memory gallery state with a single update path.
//!
//! [`Gallery`] owns one list of records per collection. Fetches run as
//! independent tokio tasks and may finish in any order; each task sends
//! exactly one [`Completion`] back over a channel, and the owner applies it
//! with `&mut self` alongside shuffles and sorts. A completion is tagged
//! with the ticket of the request that produced it, so a response that
//! arrives after a newer request for the same collection is discarded
//! instead of overwriting fresher state.
//!
//! ```text
//!  request(Feathers) ──spawn──▶ client.fetch ──Completion──┐
//!  request(Spirits)  ──spawn──▶ client.fetch ──Completion──┤ mpsc
//!                                                          ▼
//!  shuffle / sort ───────────▶ Gallery (&mut self) ◀── next_completion()
//! ```
//!
//! Nothing is cached across galleries: two galleries fetching the same
//! collection perform two requests.

use rand::Rng;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::client::{CatalogClient, FetchError};
use crate::naming::parse_url_path;
use crate::ordering;
use crate::types::{Collection, PaintingRecord};

/// Where a collection is in its fetch lifecycle.
#[derive(Debug, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Last fetch failed; previously loaded records (if any) are kept.
    Failed(FetchError),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}

#[derive(Debug, Default)]
struct CollectionState {
    status: LoadStatus,
    records: Vec<PaintingRecord>,
    ticket: u64,
}

/// Result of one fetch, delivered back to the owning [`Gallery`].
#[derive(Debug)]
pub struct Completion {
    pub collection: Collection,
    pub ticket: u64,
    pub result: Result<Vec<PaintingRecord>, FetchError>,
}

/// What happened to a received completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied(Collection),
    /// Superseded by a newer request for the same collection.
    Discarded(Collection),
}

/// Ordering applied on demand by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortOrder {
    /// Catalog number (or id) ascending.
    Number,
    /// Newest year first, then name.
    Year,
}

/// Per-collection record lists fed by one shared client.
pub struct Gallery {
    client: Arc<CatalogClient>,
    states: BTreeMap<Collection, CollectionState>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    next_ticket: u64,
}

impl Gallery {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            states: BTreeMap::new(),
            tx,
            rx,
            next_ticket: 0,
        }
    }

    /// Start fetching `collection`. Must be called inside a tokio runtime.
    ///
    /// Returns the ticket identifying this request. Calling again before the
    /// first request completes supersedes it; this is also how a failed fetch
    /// is retried.
    pub fn request(&mut self, collection: Collection) -> u64 {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let state = self.states.entry(collection).or_default();
        state.ticket = ticket;
        state.status = LoadStatus::Loading;

        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = client.fetch(collection).await;
            // The receiver lives as long as the gallery; a send error only
            // means the gallery was dropped mid-fetch.
            let _ = tx.send(Completion {
                collection,
                ticket,
                result,
            });
        });
        tracing::debug!(%collection, ticket, "Fetch requested");
        ticket
    }

    /// Wait for the next fetch to finish and apply it.
    pub async fn next_completion(&mut self) -> Option<Delivery> {
        let completion = self.rx.recv().await?;
        Some(self.apply(completion))
    }

    /// Wait until `collection` is no longer loading.
    pub async fn settle(&mut self, collection: Collection) -> &LoadStatus {
        while self.status(collection).is_loading() {
            if self.next_completion().await.is_none() {
                break;
            }
        }
        self.status(collection)
    }

    /// Apply a completion, discarding it if a newer request exists.
    pub fn apply(&mut self, completion: Completion) -> Delivery {
        let Completion {
            collection,
            ticket,
            result,
        } = completion;
        let state = self.states.entry(collection).or_default();
        if state.ticket != ticket {
            tracing::debug!(
                %collection,
                ticket,
                current = state.ticket,
                "Discarding stale completion"
            );
            return Delivery::Discarded(collection);
        }
        match result {
            Ok(records) => {
                tracing::info!(%collection, count = records.len(), "Collection loaded");
                state.records = prepare(collection, records);
                state.status = LoadStatus::Ready;
            }
            Err(e) => {
                tracing::warn!(%collection, error = %e, "Collection failed to load");
                state.status = LoadStatus::Failed(e);
            }
        }
        Delivery::Applied(collection)
    }

    pub fn status(&self, collection: Collection) -> &LoadStatus {
        const IDLE: &LoadStatus = &LoadStatus::Idle;
        self.states
            .get(&collection)
            .map(|s| &s.status)
            .unwrap_or(IDLE)
    }

    pub fn records(&self, collection: Collection) -> &[PaintingRecord] {
        self.states
            .get(&collection)
            .map(|s| s.records.as_slice())
            .unwrap_or_default()
    }

    /// Take ownership of a collection's records, leaving it empty.
    pub fn take_records(&mut self, collection: Collection) -> Vec<PaintingRecord> {
        self.states
            .get_mut(&collection)
            .map(|s| std::mem::take(&mut s.records))
            .unwrap_or_default()
    }

    /// Look a record up by identifier, or by a website path such as
    /// `42-red-tailed-hawk` for numbered collections.
    pub fn find(&self, collection: Collection, key: &str) -> Option<&PaintingRecord> {
        find_record(self.records(collection), key)
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, collection: Collection, rng: &mut R) {
        if let Some(state) = self.states.get_mut(&collection) {
            let records = std::mem::take(&mut state.records);
            state.records = ordering::shuffle(records, rng);
        }
    }

    pub fn sort(&mut self, collection: Collection, order: SortOrder) {
        if let Some(state) = self.states.get_mut(&collection) {
            match order {
                SortOrder::Number => ordering::sort_by_identifier(&mut state.records),
                SortOrder::Year => ordering::sort_by_year_desc_then_name_asc(&mut state.records),
            }
        }
    }
}

/// Default presentation order for freshly fetched records.
fn prepare(collection: Collection, records: Vec<PaintingRecord>) -> Vec<PaintingRecord> {
    let mut records = match collection {
        Collection::Arrangements => ordering::active_arrangements(records),
        _ => records,
    };
    match collection {
        Collection::Spirits => ordering::sort_by_year_desc_then_name_asc(&mut records),
        _ => ordering::sort_by_identifier(&mut records),
    }
    records
}

/// Match `key` against identifiers first, then against catalog numbers.
pub fn find_record<'a>(records: &'a [PaintingRecord], key: &str) -> Option<&'a PaintingRecord> {
    let key = key.trim().trim_matches('/');
    records
        .iter()
        .find(|r| r.identifier() == key)
        .or_else(|| {
            let number = parse_url_path(key).number?;
            records.iter().find(|r| r.number() == Some(number))
        })
}
