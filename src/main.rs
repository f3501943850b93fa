use clap::{Parser, Subcommand, ValueEnum};
use painting_gallery::assets::AssetResolver;
use painting_gallery::client::{CatalogClient, FetchError};
use painting_gallery::config::{self, GalleryConfig};
use painting_gallery::gallery::{self, Gallery, LoadStatus, SortOrder};
use painting_gallery::ordering::{self, Relation};
use painting_gallery::painting::Painting;
use painting_gallery::types::{Collection, PaintingRecord};
use painting_gallery::{aspect, output, render};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "painting-gallery")]
#[command(about = "Browse the feather, arrangement and mountain-spirit painting catalogs")]
#[command(long_about = "\
Browse the feather, arrangement and mountain-spirit painting catalogs

Paintings are fetched live from the content API; images and website links are
derived from the configured CDN and website roots.

Collections:
  feathers       500 Feathers, keyed by catalog number
  arrangements   Feather arrangements on a grid (active ones only)
  spirits        Mountain Spirits, keyed by id

Paintings can be addressed by identifier or by website path, e.g.
'show feathers 42' or 'show feathers 42-red-tailed-hawk'.

Run 'painting-gallery gen-config' to generate a documented config.toml.
Set RUST_LOG=debug to trace requests on stderr.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// A single collection or all of them.
#[derive(Clone, Copy, ValueEnum)]
enum Target {
    Feathers,
    Arrangements,
    Spirits,
    All,
}

impl Target {
    fn collections(self) -> Vec<Collection> {
        match self {
            Target::Feathers => vec![Collection::Feathers],
            Target::Arrangements => vec![Collection::Arrangements],
            Target::Spirits => vec![Collection::Spirits],
            Target::All => Collection::ALL.to_vec(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Order {
    /// Catalog number (spirits: id)
    Number,
    /// Newest first, then by name
    Year,
    /// Random permutation
    Shuffle,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch and list paintings
    Fetch {
        #[arg(value_enum)]
        target: Target,
        #[arg(long, value_enum, default_value_t = Order::Number)]
        order: Order,
        /// Seed for --order shuffle
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show one painting; a random one when no id is given
    Show {
        #[arg(value_enum)]
        collection: Collection,
        /// Identifier or website path
        id: Option<String>,
        /// Follow a feather's relation list to the first related feather
        #[arg(long, value_enum)]
        related: Option<Relation>,
        /// Seed for picking a random painting
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the share caption and link for a painting
    Share {
        #[arg(value_enum)]
        collection: Collection,
        /// Identifier or website path
        id: String,
    },
    /// Render collections as static HTML pages
    Render {
        #[arg(value_enum)]
        target: Target,
        /// Output directory
        #[arg(long, default_value = "gallery")]
        output: PathBuf,
    },
    /// Print the normalized aspect ratio of a cols × rows grid
    Aspect { cols: u32, rows: u32 },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Client(#[from] FetchError),
    #[error("{0} could not be loaded")]
    Load(Collection),
    #[error("no {collection} painting matches `{key}`")]
    NotFound { collection: Collection, key: String },
    #[error("{0} is empty")]
    Empty(Collection),
    #[error("--related only applies to feathers")]
    RelatedNeedsFeathers,
    #[error("feather #{0} has no related feather in the catalog")]
    NoRelated(u32),
    #[error("{0} has no website page to share")]
    NotShareable(String),
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Fetch {
            target,
            order,
            seed,
        } => {
            let config = config::load_config(&cli.config)?;
            let collections = target.collections();
            let mut gallery = load(&config, &collections).await?;
            let assets = AssetResolver::new(&config);
            let mut rng = rng_from(seed);
            for (i, collection) in collections.iter().copied().enumerate() {
                match order {
                    Order::Number => gallery.sort(collection, SortOrder::Number),
                    Order::Year => gallery.sort(collection, SortOrder::Year),
                    Order::Shuffle => gallery.shuffle(collection, &mut rng),
                }
                if i > 0 {
                    println!();
                }
                let paintings = paintings(gallery.records(collection), &config, &assets);
                output::print_collection(collection, &paintings);
            }
        }
        Command::Show {
            collection,
            id,
            related,
            seed,
        } => {
            let config = config::load_config(&cli.config)?;
            let gallery = load(&config, &[collection]).await?;
            let records = gallery.records(collection);
            let mut record = match id {
                Some(key) => gallery::find_record(records, &key)
                    .ok_or(CliError::NotFound { collection, key })?,
                None => ordering::random_index(records.len(), &mut rng_from(seed))
                    .map(|i| &records[i])
                    .ok_or(CliError::Empty(collection))?,
            };
            if let Some(relation) = related {
                record = follow_relation(records, record, relation)?;
            }
            let painting = Painting::from_record(record, &config, &AssetResolver::new(&config));
            output::print_detail(&painting);
        }
        Command::Share { collection, id } => {
            let config = config::load_config(&cli.config)?;
            let gallery = load(&config, &[collection]).await?;
            let record = gallery
                .find(collection, &id)
                .ok_or(CliError::NotFound { collection, key: id })?;
            let painting = Painting::from_record(record, &config, &AssetResolver::new(&config));
            let share = painting
                .share_payload()
                .ok_or_else(|| CliError::NotShareable(painting.display_title.clone()))?;
            output::print_share(&share);
        }
        Command::Render {
            target,
            output: output_dir,
        } => {
            let config = config::load_config(&cli.config)?;
            let collections = target.collections();
            let mut gallery = load(&config, &collections).await?;
            let loaded: Vec<(Collection, Vec<PaintingRecord>)> = collections
                .iter()
                .map(|&c| (c, gallery.take_records(c)))
                .collect();
            let pages = render::render_site(&loaded, &config, &output_dir)?;
            output::print_render_output(&pages, &output_dir);
        }
        Command::Aspect { cols, rows } => {
            println!("{}", aspect::aspect_ratio(cols, rows)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Fetch `collections` concurrently and wait for all of them.
///
/// Every failure is reported with a retry hint before returning the first.
async fn load(config: &GalleryConfig, collections: &[Collection]) -> Result<Gallery, CliError> {
    let client = CatalogClient::new(&config.api)?;
    let mut gallery = Gallery::new(Arc::new(client));
    for &collection in collections {
        gallery.request(collection);
    }

    let mut failed = None;
    for &collection in collections {
        if let LoadStatus::Failed(error) = gallery.settle(collection).await {
            output::print_fetch_error(collection, error);
            failed.get_or_insert(collection);
        }
    }
    match failed {
        Some(collection) => Err(CliError::Load(collection)),
        None => Ok(gallery),
    }
}

fn paintings(records: &[PaintingRecord], config: &GalleryConfig, assets: &AssetResolver) -> Vec<Painting> {
    records
        .iter()
        .map(|r| Painting::from_record(r, config, assets))
        .collect()
}

fn follow_relation<'a>(
    records: &'a [PaintingRecord],
    from: &PaintingRecord,
    relation: Relation,
) -> Result<&'a PaintingRecord, CliError> {
    let PaintingRecord::Feather(from) = from else {
        return Err(CliError::RelatedNeedsFeathers);
    };
    let feathers: Vec<_> = records
        .iter()
        .filter_map(|r| match r {
            PaintingRecord::Feather(f) => Some(f.clone()),
            _ => None,
        })
        .collect();
    ordering::related_index(&feathers, from, relation)
        .map(|i| &records[i])
        .ok_or(CliError::NoRelated(from.number))
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
