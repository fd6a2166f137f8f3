use std::path::PathBuf;

use clap::{Parser, Subcommand};

use layerforge::collection::model::{load_collection, save_collection};
use layerforge::metadata::writer::{ImageLocation, write_collection_metadata};
use layerforge::{
    AttributeSelector, CollectionConfig, Compositor, RenderThreading, scan_layer_directory,
};

#[derive(Parser, Debug)]
#[command(name = "layerforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw attribute sets and write the collection file.
    Generate(GenerateArgs),
    /// Flatten collectibles from a collection file into PNG images.
    Render(RenderArgs),
    /// Write one metadata document per collectible.
    Metadata(MetadataArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Collection configuration JSON.
    #[arg(long, short = 'c', default_value = "config.json")]
    config: PathBuf,

    /// Layer root directory (`<type>/<bucket>/<file>`).
    #[arg(long, short = 'l', default_value = "layers")]
    layers: PathBuf,

    /// Number of collectibles to draw.
    #[arg(long, short = 'n', default_value_t = 10)]
    limit: u32,

    /// Seed for deterministic generation.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Draw collectibles in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Output collection file.
    #[arg(long, short = 'o', default_value = "build/collectibles.json")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Collection configuration JSON.
    #[arg(long, short = 'c', default_value = "config.json")]
    config: PathBuf,

    /// Layer root directory.
    #[arg(long, short = 'l', default_value = "layers")]
    layers: PathBuf,

    /// Generated collection file.
    #[arg(long, short = 's', default_value = "build/collectibles.json")]
    source: PathBuf,

    /// Render only the collectible with this id.
    #[arg(long)]
    id: Option<u32>,

    /// Report per-collectible failures and keep rendering.
    #[arg(long, default_value_t = false)]
    keep_going: bool,

    /// Render collectibles in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Output directory for `<id>.png` files.
    #[arg(long, short = 'o', default_value = "build/images")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct MetadataArgs {
    /// Collection configuration JSON.
    #[arg(long, short = 'c', default_value = "config.json")]
    config: PathBuf,

    /// Generated collection file.
    #[arg(long, short = 's', default_value = "build/collectibles.json")]
    source: PathBuf,

    /// URL prefix the revealed image links point at.
    #[arg(long, required_unless_present = "unrevealed_image")]
    image_url_prefix: Option<String>,

    /// Shared placeholder image URL; writes pre-reveal documents without
    /// attributes.
    #[arg(long, conflicts_with = "image_url_prefix")]
    unrevealed_image: Option<String>,

    /// Output directory for per-id documents.
    #[arg(long, short = 'o', default_value = "build/metadata")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Render(args) => cmd_render(args),
        Command::Metadata(args) => cmd_metadata(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = CollectionConfig::from_path(&args.config)?;
    let catalog = scan_layer_directory(&args.layers)?;
    config.validate_against(&catalog)?;

    let selector = AttributeSelector::new(&config, &catalog)?;
    let collectibles = selector.generate(args.limit, args.seed, args.parallel)?;
    save_collection(&collectibles, &args.out)?;

    eprintln!(
        "wrote {} ({} collectibles)",
        args.out.display(),
        collectibles.len()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = CollectionConfig::from_path(&args.config)?;
    let catalog = scan_layer_directory(&args.layers)?;

    let mut collectibles = load_collection(&args.source)?;
    if let Some(id) = args.id {
        collectibles.retain(|c| c.id == id);
        if collectibles.is_empty() {
            anyhow::bail!("no collectible with id {id} in {}", args.source.display());
        }
    }

    let compositor = Compositor::new(&catalog, &args.layers, config.canvas);
    if args.keep_going {
        let mut failed = 0usize;
        for collectible in &collectibles {
            match compositor.render_to_dir(collectible, &args.out_dir) {
                Ok(path) => eprintln!("wrote {}", path.display()),
                Err(e) => {
                    failed += 1;
                    eprintln!("collectible {} failed: {e}", collectible.id);
                }
            }
        }
        if failed > 0 {
            anyhow::bail!("{failed} of {} collectibles failed", collectibles.len());
        }
        return Ok(());
    }

    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let paths = compositor.render_all(&collectibles, &args.out_dir, &threading)?;
    eprintln!("wrote {} images to {}", paths.len(), args.out_dir.display());
    Ok(())
}

fn cmd_metadata(args: MetadataArgs) -> anyhow::Result<()> {
    let config = CollectionConfig::from_path(&args.config)?;
    let collectibles = load_collection(&args.source)?;

    let location = match (&args.unrevealed_image, &args.image_url_prefix) {
        (Some(url), _) => ImageLocation::Unrevealed { url: url.as_str() },
        (None, Some(prefix)) => ImageLocation::Revealed {
            url_prefix: prefix.as_str(),
        },
        // clap enforces one of the two.
        (None, None) => anyhow::bail!("--image-url-prefix or --unrevealed-image is required"),
    };

    let written =
        write_collection_metadata(&config.metadata, &collectibles, location, &args.out_dir)?;
    eprintln!(
        "wrote {} metadata documents to {}",
        written.len(),
        args.out_dir.display()
    );
    Ok(())
}
