use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thumbforge::assets::OverlayAsset;
use thumbforge::batch::{BatchReport, sample_csv};
use thumbforge::theme::PRESETS;
use thumbforge::{
    AssetStore, BatchContext, BatchOpts, BatchProgress, ComposerOpts, Decorations, IconRowTail,
    LayoutComposer, PartialTheme, RenderPipeline, RenderRequest, RenderThreading,
    read_rows_from_path, render_thumbnail, run_batch, write_dir, write_zip_file,
};

#[derive(Parser, Debug)]
#[command(name = "thumbforge", version, about = "Render themed 1200x630 thumbnails")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single thumbnail PNG.
    Render(RenderArgs),
    /// Render every row of a CSV, XLSX or JSON file into a zip or a directory.
    Batch(BatchArgs),
    /// List the built-in presets.
    Presets(PresetsArgs),
    /// Write a sample batch CSV.
    SampleCsv(SampleCsvArgs),
}

#[derive(Args, Debug)]
struct AssetArgs {
    /// Asset directory (fonts/, icons/badge.svg, icons/brand.svg, optional overlay.png|svg).
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Corner overlay image (PNG or SVG); replaces one found in the asset directory.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Ignore any overlay in the asset directory.
    #[arg(long, conflicts_with = "overlay")]
    no_overlay: bool,

    /// Text after the divider in the icon row.
    #[arg(long, default_value = thumbforge::scene::DEFAULT_LABEL)]
    label: String,

    /// Show the brand icon instead of the label.
    #[arg(long, conflicts_with = "label")]
    brand_icon: bool,
}

#[derive(Args, Debug)]
struct ThemeArgs {
    /// Built-in preset (yellow, orange, blue, magenta).
    #[arg(long)]
    preset: Option<String>,
    /// solid | gradient
    #[arg(long)]
    background_mode: Option<String>,
    #[arg(long)]
    primary_color: Option<String>,
    #[arg(long)]
    secondary_color: Option<String>,
    /// e.g. "to bottom", "to right", "45deg"
    #[arg(long)]
    gradient_direction: Option<String>,
    #[arg(long)]
    title_color: Option<String>,
    #[arg(long)]
    badge_color: Option<String>,
    #[arg(long)]
    brand_color: Option<String>,
    #[arg(long)]
    border_color: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Thumbnail title.
    #[arg(long)]
    title: Option<String>,

    /// JSON request file; flags given on the command line take precedence.
    #[arg(long)]
    request: Option<PathBuf>,

    #[command(flatten)]
    theme: ThemeArgs,

    #[command(flatten)]
    assets: AssetArgs,

    /// Output PNG path (default: thumbnail-<slug>.png).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Input rows (.csv, .xlsx or .json).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output zip path.
    #[arg(long, required_unless_present = "out_dir", conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Output directory for individual `{id}.png` files.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write a JSON report of every row outcome.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Render rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Rows per scheduling chunk.
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,

    #[command(flatten)]
    assets: AssetArgs,
}

#[derive(Args, Debug)]
struct PresetsArgs {
    /// Print presets as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct SampleCsvArgs {
    /// Output path (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Presets(args) => cmd_presets(args),
        Command::SampleCsv(args) => cmd_sample_csv(args),
    }
}

fn load_assets(args: &AssetArgs) -> anyhow::Result<Arc<AssetStore>> {
    let mut store = AssetStore::load_dir(&args.assets)
        .with_context(|| format!("load assets from '{}'", args.assets.display()))?;
    if args.no_overlay {
        store = store.without_overlay();
    }
    if let Some(path) = &args.overlay {
        let bytes =
            std::fs::read(path).with_context(|| format!("read overlay '{}'", path.display()))?;
        store = store.with_overlay(
            OverlayAsset::from_bytes(bytes)
                .with_context(|| format!("load overlay '{}'", path.display()))?,
        );
    }
    Ok(Arc::new(store))
}

fn composer(args: &AssetArgs) -> LayoutComposer {
    LayoutComposer::new(ComposerOpts {
        icon_row: if args.brand_icon {
            IconRowTail::BrandIcon
        } else {
            IconRowTail::Label(args.label.clone())
        },
    })
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn merge_request(args: &RenderArgs) -> anyhow::Result<RenderRequest> {
    let mut req = match &args.request {
        Some(path) => RenderRequest::from_path(path)
            .with_context(|| format!("read request '{}'", path.display()))?,
        None => RenderRequest::default(),
    };

    fn set(slot: &mut Option<String>, flag: &Option<String>) {
        if flag.is_some() {
            slot.clone_from(flag);
        }
    }

    let t = &args.theme;
    set(&mut req.title, &args.title);
    set(&mut req.preset, &t.preset);
    let PartialTheme {
        background_mode,
        primary_color,
        secondary_color,
        gradient_direction,
        title_color,
        badge_color,
        brand_color,
        border_color,
    } = &mut req.theme;
    set(background_mode, &t.background_mode);
    set(primary_color, &t.primary_color);
    set(secondary_color, &t.secondary_color);
    set(gradient_direction, &t.gradient_direction);
    set(title_color, &t.title_color);
    set(badge_color, &t.badge_color);
    set(brand_color, &t.brand_color);
    set(border_color, &t.border_color);
    Ok(req)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let req = merge_request(&args)?;
    let theme = req.resolve_theme().context("resolve theme")?;
    let store = load_assets(&args.assets)?;

    let mut pipeline = RenderPipeline::new(Arc::clone(&store))?;
    let png = render_thumbnail(
        req.title(),
        &theme,
        &composer(&args.assets),
        &Decorations::from_store(&store),
        &mut pipeline,
    )
    .context("render thumbnail")?;

    let out = args.out.unwrap_or_else(|| PathBuf::from(req.file_name()));
    ensure_parent(&out)?;
    std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let rows = read_rows_from_path(&args.in_path)
        .with_context(|| format!("read rows '{}'", args.in_path.display()))?;
    let store = load_assets(&args.assets)?;
    let composer = composer(&args.assets);
    let mut pipeline = RenderPipeline::new(Arc::clone(&store))?;

    let ctx = BatchContext {
        composer: &composer,
        decorations: Decorations::from_store(&store),
    };
    let progress = |p: BatchProgress| {
        tracing::debug!(processed = p.processed, total = p.total, "batch progress");
    };
    let opts = BatchOpts {
        threading: RenderThreading {
            parallel: args.parallel,
            chunk_size: args.chunk_size,
            threads: args.threads,
        },
        cancel: None,
        progress: Some(&progress),
    };
    let result = run_batch(&rows, &mut pipeline, &ctx, &opts);

    if let Some(out) = &args.out {
        ensure_parent(out)?;
        write_zip_file(&result, out).with_context(|| format!("write zip '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }
    if let Some(dir) = &args.out_dir {
        let written =
            write_dir(&result, dir).with_context(|| format!("write dir '{}'", dir.display()))?;
        eprintln!("wrote {} files to {}", written.len(), dir.display());
    }

    let report = BatchReport::from_result(&result);
    if let Some(path) = &args.report {
        ensure_parent(path)?;
        report
            .write_json(path)
            .with_context(|| format!("write report '{}'", path.display()))?;
    }
    for row in report.rows.iter().filter(|r| r.reason.is_some()) {
        eprintln!(
            "row {} ({}): {:?}: {}",
            row.index + 1,
            row.id,
            row.status,
            row.reason.as_deref().unwrap_or_default()
        );
    }
    eprintln!(
        "{} rendered, {} skipped, {} failed of {}",
        report.rendered, report.skipped, report.failed, report.total
    );
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    if args.json {
        let map: serde_json::Map<String, serde_json::Value> = PRESETS
            .iter()
            .map(|p| Ok((p.name.to_string(), serde_json::to_value(p.theme)?)))
            .collect::<Result<_, serde_json::Error>>()
            .context("serialize presets")?;
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    for p in &PRESETS {
        let t = &p.theme;
        println!(
            "{:<8} background {} {} -> {} ({}), title {}, badge {}, brand {}, border {}",
            p.name,
            t.background_mode(),
            t.primary_color(),
            t.secondary_color(),
            t.gradient_direction(),
            t.title_color(),
            t.badge_color(),
            t.brand_color(),
            t.border_color(),
        );
    }
    Ok(())
}

fn cmd_sample_csv(args: SampleCsvArgs) -> anyhow::Result<()> {
    let csv = sample_csv()?;
    match args.out {
        Some(path) => {
            ensure_parent(&path)?;
            std::fs::write(&path, csv)
                .with_context(|| format!("write sample csv '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}
