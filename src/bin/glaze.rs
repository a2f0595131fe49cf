use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use glaze::{
    Canvas, Catalog, ColorSite, DEFAULT_EXPORT_NAME, DEFAULT_FONT_FAMILY, EMPTY_GRID_MESSAGE,
    EffectParams, Event, ParleyRasterizer, RenderMode, Rgba8Premul, Session, SheetLayout,
    build_grid, load_image_file, resolve_hex, write_png,
};

/// Fonts tried when no `--font-file` is given.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Parser, Debug)]
#[command(name = "glaze", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one glossy preview PNG.
    Apply(ApplyArgs),
    /// Render catalog tiles and/or a contact sheet.
    Thumbs(ThumbsArgs),
    /// List catalog styles with the colors their catalog tiles use.
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Style catalog JSON.
    #[arg(long, conflicts_with = "default_catalog")]
    catalog: Option<PathBuf>,

    /// Use the default catalog file from the working directory.
    #[arg(long)]
    default_catalog: bool,

    /// Style to apply, by label or zero-based index.
    #[arg(long)]
    style: Option<String>,

    /// Apply this color directly instead of a catalog style.
    #[arg(long, conflicts_with_all = ["catalog", "default_catalog", "style"])]
    color: Option<String>,

    /// Text to render; empty uses the sample text.
    #[arg(long, default_value = "")]
    text: String,

    /// Font file to register (repeatable).
    #[arg(long = "font-file")]
    font_files: Vec<PathBuf>,

    /// Font family; defaults to the first registered font.
    #[arg(long)]
    font: Option<String>,

    /// Font size in px; unusable values fall back to 140.
    #[arg(long, default_value = "140")]
    font_size: String,

    /// Render the alpha of this image instead of text.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Effect params JSON.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output width.
    #[arg(long, default_value_t = Canvas::PREVIEW.width)]
    width: u32,

    /// Output height.
    #[arg(long, default_value_t = Canvas::PREVIEW.height)]
    height: u32,

    /// Output PNG path.
    #[arg(long, default_value = DEFAULT_EXPORT_NAME)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct ThumbsArgs {
    /// Style catalog JSON.
    #[arg(long)]
    catalog: PathBuf,

    /// Directory for one PNG per style.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Contact sheet PNG path.
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Tiles per contact sheet row.
    #[arg(long, default_value_t = 4)]
    columns: u32,

    /// Effect params JSON.
    #[arg(long)]
    params: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Style catalog JSON.
    #[arg(long)]
    catalog: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Thumbs(args) => cmd_thumbs(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(path: Option<&Path>) -> anyhow::Result<EffectParams> {
    match path {
        Some(p) => EffectParams::from_path(p)
            .with_context(|| format!("load effect params '{}'", p.display())),
        None => Ok(EffectParams::default()),
    }
}

fn build_rasterizer(font_files: &[PathBuf]) -> anyhow::Result<ParleyRasterizer> {
    let mut raster = ParleyRasterizer::new();
    for path in font_files {
        raster
            .register_font_file(path)
            .with_context(|| format!("register font '{}'", path.display()))?;
    }
    if font_files.is_empty() {
        for candidate in SYSTEM_FONTS.iter().map(Path::new).filter(|p| p.exists()) {
            match raster.register_font_file(candidate) {
                Ok(_) => break,
                Err(err) => {
                    tracing::debug!(path = %candidate.display(), %err, "skipping system font")
                }
            }
        }
    }
    Ok(raster)
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let params = load_params(args.params.as_deref())?;
    let canvas = Canvas::new(args.width, args.height).context("output size")?;
    let raster = build_rasterizer(&args.font_files)?;
    let family = args
        .font
        .clone()
        .or_else(|| raster.families().next().map(str::to_owned))
        .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_owned());
    let mut session = Session::new(canvas, raster, params)?;

    // state is assembled first and drawn once
    if let Some(path) = &args.catalog {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        session.update(Event::LoadCatalogJson(json));
    } else if args.default_catalog {
        let cwd = std::env::current_dir().context("resolve working directory")?;
        let event = match Catalog::fetch_default(&cwd) {
            Ok(catalog) => Event::DefaultCatalogLoaded(catalog),
            Err(err) => Event::CatalogUnavailable {
                reason: err.to_string(),
            },
        };
        session.update(event);
    } else if let Some(hex) = &args.color {
        let json = serde_json::json!({
            "styles": [{ "name": "custom", "avg_color": { "hex": hex } }]
        });
        session.update(Event::LoadCatalogJson(json.to_string()));
    }
    report(&session);

    let key = match (&args.style, &args.color) {
        (Some(key), _) => Some(key.as_str()),
        (None, Some(_)) => Some("0"),
        (None, None) => None,
    };
    if let Some(key) = key {
        let index = session
            .state()
            .catalog
            .as_ref()
            .and_then(|c| c.find(key))
            .map(|(i, _)| i)
            .with_context(|| format!("style '{key}' not found in catalog"))?;
        session.update(Event::SelectStyle(index));
    }

    if let Some(path) = &args.image {
        let img = load_image_file(path)
            .with_context(|| format!("load image '{}'", path.display()))?;
        session.update(Event::LoadImage(Arc::new(img)));
        session.update(Event::SetMode(RenderMode::Image));
    }

    session.update(Event::ApplyText {
        text: args.text.clone(),
        font_family: family,
        font_size: args.font_size.clone(),
    });
    session.redraw().context("render preview")?;
    report(&session);

    write_png(session.output(), &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn report<G: glaze::GlyphRasterizer>(session: &Session<G>) {
    let status = &session.state().status;
    if !status.is_empty() {
        eprintln!("{status}");
    }
}

fn cmd_thumbs(args: ThumbsArgs) -> anyhow::Result<()> {
    let params = load_params(args.params.as_deref())?;
    let catalog = Catalog::from_path(&args.catalog)
        .with_context(|| format!("load catalog '{}'", args.catalog.display()))?;
    let grid = build_grid(&catalog, ColorSite::GridThumbnail);
    if grid.is_empty() {
        println!("{EMPTY_GRID_MESSAGE}");
        return Ok(());
    }

    let out_dir = match (&args.out, &args.sheet) {
        (None, None) => Some(PathBuf::from("thumbs")),
        (out, _) => out.clone(),
    };
    if let Some(dir) = &out_dir {
        let tiles = grid.render_tiles(Canvas::THUMBNAIL, &params.thumbnail)?;
        for (tile, surface) in grid.tiles().iter().zip(&tiles) {
            let path = dir.join(format!("{:03}-{}.png", tile.index, file_stem(&tile.label)));
            write_png(surface, &path).with_context(|| format!("write tile '{}'", path.display()))?;
        }
        eprintln!("wrote {} tiles to {}", tiles.len(), dir.display());
    }

    if let Some(path) = &args.sheet {
        let layout = SheetLayout {
            columns: args.columns,
            ..SheetLayout::default()
        };
        if let Some(sheet) =
            grid.contact_sheet(layout, Rgba8Premul::transparent(), &params.thumbnail)?
        {
            write_png(&sheet, path).with_context(|| format!("write sheet '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn file_stem(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() { "style".to_owned() } else { stem }
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let catalog = Catalog::from_path(&args.catalog)
        .with_context(|| format!("load catalog '{}'", args.catalog.display()))?;
    if catalog.is_empty() {
        println!("{EMPTY_GRID_MESSAGE}");
        return Ok(());
    }
    for (i, style) in catalog.styles.iter().enumerate() {
        println!(
            "{i}\t{}\t{}",
            style.label(),
            resolve_hex(style, ColorSite::CatalogThumbnail)
        );
    }
    Ok(())
}
