use std::path::{Path, PathBuf};

use anyhow::Context as _;
use bubblekit::capture::CaptureOpts;
use bubblekit::geometry::svg::to_svg;
use bubblekit::render::RecordingSurface;
use bubblekit::session::Download;
use bubblekit::{
    BackgroundImage, BubblePatch, BubbleStyle, PixelBubbleSettings, SpikeDirection, Studio,
    StudioOpts, compute_geometry,
};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bubblekit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the pixel bubble as a PNG.
    Pixel(PixelArgs),
    /// Export the blinking pixel bubble as an animated GIF.
    Gif(GifArgs),
    /// Render vector bubbles over an optional background as a PNG.
    Overlay(OverlayArgs),
    /// Print the geometry of one vector bubble as JSON or SVG.
    Geometry(GeometryArgs),
}

#[derive(Parser, Debug)]
struct PixelBubbleArgs {
    /// Bubble text; `\n` starts a new line.
    #[arg(long, default_value = "Pixel Art!")]
    text: String,

    /// Spike direction (`left` or `right`).
    #[arg(long, default_value_t = SpikeDirection::Left)]
    spike: SpikeDirection,

    /// Draw thought circles instead of a spike.
    #[arg(long)]
    thought: bool,
}

impl PixelBubbleArgs {
    fn settings(&self) -> PixelBubbleSettings {
        PixelBubbleSettings {
            text: self.text.replace("\\n", "\n"),
            spike: self.spike,
            thought: self.thought,
        }
    }
}

#[derive(Parser, Debug)]
struct PixelArgs {
    #[command(flatten)]
    bubble: PixelBubbleArgs,

    /// Print the draw program as JSON instead of writing a PNG.
    #[arg(long)]
    ops: bool,

    /// Output PNG path (defaults to `pixel-bubble.png`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GifArgs {
    #[command(flatten)]
    bubble: PixelBubbleArgs,

    /// Number of visible/blank cycles.
    #[arg(long, default_value_t = 3)]
    cycles: u32,

    /// Delay per frame in milliseconds.
    #[arg(long, default_value_t = 300)]
    delay_ms: u32,

    /// Output GIF path (defaults to `pixel-bubble.gif`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Scene JSON: `{"bubbles": [{"style": "cloud-tail-down", "x": 40, ...}]}`.
    #[arg(long)]
    scene: PathBuf,

    /// Background image (JPEG, PNG or WebP).
    #[arg(long)]
    background: Option<PathBuf>,

    /// Output width; requires `--height`.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height; requires `--width`.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Output PNG path (defaults to `bubble-overlay.png`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GeometryArgs {
    /// Style tag, e.g. `sticker-cloud-tail-left-dashed`.
    #[arg(long, default_value = "rect-tail-down")]
    style: String,

    #[arg(long, default_value_t = 150.0)]
    width: f64,

    #[arg(long, default_value_t = 80.0)]
    height: f64,

    /// Emit a standalone SVG with this text instead of JSON.
    #[arg(long)]
    svg: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SceneFile {
    #[serde(default)]
    bubbles: Vec<SceneBubble>,
}

#[derive(Deserialize, Debug)]
struct SceneBubble {
    style: String,
    text: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bubblekit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Pixel(args) => cmd_pixel(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Overlay(args) => cmd_overlay(args),
        Command::Geometry(args) => cmd_geometry(args),
    }
}

fn cmd_pixel(args: PixelArgs) -> anyhow::Result<()> {
    if args.ops {
        let spec = args.bubble.settings().spec();
        let mut surface = RecordingSurface::new();
        bubblekit::pixel::render(&spec, &mut surface)?;
        println!(
            "{}",
            serde_json::to_string_pretty(surface.ops()).with_context(|| "serialize draw ops")?
        );
        return Ok(());
    }

    let mut studio = Studio::new(StudioOpts {
        pixel: args.bubble.settings(),
        ..StudioOpts::default()
    });
    let dl = studio.export_still()?;
    write_download(&dl, args.out.as_deref())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let mut studio = Studio::new(StudioOpts {
        pixel: args.bubble.settings(),
        capture: CaptureOpts {
            cycles: args.cycles,
            delay_ms: args.delay_ms,
            ..CaptureOpts::default()
        },
        ..StudioOpts::default()
    });
    let dl = studio.export_gif()?;
    write_download(&dl, args.out.as_deref())
}

fn cmd_overlay(args: OverlayArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.scene)
        .with_context(|| format!("read scene '{}'", args.scene.display()))?;
    let scene: SceneFile = serde_json::from_str(&raw).with_context(|| "parse scene JSON")?;

    let mut studio = Studio::new(StudioOpts {
        overlay_size: args.width.zip(args.height),
        ..StudioOpts::default()
    });
    if let Some(path) = &args.background {
        let bg = BackgroundImage::from_path(path)
            .with_context(|| format!("load background '{}'", path.display()))?;
        studio.set_background(bg);
    }

    for b in scene.bubbles {
        let id = studio.add_bubble(&b.style);
        let Some(current) = studio.store().get(&id).cloned() else {
            continue;
        };
        let mut patch = BubblePatch::new(id)
            .position(b.x.unwrap_or(current.x), b.y.unwrap_or(current.y))
            .size(
                b.width.unwrap_or(current.width),
                b.height.unwrap_or(current.height),
            );
        if let Some(text) = b.text {
            patch = patch.text(text);
        }
        studio.update_bubble(&patch);
    }

    let dl = studio.export_overlay()?;
    write_download(&dl, args.out.as_deref())
}

fn cmd_geometry(args: GeometryArgs) -> anyhow::Result<()> {
    let style = BubbleStyle::parse(&args.style);
    let g = compute_geometry(args.width, args.height, &style);
    match args.svg {
        Some(text) => println!("{}", to_svg(&g, &text)),
        None => println!(
            "{}",
            serde_json::to_string_pretty(&g).with_context(|| "serialize geometry")?
        ),
    }
    Ok(())
}

fn write_download(dl: &Download, out: Option<&Path>) -> anyhow::Result<()> {
    let out = out.unwrap_or_else(|| Path::new(dl.filename));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(out, &dl.bytes)
        .with_context(|| format!("write {} '{}'", dl.mime, out.display()))?;
    tracing::info!(path = %out.display(), bytes = dl.bytes.len(), "wrote export");
    Ok(())
}
