use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use kakijun::{
    Assembly, CharacterRequest, Composite, DiagramSource, DirDiagramSource, EngineConfig,
    HttpDiagramSource, StrokeSchedule, assemble, constituent_keys, fetch_all, present,
    render_frame, resolve_keys,
};

#[derive(Parser, Debug)]
#[command(name = "kakijun", version, about = "Animated stroke-order diagrams")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the diagram lookup key of every character.
    Keys {
        /// Text to resolve.
        text: String,
    },
    /// Write the animated SVG.
    Svg(SvgArgs),
    /// Render one moment of the animation as a PNG.
    Frame(FrameArgs),
    /// Print the stroke schedule as JSON.
    Schedule(DiagramArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FamilyArg {
    Kana,
    Kanji,
}

#[derive(Parser, Debug)]
struct DiagramArgs {
    /// Character (or two-character compound) to draw.
    #[arg(long)]
    text: String,

    /// Script family of the text.
    #[arg(long, value_enum, default_value_t = FamilyArg::Kana)]
    family: FamilyArg,

    /// Expected stroke count, used when a kanji diagram is missing.
    #[arg(long)]
    strokes: Option<u32>,

    /// Engine configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read diagrams from a local directory instead of the network.
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    diagram: DiagramArgs,

    /// Output SVG path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    diagram: DiagramArgs,

    /// Seconds since the animation started.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Output side length in pixels.
    #[arg(long, default_value_t = 512)]
    size: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Keys { text } => {
            for key in resolve_keys(&text) {
                println!("{key}");
            }
            Ok(())
        }
        Command::Svg(args) => cmd_svg(args).await,
        Command::Frame(args) => cmd_frame(args).await,
        Command::Schedule(args) => cmd_schedule(args).await,
    }
}

async fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let (cfg, composite, schedule) = load(&args.diagram).await?;
    let handle = present(&composite, &schedule, &cfg.stroke, 0);
    match args.out {
        Some(out) => {
            create_parent(&out)?;
            std::fs::write(&out, handle.markup)
                .with_context(|| format!("write svg '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{}", handle.markup),
    }
    Ok(())
}

async fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.at.is_finite(),
        "--at must be a finite number of seconds, got {}",
        args.at
    );
    let (cfg, composite, schedule) = load(&args.diagram).await?;
    let img = render_frame(&composite, &schedule, &cfg.stroke, args.at, args.size)?;

    create_parent(&args.out)?;
    img.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

async fn cmd_schedule(args: DiagramArgs) -> anyhow::Result<()> {
    let (_, _, schedule) = load(&args).await?;
    println!("{}", serde_json::to_string_pretty(&schedule)?);
    Ok(())
}

async fn load(args: &DiagramArgs) -> anyhow::Result<(EngineConfig, Composite, StrokeSchedule)> {
    let cfg = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let request = match args.family {
        FamilyArg::Kana => CharacterRequest::kana(args.text.as_str()),
        FamilyArg::Kanji => CharacterRequest::kanji(args.text.as_str(), args.strokes),
    };
    let source: Arc<dyn DiagramSource> = match &args.dir {
        Some(dir) => Arc::new(DirDiagramSource::new(dir.clone())),
        None => Arc::new(HttpDiagramSource::new(cfg.base_url.clone())),
    };

    let keys = constituent_keys(&request.text);
    let outcomes = fetch_all(source.as_ref(), &keys).await;
    let composite = match assemble(&request, &keys, outcomes, &cfg) {
        Assembly::Ready(composite) => composite,
        Assembly::Empty => anyhow::bail!("nothing to draw"),
        Assembly::Unavailable { missing } => {
            let missing: Vec<String> = missing.iter().map(ToString::to_string).collect();
            anyhow::bail!("diagram unavailable for {}", missing.join(", "))
        }
    };
    let schedule = StrokeSchedule::build(&composite, &cfg.profile(request.family));
    Ok((cfg, composite, schedule))
}

fn create_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
