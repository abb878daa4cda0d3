use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lollipop", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole frame sequence as numbered PNGs.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

/// Settings shared by both subcommands. Flags override values from `--config`.
#[derive(Args, Debug)]
struct Overrides {
    /// Config JSON. Missing fields take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Word to render.
    #[arg(long)]
    word: Option<String>,

    /// Number of frames in the sequence.
    #[arg(long)]
    frames: Option<u64>,

    /// Palette generator seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Font file (TTF/OTF).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Reference palette image; only its first row is read.
    #[arg(long)]
    palette: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    overrides: Overrides,

    /// Output directory for `0001.png`, `0002.png`, ...
    #[arg(long)]
    out: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    overrides: Overrides,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn load_config(o: &Overrides) -> anyhow::Result<lollipop::LollipopConfig> {
    let mut cfg = match &o.config {
        Some(path) => lollipop::LollipopConfig::from_path(path)?,
        None => lollipop::LollipopConfig::default(),
    };
    if let Some(word) = &o.word {
        cfg.word = word.clone();
    }
    if let Some(frames) = o.frames {
        cfg.frames = frames;
    }
    if let Some(seed) = o.seed {
        cfg.seed = seed;
    }
    if let Some(font) = &o.font {
        cfg.font_path = font.clone();
    }
    if let Some(palette) = &o.palette {
        cfg.palette_path = palette.clone();
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.overrides)?;
    if let Some(out) = args.out {
        cfg.out_dir = out;
    }
    cfg.parallel |= args.parallel;

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .with_context(|| format!("configure {threads} rayon threads"))?;
    }

    let out_dir = cfg.out_dir.clone();
    let sess = lollipop::RenderSession::new(cfg)?;
    let mut sink = lollipop::PngSequenceSink::new(&out_dir);
    let stats = sess.render_all(&mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        out_dir.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.overrides)?;
    if args.frame >= cfg.frames {
        anyhow::bail!(
            "frame {} is outside the {}-frame sequence",
            args.frame,
            cfg.frames
        );
    }

    let sess = lollipop::RenderSession::new(cfg)?;
    let frame = sess.render_frame(lollipop::FrameIndex(args.frame))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    lollipop::encode::sink::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
