use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use quotecard::{
    DEFAULT_API_BASE, Dispatcher, Engine, EngineOpts, FONTS, HAlign, PALETTES, PollOpts,
    RenderParams, TelegramClient, VAlign,
};

#[derive(Parser, Debug)]
#[command(name = "quotecard", version)]
struct Cli {
    /// Maximum log level written to stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one card and print the path of the PNG.
    Render(RenderArgs),
    /// List the available palettes and fonts.
    Catalog,
    /// Run the Telegram bot (long polling).
    Bot(BotArgs),
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Directory where downloaded fonts are cached.
    #[arg(long, env = "QUOTECARD_FONT_DIR", default_value = ".")]
    font_dir: PathBuf,

    /// Directory where generated images are written.
    #[arg(long, env = "QUOTECARD_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Font download timeout in seconds.
    #[arg(long, default_value_t = 10)]
    fetch_timeout_secs: u64,
}

impl EngineArgs {
    fn engine(&self) -> anyhow::Result<Engine> {
        let opts = EngineOpts::default()
            .with_font_dir(&self.font_dir)
            .with_output_dir(&self.out_dir)
            .with_fetch_timeout(Duration::from_secs(self.fetch_timeout_secs));
        Engine::new(opts).context("create render engine")
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Read every choice from a JSON file instead of the flags below.
    #[arg(long = "params", conflicts_with_all = [
        "text", "font", "palette", "color1", "color2", "valign", "halign"
    ])]
    params_path: Option<PathBuf>,

    /// Text to draw.
    #[arg(long, required_unless_present = "params_path")]
    text: Option<String>,

    /// Font name (see `catalog`).
    #[arg(long, default_value = "Poppins")]
    font: String,

    /// Palette name (see `catalog`). Ignored when both custom colors are given.
    #[arg(long, default_value = "Ocean Deep")]
    palette: String,

    /// Custom top color (#RGB or #RRGGBB).
    #[arg(long, requires = "color2")]
    color1: Option<String>,

    /// Custom bottom color (#RGB or #RRGGBB).
    #[arg(long, requires = "color1")]
    color2: Option<String>,

    #[arg(long, value_enum, default_value_t = VAlignArg::Center)]
    valign: VAlignArg,

    #[arg(long, value_enum, default_value_t = HAlignArg::Center)]
    halign: HAlignArg,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct BotArgs {
    /// Telegram bot token.
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Bot API base URL.
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Long-poll timeout in seconds.
    #[arg(long, default_value_t = 30)]
    poll_timeout_secs: u64,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VAlignArg {
    Top,
    Center,
    Bottom,
}

impl From<VAlignArg> for VAlign {
    fn from(v: VAlignArg) -> Self {
        match v {
            VAlignArg::Top => Self::Top,
            VAlignArg::Center => Self::Center,
            VAlignArg::Bottom => Self::Bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HAlignArg {
    Left,
    Center,
    Right,
}

impl From<HAlignArg> for HAlign {
    fn from(h: HAlignArg) -> Self {
        match h {
            HAlignArg::Left => Self::Left,
            HAlignArg::Center => Self::Center,
            HAlignArg::Right => Self::Right,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Catalog => cmd_catalog(),
        Command::Bot(args) => cmd_bot(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let params = match &args.params_path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read params '{}'", path.display()))?;
            serde_json::from_str::<RenderParams>(&raw)
                .with_context(|| format!("parse params '{}'", path.display()))?
        }
        None => RenderParams {
            text: args.text.clone().unwrap_or_default(),
            font: args.font.clone(),
            palette: Some(args.palette.clone()),
            v_align: VAlign::from(args.valign).label().to_ascii_lowercase(),
            h_align: HAlign::from(args.halign).label().to_ascii_lowercase(),
            custom_color1: args.color1.clone(),
            custom_color2: args.color2.clone(),
        },
    };

    std::fs::create_dir_all(&args.engine.out_dir)
        .with_context(|| format!("create output dir '{}'", args.engine.out_dir.display()))?;
    let engine = args.engine.engine()?;
    let path = engine.create_image(&params).context("render card")?;

    println!("{}", path.display());
    Ok(())
}

fn cmd_catalog() -> anyhow::Result<()> {
    println!("palettes:");
    for p in PALETTES {
        println!("  {:<14} {} -> {}", p.name, p.colors.top, p.colors.bottom);
    }
    println!("fonts:");
    for f in FONTS {
        println!("  {:<14} {}px  {}", f.name, f.size_px, f.filename);
    }
    Ok(())
}

fn cmd_bot(args: BotArgs) -> anyhow::Result<()> {
    let poll = PollOpts {
        timeout: Duration::from_secs(args.poll_timeout_secs),
        ..PollOpts::default()
    };
    std::fs::create_dir_all(&args.engine.out_dir)
        .with_context(|| format!("create output dir '{}'", args.engine.out_dir.display()))?;

    let api = TelegramClient::new(&args.token, &args.api_base, poll.timeout)
        .context("create telegram client")?;
    let engine = args.engine.engine()?;
    let mut dispatcher = Dispatcher::new(api, engine);

    quotecard::run_polling(&mut dispatcher, poll, || false);
    Ok(())
}
