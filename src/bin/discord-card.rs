use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use discord_card::{Composer, EXTENDED_THEMES, FsImageLoader, Member, RenderOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "discord-card", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a card from a JSON options file.
    Render(RenderArgs),
    /// Render a legacy welcome or goodbye card.
    Greet(GreetArgs),
    /// List the themes accepted by `render`.
    Themes,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Options JSON (theme, card, avatar, text, generation).
    #[arg(long)]
    options: PathBuf,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,

    /// Root for relative image locators (defaults to $DISCORD_CARD_ASSETS_DIR or `.`).
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum GreetKind {
    Welcome,
    Goodbye,
}

#[derive(Parser, Debug)]
struct GreetArgs {
    /// Card kind.
    #[arg(long, value_enum, default_value_t = GreetKind::Welcome)]
    kind: GreetKind,

    /// Member tag, e.g. `name#1234`.
    #[arg(long)]
    tag: String,

    /// Avatar locator.
    #[arg(long)]
    avatar: String,

    /// Guild member count.
    #[arg(long, default_value_t = 1)]
    member_count: u64,

    /// Legacy theme name or background image locator.
    #[arg(long)]
    theme: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Root for relative image locators.
    #[arg(long)]
    assets: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("discord_card=info"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Greet(args) => cmd_greet(args),
        Command::Themes => {
            for theme in &EXTENDED_THEMES {
                println!(
                    "{:<10} {} {}",
                    theme.name,
                    theme.color,
                    theme.font.unwrap_or("-")
                );
            }
            Ok(())
        }
    }
}

fn loader(assets: Option<PathBuf>) -> FsImageLoader {
    assets
        .map(FsImageLoader::new)
        .unwrap_or_else(FsImageLoader::from_env)
}

fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .context("build tokio runtime")
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&args.options)
        .with_context(|| format!("read options {}", args.options.display()))?;
    let options: RenderOptions = serde_json::from_str(&json).context("parse options JSON")?;

    let composer = Composer::new(loader(args.assets));
    let bytes = runtime()?.block_on(composer.hydrate(options))?;

    std::fs::write(&args.out, &bytes)
        .with_context(|| format!("write {}", args.out.display()))?;
    tracing::info!(out = %args.out.display(), len = bytes.len(), "wrote card");
    Ok(())
}

fn cmd_greet(args: GreetArgs) -> anyhow::Result<()> {
    let member = Member::new(args.tag, args.avatar, args.member_count);
    let composer = Composer::new(loader(args.assets));
    let theme = args.theme.as_deref();

    let attachment = runtime()?.block_on(async {
        match args.kind {
            GreetKind::Welcome => composer.welcome_image(&member, theme).await,
            GreetKind::Goodbye => composer.goodbye_image(&member, theme).await,
        }
    })?;

    std::fs::write(&args.out, &attachment.data)
        .with_context(|| format!("write {}", args.out.display()))?;
    tracing::info!(out = %args.out.display(), name = %attachment.filename, "wrote card");
    Ok(())
}
