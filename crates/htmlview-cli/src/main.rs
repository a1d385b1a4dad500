use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use htmlview_config::Config;
use htmlview_engine::render::outline_container;
use htmlview_engine::{NodeKey, ParseError, RenderRoot, TriggerOutcome};

#[derive(Parser)]
#[command(name = "htmlview")]
#[command(about = "Print the visual tree an HTML document renders to")]
struct Cli {
    /// Input HTML file
    input: PathBuf,

    /// Config file (defaults to ~/.config/htmlview/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the tree as JSON instead of an outline
    #[arg(long)]
    json: bool,

    /// Log every visited node
    #[arg(long)]
    debug_tree: bool,

    /// Show inline/block child counts on every block container
    #[arg(long)]
    debug_inline: bool,

    /// Keep whitespace-only text between tags
    #[arg(long)]
    keep_whitespace: bool,

    /// Press the link with this position key, e.g. 1-3
    #[arg(long, value_name = "KEY")]
    press: Option<String>,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file {} does not exist", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    Ok(loaded)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    config.debug_tree |= cli.debug_tree;
    config.debug_inline_counts |= cli.debug_inline;
    config.keep_whitespace |= cli.keep_whitespace;

    env_logger::Builder::from_default_env()
        .filter_level(if config.debug_tree {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let markup = fs::read_to_string(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let options = config.render_options(|href| println!("pressed: {href}"))?;
    let failure: Rc<RefCell<Option<ParseError>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&failure);
    let root = RenderRoot::new(config.markup_parser(), options).with_error_handler(move |e| {
        log::error!("Failed to render markup: {e}");
        *sink.borrow_mut() = Some(e.clone());
    });

    if root.trigger(Some(&markup)) == TriggerOutcome::NoInput {
        log::warn!("{} is empty", cli.input.display());
    }
    let failed = failure.borrow_mut().take();
    if let Some(e) = failed {
        return Err(e).with_context(|| format!("Failed to render {}", cli.input.display()));
    }

    let shown = root.display();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        println!("{}", outline_container(&shown));
    }

    if let Some(key) = cli.press
        && !root.press_link(&NodeKey::from(key.as_str()))
    {
        bail!("No pressable link with key {key}");
    }

    Ok(())
}
