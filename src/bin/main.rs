// File: src/bin/main.rs
use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use crossterm::style::Stylize;
use poet_core::config::PoetConfig;
use poet_core::core::context::ContextModel;
use poet_core::core::source::WordSource;
use poet_core::core::types::{Mode, StanzaShape};
use poet_core::datamuse::DatamuseSource;
use poet_core::learning::Learner;
use poet_core::persistence::{load_from_disk, load_or_new, save_to_disk};
use poet_core::{count_syllables, ComposeRequest, Poet, SyllableCache};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "poet", version, about = "Compose poems by chaining words to a meter")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a poem from a source text or the word service
    Compose(ComposeArgs),
    /// Print the syllable estimate of each word
    Syllables {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Learn source texts into a saved model
    Learn {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Model file to update
        #[arg(long)]
        model: PathBuf,
    },
}

#[derive(Args)]
struct ComposeArgs {
    /// Source text(s) to learn word adjacency from
    #[arg(long = "context")]
    contexts: Vec<PathBuf>,

    /// Previously learned model file
    #[arg(long)]
    model: Option<PathBuf>,

    /// Syllables per line, e.g. 5,7,5
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["lines", "words"])]
    meter: Option<Vec<usize>>,

    /// Lines per stanza
    #[arg(long, requires = "words")]
    lines: Option<usize>,

    /// Words per line
    #[arg(long, requires = "lines")]
    words: Option<usize>,

    /// Number of stanzas
    #[arg(long, default_value_t = 1)]
    stanzas: usize,

    /// Fixed random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Start in free mode even when a context is given
    #[arg(long)]
    free: bool,

    /// Print the poem as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => PoetConfig::load(path)?,
        None => PoetConfig::default(),
    };

    match cli.command {
        Command::Compose(args) => compose(args, config),
        Command::Syllables { words } => {
            for word in words {
                let count = count_syllables(&word);
                println!("{} {}", word.bold(), count.to_string().cyan());
            }
            Ok(())
        }
        Command::Learn { files, model } => learn(&files, &model),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn learn(files: &[PathBuf], model_path: &Path) -> anyhow::Result<()> {
    let mut model = load_or_new(model_path)
        .with_context(|| format!("loading model {}", model_path.display()))?;
    let learner = Learner::new();
    for file in files {
        let added = learner
            .learn_file(&mut model, file)
            .with_context(|| format!("learning {}", file.display()))?;
        println!("{} {} tokens", file.display().to_string().green(), added);
    }
    save_to_disk(&model, model_path)
        .with_context(|| format!("saving model {}", model_path.display()))?;
    println!(
        "Model saved to '{}' ({} words, {} distinct)",
        model_path.display(),
        model.word_count(),
        model.vocabulary_len()
    );
    Ok(())
}

fn compose(args: ComposeArgs, mut config: PoetConfig) -> anyhow::Result<()> {
    let shape = match (args.meter, args.lines, args.words) {
        (Some(meter), _, _) => StanzaShape::Meter(meter),
        (None, Some(lines_per_stanza), Some(words_per_line)) => StanzaShape::Words {
            lines_per_stanza,
            words_per_line,
        },
        _ => bail!("pass either --meter or both --lines and --words"),
    };
    if args.seed.is_some() {
        config.generation.seed = args.seed;
    }

    let context = build_context(&args.contexts, args.model.as_deref())?;
    let service: Option<Box<dyn WordSource>> = if context.is_none() || args.free {
        Some(Box::new(DatamuseSource::new(&config.service)?))
    } else {
        None
    };

    let mut poet = Poet::new(context, service, config.generation.clone())?;
    if args.free {
        poet.set_mode(Mode::Free)?;
    }

    let mut cache = SyllableCache::new();
    let request = ComposeRequest::new(shape, args.stanzas);
    let poem = poet.compose(&request, &mut cache)?;
    info!(mode = %poet.mode(), cached_words = cache.len(), "done");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&poem)?);
    } else {
        println!("{}", poem.to_string().italic());
    }
    Ok(())
}

fn build_context(contexts: &[PathBuf], model_path: Option<&Path>) -> anyhow::Result<Option<ContextModel>> {
    if contexts.is_empty() && model_path.is_none() {
        return Ok(None);
    }
    let mut model = match model_path {
        Some(path) => load_from_disk(path).with_context(|| format!("loading model {}", path.display()))?,
        None => ContextModel::new(),
    };
    let learner = Learner::new();
    for path in contexts {
        learner
            .learn_file(&mut model, path)
            .with_context(|| format!("learning {}", path.display()))?;
    }
    Ok(Some(model))
}
