mod args;

use anyhow::{Context, Result};
use common::utils::config::get_config;
use conversation_datasets::{ConversationDataset, FileDataset, OrConvQaDataset};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::args::Command;

fn main() -> Result<()> {
    let app_config = get_config().context("loading configuration")?;

    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| app_config.log_filter.clone());
    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    let parsed = args::parse(&app_config)?;
    let dataset = OrConvQaDataset::with_mode(parsed.dataset_path, parsed.mode);
    info!(
        path = %dataset.path().display(),
        mode = ?dataset.mode(),
        "Opening OrConvQA dataset"
    );

    match parsed.command {
        Command::Summary => {
            let summary = dataset
                .summary()
                .with_context(|| format!("summarizing {}", dataset.path().display()))?;
            println!("conversations:      {}", summary.conversations);
            println!("turns:              {}", summary.turns);
            println!("max turns:          {}", summary.max_turns);
            println!("evidences:          {}", summary.evidences);
            println!("relevant evidences: {}", summary.relevant_evidences);
        }
        Command::Show { index } => {
            let tree = dataset
                .get(index)
                .with_context(|| format!("loading conversation {index}"))?;
            let rendered =
                serde_json::to_string_pretty(tree).context("serializing conversation tree")?;
            println!("{rendered}");
        }
        Command::List => {
            let conversations = dataset
                .conversations()
                .with_context(|| format!("opening {}", dataset.path().display()))?;
            for tree in conversations {
                let tree = tree.context("reading conversation")?;
                println!("{}\t{}", tree.conversation_id, tree.turns().count());
            }
        }
    }

    Ok(())
}
