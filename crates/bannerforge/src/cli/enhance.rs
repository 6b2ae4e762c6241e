//! The `bannerforge enhance` command.

use anyhow::Context;
use bannerforge_core::session::enhance_error_message;
use bannerforge_core::{Config, EnhancedPromptList, OpenAiProvider, PromptEnhancer};
use clap::Args;
use serde::Serialize;

/// Arguments for the `enhance` command.
#[derive(Args, Debug)]
pub struct EnhanceArgs {
    /// Short prompt to elaborate
    pub prompt: String,

    /// Number of enhanced variants to request (one call each)
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=10))]
    pub times: u32,

    /// Completion model (overrides completion.model)
    #[arg(long, env = "BANNERFORGE_MODEL")]
    pub model: Option<String>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Debug, Serialize)]
struct EnhanceOutput<'a> {
    prompt: &'a str,
    enhanced: &'a EnhancedPromptList,
}

/// Execute the enhance command.
pub async fn execute(args: EnhanceArgs, config: &Config) -> anyhow::Result<()> {
    if args.prompt.trim().is_empty() {
        anyhow::bail!("Prompt is empty. Nothing to enhance.");
    }

    let provider = OpenAiProvider::from_config(&config.completion, args.model.as_deref())
        .context("Cannot reach the completion service")?;
    let enhancer = PromptEnhancer::new(Box::new(provider), &config.completion.system_prompt);
    tracing::debug!("Enhancing with {} x{}", enhancer.provider_name(), args.times);

    let mut enhanced = EnhancedPromptList::new();
    for attempt in 1..=args.times {
        let pb = super::spinner(&format!("Optimizing prompt ({attempt}/{})", args.times));
        let result = enhancer.enhance_into(&args.prompt, &mut enhanced).await;
        pb.finish_and_clear();

        if let Err(e) = result {
            tracing::error!("Error optimizing prompt: {e}");
            anyhow::bail!("{}", enhance_error_message(&e));
        }
    }

    let output = EnhanceOutput {
        prompt: args.prompt.trim(),
        enhanced: &enhanced,
    };
    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}
