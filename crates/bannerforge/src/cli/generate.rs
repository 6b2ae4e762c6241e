//! The `bannerforge generate` command.

use bannerforge_core::output::OutputFormat as CoreOutputFormat;
use bannerforge_core::session::generate_error_message;
use bannerforge_core::{
    build_pipeline, save_images, Config, CroppedImage, ImageRecord, OutputWriter, PipelineError,
    Prompt,
};
use clap::{Args, ValueEnum};
use std::path::{Path, PathBuf};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Prompt to generate banners for
    pub prompt: String,

    /// Save banners as banner-N.jpg here instead of inlining data URIs
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Output format (defaults to output.format)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON array
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: &Config) -> anyhow::Result<()> {
    let Some(prompt) = Prompt::parse(&args.prompt) else {
        anyhow::bail!("Prompt is empty. Nothing to generate.");
    };

    let pipeline = build_pipeline(config)?;

    let pb = super::spinner("Generating images");
    let result = pipeline.generate(&prompt).await;
    pb.finish_and_clear();

    let images = match result {
        Ok(images) => images,
        Err(e) => {
            log_generation_error(&e);
            anyhow::bail!("{}", generate_error_message(&e));
        }
    };
    tracing::info!("Generated {} banner(s)", images.len());

    let out_dir = args
        .out_dir
        .as_deref()
        .map(bannerforge_core::config::expand_path)
        .or_else(|| config.output_dir());
    let records = build_records(&prompt, &images, out_dir.as_deref())?;

    let format = args
        .format
        .map(CoreOutputFormat::from)
        .or_else(|| CoreOutputFormat::parse(&config.output.format))
        .unwrap_or(CoreOutputFormat::Json);
    let stdout = std::io::stdout();
    let mut writer = OutputWriter::new(stdout.lock(), format, args.pretty || config.output.pretty);
    writer.write_all(&records)?;

    Ok(())
}

/// Save to `out_dir` when given, otherwise inline every banner.
pub(crate) fn build_records(
    prompt: &Prompt,
    images: &[CroppedImage],
    out_dir: Option<&Path>,
) -> anyhow::Result<Vec<ImageRecord>> {
    let records = match out_dir {
        Some(dir) => {
            let paths = save_images(dir, images)?;
            tracing::info!("Saved {} banner(s) to {}", paths.len(), dir.display());
            images
                .iter()
                .zip(paths)
                .enumerate()
                .map(|(i, (image, path))| ImageRecord::saved(i, prompt, image, path))
                .collect()
        }
        None => images
            .iter()
            .enumerate()
            .map(|(i, image)| ImageRecord::inline(i, prompt, image))
            .collect(),
    };
    Ok(records)
}

pub(crate) fn log_generation_error(error: &PipelineError) {
    if let PipelineError::CropFailed { failures, .. } = error {
        for failure in failures {
            tracing::error!("Crop failed for {}: {}", failure.url, failure.message);
        }
    }
    tracing::error!("Error generating images: {error}");
}
