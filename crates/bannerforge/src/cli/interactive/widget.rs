//! Menu actions operating on the interactive session.

use bannerforge_core::{save_images, Config, PipelineState, Session};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use std::path::PathBuf;

use super::handle_interrupt;
use super::theme::Palette;

/// Print the prompt, suggestions, banners and status.
pub fn render(session: &Session, palette: &Palette) {
    let state = session.state();

    eprintln!();
    if state.prompt().trim().is_empty() {
        palette.field("Prompt:", palette.muted.apply_to("(empty)"));
    } else {
        palette.field("Prompt:", state.prompt());
    }

    for (i, suggestion) in state.enhanced().iter().enumerate() {
        eprintln!(
            "  {} {suggestion}",
            palette.muted.apply_to(format!("{:<18}", format!("[{}]", i + 1)))
        );
    }
    if !state.images().is_empty() {
        palette.field("Banners:", format!("{} ready", state.images().len()));
    }
    if let PipelineState::Error(message) = state.status() {
        palette.failure(message);
    }
    eprintln!();
}

pub fn edit_prompt(session: &mut Session, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let Some(text) = handle_interrupt(
        Input::<String>::with_theme(theme)
            .with_prompt("Prompt")
            .with_initial_text(session.state().prompt())
            .allow_empty(true)
            .interact_text(),
    )?
    else {
        return Ok(());
    };
    session.set_prompt(text);
    Ok(())
}

pub async fn enhance(session: &mut Session) {
    let pb = crate::cli::spinner("Optimizing prompt");
    session.enhance().await;
    pb.finish_and_clear();
}

pub fn pick_enhanced(session: &mut Session, theme: &ColorfulTheme) -> anyhow::Result<()> {
    let items: Vec<String> = session
        .state()
        .enhanced()
        .iter()
        .map(|p| p.to_string())
        .collect();

    let selection = Select::with_theme(theme)
        .with_prompt("Use which prompt?")
        .items(items.as_slice())
        .default(0)
        .interact_opt()?;

    if let Some(index) = selection {
        session.select_prompt(index);
    }
    Ok(())
}

pub async fn generate(session: &mut Session) {
    let pb = crate::cli::spinner("Generating images");
    session.generate().await;
    pb.finish_and_clear();
}

pub fn save(session: &Session, config: &Config, palette: &Palette) -> anyhow::Result<()> {
    let theme = palette.prompt_theme();
    let default_dir = config
        .output_dir()
        .unwrap_or_else(|| PathBuf::from("./banners"));

    let Some(raw_dir) = handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Save to directory")
            .default(default_dir.display().to_string())
            .interact_text(),
    )?
    else {
        return Ok(());
    };

    let dir = PathBuf::from(shellexpand::tilde(&raw_dir).into_owned());
    match save_images(&dir, session.state().images()) {
        Ok(paths) => palette.success(format!(
            "Saved {} banner(s) to {}",
            paths.len(),
            dir.display()
        )),
        Err(e) => palette.failure(format!("Failed to save images: {e}")),
    }
    Ok(())
}
