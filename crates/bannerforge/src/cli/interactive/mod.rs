//! Interactive CLI mode for bare `bannerforge` invocation on a TTY.
//!
//! Drives one [`Session`] through a menu: edit the prompt, enhance it, pick
//! a suggestion, generate banners, save them.

pub mod theme;
mod widget;

use bannerforge_core::{Config, Session};
use dialoguer::Select;

use theme::Palette;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Menu entries. Which ones are offered depends on the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    EditPrompt,
    Enhance,
    PickEnhanced,
    Generate,
    SaveImages,
    DismissError,
    ShowConfig,
    Exit,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::EditPrompt => "Edit prompt",
            Action::Enhance => "Optimize prompt",
            Action::PickEnhanced => "Use an optimized prompt",
            Action::Generate => "Generate images",
            Action::SaveImages => "Save images",
            Action::DismissError => "Dismiss error",
            Action::ShowConfig => "Show configuration",
            Action::Exit => "Exit",
        }
    }
}

fn available_actions(session: &Session) -> Vec<Action> {
    let state = session.state();
    let has_prompt = !state.prompt().trim().is_empty();

    let mut actions = vec![Action::EditPrompt];
    if has_prompt {
        actions.push(Action::Enhance);
    }
    if !state.enhanced().is_empty() {
        actions.push(Action::PickEnhanced);
    }
    if has_prompt {
        actions.push(Action::Generate);
    }
    if !state.images().is_empty() {
        actions.push(Action::SaveImages);
    }
    if state.status().error().is_some() {
        actions.push(Action::DismissError);
    }
    actions.push(Action::ShowConfig);
    actions.push(Action::Exit);
    actions
}

/// Entry point for interactive mode.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let palette = Palette::new();
    theme::print_banner(&palette);

    let mut session = match Session::from_config(config) {
        Ok(session) => session,
        Err(e) => {
            palette.failure(e);
            eprintln!(
                "  Edit {} or export the referenced variables, then retry.",
                Config::default_path().display()
            );
            return Ok(());
        }
    };

    let theme = palette.prompt_theme();

    loop {
        widget::render(&session, &palette);

        let actions = available_actions(&session);
        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let selection = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(labels.as_slice())
            .default(0)
            .interact_opt()?;

        let Some(index) = selection else {
            break; // Esc / Ctrl+C
        };

        match actions[index] {
            Action::EditPrompt => widget::edit_prompt(&mut session, &theme)?,
            Action::Enhance => widget::enhance(&mut session).await,
            Action::PickEnhanced => widget::pick_enhanced(&mut session, &theme)?,
            Action::Generate => widget::generate(&mut session).await,
            Action::SaveImages => widget::save(&session, config, &palette)?,
            Action::DismissError => {
                session.dismiss_error();
            }
            Action::ShowConfig => show_config(config, &palette),
            Action::Exit => break,
        }
    }

    Ok(())
}

/// Print a summary of the active settings.
fn show_config(config: &Config, palette: &Palette) {
    let config_path = Config::default_path();
    let path_note = if config_path.exists() {
        "(exists)"
    } else {
        "(using defaults)"
    };

    eprintln!();
    eprintln!("  {}", palette.accent.apply_to("Current configuration:"));
    eprintln!();
    palette.field(
        "Config file:",
        format!(
            "{} {}",
            config_path.display(),
            palette.muted.apply_to(path_note)
        ),
    );
    palette.field("Completion model:", &config.completion.model);
    palette.field("Generation host:", &config.generation.host);
    palette.field(
        "Banner frame:",
        format!(
            "{}x{} (JPEG q{})",
            config.crop.width, config.crop.height, config.crop.jpeg_quality
        ),
    );
    palette.field(
        "Output dir:",
        config
            .output_dir()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "not set".to_string()),
    );
    eprintln!();
}
