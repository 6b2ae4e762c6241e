//! Colors and the entry banner for interactive mode.
//!
//! Everything renders on stderr; stdout stays free for piped results.

use std::fmt::Display;

use bannerforge_core::CropFrame;
use console::Style;
use dialoguer::theme::ColorfulTheme;

/// Styles shared by the menu, the status view and the prompts.
pub struct Palette {
    pub accent: Style,
    pub label: Style,
    pub muted: Style,
    pub ok: Style,
    pub err: Style,
}

impl Palette {
    pub fn new() -> Self {
        Self {
            accent: Style::new().for_stderr().magenta(),
            label: Style::new().for_stderr().bold(),
            muted: Style::new().for_stderr().dim(),
            ok: Style::new().for_stderr().green(),
            err: Style::new().for_stderr().red(),
        }
    }

    /// Dialoguer theme in the palette's colors.
    pub fn prompt_theme(&self) -> ColorfulTheme {
        ColorfulTheme {
            prompt_prefix: self.accent.apply_to("◆".to_string()),
            prompt_style: self.label.clone(),
            prompt_suffix: self.muted.apply_to("›".to_string()),
            active_item_prefix: self.accent.apply_to("›".to_string()),
            active_item_style: self.accent.clone(),
            success_prefix: self.ok.apply_to("◆".to_string()),
            success_suffix: self.muted.apply_to("·".to_string()),
            error_prefix: self.err.apply_to("◆".to_string()),
            error_style: self.err.clone(),
            values_style: self.ok.clone(),
            ..ColorfulTheme::default()
        }
    }

    /// `  name        value` with a bold, padded name.
    pub fn field(&self, name: &str, value: impl Display) {
        eprintln!("  {} {value}", self.label.apply_to(format!("{name:<18}")));
    }

    pub fn success(&self, message: impl Display) {
        eprintln!("  {} {message}", self.ok.apply_to("✓"));
    }

    pub fn failure(&self, message: impl Display) {
        eprintln!(
            "  {} {}",
            self.err.apply_to("✗"),
            self.err.apply_to(message.to_string())
        );
    }
}

/// Banner text framed in a box with the output frame's aspect ratio.
///
/// Terminal cells are about twice as tall as wide, which halves the row count.
fn banner_lines(columns: usize, title: &str, tagline: &str) -> Vec<String> {
    let frame = CropFrame::BANNER;
    let inner = columns.max(title.len().max(tagline.len()) + 4);
    let rows = (inner * frame.height() as usize / frame.width() as usize / 2).max(2);
    let title_row = (rows - 1) / 2;

    let mut lines = Vec::with_capacity(rows + 2);
    lines.push(format!("╭{}╮", "─".repeat(inner)));
    for row in 0..rows {
        let text = match row {
            r if r == title_row => title,
            r if r == title_row + 1 => tagline,
            _ => "",
        };
        lines.push(format!("│{text:^inner$}│"));
    }
    lines.push(format!("╰{}╯", "─".repeat(inner)));
    lines
}

/// Prints the version banner to stderr.
pub fn print_banner(palette: &Palette) {
    let title = format!("Bannerforge v{}", bannerforge_core::VERSION);
    eprintln!();
    for line in banner_lines(44, &title, "prompt in, banners out") {
        eprintln!("  {}", palette.accent.apply_to(line));
    }
    eprintln!();
}
