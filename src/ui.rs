// UI layer: terminal prompts with `dialoguer`, a spinner around network
// calls and styled headings. Rendering of the actual content lives in
// `render`.

use crate::error::CliError;
use crate::layout::frame_title;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

/// Free-text prompt. Blank answers are allowed and come back empty.
pub fn ask(prompt: &str) -> io::Result<String> {
    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(answer.trim().to_string())
}

/// Free-text prompt that falls back to `default` on a blank answer.
pub fn ask_or(prompt: &str, default: &str) -> io::Result<String> {
    let answer = ask(&format!("{} [{}]", prompt, default))?;
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer)
    }
}

pub fn confirm(prompt: &str, default: bool) -> io::Result<bool> {
    Confirm::new().with_prompt(prompt).default(default).interact()
}

/// Run `work` while a spinner is shown on stderr.
pub fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = work();
    spinner.finish_and_clear();
    result
}

pub fn heading(title: &str) {
    println!("{}", frame_title(title).bold().cyan());
}

pub fn hint(text: &str) {
    println!("{}", text.dim());
}

/// Report a failed command on stderr, followed by the raw upstream body
/// when the failure carries one.
pub fn report_error(prefix: &str, err: &CliError) {
    eprintln!("{} {}", prefix.red().bold(), err);
    if let Some(body) = err.raw_body() {
        eprintln!("{}", body);
    }
}
