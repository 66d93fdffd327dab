use indicatif::{ProgressBar, ProgressStyle};

use crate::ui::prelude::*;

/// Spinner shown while a blocking transfer runs. Hidden outside verbose text output.
pub fn create_spinner(message: String) -> ProgressBar {
    if !is_verbose() || get_output_format() == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner} {msg} {bytes}")
        .map(|s| s.tick_chars("⠁⠉⠙⠚⠒⠂⠲⠴⠤⠄⠦⠖⠐⠓⠋ "))
    {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Clear the spinner line and print the final message in its place
pub fn finish_spinner_with_success(pb: ProgressBar, message: impl Into<String>) {
    pb.finish_and_clear();
    debug("wpchg.fetch.done", &format!("✓ {}", message.into()));
}
