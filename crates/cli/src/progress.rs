use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// AI actions that show a spinner while the request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressType {
    /// Free-text description (fast model)
    Description,
    MarketingCopy,
    Analysis,
    /// Copy and analysis together
    Insights,
}

#[derive(Debug, Clone)]
pub struct ProgressConfig {
    pub spinner_chars: &'static str,
    pub tick_interval: Duration,
    pub color: &'static str,
    pub message: &'static str,
}

impl ProgressType {
    pub fn config(self) -> ProgressConfig {
        match self {
            ProgressType::Description => ProgressConfig {
                spinner_chars: "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏",
                tick_interval: Duration::from_millis(80),
                color: "cyan",
                message: "Generating description...",
            },
            ProgressType::MarketingCopy => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓",
                tick_interval: Duration::from_millis(120),
                color: "magenta",
                message: "Generating marketing copy...",
            },
            ProgressType::Analysis => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠞⠖⠦⠴⠲⠳⠓",
                tick_interval: Duration::from_millis(120),
                color: "blue",
                message: "Analyzing description...",
            },
            ProgressType::Insights => ProgressConfig {
                spinner_chars: "⠋⠙⠚⠒⠂⠂⠒⠲⠴⠦⠖⠒⠐⠐⠒⠓⠋",
                tick_interval: Duration::from_millis(150),
                color: "yellow",
                message: "Generating copy and analysis...",
            },
        }
    }

    pub fn create_spinner(self) -> AdaptiveSpinner {
        let config = self.config();
        let spinner = ProgressBar::new_spinner();

        let template = format!("{{spinner:.{}}} {{msg}}", config.color);
        let spinner_style = ProgressStyle::default_spinner()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars(config.spinner_chars);

        spinner.set_style(spinner_style);
        spinner.set_message(config.message);
        spinner.enable_steady_tick(config.tick_interval);

        AdaptiveSpinner { spinner }
    }
}

/// Spinner drawn on stderr while an AI call runs
pub struct AdaptiveSpinner {
    spinner: ProgressBar,
}

impl AdaptiveSpinner {
    pub fn set_message(&self, message: &str) {
        self.spinner.set_message(message.to_string());
    }

    pub fn finish_success(&self, message: &str) {
        self.spinner
            .finish_with_message(style(format!("✓ {message}")).green().to_string());
    }

    pub fn finish_error(&self, message: &str) {
        self.spinner
            .finish_with_message(style(format!("✗ {message}")).red().to_string());
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_type_configs() {
        let description = ProgressType::Description.config();
        assert_eq!(description.tick_interval, Duration::from_millis(80));
        assert_eq!(description.color, "cyan");

        let insights = ProgressType::Insights.config();
        assert_eq!(insights.tick_interval, Duration::from_millis(150));
        assert!(insights.message.contains("analysis"));
    }

    #[test]
    fn test_spinner_lifecycle() {
        let spinner = ProgressType::MarketingCopy.create_spinner();
        spinner.set_message("Still working...");
        spinner.finish_success("Done");

        let spinner = ProgressType::Analysis.create_spinner();
        spinner.finish_error("Service unavailable");

        ProgressType::Description.create_spinner().finish_and_clear();
    }
}
