// Console text panel orchestration.
//
// Thin glue around the normalization core: fetch the panel text, substitute
// variables, optionally strip markup, and hand the result to the console
// renderer together with the word-wrap and paging flags. The renderer itself
// (width-aware wrapping, screenful pagination) lives behind the `Console`
// trait and is not part of this crate.

use crate::normalize::strip_markup;
use crate::variables::Variables;
use std::collections::HashMap;
use std::io;

/// Panel configuration key for the paging flag.
pub const CONSOLE_TEXT_PAGING: &str = "console-text-paging";
/// Panel configuration key for the word-wrap flag.
pub const CONSOLE_TEXT_WORDWRAP: &str = "console-text-wordwrap";

/// The console renderer boundary. Implementations own all display state,
/// including the legacy code-page re-encoding applied on Windows consoles.
pub trait Console {
    fn print_head_line(&mut self, heading: &str);

    /// Render multi-line text, soft-wrapping when `wordwrap` is set and
    /// pausing after each screenful when `paging` is set.
    fn print_multi_line(&mut self, text: &str, wordwrap: bool, paging: bool) -> io::Result<()>;

    /// Show the end-of-panel prompt; returns false when the user quits.
    fn prompt_end_panel(&mut self) -> bool;
}

/// Supplies the raw panel content. `None` means there is nothing to display.
pub trait TextProvider {
    fn text(&self) -> Option<String>;
}

impl<F> TextProvider for F
where
    F: Fn() -> Option<String>,
{
    fn text(&self) -> Option<String> {
        self()
    }
}

/// Per-panel configuration options resolved to plain strings.
#[derive(Debug, Default, Clone)]
pub struct PanelConfig {
    options: HashMap<String, String>,
}

impl PanelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// A flag option is true only for the string "true" (case-insensitive);
    /// anything else, including an absent option, is false.
    pub fn flag(&self, key: &str) -> bool {
        self.option(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

/// Shared installation state visible to panels.
#[derive(Debug, Default, Clone)]
pub struct InstallData {
    pub variables: Variables,
    platform: Option<String>,
}

impl InstallData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_platform(&mut self, platform: impl Into<String>) {
        self.platform = Some(platform.into());
    }

    pub fn platform(&self) -> Option<&str> {
        self.platform.as_deref()
    }

    /// Windows consoles need the final text re-encoded into a legacy
    /// single-byte code page; the `Console` implementation consults this.
    pub fn is_windows(&self) -> bool {
        self.platform
            .as_deref()
            .map(|p| p.eq_ignore_ascii_case("windows"))
            .unwrap_or(false)
    }
}

/// A console panel that displays a block of (possibly HTML-flavored) text.
pub struct TextConsolePanel {
    heading: String,
    config: PanelConfig,
    provider: Box<dyn TextProvider>,
    strip_html: bool,
}

impl TextConsolePanel {
    pub fn new(heading: impl Into<String>, config: PanelConfig, provider: Box<dyn TextProvider>) -> Self {
        Self {
            heading: heading.into(),
            config,
            provider,
            strip_html: false,
        }
    }

    /// Run the markup pipeline over the panel text before display. Off by
    /// default; panels whose content is already plain text skip it.
    pub fn with_html_stripping(mut self) -> Self {
        self.strip_html = true;
        self
    }

    /// Run the panel: print the heading, display the text, prompt to
    /// continue. Display failures are logged and do not abort the panel.
    pub fn run(&self, data: &InstallData, console: &mut dyn Console) -> bool {
        console.print_head_line(&self.heading);

        match self.provider.text() {
            Some(raw) => {
                let mut text = data.variables.substitute(&raw);
                if self.strip_html {
                    text = strip_markup(&text);
                }
                let paging = self.config.flag(CONSOLE_TEXT_PAGING);
                let wordwrap = self.config.flag(CONSOLE_TEXT_WORDWRAP);
                if let Err(e) = console.print_multi_line(&text, wordwrap, paging) {
                    log::warn!("Displaying multiline text failed: {e}");
                }
            }
            None => {
                log::warn!("No text to display");
            }
        }
        console.prompt_end_panel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingConsole {
        headings: Vec<String>,
        printed: Vec<(String, bool, bool)>,
        prompted: u32,
        fail_display: bool,
    }

    impl Console for RecordingConsole {
        fn print_head_line(&mut self, heading: &str) {
            self.headings.push(heading.to_string());
        }

        fn print_multi_line(&mut self, text: &str, wordwrap: bool, paging: bool) -> io::Result<()> {
            if self.fail_display {
                return Err(io::Error::new(io::ErrorKind::Other, "display broken"));
            }
            self.printed.push((text.to_string(), wordwrap, paging));
            Ok(())
        }

        fn prompt_end_panel(&mut self) -> bool {
            self.prompted += 1;
            true
        }
    }

    fn panel_with(text: Option<&'static str>, config: PanelConfig) -> TextConsolePanel {
        TextConsolePanel::new(
            "License",
            config,
            Box::new(move || text.map(str::to_string)),
        )
    }

    #[test]
    fn displays_substituted_text_with_flags() {
        let mut config = PanelConfig::new();
        config.set(CONSOLE_TEXT_PAGING, "true");
        config.set(CONSOLE_TEXT_WORDWRAP, "false");

        let mut data = InstallData::new();
        data.variables.set("APP_NAME", "Widget");

        let panel = panel_with(Some("Welcome to ${APP_NAME}"), config);
        let mut console = RecordingConsole::default();
        assert!(panel.run(&data, &mut console));

        assert_eq!(console.headings, vec!["License"]);
        assert_eq!(
            console.printed,
            vec![("Welcome to Widget".to_string(), false, true)]
        );
        assert_eq!(console.prompted, 1);
    }

    #[test]
    fn html_stripping_is_opt_in() {
        let raw = Some("<p>Hi &amp; bye</p>");

        let plain = panel_with(raw, PanelConfig::new());
        let mut console = RecordingConsole::default();
        plain.run(&InstallData::new(), &mut console);
        assert_eq!(console.printed[0].0, "<p>Hi &amp; bye</p>");

        let stripped = panel_with(raw, PanelConfig::new()).with_html_stripping();
        let mut console = RecordingConsole::default();
        stripped.run(&InstallData::new(), &mut console);
        assert_eq!(console.printed[0].0, "\r\rHi & bye");
    }

    #[test]
    fn absent_content_still_prompts() {
        let panel = panel_with(None, PanelConfig::new());
        let mut console = RecordingConsole::default();
        assert!(panel.run(&InstallData::new(), &mut console));
        assert!(console.printed.is_empty());
        assert_eq!(console.prompted, 1);
    }

    #[test]
    fn display_failure_is_non_fatal() {
        let panel = panel_with(Some("text"), PanelConfig::new());
        let mut console = RecordingConsole {
            fail_display: true,
            ..Default::default()
        };
        assert!(panel.run(&InstallData::new(), &mut console));
        assert_eq!(console.prompted, 1);
    }

    #[test]
    fn flag_parsing() {
        let mut config = PanelConfig::new();
        config.set(CONSOLE_TEXT_PAGING, "TRUE");
        config.set(CONSOLE_TEXT_WORDWRAP, "yes");
        assert!(config.flag(CONSOLE_TEXT_PAGING));
        assert!(!config.flag(CONSOLE_TEXT_WORDWRAP));
        assert!(!config.flag("missing"));
    }

    #[test]
    fn platform_hint() {
        let mut data = InstallData::new();
        assert!(!data.is_windows());
        data.set_platform("Windows");
        assert!(data.is_windows());
        data.set_platform("linux");
        assert!(!data.is_windows());
        assert_eq!(data.platform(), Some("linux"));
    }
}
