use std::time::Duration;

/// Interval used when the configuration does not set one.
pub const DEFAULT_AUTO_CYCLE_INTERVAL: Duration = Duration::from_millis(5000);

/// Study configuration parsed from the `memcard2025.cfg` resource.
///
/// The file is line-oriented `key=value` text. Unknown keys and lines
/// without a `=` are ignored, so the parse never fails; missing settings
/// fall back to defaults at the accessor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyConfig {
    auto_cycle_interval: Option<Duration>,
    bgm_playlist: Option<String>,
}

impl StudyConfig {
    /// Parse configuration text, tolerating CRLF and stray whitespace.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for line in text.lines() {
            let Some((key, value)) = line.trim().split_once('=') else {
                continue;
            };
            match key.trim() {
                "DisplayMode_AutoCycle_interval" => {
                    if let Ok(seconds) = value.trim().parse::<u64>() {
                        config.auto_cycle_interval = Some(Duration::from_secs(seconds));
                    }
                }
                "BGM_list" => {
                    let value = value.trim();
                    if !value.is_empty() {
                        config.bgm_playlist = Some(value.to_string());
                    }
                }
                _ => {}
            }
        }
        config
    }

    /// Delay between automatic card advances in display mode.
    ///
    /// Falls back to five seconds when unset or unparseable.
    #[must_use]
    pub fn auto_cycle_interval(&self) -> Duration {
        self.auto_cycle_interval
            .unwrap_or(DEFAULT_AUTO_CYCLE_INTERVAL)
    }

    /// Relative path of the background-music playlist, if configured.
    #[must_use]
    pub fn bgm_playlist(&self) -> Option<&str> {
        self.bgm_playlist.as_deref()
    }
}
