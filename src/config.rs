use std::env;

/// Default candidate lookback range: 100 to 200 bars inclusive, step 10.
pub const DEFAULT_WINDOW_MIN: usize = 100;
pub const DEFAULT_WINDOW_MAX: usize = 200;
pub const DEFAULT_WINDOW_STEP: usize = 10;

/// Channel envelope offset as a multiple of the trendline's std deviation.
pub const DEFAULT_BAND_MULTIPLIER: f64 = 1.1;

/// Minimum |r| required before a breakout is reported.
pub const DEFAULT_MIN_ABS_R: f64 = 0.85;

/// |r| above this labels the trend "strong", otherwise "weak".
pub const DEFAULT_STRONG_TREND_R: f64 = 0.5;

/// How the window selector treats candidates longer than the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortWindowPolicy {
    /// Skip candidates that exceed the available history. A series shorter
    /// than every candidate yields no selection.
    #[default]
    Skip,
    /// Truncate the candidate to the available history. The selection then
    /// reports the truncated length, never the nominal one.
    Clamp,
}

impl ShortWindowPolicy {
    fn from_env_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "skip" => Some(Self::Skip),
            "clamp" => Some(Self::Clamp),
            _ => None,
        }
    }
}

/// Tunables for the trend channel algorithm.
#[derive(Debug, Clone)]
pub struct TrendConfig {
    /// Smallest candidate lookback window, in bars.
    pub window_min: usize,
    /// Largest candidate lookback window, in bars.
    pub window_max: usize,
    /// Step between candidate windows, in bars.
    pub window_step: usize,
    /// Envelope offset multiplier applied to the trendline's std deviation.
    pub band_multiplier: f64,
    /// |r| gate below which no breakout is reported.
    pub min_abs_r: f64,
    /// |r| threshold for the strong/weak trend label.
    pub strong_trend_r: f64,
    /// Treatment of candidate windows longer than the series.
    pub short_window_policy: ShortWindowPolicy,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_min: DEFAULT_WINDOW_MIN,
            window_max: DEFAULT_WINDOW_MAX,
            window_step: DEFAULT_WINDOW_STEP,
            band_multiplier: DEFAULT_BAND_MULTIPLIER,
            min_abs_r: DEFAULT_MIN_ABS_R,
            strong_trend_r: DEFAULT_STRONG_TREND_R,
            short_window_policy: ShortWindowPolicy::default(),
        }
    }
}

impl TrendConfig {
    /// Candidate window lengths, smallest first.
    pub fn candidate_windows(&self) -> impl Iterator<Item = usize> + '_ {
        (self.window_min..=self.window_max).step_by(self.window_step.max(1))
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Alpha Vantage API key for the symbol universe (required).
    pub alpha_vantage_api_key: Option<String>,
    /// Telegram bot token (optional; notifications disabled without it).
    pub telegram_api_token: Option<String>,
    /// Telegram chat to deliver to.
    pub telegram_chat_id: Option<String>,
    /// Yahoo Finance history range (e.g. "5d").
    pub history_range: String,
    /// Yahoo Finance bar interval (e.g. "1h").
    pub history_interval: String,
    /// Maximum symbols analyzed concurrently.
    pub scan_concurrency: usize,
    /// Path of the CSV breakout report.
    pub report_path: String,
    /// Directory chart artifacts are written to.
    pub plot_dir: String,
    /// Trend channel tunables.
    pub trend: TrendConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let trend = TrendConfig {
            window_min: env_parse("TREND_WINDOW_MIN", DEFAULT_WINDOW_MIN),
            window_max: env_parse("TREND_WINDOW_MAX", DEFAULT_WINDOW_MAX),
            window_step: env_parse("TREND_WINDOW_STEP", DEFAULT_WINDOW_STEP),
            band_multiplier: env_parse("TREND_BAND_MULTIPLIER", DEFAULT_BAND_MULTIPLIER),
            min_abs_r: env_parse("TREND_MIN_ABS_R", DEFAULT_MIN_ABS_R),
            strong_trend_r: env_parse("TREND_STRONG_R", DEFAULT_STRONG_TREND_R),
            short_window_policy: env::var("TREND_SHORT_WINDOW_POLICY")
                .ok()
                .and_then(|v| ShortWindowPolicy::from_env_str(&v))
                .unwrap_or_default(),
        };

        Self {
            alpha_vantage_api_key: env::var("ALPHA_VANTAGE_API_KEY").ok(),
            telegram_api_token: env::var("TELEGRAM_API_TOKEN").ok(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").ok(),
            history_range: env::var("HISTORY_RANGE").unwrap_or_else(|_| "5d".to_string()),
            history_interval: env::var("HISTORY_INTERVAL").unwrap_or_else(|_| "1h".to_string()),
            scan_concurrency: env_parse("SCAN_CONCURRENCY", 8),
            report_path: env::var("REPORT_PATH").unwrap_or_else(|_| "trend_breaks.csv".to_string()),
            plot_dir: env::var("PLOT_DIR").unwrap_or_else(|_| "plots".to_string()),
            trend,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
