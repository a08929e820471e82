//! Panel and event-loop configuration

pub use crate::error::{BuilderError, MAX_ROW_PIXELS, MIN_TIMING_MS};

/// Native panel size: 240 columns by 320 rows
pub const NATIVE_DIMENSIONS: Dimensions = Dimensions {
    width: 240,
    height: 320,
};

/// Default reset pulse and settle time in milliseconds
pub const DEFAULT_RESET_PULSE_MS: u32 = 100;

/// Default wait after software reset and after sleep-out, in milliseconds
pub const DEFAULT_SETTLE_MS: u32 = 100;

/// Display dimensions in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns
    pub width: u16,
    /// Number of rows
    pub height: u16,
}

impl Dimensions {
    /// Pixel count
    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }
}

/// Display rotation relative to native orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise
    Rotate90,
    /// Rotate 180 degrees
    Rotate180,
    /// Rotate 270 degrees clockwise
    Rotate270,
}

/// Color filter order of the panel glass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red-green-blue
    Rgb,
    /// Blue-green-red (most ILI9341 modules)
    #[default]
    Bgr,
}

/// Panel configuration
///
/// Use [`Builder`] to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Display rotation
    pub rotation: Rotation,
    /// Panel color order
    pub color_order: ColorOrder,
    /// Hardware reset low time and settle time in milliseconds
    pub reset_pulse_ms: u32,
    /// Wait after software reset and after sleep-out, in milliseconds
    pub settle_ms: u32,
}

impl Config {
    /// Logical dimensions after rotation
    pub fn dimensions(&self) -> Dimensions {
        crate::rotation::rotated(NATIVE_DIMENSIONS, self.rotation)
    }

    /// Memory access control parameter for this configuration
    pub fn madctl(&self) -> u8 {
        crate::rotation::madctl(self.rotation, self.color_order)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rotation: Rotation::Rotate0,
            color_order: ColorOrder::Bgr,
            reset_pulse_ms: DEFAULT_RESET_PULSE_MS,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```rust,no_run
/// use moodpanel::{Builder, Rotation};
///
/// let config = match Builder::new().rotation(Rotation::Rotate90).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.dimensions().width, 320);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display rotation
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Set the panel color order
    pub fn color_order(mut self, order: ColorOrder) -> Self {
        self.config.color_order = order;
        self
    }

    /// Set the hardware reset pulse length
    pub fn reset_pulse_ms(mut self, ms: u32) -> Self {
        self.config.reset_pulse_ms = ms;
        self
    }

    /// Set the settle time after software reset and sleep-out
    pub fn settle_ms(mut self, ms: u32) -> Self {
        self.config.settle_ms = ms;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::TimingTooShort` if a delay is below
    /// [`MIN_TIMING_MS`].
    pub fn build(self) -> Result<Config, BuilderError> {
        let config = self.config;
        if config.reset_pulse_ms < MIN_TIMING_MS {
            return Err(BuilderError::TimingTooShort {
                name: "reset_pulse_ms",
                ms: config.reset_pulse_ms,
                min: MIN_TIMING_MS,
            });
        }
        if config.settle_ms < MIN_TIMING_MS {
            return Err(BuilderError::TimingTooShort {
                name: "settle_ms",
                ms: config.settle_ms,
                min: MIN_TIMING_MS,
            });
        }
        Ok(config)
    }
}

/// Timing and subscription settings for the event loop
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Topic the mood source subscribes to
    pub topic: &'static str,
    /// Sleep between polls in milliseconds
    pub poll_interval_ms: u32,
    /// Sleep after a failed poll in milliseconds
    pub error_backoff_ms: u32,
    /// Seconds to wait for the link before retrying
    pub link_timeout_s: u32,
    /// Sleep before a new link attempt in milliseconds
    pub link_retry_ms: u32,
    /// Sleep before a new source connection attempt in milliseconds
    pub connect_retry_ms: u32,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            topic: "flaskapp",
            poll_interval_ms: 500,
            error_backoff_ms: 2_000,
            link_timeout_s: 10,
            link_retry_ms: 5_000,
            connect_retry_ms: 5_000,
        }
    }
}

impl DispatcherConfig {
    /// Set the subscription topic
    pub fn with_topic(mut self, topic: &'static str) -> Self {
        self.topic = topic;
        self
    }

    /// Set the idle poll interval
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the backoff after a failed poll
    pub fn with_error_backoff_ms(mut self, ms: u32) -> Self {
        self.error_backoff_ms = ms;
        self
    }

    /// Set the link timeout window
    pub fn with_link_timeout_s(mut self, seconds: u32) -> Self {
        self.link_timeout_s = seconds;
        self
    }

    /// Set the wait before a new link attempt
    pub fn with_link_retry_ms(mut self, ms: u32) -> Self {
        self.link_retry_ms = ms;
        self
    }

    /// Set the wait before a new source connection attempt
    pub fn with_connect_retry_ms(mut self, ms: u32) -> Self {
        self.connect_retry_ms = ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_match_config_default() {
        assert_eq!(Builder::new().build().ok(), Some(Config::default()));
    }

    #[test]
    fn test_default_madctl() {
        assert_eq!(Config::default().madctl(), 0x08);
    }

    #[test]
    fn test_default_dimensions() {
        let dims = Config::default().dimensions();
        assert_eq!(dims, NATIVE_DIMENSIONS);
        assert_eq!(dims.area(), 240 * 320);
    }

    #[test]
    fn test_short_reset_pulse_rejected() {
        let result = Builder::new().reset_pulse_ms(10).build();
        assert!(matches!(
            result,
            Err(BuilderError::TimingTooShort {
                name: "reset_pulse_ms",
                ms: 10,
                min: 100
            })
        ));
    }

    #[test]
    fn test_short_settle_rejected() {
        let result = Builder::new().settle_ms(99).build();
        assert!(matches!(
            result,
            Err(BuilderError::TimingTooShort { name: "settle_ms", .. })
        ));
    }

    #[test]
    fn test_longer_timings_accepted() {
        let config = Builder::new()
            .reset_pulse_ms(150)
            .settle_ms(120)
            .color_order(ColorOrder::Rgb)
            .build()
            .unwrap();
        assert_eq!(config.reset_pulse_ms, 150);
        assert_eq!(config.settle_ms, 120);
        assert_eq!(config.madctl(), 0x00);
    }

    #[test]
    fn test_dispatcher_config_setters() {
        let config = DispatcherConfig::default()
            .with_topic("moods")
            .with_poll_interval_ms(100)
            .with_error_backoff_ms(1_000);
        assert_eq!(config.topic, "moods");
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.error_backoff_ms, 1_000);
        assert_eq!(config.link_timeout_s, 10);
    }
}
