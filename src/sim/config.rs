use std::{env, path::PathBuf, str::FromStr, time::Duration};

/// Host driver settings, taken from the environment.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Where the pilot's selections are persisted.
    pub settings_path: PathBuf,
    /// Frames per second the host drives the model at.
    pub tick_hz: u32,
    /// Wall-clock length of the run.
    pub duration: Duration,
    /// Log a state summary every this many ticks.
    pub report_every: u64,
    /// Amplitude of the uniform noise added to raw readings.
    pub noise: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(Self::DEFAULT_SETTINGS_PATH),
            tick_hz: 30,
            duration: Duration::from_secs(20),
            report_every: 30,
            noise: 0.4,
        }
    }
}

impl SimConfig {
    const DEFAULT_SETTINGS_PATH: &'static str = "./hsi_settings.bin";
    /// Fastest frame rate the host driver accepts.
    pub const MAX_TICK_HZ: u32 = 1000;
    /// Longest run the host driver accepts, in seconds.
    pub const MAX_SIM_SECS: f64 = 86_400.0;

    /// Reads `HSI_SETTINGS_PATH`, `HSI_TICK_HZ`, `HSI_SIM_SECS` and `HSI_NOISE`.
    /// Unset variables keep their defaults. Unparsable ones are reported and ignored.
    /// Rates and lengths are clamped to `1..=MAX_TICK_HZ` and `0..=MAX_SIM_SECS`.
    pub fn from_env() -> Self {
        let default = Self::default();
        let tick_hz = Self::clamp_tick_hz(parse_var("HSI_TICK_HZ").unwrap_or(default.tick_hz));
        Self {
            settings_path: env::var("HSI_SETTINGS_PATH")
                .map_or(default.settings_path, PathBuf::from),
            tick_hz,
            duration: parse_var("HSI_SIM_SECS")
                .and_then(Self::run_length)
                .unwrap_or(default.duration),
            report_every: u64::from(tick_hz),
            noise: parse_var("HSI_NOISE")
                .filter(|noise: &f64| noise.is_finite() && *noise >= 0.0)
                .unwrap_or(default.noise),
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(Self::clamp_tick_hz(self.tick_hz)))
    }

    fn clamp_tick_hz(tick_hz: u32) -> u32 { tick_hz.clamp(1, Self::MAX_TICK_HZ) }

    /// Run length for `secs`, `None` when it is negative or not a number.
    pub fn run_length(secs: f64) -> Option<Duration> {
        (secs >= 0.0).then(|| Duration::from_secs_f64(secs.min(Self::MAX_SIM_SECS)))
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            crate::warn!("Ignoring {name}={raw}, not a valid value");
            None
        }
    }
}
