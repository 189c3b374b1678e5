//! Logger installation for the `last-stand` binary.

use env_logger::{Builder, Env};

/// Crates whose diagnostics `--verbose` raises above the `info` baseline.
const GAME_TARGETS: [&str; 5] = [
    "last_stand",
    "last_stand_world",
    "last_stand_simulation",
    "last_stand_rendering_macroquad",
    "last_stand_system_wave_director",
];

/// Installs `env_logger`, with `RUST_LOG` taking precedence over `verbosity`.
pub(crate) fn init(verbosity: u8) {
    let env = Env::default().default_filter_or(default_filter(verbosity));
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}

/// Filter applied when `RUST_LOG` is unset.
///
/// One `-v` shows gameplay `debug!` output from the game crates; two or more
/// also show the per-tick audio cue trace. Third-party crates stay at `info`.
pub(crate) fn default_filter(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "info".to_owned(),
        1 => "debug",
        _ => "trace",
    };

    let mut filter = String::from("info");
    for target in GAME_TARGETS {
        filter.push_str(&format!(",{target}={level}"));
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_runs_log_at_info() {
        assert_eq!(default_filter(0), "info");
    }

    #[test]
    fn verbosity_raises_only_game_crates() {
        let debug = default_filter(1);
        assert!(debug.starts_with("info,"));
        assert!(debug.contains("last_stand_world=debug"));
        assert!(!debug.contains("trace"));

        let trace = default_filter(3);
        assert!(trace.contains("last_stand=trace"));
        assert!(trace.contains("last_stand_simulation=trace"));
    }
}
