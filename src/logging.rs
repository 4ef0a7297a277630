// Logger setup and the build-dependent logging macros

use env_logger::Env;

/// Installs `env_logger` with a `warn` default that `RUST_LOG` can override.
pub fn init() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}

/// Logs at `$level` in debug builds only. Release builds drop the call but still
/// type-check the arguments.
#[doc(hidden)]
#[macro_export]
macro_rules! dev_log {
    ($level:expr, $($arg:tt)+) => {
        if cfg!(debug_assertions) {
            log::log!($level, $($arg)+);
        }
    };
}

/// Engine internals: chosen word, per-guess results, ignored keys.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)+) => {
        $crate::dev_log!(log::Level::Debug, $($arg)+)
    };
}

/// Lifecycle events: round setup, terminal setup and teardown.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)+) => {
        $crate::dev_log!(log::Level::Info, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_log_macros_take_format_arguments() {
        let slot = 3;
        let letter = 'A';
        debug_log!("revealed {letter} at {}", slot);
        info_log!("game set up: {} slots, {} tries", slot, slot * 3);
        dev_log!(log::Level::Warn, "{slot:>4}");
    }
}
