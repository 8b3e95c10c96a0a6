use std::sync::Mutex;

use slog::Drain;
use slog::Fuse;
use slog_async::Async;
use slog_json::Json;

pub use slog::{debug, error, info, o, trace, warn, Level, Logger};

/// Builds the root logger: JSON lines on stderr, written asynchronously,
/// dropping records less severe than `level`.
///
/// With the `env_logging` feature, `RUST_LOG` narrows the output further.
pub fn initialize_logger(level: Level) -> Logger {
    let drain = Mutex::new(Json::default(std::io::stderr())).map(Fuse);
    let drain = drain.filter_level(level).ignore_res();

    #[cfg(feature = "env_logging")]
    let drain = slog_envlogger::new(drain).ignore_res();

    let drain = Async::new(drain).build().fuse();

    Logger::root(
        drain,
        o!("service" => info::SERVICE, "version" => info::VERSION, "revision" => info::REVISION, "build_timestamp" => info::BUILD_TIMESTAMP),
    )
}

/// Parses a level name such as `debug` or `warn`, as accepted in
/// configuration.
pub fn parse_level(name: &str) -> Option<Level> {
    name.trim().parse().ok()
}
