use slog::{o, Drain, Level, Logger};
use slog_async::Async;
use slog_term::{FullFormat, TermDecorator};

/// Root logger writing to standard error, so standard output only carries results.
///
/// Records are flushed when the last clone of the logger is dropped.
pub fn create_logger(verbose: bool) -> Logger {
    let level = if verbose { Level::Debug } else { Level::Info };
    let decorator = TermDecorator::new().stderr().build();
    let drain = FullFormat::new(decorator).build().fuse();
    let drain = drain.filter_level(level).ignore_res();
    let drain = Async::new(drain).build().fuse();

    Logger::root(drain, o!())
}

/// Logger that drops everything; the library default.
pub fn discard() -> Logger {
    Logger::root(slog::Discard, o!())
}
