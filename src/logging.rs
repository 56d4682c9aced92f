use flexi_logger::{opt_format, Cleanup, Criterion, Duplicate, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming};
use std::path::Path;

/// Rotated log files in `directory`, warnings echoed to stderr. `RUST_LOG`
/// wins over `level` when set. Keep the returned handle alive for as long as
/// logging is needed.
pub fn setup_logging<P: AsRef<Path>>(directory: P, level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?
        .log_to_file(FileSpec::default().directory(directory.as_ref()).basename("tilewords"))
        .format(opt_format)
        .duplicate_to_stderr(Duplicate::Warn)
        .rotate(
            Criterion::Size(10 * 1024 * 1024), // 10 MB per file
            Naming::Numbers,
            Cleanup::KeepLogFiles(7),
        )
        .start()
}

