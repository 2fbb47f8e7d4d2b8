use chrono::Local;
use eyre::Result;
use fern::Dispatch;

/// Sets up console logging.
///
/// `RUST_LOG` takes either a single level (`debug`) or a comma list of
/// `target=level` pairs (`gyre=debug,hyper=warn`); entries that fail to
/// parse keep the `Info` default.
///
/// # Errors
/// * If a logger was already installed
pub fn setup_logger() -> Result<()> {
    let mut dispatch = Dispatch::new().level(log::LevelFilter::Info);

    if let Ok(spec) = std::env::var("RUST_LOG") {
        for entry in spec.split(',') {
            match entry.split_once('=') {
                Some((target, level)) => {
                    if let Ok(level) = level.trim().parse() {
                        dispatch = dispatch.level_for(target.trim().to_string(), level);
                    }
                }
                None => {
                    if let Ok(level) = entry.trim().parse() {
                        dispatch = dispatch.level(level);
                    }
                }
            }
        }
    }

    dispatch
        // Configure logging to console
        .chain(std::io::stdout())
        // Format log messages with time and log level
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ));
        })
        .apply()?;
    Ok(())
}
