use crate::config::SolverConfig;
use crate::graph::{Resolution, Resolutions};
use chrono::Local;
use csv::Writer;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::File;
use std::io;
use std::path::Path;

/// `log_<date>_<time>.txt`
pub fn log_file_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Installs the global logger: terminal always, a timestamped file when `log_to_file` is set.
/// Returns false when logging is off or a logger was already installed.
pub fn init_logger(config: &SolverConfig) -> bool {
    let level = config.loglevel;
    if level == LevelFilter::Off {
        return false;
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];
    if config.log_to_file {
        match File::create(log_file_name()) {
            Ok(file) => loggers.push(WriteLogger::new(level, Config::default(), file)),
            Err(err) => eprintln!("log file not created: {}", err),
        }
    }
    CombinedLogger::init(loggers).is_ok()
}

/// Writes `quantity,value` rows; unresolved quantities get an empty value.
pub fn save_resolution_to_csv<P: AsRef<Path>>(
    resolutions: &Resolutions,
    filename: P,
) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["quantity", "value"])?;
    for (name, resolution) in resolutions {
        let value = match resolution {
            Resolution::Resolved(v) => v.to_string(),
            Resolution::Unresolved => String::new(),
        };
        writer.write_record([name.as_str(), value.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
