use crate::numerical::errors::SolverError;
use log::info;
use simplelog::*;
use std::time::Duration;
use tabled::{builder::Builder, settings::Style};

/// Maps a loglevel string to a filter. `None` means logging is switched off.
pub fn parse_loglevel(level: &str) -> Result<Option<LevelFilter>, SolverError> {
    match level {
        "debug" => Ok(Some(LevelFilter::Debug)),
        "info" => Ok(Some(LevelFilter::Info)),
        "warn" => Ok(Some(LevelFilter::Warn)),
        "error" => Ok(Some(LevelFilter::Error)),
        "off" | "none" => Ok(None),
        _ => Err(SolverError::InvalidLogLevel {
            got: level.to_string(),
        }),
    }
}

/// Installs a terminal logger at the requested level. Returns `true` if logging is on.
/// A logger that is already installed (e.g. by a previous solver run) is kept.
pub fn init_logger(loglevel: &Option<String>) -> Result<bool, SolverError> {
    let log_option = match loglevel {
        Some(level) => parse_loglevel(level)?,
        None => Some(LevelFilter::Info),
    };
    let Some(log_option) = log_option else {
        return Ok(false);
    };
    let logger_instance = CombinedLogger::init(vec![TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
    if logger_instance.is_ok() {
        info!("Program started with loglevel: {}", log_option);
    }
    Ok(true)
}

pub fn elapsed_time(elapsed: Duration) -> (String, f64) {
    let time = elapsed.as_micros();
    if time < 1000 {
        info!("Elapsed {} us", time);
        (" us".to_string(), time as f64)
    } else if time < 1_000_000 {
        info!("Elapsed {} ms", elapsed.as_millis());
        (" ms".to_string(), elapsed.as_millis() as f64)
    } else {
        info!("Elapsed {} s", elapsed.as_secs_f64());
        (" s".to_string(), elapsed.as_secs_f64())
    }
}

/// two-column table of run statistics, in the given order
pub fn statistics_table(stats: &[(String, String)]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["statistic".to_string(), "value".to_string()]);
    for (key, value) in stats {
        builder.push_record([key.clone(), value.clone()]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_loglevel() {
        assert_eq!(parse_loglevel("info").unwrap(), Some(LevelFilter::Info));
        assert_eq!(parse_loglevel("warn").unwrap(), Some(LevelFilter::Warn));
        assert_eq!(parse_loglevel("none").unwrap(), None);
        assert_eq!(parse_loglevel("off").unwrap(), None);
        assert!(matches!(
            parse_loglevel("verbose"),
            Err(SolverError::InvalidLogLevel { .. })
        ));
    }

    #[test]
    fn test_init_logger_off() {
        assert_eq!(init_logger(&Some("off".to_string())), Ok(false));
        assert!(init_logger(&Some("loud".to_string())).is_err());
    }

    #[test]
    fn test_elapsed_time_units() {
        assert_eq!(elapsed_time(Duration::from_micros(10)).0, " us");
        assert_eq!(elapsed_time(Duration::from_millis(10)), (" ms".to_string(), 10.0));
        assert_eq!(elapsed_time(Duration::from_secs(2)).0, " s");
    }

    #[test]
    fn test_statistics_table() {
        let stats = vec![
            ("number of iterations".to_string(), "6".to_string()),
            ("last step".to_string(), "1.0e-16".to_string()),
        ];
        let table = statistics_table(&stats);
        assert!(table.contains("number of iterations"));
        assert!(table.contains("1.0e-16"));
        let iterations_at = table.find("number of iterations").unwrap();
        let step_at = table.find("last step").unwrap();
        assert!(iterations_at < step_at);
    }
}
