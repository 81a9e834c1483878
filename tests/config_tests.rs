mod support;

use gearopt::config::{Config, LogFormat};
use gearopt::error::{ConfigError, Error};
use gearopt::ports::SolverSettings;

use support::fixtures::write_temp;

#[test]
fn config_loads_from_file() {
    let file = write_temp(
        "gearopt.toml",
        r#"
[logging]
level = "info"
format = "json"

[solver]
time_limit_secs = 300
workers = 2
"#,
    );

    let config = Config::load(&file.path).unwrap();
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Json);

    let settings = config.solver_settings().unwrap();
    assert_eq!(settings.time_limit_secs(), 300);
    assert_eq!(settings.workers(), 2);
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.solver_settings().unwrap(), SolverSettings::default());

    let err = Config::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn config_rejects_out_of_range_time_limit() {
    let file = write_temp("gearopt.toml", "[solver]\ntime_limit_secs = 1001\n");

    match Config::load(&file.path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "time_limit_secs",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid time limit error, got {err}"),
        Ok(config) => panic!(
            "Expected time limit to be rejected, got {}",
            config.solver.time_limit_secs
        ),
    }
}

#[test]
fn config_rejects_unknown_sections() {
    let file = write_temp("gearopt.toml", "[exchange]\nurl = \"x\"\n");
    let err = Config::load(&file.path).unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))), "{err}");
}

#[test]
fn config_rejects_blank_log_level() {
    let err = Config::parse_toml("[logging]\nlevel = \"  \"\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField { field: "level" })
    ));
}
