//! CLI Argument Parsing Tests

use clap::Parser;
use ra_cli::args::*;
use ra_cli::logging::LogFormat;
use std::path::PathBuf;

#[cfg(test)]
mod args_tests {
    use super::*;

    #[test]
    fn test_positional_user_data() {
        let args = CliArgs::try_parse_from(["ra-report", "nonce-1234"]).unwrap();
        assert_eq!(args.user_data.as_deref(), Some("nonce-1234"));

        let args = CliArgs::try_parse_from(["ra-report"]).unwrap();
        assert_eq!(args.user_data, None);
    }

    #[test]
    fn test_user_data_with_spaces_is_one_value() {
        let args = CliArgs::try_parse_from(["ra-report", "two words"]).unwrap();
        assert_eq!(args.user_data.as_deref(), Some("two words"));

        let result = CliArgs::try_parse_from(["ra-report", "one", "two"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_args() {
        let args = CliArgs::try_parse_from(["ra-report", "-c", "ra.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("ra.toml")));

        let args = CliArgs::try_parse_from(["ra-report", "--config", "/etc/ra/ra.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/ra/ra.toml")));
    }

    #[test]
    fn test_generator_overrides() {
        let args = CliArgs::try_parse_from([
            "ra-report",
            "--runtime",
            "bun",
            "--script",
            "/opt/ra/generate_ra.js",
            "--workdir",
            "/opt/ra",
            "--timeout",
            "30",
            "nonce",
        ])
        .unwrap();

        assert_eq!(args.runtime.as_deref(), Some("bun"));
        assert_eq!(args.script, Some(PathBuf::from("/opt/ra/generate_ra.js")));
        assert_eq!(args.working_dir, Some(PathBuf::from("/opt/ra")));
        assert_eq!(args.timeout, Some(30));
        assert_eq!(args.user_data.as_deref(), Some("nonce"));
    }

    #[test]
    fn test_invalid_timeout() {
        assert!(CliArgs::try_parse_from(["ra-report", "--timeout", "soon"]).is_err());
        assert!(CliArgs::try_parse_from(["ra-report", "--timeout", "-1"]).is_err());
    }

    #[test]
    fn test_logging_args() {
        let args = CliArgs::try_parse_from(["ra-report", "--log-level", "trace"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Trace));

        let args = CliArgs::try_parse_from(["ra-report", "--log-level", "error"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Error));

        let args = CliArgs::try_parse_from(["ra-report", "--log-format", "compact"]).unwrap();
        assert_eq!(args.log_format, Some(LogFormat::Compact));

        let result = CliArgs::try_parse_from(["ra-report", "--log-level", "invalid"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_and_version() {
        let result = CliArgs::try_parse_from(["ra-report", "--help"]);
        assert!(result.is_err()); // Clap exits on help, so this errors

        let result = CliArgs::try_parse_from(["ra-report", "--version"]);
        assert!(result.is_err());
    }
}
