use std::path::PathBuf;

use pretty_assertions::assert_eq;

use super::{CompilerConfig, ConfigError};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn defaults() {
    let config = CompilerConfig::default();
    assert_eq!(config.package, "main");
    assert_eq!(config.error_limit, 10);
    assert!(!config.report_all_errors);
    assert!(!config.trace_trampolines);
    assert_eq!(config.output, None);
    assert_eq!(config.arena.slab_size, 50_000);
    assert_eq!(config.arena.large_slab_size, 500_000);
    assert_eq!(config.arena.growth_threshold, 500_000);
}

#[test]
fn every_flag() {
    let config = CompilerConfig::from_args(&args(&[
        "-e",
        "-r",
        "-o",
        "out.6",
        "--package=io",
        "--file=io.go",
        "--error-limit=3",
    ]));
    assert_eq!(
        config,
        Ok(CompilerConfig {
            package: "io".to_string(),
            filename: "io.go".to_string(),
            output: Some(PathBuf::from("out.6")),
            report_all_errors: true,
            error_limit: 3,
            trace_trampolines: true,
            ..CompilerConfig::default()
        })
    );
}

#[test]
fn output_with_equals() {
    let config = CompilerConfig::from_args(&args(&["-o=a.out"]));
    assert_eq!(config.map(|c| c.output), Ok(Some(PathBuf::from("a.out"))));
}

#[test]
fn bad_command_lines() {
    assert_eq!(
        CompilerConfig::from_args(&args(&["-o"])),
        Err(ConfigError::MissingValue {
            flag: "-o".to_string()
        })
    );
    assert_eq!(
        CompilerConfig::from_args(&args(&["--error-limit=ten"])),
        Err(ConfigError::InvalidNumber {
            flag: "--error-limit".to_string(),
            value: "ten".to_string()
        })
    );
    assert_eq!(
        CompilerConfig::from_args(&args(&["--fast"])),
        Err(ConfigError::UnknownOption("--fast".to_string()))
    );
}

#[test]
fn derived_settings() {
    let config = CompilerConfig::from_args(&args(&["-e", "--file=x.go", "-r"]));
    let Ok(config) = config else {
        panic!("valid flags rejected");
    };
    let diagnostics = config.diagnostic_config();
    assert!(diagnostics.report_all);
    assert_eq!(diagnostics.error_limit, 10);
    let options = config.ctx_options();
    assert_eq!(options.filename, "x.go");
    assert!(options.trace_trampolines);
}
