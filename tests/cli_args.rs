//! Tests for CLI argument parsing.

mod common;

use clap::Parser;
use common::temp_config;
use divergence_meter::cli::Cli;
use divergence_meter::config::UpstreamMode;
use std::path::PathBuf;

#[test]
fn all_flags_parse() {
    let cli = Cli::try_parse_from([
        "divergence-meter",
        "--config",
        "/tmp/meter.toml",
        "--connect",
        "127.0.0.1:9000",
        "--seed",
        "1048596",
        "--log-file",
        "/tmp/meter.log",
    ])
    .expect("parse");
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/meter.toml")));
    assert_eq!(cli.connect.as_deref(), Some("127.0.0.1:9000"));
    assert_eq!(cli.seed, Some(1_048_596));
    assert_eq!(cli.log_path(), PathBuf::from("/tmp/meter.log"));
    assert!(!cli.simulate);
}

#[test]
fn non_numeric_seed_is_rejected() {
    assert!(Cli::try_parse_from(["divergence-meter", "--seed", "okabe"]).is_err());
}

#[test]
fn connect_conflicts_with_simulate() {
    let err = Cli::try_parse_from([
        "divergence-meter",
        "--simulate",
        "--connect",
        "127.0.0.1:9000",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
}

#[test]
fn flags_override_the_config_file() {
    let (_dir, path) = temp_config("[upstream]\nmode = \"tcp\"\naddress = \"10.0.0.1:8000\"\n");
    let cli = Cli::try_parse_from([
        "divergence-meter",
        "--config",
        path.to_str().expect("utf-8 path"),
        "--simulate",
    ])
    .expect("parse");

    let mut config = cli.load_config().expect("load");
    assert_eq!(config.upstream.mode, UpstreamMode::Tcp);
    cli.apply(&mut config);
    assert_eq!(config.upstream.mode, UpstreamMode::Simulator);
    assert_eq!(config.upstream.address, "10.0.0.1:8000");
}

#[test]
fn help_mentions_every_flag() {
    let err = Cli::try_parse_from(["divergence-meter", "--help"]).unwrap_err();
    let help = err.to_string();
    for flag in ["--config", "--connect", "--simulate", "--seed", "--log-file"] {
        assert!(help.contains(flag), "missing {flag}");
    }
}
