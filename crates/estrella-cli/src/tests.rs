use std::path::PathBuf;

use super::*;

fn app_config() -> estrella_core::AppConfig {
    estrella_core::AppConfig {
        database_url: None,
        env: estrella_core::Environment::Test,
        log_level: "info".to_string(),
        seed_csv_path: PathBuf::from("sampled_products.csv"),
        expanded_csv_path: PathBuf::from("csv_expandido.csv"),
        sample_rows: 10_000,
        sample_year: 2024,
        rng_seed: Some(99),
        db_max_connections: 5,
        db_min_connections: 1,
        db_acquire_timeout_secs: 10,
        db_insert_batch_rows: 1_000,
    }
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["estrella", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["estrella"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn expand_without_flags_defers_to_config() {
    let cli = Cli::try_parse_from(["estrella", "expand"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Expand {
            input: None,
            output: None,
            rows: None,
            year: None,
            seed: None,
        })
    ));
}

#[test]
fn expand_with_all_flags() {
    let cli = Cli::try_parse_from([
        "estrella",
        "expand",
        "--input",
        "seed.csv",
        "--output",
        "out.csv",
        "--rows",
        "250",
        "--year",
        "2023",
        "--seed",
        "7",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Expand {
            input: Some(ref input),
            output: Some(ref output),
            rows: Some(250),
            year: Some(2023),
            seed: Some(7),
        }) if input == &PathBuf::from("seed.csv") && output == &PathBuf::from("out.csv")
    ));
}

#[test]
fn expand_rejects_non_numeric_rows() {
    assert!(Cli::try_parse_from(["estrella", "expand", "--rows", "lots"]).is_err());
}

#[test]
fn load_defaults_to_a_real_run() {
    let cli = Cli::try_parse_from(["estrella", "load"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Load {
            input: None,
            dry_run: false
        })
    ));
}

#[test]
fn load_dry_run_with_input() {
    let cli =
        Cli::try_parse_from(["estrella", "load", "--input", "x.csv", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Load {
            input: Some(ref p),
            dry_run: true
        }) if p == &PathBuf::from("x.csv")
    ));
}

#[test]
fn unknown_db_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["estrella", "db", "migrate"]).is_err());
}

#[test]
fn flags_override_config_for_expand() {
    let config = app_config();
    let options = expand::resolve_options(&config, Some(50), None, Some(1));
    assert_eq!(options.target_rows, 50);
    assert_eq!(options.year, 2024);
    assert_eq!(options.seed, Some(1));
}

#[test]
fn config_fills_missing_expand_flags() {
    let config = app_config();
    let options = expand::resolve_options(&config, None, Some(2023), None);
    assert_eq!(options.target_rows, 10_000);
    assert_eq!(options.year, 2023);
    assert_eq!(options.seed, Some(99));
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
