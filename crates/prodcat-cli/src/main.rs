// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;

use anyhow::{Context, Result, anyhow};
use config::Config;
use prodcat_app::{Catalog, Session, SortColumn, ViewCommand};
use prodcat_fixtures::BundledFixtures;
use prodcat_tui::ScreenModel;
use std::env;
use std::path::PathBuf;
use tracing::info;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1))?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    let config_path = resolve_config_path(&options, Config::default_path)?;
    if options.print_config_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&config_path));
        return Ok(());
    }

    let config = Config::load(&config_path).with_context(|| {
        format!(
            "load config {}; run `prodcat --print-example-config` to generate a template",
            config_path.display()
        )
    })?;
    let ui_options = config.ui_options()?;
    let log_path = logging::init(&config)?;
    info!(
        config = %config_path.display(),
        log = ?log_path,
        "prodcat starting"
    );

    let catalog = Catalog::load(&BundledFixtures).context("load bundled catalog")?;
    info!(
        users = catalog.users().len(),
        categories = catalog.categories().len(),
        products = catalog.len(),
        "catalog loaded"
    );
    let mut session = Session::new(catalog);
    apply_initial_commands(&mut session, &options);

    if options.check_only {
        return Ok(());
    }

    if options.dump {
        println!("{}", dump_screen(&session)?);
        return Ok(());
    }

    prodcat_tui::run_app(&mut session, &ui_options)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    dump: bool,
    owner: Option<String>,
    category: Option<String>,
    query: Option<String>,
    sort_clicks: Vec<SortColumn>,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        dump: false,
        owner: None,
        category: None,
        query: None,
        sort_clicks: Vec::new(),
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--dump" => {
                options.dump = true;
            }
            "--owner" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--owner requires a user name"))?;
                options.owner = Some(value.as_ref().to_owned());
            }
            "--category" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--category requires a category title"))?;
                options.category = Some(value.as_ref().to_owned());
            }
            "--query" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--query requires search text"))?;
                options.query = Some(value.as_ref().to_owned());
            }
            "--sort" => {
                let value = iter.next().ok_or_else(|| {
                    anyhow!("--sort requires a column: id, product, category or user")
                })?;
                let column = SortColumn::parse(value.as_ref()).ok_or_else(|| {
                    anyhow!(
                        "unknown sort column {:?}; use id, product, category or user",
                        value.as_ref()
                    )
                })?;
                options.sort_clicks.push(column);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

/// Uses `--config` when given; only otherwise asks for the default location.
fn resolve_config_path(
    options: &CliOptions,
    default_path: impl FnOnce() -> Result<PathBuf>,
) -> Result<PathBuf> {
    match &options.config_path {
        Some(path) => Ok(path.clone()),
        None => default_path(),
    }
}

/// Replays the command-line selections as the clicks a user would make.
fn apply_initial_commands(session: &mut Session, options: &CliOptions) {
    if let Some(owner) = &options.owner {
        session.apply(ViewCommand::SetOwnerFilter(owner.clone()));
    }
    if let Some(category) = &options.category {
        session.apply(ViewCommand::SetCategoryFilter(category.clone()));
    }
    if let Some(query) = &options.query {
        session.apply(ViewCommand::SetSearchQuery(query.clone()));
    }
    for column in &options.sort_clicks {
        session.apply(ViewCommand::SetSortColumn(*column));
    }
}

fn dump_screen(session: &Session) -> Result<String> {
    serde_json::to_string_pretty(&ScreenModel::build(session)).context("serialize screen model")
}

fn print_help() {
    println!("prodcat");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and catalog, then exit");
    println!("  --dump                   Print the screen as JSON instead of starting the UI");
    println!("  --owner <name>           Start filtered to one owner");
    println!("  --category <title>       Start filtered to one category");
    println!("  --query <text>           Start with a search query");
    println!("  --sort <column>          Click a sort header; repeat to cycle direction");
    println!("                           Columns: id, product, category, user");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{
        CliOptions, apply_initial_commands, dump_screen, parse_cli_args, resolve_config_path,
    };
    use anyhow::{Result, bail};
    use prodcat_app::{Session, SortColumn, SortDirection};
    use prodcat_fixtures::bundled_catalog;
    use std::path::PathBuf;

    #[test]
    fn parse_cli_args_defaults_leave_config_path_unresolved() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: None,
                print_config_path: false,
                print_example: false,
                check_only: false,
                dump: false,
                owner: None,
                category: None,
                query: None,
                sort_clicks: Vec::new(),
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(vec!["--config", "/custom/config.toml"])?;
        assert_eq!(
            options.config_path,
            Some(PathBuf::from("/custom/config.toml"))
        );
        Ok(())
    }

    #[test]
    fn explicit_config_path_skips_default_lookup() -> Result<()> {
        let options = parse_cli_args(vec!["--config", "/custom/config.toml"])?;
        let resolved = resolve_config_path(&options, || bail!("no config directory"))?;
        assert_eq!(resolved, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn missing_config_flag_falls_back_to_default_lookup() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new())?;
        let resolved = resolve_config_path(&options, || Ok(PathBuf::from("/tmp/prodcat.toml")))?;
        assert_eq!(resolved, PathBuf::from("/tmp/prodcat.toml"));

        let error = resolve_config_path(&options, || bail!("no config directory"))
            .expect_err("default lookup failure should surface");
        assert!(error.to_string().contains("no config directory"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        for (flag, hint) in [
            ("--config", "requires a file path"),
            ("--owner", "requires a user name"),
            ("--category", "requires a category title"),
            ("--query", "requires search text"),
            ("--sort", "requires a column"),
        ] {
            let error = parse_cli_args(vec![flag]).expect_err("missing value should fail");
            assert!(error.to_string().contains(hint), "{flag}: {error}");
        }
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"]).expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_rejects_unknown_sort_column() {
        let error =
            parse_cli_args(vec!["--sort", "price"]).expect_err("unknown column should fail");
        assert!(error.to_string().contains("unknown sort column \"price\""));
    }

    #[test]
    fn parse_cli_args_collects_filters_and_repeated_sorts() -> Result<()> {
        let options = parse_cli_args(vec![
            "--owner", "Anna", "--category", "Grocery", "--query", "e", "--sort", "product",
            "--sort", "product", "--dump",
        ])?;
        assert_eq!(options.owner.as_deref(), Some("Anna"));
        assert_eq!(options.category.as_deref(), Some("Grocery"));
        assert_eq!(options.query.as_deref(), Some("e"));
        assert_eq!(
            options.sort_clicks,
            vec![SortColumn::Product, SortColumn::Product]
        );
        assert!(options.dump);
        assert!(!options.check_only);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"])?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"])?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn initial_commands_replay_as_clicks() -> Result<()> {
        let options = parse_cli_args(vec![
            "--owner", "Anna", "--category", "Grocery", "--sort", "product", "--sort", "product",
        ])?;
        let mut session = Session::new(bundled_catalog()?);
        apply_initial_commands(&mut session, &options);

        assert_eq!(session.state().sort_direction(), SortDirection::Desc);
        let names = session
            .visible_rows()
            .iter()
            .map(|row| row.name())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Sugar", "Eggs", "Bread"]);
        Ok(())
    }

    #[test]
    fn dump_screen_emits_hooked_json() -> Result<()> {
        let options = parse_cli_args(vec!["--owner", "NoSuchUser"])?;
        let mut session = Session::new(bundled_catalog()?);
        apply_initial_commands(&mut session, &options);

        let dump = dump_screen(&session)?;
        let json: serde_json::Value = serde_json::from_str(&dump)?;
        assert_eq!(json["title"], "Product Categories");
        assert_eq!(json["body"]["Empty"]["hook"], "NoMatchingMessage");
        assert_eq!(
            json["body"]["Empty"]["message"],
            "No products matching selected criteria"
        );
        Ok(())
    }
}
