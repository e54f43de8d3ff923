mod cli;
mod cmd;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands, ConfigAction};
use std::process;
use tracing_subscriber::EnvFilter;

use weightlog::core::conflict::ConflictError;
use weightlog::core::store::StoreError;
use weightlog::core::validate::ValidationError;
use weightlog::output;

fn main() {
    let filter = EnvFilter::try_from_env("WEIGHTLOG_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let human = cli.human;
    let name = command_name(&cli.command);

    let result = match cli.command {
        Commands::Init => cmd::init::run(cli.unit, human),
        Commands::Add {
            weight,
            muscle,
            fat,
            visceral,
            date,
            image,
            yes,
            no,
        } => cmd::add::run(
            cmd::add::AddArgs {
                weight,
                muscle,
                fat,
                visceral,
                date,
                image,
                decision: cmd::add::preset_decision(yes, no),
            },
            cli.unit,
            human,
        ),
        Commands::Edit {
            id,
            weight,
            muscle,
            fat,
            visceral,
            date,
            image,
            clear_image,
        } => cmd::edit::run(
            &id,
            cmd::edit::EditArgs {
                weight,
                muscle,
                fat,
                visceral,
                date,
                image,
                clear_image,
            },
            cli.unit,
            human,
        ),
        Commands::Delete { ids } => cmd::delete::run(&ids, human),
        Commands::Latest => cmd::latest::run(cli.unit, human),
        Commands::History => cmd::history::run(cli.unit, human),
        Commands::Chart {
            as_weight,
            as_percent,
        } => cmd::chart::run(cli.unit, cmd::chart::mode_override(as_weight, as_percent), human),
        Commands::Image { id, out } => cmd::image::run(&id, out.as_deref(), human),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            let bin = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, bin, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        if human {
            eprintln!("{}", output::human::format_error(&e.to_string()));
        } else {
            let err = match e.downcast_ref::<ValidationError>() {
                Some(v) => output::validation_error(name, v),
                None => output::error(name, error_code(&e), &e.to_string()),
            };
            eprintln!("{}", err);
        }
        process::exit(1);
    }
}

fn error_code(e: &anyhow::Error) -> &'static str {
    if let Some(StoreError::NotFound(_)) = e.downcast_ref::<StoreError>() {
        return "not_found";
    }
    match e.downcast_ref::<ConflictError>() {
        Some(ConflictError::Store(StoreError::NotFound(_))) => "not_found",
        Some(_) => "conflict",
        None => "general_error",
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init => "init",
        Commands::Add { .. } => "add",
        Commands::Edit { .. } => "edit",
        Commands::Delete { .. } => "delete",
        Commands::Latest => "latest",
        Commands::History => "history",
        Commands::Chart { .. } => "chart",
        Commands::Image { .. } => "image",
        Commands::Config { .. } => "config",
        Commands::Completions { .. } => "completions",
    }
}
