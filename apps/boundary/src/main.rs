use boundary::cli::{
    Cli, CliResult, Command, ScopeCommand, cmd_resolve, cmd_scope_get, cmd_scope_list,
    cmd_scope_put,
};
use boundary::config::ServerConfig;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> CliResult<()> {
    let output = match cli.command {
        Command::Serve(args) => {
            boundary::api::serve(ServerConfig::from(args)).await?;
            return Ok(());
        }
        Command::Resolve {
            systems,
            spaces,
            tenant,
            json,
        } => cmd_resolve(&systems, &spaces, &tenant, json)?,
        Command::Scope { action } => match action {
            ScopeCommand::Put {
                db,
                property,
                tenant,
                fields,
            } => cmd_scope_put(&db, &property, &tenant, &fields, boundary::now_millis())?,
            ScopeCommand::Get {
                db,
                property,
                tenant,
            } => cmd_scope_get(&db, &property, &tenant)?,
            ScopeCommand::List { db, property } => cmd_scope_list(&db, &property)?,
        },
    };

    println!("{output}");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
