use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::{CommandContext, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", error_json(&e));
            } else {
                eprintln!("{}", e.render());
            }
            error_exit_code(&e)
        }
    }
}

fn run(cli: &Cli) -> commands::Result<()> {
    let ctx = CommandContext::from_cli(cli);

    match &cli.command {
        Some(Commands::Query {
            expr,
            sort,
            reverse,
            limit,
            explain,
        }) => {
            let opts = commands::query::QueryOptions {
                expr: expr.clone(),
                sort: *sort,
                reverse: *reverse,
                limit: *limit,
                explain: *explain,
            };
            commands::query::execute(&ctx, &opts)
        }
        Some(Commands::List {
            all,
            area,
            status,
            priority,
            project,
            overdue,
            soon,
            search,
            sort,
            reverse,
            limit,
        }) => {
            let opts = commands::list::ListOptions {
                all: *all,
                area: area.clone(),
                status: status.clone(),
                priority: priority.clone(),
                project: project.clone(),
                overdue: *overdue,
                soon: *soon,
                search: search.clone(),
                sort: *sort,
                reverse: *reverse,
                limit: *limit,
            };
            commands::list::execute(&ctx, &opts)
        }
        Some(Commands::Projects {
            all,
            area,
            status,
            priority,
            search,
            sort,
            reverse,
        }) => {
            let opts = commands::projects::ProjectsOptions {
                all: *all,
                area: area.clone(),
                status: status.clone(),
                priority: priority.clone(),
                search: search.clone(),
                sort: *sort,
                reverse: *reverse,
            };
            commands::projects::execute(&ctx, &opts)
        }
        Some(Commands::Fields) => commands::fields::execute(&ctx),
        Some(Commands::Config { command }) => match command {
            None | Some(ConfigCommands::Show) => commands::config::execute_show(&ctx),
            Some(ConfigCommands::Path) => commands::config::execute_path(&ctx),
            Some(ConfigCommands::Set { key, value }) => {
                let opts = commands::config::ConfigSetOptions {
                    key: key.clone(),
                    value: value.clone(),
                };
                commands::config::execute_set(&ctx, &opts)
            }
        },
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell).map_err(CommandError::from)
        }
        None => {
            use clap::CommandFactory;
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Builds the JSON error body printed with `--json`.
fn error_json(e: &CommandError) -> String {
    let mut body = serde_json::json!({
        "error": {
            "code": error_code(e),
            "message": e.to_string(),
        }
    });
    if let CommandError::Query { source, .. } = e {
        if let Some(position) = source.position() {
            body["error"]["position"] = serde_json::json!(position);
        }
    }
    serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string())
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Query { .. } => "QUERY_ERROR",
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the exit code for an error.
fn error_exit_code(e: &CommandError) -> ExitCode {
    ExitCode::from(exit_status(e))
}

fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Query { .. } => 1,
        CommandError::Store(_) => 3,
        CommandError::Config(_) => 5,
        CommandError::Io(_) => 3,
        CommandError::Json(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use atask_query::parse;
    use atask_store::StoreError;

    fn query_error(query: &str) -> CommandError {
        CommandError::query(parse(query).unwrap_err(), query)
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(error_code(&query_error("status:")), "QUERY_ERROR");
        assert_eq!(
            error_code(&CommandError::Config("x".to_string())),
            "CONFIG_ERROR"
        );
        let missing = StoreError::DirectoryNotFound {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(error_code(&CommandError::Store(missing)), "STORE_ERROR");
    }

    #[test]
    fn test_exit_statuses() {
        assert_eq!(exit_status(&query_error("(status:open")), 1);
        assert_eq!(exit_status(&CommandError::Config("x".to_string())), 5);
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(exit_status(&CommandError::Io(io)), 3);
        let missing = StoreError::DirectoryNotFound {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(exit_status(&CommandError::Store(missing)), 3);
    }

    #[test]
    fn test_error_json_includes_position() {
        let json: serde_json::Value =
            serde_json::from_str(&error_json(&query_error("status:open AND"))).unwrap();
        assert_eq!(json["error"]["code"], "QUERY_ERROR");
        assert_eq!(json["error"]["position"], 15);
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("query error: "));
    }

    #[test]
    fn test_error_json_without_position() {
        let err = CommandError::Config("missing".to_string());
        let json: serde_json::Value = serde_json::from_str(&error_json(&err)).unwrap();
        assert_eq!(json["error"]["code"], "CONFIG_ERROR");
        assert!(json["error"].get("position").is_none());
    }
}
