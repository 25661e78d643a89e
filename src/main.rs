//! code-nav - Direct CLI for the JetBrains Serena plugin
//!
//! Code navigation and refactoring through the IDE's own index, over the
//! plugin's local HTTP API.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use code_nav::app::App;
use code_nav::cli::output::diagnostic_line;
use code_nav::cli::{Cli, Commands, ParseError};
use code_nav::dispatch;
use code_nav::error::{CodeNavError, EXIT_ERROR, EXIT_SUCCESS};
use code_nav::services::{ConfigService, DefaultConfigService};

fn main() {
    let cli = match Cli::parse_args(std::env::args_os()) {
        Ok(cli) => cli,
        Err(ParseError::Display(e)) => e.exit(),
        Err(ParseError::Usage(e)) => fail(&anyhow::Error::from(CodeNavError::from(e))),
    };

    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => fail(&e),
    }
}

fn init_tracing(verbose: bool) {
    // Quiet by default so stderr stays clean for agents.
    // RUST_LOG=code_nav=debug (or -v) for request tracing.
    let default_filter = if verbose {
        "code_nav=debug"
    } else {
        "code_nav=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let root = std::env::current_dir().context("Failed to determine working directory")?;
    let config = DefaultConfigService::new(&root)
        .load()
        .map_err(CodeNavError::from)
        .context("Failed to load configuration")?;
    let config = cli.apply_overrides(config);

    let app = App::new(&config)?;
    let rendered = execute(&cli.command, &app)?;
    app.output()
        .print(&rendered)
        .map_err(CodeNavError::from)
        .context("Failed to write output")?;
    Ok(())
}

/// Run `command`, naming it in any failure that got past argument checks
fn execute(command: &Commands, app: &App) -> anyhow::Result<Vec<u8>> {
    dispatch::execute(command, app).map_err(|e| match e {
        CodeNavError::Usage(_) => anyhow::Error::from(e),
        other => anyhow::Error::from(other).context(format!("{} failed", command.name())),
    })
}

/// Exit status and the one-line stderr message for `err`
fn report(err: &anyhow::Error) -> (i32, String) {
    let code = err
        .chain()
        .find_map(|e| e.downcast_ref::<CodeNavError>())
        .map_or(EXIT_ERROR, CodeNavError::exit_code);

    (code, format!("Error: {}", diagnostic_line(&format!("{err:#}"))))
}

fn fail(err: &anyhow::Error) -> ! {
    let (code, line) = report(err);
    eprintln!("{line}");
    std::process::exit(code);
}
