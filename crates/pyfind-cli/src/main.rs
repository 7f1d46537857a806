use atty::Stream;
use clap::Parser;
use color_eyre::Result;
use pyfind_core::{CommandContext, ExecutionOutcome, ExplainRequest, FindRequest, NamesRequest};
use serde_json::json;

mod cli;
mod style;

use cli::{CommandGroupCli, PyfindCli};
use style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = PyfindCli::parse();
    init_tracing(cli.trace, cli.verbose);

    let ctx = CommandContext::new();
    let (name, result) = dispatch(&ctx, &cli);
    let outcome = into_outcome(result);
    let code = emit_output(&cli, name, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn dispatch(
    ctx: &CommandContext,
    cli: &PyfindCli,
) -> (&'static str, anyhow::Result<ExecutionOutcome>) {
    let python = cli.target.python.clone();
    match cli.command.as_ref().unwrap_or(&CommandGroupCli::Find) {
        CommandGroupCli::Find => {
            let request = FindRequest { python };
            ("find", pyfind_core::find_interpreter(ctx, &request))
        }
        CommandGroupCli::Explain => {
            let request = ExplainRequest { python };
            ("explain", pyfind_core::explain_interpreter(ctx, &request))
        }
        CommandGroupCli::Names => {
            let request = NamesRequest { python };
            ("names", pyfind_core::interpreter_names(ctx, &request))
        }
    }
}

// internal errors still get an envelope so `--json` callers can parse them
fn into_outcome(result: anyhow::Result<ExecutionOutcome>) -> ExecutionOutcome {
    result.unwrap_or_else(|err| {
        tracing::debug!(error = ?err, "command failed");
        ExecutionOutcome::failure(format!("{err:#}"), json!({}))
    })
}

fn init_tracing(trace: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("pyfind={level},pyfind_core={level},pyfind_domain={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn emit_output(cli: &PyfindCli, command: &str, outcome: &ExecutionOutcome) -> Result<i32> {
    let code = outcome.exit_code();
    let style = Style::new(cli.no_color, atty::is(Stream::Stdout));

    if cli.json {
        let payload = pyfind_core::to_json_response(command, outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else if !cli.quiet {
        println!("{}", style.status(&outcome.status, &outcome.message));
        if let Some(hint) = outcome.hint() {
            println!("{}", style.info(&format!("Hint: {hint}")));
        }
    } else if code != 0 {
        eprintln!("{}", outcome.message);
    }

    Ok(code)
}
