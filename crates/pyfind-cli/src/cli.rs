use clap::{ArgAction, Args, Parser, Subcommand};

pub const PYFIND_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nOptions:\n{options}\n";

pub const PYFIND_BEFORE_HELP: &str = concat!(
    "pyfind ",
    env!("CARGO_PKG_VERSION"),
    " – locate a Python interpreter for a new environment\n\n",
    "\x1b[1;36mCommands\x1b[0m\n",
    "  find             Resolve --python to one interpreter (default command).\n",
    "  explain          Show every candidate tried, in order, and why it was rejected.\n",
    "  names            Show how --python parses and the names searched on PATH.\n\n",
    "\x1b[1;36mRequests\x1b[0m\n",
    "  3, 3.11, 3.11.2  any implementation with that version prefix\n",
    "  pypy3, python3.12-64\n",
    "                   implementation, version, and architecture\n",
    "  /abs/path/python exactly that interpreter\n",
);

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = PYFIND_BEFORE_HELP,
    help_template = PYFIND_HELP_TEMPLATE
)]
#[allow(clippy::struct_excessive_bools)]
pub struct PyfindCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging (-vv reaches trace)",
        global = true
    )]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[command(flatten)]
    pub target: TargetArgs,
    #[command(subcommand)]
    pub command: Option<CommandGroupCli>,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(
        about = "Resolve the requested interpreter and print it.",
        override_usage = "pyfind find [-p SPEC]"
    )]
    Find,
    #[command(
        about = "List candidates in search order with accept/reject reasons.",
        override_usage = "pyfind explain [-p SPEC]"
    )]
    Explain,
    #[command(
        about = "Print the parsed request and the names searched on PATH.",
        override_usage = "pyfind names [-p SPEC]"
    )]
    Names,
}

#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    #[arg(
        short = 'p',
        long = "python",
        value_name = "SPEC",
        help = "Interpreter request: an absolute path, or e.g. 3.11, pypy3 (default: host python)",
        global = true
    )]
    pub python: Option<String>,
}
