#![forbid(unsafe_code)]

mod author;
mod cmd;
mod output;
mod tui;

use std::env;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use output::{CliError, OutputMode};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hd: browse, search, and file support tickets",
    long_about = None
)]
struct Cli {
    /// Emit JSON output (shorthand for `--format json`).
    #[arg(long, global = true)]
    json: bool,

    /// Output format. Defaults to `pretty` on a terminal and `text` otherwise.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Initialize a helpdesk project",
        long_about = "Create .helpdesk/ with a default config and an empty ticket store.",
        after_help = "EXAMPLES:\n    # Initialize in the current directory\n    hd init\n\n    # Rewrite the config, keeping tickets\n    hd init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Tickets",
        about = "File a new ticket",
        long_about = "Create a ticket in the project store. Title and description are required.",
        after_help = "EXAMPLES:\n    # File a ticket\n    hd create --title \"VPN drops\" --description \"Every hour since Monday\"\n\n    # With priority and category\n    hd create -t \"Printer jam\" -d \"Floor 3\" --priority high --category Hardware"
    )]
    Create(cmd::create::CreateArgs),

    #[command(
        next_help_heading = "Tickets",
        about = "List tickets",
        long_about = "List tickets with an optional search, status filter, and sort column.\nEach --sort works like a header click: the same column twice flips direction.",
        after_help = "EXAMPLES:\n    # Everything, in original order\n    hd list\n\n    # Open tickets mentioning login\n    hd list --status open --search login\n\n    # Highest priority first\n    hd list --sort priority --sort priority\n\n    # Emit machine-readable output\n    hd list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Tickets",
        about = "Show one ticket",
        long_about = "Show full details for a single ticket by ID.",
        after_help = "EXAMPLES:\n    # Show a ticket\n    hd show TK-003\n\n    # Emit machine-readable output\n    hd show TK-003 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Tickets",
        about = "Count tickets per status",
        long_about = "Show the four status tiles: all, open, in progress, and closed.",
        after_help = "EXAMPLES:\n    # Tile counts\n    hd stats\n\n    # Against the project store\n    hd stats --source store"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Browse tickets in a terminal UI",
        long_about = "Full-screen ticket list with stat tiles, live search, and sortable columns.",
        after_help = "EXAMPLES:\n    # Browse the sample tickets\n    hd tui\n\n    # Browse the project store\n    hd tui --source store"
    )]
    Tui(cmd::tui::TuiArgs),

    #[command(
        next_help_heading = "Interactive",
        about = "Chat with support",
        long_about = "Line-based chat with the support desk. `/attach PATH` stages a file, `/quit` leaves.",
        after_help = "EXAMPLES:\n    # Start a chat\n    hd chat\n\n    # Send a screenshot with the first message\n    hd chat --attach screenshot.png"
    )]
    Chat(cmd::chat::ChatArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Bash\n    hd completions bash > ~/.local/share/bash-completion/completions/hd\n\n    # Zsh\n    hd completions zsh > ~/.zfunc/_hd"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

impl Cli {
    fn output_mode(&self, user_pref: Option<&str>) -> OutputMode {
        output::resolve_output_mode(self.format, self.json, user_pref)
    }
}

/// Logs go to stderr so stdout stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("HELPDESK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "hd=debug,helpdesk_core=debug,info"
        } else {
            "hd=info,helpdesk_core=info,warn"
        })
    });

    let format = env::var("HELPDESK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: Cli, output: OutputMode) -> anyhow::Result<()> {
    let project_root = env::current_dir()?;

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
        Commands::Create(ref args) => cmd::create::run_create(args, output, &project_root),
        Commands::List(ref args) => cmd::list::run_list(args, output, &project_root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &project_root),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output, &project_root),
        Commands::Tui(ref args) => cmd::tui::run_tui(args, &project_root),
        Commands::Chat(ref args) => cmd::chat::run_chat(args, output, &project_root),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let user_config = helpdesk_core::config::load_user_config().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "ignoring unreadable user config");
        helpdesk_core::config::UserConfig::default()
    });
    let output = cli.output_mode(user_config.output.as_deref());

    match run(cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            if output::render_error(output, &CliError::from_anyhow(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}
