mod commands;

use clap::{Parser, Subcommand, ValueEnum};

use dockbar_core::BarMode;

#[derive(Parser)]
#[command(name = "dockbar", version, about = "A dockable shell bar for Windows")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration file
    Init,
    /// Start the bar daemon
    Start,
    /// Stop the bar daemon
    Stop,
    /// Show whether the daemon is running and what each bar is doing
    Status,
    /// Briefly reveal auto-hidden bars
    Peek {
        /// How long to stay revealed, in milliseconds
        #[arg(long)]
        ms: Option<u64>,
    },
    /// Switch every bar to another mode
    Mode {
        #[arg(value_enum)]
        mode: ModeArg,
    },
    /// Turn the blur-behind effect on or off
    Blur {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Run the daemon (internal, not for direct use)
    #[command(hide = true)]
    Daemon,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Reserve the screen edge
    Docked,
    /// Slide off-screen until the pointer arrives
    Autohide,
    /// Stay on screen without reserving space
    Floating,
}

impl From<ModeArg> for BarMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Docked => BarMode::Docked,
            ModeArg::Autohide => BarMode::AutoHide,
            ModeArg::Floating => BarMode::Floating,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        command => run(command),
    }
}

#[cfg(windows)]
fn run(command: Commands) {
    use dockbar_core::Command;

    match command {
        Commands::Init => commands::init::execute(),
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::Peek { ms } => commands::send::execute(Command::Peek { ms }),
        Commands::Mode { mode } => commands::send::execute(Command::SetMode {
            mode: mode.into(),
        }),
        Commands::Blur { state } => commands::send::execute(Command::SetBlur {
            enabled: matches!(state, Toggle::On),
        }),
    }
}

#[cfg(not(windows))]
fn run(_command: Commands) {
    eprintln!("Error: dockbar bars only run on Windows.");
    std::process::exit(1);
}
