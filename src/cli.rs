use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Command {
    Feed,
    Clean,
}

#[derive(Parser, Debug, Default)]
#[command(
    about = concat!(env!("CARGO_CRATE_NAME"), " - artist social feed"),
    disable_help_flag = true
)]
pub struct Flags {
    /// what to do (defaults to showing the feed)
    #[arg(default_value = None)]
    pub command: Option<Command>,
}

impl Flags {
    /// Parse from `std::env::args_os()`, exit on error.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Check if the command is "feed" (the default)
    pub fn feed(&self) -> bool {
        matches!(self.command, Some(Command::Feed) | None)
    }

    /// Check if the command is "clean"
    pub fn clean(&self) -> bool {
        matches!(self.command, Some(Command::Clean))
    }
}
