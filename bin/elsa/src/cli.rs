use std::path::PathBuf;

use clap::Parser;

use crate::executor::Action;

/// Control Tapo P300 strip outlets by nickname, list them, or manage the
/// strip addresses kept in your shell startup files.
#[derive(Parser, Debug)]
#[command(name = "elsa", version)]
pub struct Cli {
    /// List all outlets across all configured strips and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Add a strip address to TAPO_P300_IPS in the startup files, then exit.
    #[arg(short, long, value_name = "NEW_IP")]
    pub add: Option<String>,

    /// Remove a strip address from TAPO_P300_IPS in the startup files, then exit.
    #[arg(short, long, value_name = "OLD_IP")]
    pub remove: Option<String>,

    /// Startup files holding TAPO_P300_IPS [default: ~/.bashrc].
    #[arg(long = "rc-file", value_name = "PATH", env = "TAPO_RC_FILES", value_delimiter = ',')]
    pub rc_files: Vec<PathBuf>,

    /// Nickname of the outlet, as set in the Tapo app.
    pub nickname: Option<String>,

    /// What to do with the outlet.
    #[arg(value_enum)]
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Add(String),
    Remove(String),
    List,
    Control { nickname: String, action: Action },
    Help,
}

impl Cli {
    /// Registry edits win over everything else, then listing, then control.
    pub fn mode(&self) -> Mode {
        if let Some(address) = &self.add {
            return Mode::Add(address.clone());
        }

        if let Some(address) = &self.remove {
            return Mode::Remove(address.clone());
        }

        if self.list {
            return Mode::List;
        }

        match (&self.nickname, self.action) {
            (Some(nickname), Some(action)) => Mode::Control {
                nickname: nickname.clone(),
                action,
            },
            _ => Mode::Help,
        }
    }
}
