use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use str_derive::Str;

use crate::config::parse_addresses;
use crate::error::ConfigError;
use crate::Result;

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Str, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Edit {
    Add,
    Remove,
}

#[derive(Debug)]
pub enum FileOutcome {
    Updated,
    Unchanged,
    Failed(io::Error),
}

#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Keeps `export <VARIABLE>="a,b,..."` up to date in a set of shell files.
pub struct Registry {
    variable: String,
    paths: Vec<PathBuf>,
}

impl Registry {
    pub fn new(variable: impl Into<String>, paths: Vec<PathBuf>) -> Self {
        Self {
            variable: variable.into(),
            paths,
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Applies `edit` to every file independently; a failing file does not
    /// stop the rest. Files are only written when their list changes.
    pub fn apply(&self, edit: Edit, address: &str) -> Result<Vec<FileReport>> {
        let address = address.trim();
        if address.is_empty() {
            return Err(ConfigError::EmptyAddress.into());
        }

        let reports = self
            .paths
            .iter()
            .map(|path| {
                let outcome = match self.update_file(path, edit, address) {
                    Ok(true) => FileOutcome::Updated,
                    Ok(false) => FileOutcome::Unchanged,
                    Err(err) => FileOutcome::Failed(err),
                };

                FileReport {
                    path: path.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(reports)
    }

    fn update_file(&self, path: &Path, edit: Edit, address: &str) -> io::Result<bool> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err),
        };

        match rewrite(&contents, &self.variable, edit, address) {
            Some(updated) => {
                debug!("writing {}", path.display());
                fs::write(path, updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Returns the new file contents, or `None` when the list already is in the
/// desired state. Only the first `export` line of the variable is considered.
fn rewrite(contents: &str, variable: &str, edit: Edit, address: &str) -> Option<String> {
    let prefix = format!("export {variable}=");

    let mut lines = contents.split_inclusive('\n').collect::<Vec<_>>();
    let position = lines
        .iter()
        .position(|line| line.trim().starts_with(&prefix));

    let mut addresses = match position {
        Some(index) => parse_line(lines[index], &prefix),
        None => Vec::new(),
    };

    match edit {
        Edit::Add if !addresses.iter().any(|a| a == address) => {
            addresses.push(address.to_string());
        }
        Edit::Remove => {
            let index = addresses.iter().position(|a| a == address)?;
            addresses.remove(index);
        }
        Edit::Add => return None,
    }

    let ending = match position {
        Some(index) => line_ending(lines[index]),
        None if lines.first().is_some_and(|first| first.ends_with("\r\n")) => "\r\n",
        None => "\n",
    };
    let line = format!("{prefix}\"{}\"{ending}", addresses.join(","));

    match position {
        Some(index) => lines[index] = &line,
        None => {
            if lines.last().is_some_and(|last| !last.ends_with('\n')) {
                lines.push(ending);
            }
            lines.push(&line);
        }
    }

    Some(lines.concat())
}

fn line_ending(line: &str) -> &'static str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

fn parse_line(line: &str, prefix: &str) -> Vec<String> {
    let value = line.trim().strip_prefix(prefix).unwrap_or_default().trim();
    let value = value
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or(value);

    parse_addresses(value)
}
