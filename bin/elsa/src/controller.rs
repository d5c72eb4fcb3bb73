use std::io::Write;

use log::info;

use crate::executor::{Action, Executor, Report, SettleIntervals};
use crate::listing::Listing;
use crate::locator::locate;
use crate::registry::{Edit, FileOutcome, Registry};
use crate::scanner::Scanner;
use crate::strip::StripClient;
use crate::{Error, Result};

/// Operator-facing commands over a fleet of strips, writing their output to
/// the given sink.
pub struct Controller<'c, C> {
    client: &'c C,
    addresses: &'c [String],
    intervals: SettleIntervals,
}

impl<'c, C: StripClient> Controller<'c, C> {
    pub fn new(client: &'c C, addresses: &'c [String], intervals: SettleIntervals) -> Self {
        Self {
            client,
            addresses,
            intervals,
        }
    }

    pub async fn list(&self, out: &mut impl Write) -> Result<()> {
        let scans = Scanner::new(self.client).scan(self.addresses).await;
        write!(out, "{}", Listing(&scans))?;

        Ok(())
    }

    /// Finds `nickname` and applies `action` to it. An unknown nickname is
    /// reported to `out` and yields `None`; nothing is sent to any outlet then.
    pub async fn control(
        &self,
        nickname: &str,
        action: Action,
        out: &mut impl Write,
    ) -> Result<Option<Report>> {
        let scanner = Scanner::new(self.client);

        let outlet = match locate(&scanner, self.addresses, nickname).await {
            Ok(outlet) => outlet,
            Err(Error::NotFound(_)) => {
                writeln!(out, "No device with nickname '{nickname}' found on any known P300 IP.")?;
                writeln!(out, "Check your nickname spelling or rename it in the Tapo app.")?;
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        writeln!(out, "Found device '{}' on P300 at {}.", outlet.nickname, outlet.address)?;
        if action == Action::Reset {
            writeln!(out, "Resetting '{}' (off -> on)...", outlet.nickname)?;
        }

        let executor = Executor::new(self.client, self.intervals);
        let report = executor.execute(&outlet, action).await?;

        match report {
            Report::Unchanged(state) => writeln!(out, "'{}' is already {state}.", outlet.nickname)?,
            Report::Applied(state) => writeln!(out, "New state for '{}': {state}", outlet.nickname)?,
        }

        Ok(Some(report))
    }
}

/// Applies `edit` and reports every file: outcomes to `out`, failures to
/// `err`. Fails with the number of files that could not be written.
pub fn edit_registry(
    registry: &Registry,
    edit: Edit,
    address: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let variable = registry.variable();
    let mut updated = 0;
    let mut failed = 0;

    for report in registry.apply(edit, address)? {
        let path = report.path.display();

        match report.outcome {
            FileOutcome::Updated => {
                updated += 1;
                writeln!(out, "[{edit}] Updated {variable} in {path}")?;
            }
            FileOutcome::Unchanged => {
                writeln!(out, "[{edit}] No changes made to {variable} in {path}")?;
            }
            FileOutcome::Failed(error) => {
                failed += 1;
                writeln!(err, "[{edit}] Error updating {path}: {error}")?;
            }
        }
    }

    if updated > 0 {
        info!("{updated} file(s) updated");
        writeln!(out, "Open a new shell or source the updated file(s) to pick up the change.")?;
    }

    if failed > 0 {
        return Err(Error::Registry(failed));
    }

    Ok(())
}
