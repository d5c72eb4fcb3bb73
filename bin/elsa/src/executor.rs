use std::time::Duration;

use clap::ValueEnum;
use log::info;
use serde::{Deserialize, Serialize};
use str_derive::Str;
use tokio::time::sleep;

use crate::strip::{Outlet, PowerState, StripClient, StripSession};
use crate::Result;

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Str, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    On,
    Off,
    /// Power-cycle: off, wait, on.
    Reset,
}

/// Waits after power commands before the outlet state is trusted again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SettleIntervals {
    pub switch: Duration,
    pub reset_off: Duration,
    pub reset_on: Duration,
}

impl Default for SettleIntervals {
    fn default() -> Self {
        Self {
            switch: Duration::from_secs(1),
            reset_off: Duration::from_secs(2),
            reset_on: Duration::from_secs(1),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Report {
    /// The outlet already was in the requested state, nothing was sent.
    Unchanged(PowerState),
    /// Commands were sent; holds the state read back afterwards.
    Applied(PowerState),
}

pub struct Executor<'c, C> {
    client: &'c C,
    intervals: SettleIntervals,
}

impl<'c, C: StripClient> Executor<'c, C> {
    pub fn new(client: &'c C, intervals: SettleIntervals) -> Self {
        Self { client, intervals }
    }

    /// Drives `outlet` to the requested action on a fresh session. Any failed
    /// remote call aborts the run and leaves the outlet as the last successful
    /// command set it.
    pub async fn execute(&self, outlet: &Outlet, action: Action) -> Result<Report> {
        let mut session = self.client.connect(&outlet.address).await?;
        let current = session.get_power(&outlet.id).await?;

        let nickname = &outlet.nickname;

        match action {
            Action::On | Action::Off => {
                let desired = PowerState::from(action == Action::On);
                if current == desired {
                    info!("'{nickname}' is already {current}");
                    return Ok(Report::Unchanged(current));
                }

                info!("turning '{nickname}' {desired}");
                session.set_power(&outlet.id, desired).await?;
                sleep(self.intervals.switch).await;
            }
            Action::Reset => {
                info!("resetting '{nickname}' (currently {current})");

                session.set_power(&outlet.id, PowerState::Off).await?;
                sleep(self.intervals.reset_off).await;

                session.set_power(&outlet.id, PowerState::On).await?;
                sleep(self.intervals.reset_on).await;
            }
        }

        let state = session.get_power(&outlet.id).await?;
        info!("new state for '{nickname}': {state}");

        Ok(Report::Applied(state))
    }
}
