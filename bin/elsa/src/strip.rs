use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use str_derive::Str;

use crate::error::StripError;

#[derive(Copy, Clone, Debug, Deserialize, Serialize, Str, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    pub fn is_on(self) -> bool {
        matches!(self, PowerState::On)
    }
}

impl From<bool> for PowerState {
    fn from(is_on: bool) -> Self {
        if is_on {
            PowerState::On
        } else {
            PowerState::Off
        }
    }
}

/// One child outlet as listed by its strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutletInfo {
    pub id: String,
    pub nickname: String,
    pub state: PowerState,
}

/// A snapshot of an outlet together with the strip it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outlet {
    pub address: String,
    pub id: String,
    pub nickname: String,
    pub state: PowerState,
}

impl Outlet {
    pub fn new(address: &str, info: OutletInfo) -> Self {
        Self {
            address: address.to_string(),
            id: info.id,
            nickname: info.nickname,
            state: info.state,
        }
    }
}

#[async_trait]
pub trait StripClient: Send + Sync {
    type Session: StripSession;

    async fn connect(&self, address: &str) -> Result<Self::Session, StripError>;
}

/// An open session with one strip. Dropping it releases the session.
#[async_trait]
pub trait StripSession: Send {
    async fn list_children(&mut self) -> Result<Vec<OutletInfo>, StripError>;
    async fn get_power(&mut self, id: &str) -> Result<PowerState, StripError>;
    async fn set_power(&mut self, id: &str, state: PowerState) -> Result<(), StripError>;
}

#[async_trait]
impl StripClient for tapo::Client {
    type Session = tapo::Session;

    async fn connect(&self, address: &str) -> Result<tapo::Session, StripError> {
        tapo::Client::connect(self, address)
            .await
            .map_err(|err| StripError::Connection(err.into()))
    }
}

#[async_trait]
impl StripSession for tapo::Session {
    async fn list_children(&mut self) -> Result<Vec<OutletInfo>, StripError> {
        let children = self.get_child_device_list().await.map_err(|err| {
            if err.is_connect() {
                StripError::Connection(err.into())
            } else {
                StripError::Query(err.into())
            }
        })?;

        let outlets = children
            .into_iter()
            .map(|child| OutletInfo {
                id: child.device_id,
                nickname: child.nickname,
                state: child.device_on.into(),
            })
            .collect();

        Ok(outlets)
    }

    async fn get_power(&mut self, id: &str) -> Result<PowerState, StripError> {
        self.get_device_on(id)
            .await
            .map(PowerState::from)
            .map_err(|err| StripError::Query(err.into()))
    }

    async fn set_power(&mut self, id: &str, state: PowerState) -> Result<(), StripError> {
        self.set_device_on(id, state.is_on())
            .await
            .map_err(|err| StripError::Command(err.into()))
    }
}
