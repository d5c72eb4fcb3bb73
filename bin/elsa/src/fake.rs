//! In-memory strip fleet used by the unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::error::StripError;
use crate::strip::{OutletInfo, PowerState, StripClient, StripSession};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Connect(String),
    List(String),
    Get(String, String),
    Set(String, String, PowerState),
}

#[derive(Clone, Default)]
pub struct FakeFleet {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    strips: HashMap<String, FakeStrip>,
    calls: Vec<Call>,
    set_times: Vec<Instant>,
    open_sessions: usize,
}

#[derive(Default)]
struct FakeStrip {
    unreachable: bool,
    failing_queries: bool,
    failing_commands: bool,
    ignoring_commands: bool,
    outlets: Vec<OutletInfo>,
}

pub struct FakeSession {
    fleet: FakeFleet,
    address: String,
}

impl FakeFleet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strip(self, address: &str, outlets: &[(&str, &str, PowerState)]) -> Self {
        let outlets = outlets
            .iter()
            .map(|(id, nickname, state)| OutletInfo {
                id: id.to_string(),
                nickname: nickname.to_string(),
                state: *state,
            })
            .collect();

        self.lock().strips.insert(
            address.to_string(),
            FakeStrip {
                outlets,
                ..Default::default()
            },
        );
        self
    }

    pub fn with_unreachable(self, address: &str) -> Self {
        self.lock().strips.insert(
            address.to_string(),
            FakeStrip {
                unreachable: true,
                ..Default::default()
            },
        );
        self
    }

    pub fn failing_queries(self, address: &str) -> Self {
        self.strip(address, |strip| strip.failing_queries = true);
        self
    }

    pub fn failing_commands(self, address: &str) -> Self {
        self.strip(address, |strip| strip.failing_commands = true);
        self
    }

    /// Commands succeed but the outlet keeps its state.
    pub fn ignoring_commands(self, address: &str) -> Self {
        self.strip(address, |strip| strip.ignoring_commands = true);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    pub fn set_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Set(..)))
            .collect()
    }

    pub fn set_times(&self) -> Vec<Instant> {
        self.lock().set_times.clone()
    }

    pub fn open_sessions(&self) -> usize {
        self.lock().open_sessions
    }

    pub fn state(&self, address: &str, id: &str) -> Option<PowerState> {
        self.lock()
            .strips
            .get(address)?
            .outlets
            .iter()
            .find(|outlet| outlet.id == id)
            .map(|outlet| outlet.state)
    }

    fn strip(&self, address: &str, update: impl FnOnce(&mut FakeStrip)) {
        let mut inner = self.lock();
        update(inner.strips.entry(address.to_string()).or_default());
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

#[async_trait]
impl StripClient for FakeFleet {
    type Session = FakeSession;

    async fn connect(&self, address: &str) -> Result<FakeSession, StripError> {
        let mut inner = self.lock();
        inner.calls.push(Call::Connect(address.to_string()));

        let reachable = inner
            .strips
            .get(address)
            .is_some_and(|strip| !strip.unreachable);

        if !reachable {
            return Err(StripError::Connection(
                format!("connection refused by {address}").into(),
            ));
        }

        inner.open_sessions += 1;

        Ok(FakeSession {
            fleet: self.clone(),
            address: address.to_string(),
        })
    }
}

#[async_trait]
impl StripSession for FakeSession {
    async fn list_children(&mut self) -> Result<Vec<OutletInfo>, StripError> {
        let mut inner = self.fleet.lock();
        inner.calls.push(Call::List(self.address.clone()));

        let strip = &inner.strips[&self.address];
        if strip.failing_queries {
            return Err(StripError::Query("malformed response".into()));
        }

        Ok(strip.outlets.clone())
    }

    async fn get_power(&mut self, id: &str) -> Result<PowerState, StripError> {
        let mut inner = self.fleet.lock();
        inner
            .calls
            .push(Call::Get(self.address.clone(), id.to_string()));

        let strip = &inner.strips[&self.address];
        if strip.failing_queries {
            return Err(StripError::Query("malformed response".into()));
        }

        strip
            .outlets
            .iter()
            .find(|outlet| outlet.id == id)
            .map(|outlet| outlet.state)
            .ok_or_else(|| StripError::Query(format!("unknown outlet {id}").into()))
    }

    async fn set_power(&mut self, id: &str, state: PowerState) -> Result<(), StripError> {
        let mut inner = self.fleet.lock();
        inner
            .calls
            .push(Call::Set(self.address.clone(), id.to_string(), state));
        inner.set_times.push(Instant::now());

        let strip = inner
            .strips
            .get_mut(&self.address)
            .ok_or_else(|| StripError::Command("unknown strip".into()))?;

        if strip.failing_commands {
            return Err(StripError::Command("device returned error code -1".into()));
        }

        if !strip.ignoring_commands {
            let outlet = strip
                .outlets
                .iter_mut()
                .find(|outlet| outlet.id == id)
                .ok_or_else(|| StripError::Command(format!("unknown outlet {id}").into()))?;
            outlet.state = state;
        }

        Ok(())
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.fleet.lock().open_sessions -= 1;
    }
}
