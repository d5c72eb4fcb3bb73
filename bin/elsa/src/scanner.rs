use log::debug;

use crate::error::StripError;
use crate::strip::{Outlet, OutletInfo, StripClient, StripSession};

/// Result of querying a single strip.
#[derive(Debug)]
pub struct StripScan {
    pub address: String,
    pub result: Result<Vec<Outlet>, StripError>,
}

pub struct Scanner<'c, C> {
    client: &'c C,
}

impl<'c, C: StripClient> Scanner<'c, C> {
    pub fn new(client: &'c C) -> Self {
        Self { client }
    }

    /// Queries every address in order. A failing strip is reported in its
    /// own `StripScan` and never stops the others from being queried; the
    /// caller decides how to surface it.
    pub async fn scan(&self, addresses: &[String]) -> Vec<StripScan> {
        let mut scans = Vec::with_capacity(addresses.len());

        for address in addresses {
            scans.push(self.scan_strip(address).await);
        }

        scans
    }

    pub async fn scan_strip(&self, address: &str) -> StripScan {
        debug!("scanning strip at {address}");

        let result = self
            .list_outlets(address)
            .await
            .map(|children| {
                children
                    .into_iter()
                    .map(|child| Outlet::new(address, child))
                    .collect::<Vec<_>>()
            });

        match &result {
            Ok(outlets) => debug!("{} outlets at {address}", outlets.len()),
            Err(err) => debug!("could not query P300 at {address}: {err}"),
        }

        StripScan {
            address: address.to_string(),
            result,
        }
    }

    async fn list_outlets(&self, address: &str) -> Result<Vec<OutletInfo>, StripError> {
        let mut session = self.client.connect(address).await?;
        session.list_children().await
    }
}
