use log::{debug, warn};

use crate::scanner::Scanner;
use crate::strip::{Outlet, StripClient};
use crate::{Error, Result};

/// Finds the first outlet named exactly `nickname`, querying strips one at a
/// time in the given order and stopping at the first strip that has it.
/// Nicknames are not unique across strips, so the order decides which one
/// wins.
pub async fn locate<C: StripClient>(
    scanner: &Scanner<'_, C>,
    addresses: &[String],
    nickname: &str,
) -> Result<Outlet> {
    for address in addresses {
        let outlets = match scanner.scan_strip(address).await.result {
            Ok(outlets) => outlets,
            Err(err) => {
                warn!("skipping P300 at {address}: {err}");
                continue;
            }
        };

        if let Some(outlet) = outlets.into_iter().find(|o| o.nickname == nickname) {
            debug!("found '{nickname}' at {address} with id {}", outlet.id);
            return Ok(outlet);
        }
    }

    Err(Error::NotFound(nickname.to_string()))
}
