use std::fmt;

use crate::scanner::StripScan;

/// Operator view of a fleet scan, one block per strip in scan order.
pub struct Listing<'s>(pub &'s [StripScan]);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scan in self.0 {
            writeln!(f, "\n=== P300 at {} ===", scan.address)?;

            let outlets = match &scan.result {
                Ok(outlets) => outlets,
                Err(err) => {
                    writeln!(f, "  Warning: Could not connect to P300 at {} - {err}", scan.address)?;
                    continue;
                }
            };

            if outlets.is_empty() {
                writeln!(f, "  No child devices found.")?;
                continue;
            }

            for outlet in outlets {
                writeln!(f, "  - Nickname: {}", outlet.nickname)?;
                writeln!(f, "    Device ID: {}", outlet.id)?;
                writeln!(f, "    State: {}\n", outlet.state)?;
            }
        }

        Ok(())
    }
}
