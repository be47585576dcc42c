//! Validation of primitive user inputs before they reach a command handler.

use crate::error::{PoolerError, Result};

/// The maximum lifetime allowed for a VM reservation, in hours.
pub const MAX_LIFETIME: u32 = 1440;

/// Returns true when `hours` lies strictly between zero and [`MAX_LIFETIME`].
pub fn lifetime_in_bounds(hours: i64) -> bool {
    0 < hours && hours < i64::from(MAX_LIFETIME)
}

/// Validate a lifetime given on the command line.
///
/// The value must be an integer number of hours with `0 < hours < MAX_LIFETIME`.
///
/// # Returns
/// * `Ok(hours)` if valid
/// * `Err(PoolerError::Validation)` stating the bound otherwise
pub fn validate_lifetime(raw: &str) -> Result<u32> {
    let out_of_bounds = || {
        PoolerError::Validation(format!(
            "The \"lifetime\" argument must be a value between \"0\" and \"{MAX_LIFETIME}\"!"
        ))
    };

    let hours: i64 = raw.trim().parse().map_err(|_| out_of_bounds())?;
    if !lifetime_in_bounds(hours) {
        return Err(out_of_bounds());
    }

    // In bounds, so it fits.
    Ok(hours as u32)
}
