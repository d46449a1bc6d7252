//! Process exit codes for the `attest` binary.

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 2; // Cache could not be opened or configured
