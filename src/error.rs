//! Unified error type for nfcbadge.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.

use crate::nfc::NfcError;

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Boot
    /// Display or NFC frontend failed to initialize. Fatal - no recovery
    /// is attempted past boot.
    Init,

    // NFC
    /// The NFC frontend returned an error.
    Nfc(NfcError),

    // Menu
    /// Submenu push attempted with the back-stack at capacity. This is a
    /// menu-authoring error, never a runtime user-facing condition.
    StackOverflow,

    // UI / Display
    /// I²C transaction to the display failed.
    Display,

    // Generic
    /// Operation timed out.
    Timeout,
}

// Convenience conversions

impl From<NfcError> for Error {
    fn from(e: NfcError) -> Self {
        Error::Nfc(e)
    }
}
