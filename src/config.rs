//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and display
//! budgets live here so they can be tuned in one place.

// Display

/// OLED panel size in pixels.
pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;

/// I²C address of the SSD1306 panel.
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;

/// Character budget per text row (FONT_6X10 on a 128 px panel).
pub const TEXT_COLS: usize = 21;

/// Row budget for free-text screens (10 px row pitch on a 64 px panel).
pub const TEXT_ROWS: usize = 6;

// Menu

/// Menu items visible at once below the title bar.
pub const MENU_VISIBLE_ROWS: usize = 3;

/// Maximum submenu nesting the back-stack can hold.
pub const MENU_STACK_DEPTH: usize = 5;

// NFC

/// I²C address of the NFC frontend (PN7150-class NCI controller).
pub const NFC_I2C_ADDR: u8 = 0x28;

/// Upper bound on NDEF records kept from one read.
pub const MAX_NDEF_RECORDS: usize = 8;

/// Upper bound on a remote tag identifier (NFCID) in bytes.
pub const MAX_TAG_ID_LEN: usize = 10;

// Timing

/// Cooperative tick period for every polling loop (ms).
pub const TICK_MS: u64 = 10;

/// Cadence of the "Scanning..." dot animation (ms).
pub const SCAN_ANIM_PERIOD_MS: u64 = 500;

/// How long to wait for the radio's read-completion slot before treating
/// the read as "no message" (ms).
pub const NDEF_READ_WAIT_MS: u64 = 500;

/// Timed dismissal of a mode-configuration error screen (ms).
pub const MODE_ERROR_DISMISS_MS: u64 = 2000;

/// Dwell on the "Operation canceled" splash before returning (ms).
pub const CANCEL_SPLASH_MS: u64 = 1000;

/// Bounded scan window for tag detection; expiry shows "No tag detected".
pub const TAG_SCAN_WINDOW_MS: u64 = 30_000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   Button SELECT  → P0.24
//   Button BACK    → P0.25
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   NFC IRQ        → P0.04
//   NFC VEN        → P0.05

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;
