//! NFC subsystem - radio capability contract + the badge's workflows.
//!
//! The badge talks to a PN7150-class NCI frontend. The protocol stack
//! itself (discovery, anti-collision, frame exchange, NDEF decoding) is a
//! collaborator behind the [`NfcRadio`] trait; this module defines that
//! contract plus the tag metadata types and formatting helpers, and the
//! submodules implement the user-facing workflows:
//!
//! 1. **Detect Tags** - reader/writer mode, poll for a tag, show its
//!    protocol/technology/identifier.
//! 2. **Detect Readers** - card emulation mode, wait for an external
//!    reader field and run the emulation transaction.
//! 3. **NDEF Read** - reader/writer mode, read an NDEF message and page
//!    through its records.

pub mod detect_readers;
pub mod detect_tags;
pub mod ndef;
pub mod ndef_read;

use core::fmt::Write as _;

use heapless::{String, Vec};

use crate::config::MAX_TAG_ID_LEN;
use crate::nfc::ndef::NdefRecord;

/// Errors reported by the NFC frontend (kept `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NfcError {
    /// Discovery mode switch (reader/writer or emulation) was rejected.
    Mode,
    /// I²C transaction with the frontend failed.
    Bus,
    /// The frontend stopped answering.
    Timeout,
}

/// RF protocol of an activated remote tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TagProtocol {
    T1T,
    T2T,
    T3T,
    IsoDep,
    Mifare,
    Iso15693,
    Undetermined,
}

impl TagProtocol {
    /// Protocols the NDEF read workflow accepts.
    pub fn supports_ndef(self) -> bool {
        matches!(
            self,
            TagProtocol::T1T
                | TagProtocol::T2T
                | TagProtocol::T3T
                | TagProtocol::IsoDep
                | TagProtocol::Mifare
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            TagProtocol::T1T => "T1T",
            TagProtocol::T2T => "T2T",
            TagProtocol::T3T => "T3T",
            TagProtocol::IsoDep => "ISO-DEP",
            TagProtocol::Mifare => "MIFARE",
            TagProtocol::Iso15693 => "ISO15693",
            TagProtocol::Undetermined => "Unknown",
        }
    }
}

/// Radio modulation technology of an activated remote tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TagTech {
    NfcA,
    NfcB,
    NfcF,
    NfcV,
    Unknown,
}

impl TagTech {
    pub fn label(self) -> &'static str {
        match self {
            TagTech::NfcA => "NFC-A",
            TagTech::NfcB => "NFC-B",
            TagTech::NfcF => "NFC-F",
            TagTech::NfcV => "NFC-V",
            TagTech::Unknown => "Unknown",
        }
    }
}

/// Metadata of the currently activated remote tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTag {
    pub protocol: TagProtocol,
    pub tech: TagTech,
    pub id: Vec<u8, MAX_TAG_ID_LEN>,
}

impl RemoteTag {
    pub fn new(protocol: TagProtocol, tech: TagTech, id: &[u8]) -> Self {
        let mut v: Vec<u8, MAX_TAG_ID_LEN> = Vec::new();
        let _ = v.extend_from_slice(&id[..id.len().min(MAX_TAG_ID_LEN)]);
        RemoteTag {
            protocol,
            tech,
            id: v,
        }
    }
}

/// A decoded NDEF message: yields one record per call until the empty
/// sentinel. Finite, and not restartable without re-reading the tag.
pub trait NdefMessage {
    fn next_record(&mut self) -> NdefRecord;
}

/// The NFC frontend capability the workflows drive.
///
/// The asynchronous `readNdefMessage` completion callback of the hardware
/// stack is modeled as a result slot: `start_ndef_read` arms the read and
/// `take_ndef_message` drains the slot once the stack has delivered.
pub trait NfcRadio {
    type Message: NdefMessage;

    /// Return the frontend to idle discovery. Called on every workflow
    /// entry and on every exit path, whatever the outcome.
    fn reset(&mut self);

    fn set_reader_writer_mode(&mut self) -> Result<(), NfcError>;
    fn set_emulation_mode(&mut self) -> Result<(), NfcError>;

    /// Poll: has a remote tag been activated?
    fn is_tag_detected(&mut self) -> bool;

    /// Poll: has an external reader field been seen (emulation mode)?
    fn is_reader_detected(&mut self) -> bool;

    /// Metadata of the activated tag. Only meaningful after
    /// `is_tag_detected` returned true.
    fn remote_tag(&self) -> RemoteTag;

    /// More tags in the field beyond the activated one?
    fn has_more_tags(&self) -> bool;

    /// Activate the next tag in the field; false when activation fails.
    fn activate_next_tag(&mut self) -> bool;

    /// Block until the activated tag leaves the field. Prevents the same
    /// physical tag from re-triggering detection.
    fn wait_for_tag_removal(&mut self);

    /// Arm an asynchronous NDEF read on the activated tag.
    fn start_ndef_read(&mut self);

    /// Drain the read-completion slot, if the stack has delivered.
    fn take_ndef_message(&mut self) -> Option<Self::Message>;

    /// Run one card-emulation transaction against the detected reader and
    /// close the communication afterwards.
    fn run_card_emulation(&mut self);
}

/// Append `bytes` as space-separated hex pairs, or "none" when empty.
pub fn push_hex<const N: usize>(out: &mut String<N>, bytes: &[u8]) {
    if bytes.is_empty() {
        let _ = out.push_str("none");
        return;
    }
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            let _ = out.push(' ');
        }
        let _ = write!(out, "{:02X}", b);
    }
}

/// Format the activated tag (walking every tag in the field) into display
/// text for the layout engine: one `Tag:`/`Tech:`/`ID:` block per tag.
pub fn format_tag_info<R: NfcRadio>(radio: &mut R) -> String<192> {
    let mut info: String<192> = String::new();

    loop {
        let tag = radio.remote_tag();
        let _ = write!(info, "Tag: {}\n", tag.protocol.label());
        let _ = write!(info, "Tech: {}\n", tag.tech.label());
        let _ = info.push_str("ID: ");
        push_hex(&mut info, &tag.id);

        if !radio.has_more_tags() {
            break;
        }
        log::info!("multiple tags in field");
        if !radio.activate_next_tag() {
            break;
        }
        let _ = info.push('\n');
    }

    info
}
