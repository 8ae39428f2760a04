//! Decoded NDEF records and the paginated record set.
//!
//! Field extraction (text/URI/vCard/Wi-Fi/Bluetooth payloads) is the
//! radio collaborator's job; what arrives here is the record kind plus a
//! ready-made one-line summary.

use heapless::{String, Vec};

use crate::config::MAX_NDEF_RECORDS;
use crate::nfc::NdefMessage;

/// NDEF record categories the badge can summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordKind {
    Text,
    Uri,
    VCard,
    WifiHandover,
    BtHandover,
    Unsupported,
    Empty,
}

impl RecordKind {
    /// Heading line shown above the record summary.
    pub fn heading(self) -> &'static str {
        match self {
            RecordKind::Text => "Text:",
            RecordKind::Uri => "URI:",
            RecordKind::VCard => "vCard",
            RecordKind::WifiHandover => "WiFi:",
            RecordKind::BtHandover => "BT:",
            RecordKind::Unsupported => "Unsupported type",
            RecordKind::Empty => "Empty record",
        }
    }
}

/// One decoded record: kind + one-line summary (text body, URI, Wi-Fi
/// SSID, Bluetooth device name, ... - whatever the decoder extracted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    kind: RecordKind,
    content: String<64>,
}

impl NdefRecord {
    pub fn new(kind: RecordKind, content: &str) -> Self {
        let mut c: String<64> = String::new();
        for ch in content.chars() {
            if c.push(ch).is_err() {
                break;
            }
        }
        NdefRecord { kind, content: c }
    }

    /// The end-of-message sentinel.
    pub fn empty() -> Self {
        NdefRecord {
            kind: RecordKind::Empty,
            content: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == RecordKind::Empty
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Records from one successful read, plus the pagination cursor.
///
/// Built fresh for every read and dropped when the workflow exits. The
/// cursor stays inside `[0, count-1]` whenever the set is non-empty;
/// moves at either boundary are no-ops.
pub struct NdefRecordSet {
    records: Vec<NdefRecord, MAX_NDEF_RECORDS>,
    cursor: usize,
}

impl NdefRecordSet {
    pub fn new() -> Self {
        NdefRecordSet {
            records: Vec::new(),
            cursor: 0,
        }
    }

    /// Drain `msg` until the decoder reports the empty sentinel. Only real
    /// records are counted; the sentinel itself is not stored. Records past
    /// the buffer bound are dropped with a log note.
    pub fn from_message<M: NdefMessage>(msg: &mut M) -> Self {
        let mut set = NdefRecordSet::new();
        loop {
            let record = msg.next_record();
            if record.is_empty() {
                break;
            }
            if set.records.push(record).is_err() {
                log::warn!("record buffer full, trailing records dropped");
                break;
            }
        }
        set
    }

    pub fn push(&mut self, record: NdefRecord) {
        let _ = self.records.push(record);
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&NdefRecord> {
        self.records.get(self.cursor)
    }

    /// Move to the next record; false (and no redraw needed) at the end.
    pub fn next(&mut self) -> bool {
        if self.cursor + 1 < self.records.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous record; false at the start.
    pub fn prev(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for NdefRecordSet {
    fn default() -> Self {
        Self::new()
    }
}
