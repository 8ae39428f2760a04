//! Mock capability implementations for host testing.
//!
//! Every port the badge core consumes has a scripted double here: a
//! pixel-counting panel, per-tick button scripts, a synthetic clock and a
//! configurable radio with call counters. Unit tests and the integration
//! suite drive entire workflows with these, no hardware involved.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use heapless::{Deque, Vec};

use crate::app::TickClock;
use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, TICK_MS};
use crate::nfc::ndef::NdefRecord;
use crate::nfc::{NdefMessage, NfcError, NfcRadio, RemoteTag, TagProtocol, TagTech};
use crate::ui::render::Panel;
use crate::ui::InputPort;

// Input

/// One tick's worth of edge-detected button state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edges {
    pub up: bool,
    pub down: bool,
    pub select: bool,
    pub back: bool,
}

impl Edges {
    pub const NONE: Edges = Edges { up: false, down: false, select: false, back: false };
    pub const UP: Edges = Edges { up: true, down: false, select: false, back: false };
    pub const DOWN: Edges = Edges { up: false, down: true, select: false, back: false };
    pub const SELECT: Edges = Edges { up: false, down: false, select: true, back: false };
    pub const BACK: Edges = Edges { up: false, down: false, select: false, back: true };
}

/// Scripted button input: each `update()` pops the next tick's edges.
///
/// Once the script runs dry, `on_empty` is reported (BACK by default, so a
/// mis-scripted test fails an assertion instead of wedging a terminal
/// wait), optionally after a run of quiet updates set up with
/// [`MockInput::on_empty_after`].
pub struct MockInput {
    script: Deque<Edges, 128>,
    current: Edges,
    pub on_empty: Edges,
    quiet_updates: u64,
    pub updates: u64,
}

impl MockInput {
    pub fn new() -> Self {
        MockInput {
            script: Deque::new(),
            current: Edges::NONE,
            on_empty: Edges::BACK,
            quiet_updates: 0,
            updates: 0,
        }
    }

    /// Build an input whose first ticks replay `events` in order.
    pub fn script(events: &[Edges]) -> Self {
        let mut input = MockInput::new();
        for e in events {
            let _ = input.script.push_back(*e);
        }
        input
    }

    /// After the script runs dry: report quiet (no-edge) ticks for
    /// `quiet_updates` updates, then `edges` forever.
    pub fn on_empty_after(&mut self, quiet_updates: u64, edges: Edges) {
        self.quiet_updates = quiet_updates;
        self.on_empty = edges;
    }

    /// Scripted entries not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockInput {
    fn update(&mut self) {
        self.updates += 1;
        self.current = match self.script.pop_front() {
            Some(e) => e,
            None if self.updates <= self.quiet_updates => Edges::NONE,
            None => self.on_empty,
        };
    }

    fn up_pressed(&self) -> bool {
        self.current.up
    }

    fn down_pressed(&self) -> bool {
        self.current.down
    }

    fn select_pressed(&self) -> bool {
        self.current.select
    }

    fn back_pressed(&self) -> bool {
        self.current.back
    }
}

// Clock

/// Synthetic clock: `wait_tick` advances time instantly.
pub struct MockClock {
    now: u64,
    pub tick_ms: u64,
    pub ticks: u32,
}

impl MockClock {
    pub fn new() -> Self {
        MockClock {
            now: 0,
            tick_ms: TICK_MS,
            ticks: 0,
        }
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock for MockClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn wait_tick(&mut self) {
        self.now += self.tick_ms;
        self.ticks += 1;
    }
}

// Display

/// Pixel-counting panel. `clear` zeroes the count, `commit` is tallied, so
/// tests can assert "something was drawn" and "the buffer was flushed N
/// times" without a framebuffer.
pub struct MockPanel {
    width: u32,
    height: u32,
    pub on_pixels: u32,
    pub commits: u32,
}

impl MockPanel {
    pub fn new() -> Self {
        MockPanel {
            width: DISPLAY_WIDTH,
            height: DISPLAY_HEIGHT,
            on_pixels: 0,
            commits: 0,
        }
    }
}

impl Default for MockPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for MockPanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(_, color) in pixels {
            if color == BinaryColor::On {
                self.on_pixels += 1;
            }
        }
        Ok(())
    }

    fn clear(&mut self, _color: Self::Color) -> Result<(), Self::Error> {
        self.on_pixels = 0;
        Ok(())
    }
}

impl OriginDimensions for MockPanel {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Panel for MockPanel {
    fn commit(&mut self) {
        self.commits += 1;
    }
}

// Radio

/// Scripted NDEF message: yields the configured records in order, then
/// the empty sentinel forever.
pub struct MockMessage {
    records: Vec<NdefRecord, 8>,
    pos: usize,
}

impl MockMessage {
    pub fn with_records(records: &[NdefRecord]) -> Self {
        let mut v: Vec<NdefRecord, 8> = Vec::new();
        for r in records {
            let _ = v.push(r.clone());
        }
        MockMessage { records: v, pos: 0 }
    }
}

impl NdefMessage for MockMessage {
    fn next_record(&mut self) -> NdefRecord {
        match self.records.get(self.pos) {
            Some(r) => {
                self.pos += 1;
                r.clone()
            }
            None => NdefRecord::empty(),
        }
    }
}

/// Configurable radio double with call counters.
pub struct MockRadio {
    pub mode_result: Result<(), NfcError>,
    pub tag_present: bool,
    pub reader_present: bool,
    pub tag: RemoteTag,
    pub extra_tags: Vec<RemoteTag, 2>,
    pub message: Option<MockMessage>,

    pub resets: u32,
    pub rw_mode_calls: u32,
    pub em_mode_calls: u32,
    pub detect_polls: u32,
    pub reader_polls: u32,
    pub removal_waits: u32,
    pub reads_started: u32,
    pub emulations: u32,

    walk_pos: usize,
}

impl MockRadio {
    pub fn new() -> Self {
        MockRadio {
            mode_result: Ok(()),
            tag_present: false,
            reader_present: false,
            tag: RemoteTag::new(TagProtocol::Undetermined, TagTech::Unknown, &[]),
            extra_tags: Vec::new(),
            message: None,
            resets: 0,
            rw_mode_calls: 0,
            em_mode_calls: 0,
            detect_polls: 0,
            reader_polls: 0,
            removal_waits: 0,
            reads_started: 0,
            emulations: 0,
            walk_pos: 0,
        }
    }
}

impl Default for MockRadio {
    fn default() -> Self {
        Self::new()
    }
}

impl NfcRadio for MockRadio {
    type Message = MockMessage;

    fn reset(&mut self) {
        self.resets += 1;
    }

    fn set_reader_writer_mode(&mut self) -> Result<(), NfcError> {
        self.rw_mode_calls += 1;
        self.mode_result
    }

    fn set_emulation_mode(&mut self) -> Result<(), NfcError> {
        self.em_mode_calls += 1;
        self.mode_result
    }

    fn is_tag_detected(&mut self) -> bool {
        self.detect_polls += 1;
        self.tag_present
    }

    fn is_reader_detected(&mut self) -> bool {
        self.reader_polls += 1;
        self.reader_present
    }

    fn remote_tag(&self) -> RemoteTag {
        self.tag.clone()
    }

    fn has_more_tags(&self) -> bool {
        self.walk_pos < self.extra_tags.len()
    }

    fn activate_next_tag(&mut self) -> bool {
        match self.extra_tags.get(self.walk_pos) {
            Some(next) => {
                self.tag = next.clone();
                self.walk_pos += 1;
                true
            }
            None => false,
        }
    }

    fn wait_for_tag_removal(&mut self) {
        self.removal_waits += 1;
    }

    fn start_ndef_read(&mut self) {
        self.reads_started += 1;
    }

    fn take_ndef_message(&mut self) -> Option<MockMessage> {
        if self.reads_started > 0 {
            self.message.take()
        } else {
            None
        }
    }

    fn run_card_emulation(&mut self) {
        self.emulations += 1;
    }
}
