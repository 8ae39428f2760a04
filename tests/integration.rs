//! Integration tests for the nfcbadge host-testable core.
//!
//! Each test drives the real menu loop and workflows through the mock
//! capability ports: scripted buttons, a synthetic clock, a configurable
//! radio and a pixel-counting panel.

use nfcbadge::app::{BadgeApp, Context};
use nfcbadge::menu::{badge_menu, MenuTree, MENU_APPS, MENU_NFC};
use nfcbadge::mocks::{Edges, MockClock, MockInput, MockMessage, MockPanel, MockRadio};
use nfcbadge::nfc::ndef::{NdefRecord, RecordKind};
use nfcbadge::nfc::{NfcError, RemoteTag, TagProtocol, TagTech};

fn run_ticks(
    app: &mut BadgeApp,
    panel: &mut MockPanel,
    input: &mut MockInput,
    radio: &mut MockRadio,
    clock: &mut MockClock,
    ticks: usize,
) {
    for _ in 0..ticks {
        let mut ctx = Context {
            panel: &mut *panel,
            input: &mut *input,
            radio: &mut *radio,
            clock: &mut *clock,
        };
        app.tick(&mut ctx).expect("menu tree is authored correctly");
    }
}

#[test]
fn menu_navigation_end_to_end() {
    let tree = badge_menu();
    assert_eq!(tree.menu(MenuTree::ROOT).title, "Main Menu");
    assert_eq!(tree.menu(MenuTree::ROOT).items.len(), 2);

    let mut app = BadgeApp::new(tree);
    let mut panel = MockPanel::new();
    let mut input = MockInput::script(&[Edges::DOWN, Edges::SELECT, Edges::BACK]);
    let mut radio = MockRadio::new();
    let mut clock = MockClock::new();

    // DOWN then SELECT enters "Apps".
    run_ticks(&mut app, &mut panel, &mut input, &mut radio, &mut clock, 2);
    assert_eq!(app.nav().current(), MENU_APPS);
    assert_eq!(tree.menu(app.nav().current()).title, "Apps");
    assert_eq!(app.nav().cursor(), 0);
    assert_eq!(app.nav().depth(), 1);

    // BACK returns to "Main Menu" with the cursor reset.
    run_ticks(&mut app, &mut panel, &mut input, &mut radio, &mut clock, 1);
    assert_eq!(app.nav().current(), MenuTree::ROOT);
    assert_eq!(app.nav().cursor(), 0);
    assert_eq!(app.nav().depth(), 0);

    // One render per tick.
    assert_eq!(panel.commits, 3);
}

#[test]
fn cancelled_tag_detection_leaves_navigation_intact() {
    let mut app = BadgeApp::new(badge_menu());
    let mut panel = MockPanel::new();
    // Navigate Main -> Apps -> NFC, select "Detect Tags"; inside the
    // workflow: one quiet tick, then BACK cancels the scan.
    let mut input = MockInput::script(&[
        Edges::DOWN,
        Edges::SELECT,
        Edges::SELECT,
        Edges::SELECT,
        Edges::NONE,
        Edges::BACK,
    ]);
    let mut radio = MockRadio::new(); // no tag ever
    let mut clock = MockClock::new();

    run_ticks(&mut app, &mut panel, &mut input, &mut radio, &mut clock, 4);

    // Back in the NFC menu, stack depth untouched by the workflow.
    assert_eq!(app.nav().current(), MENU_NFC);
    assert_eq!(app.nav().depth(), 2);
    assert_eq!(input.remaining(), 0);
    assert_eq!(radio.rw_mode_calls, 1);
    assert_eq!(radio.resets, 2);
    assert_eq!(radio.removal_waits, 0);
}

#[test]
fn ndef_read_paginates_three_records_with_clamping() {
    let mut app = BadgeApp::new(badge_menu());
    let mut panel = MockPanel::new();
    // Navigate Main -> Apps -> NFC, cursor to "NDEF Read" (item 3), select.
    // Inside the workflow: tag is present immediately; then four DOWNs (the
    // fourth clamps) and BACK.
    let mut input = MockInput::script(&[
        Edges::DOWN,
        Edges::SELECT,
        Edges::SELECT,
        Edges::DOWN,
        Edges::DOWN,
        Edges::DOWN,
        Edges::SELECT,
        Edges::NONE,
        Edges::DOWN,
        Edges::DOWN,
        Edges::DOWN,
        Edges::DOWN,
        Edges::BACK,
    ]);
    let mut radio = MockRadio::new();
    radio.tag_present = true;
    radio.tag = RemoteTag::new(TagProtocol::T2T, TagTech::NfcA, &[0x04, 0xA3, 0x1B]);
    radio.message = Some(MockMessage::with_records(&[
        NdefRecord::new(RecordKind::Text, "hello badge"),
        NdefRecord::new(RecordKind::Uri, "https://example.com"),
        NdefRecord::new(RecordKind::WifiHandover, "guestnet"),
    ]));
    let mut clock = MockClock::new();

    run_ticks(&mut app, &mut panel, &mut input, &mut radio, &mut clock, 7);

    assert_eq!(input.remaining(), 0);
    assert_eq!(radio.reads_started, 1);
    assert_eq!(radio.resets, 2);
    assert_eq!(app.nav().current(), MENU_NFC);

    // 6 menu renders before the dispatching tick, then inside the workflow:
    // init, waiting, "Tag detected", record 1, two redraws (records 2 and 3;
    // the clamped third and fourth DOWNs draw nothing), then the menu render
    // of the dispatching tick itself.
    assert_eq!(panel.commits, 6 + 6 + 1);
}

#[test]
fn reader_detection_completes_one_emulation() {
    let mut app = BadgeApp::new(badge_menu());
    let mut panel = MockPanel::new();
    // Navigate to NFC menu, cursor to "Detect Readers", select; then stay
    // quiet until the first animation frame polls the reader, and let the
    // exhausted script acknowledge the completion screen.
    let mut input = MockInput::script(&[
        Edges::DOWN,
        Edges::SELECT,
        Edges::SELECT,
        Edges::DOWN,
        Edges::SELECT,
    ]);
    input.on_empty_after(60, Edges::BACK);
    let mut radio = MockRadio::new();
    radio.reader_present = true;
    let mut clock = MockClock::new();

    run_ticks(&mut app, &mut panel, &mut input, &mut radio, &mut clock, 5);

    assert_eq!(radio.em_mode_calls, 1);
    assert_eq!(radio.emulations, 1);
    assert_eq!(radio.resets, 2);
    assert_eq!(app.nav().current(), MENU_NFC);
}

#[test]
fn mode_failure_dismisses_and_returns_to_menu() {
    let mut app = BadgeApp::new(badge_menu());
    let mut panel = MockPanel::new();
    let mut input = MockInput::script(&[
        Edges::DOWN,
        Edges::SELECT,
        Edges::SELECT,
        Edges::SELECT,
    ]);
    let mut radio = MockRadio::new();
    radio.mode_result = Err(NfcError::Mode);
    let mut clock = MockClock::new();

    run_ticks(&mut app, &mut panel, &mut input, &mut radio, &mut clock, 4);

    // The workflow aborted before ever polling for tags, and the menu loop
    // is navigable again.
    assert_eq!(radio.detect_polls, 0);
    assert_eq!(radio.resets, 2);
    assert_eq!(app.nav().current(), MENU_NFC);
    assert_eq!(app.nav().depth(), 2);
}
