//! nfcbadge firmware entry point (nRF52840 + Embassy).
//!
//! Brings up the SSD1306 over I²C and the four buttons, then runs the
//! menu loop forever. The NFC frontend driver plugs in behind the
//! `NfcRadio` trait; until the NCI driver for the badge PCB lands, the
//! `IdleRadio` below keeps the menus and workflows fully operational
//! with the radio reporting an empty field.

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_time::{block_for, Duration, Instant};
use panic_probe as _;

use nfcbadge::app::{BadgeApp, Context, TickClock};
use nfcbadge::config::TICK_MS;
use nfcbadge::menu::badge_menu;
use nfcbadge::nfc::ndef::NdefRecord;
use nfcbadge::nfc::{NdefMessage, NfcError, NfcRadio, RemoteTag, TagProtocol, TagTech};
use nfcbadge::ui::buttons::Buttons;
use nfcbadge::ui::oled::Oled;

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Wall-clock ticks from the Embassy time driver.
struct BoardClock;

impl TickClock for BoardClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn wait_tick(&mut self) {
        block_for(Duration::from_millis(TICK_MS));
    }
}

/// Placeholder frontend: an empty RF field. Replace with the NCI driver
/// for the badge's PN7150 once the I²C transport is wired up.
struct IdleRadio;

struct NoMessage;

impl NdefMessage for NoMessage {
    fn next_record(&mut self) -> NdefRecord {
        NdefRecord::empty()
    }
}

impl NfcRadio for IdleRadio {
    type Message = NoMessage;

    fn reset(&mut self) {}

    fn set_reader_writer_mode(&mut self) -> Result<(), NfcError> {
        Ok(())
    }

    fn set_emulation_mode(&mut self) -> Result<(), NfcError> {
        Ok(())
    }

    fn is_tag_detected(&mut self) -> bool {
        false
    }

    fn is_reader_detected(&mut self) -> bool {
        false
    }

    fn remote_tag(&self) -> RemoteTag {
        RemoteTag::new(TagProtocol::Undetermined, TagTech::Unknown, &[])
    }

    fn has_more_tags(&self) -> bool {
        false
    }

    fn activate_next_tag(&mut self) -> bool {
        false
    }

    fn wait_for_tag_removal(&mut self) {}

    fn start_ndef_read(&mut self) {}

    fn take_ndef_message(&mut self) -> Option<NoMessage> {
        None
    }

    fn run_card_emulation(&mut self) {}
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("nfcbadge boot");

    // I²C bus for the OLED (and, later, the NFC frontend).
    let twim_config = twim::Config::default();
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim_config);

    let mut panel = Oled::init(i2c);
    let mut input = Buttons::new(
        p.P0_11.degrade(),
        p.P0_12.degrade(),
        p.P0_24.degrade(),
        p.P0_25.degrade(),
    );
    let mut radio = IdleRadio;
    let mut clock = BoardClock;

    let mut app = BadgeApp::new(badge_menu());

    loop {
        let mut ctx = Context {
            panel: &mut panel,
            input: &mut input,
            radio: &mut radio,
            clock: &mut clock,
        };
        // The only error a tick can raise is a menu-authoring bug.
        unwrap!(app.tick(&mut ctx));
    }
}
