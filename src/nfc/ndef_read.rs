//! NDEF read workflow.
//!
//! Reader/writer mode, wait for a tag (animated), gate on the protocols
//! that can carry NDEF, arm the asynchronous read and poll its completion
//! slot for a bounded window, then page through the decoded records.

use crate::app::{dwell, wait_for_back, Context, TickClock};
use crate::config::{
    CANCEL_SPLASH_MS, MODE_ERROR_DISMISS_MS, NDEF_READ_WAIT_MS, SCAN_ANIM_PERIOD_MS,
};
use crate::nfc::ndef::NdefRecordSet;
use crate::nfc::NfcRadio;
use crate::ui::render::{self, Panel};
use crate::ui::InputPort;

/// Run the workflow to completion.
pub fn run<P, I, R, C>(ctx: &mut Context<'_, P, I, R, C>)
where
    P: Panel,
    I: InputPort,
    R: NfcRadio,
    C: TickClock,
{
    render::draw_lines(ctx.panel, &["NDEF Read", "Initializing..."]);

    ctx.radio.reset();
    if ctx.radio.set_reader_writer_mode().is_err() {
        log::warn!("reader/writer mode rejected");
        render::draw_lines(ctx.panel, &["Error setting", "reader/writer mode"]);
        dwell(ctx.input, ctx.clock, MODE_ERROR_DISMISS_MS);
        ctx.radio.reset();
        return;
    }

    render::draw_lines(
        ctx.panel,
        &["Waiting for tag", "with NDEF message", "BACK to cancel"],
    );

    // Await a tag, animating on a 500 ms sub-timer inside the tick loop.
    let mut dots: u8 = 0;
    let mut last_anim = ctx.clock.now_ms();
    loop {
        ctx.input.update();
        if ctx.input.back_pressed() {
            render::draw_lines(ctx.panel, &["Operation canceled"]);
            dwell(ctx.input, ctx.clock, CANCEL_SPLASH_MS);
            ctx.radio.reset();
            return;
        }

        if ctx.clock.now_ms() - last_anim >= SCAN_ANIM_PERIOD_MS {
            last_anim = ctx.clock.now_ms();
            dots = (dots + 1) % 4;
            render::draw_scanning_dots(ctx.panel, dots);
        }

        if ctx.radio.is_tag_detected() {
            break;
        }
        ctx.clock.wait_tick();
    }

    render::draw_lines(ctx.panel, &["Tag detected!", "Reading NDEF..."]);

    let protocol = ctx.radio.remote_tag().protocol;
    if !protocol.supports_ndef() {
        log::info!("protocol {} cannot carry NDEF", protocol.label());
        render::draw_lines(ctx.panel, &["Tag doesn't", "support NDEF"]);
        wait_for_back(ctx.input, ctx.clock);
        ctx.radio.reset();
        return;
    }

    // Arm the read and poll the completion slot for a bounded window; a
    // missing notification is exactly "no message".
    ctx.radio.start_ndef_read();
    let deadline = ctx.clock.now_ms() + NDEF_READ_WAIT_MS;
    let message = loop {
        if let Some(msg) = ctx.radio.take_ndef_message() {
            break Some(msg);
        }
        if ctx.clock.now_ms() >= deadline {
            log::info!("read window expired");
            break None;
        }
        ctx.clock.wait_tick();
    };

    let mut set = match message {
        Some(mut msg) => NdefRecordSet::from_message(&mut msg),
        None => NdefRecordSet::new(),
    };

    if set.is_empty() {
        render::draw_lines(ctx.panel, &["No valid NDEF", "message found"]);
        wait_for_back(ctx.input, ctx.clock);
        ctx.radio.reset();
        return;
    }

    log::info!("{} records decoded", set.count());
    render::draw_record(ctx.panel, &set);
    paginate(&mut set, ctx);

    ctx.radio.reset();
}

/// Page through the record set until BACK. Cursor moves are clamped; a
/// move that hits a boundary changes nothing and triggers no redraw.
fn paginate<P, I, R, C>(set: &mut NdefRecordSet, ctx: &mut Context<'_, P, I, R, C>)
where
    P: Panel,
    I: InputPort,
    C: TickClock,
{
    loop {
        ctx.input.update();

        if ctx.input.up_pressed() {
            if set.prev() {
                render::draw_record(ctx.panel, set);
            }
        } else if ctx.input.down_pressed() {
            if set.next() {
                render::draw_record(ctx.panel, set);
            }
        } else if ctx.input.back_pressed() {
            return;
        }

        ctx.clock.wait_tick();
    }
}
