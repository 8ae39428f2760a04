//! Tag detection workflow.
//!
//! Reader/writer mode, poll for a tag, show its metadata. The scan is
//! bounded: BACK cancels at any tick, and an expired scan window lands on
//! the "No tag detected" screen instead of polling forever.

use crate::app::{dwell, wait_for_back, Context, TickClock};
use crate::config::{MODE_ERROR_DISMISS_MS, TAG_SCAN_WINDOW_MS};
use crate::nfc::{format_tag_info, NfcRadio};
use crate::ui::render::{self, Panel};
use crate::ui::InputPort;

enum State {
    Scanning,
    Found,
    NotFound,
    Cancelled,
}

/// Run the workflow to completion. Owns the display, buttons and radio
/// until it returns; the radio is reset on every exit path.
pub fn run<P, I, R, C>(ctx: &mut Context<'_, P, I, R, C>)
where
    P: Panel,
    I: InputPort,
    R: NfcRadio,
    C: TickClock,
{
    render::draw_lines(
        ctx.panel,
        &["Detecting tags...", "Place tag near", "the antenna"],
    );

    ctx.radio.reset();
    if ctx.radio.set_reader_writer_mode().is_err() {
        log::warn!("reader/writer mode rejected");
        render::draw_lines(ctx.panel, &["Error setting", "reader/writer mode"]);
        dwell(ctx.input, ctx.clock, MODE_ERROR_DISMISS_MS);
        ctx.radio.reset();
        return;
    }

    let deadline = ctx.clock.now_ms() + TAG_SCAN_WINDOW_MS;
    let mut state = State::Scanning;

    while let State::Scanning = state {
        ctx.input.update();

        if ctx.input.back_pressed() {
            state = State::Cancelled;
        } else if ctx.radio.is_tag_detected() {
            state = State::Found;
        } else if ctx.clock.now_ms() >= deadline {
            state = State::NotFound;
        } else {
            ctx.clock.wait_tick();
        }
    }

    match state {
        State::Found => {
            let mut info = format_tag_info(ctx.radio);
            let _ = info.push_str("\n\nPress BACK button");
            render::draw_wrapped(ctx.panel, info.as_str());

            // Don't re-trigger on the same physical tag.
            ctx.radio.wait_for_tag_removal();
            wait_for_back(ctx.input, ctx.clock);
        }
        State::NotFound => {
            render::draw_lines(
                ctx.panel,
                &["No tag detected", "Press BACK to", "return to menu"],
            );
            wait_for_back(ctx.input, ctx.clock);
        }
        State::Cancelled | State::Scanning => {}
    }

    ctx.radio.reset();
}
