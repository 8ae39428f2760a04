//! Reader detection workflow (card emulation).
//!
//! The inverse of tag detection: put the frontend into card emulation
//! mode, wait for an external reader field, let the radio run the
//! emulation transaction and report the result. Waits forever until BACK.

use crate::app::{dwell, wait_for_back, Context, TickClock};
use crate::config::{MODE_ERROR_DISMISS_MS, SCAN_ANIM_PERIOD_MS};
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
    render::draw_lines(ctx.panel, &["Detect Readers", "Please wait..."]);

    ctx.radio.reset();
    if ctx.radio.set_emulation_mode().is_err() {
        log::warn!("emulation mode rejected");
        render::draw_lines(ctx.panel, &["Error setting", "emulation mode"]);
        dwell(ctx.input, ctx.clock, MODE_ERROR_DISMISS_MS);
        ctx.radio.reset();
        return;
    }

    render::draw_lines(
        ctx.panel,
        &[
            "Waiting for reader",
            "Hold near a phone",
            "or card reader",
            "BACK to cancel",
        ],
    );

    let mut dots: u8 = 0;
    let mut last_anim = ctx.clock.now_ms();
    let mut reader_found = false;

    loop {
        ctx.input.update();
        if ctx.input.back_pressed() {
            break;
        }

        // The reader poll rides the animation cadence.
        if ctx.clock.now_ms() - last_anim >= SCAN_ANIM_PERIOD_MS {
            last_anim = ctx.clock.now_ms();
            dots = (dots + 1) % 4;
            render::draw_scanning_dots(ctx.panel, dots);

            if ctx.radio.is_reader_detected() {
                reader_found = true;
                break;
            }
        }

        ctx.clock.wait_tick();
    }

    if reader_found {
        render::draw_lines(ctx.panel, &["Reader detected!", "Handling emulation"]);
        ctx.radio.run_card_emulation();

        render::draw_lines(
            ctx.panel,
            &["Reader detected!", "Emulation complete", "Press BACK button"],
        );
        wait_for_back(ctx.input, ctx.clock);
    }

    ctx.radio.reset();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TICK_MS;
    use crate::mocks::{Edges, MockClock, MockInput, MockPanel, MockRadio};
    use crate::nfc::NfcError;

    #[test]
    fn back_cancels_without_emulation() {
        let mut panel = MockPanel::new();
        let mut input = MockInput::script(&[Edges::NONE, Edges::BACK]);
        let mut radio = MockRadio::new();
        radio.reader_present = true;
        let mut clock = MockClock::new();

        run(&mut Context {
            panel: &mut panel,
            input: &mut input,
            radio: &mut radio,
            clock: &mut clock,
        });

        assert_eq!(radio.emulations, 0);
        assert_eq!(radio.em_mode_calls, 1);
        assert_eq!(radio.resets, 2);
    }

    #[test]
    fn reader_found_runs_one_emulation() {
        let mut panel = MockPanel::new();
        let mut input = MockInput::script(&[]);
        input.on_empty_after(SCAN_ANIM_PERIOD_MS / TICK_MS + 5, Edges::BACK);
        let mut radio = MockRadio::new();
        radio.reader_present = true;
        let mut clock = MockClock::new();

        run(&mut Context {
            panel: &mut panel,
            input: &mut input,
            radio: &mut radio,
            clock: &mut clock,
        });

        assert_eq!(radio.emulations, 1);
        assert_eq!(radio.reader_polls, 1);
        assert_eq!(radio.resets, 2);
        // prompt, waiting screen, one dot frame, progress, completion
        assert_eq!(panel.commits, 5);
    }

    #[test]
    fn emulation_mode_failure_aborts() {
        let mut panel = MockPanel::new();
        let mut input = MockInput::script(&[]);
        let mut radio = MockRadio::new();
        radio.mode_result = Err(NfcError::Mode);
        let mut clock = MockClock::new();

        run(&mut Context {
            panel: &mut panel,
            input: &mut input,
            radio: &mut radio,
            clock: &mut clock,
        });

        assert_eq!(radio.reader_polls, 0);
        assert_eq!(radio.emulations, 0);
        assert_eq!(radio.resets, 2);
    }
}
