//! Menu loop, action dispatch and the capability context.
//!
//! The whole badge is one cooperative, tick-driven control loop. Each tick
//! samples the buttons, applies at most one navigation edge (priority: up,
//! down, select, back), and renders. Selecting an action item hands the
//! display, buttons and radio to the matching workflow, which runs its own
//! inner polling loop and returns them when the user leaves.
//!
//! There are no global singletons: everything the loop and the workflows
//! touch travels in a [`Context`] of capability ports, so tests drive the
//! badge with mocks and a synthetic clock.

use crate::error::Error;
use crate::menu::{ActionKind, MenuTree, NavState};
use crate::nfc::{detect_readers, detect_tags, ndef_read, NfcRadio};
use crate::ui::render::{self, Panel};
use crate::ui::InputPort;

/// Source of time and the cooperative tick boundary.
///
/// `wait_tick` yields for one tick period; every polling loop calls it
/// exactly once per iteration. Tests substitute a synthetic clock that
/// advances instantly.
pub trait TickClock {
    fn now_ms(&self) -> u64;
    fn wait_tick(&mut self);
}

/// The capability ports a tick or a workflow may touch.
pub struct Context<'a, P, I, R, C> {
    pub panel: &'a mut P,
    pub input: &'a mut I,
    pub radio: &'a mut R,
    pub clock: &'a mut C,
}

/// The badge application: menu tree + navigation state.
pub struct BadgeApp {
    tree: &'static MenuTree,
    nav: NavState,
}

impl BadgeApp {
    pub fn new(tree: &'static MenuTree) -> Self {
        BadgeApp {
            tree,
            nav: NavState::new(),
        }
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn tree(&self) -> &'static MenuTree {
        self.tree
    }

    /// Run one tick of the menu loop.
    ///
    /// The only error that can surface here is [`Error::StackOverflow`],
    /// a menu-authoring bug; the firmware shell treats it as fatal.
    pub fn tick<P, I, R, C>(&mut self, ctx: &mut Context<P, I, R, C>) -> Result<(), Error>
    where
        P: Panel,
        I: InputPort,
        R: NfcRadio,
        C: TickClock,
    {
        ctx.input.update();

        if ctx.input.up_pressed() {
            self.nav.navigate_up(self.tree);
        } else if ctx.input.down_pressed() {
            self.nav.navigate_down(self.tree);
        } else if ctx.input.select_pressed() {
            if let Some(action) = self.nav.navigate_select(self.tree)? {
                dispatch(action, ctx);
            }
        } else if ctx.input.back_pressed() {
            self.nav.navigate_back(self.tree);
        }

        render::draw_menu(ctx.panel, self.tree, &self.nav);
        ctx.clock.wait_tick();
        Ok(())
    }
}

/// Run the workflow bound to an action item. The workflow owns the display
/// until it returns; navigation state is untouched.
pub fn dispatch<P, I, R, C>(action: ActionKind, ctx: &mut Context<P, I, R, C>)
where
    P: Panel,
    I: InputPort,
    R: NfcRadio,
    C: TickClock,
{
    log::info!("dispatch: {:?}", action);
    match action {
        ActionKind::About => info_screen(ctx, &["NFC Recon Badge", "fw v0.1.0"]),
        ActionKind::Magspoof => info_screen(ctx, &["Magspoof", "Not implemented"]),
        ActionKind::NdefSend => info_screen(ctx, &["NDEF Send", "Not implemented"]),
        ActionKind::DetectTags => detect_tags::run(ctx),
        ActionKind::DetectReaders => detect_readers::run(ctx),
        ActionKind::NdefRead => ndef_read::run(ctx),
    }
}

/// Static screen that blocks until the user acknowledges with BACK.
fn info_screen<P, I, R, C>(ctx: &mut Context<P, I, R, C>, lines: &[&str])
where
    P: Panel,
    I: InputPort,
    C: TickClock,
{
    render::draw_lines(ctx.panel, lines);
    wait_for_back(ctx.input, ctx.clock);
}

/// Block until a BACK edge. Re-checks the edge every tick - this is the
/// cooperative cancellation point of every terminal wait.
pub(crate) fn wait_for_back<I: InputPort, C: TickClock>(input: &mut I, clock: &mut C) {
    loop {
        input.update();
        if input.back_pressed() {
            return;
        }
        clock.wait_tick();
    }
}

/// Timed, non-interactive dwell (error dismissal, cancel splash). Button
/// edges occurring during the dwell are sampled and discarded.
pub(crate) fn dwell<I: InputPort, C: TickClock>(input: &mut I, clock: &mut C, ms: u64) {
    let deadline = clock.now_ms() + ms;
    while clock.now_ms() < deadline {
        input.update();
        clock.wait_tick();
    }
}
