//! Navigation state machine over a [`MenuTree`].
//!
//! Holds the current menu, the selection cursor, the scroll offset of the
//! visible window and a bounded back-stack of parent menu ids. The cursor
//! is clamped (no wraparound) and after every move the scroll offset is
//! recomputed with the two-rule clamp: a cursor above the window pulls the
//! window up to it, a cursor below pushes the window down so the cursor is
//! the last visible row.

use heapless::Vec;

use crate::config::{MENU_STACK_DEPTH, MENU_VISIBLE_ROWS};
use crate::error::Error;
use crate::menu::{ActionKind, ItemTarget, MenuId, MenuTree};

/// Mutable navigation state. Owned by the menu loop; mutated only through
/// the `navigate_*` operations.
pub struct NavState {
    current: MenuId,
    cursor: usize,
    scroll: usize,
    stack: Vec<MenuId, MENU_STACK_DEPTH>,
}

impl NavState {
    /// Start at the root menu with an empty back-stack.
    pub fn new() -> Self {
        NavState {
            current: MenuTree::ROOT,
            cursor: 0,
            scroll: 0,
            stack: Vec::new(),
        }
    }

    pub fn current(&self) -> MenuId {
        self.current
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Number of parent menus on the back-stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Move the cursor one item up; no wraparound at the top.
    pub fn navigate_up(&mut self, _tree: &MenuTree) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.adjust_scroll();
        }
    }

    /// Move the cursor one item down; no wraparound at the bottom.
    pub fn navigate_down(&mut self, tree: &MenuTree) {
        let count = tree.menu(self.current).items.len();
        if self.cursor + 1 < count {
            self.cursor += 1;
            self.adjust_scroll();
        }
    }

    /// Act on the item under the cursor.
    ///
    /// A submenu item pushes the current menu onto the back-stack and enters
    /// the target with cursor and scroll reset; pushing with the stack at
    /// capacity is a menu-authoring error reported as
    /// [`Error::StackOverflow`], never a silent truncation. An action item
    /// leaves navigation state untouched and hands its [`ActionKind`] back
    /// for the dispatcher to run.
    pub fn navigate_select(&mut self, tree: &MenuTree) -> Result<Option<ActionKind>, Error> {
        let item = match tree.menu(self.current).items.get(self.cursor) {
            Some(item) => *item,
            None => return Ok(None),
        };

        match item.target {
            ItemTarget::Submenu(id) => {
                self.stack
                    .push(self.current)
                    .map_err(|_| Error::StackOverflow)?;
                self.current = id;
                self.cursor = 0;
                self.scroll = 0;
                Ok(None)
            }
            ItemTarget::Action(action) => Ok(Some(action)),
        }
    }

    /// Return to the parent menu with cursor and scroll reset; no-op at the
    /// root (the root menu has no parent).
    pub fn navigate_back(&mut self, _tree: &MenuTree) {
        if let Some(parent) = self.stack.pop() {
            self.current = parent;
            self.cursor = 0;
            self.scroll = 0;
        }
    }

    fn adjust_scroll(&mut self) {
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + MENU_VISIBLE_ROWS {
            self.scroll = self.cursor + 1 - MENU_VISIBLE_ROWS;
        }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{badge_menu, ActionKind, Menu, MenuItem, MENU_APPS, MENU_NFC};

    fn window_invariant(nav: &NavState, tree: &MenuTree) {
        let count = tree.menu(nav.current()).items.len();
        assert!(nav.cursor() < count);
        assert!(nav.scroll() <= nav.cursor());
        assert!(nav.cursor() < nav.scroll() + MENU_VISIBLE_ROWS);
    }

    #[test]
    fn cursor_clamps_at_both_ends() {
        let tree = badge_menu();
        let mut nav = NavState::new();

        nav.navigate_up(tree);
        assert_eq!(nav.cursor(), 0);

        nav.navigate_down(tree);
        nav.navigate_down(tree);
        nav.navigate_down(tree);
        assert_eq!(nav.cursor(), 1); // root has 2 items
        window_invariant(&nav, tree);
    }

    #[test]
    fn scroll_window_follows_cursor() {
        let tree = badge_menu();
        let mut nav = NavState::new();

        // Enter the 4-item NFC menu: Apps -> NFC.
        nav.navigate_down(tree);
        nav.navigate_select(tree).unwrap();
        nav.navigate_select(tree).unwrap();
        assert_eq!(nav.current(), MENU_NFC);

        // Walk past the 3-row window and back; the window must track the
        // cursor after every single move.
        for _ in 0..5 {
            nav.navigate_down(tree);
            window_invariant(&nav, tree);
        }
        assert_eq!(nav.cursor(), 3);
        assert_eq!(nav.scroll(), 1);

        for _ in 0..5 {
            nav.navigate_up(tree);
            window_invariant(&nav, tree);
        }
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.scroll(), 0);
    }

    #[test]
    fn select_submenu_then_back_resets_cursor() {
        let tree = badge_menu();
        let mut nav = NavState::new();

        nav.navigate_down(tree); // cursor on "Apps"
        assert_eq!(nav.navigate_select(tree).unwrap(), None);
        assert_eq!(nav.current(), MENU_APPS);
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.depth(), 1);

        // Back restores the parent menu but always resets cursor/scroll to
        // 0, regardless of where the cursor was before the push.
        nav.navigate_back(tree);
        assert_eq!(nav.current(), MenuTree::ROOT);
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.scroll(), 0);
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn back_at_root_is_noop() {
        let tree = badge_menu();
        let mut nav = NavState::new();
        nav.navigate_back(tree);
        assert_eq!(nav.current(), MenuTree::ROOT);
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn select_action_leaves_state_unchanged() {
        let tree = badge_menu();
        let mut nav = NavState::new();
        assert_eq!(
            nav.navigate_select(tree).unwrap(),
            Some(ActionKind::About)
        );
        assert_eq!(nav.current(), MenuTree::ROOT);
        assert_eq!(nav.cursor(), 0);
        assert_eq!(nav.depth(), 0);
    }

    // A 7-deep chain of single-item submenus to exercise the stack bound.
    static CHAIN: [Menu; 7] = [
        Menu { title: "m0", items: &[MenuItem { label: "next", target: ItemTarget::Submenu(MenuId(1)) }] },
        Menu { title: "m1", items: &[MenuItem { label: "next", target: ItemTarget::Submenu(MenuId(2)) }] },
        Menu { title: "m2", items: &[MenuItem { label: "next", target: ItemTarget::Submenu(MenuId(3)) }] },
        Menu { title: "m3", items: &[MenuItem { label: "next", target: ItemTarget::Submenu(MenuId(4)) }] },
        Menu { title: "m4", items: &[MenuItem { label: "next", target: ItemTarget::Submenu(MenuId(5)) }] },
        Menu { title: "m5", items: &[MenuItem { label: "next", target: ItemTarget::Submenu(MenuId(6)) }] },
        Menu { title: "m6", items: &[] },
    ];

    #[test]
    fn stack_push_at_capacity_is_rejected() {
        let tree = MenuTree::new(&CHAIN);
        let mut nav = NavState::new();

        // Five pushes fill the stack.
        for _ in 0..MENU_STACK_DEPTH {
            assert_eq!(nav.navigate_select(&tree).unwrap(), None);
        }
        assert_eq!(nav.depth(), MENU_STACK_DEPTH);
        assert_eq!(nav.current(), MenuId(5));

        // The sixth push must be rejected, leaving state untouched.
        assert_eq!(nav.navigate_select(&tree), Err(Error::StackOverflow));
        assert_eq!(nav.depth(), MENU_STACK_DEPTH);
        assert_eq!(nav.current(), MenuId(5));
    }
}
