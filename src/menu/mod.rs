//! Static menu hierarchy.
//!
//! Menus are immutable `&'static` data: each [`Menu`] owns a title and an
//! ordered item slice, and items point at either a submenu (by [`MenuId`])
//! or an [`ActionKind`] resolved at definition time. The set of menus forms
//! an acyclic forest-by-reference - a submenu item may only point "down",
//! which is guaranteed by how the table below is authored, not checked at
//! runtime.

pub mod nav;

pub use nav::NavState;

/// Index of a menu in its [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuId(pub u8);

/// Badge actions an item can trigger. Resolved once when the tree is
/// authored; the dispatcher maps each variant to a workflow entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionKind {
    About,
    Magspoof,
    DetectTags,
    DetectReaders,
    NdefSend,
    NdefRead,
}

/// What selecting an item does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemTarget {
    /// Descend into another menu.
    Submenu(MenuId),
    /// Run a badge action.
    Action(ActionKind),
}

/// One selectable row.
#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub label: &'static str,
    pub target: ItemTarget,
}

impl MenuItem {
    /// True when this item descends into a submenu.
    pub fn is_submenu(&self) -> bool {
        matches!(self.target, ItemTarget::Submenu(_))
    }
}

/// One menu level.
#[derive(Debug, Clone, Copy)]
pub struct Menu {
    pub title: &'static str,
    pub items: &'static [MenuItem],
}

static EMPTY_MENU: Menu = Menu {
    title: "",
    items: &[],
};

/// Immutable menu forest. Must hold at least one menu; index 0 is the root.
#[derive(Debug, Clone, Copy)]
pub struct MenuTree {
    menus: &'static [Menu],
}

impl MenuTree {
    pub const ROOT: MenuId = MenuId(0);

    pub const fn new(menus: &'static [Menu]) -> Self {
        MenuTree { menus }
    }

    /// Look up a menu by id. An out-of-range id (impossible for a correctly
    /// authored tree) falls back to the root rather than panicking.
    pub fn menu(&self, id: MenuId) -> &Menu {
        self.menus
            .get(id.0 as usize)
            .or_else(|| self.menus.first())
            .unwrap_or(&EMPTY_MENU)
    }
}

// Badge menu definition

pub const MENU_MAIN: MenuId = MenuId(0);
pub const MENU_APPS: MenuId = MenuId(1);
pub const MENU_NFC: MenuId = MenuId(2);

static MENUS: [Menu; 3] = [
    // Main Menu
    Menu {
        title: "Main Menu",
        items: &[
            MenuItem {
                label: "About",
                target: ItemTarget::Action(ActionKind::About),
            },
            MenuItem {
                label: "Apps",
                target: ItemTarget::Submenu(MENU_APPS),
            },
        ],
    },
    // Apps Menu
    Menu {
        title: "Apps",
        items: &[
            MenuItem {
                label: "NFC",
                target: ItemTarget::Submenu(MENU_NFC),
            },
            MenuItem {
                label: "Magspoof",
                target: ItemTarget::Action(ActionKind::Magspoof),
            },
        ],
    },
    // NFC Menu
    Menu {
        title: "NFC",
        items: &[
            MenuItem {
                label: "Detect Tags",
                target: ItemTarget::Action(ActionKind::DetectTags),
            },
            MenuItem {
                label: "Detect Readers",
                target: ItemTarget::Action(ActionKind::DetectReaders),
            },
            MenuItem {
                label: "NDEF Send",
                target: ItemTarget::Action(ActionKind::NdefSend),
            },
            MenuItem {
                label: "NDEF Read",
                target: ItemTarget::Action(ActionKind::NdefRead),
            },
        ],
    },
];

static TREE: MenuTree = MenuTree::new(&MENUS);

/// The badge's menu hierarchy.
pub fn badge_menu() -> &'static MenuTree {
    &TREE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_menu_shape() {
        let tree = badge_menu();
        let root = tree.menu(MenuTree::ROOT);
        assert_eq!(root.title, "Main Menu");
        assert_eq!(root.items.len(), 2);
        assert_eq!(root.items[1].label, "Apps");
        assert!(root.items[1].is_submenu());
    }

    #[test]
    fn nfc_menu_has_four_actions() {
        let tree = badge_menu();
        let nfc = tree.menu(MENU_NFC);
        assert_eq!(nfc.items.len(), 4);
        assert!(nfc.items.iter().all(|i| !i.is_submenu()));
    }

    #[test]
    fn out_of_range_id_falls_back_to_root() {
        let tree = badge_menu();
        assert_eq!(tree.menu(MenuId(99)).title, "Main Menu");
    }
}
