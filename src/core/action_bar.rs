//! # Action Bar
//!
//! The keyboard-driven menu bar: a row of buttons, some of which open a
//! dropdown of menu items. This module owns the focus [`Document`] for the
//! bar and is the [`FocusHost`] the dispatcher talks to.
//!
//! ```text
//! root
//! └── bar (Group)
//!     ├── Button "Font"  ──► menu (Group, hidden while closed)
//!     │                       ├── MenuItem "Departure Mono [MIT] [DEFAULT]"
//!     │                       └── ...
//!     ├── Button "Theme" ──► menu (Group, hidden while closed)
//!     └── Button "Grid"
//! ```
//!
//! ## Key flow
//!
//! `handle_key` resolves the event target (the focused node), runs the
//! [`Dispatcher`] against the document, then applies what the dispatcher
//! asked for. Dispatch only reads the tree; opening and closing menus
//! happens afterwards, when the document can be mutated again.
//!
//! ## Scopes
//!
//! Mounting subscribes two keymap scopes: `navigation` (arrows, Enter,
//! Space) and `action-bar` (menu and command hotkeys). An open menu holds
//! a third scope binding Escape. Every scope is released when the bar (or
//! the menu) goes away.

use log::{debug, info};

use crate::core::action::{Action, Command, Effects};
use crate::core::chord::{Chord, Key};
use crate::core::dispatch::{Dispatched, Dispatcher, FocusHost, KeyInput};
use crate::core::focus::{
    Direction, find_focusable_descendant, find_focusable_parent, find_next_focusable,
};
use crate::core::keymap::{Keymap, Subscription};
use crate::core::tree::{Document, Element, NodeId, Role, TreeView};

/// One entry in a dropdown menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub icon: String,
    pub label: String,
    pub command: Command,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, command: Command) -> Self {
        Self {
            icon: "⊹".to_string(),
            label: label.into(),
            command,
        }
    }
}

/// One button in the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionItem {
    /// Hotkey hint shown on the button, e.g. `⌃+O`.
    pub hotkey: String,
    pub body: String,
    /// Chord that opens the menu, or runs `command` when there is no menu.
    pub open_hotkey: Option<Chord>,
    /// Runs on activation when the item has no menu.
    pub command: Option<Command>,
    pub items: Vec<MenuItem>,
    pub selected: bool,
}

impl ActionItem {
    pub fn menu(
        hotkey: impl Into<String>,
        body: impl Into<String>,
        open_hotkey: Chord,
        items: Vec<MenuItem>,
    ) -> Self {
        Self {
            hotkey: hotkey.into(),
            body: body.into(),
            open_hotkey: Some(open_hotkey),
            command: None,
            items,
            selected: false,
        }
    }

    pub fn command(
        hotkey: impl Into<String>,
        body: impl Into<String>,
        open_hotkey: Option<Chord>,
        command: Command,
    ) -> Self {
        Self {
            hotkey: hotkey.into(),
            body: body.into(),
            open_hotkey,
            command: Some(command),
            items: Vec::new(),
            selected: false,
        }
    }

    pub fn has_menu(&self) -> bool {
        !self.items.is_empty()
    }
}

fn font(label: &str, class: &str) -> MenuItem {
    MenuItem::new(label, Command::SetFont(class.to_string()))
}

fn theme(label: &str, class: &str) -> MenuItem {
    MenuItem::new(label, Command::SetTheme(class.to_string()))
}

/// The stock Font / Theme / Grid entries followed by `extra`.
pub fn default_action_bar(extra: Vec<ActionItem>) -> Vec<ActionItem> {
    let mut items = vec![
        ActionItem::menu(
            "⌃+O",
            "Font",
            Chord::ctrl('o'),
            vec![
                font("Departure Mono [MIT] [DEFAULT]", ""),
                font("Geist Mono [OFL]", "font-use-geist-mono"),
                font("Server Mono 0.0.6 [OFL]", "font-use-server-mono"),
                font("TX-02 Berkeley Mono™", "font-use-berkeley-mono"),
            ],
        ),
        ActionItem::menu(
            "⌃+T",
            "Theme",
            Chord::ctrl('t'),
            vec![
                theme("Pink Bikini [DEFAULT]", "theme-black-pink"),
                theme("Oranges In Wintergarden [AUTO]", "theme-orange"),
                theme("Refined White", ""),
                theme("Black Midnight Vapor", "theme-dark"),
                theme("U-571 Code Red", "theme-black-red"),
                theme("Digital Bioluminescence", "theme-black-teal"),
                theme("Operation Safe Blue", "theme-blue"),
                theme("Neon Green Garden", "theme-green"),
                theme("Kirkland Signature AS/400", "theme-black-green"),
            ],
        ),
        ActionItem::command("⌃+G", "Grid", Some(Chord::ctrl('g')), Command::ToggleGrid),
    ];
    items.extend(extra);
    items
}

/// Bindings every focus-navigable view installs.
pub fn navigation_bindings() -> Vec<(Chord, Action)> {
    vec![
        (Chord::key(Key::ArrowDown), Action::FocusNext),
        (Chord::key(Key::ArrowUp), Action::FocusPrevious),
        (Chord::key(Key::ArrowRight), Action::FocusNext),
        (Chord::key(Key::ArrowLeft), Action::FocusPrevious),
        (Chord::key(Key::Enter), Action::Activate),
        (Chord::key(Key::Space), Action::Activate),
    ]
}

/// Collects what the dispatcher asked for while the document is borrowed.
#[derive(Debug, Default)]
struct Requests {
    focus: Option<NodeId>,
    click: Option<NodeId>,
    actions: Vec<Action>,
}

impl FocusHost<NodeId> for Requests {
    fn focus(&mut self, node: NodeId) {
        self.focus = Some(node);
    }

    fn click(&mut self, node: NodeId) {
        self.click = Some(node);
    }

    fn perform(&mut self, action: &Action) {
        self.actions.push(action.clone());
    }
}

/// Where a node sits in the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Button(usize),
    Entry(usize, usize),
}

/// A mounted action bar. Dropping it unregisters its chords.
pub struct ActionBar {
    items: Vec<ActionItem>,
    document: Document,
    buttons: Vec<NodeId>,
    /// Menu container per item (`None` for plain buttons).
    menus: Vec<Option<NodeId>>,
    entries: Vec<Vec<NodeId>>,
    focused: Option<NodeId>,
    open_menu: Option<usize>,
    dispatcher: Dispatcher,
    menu_scope: Option<Subscription>,
    _scopes: Vec<Subscription>,
}

impl ActionBar {
    /// Build the document for `items` and register the bar's chords.
    ///
    /// Focus starts on the first focusable button.
    pub fn mount(items: Vec<ActionItem>, keymap: &Keymap) -> Self {
        let mut document = Document::new();
        let root = document.root();
        let bar = document.append(root, Element::new(Role::Group, "action-bar"));

        let mut buttons = Vec::with_capacity(items.len());
        let mut menus = Vec::with_capacity(items.len());
        let mut entries = Vec::with_capacity(items.len());

        for item in &items {
            let button = document.append(bar, Element::new(Role::Button, item.body.clone()));
            buttons.push(button);
            if item.has_menu() {
                let menu = document.append(
                    button,
                    Element::new(Role::Group, format!("{} menu", item.body)).hidden(true),
                );
                let nodes = item
                    .items
                    .iter()
                    .map(|entry| {
                        document.append(menu, Element::new(Role::MenuItem, entry.label.clone()))
                    })
                    .collect();
                menus.push(Some(menu));
                entries.push(nodes);
            } else {
                menus.push(None);
                entries.push(Vec::new());
            }
        }

        let hotkeys: Vec<(Chord, Action)> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let chord = item.open_hotkey?;
                match (&item.command, item.has_menu()) {
                    (_, true) => Some((chord, Action::OpenMenu(i))),
                    (Some(command), false) => Some((chord, Action::Run(command.clone()))),
                    (None, false) => None,
                }
            })
            .collect();

        let scopes = vec![
            keymap.subscribe("navigation", navigation_bindings()),
            keymap.subscribe("action-bar", hotkeys),
        ];

        let focused = document.focus_stops().first().copied();
        info!(
            "Action bar mounted: {} items, {} nodes, focus on {:?}",
            items.len(),
            document.document_order().len(),
            focused.map(|id| document.label(id).to_string())
        );

        Self {
            items,
            document,
            buttons,
            menus,
            entries,
            focused,
            open_menu: None,
            dispatcher: Dispatcher::new(keymap.clone()),
            menu_scope: None,
            _scopes: scopes,
        }
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn open_menu(&self) -> Option<usize> {
        self.open_menu
    }

    pub fn button(&self, index: usize) -> Option<NodeId> {
        self.buttons.get(index).copied()
    }

    pub fn entries(&self, index: usize) -> &[NodeId] {
        self.entries.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_selected(&mut self, index: usize, selected: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.selected = selected;
        }
    }

    /// Enable or disable a button. A disabled button is skipped by
    /// navigation. Disabling closes its menu, and focus on it moves to the
    /// next focus stop (or the previous one when it was the last).
    pub fn set_disabled(&mut self, index: usize, disabled: bool) {
        let Some(&button) = self.buttons.get(index) else {
            return;
        };
        if disabled && self.open_menu == Some(index) {
            self.close_menu();
        }
        self.document.set_disabled(button, disabled);
        if disabled && self.focused == Some(button) {
            let next = find_next_focusable(&self.document, button, Direction::Next)
                .or_else(|| find_next_focusable(&self.document, button, Direction::Previous));
            debug!("Focused button '{}' disabled, focus -> {:?}", self.items[index].body, next);
            self.focused = next;
        }
    }

    /// Locate a node within the bar.
    pub fn slot(&self, node: NodeId) -> Option<Slot> {
        if let Some(i) = self.buttons.iter().position(|&b| b == node) {
            return Some(Slot::Button(i));
        }
        self.entries.iter().enumerate().find_map(|(i, nodes)| {
            nodes
                .iter()
                .position(|&n| n == node)
                .map(|j| Slot::Entry(i, j))
        })
    }

    /// Label of the focused element, for status display.
    pub fn focused_label(&self) -> Option<&str> {
        self.focused.map(|id| self.document.label(id))
    }

    /// Handle one key press end to end.
    pub fn handle_key(&mut self, chord: Chord, effects: &mut dyn Effects) -> Dispatched<NodeId> {
        let mut input = KeyInput::new(chord, self.focused);
        let mut requests = Requests::default();
        let outcome = self
            .dispatcher
            .dispatch(&self.document, &mut requests, &mut input);
        debug!("Key {} -> {:?}", chord, outcome);

        if let Some(node) = requests.focus {
            self.focus(node);
        }
        if let Some(node) = requests.click {
            self.click(node, effects);
        }
        for action in requests.actions {
            self.perform(&action, effects);
        }
        outcome
    }

    /// Give focus to `node`, closing the open menu if focus leaves it.
    pub fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
        if let Some(open) = self.open_menu
            && let Some(menu) = self.menus[open]
            && !self.is_within(node, menu)
        {
            self.set_menu_open(open, false);
        }
    }

    /// Activate `node`: toggle its menu, or run its command.
    pub fn click(&mut self, node: NodeId, effects: &mut dyn Effects) {
        match self.slot(node) {
            Some(Slot::Button(i)) => self.activate_item(i, effects),
            Some(Slot::Entry(i, j)) => {
                let command = self.items[i].items[j].command.clone();
                info!("Menu '{}' -> '{}'", self.items[i].body, self.items[i].items[j].label);
                command.apply(effects);
                self.close_menu();
            }
            None => debug!("Click on {} outside the bar ignored", node),
        }
    }

    fn perform(&mut self, action: &Action, effects: &mut dyn Effects) {
        match action {
            Action::OpenMenu(i) => self.activate_item(*i, effects),
            Action::Dismiss => self.close_menu(),
            Action::Run(command) => command.apply(effects),
            Action::FocusNext | Action::FocusPrevious | Action::Activate => {}
        }
    }

    fn activate_item(&mut self, index: usize, effects: &mut dyn Effects) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        if item.has_menu() {
            if self.open_menu == Some(index) {
                self.close_menu();
            } else {
                self.set_menu_open(index, true);
            }
        } else if let Some(command) = item.command.clone() {
            info!("Action '{}'", item.body);
            command.apply(effects);
        }
    }

    /// Close the open menu and return focus to its button when focus was
    /// inside the menu.
    pub fn close_menu(&mut self) {
        let Some(open) = self.open_menu else {
            return;
        };
        let owner = self
            .focused
            .filter(|&f| self.menus[open].is_some_and(|menu| self.is_within(f, menu)))
            .and_then(|f| find_focusable_parent(&self.document, f));
        self.set_menu_open(open, false);
        if let Some(owner) = owner {
            self.focused = Some(owner);
        }
    }

    fn set_menu_open(&mut self, index: usize, open: bool) {
        if open && let Some(current) = self.open_menu.filter(|&c| c != index) {
            self.set_menu_open(current, false);
        }
        let Some(menu) = self.menus.get(index).copied().flatten() else {
            return;
        };
        self.document.set_hidden(menu, !open);

        if open {
            self.open_menu = Some(index);
            self.menu_scope = Some(
                self.dispatcher
                    .keymap()
                    .subscribe("menu", [(Chord::key(Key::Escape), Action::Dismiss)]),
            );
            if let Some(first) =
                find_focusable_descendant(&self.document, menu, None, Direction::Next)
            {
                self.focused = Some(first);
            }
            debug!("Opened menu '{}'", self.items[index].body);
        } else if self.open_menu == Some(index) {
            self.open_menu = None;
            self.menu_scope = None;
            debug!("Closed menu '{}'", self.items[index].body);
        }
    }

    fn is_within(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.document.parent(id);
        }
        false
    }
}
