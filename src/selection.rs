use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::hash::Hash;

use iced::widget::container;
use iced::{Point, Rectangle, Size};
use tracing::debug;

pub const MENU_GAP: f32 = 8.0;
pub const CARD_MENU_SIZE: Size = Size::new(224.0, 272.0);
pub const SORT_MENU_SIZE: Size = Size::new(192.0, 168.0);

/// Widget id wrapping the gear button of one class card.
pub fn card_menu_trigger(id: impl fmt::Display) -> container::Id {
    container::Id::new(format!("card-menu-trigger-{id}"))
}

pub fn sort_dropdown_trigger() -> container::Id {
    container::Id::new("sort-dropdown-trigger")
}

/// Zero-size bounds at the pointer, for triggers that could not be measured.
pub fn pointer_bounds(cursor: Point) -> Rectangle {
    Rectangle::new(cursor, Size::ZERO)
}

/// Top-left corner for a menu of `menu` size hanging under `trigger`,
/// right-aligned with its right edge and kept inside `viewport`. Flips above
/// the trigger when there is no room below.
pub fn anchor_below(trigger: Rectangle, menu: Size, viewport: Size) -> Point {
    let max_x = (viewport.width - menu.width).max(0.0);
    let x = (trigger.x + trigger.width - menu.width).clamp(0.0, max_x);

    let below = trigger.y + trigger.height + MENU_GAP;
    let y = if below + menu.height <= viewport.height {
        below
    } else {
        (trigger.y - MENU_GAP - menu.height).max(0.0)
    };
    Point::new(x, y)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuState<K> {
    Closed,
    OpenFor { id: K, anchor: Point },
}

/// A set of menus keyed by `K` of which at most one is open.
#[derive(Debug, Clone)]
pub struct MenuDomain<K> {
    state: MenuState<K>,
}

impl<K> Default for MenuDomain<K> {
    fn default() -> Self {
        Self {
            state: MenuState::Closed,
        }
    }
}

impl<K: Copy + PartialEq + Debug> MenuDomain<K> {
    pub fn state(&self) -> MenuState<K> {
        self.state
    }

    /// Trigger press for `id`. Always closes the domain; `true` means `id`
    /// should be opened once its trigger bounds are known.
    pub fn toggle(&mut self, id: K) -> bool {
        let reopen = !self.is_open_for(id);
        self.state = MenuState::Closed;
        debug!(?id, reopen, "menu toggled");
        reopen
    }

    /// Opening `id` closes whatever else was open in this domain.
    pub fn open(&mut self, id: K, trigger: Rectangle, menu: Size, viewport: Size) {
        self.state = MenuState::OpenFor {
            id,
            anchor: anchor_below(trigger, menu, viewport),
        };
    }

    /// Outside interaction. Returns `true` if something was open.
    pub fn dismiss(&mut self) -> bool {
        let was_open = self.is_listening();
        self.state = MenuState::Closed;
        was_open
    }

    pub fn open_id(&self) -> Option<K> {
        match self.state {
            MenuState::OpenFor { id, .. } => Some(id),
            MenuState::Closed => None,
        }
    }

    pub fn is_open_for(&self, id: K) -> bool {
        self.open_id() == Some(id)
    }

    pub fn anchor(&self) -> Option<Point> {
        match self.state {
            MenuState::OpenFor { anchor, .. } => Some(anchor),
            MenuState::Closed => None,
        }
    }

    /// The outside-click listener only needs to run while a menu is open.
    pub fn is_listening(&self) -> bool {
        !matches!(self.state(), MenuState::Closed)
    }
}

/// A single popover such as the sort dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Popover {
    anchor: Option<Point>,
}

impl Popover {
    /// Closes the popover; `true` means it should open once measured.
    pub fn toggle(&mut self) -> bool {
        self.anchor.take().is_none()
    }

    pub fn open(&mut self, trigger: Rectangle, menu: Size, viewport: Size) {
        self.anchor = Some(anchor_below(trigger, menu, viewport));
    }

    pub fn dismiss(&mut self) -> bool {
        self.anchor.take().is_some()
    }

    pub fn is_open(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }
}

/// Hover tooltips. Instances are independent of one another.
#[derive(Debug, Clone)]
pub struct TooltipSet<K> {
    visible: HashSet<K>,
}

impl<K> Default for TooltipSet<K> {
    fn default() -> Self {
        Self {
            visible: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> TooltipSet<K> {
    pub fn enter(&mut self, key: K) {
        self.visible.insert(key);
    }

    pub fn leave(&mut self, key: &K) {
        self.visible.remove(key);
    }

    pub fn is_visible(&self, key: &K) -> bool {
        self.visible.contains(key)
    }

    pub fn clear(&mut self) {
        self.visible.clear();
    }
}
