//! Two-level settings menu and its focus navigator.
//!
//! The menu is a root page plus named sub-pages. Root rows may link to a
//! sub-page; entering a sub-page always focuses its first row, while going
//! back restores the row that was focused in the parent.

use heapless::Vec;

use crate::config::{MAX_MENU_ITEMS, MAX_MENU_PAGES, MENU_DEPTH};
use crate::error::Error;
use crate::input::Key;
use crate::ui::input_logic::{select_next, select_prev};

/// Index of a page inside a [`Menu`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageId(u8);

impl PageId {
    /// The untitled entry page.
    pub const ROOT: PageId = PageId(0);

    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// What ENTER does on a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ItemAction {
    None,
    Navigate(PageId),
}

/// One focusable row: a label, an optional value shown on the right and
/// an optional action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub value: Option<&'static str>,
    pub action: ItemAction,
}

impl MenuItem {
    /// A plain row with a fixed value.
    pub const fn setting(label: &'static str, value: &'static str) -> Self {
        Self {
            label,
            value: Some(value),
            action: ItemAction::None,
        }
    }

    /// A row that opens `page`.
    pub const fn link(label: &'static str, page: PageId) -> Self {
        Self {
            label,
            value: Some(">"),
            action: ItemAction::Navigate(page),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuPage {
    title: Option<&'static str>,
    items: Vec<MenuItem, MAX_MENU_ITEMS>,
}

impl MenuPage {
    /// `None` for the root page.
    pub fn title(&self) -> Option<&'static str> {
        self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fixed-capacity page table. Page 0 is always the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pages: Vec<MenuPage, MAX_MENU_PAGES>,
}

impl Menu {
    /// A menu holding only an empty root page.
    pub fn new() -> Self {
        let mut pages = Vec::new();
        // Capacity is at least one page.
        let _ = pages.push(MenuPage {
            title: None,
            items: Vec::new(),
        });
        Self { pages }
    }

    /// The device menu: FreePSXBoot and Display settings.
    pub fn standard() -> Self {
        match Self::build_standard() {
            Ok(menu) => menu,
            Err(e) => {
                error!("Menu: stock menu does not fit: {:?}", e);
                Self::new()
            }
        }
    }

    fn build_standard() -> Result<Self, Error> {
        let mut menu = Self::new();

        let freepsxboot = menu.add_page("FreePSXBoot")?;
        menu.add_item(freepsxboot, MenuItem::setting("Enable", "Yes"))?;
        menu.add_item(freepsxboot, MenuItem::setting("Model", "1001v3"))?;
        menu.add_item(freepsxboot, MenuItem::setting("Slot", "Slot 1"))?;

        let display = menu.add_page("Display")?;
        menu.add_item(display, MenuItem::setting("Auto off", "30s"))?;

        menu.add_item(PageId::ROOT, MenuItem::link("FreePSXBoot", freepsxboot))?;
        menu.add_item(PageId::ROOT, MenuItem::link("Display", display))?;

        Ok(menu)
    }

    /// Add a titled sub-page.
    pub fn add_page(&mut self, title: &'static str) -> Result<PageId, Error> {
        let id = u8::try_from(self.pages.len()).map_err(|_| Error::MenuFull)?;
        self.pages
            .push(MenuPage {
                title: Some(title),
                items: Vec::new(),
            })
            .map_err(|_| Error::MenuFull)?;
        Ok(PageId(id))
    }

    /// Append a row. Links live on the root page only and must point at an
    /// existing sub-page.
    pub fn add_item(&mut self, page: PageId, item: MenuItem) -> Result<(), Error> {
        if let ItemAction::Navigate(target) = item.action {
            if page != PageId::ROOT || target == PageId::ROOT || self.page(target).is_none() {
                return Err(Error::InvalidPage);
            }
        }
        self.pages
            .get_mut(page.index())
            .ok_or(Error::InvalidPage)?
            .items
            .push(item)
            .map_err(|_| Error::MenuFull)
    }

    pub fn page(&self, id: PageId) -> Option<&MenuPage> {
        self.pages.get(id.index())
    }

    pub fn root(&self) -> &MenuPage {
        &self.pages[0]
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::standard()
    }
}

/// Current page and focused row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NavigationState {
    pub page: PageId,
    pub focus: usize,
}

impl NavigationState {
    pub const ROOT: NavigationState = NavigationState {
        page: PageId::ROOT,
        focus: 0,
    };
}

/// Result of offering a key to the navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEffect {
    /// Not a menu key here; the screen decides what happens.
    Unhandled,
    /// Consumed without visible change.
    Unchanged,
    /// Focus moved within the current page.
    Focus(usize),
    /// A different page is shown with the given row focused.
    Page(PageId, usize),
}

/// Owns the menu and the focus state.
#[derive(Clone, Debug)]
pub struct Navigator {
    menu: Menu,
    state: NavigationState,
    /// Parent pages with the row that was focused when we left them.
    history: Vec<NavigationState, MENU_DEPTH>,
}

impl Navigator {
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            state: NavigationState::ROOT,
            history: Vec::new(),
        }
    }

    /// Back to the root page, first row, with no history.
    pub fn reset(&mut self) {
        self.history.clear();
        self.state = NavigationState::ROOT;
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn page(&self) -> PageId {
        self.state.page
    }

    pub fn focus(&self) -> usize {
        self.state.focus
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn current_page(&self) -> &MenuPage {
        self.menu.page(self.state.page).unwrap_or(self.menu.root())
    }

    /// React to one key press.
    pub fn handle(&mut self, key: Key) -> MenuEffect {
        let count = self.current_page().len();
        if self.state.focus >= count {
            debug!(
                "Menu: ignoring key, focus {} outside page of {}",
                self.state.focus, count
            );
            return MenuEffect::Unchanged;
        }

        match key {
            Key::Next => {
                self.state.focus = select_next(self.state.focus, count);
                MenuEffect::Focus(self.state.focus)
            }
            Key::Prev => {
                self.state.focus = select_prev(self.state.focus, count);
                MenuEffect::Focus(self.state.focus)
            }
            Key::Enter => self.activate(),
            // Leaving the root page is the screen's business.
            Key::Back if self.state.page == PageId::ROOT => MenuEffect::Unhandled,
            Key::Back => self.back(),
            Key::Menu => MenuEffect::Unhandled,
        }
    }

    fn activate(&mut self) -> MenuEffect {
        let item = self.current_page().items()[self.state.focus];
        match item.action {
            ItemAction::None => MenuEffect::Unchanged,
            ItemAction::Navigate(target) => {
                let target_empty = self.menu.page(target).map_or(true, MenuPage::is_empty);
                if target_empty {
                    warn!("Menu: not entering empty page {:?}", target);
                    return MenuEffect::Unchanged;
                }
                if self.history.push(self.state).is_err() {
                    warn!("Menu: nesting deeper than {} pages", MENU_DEPTH);
                    return MenuEffect::Unchanged;
                }
                self.state = NavigationState {
                    page: target,
                    focus: 0,
                };
                debug!("Menu: enter {}", item.label);
                MenuEffect::Page(target, 0)
            }
        }
    }

    fn back(&mut self) -> MenuEffect {
        self.state = self.history.pop().unwrap_or(NavigationState::ROOT);
        MenuEffect::Page(self.state.page, self.state.focus)
    }
}
