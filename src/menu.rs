//! Hiding navigation menu items from public pages.
//!
//! Hidden items are dropped when a menu is rendered for visitors and kept, with a
//! `[Hidden]` marker, in the menu editor.

use std::collections::HashSet;

/// Form field the editor checkbox submits as, indexed by item id.
pub const HIDDEN_FIELD_NAME: &str = "menu-item-hide";

/// Appended to hidden item titles in the editor.
pub const HIDDEN_INDICATOR: &str = r#" <span class="hidden-menu-indicator">[Hidden]</span>"#;

/// Injected into the editor's head to style [`HIDDEN_INDICATOR`].
pub const ADMIN_STYLES: &str = r#"<style>
    .menu-item-bar .menu-item-handle .item-title .hidden-menu-indicator {
        color: red;
        font-weight: bold;
        margin-left: 5px;
    }
</style>"#;

/// Persistence of the per-item hidden flag.
pub trait MenuFlagStore {
    fn get_flag(&self, item_id: u64) -> bool;
    fn set_flag(&mut self, item_id: u64, hidden: bool);
}

/// Flag store kept in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFlagStore {
    hidden: HashSet<u64>,
}

impl InMemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MenuFlagStore for InMemoryFlagStore {
    fn get_flag(&self, item_id: u64) -> bool {
        self.hidden.contains(&item_id)
    }

    fn set_flag(&mut self, item_id: u64, hidden: bool) {
        if hidden {
            self.hidden.insert(item_id);
        } else {
            self.hidden.remove(&item_id);
        }
    }
}

/// Where a menu is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContext {
    /// Pages served to visitors.
    Public,
    /// The admin menu editor.
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: u64,
    pub title: String,
    /// Set on hidden items rendered in the editor.
    pub hidden_indicator: bool,
}

impl MenuItem {
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            hidden_indicator: false,
        }
    }
}

/// Renders the "Hide menu item" checkbox shown under each item in the menu editor.
///
/// The checkbox submits as `menu-item-hide[<id>]=1` and starts checked for hidden items.
pub fn hidden_field_html<S: MenuFlagStore + ?Sized>(item_id: u64, store: &S) -> String {
    let checked = if store.get_flag(item_id) {
        " checked='checked'"
    } else {
        ""
    };
    format!(
        r#"<p class="field-hide-menu-item description description-wide">
    <label for="edit-menu-item-hide-{item_id}">
        <input type="checkbox" id="edit-menu-item-hide-{item_id}" name="{HIDDEN_FIELD_NAME}[{item_id}]" value="1"{checked} />
        Hide menu item
    </label>
</p>"#
    )
}

/// Stores the editor checkbox state: checked hides the item, unchecked clears the flag.
pub fn save_hidden_flag<S: MenuFlagStore + ?Sized>(store: &mut S, item_id: u64, checked: bool) {
    store.set_flag(item_id, checked);
}

/// Removes hidden items for public rendering; marks them in the editor.
pub fn filter_menu_items<S: MenuFlagStore + ?Sized>(
    items: Vec<MenuItem>,
    store: &S,
    context: RenderContext,
) -> Vec<MenuItem> {
    match context {
        RenderContext::Public => items
            .into_iter()
            .filter(|item| !store.get_flag(item.id))
            .collect(),
        RenderContext::Editor => items
            .into_iter()
            .map(|mut item| {
                if store.get_flag(item.id) {
                    item.hidden_indicator = true;
                }
                item
            })
            .collect(),
    }
}

/// Appends [`HIDDEN_INDICATOR`] to a hidden item's title in the editor.
pub fn decorate_title<S: MenuFlagStore + ?Sized>(
    title: &str,
    item_id: u64,
    store: &S,
    context: RenderContext,
) -> String {
    if context == RenderContext::Editor && store.get_flag(item_id) {
        format!("{title}{HIDDEN_INDICATOR}")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new(10, "Home"),
            MenuItem::new(11, "Shop"),
            MenuItem::new(12, "Staging"),
            MenuItem::new(13, "Contact"),
        ]
    }

    fn store_hiding(ids: &[u64]) -> InMemoryFlagStore {
        let mut store = InMemoryFlagStore::new();
        for &id in ids {
            save_hidden_flag(&mut store, id, true);
        }
        store
    }

    #[test]
    fn test_public_render_drops_hidden_items_in_order() {
        let store = store_hiding(&[11, 12]);
        let items = filter_menu_items(menu(), &store, RenderContext::Public);

        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Home", "Contact"]);
        assert!(items.iter().all(|i| !i.hidden_indicator));
    }

    #[test]
    fn test_editor_keeps_and_marks_hidden_items() {
        let store = store_hiding(&[12]);
        let items = filter_menu_items(menu(), &store, RenderContext::Editor);

        assert_eq!(items.len(), 4);
        let marked: Vec<_> = items
            .iter()
            .filter(|i| i.hidden_indicator)
            .map(|i| i.id)
            .collect();
        assert_eq!(marked, [12]);
    }

    #[test]
    fn test_unchecking_clears_flag() {
        let mut store = store_hiding(&[11]);
        save_hidden_flag(&mut store, 11, false);
        save_hidden_flag(&mut store, 99, false);

        assert!(!store.get_flag(11));
        assert!(!store.get_flag(99));
        assert_eq!(filter_menu_items(menu(), &store, RenderContext::Public).len(), 4);
    }

    #[test]
    fn test_hidden_field_reflects_flag() {
        let store = store_hiding(&[12]);

        let hidden = hidden_field_html(12, &store);
        assert!(hidden.contains(r#"name="menu-item-hide[12]" value="1" checked='checked' />"#));
        assert!(hidden.contains(r#"<label for="edit-menu-item-hide-12">"#));
        assert!(hidden.contains("Hide menu item"));

        let visible = hidden_field_html(10, &store);
        assert!(visible.contains(r#"name="menu-item-hide[10]" value="1" />"#));
        assert!(!visible.contains("checked"));
    }

    #[test]
    fn test_decorate_title() {
        let store = store_hiding(&[12]);

        assert_eq!(
            decorate_title("Staging", 12, &store, RenderContext::Editor),
            r#"Staging <span class="hidden-menu-indicator">[Hidden]</span>"#
        );
        assert_eq!(decorate_title("Staging", 12, &store, RenderContext::Public), "Staging");
        assert_eq!(decorate_title("Home", 10, &store, RenderContext::Editor), "Home");
    }
}
