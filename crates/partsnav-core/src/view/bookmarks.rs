use crate::catalog::{Bookmark, CatalogProvider, part_label};
use crate::input::Key;
use crate::menu::{ListItem, ListWindow};
use crate::theme::Theme;

use super::{Reply, Viewport, layout, list_pane, move_cursor, open_selected_part};

#[derive(Debug)]
pub struct BookmarksView {
    menu: ListWindow,
}

impl BookmarksView {
    pub fn new(provider: &dyn CatalogProvider) -> Self {
        let items = provider.bookmarks().iter().map(bookmark_item).collect();
        Self {
            menu: ListWindow::new(items),
        }
    }

    pub fn menu(&self) -> &ListWindow {
        &self.menu
    }

    pub fn handle_key(&mut self, key: Key) -> Reply {
        if move_cursor(&mut self.menu, key) || !key.is_enter() {
            return Reply::Idle;
        }
        open_selected_part(&self.menu, false)
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let left = [
            Theme::paint(theme.header, "SAVED PARTS"),
            String::new(),
            format!("{} bookmarks", self.menu.len()),
            String::new(),
            Theme::paint(theme.dim, "Press b on any part"),
            Theme::paint(theme.dim, "to bookmark it"),
        ]
        .join("\n");

        let right = list_pane(
            &Theme::paint(theme.header, "BOOKMARKED PARTS"),
            &mut self.menu,
            viewport.split_height(),
            &[
                "No bookmarks yet",
                "",
                "Navigate to a part and",
                "press 'b' to bookmark it",
            ],
            theme,
        );

        layout(viewport, Some("esc back"), "", &left, &right, theme)
    }
}

fn bookmark_item(bookmark: &Bookmark) -> ListItem {
    let location = match &bookmark.subgroup_name {
        Some(subgroup) => format!("{} > {}", bookmark.group_name, subgroup),
        None => bookmark.group_name.clone(),
    };
    let hint = match &bookmark.description {
        Some(description) => format!("{description} - {location}"),
        None => location,
    };
    ListItem::new(
        bookmark.part_id.to_string(),
        part_label(&bookmark.part_number, bookmark.pnc.as_deref()),
    )
    .with_hint(hint)
}

#[cfg(test)]
mod tests {
    use crate::catalog::CatalogProvider;
    use crate::input::Key;
    use crate::screen::Screen;
    use crate::test_support::FakeCatalog;
    use crate::text::strip_ansi;
    use crate::theme::Theme;
    use crate::view::{Reply, Viewport};

    use super::BookmarksView;

    #[test]
    fn empty_list_explains_how_to_bookmark() {
        let mut view = BookmarksView::new(&FakeCatalog::sample());
        let out = strip_ansi(&view.render(Viewport::new(100, 30), &Theme::default()));
        assert!(out.contains("0 bookmarks"));
        assert!(out.contains("No bookmarks yet"));
        assert!(out.contains("press 'b' to bookmark it"));
    }

    #[test]
    fn rows_carry_location_hint_and_open_part() {
        let catalog = FakeCatalog::sample();
        catalog.toggle_bookmark(1).expect("toggle");
        let mut view = BookmarksView::new(&catalog);

        let item = &view.menu().items()[0];
        assert_eq!(item.label, "[11] MD100");
        assert_eq!(item.hint, "Head gasket - Engine > Cylinder head");
        assert_eq!(
            view.handle_key(Key::Enter),
            Reply::Navigate(Screen::part_detail(1, false))
        );
    }
}
