use std::collections::HashMap;

use crate::catalog::CatalogProvider;
use crate::input::Key;
use crate::menu::{ListItem, ListWindow};
use crate::screen::Screen;
use crate::theme::Theme;

use super::{Reply, Viewport, layout, list_pane, move_cursor};

#[derive(Debug)]
pub struct HomeView {
    menu: ListWindow,
    /// Destination for each menu row, by index.
    targets: Vec<Screen>,
    group_count: usize,
    subgroup_count: usize,
}

impl HomeView {
    pub fn new(provider: &dyn CatalogProvider) -> Self {
        let groups = provider.groups();
        let subgroups = provider.all_subgroups();

        let mut per_group: HashMap<&str, usize> = HashMap::new();
        for subgroup in &subgroups {
            *per_group.entry(subgroup.group_id.as_str()).or_default() += 1;
        }

        let mut items = Vec::with_capacity(groups.len() + 3);
        let mut targets = Vec::with_capacity(groups.len() + 3);
        for group in &groups {
            let count = per_group.get(group.id.as_str()).copied().unwrap_or(0);
            items.push(ListItem::new(group.id.clone(), group.name.clone()).with_hint(count.to_string()));
            targets.push(Screen::group(group.id.clone()));
        }
        for (id, label, target) in [
            ("search", "Search parts", Screen::search("")),
            ("bookmarks", "Bookmarks", Screen::Bookmarks),
            ("notes", "Notes", Screen::Notes),
        ] {
            items.push(ListItem::new(id, label));
            targets.push(target);
        }

        Self {
            menu: ListWindow::new(items),
            targets,
            group_count: groups.len(),
            subgroup_count: subgroups.len(),
        }
    }

    pub fn menu(&self) -> &ListWindow {
        &self.menu
    }

    pub fn handle_key(&mut self, key: Key) -> Reply {
        if move_cursor(&mut self.menu, key) {
            return Reply::Idle;
        }
        match key {
            Key::Char('B') => Reply::Navigate(Screen::Bookmarks),
            Key::Char('N') => Reply::Navigate(Screen::Notes),
            Key::Enter => self
                .targets
                .get(self.menu.cursor())
                .cloned()
                .map_or(Reply::Idle, Reply::Navigate),
            _ => Reply::Idle,
        }
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let left = [
            Theme::paint(theme.header, "PARTS CATALOG"),
            String::new(),
            format!("{} groups", Theme::paint(theme.count, self.group_count)),
            format!("{} subgroups", Theme::paint(theme.count, self.subgroup_count)),
            String::new(),
            Theme::paint(theme.dim, "/  search"),
            Theme::paint(theme.dim, "B  bookmarks"),
            Theme::paint(theme.dim, "N  notes"),
            Theme::paint(theme.dim, "q  quit"),
        ]
        .join("\n");

        let title = Theme::paint(theme.header, "GROUPS");
        let right = list_pane(&title, &mut self.menu, viewport.split_height(), &[], theme);

        layout(viewport, Some("q quit"), "", &left, &right, theme)
    }
}
