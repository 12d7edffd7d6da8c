use crate::catalog::{Group, Part, Subgroup};
use crate::input::Key;
use crate::menu::{ListItem, ListWindow};
use crate::theme::Theme;

use super::{
    DiagramPane, Reply, ViewContext, Viewport, layout, list_pane, move_cursor, open_selected_part,
};

#[derive(Debug)]
pub struct SubgroupView {
    subgroup: Option<Subgroup>,
    group: Option<Group>,
    part_count: usize,
    menu: ListWindow,
    diagram: DiagramPane,
}

impl SubgroupView {
    pub fn new(ctx: &mut ViewContext<'_>, subgroup_id: &str) -> Self {
        let provider = ctx.provider;
        let subgroup = provider.subgroup(subgroup_id);
        let group = subgroup.as_ref().and_then(|s| provider.group(&s.group_id));
        let parts = provider.parts_for_subgroup(subgroup_id);

        let diagram = match provider.diagram_for_subgroup(subgroup_id) {
            Some(diagram) => DiagramPane::load(ctx, Some(diagram.id), diagram.image_path.as_deref()),
            None => DiagramPane::missing(),
        };

        Self {
            subgroup,
            group,
            part_count: parts.len(),
            menu: ListWindow::new(parts.iter().map(part_item).collect()),
            diagram,
        }
    }

    pub fn menu(&self) -> &ListWindow {
        &self.menu
    }

    pub fn image_id(&self) -> Option<u32> {
        self.diagram.image_id()
    }

    pub fn handle_key(&mut self, key: Key) -> Reply {
        if move_cursor(&mut self.menu, key) || !key.is_enter() {
            return Reply::Idle;
        }
        open_selected_part(&self.menu, false)
    }

    pub fn render(&mut self, viewport: Viewport, theme: &Theme) -> String {
        let left = self.diagram.lines(theme).join("\n");

        let title = match (&self.group, &self.subgroup) {
            (Some(group), Some(subgroup)) => format!(
                "{} > {}",
                group.name.to_uppercase(),
                subgroup.name.to_uppercase()
            ),
            _ => "UNKNOWN".to_string(),
        };
        let title = format!(
            "{}     {}",
            Theme::paint(theme.header, title),
            Theme::paint(theme.count, self.part_count)
        );
        let right = list_pane(
            &title,
            &mut self.menu,
            viewport.split_height(),
            &["No parts found"],
            theme,
        );

        layout(viewport, None, &self.diagram.placement(), &left, &right, theme)
    }
}

fn part_item(part: &Part) -> ListItem {
    ListItem::new(part.id.to_string(), part.label())
        .with_hint(part.description.clone().unwrap_or_default())
}
