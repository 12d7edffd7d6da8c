use std::fmt;

/// A destination the navigator can show. Values are plain descriptors; the
/// view built for one lives in [`crate::view::ScreenView`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Group { group_id: String },
    Subgroup { subgroup_id: String },
    PartDetail { part_id: i64, came_from_search: bool },
    Search { query: String },
    Bookmarks,
    Notes,
}

impl Screen {
    pub fn group(group_id: impl Into<String>) -> Self {
        Screen::Group {
            group_id: group_id.into(),
        }
    }

    pub fn subgroup(subgroup_id: impl Into<String>) -> Self {
        Screen::Subgroup {
            subgroup_id: subgroup_id.into(),
        }
    }

    pub fn part_detail(part_id: i64, came_from_search: bool) -> Self {
        Screen::PartDetail {
            part_id,
            came_from_search,
        }
    }

    pub fn search(query: impl Into<String>) -> Self {
        Screen::Search {
            query: query.into(),
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, Screen::Search { .. })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Home => f.write_str("home"),
            Screen::Group { group_id } => write!(f, "group:{group_id}"),
            Screen::Subgroup { subgroup_id } => write!(f, "subgroup:{subgroup_id}"),
            Screen::PartDetail { part_id, .. } => write!(f, "part:{part_id}"),
            Screen::Search { query } => write!(f, "search:{query:?}"),
            Screen::Bookmarks => f.write_str("bookmarks"),
            Screen::Notes => f.write_str("notes"),
        }
    }
}
