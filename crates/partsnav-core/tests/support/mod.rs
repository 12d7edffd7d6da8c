#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::{DynamicImage, RgbaImage};
use partsnav_core::{
    Bookmark, CatalogError, CatalogProvider, Diagram, Group, ImageLoader, LoadError, Navigator,
    Note, Part, PartRecord, SearchHit, Subgroup, SubgroupWithGroup, Theme, Viewport,
};

/// Two groups, a long subgroup list under G1 and a diagram for S1.
/// Search calls are recorded so tests can see when lookups ran.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    pub searches: Rc<RefCell<Vec<String>>>,
}

fn group(id: &str) -> Group {
    Group {
        id: id.to_string(),
        name: format!("Group {id}"),
    }
}

fn subgroup(n: usize) -> Subgroup {
    Subgroup {
        id: format!("S{n}"),
        name: format!("Subgroup {n}"),
        group_id: "G1".to_string(),
    }
}

fn part(id: i64) -> Part {
    Part {
        id,
        part_number: format!("P{id}"),
        description: Some(format!("part {id}")),
        diagram_id: "D1".to_string(),
        group_id: "G1".to_string(),
        subgroup_id: Some("S1".to_string()),
        ..Part::default()
    }
}

impl CatalogProvider for MemoryCatalog {
    fn groups(&self) -> Vec<Group> {
        vec![group("G1"), group("G2")]
    }

    fn group(&self, id: &str) -> Option<Group> {
        ["G1", "G2"].contains(&id).then(|| group(id))
    }

    fn all_subgroups(&self) -> Vec<SubgroupWithGroup> {
        (1..=30)
            .map(|n| SubgroupWithGroup {
                subgroup_id: format!("S{n}"),
                subgroup_name: format!("Subgroup {n}"),
                group_id: "G1".to_string(),
                group_name: "Group G1".to_string(),
            })
            .collect()
    }

    fn subgroups(&self, group_id: &str) -> Vec<Subgroup> {
        if group_id == "G1" {
            (1..=30).map(subgroup).collect()
        } else {
            Vec::new()
        }
    }

    fn subgroup(&self, id: &str) -> Option<Subgroup> {
        let n: usize = id.strip_prefix('S')?.parse().ok()?;
        (1..=30).contains(&n).then(|| subgroup(n))
    }

    fn parts_for_subgroup(&self, subgroup_id: &str) -> Vec<Part> {
        if subgroup_id == "S1" {
            (1..=3).map(part).collect()
        } else {
            Vec::new()
        }
    }

    fn part(&self, id: i64) -> Option<PartRecord> {
        (1..=3).contains(&id).then(|| PartRecord {
            part: part(id),
            image_path: Some("images/d1.png".to_string()),
            group_name: "Group G1".to_string(),
            subgroup_name: Some("Subgroup 1".to_string()),
        })
    }

    fn diagram_for_subgroup(&self, subgroup_id: &str) -> Option<Diagram> {
        (subgroup_id == "S1").then(|| Diagram {
            id: "D1".to_string(),
            group_id: "G1".to_string(),
            subgroup_id: Some("S1".to_string()),
            name: "Diagram 1".to_string(),
            image_path: Some("images/d1.png".to_string()),
        })
    }

    fn search(&self, query: &str) -> Vec<SearchHit> {
        self.searches.borrow_mut().push(query.to_string());
        (1..=3)
            .map(part)
            .filter(|p| !query.is_empty() && p.part_number.to_lowercase().contains(query))
            .map(|p| SearchHit {
                part: p,
                group_name: "Group G1".to_string(),
                subgroup_name: Some("Subgroup 1".to_string()),
            })
            .collect()
    }

    fn bookmarks(&self) -> Vec<Bookmark> {
        Vec::new()
    }

    fn notes(&self) -> Vec<Note> {
        Vec::new()
    }

    fn is_bookmarked(&self, _part_id: i64) -> bool {
        false
    }

    fn note_for_part(&self, _part_id: i64) -> Option<Note> {
        None
    }

    fn toggle_bookmark(&self, _part_id: i64) -> Result<bool, CatalogError> {
        Ok(true)
    }
}

/// Serves a blank raster for any path under `images/`.
pub struct BlankImages;

impl ImageLoader for BlankImages {
    fn load(&self, path: &Path) -> Result<DynamicImage, LoadError> {
        if path.to_string_lossy().contains("images/") {
            Ok(DynamicImage::ImageRgba8(RgbaImage::new(64, 32)))
        } else {
            Err(LoadError::NotFound(path.to_path_buf()))
        }
    }
}

pub fn navigator_with(catalog: MemoryCatalog) -> Navigator {
    Navigator::new(
        Box::new(catalog),
        Box::new(BlankImages),
        PathBuf::from("/catalog"),
        Theme::default(),
        Viewport::new(100, 30),
    )
}

pub fn navigator() -> Navigator {
    navigator_with(MemoryCatalog::default())
}
