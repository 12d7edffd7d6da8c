//! Data the screens read, and the collaborators that supply it.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subgroup {
    pub id: String,
    pub name: String,
    pub group_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubgroupWithGroup {
    pub subgroup_id: String,
    pub subgroup_name: String,
    pub group_id: String,
    pub group_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    pub id: String,
    pub group_id: String,
    pub subgroup_id: Option<String>,
    pub name: String,
    /// Relative to the data directory.
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    pub id: i64,
    pub part_number: String,
    pub pnc: Option<String>,
    pub description: Option<String>,
    pub ref_number: Option<String>,
    pub quantity: Option<i64>,
    pub spec: Option<String>,
    pub notes: Option<String>,
    pub color: Option<String>,
    pub model_date_range: Option<String>,
    pub diagram_id: String,
    pub group_id: String,
    pub subgroup_id: Option<String>,
    pub replacement_part_number: Option<String>,
}

impl Part {
    /// `[PNC] PARTNO`, or the bare part number when there is no PNC.
    pub fn label(&self) -> String {
        part_label(&self.part_number, self.pnc.as_deref())
    }
}

pub fn part_label(part_number: &str, pnc: Option<&str>) -> String {
    match pnc {
        Some(pnc) => format!("[{pnc}] {part_number}"),
        None => part_number.to_string(),
    }
}

/// A part with its diagram image and location names resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartRecord {
    pub part: Part,
    pub image_path: Option<String>,
    pub group_name: String,
    pub subgroup_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    pub part: Part,
    pub group_name: String,
    pub subgroup_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmark {
    pub part_id: i64,
    pub part_number: String,
    pub pnc: Option<String>,
    pub description: Option<String>,
    pub group_name: String,
    pub subgroup_name: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub part_id: i64,
    pub part_number: String,
    pub pnc: Option<String>,
    pub content: String,
    pub updated_at: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog backend: {0}")]
    Backend(String),
}

/// Read access to the catalog. Lookups never fail: a miss is an empty list or
/// `None`, and backend failures are logged by the implementation.
pub trait CatalogProvider {
    fn groups(&self) -> Vec<Group>;
    fn group(&self, id: &str) -> Option<Group>;
    fn all_subgroups(&self) -> Vec<SubgroupWithGroup>;
    fn subgroups(&self, group_id: &str) -> Vec<Subgroup>;
    fn subgroup(&self, id: &str) -> Option<Subgroup>;
    fn parts_for_subgroup(&self, subgroup_id: &str) -> Vec<Part>;
    fn part(&self, id: i64) -> Option<PartRecord>;
    fn diagram_for_subgroup(&self, subgroup_id: &str) -> Option<Diagram>;
    /// Ranked matches with group and subgroup names filled in.
    fn search(&self, query: &str) -> Vec<SearchHit>;
    fn bookmarks(&self) -> Vec<Bookmark>;
    fn notes(&self) -> Vec<Note>;
    fn is_bookmarked(&self, part_id: i64) -> bool;
    fn note_for_part(&self, part_id: i64) -> Option<Note>;
    /// Flips the bookmark on a part; returns the new state.
    fn toggle_bookmark(&self, part_id: i64) -> Result<bool, CatalogError>;
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("open image: {0}")]
    Decode(String),
}

pub trait ImageLoader {
    fn load(&self, path: &Path) -> Result<DynamicImage, LoadError>;
}
