use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three image categories attached to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Photos,
    Drawings,
    Renders,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Photos, Bucket::Drawings, Bucket::Renders];

    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Photos => "photos",
            Bucket::Drawings => "drawings",
            Bucket::Renders => "renders",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Photos => "Photos",
            Bucket::Drawings => "Drawings",
            Bucket::Renders => "Renders",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "photos" | "photo" => Ok(Bucket::Photos),
            "drawings" | "drawing" => Ok(Bucket::Drawings),
            "renders" | "render" => Ok(Bucket::Renders),
            other => Err(FolioError::Api(format!(
                "Unknown bucket '{}' (expected photos, drawings or renders)",
                other
            ))),
        }
    }
}

/// Per-bucket index permutations replayed by the generated project page.
///
/// An empty permutation means "natural order".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselOrder {
    #[serde(default)]
    pub photos: Vec<usize>,
    #[serde(default)]
    pub drawings: Vec<usize>,
    #[serde(default)]
    pub renders: Vec<usize>,
}

impl CarouselOrder {
    pub fn get(&self, bucket: Bucket) -> &[usize] {
        match bucket {
            Bucket::Photos => &self.photos,
            Bucket::Drawings => &self.drawings,
            Bucket::Renders => &self.renders,
        }
    }

    pub fn get_mut(&mut self, bucket: Bucket) -> &mut Vec<usize> {
        match bucket {
            Bucket::Photos => &mut self.photos,
            Bucket::Drawings => &mut self.drawings,
            Bucket::Renders => &mut self.renders,
        }
    }

    /// Apply the bucket's permutation to `images`, dropping indexes that point nowhere
    /// and blank entries.
    pub fn arrange<'a>(&self, bucket: Bucket, images: &'a [String]) -> Vec<&'a str> {
        let order = self.get(bucket);
        let picked: Vec<&str> = if order.is_empty() {
            images.iter().map(String::as_str).collect()
        } else {
            order
                .iter()
                .filter_map(|&i| images.get(i).map(String::as_str))
                .collect()
        };
        picked.into_iter().filter(|s| !s.trim().is_empty()).collect()
    }
}

/// One portfolio project, as stored in `projects.json`.
///
/// Fields this crate does not know about are kept in `extra` so that a load/save cycle
/// never drops data written by other tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub preview_image: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub drawings: Vec<String>,
    #[serde(default)]
    pub renders: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carousel_order: Option<CarouselOrder>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProjectRecord {
    pub fn new(id: String, name: String, description: String, preview_image: String) -> Self {
        Self {
            folder: Some(id.clone()),
            id,
            name,
            description,
            order: 0,
            preview_image,
            photos: Vec::new(),
            drawings: Vec::new(),
            renders: Vec::new(),
            carousel_order: Some(CarouselOrder::default()),
            extra: serde_json::Map::new(),
        }
    }

    pub fn images(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Photos => &self.photos,
            Bucket::Drawings => &self.drawings,
            Bucket::Renders => &self.renders,
        }
    }

    pub fn images_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Photos => &mut self.photos,
            Bucket::Drawings => &mut self.drawings,
            Bucket::Renders => &mut self.renders,
        }
    }

    pub fn image_count(&self) -> usize {
        self.photos.len() + self.drawings.len() + self.renders.len()
    }

    /// Forget the custom viewing order of a bucket whose contents changed shape.
    pub(crate) fn reset_carousel_order(&mut self, bucket: Bucket) {
        if let Some(order) = self.carousel_order.as_mut() {
            order.get_mut(bucket).clear();
        }
    }
}

/// Shape of both the persisted record and the site's `data/projects.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

impl Manifest {
    pub fn new(projects: Vec<ProjectRecord>) -> Self {
        Self { projects }
    }
}

/// Project ids travel into file names and URLs: latin letters, digits, `-` and `_`.
pub fn validate_project_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(FolioError::Validation("Project id is required".into()));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(FolioError::Validation(format!(
            "Project id '{}' may only contain latin letters, digits, '-' and '_'",
            id
        )));
    }
    Ok(())
}
