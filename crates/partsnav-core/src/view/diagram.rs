use tracing::warn;

use crate::kitty::{ImageHandle, scale_to_cells};
use crate::theme::Theme;

use super::ViewContext;

#[derive(Debug)]
enum Content {
    Image(ImageHandle),
    Failed(String),
    Missing,
}

/// Left pane for screens that show a diagram. The image itself is sent
/// out-of-band; the pane only reserves blank rows for it.
#[derive(Debug)]
pub struct DiagramPane {
    label: Option<String>,
    content: Content,
}

impl DiagramPane {
    /// Loads, scales and encodes the image at `image_path` (relative to the
    /// data directory). Failures become inline error text.
    pub fn load(ctx: &mut ViewContext<'_>, label: Option<String>, image_path: Option<&str>) -> Self {
        let Some(image_path) = image_path else {
            return Self::missing();
        };

        let path = ctx.data_dir.join(image_path);
        let image = match ctx.loader.load(&path) {
            Ok(image) => image,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "diagram load failed");
                return Self::failed(label, err.to_string());
            }
        };

        let (cols, rows) = ctx.viewport.diagram_cells();
        let raster = scale_to_cells(&image, cols, rows);
        match ctx.codec.encode(&raster) {
            Ok(handle) => Self {
                label,
                content: Content::Image(handle),
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "diagram encode failed");
                Self::failed(label, err.to_string())
            }
        }
    }

    pub fn missing() -> Self {
        Self {
            label: None,
            content: Content::Missing,
        }
    }

    fn failed(label: Option<String>, message: String) -> Self {
        Self {
            label,
            content: Content::Failed(message),
        }
    }

    pub fn image(&self) -> Option<&ImageHandle> {
        match &self.content {
            Content::Image(handle) => Some(handle),
            _ => None,
        }
    }

    pub fn image_id(&self) -> Option<u32> {
        self.image().map(ImageHandle::id)
    }

    pub fn lines(&self, theme: &Theme) -> Vec<String> {
        match &self.content {
            Content::Image(handle) => {
                let mut lines = Vec::new();
                if let Some(label) = &self.label {
                    lines.push(Theme::paint(theme.dim, label));
                }
                lines.extend((0..handle.cell_height()).map(|_| String::new()));
                lines
            }
            Content::Failed(message) => vec![Theme::paint(theme.error, message)],
            Content::Missing => vec![Theme::paint(theme.dim, "No diagram available")],
        }
    }

    /// Cursor dance that draws the image one row below the split pane's top
    /// edge, inside the left margin, and puts the cursor back.
    pub fn placement(&self) -> String {
        match self.image() {
            Some(handle) => format!("\x1b7  \x1b[1B{}\x1b8", handle.render()),
            None => String::new(),
        }
    }
}
