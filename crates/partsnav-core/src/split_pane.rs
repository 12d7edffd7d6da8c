use crate::text::{fit_height, pad_to_width, truncate_to_width};

pub const LEFT_MARGIN: usize = 2;
const LEFT_SHARE_PERCENT: usize = 40;
/// Separator glyph plus its padding.
const SEPARATOR_BUDGET: usize = 3;
const SEPARATOR: &str = "│ ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneWidths {
    pub left: usize,
    pub right: usize,
}

impl PaneWidths {
    /// Columns available to right-pane text after the separator.
    pub fn right_text(&self) -> usize {
        self.right.saturating_sub(2)
    }

    /// Printable columns of every composed row, margin included.
    pub fn row(&self) -> usize {
        LEFT_MARGIN + self.left + SEPARATOR.chars().count() + self.right_text()
    }
}

pub fn pane_widths(total_width: usize) -> PaneWidths {
    let usable = total_width.saturating_sub(LEFT_MARGIN);
    let left = usable * LEFT_SHARE_PERCENT / 100;
    let right = usable.saturating_sub(left + SEPARATOR_BUDGET);
    PaneWidths { left, right }
}

/// Lays two text blocks side by side in a 40/60 split with a vertical rule
/// between them. Output is exactly `total_height` rows of identical printable
/// width; style escapes inside either block are not counted.
pub fn compose(left: &str, right: &str, total_width: usize, total_height: usize) -> String {
    let widths = pane_widths(total_width);
    let left = fit_height(left, total_height);
    let right = fit_height(right, total_height);
    let margin = " ".repeat(LEFT_MARGIN);

    left.split('\n')
        .zip(right.split('\n'))
        .take(total_height)
        .map(|(l, r)| {
            let l = pad_to_width(&truncate_to_width(l, widths.left), widths.left);
            let r = pad_to_width(&truncate_to_width(r, widths.right_text()), widths.right_text());
            format!("{margin}{l}{SEPARATOR}{r}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
