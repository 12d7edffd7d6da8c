use std::fmt::Display;

use crossterm::style::{Color, ContentStyle, Stylize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChoice {
    Auto,
    Default,
    HighContrast,
}

/// Named styles every screen draws with. Applying one yields ANSI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header: ContentStyle,
    pub part_number: ContentStyle,
    pub selected_marker: ContentStyle,
    pub selected_label: ContentStyle,
    pub normal_label: ContentStyle,
    pub dim: ContentStyle,
    pub count: ContentStyle,
    pub error: ContentStyle,
    pub link: ContentStyle,
    pub status: ContentStyle,
}

impl Theme {
    pub fn paint<D: Display>(style: ContentStyle, content: D) -> String {
        style.apply(content).to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

pub fn build_theme(choice: ThemeChoice, no_color: bool) -> Theme {
    if no_color {
        return monochrome_theme();
    }

    match choice {
        ThemeChoice::Auto | ThemeChoice::Default => default_theme(),
        ThemeChoice::HighContrast => high_contrast_theme(),
    }
}

fn default_theme() -> Theme {
    let base = ContentStyle::new();
    Theme {
        header: base.with(Color::Cyan).bold(),
        part_number: base.with(Color::Yellow).bold(),
        selected_marker: base.with(Color::Green),
        selected_label: base.with(Color::Yellow).bold(),
        normal_label: base.with(Color::White),
        dim: base.with(Color::DarkGrey),
        count: base.with(Color::Magenta),
        error: base.with(Color::Red),
        link: base.with(Color::Blue),
        status: base.with(Color::Green),
    }
}

fn high_contrast_theme() -> Theme {
    let base = ContentStyle::new();
    Theme {
        header: base.with(Color::White).on(Color::Black).bold(),
        part_number: base.with(Color::Yellow).bold(),
        selected_marker: base.with(Color::Yellow).bold(),
        selected_label: base.with(Color::Black).on(Color::Yellow).bold(),
        normal_label: base.with(Color::White),
        dim: base.with(Color::Grey),
        count: base.with(Color::White).bold(),
        error: base.with(Color::Red).on(Color::Black).bold(),
        link: base.with(Color::Cyan).underlined(),
        status: base.with(Color::Green).on(Color::Black),
    }
}

fn monochrome_theme() -> Theme {
    let base = ContentStyle::new();
    Theme {
        header: base.bold(),
        part_number: base.bold(),
        selected_marker: base.bold(),
        selected_label: base.bold().reverse(),
        normal_label: base,
        dim: base,
        count: base,
        error: base.bold(),
        link: base.underlined(),
        status: base,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::style::{Attribute, Color};

    use super::{Theme, ThemeChoice, build_theme};

    #[test]
    fn auto_and_default_themes_match() {
        let auto = build_theme(ThemeChoice::Auto, false);
        let default = build_theme(ThemeChoice::Default, false);
        assert_eq!(auto, default);
        assert_eq!(default.header.foreground_color, Some(Color::Cyan));
        assert_eq!(default.dim.foreground_color, Some(Color::DarkGrey));
    }

    #[test]
    fn high_contrast_theme_sets_backgrounds() {
        let theme = build_theme(ThemeChoice::HighContrast, false);
        assert_eq!(theme.header.background_color, Some(Color::Black));
        assert_eq!(theme.selected_label.background_color, Some(Color::Yellow));
        assert!(theme.link.attributes.has(Attribute::Underlined));
    }

    #[test]
    fn no_color_overrides_selected_theme() {
        let theme = build_theme(ThemeChoice::HighContrast, true);
        assert_eq!(theme.header.foreground_color, None);
        assert_eq!(theme.dim.foreground_color, None);
        assert!(theme.header.attributes.has(Attribute::Bold));
        assert!(theme.selected_label.attributes.has(Attribute::Reverse));
    }

    #[test]
    fn paint_wraps_text_in_escape_codes() {
        let theme = build_theme(ThemeChoice::Default, false);
        let painted = Theme::paint(theme.header, "HEAD");
        assert!(painted.contains("HEAD"));
        assert!(painted.starts_with('\x1b'));

        let plain = build_theme(ThemeChoice::Default, true);
        assert_eq!(Theme::paint(plain.dim, "x"), "x");
    }
}
