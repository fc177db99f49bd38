use once_cell::sync::Lazy;
use ratatui::style::{Color, Modifier, Style};

// One Dark palette
pub const ACCENT_BLUE: Color = Color::Rgb(97, 175, 239);
pub const ACCENT_CYAN: Color = Color::Rgb(86, 182, 194);
pub const BG_PRIMARY: Color = Color::Rgb(40, 44, 52);
pub const BG_SECONDARY: Color = Color::Rgb(33, 37, 43);
pub const BG_SELECTION: Color = Color::Rgb(62, 68, 81);
pub const BG_TERTIARY: Color = Color::Rgb(44, 49, 58);
pub const BORDER_FOCUSED: Color = Color::Rgb(97, 175, 239);
pub const BORDER_NORMAL: Color = Color::Rgb(92, 99, 112);
pub const ERROR: Color = Color::Rgb(224, 108, 117);
pub const FG_PRIMARY: Color = Color::Rgb(171, 178, 191);
pub const FG_SECONDARY: Color = Color::Rgb(92, 99, 112);
pub const INFO: Color = Color::Rgb(97, 175, 239);
pub const SUCCESS: Color = Color::Rgb(152, 195, 121);
pub const WARNING: Color = Color::Rgb(229, 192, 123);

pub const STYLE_BG_PRIMARY: Style = Style::new().bg(BG_PRIMARY).fg(FG_PRIMARY);
pub const STYLE_INPUT: Style = Style::new().bg(BG_TERTIARY).fg(FG_PRIMARY);
pub const STYLE_BORDER_NORMAL: Style = Style::new().fg(BORDER_NORMAL);
pub const STYLE_BORDER_FOCUSED: Style = Style::new().fg(BORDER_FOCUSED);
pub const STYLE_MUTED: Style = Style::new().fg(FG_SECONDARY);
pub const STYLE_STATUS_BAR: Style = Style::new().bg(BG_SECONDARY).fg(FG_PRIMARY);
pub const STYLE_INFO: Style = Style::new().fg(INFO);

pub static STYLE_SELECTION: Lazy<Style> =
  Lazy::new(|| Style::new().bg(BG_SELECTION).fg(FG_PRIMARY).add_modifier(Modifier::BOLD));

pub static STYLE_HEADER: Lazy<Style> =
  Lazy::new(|| Style::new().bg(BG_SELECTION).fg(ACCENT_CYAN).add_modifier(Modifier::BOLD));

/// Header cell of the column the cursor is on.
pub static STYLE_HEADER_ACTIVE: Lazy<Style> = Lazy::new(|| {
  Style::new().bg(ACCENT_BLUE).fg(BG_PRIMARY).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
});

pub static STYLE_TITLE: Lazy<Style> = Lazy::new(|| Style::new().fg(ACCENT_BLUE).add_modifier(Modifier::BOLD));

pub static STYLE_SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().fg(SUCCESS).add_modifier(Modifier::BOLD));

pub static STYLE_WARNING: Lazy<Style> = Lazy::new(|| Style::new().fg(WARNING).add_modifier(Modifier::BOLD));

pub static STYLE_ERROR: Lazy<Style> = Lazy::new(|| Style::new().fg(ERROR).add_modifier(Modifier::BOLD));

pub fn border(focused: bool) -> Style {
  if focused {
    STYLE_BORDER_FOCUSED
  } else {
    STYLE_BORDER_NORMAL
  }
}

/// Colour for a document status cell.
pub fn status(value: &str) -> Style {
  match value {
    crate::table::criteria::STATUS_APPROVED => *STYLE_SUCCESS,
    crate::table::criteria::STATUS_REJECTED => *STYLE_ERROR,
    crate::table::criteria::STATUS_PENDING => *STYLE_WARNING,
    _ => Style::new().fg(FG_PRIMARY),
  }
}
