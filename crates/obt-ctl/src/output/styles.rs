//! Style constants and clap help styling configuration.

use anstyle::{AnsiColor, Color, Effects, Style};

/// Green: built pages and outputs.
pub(crate) const SUCCESS: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));

/// Red: failed demos and builds.
pub(crate) const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Yellow: nothing-to-do notices.
pub(crate) const WARNING: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

pub(crate) const HEADER: Style = Style::new().effects(Effects::BOLD);

pub(crate) const LABEL: Style = Style::new().effects(Effects::BOLD);

pub(crate) const DIM: Style = Style::new().effects(Effects::DIMMED);

/// Custom clap styles for help output, matching the output palette.
pub(crate) fn clap_styles() -> clap::builder::Styles {
    let accent = Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::Green)))
        .effects(Effects::BOLD);
    let literal = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));

    clap::builder::Styles::styled()
        .header(accent)
        .usage(accent)
        .literal(literal)
        .placeholder(literal)
        .error(
            Style::new()
                .fg_color(Some(Color::Ansi(AnsiColor::Red)))
                .effects(Effects::BOLD),
        )
        .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
        .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
}
