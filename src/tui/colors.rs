//! Colour palette for the dashboard
//!
//! All regions take their styles from here so the screen stays consistent.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for dashboard elements
pub struct DashboardColors;

impl DashboardColors {
    // === Stage status colours ===

    /// Stage finished (Green)
    pub const COMPLETE: Color = Color::Green;

    /// Stage running (Cyan)
    pub const ACTIVE: Color = Color::Cyan;

    /// Stage waiting to run (Yellow)
    pub const PENDING: Color = Color::Yellow;

    /// Stage failed (Red)
    pub const FAILED: Color = Color::Red;

    /// Placeholder for a stage that could not be resolved (DarkGray)
    pub const UNRESOLVED: Color = Color::DarkGray;

    // === UI elements ===

    /// Stack-trace detail lines (Red)
    pub const DETAIL: Color = Color::Red;

    /// Error banner background (Red)
    pub const BANNER_BG: Color = Color::Red;

    /// Error banner text (White)
    pub const BANNER_FG: Color = Color::White;
}

/// Host header: bold
pub fn header_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Application block title: bold and underlined
pub fn application_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Job block title: plain
pub fn job_style() -> Style {
    Style::default()
}

/// Detail line under each stage
pub fn detail_style() -> Style {
    Style::default().fg(DashboardColors::DETAIL)
}

/// Error banner shown when a refresh fails
pub fn banner_style() -> Style {
    Style::default()
        .fg(DashboardColors::BANNER_FG)
        .bg(DashboardColors::BANNER_BG)
        .add_modifier(Modifier::BOLD)
}

/// Gauge colour for a stage, keyed on its Spark status string
pub fn stage_color(status: &str, resolved: bool) -> Color {
    if !resolved {
        return DashboardColors::UNRESOLVED;
    }
    match status {
        "COMPLETE" => DashboardColors::COMPLETE,
        "ACTIVE" => DashboardColors::ACTIVE,
        "FAILED" => DashboardColors::FAILED,
        _ => DashboardColors::PENDING,
    }
}
