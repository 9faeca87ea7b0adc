//! HealthScope color palette and styles.
//!
//! Green accent on a dark background; result colors come from
//! [`RiskLabel::color`] so the domain and the UI agree.

use ratatui::style::{Color, Modifier, Style};

use crate::domain::RiskLabel;

/// Medical theme color palette.
pub struct MedicalTheme;

impl MedicalTheme {
    // === Accent ===

    /// Green - section headers, buttons
    pub const PRIMARY: Color = Color::Rgb(76, 175, 80); // #4CAF50

    /// Darker green for the header bar
    pub const PRIMARY_DARK: Color = Color::Rgb(69, 160, 73); // #45A049

    /// Light slate for borders
    pub const BORDER: Color = Color::Rgb(148, 163, 184); // #94A3B8

    // === Semantic Colors ===

    /// Rose - errors
    pub const DANGER: Color = Color::Rgb(244, 63, 94); // #F43F5E

    /// Amber - caveats
    pub const WARNING: Color = Color::Rgb(245, 158, 11); // #F59E0B

    // === Background Colors ===

    /// Near black
    pub const BG_DARK: Color = Color::Rgb(18, 18, 18); // #121212

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(255, 255, 255); // #FFFFFF
    pub const TEXT_SECONDARY: Color = Color::Rgb(176, 176, 176); // #B0B0B0
    pub const TEXT_MUTED: Color = Color::Rgb(117, 117, 117); // #757575

    // === Preset Styles ===

    #[must_use]
    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Category section header.
    #[must_use]
    pub fn section_header() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    #[must_use]
    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    #[must_use]
    pub fn text_muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    #[must_use]
    pub fn danger() -> Style {
        Style::default().fg(Self::DANGER)
    }

    #[must_use]
    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for selected items
    #[must_use]
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the field being edited
    #[must_use]
    pub fn focused() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    #[must_use]
    pub fn border_focused() -> Style {
        Style::default().fg(Self::PRIMARY)
    }

    #[must_use]
    pub fn header() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY_DARK)
            .add_modifier(Modifier::BOLD)
    }

    /// The submit button.
    #[must_use]
    pub fn button() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn key_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Result style: red for high risk, green for low.
    #[must_use]
    pub fn risk_label(label: RiskLabel) -> Style {
        let (r, g, b) = label.color();
        Style::default()
            .fg(Color::Rgb(r, g, b))
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_label_colors() {
        assert_eq!(
            MedicalTheme::risk_label(RiskLabel::High).fg,
            Some(Color::Rgb(255, 75, 75))
        );
        assert_eq!(
            MedicalTheme::risk_label(RiskLabel::Low).fg,
            Some(Color::Rgb(76, 175, 80))
        );
    }
}
