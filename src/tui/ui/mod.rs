//! UI module: View components for the TUI.

pub mod form;
pub mod result;
pub mod sidebar;

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::MedicalTheme;

pub const APP_TITLE: &str = "HealthScope AI";

pub const DISCLAIMER: &str = "This tool provides probabilistic assessments and should not be used \
as a substitute for professional medical advice.";

pub fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(APP_TITLE, MedicalTheme::header())))
        .alignment(Alignment::Center)
        .style(MedicalTheme::header());

    f.render_widget(header, area);
}

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![Line::from(vec![
        Span::styled("Note: ", MedicalTheme::text_secondary()),
        Span::styled(DISCLAIMER, MedicalTheme::text_muted()),
    ])];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(MedicalTheme::border());

    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
