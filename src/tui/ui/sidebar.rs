//! Category selector and About text.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::domain::DiseaseCategory;
use crate::tui::styles::MedicalTheme;

pub const ABOUT: &str = "HealthScope AI is an advanced predictive healthcare solution using \
machine learning to assess potential health risks. Always consult a medical professional for diagnosis.";

pub fn render_sidebar(f: &mut Frame, area: Rect, selected: DiseaseCategory, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DiseaseCategory::ALL.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let items: Vec<ListItem> = DiseaseCategory::ALL
        .iter()
        .map(|category| {
            let style = if *category == selected {
                MedicalTheme::selected()
            } else {
                MedicalTheme::text()
            };
            ListItem::new(Line::from(Span::styled(format!(" {} ", category.name()), style)))
        })
        .collect();

    let border_style = if focused {
        MedicalTheme::border_focused()
    } else {
        MedicalTheme::border()
    };
    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(" Select Disease ", MedicalTheme::title()))
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    f.render_widget(list, chunks[0]);

    let about = Paragraph::new(vec![
        Line::from(Span::styled("About", MedicalTheme::section_header())),
        Line::from(Span::styled(ABOUT, MedicalTheme::text_secondary())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );
    f.render_widget(about, chunks[1]);
}
