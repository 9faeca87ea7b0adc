//! Result panel.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::domain::{Prediction, RiskLabel};
use crate::tui::styles::MedicalTheme;

/// Shown on results from models with synthetic parameters.
pub const DEMO_MODEL_NOTICE: &str = "Demo model, not clinically trained";

/// What the result panel shows.
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing submitted for the current category
    #[default]
    Idle,
    /// Model is running
    Running { message: &'static str },
    /// Completed with result
    Complete { prediction: Prediction },
    /// Dispatch failed
    Error { message: String },
}

impl ResultState {
    /// Headline text with its marker, as rendered.
    #[must_use]
    pub fn headline(prediction: &Prediction) -> String {
        let marker = match prediction.label {
            RiskLabel::High => "⚠",
            RiskLabel::Low => "✓",
        };
        format!("{marker} {}", prediction.headline())
    }
}

/// Render the result panel
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    match state {
        ResultState::Idle => render_idle(f, area),
        ResultState::Running { message } => render_running(f, area, message),
        ResultState::Complete { prediction } => render_prediction(f, area, prediction),
        ResultState::Error { message } => render_error(f, area, message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(Line::from(Span::styled(
        "Fill in the measurements and press Enter to analyze",
        MedicalTheme::text_muted(),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Result ", MedicalTheme::text_secondary()))
            .borders(Borders::ALL)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_running(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(Line::from(Span::styled(message, MedicalTheme::focused())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(Span::styled(" Result ", MedicalTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(MedicalTheme::border_focused()),
        );

    f.render_widget(content, area);
}

fn render_prediction(f: &mut Frame, area: Rect, prediction: &Prediction) {
    let style = MedicalTheme::risk_label(prediction.label);

    let mut block = Block::default()
        .title(Span::styled(" Result ", MedicalTheme::title()))
        .title_bottom(Line::from(Span::styled(
            format!(" {} ", prediction.timestamp()),
            MedicalTheme::text_muted(),
        )))
        .borders(Borders::ALL)
        .border_style(style);
    if prediction.demo_model {
        block = block.title(
            Line::from(Span::styled(
                format!(" {DEMO_MODEL_NOTICE} "),
                MedicalTheme::warning(),
            ))
            .right_aligned(),
        );
    }

    let content = Paragraph::new(vec![
        Line::from(Span::styled(ResultState::headline(prediction), style)),
        Line::from(Span::styled(prediction.disclaimer(), MedicalTheme::text_secondary())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);

    f.render_widget(content, area);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(Span::styled("! Assessment failed", MedicalTheme::danger())),
        Line::from(Span::styled(message, MedicalTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MedicalTheme::danger()),
    );

    f.render_widget(content, area);
}
