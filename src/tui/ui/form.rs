//! Per-category measurement form.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::{DiseaseCategory, FeatureError, FeatureVector, FieldSpec};
use crate::tui::styles::MedicalTheme;

/// One editable input bound to its field declaration.
#[derive(Debug, Clone)]
pub struct FormField {
    pub spec: &'static FieldSpec,
    pub value: String,
}

impl FormField {
    /// Current numeric value; an empty buffer reads as the field default.
    ///
    /// Buffers only hold digits and one decimal point, so the only
    /// non-finite parse is overflow; it saturates and is clamped on commit.
    fn parsed(&self) -> Result<f64, FeatureError> {
        if self.value.is_empty() {
            return Ok(self.spec.default_value());
        }
        match self.value.parse::<f64>() {
            Ok(v) if v == f64::INFINITY => Ok(f64::MAX),
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(FeatureError::InvalidNumber {
                field: self.spec.label,
            }),
        }
    }
}

/// Form state for one category.
pub struct FormState {
    pub category: DiseaseCategory,
    pub fields: Vec<FormField>,
    pub selected_field: usize,
    pub error_message: Option<String>,
}

impl FormState {
    #[must_use]
    pub fn new(category: DiseaseCategory) -> Self {
        Self {
            category,
            fields: category
                .fields()
                .iter()
                .map(|spec| FormField {
                    spec,
                    value: String::new(),
                })
                .collect(),
            selected_field: 0,
            error_message: None,
        }
    }

    /// Move to the next field
    pub fn next_field(&mut self) {
        self.commit_field(self.selected_field);
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        self.commit_field(self.selected_field);
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Add a character to the current field.
    ///
    /// Integer fields take digits only; fractional fields also take a
    /// single decimal point.
    pub fn input_char(&mut self, c: char) {
        let field = &mut self.fields[self.selected_field];
        let accepted = c.is_ascii_digit()
            || (c == '.' && field.spec.step.allows_fraction() && !field.value.contains('.'));
        if accepted {
            field.value.push(c);
            self.error_message = None;
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        self.fields[self.selected_field].value.pop();
    }

    /// Clear the current field
    pub fn clear_field(&mut self) {
        self.fields[self.selected_field].value.zeroize();
    }

    /// Step the current value up (`+1`) or down (`-1`) by the field's step.
    pub fn step(&mut self, direction: f64) {
        let field = &mut self.fields[self.selected_field];
        let current = field.parsed().unwrap_or_else(|_| field.spec.default_value());
        let next = field.spec.clamp(current + direction * field.spec.step.increment());
        field.value = field.spec.format(next);
        self.error_message = None;
    }

    /// Clamp the buffer of field `index` into bounds.
    ///
    /// Buffers that do not parse are left alone; submit reports them.
    pub fn commit_field(&mut self, index: usize) {
        let field = &mut self.fields[index];
        if field.value.is_empty() {
            return;
        }
        if let Ok(value) = field.parsed() {
            if !field.spec.contains(value) {
                field.value = field.spec.format(field.spec.clamp(value));
            }
        }
    }

    /// Commit every field.
    pub fn commit_all(&mut self) {
        for i in 0..self.fields.len() {
            self.commit_field(i);
        }
    }

    /// Wipe all field buffers from memory.
    ///
    /// Runs when the form is dropped so typed measurements do not outlive
    /// the session.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            field.value.zeroize();
        }
        self.error_message = None;
        self.selected_field = 0;
    }

    /// Build the feature vector in the category's field order.
    ///
    /// # Errors
    /// Returns `FeatureError::InvalidNumber` for the first buffer that is
    /// not a number.
    pub fn to_feature_vector(&self) -> Result<FeatureVector, FeatureError> {
        let values = self
            .fields
            .iter()
            .map(FormField::parsed)
            .collect::<Result<Vec<f64>, _>>()?;
        FeatureVector::from_inputs(self.category, &values)
    }

    /// Rows needed to draw every field as a bordered box.
    fn boxed_height(&self) -> u16 {
        let advanced = self.fields.iter().filter(|f| f.spec.advanced).count();
        let basic = self.fields.len() - advanced;
        let mut rows = basic.div_ceil(2) * 3;
        if advanced > 0 {
            rows += advanced.div_ceil(2) * 3 + 2;
        }
        rows as u16
    }

    /// Load the category's sample values for manual testing.
    pub fn load_sample_data(&mut self) {
        for (field, value) in self.fields.iter_mut().zip(self.category.sample_values()) {
            field.value = field.spec.format(*value);
        }
        self.error_message = None;
    }
}

impl Drop for FormState {
    fn drop(&mut self) {
        self.clear_sensitive();
    }
}

/// Render the measurement form for the active category.
pub fn render_form(f: &mut Frame, area: Rect, state: &FormState, focused: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Section header
            Constraint::Min(0),    // Fields
            Constraint::Length(3), // Submit button
            Constraint::Length(2), // Footer/error
        ])
        .split(area);

    render_form_header(f, chunks[0], state.category);

    if chunks[1].height < state.boxed_height() {
        render_compact_fields(f, chunks[1], state, focused);
    } else {
        render_boxed_fields(f, chunks[1], state, focused);
    }

    let button = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", state.category.action_label()),
        MedicalTheme::button(),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::NONE));
    f.render_widget(button, chunks[2]);

    render_form_footer(f, chunks[3], state);
}

fn render_boxed_fields(f: &mut Frame, area: Rect, state: &FormState, focused: bool) {
    let (basic, advanced): (Vec<usize>, Vec<usize>) =
        (0..state.fields.len()).partition(|&i| !state.fields[i].spec.advanced);

    if advanced.is_empty() {
        render_field_grid(f, area, state, &basic, focused);
    } else {
        let rows = advanced.len().div_ceil(2) as u16 * 3 + 2;
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(rows)])
            .split(area);

        render_field_grid(f, parts[0], state, &basic, focused);

        let block = Block::default()
            .title(Span::styled(" Advanced Parameters ", MedicalTheme::text_secondary()))
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border());
        let inner = block.inner(parts[1]);
        f.render_widget(block, parts[1]);
        render_field_grid(f, inner, state, &advanced, focused);
    }
}

/// One `label: value` line per field, scrolled to keep the selection visible.
fn render_compact_fields(f: &mut Frame, area: Rect, state: &FormState, focused: bool) {
    let lines: Vec<Line> = state
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let is_selected = focused && i == state.selected_field;
            let (marker, label_style) = if is_selected {
                ("› ", MedicalTheme::focused())
            } else {
                ("  ", MedicalTheme::text_secondary())
            };

            let mut spans = vec![
                Span::styled(marker, MedicalTheme::focused()),
                Span::styled(field.spec.label, label_style),
                Span::styled(": ", MedicalTheme::text_muted()),
            ];
            if field.value.is_empty() {
                spans.push(Span::styled(
                    field.spec.format(field.spec.default_value()),
                    MedicalTheme::text_muted(),
                ));
            } else {
                spans.push(Span::styled(field.value.as_str(), MedicalTheme::text()));
            }
            if is_selected {
                spans.push(Span::styled("▌", MedicalTheme::focused()));
            }
            spans.push(Span::styled(
                format!("  ({})", field.spec.hint()),
                MedicalTheme::text_muted(),
            ));
            Line::from(spans)
        })
        .collect();

    let visible = usize::from(area.height.max(1));
    let offset = state.selected_field.saturating_sub(visible - 1) as u16;

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn render_form_header(f: &mut Frame, area: Rect, category: DiseaseCategory) {
    let header = Paragraph::new(Line::from(Span::styled(
        category.section_header(),
        MedicalTheme::section_header(),
    )))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(MedicalTheme::border_focused()),
    );

    f.render_widget(header, area);
}

fn render_field_grid(f: &mut Frame, area: Rect, state: &FormState, indices: &[usize], focused: bool) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mid = indices.len().div_ceil(2);
    render_field_column(f, columns[0], state, &indices[..mid], focused);
    render_field_column(f, columns[1], state, &indices[mid..], focused);
}

fn render_field_column(f: &mut Frame, area: Rect, state: &FormState, indices: &[usize], focused: bool) {
    let field_height = 3;
    let constraints: Vec<Constraint> = indices
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (slot, &i) in indices.iter().enumerate() {
        let field = &state.fields[i];
        let is_selected = focused && i == state.selected_field;
        let (border_style, title_style) = if is_selected {
            (MedicalTheme::border_focused(), MedicalTheme::focused())
        } else {
            (MedicalTheme::border(), MedicalTheme::text_secondary())
        };

        let block = Block::default()
            .title(Span::styled(format!(" {} ", field.spec.label), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);

        let value_display = if field.value.is_empty() {
            Span::styled(
                format!("{}  ({})", field.spec.format(field.spec.default_value()), field.spec.hint()),
                MedicalTheme::text_muted(),
            )
        } else {
            Span::styled(field.value.as_str(), MedicalTheme::text())
        };

        let content = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            value_display,
            if is_selected {
                Span::styled("▌", MedicalTheme::focused())
            } else {
                Span::raw("")
            },
        ]))
        .block(block);

        f.render_widget(content, chunks[slot]);
    }
}

fn render_form_footer(f: &mut Frame, area: Rect, state: &FormState) {
    let content = if let Some(err) = &state.error_message {
        Line::from(vec![
            Span::styled("! ", MedicalTheme::danger()),
            Span::styled(err.as_str(), MedicalTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", MedicalTheme::key_hint()),
            Span::styled("Field ", MedicalTheme::key_desc()),
            Span::styled("[+/-] ", MedicalTheme::key_hint()),
            Span::styled("Step ", MedicalTheme::key_desc()),
            Span::styled("[Enter] ", MedicalTheme::key_hint()),
            Span::styled("Analyze ", MedicalTheme::key_desc()),
            Span::styled("[S] ", MedicalTheme::key_hint()),
            Span::styled("Sample Data ", MedicalTheme::key_desc()),
            Span::styled("[Esc] ", MedicalTheme::key_hint()),
            Span::styled("Categories", MedicalTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(MedicalTheme::border()),
    );

    f.render_widget(footer, area);
}
