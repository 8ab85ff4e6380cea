//! Page layout and drawing
//!
//! Everything here is a pure function of the widget snapshots and the
//! terminal-only [`UiState`], so it can be exercised against a test backend.

use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::{Focus, UiState};
use super::theme::Theme;
use crate::widgets::{
    FormState, HealthSnapshot, Indicator, Measurement, ModelInfoState, display_name, species_icon,
};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Snapshots of the three widgets for one frame
pub struct PageView<'a> {
    pub base_url: &'a str,
    pub health: &'a HealthSnapshot,
    pub model_info: &'a ModelInfoState,
    pub form: &'a FormState,
}

pub fn draw(frame: &mut Frame, page: &PageView, ui: &UiState, theme: &Theme) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Min(10),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    render_hero(frame, header, page.health, ui.tick, theme);

    let [main, side] =
        Layout::horizontal([Constraint::Percentage(66), Constraint::Percentage(34)]).areas(body);
    render_form_column(frame, main, page.form, ui, theme);
    render_model_info(frame, side, page.model_info, theme);

    render_footer(frame, footer, page.base_url, theme);
}

fn render_hero(frame: &mut Frame, area: Rect, health: &HealthSnapshot, tick: u64, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let (dot, color) = match health.indicator() {
        // Alternate glyphs so the pending state pulses
        Indicator::Pending if tick % 10 < 5 => ("◌", theme.text_muted),
        Indicator::Pending => ("○", theme.text_muted),
        Indicator::Online => ("●", theme.success),
        Indicator::Offline => ("●", theme.error),
    };

    let mut status = vec![
        Span::styled(dot, Style::default().fg(color)),
        Span::raw(" "),
        Span::styled(health.label(), Style::default().fg(theme.text_muted)),
    ];
    if let Some(checked) = health.last_checked {
        status.push(Span::styled(
            format!("  · last checked {}", checked.format("%H:%M:%S")),
            Style::default().fg(theme.text_muted),
        ));
    }

    let text = vec![
        Line::from(Span::styled(
            "🌸 Iris Classifier",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Species identification from four flower measurements",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(status),
    ];

    frame.render_widget(Paragraph::new(text).centered().block(block), area);
}

fn render_form_column(frame: &mut Frame, area: Rect, form: &FormState, ui: &UiState, theme: &Theme) {
    let error_height = if form.error.is_some() { 4 } else { 0 };
    let result_height = if form.prediction.is_some() { 6 } else { 0 };

    let [form_area, error_area, result_area] = Layout::vertical([
        Constraint::Length(13),
        Constraint::Length(error_height),
        Constraint::Length(result_height),
    ])
    .areas(area);

    render_inputs(frame, form_area, form, ui, theme);

    if let Some(ref message) = form.error {
        let block = Block::default()
            .title(" Prediction Error ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.error));
        let text = Paragraph::new(message.as_str())
            .style(Style::default().fg(theme.error))
            .centered()
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(text, error_area);
    }

    if let Some(ref prediction) = form.prediction {
        let block = Block::default()
            .title(" Predicted Species ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent));
        let text = vec![
            Line::from(species_icon(&prediction.predicted_class)),
            Line::from(Span::styled(
                display_name(&prediction.predicted_class),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Based on the measurements you provided",
                Style::default().fg(theme.text_muted),
            )),
        ];
        frame.render_widget(Paragraph::new(text).centered().block(block), result_area);
    }
}

fn render_inputs(frame: &mut Frame, area: Rect, form: &FormState, ui: &UiState, theme: &Theme) {
    let block = Block::default()
        .title(" Iris Species Predictor ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [hint, row_one, row_two, button] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new("Enter the measurements to predict the iris species")
            .style(Style::default().fg(theme.text_muted))
            .centered(),
        hint,
    );

    for (row, fields) in [row_one, row_two].into_iter().zip(Measurement::ALL.chunks(2)) {
        let columns = Layout::horizontal([Constraint::Percentage(50); 2]).split(row);
        for (cell, field) in columns.iter().zip(fields) {
            render_field(frame, *cell, *field, ui, theme);
        }
    }

    let (label, style) = if form.is_submitting() {
        let frame_idx = (ui.tick as usize) % SPINNER.len();
        (
            format!("{} Predicting...", SPINNER[frame_idx]),
            Style::default().fg(theme.text_muted),
        )
    } else {
        (
            "🌸 Predict Species".to_string(),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )
    };
    let border = if ui.focus == Focus::Submit {
        theme.border_focused
    } else {
        theme.border
    };
    frame.render_widget(
        Paragraph::new(label).style(style).centered().block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        ),
        button,
    );
}

fn render_field(frame: &mut Frame, area: Rect, field: Measurement, ui: &UiState, theme: &Theme) {
    let focused = ui.focus == Focus::Field(field);
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };

    let mut text = vec![Span::styled(
        ui.text(field).to_string(),
        Style::default().fg(theme.text_primary),
    )];
    if focused {
        text.push(Span::styled("▏", Style::default().fg(theme.accent)));
    }

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);
}

fn render_model_info(frame: &mut Frame, area: Rect, state: &ModelInfoState, theme: &Theme) {
    let block = Block::default()
        .title(" Model Information ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let text = match state {
        ModelInfoState::Loading => vec![Line::from(Span::styled(
            "Loading model information...",
            Style::default().fg(theme.text_muted),
        ))],
        ModelInfoState::Ready(info) => {
            let mut lines = vec![
                Line::from(Span::styled("Model Type", Style::default().fg(theme.text_muted))),
                Line::from(Span::styled(
                    info.model_type.clone(),
                    Style::default()
                        .fg(theme.text_primary)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::styled(
                    "Available Classes",
                    Style::default().fg(theme.text_muted),
                )),
            ];
            lines.extend(info.classes.iter().map(|class| {
                Line::from(vec![
                    Span::raw(format!("{} ", species_icon(class))),
                    Span::styled(display_name(class), Style::default().fg(theme.text_primary)),
                ])
            }));
            lines
        }
        // A failed fetch leaves the column empty
        ModelInfoState::Unavailable => return,
    };

    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, base_url: &str, theme: &Theme) {
    let text = vec![
        Line::from(Span::styled(
            format!(
                "Connect your prediction service to {} to start making predictions",
                base_url
            ),
            Style::default().fg(theme.text_muted),
        )),
        Line::from(Span::styled(
            "Tab/↑↓ move · ←→ adjust · Enter predict · Esc quit",
            Style::default().fg(theme.text_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(text).centered(), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MeasurementInput, ModelInfo, PredictionResult};
    use crate::widgets::{HealthStatus, PREDICTION_ERROR_MESSAGE};
    use ratatui::backend::TestBackend;

    fn health(status: HealthStatus, checking: bool) -> HealthSnapshot {
        HealthSnapshot {
            status,
            checking,
            last_checked: None,
        }
    }

    fn render_to_string(view: &PageView) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        let ui = UiState::new(&MeasurementInput::default());
        terminal
            .draw(|f| draw(f, view, &ui, &Theme::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_prediction_without_error() {
        let form = FormState {
            prediction: Some(PredictionResult {
                predicted_class: "setosa".to_string(),
            }),
            ..FormState::default()
        };
        let view = PageView {
            base_url: "http://localhost:8000",
            health: &health(HealthStatus::Online, false),
            model_info: &ModelInfoState::Loading,
            form: &form,
        };

        let screen = render_to_string(&view);
        assert!(screen.contains("Iris setosa"));
        assert!(screen.contains("API Online"));
        assert!(!screen.contains("Prediction Error"));
        assert!(screen.contains("Loading model information..."));
        assert!(screen.contains("http://localhost:8000"));
    }

    #[test]
    fn test_renders_error_banner() {
        let form = FormState {
            error: Some(PREDICTION_ERROR_MESSAGE.to_string()),
            ..FormState::default()
        };
        let view = PageView {
            base_url: "http://localhost:8000",
            health: &health(HealthStatus::Offline, false),
            model_info: &ModelInfoState::Unavailable,
            form: &form,
        };

        let screen = render_to_string(&view);
        assert!(screen.contains("Prediction Error"));
        assert!(screen.contains("API Offline"));
        assert!(!screen.contains("Predicted Species"));
        assert!(!screen.contains("Model Information"));
    }

    #[test]
    fn test_renders_model_classes_and_checking_state() {
        let info = ModelInfoState::Ready(ModelInfo {
            model_type: "RandomForestClassifier".to_string(),
            classes: vec![
                "setosa".to_string(),
                "versicolor".to_string(),
                "virginica".to_string(),
            ],
        });
        let form = FormState {
            in_flight: 1,
            ..FormState::default()
        };
        let view = PageView {
            base_url: "http://localhost:8000",
            health: &health(HealthStatus::Online, true),
            model_info: &info,
            form: &form,
        };

        let screen = render_to_string(&view);
        assert!(screen.contains("RandomForestClassifier"));
        assert!(screen.contains("Iris setosa"));
        assert!(screen.contains("Iris versicolor"));
        assert!(screen.contains("Iris virginica"));
        assert!(screen.contains("Checking..."));
        assert!(screen.contains("Predicting..."));
        assert!(!screen.contains("API Online"));
    }
}
