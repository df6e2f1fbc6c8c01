use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::{
    app::App,
    clock::Phase,
    cues::CueOutput,
    form::Field,
    format::{calculate_progress, format_time},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Run => Color::Green,
        Phase::Walk => Color::Blue,
        Phase::Setup | Phase::Complete => Color::Gray,
    }
}

impl<O: CueOutput> Widget for &App<O> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let clock = &self.clock;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(5), // form
                Constraint::Length(7), // timer
                Constraint::Length(1), // progress
                Constraint::Length(1), // announcement / message
                Constraint::Length(1), // legend
                Constraint::Min(0),
            ])
            .split(area);

        let sound = if self.sound_enabled() {
            Span::styled("♪ sound on", Style::default().fg(Color::Green))
        } else {
            Span::styled("sound off", dim_style)
        };
        Paragraph::new(Line::from(vec![
            Span::styled("stride  ", bold_style),
            sound,
        ]))
        .alignment(Alignment::Right)
        .render(chunks[0], buf);

        // setup inputs, locked once the workout is under way
        let editing = clock.phase() == Phase::Setup;
        let form_lines: Vec<Line> = Field::ALL
            .iter()
            .map(|&field| {
                let focused = editing && self.form.focused == field;
                let value = self.form.value(field);
                let value_style = if !editing {
                    dim_style
                } else if focused {
                    bold_style.add_modifier(Modifier::UNDERLINED)
                } else {
                    bold_style
                };
                Line::from(vec![
                    Span::styled(if focused { "> " } else { "  " }, bold_style),
                    Span::raw(format!("{:<22}", field.to_string())),
                    Span::styled(
                        if value.is_empty() && focused {
                            "_".to_string()
                        } else {
                            value.to_string()
                        },
                        value_style,
                    ),
                ])
            })
            .collect();
        Paragraph::new(form_lines)
            .block(Block::default().borders(Borders::ALL).title("Setup"))
            .render(chunks[1], buf);

        let phase_style = Style::default()
            .fg(phase_color(clock.phase()))
            .add_modifier(Modifier::BOLD);
        let mut timer_lines = vec![
            Line::from(Span::styled(
                format_time(u64::from(clock.time_left_secs())),
                phase_style,
            )),
            Line::from(Span::styled(
                if clock.phase() == Phase::Setup {
                    "Ready".to_string()
                } else if clock.is_paused() {
                    format!("{} (paused)", clock.phase())
                } else {
                    clock.phase().to_string()
                },
                bold_style,
            )),
        ];
        if clock.phase() != Phase::Setup {
            if let Some(config) = clock.config() {
                timer_lines.push(Line::from(format!(
                    "Rep {} of {}",
                    clock.current_rep(),
                    config.repetitions
                )));
            }
        }
        timer_lines.push(Line::from(Span::styled(
            format!("Total Time: {}", format_time(clock.elapsed_secs())),
            dim_style,
        )));
        if let Some(started_at) = self.started_at {
            timer_lines.push(Line::from(Span::styled(
                format!("Started {}", started_at.format("%H:%M")),
                dim_style,
            )));
        }
        Paragraph::new(timer_lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .render(chunks[2], buf);

        let progress = calculate_progress(clock.state(), clock.config());
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
            .ratio(progress / 100.0)
            .label(format!("{progress:.0}%"))
            .render(chunks[3], buf);

        let status = match (&self.message, clock.sink().last_announcement()) {
            (Some(message), _) => Span::styled(message.clone(), Style::default().fg(Color::Red)),
            (None, Some(announcement)) => Span::styled(
                announcement.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
            ),
            (None, None) => Span::raw(""),
        };
        Paragraph::new(status)
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        let primary = if clock.is_running() {
            "(space) pause"
        } else if self.can_start() {
            "(space) start"
        } else {
            "(space) start [fill in all fields]"
        };
        Paragraph::new(Span::styled(
            format!("{primary} / (r)eset / (m)ute / (esc)ape"),
            italic_style,
        ))
        .render(chunks[5], buf);
    }
}
