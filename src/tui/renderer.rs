use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::core::settings::GameMode;

use super::app::{
    App, Screen, DIFFICULTY_CHOICES, FIELD_CUSTOM, FIELD_DIFFICULTY, FIELD_HINTS, FIELD_MODE,
    FIELD_NAME,
};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Settings => draw_settings(frame, app),
        Screen::Playing | Screen::GameOver => draw_game(frame, app),
    }
}

fn draw_settings(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(9),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new("🎯 ═══ GUESS THE NUMBER ═══ 🎯")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let focused = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let marker = |field: usize| if app.form.focus == field { "▶ " } else { "  " };
    let row_style = |field: usize| {
        if app.form.focus == field {
            focused
        } else {
            Style::default()
        }
    };

    let difficulty_label = if app.form.is_custom() {
        "Custom"
    } else {
        DIFFICULTY_CHOICES[app.form.difficulty_index].label()
    };

    let mut lines = vec![
        Line::from(format!("{}Player Name:      {}_", marker(FIELD_NAME), app.form.name))
            .style(row_style(FIELD_NAME)),
        Line::from(format!(
            "{}Difficulty:       ◀ {} ▶",
            marker(FIELD_DIFFICULTY),
            difficulty_label
        ))
        .style(row_style(FIELD_DIFFICULTY)),
    ];
    if app.form.is_custom() {
        lines.push(
            Line::from(format!(
                "{}Custom Attempts:  {}_",
                marker(FIELD_CUSTOM),
                app.form.custom_attempts
            ))
            .style(row_style(FIELD_CUSTOM)),
        );
    }
    lines.push(
        Line::from(format!(
            "{}Enable Hints:     ◀ {} ▶",
            marker(FIELD_HINTS),
            if app.form.hints_enabled { "Yes" } else { "No" }
        ))
        .style(row_style(FIELD_HINTS)),
    );
    lines.push(
        Line::from(format!("{}Game Mode:        ◀ {} ▶", marker(FIELD_MODE), app.form.mode.label()))
            .style(row_style(FIELD_MODE)),
    );
    if app.form.mode == GameMode::TwoPlayer {
        lines.push(Line::from(""));
        lines.push(
            Line::from("  Player 2 joins at the same keyboard.")
                .style(Style::default().fg(Color::Gray)),
        );
    }
    if let Some(error) = &app.form.error {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("  ⚠ {error}")).style(Style::default().fg(Color::Red)));
    }

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" GAME SETTINGS "));
    frame.render_widget(form, chunks[1]);

    let instructions =
        Paragraph::new("[↑/↓] Field  [←/→] Change  [Enter] Start Game  [Esc] Quit")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
    frame.render_widget(instructions, chunks[2]);
}

fn draw_game(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new("🎯 ═══ GUESS THE NUMBER ═══ 🎯")
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_status(frame, app, chunks[1]);

    let input = Paragraph::new(format!("> {}_", app.input))
        .block(Block::default().borders(Borders::ALL).title(" Your Guess "));
    frame.render_widget(input, chunks[2]);

    let feedback = Paragraph::new(app.feedback.as_str())
        .block(Block::default().borders(Borders::ALL).title(" Feedback "))
        .style(Style::default().fg(app.feedback_color()))
        .alignment(Alignment::Center);
    frame.render_widget(feedback, chunks[3]);

    draw_log(frame, app, chunks[4]);

    let help = match app.screen {
        Screen::GameOver => "[Y] Play Again  [S] Settings  [N] Quit",
        _ => "[0-9] Type  [Enter] Guess  [↑/↓] Scroll Log  [Esc] Quit",
    };
    let instructions = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(instructions, chunks[5]);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(round) = &app.round else {
        return;
    };
    let session = round.session();

    let (text, style) = if app.screen == Screen::GameOver {
        let style = if session.is_won() {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        (vec![Line::from(app.banner.clone())], style)
    } else {
        let instruction = match round.current_player() {
            Some(player) => format!(
                "It's {player}'s turn to guess. Number between 1 and {}.",
                session.upper_bound()
            ),
            None => format!(
                "I'm thinking of a number between 1 and {}.",
                session.upper_bound()
            ),
        };
        let attempts = match session.attempts_left() {
            Some(left) => format!("Attempts left: {left}"),
            None => format!("Attempts used: {}", session.attempts_used()),
        };
        (
            vec![Line::from(instruction), Line::from(attempts)],
            Style::default().fg(Color::Yellow),
        )
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" Status "))
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(status, area);
}

fn draw_log(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let end = app.log.len().saturating_sub(app.log_scroll.min(app.log.len()));
    let start = end.saturating_sub(visible);
    let lines: Vec<Line> = app.log[start..end]
        .iter()
        .map(|entry| Line::from(entry.as_str()))
        .collect();

    let title = if app.log_scroll > 0 {
        format!(" Game Log (↑{}) ", app.log_scroll)
    } else {
        " Game Log ".to_string()
    };
    let log = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(log, area);
}
