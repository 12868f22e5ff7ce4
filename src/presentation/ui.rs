use crate::application::{App, SUCCESS_MESSAGE, SocialProvider};
use crate::domain::{Field, SubmissionState, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::time::Instant;

const ACCENT: Color = Color::Rgb(108, 99, 255);
const ERROR: Color = Color::Rgb(255, 82, 82);

pub fn render_ui(f: &mut Frame, app: &App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_tabs(f, app, chunks[0]);
    match app.tab() {
        Tab::Home => render_home(f, app, now, chunks[1]),
        Tab::Register => render_register(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let selected = match app.tab() {
        Tab::Home => 0,
        Tab::Register => 1,
    };
    let tabs = Tabs::new(vec![Tab::Home.title(), Tab::Register.title()])
        .block(Block::default().borders(Borders::ALL).title("EduBridge"))
        .select(selected)
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

/// Title color steps in as the entrance animation progresses.
fn entrance_style(progress: f32) -> Style {
    if progress < 0.34 {
        Style::default().fg(Color::DarkGray)
    } else if progress < 0.67 {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }
}

fn render_home(f: &mut Frame, app: &App, now: Instant, area: Rect) {
    let progress = app.entrance().progress(now);

    let social: Vec<Span> = SocialProvider::ALL
        .iter()
        .flat_map(|provider| {
            let label = provider.label();
            [
                Span::styled(format!("[{}]", &label[..1].to_lowercase()), Style::default().fg(ACCENT)),
                Span::raw(format!(" {}   ", label)),
            ]
        })
        .collect();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("Welcome to EduBridge", entrance_style(progress))),
        Line::from(Span::styled(
            "Start your learning journey today.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    if app.entrance().is_complete(now) {
        lines.push(Line::from(Span::styled(
            "[ Get Started ]  (Enter)",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from("Or continue with"));
        lines.push(Line::from(social));
    }

    let home = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(home, area);
}

fn render_register(f: &mut Frame, app: &App, area: Rect) {
    let mut constraints: Vec<Constraint> = Field::ALL.iter().map(|_| Constraint::Length(4)).collect();
    constraints.push(Constraint::Length(3));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(area);

    for (index, field) in Field::ALL.iter().enumerate() {
        render_input(f, app, *field, chunks[index]);
    }
    render_submit_button(f, app, chunks[Field::ALL.len()]);
}

fn render_input(f: &mut Frame, app: &App, field: Field, area: Rect) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let focused = app.focused() == field;
    let value = app.draft().get(field);
    let text = if value.is_empty() {
        Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
    } else if field.is_secret() {
        Span::raw("•".repeat(value.chars().count()))
    } else {
        Span::raw(value.to_string())
    };

    let border = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::Gray)
    };
    let input = Paragraph::new(Line::from(text))
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(input, parts[0]);

    if let Some(message) = app.visible_error(field) {
        let error = Paragraph::new(Span::styled(format!(" ! {}", message), Style::default().fg(ERROR)));
        f.render_widget(error, parts[1]);
    }
}

fn render_submit_button(f: &mut Frame, app: &App, area: Rect) {
    let (label, style) = match app.submission() {
        SubmissionState::Pending => ("Registering...", Style::default().fg(Color::Yellow)),
        SubmissionState::Succeeded => ("Registered", Style::default().fg(Color::Green)),
        _ if app.can_submit() => (
            "Register",
            Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        _ => ("Register", Style::default().fg(Color::DarkGray)),
    };

    let button = Paragraph::new(label)
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(button, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let (text, style) = match app.submission() {
        SubmissionState::Succeeded => (SUCCESS_MESSAGE.to_string(), Style::default().fg(Color::Green)),
        SubmissionState::Failed(reason) => (
            format!("{} (Esc to dismiss, Enter to retry)", reason),
            Style::default().fg(ERROR),
        ),
        SubmissionState::Pending => ("Creating your account...".to_string(), Style::default().fg(Color::Yellow)),
        SubmissionState::Idle => match app.notice() {
            Some(notice) => (notice.to_string(), Style::default().fg(Color::Cyan)),
            None => (help_text(app.tab()).to_string(), Style::default()),
        },
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn help_text(tab: Tab) -> &'static str {
    match tab {
        Tab::Home => "Enter: get started | g/a/f: social sign-in | 1/2: switch tab | q: quit",
        Tab::Register => "Tab/↑↓: move | Enter: register | Ctrl+V: paste | Esc: back | Ctrl+C: quit",
    }
}
