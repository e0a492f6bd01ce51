use crate::api::{sprite::HalfBlock, CreatureRecord, SpriteArt};
use crate::ui::app::{App, SearchView, SpriteState};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Width of the centered card holding the form and the result.
const CARD_WIDTH: u16 = 64;

pub const TITLE: &str = "Search Pokémon";
pub const PLACEHOLDER: &str = "Enter a Pokémon name";
pub const LOADING_TEXT: &str = "Loading...";

/// Upper-case the first letter of every whitespace-separated word, like CSS
/// `text-transform: capitalize`.
pub fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            out.push(c);
        } else if at_word_start {
            at_word_start = false;
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let width = area.width.min(CARD_WIDTH);
    let card = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);

    let card_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.fg_dim))
        .style(Style::default().bg(theme.panel_bg).fg(theme.fg));
    let inner = card_block.inner(card);
    frame.render_widget(card_block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // Form
            Constraint::Length(2), // Status
            Constraint::Min(0),    // Result
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    render_title(frame, theme, chunks[0]);
    render_form(frame, app, chunks[1]);
    render_status(frame, app, chunks[2]);
    if let SearchView::Found(record) = app.view() {
        render_creature(frame, app, record, chunks[3]);
    }
    render_footer(frame, theme, chunks[4]);
}

fn render_title(frame: &mut Frame, theme: &Theme, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(10)])
        .split(area);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let input_inner = input_block.inner(chunks[0]);

    let text = if app.query.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(theme.fg_dim)))
    } else {
        Line::from(Span::styled(app.query.as_str(), Style::default().fg(theme.fg)))
    };
    frame.render_widget(Paragraph::new(text).block(input_block), chunks[0]);

    let typed = u16::try_from(Line::from(app.query.as_str()).width()).unwrap_or(u16::MAX);
    let cursor_x = input_inner
        .x
        .saturating_add(typed)
        .min(input_inner.right().saturating_sub(1));
    frame.set_cursor_position((cursor_x, input_inner.y));

    let button = Paragraph::new(Line::from(Span::styled(
        "Search",
        Style::default()
            .fg(theme.on_accent)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.accent)),
    );
    frame.render_widget(button, chunks[1]);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = match app.view() {
        SearchView::Loading => Line::from(Span::styled(
            LOADING_TEXT,
            Style::default().fg(theme.fg_dim),
        )),
        SearchView::Failed(message) => {
            Line::from(Span::styled(message, Style::default().fg(theme.error)))
        }
        SearchView::Idle | SearchView::Found(_) => return,
    };

    let status = Paragraph::new(vec![Line::from(""), line])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}

/// Rows taken by everything in the result panel except the sprite and the
/// move list: name with its padding, gap, type chips, gap, "Moves:".
const RESULT_FIXED_ROWS: usize = 7;

fn render_creature(frame: &mut Frame, app: &App, record: &CreatureRecord, area: Rect) {
    let theme = &app.theme;
    let moves = app.visible_moves();
    let sprite_rows = usize::from(area.height).saturating_sub(RESULT_FIXED_ROWS + moves.len());

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            capitalize(&record.name),
            Style::default()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    lines.extend(sprite_lines(app, theme, sprite_rows));
    lines.push(Line::from(""));

    let mut chips = Vec::new();
    for (i, name) in record.type_names().enumerate() {
        if i > 0 {
            chips.push(Span::raw(" "));
        }
        chips.push(Span::styled(
            format!(" {} ", capitalize(name)),
            Style::default().fg(theme.type_fg).bg(theme.type_bg),
        ));
    }
    lines.push(Line::from(chips));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Moves:",
        Style::default()
            .fg(theme.heading)
            .add_modifier(Modifier::BOLD),
    )));
    for name in moves {
        lines.push(Line::from(Span::styled(
            format!("  {}  ", capitalize(name)),
            Style::default().fg(theme.move_fg).bg(theme.move_bg),
        )));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// The sprite area, at most `max_rows` tall.
fn sprite_lines(app: &App, theme: &Theme, max_rows: usize) -> Vec<Line<'static>> {
    if max_rows == 0 {
        return Vec::new();
    }

    let dim = Style::default().fg(theme.fg_dim);
    match &app.sprite {
        SpriteState::Ready { url, art } if art.is_empty() => {
            vec![Line::from(Span::styled(url.clone(), dim))]
        }
        SpriteState::Ready { art, .. } => art_lines(&art.fit_rows(max_rows)),
        SpriteState::Loading(_) => vec![Line::from(Span::styled("Loading sprite...", dim))],
        SpriteState::Unavailable(url) => vec![Line::from(Span::styled(url.clone(), dim))],
        SpriteState::None => vec![Line::from(Span::styled("No sprite", dim))],
    }
}

/// Turn decoded sprite rows into half-block spans.
pub fn art_lines(art: &SpriteArt) -> Vec<Line<'static>> {
    art.rows
        .iter()
        .map(|row| Line::from(row.iter().map(|cell| cell_span(*cell)).collect::<Vec<_>>()))
        .collect()
}

fn cell_span(cell: HalfBlock) -> Span<'static> {
    let rgb = |[r, g, b]: [u8; 3]| Color::Rgb(r, g, b);
    match (cell.top, cell.bottom) {
        (None, None) => Span::raw(" "),
        (Some(top), None) => Span::styled("▀", Style::default().fg(rgb(top))),
        (None, Some(bottom)) => Span::styled("▄", Style::default().fg(rgb(bottom))),
        (Some(top), Some(bottom)) => {
            Span::styled("▀", Style::default().fg(rgb(top)).bg(rgb(bottom)))
        }
    }
}

fn render_footer(frame: &mut Frame, theme: &Theme, area: Rect) {
    let footer = Paragraph::new("[Enter] Search  [Ctrl+U] Clear  [Esc] Quit")
        .style(Style::default().fg(theme.fg_dim))
        .alignment(Alignment::Center);

    frame.render_widget(footer, area);
}
