//! Screen layout. `render` reads the app and draws; it never mutates, so the
//! same state always draws the same frame.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use portfolio_api::models::chat::Role;
use portfolio_api::models::content::{CollectionKind, ContentItem};

use crate::app::{App, SEND_DISABLED};
use crate::chat::ChatStatus;
use crate::commands::help_text;
use crate::navigation::timeline_offset;
use crate::store::Store;

/// Columns given to each date on the timeline strip.
const MARKER_WIDTH: u16 = 12;

pub fn render(frame: &mut Frame, app: &App) {
    let store = app.store();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_tabs(frame, store, chunks[0]);

    let body = if store.chat().is_panel_open() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(chunks[1]);
        render_chat(frame, app, columns[1]);
        columns[0]
    } else {
        chunks[1]
    };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(body);
    render_card(frame, store, rows[0]);
    render_timeline(frame, store, rows[1]);

    render_prompt(frame, app, chunks[2]);

    if app.show_help() {
        render_help(frame, frame.area());
    }
}

fn render_tabs(frame: &mut Frame, store: &Store, area: Rect) {
    let active = CollectionKind::ALL
        .iter()
        .position(|kind| *kind == store.nav().active())
        .unwrap_or(0);
    let tabs = Tabs::new(CollectionKind::ALL.iter().map(|kind| kind.label()))
        .select(active)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .block(Block::bordered().title(" Portfolio "));
    frame.render_widget(tabs, area);
}

fn render_card(frame: &mut Frame, store: &Store, area: Rect) {
    let Some(item) = store.active_item() else {
        frame.render_widget(
            Paragraph::new("(aucun élément)").block(Block::bordered()),
            area,
        );
        return;
    };

    let logo = item.metadata.logo.as_deref().unwrap_or("•");
    let title = format!(
        " {logo} {} ({}/{}) ",
        item.title,
        store.nav().index() + 1,
        store.active_items().len()
    );

    let mut lines = vec![Line::styled(
        item.date.clone(),
        Style::default().add_modifier(Modifier::DIM),
    )];
    if store.nav().is_flipped(&item.id) {
        lines.extend(detail_lines(item));
    } else {
        lines.push(Line::raw(item.short_description.clone()));
    }
    if !item.tags.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("# {}", item.tags.join(" · ")),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(title));
    frame.render_widget(card, area);
}

fn detail_lines(item: &ContentItem) -> Vec<Line<'static>> {
    let meta = &item.metadata;
    let facts: Vec<&str> = [
        meta.client.as_deref(),
        meta.issuer.as_deref(),
        meta.duration.as_deref(),
        meta.sector.as_deref(),
        meta.location.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut lines = Vec::new();
    if !facts.is_empty() {
        lines.push(Line::styled(
            facts.join(" | "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::raw(item.long_description.clone()));
    if let Some(impact) = &meta.impact {
        lines.push(Line::raw(format!("🎯 {impact}")));
    }
    lines
}

fn render_timeline(frame: &mut Frame, store: &Store, area: Rect) {
    let items = store.active_items();
    let index = store.nav().index();
    let markers: Vec<Span> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let width = MARKER_WIDTH as usize;
            if i == index {
                Span::styled(
                    format!("{:^width$}", format!("({})", item.date)),
                    Style::default().add_modifier(Modifier::REVERSED),
                )
            } else {
                Span::raw(format!("{:^width$}", item.date))
            }
        })
        .collect();

    let block = Block::bordered().title(" Parcours ");
    let offset = timeline_offset(block.inner(area).width, MARKER_WIDTH, items.len(), index);
    let strip = Paragraph::new(Line::from(markers))
        .scroll((0, offset))
        .block(block);
    frame.render_widget(strip, area);
}

fn render_chat(frame: &mut Frame, app: &App, area: Rect) {
    let chat = app.store().chat();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = chat
        .log()
        .iter()
        .map(|message| {
            let who = match message.role {
                Role::User => "vous> ",
                Role::Assistant => "assistant> ",
            };
            Line::from(vec![Span::styled(who, bold), Span::raw(message.content.as_str())])
        })
        .collect();
    if chat.status() == ChatStatus::AwaitingResponse {
        lines.push(Line::from(vec![Span::styled("assistant> ", bold), Span::raw("…")]));
    }

    let block = Block::bordered().title(" Assistant ");
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;
    // rows after wrapping, close enough to keep the newest message in view
    let rows: usize = lines.iter().map(|line| line.width().max(1).div_ceil(width)).sum();
    let bottom = rows.saturating_sub(inner.height as usize);
    let top = bottom.saturating_sub(app.chat_scroll() as usize);

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(top).unwrap_or(u16::MAX), 0))
        .block(block);
    frame.render_widget(panel, area);
}

fn render_prompt(frame: &mut Frame, app: &App, area: Rect) {
    let title = match (app.message(), app.store().chat().status()) {
        (Some(message), _) => format!(" {message} "),
        (None, ChatStatus::AwaitingResponse) => format!(" {SEND_DISABLED} "),
        (None, ChatStatus::Idle) => " :help pour l'aide ".to_string(),
    };
    let prompt = Paragraph::new(format!("> {}", app.prompt())).block(Block::bordered().title(title));
    frame.render_widget(prompt, area);

    let typed = u16::try_from(app.prompt().chars().count()).unwrap_or(u16::MAX);
    frame.set_cursor_position(Position::new(
        area.x.saturating_add(3).saturating_add(typed),
        area.y + 1,
    ));
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered(area, 80, 80);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(help_text())
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title(" Aide ")),
        popup,
    );
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use portfolio_api::content::loader::parse_portfolio;
    use portfolio_api::models::content::Portfolio;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;
    use crate::store::Action;

    fn app() -> App {
        let portfolio =
            parse_portfolio(include_str!("../../api/content/portfolio.yaml")).unwrap();
        App::new(Store::new(Arc::new(portfolio)))
    }

    fn draw(app: &App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(140, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    fn screen(app: &App) -> String {
        rows(&draw(app)).join("\n")
    }

    #[test]
    fn test_render_is_deterministic() {
        let app = app();
        assert_eq!(draw(&app), draw(&app));
    }

    #[test]
    fn test_active_tab_is_highlighted() {
        let mut app = app();
        app.apply(Action::SelectCollection(CollectionKind::Skills));
        let buffer = draw(&app);

        let lines = rows(&buffer);
        let tab_row = &lines[1];
        let byte = tab_row.find("Compétences").unwrap();
        let x = tab_row[..byte].chars().count() as u16;
        assert!(buffer[(x, 1)].modifier.contains(Modifier::REVERSED));

        let byte = tab_row.find("Expériences").unwrap();
        let x = tab_row[..byte].chars().count() as u16;
        assert!(!buffer[(x, 1)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_card_shows_position_and_timeline_marker() {
        let mut app = app();
        app.apply(Action::Next);
        let screen = screen(&app);
        assert!(screen.contains("Système Multi-Agents SentinelOne (2/6)"));
        assert!(screen.contains("(2024-11)"));
        assert!(!screen.contains(" Assistant "));
    }

    #[test]
    fn test_flipped_card_shows_details() {
        let mut app = app();
        assert!(screen(&app).contains("Tech lead traducteur GenAI avec Mistral Large"));

        app.apply(Action::ToggleActiveFlip);
        let details = screen(&app);
        assert!(details.contains("Wavestone | 13 mois | Digital Transformation"));
        assert!(details.contains("Industrialisation réussie"));
    }

    #[test]
    fn test_chat_panel_shows_disabled_input_while_awaiting() {
        let mut app = app();
        for c in "Salut".chars() {
            app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let screen = screen(&app);
        assert!(screen.contains(" Assistant "));
        assert!(screen.contains("vous> Salut"));
        assert!(screen.contains("assistant> …"));
        assert!(screen.contains(SEND_DISABLED));
    }

    #[test]
    fn test_help_overlay_lists_suggestions() {
        let mut app = app();
        for c in ":help".chars() {
            app.on_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
        app.on_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let screen = screen(&app);
        assert!(screen.contains(" Aide "));
        assert!(screen.contains("Questions suggérées"));
    }

    #[test]
    fn test_render_empty_collection() {
        let app = App::new(Store::new(Arc::new(Portfolio::default())));
        assert!(screen(&app).contains("(aucun élément)"));
    }
}
