use crate::app::{App, FocusPane, Selector};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(12)])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(root[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(4)])
        .split(middle[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)])
        .split(middle[1]);

    draw_controls(frame, left[0], app);
    draw_tags(frame, left[1], app);
    draw_cards(frame, right[0], app);
    draw_detail(frame, right[1], app);

    if app.show_help {
        draw_help_popup(frame, app);
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "{} | {}: {} | {} {}",
        app.locale.text("Item Catalog", "物品图鉴"),
        app.locale.text("Focus", "焦点"),
        app.focus_label(app.focus),
        app.locale.text("Lang", "语言"),
        app.locale.code(),
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(format!(
            "{}: {}",
            app.locale.text("Status", "状态"),
            app.status_line
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(app.locale.text("Overview", "概览"));
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(paragraph, area);
}

fn control_line<'a>(app: &App, pane: FocusPane, value: String) -> Line<'a> {
    let label = format!("{:<4} ", app.focus_label(pane));
    let style = if app.focus == pane {
        highlight()
    } else {
        Style::default()
    };
    let value = if pane.is_selector() {
        format!("< {value} >")
    } else {
        value
    };
    Line::from(vec![Span::raw(label), Span::styled(value, style)])
}

fn selector_value(app: &App, selector: &Selector) -> String {
    format!(
        "{} ({}/{})",
        app.selector_label(selector),
        selector.index,
        selector.values.len()
    )
}

fn draw_controls(frame: &mut Frame, area: Rect, app: &App) {
    let keyword = if app.focus == FocusPane::Keyword {
        format!("{}_", app.keyword)
    } else if app.keyword.is_empty() {
        "-".to_string()
    } else {
        app.keyword.clone()
    };
    let lines = vec![
        control_line(app, FocusPane::Keyword, keyword),
        control_line(app, FocusPane::Hero, selector_value(app, &app.hero)),
        control_line(app, FocusPane::Size, selector_value(app, &app.size)),
        control_line(app, FocusPane::Tier, selector_value(app, &app.tier)),
        control_line(app, FocusPane::Sort, app.sort_label().to_string()),
    ];
    let focused = app.focus != FocusPane::Tags && app.focus != FocusPane::Cards;
    let block = pane_block(app.locale.text("Filters", "筛选"), focused);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_tags(frame: &mut Frame, area: Rect, app: &App) {
    let tags = &app.options.tags;
    let items: Vec<ListItem<'_>> = if tags.is_empty() {
        vec![ListItem::new(app.locale.text("no tags", "无标签"))]
    } else {
        tags.iter()
            .map(|tag| {
                let mark = if app.selected_tags.contains(tag) {
                    "[x]"
                } else {
                    "[ ]"
                };
                ListItem::new(format!("{mark} {}", app.tag_label(tag)))
            })
            .collect()
    };
    let title = format!(
        "{} {}/{}",
        app.focus_label(FocusPane::Tags),
        app.selected_tags.len(),
        tags.len()
    );
    let block = pane_block(title.as_str(), app.focus == FocusPane::Tags);
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight())
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if app.focus == FocusPane::Tags && !tags.is_empty() {
        state.select(Some(app.tag_cursor.min(tags.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_cards(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!("{} ({})", app.focus_label(FocusPane::Cards), app.cards.len());
    let block = pane_block(title.as_str(), app.focus == FocusPane::Cards);
    if app.cards.is_empty() {
        let text = app.locale.text("no matching items", "没有匹配的物品");
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        return;
    }
    let items: Vec<ListItem<'_>> = app
        .cards
        .iter()
        .map(|card| {
            let mut label = card.title.clone();
            if !card.subtitle.is_empty() && card.subtitle != card.title {
                label.push_str(&format!(" / {}", card.subtitle));
            }
            if !card.meta.is_empty() {
                label.push_str(&format!("  [{}]", card.meta));
            }
            ListItem::new(label)
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight())
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    state.select(Some(app.card_cursor.min(app.cards.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let block = pane_block(app.locale.text("Detail", "详情"), false);
    let Some(card) = app.selected_card() else {
        frame.render_widget(Paragraph::new("-").block(block), area);
        return;
    };
    let mut lines = vec![Line::from(card.title.clone().bold())];
    if !card.subtitle.is_empty() {
        lines.push(Line::from(card.subtitle.clone()));
    }
    if !card.meta.is_empty() {
        lines.push(Line::from(card.meta.clone()));
    }
    if !card.stats.is_empty() {
        lines.push(Line::from(card.stats.clone()));
    }
    if !card.chips.is_empty() {
        let chips: Vec<Span<'_>> = card
            .chips
            .iter()
            .flat_map(|chip| {
                [
                    Span::styled(format!(" {chip} "), Style::default().fg(Color::Cyan)),
                    Span::raw(" "),
                ]
            })
            .collect();
        lines.push(Line::from(chips));
    }
    lines.push(Line::from(format!(
        "{}: {} ({}x{})",
        app.locale.text("Icon", "图标"),
        card.icon_url,
        card.icon_width,
        card.icon_height
    )));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 50, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(app.locale.text(
            "q/Esc quit | ? help | tab/shift-tab focus",
            "q/Esc 退出 | ? 帮助 | tab/shift-tab 切焦点",
        )),
        Line::from(app.locale.text(
            "arrows/jk move | left/right/hl cycle selector",
            "方向键/jk 移动 | 左右/hl 切换选项",
        )),
        Line::from(app.locale.text(
            "space toggle tag | c clear tags",
            "空格 勾选标签 | c 清空标签",
        )),
        Line::from(app.locale.text(
            "keyword focused: type to search, backspace delete, ctrl+u clear",
            "关键词焦点：直接输入搜索，退格删除，ctrl+u 清空",
        )),
    ];
    let block = Block::default()
        .title(app.locale.text("Help", "帮助"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
