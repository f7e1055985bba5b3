use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Tabs},
    Frame,
};

use crate::config::ColorConfig;
use crate::splash::Splash;
use crate::storefront::{Card, Dropdown, IndicatorLabel, Storefront};
use crate::tui::app::{InputMode, LayoutMode, SplashPhase, Tab, TuiApp};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];
const ANIMATION_WIDTH: usize = 11;
const HEADER_ROWS: u16 = 3;
const FILTER_ROWS: u16 = 1;

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig) {
    if let Some(phase) = &app.splash {
        render_splash(frame, phase, colors);
        return;
    }

    let (header_rows, filter_rows) = if app.storefront.is_header_hidden() {
        (0, 0)
    } else {
        (HEADER_ROWS, FILTER_ROWS)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_rows),
            Constraint::Length(filter_rows),
            Constraint::Length(app.indicator_rows),
            Constraint::Min(4),    // Card grid
            Constraint::Length(1), // Loading / end-of-list line
            Constraint::Length(1), // Bottom navigation
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    app.viewport = chunks[3];

    render_header(frame, app, chunks[0], colors);
    render_indicator(frame, app, chunks[2], colors);
    render_cards(frame, app, chunks[3], colors);
    render_list_footer(frame, &app.storefront, chunks[4], colors);
    render_bottom_nav(frame, app.tab, chunks[5], colors);
    render_status_bar(frame, app, chunks[6], colors);
    // drawn last so an open dropdown overlaps the grid
    render_filter_bar(frame, app, chunks[1], colors);
}

fn frame_lines(lines: Option<&[String]>) -> Vec<String> {
    let mut out: Vec<String> = lines.map(<[String]>::to_vec).unwrap_or_default();
    out.resize(3, String::new());
    out
}

fn render_header(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    if area.height == 0 {
        return;
    }
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(ANIMATION_WIDTH as u16 + 1),
            Constraint::Min(10),
            Constraint::Length(5),
        ])
        .split(area);

    let icon = app
        .storefront
        .user_icon()
        .and_then(|view| app.storefront.animation(view))
        .and_then(|handle| handle.frame());
    let icon_lines: Vec<Line> = frame_lines(icon)
        .into_iter()
        .map(|l| Line::styled(l, Style::default().fg(colors.animation)))
        .collect();
    frame.render_widget(Paragraph::new(icon_lines), chunks[0]);

    let title = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            "Portals",
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[1]);

    let toggle = Paragraph::new(vec![
        Line::default(),
        Line::from(format!("[{}]", app.layout.toggle_glyph())),
    ])
    .style(Style::default().fg(colors.accent))
    .alignment(Alignment::Right);
    frame.render_widget(toggle, chunks[2]);
}

fn dropdown_label(dropdown: &Dropdown) -> String {
    let selected = dropdown.selected().map(|o| o.label).unwrap_or_default();
    let arrow = if dropdown.is_open() { "▴" } else { "▾" };
    format!(" {}: {} {} ", dropdown.title(), selected, arrow)
}

fn render_filter_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    if area.height == 0 {
        return;
    }
    let filters = app.storefront.filters();
    let searching = app.input_mode == InputMode::Search;

    let search = if filters.query().is_empty() && !searching {
        Span::styled(
            " ⌕ Qidirish ",
            Style::default()
                .fg(colors.card_id)
                .add_modifier(Modifier::DIM),
        )
    } else {
        let cursor = if searching { "▏" } else { "" };
        Span::styled(
            format!(" ⌕ {}{} ", filters.query(), cursor),
            Style::default().fg(colors.card_name),
        )
    };
    let search_style = if searching {
        Style::default().fg(colors.accent)
    } else {
        Style::default().fg(colors.border)
    };

    let mut spans = vec![
        Span::styled("[", search_style),
        search,
        Span::styled("]", search_style),
    ];
    let mut x = spans.iter().map(|s| s.content.chars().count()).sum::<usize>() as u16;
    let mut popup = None;

    for dropdown in filters.dropdowns() {
        spans.push(Span::raw(" "));
        x += 1;
        let label = dropdown_label(dropdown);
        let style = if dropdown.is_open() {
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.card_name)
        };
        if dropdown.is_open() {
            popup = Some((x, dropdown));
        }
        x += label.chars().count() as u16;
        spans.push(Span::styled(label, style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if let Some((offset, dropdown)) = popup {
        render_dropdown(frame, dropdown, area.x + offset, area.y + 1, colors);
    }
}

fn render_dropdown(frame: &mut Frame, dropdown: &Dropdown, x: u16, y: u16, colors: &ColorConfig) {
    let screen = frame.area();
    let widest = dropdown
        .options()
        .iter()
        .map(|o| o.label.chars().count())
        .max()
        .unwrap_or(0) as u16;
    let area = Rect::new(x, y, widest + 4, dropdown.options().len() as u16 + 2).intersection(screen);
    if area.is_empty() {
        return;
    }

    let lines: Vec<Line> = dropdown
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let mut style = Style::default().fg(colors.card_name);
            if i == dropdown.highlighted() {
                style = style.fg(colors.price_fg).bg(colors.price_bg);
            }
            Line::styled(format!(" {} ", option.label), style)
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_indicator(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    if area.height == 0 {
        return;
    }
    let indicator = app.storefront.gesture().indicator();
    let glyph = match indicator.label {
        IndicatorLabel::Refreshing if indicator.spinning => {
            SPINNER[(app.ticks as usize) % SPINNER.len()]
        }
        IndicatorLabel::Release => "↑",
        _ => "↓",
    };

    let mut style = Style::default().fg(colors.indicator);
    if indicator.opacity < 0.5 {
        style = style.add_modifier(Modifier::DIM);
    }

    // text sits on the last row so it slides in from the top
    let mut lines = vec![Line::default(); usize::from(area.height.saturating_sub(1))];
    lines.push(Line::styled(
        format!("{} {}", glyph, indicator.label.text()),
        style,
    ));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn render_cards(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let geometry = app.geometry();
    let cards = app.storefront.cards();

    for (index, card) in cards.iter().enumerate() {
        let Some(screen) = geometry.screen_rect(index, app.scroll) else {
            continue;
        };
        let rect = geometry.card_rect(index);
        let clipped_top = app.scroll.saturating_sub(rect.y);
        let clipped_bottom =
            (rect.y + rect.height).saturating_sub(app.scroll + u32::from(area.height));

        let mut borders = Borders::LEFT | Borders::RIGHT;
        if clipped_top == 0 {
            borders |= Borders::TOP;
        }
        if clipped_bottom == 0 {
            borders |= Borders::BOTTOM;
        }

        let hovered = app.hovered == Some(index);
        let border_color = if hovered {
            colors.card_hover_border
        } else {
            colors.card_border
        };
        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(border_color));

        let animation = card
            .view
            .and_then(|view| app.storefront.animation(view))
            .and_then(|handle| handle.frame());
        let lines = match app.layout {
            LayoutMode::Grid => grid_card_lines(card, animation, colors),
            LayoutMode::List => list_card_lines(card, animation, colors),
        };

        // the top border takes the first hidden row
        let skip = clipped_top.saturating_sub(1) as u16;
        let alignment = match app.layout {
            LayoutMode::Grid => Alignment::Center,
            LayoutMode::List => Alignment::Left,
        };
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(alignment)
            .scroll((skip, 0));
        frame.render_widget(paragraph, screen);
    }
}

fn price_span(card: &Card, colors: &ColorConfig) -> Span<'static> {
    Span::styled(
        format!(" {} UZS ", card.item.display_price()),
        Style::default()
            .fg(colors.price_fg)
            .bg(colors.price_bg)
            .add_modifier(Modifier::BOLD),
    )
}

fn grid_card_lines(
    card: &Card,
    animation: Option<&[String]>,
    colors: &ColorConfig,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = frame_lines(animation)
        .into_iter()
        .map(|l| Line::styled(l, Style::default().fg(colors.animation)))
        .collect();
    lines.push(Line::styled(
        card.item.name.clone(),
        Style::default()
            .fg(colors.card_name)
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(
        card.item.id.clone(),
        Style::default().fg(colors.card_id),
    ));
    lines.push(Line::from(price_span(card, colors)));
    lines
}

fn list_card_lines(
    card: &Card,
    animation: Option<&[String]>,
    colors: &ColorConfig,
) -> Vec<Line<'static>> {
    let details = [
        Span::styled(
            card.item.name.clone(),
            Style::default()
                .fg(colors.card_name)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(card.item.id.clone(), Style::default().fg(colors.card_id)),
        price_span(card, colors),
    ];

    frame_lines(animation)
        .into_iter()
        .zip(details)
        .map(|(art, detail)| {
            Line::from(vec![
                Span::styled(
                    format!("{:<width$} ", art, width = ANIMATION_WIDTH),
                    Style::default().fg(colors.animation),
                ),
                detail,
            ])
        })
        .collect()
}

fn render_list_footer(frame: &mut Frame, storefront: &Storefront, area: Rect, colors: &ColorConfig) {
    let pagination = storefront.pagination();
    let text = if pagination.is_loading() {
        "Yuklanmoqda..."
    } else if !pagination.has_more() && !storefront.cards().is_empty() {
        "Boshqa NFT qolmadi"
    } else {
        ""
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(colors.card_id))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_bottom_nav(frame: &mut Frame, active: Tab, area: Rect, colors: &ColorConfig) {
    let selected = Tab::ALL.iter().position(|t| *t == active).unwrap_or(0);
    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()))
        .select(selected)
        .style(Style::default().fg(colors.tab_inactive))
        .highlight_style(
            Style::default()
                .fg(colors.tab_active)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    frame.render_widget(tabs, area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let pagination = app.storefront.pagination();
    let hints = if app.input_mode == InputMode::Search {
        "Type to search  Enter/Esc:Done".to_string()
    } else if app.storefront.filters().open_dropdown().is_some() {
        "j/k:Move  Enter:Select  Esc:Close".to_string()
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.storefront.gesture().is_refreshing() {
        "Refreshing...".to_string()
    } else {
        "j/k:Scroll  drag:Pull to refresh  r:Refresh  /:Search  c/s:Filters  v:Layout  Tab:Nav  q:Quit"
            .to_string()
    };
    let status = format!("{}  [{}/{}]", hints, pagination.loaded(), pagination.total());

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));
    frame.render_widget(paragraph, area);
}

fn render_splash(frame: &mut Frame, phase: &SplashPhase, colors: &ColorConfig) {
    let splash = &phase.splash;
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(3), // Main animation
            Constraint::Length(1),
            Constraint::Length(1), // Title
            Constraint::Length(1),
            Constraint::Length(3), // Small animations
            Constraint::Length(1),
            Constraint::Length(1), // Progress
            Constraint::Min(0),
        ])
        .split(area);

    let main = splash
        .main_view()
        .and_then(|view| splash.animation(view))
        .and_then(|handle| handle.frame());
    let main_lines: Vec<Line> = frame_lines(main)
        .into_iter()
        .map(|l| Line::styled(l, Style::default().fg(colors.animation)))
        .collect();
    frame.render_widget(
        Paragraph::new(main_lines).alignment(Alignment::Center),
        chunks[1],
    );

    let title = Paragraph::new(Line::styled(
        "Portals",
        Style::default()
            .fg(colors.accent)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[3]);

    frame.render_widget(
        Paragraph::new(small_animation_lines(splash, colors)).alignment(Alignment::Center),
        chunks[5],
    );

    let progress = splash.progress(phase.started.elapsed());
    let bar_width = area.width.min(40);
    let bar_area = Rect {
        x: area.x + (area.width - bar_width) / 2,
        width: bar_width,
        ..chunks[7]
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(colors.accent))
        .ratio(progress.ratio.clamp(0.0, 1.0))
        .label(format!("{}%", progress.percent));
    frame.render_widget(gauge, bar_area);
}

/// The small animations side by side, one line per frame row.
fn small_animation_lines(splash: &Splash, colors: &ColorConfig) -> Vec<Line<'static>> {
    let frames: Vec<Vec<String>> = splash
        .small_views()
        .iter()
        .map(|view| frame_lines(splash.animation(*view).and_then(|h| h.frame())))
        .collect();

    (0..3)
        .map(|row| {
            let spans: Vec<Span> = frames
                .iter()
                .map(|f| {
                    Span::styled(
                        format!("{:^width$}", f[row], width = ANIMATION_WIDTH + 1),
                        Style::default().fg(colors.animation),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
