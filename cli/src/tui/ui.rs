use oee_core::{LogEntry, LogSummary, Rating};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Row, Table,
        Tabs, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode, Tab};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    availability: Color,
    performance: Color,
    quality: Color,
    oee: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    availability: Color::Blue,
    performance: Color::Magenta,
    quality: Color::Green,
    oee: Color::Yellow,
};

const MAX_TREND_PERCENT: f64 = 300.0;

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Poor => Color::Red,
        Rating::Fair => Color::Yellow,
        Rating::Good => Color::Green,
    }
}

fn card(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
}

fn pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header / Tabs
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Input / Status
            Constraint::Length(1), // Footer / Help
        ])
        .split(size);

    draw_header(f, app, main_chunks[0]);

    match app.tab {
        Tab::Kpis => draw_kpis(f, app, main_chunks[1]),
        Tab::Trend => draw_trend(f, app, main_chunks[1]),
        Tab::Log => draw_log(f, app, main_chunks[1]),
        Tab::Export => draw_export(f, app, main_chunks[1]),
    }

    draw_input(f, app, main_chunks[2]);

    let help = Line::from(vec![
        Span::styled("TAB: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::styled(" EDIT: ", Style::default().fg(THEME.muted)),
        Span::styled("e ", Style::default().fg(THEME.text)),
        Span::styled(" DATE: ", Style::default().fg(THEME.muted)),
        Span::styled("t ", Style::default().fg(THEME.text)),
        Span::styled(" SAVE: ", Style::default().fg(THEME.muted)),
        Span::styled("s ", Style::default().fg(THEME.text)),
        Span::styled(" EXPORT: ", Style::default().fg(THEME.muted)),
        Span::styled("x ", Style::default().fg(THEME.text)),
        Span::styled(" QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    let footer = Paragraph::new(help).alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(18), // Title
            Constraint::Min(1),     // Tabs
            Constraint::Length(26), // Log date
        ])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "OEE DASHBOARD",
        Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)));
    f.render_widget(title, header_layout[0]);

    let titles: Vec<String> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| format!("{} {}", i + 1, t.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Style::default().fg(THEME.muted))
        .highlight_style(Style::default().fg(THEME.text).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)));
    f.render_widget(tabs, header_layout[1]);

    let date = Paragraph::new(Line::from(vec![
        Span::styled("Log date ", Style::default().fg(THEME.muted)),
        Span::styled(
            app.session.log_date().format("%Y-%m-%d %a").to_string(),
            Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)));
    f.render_widget(date, header_layout[2]);
}

fn draw_kpis(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // KPI cards
            Constraint::Min(5),    // Inputs + OEE indicator
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[0]);

    let result = app.session.result();
    let kpis = [
        (" Availability ", result.availability, None),
        (" Performance ", result.performance, Some(result.raw_performance)),
        (" Quality ", result.quality, None),
        (" OEE ", result.oee, None),
    ];

    for (i, (title, ratio, raw)) in kpis.iter().enumerate() {
        let rating = app.session.rate(*ratio);
        let label = match raw {
            Some(raw) if (raw - ratio).abs() > f64::EPSILON => format!("{} (raw {})", pct(*ratio), pct(*raw)),
            _ => format!("{}  {}", pct(*ratio), rating.label()),
        };
        let gauge = Gauge::default()
            .block(card(title))
            .gauge_style(Style::default().fg(rating_color(rating)).bg(Color::Black))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(Span::styled(label, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)));
        f.render_widget(gauge, cards[i]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Inputs
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(60), // Breakdown
        ])
        .split(rows[1]);

    let inputs = app.session.inputs();
    let field = |name: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<22}", name), Style::default().fg(THEME.muted)),
            Span::styled(value, Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        ])
    };
    let input_text = vec![
        field("Planned time", format!("{} min", inputs.planned_production_time)),
        field("Downtime", format!("{} min", inputs.downtime)),
        field("Ideal cycle time", format!("{} min/unit", inputs.ideal_cycle_time)),
        field("Total units", inputs.total_units.to_string()),
        field("Good units", inputs.good_units.to_string()),
        Line::from(""),
        field("Running time", format!("{:.2} min", result.running_time)),
    ];
    f.render_widget(Paragraph::new(input_text).block(card(" Production Inputs ")), bottom[0]);

    let breakdown = vec![
        Line::from(vec![Span::styled("OEE = A × P × Q", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled(pct(result.availability), Style::default().fg(THEME.availability)),
            Span::raw(" × "),
            Span::styled(pct(result.performance), Style::default().fg(THEME.performance)),
            Span::raw(" × "),
            Span::styled(pct(result.quality), Style::default().fg(THEME.quality)),
            Span::raw(" = "),
            Span::styled(
                pct(result.oee),
                Style::default().fg(rating_color(app.session.rate(result.oee))).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Performance is capped at 100% in the product.",
            Style::default().fg(THEME.muted),
        )),
    ];
    let breakdown = Paragraph::new(breakdown)
        .block(card(" Overall Equipment Effectiveness "))
        .wrap(Wrap { trim: true });
    f.render_widget(breakdown, bottom[2]);
}

fn no_data(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(Span::styled(message.to_string(), Style::default().fg(THEME.muted)))
        .alignment(Alignment::Center)
        .block(card(title));
    f.render_widget(paragraph, area);
}

fn draw_trend(f: &mut Frame, app: &App, area: Rect) {
    let Some(entries) = app.session.trend() else {
        no_data(f, area, " OEE & Components Trend ", "No historical data yet. Save a snapshot first!");
        return;
    };

    let series = |value: fn(&LogEntry) -> f64| -> Vec<(f64, f64)> {
        entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i as f64, value(e) * 100.0))
            .collect()
    };
    let availability = series(|e| e.availability);
    let performance = series(|e| e.performance);
    let quality = series(|e| e.quality);
    let oee = series(|e| e.oee);

    // Points above the axis are clipped by the chart.
    let y_max = performance
        .iter()
        .map(|(_, y)| *y)
        .fold(100.0_f64, f64::max)
        .min(MAX_TREND_PERCENT)
        .ceil();

    let datasets = vec![
        Dataset::default()
            .name("Availability")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(THEME.availability))
            .data(&availability),
        Dataset::default()
            .name("Performance")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(THEME.performance))
            .data(&performance),
        Dataset::default()
            .name("Quality")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(THEME.quality))
            .data(&quality),
        Dataset::default()
            .name("OEE")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(THEME.oee).add_modifier(Modifier::BOLD))
            .data(&oee),
    ];

    let first = entries.first().map(|e| e.date.format("%m-%d").to_string()).unwrap_or_default();
    let last = entries.last().map(|e| e.date.format("%m-%d").to_string()).unwrap_or_default();
    let x_max = (entries.len().saturating_sub(1)).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(card(" OEE & Components Trend (%) "))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(THEME.muted))
                .bounds([0.0, x_max])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(THEME.muted))
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), "50".to_string(), format!("{:.0}", y_max)]),
        );
    f.render_widget(chart, area);
}

fn draw_log(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(70), // Table
            Constraint::Length(1),      // Gutter
            Constraint::Percentage(30), // Summary
        ])
        .split(area);

    let rows: Vec<Row> = app
        .session
        .entries()
        .iter()
        .map(|e| {
            let oee_style = Style::default().fg(rating_color(app.session.rate(e.oee)));
            Row::new(vec![
                Span::raw(e.date.format("%Y-%m-%d").to_string()),
                Span::raw(pct(e.availability)),
                Span::raw(pct(e.performance)),
                Span::raw(pct(e.quality)),
                Span::styled(pct(e.oee), oee_style.add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12), // Date
            Constraint::Length(13), // Availability
            Constraint::Length(13), // Performance
            Constraint::Length(10), // Quality
            Constraint::Min(8),     // OEE
        ],
    )
    .header(
        Row::new(vec!["Date", "Availability", "Performance", "Quality", "OEE"])
            .style(Style::default().fg(THEME.primary)),
    )
    .block(card(" Daily OEE Log "))
    .row_highlight_style(Style::default().bg(THEME.muted).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.log_state);

    match app.session.summary() {
        Some(summary) => draw_summary(f, &summary, chunks[2]),
        None => no_data(f, chunks[2], " Summary ", "Nothing saved yet."),
    }
}

fn draw_summary(f: &mut Frame, summary: &LogSummary, area: Rect) {
    let line = |name: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<14}", name), Style::default().fg(THEME.muted)),
            Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        ])
    };

    let text = vec![
        line("Entries", summary.count.to_string(), THEME.text),
        Line::from(""),
        line("Avg avail.", pct(summary.mean_availability), THEME.availability),
        line("Avg perf.", pct(summary.mean_performance), THEME.performance),
        line("Avg quality", pct(summary.mean_quality), THEME.quality),
        line("Avg OEE", pct(summary.mean_oee), THEME.oee),
        Line::from(""),
        line(
            "Best",
            format!("{} {}", pct(summary.best.oee), summary.best.date.format("%m-%d")),
            Color::Green,
        ),
        line(
            "Worst",
            format!("{} {}", pct(summary.worst.oee), summary.worst.date.format("%m-%d")),
            Color::Red,
        ),
    ];
    f.render_widget(Paragraph::new(text).block(card(" Summary ")), area);
}

fn draw_export(f: &mut Frame, app: &App, area: Rect) {
    let csv = match app.session.export_csv() {
        Ok(Some(csv)) => csv,
        Ok(None) => {
            no_data(f, area, " Download OEE Log ", "No data available yet.");
            return;
        }
        Err(e) => {
            no_data(f, area, " Download OEE Log ", &format!("Could not render CSV: {}", e));
            return;
        }
    };

    let mut text = vec![
        Line::from(vec![
            Span::styled("Target: ", Style::default().fg(THEME.muted)),
            Span::styled(app.export_file.display().to_string(), Style::default().fg(THEME.text)),
            Span::styled("   press ", Style::default().fg(THEME.muted)),
            Span::styled("x", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
            Span::styled(" to write", Style::default().fg(THEME.muted)),
        ]),
        Line::from(""),
    ];
    text.extend(csv.lines().map(|l| Line::from(l.to_string())));

    f.render_widget(Paragraph::new(text).block(card(" Download OEE Log ")), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, style) = match app.input_mode {
        InputMode::EditingInputs => (
            " Inputs (planned/downtime/cycle/total/good, Enter to apply) ",
            app.input.clone(),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::SelectingDate => (
            " Log date (today, yesterday, -3d, fri, 2025-01-31) ",
            app.input.clone(),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Normal => match &app.status {
            Some(status) if status.is_error => (" Error ", status.text.clone(), Style::default().fg(Color::Red)),
            Some(status) => (" Status ", status.text.clone(), Style::default().fg(Color::Green)),
            None => (" Status ", String::new(), Style::default().fg(THEME.muted)),
        },
    };

    let paragraph = Paragraph::new(content).style(style).block(card(title));
    f.render_widget(paragraph, area);

    if !matches!(app.input_mode, InputMode::Normal) {
        let offset = app.input_before_cursor().width() as u16;
        f.set_cursor_position((area.x + 1 + offset, area.y + 1));
    }
}
