use crate::aggregate::{aggregate, format_rupiah, GroupSummary};
use crate::filter::{filter_by_place, treatment_places, Selection};
use crate::record::BillingRecord;
use crate::views::NO_DATA_MESSAGE;
use crate::wordcloud::{extract_text, CloudRenderer, FrequencyCloud};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    FilteredTable,
    GroupedSummary,
    WordCloud,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::FilteredTable => Page::GroupedSummary,
            Page::GroupedSummary => Page::WordCloud,
            Page::WordCloud => Page::FilteredTable,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::FilteredTable => Page::WordCloud,
            Page::GroupedSummary => Page::FilteredTable,
            Page::WordCloud => Page::GroupedSummary,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::FilteredTable => "Filter Data",
            Page::GroupedSummary => "Grouped Data",
            Page::WordCloud => "WordCloud Obat",
        }
    }
}

pub struct App {
    pub table: Vec<BillingRecord>,
    pub places: Vec<String>,
    pub selection: Selection,
    pub filtered: Vec<BillingRecord>,
    pub summary: GroupSummary,
    pub current_page: Page,
    pub state: TableState,
    pub summary_state: TableState,
}

impl App {
    pub fn new(table: Vec<BillingRecord>) -> Self {
        let places = treatment_places(&table);

        let mut state = TableState::default();
        if !table.is_empty() {
            state.select(Some(0));
        }
        let mut summary_state = TableState::default();
        summary_state.select(Some(0));

        let mut app = Self {
            table,
            places,
            selection: Selection::All,
            filtered: Vec::new(),
            summary: GroupSummary::default(),
            current_page: Page::FilteredTable,
            state,
            summary_state,
        };
        app.apply_selection(Selection::All);
        app
    }

    /// Recompute the filtered rows and the grouped summary for a new
    /// selection. One full recomputation per interaction.
    pub fn apply_selection(&mut self, selection: Selection) {
        let view = filter_by_place(&self.table, &selection);
        self.summary = aggregate(&view);
        self.filtered = view.records.into_iter().cloned().collect();
        self.selection = selection;

        if self.filtered.is_empty() {
            self.state.select(None);
        } else {
            self.state.select(Some(0));
        }
        if self.summary.groups.is_empty() {
            self.summary_state.select(None);
        } else {
            self.summary_state.select(Some(0));
        }
    }

    pub fn clear_selection(&mut self) {
        self.apply_selection(Selection::All);
    }

    /// Select a place by its 0-based position in the selector list.
    pub fn select_place(&mut self, index: usize) {
        if let Some(place) = self.places.get(index).cloned() {
            self.apply_selection(Selection::Place(place));
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.previous();
    }

    fn active_state(&mut self) -> (&mut TableState, usize) {
        match self.current_page {
            Page::GroupedSummary => {
                let len = self.summary.groups.len();
                (&mut self.summary_state, len)
            }
            _ => {
                let len = self.filtered.len();
                (&mut self.state, len)
            }
        }
    }

    pub fn next(&mut self) {
        let (state, len) = self.active_state();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.active_state();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let (state, len) = self.active_state();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => {
                let next = i + 20;
                if next >= len {
                    len - 1
                } else {
                    next
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        let (state, _) = self.active_state();
        let i = match state.selected() {
            Some(i) => {
                if i < 20 {
                    0
                } else {
                    i - 20
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_page();
                    } else {
                        app.next_page();
                    }
                }
                KeyCode::BackTab => app.previous_page(),
                KeyCode::Char('c') | KeyCode::Char('0') => app.clear_selection(),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    app.select_place(index);
                }
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::PageDown => app.page_down(),
                KeyCode::PageUp => app.page_up(),
                KeyCode::Home => app.state.select(Some(0)),
                KeyCode::End => {
                    if !app.filtered.is_empty() {
                        app.state.select(Some(app.filtered.len() - 1));
                    }
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    // Place selector on the left, page content on the right
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(chunks[1]);

    render_place_selector(f, content_chunks[0], app);

    match app.current_page {
        Page::FilteredTable => render_filtered_table(f, content_chunks[1], app),
        Page::GroupedSummary => render_grouped_summary(f, content_chunks[1], app),
        Page::WordCloud => render_wordcloud(f, content_chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let pages = [Page::FilteredTable, Page::GroupedSummary, Page::WordCloud];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("Total Records: {}", app.filtered.len()),
        Style::default().fg(Color::White),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format_rupiah(app.summary.total_billed()),
        Style::default().fg(Color::Green),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Data Obat di Tiap Rumah Sakit "),
    );

    f.render_widget(header, area);
}

fn render_place_selector(f: &mut Frame, area: Rect, app: &App) {
    let mut content = vec![Line::from(""), {
        let style = if app.selection == Selection::All {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        Line::from(vec![
            Span::styled(" 0", Style::default().fg(Color::Yellow)),
            Span::raw(". "),
            Span::styled("All", style),
        ])
    }];

    for (i, place) in app.places.iter().enumerate().take(9) {
        let selected = app.selection == Selection::Place(place.clone());
        let style = if selected {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        content.push(Line::from(vec![
            Span::styled(format!(" {}", i + 1), Style::default().fg(Color::Yellow)),
            Span::raw(". "),
            Span::styled(truncate(place, 22), style),
        ]));
    }

    if app.places.len() > 9 {
        content.push(Line::from(""));
        content.push(Line::from(Span::styled(
            format!(" ({} more not shown)", app.places.len() - 9),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let selector = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Treatment Place "),
    );

    f.render_widget(selector, area);
}

fn render_filtered_table(f: &mut Frame, area: Rect, app: &mut App) {
    if app.filtered.is_empty() {
        render_no_data(f, area, " Filtered Data Table ");
        return;
    }

    let header_cells = ["TreatmentPlace", "Nama Item", "Satuan", "Qty", "Amount Bill"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered.iter().map(|r| {
        let cells = vec![
            Cell::from(truncate(&r.treatment_place, 24)),
            Cell::from(truncate(&r.item_name, 38)),
            Cell::from(r.unit.clone()),
            Cell::from(format!("{}", r.qty)),
            Cell::from(format!("{:.2}", r.amount_bill)).style(Style::default().fg(Color::Green)),
        ];
        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(26),
            Constraint::Length(40),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Filtered Data Table "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_grouped_summary(f: &mut Frame, area: Rect, app: &mut App) {
    if app.summary.groups.is_empty() {
        render_no_data(f, area, " Grouped Data Table ");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let header_cells = ["Nama Item Garda Medika", "Total Amount Bill", "Total Rows"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.summary.groups.iter().map(|g| {
        let cells = vec![
            Cell::from(truncate(&g.item_name, 38)),
            Cell::from(format!("{:.2}", g.total_amount_bill))
                .style(Style::default().fg(Color::Green)),
            Cell::from(format!("{}", g.total_rows)),
        ];
        Row::new(cells).height(1)
    });

    let title = format!(
        " Grouped Data by Item (Filtered by {}) ",
        app.selection.label()
    );
    let table = Table::new(
        rows,
        [
            Constraint::Length(40),
            Constraint::Length(20),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, chunks[0], &mut app.summary_state);

    let total_line = Paragraph::new(Line::from(vec![
        Span::raw(" Total Amount Bill for all grouped data: "),
        Span::styled(
            format_rupiah(app.summary.total_billed()),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(total_line, chunks[1]);
}

fn render_wordcloud(f: &mut Frame, area: Rect, app: &App) {
    if app.filtered.is_empty() {
        render_no_data(f, area, " WordCloud Obat ");
        return;
    }

    let view = filter_by_place(&app.table, &app.selection);
    let text = extract_text(&view);

    let renderer = FrequencyCloud {
        width: area.width.saturating_sub(4) as usize,
        max_words: 40,
    };
    let image = renderer.render(&text);

    let mut content = vec![Line::from("")];
    for line in &image.lines {
        let mut spans = vec![Span::raw(" ")];
        for word in line {
            let style = match word.weight {
                4 => Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                3 => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                2 => Style::default().fg(Color::Green),
                1 => Style::default().fg(Color::White),
                _ => Style::default().fg(Color::DarkGray),
            };
            spans.push(Span::styled(word.text.clone(), style));
            spans.push(Span::raw("  "));
        }
        content.push(Line::from(spans));
        content.push(Line::from(""));
    }

    let title = format!(
        " WordCloud for Item Names (Filtered by {}) ",
        app.selection.label()
    );
    let cloud = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(title),
    );

    f.render_widget(cloud, area);
}

fn render_no_data(f: &mut Frame, area: Rect, title: &str) {
    let warning = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", NO_DATA_MESSAGE),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title.to_string()),
    );

    f.render_widget(warning, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.filtered.len();

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if app.selection != Selection::All {
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled(
            format!("Filter: {}", app.selection.label()),
            Style::default().fg(Color::Green),
        ));
        status_spans.push(Span::raw(" ("));
        status_spans.push(Span::styled("c", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" clear)"));
    }

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("0-9", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Place | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
