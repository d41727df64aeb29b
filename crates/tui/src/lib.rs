//! Terminal dashboard: panel menu on the left, results grid on the right,
//! activity feed and status line at the bottom. Every database touch goes
//! through the dispatcher, one action at a time, by blocking the UI loop
//! on the shared current-thread runtime.

use std::io::{self, Stdout};
use std::path::PathBuf;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use gemdash_adapters::export::{export_csv, export_json};
use gemdash_core::connection::ConnectionProvider;
use gemdash_core::dispatcher::{Action, Dispatcher, Feedback};
use gemdash_core::executor::QueryBackend;
use gemdash_core::materialize::ResultSet;
use gemdash_core::report::{MutationId, ProductField, ReportId};
use gemdash_core::value::parse_param;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use ratatui::{Frame, Terminal};
use thiserror::Error;
use tokio::runtime::Runtime;

const ACTIVITY_FEED_LINES: usize = 4;
const CSV_EXPORT_FILE: &str = "gemdash_export.csv";
const JSON_EXPORT_FILE: &str = "gemdash_export.json";

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Dashboard,
    Products,
    Customers,
    Campaigns,
    Business,
    Ads,
    Analytics,
}

impl Panel {
    fn next(self) -> Self {
        match self {
            Self::Dashboard => Self::Products,
            Self::Products => Self::Customers,
            Self::Customers => Self::Campaigns,
            Self::Campaigns => Self::Business,
            Self::Business => Self::Ads,
            Self::Ads => Self::Analytics,
            Self::Analytics => Self::Dashboard,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Products => "Products",
            Self::Customers => "Customers",
            Self::Campaigns => "Campaigns",
            Self::Business => "Business",
            Self::Ads => "Ads",
            Self::Analytics => "Analytics",
        }
    }

    fn actions(self) -> &'static [Action] {
        match self {
            Self::Dashboard => DASHBOARD_ACTIONS,
            Self::Products => PRODUCT_ACTIONS,
            Self::Customers => CUSTOMER_ACTIONS,
            Self::Campaigns => CAMPAIGN_ACTIONS,
            Self::Business => BUSINESS_ACTIONS,
            Self::Ads => AD_ACTIONS,
            Self::Analytics => ANALYTICS_ACTIONS,
        }
    }
}

const DASHBOARD_ACTIONS: &[Action] = &[Action::Report(ReportId::DashboardSummary)];

const PRODUCT_ACTIONS: &[Action] = &[
    Action::Report(ReportId::ProductList),
    Action::Report(ReportId::ProductsByCategory),
    Action::Report(ReportId::ProductsInPriceRange),
    Action::Report(ReportId::LowStock),
    Action::Mutation(MutationId::AddProduct),
    Action::UpdateProduct(ProductField::Name),
    Action::UpdateProduct(ProductField::Category),
    Action::UpdateProduct(ProductField::Price),
    Action::UpdateProduct(ProductField::Stock),
];

const CUSTOMER_ACTIONS: &[Action] = &[
    Action::Report(ReportId::CustomerList),
    Action::Report(ReportId::CustomersByCity),
    Action::Mutation(MutationId::AddCustomer),
];

const CAMPAIGN_ACTIONS: &[Action] = &[
    Action::Report(ReportId::CampaignList),
    Action::Mutation(MutationId::AddCampaign),
    Action::DiscountedOrders,
];

const BUSINESS_ACTIONS: &[Action] = &[
    Action::Report(ReportId::BusinessLedger),
    Action::Mutation(MutationId::AddTransaction),
];

const AD_ACTIONS: &[Action] = &[
    Action::Report(ReportId::AdList),
    Action::Report(ReportId::AdsAtLoss),
    Action::Mutation(MutationId::AddAd),
];

const ANALYTICS_ACTIONS: &[Action] = &[
    Action::Report(ReportId::TopSearchedByAgeGroup),
    Action::Report(ReportId::MostPurchasedInPriceRange),
    Action::Report(ReportId::RevenueByPlatform),
    Action::Report(ReportId::CategoriesOfProduct),
    Action::Report(ReportId::SearchByMaterial),
    Action::Report(ReportId::SortProductsByPrice),
    Action::Report(ReportId::CustomersInCity),
    Action::Report(ReportId::SaleOfProduct),
    Action::Report(ReportId::SaleByCategory),
    Action::Report(ReportId::TopCustomersBySpending),
    Action::Report(ReportId::TotalQuantitySold),
    Action::Report(ReportId::AvgPricePerCategory),
    Action::Report(ReportId::TopSellingPerRegion),
    Action::Report(ReportId::RevenuePerCategory),
    Action::Report(ReportId::CampaignsByRoi),
    Action::Report(ReportId::TopCustomersByYear),
    Action::Report(ReportId::ProductsNotSoldLastMonth),
    Action::Report(ReportId::TrendingProducts),
    Action::Report(ReportId::HighBounceRateProducts),
    Action::Report(ReportId::CampaignReportsPerRegion),
    Action::Report(ReportId::AdsRunningAtLoss),
    Action::Report(ReportId::AdsWithHighConversion),
    Action::Report(ReportId::RestockPriority),
    Action::Report(ReportId::LowStockAlerts),
];

/// Collects one value per declared parameter before the action runs.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Prompt {
    action: Action,
    values: Vec<String>,
    input: String,
    error: Option<String>,
}

impl Prompt {
    fn new(action: Action) -> Self {
        Self {
            action,
            values: Vec::new(),
            input: String::new(),
            error: None,
        }
    }

    fn current_label(&self) -> &'static str {
        self.action
            .param_labels()
            .get(self.values.len())
            .copied()
            .unwrap_or("value")
    }

    /// Validates the current field. Returns the full value list once every
    /// field has been accepted; a rejected field keeps the prompt on it.
    fn accept_current(&mut self) -> Option<Vec<String>> {
        let kinds = self.action.param_kinds();
        let kind = kinds.get(self.values.len()).copied()?;
        match parse_param(kind, &self.input) {
            Ok(_) => {
                self.values.push(self.input.trim().to_string());
                self.input.clear();
                self.error = None;
                if self.values.len() == kinds.len() {
                    Some(std::mem::take(&mut self.values))
                } else {
                    None
                }
            }
            Err(err) => {
                self.error = Some(format!("{}: {err}", self.current_label()));
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Menu,
    Prompt(Prompt),
    ConfirmQuit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Msg {
    RequestQuit,
    ConfirmQuit,
    CancelModal,
    ToggleHelp,
    NextPanel,
    MoveUp,
    MoveDown,
    Submit,
    InputChar(char),
    Backspace,
    RefreshConnection,
    ClearTable,
    ExportCsv,
    ExportJson,
}

struct TuiApp<'a, P: ConnectionProvider, B: QueryBackend> {
    dispatcher: &'a mut Dispatcher<P, B>,
    runtime: &'a Runtime,
    panel: Panel,
    selected: usize,
    mode: Mode,
    show_help: bool,
    should_quit: bool,
    notice: Option<String>,
}

impl<'a, P: ConnectionProvider, B: QueryBackend> TuiApp<'a, P, B> {
    fn new(runtime: &'a Runtime, dispatcher: &'a mut Dispatcher<P, B>) -> Self {
        Self {
            dispatcher,
            runtime,
            panel: Panel::Dashboard,
            selected: 0,
            mode: Mode::Menu,
            show_help: false,
            should_quit: false,
            notice: None,
        }
    }

    fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::RequestQuit => self.mode = Mode::ConfirmQuit,
            Msg::ConfirmQuit => self.should_quit = true,
            Msg::CancelModal => {
                self.mode = Mode::Menu;
                self.notice = None;
            }
            Msg::ToggleHelp => self.show_help = !self.show_help,
            Msg::NextPanel => {
                self.panel = self.panel.next();
                self.selected = 0;
            }
            Msg::MoveUp => self.selected = self.selected.saturating_sub(1),
            Msg::MoveDown => {
                let max_index = self.panel.actions().len().saturating_sub(1);
                self.selected = (self.selected + 1).min(max_index);
            }
            Msg::Submit => self.submit(),
            Msg::InputChar(ch) => {
                if let Mode::Prompt(prompt) = &mut self.mode {
                    prompt.input.push(ch);
                }
            }
            Msg::Backspace => {
                if let Mode::Prompt(prompt) = &mut self.mode {
                    prompt.input.pop();
                }
            }
            Msg::RefreshConnection => self.dispatch(Action::RefreshConnection, Vec::new()),
            Msg::ClearTable => self.dispatch(Action::ClearTable, Vec::new()),
            Msg::ExportCsv => self.export(true),
            Msg::ExportJson => self.export(false),
        }
    }

    fn submit(&mut self) {
        match &mut self.mode {
            Mode::Menu => {
                let Some(action) = self.panel.actions().get(self.selected).copied() else {
                    return;
                };
                if action.param_labels().is_empty() {
                    self.dispatch(action, Vec::new());
                } else {
                    self.mode = Mode::Prompt(Prompt::new(action));
                    self.notice = None;
                }
            }
            Mode::Prompt(prompt) => {
                if let Some(values) = prompt.accept_current() {
                    let action = prompt.action;
                    self.mode = Mode::Menu;
                    self.dispatch(action, values);
                }
            }
            Mode::ConfirmQuit => self.should_quit = true,
        }
    }

    fn dispatch(&mut self, action: Action, params: Vec<String>) {
        let feedback = self
            .runtime
            .block_on(self.dispatcher.invoke(action, &params));
        self.notice = match feedback {
            Feedback::Table => None,
            Feedback::Info(message) | Feedback::Error(message) => Some(message),
        };
    }

    fn export(&mut self, as_csv: bool) {
        let view = self.dispatcher.table();
        if view.columns().is_empty() {
            self.notice = Some("Nothing to export".to_string());
            return;
        }
        let results = ResultSet {
            columns: view.columns().to_vec(),
            rows: view.rows().to_vec(),
        };
        let path = PathBuf::from(if as_csv { CSV_EXPORT_FILE } else { JSON_EXPORT_FILE });
        let written = if as_csv {
            export_csv(&path, &results)
        } else {
            export_json(&path, &results)
        };
        self.notice = Some(match written {
            Ok(rows) => format!("Exported {rows} row(s) to {}", path.display()),
            Err(err) => format!("Export failed: {err}"),
        });
    }
}

/// Runs the dashboard until the user quits. The caller owns the runtime
/// and has already opened the startup connection.
pub fn run<P: ConnectionProvider, B: QueryBackend>(
    runtime: &Runtime,
    dispatcher: &mut Dispatcher<P, B>,
) -> Result<(), TuiError> {
    let mut terminal = setup_terminal()?;
    let run_result = run_loop(&mut terminal, runtime, dispatcher);
    let restore_result = restore_terminal(&mut terminal);

    if let Err(error) = run_result {
        restore_result?;
        return Err(error);
    }

    restore_result?;
    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, TuiError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), TuiError> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_loop<P: ConnectionProvider, B: QueryBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    runtime: &Runtime,
    dispatcher: &mut Dispatcher<P, B>,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(runtime, dispatcher);

    loop {
        terminal.draw(|frame| render(frame, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                if let Some(message) = map_key_event(&app.mode, key) {
                    app.handle(message);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn map_key_event(mode: &Mode, key: KeyEvent) -> Option<Msg> {
    match mode {
        Mode::Menu => map_menu_key(key),
        Mode::Prompt(_) => map_prompt_key(key),
        Mode::ConfirmQuit => match key.code {
            KeyCode::Char('y' | 'q') | KeyCode::Enter => Some(Msg::ConfirmQuit),
            KeyCode::Char('n') | KeyCode::Esc => Some(Msg::CancelModal),
            _ => None,
        },
    }
}

fn map_menu_key(key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Char('q') => Some(Msg::RequestQuit),
        KeyCode::Char('?') => Some(Msg::ToggleHelp),
        KeyCode::Tab => Some(Msg::NextPanel),
        KeyCode::Enter => Some(Msg::Submit),
        KeyCode::Up | KeyCode::Left | KeyCode::Char('k' | 'h') => Some(Msg::MoveUp),
        KeyCode::Down | KeyCode::Right | KeyCode::Char('j' | 'l') => Some(Msg::MoveDown),
        KeyCode::Char('r') => Some(Msg::RefreshConnection),
        KeyCode::Char('c') => Some(Msg::ClearTable),
        KeyCode::Char('e') => Some(Msg::ExportCsv),
        KeyCode::Char('J') => Some(Msg::ExportJson),
        _ => None,
    }
}

fn map_prompt_key(key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Enter => Some(Msg::Submit),
        KeyCode::Esc => Some(Msg::CancelModal),
        KeyCode::Backspace => Some(Msg::Backspace),
        KeyCode::Char(ch) => Some(Msg::InputChar(ch)),
        _ => None,
    }
}

fn render<P: ConnectionProvider, B: QueryBackend>(frame: &mut Frame<'_>, app: &TuiApp<'_, P, B>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(ACTIVITY_FEED_LINES as u16 + 3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    render_body(frame, chunks[1], app);
    render_footer(frame, chunks[2], app);

    if let Mode::Prompt(prompt) = &app.mode {
        render_prompt_popup(frame, prompt);
    }
    if app.mode == Mode::ConfirmQuit {
        render_quit_popup(frame);
    }
    if app.show_help {
        render_help_popup(frame);
    }
}

fn render_header<P: ConnectionProvider, B: QueryBackend>(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &TuiApp<'_, P, B>,
) {
    let session = app.dispatcher.session_status();
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", app.panel.name()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::raw(if session.is_connected {
            "database: connected"
        } else {
            "database: disconnected"
        }),
        Span::raw(" | Tab: next panel | ?: help"),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Jewellery Business Dashboard"),
    );
    frame.render_widget(header, area);
}

fn render_body<P: ConnectionProvider, B: QueryBackend>(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &TuiApp<'_, P, B>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);

    let mut menu_lines = Vec::with_capacity(app.panel.actions().len());
    for (index, action) in app.panel.actions().iter().enumerate() {
        let marker = if index == app.selected { ">" } else { " " };
        let line = format!("{marker} {}", action.label());
        if index == app.selected {
            menu_lines.push(Line::styled(
                line,
                Style::default().add_modifier(Modifier::BOLD),
            ));
        } else {
            menu_lines.push(Line::from(line));
        }
    }
    let menu = Paragraph::new(menu_lines)
        .block(Block::default().borders(Borders::ALL).title("Actions"));
    frame.render_widget(menu, columns[0]);

    render_results(frame, columns[1], app);
}

fn render_results<P: ConnectionProvider, B: QueryBackend>(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &TuiApp<'_, P, B>,
) {
    let view = app.dispatcher.table();
    let title = if view.title().is_empty() {
        "Results".to_string()
    } else {
        view.title().to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if view.columns().is_empty() {
        let placeholder = Paragraph::new("Select an action and press Enter").block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    if let Some(notice) = view.empty_notice() {
        let header_line = view.columns().join(" | ");
        let body = Paragraph::new(vec![Line::from(header_line), Line::from(""), Line::from(notice)])
            .block(block);
        frame.render_widget(body, area);
        return;
    }

    let header = Row::new(
        view.columns()
            .iter()
            .map(|name| Cell::from(name.as_str()))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = view
        .rows()
        .iter()
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.as_str())).collect::<Vec<_>>()))
        .collect::<Vec<_>>();

    let widths = view
        .column_widths()
        .iter()
        .map(|width| Constraint::Length(*width))
        .collect::<Vec<_>>();

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

fn render_footer<P: ConnectionProvider, B: QueryBackend>(
    frame: &mut Frame<'_>,
    area: Rect,
    app: &TuiApp<'_, P, B>,
) {
    let mut lines = app
        .dispatcher
        .log()
        .tail(ACTIVITY_FEED_LINES)
        .into_iter()
        .map(Line::from)
        .collect::<Vec<_>>();
    if lines.is_empty() {
        lines.push(Line::from("No activity yet"));
    }

    let status = match &app.notice {
        Some(notice) => format!("{} | {notice}", app.dispatcher.status_line()),
        None => app.dispatcher.status_line(),
    };
    lines.push(Line::styled(
        format!("Status: {status}"),
        Style::default().fg(Color::Cyan),
    ));

    let footer = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Activity"));
    frame.render_widget(footer, area);
}

fn render_prompt_popup(frame: &mut Frame<'_>, prompt: &Prompt) {
    let area = centered_rect(60, 40, frame.area());
    frame.render_widget(Clear, area);

    let labels = prompt.action.param_labels();
    let mut lines = vec![
        Line::from(prompt.action.label()),
        Line::from("Enter: accept field | Esc: cancel"),
        Line::from(""),
    ];
    for (index, label) in labels.iter().enumerate() {
        let line = match index.cmp(&prompt.values.len()) {
            std::cmp::Ordering::Less => format!("  {label}: {}", prompt.values[index]),
            std::cmp::Ordering::Equal => format!("> {label}: {}_", prompt.input),
            std::cmp::Ordering::Greater => format!("  {label}:"),
        };
        lines.push(Line::from(line));
    }
    if let Some(error) = &prompt.error {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    }

    let popup = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Parameters"));
    frame.render_widget(popup, area);
}

fn render_quit_popup(frame: &mut Frame<'_>) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(vec![
        Line::from("Quit the dashboard?"),
        Line::from("y / Enter: quit | n / Esc: stay"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Confirm"));
    frame.render_widget(popup, area);
}

fn render_help_popup(frame: &mut Frame<'_>) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let help = Paragraph::new(vec![
        Line::from("Global keymap"),
        Line::from("q: quit (with confirm)"),
        Line::from("?: toggle help"),
        Line::from("Tab: next panel"),
        Line::from("Arrows or j/k: select action"),
        Line::from("Enter: run the selected action"),
        Line::from("r: refresh the database connection"),
        Line::from("c: clear the results table"),
        Line::from("e: export results as CSV"),
        Line::from("Shift+J: export results as JSON"),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    frame.render_widget(help, area);
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100_u16 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100_u16 - height_percent) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100_u16 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100_u16 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use gemdash_core::dispatcher::Action;
    use gemdash_core::report::ReportId;

    use super::{map_key_event, Mode, Msg, Panel, Prompt};

    #[test]
    fn panels_cycle_through_all_seven() {
        let mut panel = Panel::Dashboard;
        for _ in 0..7 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Dashboard);
        assert_eq!(Panel::Ads.next(), Panel::Analytics);
    }

    #[test]
    fn every_panel_offers_at_least_one_action() {
        let panels = [
            Panel::Dashboard,
            Panel::Products,
            Panel::Customers,
            Panel::Campaigns,
            Panel::Business,
            Panel::Ads,
            Panel::Analytics,
        ];
        for panel in panels {
            assert!(!panel.actions().is_empty(), "{} has no actions", panel.name());
        }
        assert!(Panel::Analytics.actions().len() >= 20);
    }

    #[test]
    fn menu_keymap_covers_the_advertised_keys() {
        let menu = Mode::Menu;
        assert_eq!(
            map_key_event(&menu, KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Msg::RequestQuit)
        );
        assert_eq!(
            map_key_event(&menu, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)),
            Some(Msg::NextPanel)
        );
        assert_eq!(
            map_key_event(&menu, KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Msg::RefreshConnection)
        );
        assert_eq!(
            map_key_event(&menu, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(Msg::ClearTable)
        );
    }

    #[test]
    fn prompt_mode_captures_text_instead_of_shortcuts() {
        let prompt = Mode::Prompt(Prompt::new(Action::Report(ReportId::LowStock)));
        assert_eq!(
            map_key_event(
                &prompt,
                KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)
            ),
            Some(Msg::InputChar('q'))
        );
        assert_eq!(
            map_key_event(&prompt, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Msg::CancelModal)
        );
    }

    #[test]
    fn prompt_rejects_invalid_field_and_stays_on_it() {
        let mut prompt = Prompt::new(Action::Report(ReportId::LowStock));
        prompt.input = "ten".to_string();

        assert!(prompt.accept_current().is_none());
        assert!(prompt.error.is_some());
        assert!(prompt.values.is_empty());
    }

    #[test]
    fn prompt_completes_once_every_field_is_accepted() {
        let mut prompt = Prompt::new(Action::Report(ReportId::ProductsInPriceRange));
        prompt.input = "1000".to_string();
        assert!(prompt.accept_current().is_none());
        assert!(prompt.error.is_none());

        prompt.input = "50000".to_string();
        let values = prompt.accept_current().expect("prompt should complete");
        assert_eq!(values, vec!["1000".to_string(), "50000".to_string()]);
    }

    #[test]
    fn quit_confirmation_accepts_and_declines() {
        let confirm = Mode::ConfirmQuit;
        assert_eq!(
            map_key_event(
                &confirm,
                KeyEvent::new(KeyCode::Char('y'), KeyModifiers::NONE)
            ),
            Some(Msg::ConfirmQuit)
        );
        assert_eq!(
            map_key_event(&confirm, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Msg::CancelModal)
        );
    }
}
