use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Settings;
use crate::domain::models::TextArea;
use crate::domain::models::TransportBox;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::Themes;
use crate::infrastructure::transport::agent::AgentClient;

fn render_settings_panel(frame: &mut Frame, rect: Rect, settings: &Settings) {
    let mut lines: Vec<Line> = vec![
        Line::from("Color scheme (^Y)"),
        Line::from(""),
    ];

    for name in Themes::list() {
        if name == settings.theme_name {
            lines.push(Line::from(Span::styled(
                format!("▸ {name}"),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        } else {
            lines.push(Line::from(format!("  {name}")));
        }
    }

    let mut traces = "off";
    if settings.show_traces {
        traces = "on";
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!("Traces (^T): {traces}")));
    lines.push(Line::from(""));
    lines.push(Line::from("Close (^P)"));

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title("Settings")
                .padding(Padding::new(1, 1, 0, 0)),
        ),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let loading = Loading::default();

    #[cfg(feature = "dev")]
    {
        use tui_textarea::Input;
        use tui_textarea::Key;

        let test_str = "What are the targets of the gene PKD1?";
        for char in test_str.chars() {
            textarea.input(Input {
                key: Key::Char(char),
                ctrl: false,
                alt: false,
                shift: false,
            });
        }
    }

    loop {
        terminal.draw(|frame| {
            let mut chat_rect = frame.size();
            let mut panel_rect = None;

            if app_state.settings.panel_visible {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![Constraint::Min(1), Constraint::Length(26)])
                    .split(frame.size());
                chat_rect = columns[0];
                panel_rect = Some(columns[1]);
            }

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Max(4)])
                .split(chat_rect);

            if rows[0].width != app_state.last_known_width
                || rows[0].height != app_state.last_known_height
            {
                app_state.set_rect(rows[0]);
            }

            app_state
                .bubble_list
                .render(frame, rows[0], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                rows[0].inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if app_state.waiting_for_agent {
                loading.render(frame, rows[1]);
            } else {
                frame.render_widget(textarea.widget(), rows[1]);
            }

            if let Some(rect) = panel_rect {
                render_settings_panel(frame, rect, &app_state.settings);
            }
        })?;

        match events.next().await? {
            Event::KeyboardCTRLC() => break,
            Event::KeyboardCTRLP() => {
                app_state.settings.toggle_panel();
            }
            Event::KeyboardCTRLT() => {
                app_state.toggle_traces();
            }
            Event::KeyboardCTRLY() => {
                app_state.cycle_theme()?;
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_agent {
                    continue;
                }

                let input_str = textarea.lines().join("\n");
                if input_str.is_empty() {
                    continue;
                }

                let should_quit = app_state.handle_enter(&input_str, &tx)?;
                if should_quit {
                    break;
                }

                textarea = TextArea::default();
            }
            Event::KeyboardCharInput(input) => {
                if !app_state.waiting_for_agent {
                    textarea.input(input);
                }
            }
            Event::KeyboardPaste(text) => {
                if !app_state.waiting_for_agent {
                    textarea.insert_str(text);
                }
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {}
            event => {
                app_state.handle_event(event);
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let transport: TransportBox = Box::<AgentClient>::default();
    let mut app_state = AppState::new(&transport).await?;
    let mut events = EventsService::new(rx);

    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
