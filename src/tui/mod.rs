pub mod app;
pub mod event;
pub mod geometry;
pub mod layout;

use std::future::pending;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, KeyCode,
        KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

use crate::animation::AnimationError;
use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::catalog::USER_ICON;
use crate::splash::{self, Splash, SplashExit};
use crate::storefront::{MoveOutcome, Storefront};

use self::app::{InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

const TICK_RATE: Duration = Duration::from_millis(100);
const WHEEL_ROWS: i64 = 3;

pub async fn run(ctx: Arc<AppContext>, show_splash: bool) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, show_splash).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, show_splash: bool) -> Result<()> {
    let config = ctx.config.clone();

    let catalog = ctx.source.fetch().await?;
    let mut storefront = Storefront::new(
        config.storefront.to_options(),
        ctx.backend.clone(),
        catalog,
    );
    if let Err(err) = storefront.mount_user_icon(USER_ICON) {
        tracing::warn!(%err, "Header animation unavailable");
    }
    let mut tui_app = TuiApp::new(storefront, config.storefront.units_per_row);

    let mut splash_task = None;
    if show_splash && config.splash.enabled {
        let splash = Splash::new(config.splash.to_options(), ctx.backend.as_ref());
        splash_task = Some(tokio::spawn(splash::wait_ready(
            splash.load_signals(),
            splash.options().clone(),
        )));
        tui_app = tui_app.with_splash(splash);
    }

    let mut event_handler = EventHandler::new(TICK_RATE);

    loop {
        tui_app.step_indicator(false);
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &config.colors))?;
        if !tui_app.in_splash() {
            tui_app.sync_viewport();
        }

        tokio::select! {
            exit = splash_exit(&mut splash_task) => {
                if let SplashExit::Fallback(err) = exit {
                    tui_app.set_status(format!("Some animations failed to load: {}", err));
                }
                tui_app.finish_splash();
                tracing::info!("Navigating to marketplace");
            }
            _ = refresh_timer(tui_app.refresh_due) => {
                tui_app.refresh_due = None;
                complete_refresh(&mut tui_app, &ctx).await;
            }
            event = event_handler.next() => {
                handle_event(&mut tui_app, event?, &config);
            }
        }

        if tui_app.should_quit {
            break;
        }
    }

    if let Some(task) = splash_task {
        task.abort();
    }
    Ok(())
}

async fn splash_exit(task: &mut Option<JoinHandle<SplashExit>>) -> SplashExit {
    let Some(handle) = task else {
        return pending().await;
    };
    let exit = handle
        .await
        .unwrap_or_else(|err| SplashExit::Fallback(AnimationError::Failed(err.to_string())));
    *task = None;
    exit
}

async fn refresh_timer(due: Option<Instant>) {
    match due {
        Some(due) => sleep_until(due).await,
        None => pending().await,
    }
}

async fn complete_refresh(tui_app: &mut TuiApp, ctx: &AppContext) {
    match ctx.source.fetch().await {
        Ok(catalog) => {
            if tui_app.storefront.complete_refresh(catalog) {
                tui_app.scroll = 0;
                tui_app.hovered = None;
                tui_app.status_message = None;
            }
        }
        Err(err) => {
            tracing::error!(%err, "Refresh failed");
            tui_app.storefront.abort_refresh();
            tui_app.set_status(format!("Refresh failed: {}", err));
        }
    }
}

fn handle_event(tui_app: &mut TuiApp, event: AppEvent, config: &Config) {
    match event {
        AppEvent::Tick => {
            tui_app.ticks = tui_app.ticks.wrapping_add(1);
            if let Some(phase) = tui_app.splash.as_mut() {
                phase.splash.tick();
            } else {
                tui_app.storefront.tick();
                tui_app.step_indicator(true);
            }
        }
        AppEvent::FocusLost | AppEvent::FocusGained => {
            let visible = event == AppEvent::FocusGained;
            if let Some(phase) = tui_app.splash.as_mut() {
                phase.splash.set_page_visible(visible);
            }
            tui_app.storefront.set_page_visible(visible);
        }
        AppEvent::Resize(width, height) => {
            tracing::debug!(width, height, "Terminal resized");
        }
        AppEvent::Key(key) => {
            let action = config.keybindings.get_action(&key);
            if tui_app.in_splash() {
                if action == Action::Quit {
                    tui_app.should_quit = true;
                }
                return;
            }
            if tui_app.input_mode == InputMode::Search {
                handle_search_key(tui_app, key);
                return;
            }
            if handle_dropdown_key(tui_app, &key, action) {
                return;
            }
            handle_action(tui_app, action);
        }
        AppEvent::Mouse(mouse) => {
            if !tui_app.in_splash() {
                handle_mouse(tui_app, mouse);
            }
        }
    }
}

fn handle_action(tui_app: &mut TuiApp, action: Action) {
    match action {
        Action::Quit => tui_app.should_quit = true,
        Action::ScrollUp => tui_app.scroll_by(-1),
        Action::ScrollDown => tui_app.scroll_by(1),
        Action::PageUp => tui_app.scroll_by(-tui_app.page_rows()),
        Action::PageDown => tui_app.scroll_by(tui_app.page_rows()),
        Action::ScrollTop => tui_app.scroll_to_top(),
        Action::Refresh => {
            if tui_app.storefront.gesture().is_refreshing() {
                return;
            }
            tui_app.scroll_to_top();
            let outcome = tui_app.storefront.simulate_pull();
            tui_app.handle_release(outcome);
        }
        Action::ToggleLayout => tui_app.toggle_layout(),
        Action::NextTab => tui_app.select_tab(tui_app.tab.next()),
        Action::PrevTab => tui_app.select_tab(tui_app.tab.prev()),
        Action::Search => {
            if tui_app.storefront.is_header_hidden() {
                tui_app.scroll_to_top();
            }
            tui_app.storefront.filters_mut().close_all();
            tui_app.input_mode = InputMode::Search;
        }
        Action::ToggleFilter(index) => {
            if tui_app.storefront.is_header_hidden() {
                tui_app.scroll_to_top();
            }
            tui_app.storefront.filters_mut().toggle(index);
        }
        Action::None => {}
    }
}

fn handle_search_key(tui_app: &mut TuiApp, key: KeyEvent) {
    let filters = tui_app.storefront.filters_mut();
    match key.code {
        KeyCode::Esc | KeyCode::Enter => tui_app.input_mode = InputMode::Normal,
        KeyCode::Backspace => filters.pop_char(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            tui_app.should_quit = true;
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            filters.push_char(c);
        }
        _ => {}
    }
}

/// Keys consumed by an open dropdown. Everything else falls through.
fn handle_dropdown_key(tui_app: &mut TuiApp, key: &KeyEvent, action: Action) -> bool {
    let filters = tui_app.storefront.filters_mut();
    if filters.open_dropdown().is_none() {
        return false;
    }
    match (key.code, action) {
        (KeyCode::Enter, _) => {
            filters.confirm();
        }
        (KeyCode::Esc, _) => filters.close_all(),
        (_, Action::ScrollUp) => filters.move_highlight(-1),
        (_, Action::ScrollDown) => filters.move_highlight(1),
        _ => return false,
    }
    true
}

fn handle_mouse(tui_app: &mut TuiApp, mouse: MouseEvent) {
    let units = tui_app.units_per_row;
    let y = f32::from(mouse.row) * units;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // clicking anywhere closes dropdowns and leaves the search box
            tui_app.storefront.filters_mut().close_all();
            tui_app.input_mode = InputMode::Normal;
            tui_app.drag_row = Some(mouse.row);
            tui_app.storefront.touch_start(y);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(last) = tui_app.drag_row {
                let scroll_top = tui_app.scroll_top();
                if tui_app.storefront.touch_move(y, scroll_top) == MoveOutcome::Ignored {
                    // not a pull: the grid follows the pointer
                    tui_app.scroll_by(i64::from(last) - i64::from(mouse.row));
                }
                tui_app.drag_row = Some(mouse.row);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if tui_app.drag_row.take().is_some() {
                let scroll_top = tui_app.scroll_top();
                let outcome = tui_app.storefront.touch_end(scroll_top);
                tui_app.handle_release(outcome);
            }
        }
        MouseEventKind::ScrollDown => tui_app.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => tui_app.scroll_by(-WHEEL_ROWS),
        MouseEventKind::Moved => {
            let count = tui_app.storefront.cards().len();
            let index = tui_app
                .geometry()
                .card_at(mouse.column, mouse.row, tui_app.scroll, count);
            tui_app.hover_card(index);
        }
        _ => {}
    }
}
