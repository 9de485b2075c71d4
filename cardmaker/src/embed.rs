//! Mount the card maker into the current terminal.
//!
//! `init` is the single entry point: the binary calls it with options from the
//! command line, and a host program can call it directly to open the editor
//! full-screen or inline below its own output.

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend, layout::Rect, Frame, Terminal, TerminalOptions, Viewport,
};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use crate::action::Action;
use crate::components::{CardMaker, CardMakerProps, Component};
use crate::config::RuntimeConfig;
use crate::dictionary::Language;
use crate::effect::{handle_effect, Effect};
use crate::export::ExportOptions;
use crate::logging;
use crate::reducer::reducer;
use crate::state::{AppState, TICK_MS};
use crate::storage::FileStore;
use crate::store::MonsterStore;

/// Where the UI is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mount {
    /// Alternate screen, whole terminal.
    #[default]
    FullScreen,
    /// Fixed-height viewport below the cursor; the host's scrollback stays.
    Inline { height: u16 },
}

#[derive(Debug)]
pub struct EmbedOptions {
    pub language: Language,
    pub mount: Mount,
    pub storage_dir: Option<PathBuf>,
    pub export: ExportOptions,
    pub log_file: Option<PathBuf>,
    /// Debug session flags; `None` runs without recording or replay.
    pub debug: Option<DebugCliArgs>,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            language: Language::default(),
            mount: Mount::default(),
            storage_dir: None,
            export: ExportOptions::default(),
            log_file: None,
            debug: None,
        }
    }
}

#[derive(Parser)]
struct NoDebugArgs {
    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum CardMakerComponentId {
    Main,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum CardMakerContext {
    Main,
}

impl EventRoutingState<CardMakerComponentId, CardMakerContext> for AppState {
    fn focused(&self) -> Option<CardMakerComponentId> {
        Some(CardMakerComponentId::Main)
    }

    fn modal(&self) -> Option<CardMakerComponentId> {
        None
    }

    fn binding_context(&self, _id: CardMakerComponentId) -> CardMakerContext {
        CardMakerContext::Main
    }

    fn default_context(&self) -> CardMakerContext {
        CardMakerContext::Main
    }
}

/// Runs the card maker until the user quits.
pub async fn init(options: EmbedOptions) -> io::Result<()> {
    let EmbedOptions {
        language,
        mount,
        storage_dir,
        export,
        log_file,
        debug: debug_args,
    } = options;

    let mut config = RuntimeConfig {
        export,
        ..RuntimeConfig::default()
    };
    if let Some(dir) = storage_dir {
        config.save_dir = dir;
    }
    let log_path = log_file.unwrap_or_else(|| config.log_path());
    if let Err(err) = logging::init(&log_path) {
        eprintln!("Warning: logging disabled ({}): {}", log_path.display(), err);
    }

    let debug_args =
        debug_args.unwrap_or_else(|| NoDebugArgs::parse_from(["cardmaker"]).debug);
    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let save_dir = config.save_dir.clone();
    let state = debug
        .load_state_or_else_async(move || async move {
            let store = MonsterStore::open(FileStore::new(save_dir));
            Ok::<AppState, io::Error>(AppState::new(store.record().clone(), language))
        })
        .await
        .map_err(debug_error)?;
    tracing::info!(language = language.code(), ?mount, "card maker started");

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let interactive = debug.use_alt_screen();
    let use_alt_screen = interactive && mount == Mount::FullScreen;
    let mut stdout = io::stdout();
    if interactive {
        enable_raw_mode()?;
    }
    if use_alt_screen {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match mount {
        Mount::Inline { height } if interactive => Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        )?,
        _ => Terminal::new(backend)?,
    };

    let result = run_app(&mut terminal, &debug, store, config, replay_actions).await;

    // ===== Cleanup =====
    if interactive {
        disable_raw_mode()?;
    }
    if use_alt_screen {
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
    }
    if interactive {
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("card maker closed");
    Ok(())
}

struct CardMakerUi {
    root: CardMaker,
}

impl CardMakerUi {
    fn new() -> Self {
        Self {
            root: CardMaker::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<CardMakerComponentId>,
    ) {
        event_ctx.set_component_area(CardMakerComponentId::Main, area);
        let props = CardMakerProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.root.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = CardMakerProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self.root.handle_event(event, props).into_iter().collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    config: RuntimeConfig,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(CardMakerUi::new()));
    let mut bus: EventBus<AppState, Action, CardMakerComponentId, CardMakerContext> =
        EventBus::new();
    let keybindings: Keybindings<CardMakerContext> = Keybindings::new();

    let ui_main = Rc::clone(&ui);
    bus.register(CardMakerComponentId::Main, move |event, state| {
        ui_main.borrow_mut().handle_event(&event.kind, state)
    });

    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(..) => HandlerResponse {
            actions: Vec::new(),
            consumed: false,
            needs_render: true,
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            None,
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }

                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(TICK_MS), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect: Effect, ctx: &mut EffectContext<Action>| {
                handle_effect(effect, ctx, &config)
            },
        )
        .await
}
