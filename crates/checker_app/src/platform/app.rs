use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use anyhow::Context;
use checker_core::{
    update, DestinationId, Effect, Msg, Notification, OverlayState, PENDING_HIDE_AFTER,
};
use checker_engine::{AnalysisRequest, EngineHandle, Mode};
use clap::Parser;
use engine_logging::{engine_info, engine_warn};

use super::cli::{Args, Commands};
use super::config::load_config;
use super::logging;
use super::surface::TerminalSurface;
use super::ui;

/// The terminal plays a single page.
const DESTINATION: DestinationId = 1;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::initialize(args.log, args.verbose);

    let mut config = load_config(args.config.as_deref()).context("loading configuration")?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(language) = args.language {
        config.language = language;
    }
    if args.fallback {
        config.mode = Mode::Fallback;
    }

    let request = match args.command {
        Commands::Single { text, page } => AnalysisRequest::Single {
            destination: DESTINATION,
            selection: text,
            page_url: page,
        },
        Commands::Batch { page } => AnalysisRequest::Batch {
            destination: DESTINATION,
            page_url: page,
        },
    };

    let (notification_tx, notification_rx) = mpsc::channel();
    let surface = Arc::new(TerminalSurface::new(notification_tx));
    let engine = EngineHandle::new(config.to_settings(), surface);
    engine_info!("Submitting {} analysis to {}", request.kind(), config.base_url);
    engine.analyze(request);

    let mut overlay = OverlayLoop::new(args.hold);
    let ok = overlay.run(&notification_rx);
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Owns the page overlay and feeds it notifications and hide timers.
struct OverlayLoop {
    state: OverlayState,
    hide_at: Option<(u64, Instant)>,
    hold: bool,
}

impl OverlayLoop {
    fn new(hold: bool) -> Self {
        Self {
            state: OverlayState::new(),
            hide_at: None,
            hold,
        }
    }

    /// Runs until the result has been shown (and hidden, with `hold`).
    /// Returns whether the analysis succeeded.
    fn run(&mut self, rx: &mpsc::Receiver<(DestinationId, Notification)>) -> bool {
        let mut outcome = None;
        loop {
            if let Some(ok) = outcome {
                if !self.hold || !self.state.view().is_visible() {
                    return ok;
                }
            }

            let wait = match self.hide_at {
                Some((_, at)) => at.saturating_duration_since(Instant::now()),
                None => PENDING_HIDE_AFTER,
            };
            match rx.recv_timeout(wait) {
                Ok((_, notification)) => {
                    if let Some(payload) = notification.result_payload() {
                        outcome = Some(payload.is_ok());
                    }
                    self.dispatch(Msg::Notification(notification));
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    if let Some((generation, _)) = self.hide_at.take() {
                        self.dispatch(Msg::HideElapsed { generation });
                    }
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    engine_warn!("Engine stopped before a result arrived");
                    return outcome.unwrap_or(false);
                }
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        for effect in effects {
            match effect {
                Effect::ScheduleHide { generation, after } => {
                    self.hide_at = Some((generation, Instant::now() + after));
                }
            }
        }
        if state.consume_dirty() {
            let lines = ui::render::render(&state.view());
            if lines.is_empty() {
                println!("(overlay closed)");
            }
            for line in lines {
                println!("{line}");
            }
            println!();
        }
        self.state = state;
    }
}
