mod catalog;
mod cli;
mod render;
mod session;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;
use wall_common::{Rect, Result, WallError};
use wall_config::WallConfig;
use wall_display::{FileStore, GridLayout, SiteId, StateStore, WallCommand};

use crate::catalog::DemoLoader;
use crate::session::Session;

const DEFAULT_DIRECTIVE: &str = "wall=info";

/// How long the mirror waits for the primary to answer a resync.
const RESYNC_WAIT: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config first: its [logging] level feeds the subscriber.
    let loaded = match &args.config {
        Some(path) => wall_config::load_config_from(path),
        None => wall_config::load_config(),
    };

    let log_directive = args
        .log_level
        .as_deref()
        .map(|level| format!("wall={level}"))
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.directive()))
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string());
    let directive: Directive = log_directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("wall v{} starting", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("config load failed, using defaults: {e}");
        WallConfig::default()
    });

    if args.list {
        for site in catalog::sites() {
            println!("{:<4} {}", site.id.as_str(), site.display_name);
        }
        return ExitCode::SUCCESS;
    }

    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: cli::Args, config: WallConfig) -> Result<()> {
    let store: Option<Box<dyn StateStore>> = if config.display.persist && !args.no_persist {
        match FileStore::default_dir() {
            Ok(dir) => Some(Box::new(FileStore::new(dir))),
            Err(e) => {
                tracing::warn!("state will not be saved: {e}");
                None
            }
        }
    } else {
        None
    };

    let layout = GridLayout::from(&config.layout);
    let mut session = Session::start(config, Arc::new(DemoLoader), store)?;

    if args.clear {
        session.apply(WallCommand::Clear);
    }
    if let Some(mode) = args.mode {
        session.apply(WallCommand::SetMode { mode });
    }
    for id in &args.select {
        match catalog::find(id) {
            Some(site) => {
                if !session.apply(WallCommand::Toggle { site }) {
                    tracing::warn!(site_id = %id, "selection is full, site not added");
                }
            }
            None => tracing::warn!(site_id = %id, "unknown site, run with --list"),
        }
    }
    if let Some(id) = &args.focus {
        if !session.apply(WallCommand::Focus {
            id: SiteId::from(id.as_str()),
        }) {
            tracing::warn!(site_id = %id, "focus ignored, site is not selected");
        }
    }

    if !session.open_monitor() {
        return Err(WallError::Other("monitor window could not be opened".into()));
    }

    let (report, _) = session.publish().await;
    tracing::info!(
        resolved = report.resolved.len(),
        failed = report.failed.len(),
        "streams ensured"
    );

    // The monitor comes up after the first update was sent and catches up
    // by asking for the latest snapshot.
    let mut monitor = session
        .attach_monitor()
        .ok_or_else(|| WallError::Other("monitor window vanished".into()))?;
    let snapshot = monitor
        .resync(RESYNC_WAIT)
        .await
        .ok_or_else(|| WallError::Other("monitor did not receive the wall".into()))?;

    let viewport = Rect::new(0.0, 0.0, args.width, args.height);
    print!("{}", render::render(&snapshot, &layout, viewport));

    session.close();
    Ok(())
}
