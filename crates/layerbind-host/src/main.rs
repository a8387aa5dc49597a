//! Layerbind headless host entry point.
//!
//! Loads the configuration, runs the initialization gate, seeds the bindings
//! listed in the config, and then drives the router from console commands.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()                  -- TOML, defaults when missing
//!  └─ InputSystem::initialize()      -- gate on the configured role
//!  └─ RouteInputUseCase::subscribe() -- start the channel input source
//!  └─ spawn_blocking(router.run)     -- event pump
//!  └─ spawn_line_reader(stdin)       -- std thread, lines over mpsc
//!  └─ console loop (select! with Ctrl-C)
//!       ├─ down / up / tap  -> inject events into the source
//!       ├─ layer            -> show or set the current layer
//!       └─ binds / rebind / unbind -> binding store
//! ```
//!
//! The console stands in for a real input device: every `down` or `up` line
//! becomes a raw event on the same path a window event loop would use.
//! Seeded actions log when they fire, so `RUST_LOG=debug` shows the routing.

use std::io::BufReader;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use layerbind_host::application::{
    console_driver,
    input_system::InputSystem,
    route_input::RouteInputUseCase,
};
use layerbind_host::infrastructure::{
    console,
    input_source::{channel::ChannelInputSource, InputSource},
    storage::config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The config names the default log level, so load it before logging starts
    // and report any problem afterwards.
    let loaded = config::load_config();
    let app_config = loaded.as_ref().cloned().unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&app_config.host.log_level)),
        )
        .init();

    if let Err(e) = &loaded {
        warn!("failed to load config, using defaults: {e}");
    }
    info!(role = ?app_config.host.role, "Layerbind host starting");

    // ── Initialization gate ───────────────────────────────────────────────────
    let system = InputSystem::initialize(
        &app_config.host.role,
        app_config.host.initial_layer.clone(),
    );
    console_driver::seed_bindings(&system, &app_config.bindings);

    let router = RouteInputUseCase::new(system.clone());
    let source = ChannelInputSource::new();
    let Some(events) = router.subscribe(&source)? else {
        info!("nothing to route in this role; exiting");
        return Ok(());
    };

    // ── Event pump ────────────────────────────────────────────────────────────
    let pump = tokio::task::spawn_blocking(move || router.run(events));

    // ── Console loop ──────────────────────────────────────────────────────────
    // Stdin is read on its own thread so Ctrl-C never waits on a pending read.
    let mut lines = console::spawn_line_reader(BufReader::new(std::io::stdin()));
    info!("ready; type `help` for commands");
    loop {
        tokio::select! {
            line = lines.recv() => match line {
                Some(line) => match console::parse_command(&line) {
                    Ok(Some(command)) => {
                        let mut stdout = std::io::stdout().lock();
                        let written =
                            console_driver::execute(command, &system, &source, &mut stdout);
                        if let Err(e) = written {
                            error!("failed to write console output: {e}");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => eprintln!("{e}"),
                },
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
        }
    }

    source.stop();
    let stats = pump.await?;
    info!(
        received = stats.received,
        fired = stats.fired,
        "Layerbind host stopped"
    );
    Ok(())
}
