use crate::bridge::simulator::{run_seed, Simulator};
use crate::bridge::tcp::TcpUpstream;
use crate::bridge::{BridgeLink, EventBridge, EventChannel, InboundEvent};
use crate::config::{Config, UpstreamMode};
use crate::meter::TimerKind;
use crate::shutdown::{ShutdownCoordinator, ShutdownHandle, ShutdownPhase};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::task::JoinHandle;

/// How long upstream tasks get to notice shutdown before we stop waiting.
const UPSTREAM_GRACE: Duration = Duration::from_secs(2);

/// What woke the loop up.
enum Step {
    Input(Option<AppEvent>),
    Inbound(Option<InboundEvent>),
    Timer(TimerKind),
    Shutdown,
}

pub async fn run(config: Config, seed: Option<u64>) -> io::Result<()> {
    let shutdown = ShutdownCoordinator::new();
    let ctrl_c = tokio::spawn(watch_ctrl_c(shutdown.handle()));
    let (mut bridge, link) = EventChannel::new();
    let upstream = spawn_upstream(&config, seed, link, shutdown.handle());

    let result = match setup_terminal() {
        Ok((mut terminal, guard)) => {
            let mut app = App::new(&config, seed);
            let mut events = EventHandler::new(config.ui.tick());
            let result = event_loop(
                &mut terminal,
                &mut app,
                &mut events,
                &mut bridge,
                &shutdown.handle(),
            )
            .await;

            shutdown.signal();
            shutdown.advance(ShutdownPhase::StoppingUpstream);
            app.shutdown();
            stop_upstream(bridge, upstream).await;

            shutdown.advance(ShutdownPhase::RestoringTerminal);
            drop(guard);
            result
        }
        Err(err) => {
            shutdown.signal();
            stop_upstream(bridge, upstream).await;
            Err(err)
        }
    };

    ctrl_c.abort();
    shutdown.advance(ShutdownPhase::Complete);
    result
}

async fn event_loop<B>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
    bridge: &mut B,
    shutdown: &ShutdownHandle,
) -> io::Result<()>
where
    B: EventBridge,
{
    let mut bridge_open = true;

    loop {
        terminal.draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            return Ok(());
        }

        let step = tokio::select! {
            event = events.next() => Step::Input(event),
            inbound = bridge.next_event(), if bridge_open => Step::Inbound(inbound),
            kind = app.next_timer() => Step::Timer(kind),
            _ = shutdown.wait() => Step::Shutdown,
        };

        match step {
            Step::Input(Some(AppEvent::Key(key))) => {
                if let Some(request) = handle_key(app, key) {
                    if let Err(err) = bridge.publish(request) {
                        app.on_publish_error(&err);
                    }
                }
            }
            Step::Input(Some(AppEvent::Tick)) => app.on_tick(),
            Step::Input(Some(AppEvent::Resize)) => {}
            Step::Input(None) => {
                tracing::info!("terminal input closed");
                app.request_quit();
            }
            Step::Inbound(Some(event)) => app.on_inbound(event),
            Step::Inbound(None) => {
                tracing::warn!("upstream bridge closed");
                bridge_open = false;
            }
            Step::Timer(kind) => app.on_timer(kind),
            Step::Shutdown => app.request_quit(),
        }
    }
}

fn spawn_upstream(
    config: &Config,
    seed: Option<u64>,
    link: BridgeLink,
    shutdown: ShutdownHandle,
) -> JoinHandle<()> {
    match config.upstream.mode {
        UpstreamMode::Simulator => {
            let delay = config.simulator.scan_delay();
            let chance = config.simulator.steins_gate_chance;
            let simulator = match seed {
                Some(seed) => Simulator::seeded(delay, chance, run_seed(seed)),
                None => Simulator::new(delay, chance),
            };
            tracing::info!("starting simulated upstream");
            tokio::spawn(simulator.run(link, shutdown))
        }
        UpstreamMode::Tcp => {
            let upstream = TcpUpstream::new(
                config.upstream.address.clone(),
                config.upstream.reconnect_delay(),
            );
            tracing::info!(address = %config.upstream.address, "starting tcp upstream");
            tokio::spawn(upstream.run(link, shutdown))
        }
    }
}

async fn stop_upstream<B>(bridge: B, upstream: JoinHandle<()>) {
    drop(bridge);
    match tokio::time::timeout(UPSTREAM_GRACE, upstream).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => tracing::warn!(error = %err, "upstream task failed"),
        Err(_) => tracing::warn!("upstream task did not stop in time"),
    }
}

async fn watch_ctrl_c(shutdown: ShutdownHandle) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => shutdown.signal(),
            Err(err) => tracing::warn!(error = %err, "failed to listen for ctrl-c"),
        },
        _ = shutdown.wait() => {}
    }
}
