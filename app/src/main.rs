use gemdash_adapters::mysql::{MysqlProvider, MysqlQueryBackend};
use gemdash_core::activity_log::FileAuditTrail;
use gemdash_core::config::AppConfig;
use gemdash_core::connection::Session;
use gemdash_core::dispatcher::Dispatcher;
use gemdash_core::executor::Executor;

fn run_dashboard(
    run_tui: impl FnOnce() -> Result<(), gemdash_tui::TuiError>,
) -> Result<(), Box<dyn std::error::Error>> {
    run_tui()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load_default()?;

    // mysql_async ties its sockets to the runtime that created them, so a
    // single current-thread runtime serves the startup connect and every
    // action dispatched from the UI loop.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let session = Session::new(MysqlProvider::new(&config.connection));
    let executor = Executor::new(MysqlQueryBackend::new(&config.connection));
    let mut dispatcher = Dispatcher::new(session, executor);
    match FileAuditTrail::load_default() {
        Ok(trail) => dispatcher.set_audit_trail(trail),
        Err(error) => eprintln!("audit trail disabled: {error}"),
    }

    // A startup connection failure is fatal; once the dashboard is up,
    // connection problems are recoverable through the refresh action.
    runtime.block_on(dispatcher.connect())?;

    let run_result = run_dashboard(|| gemdash_tui::run(&runtime, &mut dispatcher));
    let shutdown_result = runtime.block_on(dispatcher.shutdown());

    run_result?;
    shutdown_result?;
    Ok(())
}
