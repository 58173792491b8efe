use anyhow::Context;
use charge_edit::logging::{self, Logger};
use charge_edit::options::USAGE;
use charge_edit::prefs::PreferenceStore;
use charge_edit::{error, Controller, RunOptions, TuiApplication};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let options = RunOptions::parse(std::env::args().skip(1)).context("invalid arguments")?;
    if options.show_help {
        println!("{}", USAGE);
        return Ok(());
    }
    if options.show_version {
        println!("charge-edit {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // 画面を壊さないよう stderr には出さない
    let mut logger = Logger::new(LevelFilter::Info).without_stderr();
    if let Some(path) = options.resolve_log_path() {
        logger = logger.with_file_output(path);
    }
    if options.debug_log_path.is_some() {
        logger = logger.with_level(LevelFilter::Debug);
    }
    logging::init(logger);
    log::info!("charge-edit {} starting", env!("CARGO_PKG_VERSION"));

    let prefs_path = options
        .prefs_path
        .clone()
        .or_else(PreferenceStore::default_path)
        .context("no configuration directory available for preferences")?;
    let prefs = PreferenceStore::load_or_default(prefs_path);

    let controller = Controller::new(options.editor, prefs);
    let mut app = TuiApplication::new(controller);
    app.open_initial(&options.files);
    app.run().context("terminal session failed")?;

    log::info!("charge-edit exited");
    Ok(())
}
