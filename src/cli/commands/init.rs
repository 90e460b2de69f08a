use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::migrate::applied_versions;
use crate::errors::AppResult;
use crate::utils::date::Clock;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with the demo community
pub fn handle(cli: &Cli, clock: &Clock) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing rFellowship…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    let conn = Connection::open(&db_path)?;
    init_db(&conn, clock.utc_now())?;

    println!("✅ Database initialized at {}", &db_path);
    println!("📚 Migrations : {}", applied_versions(&conn)?.len());

    if let Err(e) = log::ttlog(
        &conn,
        "init",
        &db_path,
        "Database initialized",
    ) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    println!("🎉 rFellowship initialization completed!");
    Ok(())
}
