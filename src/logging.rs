use chrono::Local;
use directories::ProjectDirs;
use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

const LOG_FILE: &str = "minutype.log";

/// `$XDG_STATE_HOME/minutype/minutype.log` where the platform has a state
/// dir, the local data dir elsewhere.
pub fn default_log_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", "minutype")?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_local_dir());
    Some(dir.join(LOG_FILE))
}

/// Install the global logger, writing to `log_file` or the default state
/// directory. Output never goes to the terminal the TUI is drawing on.
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(log_file: Option<PathBuf>) -> io::Result<Option<PathBuf>> {
    let Some(path) = log_file.or_else(default_log_path) else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(Some(path))
}
