use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Environment variable selecting the log filter (`warn`, `debug`, `ptidecode_core=trace`, ...).
pub const LOG_ENV: &str = "PTIDECODE_LOG";

/// Installs the stderr logger. `--verbose` raises the default level to debug.
pub fn init(verbose: bool) {
    let mut builder = Builder::from_env(Env::new().filter_or(LOG_ENV, "warn"));
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.target(Target::Stderr);
    builder.try_init().ok();
}
