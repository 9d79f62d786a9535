use std::io::Write;
use std::time::Instant;

use log::LevelFilter;

///
/// Level for the number of `-v` flags: warnings only by default, pipeline
/// progress with `-v`, external command lines and cleanup notes with `-vv`.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

///
/// Install the stderr logger. Lines carry the run time so far; debug lines
/// also name the emitting module. Directives in `RUST_LOG` are applied after
/// the `-v` level and win over it.
pub fn init_logger(verbosity: u8) {
    let start = Instant::now();

    env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .format(move |buf, record| {
            let secs = start.elapsed().as_secs();
            let stamp = format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60);
            if record.level() >= log::Level::Debug {
                writeln!(buf, "[{stamp}] {} {}: {}", record.level(), record.target(), record.args())
            } else {
                writeln!(buf, "[{stamp}] {}: {}", record.level(), record.args())
            }
        })
        .target(env_logger::Target::Stderr)
        .init();
}
