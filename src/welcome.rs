use std::env;
use tracing::info;

pub fn welcome() {

    let version = env!("CARGO_PKG_VERSION");
    let run_mode = env::var("RBC_MODE").unwrap_or_else(|_| "development".into());

    let title = [
        r"  ____  ____   ____ ",
        r" |  _ \| __ ) / ___|",
        r" | |_) |  _ \| |    ",
        r" |  _ <| |_) | |___ ",
        r" |_| \_\____/ \____|",
    ];
    for line in title {
        println!("{}", line);
    }
    println!();
    println!("Version: {} | Run-Mode: {}", version, run_mode);
    println!();
    info!("Starting up the room browsing client in {run_mode} mode.");
}
