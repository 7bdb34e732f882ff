//! Headless replay tool (native).
//!
//! `planttracer [script.json]` replays a pointer session against a scene and
//! prints the resulting shapes as JSON. Without a script the two-ball demo
//! runs.

#[cfg(feature = "native")]
fn main() {
    use planttracer_web::replay::{self, ReplayScript};
    use std::path::PathBuf;

    env_logger::init();
    log::info!("Starting PlantTracer replay");

    let script = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match ReplayScript::from_path(&path) {
            Ok(script) => script,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => ReplayScript::demo(),
    };

    match replay::run(&script).and_then(|report| Ok(serde_json::to_string_pretty(&report)?)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Replay failed: {e}");
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
