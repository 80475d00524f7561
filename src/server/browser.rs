use std::process::Stdio;

use tokio::process::Command;

/// Program and arguments that open `url` with the platform's default handler.
pub fn launch_command(url: &str) -> (&'static str, Vec<String>) {
    if cfg!(target_os = "windows") {
        // `start` is a cmd builtin; the empty string is the window title.
        ("cmd", vec!["/C".into(), "start".into(), String::new(), url.into()])
    } else if cfg!(target_os = "macos") {
        ("open", vec![url.into()])
    } else {
        ("xdg-open", vec![url.into()])
    }
}

/// Fire-and-forget: spawn the opener and return without waiting on it.
/// A missing opener is logged and otherwise ignored.
pub fn open_browser(url: &str) {
    let (program, args) = launch_command(url);
    let spawned = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    match spawned {
        Ok(_child) => tracing::debug!("Launched {} {}", program, url),
        Err(e) => tracing::warn!("Could not open browser with {}: {}", program, e),
    }
}
