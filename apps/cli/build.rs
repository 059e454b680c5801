use std::process::Command;

fn main() {
    // Short commit hash for the startup log line
    let sha = Command::new("git")
        .args(["rev-parse", "--short=12", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=OUTBREAK_GIT_SHA={sha}");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
