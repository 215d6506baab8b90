use std::process::{Command, Output};

/// Run `git` in the package root; `None` if git is missing or the call fails.
fn git(args: &[&str]) -> Option<Output> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|out| out.status.success())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");

    let commit = git(&["rev-parse", "--short", "HEAD"])
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_owned())
        .unwrap_or_default();
    let tagged = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();

    // Read by `version_string` in main.rs
    println!("cargo:rustc-env=INTAKE_GIT_HASH={commit}");
    println!("cargo:rustc-env=INTAKE_ON_RELEASE_TAG={tagged}");
}
