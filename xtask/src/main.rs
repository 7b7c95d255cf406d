use std::env;
use std::path::Path;
use std::process::{Command, ExitCode};

fn run(root: &Path, program: &str, args: &[&str]) -> Result<(), String> {
    let shown = format!("{program} {}", args.join(" "));
    let status = Command::new(program)
        .args(args)
        .current_dir(root)
        .status()
        .map_err(|e| format!("failed to run `{shown}`: {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("command failed: {shown}"))
    }
}

fn check(root: &Path) -> Result<(), String> {
    run(root, "cargo", &["fmt", "--all", "--", "--check"])?;
    run(
        root,
        "cargo",
        &[
            "clippy",
            "--workspace",
            "--all-targets",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    run(root, "cargo", &["test", "--workspace"])
}

fn openapi(root: &Path) -> Result<(), String> {
    run(
        root,
        "cargo",
        &[
            "run",
            "-p",
            "spy-agency-api",
            "--bin",
            "openapi",
            "--",
            "--out",
            "docs/openapi.json",
        ],
    )
}

fn main() -> ExitCode {
    let arg = env::args().nth(1).unwrap_or_else(|| "help".to_string());
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let root = manifest_dir.parent().unwrap_or(manifest_dir);

    let result = match arg.as_str() {
        "check" => check(root),
        "openapi" => openapi(root),
        "help" | "--help" | "-h" => {
            eprintln!("xtask commands:");
            eprintln!("  check     fmt, clippy and tests for the whole workspace");
            eprintln!("  openapi   write docs/openapi.json");
            Ok(())
        }
        _ => Err(format!(
            "unknown xtask command: {arg} (try `cargo run -p xtask -- help`)"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
