//! Calibration table utility.
//!
//! Exports the compiled-in tables as a starting point for a deployment's own
//! file, and checks a file the way the server will at startup.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin calibration_tool -- --export <path> [--force]
//! cargo run --bin calibration_tool -- --check <path>
//! ```

use std::path::{Path, PathBuf};

use oncobridge::domain::Calibration;

const USAGE: &str = "Usage: calibration_tool --export <path> [--force] | --check <path>";

enum Command {
    Export(PathBuf),
    Check(PathBuf),
}

fn path_arg(args: &mut impl Iterator<Item = String>) -> PathBuf {
    let p = args.next().unwrap_or_default();
    if p.is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(2);
    }
    PathBuf::from(p)
}

fn export(path: &Path, force: bool) {
    if path.exists() && !force {
        eprintln!("Refusing to overwrite existing file {:?}. Use --force.", path);
        std::process::exit(3);
    }

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = Calibration::standard().save(path) {
        eprintln!("Failed to export to {:?}: {e}", path);
        std::process::exit(4);
    }

    println!("Wrote standard calibration to {}", path.display());
    println!("fingerprint: {}", Calibration::standard().fingerprint());
}

fn check(path: &Path) {
    match Calibration::load(path) {
        Ok(calibration) => {
            println!("{}: valid (version {})", path.display(), calibration.version);
            println!("fingerprint: {}", calibration.fingerprint());
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            std::process::exit(1);
        }
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let mut command: Option<Command> = None;
    let mut force = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--export" => command = Some(Command::Export(path_arg(&mut args))),
            "--check" => command = Some(Command::Check(path_arg(&mut args))),
            "--force" => force = true,
            "-h" | "--help" => {
                println!(
                    "{USAGE}\n\n--export writes the compiled-in tables as pretty JSON.\n--check validates a file and prints its SHA-256 fingerprint."
                );
                return;
            }
            _ => {
                eprintln!("Unknown arg: {arg}\n{USAGE}");
                std::process::exit(2);
            }
        }
    }

    match command {
        Some(Command::Export(path)) => export(&path, force),
        Some(Command::Check(path)) => check(&path),
        None => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}
