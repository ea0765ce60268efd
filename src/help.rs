use std::ffi::OsStr;

use current_platform::CURRENT_PLATFORM;
use strum::VariantArray;

use crate::args::Arg;

/// Only an explicit `-help` prints help; running without arguments is reported
/// as a missing image by the argument parser.
pub fn maybe_print_help_and_exit(bin_name: &str) {
    if let Some(arg) = std::env::args_os().nth(1) {
        if is_help_flag(&arg) {
            print_help_and_exit(bin_name)
        }
    }
}

fn is_help_flag(arg: &OsStr) -> bool {
    arg == OsStr::new("--help") || arg == OsStr::new("-help")
}

fn print_help_and_exit(bin_name: &str) -> ! {
    print!("{}", help_text(bin_name));
    std::process::exit(0);
}

pub fn help_text(bin_name: &str) -> String {
    let mut text = format!("Version: {}\n", version_string());
    text.push_str(&format!("License: {}\n", env!("CARGO_PKG_LICENSE")));
    text.push_str(&format!("Usage: {bin_name} [options ...] image\n\n"));
    text.push_str("Prints the five most likely dog breeds in the image.\n");
    text.push_str("Log verbosity is controlled with RUST_LOG (default: info).\n\n");
    text.push_str("Options:\n");
    for arg in Arg::VARIANTS {
        let name: &'static str = arg.into();
        text.push_str(&format!("  -{name:19} {}\n", arg.help_text()));
    }
    text
}

fn version_string() -> String {
    let cpu = CURRENT_PLATFORM.split('-').next().unwrap_or("unknown");
    let version = env!("CARGO_PKG_VERSION");
    let repo = env!("CARGO_PKG_REPOSITORY");

    format!("dog-classifier {version} {cpu} {repo}")
}
