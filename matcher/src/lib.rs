//! Getopt-style tokenizer for [`command_tree_core`] registries.
//!
//! [`GetoptMatcher`] turns raw process arguments into a
//! [`MatchResult`](command_tree_core::MatchResult). [`run`] and [`run_env`]
//! wire it to a registry and standard output for use from `main`.
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! use command_tree_core::{FlagKind, Registry};
//!
//! fn main() -> ExitCode {
//!     let mut registry = Registry::new("reactor").expect("valid executable name");
//!     registry
//!         .register("serve")
//!         .add_flag("port,p", "port to listen on", FlagKind::Int(Some(3000)))
//!         .expect("valid flag")
//!         .set_action(|_, flags| println!("port {:?}", flags.value("port")));
//!
//!     command_tree_matcher::run_env(&mut registry)
//! }
//! ```

mod scan;
mod token;

use std::io;
use std::process::ExitCode;

use command_tree_core::Registry;

pub use scan::GetoptMatcher;

/// Runs `tokens` against `registry` with [`GetoptMatcher`], writing to stdout.
pub fn run<S: AsRef<str>>(registry: &mut Registry, tokens: &[S]) -> ExitCode {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    registry.run(&GetoptMatcher, tokens, &mut out)
}

/// Runs the current process arguments, minus the program name.
pub fn run_env(registry: &mut Registry) -> ExitCode {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    run(registry, &tokens)
}
