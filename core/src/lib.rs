//! Command registry and argument/flag resolution for CLI applications.
//!
//! A host declares a tree of named commands with typed positional arguments
//! and flags, then hands a raw token stream to [`Registry::parse`] or
//! [`Registry::run`]. A [`Tokenizer`] scans the tokens into a
//! [`MatchResult`]; the registry validates it, applies defaults, coerces
//! flag values and invokes the selected command's action.
//!
//! - [`Registry`]: executable metadata, the ordered command list and the
//!   optional render [`Event`] listener.
//! - [`Command`]: description, [`Argument`]s, [`Flag`]s and an [`Action`].
//! - [`RegistrySchema`]: serializable snapshot consumed by tokenizers.
//! - [`Outcome`] / [`InvocationError`]: the terminal result of one
//!   invocation.
//!
//! Every command receives a `--help/-h` switch, the root command also a
//! `--version/-v` switch, and the registry always contains the `help` and
//! `version` sub-commands.
//!
//! # Example
//!
//! ```
//! use command_tree_core::{FlagKind, MatchResult, Outcome, Registry, Slot};
//!
//! let mut registry = Registry::new("reactor")?;
//! registry.set_version("v1.0.0");
//! registry
//!     .root()
//!     .add_argument("category", "category of the information to look for", "")?
//!     .add_flag("verbose,V", "display log information", FlagKind::Bool)?
//!     .set_action(|args, flags| {
//!         println!("{:?} {:?}", args.value("category"), flags.value("verbose"));
//!     });
//!
//! // A tokenizer would normally produce this from `["-V", "service"]`.
//! let matched = MatchResult::new("")
//!     .with_argument("category", Slot::new("service", ""))
//!     .with_flag("verbose", Slot::new("true", "false"));
//!
//! let outcome = registry.resolve(Ok(matched), &mut std::io::sink()).unwrap();
//! assert_eq!(outcome, Outcome::Executed(String::new()));
//! # Ok::<(), command_tree_core::ConfigError>(())
//! ```

pub mod builtin;
mod command;
mod config;
mod error;
mod matching;
mod registry;
mod render;
mod resolve;
mod schema;
mod types;
mod value;

pub use command::{Action, Command};
pub use config::{CommandTexts, DEFAULT_COLUMN_WIDTH, RegistryConfig};
pub use error::{ConfigError, InvocationError, MatchError, ResolveError, Result, ValueTypeError};
pub use matching::{MatchResult, Slot, Tokenizer};
pub use registry::{Listener, Registry};
pub use render::Event;
pub use resolve::Outcome;
pub use schema::{CommandSchema, RegistrySchema};
pub use types::{Argument, DataType, DefaultValue, Flag, FlagKind, INVERTED_PREFIX, VARIADIC_SUFFIX};
pub use value::{ArgumentValue, ArgumentValues, FlagValue, FlagValues, Value, Values};
