pub mod args;
pub mod cli;
pub mod error;
pub mod exit;
pub mod package;
pub mod ui;
pub mod utils;

pub use args::{ArgValue, ArgsConfig, BooleanFlags, ParsedArgs, parse_args};
pub use cli::{Bootstrap, CliOptions, ClirkContext, SigintHandler, clirk, clitch, prepare};
pub use error::{ClirkError, Hint, Result, UserFacingError};
pub use exit::{Cause, Shutdown, TeardownStep};
pub use package::{PackageInfo, find_up_package};
pub use utils::text_input::TextInput;
