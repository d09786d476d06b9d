mod args;
pub use args::Args;
mod output;
pub use output::*;
mod signals;
pub use signals::*;
