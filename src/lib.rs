// Library surface for the session engine, shared by the binary and the
// headless integration tests. Rendering lives in the binary only.
pub mod app_dirs;
pub mod best_score;
pub mod combo;
pub mod config;
pub mod error;
pub mod feedback;
pub mod idle_drain;
pub mod runtime;
pub mod stability;
pub mod stats;
pub mod telemetry;
pub mod travel;
pub mod typer;
pub mod util;
pub mod word_bank;

pub use config::Config;
pub use error::{ConfigError, StoreError};
pub use typer::{Outcome, TypingSession};
pub use word_bank::{WordBank, WordSupplier};
