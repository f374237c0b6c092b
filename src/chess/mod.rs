pub mod batch;
pub mod converter;
pub mod engine;
pub mod error;
pub mod filter;
pub mod log;
pub mod movetext;
pub mod reader;
pub mod verify;

pub use batch::{BatchOptions, BatchSummary};
pub use converter::{Converter, UciGame, convert};
pub use engine::{Rules, ShakmatyRules};
pub use error::{BatchError, LineError, MoveError};
