//! A disposable TCP test client: connect, read in the background, play a
//! fixed outbound script, close, join the reader.

pub use error::{ConnectionError, ReadError, WriteError};
pub use session::Session;
pub use trace::init_tracing;

pub mod error;
pub mod script;
pub mod session;
pub mod trace;
