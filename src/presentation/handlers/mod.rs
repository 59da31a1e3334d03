mod error;
mod test_connection;
mod transcribe;

pub use error::{ApiError, ErrorResponse};
pub use test_connection::test_connection_handler;
pub use transcribe::{AUDIO_FIELD, TranscriptionResponse, transcribe_handler};
