mod audio_decoder;
mod staging_store;
mod speech_recognizer;

pub use audio_decoder::{AudioDecoder, AudioDecoderError, DecodedAudio, TARGET_SAMPLE_RATE};
pub use staging_store::{StagedFile, StagingStore, StagingStoreError};
pub use speech_recognizer::{SpeechRecognizer, TranscriptionError};
