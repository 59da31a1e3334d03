use transcribe_gateway::application::ports::{AudioDecoder, AudioDecoderError, TARGET_SAMPLE_RATE};
use transcribe_gateway::domain::AudioFormat;
use transcribe_gateway::infrastructure::audio::SymphoniaAudioDecoder;

use crate::helpers::{build_wav, tone_wav};

#[test]
fn given_16khz_wav_when_decoding_then_returns_mono_pcm_at_same_length() {
    let decoder = SymphoniaAudioDecoder;

    let audio = decoder.decode(&tone_wav(), AudioFormat::Wav).unwrap();

    assert_eq!(audio.sample_rate, TARGET_SAMPLE_RATE);
    assert_eq!(audio.samples.len(), 1600);
    assert!(audio.samples.iter().any(|s| s.abs() > 0.1));
}

#[test]
fn given_wav_at_44100hz_when_decoding_then_resamples_to_16khz() {
    let samples: Vec<i16> = (0..4410).map(|i| ((i % 100) as i16 - 50) * 200).collect();
    let wav = build_wav(44_100, &samples);
    let decoder = SymphoniaAudioDecoder;

    let audio = decoder.decode(&wav, AudioFormat::Wav).unwrap();

    // 4410 samples @ 44.1kHz is 0.1s, about 1600 samples @ 16kHz
    assert!(audio.samples.len() < 4410);
    assert!((audio.duration_secs() - 0.1).abs() < 0.01);
}

#[test]
fn given_silent_wav_when_decoding_then_returns_zero_samples_not_error() {
    let wav = build_wav(16_000, &[0i16; 800]);
    let decoder = SymphoniaAudioDecoder;

    let audio = decoder.decode(&wav, AudioFormat::Wav).unwrap();

    assert_eq!(audio.samples.len(), 800);
    assert!(audio.samples.iter().all(|s| *s == 0.0));
}

#[test]
fn given_text_bytes_when_decoding_then_returns_decoding_error() {
    let decoder = SymphoniaAudioDecoder;

    let result = decoder.decode(&b"definitely not audio ".repeat(16), AudioFormat::Mp3);

    assert!(matches!(result, Err(AudioDecoderError::DecodingFailed(_))));
}

#[test]
fn given_empty_bytes_when_decoding_then_returns_decoding_error() {
    let decoder = SymphoniaAudioDecoder;

    let result = decoder.decode(&[], AudioFormat::Flac);

    assert!(matches!(result, Err(AudioDecoderError::DecodingFailed(_))));
}
