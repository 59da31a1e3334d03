/// Converts normalized float samples to signed 16-bit PCM, little-endian.
pub fn to_i16_le_bytes(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&s| to_i16(s).to_le_bytes())
        .collect()
}

/// Converts normalized float samples to signed 16-bit PCM, big-endian (`audio/l16`).
pub fn to_i16_be_bytes(samples: &[f32]) -> Vec<u8> {
    samples
        .iter()
        .flat_map(|&s| to_i16(s).to_be_bytes())
        .collect()
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}
