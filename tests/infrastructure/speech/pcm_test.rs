use transcribe_gateway::infrastructure::speech::pcm::{to_i16_be_bytes, to_i16_le_bytes};

#[test]
fn given_out_of_range_samples_when_converting_then_clamps_to_i16_range() {
    let bytes = to_i16_le_bytes(&[1.5, -2.0, 0.0]);

    assert_eq!(bytes.len(), 6);
    assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), i16::MAX);
    assert_eq!(i16::from_le_bytes([bytes[2], bytes[3]]), -i16::MAX);
    assert_eq!(i16::from_le_bytes([bytes[4], bytes[5]]), 0);
}

#[test]
fn given_sample_when_converting_big_endian_then_byte_order_is_swapped() {
    let le = to_i16_le_bytes(&[0.5]);
    let be = to_i16_be_bytes(&[0.5]);

    assert_eq!(le[0], be[1]);
    assert_eq!(le[1], be[0]);
}
