//! Encoded polyline decoding
//!
//! Decodes the Google polyline algorithm used by OSRM for the `polyline`
//! (precision 5) and `polyline6` (precision 6) geometry formats. Encoded
//! pairs are latitude first; decoded positions are GeoJSON-ordered
//! `[lon, lat]`.

use domain::LineString;

use crate::error::DirectionsError;

const CHUNK_OFFSET: i64 = 63;
const CONTINUATION_BIT: i64 = 0x20;
const CHUNK_MASK: i64 = 0x1f;
const MAX_SHIFT: u32 = 60;

/// Decode an encoded polyline into a line string
///
/// # Errors
///
/// Returns `DirectionsError::ParseError` for characters outside the
/// encoding alphabet, input that ends in the middle of a value, or
/// coordinates that overflow while summing deltas.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn decode(encoded: &str, precision: u32) -> Result<LineString, DirectionsError> {
    let factor = 10f64.powi(precision as i32);
    let bytes = encoded.as_bytes();

    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut coordinates = Vec::new();

    while index < bytes.len() {
        lat = accumulate(lat, next_value(bytes, &mut index)?)?;
        lon = accumulate(lon, next_value(bytes, &mut index)?)?;
        coordinates.push([lon as f64 / factor, lat as f64 / factor]);
    }

    Ok(LineString::new(coordinates))
}

fn accumulate(total: i64, delta: i64) -> Result<i64, DirectionsError> {
    total
        .checked_add(delta)
        .ok_or_else(|| DirectionsError::ParseError("Polyline coordinate overflow".to_string()))
}

fn next_value(bytes: &[u8], index: &mut usize) -> Result<i64, DirectionsError> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes.get(*index).ok_or_else(|| {
            DirectionsError::ParseError("Polyline ends inside a value".to_string())
        })?;
        *index += 1;

        let chunk = i64::from(byte) - CHUNK_OFFSET;
        if !(0..64).contains(&chunk) {
            return Err(DirectionsError::ParseError(format!(
                "Invalid polyline character at offset {}",
                *index - 1
            )));
        }
        if shift > MAX_SHIFT {
            return Err(DirectionsError::ParseError(
                "Polyline value too large".to_string(),
            ));
        }

        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [f64; 2], expected: [f64; 2]) {
        assert!(
            (actual[0] - expected[0]).abs() < 1e-9 && (actual[1] - expected[1]).abs() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_decode_reference_polyline() {
        let line = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@", 5).unwrap();
        let coords = line.coordinates();

        assert_eq!(coords.len(), 3);
        assert_close(coords[0], [-120.2, 38.5]);
        assert_close(coords[1], [-120.95, 40.7]);
        assert_close(coords[2], [-126.453, 43.252]);
    }

    #[test]
    fn test_decode_precision_six() {
        // 38.5, -120.2 at precision 6
        let line = decode("_izlhA~rlgdF", 6).unwrap();
        assert_close(line.coordinates()[0], [-120.2, 38.5]);
    }

    #[test]
    fn test_decode_empty() {
        let line = decode("", 5).unwrap();
        assert!(line.is_empty());
    }

    #[test]
    fn test_decode_truncated() {
        assert!(matches!(
            decode("_p~iF~ps|", 5),
            Err(DirectionsError::ParseError(_))
        ));
    }

    #[test]
    fn test_decode_overflowing_deltas() {
        // Each group decodes to 2^62 - 1; the third lat/lon pair overflows i64
        let group = "}~~~~~~~~~~~F";
        assert!(decode(&group.repeat(4), 5).is_ok());
        assert!(matches!(
            decode(&group.repeat(6), 5),
            Err(DirectionsError::ParseError(msg)) if msg.contains("overflow")
        ));
    }

    #[test]
    fn test_decode_invalid_character() {
        assert!(matches!(
            decode("_p~iF ps|U", 5),
            Err(DirectionsError::ParseError(_))
        ));
    }
}
