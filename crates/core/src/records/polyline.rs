//! Text codec for walk coordinate lists.
//!
//! A polyline is a flat list of numbers read in (latitude, longitude) pairs.
//! It is stored as a bracketed, comma-separated list such as `[1.1, 2.2]`.
//! Decoding is lenient: malformed input yields `None` and unparsable tokens
//! are dropped, so a damaged column never fails a read.

/// Encodes a coordinate list as `[a, b, ...]`.
pub fn encode(values: &[f64]) -> String {
    let body = values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{body}]")
}

/// Decodes bracketed coordinate text.
///
/// Returns `None` for absent or blank input and for text that is not wrapped
/// in `[` and `]`. Tokens that do not parse as numbers are skipped.
pub fn decode(text: Option<&str>) -> Option<Vec<f64>> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let body = trimmed.strip_prefix('[')?.strip_suffix(']')?;

    Some(
        body.split(',')
            .filter_map(|token| token.trim().parse::<f64>().ok())
            .collect(),
    )
}

/// Reads a flat coordinate list as (latitude, longitude) pairs.
///
/// A trailing unpaired value is ignored.
pub fn pairs(values: &[f64]) -> impl Iterator<Item = (f64, f64)> + '_ {
    values.chunks_exact(2).map(|pair| (pair[0], pair[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_matches_stored_format() {
        assert_eq!(encode(&[1.1, 2.2]), "[1.1, 2.2]");
        assert_eq!(encode(&[-34.9, -56.16, 0.5]), "[-34.9, -56.16, 0.5]");
        assert_eq!(encode(&[]), "[]");
    }

    #[test]
    fn test_decode_reverses_encode() {
        let samples: [&[f64]; 4] = [
            &[1.1, 2.2],
            &[-34.901_112, -56.164_531, -34.9012, -56.1646],
            &[0.0, 1e-7, 123_456.789],
            &[42.0],
        ];

        for values in samples {
            assert_eq!(decode(Some(&encode(values))), Some(values.to_vec()));
        }
    }

    #[test]
    fn test_decode_absent_or_blank_is_none() {
        assert_eq!(decode(None), None);
        assert_eq!(decode(Some("")), None);
        assert_eq!(decode(Some("   ")), None);
    }

    #[test]
    fn test_decode_unbracketed_is_none() {
        assert_eq!(decode(Some("not-a-list")), None);
        assert_eq!(decode(Some("1.0, 2.0")), None);
        assert_eq!(decode(Some("[1.0, 2.0")), None);
        assert_eq!(decode(Some("1.0, 2.0]")), None);
    }

    #[test]
    fn test_decode_skips_bad_tokens() {
        assert_eq!(decode(Some("[1.0, abc, 2.0]")), Some(vec![1.0, 2.0]));
        assert_eq!(decode(Some("[,,3.5,]")), Some(vec![3.5]));
    }

    #[test]
    fn test_decode_empty_list() {
        assert_eq!(decode(Some("[]")), Some(vec![]));
        assert_eq!(decode(Some("  [ ]  ")), Some(vec![]));
    }

    #[test]
    fn test_decode_accepts_json_style_text() {
        assert_eq!(decode(Some("[1,2.5,-3]")), Some(vec![1.0, 2.5, -3.0]));
    }

    #[test]
    fn test_pairs_ignores_trailing_value() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let collected: Vec<_> = pairs(&values).collect();
        assert_eq!(collected, vec![(1.0, 2.0), (3.0, 4.0)]);
    }
}
