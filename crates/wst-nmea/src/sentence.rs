//! Sentence grammar and checksum validation
//!
//! Accepted grammars:
//!   `$TAG,field1,field2,...*HH`  (checksummed)
//!   `$TAG,field1,field2,...`     (checksum-less firmware workaround)
//!
//! `HH` is the XOR of every byte strictly between `$` and `*`,
//! rendered as two uppercase hex digits.

use crate::NmeaError;

/// Parsed representation of a validated line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Uppercase message-type tag, e.g. `IIMWV`
    pub tag: String,

    /// Comma-separated fields following the tag; may be empty strings
    pub fields: Vec<String>,

    /// True only when an `*HH` suffix was present and verified. The
    /// checksum-less variant parses with `false` here but is accepted
    /// by policy.
    pub checksum_valid: bool,
}

/// XOR-fold a sentence body (the bytes between `$` and `*`).
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Wrap a sentence body into a full framed line, checksum and CRLF
/// included. Used by the replay link and tests.
pub fn frame(body: &str) -> String {
    format!("${body}*{:02X}\r\n", checksum(body))
}

/// Match a line against the sentence grammars.
///
/// Returns `Ok(None)` for lines matching neither grammar (noise and
/// partial frames are expected on a serial link, so this is not an
/// error), and `Err(ChecksumMismatch)` when the checksummed grammar
/// matched but the checksum did not.
pub fn parse(line: &str) -> Result<Option<Sentence>, NmeaError> {
    let Some(body) = line.strip_prefix('$') else {
        return Ok(None);
    };

    if let Some((payload, suffix)) = body.rsplit_once('*') {
        if let Some(expected) = parse_checksum(suffix) {
            let Some((tag, rest)) = split_tag(payload) else {
                return Ok(None);
            };
            let computed = checksum(payload);
            if computed != expected {
                return Err(NmeaError::ChecksumMismatch { computed, expected });
            }
            return Ok(Some(Sentence {
                tag: tag.to_string(),
                fields: split_fields(rest),
                checksum_valid: true,
            }));
        }
        // Malformed checksum suffix: fall through to the degraded
        // grammar, which matches any `$TAG,...` line.
    }

    let Some((tag, rest)) = split_tag(body) else {
        return Ok(None);
    };
    Ok(Some(Sentence {
        tag: tag.to_string(),
        fields: split_fields(rest),
        checksum_valid: false,
    }))
}

/// Exactly two uppercase hex digits.
fn parse_checksum(suffix: &str) -> Option<u8> {
    if suffix.len() != 2 || !suffix.bytes().all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b)) {
        return None;
    }
    u8::from_str_radix(suffix, 16).ok()
}

/// The tag is one or more uppercase letters followed by a comma.
fn split_tag(body: &str) -> Option<(&str, &str)> {
    let (tag, rest) = body.split_once(',')?;
    if tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_uppercase()) {
        return None;
    }
    Some((tag, rest))
}

fn split_fields(rest: &str) -> Vec<String> {
    rest.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{distributions::Uniform, prelude::*};

    #[test]
    fn test_valid_checksummed_sentence() {
        let sentence = parse("$IIMWV,045.0,R,10.0,N,A*0D").unwrap().unwrap();
        assert_eq!(sentence.tag, "IIMWV");
        assert_eq!(sentence.fields, vec!["045.0", "R", "10.0", "N", "A"]);
        assert!(sentence.checksum_valid);
    }

    #[test]
    fn test_checksum_mismatch_is_reported() {
        let err = parse("$IIMWV,045.0,R,10.0,N,A*0E").unwrap_err();
        assert!(matches!(
            err,
            NmeaError::ChecksumMismatch {
                computed: 0x0D,
                expected: 0x0E
            }
        ));
    }

    #[test]
    fn test_checksum_less_fallback_grammar() {
        let sentence = parse("$WIMDA,1.0132,B,25.0,C").unwrap().unwrap();
        assert_eq!(sentence.tag, "WIMDA");
        assert_eq!(sentence.fields.len(), 4);
        assert!(!sentence.checksum_valid);
    }

    #[test]
    fn test_malformed_checksum_suffix_falls_back() {
        // Lowercase hex does not match the strict grammar; the line is
        // then taken as checksum-less with the suffix kept in a field.
        let sentence = parse("$IIMWV,045.0,R,10.0,N,A*0d").unwrap().unwrap();
        assert!(!sentence.checksum_valid);
        assert_eq!(sentence.fields.last().map(String::as_str), Some("A*0d"));
    }

    #[test]
    fn test_noise_lines_are_ignored() {
        assert!(parse("").unwrap().is_none());
        assert!(parse("garbage").unwrap().is_none());
        assert!(parse("$").unwrap().is_none());
        assert!(parse("$IIMWV").unwrap().is_none()); // no comma after tag
        assert!(parse("$iimwv,1,2*00").unwrap().is_none()); // lowercase tag
        assert!(parse("$II2WV,1,2").unwrap().is_none()); // digit in tag
    }

    #[test]
    fn test_empty_fields_are_preserved() {
        let sentence = parse("$WIMDA,,B,,C").unwrap().unwrap();
        assert_eq!(sentence.fields, vec!["", "B", "", "C"]);
    }

    #[test]
    fn test_checksum_accept_iff_valid_randomized() {
        // Random field content: validator accepts exactly when the
        // trailing hex equals the XOR fold, and flags a corrupted
        // checksum byte every time.
        let mut rng = StdRng::seed_from_u64(0x57_53);
        let field_chars: Vec<char> = ('A'..='Z').chain('0'..='9').chain(['.', '-']).collect();
        let field_len = Uniform::new_inclusive(0usize, 8);

        for _ in 0..200 {
            let n_fields = rng.gen_range(1..=6);
            let fields: Vec<String> = (0..n_fields)
                .map(|_| {
                    let len = field_len.sample(&mut rng);
                    (0..len)
                        .map(|_| *field_chars.choose(&mut rng).unwrap())
                        .collect()
                })
                .collect();
            let body = format!("IIMWV,{}", fields.join(","));
            let sum = checksum(&body);

            let good = format!("${body}*{sum:02X}");
            let parsed = parse(&good).unwrap().unwrap();
            assert!(parsed.checksum_valid, "rejected valid line {good:?}");
            assert_eq!(parsed.fields, fields);

            let bad_sum = sum ^ 0x01;
            let bad = format!("${body}*{bad_sum:02X}");
            assert!(
                matches!(parse(&bad), Err(NmeaError::ChecksumMismatch { .. })),
                "accepted corrupt line {bad:?}"
            );
        }
    }

    #[test]
    fn test_frame_roundtrip() {
        let line = frame("IIMWV,045.0,R,10.0,N,A");
        assert_eq!(line, "$IIMWV,045.0,R,10.0,N,A*0D\r\n");
        let parsed = parse(line.trim_end()).unwrap().unwrap();
        assert!(parsed.checksum_valid);
    }
}
