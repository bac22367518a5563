//! Explicit timestamp grammar for comment text.
//!
//! Accepted forms: `H:MM:SS` (1–2 digit hours) and `M:SS` (1–2 digit
//! minutes), with minutes and seconds as two digits in 00–59. A leading
//! "at " is tolerated around a match but is not part of it.
//!
//! Precedence for overlapping candidates: longest match wins. At each
//! candidate position the hour form is tried before the minute form, and
//! scanning resumes after an accepted match, so `1:02:15` is one timestamp
//! and never also `02:15`. A candidate that fails the grammar (`2:7`,
//! `12:99`, `12:345`) is skipped and scanning continues; malformed
//! occurrences are never an error.

/// All well-formed timestamps in `text`, in occurrence order, deduplicated
/// by their written form.
pub fn find_timestamps(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut out: Vec<String> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() || (i > 0 && bytes[i - 1].is_ascii_digit()) {
            i += 1;
            continue;
        }

        match scan_at(bytes, i) {
            Some((text_end, ts)) => {
                if !out.iter().any(|t| t == &ts) {
                    out.push(ts);
                }
                i = text_end;
            }
            None => {
                // Skip the whole leading digit run so an embedded tail like
                // the "345" in "12:345" is not re-entered mid-run.
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
        }
    }

    out
}

/// Try to read a timestamp starting at the digit at `start`. Returns the
/// end offset and the matched text.
fn scan_at(bytes: &[u8], start: usize) -> Option<(usize, String)> {
    let first = digit_run(bytes, start);
    let first_len = first - start;
    if first_len > 2 || first >= bytes.len() || bytes[first] != b':' {
        return None;
    }

    let second = digit_run(bytes, first + 1);
    if second - (first + 1) != 2 {
        return None;
    }
    let second_val = two_digit_value(bytes, first + 1);

    // Hour form first: H:MM:SS, longest match wins.
    if second_val <= 59 && second < bytes.len() && bytes[second] == b':' {
        let third = digit_run(bytes, second + 1);
        if third - (second + 1) == 2 && two_digit_value(bytes, second + 1) <= 59 {
            let ts = std::str::from_utf8(&bytes[start..third]).ok()?;
            return Some((third, ts.to_string()));
        }
    }

    // Minute form: M:SS.
    if second_val <= 59 {
        let ts = std::str::from_utf8(&bytes[start..second]).ok()?;
        return Some((second, ts.to_string()));
    }

    None
}

/// End offset of the maximal digit run starting at `from`.
fn digit_run(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

fn two_digit_value(bytes: &[u8], at: usize) -> u32 {
    (bytes[at] - b'0') as u32 * 10 + (bytes[at + 1] - b'0') as u32
}
