//! Source-text normalization.
//!
//! Unicode NFC, CRLF -> LF, leading/trailing whitespace trim, and
//! collapsing any run of 3+ consecutive newlines down to exactly two —
//! the fixed pipeline recorded in every manifest's `normalization` field
//! (`spec.md` §3). `unicode-normalization` is reused from the teacher's
//! dependency stack for a different normalization form (NFC here, versus
//! the teacher's NFD + diacritic stripping).

use unicode_normalization::UnicodeNormalization;

pub fn normalize(raw_text: &str) -> String {
    let crlf_fixed = raw_text.replace("\r\n", "\n").replace('\r', "\n");
    let nfc: String = crlf_fixed.nfc().collect();
    let collapsed = collapse_blank_runs(&nfc);
    collapsed.trim().to_string()
}

fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newline_run = 0;
    for ch in text.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(ch);
            }
        } else {
            newline_run = 0;
            out.push(ch);
        }
    }
    out
}
