//! Cell coordinate decoding: `"AB12"` style references to zero-based indexes.

/// Converts column letters to a zero-based column index (`A` = 0, `Z` = 25, `AA` = 26).
///
/// Letters are case-insensitive. Returns `None` for an empty string, any
/// non-letter character, or an index that would overflow.
pub fn col_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }
    letters.bytes().try_fold(0usize, |index, byte| {
        if !byte.is_ascii_alphabetic() {
            return None;
        }
        let digit = (byte.to_ascii_uppercase() - b'A') as usize + 1;
        index.checked_mul(26)?.checked_add(digit)
    }).map(|number| number - 1)
}

/// Converts a zero-based column index back to its letters (`0` = `A`, `26` = `AA`).
pub fn index_to_col(index: usize) -> String {
    let mut number = index + 1;
    let mut letters = Vec::new();
    while number > 0 {
        number -= 1;
        letters.push(b'A' + (number % 26) as u8);
        number /= 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Extracts the zero-based column index from a cell reference such as `"C9"`.
///
/// Only the leading letters are decoded; the row digits are ignored because
/// rows are grouped by `<row>` elements instead.
pub fn reference_to_col(reference: &str) -> Option<usize> {
    let end = reference
        .find(|character: char| !character.is_ascii_alphabetic())
        .unwrap_or(reference.len());
    col_to_index(&reference[..end])
}
