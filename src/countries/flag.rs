//! Flag emoji derivation from ISO codes.

/// Distance from an uppercase ASCII letter to its regional indicator symbol.
///
/// `'A'` (U+0041) + `0x1F1A5` = U+1F1E6 REGIONAL INDICATOR SYMBOL LETTER A.
pub const FLAG_OFFSET: u32 = 0x1F1A5;

/// Build the flag emoji for a two-letter ISO code.
///
/// Each ASCII letter is uppercased and shifted into the regional indicator
/// block. Any pair of letters produces a glyph, even where no country exists;
/// renderers show those as two boxed letters. Characters that are not ASCII
/// letters are passed through unchanged.
///
/// # Example
///
/// ```rust
/// use country_code_picker::flag_glyph;
///
/// assert_eq!(flag_glyph("in"), "🇮🇳");
/// assert_eq!(flag_glyph("US"), "\u{1F1FA}\u{1F1F8}");
/// ```
pub fn flag_glyph(iso: &str) -> String {
    iso.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                char::from_u32(c.to_ascii_uppercase() as u32 + FLAG_OFFSET).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
