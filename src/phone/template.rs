//! As-you-type formatting templates compiled from region metadata.
//!
//! Mirrors the libphonenumber as-you-type algorithm for national numbers:
//!
//! 1. Below [`MIN_LEADING_DIGITS`] digits nothing is formatted.
//! 2. A format is a candidate when its leading-digits pattern (the one for
//!    the current digit count) matches the start of the input.
//! 3. If the input fully matches a candidate's pattern, the real format is
//!    applied.
//! 4. Otherwise the candidate's template (the format applied to the longest
//!    run of `9`s its pattern accepts) is filled digit by digit and cut after
//!    the last digit.

use regex::Regex;

/// Digits required before a format is chosen.
pub(crate) const MIN_LEADING_DIGITS: usize = 3;

/// Probe string matched against format patterns to derive a template.
const LONGEST_NATIONAL: &str = "999999999999999";

/// Stand-in for a digit slot inside a template.
const DIGIT_PLACEHOLDER: char = '\u{2008}';

/// One region format, compiled for as-you-type use.
#[derive(Debug)]
pub(crate) struct FormatTemplate {
    full: Regex,
    replacement: String,
    leading_digits: Vec<Regex>,
    template: Option<String>,
}

impl FormatTemplate {
    /// Compile a format from its metadata pattern, replacement and
    /// leading-digits patterns.
    ///
    /// Returns `None` for formats that cannot be used while typing:
    /// replacements with anything but group references and punctuation,
    /// or patterns that fail to compile.
    pub(crate) fn compile<'a>(
        pattern: &str,
        replacement: &str,
        leading_digits: impl IntoIterator<Item = &'a str>,
    ) -> Option<Self> {
        if !is_eligible_replacement(replacement) {
            return None;
        }
        let pattern = compact(pattern);
        let pattern = strip_anchors(&pattern);

        let full = Regex::new(&format!("^(?:{pattern})$")).ok()?;
        let leading_digits = leading_digits
            .into_iter()
            .map(|ld| Regex::new(&format!("^(?:{})", strip_anchors(&compact(ld)))))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        Some(Self {
            full,
            replacement: replacement.to_string(),
            leading_digits,
            template: build_template(pattern, replacement),
        })
    }

    /// Whether the format puts anything between the digit groups.
    pub(crate) fn inserts_separators(&self) -> bool {
        let mut chars = self.replacement.chars();
        while let Some(c) = chars.next() {
            if c == '$' {
                chars.next();
            } else {
                return true;
            }
        }
        false
    }

    /// Whether this format applies to numbers starting with `digits`.
    fn accepts_prefix(&self, digits: &str) -> bool {
        if self.leading_digits.is_empty() {
            return true;
        }
        let idx = digits
            .len()
            .saturating_sub(MIN_LEADING_DIGITS)
            .min(self.leading_digits.len() - 1);
        self.leading_digits[idx].is_match(digits)
    }

    /// Apply the real format when `digits` is a complete match.
    fn format_complete(&self, digits: &str) -> Option<String> {
        self.full
            .is_match(digits)
            .then(|| self.full.replace(digits, self.replacement.as_str()).into_owned())
    }

    /// Fill the template with `digits`, cutting after the last digit.
    fn fill_template(&self, digits: &str) -> Option<String> {
        let template = self.template.as_ref()?;
        let mut out = String::with_capacity(template.len());
        let mut remaining = digits.chars().peekable();

        for slot in template.chars() {
            if remaining.peek().is_none() {
                break;
            }
            if slot == DIGIT_PLACEHOLDER {
                out.extend(remaining.next());
            } else {
                out.push(slot);
            }
        }

        // Template too short for the input.
        if remaining.peek().is_some() {
            return None;
        }
        Some(out)
    }
}

/// Format `digits` with the first fitting template, or `None` if none fits.
pub(crate) fn format_with(templates: &[FormatTemplate], digits: &str) -> Option<String> {
    if digits.len() < MIN_LEADING_DIGITS {
        return None;
    }

    let candidates: Vec<&FormatTemplate> = templates
        .iter()
        .filter(|t| t.accepts_prefix(digits))
        .collect();

    candidates
        .iter()
        .find_map(|t| t.format_complete(digits))
        .or_else(|| candidates.iter().find_map(|t| t.fill_template(digits)))
}

/// Replacement may only reference groups and insert punctuation.
fn is_eligible_replacement(replacement: &str) -> bool {
    let mut chars = replacement.chars();
    let mut has_group = false;
    while let Some(c) = chars.next() {
        if c == '$' {
            match chars.next() {
                Some(d) if d.is_ascii_digit() => has_group = true,
                _ => return false,
            }
        } else if c.is_alphanumeric() {
            return false;
        }
    }
    has_group
}

/// Metadata patterns are written free-spacing, with line breaks and
/// indentation that carry no meaning.
fn compact(pattern: &str) -> String {
    pattern.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}

/// Drop a `^(?:...)$` wrapper if the metadata pattern carries one.
fn strip_anchors(pattern: &str) -> &str {
    pattern
        .strip_prefix("^(?:")
        .and_then(|p| p.strip_suffix(")$"))
        .unwrap_or(pattern)
}

/// Widen a pattern so it accepts any digit where it expects a specific one:
/// character classes become `\d`, and literal digits outside `{m,n}`
/// quantifiers become `\d`.
fn widen_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars();
    let mut in_quantifier = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                out.extend(chars.next());
            }
            '[' => {
                // Skip to the closing bracket; metadata classes are never nested.
                for inner in chars.by_ref() {
                    if inner == ']' {
                        break;
                    }
                }
                out.push_str(r"\d");
            }
            '{' => {
                in_quantifier = true;
                out.push(c);
            }
            '}' => {
                in_quantifier = false;
                out.push(c);
            }
            d if d.is_ascii_digit() && !in_quantifier => out.push_str(r"\d"),
            _ => out.push(c),
        }
    }
    out
}

/// Derive the digit-slot template for a format, if its pattern accepts a
/// run of `9`s.
fn build_template(pattern: &str, replacement: &str) -> Option<String> {
    let widened = Regex::new(&widen_pattern(pattern)).ok()?;
    let found = widened.find(LONGEST_NATIONAL)?;
    if found.start() != 0 {
        return None;
    }

    let matched = found.as_str();
    let applied = widened.replace(matched, replacement);
    let template: String = applied
        .chars()
        .map(|c| if c == '9' { DIGIT_PLACEHOLDER } else { c })
        .collect();

    // Literal digits in the output would change the number.
    if template.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(template)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn us_like() -> Vec<FormatTemplate> {
        vec![
            FormatTemplate::compile(r"(\d{3})(\d{4})", "$1-$2", [r"[2-9]"]).unwrap(),
            FormatTemplate::compile(r"(\d{3})(\d{3})(\d{4})", "($1) $2-$3", [r"[2-9]"]).unwrap(),
        ]
    }

    #[test]
    fn test_widen_pattern() {
        assert_eq!(widen_pattern(r"([2-9]\d{2})(\d{4})"), r"(\d\d{2})(\d{4})");
        assert_eq!(widen_pattern(r"(1)(\d{3,4})"), r"(\d)(\d{3,4})");
    }

    #[test]
    fn test_strip_anchors() {
        assert_eq!(strip_anchors(r"^(?:(\d{3}))$"), r"(\d{3})");
        assert_eq!(strip_anchors(r"(\d{3})"), r"(\d{3})");
    }

    #[test]
    fn test_eligible_replacement() {
        assert!(is_eligible_replacement("$1 $2"));
        assert!(is_eligible_replacement("($1) $2-$3"));
        assert!(!is_eligible_replacement("8 $1"));
        assert!(!is_eligible_replacement("$NP $FG"));
        assert!(!is_eligible_replacement(" - "));
    }

    #[test]
    fn test_build_template() {
        let template = build_template(r"(\d{3})(\d{3})(\d{4})", "($1) $2-$3").unwrap();
        let slots = template.chars().filter(|&c| c == DIGIT_PLACEHOLDER).count();
        assert_eq!(slots, 10);
        assert!(template.starts_with('('));
    }

    #[test]
    fn test_compact() {
        assert_eq!(compact("\n            16|\n            [6-9]\n          "), "16|[6-9]");
        assert_eq!(compact(r"(\d{5})(\d{5})"), r"(\d{5})(\d{5})");
    }

    #[test]
    fn test_free_spacing_leading_digits() {
        let mobile = FormatTemplate::compile(
            r"(\d{5})(\d{5})",
            "$1 $2",
            ["\n            16|\n            [6-9]\n          "],
        )
        .unwrap();
        let templates = [mobile];

        assert_eq!(format_with(&templates, "98765").as_deref(), Some("98765"));
        assert_eq!(format_with(&templates, "987654").as_deref(), Some("98765 4"));
        assert_eq!(
            format_with(&templates, "9876543210").as_deref(),
            Some("98765 43210")
        );
        assert_eq!(format_with(&templates, "5876543210"), None);
    }

    #[test]
    fn test_free_spacing_pattern() {
        let spaced = FormatTemplate::compile("\n  (\\d{3})\n  (\\d{4})\n", "$1-$2", []).unwrap();
        assert_eq!(format_with(&[spaced], "5550123").as_deref(), Some("555-0123"));
    }

    #[test]
    fn test_inserts_separators() {
        let grouped = FormatTemplate::compile(r"(\d{3})(\d{4})", "$1-$2", []).unwrap();
        let whole = FormatTemplate::compile(r"(\d{6})", "$1", []).unwrap();
        assert!(grouped.inserts_separators());
        assert!(!whole.inserts_separators());
    }

    #[test]
    fn test_short_input_is_left_alone() {
        assert_eq!(format_with(&us_like(), "20"), None);
    }

    #[test]
    fn test_partial_input_uses_template() {
        assert_eq!(format_with(&us_like(), "202").as_deref(), Some("202"));
        assert_eq!(format_with(&us_like(), "2025").as_deref(), Some("202-5"));
        assert_eq!(format_with(&us_like(), "20255501").as_deref(), Some("(202) 555-01"));
    }

    #[test]
    fn test_complete_input_uses_real_format() {
        assert_eq!(format_with(&us_like(), "5550123").as_deref(), Some("555-0123"));
        assert_eq!(
            format_with(&us_like(), "2025550123").as_deref(),
            Some("(202) 555-0123")
        );
    }

    #[test]
    fn test_leading_digits_filter() {
        // No format accepts numbers starting with 0 or 1.
        assert_eq!(format_with(&us_like(), "0123456"), None);
    }

    #[test]
    fn test_too_long_input() {
        assert_eq!(format_with(&us_like(), "202555012345"), None);
    }
}
