//! core::escape
//!
//! Escaping of free-text values for single-quoted command-line literals.

/// Escape a value so it can sit inside a single-quoted `-X 'key=value'`
/// linker argument.
///
/// Every `'` becomes `\'` and every `-` becomes `\-`. No other character is
/// touched.
///
/// # Example
///
/// ```
/// use buildstamp::core::escape::escape;
///
/// assert_eq!(escape("it's-a-test"), r"it\'s\-a\-test");
/// assert_eq!(escape("plain text"), "plain text");
/// ```
pub fn escape(text: &str) -> String {
    text.replace('\'', "\\'").replace('-', "\\-")
}
