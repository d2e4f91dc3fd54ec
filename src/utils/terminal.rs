//! Display sanitisation for file names
//!
//! File names are arbitrary bytes from the filesystem. A name holding ANSI escape
//! sequences or control characters (newlines included) would corrupt the list view,
//! so every name goes through [`sanitize_display_name`] before it is drawn.

/// Strips ANSI CSI sequences and replaces other control characters with `?`
///
/// # Examples
///
/// ```
/// use filey::utils::terminal::sanitize_display_name;
///
/// assert_eq!(sanitize_display_name("\x1b[31mred\x1b[0m.txt"), "red.txt");
/// assert_eq!(sanitize_display_name("two\nlines"), "two?lines");
/// ```
pub fn sanitize_display_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // CSI sequences end at the first letter
            while let Some(next_ch) = chars.next() {
                if next_ch.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }

        if ch.is_control() {
            result.push('?');
        } else {
            result.push(ch);
        }
    }

    result
}
