//! Bracket prettification for text renderings
//!
//! Nesting levels cycle through four bracket shapes, `( [ { <`, and every
//! fourth level the bracket pair is tagged with the level count in superscript
//! digits, so deep trees stay readable:
//!
//! ```text
//! [[[[[a]]]]]  ->  ([{<¹(a)¹>}])
//! ```

const OPEN_BRACKETS: [char; 4] = ['(', '[', '{', '<'];
const CLOSE_BRACKETS: [char; 4] = [')', ']', '}', '>'];
const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Rewrite `[`/`]` into depth-cycling bracket glyphs.
///
/// A closing bracket with no matching opener is left untouched.
pub fn prettify_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '[' => {
                let shape = depth % OPEN_BRACKETS.len();
                if depth > 0 && shape == 0 {
                    out.push_str(&superscript(depth / OPEN_BRACKETS.len()));
                }
                out.push(OPEN_BRACKETS[shape]);
                depth += 1;
            }
            ']' if depth == 0 => {
                log::warn!("unbalanced closing bracket in rendered tree");
                out.push(c);
            }
            ']' => {
                depth -= 1;
                let shape = depth % CLOSE_BRACKETS.len();
                out.push(CLOSE_BRACKETS[shape]);
                if depth > 0 && shape == 0 {
                    out.push_str(&superscript(depth / CLOSE_BRACKETS.len()));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Decimal digits of `value` in superscript; zero renders as nothing.
fn superscript(mut value: usize) -> String {
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(SUPERSCRIPT_DIGITS[value % 10]);
        value /= 10;
    }
    digits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_cycle() {
        assert_eq!(prettify_brackets("[a [b [c [d]]]]"), "(a [b {c <d>}])");
        assert_eq!(prettify_brackets("[a] [b]"), "(a) (b)");
    }

    #[test]
    fn test_fifth_level_is_numbered() {
        assert_eq!(prettify_brackets("[[[[[a]]]]]"), "([{<¹(a)¹>}])");
    }

    #[test]
    fn test_deep_numbering() {
        let depth = 9;
        let text = format!("{}x{}", "[".repeat(depth), "]".repeat(depth));
        assert_eq!(prettify_brackets(&text), "([{<¹([{<²(x)²>}])¹>}])");
    }

    #[test]
    fn test_superscript() {
        assert_eq!(superscript(0), "");
        assert_eq!(superscript(1), "¹");
        assert_eq!(superscript(10), "¹⁰");
        assert_eq!(superscript(407), "⁴⁰⁷");
    }

    #[test]
    fn test_text_without_brackets_unchanged() {
        assert_eq!(prettify_brackets("klama"), "klama");
        assert_eq!(prettify_brackets(""), "");
    }

    #[test]
    fn test_unbalanced_close_passes_through() {
        assert_eq!(prettify_brackets("a]b[c]"), "a]b(c)");
    }
}
