//! Demo query compiler.
//!
//! A deliberately small lint pass standing in for a real compiler front end:
//! it only rejects constructs the editor can point at unambiguously. Error
//! ranges are byte offsets into the flattened query text, ready for the
//! session's one-shot overlay.

use core_buffer::SEPARATOR;
use core_highlight::overlay::CompileError;

/// Scan `text` and report every unterminated block comment or string
/// literal. Line comments hide everything to the end of their line.
pub fn check(text: &str) -> Vec<CompileError> {
    let mut errors = Vec::new();
    let len = text.len();
    let mut i = 0;
    while i < len {
        let rest = &text[i..];
        if rest.starts_with("//") {
            i = line_end(text, i);
        } else if rest.starts_with("/*") {
            match rest[2..].find("*/") {
                Some(rel) => i += 2 + rel + 2,
                None => {
                    errors.push(CompileError {
                        description: "unterminated block comment".to_string(),
                        start: i,
                        len: len - i,
                    });
                    break;
                }
            }
        } else if rest.starts_with('"') {
            let end = line_end(text, i);
            match text[i + 1..end].find('"') {
                Some(rel) => i += 1 + rel + 1,
                None => {
                    errors.push(CompileError {
                        description: "unterminated string literal".to_string(),
                        start: i,
                        len: end - i,
                    });
                    i = end;
                }
            }
        } else {
            i += 1;
            while i < len && !text.is_char_boundary(i) {
                i += 1;
            }
        }
    }
    errors
}

fn line_end(text: &str, from: usize) -> usize {
    match text[from..].find(SEPARATOR) {
        Some(rel) => from + rel,
        None => text.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_query_passes() {
        assert!(check("from x select x").is_empty());
        assert!(check("/* ok */ let y = \"s\"").is_empty());
        assert!(check("").is_empty());
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        let errors = check("let x /* oops");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].description, "unterminated block comment");
        assert_eq!(errors[0].start, 6);
        assert_eq!(errors[0].len, 7);
    }

    #[test]
    fn unterminated_string_stops_at_line_end() {
        let text = format!("let s = \"abc{}let t = 1", SEPARATOR);
        let errors = check(&text);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].description, "unterminated string literal");
        assert_eq!(errors[0].start, 8);
        assert_eq!(errors[0].len, 4);
    }

    #[test]
    fn line_comment_hides_openers() {
        assert!(check("// /* not an error").is_empty());
        let text = format!("// fine{}/* bad", SEPARATOR);
        let errors = check(&text);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].start, 9);
    }

    #[test]
    fn quote_inside_comment_is_ignored() {
        assert!(check("/* \" */").is_empty());
    }

    #[test]
    fn reports_multiple_strings() {
        let text = format!("\"a{SEPARATOR}\"b");
        let errors = check(&text);
        assert_eq!(errors.len(), 2);
    }
}
