//! Bundle minification seam.

/// Shrinks a generated bundle.
///
/// Real JavaScript minifiers live outside this workspace; implement this
/// trait to plug one in.
pub trait Minifier: Send + Sync {
    /// Minify the bundle text.
    fn minify(&self, source: &str) -> String;
}

/// Trims every line and drops blank ones.
///
/// Line breaks are kept, so automatic semicolon insertion still sees the
/// same statements. Text inside string and template literals is copied
/// unchanged, including its indentation and blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceMinifier;

impl Minifier for WhitespaceMinifier {
    fn minify(&self, source: &str) -> String {
        let mut scanner = Scanner::default();
        let mut lines = Vec::new();
        for line in source.split('\n') {
            let starts_in_literal = scanner.in_literal();
            scanner.scan_line(line);
            let ends_in_literal = scanner.in_literal();

            let mut text = line;
            if !starts_in_literal {
                text = text.trim_start();
            }
            if !ends_in_literal {
                text = text.trim_end();
            }
            if text.is_empty() && !starts_in_literal && !ends_in_literal {
                continue;
            }
            lines.push(text);
        }
        lines.join("\n")
    }
}

/// Lexical state carried from one line to the next.
#[derive(Debug, Default)]
struct Scanner {
    quote: Option<char>,
    block_comment: bool,
}

impl Scanner {
    fn in_literal(&self) -> bool {
        self.quote.is_some()
    }

    fn scan_line(&mut self, line: &str) {
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            if self.block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    self.block_comment = false;
                }
                continue;
            }
            match self.quote {
                Some(quote) => {
                    if c == '\\' {
                        chars.next();
                    } else if c == quote {
                        self.quote = None;
                    }
                }
                None => match c {
                    '"' | '\'' | '`' => self.quote = Some(c),
                    '/' if chars.peek() == Some(&'/') => return,
                    '/' if chars.peek() == Some(&'*') => {
                        chars.next();
                        self.block_comment = true;
                    }
                    _ => {}
                },
            }
        }
        // Plain quotes end with the line unless escaped.
        if matches!(self.quote, Some('"' | '\'')) && !line.ends_with('\\') {
            self.quote = None;
        }
    }
}

impl<F> Minifier for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn minify(&self, source: &str) -> String {
        self(source)
    }
}
