//! Foldable-region discovery.
//!
//! The sidebar treats region discovery as a pure function from buffer text to
//! a list of regions. [`FoldParser`] is that seam; [`IndentParser`] is the
//! implementation used for Python-like, indentation-structured sources.
//! Files that are not Python get [`NoFolding`] through [`parser_for`].

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::region::{Region, RegionKind};

/// Result of asking a parser for foldable regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Regions found in the content, in discovery order.
    Regions(Vec<Region>),
    /// The content could not be parsed; the reason is for logs only.
    Failure(String),
}

/// Discovers foldable regions in buffer content.
pub trait FoldParser: Send {
    fn find_foldable_regions(&self, content: &str) -> ParseOutcome;
}

impl<F> FoldParser for F
where
    F: Fn(&str) -> ParseOutcome + Send,
{
    fn find_foldable_regions(&self, content: &str) -> ParseOutcome {
        self(content)
    }
}

/// File extensions treated as Python source.
const PYTHON_EXTENSIONS: &[&str] = &["py", "pyw", "pyi"];

/// Parser for files that never fold.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFolding;

impl FoldParser for NoFolding {
    fn find_foldable_regions(&self, _content: &str) -> ParseOutcome {
        ParseOutcome::Regions(Vec::new())
    }
}

/// Returns true if a document saved at `path` should be searched for regions.
///
/// Unsaved documents count as Python. Saved ones need a Python extension or a
/// `#!` first line that mentions python.
pub fn is_python_source(path: Option<&Path>, first_line: &str) -> bool {
    let Some(path) = path else {
        return true;
    };
    let has_python_ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| PYTHON_EXTENSIONS.iter().any(|py| ext.eq_ignore_ascii_case(py)));
    has_python_ext || (first_line.starts_with("#!") && first_line.contains("python"))
}

/// Chooses the region parser for a document.
pub fn parser_for(path: Option<&Path>, first_line: &str) -> Box<dyn FoldParser> {
    if is_python_source(path, first_line) {
        Box::new(IndentParser::new())
    } else {
        if let Some(path) = path {
            tracing::debug!("{} is not Python source, folding disabled", path.display());
        }
        Box::new(NoFolding)
    }
}

static FUNCTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:async\s+)?def\b").expect("valid regex"));
static CLASS_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^class\b").expect("valid regex"));
static BLOCK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:async\s+)?(?:if|elif|else|for|while|with|try|except|finally|match|case)\b")
        .expect("valid regex")
});

/// Indentation-based region finder for Python-like sources.
///
/// A region starts at a compound-statement header (a statement ending in `:`)
/// and runs to the last line of the deepest-indented statement that follows
/// it, so trailing blank lines and comments are not folded.
#[derive(Debug, Clone, Copy)]
pub struct IndentParser {
    /// Column width a tab advances to.
    pub tab_width: usize,
}

impl Default for IndentParser {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentParser {
    pub fn new() -> Self {
        Self { tab_width: 8 }
    }
}

/// A logical statement: one or more physical lines joined by open brackets,
/// backslash continuations or triple-quoted strings.
#[derive(Debug)]
struct Statement {
    first_line: usize,
    last_line: usize,
    indent: usize,
    code: String,
}

/// An open header waiting for its body to end.
struct OpenHeader {
    start: usize,
    header_end: usize,
    indent: usize,
    kind: RegionKind,
}

impl FoldParser for IndentParser {
    fn find_foldable_regions(&self, content: &str) -> ParseOutcome {
        let statements = match split_statements(content, self.tab_width.max(1)) {
            Ok(statements) => statements,
            Err(reason) => return ParseOutcome::Failure(reason),
        };

        let mut regions = Vec::new();
        let mut open: Vec<OpenHeader> = Vec::new();
        let mut prev_end = 0;

        for stmt in &statements {
            while open.last().is_some_and(|h| h.indent >= stmt.indent) {
                if let Some(header) = open.pop() {
                    close_header(header, prev_end, &mut regions);
                }
            }
            if let Some(kind) = classify_header(&stmt.code) {
                open.push(OpenHeader {
                    start: stmt.first_line,
                    header_end: stmt.last_line,
                    indent: stmt.indent,
                    kind,
                });
            }
            prev_end = stmt.last_line;
        }
        while let Some(header) = open.pop() {
            close_header(header, prev_end, &mut regions);
        }

        regions.sort_by_key(|r| (r.start, r.end));
        ParseOutcome::Regions(regions)
    }
}

fn close_header(header: OpenHeader, body_end: usize, regions: &mut Vec<Region>) {
    if body_end > header.header_end {
        regions.push(Region::new(header.start, body_end, header.kind));
    }
}

fn classify_header(code: &str) -> Option<RegionKind> {
    let code = code.trim();
    if !code.ends_with(':') {
        return None;
    }
    if FUNCTION_HEADER.is_match(code) {
        Some(RegionKind::Function)
    } else if CLASS_HEADER.is_match(code) {
        Some(RegionKind::Class)
    } else if BLOCK_HEADER.is_match(code) {
        Some(RegionKind::Block)
    } else {
        None
    }
}

fn indent_width(line: &str, tab_width: usize) -> usize {
    let mut col = 0;
    for ch in line.chars() {
        match ch {
            ' ' => col += 1,
            '\t' => col = (col / tab_width + 1) * tab_width,
            _ => break,
        }
    }
    col
}

/// Lexer state carried between physical lines.
#[derive(Default)]
struct LexState {
    depth: usize,
    /// Quote character of an open triple-quoted string and the line it opened on.
    triple: Option<(char, usize)>,
}

/// Splits content into statements, skipping blank and comment-only lines.
///
/// Code inside string literals and comments is dropped from `Statement::code`
/// so that headers can be recognised by a trailing `:`.
fn split_statements(content: &str, tab_width: usize) -> Result<Vec<Statement>, String> {
    let mut statements = Vec::new();
    let mut state = LexState::default();
    let mut current: Option<Statement> = None;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let continuing = current.is_some();
        let mut code = String::new();
        let backslash = lex_line(line, line_no, &mut state, &mut code)?;

        if !continuing && code.trim().is_empty() && state.triple.is_none() {
            continue;
        }

        let stmt = current.get_or_insert_with(|| Statement {
            first_line: line_no,
            last_line: line_no,
            indent: indent_width(line, tab_width),
            code: String::new(),
        });
        stmt.last_line = line_no;
        stmt.code.push_str(&code);
        stmt.code.push(' ');

        if state.depth == 0 && state.triple.is_none() && !backslash {
            if let Some(done) = current.take() {
                statements.push(done);
            }
        }
    }

    if let Some((_, opened)) = state.triple {
        return Err(format!("unterminated triple-quoted string opened on line {opened}"));
    }
    if let Some(done) = current.take() {
        statements.push(done);
    }
    Ok(statements)
}

/// Lexes one physical line, appending code outside strings/comments to `code`.
///
/// Returns whether the line ends with a backslash continuation.
fn lex_line(
    line: &str,
    line_no: usize,
    state: &mut LexState,
    code: &mut String,
) -> Result<bool, String> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if let Some((quote, _)) = state.triple {
            if chars[i] == '\\' {
                i += 2;
                continue;
            }
            if is_triple(&chars, i, quote) {
                state.triple = None;
                i += 3;
            } else {
                i += 1;
            }
            continue;
        }

        let ch = chars[i];
        match ch {
            '#' => break,
            '"' | '\'' => {
                if is_triple(&chars, i, ch) {
                    state.triple = Some((ch, line_no));
                    i += 3;
                    continue;
                }
                // Single-line string literal: skip to the matching quote.
                i += 1;
                while i < chars.len() && chars[i] != ch {
                    if chars[i] == '\\' {
                        i += 1;
                    }
                    i += 1;
                }
                i += 1;
                code.push_str("''");
                continue;
            }
            '(' | '[' | '{' => state.depth += 1,
            ')' | ']' | '}' => {
                if state.depth == 0 {
                    return Err(format!("unbalanced '{ch}' on line {line_no}"));
                }
                state.depth -= 1;
            }
            _ => {}
        }
        code.push(ch);
        i += 1;
    }

    Ok(state.triple.is_none() && line.trim_end().ends_with('\\') && !line.contains('#'))
}

fn is_triple(chars: &[char], i: usize, quote: char) -> bool {
    i + 2 < chars.len() && chars[i] == quote && chars[i + 1] == quote && chars[i + 2] == quote
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_python_source_by_extension() {
        for name in ["app.py", "gui.pyw", "stubs.pyi", "UPPER.PY"] {
            assert!(is_python_source(Some(Path::new(name)), ""), "{name}");
        }
        assert!(!is_python_source(Some(Path::new("notes.txt")), ""));
        assert!(!is_python_source(Some(Path::new("py")), ""));
    }

    #[test]
    fn test_python_source_by_shebang() {
        let script = Path::new("bin/tool");
        assert!(is_python_source(Some(script), "#!/usr/bin/env python3"));
        assert!(!is_python_source(Some(script), "#!/bin/sh"));
        assert!(!is_python_source(Some(script), "# python notes"));
        assert!(is_python_source(None, "anything"));
    }

    #[test]
    fn test_parser_for_plain_text_finds_nothing() {
        let text = "if x:\n    y\nelse:\n    z\n";
        let txt = parser_for(Some(Path::new("notes.txt")), "if x:");
        assert_eq!(txt.find_foldable_regions(text), ParseOutcome::Regions(Vec::new()));

        let py = parser_for(Some(Path::new("notes.py")), "if x:");
        assert_eq!(
            py.find_foldable_regions(text),
            ParseOutcome::Regions(vec![
                Region::new(1, 2, RegionKind::Block),
                Region::new(3, 4, RegionKind::Block),
            ])
        );
    }

    fn regions(src: &str) -> Vec<Region> {
        match IndentParser::new().find_foldable_regions(src) {
            ParseOutcome::Regions(r) => r,
            ParseOutcome::Failure(reason) => panic!("unexpected failure: {reason}"),
        }
    }

    #[test]
    fn test_function_region() {
        let src = "import os\n\ndef main():\n    x = 1\n    return x\n";
        assert_eq!(regions(src), vec![Region::new(3, 5, RegionKind::Function)]);
    }

    #[test]
    fn test_class_with_methods() {
        let src = "\
class Foo:
    def a(self):
        pass

    async def b(self):
        await x
        return 1

print(Foo)
";
        assert_eq!(
            regions(src),
            vec![
                Region::new(1, 7, RegionKind::Class),
                Region::new(2, 3, RegionKind::Function),
                Region::new(5, 7, RegionKind::Function),
            ]
        );
    }

    #[test]
    fn test_trailing_blank_and_comment_lines_not_folded() {
        let src = "def f():\n    return 1\n\n# trailing\n\nx = f()\n";
        assert_eq!(regions(src), vec![Region::new(1, 2, RegionKind::Function)]);
    }

    #[test]
    fn test_single_line_body_is_not_a_region() {
        assert!(regions("if x: return\ny = 2\n").is_empty());
    }

    #[test]
    fn test_block_kinds() {
        let src = "for i in range(3):\n    print(i)\nelse:\n    done()\n";
        assert_eq!(
            regions(src),
            vec![
                Region::new(1, 2, RegionKind::Block),
                Region::new(3, 4, RegionKind::Block),
            ]
        );
    }

    #[test]
    fn test_multiline_header() {
        let src = "def f(\n    a,\n    b,\n):\n    return a + b\n";
        assert_eq!(regions(src), vec![Region::new(1, 5, RegionKind::Function)]);
    }

    #[test]
    fn test_docstring_spanning_lines_stays_in_body() {
        let src = "def f():\n    \"\"\"Doc.\n\nmore\n    \"\"\"\n    return 1\nx = 1\n";
        assert_eq!(regions(src), vec![Region::new(1, 6, RegionKind::Function)]);
    }

    #[test]
    fn test_colon_inside_string_or_comment_ignored() {
        assert!(regions("x = 'if a:'\n    y\n").is_empty());
        assert!(regions("if_flag = 1  # else:\n    y\n").is_empty());
    }

    #[test]
    fn test_unterminated_docstring_is_failure() {
        let outcome = IndentParser::new().find_foldable_regions("def f():\n    \"\"\"oops\n");
        assert!(matches!(outcome, ParseOutcome::Failure(_)));
    }

    #[test]
    fn test_unbalanced_bracket_is_failure() {
        let outcome = IndentParser::new().find_foldable_regions("x = 1)\n");
        assert!(matches!(outcome, ParseOutcome::Failure(_)));
    }

    #[test]
    fn test_tabs_count_as_indentation() {
        let src = "def f():\n\treturn 1\n";
        assert_eq!(regions(src), vec![Region::new(1, 2, RegionKind::Function)]);
    }

    #[test]
    fn test_closure_parser() {
        let parser = |_: &str| ParseOutcome::Failure("nope".to_string());
        assert_eq!(
            parser.find_foldable_regions("anything"),
            ParseOutcome::Failure("nope".to_string())
        );
    }
}
