use sqlparser::tokenizer::{Location, Span};

/// Keywords that end a `WHERE` clause when met outside parentheses.
const CLAUSE_TERMINATORS: &[&str] = &[
    "group",
    "having",
    "window",
    "qualify",
    "order",
    "limit",
    "offset",
    "fetch",
    "for",
    "lock",
    "union",
    "except",
    "intersect",
    "minus",
    "returning",
];

/// Character-indexed view of a SQL text, used to map parser spans back to
/// offsets and original fragments.
///
/// Parser locations are 1-based `(line, column)` pairs counted in characters;
/// offsets handed out by this type are 0-based character offsets.
#[derive(Debug, Clone)]
pub struct SourceMap {
    chars: Vec<char>,
    line_starts: Vec<usize>,
    backslash_escapes: bool,
}

impl SourceMap {
    /// Index `sql`.
    pub fn new(sql: &str) -> Self {
        let chars: Vec<char> = sql.chars().collect();
        let mut line_starts = vec![0];
        for (idx, ch) in chars.iter().enumerate() {
            if *ch == '\n' {
                line_starts.push(idx + 1);
            }
        }
        Self {
            chars,
            line_starts,
            backslash_escapes: false,
        }
    }

    /// Treat `\` inside string literals as an escape of the next character, as MySQL does.
    pub fn with_backslash_escapes(mut self, enabled: bool) -> Self {
        self.backslash_escapes = enabled;
        self
    }

    /// Character offset of a parser location, or `None` for an empty or out-of-range location.
    pub fn offset(&self, location: Location) -> Option<usize> {
        if location.line == 0 || location.column == 0 {
            return None;
        }
        let line = usize::try_from(location.line - 1).ok()?;
        let column = usize::try_from(location.column - 1).ok()?;
        let offset = self.line_starts.get(line)? + column;
        (offset <= self.chars.len()).then_some(offset)
    }

    /// Text between two character offsets.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Recover the original text of a `WHERE` clause from the span of its condition.
    ///
    /// The clause starts at the first non-whitespace character after the
    /// `WHERE` keyword, which catches a leading `NOT`, sign or parenthesis the
    /// condition span leaves out. It ends at the next clause keyword, statement
    /// terminator, comment or unbalanced `)` found after the span, with trailing
    /// whitespace dropped.
    ///
    /// Returns the start offset and the text, or `None` when the span cannot be
    /// mapped onto the text.
    pub fn where_clause(&self, span: Span) -> Option<(usize, String)> {
        let start = self.offset(span.start)?;
        let end = self.offset(span.end)?;
        if end <= start {
            return None;
        }

        let clause_start = self.clause_start(start);
        let depth = self.paren_depth(clause_start, end);
        let clause_end = self.clause_end(end, depth);
        let text = self.slice(clause_start, clause_end);
        let text = text.trim_end();
        if text.is_empty() {
            return None;
        }
        Some((clause_start, text.to_string()))
    }

    fn clause_start(&self, condition_start: usize) -> usize {
        let Some(keyword_end) = self.last_where_keyword_end(condition_start) else {
            return condition_start;
        };

        let between: String = self.chars[keyword_end..condition_start].iter().collect();
        let only_prefix_tokens = between
            .split(|c: char| c.is_whitespace() || matches!(c, '(' | '-' | '+' | '~' | '!'))
            .all(|word| word.is_empty() || word.eq_ignore_ascii_case("not"));
        if !only_prefix_tokens {
            return condition_start;
        }

        (keyword_end..condition_start)
            .find(|idx| !self.chars[*idx].is_whitespace())
            .unwrap_or(condition_start)
    }

    fn last_where_keyword_end(&self, before: usize) -> Option<usize> {
        const KEYWORD: &str = "where";
        let len = KEYWORD.len();
        if before < len {
            return None;
        }
        (0..=before - len).rev().find_map(|idx| {
            let word_matches = self.chars[idx..idx + len]
                .iter()
                .zip(KEYWORD.chars())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b));
            let bounded_left = idx == 0 || !is_word_char(self.chars[idx - 1]);
            let bounded_right = self.chars.get(idx + len).is_none_or(|c| !is_word_char(*c));
            (word_matches && bounded_left && bounded_right).then_some(idx + len)
        })
    }

    /// Index just past the quoted section opened at `open`, or the end of the text.
    fn quoted_end(&self, open: usize) -> usize {
        let quote = self.chars[open];
        let escapes = self.backslash_escapes && quote != '`';
        let mut idx = open + 1;
        while idx < self.chars.len() {
            match self.chars[idx] {
                '\\' if escapes => idx += 2,
                c if c == quote => return idx + 1,
                _ => idx += 1,
            }
        }
        self.chars.len()
    }

    fn paren_depth(&self, start: usize, end: usize) -> usize {
        let mut depth = 0usize;
        let mut idx = start;
        while idx < end {
            match self.chars[idx] {
                '\'' | '"' | '`' => {
                    idx = self.quoted_end(idx);
                    continue;
                }
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
            idx += 1;
        }
        depth
    }

    fn clause_end(&self, from: usize, mut depth: usize) -> usize {
        let mut idx = from;
        while idx < self.chars.len() {
            let ch = self.chars[idx];
            match ch {
                '\'' | '"' | '`' => {
                    idx = self.quoted_end(idx);
                    continue;
                }
                '(' => depth += 1,
                ')' if depth == 0 => return idx,
                ')' => depth -= 1,
                ';' | '#' if depth == 0 => return idx,
                '-' if depth == 0 && self.chars.get(idx + 1) == Some(&'-') => return idx,
                '/' if depth == 0 && self.chars.get(idx + 1) == Some(&'*') => return idx,
                c if depth == 0 && is_word_char(c) && (idx == 0 || !is_word_char(self.chars[idx - 1])) => {
                    let word_end = (idx..self.chars.len())
                        .find(|i| !is_word_char(self.chars[*i]))
                        .unwrap_or(self.chars.len());
                    let word: String = self.chars[idx..word_end].iter().collect();
                    if CLAUSE_TERMINATORS
                        .iter()
                        .any(|kw| word.eq_ignore_ascii_case(kw))
                    {
                        return idx;
                    }
                    idx = word_end;
                    continue;
                }
                _ => {}
            }
            idx += 1;
        }
        idx
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
