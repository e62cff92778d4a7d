//! Just enough of the server-side filter language for the fake to be useful.
//!
//! Supported: `Selector == "value"`, `Selector != "value"`, clauses joined
//! with `and`. Values may be quoted strings or bare words (numbers, bools).
//! Selectors address top-level fields by their wire name (`JobID`, `Status`).

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Quoted(String),
    Eq,
    Ne,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Clause {
    selector: String,
    negate: bool,
    value: String,
}

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub(crate) fn parse(expr: &str) -> Result<Self, String> {
        let tokens = tokenize(expr)?;
        let mut clauses = Vec::new();
        let mut iter = tokens.into_iter().peekable();

        loop {
            let selector = match iter.next() {
                Some(Token::Word(w)) => w,
                Some(other) => return Err(format!("expected selector, found {other:?}")),
                None => return Err("unexpected end of expression".to_string()),
            };
            let negate = match iter.next() {
                Some(Token::Eq) => false,
                Some(Token::Ne) => true,
                Some(other) => return Err(format!("expected == or !=, found {other:?}")),
                None => return Err(format!("missing operator after {selector:?}")),
            };
            let value = match iter.next() {
                Some(Token::Quoted(v)) | Some(Token::Word(v)) => v,
                Some(other) => return Err(format!("expected value, found {other:?}")),
                None => return Err(format!("missing value for {selector:?}")),
            };
            clauses.push(Clause {
                selector,
                negate,
                value,
            });

            match iter.next() {
                None => break,
                Some(Token::Word(w)) if w == "and" => continue,
                Some(other) => return Err(format!("expected 'and', found {other:?}")),
            }
        }

        Ok(Self { clauses })
    }

    /// Evaluate against a JSON object; missing selectors never match.
    pub(crate) fn matches(&self, record: &Value) -> bool {
        self.clauses.iter().all(|clause| {
            let actual = match record.get(&clause.selector) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => return false,
                Some(other) => other.to_string(),
            };
            (actual == clause.value) != clause.negate
        })
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '"' => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some('\\') => match chars.next() {
                            Some(escaped) => value.push(escaped),
                            None => return Err("unterminated escape".to_string()),
                        },
                        Some('"') => break,
                        Some(ch) => value.push(ch),
                        None => return Err("unterminated string".to_string()),
                    }
                }
                tokens.push(Token::Quoted(value));
            }
            '=' | '!' => {
                chars.next();
                if chars.next() != Some('=') {
                    return Err(format!("invalid operator starting with {c:?}"));
                }
                tokens.push(if c == '=' { Token::Eq } else { Token::Ne });
            }
            _ => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() || ch == '=' || ch == '!' || ch == '"' {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
        }
    }

    Ok(tokens)
}
