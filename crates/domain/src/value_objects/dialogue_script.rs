//! Dialogue script tokenizer
//!
//! Conversation text is written in a small line-oriented script language:
//!
//! - Leading tabs indent a line (nesting in the conversation tree)
//! - `- text` starts a response option the player can pick
//! - `{name}` is a substitution tag resolved by the game
//! - `\command` or `\command(arg, "text", 3)` triggers a game command
//!
//! Tokenizing never fails. Anything that does not form a valid construct is
//! plain text, so every input round-trips through [`reconstruct`].
//!
//! # Example
//!
//! ```
//! use loreforge_domain::{reconstruct, tokenize, TokenKind};
//!
//! let script = "\t- Hello {playerName}!";
//! let tokens = tokenize(script);
//!
//! assert_eq!(tokens[0].kind, TokenKind::Indent);
//! assert_eq!(tokens[1].kind, TokenKind::ResponseOption);
//! assert_eq!(reconstruct(&tokens), script);
//! ```
//!
//! [`reconstruct`]: super::dialogue_token::reconstruct

use super::dialogue_token::{ParamKind, Token, TokenKind};

const RESPONSE_MARKER: &str = "- ";

/// Split `input` into lines and tokenize each one.
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut offset = 0;

    while offset < input.len() {
        let line_end = input[offset..]
            .find(|c: char| c == '\n' || c == '\r')
            .map(|i| offset + i)
            .unwrap_or(input.len());

        tokenize_line(&input[offset..line_end], offset, &mut tokens);

        if line_end == input.len() {
            break;
        }

        let terminator_len = if bytes[line_end] == b'\r' && bytes.get(line_end + 1) == Some(&b'\n')
        {
            2
        } else {
            1
        };
        let terminator_end = line_end + terminator_len;
        tokens.push(Token::leaf(
            TokenKind::LineBreak,
            &input[line_end..terminator_end],
            line_end,
        ));
        offset = terminator_end;
    }

    tokens
}

fn tokenize_line(line: &str, base: usize, out: &mut Vec<Token>) {
    let indent_len = line.bytes().take_while(|b| *b == b'\t').count();
    if indent_len > 0 {
        out.push(Token::leaf(TokenKind::Indent, &line[..indent_len], base));
    }

    let rest = &line[indent_len..];
    let rest_base = base + indent_len;
    if rest.is_empty() {
        return;
    }

    match rest.strip_prefix(RESPONSE_MARKER) {
        Some(body) => {
            let mut children = vec![Token::leaf(
                TokenKind::Punctuation,
                RESPONSE_MARKER,
                rest_base,
            )];
            scan_inline(body, rest_base + RESPONSE_MARKER.len(), &mut children);
            out.push(Token::branch(
                TokenKind::ResponseOption,
                rest,
                rest_base,
                children,
            ));
        }
        None => scan_inline(rest, rest_base, out),
    }
}

/// Extract tags and commands from a run of text, leaving the rest as plain text.
///
/// All split points sit on ASCII delimiters, so slicing is always on a char boundary.
fn scan_inline(text: &str, base: usize, out: &mut Vec<Token>) {
    let bytes = text.as_bytes();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => match scan_command(text, i, base) {
                Some(command) => {
                    push_plain(text, plain_start, i, base, out);
                    i += command.len();
                    plain_start = i;
                    out.push(command);
                }
                // Broken command: the rest of the line stays plain text
                None => break,
            },
            b'{' => match find_byte(bytes, i + 1, b'}') {
                Some(close) if close > i + 1 => {
                    push_plain(text, plain_start, i, base, out);
                    out.push(Token::leaf(
                        TokenKind::CurlyTag,
                        &text[i..=close],
                        base + i,
                    ));
                    i = close + 1;
                    plain_start = i;
                }
                _ => i += 1,
            },
            _ => i += 1,
        }
    }

    push_plain(text, plain_start, bytes.len(), base, out);
}

fn push_plain(text: &str, from: usize, to: usize, base: usize, out: &mut Vec<Token>) {
    if from < to {
        out.push(Token::leaf(TokenKind::PlainText, &text[from..to], base + from));
    }
}

/// Match `\name` or `\name(args)` starting at the backslash at `at`.
///
/// Returns `None` when the backslash is not followed by a letter or when an
/// argument list is never closed.
fn scan_command(text: &str, at: usize, base: usize) -> Option<Token> {
    let bytes = text.as_bytes();
    let name_len = bytes[at + 1..]
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if name_len == 0 {
        return None;
    }

    let name_end = at + 1 + name_len;
    let name = Token::leaf(TokenKind::CommandName, &text[at..name_end], base + at);

    if bytes.get(name_end) != Some(&b'(') {
        return Some(Token::branch(
            TokenKind::Command,
            &text[at..name_end],
            base + at,
            vec![name],
        ));
    }

    let args_start = name_end + 1;
    let close = find_closing_paren(bytes, args_start)?;

    let mut children = vec![
        name,
        Token::leaf(TokenKind::Punctuation, "(", base + name_end),
    ];
    scan_args(&text[args_start..close], base + args_start, &mut children);
    children.push(Token::leaf(TokenKind::Punctuation, ")", base + close));

    Some(Token::branch(
        TokenKind::Command,
        &text[at..=close],
        base + at,
        children,
    ))
}

/// First `)` at or after `from` that is not inside a string literal.
fn find_closing_paren(bytes: &[u8], from: usize) -> Option<usize> {
    let mut in_string = false;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b')' if !in_string => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

fn scan_args(args: &str, base: usize, out: &mut Vec<Token>) {
    let bytes = args.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let kind = if is_separator(bytes[i]) {
            while i < bytes.len() && is_separator(bytes[i]) {
                i += 1;
            }
            TokenKind::Punctuation
        } else if bytes[i] == b'"' {
            i = string_literal_end(bytes, i);
            TokenKind::CommandParam(ParamKind::String)
        } else {
            while i < bytes.len() && !is_separator(bytes[i]) && bytes[i] != b'"' {
                i += 1;
            }
            classify_atom(&args[start..i])
        };
        out.push(Token::leaf(kind, &args[start..i], base + start));
    }
}

fn is_separator(b: u8) -> bool {
    b == b',' || b.is_ascii_whitespace()
}

/// Index just past the closing quote of the literal opening at `open`.
fn string_literal_end(bytes: &[u8], open: usize) -> usize {
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn classify_atom(atom: &str) -> TokenKind {
    if is_number(atom) {
        TokenKind::CommandParam(ParamKind::Number)
    } else if is_identifier(atom) {
        TokenKind::CommandParam(ParamKind::Variable)
    } else {
        TokenKind::PlainText
    }
}

fn is_number(atom: &str) -> bool {
    let digits = atom.strip_prefix('-').unwrap_or(atom);
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(whole) && fraction.map_or(true, all_digits)
}

fn is_identifier(atom: &str) -> bool {
    let mut bytes = atom.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        }
        _ => false,
    }
}

fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|b| *b == needle)
        .map(|i| from + i)
}
