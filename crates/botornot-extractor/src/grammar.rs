//! Tokenizers for the text patterns the extractors recognise
//!
//! Every function here implements one grammar rule and documents it. They
//! are hand-written scanners rather than regular expressions so that match
//! boundaries (greedy vs. lazy, anchoring) are explicit and stable.

/// Honorifics allowed between a list marker and a name
const HONORIFICS: [&str; 3] = ["Professor", "Prof.", "Dr."];

/// URL rule:
///
/// ```text
/// url := ("http://" | "https://") [^ whitespace ")" ]+
/// ```
///
/// Leftmost, greedy, unanchored. A scheme with nothing after it is skipped.
pub fn scan_urls(text: &str) -> Vec<&str> {
    let mut urls = Vec::new();
    let mut cursor = 0;

    while let Some((offset, scheme_len)) = next_scheme(&text[cursor..]) {
        let start = cursor + offset;
        let body_start = start + scheme_len;
        let body_len = text[body_start..]
            .find(|c: char| c.is_whitespace() || c == ')')
            .unwrap_or(text.len() - body_start);

        if body_len > 0 {
            urls.push(&text[start..body_start + body_len]);
        }
        cursor = body_start + body_len;
    }

    urls
}

fn next_scheme(text: &str) -> Option<(usize, usize)> {
    let http = text.find("http://").map(|i| (i, "http://".len()));
    let https = text.find("https://").map(|i| (i, "https://".len()));
    match (http, https) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    }
}

/// List-marker rule:
///
/// ```text
/// marker := ws* digit+ "." (not followed by a digit)
/// ```
///
/// Returns the text after the `.`. `2.5 GW` is not a list item.
pub fn strip_list_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let rest = trimmed[digits..].strip_prefix('.')?;
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(rest)
}

/// Head of a numbered list item: the candidate name and what follows it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemHead<'a> {
    /// Capitalized name tokens, in order
    pub tokens: Vec<&'a str>,

    /// Rest of the line after the name, leading separators removed
    pub tail: &'a str,
}

impl ItemHead<'_> {
    /// Name tokens joined by single spaces
    pub fn name(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Numbered-item rule:
///
/// ```text
/// item      := marker ws* "**"? honorific? name tail
/// honorific := ("Professor" | "Prof." | "Dr.") ws+
/// name      := token ((" " | "\t")+ token)+          -- greedy, one line
/// token     := Upper (letter | "-" | "'")*           -- one lowercase letter
///                                                    -- at least, ends in a letter
/// ```
///
/// A token equal to one of `stop_words` (case-insensitive) ends the name, so
/// `1. Jane Smith Professor at MIT` yields `Jane Smith`. Fewer than two
/// tokens is not a match.
pub fn parse_numbered_item<'a>(line: &'a str, stop_words: &[String]) -> Option<ItemHead<'a>> {
    let rest = strip_list_marker(line)?.trim_start();
    let mut rest = rest.strip_prefix("**").unwrap_or(rest).trim_start();

    for honorific in HONORIFICS {
        if let Some(after) = rest.strip_prefix(honorific) {
            if after.starts_with(char::is_whitespace) {
                rest = after.trim_start();
                break;
            }
        }
    }

    let mut tokens = Vec::new();
    let mut cursor = rest;
    loop {
        let candidate = if tokens.is_empty() {
            cursor
        } else {
            let spaced = cursor.trim_start_matches(|c: char| c == ' ' || c == '\t');
            if spaced.len() == cursor.len() {
                break;
            }
            spaced
        };

        let mut len = candidate
            .find(|c: char| !(c.is_alphabetic() || c == '-' || c == '\''))
            .unwrap_or(candidate.len());
        while len > 0 && candidate[..len].ends_with(|c: char| c == '-' || c == '\'') {
            len -= 1;
        }

        let token = &candidate[..len];
        if !is_name_token(token) || is_stop_word(token, stop_words) {
            break;
        }
        tokens.push(token);
        cursor = &candidate[len..];
    }

    if tokens.len() < 2 {
        return None;
    }

    let tail = cursor.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '*' | '-' | '–' | '—' | ',' | ':' | '|')
    });
    Some(ItemHead { tokens, tail })
}

fn is_name_token(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_uppercase()
        && token.chars().any(char::is_lowercase)
        && token.chars().next_back().is_some_and(char::is_alphabetic)
}

fn is_stop_word(token: &str, stop_words: &[String]) -> bool {
    let lower = token.to_lowercase();
    stop_words.iter().any(|w| *w == lower)
}

/// Bullet rule:
///
/// ```text
/// bullet := ws* ("-" | "*" | "+" | "•" | "–") ws+ content
/// ```
///
/// Returns the content with markdown bold markers removed. `**Bold**` lines
/// are not bullets.
pub fn bullet_content(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let mut chars = trimmed.chars();
    let marker = chars.next()?;
    if !matches!(marker, '-' | '*' | '+' | '•' | '–') {
        return None;
    }

    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(strip_bold(rest))
}

/// Remove markdown `**` markers and surrounding whitespace
pub fn strip_bold(text: &str) -> String {
    text.replace("**", "").trim().to_string()
}

/// Word rule: maximal runs of alphanumerics and inner hyphens
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .map(|w| w.trim_matches('-'))
        .filter(|w| !w.is_empty())
}

/// Keyword rule: some word equals a keyword or one of its plurals (`s`,
/// or `ies` for a keyword ending in `y`), case-insensitively. `keywords`
/// must already be lowercase.
pub fn contains_keyword(text: &str, keywords: &[String]) -> bool {
    words(text).any(|word| {
        let word = word.to_lowercase();
        keywords.iter().any(|k| *k == word || is_plural_of(&word, k))
    })
}

fn is_plural_of(word: &str, keyword: &str) -> bool {
    if word.strip_suffix('s') == Some(keyword) {
        return true;
    }
    match (word.strip_suffix("ies"), keyword.strip_suffix('y')) {
        (Some(stem), Some(keyword_stem)) => !stem.is_empty() && stem == keyword_stem,
        _ => false,
    }
}

/// `at`-clause rule:
///
/// ```text
/// clause := (start | ws) "at" ws+ value
/// value  := [^ "," ";" "(" "|" ]+      -- trimmed, trailing "." removed
/// ```
///
/// Uses the first standalone lowercase `at` that is followed by a value.
pub fn at_clause(text: &str) -> Option<&str> {
    let mut search = 0;
    while let Some(pos) = text[search..].find("at") {
        let start = search + pos;
        let after = &text[start + 2..];
        let standalone = text[..start].is_empty() || text[..start].ends_with(char::is_whitespace);

        if standalone && after.starts_with(char::is_whitespace) {
            let value = after.trim_start();
            let end = value
                .find(|c: char| matches!(c, ',' | ';' | '(' | '|'))
                .unwrap_or(value.len());
            let value = value[..end].trim().trim_end_matches('.').trim_end();
            if !value.is_empty() {
                return Some(value);
            }
        }
        search = start + 2;
    }
    None
}

/// Phrase rule: `phrase` occurs in `haystack` case-insensitively with no
/// alphanumeric character directly before or after it.
pub fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let phrase = phrase.trim().to_lowercase();
    if phrase.is_empty() {
        return false;
    }

    let mut search = 0;
    while let Some(pos) = haystack[search..].find(&phrase) {
        let start = search + pos;
        let end = start + phrase.len();
        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        if !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric) {
            return true;
        }
        search = start + phrase.chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Gapped-phrase rule:
///
/// ```text
/// pattern := part ("..." part)*
/// ```
///
/// Every part occurs in `line`, case-insensitively and in order. A pattern
/// with a gap names a heading, so its first part must open the line once
/// leading `#`, `*` and whitespace are skipped. A pattern without a gap
/// matches anywhere. A pattern without text never matches.
pub fn matches_gapped_phrase(line: &str, pattern: &str) -> bool {
    let gapped = pattern.contains("...");
    let line = line
        .trim_start_matches(|c: char| c == '#' || c == '*' || c.is_whitespace())
        .to_lowercase();
    let mut cursor = 0;
    let mut matched_any = false;

    for part in pattern.split("...") {
        let part = part.trim().to_lowercase();
        if part.is_empty() {
            continue;
        }
        match line[cursor..].find(&part) {
            Some(pos) if gapped && !matched_any && pos > 0 => return false,
            Some(pos) => {
                cursor += pos + part.len();
                matched_any = true;
            }
            None => return false,
        }
    }
    matched_any
}

/// Search-term rule: ASCII letters only, every other character is a
/// separator, words joined with `+`. `None` when no letters remain.
pub fn search_terms(text: &str) -> Option<String> {
    let cleaned: String = text
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { c } else { ' ' })
        .collect();
    let terms: Vec<&str> = cleaned.split_whitespace().collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join("+"))
    }
}

/// Sentence rule: a sentence ends after `.`, `!` or `?` when the next
/// character is whitespace. The terminator stays with its sentence; blank
/// pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(_, next)) = chars.peek() {
            if next.is_whitespace() {
                let end = i + c.len_utf8();
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}
