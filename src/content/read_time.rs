//! Read-time estimation for writings

use crate::helpers::strip_html;

/// Count words in rendered HTML.
///
/// Latin runs count as one word each; every CJK ideograph counts as a word.
pub fn count_words(html: &str) -> usize {
    let text = strip_html(html);
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if is_cjk(c) {
            count += 1;
            in_word = false;
        } else if c.is_alphanumeric() || c == '\'' || c == '-' {
            if !in_word {
                in_word = true;
                count += 1;
            }
        } else {
            in_word = false;
        }
    }

    count
}

fn is_cjk(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c) || ('\u{3040}'..='\u{30FF}').contains(&c)
}

/// Minutes needed to read `words` at `words_per_minute`, rounded up, at least 1
pub fn minutes(words: usize, words_per_minute: usize) -> usize {
    words.div_ceil(words_per_minute.max(1)).max(1)
}

/// Display string such as `"4 min read"`
pub fn estimate(html: &str, words_per_minute: usize) -> String {
    format!("{} min read", minutes(count_words(html), words_per_minute))
}
