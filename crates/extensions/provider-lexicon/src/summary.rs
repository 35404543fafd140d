//! Lead-sentence summaries.

/// Split `text` into sentences and return the first `limit` of them.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or the end of
/// the text. Paragraph breaks also end a sentence.
pub fn lead_sentences(text: &str, limit: usize) -> Vec<String> {
    let mut sentences = Vec::new();
    for paragraph in text.split("\n\n") {
        let mut current = String::new();
        let mut chars = paragraph.chars().peekable();
        while let Some(c) = chars.next() {
            current.push(if c == '\n' { ' ' } else { c });
            let at_boundary = matches!(c, '.' | '!' | '?')
                && chars.peek().is_none_or(|next| next.is_whitespace());
            if at_boundary {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
            if sentences.len() >= limit {
                return sentences;
            }
        }
        push_sentence(&mut sentences, &current);
        if sentences.len() >= limit {
            break;
        }
    }
    sentences.truncate(limit);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let sentence = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}
