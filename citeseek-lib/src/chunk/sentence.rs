use crate::chunk::{retain_substantial, Chunker};

/// Sentence-aware chunker - packs whole sentences into bounded passages
///
/// Good for: policy documents, prose with numbered section headers
///
/// Text is whitespace-normalized, split on runs of sentence-terminal
/// punctuation (`.`, `!`, `?`) with the punctuation kept attached to the
/// preceding sentence, then sentences are packed greedily into buffers of at
/// most `max_chunk_size` characters. A single sentence longer than the budget
/// is emitted whole rather than truncated mid-sentence.
///
/// A terminator run followed immediately by a digit does not end a sentence,
/// so a section marker like "1.1" stays attached to its body text. This
/// heuristic is imperfect on prose that legitimately ends a sentence right
/// before a number.
pub struct SentenceChunker {
    /// Soft upper bound on chunk length, in characters of normalized text
    pub max_chunk_size: usize,
}

impl SentenceChunker {
    /// Create a chunker with the given length budget.
    #[must_use]
    pub fn new(max_chunk_size: usize) -> Self {
        Self { max_chunk_size }
    }

    /// Collapse all whitespace runs to single spaces.
    ///
    /// Stands in for the original round-trip through the embedding model's
    /// tokenizer: both yield a canonical single-spaced form of the text, so
    /// chunk boundaries are stable regardless of source formatting.
    fn normalize(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Split normalized text into sentences, terminators attached.
    fn split_sentences(text: &str) -> Vec<&str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut iter = text.char_indices().peekable();

        while let Some((_, c)) = iter.next() {
            if !matches!(c, '.' | '!' | '?') {
                continue;
            }
            // Extend over the whole terminator run
            while let Some(&(_, next)) = iter.peek() {
                if matches!(next, '.' | '!' | '?') {
                    iter.next();
                } else {
                    break;
                }
            }
            let end = iter.peek().map_or(text.len(), |&(j, _)| j);
            // "1.1" is a section marker, not a sentence boundary
            let followed_by_digit = iter
                .peek()
                .is_some_and(|&(_, next)| next.is_ascii_digit());
            if !followed_by_digit {
                sentences.push(&text[start..end]);
                start = end;
            }
        }

        if start < text.len() {
            sentences.push(&text[start..]);
        }
        sentences
    }
}

impl Default for SentenceChunker {
    fn default() -> Self {
        Self::new(200)
    }
}

impl Chunker for SentenceChunker {
    fn name(&self) -> &'static str {
        "sentence"
    }

    fn chunk(&self, text: &str) -> Vec<String> {
        let normalized = Self::normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut buffer = String::new();

        for sentence in Self::split_sentences(&normalized) {
            let sentence = sentence.trim();
            if sentence.is_empty() {
                continue;
            }

            // +1 for the joining space
            let would_be = if buffer.is_empty() {
                sentence.len()
            } else {
                buffer.len() + 1 + sentence.len()
            };

            if would_be <= self.max_chunk_size {
                if !buffer.is_empty() {
                    buffer.push(' ');
                }
                buffer.push_str(sentence);
            } else {
                if !buffer.trim().is_empty() {
                    chunks.push(buffer.trim().to_string());
                }
                // An oversize sentence becomes a chunk of its own on the
                // next flush; it is never truncated.
                buffer = sentence.to_string();
            }
        }

        if !buffer.trim().is_empty() {
            chunks.push(buffer.trim().to_string());
        }

        retain_substantial(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::MIN_CHUNK_LEN;

    #[test]
    fn test_empty_input() {
        let chunker = SentenceChunker::default();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n\t ").is_empty());
    }

    #[test]
    fn test_short_fragments_dropped() {
        let chunker = SentenceChunker::default();
        // A lone heading is under the minimum retrievable length
        let chunks = chunker.chunk("3. Data Classification.");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_all_chunks_exceed_minimum() {
        let chunker = SentenceChunker::new(120);
        let text = "Company data is classified into three levels of sensitivity. \
                    Confidential data must never leave the internal network. \
                    Public data can be shared externally without approval. \
                    Access reviews are performed quarterly by the security team.";
        let chunks = chunker.chunk(text);

        assert!(!chunks.is_empty());
        for c in &chunks {
            assert!(c.trim().len() > MIN_CHUNK_LEN, "chunk too short: {c:?}");
        }
    }

    #[test]
    fn test_no_sentence_broken_mid_sentence() {
        let chunker = SentenceChunker::new(120);
        let text = "Company data is classified into three levels of sensitivity. \
                    Confidential data must never leave the internal network. \
                    Public data can be shared externally without approval.";
        let chunks = chunker.chunk(text);

        for c in &chunks {
            // The source text ends every sentence with a terminator, so
            // every chunk must end on one too.
            assert!(
                c.ends_with('.') || c.ends_with('!') || c.ends_with('?'),
                "chunk does not end on a sentence boundary: {c:?}"
            );
        }
    }

    #[test]
    fn test_respects_size_budget() {
        let chunker = SentenceChunker::new(150);
        let text = "The retention schedule applies to all records held by the company. \
                    Backups are verified weekly by the infrastructure team on rotation. \
                    Restores are tested against the staging environment every month. \
                    Expired records are destroyed according to the disposal procedure.";
        let chunks = chunker.chunk(text);

        assert!(chunks.len() > 1);
        for c in &chunks {
            assert!(c.len() <= 150, "chunk exceeds budget: {} chars", c.len());
        }
    }

    #[test]
    fn test_oversize_sentence_kept_whole() {
        let chunker = SentenceChunker::new(60);
        let text = "This single sentence is deliberately much longer than the configured \
                    chunk budget and must still come out in one piece.";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].len() > 60);
        assert!(chunks[0].ends_with("one piece."));
    }

    #[test]
    fn test_section_marker_not_split() {
        let chunker = SentenceChunker::new(200);
        let text = "1.1 Public data can be shared externally without prior approval from anyone.";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].starts_with("1.1 Public data"));
    }

    #[test]
    fn test_sentence_split_keeps_terminators() {
        let sentences =
            SentenceChunker::split_sentences("First point. Second point! Third point?");
        assert_eq!(
            sentences,
            vec!["First point.", " Second point!", " Third point?"]
        );
    }

    #[test]
    fn test_whitespace_normalized() {
        let chunker = SentenceChunker::new(200);
        let text = "Company   data\nis classified\t\tinto three levels of sensitivity for handling.";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 1);
        assert!(!chunks[0].contains("  "));
        assert!(!chunks[0].contains('\n'));
    }
}
