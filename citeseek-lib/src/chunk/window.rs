use crate::chunk::{retain_substantial, Chunker};

/// Fixed-size window chunker - slides over whitespace-delimited words
///
/// Good for: baseline experiments, uniformly sized passages
///
/// No sentence awareness; adjacent windows share `overlap` words so that
/// content cut at a window edge still appears whole in a neighbor.
pub struct WindowChunker {
    /// Window size in words
    pub window: usize,
    /// Words shared between adjacent windows (must be < window)
    pub overlap: usize,
}

impl WindowChunker {
    #[must_use]
    pub fn new(window: usize, overlap: usize) -> Self {
        Self { window, overlap }
    }
}

impl Default for WindowChunker {
    fn default() -> Self {
        Self::new(40, 8)
    }
}

impl Chunker for WindowChunker {
    fn name(&self) -> &'static str {
        "window"
    }

    fn chunk(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() || self.window == 0 {
            return Vec::new();
        }

        let stride = self.window.saturating_sub(self.overlap).max(1);

        let mut chunks = Vec::new();
        let mut start = 0;
        while start < words.len() {
            let end = (start + self.window).min(words.len());
            chunks.push(words[start..end].join(" "));
            if end == words.len() {
                break;
            }
            start += stride;
        }

        retain_substantial(chunks)
    }
}
