use thiserror::Error;

const SENTENCE_ENDINGS: [char; 3] = ['.', '?', '!'];

#[derive(Debug, Error)]
pub enum ChunkerConfigError {
    #[error("chunk_size must be positive")]
    ZeroChunkSize,
    #[error("overlap ({overlap}) must be smaller than chunk_size ({chunk_size})")]
    OverlapTooLarge { chunk_size: usize, overlap: usize },
}

/// Splits document text into overlapping, sentence-boundary-aware
/// segments. Pure; the same input always yields the same chunks.
#[derive(Clone, Debug)]
pub struct TextChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl TextChunker {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self, ChunkerConfigError> {
        if chunk_size == 0 {
            return Err(ChunkerConfigError::ZeroChunkSize);
        }
        if overlap >= chunk_size {
            return Err(ChunkerConfigError::OverlapTooLarge {
                chunk_size,
                overlap,
            });
        }
        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Walks the whitespace-normalized text with a sliding window of
    /// `chunk_size` characters, preferring to cut just after the nearest
    /// sentence terminator in the back half of the window, and stepping
    /// forward by `chunk_size - overlap` so adjacent chunks share context.
    pub fn chunk(&self, text: &str) -> Vec<String> {
        let normalized = normalize_whitespace(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        let chars: Vec<char> = normalized.chars().collect();
        let len = chars.len();
        let mut chunks = Vec::new();
        let mut start = 0usize;

        while start < len {
            let mut end = start + self.chunk_size;
            if end < len {
                if let Some(cut) = self.sentence_cut(&chars, start, end) {
                    end = cut;
                }
            }

            let piece: String = chars[start..end.min(len)].iter().collect();
            let piece = piece.trim();
            if !piece.is_empty() {
                chunks.push(piece.to_string());
            }

            if end >= len {
                break;
            }
            // overlap < chunk_size is enforced at construction, but a
            // sentence cut can still land inside the overlap region
            start = (end - self.overlap).max(start + 1);
        }

        chunks
    }

    /// Nearest position just after a sentence terminator followed by
    /// whitespace, scanning backward from the tentative window end.
    /// Cuts in the front half of the window are rejected so a run of
    /// short sentences cannot degenerate into tiny chunks.
    fn sentence_cut(&self, chars: &[char], start: usize, end: usize) -> Option<usize> {
        let floor = start + self.chunk_size / 2;
        let mut pos = end.saturating_sub(2);
        while pos > floor {
            if SENTENCE_ENDINGS.contains(&chars[pos]) && chars[pos + 1].is_whitespace() {
                return Some(pos + 1);
            }
            pos -= 1;
        }
        None
    }
}

/// Collapses every whitespace run (including newlines) to a single space
/// and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
