use crate::chunk::{Chunk, estimate_tokens};

pub struct ChunkerConfig {
    pub chunk_token_size: usize,
    pub chunk_overlap_token_size: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            chunk_token_size: 1200,
            chunk_overlap_token_size: 100,
        }
    }
}

pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    pub fn new(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Split a document into token-bounded chunks with overlap carried
    /// between consecutive chunks. Paragraph boundaries are preferred;
    /// a single paragraph larger than the budget is split on words.
    pub fn chunk_document(&self, doc_id: &str, text: &str, file_path: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();

        for paragraph in split_paragraphs(text) {
            for piece in self.split_oversize(&paragraph) {
                let combined = estimate_tokens(&buffer) + estimate_tokens(&piece);
                if combined > self.config.chunk_token_size && !buffer.is_empty() {
                    let overlap = self.tail_overlap(&buffer);
                    self.push_chunk(&mut chunks, doc_id, file_path, std::mem::take(&mut buffer));
                    buffer = overlap;
                }
                if !buffer.is_empty() {
                    buffer.push_str("\n\n");
                }
                buffer.push_str(&piece);
            }
        }

        if !buffer.trim().is_empty() {
            self.push_chunk(&mut chunks, doc_id, file_path, buffer);
        }

        chunks
    }

    fn push_chunk(&self, chunks: &mut Vec<Chunk>, doc_id: &str, file_path: &str, text: String) {
        let index = chunks.len();
        chunks.push(Chunk::new(
            doc_id.to_string(),
            index,
            text,
            file_path.to_string(),
        ));
    }

    /// Break a paragraph that alone exceeds the budget into word windows.
    fn split_oversize(&self, paragraph: &str) -> Vec<String> {
        if estimate_tokens(paragraph) <= self.config.chunk_token_size {
            return vec![paragraph.to_string()];
        }

        let words: Vec<&str> = paragraph.split_whitespace().collect();
        let window = ((self.config.chunk_token_size as f64) / 1.3) as usize;
        let window = window.max(1);

        words
            .chunks(window)
            .map(|w| w.join(" "))
            .collect()
    }

    /// Last `chunk_overlap_token_size` tokens of the flushed buffer,
    /// carried into the next chunk.
    fn tail_overlap(&self, text: &str) -> String {
        if self.config.chunk_overlap_token_size == 0 {
            return String::new();
        }
        let words: Vec<&str> = text.split_whitespace().collect();
        let keep = ((self.config.chunk_overlap_token_size as f64) / 1.3) as usize;
        if words.len() <= keep {
            return text.to_string();
        }
        words[words.len() - keep..].join(" ")
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("w{}", i)).collect::<Vec<_>>().join(" ")
    }

    fn config(size: usize, overlap: usize) -> ChunkerConfig {
        ChunkerConfig {
            chunk_token_size: size,
            chunk_overlap_token_size: overlap,
        }
    }

    #[test]
    fn short_text_is_one_chunk() {
        let chunker = Chunker::new(ChunkerConfig::default());
        let chunks = chunker.chunk_document("doc", "First paragraph.\n\nSecond one.", "doc.json");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].index, 0);
        assert!(chunks[0].text.contains("Second one."));
    }

    #[test]
    fn long_text_respects_token_budget() {
        let chunker = Chunker::new(config(100, 10));
        let text = format!("{}\n\n{}\n\n{}", words(60), words(60), words(60));
        let chunks = chunker.chunk_document("doc", &text, "doc.json");

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(
                chunk.estimated_tokens() <= 120,
                "chunk of {} tokens exceeds budget",
                chunk.estimated_tokens()
            );
        }
    }

    #[test]
    fn consecutive_chunks_overlap() {
        let chunker = Chunker::new(config(100, 20));
        let text = format!("{}\n\n{}", words(70), words(70));
        let chunks = chunker.chunk_document("doc", &text, "doc.json");

        assert_eq!(chunks.len(), 2);
        let first_tail: Vec<&str> = chunks[0].text.split_whitespace().rev().take(3).collect();
        for word in first_tail {
            assert!(chunks[1].text.contains(word));
        }
    }

    #[test]
    fn oversize_paragraph_is_word_split() {
        let chunker = Chunker::new(config(50, 0));
        let chunks = chunker.chunk_document("doc", &words(200), "doc.json");

        assert!(chunks.len() >= 4);
    }

    #[test]
    fn indexes_are_sequential() {
        let chunker = Chunker::new(config(50, 0));
        let chunks = chunker.chunk_document("doc", &words(200), "doc.json");

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }
}
