// Text extraction and word-cloud rendering seam
// The core exposes a text blob and word frequencies; actual rendering
// is an injected CloudRenderer capability, so the pipeline never
// depends on a renderer's internals.

use crate::filter::FilteredView;
use std::collections::HashMap;

/// Join every item name in the view with a single space, preserving row
/// order. An empty view yields an empty string and the caller must
/// suppress downstream rendering instead of passing the blob forward.
pub fn extract_text(view: &FilteredView) -> String {
    view.records
        .iter()
        .map(|r| r.item_name.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Case-folded word counts over a text blob, sorted by descending count
/// with ties kept in first-appearance order.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for word in text.split_whitespace() {
        let key = word.to_lowercase();
        match index.get(&key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// One word placed on the cloud, with an emphasis rank in 0..=4.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudWord {
    pub text: String,
    pub weight: u8,
}

/// A two-dimensional grid of weighted words the UI shell can blit.
#[derive(Debug, Clone)]
pub struct CloudImage {
    pub width: usize,
    pub lines: Vec<Vec<CloudWord>>,
}

impl CloudImage {
    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Injected rendering capability: text blob in, image out.
pub trait CloudRenderer {
    fn render(&self, text: &str) -> CloudImage;
}

/// Default renderer: lays the most frequent words onto the grid,
/// emphasis scaled by count relative to the top word.
pub struct FrequencyCloud {
    pub width: usize,
    pub max_words: usize,
}

impl Default for FrequencyCloud {
    fn default() -> Self {
        FrequencyCloud {
            width: 80,
            max_words: 40,
        }
    }
}

impl CloudRenderer for FrequencyCloud {
    fn render(&self, text: &str) -> CloudImage {
        let freqs = word_frequencies(text);
        if freqs.is_empty() {
            return CloudImage {
                width: self.width,
                lines: Vec::new(),
            };
        }

        let top = freqs[0].1 as f64;
        let mut lines: Vec<Vec<CloudWord>> = Vec::new();
        let mut line: Vec<CloudWord> = Vec::new();
        let mut used = 0;

        for (word, count) in freqs.into_iter().take(self.max_words) {
            let weight = ((count as f64 / top) * 4.0).round() as u8;
            let text = if weight >= 3 {
                word.to_uppercase()
            } else {
                word
            };

            let cell_width = text.chars().count() + 2;
            if used + cell_width > self.width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            used += cell_width;
            line.push(CloudWord { text, weight });
        }

        if !line.is_empty() {
            lines.push(line);
        }

        CloudImage {
            width: self.width,
            lines,
        }
    }
}
