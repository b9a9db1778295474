//! TF-IDF vector space fitted on a single job description

use crate::processing::stop_words::english_stop_words;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Sparse vector keyed by vocabulary index.
pub type SparseVector = HashMap<usize, f64>;

/// TF-IDF vectorizer with English stop words removed and unigram + bigram terms.
///
/// IDF is smoothed (`ln((1 + n) / (1 + df)) + 1`) and every projected vector is
/// L2-normalized, so cosine similarity reduces to a dot product.
pub struct TfidfVectorizer {
    text_processor: TextProcessor,
    stop_words: HashSet<&'static str>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Fit vocabulary and IDF weights on `documents`.
    pub fn fit(documents: &[&str]) -> Self {
        let mut vectorizer = Self {
            text_processor: TextProcessor::new(),
            stop_words: english_stop_words(),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        };

        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        for document in documents {
            let unique: HashSet<String> = vectorizer.terms(document).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        // Sorted terms give a deterministic index order.
        let mut terms: Vec<(String, usize)> = document_frequency.into_iter().collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let n_documents = documents.len() as f64;
        for (index, (term, df)) in terms.into_iter().enumerate() {
            let idf = ((1.0 + n_documents) / (1.0 + df as f64)).ln() + 1.0;
            vectorizer.vocabulary.insert(term, index);
            vectorizer.idf.push(idf);
        }

        vectorizer
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Project text into the fitted space. Out-of-vocabulary terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut vector = SparseVector::new();
        for term in self.terms(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *vector.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, weight) in vector.iter_mut() {
            *weight *= self.idf[*index];
        }

        let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in vector.values_mut() {
                *weight /= norm;
            }
        }

        vector
    }

    /// Unigrams and bigrams over the stop-word-filtered token stream.
    fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = self
            .text_processor
            .analyzer_tokens(text)
            .into_iter()
            .filter(|t| !self.stop_words.contains(t.as_str()))
            .collect();

        let mut terms = tokens.clone();
        terms.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
        terms
    }
}

/// Cosine similarity between two sparse vectors; 0 when either is all-zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot_product: f64 = small
        .iter()
        .filter_map(|(index, x)| large.get(index).map(|y| x * y))
        .sum();
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot_product / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}

/// Similarity engine scoped to one job description.
///
/// Build one per job description and pass it by reference to every scoring
/// call, so all candidates in a ranking share the same vector space.
pub struct SimilarityEngine {
    vectorizer: TfidfVectorizer,
}

impl SimilarityEngine {
    pub fn fit(job_text: &str) -> Self {
        let vectorizer = TfidfVectorizer::fit(&[job_text]);
        debug!("Fitted TF-IDF vocabulary with {} terms", vectorizer.vocabulary_size());
        Self { vectorizer }
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Cosine similarity of resume and job text in the fitted space, in [0, 1].
    pub fn compute_similarity(&self, resume_text: &str, job_text: &str) -> f64 {
        let resume_vector = self.vectorizer.transform(resume_text);
        let job_vector = self.vectorizer.transform(job_text);
        cosine_similarity(&resume_vector, &job_vector)
    }
}
