//! Text segmentation: noun-chunk candidates and TF-IDF analyzer tokens

use regex::Regex;
use std::collections::HashSet;

/// Words that may open a noun chunk but never carry content on their own.
const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "our", "your", "their",
    "its", "his", "her", "my", "some", "any", "each", "every", "all", "no",
];

/// Function words and common job-posting verbs that end a noun chunk.
const CHUNK_BREAK_WORDS: &[&str] = &[
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "as", "at",
    "before", "behind", "below", "between", "beyond", "by", "during", "for", "from", "in",
    "inside", "into", "like", "near", "of", "off", "on", "onto", "out", "over", "per",
    "through", "throughout", "to", "toward", "towards", "under", "until", "upon", "via",
    "with", "within", "without",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "whereas", "than",
    "whether", "although", "though", "unless", "plus",
    // pronouns
    "i", "me", "we", "us", "you", "he", "him", "she", "it", "they", "them", "who", "whom",
    "whose", "which", "what", "where", "when", "how", "why", "there", "here",
    // auxiliaries and modals
    "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "have",
    "has", "had", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    // adverbs
    "not", "also", "very", "well", "highly", "preferably", "ideally", "including", "etc",
    "e.g.", "i.e.", "just", "only", "too", "both", "either", "neither",
    // verbs common in postings and resumes
    "looking", "seeking", "hiring", "join", "joining", "work", "working", "worked", "use",
    "using", "used", "build", "building", "built", "develop", "developing", "developed",
    "design", "designing", "designed", "analyze", "analyzing", "analyse", "create",
    "creating", "created", "maintain", "maintaining", "support", "supporting", "provide",
    "providing", "help", "helping", "ensure", "ensuring", "drive", "driving", "deliver",
    "delivering", "apply", "applying", "perform", "performing", "lead", "leading", "led",
    "manage", "managing", "managed", "communicate", "communicating", "collaborate",
    "collaborating", "required", "requires", "require", "preferred", "prefer", "need",
    "needs", "want", "wants", "expected", "responsible", "able", "familiar", "proficient",
    "skilled", "comfortable", "interpret", "present", "presenting", "identify",
    "identifying", "translate", "translating", "turn", "turning", "make", "making",
];

pub struct TextProcessor {
    determiners: HashSet<&'static str>,
    break_words: HashSet<&'static str>,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // Two or more word characters, the usual TF-IDF token pattern.
        let token_regex = Regex::new(r"(?u)\b\w\w+\b").expect("Invalid token regex");

        Self {
            determiners: DETERMINERS.iter().copied().collect(),
            break_words: CHUNK_BREAK_WORDS.iter().copied().collect(),
            token_regex,
        }
    }

    /// Segment text into noun-chunk candidates.
    ///
    /// A chunk is an optional leading determiner followed by a run of content
    /// words. Punctuation, function words and common verbs end a chunk. Chunk
    /// text is the lower-cased words joined by single spaces, in document order.
    pub fn noun_chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut has_content = false;

        for segment in self.split_clauses(text) {
            for raw_word in segment.split_whitespace() {
                let word = raw_word
                    .trim_matches(|c: char| matches!(c, '\'' | '"' | '*' | '`' | '\u{2022}'))
                    .to_lowercase();
                if word.is_empty() {
                    continue;
                }

                if self.determiners.contains(word.as_str()) {
                    Self::flush(&mut chunks, &mut current, &mut has_content);
                    current.push(word);
                } else if self.break_words.contains(word.as_str()) {
                    Self::flush(&mut chunks, &mut current, &mut has_content);
                } else {
                    current.push(word);
                    has_content = true;
                }
            }
            Self::flush(&mut chunks, &mut current, &mut has_content);
        }

        chunks
    }

    /// Tokens for the TF-IDF analyzer: lower-cased, two or more word characters.
    pub fn analyzer_tokens(&self, text: &str) -> Vec<String> {
        self.token_regex
            .find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Whitespace tokens, the unit used for verbatim skill matching.
    pub fn whitespace_tokens(text: &str) -> HashSet<String> {
        text.split_whitespace().map(|t| t.to_string()).collect()
    }

    /// Truncate to at most `max_chars` characters, possibly mid-word.
    pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
        match text.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &text[..byte_idx],
            None => text,
        }
    }

    /// Split into clause segments at punctuation that cannot sit inside a chunk.
    fn split_clauses<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            let is_break = match c {
                ',' | ';' | ':' | '!' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '/'
                | '|' | '&' | '\n' | '\r' | '\u{2022}' => true,
                // A period ends a clause unless it sits inside a token like "node.js".
                '.' => chars.peek().map_or(true, |(_, next)| next.is_whitespace()),
                _ => false,
            };
            if is_break {
                segments.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
        }
        segments.push(&text[start..]);

        segments
    }

    fn flush(chunks: &mut Vec<String>, current: &mut Vec<String>, has_content: &mut bool) {
        if *has_content {
            chunks.push(current.join(" "));
        }
        current.clear();
        *has_content = false;
    }
}
