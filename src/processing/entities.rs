//! Named-entity recognition for anonymization

use crate::config::AnonymizerConfig;
use crate::error::{Result, ResumeScorerError};
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityLabel {
    /// Person names.
    Person,
    /// Nationalities, religious and political groups.
    Norp,
    /// Countries, regions and cities.
    Gpe,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Finds entity mentions in lower-cased text.
pub trait EntityRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity>;
}

/// Dictionary-backed recognizer.
///
/// Entries are matched whole-word. The first non-empty line of a document is
/// also tagged as a person when it looks like a resume header: two or three
/// alphabetic tokens starting with a known given name.
pub struct GazetteerRecognizer {
    matcher: AhoCorasick,
    entries: Vec<(String, EntityLabel)>,
    given_names: Vec<String>,
}

impl GazetteerRecognizer {
    pub fn new() -> Result<Self> {
        Self::with_config(&AnonymizerConfig::default())
    }

    pub fn with_config(config: &AnonymizerConfig) -> Result<Self> {
        let mut entries: Vec<(String, EntityLabel)> = Vec::new();
        let mut push_all = |words: &mut dyn Iterator<Item = String>, label: EntityLabel| {
            for word in words {
                let word = word.trim().to_lowercase();
                if !word.is_empty() && !entries.iter().any(|(w, _)| *w == word) {
                    entries.push((word, label));
                }
            }
        };

        push_all(&mut Self::default_given_names().map(String::from), EntityLabel::Person);
        push_all(&mut config.extra_person_names.iter().cloned(), EntityLabel::Person);
        push_all(&mut Self::default_groups().map(String::from), EntityLabel::Norp);
        push_all(&mut config.extra_groups.iter().cloned(), EntityLabel::Norp);
        push_all(&mut Self::default_places().map(String::from), EntityLabel::Gpe);
        push_all(&mut config.extra_places.iter().cloned(), EntityLabel::Gpe);

        let given_names = entries
            .iter()
            .filter(|(_, label)| *label == EntityLabel::Person)
            .map(|(word, _)| word.clone())
            .collect();

        let patterns: Vec<&str> = entries.iter().map(|(w, _)| w.as_str()).collect();
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                ResumeScorerError::Configuration(format!("Failed to build entity gazetteer: {}", e))
            })?;

        Ok(Self {
            matcher,
            entries,
            given_names,
        })
    }

    fn header_entity(&self, text: &str) -> Option<Entity> {
        let offset = text.len() - text.trim_start().len();
        let line = text.trim_start().lines().next()?.trim_end();
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if !(2..=3).contains(&tokens.len()) {
            return None;
        }
        if !tokens
            .iter()
            .all(|t| t.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\''))
        {
            return None;
        }
        if !self.given_names.iter().any(|name| name == tokens[0]) {
            return None;
        }

        Some(Entity {
            text: line.to_string(),
            label: EntityLabel::Person,
            start: offset,
            end: offset + line.len(),
        })
    }

    fn default_given_names() -> impl Iterator<Item = &'static str> {
        [
            "john", "james", "robert", "michael", "david", "richard", "joseph", "thomas",
            "charles", "christopher", "daniel", "matthew", "anthony", "steven", "andrew",
            "joshua", "kevin", "brian", "george", "timothy", "jason", "jeffrey", "ryan",
            "jacob", "nicholas", "jonathan", "stephen", "justin", "brandon", "benjamin",
            "samuel", "alexander", "patrick", "mary", "patricia", "jennifer", "linda",
            "elizabeth", "barbara", "susan", "jessica", "sarah", "karen", "nancy", "lisa",
            "betty", "margaret", "sandra", "ashley", "kimberly", "emily", "donna",
            "michelle", "carol", "amanda", "melissa", "deborah", "stephanie", "rebecca",
            "sharon", "laura", "cynthia", "kathleen", "amy", "shirley", "angela", "emma",
            "olivia", "sophia", "priya", "rahul", "ananya", "arjun", "rohan", "vikram",
            "deepak", "sanjay", "aisha", "fatima", "mohammed", "ahmed", "omar", "yusuf",
            "wei", "li", "chen", "hiroshi", "yuki", "carlos", "maria", "jose", "juan",
            "luis", "sofia", "pablo", "elena", "ivan", "olga", "dmitri",
        ]
        .into_iter()
        .filter(|name| name.len() >= 4)
    }

    fn default_groups() -> impl Iterator<Item = &'static str> {
        [
            "american", "americans", "indian", "indians", "chinese", "japanese", "korean",
            "british", "english", "french", "german", "germans", "italian", "spanish",
            "mexican", "canadian", "brazilian", "russian", "african", "nigerian",
            "pakistani", "bangladeshi", "arab", "arabs", "european", "asian", "hispanic",
            "latino", "latina", "irish", "scottish", "polish", "dutch", "swedish",
            "australian", "filipino", "vietnamese", "turkish", "iranian", "israeli",
            "egyptian", "catholic", "catholics", "protestant", "protestants", "christians",
            "muslims", "hindus", "sikhs", "jews", "buddhists", "democrat", "democrats",
            "republican", "republicans", "communist", "communists",
        ]
        .into_iter()
    }

    fn default_places() -> impl Iterator<Item = &'static str> {
        [
            "united states", "america", "canada", "mexico", "brazil", "argentina",
            "united kingdom", "england", "scotland", "ireland", "france", "germany",
            "italy", "spain", "portugal", "netherlands", "sweden", "norway", "poland",
            "russia", "ukraine", "turkey", "egypt", "nigeria", "kenya", "south africa",
            "india", "pakistan", "bangladesh", "china", "japan", "korea", "vietnam",
            "thailand", "indonesia", "philippines", "singapore", "malaysia", "australia",
            "new zealand", "israel", "iran", "saudi arabia", "new york", "california",
            "texas", "florida", "washington", "chicago", "boston", "seattle",
            "san francisco", "los angeles", "london", "paris", "berlin", "madrid",
            "toronto", "vancouver", "mumbai", "delhi", "new delhi", "bangalore",
            "bengaluru", "hyderabad", "chennai", "kolkata", "pune", "beijing",
            "shanghai", "tokyo", "seoul", "sydney", "melbourne", "dubai", "lagos",
            "nairobi", "cairo",
        ]
        .into_iter()
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        if let Some(header) = self.header_entity(text) {
            entities.push(header);
        }

        for mat in self.matcher.find_iter(text) {
            let (start, end) = (mat.start(), mat.end());
            let before_ok = text[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            let after_ok = text[end..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            if !(before_ok && after_ok) {
                continue;
            }

            let (_, label) = &self.entries[mat.pattern().as_usize()];
            entities.push(Entity {
                text: text[start..end].to_string(),
                label: *label,
                start,
                end,
            });
        }

        entities
    }
}
