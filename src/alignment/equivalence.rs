use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

type Expansion = &'static [&'static str];

/// Normalized contraction → candidate expansions, most likely first.
const CONTRACTIONS: &[(&str, &[Expansion])] = &[
    // subject + will
    ("i'll", &[&["i", "will"]]),
    ("you'll", &[&["you", "will"]]),
    ("he'll", &[&["he", "will"]]),
    ("she'll", &[&["she", "will"]]),
    ("it'll", &[&["it", "will"]]),
    ("we'll", &[&["we", "will"]]),
    ("they'll", &[&["they", "will"]]),
    // subject + am/are
    ("i'm", &[&["i", "am"]]),
    ("you're", &[&["you", "are"]]),
    ("we're", &[&["we", "are"]]),
    ("they're", &[&["they", "are"]]),
    // subject + is/has
    ("it's", &[&["it", "is"], &["it", "has"]]),
    ("he's", &[&["he", "is"], &["he", "has"]]),
    ("she's", &[&["she", "is"], &["she", "has"]]),
    ("that's", &[&["that", "is"], &["that", "has"]]),
    ("there's", &[&["there", "is"], &["there", "has"]]),
    ("here's", &[&["here", "is"], &["here", "has"]]),
    ("what's", &[&["what", "is"], &["what", "has"]]),
    ("who's", &[&["who", "is"], &["who", "has"]]),
    // subject + have
    ("i've", &[&["i", "have"]]),
    ("you've", &[&["you", "have"]]),
    ("we've", &[&["we", "have"]]),
    ("they've", &[&["they", "have"]]),
    // subject + would/had
    ("i'd", &[&["i", "would"], &["i", "had"]]),
    ("you'd", &[&["you", "would"], &["you", "had"]]),
    ("he'd", &[&["he", "would"], &["he", "had"]]),
    ("she'd", &[&["she", "would"], &["she", "had"]]),
    ("we'd", &[&["we", "would"], &["we", "had"]]),
    ("they'd", &[&["they", "would"], &["they", "had"]]),
    // negations
    ("don't", &[&["do", "not"]]),
    ("doesn't", &[&["does", "not"]]),
    ("didn't", &[&["did", "not"]]),
    ("can't", &[&["cannot"], &["can", "not"]]),
    ("couldn't", &[&["could", "not"]]),
    ("won't", &[&["will", "not"]]),
    ("wouldn't", &[&["would", "not"]]),
    ("shouldn't", &[&["should", "not"]]),
    ("isn't", &[&["is", "not"]]),
    ("aren't", &[&["are", "not"]]),
    ("wasn't", &[&["was", "not"]]),
    ("weren't", &[&["were", "not"]]),
    ("hasn't", &[&["has", "not"]]),
    ("haven't", &[&["have", "not"]]),
    ("hadn't", &[&["had", "not"]]),
    // other
    ("let's", &[&["let", "us"]]),
    ("cannot", &[&["can", "not"]]),
];

const NUMBER_WORDS: &[(&str, u64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
    ("hundred", 100),
    ("thousand", 1000),
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("thirteenth", 13),
    ("fourteenth", 14),
    ("fifteenth", 15),
    ("sixteenth", 16),
    ("seventeenth", 17),
    ("eighteenth", 18),
    ("nineteenth", 19),
    ("twentieth", 20),
    ("thirtieth", 30),
    ("fortieth", 40),
    ("fiftieth", 50),
    ("sixtieth", 60),
    ("seventieth", 70),
    ("eightieth", 80),
    ("ninetieth", 90),
];

const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

/// Fixed two-way contraction table over normalized keys.
pub struct ContractionTable {
    forward: HashMap<&'static str, &'static [Expansion]>,
    /// Space-joined expansion → contractions producing it.
    reverse: HashMap<String, Vec<&'static str>>,
}

impl ContractionTable {
    pub fn get() -> &'static ContractionTable {
        static TABLE: OnceLock<ContractionTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            let mut forward = HashMap::with_capacity(CONTRACTIONS.len());
            let mut reverse: HashMap<String, Vec<&'static str>> = HashMap::new();
            for &(contraction, expansions) in CONTRACTIONS {
                forward.insert(contraction, expansions);
                for expansion in expansions {
                    reverse
                        .entry(expansion.join(" "))
                        .or_default()
                        .push(contraction);
                }
            }
            ContractionTable { forward, reverse }
        })
    }

    pub fn is_contraction(&self, key: &str) -> bool {
        self.forward.contains_key(key)
    }

    /// Candidate expansions of `key`, in table order.
    pub fn expansions(&self, key: &str) -> Option<&'static [Expansion]> {
        self.forward.get(key).copied()
    }

    /// Contractions that expand to exactly `phrase`.
    pub fn contractions_of(&self, phrase: &[&str]) -> &[&'static str] {
        self.reverse
            .get(&phrase.join(" "))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether two key sequences read the same once every contraction is
    /// expanded. Any candidate of one side matching any candidate of the other
    /// counts.
    pub fn are_equivalent<A: AsRef<str>, B: AsRef<str>>(&self, a: &[A], b: &[B]) -> bool {
        if a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.as_ref() == y.as_ref()) {
            return true;
        }
        if let ([single], phrase) = (a, b) {
            if self.is_reverse_hit(single.as_ref(), phrase) {
                return true;
            }
        }
        if let (phrase, [single]) = (a, b) {
            if self.is_reverse_hit(single.as_ref(), phrase) {
                return true;
            }
        }

        let expanded_b: HashSet<Vec<&str>> = self.all_expansions(b).into_iter().collect();
        self.all_expansions(a)
            .into_iter()
            .any(|candidate| expanded_b.contains(&candidate))
    }

    fn is_reverse_hit<P: AsRef<str>>(&self, contraction: &str, phrase: &[P]) -> bool {
        let phrase: Vec<&str> = phrase.iter().map(AsRef::as_ref).collect();
        self.contractions_of(&phrase).contains(&contraction)
    }

    /// Cartesian product of per-word expansions, each flattened to one phrase.
    fn all_expansions<'a, S: AsRef<str>>(&self, words: &'a [S]) -> Vec<Vec<&'a str>> {
        let mut phrases: Vec<Vec<&'a str>> = vec![Vec::new()];
        for word in words {
            let word = word.as_ref();
            phrases = match self.expansions(word) {
                Some(candidates) => phrases
                    .iter()
                    .flat_map(|prefix| {
                        candidates.iter().map(move |expansion| {
                            let mut phrase = prefix.clone();
                            phrase.extend_from_slice(expansion);
                            phrase
                        })
                    })
                    .collect(),
                None => phrases
                    .into_iter()
                    .map(|mut phrase| {
                        phrase.push(word);
                        phrase
                    })
                    .collect(),
            };
        }
        phrases
    }
}

/// Integer value of a normalized key: Arabic numerals ("42"), Arabic ordinals
/// ("1st", "10th") and English cardinal/ordinal words ("twelve", "first").
pub fn parse_number(key: &str) -> Option<u64> {
    let digits = ORDINAL_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix))
        .unwrap_or(key);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(value) = digits.parse::<u64>() {
            return Some(value);
        }
    }
    NUMBER_WORDS
        .iter()
        .find(|(word, _)| *word == key)
        .map(|&(_, value)| value)
}

pub fn are_number_equivalent(a: &str, b: &str) -> bool {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
