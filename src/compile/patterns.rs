// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sketchwire-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sketchwire and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Versioned catalogue of the textual edge patterns.
//!
//! The catalogue is plain data (`PatternSpec` tables) compiled once into regexes, so the
//! coverage of each pattern can be tested without going through layout or the store.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

pub const CATALOGUE_VERSION: u32 = 1;

/// Which capture group is the edge source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// `(source) ... (target)`
    Forward,
    /// `(target) <- (source)`
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSpec {
    pub name: &'static str,
    pub pattern: &'static str,
    pub direction: EdgeDirection,
}

const fn forward(name: &'static str, pattern: &'static str) -> PatternSpec {
    PatternSpec { name, pattern, direction: EdgeDirection::Forward }
}

const fn reverse(name: &'static str, pattern: &'static str) -> PatternSpec {
    PatternSpec { name, pattern, direction: EdgeDirection::Reverse }
}

/// Verb phrases, matched case-insensitively.
pub const PHRASE_PATTERNS: &[PatternSpec] = &[
    forward("connects_to", r"(\w+)\s+connects?\s+to\s+(\w+)"),
    forward(
        "which_verb",
        r"(\w+)\s+which\s+\w+(?:\s+(?:with|to|from|on|into|in|at|by))?\s+(\w+)",
    ),
    forward("linked_to", r"(\w+)\s+linked\s+to\s+(\w+)"),
    forward("points_to", r"(\w+)\s+points\s+to\s+(\w+)"),
    forward("flows_to", r"(\w+)\s+flows\s+to\s+(\w+)"),
    forward("goes_to", r"(\w+)\s+goes\s+to\s+(\w+)"),
    forward("sends_to", r"(\w+)\s+sends\s+to\s+(\w+)"),
    forward("calls", r"(\w+)\s+calls\s+(\w+)"),
    forward("interacts_with", r"(\w+)\s+interacts?\s+with\s+(\w+)"),
    forward("communicates_with", r"(\w+)\s+communicates?\s+with\s+(\w+)"),
    forward("depends_on", r"(\w+)\s+depends\s+on\s+(\w+)"),
    forward("uses", r"(\w+)\s+uses\s+(\w+)"),
    forward("accesses", r"(\w+)\s+accesses\s+(\w+)"),
    forward("queries", r"(\w+)\s+queries\s+(\w+)"),
    forward("writes_to", r"(\w+)\s+writes?\s+to\s+(\w+)"),
    forward("reads_from", r"(\w+)\s+reads?\s+from\s+(\w+)"),
    forward("authenticates_with", r"(\w+)\s+authenticates?\s+with\s+(\w+)"),
    forward("logs_in_to", r"(\w+)\s+logs?\s+in\s+to\s+(\w+)"),
    forward("signs_up_with", r"(\w+)\s+signs?\s+up\s+with\s+(\w+)"),
];

/// Textual arrows between two tokens, matched case-sensitively.
pub const ARROW_PATTERNS: &[PatternSpec] = &[
    forward("arrow", r"(\w+)\s*->\s*(\w+)"),
    forward("unicode_arrow", r"(\w+)\s*→\s*(\w+)"),
    forward("long_arrow", r"(\w+)\s*-->\s*(\w+)"),
    reverse("back_arrow", r"(\w+)\s*<-\s*(\w+)"),
    reverse("long_back_arrow", r"(\w+)\s*<--\s*(\w+)"),
];

/// `A -> B -> C`, expanded into `(A, B)` and `(B, C)`.
pub const CHAIN_PATTERN: &str = r"(\w+)\s*->\s*(\w+)\s*->\s*(\w+)";

/// Phrase-pattern endpoints that are pronouns, articles, conjunctions or prepositions.
pub const STOPWORDS: &[&str] = &[
    "which", "that", "who", "what", "where", "when", "why", "how", "the", "a", "an", "and", "or",
    "but", "so", "because", "although", "while", "if", "then", "else", "it", "its", "this",
    "these", "those", "they", "them", "he", "she", "we", "you", "i", "is", "are", "was", "be",
    "with", "to", "from", "on", "in", "into", "of", "for", "by", "at", "via",
];

#[derive(Debug, Clone)]
pub struct EdgePattern {
    spec: PatternSpec,
    regex: Regex,
}

impl EdgePattern {
    fn compile(spec: PatternSpec, case_insensitive: bool) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(spec.pattern).case_insensitive(case_insensitive).build()?;
        Ok(Self { spec, regex })
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Every non-overlapping match as an ordered `(source, target)` pair.
    pub fn pairs<'t>(&self, text: &'t str) -> Vec<(&'t str, &'t str)> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| {
                let first = caps.get(1)?.as_str();
                let second = caps.get(2)?.as_str();
                Some(match self.spec.direction {
                    EdgeDirection::Forward => (first, second),
                    EdgeDirection::Reverse => (second, first),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct PatternCatalogue {
    version: u32,
    phrases: Vec<EdgePattern>,
    arrows: Vec<EdgePattern>,
    chain: Regex,
    stopwords: HashSet<String>,
}

static BUILTIN: OnceLock<PatternCatalogue> = OnceLock::new();

impl PatternCatalogue {
    pub fn compile(
        version: u32,
        phrases: &[PatternSpec],
        arrows: &[PatternSpec],
        chain: &str,
        stopwords: &[&str],
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            version,
            phrases: phrases
                .iter()
                .map(|spec| EdgePattern::compile(*spec, true))
                .collect::<Result<_, _>>()?,
            arrows: arrows
                .iter()
                .map(|spec| EdgePattern::compile(*spec, false))
                .collect::<Result<_, _>>()?,
            chain: Regex::new(chain)?,
            stopwords: stopwords.iter().map(|word| word.to_lowercase()).collect(),
        })
    }

    /// The catalogue shipped with this build.
    pub fn builtin() -> &'static Self {
        BUILTIN.get_or_init(|| {
            Self::compile(
                CATALOGUE_VERSION,
                PHRASE_PATTERNS,
                ARROW_PATTERNS,
                CHAIN_PATTERN,
                STOPWORDS,
            )
            .expect("builtin edge patterns compile")
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn phrase_patterns(&self) -> &[EdgePattern] {
        &self.phrases
    }

    pub fn arrow_patterns(&self) -> &[EdgePattern] {
        &self.arrows
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }

    /// Phrase matches in catalogue order, minus pairs with a stopword endpoint.
    pub fn phrase_pairs<'t>(&self, text: &'t str) -> Vec<(&'t str, &'t str)> {
        self.phrases
            .iter()
            .flat_map(|pattern| pattern.pairs(text))
            .filter(|(from, to)| !self.is_stopword(from) && !self.is_stopword(to))
            .collect()
    }

    pub fn arrow_pairs<'t>(&self, text: &'t str) -> Vec<(&'t str, &'t str)> {
        self.arrows.iter().flat_map(|pattern| pattern.pairs(text)).collect()
    }

    pub fn chain_pairs<'t>(&self, text: &'t str) -> Vec<(&'t str, &'t str)> {
        let mut pairs = Vec::new();
        for caps in self.chain.captures_iter(text) {
            let (Some(a), Some(b), Some(c)) = (caps.get(1), caps.get(2), caps.get(3)) else {
                continue;
            };
            pairs.push((a.as_str(), b.as_str()));
            pairs.push((b.as_str(), c.as_str()));
        }
        pairs
    }
}
