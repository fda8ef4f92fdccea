//! Return type inference from method descriptions.
//!
//! Descriptions are free prose, so this is a fixed ordered table of phrases. The first
//! phrase found in the description decides the result.

use tracing::debug;

use crate::{
    model::TypeExpr,
    typemap::{map_return_word, map_type},
};

/// How a matched phrase yields a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// The phrase always means this prose type expression.
    Fixed(&'static str),
    /// Take the last word before the phrase.
    WordBefore,
    /// Take the first word after the phrase.
    WordAfter,
}

/// A phrase and the rule applied when it matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnRule {
    /// Text searched for.
    pub pattern: &'static str,
    /// How the type is taken once the pattern matches.
    pub extract: Extract,
}

/// Ordered phrase table, first match wins.
pub const RETURN_RULES: &[ReturnRule] = &[
    ReturnRule {
        pattern: "Array of Update objects is returned",
        extract: Extract::Fixed("Array of Update"),
    },
    ReturnRule {
        pattern: " object is returned",
        extract: Extract::WordBefore,
    },
    ReturnRule {
        pattern: " with the final results is returned",
        extract: Extract::WordBefore,
    },
    ReturnRule {
        pattern: " is returned",
        extract: Extract::WordBefore,
    },
    ReturnRule {
        pattern: "returns an Array of GameHighScore",
        extract: Extract::Fixed("Array of GameHighScore"),
    },
    ReturnRule {
        pattern: "returns an Array of ChatMember",
        extract: Extract::Fixed("Array of ChatMember"),
    },
    ReturnRule {
        pattern: "Returns basic information about the bot in form of a ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "returns the edited ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "Returns exported invite link as ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "Returns the new invite link as",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "Returns the uploaded ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "Returns a ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "returns a ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "Returns ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "returns ",
        extract: Extract::WordAfter,
    },
    ReturnRule {
        pattern: "On success, the stopped ",
        extract: Extract::WordAfter,
    },
];

impl ReturnRule {
    /// Apply this rule to `text`. `None` when the phrase is absent or no word surrounds it.
    pub fn apply(&self, text: &str) -> Option<TypeExpr> {
        let (before, after) = text.split_once(self.pattern)?;
        match self.extract {
            Extract::Fixed(expr) => Some(map_type(expr).primary()),
            Extract::WordBefore => before.split_whitespace().last().map(map_return_word),
            Extract::WordAfter => after.split_whitespace().next().map(map_return_word),
        }
    }
}

/// Guess the return type described by `text` using [`RETURN_RULES`].
pub fn infer_return_type(text: &str) -> TypeExpr {
    infer_with(RETURN_RULES, text)
}

/// Guess the return type with a custom rule table.
pub fn infer_with(rules: &[ReturnRule], text: &str) -> TypeExpr {
    for rule in rules {
        if let Some(ty) = rule.apply(text) {
            debug!(pattern = rule.pattern, ?ty, "return phrase matched");
            return ty;
        }
    }
    debug!(text, "no return phrase matched");
    TypeExpr::ANY
}
