//! Fixed vocabulary shared by the Waterline input dialect and the OrientDB
//! target dialect.

use std::fmt;

/// Top-level criteria key whose value is a clause tree.
pub const WHERE_KEY: &str = "where";

/// Generic identifier field used by Waterline models.
pub const ID_KEY: &str = "id";

/// OrientDB record id field that `id` is remapped to.
pub const PRIMARY_KEY_FIELD: &str = "@rid";

/// Logical operators that combine a list of child clauses.
///
/// Only the bare names are recognized. `$and`, `$or` and `$nor` are already
/// in target form and are treated as ordinary keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    And,
    Or,
    Nor,
}

impl Combinator {
    pub const ALL: [Combinator; 3] = [Combinator::And, Combinator::Or, Combinator::Nor];

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "and" => Some(Combinator::And),
            "or" => Some(Combinator::Or),
            "nor" => Some(Combinator::Nor),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
            Combinator::Nor => "nor",
        }
    }

    /// Symbolic operator the backend uses for this combinator.
    pub fn target_operator(&self) -> &'static str {
        match self {
            Combinator::And => "$and",
            Combinator::Or => "$or",
            Combinator::Nor => "$nor",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_names() {
        assert_eq!(Combinator::parse("and"), Some(Combinator::And));
        assert_eq!(Combinator::parse("or"), Some(Combinator::Or));
        assert_eq!(Combinator::parse("nor"), Some(Combinator::Nor));
    }

    #[test]
    fn test_symbolic_names_are_not_combinators() {
        assert_eq!(Combinator::parse("$and"), None);
        assert_eq!(Combinator::parse("$or"), None);
        assert_eq!(Combinator::parse("$nor"), None);
        assert_eq!(Combinator::parse("OR"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for c in Combinator::ALL {
            assert_eq!(Combinator::parse(c.as_str()), Some(c));
            assert_eq!(c.target_operator(), format!("${}", c));
        }
    }
}
