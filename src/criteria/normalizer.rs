/// Rewrites Waterline criteria into the shape the OrientDB driver expects.
///
/// Grammar handled by the clause rewriter:
///
/// ```text
/// <where>       ::= null | <clause>
/// <clause>      ::= { <clause-pair>, ... }
/// <clause-pair> ::= <field> : <expression>
///                 | and | or | nor : [<clause>, ...]
/// ```
///
/// Everything outside `where` is opaque and moved through untouched.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dialect::{Combinator, ID_KEY, PRIMARY_KEY_FIELD, WHERE_KEY};
use super::schema::{json_type, Schema};
use crate::error::NormalizeError;

/// Top-level criteria object: `where` plus sort, limit, skip, select, ...
pub type Criteria = Map<String, Value>;

/// What to do with a combinator whose value is not an array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinatorPolicy {
    /// Leave the pair out of the output without reporting anything.
    #[default]
    Drop,
    /// Fail with [`NormalizeError::MalformedCombinator`].
    Strict,
}

impl std::str::FromStr for CombinatorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(CombinatorPolicy::Drop),
            "strict" => Ok(CombinatorPolicy::Strict),
            other => Err(other.to_string()),
        }
    }
}

/// Normalizes one criteria object at a time against a borrowed schema.
///
/// Holds no per-call state, so a single instance can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'s> {
    schema: &'s Schema,
    policy: CombinatorPolicy,
}

impl<'s> Normalizer<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            policy: CombinatorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CombinatorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn policy(&self) -> CombinatorPolicy {
        self.policy
    }

    /// Rewrite the `where` entry of `criteria`, moving every other entry
    /// through as-is. A criteria value that is not an object (usually
    /// `null`) is returned unchanged.
    pub fn normalize_criteria(&self, criteria: Value) -> Result<Value, NormalizeError> {
        let entries = match criteria {
            Value::Object(entries) => entries,
            other => return Ok(other),
        };

        tracing::debug!(
            keys = entries.len(),
            has_where = entries.contains_key(WHERE_KEY),
            "normalizing criteria"
        );

        let mut normalized = Criteria::with_capacity(entries.len());
        for (key, value) in entries {
            let value = if key == WHERE_KEY {
                self.parse_where(value)?
            } else {
                value
            };
            normalized.insert(key, value);
        }
        Ok(Value::Object(normalized))
    }

    /// `null` means "no filter" and is kept as `null`, never turned into `{}`.
    pub fn parse_where(&self, clause: Value) -> Result<Value, NormalizeError> {
        if clause.is_null() {
            return Ok(Value::Null);
        }
        self.parse_clause(clause)
    }

    /// Fold the pairs of a clause into a fresh object.
    ///
    /// A value without pairs to fold (scalar, array, `null`) yields `{}`.
    /// Arrays are not folded by index, so an array child of a combinator
    /// loses its elements.
    pub fn parse_clause(&self, clause: Value) -> Result<Value, NormalizeError> {
        let Value::Object(pairs) = clause else {
            return Ok(Value::Object(Map::new()));
        };

        // An @rid anywhere in the input clause blocks the id remap.
        let has_rid = pairs.contains_key(PRIMARY_KEY_FIELD);
        let mut out = Map::with_capacity(pairs.len());
        for (key, value) in pairs {
            if let Some(combinator) = Combinator::parse(&key) {
                match value {
                    Value::Array(clauses) => {
                        let clauses = clauses
                            .into_iter()
                            .map(|c| self.parse_child(combinator, c))
                            .collect::<Result<Vec<_>, _>>()?;
                        out.insert(key, Value::Array(clauses));
                    }
                    other => {
                        if self.policy == CombinatorPolicy::Strict {
                            return Err(NormalizeError::MalformedCombinator {
                                key,
                                found: json_type(&other),
                            });
                        }
                    }
                }
                continue;
            }

            let key = if key == ID_KEY && !has_rid {
                PRIMARY_KEY_FIELD.to_string()
            } else {
                key
            };
            out.insert(key, value);
        }
        Ok(Value::Object(out))
    }

    fn parse_child(&self, combinator: Combinator, clause: Value) -> Result<Value, NormalizeError> {
        if self.policy == CombinatorPolicy::Strict && !clause.is_object() {
            return Err(NormalizeError::MalformedClause {
                combinator: combinator.to_string(),
                found: json_type(&clause),
            });
        }
        self.parse_clause(clause)
    }
}

/// Normalize `criteria` with the default (dropping) combinator policy.
///
/// The dropping policy has no failure path, so this only returns `Err` if
/// a stricter default is ever introduced.
pub fn normalize(criteria: Value, schema: &Schema) -> Result<Value, NormalizeError> {
    Normalizer::new(schema).normalize_criteria(criteria)
}
