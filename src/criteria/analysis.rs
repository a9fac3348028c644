/// Structural analysis of a criteria object.
///
/// Walks the same grammar as the clause rewriter without rewriting
/// anything, so callers can see what normalization is going to do.
use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use super::dialect::{Combinator, ID_KEY, PRIMARY_KEY_FIELD, WHERE_KEY};
use super::schema::Schema;

/// Structural metadata about a criteria object.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CriteriaAnalysis {
    pub has_where: bool,
    pub where_is_null: bool,
    pub combinator_count: usize,
    pub max_depth: usize,
    pub leaf_count: usize,
    pub remapped_ids: usize,
    pub malformed_combinators: usize,
    pub unknown_fields: Vec<String>,
}

/// Analyze `criteria` against `schema`.
///
/// `unknown_fields` is only populated when the schema declares attributes.
pub fn analyze_criteria(criteria: &Value, schema: &Schema) -> CriteriaAnalysis {
    let mut analysis = CriteriaAnalysis::default();
    let Some(entries) = criteria.as_object() else {
        return analysis;
    };
    let Some(clause) = entries.get(WHERE_KEY) else {
        return analysis;
    };

    analysis.has_where = true;
    if clause.is_null() {
        analysis.where_is_null = true;
        return analysis;
    }

    let mut unknown = BTreeSet::new();
    if let Some(pairs) = clause.as_object() {
        analyze_clause(pairs, 0, schema, &mut analysis, &mut unknown);
    }
    analysis.unknown_fields = unknown.into_iter().collect();
    analysis
}

fn analyze_clause(
    pairs: &Map<String, Value>,
    depth: usize,
    schema: &Schema,
    analysis: &mut CriteriaAnalysis,
    unknown: &mut BTreeSet<String>,
) {
    analysis.max_depth = analysis.max_depth.max(depth);
    let mut has_rid = pairs.contains_key(PRIMARY_KEY_FIELD);

    for (key, value) in pairs {
        if Combinator::parse(key).is_some() {
            match value {
                Value::Array(clauses) => {
                    analysis.combinator_count += 1;
                    for child in clauses {
                        analysis.max_depth = analysis.max_depth.max(depth + 1);
                        if let Some(child) = child.as_object() {
                            analyze_clause(child, depth + 1, schema, analysis, unknown);
                        }
                    }
                }
                _ => analysis.malformed_combinators += 1,
            }
            continue;
        }

        analysis.leaf_count += 1;
        if key == ID_KEY && !has_rid {
            analysis.remapped_ids += 1;
            has_rid = true;
        }

        if is_field_name(key) && !schema.is_empty() && !schema.has_attribute(key) {
            unknown.insert(key.clone());
        }
    }
}

fn is_field_name(key: &str) -> bool {
    key != ID_KEY && key != PRIMARY_KEY_FIELD && !key.starts_with('$')
}
