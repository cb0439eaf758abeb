//! Type vocabulary mapping.
//!
//! A [`TypeMapper`] translates canonical scalar/container type names into a
//! provider's type vocabulary. Lookups are total: a name absent from the
//! table maps to the vocabulary's string type, the safe fallback for schema
//! emission.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Which vocabulary a mapper targets. The JSON-Schema vocabulary carries the
/// extra float annotation rule in the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    JsonSchema,
    Python,
}

/// Pure lookup table from canonical type names to a provider vocabulary.
#[derive(Debug, Clone)]
pub struct TypeMapper {
    vocabulary: Vocabulary,
    table: &'static HashMap<&'static str, &'static str>,
    fallback: &'static str,
}

static JSON_SCHEMA_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("integer", "integer"),
        ("number", "number"),
        ("float", "number"),
        ("string", "string"),
        ("boolean", "boolean"),
        ("bool", "boolean"),
        ("array", "array"),
        ("list", "array"),
        ("dict", "object"),
        ("object", "object"),
        ("tuple", "array"),
        ("any", "string"),
        // Java aliases
        ("byte", "integer"),
        ("short", "integer"),
        ("long", "integer"),
        ("double", "number"),
        ("char", "string"),
        ("ArrayList", "array"),
        ("Array", "array"),
        ("HashMap", "object"),
        ("Hashtable", "object"),
        ("Queue", "array"),
        ("Stack", "array"),
        ("Any", "string"),
    ])
});

static PYTHON_TABLE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("integer", "int"),
        ("number", "float"),
        ("float", "float"),
        ("string", "str"),
        ("boolean", "bool"),
        ("bool", "bool"),
        ("array", "list"),
        ("list", "list"),
        ("dict", "dict"),
        ("object", "dict"),
        ("tuple", "tuple"),
        ("any", "str"),
        ("byte", "int"),
        ("short", "int"),
        ("long", "int"),
        ("double", "float"),
        ("char", "str"),
        ("ArrayList", "list"),
        ("Array", "list"),
        ("HashMap", "dict"),
        ("Hashtable", "dict"),
        ("Queue", "list"),
        ("Stack", "list"),
        ("Any", "str"),
    ])
});

impl TypeMapper {
    /// Canonical-to-JSON-Schema (OpenAPI) vocabulary.
    pub fn json_schema() -> Self {
        Self {
            vocabulary: Vocabulary::JsonSchema,
            table: &*JSON_SCHEMA_TABLE,
            fallback: "string",
        }
    }

    /// Canonical-to-Python type names, used by prompt-style conventions that
    /// describe parameters in the execution language's own vocabulary.
    pub fn python() -> Self {
        Self {
            vocabulary: Vocabulary::Python,
            table: &*PYTHON_TABLE,
            fallback: "str",
        }
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// The vocabulary's string type, used for absent or unknown canonical
    /// types.
    pub fn fallback(&self) -> &'static str {
        self.fallback
    }

    /// Translate a canonical type name; unknown names fall back to the
    /// vocabulary's string type.
    pub fn map(&self, canonical: &str) -> &'static str {
        match self.table.get(canonical).copied() {
            Some(mapped) => mapped,
            None => {
                tracing::debug!(type_name = canonical, "unknown canonical type, using fallback");
                self.fallback
            }
        }
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.table.contains_key(canonical)
    }

    /// Whether a name is part of the target vocabulary (used by the
    /// round-trip property tests).
    pub fn is_target_type(&self, name: &str) -> bool {
        self.table.values().any(|v| *v == name)
    }
}
