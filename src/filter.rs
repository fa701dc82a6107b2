//! Query filter compilation.
//!
//! Raw query criteria (name -> raw strings) are compiled into a [`Filter`]:
//! a backend-agnostic conjunction of set-membership criteria keyed by
//! dotted field path. Each backend applies it in its own way.

use crate::types::Person;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A filterable field declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterField {
    /// Query parameter name.
    pub name: &'static str,

    /// Parent document path, if the field is nested.
    pub parent_path: Option<&'static str>,
}

impl FilterField {
    /// Path of the field inside a stored record, e.g. `location.city`.
    pub fn path(&self) -> String {
        match self.parent_path {
            Some(parent) => format!("{}.{}", parent, self.name),
            None => self.name.to_string(),
        }
    }
}

/// Fields a person query may filter on.
pub const PERSON_FILTER_FIELDS: &[FilterField] = &[
    FilterField { name: "firstname", parent_path: None },
    FilterField { name: "lastname", parent_path: None },
    FilterField { name: "city", parent_path: Some("location") },
    FilterField { name: "country", parent_path: Some("location") },
];

/// A compiled filter. The empty filter matches every record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    criteria: BTreeMap<String, BTreeSet<String>>,
}

impl Filter {
    /// Filter matching every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether the filter has no criteria.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Accepted values for a field path.
    pub fn values(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.criteria.get(path)
    }

    /// Iterate criteria as (path, accepted values).
    pub fn criteria(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.criteria.iter().map(|(path, values)| (path.as_str(), values))
    }

    /// Whether `person` satisfies every criterion.
    pub fn matches(&self, person: &Person) -> bool {
        self.criteria.iter().all(|(path, values)| {
            field_value(person, path).is_some_and(|value| values.contains(value))
        })
    }
}

/// Read a person field by path.
///
/// Empty strings read as absent, matching the stored layout which omits them.
pub fn field_value<'a>(person: &'a Person, path: &str) -> Option<&'a str> {
    let value = match path {
        "firstname" => person.firstname.as_str(),
        "lastname" => person.lastname.as_str(),
        "location.city" => person.location.as_ref()?.city.as_str(),
        "location.country" => person.location.as_ref()?.country.as_str(),
        _ => return None,
    };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Compile raw criteria against [`PERSON_FILTER_FIELDS`].
pub fn compile(query: &HashMap<String, Vec<String>>) -> Filter {
    compile_fields(query, PERSON_FILTER_FIELDS)
}

/// Compile raw criteria against a declared field set.
///
/// Unknown names are ignored. A single raw value is split on commas;
/// repeated values are taken verbatim.
pub fn compile_fields(query: &HashMap<String, Vec<String>>, fields: &[FilterField]) -> Filter {
    let mut criteria = BTreeMap::new();

    for field in fields {
        let Some(raw) = query.get(field.name) else {
            continue;
        };

        let values: BTreeSet<String> = match raw.as_slice() {
            [] => continue,
            [single] => single.split(',').map(str::to_string).collect(),
            many => many.iter().cloned().collect(),
        };

        criteria.insert(field.path(), values);
    }

    Filter { criteria }
}

/// Group raw `(name, value)` query pairs into the map [`compile`] consumes,
/// keeping the order values appeared in.
pub fn group_query_pairs<I, K, V>(pairs: I) -> HashMap<String, Vec<String>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in pairs {
        grouped.entry(name.into()).or_default().push(value.into());
    }
    grouped
}
