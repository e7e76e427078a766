use serde::{Deserialize, Serialize};

use crate::model::grammar::Person;

/// Conjugated surface forms for one tense, one per [`Person`].
///
/// Supplier data may be incomplete; a map is only *usable* when every person
/// has a non-blank form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConjugationRecord", into = "ConjugationRecord")]
pub struct ConjugationMap {
    forms: [String; 6],
}

impl ConjugationMap {
    #[must_use]
    pub fn new(forms: [String; 6]) -> Self {
        Self { forms }
    }

    /// Builds a map from a comma separated list in person order,
    /// e.g. `"parlo, parli, parla, parliamo, parlate, parlano"`.
    ///
    /// Missing trailing forms are left empty, which makes the map unusable.
    #[must_use]
    pub fn from_list(list: &str) -> Self {
        let mut forms: [String; 6] = Default::default();
        for (slot, part) in forms.iter_mut().zip(list.split(',')) {
            *slot = part.trim().to_string();
        }
        Self { forms }
    }

    #[must_use]
    pub fn get(&self, person: Person) -> &str {
        &self.forms[person.index()]
    }

    pub fn set(&mut self, person: Person, form: impl Into<String>) {
        self.forms[person.index()] = form.into();
    }

    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.forms.iter().all(|form| !form.trim().is_empty())
    }

    /// Iterates `(person, form)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Person, &str)> {
        Person::ALL
            .into_iter()
            .map(move |person| (person, self.get(person)))
    }

    /// True when `form` is one of the six forms.
    #[must_use]
    pub fn contains(&self, form: &str) -> bool {
        self.forms.iter().any(|f| f == form)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConjugationRecord {
    io: String,
    tu: String,
    #[serde(rename = "lui/lei")]
    lui_lei: String,
    noi: String,
    voi: String,
    loro: String,
}

impl From<ConjugationRecord> for ConjugationMap {
    fn from(r: ConjugationRecord) -> Self {
        Self::new([r.io, r.tu, r.lui_lei, r.noi, r.voi, r.loro])
    }
}

impl From<ConjugationMap> for ConjugationRecord {
    fn from(map: ConjugationMap) -> Self {
        let [io, tu, lui_lei, noi, voi, loro] = map.forms;
        Self {
            io,
            tu,
            lui_lei,
            noi,
            voi,
            loro,
        }
    }
}
