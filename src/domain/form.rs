use super::page::ElementId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Required inputs of the payment form, keyed by their `name` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FullName,
    Email,
    Phone,
    Document,
}

impl FormField {
    pub const REQUIRED: [FormField; 4] = [
        FormField::FullName,
        FormField::Email,
        FormField::Phone,
        FormField::Document,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Document => "document",
        }
    }

    pub fn element(&self) -> ElementId {
        match self {
            FormField::FullName => ElementId::FullName,
            FormField::Email => ElementId::Email,
            FormField::Phone => ElementId::Phone,
            FormField::Document => ElementId::Document,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::REQUIRED.into_iter().find(|field| field.name() == name)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Name/value pairs submitted with the form, as the browser would encode them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for FormData {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
