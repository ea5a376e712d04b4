use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field names recognized in the common address schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Organization,
    Street,
    City,
    County,
    State,
    Zip,
}

impl Field {
    /// Key used when the record is serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Organization => "organization",
            Field::Street => "street",
            Field::City => "city",
            Field::County => "county",
            Field::State => "state",
            Field::Zip => "zip",
        }
    }
}

/// A single normalized address
///
/// Fields are kept in the order the owning parser set them. A field that a
/// format cannot recover is absent, not present with an empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressRecord {
    fields: Vec<(Field, String)>,
}

impl AddressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing the value in place if it is already present
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    /// Builder-style variant of [`AddressRecord::set`]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.get(field).is_some()
    }

    /// Sort key: the zip code, or the empty string when the record has none
    pub fn zip_key(&self) -> &str {
        self.get(Field::Zip).unwrap_or("")
    }

    /// Fields in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for AddressRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.as_str(), value)?;
        }
        map.end()
    }
}
