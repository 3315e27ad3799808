use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::constants::{
    CUSTOM_FIELDS_TAG, EXTRAS_TAG, FORMATTED_TITLE_ATTR, NUMBER_ATTR, ORIGINAL_TITLE_ATTR,
};

/// Ordered string-to-string mapping of XML attributes.
///
/// Keeps the node's attribute enumeration order. Inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Value of `name`, or an empty string when the attribute is absent.
    pub fn get_or_empty(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// A full movie record: the movie element's own attributes plus its
/// `CustomFields` attributes and the list of `Extra` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movie {
    pub fields: AttributeMap,
    pub custom_fields: AttributeMap,
    pub extras: Vec<AttributeMap>,
}

impl Movie {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)
    }

    pub fn number(&self) -> Option<&str> {
        self.fields.get(NUMBER_ATTR)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // AttributeMap and Movie only ever serialize string maps
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// Flattened shape: {...attributes, "CustomFields": {...}, "Extras": [...]}.
// Base attributes that reuse a reserved name stay in `fields` but are not emitted.
impl Serialize for Movie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in self.fields.iter() {
            if k == CUSTOM_FIELDS_TAG || k == EXTRAS_TAG {
                continue;
            }
            map.serialize_entry(k, v)?;
        }
        map.serialize_entry(CUSTOM_FIELDS_TAG, &self.custom_fields)?;
        map.serialize_entry(EXTRAS_TAG, &self.extras)?;
        map.end()
    }
}

/// Abbreviated three-field movie record for fast listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieLite {
    pub number: String,
    pub formatted_title: String,
    pub original_title: String,
}

impl From<&Movie> for MovieLite {
    fn from(movie: &Movie) -> Self {
        Self {
            number: movie.fields.get_or_empty(NUMBER_ATTR),
            formatted_title: movie.fields.get_or_empty(FORMATTED_TITLE_ATTR),
            original_title: movie.fields.get_or_empty(ORIGINAL_TITLE_ATTR),
        }
    }
}

/// Catalog maintainer details from the `Properties` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Owner {
    pub name: String,
    pub email: String,
    pub url: String,
    pub description: String,
}

/// Catalog-level summary metadata. `movie_count` is serialized as `movies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogInfo {
    pub version: String,
    pub format: String,
    pub date: String,
    pub owner: Owner,
    #[serde(rename = "CustomFieldsProperties")]
    pub custom_fields_properties: Vec<String>,
    #[serde(rename = "movies")]
    pub movie_count: usize,
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

impl CatalogInfo {
    /// The `Date` attribute as a calendar date, when it is in a recognised format.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date, fmt).ok())
    }
}

/// The whole catalog as one object: metadata plus every full movie record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogObject {
    pub version: String,
    pub format: String,
    pub date: String,
    pub owner: Owner,
    #[serde(rename = "CustomFieldsProperties")]
    pub custom_fields_properties: Vec<String>,
    pub movies: Vec<Movie>,
}

impl CatalogObject {
    pub fn from_parts(info: CatalogInfo, movies: Vec<Movie>) -> Self {
        Self {
            version: info.version,
            format: info.format,
            date: info.date,
            owner: info.owner,
            custom_fields_properties: info.custom_fields_properties,
            movies,
        }
    }
}
