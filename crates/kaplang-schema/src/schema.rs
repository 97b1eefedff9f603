// Dweve Kaplang - Type and Method Definition Language
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! External schema shapes.
//!
//! ```json
//! {
//!   "types": [
//!     { "type": "dto", "name": "User", "properties": {
//!         "id": { "type": "string" },
//!         "roles": { "type": { "type": "array", "items": { "$ref": "Role" } } }
//!     } },
//!     { "type": "enum", "name": "Role", "values": ["ADMIN"] }
//!   ],
//!   "methods": [
//!     { "name": "getUser", "method": "GET", "path": "/users/{id}",
//!       "arguments": { "id": { "type": "string", "transport": "PATH", "optional": false } },
//!       "responseType": { "$ref": "User" } }
//!   ]
//! }
//! ```

use std::fmt;
use std::marker::PhantomData;

use kaplang_core::{parse_type_reference, Annotation, RestVerb, Transport, TypeRef, BUILTIN_TYPES};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Marker for the `"type": "array"` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayTag {
    Array,
}

/// The type of a property, argument or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// A built-in type name, or `object` for inline objects.
    Primitive(String),
    /// Any other named type. Generic types keep their text form.
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    /// An array of `items`.
    Array {
        #[serde(rename = "type")]
        tag: ArrayTag,
        items: Box<SchemaType>,
    },
}

impl SchemaType {
    pub fn primitive(name: impl Into<String>) -> Self {
        SchemaType::Primitive(name.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        SchemaType::Ref {
            reference: name.into(),
        }
    }

    pub fn array(items: SchemaType) -> Self {
        SchemaType::Array {
            tag: ArrayTag::Array,
            items: Box::new(items),
        }
    }

    /// Lowers a type reference. Built-in names stay primitive; everything
    /// else becomes a `$ref`.
    pub fn from_type_ref(type_ref: &TypeRef) -> Self {
        let element = if type_ref.generics.is_empty() && is_primitive(&type_ref.name) {
            SchemaType::primitive(type_ref.name.clone())
        } else {
            SchemaType::reference(type_ref.element().to_string())
        };
        if type_ref.list {
            SchemaType::array(element)
        } else {
            element
        }
    }

    /// Raises back to a type reference. Unparseable `$ref` text is kept as a
    /// bare name.
    pub fn to_type_ref(&self) -> TypeRef {
        match self {
            SchemaType::Primitive(name) => TypeRef::simple(name.clone()),
            SchemaType::Ref { reference } => {
                parse_type_reference(reference).unwrap_or_else(|_| TypeRef::simple(reference.clone()))
            }
            SchemaType::Array { items, .. } => items.to_type_ref().as_list(),
        }
    }

    /// Parses the string form, where a trailing `[]` marks an array.
    ///
    /// ```
    /// use kaplang_schema::SchemaType;
    ///
    /// let t = SchemaType::from_type_string("User[]");
    /// assert_eq!(t, SchemaType::array(SchemaType::reference("User")));
    /// assert_eq!(t.to_type_string(), "User[]");
    /// assert_eq!(SchemaType::from_type_string("string"), SchemaType::primitive("string"));
    /// ```
    pub fn from_type_string(text: &str) -> Self {
        let text = text.trim();
        match text.strip_suffix("[]") {
            Some(element) => SchemaType::array(SchemaType::from_type_string(element)),
            None if is_primitive(text) => SchemaType::primitive(text),
            None => SchemaType::reference(text),
        }
    }

    /// The string form: the name, with `[]` appended for arrays.
    pub fn to_type_string(&self) -> String {
        match self {
            SchemaType::Primitive(name) => name.clone(),
            SchemaType::Ref { reference } => reference.clone(),
            SchemaType::Array { items, .. } => format!("{}[]", items.to_type_string()),
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SchemaType::Array { .. })
    }
}

fn is_primitive(name: &str) -> bool {
    name == kaplang_core::OBJECT_TYPE || BUILTIN_TYPES.contains(&name)
}

/// A JSON object that keeps its keys in insertion order.
///
/// `serde_json` maps sort their keys, so the bag serializes itself entry by
/// entry and deserializes through a visitor that records the input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedBag<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedBag<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedBag<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. An existing key keeps its position and the
    /// replaced value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> FromIterator<(String, V)> for OrderedBag<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.insert(key, value);
        }
        bag
    }
}

impl<V: Serialize> Serialize for OrderedBag<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct OrderedBagVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedBagVisitor<V> {
    type Value = OrderedBag<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut bag = OrderedBag::new();
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            bag.insert(key, value);
        }
        Ok(bag)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedBag<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedBagVisitor(PhantomData))
    }
}

/// Properties of a dto or inline object, by name.
pub type PropertyBag = OrderedBag<SchemaProperty>;

/// Method arguments, by parameter name.
pub type ArgumentBag = OrderedBag<RestArgument>;

/// One dto property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default literal in source spelling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// Nested properties of an inline object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyBag>,
}

impl SchemaProperty {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            default_value: None,
            annotations: Vec::new(),
            properties: None,
        }
    }
}

/// A named structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDto {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub properties: PropertyBag,
}

/// A closed set of values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaEnum {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A type entry of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SchemaEntity {
    Dto(SchemaDto),
    Enum(SchemaEnum),
}

impl SchemaEntity {
    pub fn name(&self) -> &str {
        match self {
            SchemaEntity::Dto(dto) => &dto.name,
            SchemaEntity::Enum(enumeration) => &enumeration.name,
        }
    }
}

/// One method argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestArgument {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(default)]
    pub transport: Transport,
    /// Wire name from the transport annotation, e.g. a header name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub optional: bool,
    /// Annotations other than the transport annotation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// A method, REST or plain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestMethod {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// HTTP verb; absent for plain methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<RestVerb>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default)]
    pub arguments: ArgumentBag,
    pub response_type: SchemaType,
    /// Annotations other than the verb annotation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

/// The whole external schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSchema {
    #[serde(default)]
    pub types: Vec<SchemaEntity>,
    #[serde(default)]
    pub methods: Vec<RestMethod>,
}

impl ExternalSchema {
    /// The type entry with the given name.
    pub fn find_type(&self, name: &str) -> Option<&SchemaEntity> {
        self.types.iter().find(|t| t.name() == name)
    }

    pub fn find_method(&self, name: &str) -> Option<&RestMethod> {
        self.methods.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_type_json_shapes() {
        assert_eq!(
            serde_json::to_value(SchemaType::primitive("string")).unwrap(),
            json!("string")
        );
        assert_eq!(
            serde_json::to_value(SchemaType::reference("User")).unwrap(),
            json!({"$ref": "User"})
        );
        assert_eq!(
            serde_json::to_value(SchemaType::array(SchemaType::reference("User"))).unwrap(),
            json!({"type": "array", "items": {"$ref": "User"}})
        );
    }

    #[test]
    fn test_schema_type_parses_each_shape() {
        let parsed: SchemaType =
            serde_json::from_value(json!({"type": "array", "items": "integer"})).unwrap();
        assert_eq!(parsed, SchemaType::array(SchemaType::primitive("integer")));
        let parsed: SchemaType = serde_json::from_value(json!({"$ref": "Pet"})).unwrap();
        assert_eq!(parsed, SchemaType::reference("Pet"));
    }

    #[test]
    fn test_type_ref_lowering() {
        let generic = TypeRef::simple("Map")
            .with_generics(vec![TypeRef::simple("string"), TypeRef::simple("User")])
            .as_list();
        let lowered = SchemaType::from_type_ref(&generic);
        assert_eq!(
            lowered,
            SchemaType::array(SchemaType::reference("Map<string, User>"))
        );
        assert_eq!(lowered.to_type_ref(), generic);
        assert_eq!(
            SchemaType::from_type_ref(&TypeRef::list_of("string")).to_type_string(),
            "string[]"
        );
    }

    #[test]
    fn test_bag_preserves_order() {
        let mut bag: OrderedBag<u32> = OrderedBag::new();
        bag.insert("zeta", 1);
        assert_eq!(bag.insert("alpha", 2), None);
        assert_eq!(bag.insert("zeta", 3), Some(1));
        let text = serde_json::to_string(&bag).unwrap();
        assert_eq!(text, r#"{"zeta":3,"alpha":2}"#);

        let back: OrderedBag<u32> = serde_json::from_str(r#"{"b":1,"a":2,"c":3}"#).unwrap();
        assert_eq!(back.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(back.get("a"), Some(&2));
    }
}
