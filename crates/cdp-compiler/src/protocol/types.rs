//! Type definitions and the shapes they can take.

use serde::Deserialize;

use super::TypeReference;

/// Built-in protocol primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
    /// Free-form JSON object.
    Object,
    Any,
    /// Base64-encoded bytes.
    Binary,
}

impl Primitive {
    /// Looks up a primitive by its schema name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "any" => Some(Self::Any),
            "binary" => Some(Self::Binary),
            _ => None,
        }
    }

    /// The schema name of this primitive.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Any => "any",
            Self::Binary => "binary",
        }
    }
}

/// The structure of a type, property, parameter or array item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawShape")]
pub enum TypeShape {
    Primitive(Primitive),
    /// A string restricted to the listed literals.
    Enum(Vec<String>),
    /// A sequence of the item shape.
    Array(Box<TypeShape>),
    /// A record; no properties means a free-form map.
    Object(Vec<PropertyDefinition>),
    /// An alias of another type, resolved on demand.
    Reference(TypeReference),
}

impl TypeShape {
    /// A `$ref` shape, parsed from its token.
    pub fn reference(raw: &str) -> Result<Self, String> {
        raw.parse().map(Self::Reference)
    }

    /// An array of `item`.
    pub fn array(item: TypeShape) -> Self {
        Self::Array(Box::new(item))
    }

    /// Every reference reachable from this shape, including inline objects.
    pub fn references(&self) -> Vec<&TypeReference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a TypeReference>) {
        match self {
            Self::Reference(reference) => out.push(reference),
            Self::Array(item) => item.collect_references(out),
            Self::Object(properties) => {
                for property in properties {
                    property.shape.collect_references(out);
                }
            }
            Self::Primitive(_) | Self::Enum(_) => {}
        }
    }
}

/// A named type declared by a domain.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Local name, unique within the domain.
    pub id: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(flatten)]
    pub shape: TypeShape,
}

impl TypeDefinition {
    pub fn new(id: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            id: id.into(),
            description: None,
            experimental: false,
            deprecated: false,
            shape,
        }
    }
}

/// A property of an object type, or a command/event parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub optional: bool,

    #[serde(default)]
    pub experimental: bool,

    #[serde(default)]
    pub deprecated: bool,

    #[serde(flatten)]
    pub shape: TypeShape,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            description: None,
            optional: false,
            experimental: false,
            deprecated: false,
            shape,
        }
    }

    /// Marks the property optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// The keys a shape is spelled with in the JSON schema.
#[derive(Debug, Deserialize)]
struct RawShape {
    #[serde(rename = "$ref")]
    reference: Option<String>,

    #[serde(rename = "type")]
    type_name: Option<String>,

    #[serde(rename = "enum")]
    enum_values: Option<Vec<String>>,

    items: Option<Box<RawShape>>,

    properties: Option<Vec<PropertyDefinition>>,
}

impl TryFrom<RawShape> for TypeShape {
    type Error = String;

    fn try_from(raw: RawShape) -> Result<Self, Self::Error> {
        if let Some(reference) = raw.reference {
            return TypeShape::reference(&reference);
        }

        let type_name = raw
            .type_name
            .ok_or_else(|| "expected either `$ref` or `type`".to_string())?;

        match (type_name.as_str(), raw.enum_values) {
            ("string", Some(values)) => Ok(TypeShape::Enum(values)),
            (other, Some(_)) => Err(format!("`enum` is only supported on strings, found '{}'", other)),
            ("array", None) => {
                let items = raw
                    .items
                    .ok_or_else(|| "array type is missing `items`".to_string())?;
                Ok(TypeShape::array(TypeShape::try_from(*items)?))
            }
            ("object", None) => Ok(TypeShape::Object(raw.properties.unwrap_or_default())),
            (name, None) => Primitive::from_name(name)
                .map(TypeShape::Primitive)
                .ok_or_else(|| format!("unknown type '{}'", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape(value: serde_json::Value) -> Result<TypeShape, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_primitive_shapes() {
        assert_eq!(shape(json!({ "type": "integer" })).unwrap(), TypeShape::Primitive(Primitive::Integer));
        assert_eq!(shape(json!({ "type": "binary" })).unwrap(), TypeShape::Primitive(Primitive::Binary));
    }

    #[test]
    fn test_object_without_properties() {
        assert_eq!(shape(json!({ "type": "object" })).unwrap(), TypeShape::Object(vec![]));
    }

    #[test]
    fn test_array_of_reference() {
        let parsed = shape(json!({ "type": "array", "items": { "$ref": "Page.FrameId" } })).unwrap();
        assert_eq!(parsed, TypeShape::array(TypeShape::Reference(TypeReference::qualified("Page", "FrameId"))));
        assert_eq!(parsed.references()[0].id(), "FrameId");
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(shape(json!({ "type": "array" })).is_err());
        assert!(shape(json!({ "type": "integer", "enum": ["1"] })).is_err());
        assert!(shape(json!({ "type": "tuple" })).is_err());
        assert!(shape(json!({ "description": "nothing" })).is_err());
    }

    #[test]
    fn test_type_definition_flattened() {
        let def: TypeDefinition = serde_json::from_value(json!({
            "id": "Cookie",
            "type": "object",
            "experimental": true,
            "properties": [
                { "name": "name", "type": "string" },
                { "name": "expires", "type": "number", "optional": true }
            ]
        }))
        .unwrap();

        assert_eq!(def.id, "Cookie");
        assert!(def.experimental);
        let TypeShape::Object(properties) = &def.shape else {
            panic!("expected object shape");
        };
        assert_eq!(properties.len(), 2);
        assert!(properties[1].optional);
        assert_eq!(properties[1].shape, TypeShape::Primitive(Primitive::Number));
    }

    #[test]
    fn test_references_include_inline_objects() {
        let nested = TypeShape::Object(vec![
            PropertyDefinition::new("frame", TypeShape::reference("Page.FrameId").unwrap()),
            PropertyDefinition::new("ids", TypeShape::array(TypeShape::reference("NodeId").unwrap())),
        ]);
        let ids: Vec<String> = nested.references().iter().map(|r| r.to_string()).collect();
        assert_eq!(ids, vec!["Page.FrameId", "NodeId"]);
    }
}
