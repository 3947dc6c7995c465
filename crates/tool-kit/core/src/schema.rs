//! Input schema generation for MCP tool listings.

use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use schemars::transform::RestrictFormats;
use serde_json::{Map, Value};

/// Generates the input schema for `T` as a JSON object.
///
/// MCP requires an object-root schema. Inputs that don't produce one (unit types,
/// scalars) are advertised as an object with no properties.
pub fn input_schema_for<T: JsonSchema>() -> Map<String, Value> {
    let generator = SchemaSettings::draft2020_12()
        .with_transform(RestrictFormats::default())
        .into_generator();
    let root = generator.into_root_schema_for::<T>();

    match serde_json::to_value(&root) {
        Ok(Value::Object(mut map)) if is_object_root(&map) => {
            map.remove("$schema");
            map
        }
        _ => empty_object_schema(),
    }
}

fn is_object_root(map: &Map<String, Value>) -> bool {
    map.get("type").and_then(Value::as_str) == Some("object")
}

fn empty_object_schema() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("type".into(), Value::String("object".into()));
    map.insert("properties".into(), Value::Object(Map::new()));
    map
}
