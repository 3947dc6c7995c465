//! Tool registry for dynamic dispatch by name.

use crate::error::ToolError;
use crate::schema::input_schema_for;
use crate::tool::Tool;
use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Type-erased tool for dynamic dispatch.
pub trait ErasedTool: Send + Sync {
    /// Get the tool's name.
    fn name(&self) -> &'static str;

    /// Get the tool's description.
    fn description(&self) -> &'static str;

    /// Get the input JSON schema (always object-root).
    fn input_schema(&self) -> &Map<String, Value>;

    /// Call the tool with JSON arguments.
    fn call_json(&self, args: Value) -> BoxFuture<'static, Result<Value, ToolError>>;
}

/// Registry of tools keyed by name.
pub struct ToolRegistry {
    map: BTreeMap<String, Arc<dyn ErasedTool>>,
}

impl ToolRegistry {
    /// Create a new registry builder.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// List all tool names in the registry, sorted.
    pub fn list_names(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedTool>> {
        self.map.get(name)
    }

    /// Iterate over registered tools in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ErasedTool>> {
        self.map.values()
    }

    /// Dispatch a tool call using JSON arguments.
    ///
    /// `null` arguments are treated as an empty object.
    pub async fn dispatch_json(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let entry = self
            .map
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        entry.call_json(args).await
    }

    /// Check if a tool is registered by name.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Get the number of registered tools.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Builder for constructing a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    items: Vec<Arc<dyn ErasedTool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool whose input is deserializable and whose output is
    /// serializable. The input schema is generated once, here.
    #[must_use]
    pub fn register<T>(mut self, tool: T) -> Self
    where
        T: Tool + Clone,
        T::Input: DeserializeOwned + schemars::JsonSchema,
        T::Output: Serialize,
    {
        struct Impl<T: Tool> {
            tool: T,
            schema: Map<String, Value>,
        }

        impl<T> ErasedTool for Impl<T>
        where
            T: Tool + Clone,
            T::Input: DeserializeOwned,
            T::Output: Serialize,
        {
            fn name(&self) -> &'static str {
                T::NAME
            }

            fn description(&self) -> &'static str {
                T::DESCRIPTION
            }

            fn input_schema(&self) -> &Map<String, Value> {
                &self.schema
            }

            fn call_json(&self, args: Value) -> BoxFuture<'static, Result<Value, ToolError>> {
                let args = if args.is_null() {
                    Value::Object(Map::new())
                } else {
                    args
                };

                match serde_json::from_value::<T::Input>(args) {
                    Err(e) => Box::pin(async move { Err(ToolError::invalid_input(e)) }),
                    Ok(input) => {
                        let fut = self.tool.clone().call(input);
                        Box::pin(async move {
                            let out = fut.await?;
                            serde_json::to_value(out).map_err(ToolError::internal)
                        })
                    }
                }
            }
        }

        self.items.push(Arc::new(Impl {
            schema: input_schema_for::<T::Input>(),
            tool,
        }));
        self
    }

    /// Build the registry. A later registration under the same name wins.
    pub fn finish(self) -> ToolRegistry {
        let map = self
            .items
            .into_iter()
            .map(|erased| (erased.name().to_string(), erased))
            .collect();
        ToolRegistry { map }
    }
}
