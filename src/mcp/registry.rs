//! Explicit tool registry.
//!
//! Maps a tool name to its description, input schema and handler. The
//! registry is built once when the server starts and only read afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use rmcp::schemars::{self, JsonSchema};
use serde_json::{Value, json};
use tracing::warn;

use crate::bridge::{BridgeResult, CardBridge, ErrorEnvelope};
use crate::trello::CardRepository;

pub type ToolFuture = BoxFuture<'static, BridgeResult<Value>>;

/// Every tool takes the shared bridge and raw JSON arguments.
pub type ToolHandler<R> = fn(Arc<CardBridge<R>>, Value) -> ToolFuture;

pub struct ToolEntry<R: CardRepository> {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Arc<JsonObject>,
    handler: ToolHandler<R>,
}

impl<R: CardRepository> ToolEntry<R> {
    /// Create an entry whose input schema is derived from `P`.
    pub fn new<P: JsonSchema>(
        name: &'static str,
        description: &'static str,
        handler: ToolHandler<R>,
    ) -> Self {
        Self {
            name,
            description,
            input_schema: Arc::new(object_schema::<P>()),
            handler,
        }
    }

    /// Tool description as advertised by `tools/list`.
    pub fn definition(&self) -> Tool {
        Tool::new(self.name, self.description, Arc::clone(&self.input_schema))
    }
}

fn object_schema<P: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(P)) {
        Ok(Value::Object(schema)) => schema,
        _ => {
            let mut schema = JsonObject::new();
            schema.insert("type".to_string(), json!("object"));
            schema
        }
    }
}

/// Wrap a handler outcome as MCP tool output.
///
/// Failures still produce a result: one text block holding an
/// [`ErrorEnvelope`], flagged with `isError`.
pub fn tool_result(outcome: BridgeResult<Value>) -> CallToolResult {
    match outcome {
        Ok(value) => CallToolResult::success(vec![Content::text(pretty(&value))]),
        Err(e) => {
            let envelope = serde_json::to_value(ErrorEnvelope::from(&e))
                .unwrap_or_else(|_| json!({ "error": e.to_string() }));
            CallToolResult::error(vec![Content::text(pretty(&envelope))])
        }
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

pub struct ToolRegistry<R: CardRepository> {
    tools: HashMap<&'static str, ToolEntry<R>>,
}

impl<R: CardRepository> Default for ToolRegistry<R> {
    fn default() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }
}

impl<R: CardRepository + 'static> ToolRegistry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool; a later registration under the same name replaces the
    /// earlier one.
    pub fn register(mut self, entry: ToolEntry<R>) -> Self {
        if self.tools.contains_key(entry.name) {
            warn!(tool = entry.name, "Tool registered twice, keeping the last one");
        }
        self.tools.insert(entry.name, entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolEntry<R>> {
        self.tools.get(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names in alphabetical order.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Tool definitions in alphabetical order.
    pub fn definitions(&self) -> Vec<Tool> {
        self.names()
            .into_iter()
            .filter_map(|name| self.tools.get(name))
            .map(ToolEntry::definition)
            .collect()
    }

    /// Invoke a tool. `None` means no tool with that name is registered.
    pub async fn call(
        &self,
        bridge: Arc<CardBridge<R>>,
        name: &str,
        arguments: Value,
    ) -> Option<CallToolResult> {
        let entry = self.tools.get(name)?;
        let outcome = (entry.handler)(bridge, arguments).await;
        Some(tool_result(outcome))
    }
}
