//! JSON-RPC request handling and the tool surface

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};
use unitsnap::{
    AppState, ConversionRequest, ConverterDescriptor, ConvertParams, Snap, Storage, StorageError, Theme,
    INVALID_INPUT,
};
use unitsnap_core::Value;

pub const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "unitsnap";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    pub fn parse_error(details: impl std::fmt::Display) -> Self {
        Self { code: -32700, message: format!("Parse error: {}", details), data: None }
    }

    fn method_not_found(method: &str) -> Self {
        Self { code: -32601, message: format!("Method not found: {}", method), data: None }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: -32602, message: message.into(), data: None }
    }
}

impl McpResponse {
    pub fn failure(id: Option<JsonValue>, error: McpError) -> Self {
        Self { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
    }
}

/// Tool result whose only content is `text`
fn text_result(text: impl Into<String>, data: JsonValue, is_error: bool) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text.into() }],
        "data": data,
        "isError": is_error
    })
}

fn storage_failure(e: StorageError) -> JsonValue {
    warn!(error = %e, "state was not saved");
    text_result(format!("Could not save state: {}", e), JsonValue::Null, true)
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

/// Raw input as typed by a user: strings pass through, numbers are rendered
fn raw_input(args: &JsonValue) -> Result<String, McpError> {
    match args.get("value") {
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(JsonValue::Number(n)) => Ok(n.to_string()),
        _ => Err(McpError::invalid_params("Missing value argument (string or number)")),
    }
}

fn descriptor_json(descriptor: &ConverterDescriptor) -> JsonValue {
    json!({
        "id": descriptor.id,
        "title": descriptor.title,
        "description": descriptor.description,
        "type": descriptor.kind.name(),
        "units": descriptor.kind.unit_options(),
    })
}

fn descriptor_listing(descriptors: &[&ConverterDescriptor]) -> String {
    descriptors
        .iter()
        .map(|d| format!("- {}: {}", d.id, d.card_title()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") {
                out.push_str(&format!("# {}\n\n", n));
            }
            if let Some(Value::Text(d)) = map.get("description") {
                out.push_str(&format!("{}\n\n", d));
            }
            if let Some(Value::Text(u)) = map.get("usage") {
                out.push_str(&format!("**Usage:** `{}`\n\n", u));
            }
            if let Some(Value::Object(categories)) = map.get("functions") {
                for (category, names) in categories {
                    let names: Vec<_> = names.as_list().unwrap_or_default().iter().filter_map(Value::as_text).collect();
                    out.push_str(&format!("## {}\n{}\n\n", category, names.join(", ")));
                }
            }
            out
        }
        Value::Error(e) => format!("Error: {}", e.message),
        other => other.to_string(),
    }
}

/// Stateful MCP server: a conversion engine plus the persisted app state
pub struct Server<S: Storage> {
    snap: Snap,
    state: AppState<S>,
}

impl<S: Storage> Server<S> {
    pub fn new(snap: Snap, state: AppState<S>) -> Self {
        Self { snap, state }
    }

    pub fn state(&self) -> &AppState<S> {
        &self.state
    }

    pub fn handle_request(&mut self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => self.handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => Ok(tools_list()),
            "tools/call" => self.handle_tool_call(&request.params),

            _ => Err(McpError::method_not_found(&request.method)),
        };

        match result {
            Ok(r) => McpResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id.clone(),
                result: Some(r),
                error: None,
            },
            Err(e) => McpResponse::failure(request.id.clone(), e),
        }
    }

    fn handle_initialize(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let client_info = params
            .as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");

        // Use client's protocol version for compatibility
        let client_protocol = params
            .as_ref()
            .and_then(|p| p.get("protocolVersion"))
            .and_then(|v| v.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        info!(client = client_info, protocol = client_protocol, "client connected");

        Ok(json!({
            "protocolVersion": client_protocol,
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
                "description": "Unit, number, text and color conversions"
            },
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "instructions": "UnitSnap converts values between units. Use 'list_converters' or 'search' to find a converter id and its unit keys, then 'convert'. Linear conversions are kept in a short history."
        }))
    }

    fn handle_tool_call(&mut self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref().ok_or_else(|| McpError::invalid_params("Missing params"))?;
        let name = required_str(params, "name").map_err(|_| McpError::invalid_params("Missing tool name"))?;
        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        debug!(tool = name, "tool call");
        match name {
            "convert" => self.tool_convert(&args),
            "list_converters" => Ok(self.tool_list_converters()),
            "search" => self.tool_search(&args),
            "call" => self.tool_call(&args),
            "help" => Ok(self.tool_help(&args)),
            "history" => Ok(self.tool_history()),
            "clear_history" => Ok(self.tool_clear_history()),
            "export_history" => Ok(self.tool_export_history()),
            "set_theme" => self.tool_set_theme(&args),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn tool_convert(&mut self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let converter = required_str(args, "converter")?;
        let request = ConversionRequest::new(converter, raw_input(args)?, required_str(args, "from")?, required_str(args, "to")?);
        let params = match args.get("base_font_size").and_then(|v| v.as_f64()) {
            Some(size) => ConvertParams::default().with_base_font_size(size),
            None => ConvertParams::default(),
        };

        let descriptor = match self.state.open(converter) {
            Ok(d) => d,
            Err(e) => return Ok(text_result(e.to_string(), json!({ "error": e }), true)),
        };

        let conversion = match self.snap.convert_request(&request, &params) {
            Ok(c) => c,
            Err(e) => {
                return Ok(text_result(
                    format!("{}: {}", INVALID_INPUT, e.message),
                    json!({ "result": INVALID_INPUT, "error": e }),
                    true,
                ))
            }
        };

        let recorded = match self.state.record(descriptor, &request, &conversion) {
            Ok(recorded) => recorded,
            Err(e) => {
                warn!(error = %e, "history was not saved");
                false
            }
        };

        let compare: Vec<JsonValue> = conversion
            .compare
            .iter()
            .map(|c| json!({ "key": c.key, "unit": c.name, "value": c.formatted }))
            .collect();

        Ok(text_result(
            conversion.info.clone(),
            json!({
                "result": conversion.text,
                "value": conversion.value.to_json(),
                "info": conversion.info,
                "compare": compare,
                "preview": conversion.preview,
                "recorded": recorded,
            }),
            false,
        ))
    }

    fn tool_list_converters(&self) -> JsonValue {
        let all: Vec<_> = self.snap.catalog().iter().collect();
        text_result(descriptor_listing(&all), all.iter().map(|d| descriptor_json(d)).collect(), false)
    }

    fn tool_search(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let query = required_str(args, "query")?;
        let found = self.snap.search(query);
        let text = if found.is_empty() {
            format!("No converters match '{}'", query)
        } else {
            descriptor_listing(&found)
        };
        Ok(text_result(text, found.iter().map(|d| descriptor_json(d)).collect(), false))
    }

    fn tool_call(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let name = required_str(args, "name")?;
        let call_args: Vec<Value> = args
            .get("args")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().map(Value::from_json).collect())
            .unwrap_or_default();

        let result = self.snap.call(name, &call_args);
        let text = match &result {
            Value::Error(e) => e.to_string(),
            other => self.snap.format(other),
        };
        Ok(text_result(text, result.to_json(), result.is_error()))
    }

    fn tool_help(&self, args: &JsonValue) -> JsonValue {
        let name = args.get("name").and_then(|v| v.as_str());
        let help = self.snap.help(name);
        text_result(format_help(&help), help.to_json(), help.is_error())
    }

    fn tool_history(&self) -> JsonValue {
        let history = self.state.history();
        let text = if history.is_empty() {
            "No conversions yet".to_string()
        } else {
            history
                .iter()
                .map(|e| format!("{} | {} = {} | {}", e.converter, e.from, e.to, e.time))
                .collect::<Vec<_>>()
                .join("\n")
        };
        let data = serde_json::to_value(history).unwrap_or(JsonValue::Null);
        text_result(text, data, false)
    }

    fn tool_clear_history(&mut self) -> JsonValue {
        match self.state.clear_history() {
            Ok(()) => text_result("History cleared", JsonValue::Null, false),
            Err(e) => storage_failure(e),
        }
    }

    fn tool_export_history(&self) -> JsonValue {
        let csv = self.state.export_csv();
        text_result(csv.clone(), json!({ "filename": "conversion-history.csv", "csv": csv }), false)
    }

    fn tool_set_theme(&mut self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let requested = required_str(args, "theme")?;
        let saved = if requested.trim() == "toggle" {
            self.state.toggle_theme().map(|_| ())
        } else {
            let theme: Theme = requested.parse().map_err(|e: unitsnap_core::SnapError| McpError::invalid_params(e.message))?;
            self.state.set_theme(theme)
        };

        Ok(match saved {
            Ok(()) => {
                let theme = self.state.theme();
                text_result(format!("Theme: {}", theme), json!({ "theme": theme }), false)
            }
            Err(e) => storage_failure(e),
        })
    }
}

fn tools_list() -> JsonValue {
    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value with one converter. Returns the result, an info line, a quick comparison for unit tables and a preview for colors.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "converter": { "type": "string", "description": "Converter id, e.g. 'length' or 'temperature'" },
                        "value": { "type": ["string", "number"], "description": "Input exactly as a user would type it" },
                        "from": { "type": "string", "description": "Source unit key" },
                        "to": { "type": "string", "description": "Target unit key" },
                        "base_font_size": { "type": "number", "description": "Pixels per rem/em (default: 16)" }
                    },
                    "required": ["converter", "value", "from", "to"]
                }
            },
            {
                "name": "list_converters",
                "description": "List every converter with its unit keys",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "search",
                "description": "Find converters by keyword or title (case-insensitive)",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string" }
                    },
                    "required": ["query"]
                }
            },
            {
                "name": "call",
                "description": "Call a conversion function by name with positional arguments",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "Function name, e.g. 'to_roman'" },
                        "args": { "type": "array", "description": "Positional arguments" }
                    },
                    "required": ["name"]
                }
            },
            {
                "name": "help",
                "description": "Documentation for one function, or all functions by category",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" }
                    }
                }
            },
            {
                "name": "history",
                "description": "Recent conversions, newest first",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "clear_history",
                "description": "Forget every recorded conversion",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "export_history",
                "description": "History as CSV (Converter,From,To,Time)",
                "inputSchema": { "type": "object", "properties": {} }
            },
            {
                "name": "set_theme",
                "description": "Set the light/dark theme, or toggle it",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "theme": { "type": "string", "enum": ["light", "dark", "toggle"] }
                    },
                    "required": ["theme"]
                }
            }
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitsnap::{MemoryStorage, THEME_KEY};

    fn server() -> Server<MemoryStorage> {
        Server::new(Snap::default(), AppState::load(MemoryStorage::new()))
    }

    fn request(method: &str, params: JsonValue) -> McpRequest {
        serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        }))
        .unwrap()
    }

    fn call_tool(server: &mut Server<MemoryStorage>, name: &str, arguments: JsonValue) -> JsonValue {
        let response = server.handle_request(&request("tools/call", json!({ "name": name, "arguments": arguments })));
        assert!(response.error.is_none(), "{:?}", response.error);
        response.result.unwrap()
    }

    fn text(result: &JsonValue) -> &str {
        result["content"][0]["text"].as_str().unwrap()
    }

    #[test]
    fn test_initialize_echoes_protocol() {
        let mut server = server();
        let response = server.handle_request(&request("initialize", json!({ "protocolVersion": "2024-11-05" })));
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "unitsnap");
    }

    #[test]
    fn test_unknown_method() {
        let mut server = server();
        let response = server.handle_request(&request("resources/list", JsonValue::Null));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_tools_list_names() {
        let list = tools_list();
        let names: Vec<_> = list["tools"].as_array().unwrap().iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(
            names,
            vec![
                "convert", "list_converters", "search", "call", "help", "history", "clear_history", "export_history",
                "set_theme"
            ]
        );
    }

    #[test]
    fn test_convert_records_history() {
        let mut server = server();
        let result = call_tool(
            &mut server,
            "convert",
            json!({ "converter": "length", "value": 10, "from": "kilometer", "to": "mile" }),
        );
        assert_eq!(result["isError"], false);
        assert_eq!(result["data"]["result"], "6.21371");
        assert_eq!(result["data"]["recorded"], true);
        let compare = result["data"]["compare"].as_array().unwrap();
        assert_eq!(compare.len(), 2);
        assert_eq!(compare[0]["unit"], "Meter (m)");
        assert_eq!(text(&result), "10 Kilometer (km) = 6.21371 Mile (mi)");

        let history = call_tool(&mut server, "history", json!({}));
        assert_eq!(history["data"][0]["converter"], "Length");
        assert_eq!(history["data"][0]["from"], "10 kilometer");
        assert_eq!(server.state().current().map(|d| d.id), Some("length"));
    }

    #[test]
    fn test_convert_failure_is_tool_error() {
        let mut server = server();
        let result = call_tool(
            &mut server,
            "convert",
            json!({ "converter": "roman-numerals", "value": "4000", "from": "decimal", "to": "roman" }),
        );
        assert_eq!(result["isError"], true);
        assert_eq!(result["data"]["result"], INVALID_INPUT);
        assert!(text(&result).starts_with(INVALID_INPUT));
        assert!(server.state().history().is_empty());
    }

    #[test]
    fn test_convert_non_linear_not_recorded() {
        let mut server = server();
        let result = call_tool(
            &mut server,
            "convert",
            json!({ "converter": "color", "value": "#FF5733", "from": "hex", "to": "rgb" }),
        );
        assert_eq!(result["data"]["result"], "rgb(255, 87, 51)");
        assert_eq!(result["data"]["preview"], "#ff5733");
        assert_eq!(result["data"]["recorded"], false);
    }

    #[test]
    fn test_convert_missing_argument() {
        let mut server = server();
        let response = server.handle_request(&request(
            "tools/call",
            json!({ "name": "convert", "arguments": { "converter": "length", "value": "1" } }),
        ));
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[test]
    fn test_search_and_list() {
        let mut server = server();
        let all = call_tool(&mut server, "list_converters", json!({}));
        assert_eq!(all["data"].as_array().unwrap().len(), 27);

        let found = call_tool(&mut server, "search", json!({ "query": "kelvin" }));
        assert_eq!(found["data"][0]["id"], "temperature");

        let none = call_tool(&mut server, "search", json!({ "query": "zzz" }));
        assert!(text(&none).starts_with("No converters"));
    }

    #[test]
    fn test_call_and_help() {
        let mut server = server();
        let result = call_tool(&mut server, "call", json!({ "name": "to_roman", "args": [1994] }));
        assert_eq!(text(&result), "MCMXCIV");

        let missing = call_tool(&mut server, "call", json!({ "name": "to_klingon" }));
        assert_eq!(missing["isError"], true);

        let help = call_tool(&mut server, "help", json!({ "name": "to_morse" }));
        assert!(text(&help).starts_with("# to_morse"));
    }

    #[test]
    fn test_history_export_and_clear() {
        let mut server = server();
        call_tool(&mut server, "convert", json!({ "converter": "weight", "value": "1", "from": "kilogram", "to": "gram" }));

        let csv = call_tool(&mut server, "export_history", json!({}));
        assert!(text(&csv).starts_with("Converter,From,To,Time\n\"Weight / Mass\",\"1 kilogram\",\"1000 gram\""));

        call_tool(&mut server, "clear_history", json!({}));
        assert!(server.state().history().is_empty());
        assert_eq!(text(&call_tool(&mut server, "history", json!({}))), "No conversions yet");
    }

    #[test]
    fn test_set_theme() {
        let mut server = server();
        let result = call_tool(&mut server, "set_theme", json!({ "theme": "toggle" }));
        assert_eq!(result["data"]["theme"], "dark");
        assert_eq!(server.state().storage().load(THEME_KEY).unwrap().as_deref(), Some("dark"));

        call_tool(&mut server, "set_theme", json!({ "theme": "light" }));
        assert_eq!(server.state().theme(), Theme::Light);

        let response = server.handle_request(&request(
            "tools/call",
            json!({ "name": "set_theme", "arguments": { "theme": "sepia" } }),
        ));
        assert_eq!(response.error.unwrap().code, -32602);
    }
}
