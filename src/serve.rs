//! Line-delimited JSON request server
//!
//! `supplystat serve` answers one request per input line so that a UI or
//! script can drive the aggregators interactively without reloading the
//! tables for every selection change.
//!
//! Each request is a JSON object:
//!
//! ```json
//! {"id": 1, "method": "costs", "params": {"skus": null, "suppliers": ["S1"]}}
//! ```
//!
//! and each response echoes the `id` with either a `result` or an `error`:
//!
//! ```json
//! {"id": 1, "result": {"procurement": 0.1, "shipping": 0.02, ...}}
//! {"id": 2, "error": {"code": -32601, "message": "Unknown method: foo"}}
//! ```
//!
//! Blank lines are skipped and end of input stops the loop.

use crate::aggregation::Aggregator;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use supplystat_core::error::Result;
use supplystat_core::selection::Selection;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Malformed JSON on the input line
pub const PARSE_ERROR: i64 = -32700;
/// Method name not recognised
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Params could not be read as a selection
pub const INVALID_PARAMS: i64 = -32602;
/// The result could not be encoded
pub const INTERNAL_ERROR: i64 = -32603;

const METHODS: [&str; 6] = [
    "report",
    "costs",
    "breakdown",
    "utilization",
    "options",
    "server_info",
];

/// A single request line
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Error payload of a failed request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
}

/// A single response line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorObject>,
}

impl Response {
    fn success(id: Value, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(ErrorObject {
                code,
                message: message.into(),
            }),
        }
    }
}

/// Request server over a loaded dataset
pub struct RequestServer {
    aggregator: Aggregator,
}

impl RequestServer {
    /// Create a server answering from the given aggregator
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }

    /// Dispatch a parsed request
    pub fn handle(&self, request: Request) -> Response {
        let Request { id, method, params } = request;
        debug!(method = %method, "Handling request");

        match method.as_str() {
            "report" | "costs" | "breakdown" => {
                let selection = match parse_selection(params) {
                    Ok(selection) => selection,
                    Err(e) => {
                        return Response::failure(id, INVALID_PARAMS, format!("Invalid params: {e}"));
                    }
                };
                let result = match method.as_str() {
                    "report" => serde_json::to_value(self.aggregator.report(&selection)),
                    "costs" => serde_json::to_value(self.aggregator.costs(&selection)),
                    _ => serde_json::to_value(self.aggregator.breakdown(&selection)),
                };
                into_response(id, result)
            }
            "utilization" => into_response(
                id,
                serde_json::to_value(self.aggregator.utilization())
                    .map(|rows| json!({ "utilization": rows })),
            ),
            "options" => into_response(
                id,
                serde_json::to_value(self.aggregator.dataset().options()),
            ),
            "server_info" => Response::success(
                id,
                json!({
                    "name": "supplystat",
                    "version": env!("CARGO_PKG_VERSION"),
                    "methods": METHODS,
                }),
            ),
            other => Response::failure(id, METHOD_NOT_FOUND, format!("Unknown method: {other}")),
        }
    }

    /// Handle one input line, returning the serialized response
    ///
    /// Returns `None` for blank lines.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Response::failure(Value::Null, PARSE_ERROR, format!("Parse error: {e}"))
            }
        };

        Some(serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"id":null,"error":{{"code":{INTERNAL_ERROR},"message":"Failed to serialize response: {e}"}}}}"#
            )
        }))
    }

    /// Answer requests from `reader` until end of input
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut handled = 0usize;

        while let Some(line) = lines.next_line().await? {
            let Some(response) = self.handle_line(&line) else {
                continue;
            };
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
            handled += 1;
        }

        info!(requests = handled, "Input closed, stopping server");
        Ok(())
    }

    /// Answer requests on stdin, writing responses to stdout
    pub async fn run_stdio(&self) -> Result<()> {
        info!("Serving requests on stdio");
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

fn parse_selection(params: Value) -> serde_json::Result<Selection> {
    if params.is_null() {
        return Ok(Selection::new());
    }
    serde_json::from_value(params)
}

fn into_response(id: Value, result: serde_json::Result<Value>) -> Response {
    match result {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::failure(id, INTERNAL_ERROR, format!("Failed to encode result: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use supplystat_core::dataset::{Dataset, SkuLineItem, SupplierSummary};
    use supplystat_core::types::{SkuId, SkuName, SupplierName};

    fn item(id: u32, sku: &str, supplier: &str, qty: f64, cost: f64) -> SkuLineItem {
        SkuLineItem {
            sku_id: SkuId::new(id),
            sku_name: SkuName::new(sku),
            supplier_name: SupplierName::new(supplier),
            order_quantity: qty,
            total_cost: cost,
        }
    }

    fn supplier(name: &str, procurement: f64, shipping: f64, containers: u64) -> SupplierSummary {
        SupplierSummary {
            supplier_name: SupplierName::new(name),
            procurement_cost: procurement,
            shipping_cost: shipping,
            total_cost: procurement + shipping,
            number_containers: containers,
            container_utilization: 0.5,
        }
    }

    fn server() -> RequestServer {
        let dataset = Dataset::new(
            vec![
                item(1, "Widget", "S1", 10.0, 40.0),
                item(1, "Widget", "S2", 5.0, 25.0),
                item(2, "Gadget", "S1", 2.0, 60.0),
            ],
            vec![supplier("S1", 100.0, 20.0, 3), supplier("S2", 50.0, 10.0, 1)],
            vec![],
        );
        RequestServer::new(Aggregator::new(Arc::new(dataset)))
    }

    fn respond(server: &RequestServer, line: &str) -> Value {
        serde_json::from_str(&server.handle_line(line).unwrap()).unwrap()
    }

    #[test]
    fn test_costs_request() {
        let server = server();
        let response = respond(
            &server,
            r#"{"id": 7, "method": "costs", "params": {"suppliers": ["S1"]}}"#,
        );
        assert_eq!(response["id"], 7);
        assert_eq!(response["result"]["containers"], 3);
        assert_eq!(response["result"]["source"], "supplier_summary");
        assert!(response.get("error").is_none());
    }

    #[test]
    fn test_missing_params_means_no_filter() {
        let server = server();
        let response = respond(&server, r#"{"id": "a", "method": "costs"}"#);
        assert_eq!(response["id"], "a");
        assert_eq!(response["result"]["containers"], 4);
    }

    #[test]
    fn test_sku_filter_drops_shipping() {
        let server = server();
        let response = respond(
            &server,
            r#"{"id": 1, "method": "costs", "params": {"skus": ["Widget"]}}"#,
        );
        assert!(response["result"]["shipping"].is_null());
        assert!(response["result"]["containers"].is_null());
        assert_eq!(response["result"]["source"], "sku_line_items");
    }

    #[test]
    fn test_unknown_method() {
        let server = server();
        let response = respond(&server, r#"{"id": 3, "method": "forecast"}"#);
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
        assert!(response.get("result").is_none());
    }

    #[test]
    fn test_invalid_params() {
        let server = server();
        let response = respond(
            &server,
            r#"{"id": 4, "method": "breakdown", "params": {"skus": "Widget"}}"#,
        );
        assert_eq!(response["id"], 4);
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_parse_error_has_null_id() {
        let server = server();
        let response = respond(&server, "{not json");
        assert!(response["id"].is_null());
        assert_eq!(response["error"]["code"], PARSE_ERROR);
    }

    #[test]
    fn test_encoding_failure_is_internal_error() {
        let encode_error = serde_json::from_str::<Value>("{").unwrap_err();
        let response = into_response(json!(9), Err(encode_error));
        assert_eq!(response.id, json!(9));
        assert_eq!(response.result, None);
        assert_eq!(response.error.map(|e| e.code), Some(INTERNAL_ERROR));
    }

    #[test]
    fn test_blank_line_is_skipped() {
        assert!(server().handle_line("   ").is_none());
    }

    #[test]
    fn test_options_and_server_info() {
        let server = server();
        let options = respond(&server, r#"{"id": 1, "method": "options"}"#);
        assert_eq!(options["result"]["skus"], json!(["Gadget", "Widget"]));
        assert_eq!(options["result"]["suppliers"], json!(["S1", "S2"]));

        let info = respond(&server, r#"{"id": 2, "method": "server_info"}"#);
        assert_eq!(info["result"]["name"], "supplystat");
        assert_eq!(info["result"]["methods"].as_array().unwrap().len(), METHODS.len());
    }

    #[test]
    fn test_utilization_ignores_params() {
        let server = server();
        let response = respond(
            &server,
            r#"{"id": 1, "method": "utilization", "params": {"suppliers": []}}"#,
        );
        assert_eq!(response["result"]["utilization"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_run_answers_each_line() {
        let server = server();
        let input = concat!(
            r#"{"id": 1, "method": "costs"}"#,
            "\n\n",
            r#"{"id": 2, "method": "breakdown", "params": {"skus": []}}"#,
            "\n",
        );
        let mut output = Vec::new();
        server.run(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["id"], 2);
        assert_eq!(lines[1]["result"]["series"], json!([]));
    }
}
