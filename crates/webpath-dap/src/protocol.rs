//! DAP protocol message types.
//!
//! Only the messages the path transformer reads or rewrites are modelled
//! here. Field names follow the Debug Adapter Protocol wire format via
//! serde `camelCase` renaming.

use serde::{Deserialize, Serialize};

use crate::error::DapError;
use crate::mapping::PathMapping;

// ---------------------------------------------------------------------------
// Launch / attach
// ---------------------------------------------------------------------------

/// Arguments for the `launch` request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequestArguments {
    /// Launch without debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_debug: Option<bool>,
    /// Restart data (for reconnect).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "__restart")]
    pub restart: Option<serde_json::Value>,
    /// Page or entry URL the target loads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Local directory the target's scripts are served from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_root: Option<String>,
    /// Explicit URL-prefix to local-directory rules.
    #[serde(default, skip_serializing_if = "PathMapping::is_empty")]
    pub path_mapping: PathMapping,
}

impl LaunchRequestArguments {
    /// Parse raw `launch` arguments as received from the client.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DapError> {
        serde_json::from_value(value).map_err(|e| DapError::InvalidArguments {
            command: "launch".into(),
            reason: e.to_string(),
        })
    }
}

/// Arguments for the `attach` request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachRequestArguments {
    /// Restart data (for reconnect).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "__restart")]
    pub restart: Option<serde_json::Value>,
    /// Port of the target's debugging endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// URL of the page to attach to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Local directory the target's scripts are served from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_root: Option<String>,
    /// Explicit URL-prefix to local-directory rules.
    #[serde(default, skip_serializing_if = "PathMapping::is_empty")]
    pub path_mapping: PathMapping,
}

impl AttachRequestArguments {
    /// Parse raw `attach` arguments as received from the client.
    pub fn from_value(value: serde_json::Value) -> Result<Self, DapError> {
        serde_json::from_value(value).map_err(|e| DapError::InvalidArguments {
            command: "attach".into(),
            reason: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Breakpoints
// ---------------------------------------------------------------------------

/// Arguments for the `setBreakpoints` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetBreakpointsArguments {
    /// The source to set breakpoints for.
    pub source: Source,
    /// Breakpoints to set (replaces all previous ones).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakpoints: Option<Vec<SourceBreakpoint>>,
    /// Whether the underlying source was modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_modified: Option<bool>,
}

/// A source breakpoint (client-side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBreakpoint {
    /// The source line of the breakpoint.
    pub line: i64,
    /// Optional column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<i64>,
    /// Condition expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Hit condition expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_condition: Option<String>,
    /// Log message (logpoint).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_message: Option<String>,
}

// ---------------------------------------------------------------------------
// Stack traces
// ---------------------------------------------------------------------------

/// A stack frame in the call stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    /// Unique identifier for the stack frame.
    pub id: i64,
    /// Name of the frame (function name).
    pub name: String,
    /// Source location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Line within the source.
    pub line: i64,
    /// Column within the source.
    pub column: i64,
}

/// Response body for `stackTrace`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTraceResponseBody {
    /// Frames, innermost first.
    pub stack_frames: Vec<StackFrame>,
    /// Total number of frames available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_frames: Option<i64>,
}

/// A source location.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Short name of the source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File system path or target URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source reference (for sources without a file path).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_reference: Option<i64>,
    /// Where the source came from, e.g. "internal module".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl Source {
    /// A source identified only by its path.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_launch_args_from_client_json() {
        let raw = serde_json::json!({
            "url": "http://localhost:8080/index.html",
            "webRoot": "/home/user/proj",
            "pathMapping": {
                "/app/": "/home/user/proj/src",
                "/": "/home/user/proj"
            }
        });
        let args = LaunchRequestArguments::from_value(raw).unwrap();
        assert_eq!(args.web_root.as_deref(), Some("/home/user/proj"));
        assert_eq!(args.url.as_deref(), Some("http://localhost:8080/index.html"));
        let prefixes: Vec<&str> = args.path_mapping.iter().map(|(p, _)| p).collect();
        assert_eq!(prefixes, vec!["/app/", "/"]);
    }

    #[test]
    fn protocol_launch_args_missing_mapping_defaults_empty() {
        let args = LaunchRequestArguments::from_value(serde_json::json!({})).unwrap();
        assert!(args.path_mapping.is_empty());
        assert!(args.web_root.is_none());
    }

    #[test]
    fn protocol_launch_args_rejects_wrong_shape() {
        let err = LaunchRequestArguments::from_value(serde_json::json!({"webRoot": 42}))
            .unwrap_err();
        assert!(matches!(err, DapError::InvalidArguments { ref command, .. } if command == "launch"));
    }

    #[test]
    fn protocol_attach_args_from_client_json() {
        let raw = serde_json::json!({"port": 9222, "webRoot": "/srv/www"});
        let args = AttachRequestArguments::from_value(raw).unwrap();
        assert_eq!(args.port, Some(9222));
        assert_eq!(args.web_root.as_deref(), Some("/srv/www"));
        assert!(args.path_mapping.is_empty());
    }

    #[test]
    fn protocol_attach_args_rejects_bad_mapping() {
        let raw = serde_json::json!({"pathMapping": {"/app/": 7}});
        let err = AttachRequestArguments::from_value(raw).unwrap_err();
        assert!(err.to_string().contains("attach"));
    }

    #[test]
    fn protocol_set_breakpoints_wire_names() {
        let raw = r#"{
            "source": {"path": "/home/user/proj/main.js", "sourceReference": 0},
            "breakpoints": [{"line": 3, "logMessage": "x={x}"}]
        }"#;
        let args: SetBreakpointsArguments = serde_json::from_str(raw).unwrap();
        assert_eq!(args.source.path.as_deref(), Some("/home/user/proj/main.js"));
        assert_eq!(args.source.source_reference, Some(0));
        let bps = args.breakpoints.unwrap();
        assert_eq!(bps[0].log_message.as_deref(), Some("x={x}"));
    }

    #[test]
    fn protocol_stack_trace_body_serde() {
        let body = StackTraceResponseBody {
            stack_frames: vec![StackFrame {
                id: 1,
                name: "main".into(),
                source: Some(Source {
                    name: Some("main.js".into()),
                    path: Some("http://localhost/app/main.js".into()),
                    source_reference: Some(1001),
                    origin: Some("remote".into()),
                }),
                line: 10,
                column: 1,
            }],
            total_frames: Some(1),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"stackFrames\""));
        assert!(json.contains("\"sourceReference\":1001"));
        let decoded: StackTraceResponseBody = serde_json::from_str(&json).unwrap();
        assert_eq!(body, decoded);
    }

    #[test]
    fn protocol_source_omits_cleared_fields() {
        let source = Source::from_path("/home/user/proj/main.js");
        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, r#"{"path":"/home/user/proj/main.js"}"#);
    }
}
