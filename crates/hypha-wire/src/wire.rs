//! XML-RPC wire codec.
//!
//! Requests are a tiny fixed grammar, built by hand; responses are parsed
//! with `roxmltree`. Only the scalar types the renderer protocol actually
//! uses are modeled.

use crate::WireError;

/// A scalar wire value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Double(f64),
    Bool(bool),
    Str(String),
    /// An empty `<params>` response.
    Unit,
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Self::Str(s.into())
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Encode one `<methodCall>` document.
pub fn encode_request(method: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(128 + params.len() * 48);
    out.push_str("<?xml version=\"1.0\"?><methodCall><methodName>");
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param><value>");
        match param {
            Value::Int(v) => out.push_str(&format!("<int>{v}</int>")),
            Value::Double(v) => out.push_str(&format!("<double>{v}</double>")),
            Value::Bool(v) => out.push_str(&format!("<boolean>{}</boolean>", i32::from(*v))),
            Value::Str(s) => {
                out.push_str("<string>");
                out.push_str(&escape(s));
                out.push_str("</string>");
            }
            // Unit only ever comes back in responses.
            Value::Unit => debug_assert!(false, "unit is a response-only shape"),
        }
        out.push_str("</value></param>");
    }
    out.push_str("</params></methodCall>");
    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Parse one `<methodResponse>` document into its single return value.
///
/// A `<fault>` becomes [`WireError::Fault`]; a response with no params is
/// [`Value::Unit`].
pub fn parse_response(xml: &str) -> Result<Value, WireError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();
    if !root.has_tag_name("methodResponse") {
        return Err(WireError::Unexpected(format!(
            "root element is <{}>, expected <methodResponse>",
            root.tag_name().name()
        )));
    }

    if let Some(fault) = root.children().find(|n| n.has_tag_name("fault")) {
        return Err(parse_fault(fault));
    }

    let Some(params) = root.children().find(|n| n.has_tag_name("params")) else {
        return Ok(Value::Unit);
    };
    let Some(param) = params.children().find(|n| n.has_tag_name("param")) else {
        return Ok(Value::Unit);
    };
    let Some(value) = param.children().find(|n| n.has_tag_name("value")) else {
        return Err(WireError::Unexpected("<param> without <value>".to_string()));
    };
    parse_value(value)
}

fn parse_value(node: roxmltree::Node<'_, '_>) -> Result<Value, WireError> {
    let Some(typed) = node.children().find(|n| n.is_element()) else {
        // Untyped <value> content defaults to string per the protocol.
        return Ok(Value::Str(node.text().unwrap_or_default().to_string()));
    };

    let text = typed.text().unwrap_or_default().trim();
    match typed.tag_name().name() {
        "int" | "i4" => text
            .parse()
            .map(Value::Int)
            .map_err(|_| WireError::Unexpected(format!("bad int `{text}`"))),
        "double" => text
            .parse()
            .map(Value::Double)
            .map_err(|_| WireError::Unexpected(format!("bad double `{text}`"))),
        "boolean" => match text {
            "0" => Ok(Value::Bool(false)),
            "1" => Ok(Value::Bool(true)),
            other => Err(WireError::Unexpected(format!("bad boolean `{other}`"))),
        },
        "string" => Ok(Value::Str(typed.text().unwrap_or_default().to_string())),
        other => Err(WireError::Unexpected(format!(
            "unsupported value type <{other}>"
        ))),
    }
}

fn parse_fault(fault: roxmltree::Node<'_, '_>) -> WireError {
    let mut code = 0;
    let mut message = String::new();

    let members = fault
        .children()
        .find(|n| n.has_tag_name("value"))
        .and_then(|v| v.children().find(|n| n.has_tag_name("struct")))
        .map(|s| s.children().filter(|n| n.has_tag_name("member")).collect::<Vec<_>>())
        .unwrap_or_default();

    for member in members {
        let name = member
            .children()
            .find(|n| n.has_tag_name("name"))
            .and_then(|n| n.text())
            .unwrap_or_default();
        let value = member
            .children()
            .find(|n| n.has_tag_name("value"))
            .map(parse_value);
        match (name, value) {
            ("faultCode", Some(Ok(v))) => code = v.as_int().unwrap_or(0),
            ("faultString", Some(Ok(v))) => {
                message = v.as_str().unwrap_or_default().to_string();
            }
            _ => {}
        }
    }

    WireError::Fault { code, message }
}
