//! Static introspection of generated controller sources.
//!
//! Generated controllers are Python modules holding one class whose public
//! methods wrap REST endpoints. Rather than importing them, the exposed
//! operations are read straight from the source: every method defined at
//! class level, with its parameters taken from the `:param` list of its
//! docstring. The generator always documents `async_req` first, so that
//! entry is skipped, and everything from `:return` on is ignored.
//!
//! ```
//! use tb_rest_merge::introspect::parse_controller;
//!
//! let source = r#"
//! class DeviceControllerApi(object):
//!     def get_device_by_id(self, device_id, **kwargs):  # noqa: E501
//!         """Get Device (getDeviceById)  # noqa: E501
//!
//!         :param async_req bool
//!         :param str device_id: A string value representing the device id. (required)
//!         :return: Device
//!         """
//!         pass
//! "#;
//! let surface = parse_controller("device_controller_api", source).unwrap();
//! assert_eq!(surface.class_name, "DeviceControllerApi");
//! assert_eq!(surface.operations[0].param_names(), vec!["device_id"]);
//! ```

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^class\s+([A-Za-z_][A-Za-z0-9_]*)\s*[(:]").expect("valid class regex")
});

static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^    def\s+([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("valid method regex")
});

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+$").expect("valid numbered-suffix regex"));

/// Member-name marker of the low-level variants facades never expose.
const HTTP_INFO_MARKER: &str = "_with_http_info";

/// One documented parameter of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Documented type (`str`, `list[str]`, `DeviceCredentials`), if any
    pub type_name: Option<String>,
    pub name: String,
    /// Whether the description carries the `(required)` marker
    pub required: bool,
    pub description: String,
}

impl Parameter {
    /// Parse one `:param` entry such as
    /// `str device_id: A string value representing the device id. (required)`.
    pub fn parse(entry: &str) -> Parameter {
        let entry = entry.split_whitespace().collect::<Vec<_>>().join(" ");
        let (head, description) = match entry.split_once(':') {
            Some((head, description)) => (head.trim(), description.trim()),
            None => (entry.as_str(), ""),
        };
        let (type_name, name) = match head.rsplit_once(' ') {
            Some((type_name, name)) => (Some(type_name.trim().to_string()), name.to_string()),
            None => (None, head.to_string()),
        };
        Parameter {
            type_name,
            name,
            required: description.contains("(required)"),
            description: description.to_string(),
        }
    }
}

/// One exposed method of a controller.
///
/// Equality is by name and parameter-name sequence (order-sensitive): two
/// operations sharing a name but differing in shape are different operations.
#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    /// Module stem of the owning controller
    pub controller: String,
    pub params: Vec<Parameter>,
}

impl Operation {
    pub fn new(name: impl Into<String>, controller: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            controller: controller.into(),
            params,
        }
    }

    /// Parameter names in declaration order.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }
}

impl PartialEq for Operation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.param_names() == other.param_names()
    }
}

impl Eq for Operation {}

/// Callable surface of one generated controller.
#[derive(Debug, Clone)]
pub struct ControllerSurface {
    /// Module stem (`device_controller_api`)
    pub module: String,
    /// Name of the controller class defined in the module
    pub class_name: String,
    /// Exposed operations, sorted by name
    pub operations: Vec<Operation>,
}

/// Whether a member name is part of the public facade surface.
pub fn is_exposed(name: &str) -> bool {
    !name.starts_with("__") && !name.contains(HTTP_INFO_MARKER)
}

/// Parse the source of a generated controller module.
pub fn parse_controller(module: &str, source: &str) -> Result<ControllerSurface> {
    let introspection_error = |message: String| Error::Introspection {
        controller: module.to_string(),
        message,
    };

    let lines: Vec<&str> = source.lines().collect();
    let class_line = lines
        .iter()
        .position(|line| CLASS_RE.is_match(line))
        .ok_or_else(|| introspection_error("no class definition found".to_string()))?;
    let class_name = CLASS_RE
        .captures(lines[class_line])
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| introspection_error("no class definition found".to_string()))?;

    // A later definition of a name replaces the earlier one, as in Python.
    let mut operations = BTreeMap::new();
    let mut i = class_line + 1;
    while i < lines.len() {
        let line = lines[i];
        if starts_top_level_statement(line) {
            break;
        }
        let Some(caps) = METHOD_RE.captures(line) else {
            i += 1;
            continue;
        };
        let name = caps[1].to_string();

        let body_start = signature_end(&lines, i)
            .ok_or_else(|| introspection_error(format!("unterminated signature of '{}'", name)))?
            + 1;
        let (docstring, next) = read_docstring(&lines, body_start)
            .map_err(|message| introspection_error(format!("{} in '{}'", message, name)))?;
        i = next.max(i + 1);

        if is_exposed(&name) {
            let params = docstring
                .as_deref()
                .map(extract_params)
                .unwrap_or_default();
            operations.insert(name.clone(), Operation::new(name, module, params));
        }
    }

    Ok(ControllerSurface {
        module: module.to_string(),
        class_name,
        operations: operations.into_values().collect(),
    })
}

/// Parameters documented in a generated docstring.
///
/// The text before the first `:param ` and the first entry (`async_req`) are
/// dropped, everything from the first `:return` on is cut, and each remaining
/// entry is parsed with its whitespace collapsed.
pub fn extract_params(docstring: &str) -> Vec<Parameter> {
    let mut params = Vec::new();
    for piece in docstring.split(":param ").skip(2) {
        let (entry, returned) = match piece.split_once(":return") {
            Some((entry, _)) => (entry, true),
            None => (piece, false),
        };
        if !entry.trim().is_empty() {
            params.push(Parameter::parse(entry));
        }
        if returned {
            break;
        }
    }
    params
}

/// Names carrying a numeric suffix whose unsuffixed form is also exposed
/// (`save_device1` next to `save_device`), in operation order.
pub fn numbered_duplicates(operations: &[Operation]) -> Vec<String> {
    let names: HashSet<&str> = operations.iter().map(|op| op.name.as_str()).collect();
    operations
        .iter()
        .filter(|op| {
            NUMBERED_RE
                .find(&op.name)
                .map(|m| &op.name[..m.start()])
                .is_some_and(|base| !base.is_empty() && names.contains(base))
        })
        .map(|op| op.name.clone())
        .collect()
}

/// Drop the numbered duplicates reported by [`numbered_duplicates`].
pub fn collapse_numbered_duplicates(operations: Vec<Operation>) -> Vec<Operation> {
    let duplicates: HashSet<String> = numbered_duplicates(&operations).into_iter().collect();
    operations
        .into_iter()
        .filter(|op| !duplicates.contains(&op.name))
        .collect()
}

fn starts_top_level_statement(line: &str) -> bool {
    !line.is_empty()
        && !line.starts_with(char::is_whitespace)
        && !line.starts_with('#')
        && !line.starts_with('@')
}

/// Index of the line closing the `def` signature that starts at `start`.
fn signature_end(lines: &[&str], start: usize) -> Option<usize> {
    (start..lines.len()).find(|&j| {
        let code = lines[j].split('#').next().unwrap_or("");
        code.trim_end().ends_with(':')
    })
}

/// Read the docstring opening at the first non-blank line from `start`.
///
/// Returns the docstring text (if the body starts with one) and the index of
/// the first line after it.
fn read_docstring(lines: &[&str], start: usize) -> std::result::Result<(Option<String>, usize), String> {
    let Some(first) = (start..lines.len()).find(|&j| !lines[j].trim().is_empty()) else {
        return Ok((None, lines.len()));
    };
    let opening = lines[first].trim_start();
    let quote = if opening.starts_with("\"\"\"") {
        "\"\"\""
    } else if opening.starts_with("'''") {
        "'''"
    } else {
        return Ok((None, first));
    };

    let rest = &opening[quote.len()..];
    if let Some(end) = rest.find(quote) {
        return Ok((Some(rest[..end].to_string()), first + 1));
    }

    let mut text = String::from(rest);
    for (j, line) in lines.iter().enumerate().skip(first + 1) {
        text.push('\n');
        if let Some(end) = line.find(quote) {
            text.push_str(&line[..end]);
            return Ok((Some(text), j + 1));
        }
        text.push_str(line);
    }
    Err("unterminated docstring".to_string())
}
