//! Class-name derivation for generated artifacts.
//!
//! The upstream generator names classes with an inconsistent but fixed scheme
//! (`lw_m2m_*`, `url_*` and friends get special casing). Index-registry import
//! lines must match it byte for byte, so the scheme is reproduced here as an
//! ordered table of rules: the first rule whose matcher accepts the file stem
//! decides the class name.
//!
//! ```
//! use tb_rest_merge::naming::class_name_for;
//!
//! assert_eq!(class_name_for("device_controller_api.py").as_deref(), Some("DeviceControllerApi"));
//! assert_eq!(class_name_for("url_link.py").as_deref(), Some("URLLink"));
//! assert_eq!(class_name_for("__init__.py"), None);
//! ```

/// One entry of the naming table.
pub struct NamingRule {
    /// Short identifier, used in debug logs and tests.
    pub name: &'static str,
    matches: fn(&str) -> bool,
    derive: fn(&str) -> Option<String>,
}

impl NamingRule {
    /// Whether this rule applies to `stem`.
    pub fn matches(&self, stem: &str) -> bool {
        (self.matches)(stem)
    }

    /// Class name this rule derives for `stem`; `None` means "no class".
    pub fn derive(&self, stem: &str) -> Option<String> {
        (self.derive)(stem)
    }
}

/// Naming rules in evaluation order.
pub static RULES: [NamingRule; 6] = [
    NamingRule {
        name: "lw_m2m",
        matches: |stem| stem.contains("lw_m2m"),
        derive: derive_lw_m2m,
    },
    NamingRule {
        name: "lwm_2m",
        matches: |stem| stem.contains("lwm_2m"),
        derive: derive_lwm_2m,
    },
    NamingRule {
        name: "url_or_uri",
        matches: |stem| stem == "url" || stem == "uri",
        derive: |stem| Some(stem.to_uppercase()),
    },
    NamingRule {
        name: "contains_url",
        matches: |stem| stem.contains("url"),
        derive: derive_url_prefix,
    },
    NamingRule {
        name: "registry",
        matches: |stem| stem == "__init__",
        derive: |_| None,
    },
    NamingRule {
        name: "default",
        matches: |_| true,
        derive: |stem| Some(title_segments(stem)),
    },
];

// lw_m2m_instance -> LwM2mInstance
fn derive_lw_m2m(stem: &str) -> Option<String> {
    Some(format!(
        "{}{}{}",
        title_segments(slice(stem, 0, 5)),
        slice(stem, 5, 6),
        title_segments(slice(stem, 6, usize::MAX))
    ))
}

// lwm_2m_rpc_request -> Lwm2mRpcRequest
fn derive_lwm_2m(stem: &str) -> Option<String> {
    Some(format!(
        "{}{}{}{}",
        slice(stem, 0, 1).to_uppercase(),
        slice(stem, 1, 3),
        slice(stem, 4, 6),
        title_segments(slice(stem, 6, usize::MAX))
    ))
}

// url_link -> URLLink
fn derive_url_prefix(stem: &str) -> Option<String> {
    Some(format!(
        "{}{}",
        slice(stem, 0, 3).to_uppercase(),
        title_segments(slice(stem, 3, usize::MAX))
    ))
}

/// Strip everything from the first `.` on.
pub fn file_stem(filename: &str) -> &str {
    filename.split('.').next().unwrap_or(filename)
}

/// First rule of [`RULES`] that applies to `stem`.
pub fn rule_for(stem: &str) -> &'static NamingRule {
    RULES
        .iter()
        .find(|rule| rule.matches(stem))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Class name exported by a generated file, or `None` for the registry file.
pub fn class_name_for(filename: &str) -> Option<String> {
    let stem = file_stem(filename);
    rule_for(stem).derive(stem)
}

/// Python `str.title()`: a cased character is uppercased when it follows an
/// uncased one and lowercased otherwise.
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased && !prev_cased {
            out.extend(ch.to_uppercase());
        } else if cased {
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

/// Title-case every `_`-separated segment and concatenate them.
pub fn title_segments(s: &str) -> String {
    s.split('_').map(title).collect()
}

/// Character slice with Python's clamping semantics.
fn slice(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    let start = byte_at(start);
    let end = byte_at(end).max(start);
    &s[start..end]
}
