//! Facade accumulators and their rendering.
//!
//! A merge run builds three facade modules: a shared base client holding the
//! operations both editions agree on, and one client per edition holding the
//! operations only that edition has (or has with a different shape). Each is
//! collected in a [`FacadeAccumulator`] while controllers are reconciled and
//! rendered once at the end of the run by a [`FacadeRenderer`].

use crate::config::MergeConfig;
use crate::edition::{ArtifactCategory, Edition};
use crate::introspect::{Operation, Parameter};

/// Which of the three facades an accumulator feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacadeKind {
    /// Operations shared by both editions
    Base,
    /// Community-only operations
    Ce,
    /// Enterprise-only operations
    Pe,
}

impl FacadeKind {
    pub const ALL: [FacadeKind; 3] = [FacadeKind::Base, FacadeKind::Ce, FacadeKind::Pe];

    /// Accumulator receiving the edition-specific operations of `edition`.
    pub fn for_edition(edition: Edition) -> FacadeKind {
        match edition {
            Edition::Ce => FacadeKind::Ce,
            Edition::Pe => FacadeKind::Pe,
        }
    }
}

/// A controller class a facade instantiates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerRef {
    /// Module stem, also used as the facade attribute name
    pub module: String,
    pub class_name: String,
    pub edition: Edition,
}

/// One rendered facade method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodEntry {
    pub controller: String,
    pub name: String,
    pub source: String,
}

/// Append-only collection of facade methods for one output module.
#[derive(Debug, Clone)]
pub struct FacadeAccumulator {
    pub kind: FacadeKind,
    /// Output module name (`rest_client_base`)
    pub module_name: String,
    /// Class defined in the module (`RestClientBase`)
    pub class_name: String,
    /// Whether the class gets its own `__init__` instantiating controllers
    pub has_init_section: bool,
    /// Edition whose models the module imports
    pub edition: Edition,
    methods: Vec<MethodEntry>,
    controllers: Vec<ControllerRef>,
}

impl FacadeAccumulator {
    pub fn new(kind: FacadeKind) -> Self {
        let (module_name, class_name, has_init_section, edition) = match kind {
            FacadeKind::Base => ("rest_client_base", "RestClientBase", true, Edition::Ce),
            FacadeKind::Ce => ("rest_client_ce", "RestClientCE", false, Edition::Ce),
            FacadeKind::Pe => ("rest_client_pe", "RestClientPE", true, Edition::Pe),
        };
        Self {
            kind,
            module_name: module_name.to_string(),
            class_name: class_name.to_string(),
            has_init_section,
            edition,
            methods: Vec::new(),
            controllers: Vec::new(),
        }
    }

    /// Append a rendered method.
    pub fn push_method(&mut self, operation: &Operation, source: String) {
        self.methods.push(MethodEntry {
            controller: operation.controller.clone(),
            name: operation.name.clone(),
            source,
        });
    }

    /// Register a controller the facade must instantiate; repeats are ignored.
    pub fn register_controller(&mut self, controller: ControllerRef) {
        if !self.controllers.contains(&controller) {
            self.controllers.push(controller);
        }
    }

    pub fn methods(&self) -> &[MethodEntry] {
        &self.methods
    }

    pub fn controllers(&self) -> &[ControllerRef] {
        &self.controllers
    }

    /// How many methods named `name` were appended for `controller`.
    pub fn count(&self, controller: &str, name: &str) -> usize {
        self.methods
            .iter()
            .filter(|m| m.controller == controller && m.name == name)
            .count()
    }

    /// Output filename of the module.
    pub fn filename(&self) -> String {
        format!("{}.py", self.module_name)
    }
}

/// The three accumulators of one run.
#[derive(Debug, Clone)]
pub struct FacadeSet {
    pub base: FacadeAccumulator,
    pub ce: FacadeAccumulator,
    pub pe: FacadeAccumulator,
}

impl Default for FacadeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FacadeSet {
    pub fn new() -> Self {
        Self {
            base: FacadeAccumulator::new(FacadeKind::Base),
            ce: FacadeAccumulator::new(FacadeKind::Ce),
            pe: FacadeAccumulator::new(FacadeKind::Pe),
        }
    }

    pub fn get(&self, kind: FacadeKind) -> &FacadeAccumulator {
        match kind {
            FacadeKind::Base => &self.base,
            FacadeKind::Ce => &self.ce,
            FacadeKind::Pe => &self.pe,
        }
    }

    pub fn get_mut(&mut self, kind: FacadeKind) -> &mut FacadeAccumulator {
        match kind {
            FacadeKind::Base => &mut self.base,
            FacadeKind::Ce => &mut self.ce,
            FacadeKind::Pe => &mut self.pe,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacadeAccumulator> {
        [&self.base, &self.ce, &self.pe].into_iter()
    }
}

/// Turns accumulated operations into facade source code.
pub trait FacadeRenderer {
    /// Source of one facade method delegating to its controller.
    fn render_method(&self, operation: &Operation) -> String;

    /// Complete module for one accumulator.
    fn render_module(&self, facade: &FacadeAccumulator, config: &MergeConfig) -> String;
}

/// Renders facades as Python modules matching the merged package layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonFacadeRenderer;

impl FacadeRenderer for PythonFacadeRenderer {
    fn render_method(&self, operation: &Operation) -> String {
        let mut ordered: Vec<&Parameter> = operation.params.iter().filter(|p| p.required).collect();
        ordered.extend(operation.params.iter().filter(|p| !p.required));

        let mut signature = vec!["self".to_string()];
        signature.extend(ordered.iter().map(|p| render_parameter(p)));
        let arguments: Vec<String> = ordered
            .iter()
            .map(|p| format!("{}={}", p.name, p.name))
            .collect();

        format!(
            "    def {name}({signature}):\n        return self.{controller}.{name}({arguments})\n",
            name = operation.name,
            signature = signature.join(", "),
            controller = operation.controller,
            arguments = arguments.join(", "),
        )
    }

    fn render_module(&self, facade: &FacadeAccumulator, config: &MergeConfig) -> String {
        let mut out = String::new();
        out.push_str("# Generated by tb-rest-merge. Do not edit: changes are overwritten on the next merge.\n\n");
        out.push_str("from datetime import date, datetime\n");
        out.push_str("from typing import Dict, List, Optional\n\n");

        if facade.kind != FacadeKind::Base {
            out.push_str(&format!(
                "from {}.rest_client_base import RestClientBase\n",
                config.package
            ));
        }
        out.push_str(&format!(
            "from {} import *\n",
            config.module_path(ArtifactCategory::Models, facade.edition)
        ));
        for controller in facade.controllers() {
            out.push_str(&format!(
                "from {}.{} import {}\n",
                config.module_path(ArtifactCategory::Controllers, controller.edition),
                controller.module,
                controller.class_name
            ));
        }

        out.push_str("\n\n");
        match facade.kind {
            FacadeKind::Base => out.push_str(&format!("class {}:\n", facade.class_name)),
            _ => out.push_str(&format!("class {}(RestClientBase):\n", facade.class_name)),
        }

        let mut sections = Vec::new();
        if facade.has_init_section {
            let mut init = String::from("    def __init__(self, api_client):\n");
            if facade.kind == FacadeKind::Base {
                init.push_str("        self.api_client = api_client\n");
            } else {
                init.push_str("        super().__init__(api_client)\n");
            }
            for controller in facade.controllers() {
                init.push_str(&format!(
                    "        self.{} = {}(api_client)\n",
                    controller.module, controller.class_name
                ));
            }
            sections.push(init);
        }
        sections.extend(facade.methods().iter().map(|m| m.source.clone()));

        if sections.is_empty() {
            out.push_str("    pass\n");
        } else {
            out.push_str(&sections.join("\n"));
        }
        out
    }
}

fn render_parameter(param: &Parameter) -> String {
    let annotation = param.type_name.as_deref().map(python_type);
    match (annotation, param.required) {
        (Some(ty), true) => format!("{}: {}", param.name, ty),
        (Some(ty), false) => format!("{}: Optional[{}] = None", param.name, ty),
        (None, true) => param.name.clone(),
        (None, false) => format!("{}=None", param.name),
    }
}

/// Swagger primitives whose docstring name is not a Python name in scope of
/// a rendered module. `date`/`datetime` are imported by the module header.
const PRIMITIVE_TYPES: &[(&str, &str)] = &[
    ("file", "str"),
    ("date", "date"),
    ("datetime", "datetime"),
];

/// Map a swagger docstring type to a `typing` annotation.
pub fn python_type(doc_type: &str) -> String {
    let doc_type = doc_type.trim();
    if let Some((_, mapped)) = PRIMITIVE_TYPES.iter().find(|(swagger, _)| *swagger == doc_type) {
        return (*mapped).to_string();
    }
    if let Some(inner) = doc_type
        .strip_prefix("list[")
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return format!("List[{}]", python_type(inner));
    }
    if let Some(inner) = doc_type
        .strip_prefix("dict(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        if let Some((key, value)) = inner.split_once(',') {
            return format!("Dict[{}, {}]", python_type(key), python_type(value));
        }
    }
    doc_type.to_string()
}
