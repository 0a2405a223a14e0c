//! Phase 3: Emission
//!
//! The [`Emitter`] receives the reconciler's decisions and turns them into
//! staged output: artifact copies under the edition directories, one import
//! line per class-bearing artifact in each edition's index registry, and
//! rendered methods in the three facade accumulators.
//!
//! All four index registries are staged empty when the emitter is created, so
//! every run starts from empty registries and contains exactly the lines of
//! that run, whatever the previous output held.

use log::debug;

use crate::config::MergeConfig;
use crate::defaults::REGISTRY_FILENAME;
use crate::edition::{ArtifactCategory, Edition};
use crate::error::Result;
use crate::facade::{ControllerRef, FacadeKind, FacadeRenderer, FacadeSet};
use crate::filesystem::OutputTree;
use crate::introspect::Operation;
use crate::naming;
use crate::phases::inventory::FileDescriptor;

/// Stages the output of one merge run.
pub struct Emitter {
    config: MergeConfig,
    renderer: Box<dyn FacadeRenderer>,
    tree: OutputTree,
    facades: FacadeSet,
}

impl Emitter {
    /// Create an emitter with empty registries and accumulators.
    pub fn new(config: MergeConfig, renderer: Box<dyn FacadeRenderer>) -> Result<Self> {
        let mut tree = OutputTree::new();
        for category in ArtifactCategory::ALL {
            for edition in Edition::ALL {
                tree.put(registry_path(category, edition), String::new())?;
            }
        }
        Ok(Self {
            config,
            renderer,
            tree,
            facades: FacadeSet::new(),
        })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    pub fn facades(&self) -> &FacadeSet {
        &self.facades
    }

    pub fn tree(&self) -> &OutputTree {
        &self.tree
    }

    /// Stage `content` as the `edition` copy of `file`.
    ///
    /// Registry files are never copied since they are regenerated; returns
    /// whether a copy was staged.
    pub fn copy_artifact(
        &mut self,
        category: ArtifactCategory,
        file: &FileDescriptor,
        content: &str,
        edition: Edition,
    ) -> Result<bool> {
        if file.filename == REGISTRY_FILENAME {
            return Ok(false);
        }
        let path = format!("{}/{}", category.edition_dir(edition), file.filename);
        debug!("Staging {}", path);
        self.tree.put(path, content)?;
        Ok(true)
    }

    /// Append the import line for `file` to the `edition` registry.
    ///
    /// Returns the exported class name, or `None` for the registry file itself.
    pub fn register(
        &mut self,
        category: ArtifactCategory,
        file: &FileDescriptor,
        edition: Edition,
    ) -> Result<Option<String>> {
        let stem = file.stem();
        let rule = naming::rule_for(stem);
        let Some(class_name) = rule.derive(stem) else {
            return Ok(None);
        };
        if file.class_name().is_none() {
            file.set_class_name(class_name.clone())?;
        }

        let line = format!("from .{} import {}\n", stem, class_name);
        self.tree.append(registry_path(category, edition), &line)?;
        debug!(
            "Registered {} in {} {} registry (rule {})",
            class_name, edition, category, rule.name
        );
        Ok(Some(class_name))
    }

    /// Render and append operations to one facade.
    pub fn append_operations<'a, I>(&mut self, kind: FacadeKind, operations: I)
    where
        I: IntoIterator<Item = &'a Operation>,
    {
        for operation in operations {
            let source = self.renderer.render_method(operation);
            self.facades.get_mut(kind).push_method(operation, source);
        }
    }

    /// Make `kind`'s facade instantiate `controller`.
    pub fn register_controller(&mut self, kind: FacadeKind, controller: ControllerRef) {
        self.facades.get_mut(kind).register_controller(controller);
    }

    /// Render the three facade modules into the tree and hand back the staged
    /// output together with the accumulators.
    pub fn finish(mut self) -> Result<(OutputTree, FacadeSet)> {
        for facade in self.facades.iter() {
            let module = self.renderer.render_module(facade, &self.config);
            self.tree.put(facade.filename(), module)?;
        }
        Ok((self.tree, self.facades))
    }
}

/// Relative path of the index registry of one category and edition.
pub fn registry_path(category: ArtifactCategory, edition: Edition) -> String {
    format!("{}/{}", category.edition_dir(edition), REGISTRY_FILENAME)
}
