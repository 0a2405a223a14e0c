//! Phase 2: Reconciliation
//!
//! Decides, for every logical filename of one artifact category, how the two
//! editions relate and drives the [`Emitter`] accordingly:
//!
//! - **Identical** in both editions: one copy under `ce`; for controllers every
//!   operation goes to the shared base facade.
//! - **Divergent**: one copy per edition; for controllers the operations are
//!   partitioned with [`classify`] into shared and edition-specific sets.
//! - **Only in one edition**: one copy under that edition; for controllers every
//!   operation goes to that edition's facade.
//!
//! Operations are matched by name *and* parameter-name sequence. Two editions
//! exposing `get_device_by_id(device_id)` share it; if one of them takes
//! `(device_id, include_credentials)` instead, each edition keeps its own.
//!
//! A controller that cannot be introspected is logged and skipped without
//! aborting the run. Its file is still copied and registered.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;

use log::{debug, error, warn};

use super::emit::Emitter;
use super::inventory::FileDescriptor;
use super::CategoryReport;
use crate::config::MergeConfig;
use crate::defaults::REGISTRY_FILENAME;
use crate::edition::{ArtifactCategory, Edition};
use crate::error::{Error, Result};
use crate::facade::{ControllerRef, FacadeKind};
use crate::introspect::{self, ControllerSurface, Operation};

/// How a logical filename relates across the two editions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Present in both editions with the same content
    Identical,
    /// Present in both editions with different content
    Divergent,
    /// Present in a single edition
    Only(Edition),
}

/// Operations of one controller split by where they belong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Same name and parameters in both editions (community rendering kept)
    pub shared: Vec<Operation>,
    /// Only in community, or in both with different parameters
    pub ce_specific: Vec<Operation>,
    /// Only in enterprise, or in both with different parameters
    pub pe_specific: Vec<Operation>,
}

impl Partition {
    /// Operations specific to `edition`.
    pub fn specific(&self, edition: Edition) -> &[Operation] {
        match edition {
            Edition::Ce => &self.ce_specific,
            Edition::Pe => &self.pe_specific,
        }
    }
}

/// Partition the operations two editions expose for the same controller.
///
/// Every name in the union lands exactly once in `shared`, or once in each
/// edition-specific list it is present in. Output is ordered by name.
pub fn classify(ce: &[Operation], pe: &[Operation]) -> Partition {
    let ce_by_name: BTreeMap<&str, &Operation> =
        ce.iter().map(|op| (op.name.as_str(), op)).collect();
    let pe_by_name: BTreeMap<&str, &Operation> =
        pe.iter().map(|op| (op.name.as_str(), op)).collect();
    let names: BTreeSet<&str> = ce_by_name.keys().chain(pe_by_name.keys()).copied().collect();

    let mut partition = Partition::default();
    for name in names {
        match (ce_by_name.get(name), pe_by_name.get(name)) {
            (Some(ce_op), Some(pe_op)) if ce_op == pe_op => {
                partition.shared.push((*ce_op).clone());
            }
            (ce_op, pe_op) => {
                if let Some(ce_op) = ce_op {
                    partition.ce_specific.push((*ce_op).clone());
                }
                if let Some(pe_op) = pe_op {
                    partition.pe_specific.push((*pe_op).clone());
                }
            }
        }
    }
    partition
}

/// Replace the runtime-client import of a generated controller.
///
/// `line` is 1-based. Returns `None` when the source is shorter than that.
pub fn patch_client_import(source: &str, line: usize, import: &str) -> Option<String> {
    let replacement = format!("{}\n", import);
    let mut lines: Vec<&str> = source.split_inclusive('\n').collect();
    let index = line.checked_sub(1)?;
    if index >= lines.len() {
        return None;
    }
    lines[index] = &replacement;
    Some(lines.concat())
}

/// Reconcile one artifact category of both editions into `emitter`.
pub fn execute(
    category: ArtifactCategory,
    ce_files: &[FileDescriptor],
    pe_files: &[FileDescriptor],
    emitter: &mut Emitter,
) -> Result<CategoryReport> {
    let ce_by_name: HashMap<&str, &FileDescriptor> =
        ce_files.iter().map(|f| (f.filename.as_str(), f)).collect();
    let pe_by_name: HashMap<&str, &FileDescriptor> =
        pe_files.iter().map(|f| (f.filename.as_str(), f)).collect();

    let mut reconciler = Reconciler {
        category,
        emitter,
        report: CategoryReport::new(category),
    };
    let mut seen: HashSet<&str> = HashSet::new();

    for file in ce_files.iter().chain(pe_files) {
        if !seen.insert(file.filename.as_str()) {
            continue;
        }
        match (
            ce_by_name.get(file.filename.as_str()),
            pe_by_name.get(file.filename.as_str()),
        ) {
            (Some(ce), Some(pe)) => reconciler.pair(ce, pe)?,
            (Some(only), None) | (None, Some(only)) => reconciler.single(only)?,
            (None, None) => unreachable!("filename comes from one of the inventories"),
        }
    }

    Ok(reconciler.report)
}

struct Reconciler<'a> {
    category: ArtifactCategory,
    emitter: &'a mut Emitter,
    report: CategoryReport,
}

impl Reconciler<'_> {
    fn pair(&mut self, ce: &FileDescriptor, pe: &FileDescriptor) -> Result<()> {
        let ce_content = self.load(ce)?;
        let pe_content = self.load(pe)?;

        if ce_content == pe_content {
            self.record(&ce.filename, Disposition::Identical);
            self.emitter
                .copy_artifact(self.category, ce, &ce_content, Edition::Ce)?;
            self.emitter.register(self.category, ce, Edition::Ce)?;

            if let Some(surface) = self.surface(ce, &ce_content) {
                self.append(FacadeKind::Base, &surface.operations);
                self.emitter
                    .register_controller(FacadeKind::Base, controller_ref(&surface, Edition::Ce));
            }
            return Ok(());
        }

        self.record(&ce.filename, Disposition::Divergent);
        self.emitter
            .copy_artifact(self.category, ce, &ce_content, Edition::Ce)?;
        self.emitter
            .copy_artifact(self.category, pe, &pe_content, Edition::Pe)?;
        self.emitter.register(self.category, ce, Edition::Ce)?;
        self.emitter.register(self.category, pe, Edition::Pe)?;

        let ce_surface = self.surface(ce, &ce_content);
        let pe_surface = self.surface(pe, &pe_content);
        let (Some(ce_surface), Some(pe_surface)) = (ce_surface, pe_surface) else {
            return Ok(());
        };

        let partition = classify(&ce_surface.operations, &pe_surface.operations);
        debug!(
            "{}: {} shared, {} ce-specific, {} pe-specific operations",
            ce.filename,
            partition.shared.len(),
            partition.ce_specific.len(),
            partition.pe_specific.len()
        );
        self.append(FacadeKind::Base, &partition.shared);
        for edition in Edition::ALL {
            self.append(FacadeKind::for_edition(edition), partition.specific(edition));
        }

        // Community controllers live on the base client, which the community
        // facade inherits without an init section of its own.
        self.emitter
            .register_controller(FacadeKind::Base, controller_ref(&ce_surface, Edition::Ce));
        self.emitter
            .register_controller(FacadeKind::Pe, controller_ref(&pe_surface, Edition::Pe));
        Ok(())
    }

    fn single(&mut self, file: &FileDescriptor) -> Result<()> {
        let edition = file.edition;
        let content = self.load(file)?;
        self.record(&file.filename, Disposition::Only(edition));
        self.emitter
            .copy_artifact(self.category, file, &content, edition)?;
        self.emitter.register(self.category, file, edition)?;

        if let Some(surface) = self.surface(file, &content) {
            self.append(FacadeKind::for_edition(edition), &surface.operations);
            let owner = match edition {
                Edition::Ce => FacadeKind::Base,
                Edition::Pe => FacadeKind::Pe,
            };
            self.emitter
                .register_controller(owner, controller_ref(&surface, edition));
        }
        Ok(())
    }

    /// Read a source file, patching the client import of controllers.
    fn load(&mut self, file: &FileDescriptor) -> Result<String> {
        let path = file.path();
        let content = fs::read_to_string(&path).map_err(|e| Error::Read {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if self.category != ArtifactCategory::Controllers || file.filename == REGISTRY_FILENAME {
            return Ok(content);
        }

        let config = self.emitter.config();
        match patch_client_import(&content, config.client_import_line, &config.client_import) {
            Some(patched) => Ok(patched),
            None => {
                warn!(
                    "{} has fewer than {} lines, client import left unpatched",
                    path.display(),
                    config.client_import_line
                );
                self.report.unpatched.push(file.filename.clone());
                Ok(content)
            }
        }
    }

    /// Introspect a controller; `None` for models, registries and failures.
    fn surface(&mut self, file: &FileDescriptor, content: &str) -> Option<ControllerSurface> {
        if self.category != ArtifactCategory::Controllers || file.filename == REGISTRY_FILENAME {
            return None;
        }
        match introspect::parse_controller(file.stem(), content) {
            Ok(surface) => Some(prepare(surface, self.emitter.config(), &mut self.report)),
            Err(err) => {
                error!("Skipping operations of {} ({}): {}", file.filename, file.edition, err);
                self.report
                    .skipped_controllers
                    .push(format!("{} ({})", file.filename, file.edition));
                None
            }
        }
    }

    fn append(&mut self, kind: FacadeKind, operations: &[Operation]) {
        match kind {
            FacadeKind::Base => self.report.shared_operations += operations.len(),
            FacadeKind::Ce => self.report.ce_operations += operations.len(),
            FacadeKind::Pe => self.report.pe_operations += operations.len(),
        }
        self.emitter.append_operations(kind, operations);
    }

    fn record(&mut self, filename: &str, disposition: Disposition) {
        debug!("{} {}: {:?}", self.category, filename, disposition);
        match disposition {
            Disposition::Identical => self.report.identical += 1,
            Disposition::Divergent => self.report.divergent += 1,
            Disposition::Only(Edition::Ce) => self.report.ce_only += 1,
            Disposition::Only(Edition::Pe) => self.report.pe_only += 1,
        }
    }
}

/// Report numbered duplicates and collapse them when configured to.
fn prepare(
    mut surface: ControllerSurface,
    config: &MergeConfig,
    report: &mut CategoryReport,
) -> ControllerSurface {
    let duplicates = introspect::numbered_duplicates(&surface.operations);
    if duplicates.is_empty() {
        return surface;
    }

    warn!(
        "Controller {} has numbered duplicate operations: {}{}",
        surface.class_name,
        duplicates.join(", "),
        if config.collapse_numbered_duplicates {
            " (collapsed)"
        } else {
            ""
        }
    );
    report
        .duplicate_operations
        .push((surface.class_name.clone(), duplicates));

    if config.collapse_numbered_duplicates {
        surface.operations = introspect::collapse_numbered_duplicates(surface.operations);
    }
    surface
}

fn controller_ref(surface: &ControllerSurface, edition: Edition) -> ControllerRef {
    ControllerRef {
        module: surface.module.clone(),
        class_name: surface.class_name.clone(),
        edition,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facade::PythonFacadeRenderer;
    use crate::introspect::Parameter;
    use crate::phases::inventory::list_artifacts;
    use std::path::Path;
    use tempfile::TempDir;

    fn op(name: &str, params: &[&str]) -> Operation {
        Operation::new(
            name,
            "device_controller_api",
            params
                .iter()
                .map(|p| Parameter::parse(&format!("str {}: doc", p)))
                .collect(),
        )
    }

    fn names(ops: &[Operation]) -> Vec<&str> {
        ops.iter().map(|op| op.name.as_str()).collect()
    }

    #[test]
    fn test_classify_identical_sets_are_shared() {
        let ce = vec![op("get_device_by_id", &["id"]), op("save_device", &["device"])];
        let partition = classify(&ce, &ce.clone());
        assert_eq!(names(&partition.shared), vec!["get_device_by_id", "save_device"]);
        assert!(partition.ce_specific.is_empty());
        assert!(partition.pe_specific.is_empty());
    }

    #[test]
    fn test_classify_pe_only_operation() {
        let ce = vec![op("get_device_by_id", &["id"])];
        let pe = vec![op("get_device_by_id", &["id"]), op("get_device_credentials", &["id"])];
        let partition = classify(&ce, &pe);
        assert_eq!(names(&partition.shared), vec!["get_device_by_id"]);
        assert!(partition.ce_specific.is_empty());
        assert_eq!(names(&partition.pe_specific), vec!["get_device_credentials"]);
    }

    #[test]
    fn test_classify_differing_params_go_to_both_editions() {
        let ce = vec![op("save_device", &["device"])];
        let pe = vec![op("save_device", &["device", "entity_group_id"])];
        let partition = classify(&ce, &pe);
        assert!(partition.shared.is_empty());
        assert_eq!(partition.ce_specific[0].param_names(), vec!["device"]);
        assert_eq!(
            partition.pe_specific[0].param_names(),
            vec!["device", "entity_group_id"]
        );
    }

    #[test]
    fn test_classify_param_order_matters() {
        let ce = vec![op("get_page", &["page", "page_size"])];
        let pe = vec![op("get_page", &["page_size", "page"])];
        let partition = classify(&ce, &pe);
        assert!(partition.shared.is_empty());
        assert_eq!(partition.specific(Edition::Ce).len(), 1);
        assert_eq!(partition.specific(Edition::Pe).len(), 1);
    }

    #[test]
    fn test_patch_client_import() {
        let source: String = (1..=22).map(|i| format!("line {}\n", i)).collect();
        let patched = patch_client_import(&source, 20, "from pkg.api_client import ApiClient").unwrap();
        let lines: Vec<_> = patched.lines().collect();
        assert_eq!(lines[18], "line 19");
        assert_eq!(lines[19], "from pkg.api_client import ApiClient");
        assert_eq!(lines[20], "line 21");
        assert_eq!(lines.len(), 22);
    }

    #[test]
    fn test_patch_client_import_short_file() {
        assert_eq!(patch_client_import("a\nb\n", 20, "x"), None);
        assert_eq!(patch_client_import("a\n", 0, "x"), None);
    }

    fn controller_source(class_name: &str, methods: &[(&str, &[&str])]) -> String {
        let mut source: String = (1..=19).map(|i| format!("# header {}\n", i)).collect();
        source.push_str("from swagger_client.api_client import ApiClient\n\n\n");
        source.push_str(&format!("class {}(object):\n", class_name));
        for (name, params) in methods {
            source.push_str(&format!("    def {}(self, **kwargs):  # noqa: E501\n", name));
            source.push_str("        \"\"\"Generated.  # noqa: E501\n\n        :param async_req bool\n");
            for param in *params {
                source.push_str(&format!("        :param str {}: doc (required)\n", param));
            }
            source.push_str("        :return: None\n        \"\"\"\n        pass\n\n");
        }
        source
    }

    struct Trees {
        _temp: TempDir,
        ce: std::path::PathBuf,
        pe: std::path::PathBuf,
    }

    fn trees(ce_files: &[(&str, String)], pe_files: &[(&str, String)]) -> Trees {
        let temp = TempDir::new().unwrap();
        let ce = temp.path().join("ce");
        let pe = temp.path().join("pe");
        for (dir, files) in [(&ce, ce_files), (&pe, pe_files)] {
            fs::create_dir_all(dir).unwrap();
            for (name, content) in files {
                fs::write(dir.join(name), content).unwrap();
            }
        }
        Trees { _temp: temp, ce, pe }
    }

    fn run(category: ArtifactCategory, ce: &Path, pe: &Path) -> (Emitter, CategoryReport) {
        run_with(category, ce, pe, MergeConfig::default())
    }

    fn run_with(
        category: ArtifactCategory,
        ce: &Path,
        pe: &Path,
        config: MergeConfig,
    ) -> (Emitter, CategoryReport) {
        let ce_files = list_artifacts(ce, Edition::Ce).unwrap();
        let pe_files = list_artifacts(pe, Edition::Pe).unwrap();
        let mut emitter = Emitter::new(config, Box::new(PythonFacadeRenderer)).unwrap();
        let report = execute(category, &ce_files, &pe_files, &mut emitter).unwrap();
        (emitter, report)
    }

    #[test]
    fn test_identical_controller_goes_to_base_only() {
        let source = controller_source(
            "DeviceControllerApi",
            &[("get_device_by_id", &["id"]), ("save_device", &["device"])],
        );
        let t = trees(
            &[("device_controller_api.py", source.clone())],
            &[("device_controller_api.py", source)],
        );
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        assert_eq!(report.identical, 1);
        assert!(emitter.tree().exists("api/api_ce/device_controller_api.py"));
        assert!(!emitter.tree().exists("api/api_pe/device_controller_api.py"));

        let facades = emitter.facades();
        assert_eq!(facades.base.count("device_controller_api", "get_device_by_id"), 1);
        assert_eq!(facades.base.count("device_controller_api", "save_device"), 1);
        assert!(facades.ce.methods().is_empty());
        assert!(facades.pe.methods().is_empty());
        assert_eq!(facades.base.controllers()[0].class_name, "DeviceControllerApi");
    }

    #[test]
    fn test_divergent_controller_partitions_operations() {
        let ce_source = controller_source("DeviceControllerApi", &[("get_device_by_id", &["id"])]);
        let pe_source = controller_source(
            "DeviceControllerApi",
            &[("get_device_by_id", &["id"]), ("get_device_credentials", &["id"])],
        );
        let t = trees(
            &[("device_controller_api.py", ce_source)],
            &[("device_controller_api.py", pe_source)],
        );
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        assert_eq!(report.divergent, 1);
        let facades = emitter.facades();
        assert_eq!(facades.base.count("device_controller_api", "get_device_by_id"), 1);
        assert_eq!(facades.pe.count("device_controller_api", "get_device_credentials"), 1);
        assert_eq!(facades.pe.count("device_controller_api", "get_device_by_id"), 0);
        assert!(facades.ce.methods().is_empty());
        assert_eq!(facades.pe.controllers()[0].edition, Edition::Pe);
    }

    #[test]
    fn test_controllers_are_patched_before_comparison() {
        let ce_source = controller_source("AdminControllerApi", &[("get_settings", &[])]);
        let pe_source = ce_source.replace(
            "from swagger_client.api_client import ApiClient",
            "from swagger_client_pe.api_client import ApiClient",
        );
        let t = trees(
            &[("admin_controller_api.py", ce_source)],
            &[("admin_controller_api.py", pe_source)],
        );
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        assert_eq!(report.identical, 1);
        let copied = emitter.tree().get("api/api_ce/admin_controller_api.py").unwrap();
        assert_eq!(
            copied.lines().nth(19),
            Some("from tb_rest_client.api_client import ApiClient")
        );
    }

    #[test]
    fn test_models_are_not_patched_or_introspected() {
        let model: String = (1..=25).map(|i| format!("model line {}\n", i)).collect();
        let t = trees(&[("device.py", model.clone())], &[("device.py", model.clone())]);
        let (emitter, report) = run(ArtifactCategory::Models, &t.ce, &t.pe);

        assert_eq!(emitter.tree().get("models/models_ce/device.py"), Some(model.as_str()));
        assert_eq!(
            emitter.tree().get("models/models_ce/__init__.py"),
            Some("from .device import Device\n")
        );
        assert_eq!(emitter.tree().get("models/models_pe/__init__.py"), Some(""));
        assert_eq!(report.shared_operations, 0);
    }

    #[test]
    fn test_single_edition_files() {
        let t = trees(
            &[("ce_only.py", "ce\n".to_string())],
            &[("entity_group.py", "pe\n".to_string())],
        );
        let (emitter, report) = run(ArtifactCategory::Models, &t.ce, &t.pe);

        assert_eq!((report.ce_only, report.pe_only), (1, 1));
        assert_eq!(emitter.tree().get("models/models_ce/ce_only.py"), Some("ce\n"));
        assert_eq!(emitter.tree().get("models/models_pe/entity_group.py"), Some("pe\n"));
        assert_eq!(
            emitter.tree().get("models/models_pe/__init__.py"),
            Some("from .entity_group import EntityGroup\n")
        );
    }

    #[test]
    fn test_pe_only_controller_goes_to_pe_facade() {
        let source = controller_source("EntityGroupControllerApi", &[("get_entity_group_by_id", &["id"])]);
        let t = trees(&[], &[("entity_group_controller_api.py", source)]);
        let (emitter, _) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        let facades = emitter.facades();
        assert_eq!(
            facades.pe.count("entity_group_controller_api", "get_entity_group_by_id"),
            1
        );
        assert!(facades.base.methods().is_empty());
        assert!(facades.base.controllers().is_empty());
    }

    #[test]
    fn test_ce_only_controller_anchors_base() {
        let source = controller_source("NotificationControllerApi", &[("get_notifications", &[])]);
        let t = trees(&[("notification_controller_api.py", source)], &[]);
        let (emitter, _) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        let facades = emitter.facades();
        assert_eq!(
            facades.ce.count("notification_controller_api", "get_notifications"),
            1
        );
        assert_eq!(
            facades.base.controllers()[0].module,
            "notification_controller_api"
        );
    }

    #[test]
    fn test_registry_input_file_is_neither_copied_nor_registered() {
        let t = trees(
            &[("__init__.py", "from .x import X\n".to_string())],
            &[("__init__.py", "from .y import Y\n".to_string())],
        );
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);
        assert_eq!(report.divergent, 1);
        assert_eq!(emitter.tree().get("api/api_ce/__init__.py"), Some(""));
        assert_eq!(emitter.tree().get("api/api_pe/__init__.py"), Some(""));
        assert!(report.skipped_controllers.is_empty());
    }

    #[test]
    fn test_broken_controller_is_skipped_not_fatal() {
        let broken: String = (1..=25).map(|i| format!("# no class here {}\n", i)).collect();
        let good = controller_source("DeviceControllerApi", &[("get_device_by_id", &["id"])]);
        let t = trees(
            &[("broken_api.py", broken.clone()), ("device_controller_api.py", good.clone())],
            &[("broken_api.py", broken), ("device_controller_api.py", good)],
        );
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        assert_eq!(report.identical, 2);
        assert_eq!(report.skipped_controllers, vec!["broken_api.py (ce)"]);
        assert!(emitter.tree().exists("api/api_ce/broken_api.py"));
        assert_eq!(emitter.facades().base.methods().len(), 1);
    }

    #[test]
    fn test_divergent_pair_with_one_broken_side_contributes_no_operations() {
        let good = controller_source("DeviceControllerApi", &[("get_device_by_id", &["id"])]);
        let broken: String = (1..=25).map(|i| format!("# no class here {}\n", i)).collect();
        let t = trees(
            &[("device_controller_api.py", good)],
            &[("device_controller_api.py", broken)],
        );
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        assert_eq!(report.divergent, 1);
        assert_eq!(report.skipped_controllers, vec!["device_controller_api.py (pe)"]);
        assert!(emitter.tree().exists("api/api_ce/device_controller_api.py"));
        assert!(emitter.tree().exists("api/api_pe/device_controller_api.py"));
        for edition in Edition::ALL {
            assert_eq!(
                emitter.tree().get(format!("api/api_{}/__init__.py", edition)),
                Some("from .device_controller_api import DeviceControllerApi\n")
            );
        }

        let facades = emitter.facades();
        for kind in FacadeKind::ALL {
            assert!(facades.get(kind).methods().is_empty());
            assert!(facades.get(kind).controllers().is_empty());
        }
        assert_eq!(
            (report.shared_operations, report.ce_operations, report.pe_operations),
            (0, 0, 0)
        );
    }

    #[test]
    fn test_numbered_duplicates_pass_through_by_default() {
        let source = controller_source(
            "DeviceControllerApi",
            &[("save_device", &["device"]), ("save_device1", &["device"])],
        );
        let t = trees(&[("device_controller_api.py", source)], &[]);
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        assert_eq!(
            report.duplicate_operations,
            vec![("DeviceControllerApi".to_string(), vec!["save_device1".to_string()])]
        );
        assert_eq!(emitter.facades().ce.count("device_controller_api", "save_device1"), 1);
    }

    #[test]
    fn test_numbered_duplicates_collapsed_when_enabled() {
        let source = controller_source(
            "DeviceControllerApi",
            &[("save_device", &["device"]), ("save_device1", &["device"])],
        );
        let t = trees(&[("device_controller_api.py", source)], &[]);
        let config = MergeConfig {
            collapse_numbered_duplicates: true,
            ..MergeConfig::default()
        };
        let (emitter, _) = run_with(ArtifactCategory::Controllers, &t.ce, &t.pe, config);

        let facades = emitter.facades();
        assert_eq!(facades.ce.count("device_controller_api", "save_device1"), 0);
        assert_eq!(facades.ce.count("device_controller_api", "save_device"), 1);
    }

    #[test]
    fn test_numbered_duplicates_are_logged_as_warning() {
        testing_logger::setup();
        let source = controller_source(
            "DeviceControllerApi",
            &[("save_device", &["device"]), ("save_device1", &["device"])],
        );
        let t = trees(&[("device_controller_api.py", source)], &[]);
        run(ArtifactCategory::Controllers, &t.ce, &t.pe);

        testing_logger::validate(|captured_logs| {
            let warning = captured_logs
                .iter()
                .find(|log| log.level == log::Level::Warn)
                .expect("duplicate warning logged");
            assert!(warning.body.contains("DeviceControllerApi"));
            assert!(warning.body.contains("save_device1"));
        });
    }

    #[test]
    fn test_unpatchable_controller_is_reported() {
        let short = "class TinyApi(object):\n    def ping(self):\n        pass\n".to_string();
        let t = trees(&[("tiny_api.py", short.clone())], &[]);
        let (emitter, report) = run(ArtifactCategory::Controllers, &t.ce, &t.pe);
        assert_eq!(report.unpatched, vec!["tiny_api.py"]);
        assert_eq!(emitter.tree().get("api/api_ce/tiny_api.py"), Some(short.as_str()));
        assert_eq!(emitter.facades().ce.count("tiny_api", "ping"), 1);
    }
}
