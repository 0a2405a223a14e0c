//! # tb-rest-merge
//!
//! Merges the two generated Python REST clients of a platform, the community
//! edition (ce) and the professional edition (pe), into one client package
//! that exposes both editions' API surfaces without duplicating what they
//! share.
//!
//! ## Quick Example
//!
//! ```
//! use tb_rest_merge::naming;
//! use tb_rest_merge::phases::reconcile;
//! use tb_rest_merge::introspect::Operation;
//!
//! // File names map to exported class names
//! assert_eq!(naming::class_name_for("device_profile.py").as_deref(), Some("DeviceProfile"));
//! assert_eq!(naming::class_name_for("url_link.py").as_deref(), Some("URLLink"));
//!
//! // Operations of a controller present in both editions are partitioned
//! let ce = vec![Operation::new("get_device", "device_controller_api", Vec::new())];
//! let pe = vec![
//!     Operation::new("get_device", "device_controller_api", Vec::new()),
//!     Operation::new("get_customer_devices", "device_controller_api", Vec::new()),
//! ];
//! let partition = reconcile::classify(&ce, &pe);
//! assert_eq!(partition.shared.len(), 1);
//! assert_eq!(partition.pe_specific.len(), 1);
//! assert!(partition.ce_specific.is_empty());
//! ```
//!
//! ## Core Concepts
//!
//! - **Editions (`edition`)**: `ce` and `pe`, and the two artifact categories
//!   (models and API controllers) generated for each.
//! - **Configuration (`config`)**: Where the generated sources live inside an
//!   edition root and how the merged package is laid out.
//! - **Naming (`naming`)**: The ordered rule table deriving an exported class
//!   name from a generated file name.
//! - **Introspection (`introspect`)**: Static reading of a controller module's
//!   public operations and their documented parameters.
//! - **Facades (`facade`)**: The base, ce and pe client classes that expose
//!   every operation as a method delegating to the owning controller.
//! - **Staged output (`filesystem`)**: An in-memory tree holding every output
//!   file until the run succeeds.
//!
//! ## Execution Flow
//!
//! The entry point is `phases::orchestrator`, which for models and then
//! controllers runs:
//!
//! 1.  **Inventory**: List the files of both edition directories.
//! 2.  **Reconciliation**: Compare same-named files; partition the operations
//!     of controllers that differ into shared and edition-specific sets.
//! 3.  **Emission**: Stage copies under `models_{ce,pe}` / `api_{ce,pe}`,
//!     registry import lines and facade methods.
//!
//! and finally renders the three facades and writes the staged tree to disk.

pub mod config;
pub mod defaults;
pub mod edition;
pub mod error;
pub mod facade;
pub mod filesystem;
pub mod introspect;
pub mod naming;
pub mod output;
pub mod phases;

mod merge_proptest;
