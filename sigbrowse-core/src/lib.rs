pub mod check;
pub mod dispatch;
pub mod error;
pub mod opener;
pub mod paths;
pub mod signature;
pub mod target;

pub use check::{CheckExecutor, CheckOutcome};
pub use dispatch::{DispatchSummary, Dispatcher};
pub use error::{ReconError, Result};
pub use opener::{DryRunOpener, Opener, SystemOpener};
pub use paths::expand_paths;
pub use signature::{Check, CheckType, Signature, SignatureTable};
pub use target::{AssetKind, TargetIdentity};
