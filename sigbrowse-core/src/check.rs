use crate::error::Result;
use crate::opener::Opener;
use crate::signature::{Check, CheckType};
use crate::target::TargetIdentity;
use std::sync::Arc;
use tracing::{debug, warn};

pub const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search?q=";
pub const SHODAN_SEARCH_URL: &str = "https://www.shodan.io/search?query=";

/// What a single check did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// URLs handed to the opener, in order
    pub opened: Vec<String>,
    /// The substituted note, if the check had one
    pub note: Option<String>,
    /// Set when the check type was not recognised and nothing was opened
    pub unknown_type: Option<String>,
    /// Lines written to stdout, tagged the way the user sees them
    pub messages: Vec<String>,
}

/// Runs checks against one target identity through an [`Opener`].
#[derive(Clone)]
pub struct CheckExecutor {
    opener: Arc<dyn Opener>,
    target: TargetIdentity,
}

impl CheckExecutor {
    pub fn new(opener: Arc<dyn Opener>, target: TargetIdentity) -> Self {
        Self { opener, target }
    }

    pub fn target(&self) -> &TargetIdentity {
        &self.target
    }

    /// Build the URL a search-type check opens for one template.
    ///
    /// The substituted query is appended verbatim, without URL encoding.
    /// Returns `None` when the query substitutes to an empty string.
    pub fn search_url(&self, base: &str, template: &str) -> Option<String> {
        let query = self.target.substitute(template);
        if query.is_empty() {
            None
        } else {
            Some(format!("{}{}", base, query))
        }
    }

    /// Execute one check on behalf of signature `id`.
    ///
    /// The first launch failure is returned immediately; remaining URLs of
    /// the check are not attempted.
    pub fn perform_check(&self, id: &str, check: &Check) -> Result<CheckOutcome> {
        let mut outcome = CheckOutcome::default();

        let urls: Vec<String> = match &check.kind {
            CheckType::Browser => check
                .urls
                .iter()
                .map(|url| self.target.substitute(url))
                .collect(),
            CheckType::Google => check
                .searches
                .iter()
                .filter_map(|search| self.search_url(GOOGLE_SEARCH_URL, search))
                .collect(),
            CheckType::Shodan => check
                .searches
                .iter()
                .filter_map(|search| self.search_url(SHODAN_SEARCH_URL, search))
                .collect(),
            CheckType::Unknown(kind) => {
                let line = format!("[-] Unknown checkType: {}", kind);
                println!("{}", line);
                outcome.messages.push(line);
                warn!("[-] Unknown checkType: {} in signature {}", kind, id);
                outcome.unknown_type = Some(kind.clone());
                Vec::new()
            }
        };

        for url in urls {
            debug!("[{}] opening {}", id, url);
            self.opener.open(&url)?;
            outcome.opened.push(url);
        }

        if !check.notes.is_empty() {
            let note = self.target.substitute(&check.notes);
            let line = format!("[!] [{}]: {}", id, note);
            println!("{}", line);
            outcome.messages.push(line);
            outcome.note = Some(note);
        }

        Ok(outcome)
    }
}

impl std::fmt::Debug for CheckExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckExecutor")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
