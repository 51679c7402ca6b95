use regex::Regex;
use std::sync::LazyLock;

/// Matches a trailing TLD-like label, e.g. `.com` or `.co-op`.
static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.[a-zA-Z0-9\-]{2,6}$").expect("domain regex is valid")
});

/// The domain and company substituted into every template.
///
/// An empty field means "not provided"; placeholders for it are replaced
/// with the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetIdentity {
    pub domain: String,
    pub company: String,
}

/// How a bare asset string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Domain,
    Company,
}

impl AssetKind {
    pub fn classify(asset: &str) -> Self {
        if DOMAIN_REGEX.is_match(asset) {
            AssetKind::Domain
        } else {
            AssetKind::Company
        }
    }
}

impl TargetIdentity {
    pub fn new(domain: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            company: company.into(),
        }
    }

    /// Fill the empty field matching the asset's kind. Explicit values win.
    pub fn with_asset(mut self, asset: &str) -> Self {
        match AssetKind::classify(asset) {
            AssetKind::Domain if self.domain.is_empty() => self.domain = asset.to_string(),
            AssetKind::Company if self.company.is_empty() => self.company = asset.to_string(),
            _ => {}
        }
        self
    }

    /// Replace `{domain}`, `{hostname}` and `{company}` in `template`.
    ///
    /// Any other brace text is left as written; there is no escaping.
    pub fn substitute(&self, template: &str) -> String {
        sub_params(template, &self.domain, &self.company)
    }
}

pub fn sub_params(template: &str, domain: &str, company: &str) -> String {
    template
        .replace("{domain}", domain)
        .replace("{hostname}", domain)
        .replace("{company}", company)
}
