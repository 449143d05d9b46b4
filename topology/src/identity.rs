//! Device identity normalization and alias reconciliation.
//!
//! Neighbor listings name the same device in several ways: with a serial
//! annotation (`sw1(FDO123)`), domain-qualified (`sw1.example.com`), or bare
//! (`sw1`, typically a capture's own label). Normalization maps every raw
//! name to one canonical name in two stages:
//!
//! 1. [`normalize_device_name`] strips a parenthesized annotation and
//!    qualifies the base name with the organizational domain.
//! 2. [`AliasResolver::resolve`] runs once all names of a batch are known and
//!    folds a bare name into its domain-qualified form when that form was
//!    produced for any other alias. Because the set of qualified forms is
//!    collected before any rewrite, the result does not depend on the order
//!    names were observed.
//!
//! Exactly one organizational domain is assumed.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use netscrape_core::NeighborRecord;
use tracing::debug;

/// Canonicalizes a raw device name.
///
/// A name carrying a parenthesized suffix is reduced to the text before the
/// first `(`, then qualified with `domain` unless it already ends with it.
/// Names without a parenthesized suffix, and names whose base is empty, are
/// returned unchanged. The function is idempotent.
///
/// # Examples
///
/// ```
/// use netscrape_topology::normalize_device_name;
///
/// assert_eq!(normalize_device_name("sw1(FDO123)", "example.com"), "sw1.example.com");
/// assert_eq!(normalize_device_name("sw1.example.com(FDO123)", "example.com"), "sw1.example.com");
/// assert_eq!(normalize_device_name("sw1", "example.com"), "sw1");
/// ```
pub fn normalize_device_name(raw: &str, domain: &str) -> String {
    if !(raw.contains('(') && raw.contains(')')) {
        return raw.to_string();
    }
    let base = raw.split('(').next().unwrap_or_default().trim();
    if base.is_empty() {
        return raw.to_string();
    }
    if has_domain(base, domain) {
        base.to_string()
    } else {
        qualify(base, domain)
    }
}

fn has_domain(name: &str, domain: &str) -> bool {
    name.strip_suffix(domain)
        .is_some_and(|head| head.ends_with('.'))
}

fn qualify(name: &str, domain: &str) -> String {
    format!("{name}.{domain}")
}

/// Collects the raw device names of one batch.
#[derive(Debug, Clone)]
pub struct AliasResolver {
    domain: String,
    /// Raw name to first-stage normalized name, in first-seen order.
    observed: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl AliasResolver {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            observed: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Records one raw name. Repeated names are ignored.
    pub fn observe(&mut self, raw: &str) {
        if self.index.contains_key(raw) {
            return;
        }
        let normalized = normalize_device_name(raw, &self.domain);
        self.index.insert(raw.to_string(), self.observed.len());
        self.observed.push((raw.to_string(), normalized));
    }

    /// Records the source and neighbor names of every record.
    pub fn observe_records(&mut self, records: &[NeighborRecord]) {
        for record in records {
            self.observe(&record.source_device);
            self.observe(&record.device_id);
        }
    }

    /// Number of distinct raw names observed.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Reconciles bare names with their domain-qualified forms and returns
    /// the final alias map.
    pub fn resolve(self) -> AliasMap {
        let qualified: BTreeSet<&str> = self
            .observed
            .iter()
            .map(|(_, normalized)| normalized.as_str())
            .filter(|name| has_domain(name, &self.domain))
            .collect();

        let mut canonical = HashMap::with_capacity(self.observed.len());
        let mut classes: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

        for (raw, normalized) in &self.observed {
            let resolved = if has_domain(normalized, &self.domain) {
                normalized.clone()
            } else {
                let candidate = qualify(normalized, &self.domain);
                if qualified.contains(candidate.as_str()) {
                    debug!(alias = %raw, canonical = %candidate, "Folded bare alias into qualified name");
                    candidate
                } else {
                    normalized.clone()
                }
            };
            classes
                .entry(resolved.clone())
                .or_default()
                .insert(raw.clone());
            canonical.insert(raw.clone(), resolved);
        }

        AliasMap {
            domain: self.domain,
            canonical,
            classes,
        }
    }
}

/// Final raw-name to canonical-name mapping for one batch.
#[derive(Debug, Clone, Default)]
pub struct AliasMap {
    domain: String,
    canonical: HashMap<String, String>,
    /// Canonical name to every raw alias that resolved to it.
    classes: BTreeMap<String, BTreeSet<String>>,
}

impl AliasMap {
    /// Builds the map for every name in `records`.
    pub fn from_records(records: &[NeighborRecord], domain: &str) -> Self {
        let mut resolver = AliasResolver::new(domain);
        resolver.observe_records(records);
        resolver.resolve()
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Canonical name for `raw`; names never observed are returned as-is.
    pub fn canonical<'a>(&'a self, raw: &'a str) -> &'a str {
        self.canonical.get(raw).map_or(raw, String::as_str)
    }

    /// Raw aliases resolving to `canonical`.
    pub fn aliases_of(&self, canonical: &str) -> Option<&BTreeSet<String>> {
        self.classes.get(canonical)
    }

    /// Equivalence classes, keyed by canonical name.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.classes
            .iter()
            .map(|(name, aliases)| (name.as_str(), aliases))
    }

    /// Number of distinct canonical names.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DOMAIN: &str = "example.com";

    #[test]
    fn test_serial_suffix_stripped_and_qualified() {
        assert_eq!(normalize_device_name("sw1(FDO123)", DOMAIN), "sw1.example.com");
        assert_eq!(
            normalize_device_name("dist-sw2 (FOC1928Y1ZZ)", DOMAIN),
            "dist-sw2.example.com"
        );
        assert_eq!(
            normalize_device_name("leaf1.example.com(SAL1234ABCD)", DOMAIN),
            "leaf1.example.com"
        );
    }

    #[test]
    fn test_names_without_parens_pass_through() {
        assert_eq!(normalize_device_name("edge-rtr1", DOMAIN), "edge-rtr1");
        assert_eq!(normalize_device_name("SEP001122334455", DOMAIN), "SEP001122334455");
        assert_eq!(normalize_device_name("odd)name", DOMAIN), "odd)name");
    }

    #[test]
    fn test_empty_base_left_unchanged() {
        assert_eq!(normalize_device_name("(FDO123)", DOMAIN), "(FDO123)");
    }

    #[test]
    fn test_domain_match_requires_label_boundary() {
        assert_eq!(
            normalize_device_name("sw1notexample.com(X)", DOMAIN),
            "sw1notexample.com.example.com"
        );
    }

    #[test]
    fn test_serial_alias_and_qualified_alias_share_canonical() {
        let mut resolver = AliasResolver::new(DOMAIN);
        resolver.observe("sw1(FDO123)");
        resolver.observe("sw1.example.com");
        let map = resolver.resolve();

        assert_eq!(map.canonical("sw1(FDO123)"), "sw1.example.com");
        assert_eq!(map.canonical("sw1.example.com"), "sw1.example.com");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_bare_name_folded_regardless_of_order() {
        let forward = {
            let mut resolver = AliasResolver::new(DOMAIN);
            resolver.observe("core-sw1");
            resolver.observe("core-sw1(FDO999)");
            resolver.resolve()
        };
        let backward = {
            let mut resolver = AliasResolver::new(DOMAIN);
            resolver.observe("core-sw1(FDO999)");
            resolver.observe("core-sw1");
            resolver.resolve()
        };

        for map in [&forward, &backward] {
            assert_eq!(map.canonical("core-sw1"), "core-sw1.example.com");
            assert_eq!(map.canonical("core-sw1(FDO999)"), "core-sw1.example.com");
            let aliases = map.aliases_of("core-sw1.example.com").unwrap();
            assert!(aliases.contains("core-sw1"));
            assert!(aliases.contains("core-sw1(FDO999)"));
        }
    }

    #[test]
    fn test_bare_name_without_qualified_form_stays_bare() {
        let mut resolver = AliasResolver::new(DOMAIN);
        resolver.observe("edge-rtr1");
        resolver.observe("sw1(FDO1)");
        let map = resolver.resolve();
        assert_eq!(map.canonical("edge-rtr1"), "edge-rtr1");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_unobserved_name_returned_as_is() {
        let map = AliasResolver::new(DOMAIN).resolve();
        assert!(map.is_empty());
        assert_eq!(map.canonical("ghost(1)"), "ghost(1)");
    }

    #[test]
    fn test_observe_records_collects_both_ends() {
        let record = NeighborRecord {
            source_device: "core-sw1".to_string(),
            device_id: "dist-sw2(FDO2)".to_string(),
            local_interface: "Gi1/0/1".to_string(),
            holdtime: "150".to_string(),
            capability: "S I".to_string(),
            platform: "C9300".to_string(),
            port_id: "Gi1/0/48".to_string(),
        };
        let mut resolver = AliasResolver::new(DOMAIN);
        resolver.observe_records(&[record.clone(), record]);
        assert_eq!(resolver.len(), 2);
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(raw in "[ -~]{0,40}") {
            let once = normalize_device_name(&raw, DOMAIN);
            let twice = normalize_device_name(&once, DOMAIN);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_normalize_idempotent_for_annotated_names(
            base in "[a-z][a-z0-9-]{0,15}",
            serial in "[A-Z0-9]{1,12}",
            qualified in any::<bool>(),
        ) {
            let host = if qualified { format!("{base}.{DOMAIN}") } else { base.clone() };
            let raw = format!("{host}({serial})");
            let once = normalize_device_name(&raw, DOMAIN);
            prop_assert_eq!(&once, &format!("{base}.{DOMAIN}"));
            prop_assert_eq!(normalize_device_name(&once, DOMAIN), once);
        }
    }
}
