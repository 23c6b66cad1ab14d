//! Pricing catalog and alias table
//!
//! Both are built once at startup and never change afterwards. Every
//! consistency problem in the source data is reported while building, so a
//! process never serves requests from a half-valid catalog.

use crate::normalize::normalize;
use regdesk_core::models::ServicePricing;
use regdesk_core::{AppError, AppResult};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info, warn};

/// Catalog bundled with the binary
const BUILTIN_CATALOG: &str = include_str!("../catalog/default.json");

/// On-disk catalog document
///
/// ```json
/// {
///   "services": { "GST Filing": { "base_price": "₹1,499" } },
///   "aliases": { "GST": "GST Filing" }
/// }
/// ```
///
/// Both sections keep every entry in document order, repeated names
/// included, so the builder sees and rejects duplicates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogFile {
    #[serde(default, deserialize_with = "map_entries")]
    pub services: Vec<(String, ServicePricing)>,

    #[serde(default, deserialize_with = "map_entries")]
    pub aliases: Vec<(String, String)>,
}

/// Read a JSON object as a list of entries without collapsing repeated keys
fn map_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object keyed by name")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

/// Normalized alias to canonical key mapping
#[derive(Debug, Clone, Default)]
pub struct AliasTable(HashMap<String, String>);

impl AliasTable {
    /// Target key for an already-normalized alias
    pub fn target(&self, alias: &str) -> Option<&str> {
        self.0.get(alias).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Immutable service pricing catalog keyed by normalized service name
#[derive(Debug, Clone, Default)]
pub struct PricingCatalog {
    services: HashMap<String, ServicePricing>,
    aliases: AliasTable,
}

impl PricingCatalog {
    /// Start an empty catalog builder
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Catalog shipped with the binary
    pub fn builtin() -> AppResult<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse and validate a JSON catalog document
    pub fn from_json(json: &str) -> AppResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| AppError::Config(format!("Invalid pricing catalog: {}", e)))?;
        Self::from_file(file)
    }

    /// Read, parse and validate a JSON catalog file
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading pricing catalog");

        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!(
                "Cannot read pricing catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    /// Validate an already-parsed catalog document
    pub fn from_file(file: CatalogFile) -> AppResult<Self> {
        let mut builder = Self::builder();
        for (name, pricing) in file.services {
            builder = builder.service(name, pricing);
        }
        for (alias, target) in file.aliases {
            builder = builder.alias(alias, target);
        }
        builder.build()
    }

    /// Entry for an already-resolved key
    pub fn get(&self, key: &str) -> Option<&ServicePricing> {
        self.services.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.services.contains_key(key)
    }

    /// Alias table used at lookup time
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Canonical keys, sorted
    pub fn service_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.services.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Collects raw service names and aliases, then validates them together
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    services: Vec<(String, ServicePricing)>,
    aliases: Vec<(String, String)>,
}

impl CatalogBuilder {
    /// Add a service under its human-readable name
    pub fn service(mut self, name: impl Into<String>, pricing: ServicePricing) -> Self {
        self.services.push((name.into(), pricing));
        self
    }

    /// Add an alias from one human-readable name to another
    pub fn alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.push((alias.into(), target.into()));
        self
    }

    /// Normalize and validate everything collected so far
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when a name is blank, two names collide
    /// after normalization, an alias shadows a service, an alias points at
    /// another alias, or an alias points at an unknown service.
    pub fn build(self) -> AppResult<PricingCatalog> {
        let mut services: HashMap<String, ServicePricing> = HashMap::new();

        for (name, pricing) in self.services {
            let key = normalize(&name);
            if key.is_empty() {
                return Err(AppError::Config(format!(
                    "Blank service name in pricing catalog: {:?}",
                    name
                )));
            }

            let pricing = pricing.normalized();
            if !pricing.is_priced() {
                warn!(service = %name, "Skipping service without base price or packages");
                continue;
            }

            if services.insert(key.clone(), pricing).is_some() {
                return Err(AppError::Config(format!(
                    "Duplicate service '{}' (normalizes to '{}')",
                    name, key
                )));
            }
        }

        let raw_aliases: Vec<(String, String, String)> = self
            .aliases
            .into_iter()
            .map(|(alias, target)| {
                let key = normalize(&alias);
                (alias, key, normalize(&target))
            })
            .collect();

        let mut aliases: HashMap<String, String> = HashMap::new();
        for (alias, key, target) in &raw_aliases {
            if key.is_empty() {
                return Err(AppError::Config(format!(
                    "Blank alias in pricing catalog: {:?}",
                    alias
                )));
            }
            if services.contains_key(key) {
                return Err(AppError::Config(format!(
                    "Alias '{}' shadows a catalog service",
                    alias
                )));
            }
            if !services.contains_key(target) {
                let chained = raw_aliases.iter().any(|(_, other, _)| other == target);
                return Err(AppError::Config(if chained {
                    format!(
                        "Alias '{}' points at alias '{}'; aliases resolve in one hop",
                        alias, target
                    )
                } else {
                    format!("Alias '{}' points at unknown service '{}'", alias, target)
                }));
            }

            match aliases.get(key) {
                Some(existing) if existing != target => {
                    return Err(AppError::Config(format!(
                        "Alias '{}' maps to both '{}' and '{}'",
                        alias, existing, target
                    )));
                }
                Some(_) => {}
                None => {
                    aliases.insert(key.clone(), target.clone());
                }
            }
        }

        info!(
            services = services.len(),
            aliases = aliases.len(),
            "Pricing catalog built"
        );

        Ok(PricingCatalog {
            services,
            aliases: AliasTable(aliases),
        })
    }
}
