//! Shell configuration (file locations and product catalog).

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use kebab_inventory::Catalog;

pub const DEFAULT_DATA_FILE: &str = "kebab_inventory.txt";
pub const DEFAULT_REPORT_FILE: &str = "inventory_report.html";

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    pub data_file: PathBuf,
    pub report_file: PathBuf,
    pub catalog: Catalog,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            report_file: PathBuf::from(DEFAULT_REPORT_FILE),
            catalog: Catalog::reference(),
        }
    }
}

impl DesktopConfig {
    /// Default file names placed under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            data_file: dir.join(DEFAULT_DATA_FILE),
            report_file: dir.join(DEFAULT_REPORT_FILE),
            ..Self::default()
        }
    }
}

/// Command-line / environment overrides.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Ledger data file
    #[arg(long, env = "KEBAB_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// HTML report output file (overwritten on export)
    #[arg(long, env = "KEBAB_REPORT_FILE", default_value = DEFAULT_REPORT_FILE)]
    pub report_file: PathBuf,

    /// Comma-separated product catalog, in display order
    #[arg(long, env = "KEBAB_PRODUCTS")]
    pub products: Option<String>,
}

impl ConfigArgs {
    pub fn resolve(self) -> anyhow::Result<DesktopConfig> {
        let catalog = match self.products.as_deref() {
            Some(list) => parse_catalog(list).context("invalid product catalog")?,
            None => Catalog::reference(),
        };
        Ok(DesktopConfig {
            data_file: self.data_file,
            report_file: self.report_file,
            catalog,
        })
    }
}

/// Parse a comma-separated product list; blank entries are ignored.
pub fn parse_catalog(list: &str) -> anyhow::Result<Catalog> {
    let names = list.split(',').map(str::trim).filter(|n| !n.is_empty());
    Ok(Catalog::new(names)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_well_known_files_and_reference_catalog() {
        let config = DesktopConfig::default();
        assert_eq!(config.data_file, PathBuf::from("kebab_inventory.txt"));
        assert_eq!(config.report_file, PathBuf::from("inventory_report.html"));
        assert_eq!(config.catalog, Catalog::reference());
    }

    #[test]
    fn in_dir_keeps_file_names() {
        let config = DesktopConfig::in_dir("/tmp/shop");
        assert_eq!(config.data_file, PathBuf::from("/tmp/shop/kebab_inventory.txt"));
        assert_eq!(config.report_file, PathBuf::from("/tmp/shop/inventory_report.html"));
    }

    #[test]
    fn product_list_is_parsed_in_order() {
        let catalog = parse_catalog(" kofta, , joojeh ,barg").unwrap();
        let names: Vec<&str> = catalog.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, ["kofta", "joojeh", "barg"]);
    }

    #[test]
    fn bad_product_lists_are_rejected() {
        assert!(parse_catalog("a,b,a").is_err());
        assert!(parse_catalog(" , ").is_err());
        assert!(parse_catalog("a:b").is_err());
    }

    #[test]
    fn args_resolve_custom_catalog() {
        let args = ConfigArgs {
            data_file: PathBuf::from("d.txt"),
            report_file: PathBuf::from("r.html"),
            products: Some("x,y".to_string()),
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.catalog.len(), 2);
        assert_eq!(config.data_file, PathBuf::from("d.txt"));
    }
}
