//! Offering catalog: per-offering cost figures, architecture diagrams and
//! calculator links, plus the static cover-page logos.

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const DEFAULT_ESTIMATE_LINK: &str = "https://calculator.aws/#/";

/// Generated text containing this phrase selects an offering's production link.
pub const PRODUCTION_MARKER: &str = "Production Development";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Offering {
    pub name: String,
    pub poc_cost: Option<String>,
    pub prod_cost: Option<String>,
    pub bedrock_cost: Option<String>,
    pub total_cost: Option<String>,
    /// Diagram file name, relative to the assets directory.
    pub diagram: Option<String>,
    pub estimate_link: Option<String>,
    pub production_link: Option<String>,
    /// Append the fixed token/cost assumptions table after the cost table.
    pub cost_breakdown: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CostRow {
    pub label: &'static str,
    pub value: String,
}

impl Offering {
    /// Populated cost fields, in fixed order POC, Production, Amazon Bedrock, Total.
    pub fn cost_rows(&self) -> Vec<CostRow> {
        [
            ("POC", &self.poc_cost),
            ("Production", &self.prod_cost),
            ("Amazon Bedrock", &self.bedrock_cost),
            ("Total", &self.total_cost),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value.as_ref().map(|v| CostRow {
                label,
                value: v.clone(),
            })
        })
        .collect()
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogoAssets {
    pub partner: Option<String>,
    pub vendor: Option<String>,
    pub certification: Option<String>,
}

impl Default for LogoAssets {
    fn default() -> Self {
        Self {
            partner: Some("aws partner logo.jpg".into()),
            vendor: Some("oneture logo1.jpg".into()),
            certification: Some("aws advanced logo1.jpg".into()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    pub assets_dir: PathBuf,
    pub logos: LogoAssets,
    pub offerings: Vec<Offering>,
}

fn builtin_offering(
    name: &str,
    costs: [Option<&str>; 4],
    estimate_id: &str,
) -> Offering {
    let [poc, prod, bedrock, total] = costs.map(|c| c.map(String::from));
    Offering {
        name: name.to_string(),
        poc_cost: poc,
        prod_cost: prod,
        bedrock_cost: bedrock,
        total_cost: total,
        diagram: Some(format!("{name}.png")),
        estimate_link: Some(format!("https://calculator.aws/#/estimate?id={estimate_id}")),
        production_link: None,
        cost_breakdown: false,
    }
}

pub fn builtin_offerings() -> Vec<Offering> {
    let mut offerings = vec![
        builtin_offering(
            "L1 Support Bot POC SOW",
            [Some("3,536.40 USD"), None, None, None],
            "211ea64cba5a8f5dc09805f4ad1a1e598ef5238b",
        ),
        builtin_offering(
            "Beauty Advisor POC SOW",
            [
                Some("4,525.66 USD + 200 USD (Amazon Bedrock Cost) = 4,725.66"),
                Some("4,525.66 USD + 1,175.82 USD (Amazon Bedrock Cost) = 5,701.48"),
                None,
                None,
            ],
            "3f89756a35f7bac7b2cd88d95f3e9aba9be9b0eb",
        ),
        builtin_offering(
            "Ready Search POC Scope of Work Document",
            [Some("2,641.40 USD"), None, None, None],
            "f8bc48f1ae566b8ea1241994328978e7e86d3490",
        ),
        builtin_offering(
            "AI based Image Enhancement POC SOW",
            [Some("2,814.34 USD"), None, None, None],
            "9a3e593b92b796acecf31a78aec17d7eb957d1e5",
        ),
        builtin_offering(
            "AI based Image Inspection POC SOW",
            [Some("3,536.40 USD"), None, None, None],
            "72c56f93b0c0e101d67a46af4f4fe9886eb93342",
        ),
        builtin_offering(
            "Gen AI for SOP POC SOW",
            [Some("2,110.30 USD"), None, None, None],
            "c21e9b242964724bf83556cfeee821473bb935d1",
        ),
        builtin_offering(
            "Project Scope Document",
            [None, Some("2,993.60 USD"), None, None],
            "37339d6e34c73596559fe09ca16a0ac2ec4c4252",
        ),
        builtin_offering(
            "Gen AI Speech To Speech",
            [None, Some("2,124.23 USD"), None, None],
            "8444ae26e6d61e5a43e8e743578caa17fd7f3e69",
        ),
        builtin_offering(
            "PoC Scope Document",
            [None, None, Some("1,000 USD"), Some("$ 3,150")],
            "420ed9df095e7824a144cb6c0e9db9e7ec3c4153",
        ),
    ];
    for offering in &mut offerings {
        match offering.name.as_str() {
            "Beauty Advisor POC SOW" => {
                offering.production_link = Some(
                    "https://calculator.aws/#/estimate?id=4d7f092e819c799f680fd14f8de3f181f565c48e"
                        .into(),
                );
            }
            "PoC Scope Document" => offering.cost_breakdown = true,
            _ => {}
        }
    }
    offerings
}

impl Catalog {
    pub fn builtin(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
            logos: LogoAssets::default(),
            offerings: builtin_offerings(),
        }
    }

    pub fn offering(&self, name: &str) -> Option<&Offering> {
        self.offerings.iter().find(|o| o.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.offerings.iter().map(|o| o.name.as_str())
    }

    /// Cost rows for `name`; `None` when the offering has no cost entry.
    pub fn cost_for(&self, name: &str) -> Option<Vec<CostRow>> {
        let rows = self.offering(name)?.cost_rows();
        if rows.is_empty() { None } else { Some(rows) }
    }

    pub fn diagram_asset_for(&self, name: &str) -> Option<PathBuf> {
        let file = self.offering(name)?.diagram.as_ref()?;
        Some(self.asset_path(file))
    }

    /// Calculator link for `name`. An offering with a production link switches
    /// to it when `generated_text` mentions [`PRODUCTION_MARKER`].
    pub fn estimate_link_for(&self, name: &str, generated_text: &str) -> String {
        let Some(offering) = self.offering(name) else {
            return DEFAULT_ESTIMATE_LINK.to_string();
        };
        if let Some(prod) = &offering.production_link
            && generated_text.contains(PRODUCTION_MARKER)
        {
            return prod.clone();
        }
        offering
            .estimate_link
            .clone()
            .unwrap_or_else(|| DEFAULT_ESTIMATE_LINK.to_string())
    }

    pub fn asset_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.assets_dir.join(file)
    }

    pub fn partner_logo(&self) -> Option<PathBuf> {
        self.logos.partner.as_ref().map(|f| self.asset_path(f))
    }

    pub fn vendor_logo(&self) -> Option<PathBuf> {
        self.logos.vendor.as_ref().map(|f| self.asset_path(f))
    }

    pub fn certification_logo(&self) -> Option<PathBuf> {
        self.logos.certification.as_ref().map(|f| self.asset_path(f))
    }
}
