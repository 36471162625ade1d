use crate::output::{PeriodicsDocument, TestGroupsDocument};
use anyhow::{Context, bail};
use std::fs;
use std::path::Path;

/// Replaced by the YAML-serialized periodics document.
pub const PERIODICS_PLACEHOLDER: &str = "__PERIODICS__";

pub const GENERATED_COMMENT: &str = "# AUTO-GENERATED by generate-tests - DO NOT EDIT.";

const BUILTIN_TEMPLATE: &str = "# AUTO-GENERATED by generate-tests - DO NOT EDIT.\n\n__PERIODICS__";

/// Text template for the periodics output file.
///
/// Placeholder substitution rather than `format!()`: templates are user
/// supplied and may contain `{}` of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn builtin() -> Self {
        Self {
            text: BUILTIN_TEMPLATE.to_string(),
        }
    }

    pub fn parse(text: String) -> anyhow::Result<Self> {
        if !text.contains(PERIODICS_PLACEHOLDER) {
            bail!("template has no {PERIODICS_PLACEHOLDER} placeholder");
        }
        Ok(Self { text })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read template {}", path.display()))?;
        Self::parse(text).with_context(|| format!("in template {}", path.display()))
    }

    pub fn render(&self, doc: &PeriodicsDocument<'_>) -> anyhow::Result<String> {
        let yaml = serde_yaml::to_string(doc).context("serialize periodics")?;
        Ok(self.text.replace(PERIODICS_PLACEHOLDER, &yaml))
    }
}

pub fn render_test_groups(doc: &TestGroupsDocument<'_>) -> anyhow::Result<String> {
    let yaml = serde_yaml::to_string(doc).context("serialize test groups")?;
    Ok(format!("{GENERATED_COMMENT}\n\n{yaml}"))
}
