//! Local item declarations.

use crate::error::{ModelError, ModelResult};
use crate::preprocessing::PreprocessingStep;
use crate::set::UnorderedSet;
use crate::tag::{Tag, TagSet};
use crate::value_type::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// History retention used when a declaration does not set one.
pub const DEFAULT_HISTORY: &str = "90d";

/// Longest description the server accepts, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 65_535;

fn default_history() -> String {
    DEFAULT_HISTORY.to_string()
}

/// Whether a record maps to a plain item or to a discovery prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemFlavor {
    Item,
    Prototype,
}

impl ItemFlavor {
    #[must_use]
    pub const fn is_prototype(self) -> bool {
        matches!(self, ItemFlavor::Prototype)
    }
}

impl fmt::Display for ItemFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFlavor::Item => f.write_str("item"),
            ItemFlavor::Prototype => f.write_str("item prototype"),
        }
    }
}

/// Fields shared by every item kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Host or template the item belongs to.
    #[serde(rename = "hostid")]
    pub host_id: String,
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_history")]
    pub history: String,
    /// Trend retention. `None` until resolved against the server version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trends: Option<String>,
    #[serde(rename = "valuetype")]
    pub value_type: ValueType,
    /// Ordered pipeline, first step runs first.
    #[serde(rename = "preprocessor", default, skip_serializing_if = "Vec::is_empty")]
    pub preprocessors: Vec<PreprocessingStep>,
    #[serde(default, skip_serializing_if = "UnorderedSet::is_empty")]
    pub applications: UnorderedSet<String>,
    #[serde(rename = "tag", default, skip_serializing_if = "UnorderedSet::is_empty")]
    pub tags: TagSet,
}

impl ItemConfig {
    /// Creates a config with default history and nothing else set.
    pub fn new(
        host_id: impl Into<String>,
        key: impl Into<String>,
        name: impl Into<String>,
        value_type: ValueType,
    ) -> Self {
        Self {
            host_id: host_id.into(),
            key: key.into(),
            name: name.into(),
            description: String::new(),
            history: default_history(),
            trends: None,
            value_type,
            preprocessors: Vec::new(),
            applications: UnorderedSet::new(),
            tags: TagSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_history(mut self, history: impl Into<String>) -> Self {
        self.history = history.into();
        self
    }

    pub fn with_trends(mut self, trends: impl Into<String>) -> Self {
        self.trends = Some(trends.into());
        self
    }

    /// Appends a step to the end of the pipeline.
    pub fn with_preprocessor(mut self, step: PreprocessingStep) -> Self {
        self.preprocessors.push(step);
        self
    }

    pub fn with_application(mut self, application_id: impl Into<String>) -> Self {
        self.applications.insert(application_id.into());
        self
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Checks every field against its declared constraint.
    pub fn validate(&self) -> ModelResult<()> {
        require_numeric("hostid", &self.host_id)?;
        require_not_blank("key", &self.key)?;
        require_not_blank("name", &self.name)?;
        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ModelError::validation(
                "description",
                format!("longer than {MAX_DESCRIPTION_LEN} characters"),
            ));
        }
        require_not_blank("history", &self.history)?;
        if let Some(trends) = &self.trends {
            require_not_blank("trends", trends)?;
        }

        for (i, step) in self.preprocessors.iter().enumerate() {
            require_numeric(&format!("preprocessor.{i}.type"), &step.step_type)?;
            for (j, param) in step.params().iter().enumerate() {
                require_not_blank(&format!("preprocessor.{i}.params.{j}"), param)?;
            }
        }
        for application in &self.applications {
            require_numeric("applications", application)?;
        }
        for tag in &self.tags {
            require_not_blank("tag.key", &tag.key)?;
        }
        Ok(())
    }
}

/// A local item declaration: remote identity, shared fields, kind fields.
///
/// `F` is the field struct of the item kind (polling interval, SNMP OID, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord<F> {
    /// Remote identifier. Absent until the item has been created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub config: ItemConfig,
    /// Discovery rule of a prototype. Never set on plain items.
    #[serde(rename = "ruleid", default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> ItemRecord<F> {
    /// A plain item declaration without identity.
    pub fn new(config: ItemConfig, fields: F) -> Self {
        Self {
            id: None,
            config,
            rule_id: None,
            fields,
        }
    }

    /// A prototype declaration bound to a discovery rule.
    pub fn prototype(config: ItemConfig, rule_id: impl Into<String>, fields: F) -> Self {
        Self {
            id: None,
            config,
            rule_id: Some(rule_id.into()),
            fields,
        }
    }

    /// Prototype if a discovery rule is declared, plain item otherwise.
    pub fn flavor(&self) -> ItemFlavor {
        if self.rule_id.is_some() {
            ItemFlavor::Prototype
        } else {
            ItemFlavor::Item
        }
    }

    /// True once a remote identifier has been adopted.
    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }

    /// Returns the remote identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Validates the shared fields and, for prototypes, the rule reference.
    pub fn validate(&self, flavor: ItemFlavor) -> ModelResult<()> {
        self.config.validate()?;
        if flavor.is_prototype() {
            match &self.rule_id {
                Some(rule_id) => require_not_blank("ruleid", rule_id)?,
                None => return Err(ModelError::validation("ruleid", "required for prototypes")),
            }
        }
        Ok(())
    }
}

fn require_not_blank(field: &str, value: &str) -> ModelResult<()> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(field, "must not be blank"));
    }
    Ok(())
}

fn require_numeric(field: &str, value: &str) -> ModelResult<()> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::validation(field, "must be numeric"));
    }
    Ok(())
}
