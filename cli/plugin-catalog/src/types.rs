//! Plugin info domain types.
//!
//! Records arrive as untyped JSON and are validated into [`PluginInfo`]
//! at the parse boundary. Fields not modelled here are ignored.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single HAL style link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Cross-reference metadata keyed by relation name (`self`, `doc`, ...).
pub type Links = BTreeMap<String, Link>;

/// The kind of extension point a plugin implements.
///
/// Kinds this client does not know about are kept as [`ExtensionType::Unknown`]
/// so that newer servers do not break parsing.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum ExtensionType {
    #[serde(rename = "authorization")]
    Authorization,
    #[serde(rename = "configrepo")]
    ConfigRepo,
    #[serde(rename = "elastic-agent")]
    ElasticAgent,
    #[serde(rename = "notification")]
    Notification,
    #[serde(rename = "package-repository")]
    PackageRepository,
    #[serde(rename = "scm")]
    Scm,
    #[serde(rename = "task")]
    Task,
    #[serde(rename = "analytics")]
    Analytics,
    #[serde(rename = "artifact")]
    Artifact,
    #[serde(rename = "secrets")]
    Secrets,

    #[serde(untagged)]
    Unknown(String),
}

impl ExtensionType {
    const KNOWN: [ExtensionType; 10] = [
        ExtensionType::Authorization,
        ExtensionType::ConfigRepo,
        ExtensionType::ElasticAgent,
        ExtensionType::Notification,
        ExtensionType::PackageRepository,
        ExtensionType::Scm,
        ExtensionType::Task,
        ExtensionType::Analytics,
        ExtensionType::Artifact,
        ExtensionType::Secrets,
    ];

    /// The wire name used in query parameters and response bodies.
    pub fn as_str(&self) -> &str {
        match self {
            ExtensionType::Authorization => "authorization",
            ExtensionType::ConfigRepo => "configrepo",
            ExtensionType::ElasticAgent => "elastic-agent",
            ExtensionType::Notification => "notification",
            ExtensionType::PackageRepository => "package-repository",
            ExtensionType::Scm => "scm",
            ExtensionType::Task => "task",
            ExtensionType::Analytics => "analytics",
            ExtensionType::Artifact => "artifact",
            ExtensionType::Secrets => "secrets",
            ExtensionType::Unknown(name) => name,
        }
    }
}

impl Display for ExtensionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExtensionType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = Self::KNOWN.into_iter().find(|known| known.as_str() == s);
        Ok(known.unwrap_or_else(|| ExtensionType::Unknown(s.to_string())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginState {
    Active,
    Invalid,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginStatus {
    pub state: PluginState,
    #[serde(default)]
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Descriptive metadata a plugin ships about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub name: Option<String>,
    pub version: Option<String>,
    pub target_go_version: Option<String>,
    pub description: Option<String>,
    pub target_operating_systems: Vec<String>,
    pub vendor: Option<Vendor>,
}

/// One extension point implemented by a plugin.
///
/// The settings and views of an extension differ per [`ExtensionType`]
/// and are kept as raw JSON in `details`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    #[serde(rename = "type")]
    pub extension_type: ExtensionType,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A plugin as listed by the server, together with the listing's shared links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub id: String,
    pub status: PluginStatus,
    #[serde(default)]
    pub plugin_file_location: Option<String>,
    #[serde(default)]
    pub bundled_plugin: bool,
    #[serde(default)]
    pub about: Option<About>,
    #[serde(default)]
    pub extensions: Vec<Extension>,
    /// Links of the listing this record was part of.
    #[serde(rename = "_links", skip_deserializing)]
    pub links: Links,
}

impl PluginInfo {
    /// Validate one raw listing item and attach the listing's `links`.
    ///
    /// Links embedded in the item itself are ignored.
    pub fn from_json(item: Value, links: &Links) -> Result<Self, serde_json::Error> {
        let mut info: PluginInfo = serde_json::from_value(item)?;
        info.links = links.clone();
        Ok(info)
    }

    pub fn is_active(&self) -> bool {
        self.status.state == PluginState::Active
    }

    pub fn version(&self) -> Option<&str> {
        self.about.as_ref()?.version.as_deref()
    }

    pub fn extension_types(&self) -> impl Iterator<Item = &ExtensionType> {
        self.extensions.iter().map(|ext| &ext.extension_type)
    }
}
