//! The project configuration record.
//!
//! Built once by the collector, then passed by reference through rendering,
//! file selection and cleanup. Derived fields are computed in
//! [`ProjectConfig::new`] and have no setters.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// A closed set of answers offered as a numbered menu.
pub trait Choice: Copy + Sized + 'static {
    /// All variants, in menu order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn from_answer(answer: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|choice| choice.as_str() == answer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    App,
    Library,
    Package,
    Data,
}

impl Choice for ProjectType {
    const ALL: &'static [Self] = &[Self::App, Self::Library, Self::Package, Self::Data];

    fn as_str(&self) -> &'static str {
        match self {
            Self::App => "app",
            Self::Library => "library",
            Self::Package => "package",
            Self::Data => "data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PythonVersion {
    #[serde(rename = "3.9")]
    V3_9,
    #[serde(rename = "3.10")]
    V3_10,
    #[serde(rename = "3.11")]
    V3_11,
    #[serde(rename = "3.12")]
    V3_12,
}

impl Choice for PythonVersion {
    const ALL: &'static [Self] = &[Self::V3_9, Self::V3_10, Self::V3_11, Self::V3_12];

    fn as_str(&self) -> &'static str {
        match self {
            Self::V3_9 => "3.9",
            Self::V3_10 => "3.10",
            Self::V3_11 => "3.11",
            Self::V3_12 => "3.12",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum License {
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache2,
    #[serde(rename = "GPL-3.0")]
    Gpl3,
    #[serde(rename = "BSD-3-Clause")]
    Bsd3Clause,
    Proprietary,
}

impl Choice for License {
    const ALL: &'static [Self] =
        &[Self::Mit, Self::Apache2, Self::Gpl3, Self::Bsd3Clause, Self::Proprietary];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Mit => "MIT",
            Self::Apache2 => "Apache-2.0",
            Self::Gpl3 => "GPL-3.0",
            Self::Bsd3Clause => "BSD-3-Clause",
            Self::Proprietary => "Proprietary",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

display_as_str!(ProjectType, PythonVersion, License);

/// Identity answers, as given by the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub project_name: String,
    pub project_description: String,
    pub author_name: String,
    pub author_email: String,
    pub github_username: String,
    pub project_type: ProjectType,
    pub min_python_version: PythonVersion,
    pub license: License,
    /// Only asked for data projects; empty otherwise.
    pub data_sources: String,
}

/// Optional features of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Features {
    #[serde(rename = "use_docker")]
    pub docker: bool,
    #[serde(rename = "use_pre_commit")]
    pub pre_commit: bool,
    #[serde(rename = "use_github_actions")]
    pub ci: bool,
    #[serde(rename = "use_jupyter")]
    pub notebooks: bool,
    #[serde(rename = "use_spark")]
    pub spark: bool,
    #[serde(rename = "use_cli")]
    pub cli: bool,
    #[serde(rename = "setup_claude_md")]
    pub context_doc: bool,
}

impl Features {
    /// Every feature switched on.
    pub fn all() -> Self {
        Self {
            docker: true,
            pre_commit: true,
            ci: true,
            notebooks: true,
            spark: true,
            cli: true,
            context_doc: true,
        }
    }

    /// Every feature switched off.
    pub fn none() -> Self {
        Self {
            docker: false,
            pre_commit: false,
            ci: false,
            notebooks: false,
            spark: false,
            cli: false,
            context_doc: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    #[serde(flatten)]
    identity: Identity,
    #[serde(flatten)]
    features: Features,
    python_package_name: String,
    project_slug: String,
}

impl ProjectConfig {
    pub fn new(identity: Identity, features: Features) -> Self {
        let python_package_name = identity.project_name.replace('-', "_");
        let project_slug = identity.project_name.to_lowercase().replace([' ', '_'], "-");
        Self { identity, features, python_package_name, project_slug }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub fn project_name(&self) -> &str {
        &self.identity.project_name
    }

    pub fn project_type(&self) -> ProjectType {
        self.identity.project_type
    }

    pub fn python_package_name(&self) -> &str {
        &self.python_package_name
    }

    pub fn project_slug(&self) -> &str {
        &self.project_slug
    }

    /// Key/value pairs available to placeholder substitution, in prompt order.
    ///
    /// Keys are lower snake case; the matching token is the upper-cased key
    /// wrapped in double braces. Booleans use Python spelling.
    pub fn placeholder_values(&self) -> IndexMap<String, String> {
        let id = &self.identity;
        let f = &self.features;
        let flag = |value: bool| if value { "True" } else { "False" }.to_string();

        IndexMap::from([
            ("project_name".to_string(), id.project_name.clone()),
            ("project_description".to_string(), id.project_description.clone()),
            ("author_name".to_string(), id.author_name.clone()),
            ("author_email".to_string(), id.author_email.clone()),
            ("github_username".to_string(), id.github_username.clone()),
            ("project_type".to_string(), id.project_type.to_string()),
            ("min_python_version".to_string(), id.min_python_version.to_string()),
            ("license".to_string(), id.license.to_string()),
            ("use_docker".to_string(), flag(f.docker)),
            ("use_pre_commit".to_string(), flag(f.pre_commit)),
            ("use_github_actions".to_string(), flag(f.ci)),
            ("use_jupyter".to_string(), flag(f.notebooks)),
            ("use_spark".to_string(), flag(f.spark)),
            ("use_cli".to_string(), flag(f.cli)),
            ("data_sources".to_string(), id.data_sources.clone()),
            ("setup_claude_md".to_string(), flag(f.context_doc)),
            ("python_package_name".to_string(), self.python_package_name.clone()),
            ("project_slug".to_string(), self.project_slug.clone()),
        ])
    }
}
