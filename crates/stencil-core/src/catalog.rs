use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StackKind / Provides / StackEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackKind {
    Code,
    Persistence,
    Deployment,
}

/// What a stack contributes to a project. Mirrors the `provides` block of a
/// skeleton manifest.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Provides {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub language: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tooling: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub runtime: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub persistence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_release_run: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackEntry {
    pub name: String,
    pub description: String,
    pub kind: StackKind,
    #[serde(default)]
    pub provides: Provides,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The set of stacks a user can pick from at init time.
///
/// Loaded once at startup and passed through as a value, not global state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub stacks: Vec<StackEntry>,
}

impl Catalog {
    /// The stacks shipped with the tool.
    pub fn builtin() -> Self {
        let stacks = vec![
            StackEntry {
                name: "go-cli".to_string(),
                description: "CLI tooling in Go with Cobra".to_string(),
                kind: StackKind::Code,
                provides: Provides {
                    language: "Go".to_string(),
                    tooling: "Cobra".to_string(),
                    runtime: "binary".to_string(),
                    persistence: "filesystem".to_string(),
                    dependency_management: Some("Go Modules".to_string()),
                    build_release_run: Some("go build, ./binary".to_string()),
                },
            },
            StackEntry {
                name: "mern".to_string(),
                description: "Full-stack web applications with MongoDB, Express, React, Node"
                    .to_string(),
                kind: StackKind::Code,
                provides: Provides {
                    language: "TypeScript".to_string(),
                    tooling: "React".to_string(),
                    runtime: "Node.js".to_string(),
                    persistence: "MongoDB".to_string(),
                    dependency_management: Some("NPM".to_string()),
                    build_release_run: Some("npm build, npm start".to_string()),
                },
            },
            StackEntry {
                name: "symfony-lamp".to_string(),
                description: "LAMP web applications and APIs with Symfony".to_string(),
                kind: StackKind::Code,
                provides: Provides {
                    language: "PHP".to_string(),
                    tooling: "Symfony".to_string(),
                    runtime: "Apache".to_string(),
                    persistence: "MySQL".to_string(),
                    dependency_management: Some("Composer".to_string()),
                    build_release_run: Some("standard PHP build".to_string()),
                },
            },
            StackEntry {
                name: "postgresql".to_string(),
                description: "PostgreSQL persistence layer".to_string(),
                kind: StackKind::Persistence,
                provides: Provides {
                    persistence: "postgresql".to_string(),
                    ..Provides::default()
                },
            },
            StackEntry {
                name: "kubernetes".to_string(),
                description: "Kubernetes deployment with a Helm chart".to_string(),
                kind: StackKind::Deployment,
                provides: Provides {
                    runtime: "kubernetes".to_string(),
                    ..Provides::default()
                },
            },
            StackEntry {
                name: "serverless".to_string(),
                description: "Serverless function deployment".to_string(),
                kind: StackKind::Deployment,
                provides: Provides {
                    runtime: "serverless".to_string(),
                    ..Provides::default()
                },
            },
        ];
        Self { stacks }
    }

    pub fn find(&self, name: &str) -> Option<&StackEntry> {
        self.stacks.iter().find(|s| s.name == name)
    }

    pub fn names_of_kind(&self, kind: StackKind) -> Vec<&str> {
        self.stacks
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.name.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
