use crate::scanner::CommandProbe;

/// External tools a standards-compliant project environment is expected to
/// have on PATH.
pub const REQUIRED_TOOLS: &[&str] = &[
    "git", "bash", "make", "docker", "tofu", "helm", "kubectl", "zip", "jq", "yq",
];

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ToolCheck {
    pub name: &'static str,
    pub found: bool,
}

/// Probe every required tool. Diagnostics only; the caller decides what to
/// do with missing entries.
pub fn check_environment(probe: &dyn CommandProbe) -> Vec<ToolCheck> {
    REQUIRED_TOOLS
        .iter()
        .map(|name| ToolCheck {
            name,
            found: probe.exists(name),
        })
        .collect()
}
