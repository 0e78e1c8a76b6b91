use inquire::{Select, Text};
use stencil_core::catalog::{Catalog, StackKind};
use stencil_core::recipe::{Persistence, Recipe, Stack, NONE_SENTINEL};

const CUSTOM_STACK: &str = "custom";

/// Walk the user through the recipe questions. Options come from the
/// catalog; picking a known code stack pre-fills the stack section.
pub fn run(catalog: &Catalog, default_name: &str) -> anyhow::Result<Recipe> {
    let name = Text::new("Project name?")
        .with_default(default_name)
        .prompt()?;
    let customer = Text::new("Customer?").with_default("internal").prompt()?;

    let mut code_options = vec![CUSTOM_STACK];
    code_options.extend(catalog.names_of_kind(StackKind::Code));
    let chosen = Select::new("Which code stack will you use?", code_options).prompt()?;

    let mut recipe = Recipe::new(name, chosen);
    recipe.project.customer = customer;

    let mut stack = if chosen == CUSTOM_STACK {
        let language = Text::new("Primary language?").prompt()?;
        let tooling = Text::new("Primary tooling (framework, etc.)?").prompt()?;
        Stack {
            language,
            tooling,
            ..Stack::default()
        }
    } else {
        let entry = catalog
            .find(chosen)
            .ok_or_else(|| anyhow::anyhow!("stack '{chosen}' missing from catalog"))?;
        Stack {
            language: entry.provides.language.clone(),
            tooling: entry.provides.tooling.clone(),
            dependency_management: entry.provides.dependency_management.clone(),
            build_release_run: entry.provides.build_release_run.clone(),
            ..Stack::default()
        }
    };

    let mut linter_options = vec![NONE_SENTINEL, "golangci-lint", "eslint", "ruff", "phpstan"];
    let suggested = suggested_linter(&stack.language);
    if let Some(pos) = linter_options.iter().position(|l| *l == suggested) {
        linter_options.swap(0, pos);
    }
    let linter = Select::new("Which linter will you use?", linter_options).prompt()?;
    if linter != NONE_SENTINEL {
        stack.linter = linter.to_string();
    }
    recipe.stack = Some(stack);

    let mut persistence_options = vec![NONE_SENTINEL];
    persistence_options.extend(catalog.names_of_kind(StackKind::Persistence));
    let persistence = Select::new("Which persistence stack will you use?", persistence_options)
        .prompt()?;
    recipe.persistence = Persistence {
        kind: persistence.to_string(),
    };

    let mut deployment_options = vec![NONE_SENTINEL];
    deployment_options.extend(catalog.names_of_kind(StackKind::Deployment));
    let deployment =
        Select::new("Which deployment stack will you use?", deployment_options).prompt()?;
    recipe.deployment.kind = deployment.to_string();

    Ok(recipe)
}

fn suggested_linter(language: &str) -> &'static str {
    match language {
        "Go" => "golangci-lint",
        "TypeScript" | "JavaScript" => "eslint",
        "Python" => "ruff",
        "PHP" => "phpstan",
        _ => NONE_SENTINEL,
    }
}
