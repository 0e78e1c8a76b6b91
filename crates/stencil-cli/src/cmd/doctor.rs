use crate::output;
use stencil_core::doctor;
use stencil_core::scanner::PathProbe;

pub fn run(json: bool) -> anyhow::Result<()> {
    let checks = doctor::check_environment(&PathProbe);

    if json {
        return output::print_json(&checks);
    }

    let rows = checks
        .iter()
        .map(|c| {
            vec![
                c.name.to_string(),
                if c.found { "found" } else { "missing" }.to_string(),
            ]
        })
        .collect();
    output::print_table(&["TOOL", "STATUS"], rows);

    let missing = checks.iter().filter(|c| !c.found).count();
    if missing > 0 {
        println!("\n{missing} tool(s) missing; some workflows will not work.");
    } else {
        println!("\nAll required tools found.");
    }
    Ok(())
}
