use deploy_core::step::DeployPlan;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Render a plan as a `STEP  COMMAND` listing in execution order.
pub fn format_plan(plan: &DeployPlan) -> String {
    let rows = [
        ("build", plan.build.to_string()),
        ("deploy", plan.deploy.to_string()),
    ];

    // Pad the step column to its widest cell, header included
    let width = rows
        .iter()
        .map(|(step, _)| step.len())
        .chain(std::iter::once("STEP".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("{:width$}  COMMAND\n", "STEP");
    for (step, command) in rows {
        out.push_str(&format!("{step:width$}  {command}\n"));
    }
    out
}

pub fn print_plan(plan: &DeployPlan) {
    print!("{}", format_plan(plan));
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploy_core::config::DeployConfig;

    #[test]
    fn plan_lists_build_before_deploy() {
        let text = format_plan(&DeployConfig::default().plan());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "STEP    COMMAND");
        assert_eq!(lines[1], "build   ./build.sh");
        assert!(lines[2].starts_with("deploy  near deploy --accountId room2.ostolex.testnet"));
    }
}
