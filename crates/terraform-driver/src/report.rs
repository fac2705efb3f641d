//! User-facing failure reports

/// Render an error for the operator, including whatever Terraform printed.
pub fn render(err: &anyhow::Error) -> String {
    let mut report = format!("Error: {:#}\n", err);

    let Some(tool_error) = err
        .chain()
        .find_map(|e| e.downcast_ref::<terraform_runner::Error>())
    else {
        return report;
    };

    match tool_error.captured_output() {
        Some(output) if !output.trim().is_empty() => {
            report.push_str("\nTerraform output:\n");
            report.push_str(output);
            if !output.ends_with('\n') {
                report.push('\n');
            }
        }
        Some(_) => report.push_str("\nTerraform produced no output.\n"),
        None if tool_error.is_start_failure() => {
            report.push_str("\nTerraform could not be started, so there is no output to show.\n")
        }
        None => {}
    }

    report
}
