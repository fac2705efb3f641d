use anyhow::Result;
use std::path::Path;
use terraform_runner::Outputs;

const MASK: &str = "<sensitive>";

pub async fn run(config_path: &Path, format: &str) -> Result<()> {
    if format != "text" && format != "json" {
        anyhow::bail!("Invalid format: {}. Must be 'text' or 'json'", format);
    }

    let mut driver = super::load_driver(config_path)?;
    let outputs = driver.outputs().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&masked(&outputs))?);
    } else {
        for (name, record) in &outputs {
            println!("{} = {}", name, display_value(record));
        }
    }

    Ok(())
}

fn display_value(record: &terraform_runner::OutputRecord) -> String {
    if record.sensitive {
        return MASK.to_string();
    }
    match record.value.as_str() {
        Some(s) => s.to_string(),
        None => record.value.to_string(),
    }
}

fn masked(outputs: &Outputs) -> serde_json::Map<String, serde_json::Value> {
    outputs
        .iter()
        .map(|(name, record)| {
            let value = if record.sensitive {
                serde_json::Value::String(MASK.to_string())
            } else {
                record.value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}
