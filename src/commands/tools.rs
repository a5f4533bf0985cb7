use crate::tools::ToolKind;
use anyhow::Result;

pub fn run(json: bool) -> Result<()> {
    if json {
        let catalog: Vec<_> = ToolKind::ALL.iter().map(|k| k.describe()).collect();
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    for kind in ToolKind::ALL {
        let multi = if kind.multi_file() { " (multiple files)" } else { "" };
        println!("{:<14} {}{}", kind.slug(), kind.description(), multi);
    }

    Ok(())
}
