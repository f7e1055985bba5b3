use std::io::Write;

use crate::app::{AppContext, PortalsError, Result};
use crate::config::Config;
use crate::domain::Item;

pub async fn print_catalog(ctx: &AppContext, json: bool) -> Result<()> {
    let items = ctx.source.fetch().await?;
    let mut stdout = std::io::stdout().lock();

    if json {
        let body = serde_json::to_string_pretty(&items)
            .map_err(|e| PortalsError::Catalog(e.to_string()))?;
        writeln!(stdout, "{}", body)?;
    } else {
        write_table(&mut stdout, &items)?;
    }
    Ok(())
}

fn write_table(out: &mut impl Write, items: &[Item]) -> Result<()> {
    for item in items {
        writeln!(
            out,
            "{:<7} {:<18} {:>12} UZS  {}",
            item.id,
            item.name,
            item.display_price(),
            item.animation_source
        )?;
    }
    writeln!(out, "{} items", items.len())?;
    Ok(())
}

pub fn print_config_path() -> Result<()> {
    let path = Config::default_config_path()?;
    println!("{}", path.display());
    Ok(())
}
