use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use schedgen_core::calendar::CalendarStore;
use schedgen_core::config::SchedGenConfig;

pub async fn run(config: &SchedGenConfig, calendar_name: &str, force: bool) -> Result<()> {
    let mut store = config.store();

    if store.find(calendar_name).await?.is_none() {
        anyhow::bail!("Calendar '{}' not found", calendar_name);
    }

    // Confirm unless --force
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete calendar '{}' and all of its events?",
                calendar_name
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".dimmed());
            return Ok(());
        }
    }

    store.delete(calendar_name).await?;
    println!("Deleted {}", calendar_name.bold());

    Ok(())
}
