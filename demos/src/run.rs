use std::time::Duration;

use anyhow::Result;

use seedmodule::prelude::*;

const SLEEP_TIME: u64 = 3;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut module = SeedModule::new()?;

    println!("Calling module.async to sleep for {SLEEP_TIME} seconds...");
    module.invoke_async(Duration::from_secs(SLEEP_TIME), |res| match res {
        Ok(res) => println!(
            "Finished sleeping for {} milliseconds",
            res.slept_time().as_millis()
        ),
        Err(e) => tracing::error!("{e}"),
    })?;
    println!("Note that we're not blocking!");
    println!("We can do whatever we want for {SLEEP_TIME} seconds");

    module.run();

    Ok(())
}
