use std::time::Duration;

use anyhow::Result;

use seedmodule::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let module = SeedModule::new()?;

    println!("Calling module.sleep to sleep for 3 seconds...");
    let fut = module.sleep(Duration::from_secs(3))?;
    println!("Note that we're not blocking!");

    let res = fut.await?;
    println!(
        "Finished sleeping for {} milliseconds",
        res.slept_time().as_millis()
    );

    Ok(())
}
