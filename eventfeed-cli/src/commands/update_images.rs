use anyhow::Result;

use eventfeed_core::sync;
use eventfeed_core::{EventStore, ImageResolver};

pub async fn run(output: &str) -> Result<()> {
    println!("Refreshing event images in {output}");

    let store = EventStore::new(output);
    let resolver = ImageResolver::new()?;

    let resolved = sync::refresh_images(&store, &resolver).await?;

    println!("Done: {resolved} image(s) resolved.");
    Ok(())
}
