use std::env;
use std::process;

use anyhow::Context;
use simple_client::{init_tracing, script, Session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut args = env::args().skip(1);
    let (Some(host), Some(port)) = (args.next(), args.next()) else {
        println!("Error, expecting <host> <port>");
        process::exit(1);
    };
    let port: u16 = port
        .parse()
        .with_context(|| format!("invalid port {port:?}"))?;

    let mut session = Session::connect(&host, port)
        .await
        .context("opening connection")?;
    session.spawn_reader();
    script::run(&mut session).await.context("playing script")?;
    session.close().await;
    session.join().await.context("waiting for reader")?;
    Ok(())
}
