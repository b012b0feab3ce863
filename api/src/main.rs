use std::{net::SocketAddr, sync::Arc};

use clap::Parser;
use ordermate_api::{
    application::{
        http::server::http_server::{router, state},
        logging::init_logger,
    },
    args::Args,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let app_state = state(args.clone()).await?;
    let router = router(app_state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        %addr,
        mode = ?args.llm.response_mode,
        model = %args.openai.model,
        "ordermate api listening"
    );
    axum::serve(listener, router).await?;

    Ok(())
}
