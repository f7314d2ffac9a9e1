use anyhow::Result;

use aibtc_dashboard::config::Config;
use aibtc_dashboard::logging::{log, obj, v_str, Domain, Level};
use aibtc_dashboard::server;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("backend", v_str(&cfg.backend_base)),
            ("listen", v_str(&cfg.listen_addr)),
        ]),
    );
    server::serve(cfg).await
}
