#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = oficina_cli::build_cli().get_matches();
    oficina_cli::init_tracing(matches.get_flag("json-logs"))?;
    oficina_cli::run(&matches).await
}
