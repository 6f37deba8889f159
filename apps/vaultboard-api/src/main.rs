use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = vaultboard_api::Args::parse();

	vaultboard_api::run(args).await
}
