use campus_notes::core::nickname;
use campus_notes::utils::logger;
use campus_notes::{NicknameResolver, PostgrestClient};
use clap::Parser;

#[derive(Parser)]
#[command(name = "shuffle")]
#[command(about = "Preview random nicknames, optionally resolving one against the directory")]
struct Args {
    /// How many nicknames to generate
    #[arg(short, long, default_value = "5")]
    count: usize,

    /// Check candidates against this REST endpoint and print one unused nickname
    #[arg(long)]
    directory_url: Option<String>,

    #[arg(long)]
    api_key: Option<String>,

    #[arg(long, default_value = "profiles")]
    profiles_table: String,

    #[arg(long, default_value = "10")]
    max_attempts: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    match args.directory_url {
        Some(url) => {
            let directory = PostgrestClient::new(url, args.api_key, args.profiles_table);
            let resolver = NicknameResolver::with_max_attempts(directory, args.max_attempts);
            let nickname = resolver.resolve().await?;
            println!("{}", nickname);
        }
        None => {
            for nickname in nickname::generate_nicknames(args.count) {
                println!("{}", nickname);
            }
        }
    }

    Ok(())
}
