use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    Config,
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};
use portfolio_client::{
    DEFAULT_ENDPOINT, RelayClient,
    form::{ContactForm, Notification, Notifier},
};

/// Send a message through the portfolio contact relay.
#[derive(Parser, Debug)]
#[command(name = "portfolio-contact", version)]
struct Args {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    message: String,
    /// Relay endpoint the form posts to.
    #[arg(long, env = "PORTFOLIO_RELAY_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,
    /// Origin of the page the form lives on.
    #[arg(long, env = "PORTFOLIO_SITE_ORIGIN")]
    origin: Option<String>,
    #[arg(short, long)]
    verbose: bool,
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, notification: &Notification) {
        println!("{}", notification);
    }
}

fn init_logger(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = init_logger(args.verbose) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let mut client = RelayClient::new(args.endpoint);
    if let Some(origin) = args.origin {
        client = client.with_origin(origin);
    }

    let mut form = ContactForm::new(args.name, args.email, args.message);
    match form.submit(&client, &mut StdoutNotifier).await {
        Notification::Sent => ExitCode::SUCCESS,
        Notification::Failed(_) => ExitCode::FAILURE,
    }
}
