// SPDX-License-Identifier: MPL-2.0
use sales_studio::app::{self, Flags};

const HELP: &str = "\
Sales Studio - product photo background editor

USAGE:
  sales_studio [OPTIONS] [IMAGE]

OPTIONS:
  --lang <code>        UI language (e.g. en-US, ja)
  --config-dir <dir>   Directory holding settings.toml
  --api-url <url>      Processing service base URL
  -h, --help           Print this help

ENVIRONMENT:
  SALES_STUDIO_CONFIG_DIR   Same as --config-dir
  SALES_STUDIO_API_URL      Same as --api-url
  RUST_LOG                  Log filter (default: sales_studio=info)
";

/// Default log filter when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "sales_studio=info";

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let api_url = args.opt_value_from_str("--api-url")?;
    let file_path = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    Ok(Some(Flags {
        lang,
        file_path,
        config_dir,
        api_url,
    }))
}

fn main() -> iced::Result {
    init_tracing();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            tracing::error!(error = %err, "invalid command line");
            eprint!("{HELP}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}
