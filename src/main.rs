use streamql::config::{Config, DEFAULT_CONFIG_PATH};

fn main() {
    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let config = Config::load(&cli.config_path);

    if let Err(err) = streamql::repl::run(config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

struct CliConfig {
    config_path: String,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config_path = std::env::var("STREAMQL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("streamql {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--config" => {
                config_path = args.next().ok_or_else(|| "error: --config expects a value".to_string())?;
            }
            _ if arg.starts_with("--config=") => {
                config_path = arg.trim_start_matches("--config=").to_string();
            }
            _ => {
                return Err(format!("error: unknown option '{arg}'"));
            }
        }
    }

    Ok(CliConfig { config_path })
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "streamql {version}

A Prolog/datalog-style logic query REPL over s-expression syntax.

Usage:
  streamql [OPTIONS]

Options:
  --config <path>    Path to the TOML config file.
                      Default: {default_config} (or $STREAMQL_CONFIG).
  -h, --help         Show this help message.
  -V, --version      Print version information.

Exit codes:
  0  Success.
  1  Internal error (REPL I/O failure). A missing or invalid config file is
     not fatal: it is only reported when the `run` command is typed.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        default_config = DEFAULT_CONFIG_PATH
    )
}
