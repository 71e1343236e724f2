use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::TransportBox;
use crate::domain::services::Themes;
use crate::infrastructure::transport::agent::AgentClient;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn print_sessions_list() -> Result<()> {
    let transport: TransportBox = Box::<AgentClient>::default();
    let sessions = transport.list_sessions().await?;

    if sessions.is_empty() {
        println!("There are no open sessions on the agent server. You should start your first one!");
    } else {
        let res = sessions
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let n = idx + 1;
                return format!("- ({n}) {name}");
            })
            .collect::<Vec<String>>();

        println!("{}", res.join("\n"));
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

pub fn build() -> Command {
    return Command::new("confab")
        .about("Terminal UI to chat with a remote inference agent, with per-reply diagnostic traces.")
        .arg(
            Arg::new("completions")
                .long("completions")
                .help("Generates shell completions.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell)),
        )
        .arg(
            Arg::new("agent-url")
                .long("agent-url")
                .env("CONFAB_AGENT_URL")
                .num_args(1)
                .help("URL of the agent server. [default: http://localhost:5000]")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("agent-name")
                .long("agent-name")
                .env("CONFAB_AGENT_NAME")
                .num_args(1)
                .help("Display name for the remote agent in chat bubbles. [default: Agent]")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("username")
                .long("username")
                .env("CONFAB_USERNAME")
                .num_args(1)
                .help("Your user name displayed in all chat bubbles. [default: shell username]")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .env("CONFAB_THEME")
                .num_args(1)
                .help("Color scheme used for chat bubbles. [default: dusk]")
                .action(ArgAction::Set)
                .value_parser(PossibleValuesParser::new(Themes::list())),
        )
        .arg(
            Arg::new("show-traces")
                .long("show-traces")
                .env("CONFAB_SHOW_TRACES")
                .num_args(1)
                .help("Show diagnostic traces under agent replies on startup. [default: false]")
                .action(ArgAction::Set)
                .value_parser(PossibleValuesParser::new(["true", "false"])),
        )
        .arg(
            Arg::new("transport-timeout")
                .long("transport-timeout")
                .env("CONFAB_TRANSPORT_TIMEOUT")
                .num_args(1)
                .help("Timeout in milliseconds for agent requests. [default: 120000]")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("health-check-timeout")
                .long("health-check-timeout")
                .env("CONFAB_HEALTH_CHECK_TIMEOUT")
                .num_args(1)
                .help("Timeout in milliseconds for the startup health check. [default: 1000]")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config-file")
                .short('c')
                .long("config-file")
                .env("CONFAB_CONFIG_FILE")
                .num_args(1)
                .help("Path to a configuration file.")
                .action(ArgAction::Set),
        )
        .subcommand(Command::new("sessions").about("Lists the sessions open on the agent server."))
        .subcommand(
            Command::new("config")
                .about("Configuration file commands.")
                .subcommand_required(true)
                .subcommand(
                    Command::new("create").about("Creates a default config file."),
                ),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    if let Some(completions) = matches.get_one::<Shell>("completions") {
        print_completions(*completions, &mut build());
    }

    match matches.subcommand() {
        Some(("sessions", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_sessions_list().await?;
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => {
            if let Some(("create", _)) = subcmd_matches.subcommand() {
                create_config_file().await?;
            }
            return Ok(false);
        }
        _ => {}
    }

    Config::load(build(), vec![&matches]).await?;
    return Ok(true);
}
