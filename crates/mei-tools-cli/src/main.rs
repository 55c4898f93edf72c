use anyhow::{Context, Result, bail};
use mei_tools_config::Config;
use mei_tools_engine::correlate::count_staff_openings;
use mei_tools_engine::{
    Position, TextBuffer, TextView, identifier_at, identifiers, position_of_identifier,
};
use std::path::PathBuf;
use std::{env, process};

const USAGE: &str = "Usage: mei-tools-cli <file.mei> <command>
       mei-tools-cli init-config

Commands:
  at <row:col>   identifier of the element at a 0-based position
  find <id>      position of the element with that xml:id
  ids            every xml:id in document order
  info           line count, staff count and effective render settings";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    At(Position),
    Find(String),
    Ids,
    Info,
}

#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    /// Write the default config file if there is none yet.
    InitConfig,
    Query { path: PathBuf, command: Command },
}

fn parse_args(args: &[String]) -> Result<Invocation> {
    let (path, rest) = match args {
        [only] if only == "init-config" => return Ok(Invocation::InitConfig),
        [path, rest @ ..] => (PathBuf::from(path), rest),
        [] => bail!("missing file argument"),
    };

    let command = match rest {
        [name, position] if name == "at" => Command::At(position.parse()?),
        [name, id] if name == "find" => Command::Find(id.clone()),
        [name] if name == "ids" => Command::Ids,
        [name] if name == "info" => Command::Info,
        [] => bail!("missing command"),
        [name, ..] => bail!("unknown command or wrong arguments: {name}"),
    };

    Ok(Invocation::Query { path, command })
}

fn run(command: &Command, text: &TextBuffer, config: &Config) -> Vec<String> {
    match command {
        Command::At(position) => {
            vec![identifier_at(text, *position).unwrap_or_else(|| "-".to_string())]
        }
        Command::Find(id) => vec![
            position_of_identifier(text, id)
                .map(|position| position.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ],
        Command::Ids => identifiers(text)
            .into_iter()
            .map(|site| format!("{}\t{}", site.position, site.id))
            .collect(),
        Command::Info => info(text, config),
    }
}

/// What a notation view opened on `text` would start with.
fn info(text: &TextBuffer, config: &Config) -> Vec<String> {
    let options = config.render_options();
    let settings = config.view_settings();
    let staffs = count_staff_openings(&text.text());

    let pagination = if staffs > settings.staff_threshold {
        format!("forced (more than {} staffs)", settings.staff_threshold)
    } else if options.paginate {
        "on".to_string()
    } else {
        "off".to_string()
    };

    vec![
        format!("lines: {}", text.line_count()),
        format!("staffs: {staffs}"),
        format!("pagination: {pagination}"),
        format!("scale: {}%", options.scale),
        format!("highlight: {}", config.highlight_color()),
        format!(
            "retries: attach {:?}, container {:?}",
            settings.attach_retry, settings.container_retry
        ),
    ]
}

fn init_config() -> Result<()> {
    let config_path = Config::config_path();
    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }
    Config::default().save()?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (path, command) = match parse_args(&args) {
        Ok(Invocation::InitConfig) => return init_config(),
        Ok(Invocation::Query { path, command }) => (path, command),
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config = Config::load_or_default().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {e}");
        Config::default()
    });
    log::debug!("Effective config: {config:?}");

    let bytes =
        std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let text = TextBuffer::from_bytes(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

    for line in run(&command, &text, &config) {
        println!("{line}");
    }
    Ok(())
}
