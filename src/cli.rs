use clap::{crate_description, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use pretty_env_logger::env_logger::{Builder, Target, WriteStyle};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::exit;

use cfddns_rs::config::DEFAULT_CONFIG_PATH;
use cfddns_rs::service::{DNSSync, Options};
use cfddns_rs::Config;

fn set_logger_level(b: &mut Builder, debug: bool) {
    if debug {
        b.filter_level(log::LevelFilter::Debug);
    } else if env::var("RUST_LOG").is_ok() {
        b.parse_default_env();
    } else {
        b.filter_level(log::LevelFilter::Info);
    }
    b.init();
}

fn setup_logger(debug: bool, log_file: Option<&Path>) -> std::io::Result<()> {
    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let builder = &mut Builder::new();
        builder
            .target(Target::Pipe(Box::new(file)))
            .write_style(WriteStyle::Never)
            .format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} {} {}",
                    buf.timestamp(),
                    record.target(),
                    record.level(),
                    record.args()
                )
            });
        set_logger_level(builder, debug);
        return Ok(());
    }

    // Adapted from env_logger examples. <3 Systemd support
    match std::env::var("RUST_LOG_STYLE") {
        Ok(s) if s == "SYSTEMD" => {
            let builder = &mut Builder::new();
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "<{}>{}: {}",
                    match record.level() {
                        log::Level::Error => 3,
                        log::Level::Warn => 4,
                        log::Level::Info => 6,
                        log::Level::Debug => 7,
                        log::Level::Trace => 7,
                    },
                    record.target(),
                    record.args()
                )
            });
            set_logger_level(builder, debug);
        }
        _ => {
            let builder = &mut pretty_env_logger::formatted_timed_builder();
            set_logger_level(builder, debug);
        }
    };
    Ok(())
}

fn command() -> Command {
    Command::new("cfddns")
        .about(format!(
            "{}\n{}",
            crate_description!(),
            "Settings are read from an INI file before every pass.",
        ))
        .version(crate_version!())
        .disable_version_flag(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .default_value(DEFAULT_CONFIG_PATH)
                .help("Configuration file"),
        )
        .arg(
            Arg::new("loop_delay")
                .short('l')
                .long("loop_delay")
                .value_name("MINUTES")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Repeat every MINUTES minutes instead of running once"),
        )
        .arg(
            Arg::new("debug")
                .action(ArgAction::SetTrue)
                .short('d')
                .long("debug")
                .help("Enable debug logging"),
        )
        .arg(
            Arg::new("version")
                .action(ArgAction::Version)
                .short('v')
                .long("version")
                .help("Print version"),
        )
        .arg(
            Arg::new("check")
                .action(ArgAction::SetTrue)
                .short('t')
                .long("test")
                .help("Check the configuration"),
        )
        .arg(
            Arg::new("dry-run")
                .action(ArgAction::SetTrue)
                .long("dry-run")
                .help("Show changes without applying them"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Append log lines to FILE instead of the terminal"),
        )
}

fn options(args: &ArgMatches) -> Options {
    let config_path = args
        .get_one::<PathBuf>("config")
        .expect("config has a default")
        .clone();

    Options::new(config_path)
        .dry_run(args.get_flag("dry-run"))
        .loop_minutes(args.get_one::<i64>("loop_delay").copied())
}

fn check(options: &Options) -> ! {
    let result = Config::load(&options.config_path).and_then(|config| {
        config.validate()?;
        Ok(config)
    });

    match result {
        Ok(config) => {
            let kinds: Vec<&str> = config.configured_kinds().map(|(k, _)| k.as_str()).collect();
            tracing::info!(
                domain = config.main.domain.as_str(),
                zone_id = config.main.zone_id.as_str(),
                kinds = kinds.join(",").as_str(),
                force_update = config.main.force_update,
                "Configuration is valid."
            );
            exit(0);
        }
        Err(err) => {
            tracing::error!("{err}");
            exit(2);
        }
    }
}

pub(crate) fn main() {
    let args = command().get_matches();

    if let Err(err) = setup_logger(
        args.get_flag("debug"),
        args.get_one::<PathBuf>("log-file").map(PathBuf::as_path),
    ) {
        eprintln!("Failed to open log file: {err}");
        exit(2);
    }

    let options = options(&args);

    if args.get_flag("check") {
        check(&options);
    }

    DNSSync::new(options).run();
}
