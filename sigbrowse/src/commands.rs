use clap::arg;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("sigbrowse")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sigbrowse")
        .about("Open OSINT browser tabs and searches for a domain or company from YAML signatures")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-s --"sigs" <PATHS>)
                .required(false)
                .help("Comma-separated files, folders or file-glob patterns containing YAML signature files")
                .default_value(""),
        )
        .arg(
            arg!(-d --"domain" <DOMAIN>)
                .required(false)
                .help("Domain name to investigate")
                .default_value(""),
        )
        .arg(
            arg!(-c --"company" <COMPANY>)
                .required(false)
                .help("Company name to investigate")
                .default_value(""),
        )
        .arg(
            arg!(-a --"asset" <ASSET>)
                .required(false)
                .help("Domain or company; classified automatically and used when -d/-c is not given"),
        )
        .arg(
            arg!(-m --"max-threads" <NUM_WORKERS>)
                .required(false)
                .visible_alias("mt")
                .help("Max number of workers processing signatures concurrently")
                .value_parser(clap::value_parser!(usize))
                .default_value("20"),
        )
        .arg(
            arg!(-n --"dry-run")
                .required(false)
                .help("Print the URLs that would be opened instead of opening them")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            arg!(-v --"verbose")
                .required(false)
                .help("Show diagnostic logging on stderr")
                .action(clap::ArgAction::SetTrue),
        )
}
