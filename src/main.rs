//! kubernetes-aws-authenticator CLI entry point.

use kubernetes_aws_authenticator::cli::{
    build_registry, commands, handle_error, parse_args, Commands,
};
use kubernetes_aws_authenticator::infrastructure::logging::{LogConfig, LoggerImpl};

fn main() {
    let (cli, matches) = match parse_args(std::env::args_os()) {
        Ok(parsed) => parsed,
        Err(err) => err.exit(),
    };

    let log_config = LogConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
    };
    if let Err(err) = LoggerImpl::init(&log_config) {
        handle_error(err, cli.json);
    }

    let registry = match build_registry(&cli, &matches) {
        Ok(registry) => registry,
        Err(err) => handle_error(err.into(), cli.json),
    };

    let result = match cli.command {
        Commands::Show => commands::show::execute(&registry, cli.json),
        Commands::Validate => commands::validate::execute(&registry, cli.json),
    };

    if let Err(err) = result {
        handle_error(err, cli.json);
    }
}
